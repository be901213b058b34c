//! Entry kind tags and coarse file categorisation.
//!
//! `EntryKind` is the closed set of filesystem object types a walk can
//! produce. `FileCategory` is the much coarser bucket used by the `--type`
//! filter, derived from the basename alone.

use std::fs::FileType;
use std::os::unix::fs::FileTypeExt;
use std::path::Path;

/// Filesystem object type, one case per inode type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Fifo,
    CharDevice,
    Directory,
    BlockDevice,
    Regular,
    Symlink,
    Socket,
}

impl EntryKind {
    /// Classify a `std::fs::FileType` into an `EntryKind`.
    pub fn from_file_type(ft: FileType) -> Self {
        if ft.is_dir() {
            Self::Directory
        } else if ft.is_symlink() {
            Self::Symlink
        } else if ft.is_fifo() {
            Self::Fifo
        } else if ft.is_char_device() {
            Self::CharDevice
        } else if ft.is_block_device() {
            Self::BlockDevice
        } else if ft.is_socket() {
            Self::Socket
        } else {
            Self::Regular
        }
    }

    /// MIME-style label for inode types that have no meaningful extension.
    pub fn mime_label(self) -> &'static str {
        match self {
            Self::Fifo => "inode/fifo",
            Self::CharDevice => "inode/chardevice",
            Self::Directory => "inode/directory",
            Self::BlockDevice => "inode/blockdevice",
            Self::Regular => "text/plain",
            Self::Symlink => "inode/link",
            Self::Socket => "inode/socket",
        }
    }
}

/// Coarse category used by the `--type` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    Executable,
    Image,
    CoreDump,
}

impl FileCategory {
    /// Classify a basename into a category, if it fits one.
    ///
    /// Matching is extension-based and case-insensitive, with a special case
    /// for `core` / `core.<pid>` dump names which usually carry no extension.
    pub fn classify(name: &str) -> Option<Self> {
        if is_core_dump_name(name) {
            return Some(Self::CoreDump);
        }

        let ext = name.rsplit('.').next().unwrap_or("");
        if ext.len() == name.len() {
            // No dot at all, so no extension to classify by.
            return None;
        }

        let lower = ext.to_ascii_lowercase();
        match lower.as_str() {
            "exe" | "bin" | "out" | "run" | "so" | "dll" | "com" | "appimage" => {
                Some(Self::Executable)
            }
            "bmp" | "eps" | "gif" | "ico" | "iff" | "jpg" | "jpeg" | "pcx" | "png" | "ppm"
            | "ps" | "psp" | "sgi" | "svg" | "tga" | "tif" | "tiff" | "webp" | "xbm" | "xpm"
            | "xwd" => Some(Self::Image),
            "core" => Some(Self::CoreDump),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Executable => "executable",
            Self::Image => "image",
            Self::CoreDump => "core dump",
        }
    }
}

/// `core`, `core.1234` and friends, as produced by the kernel.
fn is_core_dump_name(name: &str) -> bool {
    match name.strip_prefix("core") {
        Some("") => true,
        Some(rest) => rest
            .strip_prefix('.')
            .is_some_and(|pid| !pid.is_empty() && pid.bytes().all(|b| b.is_ascii_digit())),
        None => false,
    }
}

/// MIME-style label for a path, looked up by extension.
///
/// Only used for display next to ranked files; unknown extensions fall back
/// to the plain-file label.
pub fn mime_label(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "txt" | "text" => "text/plain",
        "html" | "htm" => "text/html",
        "xml" => "text/xml",
        "tar" => "application/x-tar",
        "tgz" => "application/x-tar-gz",
        "gz" => "application/x-compressed",
        "bmp" => "image/x-ms-bmp",
        "eps" | "ps" => "application/postscript",
        "gif" => "image/gif",
        "ico" => "image/x-icon",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "ppm" => "image/x-portable-pixmap",
        "svg" => "image/svg+xml",
        "tga" => "image/tga",
        "tif" | "tiff" => "image/tiff",
        "xbm" => "image/x-xbitmap",
        "xpm" => "image/x-xpixmap",
        "xwd" => "image/x-xwindowdump",
        "exe" | "bin" | "so" | "dll" => "application/octet-stream",
        "core" => "application/x-coredump",
        "sh" | "csh" | "ksh" => "application/x-shellscript",
        "tcl" => "text/x-tcl",
        "wav" => "audio/x-wav",
        _ => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or(std::borrow::Cow::Borrowed(""));
            if is_core_dump_name(&name) {
                "application/x-coredump"
            } else {
                "text/plain"
            }
        }
    }
}
