//! CLI entry point for hogs

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use hogs::{
    DEFAULT_RANK_CAPACITY, DateField, FileCategory, OutputConfig, OutputForm, ReportPrinter,
    ScanConfig, UnitSelection, print_json, scan_tree,
};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            // Respect FORCE_COLOR environment variable
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            // Respect TERM=dumb
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            // Check if stdout is a TTY
            std::io::stdout().is_terminal()
        }
    }
}

/// Which stat timestamp date comparisons use
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum DateArg {
    /// Last access time
    Accessed,
    /// Last modification time (default)
    #[default]
    Modified,
    /// Last status change time
    Changed,
}

impl From<DateArg> for DateField {
    fn from(arg: DateArg) -> Self {
        match arg {
            DateArg::Accessed => DateField::Accessed,
            DateArg::Modified => DateField::Modified,
            DateArg::Changed => DateField::Changed,
        }
    }
}

/// Coarse file type accepted by --type
#[derive(Debug, Clone, Copy, ValueEnum)]
enum TypeArg {
    /// Executable files
    Exe,
    /// Image files
    Image,
    /// Core dump files
    Core,
}

impl From<TypeArg> for FileCategory {
    fn from(arg: TypeArg) -> Self {
        match arg {
            TypeArg::Exe => FileCategory::Executable,
            TypeArg::Image => FileCategory::Image,
            TypeArg::Core => FileCategory::CoreDump,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "hogs")]
#[command(about = "Report disk usage and the largest/smallest/oldest/newest files in directory trees")]
#[command(version)]
struct Args {
    /// Directories to process
    #[arg(default_value = ".")]
    dirs: Vec<PathBuf>,

    /// Show the largest files
    #[arg(short = 'l', long)]
    largest: bool,

    /// Show the smallest files
    #[arg(short = 's', long)]
    smallest: bool,

    /// Show the oldest files
    #[arg(short = 'o', long)]
    oldest: bool,

    /// Show the newest files
    #[arg(short = 'n', long)]
    newest: bool,

    /// Show per-directory usage totals (largest first)
    #[arg(short = 'd', long)]
    dirs_usage: bool,

    /// Show file and directory counts
    #[arg(short = 'c', long)]
    count: bool,

    /// Number of files kept in every ranking (1-1000)
    #[arg(long = "top", value_name = "N")]
    top: Option<usize>,

    /// Number of largest files kept, overriding --top
    #[arg(long = "top-largest", value_name = "N")]
    top_largest: Option<usize>,

    /// Number of smallest files kept, overriding --top
    #[arg(long = "top-smallest", value_name = "N")]
    top_smallest: Option<usize>,

    /// Number of oldest files kept, overriding --top
    #[arg(long = "top-oldest", value_name = "N")]
    top_oldest: Option<usize>,

    /// Number of newest files kept, overriding --top
    #[arg(long = "top-newest", value_name = "N")]
    top_newest: Option<usize>,

    /// Timestamp used by the oldest/newest rankings
    #[arg(long = "date", value_name = "FIELD", default_value = "modified")]
    date: DateArg,

    /// Show the total as gigabytes
    #[arg(long = "gb")]
    gigabytes: bool,

    /// Show the total as megabytes
    #[arg(long = "mb")]
    megabytes: bool,

    /// Show the total as kilobytes
    #[arg(long = "kb")]
    kilobytes: bool,

    /// Show the total as bytes
    #[arg(long = "bytes")]
    bytes: bool,

    /// Short output form for easy batch processing
    #[arg(long = "short", conflicts_with_all = ["short_line", "stream"])]
    short: bool,

    /// Single-line output form for easy batch processing
    #[arg(long = "short-line", conflicts_with = "stream")]
    short_line: bool,

    /// Stream output form (bare paths) for feeding other commands
    #[arg(short = 'S', long = "stream")]
    stream: bool,

    /// Follow symbolic links
    #[arg(short = 'L', long = "follow-links")]
    follow_links: bool,

    /// Ignore hidden (dot) files and directories
    #[arg(short = 'H', long = "skip-hidden")]
    skip_hidden: bool,

    /// Only count entries whose path matches this pattern
    #[arg(short = 'm', long = "match", value_name = "REGEX")]
    match_pattern: Option<String>,

    /// Skip entries whose path matches this pattern
    #[arg(short = 'x', long = "exclude", value_name = "REGEX")]
    exclude_pattern: Option<String>,

    /// Only count files of this type
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    type_filter: Option<TypeArg>,

    /// Skip ordinary files whose status change is older than this
    /// (a number of days, or a duration like 90d or 26w)
    #[arg(short = 'p', long = "max-age", value_name = "AGE")]
    max_age: Option<String>,

    /// Prune entries whose basename matches glob (can be used multiple times)
    #[arg(short = 'I', long = "ignore", value_name = "GLOB")]
    ignore: Vec<String>,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Output each report in JSON format
    #[arg(long = "json", conflicts_with_all = ["short", "short_line", "stream"])]
    json: bool,
}

/// Parse an age limit as whole days, accepting either a bare day count
/// ("30") or a humantime duration ("90d", "26w"). Durations are truncated
/// to whole days.
fn parse_max_age(s: &str) -> Result<u64, String> {
    let trimmed = s.trim();
    if let Ok(days) = trimmed.parse::<u64>() {
        return Ok(days);
    }
    let duration = humantime::parse_duration(trimmed).map_err(|e| e.to_string())?;
    Ok(duration.as_secs() / 86400)
}

fn build_config(args: &Args, max_age_days: Option<u64>) -> ScanConfig {
    let base = args.top.unwrap_or(DEFAULT_RANK_CAPACITY);
    ScanConfig {
        rank_largest: args.largest,
        rank_smallest: args.smallest,
        rank_oldest: args.oldest,
        rank_newest: args.newest,
        top_largest: args.top_largest.unwrap_or(base),
        top_smallest: args.top_smallest.unwrap_or(base),
        top_oldest: args.top_oldest.unwrap_or(base),
        top_newest: args.top_newest.unwrap_or(base),
        dir_usage: args.dirs_usage,
        date_field: args.date.into(),
        include: args.match_pattern.clone(),
        exclude: args.exclude_pattern.clone(),
        type_filter: args.type_filter.map(Into::into),
        skip_hidden: args.skip_hidden,
        follow_links: args.follow_links,
        max_age_days,
        ignore_patterns: args.ignore.clone(),
    }
}

fn main() {
    let args = Args::parse();

    let max_age_days = match &args.max_age {
        Some(s) => match parse_max_age(s) {
            Ok(days) => Some(days),
            Err(e) => {
                eprintln!("hogs: invalid --max-age '{}': {}", s, e);
                process::exit(1);
            }
        },
        None => None,
    };

    let config = build_config(&args, max_age_days);

    // Capacity and pattern problems are fatal before any traversal starts.
    if let Err(e) = config.validate() {
        eprintln!("hogs: {}", e);
        process::exit(1);
    }

    for dir in &args.dirs {
        if !dir.exists() {
            eprintln!(
                "hogs: cannot access '{}': No such file or directory",
                dir.display()
            );
            process::exit(1);
        }
    }

    let form = if args.stream {
        OutputForm::Stream
    } else if args.short_line {
        OutputForm::ShortLine
    } else if args.short {
        OutputForm::Short
    } else {
        OutputForm::Long
    };

    let dir_width = args
        .dirs
        .iter()
        .map(|d| d.display().to_string().chars().count())
        .max()
        .unwrap_or(1);

    let output_config = OutputConfig {
        form,
        units: UnitSelection {
            gigabytes: args.gigabytes,
            megabytes: args.megabytes,
            kilobytes: args.kilobytes,
            bytes: args.bytes,
        }
        .or_all(),
        use_color: should_use_color(args.color),
        show_counts: args.count,
        dir_width,
    };

    let show_headers = args.dirs.len() > 1;
    let mut printer = ReportPrinter::new(output_config);

    // Each tree runs to completion (walk, report, discard) before the next.
    for dir in &args.dirs {
        let report = match scan_tree(&config, dir) {
            Ok(report) => report,
            Err(e) => {
                eprintln!("hogs: {}", e);
                process::exit(1);
            }
        };

        let result = if args.json {
            print_json(&report)
        } else {
            printer.print(&report, show_headers)
        };

        if let Err(e) = result {
            eprintln!("hogs: error writing output: {}", e);
            process::exit(1);
        }
    }
}
