//! Report formatting and display.
//!
//! Four output forms: the default long form with section headers and
//! colors, two compact forms for batch processing (`--short`,
//! `--short-line`), and a stream form that emits bare paths for piping.
//! Totals can be shown in any combination of gigabyte/megabyte/kilobyte/
//! byte rows.

use std::io::{self, Write};
use std::path::Path;

use chrono::{Local, LocalResult, TimeZone};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::category::mime_label;
use crate::ranked::FileRecord;
use crate::report::UsageReport;
use crate::usage::DirUsageRow;

/// How much scaffolding the report carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputForm {
    /// Headed sections, full unit names, color.
    #[default]
    Long,
    /// Terse headers and suffixed units.
    Short,
    /// Like short, but totals stay on a single line.
    ShortLine,
    /// Bare paths only, for feeding other commands.
    Stream,
}

/// Which total-usage rows to print. Selecting none means all four.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnitSelection {
    pub gigabytes: bool,
    pub megabytes: bool,
    pub kilobytes: bool,
    pub bytes: bool,
}

impl UnitSelection {
    pub fn all() -> Self {
        Self {
            gigabytes: true,
            megabytes: true,
            kilobytes: true,
            bytes: true,
        }
    }

    pub fn is_none(&self) -> bool {
        !(self.gigabytes || self.megabytes || self.kilobytes || self.bytes)
    }

    /// Default to every row when nothing was selected.
    pub fn or_all(self) -> Self {
        if self.is_none() { Self::all() } else { self }
    }
}

#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub form: OutputForm,
    pub units: UnitSelection,
    pub use_color: bool,
    /// Print the file/directory count block.
    pub show_counts: bool,
    /// Width tree headers are padded to in the compact forms.
    pub dir_width: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            form: OutputForm::Long,
            units: UnitSelection::all(),
            use_color: false,
            show_counts: false,
            dir_width: 0,
        }
    }
}

/// Value column shown beside each ranked file.
#[derive(Clone, Copy, PartialEq)]
enum RankColumn {
    Size,
    SizeAndMime,
    Time,
}

/// Writes reports to stdout, one tree at a time.
pub struct ReportPrinter {
    config: OutputConfig,
    stdout: StandardStream,
}

impl ReportPrinter {
    pub fn new(config: OutputConfig) -> Self {
        let choice = if config.use_color && config.form == OutputForm::Long {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self {
            config,
            stdout: StandardStream::stdout(choice),
        }
    }

    /// Print one tree's report. `show_header` identifies the tree when
    /// several are being processed.
    pub fn print(&mut self, report: &UsageReport, show_header: bool) -> io::Result<()> {
        if show_header {
            self.print_header(&report.root)?;
        }

        if let Some(records) = &report.largest {
            self.print_ranking("Largest", records, RankColumn::SizeAndMime)?;
        }
        if let Some(records) = &report.smallest {
            self.print_ranking("Smallest", records, RankColumn::Size)?;
        }
        if let Some(records) = &report.oldest {
            self.print_ranking("Oldest", records, RankColumn::Time)?;
        }
        if let Some(records) = &report.newest {
            self.print_ranking("Newest", records, RankColumn::Time)?;
        }

        if let Some(rows) = &report.directories {
            self.print_dir_usages(rows)?;
        }

        if self.config.show_counts && self.config.form != OutputForm::Stream {
            writeln!(self.stdout, "  {:>12} Files", report.file_count)?;
            writeln!(self.stdout, "  {:>12} Dirs", report.dir_count)?;
        }

        self.print_totals(report)
    }

    fn print_header(&mut self, root: &Path) -> io::Result<()> {
        match self.config.form {
            OutputForm::Long => {
                writeln!(self.stdout)?;
                self.set_bold()?;
                writeln!(
                    self.stdout,
                    "--------------- Directory '{}' ---------------",
                    root.display()
                )?;
                self.reset()?;
                writeln!(self.stdout)
            }
            OutputForm::ShortLine => {
                write!(
                    self.stdout,
                    "{:<width$}",
                    root.display(),
                    width = self.config.dir_width
                )
            }
            OutputForm::Short | OutputForm::Stream => {
                writeln!(
                    self.stdout,
                    "{:<width$}",
                    root.display(),
                    width = self.config.dir_width
                )
            }
        }
    }

    fn print_ranking(
        &mut self,
        title: &str,
        records: &[FileRecord],
        column: RankColumn,
    ) -> io::Result<()> {
        let width = records
            .iter()
            .map(|r| display_path(&r.path).chars().count())
            .max()
            .unwrap_or(0);

        match self.config.form {
            OutputForm::Long => {
                self.set_bold()?;
                writeln!(self.stdout, "List of Top {} {} Files", records.len(), title)?;
                self.reset()?;
                writeln!(self.stdout)?;
            }
            OutputForm::Short | OutputForm::ShortLine => {
                writeln!(self.stdout, "{} {}", title, records.len())?;
            }
            OutputForm::Stream => {}
        }

        for record in records {
            self.print_rank_row(record, column, width)?;
        }

        if self.config.form == OutputForm::Long {
            writeln!(self.stdout)?;
        }
        Ok(())
    }

    fn print_rank_row(
        &mut self,
        record: &FileRecord,
        column: RankColumn,
        width: usize,
    ) -> io::Result<()> {
        let name = display_path(&record.path);

        if self.config.form == OutputForm::Stream {
            return writeln!(self.stdout, "{}", name);
        }

        let indent = match self.config.form {
            OutputForm::Long => "",
            _ => "  ",
        };

        write!(self.stdout, "{}", indent)?;
        self.set_fg(Color::Cyan)?;
        write!(self.stdout, "{name:<width$}")?;
        self.reset()?;

        match column {
            RankColumn::Size => writeln!(self.stdout, " {:>8}", record.size),
            RankColumn::SizeAndMime => {
                write!(self.stdout, " {:>8}", record.size)?;
                if self.config.form == OutputForm::Long {
                    write!(self.stdout, " {}", mime_label(&record.path))?;
                }
                writeln!(self.stdout)
            }
            RankColumn::Time => writeln!(self.stdout, " {}", format_time(record.time)),
        }
    }

    fn print_dir_usages(&mut self, rows: &[DirUsageRow]) -> io::Result<()> {
        if self.config.form == OutputForm::Stream {
            for row in rows {
                writeln!(self.stdout, "{}", display_path(&row.path))?;
            }
            return Ok(());
        }

        let width = rows
            .iter()
            .map(|r| display_path(&r.path).chars().count())
            .max()
            .unwrap_or(0);

        if self.config.form == OutputForm::Long {
            writeln!(self.stdout)?;
            self.set_bold()?;
            writeln!(self.stdout, "Directory Usages :-")?;
            self.reset()?;
            writeln!(self.stdout)?;
        }

        let units = self.config.units.or_all();
        for row in rows {
            let name = display_path(&row.path);
            self.set_fg(Color::Blue)?;
            write!(self.stdout, "{name:<width$}")?;
            self.reset()?;

            // The first selected unit decides the value column.
            let value = ByteUnits::new(row.size);
            if units.gigabytes {
                writeln!(self.stdout, "  {:>12.2}G", value.gigabytes())?;
            } else if units.megabytes {
                writeln!(self.stdout, "  {:>12.2}M", value.megabytes())?;
            } else if units.kilobytes {
                writeln!(self.stdout, "  {:>12.2}K", value.kilobytes())?;
            } else {
                writeln!(self.stdout, "  {:<10}", row.size)?;
            }
        }

        if self.config.form == OutputForm::Long {
            writeln!(self.stdout)?;
        }
        Ok(())
    }

    fn print_totals(&mut self, report: &UsageReport) -> io::Result<()> {
        let units = self.config.units.or_all();
        let value = ByteUnits::new(report.total_bytes);

        match self.config.form {
            OutputForm::Long => {
                if report.has_rankings() {
                    self.set_bold()?;
                    writeln!(self.stdout, "Total :-")?;
                    self.reset()?;
                }
                if units.gigabytes {
                    writeln!(self.stdout, "  {:>12.2} Gigabytes", value.gigabytes())?;
                }
                if units.megabytes {
                    writeln!(self.stdout, "  {:>12.2} Megabytes", value.megabytes())?;
                }
                if units.kilobytes {
                    writeln!(self.stdout, "  {:>12.2} Kilobytes", value.kilobytes())?;
                }
                if units.bytes {
                    writeln!(self.stdout, "  {:>12} Bytes", report.total_bytes)?;
                }
                Ok(())
            }
            OutputForm::Short | OutputForm::ShortLine => {
                let newline = self.config.form == OutputForm::Short;
                if report.has_rankings() {
                    write!(self.stdout, "Total")?;
                    self.end_row(newline)?;
                }
                if units.gigabytes {
                    write!(self.stdout, "  {:>12.2}Gb", value.gigabytes())?;
                    self.end_row(newline)?;
                }
                if units.megabytes {
                    write!(self.stdout, "  {:>12.2}Mb", value.megabytes())?;
                    self.end_row(newline)?;
                }
                if units.kilobytes {
                    write!(self.stdout, "  {:>12.2}Kb", value.kilobytes())?;
                    self.end_row(newline)?;
                }
                if units.bytes {
                    write!(self.stdout, "  {:>12}", report.total_bytes)?;
                    self.end_row(newline)?;
                }
                writeln!(self.stdout)
            }
            OutputForm::Stream => Ok(()),
        }
    }

    fn end_row(&mut self, newline: bool) -> io::Result<()> {
        if newline {
            writeln!(self.stdout)?;
        }
        Ok(())
    }

    fn set_bold(&mut self) -> io::Result<()> {
        self.stdout.set_color(ColorSpec::new().set_bold(true))
    }

    fn set_fg(&mut self, color: Color) -> io::Result<()> {
        self.stdout.set_color(ColorSpec::new().set_fg(Some(color)))
    }

    fn reset(&mut self) -> io::Result<()> {
        self.stdout.reset()
    }
}

/// Print a report as pretty JSON.
pub fn print_json(report: &UsageReport) -> io::Result<()> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    println!("{}", json);
    Ok(())
}

/// Fixed 1024-based unit conversions, mirroring the totals block.
#[derive(Debug, Clone, Copy)]
struct ByteUnits {
    bytes: u64,
}

impl ByteUnits {
    fn new(bytes: u64) -> Self {
        Self { bytes }
    }

    fn kilobytes(&self) -> f64 {
        self.bytes as f64 / 1024.0
    }

    fn megabytes(&self) -> f64 {
        self.kilobytes() / 1024.0
    }

    fn gigabytes(&self) -> f64 {
        self.megabytes() / 1024.0
    }
}

/// Paths are reported as discovered; a leading `./` is dropped for display.
fn display_path(path: &Path) -> String {
    let mut text = path.to_string_lossy().into_owned();
    while let Some(rest) = text.strip_prefix("./") {
        text = rest.to_string();
    }
    text
}

/// Local-time display for ranked file timestamps.
fn format_time(time: i64) -> String {
    match Local.timestamp_opt(time, 0) {
        LocalResult::Single(dt) => dt.format("%a %b %e %H:%M:%S %Y").to_string(),
        _ => time.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn byte_units_scale_by_1024() {
        let units = ByteUnits::new(3 * 1024 * 1024 * 1024);
        assert_eq!(units.kilobytes(), 3.0 * 1024.0 * 1024.0);
        assert_eq!(units.megabytes(), 3.0 * 1024.0);
        assert_eq!(units.gigabytes(), 3.0);
    }

    #[test]
    fn display_path_strips_leading_dot_slash() {
        assert_eq!(display_path(Path::new("./a/b.txt")), "a/b.txt");
        assert_eq!(display_path(Path::new("././x")), "x");
        assert_eq!(display_path(Path::new("a/./b")), "a/./b");
        assert_eq!(display_path(Path::new("/abs/path")), "/abs/path");
    }

    #[test]
    fn unit_selection_defaults_to_all() {
        assert_eq!(UnitSelection::default().or_all(), UnitSelection::all());

        let only_kb = UnitSelection {
            kilobytes: true,
            ..Default::default()
        };
        assert_eq!(only_kb.or_all(), only_kb);
    }

    #[test]
    fn format_time_produces_a_dated_string() {
        // 2001-09-09T01:46:40Z lands in 2001 in any timezone.
        let text = format_time(1_000_000_000);
        assert!(text.contains("2001"), "got: {text}");
    }

    #[test]
    fn json_report_round_trips() {
        let report = UsageReport {
            root: PathBuf::from("root"),
            total_bytes: 123,
            file_count: 2,
            dir_count: 1,
            largest: Some(vec![FileRecord {
                path: PathBuf::from("root/big"),
                size: 100,
                time: 7,
            }]),
            smallest: None,
            oldest: None,
            newest: None,
            directories: None,
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["total_bytes"], 123);
        assert_eq!(json["largest"][0]["size"], 100);
        // Disabled sections are omitted entirely.
        assert!(json.get("smallest").is_none());
        assert!(json.get("directories").is_none());
    }
}
