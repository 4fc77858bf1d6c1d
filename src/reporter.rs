use crate::batch::BatchSummary;
use owo_colors::OwoColorize;
use std::io::Write;
use std::path::Path;

/// Receives the user-facing messages of a run.
///
/// The batch driver only talks to this trait, so it never depends on where
/// output goes or how it is styled.
pub trait Reporter {
    /// A dictionary was picked because it was the only one.
    fn dictionary_selected(&mut self, name: &str);
    /// A dry run is about to start.
    fn dry_run_started(&mut self);
    /// A file was rewritten.
    fn file_modified(&mut self, path: &Path);
    /// A file would be rewritten; `diff` is its unified diff.
    fn file_would_modify(&mut self, path: &Path, diff: &str);
    /// The batch finished.
    fn summary(&mut self, summary: &BatchSummary);
}

/// Plain-text reporter over any writer, with optional colour.
pub struct ConsoleReporter<W: Write> {
    writer: W,
    color: bool,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(writer: W, color: bool) -> Self {
        Self { writer, color }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.writer, "{text}") {
            tracing::warn!(error = %e, "failed to write report output");
        }
    }

    fn warn_line(&mut self, text: &str) {
        if self.color {
            let styled = text.yellow().to_string();
            self.line(&styled);
        } else {
            self.line(text);
        }
    }
}

impl ConsoleReporter<std::io::Stdout> {
    /// A reporter on standard output.
    pub fn stdout(color: bool) -> Self {
        Self::new(std::io::stdout(), color)
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn dictionary_selected(&mut self, name: &str) {
        self.line(&format!("Using dictionary: {name}"));
    }

    fn dry_run_started(&mut self) {
        self.line("Dry run mode - no files will be modified\n");
    }

    fn file_modified(&mut self, path: &Path) {
        self.line(&format!("Modified: {}", path.display()));
    }

    fn file_would_modify(&mut self, path: &Path, diff: &str) {
        self.line(&format!("\nWould modify: {}", path.display()));
        if !diff.is_empty() {
            self.warn_line(diff.trim_end_matches('\n'));
        }
    }

    fn summary(&mut self, summary: &BatchSummary) {
        self.line(&format!(
            "\nProcessed {} files, {} modified",
            summary.files_processed, summary.files_modified
        ));

        if summary.files_skipped() > 0 {
            self.warn_line(&format!("\nSkipped {} files:", summary.files_skipped()));
            for reason in summary.skip_reasons() {
                self.warn_line(&format!("  {reason}"));
            }
        }

        if let Err(e) = self.writer.flush() {
            tracing::warn!(error = %e, "failed to flush report output");
        }
    }
}
