use crate::diff::unified_diff;
use crate::errors::FileError;
use crate::filter::IgnoreRules;
use crate::replacer::{ProcessOptions, Replacer, TextFiles, Utf8Files};
use crate::reporter::Reporter;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Counters accumulated over one batch.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Files that were read successfully, modified or not.
    pub files_processed: usize,
    /// Processed files whose content changed.
    pub files_modified: usize,
    /// Files that reached the engine but failed to read or write, in walk order.
    pub skipped: Vec<FileError>,
}

impl BatchSummary {
    pub fn files_skipped(&self) -> usize {
        self.skipped.len()
    }

    /// Human-readable skip reasons, in the order they occurred.
    pub fn skip_reasons(&self) -> impl Iterator<Item = String> + '_ {
        self.skipped.iter().map(ToString::to_string)
    }
}

/// Walks a folder and runs a [`Replacer`] over every eligible file.
///
/// Files are handled one at a time in walk order: every file of a directory
/// comes before any of its subdirectories, otherwise entries keep the order
/// the OS lists them in, and each subdirectory is finished before the next
/// sibling. Ignored directories are pruned before they are entered, ignored
/// files are dropped without being counted, and a failure on one file is
/// recorded and the walk goes on.
pub struct BatchRunner<'a> {
    replacer: &'a Replacer,
    rules: &'a IgnoreRules,
    options: ProcessOptions,
    files: &'a dyn TextFiles,
}

impl<'a> BatchRunner<'a> {
    pub fn new(replacer: &'a Replacer, rules: &'a IgnoreRules, options: ProcessOptions) -> Self {
        Self {
            replacer,
            rules,
            options,
            files: &Utf8Files,
        }
    }

    /// Reads and writes through `files` instead of the local UTF-8 files.
    pub fn with_files(mut self, files: &'a dyn TextFiles) -> Self {
        self.files = files;
        self
    }

    /// Processes everything under `root` and reports to `reporter`.
    pub fn run(&self, root: &Path, reporter: &mut dyn Reporter) -> BatchSummary {
        if self.options.dry_run {
            reporter.dry_run_started();
        }

        let mut summary = BatchSummary::default();
        for path in self.eligible_files(root) {
            self.process(&path, reporter, &mut summary);
        }

        tracing::info!(
            processed = summary.files_processed,
            modified = summary.files_modified,
            skipped = summary.files_skipped(),
            "batch finished"
        );
        reporter.summary(&summary);
        summary
    }

    /// Lists the files under `root` that pass the ignore rules, in walk order.
    pub fn eligible_files(&self, root: &Path) -> Vec<PathBuf> {
        // Stable sort: files ahead of directories, listing order kept otherwise.
        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by(|a, b| a.file_type().is_dir().cmp(&b.file_type().is_dir()))
            .into_iter()
            .filter_entry(|entry| !self.is_pruned(entry));

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable directory entry");
                    continue;
                }
            };

            if !is_file_like(&entry) {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            if self.rules.should_skip_file(&name) {
                tracing::debug!(path = %entry.path().display(), "ignored by file rules");
                continue;
            }

            files.push(entry.into_path());
        }
        files
    }

    fn is_pruned(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return false;
        }
        let pruned = self
            .rules
            .should_prune_dir(&entry.file_name().to_string_lossy());
        if pruned {
            tracing::debug!(path = %entry.path().display(), "pruned ignored directory");
        }
        pruned
    }

    fn process(&self, path: &Path, reporter: &mut dyn Reporter, summary: &mut BatchSummary) {
        match self.replacer.process_with(self.files, path, self.options) {
            Ok(record) => {
                summary.files_processed += 1;
                tracing::debug!(
                    path = %path.display(),
                    changes = record.changes,
                    modified = record.modified,
                    "processed file"
                );
                if !record.modified {
                    return;
                }
                summary.files_modified += 1;
                if self.options.dry_run {
                    let label = path.display().to_string();
                    let diff = unified_diff(&label, &record.original, &record.content);
                    reporter.file_would_modify(path, &diff);
                } else {
                    reporter.file_modified(path);
                }
            }
            Err(e) => {
                tracing::warn!("{e}");
                summary.skipped.push(e);
            }
        }
    }
}

/// Regular files, and symlinks that do not lead to a directory. Symlinked
/// directories are listed but never entered; a dangling link is passed on so
/// the read error is recorded.
fn is_file_like(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    if file_type.is_file() {
        return true;
    }
    file_type.is_symlink() && !entry.path().is_dir()
}
