use crate::dictionary::ReplacementSet;
use crate::errors::FileError;
use std::fs;
use std::path::Path;

/// Core engine for literal find-and-replace over text.
///
/// A `Replacer` holds an ordered [`ReplacementSet`] and applies it one pair at
/// a time. Each pass runs over the output of the previous one, so an early
/// pair can consume text a later pair would have matched, and a target string
/// can be rewritten again by a later pair. That ordering is part of the
/// contract:
///
/// ```
/// use textswap::dictionary::ReplacementSet;
/// use textswap::Replacer;
///
/// let set: ReplacementSet = [("hello", "hi"), ("hello world", "goodbye")]
///     .into_iter()
///     .collect();
/// let out = Replacer::new(set).apply("hello hello world");
/// assert_eq!(out.content, "hi hi world");
/// ```
#[derive(Debug, Clone)]
pub struct Replacer {
    replacements: ReplacementSet,
}

/// Options for processing a file.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessOptions {
    /// If `true`, changes are calculated but not written to disk.
    pub dry_run: bool,
}

/// The outcome of running the replacements over some text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub content: String,
    /// Number of occurrences replaced, summed over every pass.
    pub changes: usize,
    /// `true` iff `content` differs from the input.
    pub modified: bool,
}

/// A file that went through the engine.
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub original: String,
    pub content: String,
    pub changes: usize,
    pub modified: bool,
}

impl Replacer {
    pub fn new(replacements: ReplacementSet) -> Self {
        Self { replacements }
    }

    pub fn replacements(&self) -> &ReplacementSet {
        &self.replacements
    }

    /// Applies every pair, in order, to `content`.
    ///
    /// Each pass replaces all non-overlapping occurrences left to right. An
    /// empty target deletes the source. `modified` compares the final text with
    /// the input, so passes that cancel each other out leave it `false`.
    pub fn apply(&self, content: &str) -> Applied {
        let mut current = content.to_string();
        let mut changes = 0;

        for (source, target) in self.replacements.iter() {
            if let Some((replaced, count)) = replace_counting(&current, source, target) {
                changes += count;
                current = replaced;
            }
        }

        let modified = current != content;
        Applied {
            content: current,
            changes,
            modified,
        }
    }

    /// Reads a file, applies the replacements and, unless this is a dry run,
    /// writes the result back in place when it changed.
    ///
    /// The write is a plain overwrite: there is no temp file or rename, so a
    /// crash mid-write can leave the file truncated.
    pub fn process_file(
        &self,
        path: &Path,
        options: ProcessOptions,
    ) -> std::result::Result<FileRecord, FileError> {
        self.process_with(&Utf8Files, path, options)
    }

    /// Same as [`Replacer::process_file`], reading and writing through `files`.
    pub fn process_with(
        &self,
        files: &dyn TextFiles,
        path: &Path,
        options: ProcessOptions,
    ) -> std::result::Result<FileRecord, FileError> {
        let original = files.read_text(path)?;

        let Applied {
            content,
            changes,
            modified,
        } = self.apply(&original);

        if modified && !options.dry_run {
            files.write_text(path, &content)?;
        }

        Ok(FileRecord {
            original,
            content,
            changes,
            modified,
        })
    }
}

/// Replaces every non-overlapping `from` in `haystack` in one scan.
///
/// Returns `None` when nothing matched. Matching is the same as
/// [`str::replace`], including an empty `from` matching at every char boundary.
fn replace_counting(haystack: &str, from: &str, to: &str) -> Option<(String, usize)> {
    let mut result = String::new();
    let mut last = 0;
    let mut count = 0;

    for (start, part) in haystack.match_indices(from) {
        if count == 0 {
            result.reserve(haystack.len());
        }
        result.push_str(&haystack[last..start]);
        result.push_str(to);
        last = start + part.len();
        count += 1;
    }

    if count == 0 {
        return None;
    }
    result.push_str(&haystack[last..]);
    Some((result, count))
}

/// Reads and writes file content as text.
///
/// Failures come back as [`FileError`]s so a batch can record them and go on.
pub trait TextFiles {
    fn read_text(&self, path: &Path) -> std::result::Result<String, FileError>;
    fn write_text(&self, path: &Path, content: &str) -> std::result::Result<(), FileError>;
}

/// UTF-8 files on the local file system, read and written byte for byte.
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8Files;

impl TextFiles for Utf8Files {
    fn read_text(&self, path: &Path) -> std::result::Result<String, FileError> {
        let bytes = fs::read(path).map_err(|e| FileError::from_read(path.to_path_buf(), e))?;
        String::from_utf8(bytes).map_err(|_| FileError::NotUtf8 {
            path: path.to_path_buf(),
        })
    }

    fn write_text(&self, path: &Path, content: &str) -> std::result::Result<(), FileError> {
        fs::write(path, content.as_bytes()).map_err(|e| FileError::from_write(path.to_path_buf(), e))
    }
}
