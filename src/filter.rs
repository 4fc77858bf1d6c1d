use serde::Deserialize;

/// Rules deciding which files and directories a batch leaves alone.
///
/// All matching is on bare names: plain suffix and prefix comparisons for
/// files, exact comparison for directories. No globbing.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreRules {
    /// File-name suffixes to skip, e.g. `.png` or `.min.js`.
    #[serde(default)]
    pub ignore_extensions: Vec<String>,
    /// Directory names whose whole subtree is pruned.
    #[serde(default)]
    pub ignore_directories: Vec<String>,
    /// File-name prefixes to skip, e.g. `.` for dotfiles.
    #[serde(default)]
    pub ignore_file_prefixes: Vec<String>,
}

impl IgnoreRules {
    /// Returns `true` if a file with this name must not reach the engine.
    pub fn should_skip_file(&self, file_name: &str) -> bool {
        self.ignore_extensions
            .iter()
            .any(|ext| file_name.ends_with(ext.as_str()))
            || self
                .ignore_file_prefixes
                .iter()
                .any(|prefix| file_name.starts_with(prefix.as_str()))
    }

    /// Returns `true` if a directory with this name must not be descended into.
    pub fn should_prune_dir(&self, dir_name: &str) -> bool {
        self.ignore_directories.iter().any(|d| d == dir_name)
    }
}
