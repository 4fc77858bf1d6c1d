use crate::dictionary::Dictionaries;
use crate::errors::{Error, Result};
use crate::filter::IgnoreRules;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the per-user config directory searched as a fallback.
const APP_DIR: &str = "textswap";

/// A parsed configuration document.
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    /// Named dictionaries, in the order they are declared.
    pub dictionaries: Dictionaries,
    /// File and directory exclusion rules.
    #[serde(flatten)]
    pub ignore: IgnoreRules,
}

/// A utility for locating and loading configuration files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Finds the configuration file.
    ///
    /// The search order is:
    /// 1. `config_path` as given (absolute, or relative to the current directory).
    /// 2. Inside the user config directory, e.g. `~/.config/textswap/` on Linux.
    ///
    /// Returns [`Error::ConfigNotFound`] listing every location tried.
    pub fn find_config(config_path: &Path) -> Result<PathBuf> {
        let user_dir = dirs::config_dir().map(|dir| dir.join(APP_DIR));
        Self::find_config_in(config_path, user_dir.as_deref())
    }

    /// [`ConfigLoader::find_config`] with an explicit fallback directory.
    pub fn find_config_in(config_path: &Path, user_dir: Option<&Path>) -> Result<PathBuf> {
        if config_path.exists() {
            return Ok(config_path.to_path_buf());
        }

        let mut tried = vec![config_path.display().to_string()];

        if config_path.is_relative() {
            if let Some(dir) = user_dir {
                let user_config = dir.join(config_path);
                if user_config.exists() {
                    tracing::info!(
                        requested = %config_path.display(),
                        using = %user_config.display(),
                        "config not found in working directory, using user config"
                    );
                    return Ok(user_config);
                }
                tried.push(user_config.display().to_string());
            }
        }

        Err(Error::ConfigNotFound {
            path: config_path.to_path_buf(),
            tried,
        })
    }

    /// Loads and shape-checks a config file.
    ///
    /// Files ending in `.yaml` or `.yml` are read as YAML, anything else as JSON.
    pub fn load(path: &Path) -> Result<Config> {
        let text = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let value: Value = if is_yaml(path) {
            serde_yaml::from_str(&text)?
        } else {
            serde_json::from_str(&text).map_err(Error::InvalidJson)?
        };

        Self::from_value(value)
    }

    /// Parses a JSON config document held in memory.
    pub fn from_json_str(text: &str) -> Result<Config> {
        let value: Value = serde_json::from_str(text).map_err(Error::InvalidJson)?;
        Self::from_value(value)
    }

    /// Validates a generic document and converts it into a [`Config`].
    ///
    /// A missing or non-object `dictionaries` field is reported on its own,
    /// before any other shape problem.
    pub fn from_value(value: Value) -> Result<Config> {
        let has_dictionaries = value
            .get("dictionaries")
            .map(Value::is_object)
            .unwrap_or(false);
        if !has_dictionaries {
            return Err(Error::MissingDictionaries);
        }

        let config: Config = serde_json::from_value(value).map_err(Error::InvalidConfig)?;
        tracing::debug!(
            dictionaries = config.dictionaries.len(),
            ignore_extensions = config.ignore.ignore_extensions.len(),
            ignore_directories = config.ignore.ignore_directories.len(),
            ignore_file_prefixes = config.ignore.ignore_file_prefixes.len(),
            "loaded config"
        );
        Ok(config)
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|os| os.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_json_keeps_declaration_order() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(
            &path,
            r#"{
                "dictionaries": {
                    "zeta": {"zz": "1", "aa": "2", "mm": "3"},
                    "alpha": {"x": "y"}
                },
                "ignore_extensions": [".png"],
                "ignore_directories": [".git"],
                "ignore_file_prefixes": ["."]
            }"#,
        )
        .unwrap();

        let config = ConfigLoader::load(&path).unwrap();
        let names: Vec<_> = config.dictionaries.keys().map(String::as_str).collect();
        assert_eq!(names, ["zeta", "alpha"]);
        let sources: Vec<_> = config.dictionaries["zeta"].iter().map(|(s, _)| s).collect();
        assert_eq!(sources, ["zz", "aa", "mm"]);
        assert_eq!(config.ignore.ignore_extensions, [".png"]);
        assert_eq!(config.ignore.ignore_directories, [".git"]);
        assert_eq!(config.ignore.ignore_file_prefixes, ["."]);
    }

    #[test]
    fn test_ignore_rules_default_to_empty() {
        let config = ConfigLoader::from_json_str(r#"{"dictionaries": {"d": {"a": "b"}}}"#).unwrap();
        assert_eq!(config.ignore, IgnoreRules::default());
    }

    #[test]
    fn test_invalid_json() {
        let err = ConfigLoader::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, Error::InvalidJson(_)));
        assert!(err.to_string().starts_with("Invalid JSON"));
    }

    #[test]
    fn test_missing_or_misshapen_dictionaries() {
        for doc in [
            r#"{"other_key": "value"}"#,
            r#"{"dictionaries": ["a", "b"]}"#,
            r#"{"dictionaries": "nope"}"#,
            r#"[1, 2, 3]"#,
        ] {
            let err = ConfigLoader::from_json_str(doc).unwrap_err();
            assert!(matches!(err, Error::MissingDictionaries), "{doc}");
        }
    }

    #[test]
    fn test_empty_dictionaries_object_is_valid_shape() {
        let config = ConfigLoader::from_json_str(r#"{"dictionaries": {}}"#).unwrap();
        assert!(config.dictionaries.is_empty());
    }

    #[test]
    fn test_non_string_values_are_rejected() {
        let err = ConfigLoader::from_json_str(r#"{"dictionaries": {"d": {"a": 1}}}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));

        let err = ConfigLoader::from_json_str(
            r#"{"dictionaries": {"d": {}}, "ignore_extensions": ".png"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_load_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("swap.yaml");
        fs::write(
            &path,
            "dictionaries:\n  brand:\n    Acme: Globex\n    acme: globex\nignore_directories:\n  - target\n",
        )
        .unwrap();

        let config = ConfigLoader::load(&path).unwrap();
        let pairs: Vec<_> = config.dictionaries["brand"].iter().collect();
        assert_eq!(pairs, [("Acme", "Globex"), ("acme", "globex")]);
        assert_eq!(config.ignore.ignore_directories, ["target"]);
    }

    #[test]
    fn test_unreadable_config() {
        let temp_dir = TempDir::new().unwrap();
        let err = ConfigLoader::load(&temp_dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, Error::ConfigRead { .. }));
    }

    #[test]
    fn test_find_config_falls_back_to_user_dir() {
        let user_dir = TempDir::new().unwrap();
        fs::write(user_dir.path().join("textswap-fallback-test.json"), "{}").unwrap();

        let relative = Path::new("textswap-fallback-test.json");
        let found = ConfigLoader::find_config_in(relative, Some(user_dir.path())).unwrap();
        assert_eq!(found, user_dir.path().join("textswap-fallback-test.json"));

        let absent = Path::new("textswap-absent.json");
        let err = ConfigLoader::find_config_in(absent, Some(user_dir.path())).unwrap_err();
        match err {
            Error::ConfigNotFound { tried, .. } => {
                let fallback = user_dir.path().join("textswap-absent.json");
                assert_eq!(tried, [absent.display().to_string(), fallback.display().to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_find_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, "{}").unwrap();
        assert_eq!(ConfigLoader::find_config(&path).unwrap(), path);

        let missing = temp_dir.path().join("missing.json");
        let err = ConfigLoader::find_config(&missing).unwrap_err();
        match err {
            Error::ConfigNotFound { tried, .. } => {
                assert_eq!(tried, [missing.display().to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
