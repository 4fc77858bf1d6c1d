use crate::errors::{Error, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use std::fmt;

/// Which way a dictionary is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Keys are replaced by their values (`1` on the command line).
    KeysToValues,
    /// Values are replaced by their keys (`2` on the command line).
    ValuesToKeys,
}

impl TryFrom<u8> for Direction {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Direction::KeysToValues),
            2 => Ok(Direction::ValuesToKeys),
            other => Err(Error::InvalidDirection(other)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::KeysToValues => write!(f, "keys-to-values"),
            Direction::ValuesToKeys => write!(f, "values-to-keys"),
        }
    }
}

/// An ordered set of `source -> target` replacement pairs.
///
/// Iteration order is application order, so this is backed by an `IndexMap`
/// and keeps the order the pairs were declared in.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct ReplacementSet(IndexMap<String, String>);

impl ReplacementSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a pair, or updates the target of an existing source in place.
    pub fn insert(&mut self, source: impl Into<String>, target: impl Into<String>) {
        self.0.insert(source.into(), target.into());
    }

    /// Swaps every pair around.
    ///
    /// When several sources share a target, the last declared one wins and the
    /// others are dropped without notice. The surviving entry keeps the position
    /// of the first occurrence of that target.
    pub fn inverted(&self) -> Self {
        let mut inverse = IndexMap::with_capacity(self.0.len());
        for (source, target) in &self.0 {
            inverse.insert(target.clone(), source.clone());
        }
        Self(inverse)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(s, t)| (s.as_str(), t.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, source: &str) -> Option<&str> {
        self.0.get(source).map(String::as_str)
    }
}

impl<S: Into<String>, T: Into<String>> FromIterator<(S, T)> for ReplacementSet {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(s, t)| (s.into(), t.into())).collect())
    }
}

/// All named dictionaries from a config, in declaration order.
pub type Dictionaries = IndexMap<String, ReplacementSet>;

/// The dictionary chosen for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub name: String,
    /// `true` when no name was requested and the only dictionary was picked.
    pub auto_selected: bool,
    /// The pairs to apply, already turned around for [`Direction::ValuesToKeys`].
    pub replacements: ReplacementSet,
}

/// Picks a dictionary by name and applies the direction.
///
/// With no name and exactly one dictionary, that one is auto-selected. With no
/// name and several, the caller has to ask the user first; this returns
/// [`Error::DictionaryNameRequired`] so a non-interactive caller fails cleanly.
pub fn resolve(
    dictionaries: &Dictionaries,
    requested: Option<&str>,
    direction: Direction,
) -> Result<Resolution> {
    if dictionaries.is_empty() {
        return Err(Error::NoDictionaries);
    }

    let (name, auto_selected) = match requested {
        Some(name) => (name, false),
        None if dictionaries.len() == 1 => match dictionaries.keys().next() {
            Some(only) => (only.as_str(), true),
            None => return Err(Error::NoDictionaries),
        },
        None => {
            return Err(Error::DictionaryNameRequired {
                available: dictionaries.keys().cloned().collect(),
            });
        }
    };

    let dictionary = dictionaries
        .get(name)
        .ok_or_else(|| Error::DictionaryNotFound(name.to_string()))?;

    let replacements = match direction {
        Direction::KeysToValues => dictionary.clone(),
        Direction::ValuesToKeys => dictionary.inverted(),
    };

    if replacements.get("").is_some() {
        tracing::warn!(
            dictionary = name,
            %direction,
            "dictionary has an empty source string; it will match between every character"
        );
    }

    tracing::info!(dictionary = name, %direction, pairs = replacements.len(), "resolved dictionary");

    Ok(Resolution {
        name: name.to_string(),
        auto_selected,
        replacements,
    })
}
