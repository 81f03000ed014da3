//! Tag directives
//!
//! A [`DirectiveSet`] describes what should happen to the tags of every field
//! that is processed:
//!
//! - `add` - ensure a key exists, defaulting its value from the field name
//! - `delete` - drop a key
//! - `overwrite` - replace the value of an existing key, either with an
//!   explicit value or the derived default
//!
//! Directives come from repeatable, comma-separated CLI flags and are parsed
//! by [`DirectiveSet::from_flags`]. Resolution against a field's existing tags
//! lives in [`resolver`].

mod error;
pub mod resolver;

pub use error::{DirectiveError, DirectiveKind};
pub use resolver::{InteractionPolicy, Resolution, ResolveOptions, resolve};

use std::collections::BTreeMap;

use crate::tags::{is_valid_key, is_valid_value};

/// Add/delete/overwrite instructions for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectiveSet {
    /// Keys to add, unique, in first-seen order
    pub add: Vec<String>,
    /// Keys to delete, unique, in first-seen order
    pub delete: Vec<String>,
    /// Keys to overwrite; `None` means "use the derived default"
    pub overwrite: BTreeMap<String, Option<String>>,
}

impl DirectiveSet {
    /// Build a directive set from raw flag values.
    ///
    /// Each value may hold several comma-separated entries. Overwrite entries
    /// take the form `key=value`; `key` or `key=` request the derived default.
    ///
    /// # Errors
    /// Returns `DirectiveError::InvalidKey` for keys outside the tag key
    /// grammar and `DirectiveError::InvalidValue` for overwrite values
    /// containing a double quote.
    ///
    /// # Examples
    /// ```
    /// use gotag::directives::DirectiveSet;
    ///
    /// let set = DirectiveSet::from_flags(
    ///     &["json,xml".to_string()],
    ///     &[],
    ///     &["db=user_id".to_string(), "yaml".to_string()],
    /// ).unwrap();
    /// assert_eq!(set.add, vec!["json", "xml"]);
    /// assert_eq!(set.overwrite["db"].as_deref(), Some("user_id"));
    /// assert_eq!(set.overwrite["yaml"], None);
    /// ```
    pub fn from_flags(
        add: &[String],
        delete: &[String],
        overwrite: &[String],
    ) -> Result<Self, DirectiveError> {
        let add = unique_keys(add, DirectiveKind::Add)?;
        let delete = unique_keys(delete, DirectiveKind::Delete)?;

        let mut overwrites = BTreeMap::new();
        for entry in split_comma_separated(overwrite) {
            let (key, value) = parse_overwrite_entry(&entry)?;
            overwrites.insert(key, value);
        }

        Ok(Self {
            add,
            delete,
            overwrite: overwrites,
        })
    }

    /// True when no directive was given
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.delete.is_empty() && self.overwrite.is_empty()
    }
}

/// Split repeatable flag values on commas, trimming and dropping empty parts
#[must_use]
pub fn split_comma_separated(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn unique_keys(values: &[String], kind: DirectiveKind) -> Result<Vec<String>, DirectiveError> {
    let mut keys: Vec<String> = Vec::new();
    for key in split_comma_separated(values) {
        validate_key(&key, kind)?;
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    Ok(keys)
}

fn parse_overwrite_entry(entry: &str) -> Result<(String, Option<String>), DirectiveError> {
    let (key, value) = match entry.split_once('=') {
        Some((key, value)) => (key.trim(), value.trim()),
        None => (entry, ""),
    };
    validate_key(key, DirectiveKind::Overwrite)?;

    if !is_valid_value(value) {
        return Err(DirectiveError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        });
    }

    let value = (!value.is_empty()).then(|| value.to_string());
    Ok((key.to_string(), value))
}

fn validate_key(key: &str, kind: DirectiveKind) -> Result<(), DirectiveError> {
    if is_valid_key(key) {
        Ok(())
    } else {
        Err(DirectiveError::InvalidKey {
            kind,
            key: key.to_string(),
        })
    }
}
