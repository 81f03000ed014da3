//! Naming conventions for derived tag values
//!
//! When a directive does not carry an explicit value, the tag value is derived
//! from the field identifier using one of the styles below.

use std::fmt;
use std::str::FromStr;

use heck::{ToKebabCase, ToLowerCamelCase, ToSnakeCase};
use serde::Deserialize;
use thiserror::Error;

/// Case style applied to a field identifier to produce a default tag value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum CaseStyle {
    /// `UserID` -> `userId`
    #[default]
    LowerCamel,
    /// `UserID` -> `user_id`
    Snake,
    /// `UserID` -> `user-id`
    Kebab,
}

/// Error returned for an unrecognized case style name
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CaseStyleError {
    #[error("Unknown case style '{0}'. Use camelCase, snake_case or kebab-case")]
    Unknown(String),
}

impl CaseStyle {
    /// Derive the default tag value for `identifier`.
    ///
    /// An empty identifier (embedded field) yields an empty string.
    ///
    /// # Examples
    /// ```
    /// use gotag::case::CaseStyle;
    ///
    /// assert_eq!(CaseStyle::LowerCamel.default_value("FirstName"), "firstName");
    /// assert_eq!(CaseStyle::Snake.default_value("FirstName"), "first_name");
    /// assert_eq!(CaseStyle::Kebab.default_value("FirstName"), "first-name");
    /// ```
    #[must_use]
    pub fn default_value(self, identifier: &str) -> String {
        match self {
            Self::LowerCamel => identifier.to_lower_camel_case(),
            Self::Snake => identifier.to_snake_case(),
            Self::Kebab => identifier.to_kebab_case(),
        }
    }

    /// Canonical spelling, as accepted on the command line
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LowerCamel => "camelCase",
            Self::Snake => "snake_case",
            Self::Kebab => "kebab-case",
        }
    }
}

impl FromStr for CaseStyle {
    type Err = CaseStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "camel" | "camelcase" | "lowercamel" | "lower-camel" | "lower_camel"
            | "lowercamelcase" => Ok(Self::LowerCamel),
            "snake" | "snake_case" | "snakecase" | "snake-case" => Ok(Self::Snake),
            "kebab" | "kebab-case" | "kebabcase" | "kebab_case" => Ok(Self::Kebab),
            _ => Err(CaseStyleError::Unknown(s.to_string())),
        }
    }
}

impl TryFrom<String> for CaseStyle {
    type Error = CaseStyleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for CaseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
