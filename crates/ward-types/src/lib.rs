//! Validated text primitives shared by the ward crates.
//!
//! Both types trim their input on construction, so a value that exists is never blank.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextError {
    #[error("text cannot be blank")]
    Empty,
}

fn trimmed_non_blank(input: &str) -> Result<&str, TextError> {
    match input.trim() {
        "" => Err(TextError::Empty),
        trimmed => Ok(trimmed),
    }
}

/// Free text with at least one visible character, e.g. discharge notes.
///
/// Serialises as a plain JSON string; deserialising a blank string fails.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Trim `input` and keep it if anything is left.
    ///
    /// # Errors
    /// Returns [`TextError::Empty`] for empty or whitespace-only input.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        trimmed_non_blank(input.as_ref()).map(|t| Self(t.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for NonEmptyText {
    type Error = TextError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NonEmptyText> for String {
    fn from(text: NonEmptyText) -> Self {
        text.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A medical record number as typed into a search box.
///
/// Surrounding whitespace is dropped and everything else is kept as typed, inner spaces
/// included. Comparison against stored records is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mrn(String);

impl Mrn {
    pub fn parse(input: impl AsRef<str>) -> Result<Self, TextError> {
        trimmed_non_blank(input.as_ref()).map(|t| Self(t.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when `candidate` is exactly this MRN.
    pub fn matches(&self, candidate: &str) -> bool {
        self.0 == candidate
    }
}

impl std::fmt::Display for Mrn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Mrn {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mrn::parse(s)
    }
}
