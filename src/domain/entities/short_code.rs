//! Validated short code value.

use std::fmt;

use crate::utils::code_generator::{generate_code, is_valid_code};

/// A six character alphanumeric short code.
///
/// Only constructible through [`ShortCode::parse`] or [`ShortCode::generate`],
/// so holders never need to re-check the shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShortCode(String);

impl ShortCode {
    /// Parses a raw code, returning `None` if it is not exactly six ASCII
    /// alphanumerics.
    pub fn parse(raw: &str) -> Option<Self> {
        is_valid_code(raw).then(|| Self(raw.to_string()))
    }

    /// Draws a fresh random candidate.
    pub fn generate() -> Self {
        Self(generate_code())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ShortCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ShortCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
