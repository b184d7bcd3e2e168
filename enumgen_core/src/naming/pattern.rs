//! Wildcard patterns used by naming rules.
//!
//! Only `*` is special: in a target pattern it matches any run of characters
//! (including none), in a name pattern its first occurrence is replaced by the
//! substitution value.

use std::fmt;

use itertools::Itertools;
use regex::Regex;

/// A target pattern such as `*Event`, matched against the whole identifier name.
#[derive(Clone)]
pub struct Wildcard {
    source: String,
    regex: Regex,
}

impl Wildcard {
    /// Compiles `pattern`. Every character except `*` is matched literally and
    /// case-sensitively.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let body = pattern.split('*').map(regex::escape).join(".*");
        let regex = Regex::new(&format!("^(?s:{body})$"))?;
        Ok(Self {
            source: pattern.to_owned(),
            regex,
        })
    }

    /// Whether `name` matches the pattern in full.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    /// The pattern as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Debug for Wildcard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Wildcard").field(&self.source).finish()
    }
}

impl fmt::Display for Wildcard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl PartialEq for Wildcard {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Wildcard {}

/// Replaces the first `*` in `pattern` with `value`.
#[must_use]
pub fn substitute(pattern: &str, value: &str) -> String {
    pattern.replacen('*', value, 1)
}
