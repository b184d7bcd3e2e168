//! Error types for a generation run.
//!
//! Every error is terminal: the run stops at the first one and no output file
//! is written.

use std::path::PathBuf;

use thiserror::Error;

/// A naming rule that cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// Wrong number of `:` separated segments.
    #[error("invalid {kind} rule {rule:?}: expected {expected}")]
    SegmentCount {
        /// Rule kind, such as `visitor`.
        kind: &'static str,
        /// The rule as given.
        rule: String,
        /// Expected segment layout.
        expected: &'static str,
    },

    /// A segment between separators is empty.
    #[error("invalid {kind} rule {rule:?}: empty segment")]
    EmptySegment {
        /// Rule kind, such as `visitor`.
        kind: &'static str,
        /// The rule as given.
        rule: String,
    },

    /// The target pattern could not be compiled.
    #[error("invalid {kind} rule {rule:?}: {reason}")]
    Pattern {
        /// Rule kind, such as `visitor`.
        kind: &'static str,
        /// The rule as given.
        rule: String,
        /// Why the pattern was rejected.
        reason: String,
    },
}

/// Failure to produce the parsed package.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The working directory could not be listed.
    #[error("could not list {}: {source}", path.display())]
    Dir {
        /// The file or directory involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: walkdir::Error,
    },

    /// A source file could not be read.
    #[error("could not read {}: {source}", path.display())]
    Read {
        /// The file or directory involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A source file is not valid Rust.
    #[error("could not parse {}: {source}", path.display())]
    Parse {
        /// The file or directory involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: syn::Error,
    },

    /// The directory holds no Rust source files.
    #[error("no Rust source files in {}", path.display())]
    Empty {
        /// The scanned directory.
        path: PathBuf,
    },
}

/// Any error that aborts a generation run.
#[derive(Debug, Error)]
pub enum GenError {
    /// Malformed naming rule.
    #[error("naming rule: {0}")]
    Rule(#[from] RuleError),

    /// The package could not be loaded.
    #[error("could not load package: {0}")]
    Load(#[from] LoadError),

    /// The scan finished without finding a single enum member.
    #[error("target type not found")]
    NotFound,

    /// A naming rule produced something that is not a Rust identifier.
    #[error("generated name {name:?} for {context} is not a valid identifier")]
    InvalidName {
        /// The offending name.
        name: String,
        /// What the name was generated for.
        context: String,
    },

    /// Two generated items, or two methods of one generated trait, would
    /// share a name.
    #[error("generated name {name:?} is used twice ({context})")]
    DuplicateName {
        /// The repeated name.
        name: String,
        /// Which kind of item repeats it.
        context: String,
    },

    /// The generated items could not be rendered.
    #[error("could not print generated code: {0}")]
    Print(#[from] syn::Error),

    /// The output file could not be written.
    #[error("could not write {}: {source}", path.display())]
    Write {
        /// The file or directory involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl GenError {
    /// Create an invalid name error.
    pub fn invalid_name(name: impl Into<String>, context: impl Into<String>) -> Self {
        Self::InvalidName {
            name: name.into(),
            context: context.into(),
        }
    }

    /// Create a duplicate name error.
    pub fn duplicate_name(name: impl Into<String>, context: impl Into<String>) -> Self {
        Self::DuplicateName {
            name: name.into(),
            context: context.into(),
        }
    }
}

/// Result alias for generation.
pub type Result<T, E = GenError> = std::result::Result<T, E>;
