//! Options of a generation run.

use std::path::{Path, PathBuf};

use crate::naming::NamingRules;

/// Output file name used when none is given.
pub const DEFAULT_OUTPUT: &str = "enum_gen.rs";
/// Crate defining `MemberOf` and `VisitorReturns` unless configured otherwise.
pub const DEFAULT_MARKER_CRATE: &str = "enumgen";

/// Options of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Directory holding the scanned module's source files.
    pub wd: PathBuf,
    /// Output file, relative to `wd` unless absolute.
    pub out: PathBuf,
    /// Name the marker crate is imported under.
    pub marker_crate: String,
    /// Naming rules, in command-line order.
    pub naming: NamingRules,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            wd: PathBuf::from("."),
            out: PathBuf::from(DEFAULT_OUTPUT),
            marker_crate: DEFAULT_MARKER_CRATE.to_owned(),
            naming: NamingRules::default(),
        }
    }
}

impl RunConfig {
    /// Default options for the module in `wd`.
    pub fn new(wd: impl Into<PathBuf>) -> Self {
        Self {
            wd: wd.into(),
            ..Self::default()
        }
    }

    /// Sets the output file.
    #[must_use]
    pub fn with_out(mut self, out: impl Into<PathBuf>) -> Self {
        self.out = out.into();
        self
    }

    /// Sets the marker crate name.
    #[must_use]
    pub fn with_marker_crate(mut self, name: impl Into<String>) -> Self {
        self.marker_crate = name.into();
        self
    }

    /// Replaces the naming rules.
    #[must_use]
    pub fn with_naming(mut self, naming: NamingRules) -> Self {
        self.naming = naming;
        self
    }

    /// Where the generated file is written.
    pub fn output_path(&self) -> PathBuf {
        self.wd.join(&self.out)
    }

    /// The scanned directory.
    pub fn wd(&self) -> &Path {
        &self.wd
    }
}
