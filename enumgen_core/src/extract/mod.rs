//! Fact extraction from the scanned files.
//!
//! The scan stage keeps only files that mention the marker crate and books
//! their other imports for the generated file. Target files then fan out to
//! the variant and identifier extractors.

mod identifier;
mod marker;
mod variant;

use std::sync::{Arc, Mutex, PoisonError};

use quote::ToTokens;
use syn::Item;
use tracing::debug;

pub use identifier::{IdentifierFact, identifier_facts, identifier_stage};
pub use marker::{MarkerScope, Symbol};
pub use variant::{VariantFact, variant_facts, variant_stage};

use crate::error::GenError;
use crate::load::SourceFile;
use crate::pipeline::{Emitter, Stage, stage};

/// A file that refers to the marker crate, with its marker scope.
#[derive(Debug, Clone)]
pub struct TargetFile {
    /// The file.
    pub file: SourceFile,
    /// How the marker crate is reached from it, shared by both extractors.
    pub scope: Arc<MarkerScope>,
}

/// `use` items of target files, in scan order, as source text.
#[derive(Debug, Default)]
pub struct ImportBook {
    items: Mutex<Vec<String>>,
}

impl ImportBook {
    /// An empty book.
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, items: impl IntoIterator<Item = String>) {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(items);
    }

    /// The recorded imports.
    pub fn into_items(self) -> Vec<String> {
        self.items.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Stage passing on the files that refer to `marker_crate`.
pub fn scan_stage<'a>(
    marker_crate: &'a str,
    book: &'a ImportBook,
) -> impl Stage<SourceFile, TargetFile, GenError> + 'a {
    stage(move |file: SourceFile, out: &Emitter<TargetFile, GenError>| {
        let syntax = file.syntax()?;
        let scope = MarkerScope::of_file(&syntax, marker_crate);
        if !scope.is_referenced() {
            debug!("{}: no reference to {}", file.path.display(), marker_crate);
            return Ok(());
        }

        book.record(syntax.items.iter().filter_map(|item| match item {
            Item::Use(item) => scope
                .without_marker(item)
                .map(|kept| kept.to_token_stream().to_string()),
            _ => None,
        }));
        debug!("{}: scanning", file.path.display());
        out.emit(TargetFile {
            file,
            scope: Arc::new(scope),
        });
        Ok(())
    })
}
