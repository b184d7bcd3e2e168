//! Visitor generation for closed families of Rust types.
//!
//! Members of a family carry an `enumgen::MemberOf<Identifier>` field (or alias
//! the marker directly); the identifier trait may declare
//! `enumgen::VisitorReturns<R>` to give the visit methods a result type.
//!
//! A run loads the module's files, keeps those that mention the marker crate,
//! extracts variant and identifier facts in parallel, groups them per
//! identifier, synthesizes the visitor declarations and prints them as a child
//! module of the scanned one.

pub mod ast;
pub mod codegen;
pub mod config;
pub mod error;
pub mod extract;
pub mod join;
pub mod load;
pub mod naming;
pub mod pipeline;
pub mod print;
pub mod synth;

use std::path::PathBuf;

use tracing::info;

pub use config::{DEFAULT_MARKER_CRATE, DEFAULT_OUTPUT, RunConfig};
pub use error::{GenError, LoadError, Result, RuleError};
pub use load::{Package, SourceFile};
pub use naming::{AcceptNaming, NamingRegistry, NamingRules, VisitorImplNaming, VisitorNaming};

use ast::{Decl, GenFile};
use extract::{ImportBook, TargetFile, identifier_stage, scan_stage, variant_stage};
use join::{Discovery, EnumInfo, assemble_stage};
use pipeline::{merge, pipe};
use synth::synthesize_stage;

/// Generates the visitor file for `package` without touching the disk.
///
/// Fails with [`GenError::NotFound`] when no file declares a single member.
pub fn render_package(package: &Package, config: &RunConfig) -> Result<String> {
    if codegen::type_ident(&config.marker_crate).is_none() {
        return Err(GenError::invalid_name(&config.marker_crate, "marker crate"));
    }

    let registry = NamingRegistry::new(config.naming.clone());
    let book = ImportBook::new();
    let stages = pipe::<_, _, TargetFile>(
        scan_stage(&config.marker_crate, &book),
        pipe::<_, _, Discovery>(
            merge(variant_stage(), identifier_stage(), Discovery::new),
            pipe::<_, _, EnumInfo>(assemble_stage(), synthesize_stage(&registry)),
        ),
    );
    let groups: Vec<Vec<Decl>> = pipeline::run(stages, package.files.clone())?;
    if groups.is_empty() {
        return Err(GenError::NotFound);
    }
    info!("generating visitors for {} enums", groups.len());

    let module = config
        .out
        .file_stem()
        .map_or_else(String::new, |stem| stem.to_string_lossy().into_owned());
    let decls: Vec<Decl> = groups.into_iter().flatten().collect();
    synth::check_unique_names(&decls)?;
    let file = GenFile {
        package: package.name.clone(),
        module,
        imports: book.into_items(),
        decls,
    };
    print::render(&file)
}

/// Loads the module in `config.wd`, generates its visitor file and writes it.
///
/// Nothing is written unless generation succeeds. Returns the output path.
pub fn generate(config: &RunConfig) -> Result<PathBuf> {
    let out = config.output_path();
    let package = Package::load(config.wd(), Some(&config.out))?;
    let text = render_package(&package, config)?;
    std::fs::write(&out, &text).map_err(|source| GenError::Write {
        path: out.clone(),
        source,
    })?;
    info!("wrote {} ({} bytes)", out.display(), text.len());
    Ok(out)
}
