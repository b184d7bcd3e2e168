#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use quote::ToTokens;

pub fn init_test_logger() {
    static INIT: OnceLock<()> = OnceLock::new();
    let _ = INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn fixture_dir(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Writes `files` as `(name, source)` pairs into `dir`.
pub fn write_module(dir: &Path, files: &[(&str, &str)]) {
    for (name, source) in files {
        std::fs::write(dir.join(name), source).expect("write fixture file");
    }
}

/// Re-prints `source` so that two files can be compared regardless of layout.
pub fn normalize(source: &str) -> String {
    prettyplease::unparse(&syn::parse_file(source).expect("generated code parses"))
}

/// A short description of every item in `source`, such as `trait EventVisitor`
/// or `impl EventEnum for OrderPlaced`.
pub fn item_outline(source: &str) -> Vec<String> {
    let file = syn::parse_file(source).expect("generated code parses");
    file.items
        .iter()
        .map(|item| match item {
            syn::Item::Use(item) => format!("use {}", item.tree.to_token_stream()),
            syn::Item::Trait(item) => format!("trait {}", item.ident),
            syn::Item::Impl(item) => {
                let (_, path, _) = item.trait_.as_ref().expect("trait impl");
                format!(
                    "impl {} for {}",
                    path.to_token_stream(),
                    item.self_ty.to_token_stream()
                )
            }
            syn::Item::Const(_) => "check".to_owned(),
            syn::Item::Struct(item) => format!("struct {}", item.ident),
            syn::Item::Fn(item) => format!("fn {}", item.sig.ident),
            other => format!("{}", other.to_token_stream()),
        })
        .collect()
}

/// Method names of the trait called `name` in `source`.
pub fn trait_methods(source: &str, name: &str) -> Vec<String> {
    let file = syn::parse_file(source).expect("generated code parses");
    file.items
        .iter()
        .find_map(|item| match item {
            syn::Item::Trait(item) if item.ident == name => Some(item),
            _ => None,
        })
        .unwrap_or_else(|| panic!("no trait {name}"))
        .items
        .iter()
        .filter_map(|item| match item {
            syn::TraitItem::Fn(f) => Some(f.sig.ident.to_string()),
            _ => None,
        })
        .collect()
}
