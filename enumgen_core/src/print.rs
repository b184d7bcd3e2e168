//! Rendering the generated file.
//!
//! The output is a child module of the scanned one: it starts with
//! `use super::*;`, followed by the carried imports that the generated items
//! still need, then the generated items.

use std::collections::{BTreeMap, HashSet};

use quote::ToTokens;
use syn::punctuated::Punctuated;
use syn::visit::Visit;
use syn::{Ident, Item, ItemUse, Token, UseGroup, UsePath, UseTree, Visibility, parse_quote};

use crate::ast::GenFile;
use crate::codegen;
use crate::error::Result;

/// First line of every generated file.
pub const HEADER: &str = "// Code generated by enumgen. DO NOT EDIT.";

/// Prints `file` as Rust source, header included.
pub fn render(file: &GenFile) -> Result<String> {
    let decls = codegen::lower_decls(&file.decls)?;
    let used = referenced_idents(&decls);
    let imports = clean_imports(&file.imports, &file.module, &used)?;

    let doc = format!(" Visitors generated for the `{}` module.", file.package);
    let mut items: Vec<Item> = Vec::with_capacity(decls.len() + imports.len() + 1);
    items.push(parse_quote!(use super::*;));
    items.extend(imports.into_iter().map(Item::Use));
    items.extend(decls);

    let syntax = syn::File {
        shebang: None,
        attrs: vec![
            parse_quote!(#![doc = #doc]),
            parse_quote!(#![allow(dead_code, private_interfaces)]),
        ],
        items,
    };
    Ok(format!("{HEADER}\n\n{}", prettyplease::unparse(&syntax)))
}

/// Every identifier mentioned by `items`.
fn referenced_idents(items: &[Item]) -> HashSet<String> {
    struct Collector(HashSet<String>);

    impl<'ast> Visit<'ast> for Collector {
        fn visit_ident(&mut self, ident: &'ast Ident) {
            self.0.insert(ident.to_string());
        }
    }

    let mut collector = Collector(HashSet::new());
    for item in items {
        collector.visit_item(item);
    }
    collector.0
}

/// Parses, rebases, prunes, deduplicates and sorts the carried imports.
///
/// Only names that `used` contains survive; glob imports always do. Imports
/// from the generated module itself are dropped. Relative paths are rebased
/// one module up, and re-exports lose their visibility.
fn clean_imports(imports: &[String], module: &str, used: &HashSet<String>) -> Result<Vec<ItemUse>> {
    let mut kept = BTreeMap::new();
    for text in imports {
        let item: ItemUse = syn::parse_str(text)?;
        if imports_module(&item.tree, module) {
            continue;
        }
        let Some(tree) = prune(&rebase(item.tree), None, used) else {
            continue;
        };
        let item = ItemUse {
            vis: Visibility::Inherited,
            tree,
            ..item
        };
        kept.entry(item.to_token_stream().to_string()).or_insert(item);
    }
    Ok(kept.into_values().collect())
}

/// Whether `tree` starts at `module`, directly or through `self::`.
fn imports_module(tree: &UseTree, module: &str) -> bool {
    match tree {
        UseTree::Path(path) if path.ident == "self" => imports_module(&path.tree, module),
        UseTree::Path(path) => path.ident == module,
        UseTree::Name(name) => name.ident == module,
        UseTree::Rename(rename) => rename.ident == module,
        UseTree::Glob(_) | UseTree::Group(_) => false,
    }
}

/// Rewrites `self::` to `super::` and `super::` to `super::super::`.
fn rebase(tree: UseTree) -> UseTree {
    match tree {
        UseTree::Path(path) if path.ident == "self" => UseTree::Path(UsePath {
            ident: Ident::new("super", path.ident.span()),
            ..path
        }),
        UseTree::Path(path) if path.ident == "super" => UseTree::Path(UsePath {
            ident: path.ident.clone(),
            colon2_token: path.colon2_token,
            tree: Box::new(UseTree::Path(path)),
        }),
        UseTree::Group(group) => UseTree::Group(UseGroup {
            brace_token: group.brace_token,
            items: group.items.into_iter().map(rebase).collect(),
        }),
        other => other,
    }
}

/// Drops every leaf that binds a name nobody uses.
fn prune(tree: &UseTree, parent: Option<&Ident>, used: &HashSet<String>) -> Option<UseTree> {
    match tree {
        UseTree::Path(path) => {
            let inner = prune(&path.tree, Some(&path.ident), used)?;
            Some(UseTree::Path(UsePath {
                tree: Box::new(inner),
                ..path.clone()
            }))
        }
        UseTree::Name(name) => {
            let bound = if name.ident == "self" { parent? } else { &name.ident };
            used.contains(&bound.to_string()).then(|| tree.clone())
        }
        UseTree::Rename(rename) => used.contains(&rename.rename.to_string()).then(|| tree.clone()),
        UseTree::Glob(_) => Some(tree.clone()),
        UseTree::Group(group) => {
            let items: Punctuated<UseTree, Token![,]> = group
                .items
                .iter()
                .filter_map(|t| prune(t, parent, used))
                .collect();
            (!items.is_empty()).then(|| {
                UseTree::Group(UseGroup {
                    brace_token: group.brace_token,
                    items,
                })
            })
        }
    }
}
