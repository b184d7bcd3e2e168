//! Recognizing paths to the marker crate's items within one file.

use std::collections::{HashMap, HashSet};

use syn::punctuated::Punctuated;
use syn::visit::Visit;
use syn::{GenericArgument, Item, PathArguments, Token, UseGroup, UseTree};

/// The two marker items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// `MemberOf<Identifier>`, carried by members.
    MemberOf,
    /// `VisitorReturns<R>`, a supertrait of identifiers.
    VisitorReturns,
}

impl Symbol {
    /// Every symbol, in declaration order.
    pub const ALL: [Self; 2] = [Self::MemberOf, Self::VisitorReturns];

    /// Name of the item inside the marker crate.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MemberOf => "MemberOf",
            Self::VisitorReturns => "VisitorReturns",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == name)
    }
}

/// How the marker crate is reachable from one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerScope {
    /// Names the crate itself is known by: its own name plus `use .. as` aliases.
    crates: HashSet<String>,
    /// Bare names bound to marker symbols by `use` items.
    symbols: HashMap<String, Symbol>,
    /// Whether the file mentions the crate at all.
    referenced: bool,
}

impl MarkerScope {
    /// Scans the top-level `use` items and paths of `file`.
    pub fn of_file(file: &syn::File, marker_crate: &str) -> Self {
        let mut scope = Self {
            crates: HashSet::from([marker_crate.to_owned()]),
            ..Self::default()
        };

        // Aliases first, so `use alias::MemberOf` works regardless of order.
        for item in &file.items {
            if let Item::Use(item) = item {
                scope.collect_aliases(&item.tree);
            }
        }
        for item in &file.items {
            if let Item::Use(item) = item {
                scope.collect_symbols(&item.tree);
            }
        }

        if !scope.referenced {
            let mut finder = PathFinder {
                scope: &scope,
                found: false,
            };
            finder.visit_file(file);
            scope.referenced = finder.found;
        }
        scope
    }

    /// Whether the file refers to the marker crate anywhere.
    pub fn is_referenced(&self) -> bool {
        self.referenced
    }

    /// Whether `name` refers to the marker crate in this file.
    pub fn is_crate(&self, name: &str) -> bool {
        self.crates.contains(name)
    }

    /// `item` with every import from the marker crate removed, or `None` when
    /// nothing else is left.
    pub fn without_marker(&self, item: &syn::ItemUse) -> Option<syn::ItemUse> {
        let tree = self.prune(&item.tree)?;
        Some(syn::ItemUse { tree, ..item.clone() })
    }

    fn prune(&self, tree: &UseTree) -> Option<UseTree> {
        match tree {
            UseTree::Path(path) if self.is_crate(&path.ident.to_string()) => None,
            UseTree::Name(name) if self.is_crate(&name.ident.to_string()) => None,
            UseTree::Rename(rename) if self.is_crate(&rename.ident.to_string()) => None,
            UseTree::Group(group) => {
                let items: Punctuated<UseTree, Token![,]> =
                    group.items.iter().filter_map(|t| self.prune(t)).collect();
                (!items.is_empty()).then(|| {
                    UseTree::Group(UseGroup {
                        brace_token: group.brace_token,
                        items,
                    })
                })
            }
            other => Some(other.clone()),
        }
    }

    fn collect_aliases(&mut self, tree: &UseTree) {
        match tree {
            UseTree::Rename(rename) if self.is_crate(&rename.ident.to_string()) => {
                self.crates.insert(rename.rename.to_string());
                self.referenced = true;
            }
            UseTree::Name(name) if self.is_crate(&name.ident.to_string()) => {
                self.referenced = true;
            }
            UseTree::Path(path) if self.is_crate(&path.ident.to_string()) => {
                self.collect_self_aliases(&path.tree);
            }
            UseTree::Group(group) => group.items.iter().for_each(|t| self.collect_aliases(t)),
            _ => {}
        }
    }

    /// `use krate::{self as alias}`.
    fn collect_self_aliases(&mut self, tree: &UseTree) {
        match tree {
            UseTree::Rename(rename) if rename.ident == "self" => {
                self.crates.insert(rename.rename.to_string());
                self.referenced = true;
            }
            UseTree::Group(group) => group.items.iter().for_each(|t| self.collect_self_aliases(t)),
            _ => {}
        }
    }

    fn collect_symbols(&mut self, tree: &UseTree) {
        match tree {
            UseTree::Path(path) if self.is_crate(&path.ident.to_string()) => {
                self.referenced = true;
                self.collect_marker_items(&path.tree);
            }
            UseTree::Group(group) => group.items.iter().for_each(|t| self.collect_symbols(t)),
            _ => {}
        }
    }

    /// Items imported from directly inside the marker crate.
    fn collect_marker_items(&mut self, tree: &UseTree) {
        match tree {
            UseTree::Name(name) => {
                if let Some(symbol) = Symbol::from_name(&name.ident.to_string()) {
                    self.symbols.insert(symbol.as_str().to_owned(), symbol);
                }
            }
            UseTree::Rename(rename) => {
                if let Some(symbol) = Symbol::from_name(&rename.ident.to_string()) {
                    self.symbols.insert(rename.rename.to_string(), symbol);
                }
            }
            UseTree::Glob(_) => {
                for symbol in Symbol::ALL {
                    self.symbols.entry(symbol.as_str().to_owned()).or_insert(symbol);
                }
            }
            UseTree::Group(group) => group.items.iter().for_each(|t| self.collect_marker_items(t)),
            UseTree::Path(_) => {}
        }
    }

    /// If `path` names `symbol`, the type argument it was given.
    ///
    /// Accepted spellings are `krate::Symbol<T>`, `::krate::Symbol<T>` and a
    /// bare imported name `Symbol<T>` (or its `use .. as` rename).
    pub fn marker_argument<'p>(&self, path: &'p syn::Path, symbol: Symbol) -> Option<&'p syn::Type> {
        let segments: Vec<_> = path.segments.iter().collect();
        let last = match segments.as_slice() {
            [krate, last] if self.is_crate(&krate.ident.to_string()) => {
                (last.ident == symbol.as_str()).then_some(*last)?
            }
            [only] if path.leading_colon.is_none() => {
                (self.symbols.get(&only.ident.to_string()) == Some(&symbol)).then_some(*only)?
            }
            _ => return None,
        };

        let PathArguments::AngleBracketed(args) = &last.arguments else {
            return None;
        };
        let mut types = args.args.iter().filter_map(|arg| match arg {
            GenericArgument::Type(ty) => Some(ty),
            _ => None,
        });
        let ty = types.next()?;
        types.next().is_none().then_some(ty)
    }
}

struct PathFinder<'s> {
    scope: &'s MarkerScope,
    found: bool,
}

impl<'ast> Visit<'ast> for PathFinder<'_> {
    fn visit_path(&mut self, path: &'ast syn::Path) {
        if self.found {
            return;
        }
        if path.segments.len() > 1
            && path
                .segments
                .first()
                .is_some_and(|s| self.scope.is_crate(&s.ident.to_string()))
        {
            self.found = true;
            return;
        }
        syn::visit::visit_path(self, path);
    }
}
