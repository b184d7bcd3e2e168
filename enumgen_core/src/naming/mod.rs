//! Resolution of generated names from ordered wildcard rules.
//!
//! For every name kind the rules are scanned in order and the first rule whose
//! target pattern matches the identifier name wins. Without a match the
//! hardcoded default applies, except for the visitor-impl factory where no
//! match means the closure-backed visitor is not generated at all.

mod pattern;
mod rules;

use dashmap::DashMap;

pub use pattern::{Wildcard, substitute};
pub use rules::{AcceptNaming, DEFAULT_FACTORY_NAME, NamingRules, VisitorImplNaming, VisitorNaming};

/// Visitor trait name pattern when no visitor rule matches.
pub const DEFAULT_VISITOR_TYPE_NAME: &str = "*Visitor";
/// Visit method name pattern when no visitor rule matches.
pub const DEFAULT_VISIT_METHOD_NAME: &str = "Visit*";
/// Accept method name when no accept rule matches.
pub const DEFAULT_ACCEPT_METHOD_NAME: &str = "Accept";

/// Memoizing name resolver, built once per run and shared by reference.
///
/// Caches may be filled from several threads at once. Two threads missing the
/// same key both compute the name, but only the first insert is kept and both
/// return it.
#[derive(Debug, Default)]
pub struct NamingRegistry {
    rules: NamingRules,
    visitor_rules: DashMap<String, Option<usize>>,
    visitor_types: DashMap<String, String>,
    visit_methods: DashMap<String, String>,
    accept_methods: DashMap<String, String>,
    factories: DashMap<String, Option<String>>,
}

fn memoize<V: Clone>(cache: &DashMap<String, V>, key: &str, compute: impl FnOnce() -> V) -> V {
    if let Some(hit) = cache.get(key) {
        return hit.value().clone();
    }
    let value = compute();
    let slot = cache.entry(key.to_owned()).or_insert(value);
    slot.value().clone()
}

impl NamingRegistry {
    /// Creates a registry over `rules`.
    #[must_use]
    pub fn new(rules: NamingRules) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    /// The rules this registry resolves against.
    #[must_use]
    pub const fn rules(&self) -> &NamingRules {
        &self.rules
    }

    fn visitor_rule(&self, enum_ident: &str) -> Option<&VisitorNaming> {
        let index = memoize(&self.visitor_rules, enum_ident, || {
            self.rules
                .visitors
                .iter()
                .position(|rule| rule.target.matches(enum_ident))
        });
        index.map(|i| &self.rules.visitors[i])
    }

    /// Name of the visitor trait for `enum_ident`.
    pub fn visitor_type_name(&self, enum_ident: &str) -> String {
        memoize(&self.visitor_types, enum_ident, || {
            let pattern = self
                .visitor_rule(enum_ident)
                .map_or(DEFAULT_VISITOR_TYPE_NAME, |rule| rule.type_name.as_str());
            substitute(pattern, enum_ident)
        })
    }

    /// Name of the visit method for `variant` in the visitor of `enum_ident`.
    pub fn visit_method_name(&self, enum_ident: &str, variant: &str) -> String {
        let key = format!("{enum_ident}:{variant}");
        memoize(&self.visit_methods, &key, || {
            let pattern = self
                .visitor_rule(enum_ident)
                .map_or(DEFAULT_VISIT_METHOD_NAME, |rule| rule.method_name.as_str());
            substitute(pattern, variant)
        })
    }

    /// Name of the accept method of the enum trait for `enum_ident`.
    pub fn accept_method_name(&self, enum_ident: &str) -> String {
        memoize(&self.accept_methods, enum_ident, || {
            self.rules
                .accepts
                .iter()
                .find(|rule| rule.target.matches(enum_ident))
                .map_or_else(
                    || DEFAULT_ACCEPT_METHOD_NAME.to_owned(),
                    |rule| substitute(&rule.method_name, enum_ident),
                )
        })
    }

    /// Name of the closure-backed visitor factory for `enum_ident`, or `None`
    /// when no visitor-impl rule matches and the factory is not wanted.
    pub fn visitor_impl_factory_name(&self, enum_ident: &str) -> Option<String> {
        memoize(&self.factories, enum_ident, || {
            self.rules
                .visitor_impls
                .iter()
                .find(|rule| rule.target.matches(enum_ident))
                .map(|rule| substitute(&rule.factory_name, enum_ident))
        })
    }
}
