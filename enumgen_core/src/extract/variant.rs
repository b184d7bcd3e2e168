//! Variant facts: top-level types that carry a `MemberOf<X>` marker.

use quote::ToTokens;
use syn::{Item, Type, TypeParamBound};
use tracing::{trace, warn};

use super::TargetFile;
use super::marker::{MarkerScope, Symbol};
use crate::error::GenError;
use crate::pipeline::{Emitter, Stage, stage};

/// One member type declaring its enum identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantFact {
    /// Name of the member type.
    pub variant: String,
    /// The identifier as written, in token form. Facts are grouped by it.
    pub identifier: String,
    /// Last segment of the identifier path, used for naming.
    pub identifier_name: String,
}

/// Every variant declared at the top level of `file`.
///
/// A struct contributes one fact per marker field, tuple or named; a type
/// alias contributes one when it aliases the marker directly. Generic types
/// are skipped since the generated impls could not name them.
pub fn variant_facts(file: &syn::File, scope: &MarkerScope) -> Vec<VariantFact> {
    let mut facts = Vec::new();
    for item in &file.items {
        let (ident, generics, identifiers) = match item {
            Item::Struct(item) => (
                &item.ident,
                &item.generics,
                item.fields
                    .iter()
                    .filter_map(|field| member_identifier(scope, &field.ty))
                    .collect::<Vec<_>>(),
            ),
            Item::Type(item) => (
                &item.ident,
                &item.generics,
                member_identifier(scope, &item.ty).into_iter().collect(),
            ),
            _ => continue,
        };
        if identifiers.is_empty() {
            continue;
        }
        if !generics.params.is_empty() {
            warn!("skipping generic member type {}", ident);
            continue;
        }
        for path in identifiers {
            let Some(last) = path.segments.last() else {
                continue;
            };
            facts.push(VariantFact {
                variant: ident.to_string(),
                identifier: path.to_token_stream().to_string(),
                identifier_name: last.ident.to_string(),
            });
        }
    }
    facts
}

/// The identifier `X` of a `MemberOf<X>` type.
fn member_identifier(scope: &MarkerScope, ty: &Type) -> Option<syn::Path> {
    match ty {
        Type::Path(tp) if tp.qself.is_none() => {
            identifier_path(scope.marker_argument(&tp.path, Symbol::MemberOf)?)
        }
        _ => None,
    }
}

/// `X` or `dyn X`, with `dyn` dropped.
fn identifier_path(ty: &Type) -> Option<syn::Path> {
    match ty {
        Type::Path(tp) if tp.qself.is_none() => Some(tp.path.clone()),
        Type::TraitObject(obj) => {
            let mut traits = obj.bounds.iter().filter_map(|bound| match bound {
                TypeParamBound::Trait(t) => Some(&t.path),
                _ => None,
            });
            let path = traits.next()?;
            traits.next().is_none().then(|| path.clone())
        }
        Type::Paren(inner) => identifier_path(&inner.elem),
        Type::Group(inner) => identifier_path(&inner.elem),
        _ => None,
    }
}

/// Stage emitting the variant facts of every target file.
pub fn variant_stage() -> impl Stage<TargetFile, VariantFact, GenError> {
    stage(|target: TargetFile, out: &Emitter<VariantFact, GenError>| {
        let syntax = target.file.syntax()?;
        for fact in variant_facts(&syntax, &target.scope) {
            trace!("variant {} of {}", fact.variant, fact.identifier);
            out.emit(fact);
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::*;

    fn facts(file: syn::File) -> Vec<(String, String)> {
        let scope = MarkerScope::of_file(&file, "enumgen");
        variant_facts(&file, &scope)
            .into_iter()
            .map(|f| (f.variant, f.identifier))
            .collect()
    }

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items.iter().map(|(a, b)| ((*a).to_owned(), (*b).to_owned())).collect()
    }

    #[test]
    fn tuple_named_and_alias_members() {
        let found = facts(parse_quote! {
            pub struct Circle(enumgen::MemberOf<dyn Shape>, pub f64);
            pub struct Square {
                pub side: f64,
                _m: enumgen::MemberOf<Shape>,
            }
            pub type Empty = enumgen::MemberOf<dyn Shape>;
            pub struct Unrelated(u8);
        });
        assert_eq!(
            found,
            pairs(&[("Circle", "Shape"), ("Square", "Shape"), ("Empty", "Shape")])
        );
    }

    #[test]
    fn qualified_identifier_keeps_its_path() {
        let file: syn::File = parse_quote! {
            use enumgen::MemberOf;
            struct Paid(MemberOf<dyn events::Event>);
        };
        let scope = MarkerScope::of_file(&file, "enumgen");
        let found = variant_facts(&file, &scope);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].identifier, "events :: Event");
        assert_eq!(found[0].identifier_name, "Event");
    }

    #[test]
    fn one_fact_per_marker_field() {
        let found = facts(parse_quote! {
            struct Both(enumgen::MemberOf<A>, enumgen::MemberOf<B>);
        });
        assert_eq!(found, pairs(&[("Both", "A"), ("Both", "B")]));
    }

    #[test]
    fn skips_generics_nested_items_and_non_markers() {
        let found = facts(parse_quote! {
            struct Generic<T>(enumgen::MemberOf<A>, T);
            struct Boxed(Box<enumgen::MemberOf<A>>);
            struct Multi(enumgen::MemberOf<dyn A + Send>);
            mod inner {
                pub struct Hidden(enumgen::MemberOf<A>);
            }
            fn f() {
                struct Local(enumgen::MemberOf<A>);
            }
        });
        assert!(found.is_empty(), "{found:?}");
    }

    #[test]
    fn lifetime_bounds_on_dyn_are_ignored() {
        let found = facts(parse_quote! {
            struct Held(enumgen::MemberOf<dyn Shape + 'static>);
        });
        assert_eq!(found, pairs(&[("Held", "Shape")]));
    }
}
