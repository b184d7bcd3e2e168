//! Identifier facts: top-level traits declaring `VisitorReturns<R>`.

use quote::ToTokens;
use syn::{Item, TypeParamBound};
use tracing::trace;

use super::TargetFile;
use super::marker::{MarkerScope, Symbol};
use crate::error::GenError;
use crate::pipeline::{Emitter, Stage, stage};

/// The visitor return type declared by an identifier trait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierFact {
    /// Name of the identifier trait.
    pub identifier: String,
    /// `R` of `VisitorReturns<R>`, in token form.
    pub visitor_return: String,
}

/// Every identifier trait declared at the top level of `file`. Only the first
/// `VisitorReturns` supertrait of a trait counts.
pub fn identifier_facts(file: &syn::File, scope: &MarkerScope) -> Vec<IdentifierFact> {
    file.items
        .iter()
        .filter_map(|item| match item {
            Item::Trait(item) => Some(item),
            _ => None,
        })
        .filter_map(|item| {
            let visitor_return = item.supertraits.iter().find_map(|bound| match bound {
                TypeParamBound::Trait(t) => scope.marker_argument(&t.path, Symbol::VisitorReturns),
                _ => None,
            })?;
            Some(IdentifierFact {
                identifier: item.ident.to_string(),
                visitor_return: visitor_return.to_token_stream().to_string(),
            })
        })
        .collect()
}

/// Stage emitting the identifier facts of every target file.
pub fn identifier_stage() -> impl Stage<TargetFile, IdentifierFact, GenError> {
    stage(|target: TargetFile, out: &Emitter<IdentifierFact, GenError>| {
        let syntax = target.file.syntax()?;
        for fact in identifier_facts(&syntax, &target.scope) {
            trace!("identifier {} returns {}", fact.identifier, fact.visitor_return);
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
        identifier_facts(&file, &scope)
            .into_iter()
            .map(|f| (f.identifier, f.visitor_return))
            .collect()
    }

    #[test]
    fn finds_return_type() {
        let found = facts(parse_quote! {
            pub trait Shape: enumgen::VisitorReturns<f64> {}
            pub trait Event: Send + enumgen::VisitorReturns<std::io::Result<()>> {}
            pub trait Plain: Send {}
        });
        assert_eq!(
            found,
            vec![
                ("Shape".to_owned(), "f64".to_owned()),
                ("Event".to_owned(), "std :: io :: Result < () >".to_owned()),
            ]
        );
    }

    #[test]
    fn imported_marker_and_first_bound_wins() {
        let found = facts(parse_quote! {
            use enumgen::VisitorReturns as Returns;
            trait Shape: Returns<u8> + Returns<u16> {}
        });
        assert_eq!(found, vec![("Shape".to_owned(), "u8".to_owned())]);
    }

    #[test]
    fn unrelated_supertraits_are_ignored() {
        let found = facts(parse_quote! {
            trait Shape: other::VisitorReturns<u8> + VisitorReturns<u8> {}
        });
        assert!(found.is_empty());
    }
}
