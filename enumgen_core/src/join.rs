//! Grouping variant facts into one enum per identifier.

use indexmap::IndexMap;
use indexmap::map::Entry;
use tracing::{debug, info};

use crate::error::GenError;
use crate::extract::{IdentifierFact, VariantFact};
use crate::pipeline::{Emitter, Stage, stage};
use crate::synth::ReturnShape;

/// Everything both extractors found over the whole run.
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    /// Variant facts in discovery order.
    pub variants: Vec<VariantFact>,
    /// Identifier facts keyed by trait name; the first declaration wins.
    pub identifiers: IndexMap<String, IdentifierFact>,
}

impl Discovery {
    /// Combines the complete outputs of both extractors.
    pub fn new(variants: Vec<VariantFact>, identifiers: Vec<IdentifierFact>) -> Self {
        let mut by_name = IndexMap::new();
        for fact in identifiers {
            match by_name.entry(fact.identifier.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(fact);
                }
                Entry::Occupied(first) => {
                    debug!("ignoring second declaration of identifier {}", first.key());
                }
            }
        }
        info!(
            "discovered {} variant facts, {} identifier facts",
            variants.len(),
            by_name.len()
        );
        Self {
            variants,
            identifiers: by_name,
        }
    }
}

/// One closed family of types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumInfo {
    /// The identifier as written by the members, in token form.
    pub identifier: String,
    /// Last path segment of the identifier, fed to the naming rules.
    pub name: String,
    /// Member type names in first-seen order, never empty.
    pub members: Vec<String>,
    /// Return type of the visit and accept methods.
    pub shape: ReturnShape,
}

/// Groups variants by identifier key, in order of first appearance.
///
/// Members are deduplicated by name. The return type comes from the identifier
/// fact with the same key; identifier facts without variants are dropped.
pub fn assemble(discovery: Discovery) -> Vec<EnumInfo> {
    let Discovery {
        variants,
        identifiers,
    } = discovery;

    let mut groups: IndexMap<String, EnumInfo> = IndexMap::new();
    for fact in variants {
        let info = groups.entry(fact.identifier.clone()).or_insert_with(|| {
            let visitor_return = identifiers
                .get(&fact.identifier)
                .map(|id| id.visitor_return.as_str());
            EnumInfo {
                identifier: fact.identifier.clone(),
                name: fact.identifier_name.clone(),
                members: Vec::new(),
                shape: ReturnShape::from_return(visitor_return),
            }
        });
        if !info.members.contains(&fact.variant) {
            info.members.push(fact.variant);
        }
    }

    for name in identifiers.keys().filter(|k| !groups.contains_key(*k)) {
        debug!("identifier {} has no members", name);
    }
    groups.into_values().collect()
}

/// Stage turning the merged discovery into one [`EnumInfo`] per identifier.
pub fn assemble_stage() -> impl Stage<Discovery, EnumInfo, GenError> {
    stage(|discovery: Discovery, out: &Emitter<EnumInfo, GenError>| {
        for info in assemble(discovery) {
            debug!("enum {} with {} members", info.identifier, info.members.len());
            out.emit(info);
        }
        Ok(())
    })
}
