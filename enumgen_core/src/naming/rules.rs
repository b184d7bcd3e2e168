//! Naming rules as supplied on the command line.
//!
//! Every rule is a colon separated string whose first segment is the target
//! pattern matched against the enum identifier name:
//!
//! - visitor: `*Event:*Handler:On*`
//! - accept: `*Event:Emit`
//! - visitor impl: `*Event` or `*Event:Make*`

use std::str::FromStr;

use super::pattern::Wildcard;
use crate::error::RuleError;

/// Factory pattern used by a visitor-impl rule that names no factory.
pub const DEFAULT_FACTORY_NAME: &str = "New*";

/// Names of the visitor trait and its methods for matching identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitorNaming {
    /// Identifier names this rule applies to.
    pub target: Wildcard,
    /// Visitor trait name, `*` replaced by the identifier name.
    pub type_name: String,
    /// Visit method name, `*` replaced by the variant name.
    pub method_name: String,
}

/// Name of the accept method for matching identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptNaming {
    /// Identifier names this rule applies to.
    pub target: Wildcard,
    /// Accept method name, `*` replaced by the identifier name.
    pub method_name: String,
}

/// Enables the closure-backed visitor for matching identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitorImplNaming {
    /// Identifier names this rule applies to.
    pub target: Wildcard,
    /// Factory function name, `*` replaced by the identifier name.
    pub factory_name: String,
}

/// All configured rules, each list in the order given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamingRules {
    /// Visitor rules.
    pub visitors: Vec<VisitorNaming>,
    /// Accept rules.
    pub accepts: Vec<AcceptNaming>,
    /// Visitor-impl rules.
    pub visitor_impls: Vec<VisitorImplNaming>,
}

impl NamingRules {
    /// An empty rule set: defaults everywhere, no visitor impls.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a visitor rule.
    #[must_use]
    pub fn with_visitor(mut self, rule: VisitorNaming) -> Self {
        self.visitors.push(rule);
        self
    }

    /// Appends an accept rule.
    #[must_use]
    pub fn with_accept(mut self, rule: AcceptNaming) -> Self {
        self.accepts.push(rule);
        self
    }

    /// Appends a visitor-impl rule.
    #[must_use]
    pub fn with_visitor_impl(mut self, rule: VisitorImplNaming) -> Self {
        self.visitor_impls.push(rule);
        self
    }
}

fn target(kind: &'static str, rule: &str, pattern: &str) -> Result<Wildcard, RuleError> {
    Wildcard::new(pattern).map_err(|e| RuleError::Pattern {
        kind,
        rule: rule.to_owned(),
        reason: e.to_string(),
    })
}

/// Splits `rule` on `:` and checks the segment count lies in `min..=max`.
fn segments<'a>(
    kind: &'static str,
    rule: &'a str,
    min: usize,
    max: usize,
    expected: &'static str,
) -> Result<Vec<&'a str>, RuleError> {
    let parts: Vec<&str> = rule.split(':').collect();
    if parts.len() < min || parts.len() > max {
        return Err(RuleError::SegmentCount {
            kind,
            rule: rule.to_owned(),
            expected,
        });
    }
    if parts.iter().any(|p| p.is_empty()) {
        return Err(RuleError::EmptySegment {
            kind,
            rule: rule.to_owned(),
        });
    }
    Ok(parts)
}

impl VisitorNaming {
    /// Builds a rule from its three patterns.
    pub fn new(target_pattern: &str, type_name: &str, method_name: &str) -> Result<Self, RuleError> {
        Ok(Self {
            target: target("visitor", target_pattern, target_pattern)?,
            type_name: type_name.to_owned(),
            method_name: method_name.to_owned(),
        })
    }
}

impl FromStr for VisitorNaming {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = segments("visitor", s, 3, 3, "target:type:method")?;
        Ok(Self {
            target: target("visitor", s, parts[0])?,
            type_name: parts[1].to_owned(),
            method_name: parts[2].to_owned(),
        })
    }
}

impl AcceptNaming {
    /// Builds a rule from its two patterns.
    pub fn new(target_pattern: &str, method_name: &str) -> Result<Self, RuleError> {
        Ok(Self {
            target: target("accept", target_pattern, target_pattern)?,
            method_name: method_name.to_owned(),
        })
    }
}

impl FromStr for AcceptNaming {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = segments("accept", s, 2, 2, "target:method")?;
        Ok(Self {
            target: target("accept", s, parts[0])?,
            method_name: parts[1].to_owned(),
        })
    }
}

impl VisitorImplNaming {
    /// Builds a rule; `None` selects [`DEFAULT_FACTORY_NAME`].
    pub fn new(target_pattern: &str, factory_name: Option<&str>) -> Result<Self, RuleError> {
        Ok(Self {
            target: target("visitor-impl", target_pattern, target_pattern)?,
            factory_name: factory_name.unwrap_or(DEFAULT_FACTORY_NAME).to_owned(),
        })
    }
}

impl FromStr for VisitorImplNaming {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = segments("visitor-impl", s, 1, 2, "target or target:factory")?;
        Ok(Self {
            target: target("visitor-impl", s, parts[0])?,
            factory_name: parts.get(1).copied().unwrap_or(DEFAULT_FACTORY_NAME).to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn parses_visitor_rule() {
        let rule: VisitorNaming = "*Event:*Handler:On*".parse().unwrap();
        assert_eq!(rule.target.as_str(), "*Event");
        assert_eq!(rule.type_name, "*Handler");
        assert_eq!(rule.method_name, "On*");
    }

    #[test]
    fn parses_accept_rule() {
        let rule: AcceptNaming = "*Event:Emit".parse().unwrap();
        assert_eq!(rule.target.as_str(), "*Event");
        assert_eq!(rule.method_name, "Emit");
    }

    #[rstest]
    #[case("*Event", "New*")]
    #[case("*Event:Make*", "Make*")]
    fn parses_visitor_impl_rule(#[case] s: &str, #[case] factory: &str) {
        let rule: VisitorImplNaming = s.parse().unwrap();
        assert_eq!(rule.target.as_str(), "*Event");
        assert_eq!(rule.factory_name, factory);
    }

    #[rstest]
    #[case("*Event")]
    #[case("*Event:*Handler")]
    #[case("*Event:*Handler:On*:extra")]
    fn rejects_visitor_segment_count(#[case] s: &str) {
        let err = s.parse::<VisitorNaming>().unwrap_err();
        assert!(matches!(err, RuleError::SegmentCount { kind: "visitor", .. }), "{err}");
    }

    #[rstest]
    #[case("*Event")]
    #[case("*Event:Emit:Now")]
    fn rejects_accept_segment_count(#[case] s: &str) {
        let err = s.parse::<AcceptNaming>().unwrap_err();
        assert!(matches!(err, RuleError::SegmentCount { kind: "accept", .. }), "{err}");
    }

    #[test]
    fn rejects_visitor_impl_segment_count() {
        let err = "*:New*:x".parse::<VisitorImplNaming>().unwrap_err();
        assert!(matches!(err, RuleError::SegmentCount { .. }));
    }

    #[rstest]
    #[case("")]
    #[case("*Event::On*")]
    #[case(":*Handler:On*")]
    fn rejects_empty_segments(#[case] s: &str) {
        assert!(s.parse::<VisitorNaming>().is_err());
    }

    #[test]
    fn error_message_names_the_rule() {
        let err = "oops".parse::<AcceptNaming>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid accept rule \"oops\": expected target:method"
        );
    }

    #[test]
    fn builder_keeps_order() {
        let rules = NamingRules::new()
            .with_accept(AcceptNaming::new("*", "First").unwrap())
            .with_accept(AcceptNaming::new("*", "Second").unwrap());
        let names: Vec<_> = rules.accepts.iter().map(|a| a.method_name.as_str()).collect();
        assert_eq!(names, ["First", "Second"]);
    }
}
