//! Marker types read by the `enumgen` generator.
//!
//! A closed family of types is declared by giving every member a
//! [`MemberOf`] field (or by aliasing it directly) parameterized with a shared
//! identifier type. The identifier may carry a [`VisitorReturns`] supertrait to
//! choose the return type of the generated visitor methods.
//!
//! ```
//! pub trait Shape: enumgen::VisitorReturns<f64> {}
//!
//! pub struct Circle {
//!     pub radius: f64,
//!     _member: enumgen::MemberOf<dyn Shape>,
//! }
//!
//! pub struct Square(enumgen::MemberOf<dyn Shape>, pub f64);
//!
//! pub type Empty = enumgen::MemberOf<dyn Shape>;
//! ```
//!
//! Neither marker has any runtime behavior.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Marks the enclosing type as a member of the family identified by `Ident`.
///
/// Zero-sized; `Ident` may be unsized so trait objects can be used as
/// identifiers.
pub struct MemberOf<Ident: ?Sized>(PhantomData<fn() -> *const Ident>);

impl<Ident: ?Sized> MemberOf<Ident> {
    /// Creates the marker.
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

// Manual impls: derives would bound `Ident` by the derived trait.

impl<Ident: ?Sized> Default for MemberOf<Ident> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Ident: ?Sized> Clone for MemberOf<Ident> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Ident: ?Sized> Copy for MemberOf<Ident> {}

impl<Ident: ?Sized> fmt::Debug for MemberOf<Ident> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MemberOf")
    }
}

impl<Ident: ?Sized> PartialEq for MemberOf<Ident> {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl<Ident: ?Sized> Eq for MemberOf<Ident> {}

impl<Ident: ?Sized> Hash for MemberOf<Ident> {
    fn hash<H: Hasher>(&self, _state: &mut H) {}
}

/// Declares the return type of the visitor methods generated for an identifier.
///
/// Used as a supertrait of the identifier trait. Every type implements it, so
/// the bound never constrains implementors.
pub trait VisitorReturns<Return: ?Sized> {}

impl<T: ?Sized, Return: ?Sized> VisitorReturns<Return> for T {}

#[cfg(test)]
mod tests {
    use super::*;

    trait Fruit {}

    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    struct Apple(MemberOf<dyn Fruit>);

    #[test]
    fn marker_is_zero_sized() {
        assert_eq!(std::mem::size_of::<MemberOf<dyn Fruit>>(), 0);
        assert_eq!(std::mem::size_of::<Apple>(), 0);
    }

    #[test]
    fn derives_work_through_marker() {
        let a = Apple::default();
        assert_eq!(a, a.clone());
        assert_eq!(format!("{a:?}"), "Apple(MemberOf)");
    }

    #[test]
    fn visitor_returns_is_satisfied_by_everything() {
        fn assert_bound<T: VisitorReturns<i32> + ?Sized>() {}
        assert_bound::<Apple>();
        assert_bound::<dyn Fruit>();
        assert_bound::<str>();
    }
}
