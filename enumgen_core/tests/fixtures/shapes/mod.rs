//! Shapes measured through the generated visitor.

mod enum_gen;

pub use enum_gen::*;

use std::f64::consts::PI;

use enumgen::{MemberOf, VisitorReturns};

/// Every shape visitor computes a number.
pub trait Shape: VisitorReturns<f64> {}

pub struct Circle {
    pub radius: f64,
    _member: MemberOf<dyn Shape>,
}

impl Circle {
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            _member: MemberOf::new(),
        }
    }
}

pub struct Square(MemberOf<dyn Shape>, pub f64);

impl Square {
    pub fn new(side: f64) -> Self {
        Self(MemberOf::new(), side)
    }
}

/// Area of any shape.
pub struct Area;

impl ShapeVisitor for Area {
    fn visit_circle(&mut self, e: &Circle) -> f64 {
        PI * e.radius * e.radius
    }

    fn visit_square(&mut self, e: &Square) -> f64 {
        e.1 * e.1
    }
}
