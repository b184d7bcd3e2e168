// Code generated by enumgen. DO NOT EDIT.

//! Visitors generated for the `shapes` module.
#![allow(dead_code, private_interfaces)]
use super::*;
pub trait ShapeVisitor {
    fn visit_circle(&mut self, e: &Circle) -> f64;
    fn visit_square(&mut self, e: &Square) -> f64;
}
pub trait ShapeEnum {
    fn accept(&self, v: &mut dyn ShapeVisitor) -> f64;
}
impl ShapeEnum for Circle {
    fn accept(&self, v: &mut dyn ShapeVisitor) -> f64 {
        v.visit_circle(self)
    }
}
impl ShapeEnum for Square {
    fn accept(&self, v: &mut dyn ShapeVisitor) -> f64 {
        v.visit_square(self)
    }
}
const _: () = {
    fn exhaustive(m0: &Circle, m1: &Square) {
        let _: [&dyn ShapeEnum; 2] = [m0, m1];
    }
};
pub struct ShapeVisitorFn<'a> {
    visit_circle: Box<dyn FnMut(&Circle) -> f64 + 'a>,
    visit_square: Box<dyn FnMut(&Square) -> f64 + 'a>,
}
pub fn new_shape<'a>(
    visit_circle: impl FnMut(&Circle) -> f64 + 'a,
    visit_square: impl FnMut(&Square) -> f64 + 'a,
) -> impl ShapeVisitor + 'a {
    ShapeVisitorFn {
        visit_circle: Box::new(visit_circle),
        visit_square: Box::new(visit_square),
    }
}
impl ShapeVisitor for ShapeVisitorFn<'_> {
    fn visit_circle(&mut self, e: &Circle) -> f64 {
        (self.visit_circle)(e)
    }
    fn visit_square(&mut self, e: &Square) -> f64 {
        (self.visit_square)(e)
    }
}
