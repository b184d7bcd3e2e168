// Code generated by enumgen. DO NOT EDIT.

//! Visitors generated for the `events` module.
#![allow(dead_code, private_interfaces)]
use super::*;
pub trait EventVisitor {
    fn visit_paid(&mut self, e: &Paid);
    fn visit_shipped(&mut self, e: &Shipped);
}
pub trait EventEnum {
    fn accept(&self, v: &mut dyn EventVisitor);
}
impl EventEnum for Paid {
    fn accept(&self, v: &mut dyn EventVisitor) {
        v.visit_paid(self);
    }
}
impl EventEnum for Shipped {
    fn accept(&self, v: &mut dyn EventVisitor) {
        v.visit_shipped(self);
    }
}
const _: () = {
    fn exhaustive(m0: &Paid, m1: &Shipped) {
        let _: [&dyn EventEnum; 2] = [m0, m1];
    }
};
pub struct EventVisitorFn<'a> {
    visit_paid: Box<dyn FnMut(&Paid) + 'a>,
    visit_shipped: Box<dyn FnMut(&Shipped) + 'a>,
}
pub fn new_event<'a>(
    visit_paid: impl FnMut(&Paid) + 'a,
    visit_shipped: impl FnMut(&Shipped) + 'a,
) -> impl EventVisitor + 'a {
    EventVisitorFn {
        visit_paid: Box::new(visit_paid),
        visit_shipped: Box::new(visit_shipped),
    }
}
impl EventVisitor for EventVisitorFn<'_> {
    fn visit_paid(&mut self, e: &Paid) {
        (self.visit_paid)(e);
    }
    fn visit_shipped(&mut self, e: &Shipped) {
        (self.visit_shipped)(e);
    }
}
