//! Order events dispatched through a visitor that returns nothing.

mod enum_gen;

pub use enum_gen::*;

use enumgen::MemberOf;

pub trait Event {}

pub struct Paid(MemberOf<dyn Event>, pub u32);

impl Paid {
    pub fn new(cents: u32) -> Self {
        Self(MemberOf::new(), cents)
    }
}

pub struct Shipped {
    pub carrier: String,
    _event: MemberOf<dyn Event>,
}

impl Shipped {
    pub fn new(carrier: &str) -> Self {
        Self {
            carrier: carrier.to_owned(),
            _event: MemberOf::new(),
        }
    }
}

/// Writes one line per visited event.
#[derive(Default)]
pub struct Log(pub Vec<String>);

impl EventVisitor for Log {
    fn visit_paid(&mut self, e: &Paid) {
        self.0.push(format!("paid {}", e.1));
    }

    fn visit_shipped(&mut self, e: &Shipped) {
        self.0.push(format!("shipped by {}", e.carrier));
    }
}
