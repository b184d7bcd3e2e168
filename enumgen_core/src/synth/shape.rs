//! Whether generated visitor methods return a value.

use crate::ast::{Expr, Stmt};

/// Return behaviour of one enum's visitor and accept methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnShape {
    /// Methods return `()`.
    NoReturn,
    /// Methods return this type, written as Rust type syntax.
    Returns(String),
}

impl ReturnShape {
    /// Shape for an identifier declared with `VisitorReturns<R>`, or without
    /// it when `visitor_return` is `None`. `VisitorReturns<()>` means no return.
    pub fn from_return(visitor_return: Option<&str>) -> Self {
        match visitor_return.map(str::trim) {
            None | Some("()") => Self::NoReturn,
            Some(ty) => Self::Returns(ty.to_owned()),
        }
    }

    /// Declared result type of every visit and accept method.
    pub fn output(&self) -> Option<&str> {
        match self {
            Self::NoReturn => None,
            Self::Returns(ty) => Some(ty),
        }
    }

    /// Body forwarding to `call`: its value is returned when there is one.
    pub fn body(&self, call: Expr) -> Stmt {
        match self {
            Self::NoReturn => Stmt::Semi(call),
            Self::Returns(_) => Stmt::Tail(call),
        }
    }
}
