//! Minimal syntax tree for generated declarations.
//!
//! Synthesis builds these nodes and [`crate::codegen`] lowers them to `syn`
//! items. Nodes hold plain strings so they can travel between pipeline
//! threads. Type-level names (traits, structs, member types) are kept exactly
//! as written; value-level names (methods, fields, functions, variables) are
//! stored in the naming rules' spelling and converted to `snake_case` only when
//! lowered. Result types are Rust type syntax, parsed during lowering.

/// The whole generated file before printing.
#[derive(Debug, Clone)]
pub struct GenFile {
    /// Name of the scanned module, used in the file's inner doc comment.
    pub package: String,
    /// Name of the generated module itself, normally the output file stem.
    pub module: String,
    /// `use` items carried over from the scanned files, as source text.
    pub imports: Vec<String>,
    /// Generated declarations in emission order.
    pub decls: Vec<Decl>,
}

/// A top-level generated declaration.
#[derive(Debug, Clone)]
pub enum Decl {
    /// Traits declared together as one block.
    Traits(Vec<TraitDecl>),
    /// A trait implementation.
    Impl(ImplDecl),
    /// Compile-time proof that every member implements a trait.
    Check(CheckDecl),
    /// The closure carrier.
    Struct(StructDecl),
    /// The carrier's factory.
    Func(FuncDecl),
}

/// A public trait made of required methods only.
#[derive(Debug, Clone)]
pub struct TraitDecl {
    /// Trait name, verbatim.
    pub name: String,
    /// Method signatures in declaration order.
    pub methods: Vec<Signature>,
}

/// A method signature. Every generated method takes `self` by reference.
#[derive(Debug, Clone)]
pub struct Signature {
    /// Method name before snake casing.
    pub name: String,
    /// How `self` is borrowed.
    pub receiver: Receiver,
    /// Parameters after `self`.
    pub params: Vec<Param>,
    /// Result type text; `None` for methods returning nothing.
    pub output: Option<String>,
}

/// The `self` parameter of a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receiver {
    /// `&self`
    Shared,
    /// `&mut self`
    Unique,
}

/// A named, typed parameter or struct field.
#[derive(Debug, Clone)]
pub struct Param {
    /// Name before snake casing.
    pub name: String,
    /// Type of the parameter.
    pub ty: TypeRef,
}

/// The handful of type shapes generated code needs.
#[derive(Debug, Clone)]
pub enum TypeRef {
    /// `&Member`
    Borrowed(String),
    /// `&mut dyn Trait`
    DynMut(String),
    /// `impl FnMut(&Member) -> R + 'a`
    ImplFn(FnShape),
    /// `Box<dyn FnMut(&Member) -> R + 'a>`
    BoxedFn(FnShape),
    /// `impl Trait + 'a`
    ImplTrait(String),
}

/// Argument and result of a single-argument closure type.
#[derive(Debug, Clone)]
pub struct FnShape {
    /// Member type the closure borrows.
    pub arg: String,
    /// Result type text, if any.
    pub output: Option<String>,
}

/// `impl Trait for Type { .. }`.
#[derive(Debug, Clone)]
pub struct ImplDecl {
    /// Implemented trait.
    pub trait_name: String,
    /// Implementing type.
    pub self_ty: SelfTy,
    /// Method bodies, one per trait method.
    pub methods: Vec<MethodDecl>,
}

/// The implementing type of an [`ImplDecl`].
#[derive(Debug, Clone)]
pub enum SelfTy {
    /// A scanned member type.
    Member(String),
    /// A generated struct carrying one lifetime, written with `'_`.
    Carrier(String),
}

/// A method with its body.
#[derive(Debug, Clone)]
pub struct MethodDecl {
    /// Signature, shared with the trait declaration.
    pub sig: Signature,
    /// Body.
    pub body: Stmt,
}

/// A single-statement body.
#[derive(Debug, Clone)]
pub enum Stmt {
    /// The expression is the result.
    Tail(Expr),
    /// The expression is evaluated and its value discarded.
    Semi(Expr),
}

/// The expressions generated bodies are made of.
#[derive(Debug, Clone)]
pub enum Expr {
    /// `self`
    SelfValue,
    /// A local variable or parameter.
    Var(String),
    /// `receiver.method(args)`
    MethodCall {
        /// Receiver expression.
        receiver: Box<Expr>,
        /// Method name before snake casing.
        method: String,
        /// Call arguments.
        args: Vec<Expr>,
    },
    /// `(self.field)(args)`
    CallField {
        /// Field holding the closure.
        field: String,
        /// Call arguments.
        args: Vec<Expr>,
    },
    /// `Name { field: value, .. }`
    StructLit {
        /// Struct name.
        name: String,
        /// Field initializers in order.
        fields: Vec<(String, Expr)>,
    },
    /// `Box::new(expr)`
    Boxed(Box<Expr>),
}

/// Compile-time check that lists every member of one family.
#[derive(Debug, Clone)]
pub struct CheckDecl {
    /// Trait every member must be usable as.
    pub trait_name: String,
    /// Member types, each listed once.
    pub members: Vec<String>,
}

/// A struct with private fields, optionally generic over `'a`.
#[derive(Debug, Clone)]
pub struct StructDecl {
    /// Struct name, verbatim.
    pub name: String,
    /// Whether the struct is generic over `'a`.
    pub lifetime: bool,
    /// Private fields.
    pub fields: Vec<Param>,
}

/// A free function, optionally generic over `'a`.
#[derive(Debug, Clone)]
pub struct FuncDecl {
    /// Function name before snake casing.
    pub name: String,
    /// Whether the function is generic over `'a`.
    pub lifetime: bool,
    /// Parameters.
    pub params: Vec<Param>,
    /// Result type.
    pub output: TypeRef,
    /// Body.
    pub body: Stmt,
}

impl Expr {
    /// A variable reference.
    pub fn var(name: impl Into<String>) -> Self {
        Self::Var(name.into())
    }

    /// `receiver.method(args)`.
    pub fn method_call(receiver: Self, method: impl Into<String>, args: Vec<Self>) -> Self {
        Self::MethodCall {
            receiver: Box::new(receiver),
            method: method.into(),
            args,
        }
    }
}

impl Param {
    /// Creates a parameter.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

impl Decl {
    /// Short label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Traits(_) => "traits",
            Self::Impl(_) => "impl",
            Self::Check(_) => "check",
            Self::Struct(_) => "struct",
            Self::Func(_) => "fn",
        }
    }
}
