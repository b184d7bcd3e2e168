//! Declarations generated for one enum.
//!
//! For every [`EnumInfo`], in order:
//!
//! 1. the visitor trait (one visit method per member) and the enum trait (one
//!    accept method taking the visitor),
//! 2. an enum trait impl per member that dispatches to its visit method,
//! 3. a compile-time check listing every member,
//! 4. when a visitor-impl rule matches, a closure-backed visitor: a carrier
//!    struct with one boxed closure per member, a factory function taking the
//!    closures, and the carrier's visitor impl.

mod shape;

use std::collections::HashSet;

use tracing::debug;

pub use shape::ReturnShape;

use crate::ast::{
    CheckDecl, Decl, Expr, FnShape, FuncDecl, ImplDecl, MethodDecl, Param, Receiver, SelfTy,
    Signature, Stmt, StructDecl, TraitDecl, TypeRef,
};
use crate::codegen::{to_snake_case, type_ident, value_ident};
use crate::error::{GenError, Result};
use crate::join::EnumInfo;
use crate::naming::NamingRegistry;
use crate::pipeline::{Emitter, Stage, stage};

/// Parameter name of the member in visit methods.
const MEMBER_PARAM: &str = "e";
/// Parameter name of the visitor in accept methods.
const VISITOR_PARAM: &str = "v";

fn checked_type(name: String, what: &str, info: &EnumInfo) -> Result<String> {
    match type_ident(&name) {
        Some(_) => Ok(name),
        None => Err(GenError::invalid_name(name, format!("{what} of {}", info.name))),
    }
}

fn checked_value(name: String, what: &str, info: &EnumInfo) -> Result<String> {
    match value_ident(&name) {
        Some(_) => Ok(name),
        None => Err(GenError::invalid_name(name, format!("{what} of {}", info.name))),
    }
}

/// Builds every declaration for `info`, resolving names through `registry`.
pub fn synthesize(info: &EnumInfo, registry: &NamingRegistry) -> Result<Vec<Decl>> {
    let name = info.name.as_str();
    let visitor = checked_type(registry.visitor_type_name(name), "visitor trait", info)?;
    let enum_trait = checked_type(format!("{name}Enum"), "enum trait", info)?;
    let accept = checked_value(registry.accept_method_name(name), "accept method", info)?;
    let visits = info
        .members
        .iter()
        .map(|member| {
            let method = registry.visit_method_name(name, member);
            Ok((member.as_str(), checked_value(method, "visit method", info)?))
        })
        .collect::<Result<Vec<_>>>()?;
    let mut seen = HashSet::new();
    for (_, method) in &visits {
        if !seen.insert(to_snake_case(method)) {
            return Err(GenError::duplicate_name(
                method.as_str(),
                format!("visit method of {}", info.name),
            ));
        }
    }

    let output = info.shape.output().map(str::to_owned);
    let visit_sig = |member: &str, method: &str| Signature {
        name: method.to_owned(),
        receiver: Receiver::Unique,
        params: vec![Param::new(MEMBER_PARAM, TypeRef::Borrowed(member.to_owned()))],
        output: output.clone(),
    };
    let accept_sig = Signature {
        name: accept,
        receiver: Receiver::Shared,
        params: vec![Param::new(VISITOR_PARAM, TypeRef::DynMut(visitor.clone()))],
        output: output.clone(),
    };

    let mut decls = vec![Decl::Traits(vec![
        TraitDecl {
            name: visitor.clone(),
            methods: visits.iter().map(|(m, v)| visit_sig(m, v)).collect(),
        },
        TraitDecl {
            name: enum_trait.clone(),
            methods: vec![accept_sig.clone()],
        },
    ])];

    for (member, method) in &visits {
        let call = Expr::method_call(Expr::var(VISITOR_PARAM), method.as_str(), vec![Expr::SelfValue]);
        decls.push(Decl::Impl(ImplDecl {
            trait_name: enum_trait.clone(),
            self_ty: SelfTy::Member((*member).to_owned()),
            methods: vec![MethodDecl {
                sig: accept_sig.clone(),
                body: info.shape.body(call),
            }],
        }));
    }

    decls.push(Decl::Check(CheckDecl {
        trait_name: enum_trait,
        members: info.members.clone(),
    }));

    if let Some(factory) = registry.visitor_impl_factory_name(name) {
        let factory = checked_value(factory, "visitor factory", info)?;
        let carrier = checked_type(format!("{visitor}Fn"), "visitor carrier", info)?;
        let closure = |member: &str| FnShape {
            arg: member.to_owned(),
            output: output.clone(),
        };

        decls.push(Decl::Struct(StructDecl {
            name: carrier.clone(),
            lifetime: true,
            fields: visits
                .iter()
                .map(|(m, v)| Param::new(v.as_str(), TypeRef::BoxedFn(closure(m))))
                .collect(),
        }));
        decls.push(Decl::Func(FuncDecl {
            name: factory,
            lifetime: true,
            params: visits
                .iter()
                .map(|(m, v)| Param::new(v.as_str(), TypeRef::ImplFn(closure(m))))
                .collect(),
            output: TypeRef::ImplTrait(visitor.clone()),
            body: Stmt::Tail(Expr::StructLit {
                name: carrier.clone(),
                fields: visits
                    .iter()
                    .map(|(_, v)| (v.clone(), Expr::Boxed(Box::new(Expr::var(v.as_str())))))
                    .collect(),
            }),
        }));
        decls.push(Decl::Impl(ImplDecl {
            trait_name: visitor,
            self_ty: SelfTy::Carrier(carrier),
            methods: visits
                .iter()
                .map(|(m, v)| MethodDecl {
                    sig: visit_sig(m, v),
                    body: info.shape.body(Expr::CallField {
                        field: v.clone(),
                        args: vec![Expr::var(MEMBER_PARAM)],
                    }),
                })
                .collect(),
        }));
    }

    Ok(decls)
}

/// Fails when two top-level declarations of one generated file share a name.
/// Traits and structs share the type namespace, factories the value namespace.
pub fn check_unique_names(decls: &[Decl]) -> Result<()> {
    let mut types = HashSet::new();
    let mut values = HashSet::new();
    for decl in decls {
        match decl {
            Decl::Traits(traits) => {
                for decl in traits {
                    if !types.insert(decl.name.as_str()) {
                        return Err(GenError::duplicate_name(decl.name.as_str(), "trait"));
                    }
                }
            }
            Decl::Struct(decl) => {
                if !types.insert(decl.name.as_str()) {
                    return Err(GenError::duplicate_name(decl.name.as_str(), "struct"));
                }
            }
            Decl::Func(decl) => {
                if !values.insert(to_snake_case(&decl.name)) {
                    return Err(GenError::duplicate_name(decl.name.as_str(), "function"));
                }
            }
            Decl::Impl(_) | Decl::Check(_) => {}
        }
    }
    Ok(())
}

/// Stage synthesizing the declarations of every enum it receives.
pub fn synthesize_stage(registry: &NamingRegistry) -> impl Stage<EnumInfo, Vec<Decl>, GenError> + '_ {
    stage(move |info: EnumInfo, out: &Emitter<Vec<Decl>, GenError>| {
        let decls = synthesize(&info, registry)?;
        debug!("synthesized {} declarations for {}", decls.len(), info.identifier);
        out.emit(decls);
        Ok(())
    })
}
