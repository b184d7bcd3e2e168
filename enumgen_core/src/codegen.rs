//! Lowering of [`crate::ast`] nodes to `syn` items.

use proc_macro2::{Literal, TokenStream};
use quote::{format_ident, quote};
use syn::Ident;

use crate::ast::{
    CheckDecl, Decl, Expr, FnShape, FuncDecl, ImplDecl, Param, Receiver, SelfTy, Signature, Stmt,
    StructDecl, TraitDecl, TypeRef,
};
use crate::error::{GenError, Result};

/// `VisitHTTPRequest` to `visit_http_request`. Names already in snake case
/// are returned unchanged.
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);
    for (i, &ch) in chars.iter().enumerate() {
        if !ch.is_uppercase() {
            result.push(ch);
            continue;
        }
        let boundary = match i.checked_sub(1).map(|p| chars[p]) {
            None | Some('_') => false,
            Some(prev) => {
                prev.is_lowercase()
                    || prev.is_ascii_digit()
                    || (prev.is_uppercase() && chars.get(i + 1).is_some_and(|next| next.is_lowercase()))
            }
        };
        if boundary {
            result.push('_');
        }
        result.extend(ch.to_lowercase());
    }
    result
}

/// `name` as a type-level identifier, if it is one.
pub fn type_ident(name: &str) -> Option<Ident> {
    syn::parse_str::<Ident>(name).ok()
}

/// `name` in snake case as a value-level identifier, if it is one.
pub fn value_ident(name: &str) -> Option<Ident> {
    type_ident(&to_snake_case(name))
}

fn ty_name(name: &str) -> Result<Ident> {
    type_ident(name).ok_or_else(|| GenError::invalid_name(name, "type name"))
}

fn value_name(name: &str) -> Result<Ident> {
    value_ident(name).ok_or_else(|| GenError::invalid_name(name, "value name"))
}

fn rust_type(text: &str) -> Result<syn::Type> {
    Ok(syn::parse_str(text)?)
}

fn item(tokens: TokenStream) -> Result<syn::Item> {
    Ok(syn::parse2(tokens)?)
}

/// Lowers `decls` in order. A type block yields one item per trait.
pub fn lower_decls(decls: &[Decl]) -> Result<Vec<syn::Item>> {
    let mut items = Vec::with_capacity(decls.len());
    for decl in decls {
        match decl {
            Decl::Traits(traits) => {
                for decl in traits {
                    items.push(lower_trait(decl)?);
                }
            }
            Decl::Impl(decl) => items.push(lower_impl(decl)?),
            Decl::Check(decl) => items.push(lower_check(decl)?),
            Decl::Struct(decl) => items.push(lower_struct(decl)?),
            Decl::Func(decl) => items.push(lower_func(decl)?),
        }
    }
    Ok(items)
}

fn lower_trait(decl: &TraitDecl) -> Result<syn::Item> {
    let name = ty_name(&decl.name)?;
    let sigs = decl
        .methods
        .iter()
        .map(lower_signature)
        .collect::<Result<Vec<_>>>()?;
    item(quote! {
        pub trait #name {
            #(#sigs;)*
        }
    })
}

fn lower_impl(decl: &ImplDecl) -> Result<syn::Item> {
    let trait_name = ty_name(&decl.trait_name)?;
    let self_ty = match &decl.self_ty {
        SelfTy::Member(name) => {
            let name = ty_name(name)?;
            quote!(#name)
        }
        SelfTy::Carrier(name) => {
            let name = ty_name(name)?;
            quote!(#name<'_>)
        }
    };
    let methods = decl
        .methods
        .iter()
        .map(|method| {
            let sig = lower_signature(&method.sig)?;
            let body = lower_stmt(&method.body)?;
            Ok(quote! { #sig { #body } })
        })
        .collect::<Result<Vec<_>>>()?;
    item(quote! {
        impl #trait_name for #self_ty {
            #(#methods)*
        }
    })
}

/// A never-called function whose body only compiles when every member can be
/// used as the enum trait object.
fn lower_check(decl: &CheckDecl) -> Result<syn::Item> {
    let trait_name = ty_name(&decl.trait_name)?;
    let members = decl
        .members
        .iter()
        .map(|m| ty_name(m))
        .collect::<Result<Vec<_>>>()?;
    let params: Vec<Ident> = (0..members.len()).map(|i| format_ident!("m{}", i)).collect();
    let len = Literal::usize_unsuffixed(members.len());
    item(quote! {
        const _: () = {
            fn exhaustive(#(#params: &#members),*) {
                let _: [&dyn #trait_name; #len] = [#(#params),*];
            }
        };
    })
}

fn lower_struct(decl: &StructDecl) -> Result<syn::Item> {
    let name = ty_name(&decl.name)?;
    let generics = decl.lifetime.then(|| quote!(<'a>));
    let fields = decl
        .fields
        .iter()
        .map(lower_param)
        .collect::<Result<Vec<_>>>()?;
    item(quote! {
        pub struct #name #generics {
            #(#fields),*
        }
    })
}

fn lower_func(decl: &FuncDecl) -> Result<syn::Item> {
    let name = value_name(&decl.name)?;
    let generics = decl.lifetime.then(|| quote!(<'a>));
    let params = decl
        .params
        .iter()
        .map(lower_param)
        .collect::<Result<Vec<_>>>()?;
    let output = lower_type(&decl.output)?;
    let body = lower_stmt(&decl.body)?;
    item(quote! {
        pub fn #name #generics(#(#params),*) -> #output {
            #body
        }
    })
}

fn lower_signature(sig: &Signature) -> Result<TokenStream> {
    let name = value_name(&sig.name)?;
    let receiver = match sig.receiver {
        Receiver::Shared => quote!(&self),
        Receiver::Unique => quote!(&mut self),
    };
    let params = sig
        .params
        .iter()
        .map(lower_param)
        .collect::<Result<Vec<_>>>()?;
    let output = lower_output(sig.output.as_deref())?;
    Ok(quote! { fn #name(#receiver #(, #params)*) #output })
}

fn lower_output(output: Option<&str>) -> Result<TokenStream> {
    match output {
        Some(text) => {
            let ty = rust_type(text)?;
            Ok(quote!(-> #ty))
        }
        None => Ok(TokenStream::new()),
    }
}

fn lower_param(param: &Param) -> Result<TokenStream> {
    let name = value_name(&param.name)?;
    let ty = lower_type(&param.ty)?;
    Ok(quote! { #name: #ty })
}

fn lower_fn_shape(shape: &FnShape) -> Result<TokenStream> {
    let arg = ty_name(&shape.arg)?;
    let output = lower_output(shape.output.as_deref())?;
    Ok(quote! { FnMut(&#arg) #output + 'a })
}

fn lower_type(ty: &TypeRef) -> Result<TokenStream> {
    Ok(match ty {
        TypeRef::Borrowed(name) => {
            let name = ty_name(name)?;
            quote!(&#name)
        }
        TypeRef::DynMut(name) => {
            let name = ty_name(name)?;
            quote!(&mut dyn #name)
        }
        TypeRef::ImplFn(shape) => {
            let shape = lower_fn_shape(shape)?;
            quote!(impl #shape)
        }
        TypeRef::BoxedFn(shape) => {
            let shape = lower_fn_shape(shape)?;
            quote!(Box<dyn #shape>)
        }
        TypeRef::ImplTrait(name) => {
            let name = ty_name(name)?;
            quote!(impl #name + 'a)
        }
    })
}

fn lower_stmt(stmt: &Stmt) -> Result<TokenStream> {
    Ok(match stmt {
        Stmt::Tail(expr) => lower_expr(expr)?,
        Stmt::Semi(expr) => {
            let expr = lower_expr(expr)?;
            quote!(#expr;)
        }
    })
}

fn lower_expr(expr: &Expr) -> Result<TokenStream> {
    let lower_all = |args: &[Expr]| args.iter().map(lower_expr).collect::<Result<Vec<_>>>();
    Ok(match expr {
        Expr::SelfValue => quote!(self),
        Expr::Var(name) => {
            let name = value_name(name)?;
            quote!(#name)
        }
        Expr::MethodCall {
            receiver,
            method,
            args,
        } => {
            let receiver = lower_expr(receiver)?;
            let method = value_name(method)?;
            let args = lower_all(args)?;
            quote!(#receiver.#method(#(#args),*))
        }
        Expr::CallField { field, args } => {
            let field = value_name(field)?;
            let args = lower_all(args)?;
            quote!((self.#field)(#(#args),*))
        }
        Expr::StructLit { name, fields } => {
            let name = ty_name(name)?;
            let (names, values): (Vec<_>, Vec<_>) = fields
                .iter()
                .map(|(field, value)| Ok((value_name(field)?, lower_expr(value)?)))
                .collect::<Result<Vec<_>>>()?
                .into_iter()
                .unzip();
            quote!(#name { #(#names: #values),* })
        }
        Expr::Boxed(inner) => {
            let inner = lower_expr(inner)?;
            quote!(Box::new(#inner))
        }
    })
}
