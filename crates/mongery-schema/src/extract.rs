//! Field and context extraction from scanned `@Entity` structs.

use crate::{
    annotation::{doc_lines, find_marker},
    module::{CRATE_ROOT, ImportMap, ModulePath},
    node::{EXCLUDED_TAG, EntityContext, FieldDescriptor, TypeRef},
    scan::ScannedFile,
};
use syn::{
    Attribute, Expr, ExprLit, Fields, GenericArgument, ItemStruct, Lit, LitStr, Meta,
    PathArguments, Token, Type, ext::IdentExt, token,
};
use tracing::debug;

/// Wrapper types unwrapped one level during type resolution.
const POINTER_WRAPPERS: [&str; 4] = ["Arc", "Box", "Option", "Rc"];

///
/// Scope
/// Name-resolution context of the struct being extracted.
///

struct Scope<'a> {
    module: &'a ModulePath,
    imports: &'a ImportMap,
    self_ident: &'a str,
    tag: &'a str,
}

/// Extract one context per `@Entity` struct of a scanned file, in
/// declaration order.
#[must_use]
pub fn extract_entities(file: &ScannedFile, tag: &str) -> Vec<EntityContext> {
    file.entities
        .iter()
        .map(|item| extract_entity(file, item, tag))
        .collect()
}

/// Extract the context of one marked struct.
#[must_use]
pub fn extract_entity(file: &ScannedFile, item: &ItemStruct, tag: &str) -> EntityContext {
    let ident = item.ident.unraw().to_string();
    let collection = find_marker(&doc_lines(&item.attrs))
        .and_then(|params| params.into_iter().next());

    let scope = Scope {
        module: &file.module,
        imports: &file.imports,
        self_ident: &ident,
        tag,
    };

    let fields = match &item.fields {
        Fields::Named(named) => named
            .named
            .iter()
            .filter_map(|field| extract_field(&scope, field))
            .collect(),
        Fields::Unnamed(_) | Fields::Unit => Vec::new(),
    };

    EntityContext {
        module: file.module.clone(),
        source: file.path.clone(),
        ident,
        collection,
        fields,
    }
}

// extract_field
// every early return is a silent skip; nothing here is an error
fn extract_field(scope: &Scope<'_>, field: &syn::Field) -> Option<FieldDescriptor> {
    let ident = field.ident.as_ref()?.unraw().to_string();

    let Some(tag) = read_tag(&field.attrs, scope.tag) else {
        debug!(entity = scope.self_ident, field = %ident, "no tag, skipped");
        return None;
    };

    let tag = tag.trim();
    if tag == EXCLUDED_TAG {
        debug!(entity = scope.self_ident, field = %ident, "excluded");
        return None;
    }

    let name = tag.split(',').next().unwrap_or_default().trim();
    if name.is_empty() {
        debug!(entity = scope.self_ident, field = %ident, "empty tag name, skipped");
        return None;
    }

    let Some((ty, is_pointer)) = resolve_type(scope, &field.ty) else {
        debug!(entity = scope.self_ident, field = %ident, "unresolvable type, skipped");
        return None;
    };

    Some(FieldDescriptor {
        ident,
        name: name.to_string(),
        ty,
        is_pointer,
        comment: doc_comment(&field.attrs),
    })
}

///
/// read_tag
///
/// Raw tag string of the first attribute named `tag` that yields one.
/// `#[bson = "a,omitempty"]` and `#[bson("a,omitempty")]` give the string
/// as written; `#[bson(rename = "a")]` gives `a` and `#[bson(skip)]` gives
/// the exclusion sentinel.
///

#[must_use]
pub fn read_tag(attrs: &[Attribute], tag: &str) -> Option<String> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident(tag))
        .find_map(tag_value)
}

fn tag_value(attr: &Attribute) -> Option<String> {
    match &attr.meta {
        Meta::NameValue(nv) => match &nv.value {
            Expr::Lit(ExprLit {
                lit: Lit::Str(lit), ..
            }) => Some(lit.value()),
            _ => None,
        },
        Meta::List(list) => {
            if let Ok(lit) = syn::parse2::<LitStr>(list.tokens.clone()) {
                return Some(lit.value());
            }

            let mut rename = None;
            let mut skip = false;
            list.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") && meta.input.peek(Token![=]) {
                    let lit: LitStr = meta.value()?.parse()?;
                    rename = Some(lit.value());
                } else if meta.path.is_ident("skip") || meta.path.is_ident("skip_serializing") {
                    skip = true;
                } else if meta.input.peek(Token![=]) {
                    meta.value()?.parse::<Expr>()?;
                } else if meta.input.peek(token::Paren) {
                    let content;
                    syn::parenthesized!(content in meta.input);
                    content.parse::<proc_macro2::TokenStream>()?;
                }
                Ok(())
            })
            .ok()?;

            if skip {
                Some(EXCLUDED_TAG.to_string())
            } else {
                rename
            }
        }
        Meta::Path(_) => None,
    }
}

// Trimmed doc lines joined by newlines; blank docs count as none.
fn doc_comment(attrs: &[Attribute]) -> Option<String> {
    let lines: Vec<String> = doc_lines(attrs)
        .iter()
        .map(|line| line.trim().to_string())
        .collect();

    if lines.iter().all(String::is_empty) {
        None
    } else {
        Some(lines.join("\n").trim().to_string())
    }
}

// resolve_type
// unwraps one pointer level, then maps a path type to (package, name)
fn resolve_type(scope: &Scope<'_>, ty: &Type) -> Option<(TypeRef, bool)> {
    let ty = strip_group(ty);
    let (inner, is_pointer) = match unwrap_pointer(ty) {
        Some(inner) => (strip_group(inner), true),
        None => (ty, false),
    };

    let Type::Path(type_path) = inner else {
        return None;
    };
    if type_path.qself.is_some() {
        return None;
    }

    let segments: Vec<String> = type_path
        .path
        .segments
        .iter()
        .map(|segment| segment.ident.unraw().to_string())
        .collect();
    let (name, modules) = segments.split_last()?;

    if name == "Self" && modules.is_empty() {
        return Some((
            TypeRef::new(scope.module.package(), scope.self_ident),
            is_pointer,
        ));
    }

    // bare name brought in by `use`
    if modules.is_empty()
        && let Some(import) = scope.imports.get(name)
        && let Some((real_name, import_modules)) = import.split_last()
    {
        let package = resolve_package(scope.module, &ImportMap::default(), import_modules);
        return Some((TypeRef::new(package, real_name.clone()), is_pointer));
    }

    let package = resolve_package(scope.module, scope.imports, modules);

    Some((TypeRef::new(package, name.clone()), is_pointer))
}

// Package named by the module segments preceding a type name.
fn resolve_package(module: &ModulePath, imports: &ImportMap, modules: &[String]) -> String {
    let Some(last) = modules.last() else {
        return module.package().to_string();
    };

    match last.as_str() {
        "crate" => CRATE_ROOT.to_string(),
        "self" | "super" => module.relative(modules).package().to_string(),
        _ if modules.len() == 1 => imports
            .get(last)
            .and_then(<[String]>::last)
            .map_or_else(|| last.clone(), Clone::clone),
        _ => last.clone(),
    }
}

fn unwrap_pointer(ty: &Type) -> Option<&Type> {
    match ty {
        Type::Reference(reference) => Some(&reference.elem),
        Type::Ptr(ptr) => Some(&ptr.elem),
        Type::Path(type_path) if type_path.qself.is_none() => {
            let last = type_path.path.segments.last()?;
            if !POINTER_WRAPPERS.iter().any(|wrapper| last.ident == wrapper) {
                return None;
            }

            let PathArguments::AngleBracketed(args) = &last.arguments else {
                return None;
            };
            if args.args.len() != 1 {
                return None;
            }

            match args.args.first()? {
                GenericArgument::Type(inner) => Some(inner),
                _ => None,
            }
        }
        _ => None,
    }
}

fn strip_group(ty: &Type) -> &Type {
    match ty {
        Type::Group(group) => strip_group(&group.elem),
        Type::Paren(paren) => strip_group(&paren.elem),
        _ => ty,
    }
}

///
/// TESTS
///
