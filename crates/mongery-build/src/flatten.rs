//! Recursive flattening of entity fields into dotted path constants.

use convert_case::{Case, Casing};
use mongery_schema::{
    Registry,
    node::{EntityContext, FieldDescriptor},
};
use proc_macro2::Ident;
use quote::format_ident;
use std::collections::HashSet;
use tracing::warn;

/// Deepest nesting level expanded. Top-level fields are level 1; deeper
/// branches are dropped without error, which also bounds self-references.
pub const MAX_DEPTH: usize = 15;

///
/// PathConstant
/// One generated `pub const` item.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PathConstant {
    pub ident: Ident,
    pub value: String,
    pub comment: Option<String>,
}

/// Identifier of an entity's collection-name constant.
#[must_use]
pub fn collection_ident(entity: &EntityContext) -> Ident {
    format_ident!("{}Collection", entity.ident)
}

/// Flatten every field of `entity`, following fields whose type is another
/// registered entity. Declaration order is kept; each field's constant
/// precedes the constants of its nested fields. A field whose constant name
/// was already emitted (`buyer_name` next to `buyerName`) is skipped along
/// with its nested fields.
#[must_use]
pub fn flatten(registry: &Registry, entity: &EntityContext) -> Vec<PathConstant> {
    let mut walk = Walk {
        registry,
        keys: vec![entity.ident.clone()],
        values: Vec::new(),
        emitted: HashSet::new(),
        out: Vec::new(),
    };

    for field in &entity.fields {
        walk.field(field, 1);
    }

    walk.out
}

// Walk
// running key/value paths shared down one recursion branch
struct Walk<'a> {
    registry: &'a Registry,
    keys: Vec<String>,
    values: Vec<String>,
    emitted: HashSet<String>,
    out: Vec<PathConstant>,
}

impl Walk<'_> {
    fn field(&mut self, field: &FieldDescriptor, depth: usize) {
        if depth > MAX_DEPTH {
            return;
        }

        self.keys.push(field.ident.to_case(Case::Pascal));
        let ident = self.keys.join("_");

        if !self.emitted.insert(ident.clone()) {
            warn!(constant = %ident, field = %field.ident, "duplicate constant name, skipped");
            self.keys.pop();
            return;
        }

        self.values.push(field.name.clone());
        self.out.push(PathConstant {
            ident: format_ident!("{}", ident),
            value: self.values.join("."),
            comment: field.comment.clone(),
        });

        if let Some(nested) = self.registry.get(&field.ty) {
            for inner in &nested.fields {
                self.field(inner, depth + 1);
            }
        }

        self.keys.pop();
        self.values.pop();
    }
}

///
/// TESTS
///
