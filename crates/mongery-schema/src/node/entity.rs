use crate::{
    module::ModulePath,
    node::{FieldDescriptor, TypeRef},
};
use convert_case::{Case, Casing};
use std::path::PathBuf;

///
/// EntityContext
///
/// One `@Entity` struct as extracted from the source tree. Built once per
/// scan and never mutated afterwards.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EntityContext {
    pub module: ModulePath,
    pub source: PathBuf,
    pub ident: String,

    /// Explicit collection name from the first marker parameter.
    pub collection: Option<String>,

    pub fields: Vec<FieldDescriptor>,
}

impl EntityContext {
    #[must_use]
    pub fn package(&self) -> &str {
        self.module.package()
    }

    #[must_use]
    /// Registry identity of this entity.
    pub fn key(&self) -> TypeRef {
        TypeRef::new(self.package(), self.ident.clone())
    }

    #[must_use]
    /// Collection name: the explicit override, else the snake-cased ident.
    pub fn collection_name(&self) -> String {
        self.collection
            .clone()
            .unwrap_or_else(|| self.ident.to_case(Case::Snake))
    }

    #[must_use]
    pub fn field(&self, ident: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.ident == ident)
    }
}

///
/// TESTS
///
