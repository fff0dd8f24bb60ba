use derive_more::Display;

/// Tag value that excludes a field from generation.
pub const EXCLUDED_TAG: &str = "-";

///
/// TypeRef
/// (package, type name) pair a field's declared type resolves to. Also the
/// identity key of an entity in the registry.
///

#[derive(Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[display("{package}::{name}")]
pub struct TypeRef {
    pub package: String,
    pub name: String,
}

impl TypeRef {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }
}

///
/// FieldDescriptor
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldDescriptor {
    /// Rust identifier of the field, unrawed.
    pub ident: String,

    /// First segment of the serialization tag.
    pub name: String,

    pub ty: TypeRef,
    pub is_pointer: bool,

    /// Doc comment lines, trimmed.
    pub comment: Option<String>,
}
