//! Slice convenience boilerplate (`slice` feature).

use mongery_schema::{module::is_module_root, node::EntityContext};
use proc_macro2::Ident;
use quote::format_ident;

/// Name of the generated `Vec` wrapper for an entity.
#[must_use]
pub fn list_ident(entity: &EntityContext) -> Ident {
    format_ident!("{}List", entity.ident)
}

/// Path to the entity type as seen from its generated module. The output of
/// `order.rs` is a sibling module; the output of `mod.rs`/`lib.rs` is a
/// child of the module that declares the entity.
#[must_use]
pub fn entity_type_path(entity: &EntityContext) -> String {
    if is_module_root(&entity.source) || entity.module.is_crate_root() {
        format!("super::{}", entity.ident)
    } else {
        format!("super::{}::{}", entity.module.package(), entity.ident)
    }
}

/// Render the wrapper type and its accessors. `first`/`last` fall back to
/// `Default::default()` on an empty list, so the entity must implement
/// `Clone`, `Debug` and `Default`.
#[must_use]
pub fn render_slice(entity: &EntityContext) -> String {
    let list = list_ident(entity);
    let ty = entity_type_path(entity);

    format!(
        r"#[derive(Clone, Debug, Default)]
pub struct {list}(pub Vec<{ty}>);

impl {list} {{
    #[must_use]
    pub fn len(&self) -> usize {{
        self.0.len()
    }}

    #[must_use]
    pub fn is_empty(&self) -> bool {{
        self.0.is_empty()
    }}

    pub fn push(&mut self, value: {ty}) {{
        self.0.push(value);
    }}

    #[must_use]
    pub fn first(&self) -> {ty} {{
        self.0.first().cloned().unwrap_or_default()
    }}

    #[must_use]
    pub fn last(&self) -> {ty} {{
        self.0.last().cloned().unwrap_or_default()
    }}
}}

impl From<Vec<{ty}>> for {list} {{
    fn from(items: Vec<{ty}>) -> Self {{
        Self(items)
    }}
}}
"
    )
}

///
/// TESTS
///
