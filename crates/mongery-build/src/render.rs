//! Text rendering of generated constants.

use crate::{
    flatten::{collection_ident, flatten},
    slice::render_slice,
};
use mongery_schema::{Registry, node::EntityContext};
use proc_macro2::{Ident, Literal};

/// First line of every generated file.
pub const GENERATED_HEADER: &str = "// Code generated by mongery. DO NOT EDIT.";

/// Header written once, when an output file is first created in a run.
#[must_use]
pub fn render_header(entity: &EntityContext) -> String {
    format!(
        "{GENERATED_HEADER}\n\
         //! Field path constants for module `{}`.\n\
         #![allow(dead_code, non_upper_case_globals)]\n\n",
        entity.package()
    )
}

/// One entity's contribution: its collection constant, every flattened
/// field path, and optionally the slice wrapper. Ends with a blank line.
#[must_use]
pub fn render_entity(registry: &Registry, entity: &EntityContext, slice: bool) -> String {
    let mut out = String::new();

    push_const(
        &mut out,
        &collection_ident(entity),
        &entity.collection_name(),
        None,
    );

    for constant in flatten(registry, entity) {
        push_const(
            &mut out,
            &constant.ident,
            &constant.value,
            constant.comment.as_deref(),
        );
    }

    if slice {
        out.push('\n');
        out.push_str(&render_slice(entity));
    }

    out.push('\n');
    out
}

// push_const
fn push_const(out: &mut String, ident: &Ident, value: &str, comment: Option<&str>) {
    if let Some(comment) = comment {
        for line in comment.lines() {
            if line.is_empty() {
                out.push_str("///\n");
            } else {
                out.push_str(&format!("/// {line}\n"));
            }
        }
    }

    let literal = Literal::string(value);
    out.push_str(&format!("pub const {ident}: &str = {literal};\n"));
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use mongery_schema::{
        module::ModulePath,
        node::{FieldDescriptor, TypeRef},
    };
    use std::path::PathBuf;

    fn order(collection: Option<&str>) -> EntityContext {
        EntityContext {
            module: ModulePath::new(vec!["models".to_string()]),
            source: PathBuf::from("src/models.rs"),
            ident: "Order".to_string(),
            collection: collection.map(str::to_string),
            fields: vec![
                FieldDescriptor {
                    ident: "buyer_name".to_string(),
                    name: "buyerName".to_string(),
                    ty: TypeRef::new("models", "String"),
                    is_pointer: false,
                    comment: Some("buyer name\n\nsecond paragraph".to_string()),
                },
                FieldDescriptor {
                    ident: "quote".to_string(),
                    name: "say \"hi\"".to_string(),
                    ty: TypeRef::new("models", "String"),
                    is_pointer: false,
                    comment: None,
                },
            ],
        }
    }

    #[test]
    fn header_names_module() {
        let header = render_header(&order(None));

        assert!(header.starts_with(GENERATED_HEADER));
        assert!(header.contains("//! Field path constants for module `models`."));
        assert!(header.ends_with("#![allow(dead_code, non_upper_case_globals)]\n\n"));
    }

    #[test]
    fn entity_chunk_layout() {
        let entity = order(None);
        let registry = Registry::new(vec![entity.clone()]).unwrap();

        assert_eq!(
            render_entity(&registry, &entity, false),
            "pub const OrderCollection: &str = \"order\";\n\
             /// buyer name\n\
             ///\n\
             /// second paragraph\n\
             pub const Order_BuyerName: &str = \"buyerName\";\n\
             pub const Order_Quote: &str = \"say \\\"hi\\\"\";\n\
             \n"
        );
    }

    #[test]
    fn explicit_collection_is_used_verbatim() {
        let entity = order(Some("orders_v2"));
        let registry = Registry::new(vec![entity.clone()]).unwrap();

        assert!(
            render_entity(&registry, &entity, false)
                .starts_with("pub const OrderCollection: &str = \"orders_v2\";\n")
        );
    }

    #[test]
    fn rendered_file_is_valid_rust() {
        let entity = order(None);
        let registry = Registry::new(vec![entity.clone()]).unwrap();
        let text = render_header(&entity) + &render_entity(&registry, &entity, true);

        let file = syn::parse_file(&text).unwrap();
        assert_eq!(file.attrs.len(), 2);
        assert!(file.items.len() >= 5);
    }
}
