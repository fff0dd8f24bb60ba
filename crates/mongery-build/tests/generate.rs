use mongery_build::{
    Error, emit::WriteMode, flatten::MAX_DEPTH, generate, plan, render::GENERATED_HEADER,
};
use mongery_config_build::{Config, Feature};
use mongery_schema::ScanError;
use std::{fs, path::Path};
use tempfile::TempDir;

const DEMO_ORDER: &str = include_str!("../../../demo/src/order.rs");
const DEMO_SEMIORDER: &str = include_str!("../../../demo/src/semiorder/semiorder.rs");
const DEMO_MODELS_ORDER: &str = include_str!("../../../demo/src/models/order.rs");

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap()
}

fn demo() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "order.rs", DEMO_ORDER);
    write(dir.path(), "semiorder/semiorder.rs", DEMO_SEMIORDER);
    write(dir.path(), "models/order.rs", DEMO_MODELS_ORDER);

    dir
}

fn config(root: &Path) -> Config {
    Config::new(root).with_feature(Feature::Slice)
}

#[test]
fn demo_tree_generates_one_file_per_entity_source() {
    let dir = demo();
    let root = dir.path();

    let report = generate(&config(root)).unwrap();

    assert_eq!(report.entities, 3);
    assert_eq!(
        report.outputs,
        [
            root.join("order_field.rs"),
            root.join("semiorder/semiorder_field.rs")
        ]
    );
    assert!(!root.join("models/order_field.rs").exists());
}

#[test]
fn entities_sharing_a_source_merge_into_one_file() {
    let dir = demo();
    let root = dir.path();
    generate(&config(root)).unwrap();

    let text = read(root, "order_field.rs");

    assert_eq!(text.matches(GENERATED_HEADER).count(), 1);
    assert!(text.starts_with(GENERATED_HEADER));
    assert!(text.contains("//! Field path constants for module `order`."));
    assert!(text.contains("pub const OrderCollection: &str = \"order\";"));
    assert!(text.contains("pub const ItemOrderCollection: &str = \"item_orders\";"));
    assert!(text.contains("pub const ItemOrder_ItemId: &str = \"itemID\";"));
    assert!(text.contains("pub struct OrderList(pub Vec<super::order::Order>);"));
    assert!(text.contains("pub struct ItemOrderList(pub Vec<super::order::ItemOrder>);"));

    // Order's contribution precedes ItemOrder's
    let order = text.find("OrderCollection").unwrap();
    let item = text.find("ItemOrderCollection").unwrap();
    assert!(order < item);

    syn::parse_file(&text).unwrap();
}

#[test]
fn nested_entity_fields_are_flattened() {
    let dir = demo();
    let root = dir.path();
    generate(&config(root)).unwrap();

    let text = read(root, "order_field.rs");

    assert!(text.contains("pub const Order_Id: &str = \"_id\";"));
    assert!(text.contains("/// 구매자명\npub const Order_BuyerName: &str = \"buyerName\";"));
    assert!(text.contains("pub const Order_SemiOrder: &str = \"semiOrder\";"));
    assert!(text.contains("pub const Order_SemiOrder_Id: &str = \"semiOrder._id\";"));
    assert!(
        text.contains("pub const Order_SemiOrder_BuyerPhone: &str = \"semiOrder.buyerPhone\";")
    );
    // unregistered struct types are leaves
    assert!(text.contains("pub const Order_Person: &str = \"persons\";"));
    assert!(!text.contains("Order_Person_Name"));
    // excluded fields leave no trace, nested or not
    assert!(!text.contains("UnusedField"));
    assert!(!text.contains("InternalMemo"));
    assert!(!text.contains("\"semiOrder.-\""));
    assert_eq!(text.matches("pub const Order_SemiOrder_").count(), 5);

    let semi = read(root, "semiorder/semiorder_field.rs");
    assert!(semi.contains("pub const SemiOrderCollection: &str = \"semi_order\";"));
    assert!(semi.contains("pub struct SemiOrderList(pub Vec<super::semiorder::SemiOrder>);"));
    assert!(!semi.contains("InternalMemo"));
}

#[test]
fn rerun_replaces_previous_output() {
    let dir = demo();
    let root = dir.path();
    write(root, "order_field.rs", "stale contents\n");

    generate(&config(root)).unwrap();
    let first = read(root, "order_field.rs");
    generate(&config(root)).unwrap();
    let second = read(root, "order_field.rs");

    assert!(!first.contains("stale"));
    assert_eq!(first, second);
}

#[test]
fn slice_boilerplate_is_optional() {
    let dir = demo();
    let root = dir.path();

    generate(&Config::new(root)).unwrap();

    assert!(!read(root, "order_field.rs").contains("OrderList"));
}

#[test]
fn module_root_source_refers_to_parent_type() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(
        root,
        "billing/mod.rs",
        r#"
        /// @Entity
        pub struct Invoice {
            #[bson = "total"]
            total: u64,
        }
        "#,
    );

    generate(&config(root)).unwrap();
    let text = read(root, "billing/mod_field.rs");

    assert!(text.contains("//! Field path constants for module `billing`."));
    assert!(text.contains("pub struct InvoiceList(pub Vec<super::Invoice>);"));
}

#[test]
fn module_directory_basedir_resolves_crate_paths() {
    let dir = TempDir::new().unwrap();
    let models = dir.path().join("models");
    write(
        &models,
        "mod.rs",
        r#"
        /// @Entity
        pub struct Invoice {
            #[bson = "total"]
            total: u64,
        }
        "#,
    );
    write(
        &models,
        "order.rs",
        r#"
        /// @Entity
        pub struct Order {
            #[bson = "invoice"]
            invoice: crate::models::Invoice,
            #[bson = "parent"]
            parent: super::Invoice,
        }
        "#,
    );

    generate(&Config::new(&models)).unwrap();

    let header = read(&models, "mod_field.rs");
    assert!(header.contains("//! Field path constants for module `models`."));

    let text = read(&models, "order_field.rs");
    assert!(text.contains("pub const Order_Invoice_Total: &str = \"invoice.total\";"));
    assert!(text.contains("pub const Order_Parent_Total: &str = \"parent.total\";"));
}

#[test]
fn self_reference_is_capped() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(
        root,
        "tree.rs",
        r#"
        /// @Entity
        pub struct Node {
            #[bson = "child"]
            child: Option<Box<Node>>,
            #[bson = "next"]
            next: Option<Self>,
        }
        "#,
    );

    generate(&Config::new(root)).unwrap();
    let text = read(root, "tree_field.rs");
    let deepest = vec!["next"; MAX_DEPTH].join(".");
    let too_deep = vec!["next"; MAX_DEPTH + 1].join(".");

    // Option<Box<Node>> unwraps only one level and is not followed
    assert!(text.contains("pub const Node_Child: &str = \"child\";"));
    assert!(!text.contains("Node_Child_"));
    assert!(text.contains(&format!("\"{deepest}\"")));
    assert!(!text.contains(&too_deep));
}

#[test]
fn dry_run_plans_without_writing() {
    let dir = demo();
    let root = dir.path();

    let units = plan(&config(root)).unwrap();

    assert_eq!(units.len(), 3);
    assert_eq!(units[0].mode, WriteMode::Create);
    assert_eq!(units[1].mode, WriteMode::Append);
    assert_eq!(units[2].mode, WriteMode::Create);
    assert!(!root.join("order_field.rs").exists());
}

#[test]
fn parse_failure_writes_nothing() {
    let dir = demo();
    let root = dir.path();
    write(root, "zz_broken.rs", "pub struct {");

    let err = generate(&config(root)).unwrap_err();

    assert!(matches!(err, Error::Scan(ScanError::Parse { .. })));
    assert!(!root.join("order_field.rs").exists());
}

#[test]
fn duplicate_entity_is_fatal() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "a/shared.rs", "/// @Entity\npub struct Order {}");
    write(root, "b/shared.rs", "/// @Entity\npub struct Order {}");

    let err = generate(&Config::new(root)).unwrap_err();

    assert!(matches!(
        err,
        Error::Scan(ScanError::DuplicateEntity { .. })
    ));
}
