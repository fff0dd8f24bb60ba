//! Source scanning, entity extraction and the cross-file entity registry
//! behind mongery's field path generation.

pub mod annotation;
pub mod error;
pub mod extract;
pub mod module;
pub mod node;
pub mod registry;
pub mod scan;

pub use error::ScanError;
pub use registry::Registry;

use crate::{extract::extract_entities, scan::Scanner};
use std::path::Path;
use tracing::debug;

/// Scan `root` and build the registry of every `@Entity` struct in it.
pub fn load_registry(root: &Path, options: &scan::ScanOptions) -> Result<Registry, ScanError> {
    let scanner = Scanner::new(root, options.clone());
    let files = scanner.scan()?;

    let entities: Vec<_> = files
        .iter()
        .flat_map(|file| extract_entities(file, &options.tag))
        .collect();

    debug!(files = files.len(), entities = entities.len(), "scan complete");

    Registry::new(entities)
}
