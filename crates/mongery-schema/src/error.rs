use crate::node::TypeRef;
use std::{io, path::PathBuf};
use thiserror::Error as ThisError;

///
/// ScanError
/// Fatal conditions that abort a scan. Field-level anomalies never surface
/// here; they are skipped during extraction.
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum ScanError {
    #[error("duplicate entity '{key}' declared in {} and {}", first.display(), second.display())]
    DuplicateEntity {
        key: TypeRef,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("failed to parse {}:{line}:{column}: {source}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        #[source]
        source: syn::Error,
    },

    #[error("failed to read directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
