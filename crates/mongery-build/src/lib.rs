//! Field path flattening, rendering and file emission for mongery.

pub mod emit;
pub mod flatten;
pub mod render;
pub mod slice;

pub use emit::EmitError;

use crate::emit::{EmitOptions, Emitter, OutputUnit};
use mongery_config_build::Config;
use mongery_schema::{Registry, ScanError, load_registry, scan::ScanOptions};
use std::path::PathBuf;
use thiserror::Error as ThisError;
use tracing::info;

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Emit(#[from] EmitError),

    #[error(transparent)]
    Scan(#[from] ScanError),
}

///
/// GenerateReport
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GenerateReport {
    /// Number of registered entities.
    pub entities: usize,

    /// Output files created during the run, in creation order.
    pub outputs: Vec<PathBuf>,
}

// scan_options
fn scan_options(config: &Config) -> ScanOptions {
    ScanOptions::new(config.tag.clone()).with_skip_suffix(config.output_suffix.clone())
}

// scan
fn scan(config: &Config) -> Result<Registry, Error> {
    info!(basedir = %config.basedir.display(), "scan files");
    let registry = load_registry(&config.basedir, &scan_options(config))?;
    info!(entities = registry.len(), "scan files done");

    Ok(registry)
}

/// Scan `config.basedir`, then write one output file per source file that
/// declares at least one entity.
pub fn generate(config: &Config) -> Result<GenerateReport, Error> {
    let registry = scan(config)?;

    info!("process files");
    let outputs = Emitter::new(&registry, EmitOptions::from(config)).emit()?;
    info!(outputs = outputs.len(), "done");

    Ok(GenerateReport {
        entities: registry.len(),
        outputs,
    })
}

/// Scan and plan every write of a run without touching any output file.
pub fn plan(config: &Config) -> Result<Vec<OutputUnit>, Error> {
    let registry = scan(config)?;

    Ok(Emitter::new(&registry, EmitOptions::from(config)).plan_all())
}
