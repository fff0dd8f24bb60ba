//! Output planning and file writing.

use crate::render::{render_entity, render_header};
use mongery_config_build::{Config, Feature};
use mongery_schema::{Registry, node::EntityContext};
use std::{
    collections::HashSet,
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;
use tracing::info;

///
/// EmitError
///

#[derive(Debug, ThisError)]
pub enum EmitError {
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

///
/// WriteMode
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WriteMode {
    /// Create or truncate, then write the header and the contribution.
    Create,

    /// Append the contribution to a file created earlier in the run.
    Append,
}

///
/// OutputUnit
/// One write against one output file.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OutputUnit {
    pub path: PathBuf,
    pub mode: WriteMode,
    pub content: String,
}

impl OutputUnit {
    pub fn write(&self) -> Result<(), EmitError> {
        let result = match self.mode {
            WriteMode::Create => fs::write(&self.path, &self.content),
            WriteMode::Append => OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)
                .and_then(|mut file| file.write_all(self.content.as_bytes())),
        };

        result.map_err(|source| EmitError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

/// Output path for a source file: the `.rs` extension is replaced by
/// `suffix`, so `models/order.rs` becomes `models/order_field.rs`.
#[must_use]
pub fn output_path(source: &Path, suffix: &str) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|stem| stem.to_string_lossy())
        .unwrap_or_default();

    source.with_file_name(format!("{stem}{suffix}"))
}

///
/// EmitOptions
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmitOptions {
    pub output_suffix: String,
    pub slice: bool,
}

impl From<&Config> for EmitOptions {
    fn from(config: &Config) -> Self {
        Self {
            output_suffix: config.output_suffix.clone(),
            slice: config.has_feature(Feature::Slice),
        }
    }
}

///
/// Emitter
///
/// Plans one output unit per registered entity in registry order. The first
/// unit targeting a path in a run creates the file; every later unit for
/// the same path appends to it.
///

pub struct Emitter<'a> {
    registry: &'a Registry,
    options: EmitOptions,
    targeted: HashSet<PathBuf>,
}

impl<'a> Emitter<'a> {
    #[must_use]
    pub fn new(registry: &'a Registry, options: EmitOptions) -> Self {
        Self {
            registry,
            options,
            targeted: HashSet::new(),
        }
    }

    /// Plan the write for one entity and mark its output path as targeted.
    pub fn plan(&mut self, entity: &EntityContext) -> OutputUnit {
        let path = output_path(&entity.source, &self.options.output_suffix);
        let body = render_entity(self.registry, entity, self.options.slice);

        if self.targeted.insert(path.clone()) {
            OutputUnit {
                path,
                mode: WriteMode::Create,
                content: render_header(entity) + &body,
            }
        } else {
            OutputUnit {
                path,
                mode: WriteMode::Append,
                content: body,
            }
        }
    }

    /// Plan every entity without touching the filesystem.
    #[must_use]
    pub fn plan_all(mut self) -> Vec<OutputUnit> {
        let registry = self.registry;

        registry.iter().map(|entity| self.plan(entity)).collect()
    }

    /// Write every entity's contribution; returns the files created.
    pub fn emit(mut self) -> Result<Vec<PathBuf>, EmitError> {
        let registry = self.registry;
        let mut created = Vec::new();

        for entity in registry {
            let unit = self.plan(entity);
            unit.write()?;

            match unit.mode {
                WriteMode::Create => {
                    info!(path = %unit.path.display(), entity = %entity.key(), "generated");
                    created.push(unit.path);
                }
                WriteMode::Append => {
                    info!(path = %unit.path.display(), entity = %entity.key(), "write");
                }
            }
        }

        Ok(created)
    }
}

///
/// TESTS
///
