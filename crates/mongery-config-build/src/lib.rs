//! Configuration file model and loader for mongery.

use serde::Deserialize;
use std::{
    collections::BTreeSet,
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;

/// Config file looked up in the working directory by default.
pub const DEFAULT_CONFIG_FILE: &str = ".mongery.toml";

/// Suffix replacing a source file's `.rs` extension in its output file name.
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_field.rs";

/// Attribute name read as the field serialization tag.
pub const DEFAULT_TAG: &str = "bson";

///
/// ConfigError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

///
/// Feature
/// Optional generation features toggled from the config file.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[remain::sorted]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    /// Named `Vec` wrapper with accessors per entity.
    #[serde(alias = "SLICE")]
    Slice,
}

///
/// Config
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Root of the source tree to scan.
    pub basedir: PathBuf,

    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,

    #[serde(default)]
    pub features: BTreeSet<Feature>,

    #[serde(default = "default_tag")]
    pub tag: String,
}

fn default_output_suffix() -> String {
    DEFAULT_OUTPUT_SUFFIX.to_string()
}

fn default_tag() -> String {
    DEFAULT_TAG.to_string()
}

impl Config {
    /// Config with defaults for everything but the scan root.
    pub fn new(basedir: impl Into<PathBuf>) -> Self {
        Self {
            basedir: basedir.into(),
            output_suffix: default_output_suffix(),
            features: BTreeSet::new(),
            tag: default_tag(),
        }
    }

    /// Read, parse and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&text).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Parse and validate config text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;

        Ok(config)
    }

    #[must_use]
    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.features.insert(feature);
        self
    }

    #[must_use]
    pub fn has_feature(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.basedir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("basedir must not be empty".into()));
        }

        if self.output_suffix.is_empty() {
            return Err(ConfigError::Invalid(
                "output-suffix must not be empty".into(),
            ));
        }

        if !is_identifier(&self.tag) {
            return Err(ConfigError::Invalid(format!(
                "tag '{}' is not a valid attribute name",
                self.tag
            )));
        }

        Ok(())
    }
}

// ASCII identifier check; tags are attribute paths like `bson` or `serde`
fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();

    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && s != "_"
}

///
/// TESTS
///
