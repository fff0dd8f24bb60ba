//! Recursive source-tree scanning.

use crate::{
    annotation::is_entity,
    error::ScanError,
    module::{ImportMap, ModulePath},
};
use std::{
    fs,
    path::{Path, PathBuf},
};
use syn::{Item, ItemStruct};
use tracing::{debug, info};

///
/// ScanOptions
///

#[derive(Clone, Debug)]
pub struct ScanOptions {
    /// Attribute name holding a field's serialization tag.
    pub tag: String,

    /// File-name suffix of generated files, which are never scanned.
    pub skip_suffix: Option<String>,
}

impl ScanOptions {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            skip_suffix: None,
        }
    }

    #[must_use]
    pub fn with_skip_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.skip_suffix = Some(suffix.into());
        self
    }
}

///
/// ScannedFile
///
/// One parsed source file reduced to what extraction needs: its module
/// identity, its imports, and owned copies of its `@Entity` structs.
///

#[derive(Clone, Debug)]
pub struct ScannedFile {
    pub path: PathBuf,
    pub module: ModulePath,
    pub imports: ImportMap,
    pub entities: Vec<ItemStruct>,
}

impl ScannedFile {
    #[must_use]
    pub fn from_ast(path: PathBuf, module: ModulePath, ast: &syn::File) -> Self {
        let entities = ast
            .items
            .iter()
            .filter_map(|item| match item {
                Item::Struct(item) if is_entity(&item.attrs) => Some(item.clone()),
                _ => None,
            })
            .collect();

        Self {
            path,
            module,
            imports: ImportMap::from_items(&ast.items),
            entities,
        }
    }
}

///
/// Scanner
///
/// Walks a directory tree depth-first. Within a directory, files are visited
/// before subdirectories and both are sorted by name, so registry order is
/// reproducible across platforms.
///

#[derive(Clone, Debug)]
pub struct Scanner {
    root: PathBuf,
    base: ModulePath,
    options: ScanOptions,
}

impl Scanner {
    pub fn new(root: impl Into<PathBuf>, options: ScanOptions) -> Self {
        let root = root.into();
        let base = ModulePath::of_root(&root);

        Self {
            root,
            base,
            options,
        }
    }

    /// Scan the whole tree. Any unreadable directory or unparsable file
    /// aborts the scan.
    pub fn scan(&self) -> Result<Vec<ScannedFile>, ScanError> {
        let mut out = Vec::new();
        self.scan_dir(&self.root, &mut out)?;

        Ok(out)
    }

    fn scan_dir(&self, dir: &Path, out: &mut Vec<ScannedFile>) -> Result<(), ScanError> {
        let (files, dirs) = read_entries(dir)?;

        for path in files.into_iter().filter(|path| self.is_source(path)) {
            out.push(self.scan_file(&path)?);
        }

        for dir in dirs {
            self.scan_dir(&dir, out)?;
        }

        Ok(())
    }

    /// Parse one source file.
    pub fn scan_file(&self, path: &Path) -> Result<ScannedFile, ScanError> {
        debug!(path = %path.display(), "scan");

        let source = fs::read_to_string(path).map_err(|source| ScanError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;

        let ast = syn::parse_file(&source).map_err(|source| {
            let start = source.span().start();
            ScanError::Parse {
                path: path.to_path_buf(),
                line: start.line,
                column: start.column + 1,
                source,
            }
        })?;

        let module = self
            .base
            .join(&ModulePath::from_source(&self.root, path));
        let file = ScannedFile::from_ast(path.to_path_buf(), module, &ast);

        if file.entities.is_empty() {
            info!(path = %path.display(), "no entity struct found");
        }

        Ok(file)
    }

    // is_source
    // rust files, minus test files and our own generated output
    fn is_source(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            return false;
        };

        if !name.ends_with(".rs") || is_test_file(name) {
            return false;
        }

        !self
            .options
            .skip_suffix
            .as_deref()
            .is_some_and(|suffix| !suffix.is_empty() && name.ends_with(suffix))
    }
}

/// Whether a file name marks a test-only source file.
#[must_use]
pub fn is_test_file(name: &str) -> bool {
    name == "tests.rs" || name.ends_with("_test.rs") || name.ends_with("_tests.rs")
}

// Split a directory's entries into sorted files and sorted subdirectories.
fn read_entries(dir: &Path) -> Result<(Vec<PathBuf>, Vec<PathBuf>), ScanError> {
    let read_err = |source| ScanError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    let mut dirs = Vec::new();

    // symlinked directories are not followed
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        if entry.file_type().map_err(read_err)?.is_dir() {
            dirs.push(entry.path());
        } else {
            files.push(entry.path());
        }
    }

    files.sort();
    dirs.sort();

    Ok((files, dirs))
}

///
/// TESTS
///
