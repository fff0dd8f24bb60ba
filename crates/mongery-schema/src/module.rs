//! Module identity of scanned files and `use`-import resolution.

use std::{
    collections::HashMap,
    fs,
    path::{Component, Path},
};
use syn::{Item, UseTree, ext::IdentExt};

/// Package name used for the crate root module.
pub const CRATE_ROOT: &str = "crate";

/// Whether a file stem names the module that contains it (`mod.rs` etc.).
#[must_use]
pub fn is_module_root_stem(stem: &str) -> bool {
    matches!(stem, "mod" | "lib" | "main")
}

/// Whether a source file is the root file of its module.
#[must_use]
pub fn is_module_root(path: &Path) -> bool {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(is_module_root_stem)
}

///
/// ModulePath
///
/// Location of a source file in the module tree, relative to the scan root.
/// `a/b.rs` is `a::b`, `a/mod.rs` is `a`, and the root `lib.rs` is the crate
/// root (no segments). A scan root holding `mod.rs` is itself a module; see
/// [`ModulePath::of_root`].
///

#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct ModulePath {
    segments: Vec<String>,
}

impl ModulePath {
    #[must_use]
    pub const fn new(segments: Vec<String>) -> Self {
        Self { segments }
    }

    #[must_use]
    /// Module of the scan root. A root directory holding `mod.rs` is the
    /// module named after that directory; any other root is the crate root.
    pub fn of_root(root: &Path) -> Self {
        if !root.join("mod.rs").is_file() {
            return Self::default();
        }

        let name = root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .or_else(|| {
                fs::canonicalize(root)
                    .ok()?
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
            });

        Self {
            segments: name.into_iter().collect(),
        }
    }

    #[must_use]
    /// Append `child`'s segments to this module path.
    pub fn join(&self, child: &Self) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(child.segments.iter().cloned());

        Self { segments }
    }

    #[must_use]
    /// Derive the module path of `file` relative to `root`.
    pub fn from_source(root: &Path, file: &Path) -> Self {
        let relative = file.strip_prefix(root).unwrap_or(file);

        let mut segments: Vec<String> = relative
            .parent()
            .map(|dir| {
                dir.components()
                    .filter_map(|component| match component {
                        Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default();

        if let Some(stem) = relative.file_stem().and_then(|stem| stem.to_str())
            && !is_module_root_stem(stem)
        {
            segments.push(stem.to_string());
        }

        Self { segments }
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    #[must_use]
    pub const fn is_crate_root(&self) -> bool {
        self.segments.is_empty()
    }

    #[must_use]
    /// Package name: the last segment, or `crate` for the crate root.
    pub fn package(&self) -> &str {
        self.segments.last().map_or(CRATE_ROOT, String::as_str)
    }

    #[must_use]
    /// Walk a relative `self`/`super` prefix from this module.
    pub fn relative(&self, keywords: &[String]) -> Self {
        let mut segments = self.segments.clone();
        for keyword in keywords {
            if keyword == "super" {
                segments.pop();
            }
        }

        Self { segments }
    }
}

///
/// ImportMap
///
/// Names brought into scope by a file's top-level `use` items, keyed by the
/// local (possibly renamed) identifier. Glob imports are not tracked.
///

#[derive(Clone, Debug, Default)]
pub struct ImportMap {
    entries: HashMap<String, Vec<String>>,
}

impl ImportMap {
    #[must_use]
    pub fn from_items(items: &[Item]) -> Self {
        let mut map = Self::default();
        for item in items {
            if let Item::Use(item_use) = item {
                map.collect(&item_use.tree, &mut Vec::new());
            }
        }

        map
    }

    #[must_use]
    /// Full import path for a local name, if one was imported.
    pub fn get(&self, local: &str) -> Option<&[String]> {
        self.entries.get(local).map(Vec::as_slice)
    }

    fn collect(&mut self, tree: &UseTree, prefix: &mut Vec<String>) {
        match tree {
            UseTree::Path(path) => {
                prefix.push(path.ident.unraw().to_string());
                self.collect(&path.tree, prefix);
                prefix.pop();
            }
            UseTree::Name(name) => {
                let ident = name.ident.unraw().to_string();
                if ident == "self" {
                    // `use a::b::{self}` imports `b` itself
                    if let Some(last) = prefix.last() {
                        self.entries.insert(last.clone(), prefix.clone());
                    }
                } else {
                    let mut full = prefix.clone();
                    full.push(ident.clone());
                    self.entries.insert(ident, full);
                }
            }
            UseTree::Rename(rename) => {
                let ident = rename.ident.unraw().to_string();
                let mut full = prefix.clone();
                if ident != "self" {
                    full.push(ident);
                }
                self.entries
                    .insert(rename.rename.unraw().to_string(), full);
            }
            UseTree::Group(group) => {
                for tree in &group.items {
                    self.collect(tree, prefix);
                }
            }
            UseTree::Glob(_) => {}
        }
    }
}

///
/// TESTS
///
