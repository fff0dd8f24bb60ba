//! Cross-file registry of entity contexts.

use crate::{
    error::ScanError,
    node::{EntityContext, TypeRef},
};
use std::collections::HashMap;

///
/// Registry
///
/// Arena of every entity context produced by one scan, in scan order, plus
/// an index by (package, type name). Read-only once built.
///

#[derive(Clone, Debug, Default)]
pub struct Registry {
    entities: Vec<EntityContext>,
    index: HashMap<TypeRef, usize>,
}

impl Registry {
    /// Build the registry. Two entities sharing a key abort the run.
    pub fn new(entities: Vec<EntityContext>) -> Result<Self, ScanError> {
        let mut index = HashMap::with_capacity(entities.len());

        for (pos, entity) in entities.iter().enumerate() {
            if let Some(prev) = index.insert(entity.key(), pos) {
                return Err(ScanError::DuplicateEntity {
                    key: entity.key(),
                    first: entities[prev].source.clone(),
                    second: entity.source.clone(),
                });
            }
        }

        Ok(Self { entities, index })
    }

    #[must_use]
    pub fn get(&self, key: &TypeRef) -> Option<&EntityContext> {
        self.index.get(key).map(|&pos| &self.entities[pos])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EntityContext> {
        self.entities.iter()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a EntityContext;
    type IntoIter = std::slice::Iter<'a, EntityContext>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::ModulePath;
    use std::path::PathBuf;

    fn entity(package: &str, ident: &str, source: &str) -> EntityContext {
        EntityContext {
            module: ModulePath::new(vec![package.to_string()]),
            source: PathBuf::from(source),
            ident: ident.to_string(),
            collection: None,
            fields: Vec::new(),
        }
    }

    #[test]
    fn lookup_by_package_and_name() {
        let registry = Registry::new(vec![
            entity("models", "Order", "a.rs"),
            entity("semiorder", "Order", "b.rs"),
        ])
        .unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry
                .get(&TypeRef::new("semiorder", "Order"))
                .map(|e| e.source.clone()),
            Some(PathBuf::from("b.rs"))
        );
        assert!(registry.get(&TypeRef::new("other", "Order")).is_none());
    }

    #[test]
    fn keeps_scan_order() {
        let registry = Registry::new(vec![
            entity("m", "B", "b.rs"),
            entity("m", "A", "a.rs"),
        ])
        .unwrap();
        let idents: Vec<&str> = registry.iter().map(|e| e.ident.as_str()).collect();

        assert_eq!(idents, ["B", "A"]);
    }

    #[test]
    fn duplicate_key_is_fatal() {
        let err = Registry::new(vec![
            entity("models", "Order", "a/models.rs"),
            entity("models", "Order", "b/models.rs"),
        ])
        .unwrap_err();

        match err {
            ScanError::DuplicateEntity { key, first, second } => {
                assert_eq!(key, TypeRef::new("models", "Order"));
                assert_eq!(first, PathBuf::from("a/models.rs"));
                assert_eq!(second, PathBuf::from("b/models.rs"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
