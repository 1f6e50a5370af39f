//! Stateful store of named, versioned schemas
//!
//! The registry is the engine's only mutable component. Schemas are held
//! behind `Arc`s and every mutation builds a replacement value before
//! swapping it in under the write lock, so a concurrent `get` never
//! observes a half-written schema and validations running against an old
//! snapshot keep it alive.
//!
//! Copyright (c) 2026 Validra Team
//! Licensed under the Apache-2.0 license

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::error::{Error, Result};
use crate::schema::{Schema, SchemaConfig, SchemaId, SchemaPatch, SchemaStatus, SchemaType};

type Store = HashMap<SchemaId, Arc<Schema>>;

/// In-memory schema registry with create/read/update/delete lifecycle
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: RwLock<Store>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn read_store(&self) -> RwLockReadGuard<'_, Store> {
        self.schemas.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_store(&self) -> RwLockWriteGuard<'_, Store> {
        self.schemas.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Validate a configuration, assign an id, and store the schema.
    ///
    /// New schemas start at version 1 with status `active` unless the
    /// config says otherwise.
    pub fn create(&self, config: &SchemaConfig) -> Result<SchemaId> {
        let id = SchemaId::generate();
        let schema = Schema::from_config(id, config)?;
        self.write_store().insert(id, Arc::new(schema));
        debug!(schema_id = %id, "schema created");
        Ok(id)
    }

    /// Fetch a schema snapshot by id
    pub fn get(&self, id: &SchemaId) -> Result<Arc<Schema>> {
        self.read_store()
            .get(id)
            .cloned()
            .ok_or(Error::NotFound { id: *id })
    }

    /// Replace the rule groups supplied in the patch and bump the version.
    ///
    /// The merge is shallow per rule group: a supplied group replaces the
    /// stored one wholesale, groups absent from the patch stay untouched.
    pub fn update(&self, id: &SchemaId, patch: &SchemaPatch) -> Result<Arc<Schema>> {
        let mut store = self.write_store();
        let current = store.get(id).ok_or(Error::NotFound { id: *id })?;
        let next = Arc::new(current.apply_patch(patch)?);
        store.insert(*id, Arc::clone(&next));
        debug!(schema_id = %id, version = next.version, "schema updated");
        Ok(next)
    }

    /// Remove a schema unconditionally; in-flight validations hold their
    /// own snapshot and are unaffected
    pub fn delete(&self, id: &SchemaId) -> Result<()> {
        match self.write_store().remove(id) {
            Some(_) => {
                debug!(schema_id = %id, "schema deleted");
                Ok(())
            }
            None => Err(Error::NotFound { id: *id }),
        }
    }

    /// All stored schemas with the given type tag
    pub fn list_by_type(&self, schema_type: SchemaType) -> Vec<Arc<Schema>> {
        self.filter(|schema| schema.schema_type == schema_type)
    }

    /// All stored schemas with the given status tag
    pub fn list_by_status(&self, status: SchemaStatus) -> Vec<Arc<Schema>> {
        self.filter(|schema| schema.status == status)
    }

    fn filter(&self, keep: impl Fn(&Schema) -> bool) -> Vec<Arc<Schema>> {
        let mut matches: Vec<Arc<Schema>> = self
            .read_store()
            .values()
            .filter(|schema| keep(schema))
            .cloned()
            .collect();
        matches.sort_by_key(|schema| schema.id);
        matches
    }

    pub fn len(&self) -> usize {
        self.read_store().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_store().is_empty()
    }

    /// Snapshot of store composition for monitoring and debugging
    pub fn stats(&self) -> RegistryStats {
        let store = self.read_store();
        let mut stats = RegistryStats {
            total: store.len(),
            ..RegistryStats::default()
        };
        for schema in store.values() {
            match schema.status {
                SchemaStatus::Active => stats.active += 1,
                SchemaStatus::Draft => stats.draft += 1,
                SchemaStatus::Deprecated => stats.deprecated += 1,
            }
        }
        stats
    }
}

/// Registry composition counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryStats {
    pub total: usize,
    pub active: usize,
    pub draft: usize,
    pub deprecated: usize,
}
