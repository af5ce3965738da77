// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Value generators and id sequences.
//!
//! Backends without native value generation (in-memory maps, files) rely on
//! generators registered per DAO and per field kind. On save, every component
//! that is flagged generated and still null gets its value from the generator
//! registered for its kind. Components without a generator stay null and are
//! left to the backend.

use std::{
    collections::HashMap,
    fmt,
    sync::{
        Arc,
        atomic::{AtomicI64, Ordering}
    }
};

use tracing::trace;

use crate::{
    error::Result,
    mapper::{ComponentPair, Mapper, Record},
    value::{Value, ValueKind}
};

/// Generator function, called with the kind of the field to fill.
pub type Generator = Box<dyn Fn(ValueKind) -> Value + Send + Sync>;

/// Per-DAO generators keyed by field kind.
#[derive(Default)]
pub struct GeneratorRegistry {
    generators: HashMap<ValueKind, Generator>
}

impl GeneratorRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a generator, replacing any previous one for `kind`.
    ///
    /// Records saved earlier are not affected.
    pub fn register<F>(&mut self, kind: ValueKind, generator: F)
    where
        F: Fn(ValueKind) -> Value + Send + Sync + 'static
    {
        self.generators.insert(kind, Box::new(generator));
    }

    /// Check if a generator is registered for `kind`.
    pub fn contains(&self, kind: ValueKind) -> bool {
        self.generators.contains_key(&kind)
    }

    /// Number of registered generators.
    pub fn len(&self) -> usize {
        self.generators.len()
    }

    /// Check if no generator is registered.
    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Invoke the generator for `kind`.
    pub fn generate(&self, kind: ValueKind) -> Option<Value> {
        self.generators.get(&kind).map(|generate| generate(kind))
    }

    /// Fill generated null components of `record` for which a generator is
    /// registered.
    ///
    /// Returns a new record; the input is never modified.
    ///
    /// # Errors
    ///
    /// Fails when a generator yields a value that does not fit the field.
    pub fn populate<E: Record>(&self, mapper: &Mapper<E>, record: &E) -> Result<E> {
        if self.generators.is_empty() {
            return Ok(record.clone());
        }
        let mut replacements = Vec::new();
        for field in mapper.components().iter().filter(|f| f.generated) {
            let is_null = record.component(field.name).is_none_or(|v| v.is_null());
            if !is_null {
                continue;
            }
            if let Some(value) = self.generate(field.kind) {
                trace!(field = field.name, kind = %field.kind, %value, "generated value");
                replacements.push(ComponentPair::new(field.name, value));
            }
        }
        mapper.with_components(record, replacements)
    }
}

impl fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.generators.keys().collect();
        kinds.sort();
        f.debug_struct("GeneratorRegistry")
            .field("kinds", &kinds)
            .finish()
    }
}

/// Strictly increasing id source shared by a DAO and its generators.
///
/// Clones share the same counter.
#[derive(Debug, Clone, Default)]
pub struct IdSequence {
    last: Arc<AtomicI64>
}

impl IdSequence {
    /// Sequence starting after 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sequence whose first id is `last + 1`.
    pub fn starting_after(last: i64) -> Self {
        Self {
            last: Arc::new(AtomicI64::new(last))
        }
    }

    /// Next id, greater than every id returned before.
    pub fn next_id(&self) -> i64 {
        self.last.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Last id handed out or observed.
    pub fn last(&self) -> i64 {
        self.last.load(Ordering::SeqCst)
    }

    /// Make sure future ids exceed `id` (e.g. the highest stored id).
    pub fn observe(&self, id: i64) {
        self.last.fetch_max(id, Ordering::SeqCst);
    }
}
