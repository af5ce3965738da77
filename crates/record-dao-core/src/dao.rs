// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! The data access object.
//!
//! [`Dao`] composes a [`Mapper`], a [`GeneratorRegistry`], an [`IdSequence`]
//! and a [`TransactionBinding`] with a [`Backend`] and exposes the full CRUD,
//! batch and filter contract.
//!
//! # Composed operations
//!
//! | Operation | Defined as |
//! |-----------|------------|
//! | `update(e)` | `delete_by_id(key(e))` then `save(e)`, key must survive |
//! | `delete_entity(e)` | `delete_by_id(key(e))` |
//! | `delete_where(f)` | `select_where(f)`, then `delete_entity` each match |
//! | `save_all(es)` | `save` each record in order |
//! | `delete_all(es)` | `delete_entity` each record in order |
//!
//! # Thread safety
//!
//! The DAO adds no locking of its own. Read and write operations take `&self`
//! and inherit the class the backend declares through
//! [`Dao::thread_safety`]. Changing the transaction binding or the generators
//! takes `&mut self`, so it can never race with operations on the same DAO.
//!
//! # Resource release
//!
//! A bound token is released through the backend by [`Dao::close`], when a
//! different token replaces it, and by `Drop` on every other exit path
//! (early return, `?`, panic unwinding).
//!
//! # Example
//!
//! ```rust,ignore
//! let mut dao = Dao::new(store);
//! dao.use_sequence_for(ValueKind::Int);
//!
//! let dune = dao.save(&Book { id: None, title: "Dune".into() })?.unwrap();
//! assert_eq!(dune.id, Some(1));
//! assert_eq!(dao.get(&1)?, Some(dune));
//! ```

use std::{borrow::Cow, fmt};

use tracing::{debug, trace, warn};

use crate::{
    backend::{Backend, ThreadSafety},
    error::{DaoError, Result},
    filter::Filter,
    generator::{GeneratorRegistry, IdSequence},
    mapper::{ComponentPair, Mapper, Record},
    transaction::{TransactionBinding, TransactionToken},
    value::{Value, ValueKind}
};

/// Data access object for records of type `E` stored in backend `B`.
pub struct Dao<E: Record, B: Backend<E>> {
    mapper:     Mapper<E>,
    backend:    B,
    generators: GeneratorRegistry,
    ids:        IdSequence,
    binding:    TransactionBinding
}

impl<E: Record, B: Backend<E>> Dao<E, B> {
    /// DAO using the record's own key extractor.
    pub fn new(backend: B) -> Self {
        Self::with_mapper(Mapper::new(), backend)
    }

    /// DAO with a custom mapper.
    pub fn with_mapper(mapper: Mapper<E>, backend: B) -> Self {
        Self {
            mapper,
            backend,
            generators: GeneratorRegistry::new(),
            ids: IdSequence::new(),
            binding: TransactionBinding::Unbound
        }
    }

    /// DAO that joins an existing transaction.
    pub fn with_transaction(backend: B, token: TransactionToken) -> Self {
        let mut dao = Self::new(backend);
        dao.set_transaction_token(token);
        dao
    }

    /// The mapper.
    pub const fn mapper(&self) -> &Mapper<E> {
        &self.mapper
    }

    /// The backend.
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable access to the backend.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Thread-safety class declared by the backend.
    pub fn thread_safety(&self) -> ThreadSafety {
        self.backend.thread_safety()
    }

    /// Record with `key`, `None` when absent.
    pub fn get(&self, key: &E::Key) -> Result<Option<E>> {
        trace!(table = %self.table_name(), ?key, "get");
        self.backend.fetch(key)
    }

    /// Every record, in backend order.
    pub fn get_all(&self) -> Result<Vec<E>> {
        trace!(table = %self.table_name(), "get_all");
        self.backend.fetch_all()
    }

    /// Records whose columns equal the given values.
    ///
    /// # Errors
    ///
    /// [`DaoError::Unsupported`] unless the backend implements ad-hoc
    /// filtering.
    pub fn get_by_column_values(&self, filter: &Filter) -> Result<Vec<E>> {
        self.backend.select_by_column_values(filter)
    }

    /// Persist `record`.
    ///
    /// Generated components that are null get a value from the generator
    /// registered for their kind; the rest are left to the backend. The
    /// caller's record is never modified; the stored version is returned.
    pub fn save(&self, record: &E) -> Result<Option<E>> {
        if !self.generators.is_empty() {
            self.ids.observe(self.backend.last_id()?);
        }
        let prepared = self.generators.populate(&self.mapper, record)?;
        debug!(
            table = %self.table_name(),
            key = ?self.mapper.extract_key(&prepared),
            bound = self.binding.is_bound(),
            "save"
        );
        self.backend.store(prepared)
    }

    /// Replace the stored version of `record`.
    ///
    /// # Errors
    ///
    /// - [`DaoError::InvalidArgument`] when `record` has no key
    /// - [`DaoError::NotPersisted`] when the save returns nothing
    /// - [`DaoError::KeyMismatch`] when the saved key differs from the input
    pub fn update(&self, record: &E) -> Result<E> {
        let key = self.mapper.extract_key(record).ok_or_else(|| {
            DaoError::invalid(format!(
                "cannot update a `{}` record without a key",
                self.mapper.entity_type().type_name()
            ))
        })?;
        debug!(table = %self.table_name(), ?key, "update");
        self.delete_by_id(Some(&key))?;
        let saved = self.save(record)?.ok_or_else(|| self.not_persisted())?;
        match self.mapper.extract_key(&saved) {
            Some(actual) if actual == key => Ok(saved),
            actual => Err(DaoError::KeyMismatch {
                table:    self.table_name().into_owned(),
                expected: format!("{key:?}"),
                actual:   actual.map_or_else(|| "none".to_owned(), |k| format!("{k:?}"))
            })
        }
    }

    /// Remove the record with `key`. `None` or an absent key is a no-op.
    pub fn delete_by_id(&self, key: Option<&E::Key>) -> Result<()> {
        let Some(key) = key else {
            return Ok(());
        };
        debug!(table = %self.table_name(), ?key, "delete");
        self.backend.remove(key)
    }

    /// Remove the stored version of `record`.
    pub fn delete_entity(&self, record: &E) -> Result<()> {
        self.delete_by_id(self.mapper.extract_key(record).as_ref())
    }

    /// Records matching every predicate of `filter`.
    ///
    /// # Errors
    ///
    /// [`DaoError::InvalidArgument`] when the filter names a component the
    /// record does not declare.
    pub fn select_where(&self, filter: &Filter) -> Result<Vec<E>> {
        filter.validate_for::<E>()?;
        trace!(table = %self.table_name(), %filter, "select_where");
        self.backend.select(filter)
    }

    /// Remove the records matching `filter` and return them as they were
    /// before deletion.
    pub fn delete_where(&self, filter: &Filter) -> Result<Vec<E>> {
        let selected = self.select_where(filter)?;
        debug!(table = %self.table_name(), %filter, count = selected.len(), "delete_where");
        for record in &selected {
            self.delete_entity(record)?;
        }
        Ok(selected)
    }

    /// Ask the backend for a new transaction token.
    ///
    /// The token is not bound; pass it to
    /// [`set_transaction_token`](Self::set_transaction_token) on every DAO
    /// that should take part.
    ///
    /// # Errors
    ///
    /// [`DaoError::Transaction`] when the backend cannot establish the scope.
    pub fn start_transaction(&self) -> Result<Option<TransactionToken>> {
        let token = self.backend.begin()?;
        debug!(table = %self.table_name(), token = ?token.as_ref().map(TransactionToken::id), "start_transaction");
        Ok(token)
    }

    /// Bind subsequent operations to `token`.
    ///
    /// A different token bound earlier is released through the backend
    /// first; a release failure is logged and the new token is still
    /// offered. Backends without transaction support ignore the token and
    /// the DAO stays unbound.
    pub fn set_transaction_token(&mut self, token: TransactionToken) -> &mut Self {
        if self.binding.token() == Some(&token) {
            return self;
        }
        self.release_bound("rebind");
        if self.backend.attach(&token) {
            debug!(table = %self.table_name(), token = token.id(), "bound transaction token");
            self.binding.bind(token);
        } else {
            trace!(table = %self.table_name(), token = token.id(), "backend ignored transaction token");
        }
        self
    }

    /// The bound token, if any.
    pub fn get_transaction_token(&self) -> Option<&TransactionToken> {
        self.binding.token()
    }

    /// Current binding state.
    pub const fn binding(&self) -> &TransactionBinding {
        &self.binding
    }

    /// Number of stored records.
    pub fn size(&self) -> Result<usize> {
        self.backend.count()
    }

    /// Highest id in use.
    pub fn last_id(&self) -> Result<i64> {
        Ok(self.backend.last_id()?.max(self.ids.last()))
    }

    /// Next unique id. Strictly increasing over the lifetime of this DAO.
    pub fn next_id(&self) -> Result<i64> {
        self.ids.observe(self.backend.last_id()?);
        Ok(self.ids.next_id())
    }

    /// Handle on the id sequence behind [`next_id`](Self::next_id).
    pub fn id_sequence(&self) -> IdSequence {
        self.ids.clone()
    }

    /// Release the bound transaction, if any, and return to unbound.
    ///
    /// Calling `close` on an unbound DAO is a no-op.
    pub fn close(&mut self) -> Result<()> {
        match self.binding.release() {
            Some(token) => {
                debug!(table = %self.table_name(), token = token.id(), "releasing transaction token");
                self.backend.release(token)
            }
            None => Ok(())
        }
    }

    /// Save records in order and return the stored versions.
    ///
    /// With generators registered every record goes through
    /// [`save`](Self::save) in turn, so generated values account for the
    /// records stored earlier in the batch. Without generators the batch is
    /// handed to [`Backend::store_all`] as a whole.
    ///
    /// Atomic only if the backend makes `store_all` atomic or a transaction
    /// token is bound on a backend that groups bound operations.
    ///
    /// # Errors
    ///
    /// [`DaoError::NotPersisted`] when any save returns nothing. Records saved
    /// before the failure stay saved unless the backend rolls them back.
    pub fn save_all<I>(&self, records: I) -> Result<Vec<E>>
    where
        I: IntoIterator<Item = E>
    {
        let records: Vec<E> = records.into_iter().collect();
        self.note_unbound_batch("save_all", records.len());
        debug!(table = %self.table_name(), count = records.len(), "save_all");
        let stored = if self.generators.is_empty() {
            self.backend.store_all(records)?
        } else {
            records
                .iter()
                .map(|record| self.save(record))
                .collect::<Result<Vec<_>>>()?
        };
        stored
            .into_iter()
            .map(|saved| saved.ok_or_else(|| self.not_persisted()))
            .collect()
    }

    /// Delete records in order. Records without a key are skipped.
    pub fn delete_all<'a, I>(&self, records: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a E>
    {
        let keys: Vec<E::Key> = records
            .into_iter()
            .filter_map(|record| self.mapper.extract_key(record))
            .collect();
        self.note_unbound_batch("delete_all", keys.len());
        debug!(table = %self.table_name(), count = keys.len(), "delete_all");
        self.backend.remove_many(keys)
    }

    /// Backend-specific query. Empty unless the backend implements it.
    pub fn any_query(&self, query: &str, params: &[Value]) -> Result<Vec<E>> {
        trace!(table = %self.table_name(), query, params = params.len(), "any_query");
        self.backend.any_query(query, params)
    }

    /// Key of `record`.
    pub fn extract_id(&self, record: &E) -> Option<E::Key> {
        self.mapper.extract_key(record)
    }

    /// Names of all persisted components, in declaration order.
    pub fn persistent_field_names(&self) -> Vec<&'static str> {
        self.mapper.persistent_field_names()
    }

    /// Table name of `E`.
    pub fn table_name(&self) -> Cow<'static, str> {
        self.mapper.table_name()
    }

    /// Table name of any record type.
    pub fn table_name_of<T: Record>() -> Cow<'static, str> {
        T::schema().table_name()
    }

    /// Write payload of `record` without its unassigned generated
    /// components.
    pub fn drop_generated_fields(&self, record: &E) -> Vec<ComponentPair> {
        self.mapper.drop_generated_fields(record)
    }

    /// Remove every record from the backing store, if the backend supports
    /// it.
    pub fn drop_all(&self) -> Result<()> {
        debug!(table = %self.table_name(), "drop_all");
        self.backend.clear()
    }

    /// Register the generator used for generated fields of `kind` from now
    /// on, replacing any previous one.
    pub fn add_generator_for_kind<F>(&mut self, kind: ValueKind, generator: F)
    where
        F: Fn(ValueKind) -> Value + Send + Sync + 'static
    {
        debug!(table = %self.table_name(), %kind, "registering generator");
        self.generators.register(kind, generator);
    }

    /// Use this DAO's id sequence as the generator for `kind`.
    pub fn use_sequence_for(&mut self, kind: ValueKind) {
        let ids = self.ids.clone();
        self.add_generator_for_kind(kind, move |_| Value::Int(ids.next_id()));
    }

    /// The registered generators.
    pub const fn generators(&self) -> &GeneratorRegistry {
        &self.generators
    }

    fn not_persisted(&self) -> DaoError {
        DaoError::NotPersisted {
            table: self.table_name().into_owned()
        }
    }

    fn release_bound(&mut self, context: &'static str) {
        if let Some(token) = self.binding.release() {
            let id = token.id();
            debug!(table = %self.table_name(), token = id, context, "releasing transaction token");
            if let Err(err) = self.backend.release(token) {
                warn!(table = %self.table_name(), token = id, context, error = %err, "failed to release transaction");
            }
        }
    }

    fn note_unbound_batch(&self, operation: &'static str, count: usize) {
        if count > 1 && !self.binding.is_bound() {
            debug!(
                table = %self.table_name(),
                operation,
                count,
                "batch without transaction token, no atomicity across records"
            );
        }
    }
}

impl<E: Record, B: Backend<E>> Drop for Dao<E, B> {
    fn drop(&mut self) {
        self.release_bound("drop");
    }
}

impl<E: Record, B: Backend<E> + fmt::Debug> fmt::Debug for Dao<E, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dao")
            .field("mapper", &self.mapper)
            .field("backend", &self.backend)
            .field("generators", &self.generators)
            .field("binding", &self.binding)
            .finish()
    }
}
