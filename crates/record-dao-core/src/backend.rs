// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! The storage seam.
//!
//! A [`Backend`] supplies the primitive reads and writes for one record type.
//! Everything else (updates, batch operations, filtered deletes, generated
//! fields, transaction binding) is composed on top of it by
//! [`Dao`](crate::Dao).
//!
//! # Required vs provided
//!
//! | Method | Default |
//! |--------|---------|
//! | `fetch`, `fetch_all`, `store`, `remove`, `select` | required |
//! | `count`, `last_id` | `0` |
//! | `store_all` | `store` each record in order, stop at first error |
//! | `remove_many` | `remove` each key in order, stop at first error |
//! | `select_by_column_values` | [`DaoError::Unsupported`] |
//! | `any_query` | empty result |
//! | `begin` | `Ok(None)` (no transaction support) |
//! | `attach` | token ignored |
//! | `release`, `clear` | no-op |
//! | `thread_safety` | [`ThreadSafety::ExternallySynchronized`] |
//!
//! # Errors
//!
//! Implementations translate their native faults into [`DaoError`], usually
//! through [`DaoError::backend`]. A missing record is never an error:
//! `fetch` returns `None` and `remove` of an absent key succeeds.

use std::fmt;

use crate::{
    error::{DaoError, Result},
    filter::Filter,
    mapper::Record,
    transaction::TransactionToken,
    value::Value
};

/// Thread-safety class a backend declares for DAOs built on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThreadSafety {
    /// Safe to share between threads without external locking.
    Concurrent,

    /// Must stay on the thread that created it.
    SingleThreaded,

    /// May move between threads, but callers must serialize access.
    ExternallySynchronized
}

impl ThreadSafety {
    /// Check if callers may issue operations from several threads at once.
    pub const fn allows_concurrent_calls(&self) -> bool {
        matches!(self, Self::Concurrent)
    }
}

impl fmt::Display for ThreadSafety {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Concurrent => "safe for concurrent use",
            Self::SingleThreaded => "single-threaded only",
            Self::ExternallySynchronized => "caller must externally synchronize"
        })
    }
}

/// Primitive storage operations for records of type `E`.
///
/// Write methods take `&self`; backends that have no native concurrency
/// control serialize them behind one lock.
pub trait Backend<E: Record> {
    /// Load the record with `key`.
    fn fetch(&self, key: &E::Key) -> Result<Option<E>>;

    /// Load every record, in an order that is deterministic for a given
    /// state.
    fn fetch_all(&self) -> Result<Vec<E>>;

    /// Insert or replace `record`, filling generated fields that are still
    /// null, and return the stored version.
    ///
    /// `None` means the backend could not confirm the write; prefer an error
    /// for genuine faults.
    fn store(&self, record: E) -> Result<Option<E>>;

    /// Remove the record with `key` if present.
    fn remove(&self, key: &E::Key) -> Result<()>;

    /// All records matching every predicate of `filter`.
    fn select(&self, filter: &Filter) -> Result<Vec<E>>;

    /// Number of stored records.
    fn count(&self) -> Result<usize> {
        Ok(0)
    }

    /// Highest numeric id in use.
    fn last_id(&self) -> Result<i64> {
        Ok(0)
    }

    /// Store several records in order.
    ///
    /// [`Dao::save_all`](crate::Dao::save_all) calls this only when no
    /// generators are registered, so the records reach it as given and any
    /// missing values are the backend's to assign.
    ///
    /// No cross-record atomicity: records stored before a failure stay
    /// stored. Override when the storage has native bulk or atomic writes.
    fn store_all(&self, records: Vec<E>) -> Result<Vec<Option<E>>> {
        records.into_iter().map(|record| self.store(record)).collect()
    }

    /// Remove several keys in order. Same caveat as [`Backend::store_all`].
    fn remove_many(&self, keys: Vec<E::Key>) -> Result<()> {
        keys.iter().try_for_each(|key| self.remove(key))
    }

    /// Ad-hoc column filtering.
    fn select_by_column_values(&self, _filter: &Filter) -> Result<Vec<E>> {
        Err(DaoError::unsupported("get_by_column_values"))
    }

    /// Backend-specific query escape hatch.
    fn any_query(&self, _query: &str, _params: &[Value]) -> Result<Vec<E>> {
        Ok(Vec::new())
    }

    /// Open a transaction scope.
    ///
    /// # Errors
    ///
    /// [`DaoError::Transaction`] when the resource needed to group operations
    /// (a connection, a lock) cannot be acquired.
    fn begin(&self) -> Result<Option<TransactionToken>> {
        Ok(None)
    }

    /// Route subsequent operations through `token`.
    ///
    /// Returns `false` when the token is not recognised or transactions are
    /// not supported; the DAO then stays unbound.
    fn attach(&mut self, _token: &TransactionToken) -> bool {
        false
    }

    /// Release whatever `token` holds (commit, rollback or return a
    /// connection, as the backend defines).
    fn release(&mut self, _token: TransactionToken) -> Result<()> {
        Ok(())
    }

    /// Remove every record.
    fn clear(&self) -> Result<()> {
        Ok(())
    }

    /// Declared thread-safety class.
    fn thread_safety(&self) -> ThreadSafety {
        ThreadSafety::ExternallySynchronized
    }
}
