// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! In-memory backend and derived records shared by integration tests.

#![allow(dead_code)]

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering}
};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use record_dao::{
    Backend, DaoError, Filter, Record, Result, ThreadSafety, TransactionError, TransactionToken,
    Value
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Record)]
pub struct Book {
    #[id(generated)]
    pub id:     Option<i64>,
    pub title:  String,
    pub author: Option<String>
}

impl Book {
    pub fn new(id: Option<i64>, title: &str) -> Self {
        Self {
            id,
            title: title.to_owned(),
            author: None
        }
    }

    pub fn by(mut self, author: &str) -> Self {
        self.author = Some(author.to_owned());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Record, Serialize, Deserialize)]
pub struct Appointment {
    #[id(generated)]
    pub id:        Option<Uuid>,
    pub subject:   String,
    #[generated]
    pub booked_at: Option<DateTime<Utc>>
}

#[derive(Debug, Clone, PartialEq, Record)]
#[record(table = "custom")]
pub struct Person {
    #[id]
    pub email: String,
    pub name:  String,
    pub age:   Option<u32>
}

/// Payload of tokens issued by [`MemoryBackend`].
#[derive(Debug, Default)]
pub struct MemoryTransaction {
    rollback: AtomicBool
}

impl MemoryTransaction {
    /// Discard the writes made under this token when it is released.
    pub fn mark_rollback(&self) {
        self.rollback.store(true, Ordering::SeqCst);
    }
}

struct Snapshot<E> {
    token:   u64,
    records: Vec<E>
}

/// Vector-backed store, safe for concurrent use.
///
/// Records keep insertion order; replacing a record keeps its position.
/// Transactions snapshot the store on attach and restore it on release when
/// the token was marked for rollback.
pub struct MemoryBackend<E: Record> {
    records:       Arc<RwLock<Vec<E>>>,
    snapshot:      Option<Snapshot<E>>,
    transactional: bool,
    fail_begin:    bool
}

impl<E: Record> Default for MemoryBackend<E> {
    fn default() -> Self {
        Self {
            records:       Arc::default(),
            snapshot:      None,
            transactional: false,
            fail_begin:    false
        }
    }
}

impl<E: Record> MemoryBackend<E> {
    pub fn transactional() -> Self {
        Self {
            transactional: true,
            ..Self::default()
        }
    }

    pub fn failing_begin() -> Self {
        Self {
            transactional: true,
            fail_begin: true,
            ..Self::default()
        }
    }

    /// Token accepted by [`Backend::attach`] on any handle of this store.
    pub fn begin_token(&self) -> TransactionToken {
        TransactionToken::new(MemoryTransaction::default())
    }

    /// Second handle on the same storage.
    pub fn share(&self) -> Self {
        Self {
            records:       Arc::clone(&self.records),
            snapshot:      None,
            transactional: self.transactional,
            fail_begin:    self.fail_begin
        }
    }

    fn numeric_key(record: &E) -> Option<i64> {
        let key = E::schema().key_field()?;
        record.component(key.name).as_ref().and_then(Value::as_i64)
    }
}

impl<E: Record> Backend<E> for MemoryBackend<E> {
    fn fetch(&self, key: &E::Key) -> Result<Option<E>> {
        Ok(self
            .records
            .read()
            .iter()
            .find(|r| r.key().as_ref() == Some(key))
            .cloned())
    }

    fn fetch_all(&self) -> Result<Vec<E>> {
        Ok(self.records.read().clone())
    }

    fn store(&self, record: E) -> Result<Option<E>> {
        let Some(key) = record.key() else {
            return Err(DaoError::invalid(format!(
                "in-memory `{}` records need a key before storing",
                E::schema().simple_name()
            )));
        };
        let mut records = self.records.write();
        match records.iter_mut().find(|r| r.key().as_ref() == Some(&key)) {
            Some(slot) => *slot = record.clone(),
            None => records.push(record.clone())
        }
        tracing::trace!(table = %E::schema().table_name(), ?key, "stored");
        Ok(Some(record))
    }

    fn remove(&self, key: &E::Key) -> Result<()> {
        self.records.write().retain(|r| r.key().as_ref() != Some(key));
        Ok(())
    }

    fn select(&self, filter: &Filter) -> Result<Vec<E>> {
        Ok(self
            .records
            .read()
            .iter()
            .filter(|r| filter.matches(*r))
            .cloned()
            .collect())
    }

    fn count(&self) -> Result<usize> {
        Ok(self.records.read().len())
    }

    fn last_id(&self) -> Result<i64> {
        Ok(self
            .records
            .read()
            .iter()
            .filter_map(Self::numeric_key)
            .max()
            .unwrap_or(0))
    }

    fn select_by_column_values(&self, filter: &Filter) -> Result<Vec<E>> {
        filter.validate_for::<E>()?;
        self.select(filter)
    }

    fn begin(&self) -> Result<Option<TransactionToken>> {
        if !self.transactional {
            return Ok(None);
        }
        if self.fail_begin {
            return Err(TransactionError::begin(std::io::Error::other("store is read-only")).into());
        }
        Ok(Some(TransactionToken::new(MemoryTransaction::default())))
    }

    fn attach(&mut self, token: &TransactionToken) -> bool {
        if !self.transactional || !token.is::<MemoryTransaction>() {
            return false;
        }
        self.snapshot = Some(Snapshot {
            token:   token.id(),
            records: self.records.read().clone()
        });
        true
    }

    fn release(&mut self, token: TransactionToken) -> Result<()> {
        let Some(snapshot) = self.snapshot.take() else {
            return Ok(());
        };
        if snapshot.token != token.id() {
            return Err(TransactionError::release(
                &token,
                std::io::Error::other("token was not attached to this backend")
            )
            .into());
        }
        let rollback = token
            .payload::<MemoryTransaction>()
            .is_some_and(|tx| tx.rollback.load(Ordering::SeqCst));
        if rollback {
            *self.records.write() = snapshot.records;
        }
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.records.write().clear();
        Ok(())
    }

    fn thread_safety(&self) -> ThreadSafety {
        ThreadSafety::Concurrent
    }
}

/// Generator producing random v4 UUIDs.
pub fn uuid_generator(_: record_dao::ValueKind) -> Value {
    Value::Uuid(Uuid::new_v4())
}
