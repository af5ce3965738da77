// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Hand-written records and backends shared by unit tests.

use std::sync::{Arc, Mutex};

use crate::{
    backend::{Backend, ThreadSafety},
    error::{DaoError, Result},
    filter::Filter,
    mapper::{ComponentPair, ComponentSet, Record},
    schema::{FieldDescriptor, Schema},
    transaction::{TransactionError, TransactionToken},
    value::{FieldValue, ValueKind}
};

#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id:    Option<i64>,
    pub title: String
}

impl Book {
    pub fn new(id: Option<i64>, title: &str) -> Self {
        Self {
            id,
            title: title.to_owned()
        }
    }
}

static BOOK: Schema = Schema::new("Book", &[
    FieldDescriptor::new("id", ValueKind::Int).key().generated(),
    FieldDescriptor::new("title", ValueKind::Text)
]);

impl Record for Book {
    type Key = i64;

    fn schema() -> &'static Schema {
        &BOOK
    }

    fn key(&self) -> Option<i64> {
        self.id
    }

    fn to_components(&self) -> Vec<ComponentPair> {
        vec![
            ComponentPair::new("id", self.id.to_value()),
            ComponentPair::new("title", self.title.to_value()),
        ]
    }

    fn from_components(components: Vec<ComponentPair>) -> Result<Self> {
        let mut set = ComponentSet::new("Book", components);
        Ok(Self {
            id:    set.take("id")?,
            title: set.take("title")?
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tagged {
    pub code:  String,
    pub label: Option<String>,
    pub stamp: Option<i64>
}

static TAGGED: Schema = Schema::new("fixtures::Tagged", &[
    FieldDescriptor::new("code", ValueKind::Text).key(),
    FieldDescriptor::new("label", ValueKind::Text),
    FieldDescriptor::new("stamp", ValueKind::Int).generated()
])
.with_table("tag_table");

impl Record for Tagged {
    type Key = String;

    fn schema() -> &'static Schema {
        &TAGGED
    }

    fn key(&self) -> Option<String> {
        Some(self.code.clone())
    }

    fn to_components(&self) -> Vec<ComponentPair> {
        vec![
            ComponentPair::new("code", self.code.to_value()),
            ComponentPair::new("label", self.label.to_value()),
            ComponentPair::new("stamp", self.stamp.to_value()),
        ]
    }

    fn from_components(components: Vec<ComponentPair>) -> Result<Self> {
        let mut set = ComponentSet::new("Tagged", components);
        Ok(Self {
            code:  set.take("code")?,
            label: set.take("label")?,
            stamp: set.take("stamp")?
        })
    }
}

/// Implements only the required backend methods.
#[derive(Debug, Default)]
pub struct MinimalBackend {
    books: Mutex<Vec<Book>>
}

impl Backend<Book> for MinimalBackend {
    fn fetch(&self, key: &i64) -> Result<Option<Book>> {
        let books = self.books.lock().expect("books");
        Ok(books.iter().find(|b| b.id == Some(*key)).cloned())
    }

    fn fetch_all(&self) -> Result<Vec<Book>> {
        Ok(self.books.lock().expect("books").clone())
    }

    fn store(&self, record: Book) -> Result<Option<Book>> {
        let mut books = self.books.lock().expect("books");
        books.retain(|b| record.id.is_none() || b.id != record.id);
        books.push(record.clone());
        Ok(Some(record))
    }

    fn remove(&self, key: &i64) -> Result<()> {
        self.books.lock().expect("books").retain(|b| b.id != Some(*key));
        Ok(())
    }

    fn select(&self, filter: &Filter) -> Result<Vec<Book>> {
        let books = self.books.lock().expect("books");
        Ok(books.iter().filter(|b| filter.matches(*b)).cloned().collect())
    }
}

/// Full-featured backend with switches for failure modes.
#[derive(Debug)]
pub struct BookBackend {
    pub confirm_writes:  bool,
    pub rekey_on_store:  bool,
    pub transactions:    bool,
    pub fail_begin:      bool,
    pub fail_store:      bool,
    pub(crate) books:    Mutex<Vec<Book>>,
    pub(crate) released: Arc<Mutex<Vec<u64>>>
}

impl Default for BookBackend {
    fn default() -> Self {
        Self {
            confirm_writes: true,
            rekey_on_store: false,
            transactions:   false,
            fail_begin:     false,
            fail_store:     false,
            books:          Mutex::default(),
            released:       Arc::default()
        }
    }
}

impl BookBackend {
    pub fn released(&self) -> Vec<u64> {
        self.released.lock().expect("released").clone()
    }

    pub fn release_log(&self) -> Arc<Mutex<Vec<u64>>> {
        Arc::clone(&self.released)
    }

    fn max_id(books: &[Book]) -> i64 {
        books.iter().filter_map(|b| b.id).max().unwrap_or(0)
    }
}

impl Backend<Book> for BookBackend {
    fn fetch(&self, key: &i64) -> Result<Option<Book>> {
        let books = self.books.lock().expect("books");
        Ok(books.iter().find(|b| b.id == Some(*key)).cloned())
    }

    fn fetch_all(&self) -> Result<Vec<Book>> {
        let mut books = self.books.lock().expect("books").clone();
        books.sort_by_key(|b| b.id);
        Ok(books)
    }

    fn store(&self, mut record: Book) -> Result<Option<Book>> {
        if self.fail_store {
            return Err(DaoError::backend(std::io::Error::other("disk full")));
        }
        if !self.confirm_writes {
            return Ok(None);
        }
        let mut books = self.books.lock().expect("books");
        let id = match record.id {
            Some(id) if self.rekey_on_store => id + 1000,
            Some(id) => id,
            None => Self::max_id(&books) + 1
        };
        record.id = Some(id);
        books.retain(|b| b.id != Some(id));
        books.push(record.clone());
        Ok(Some(record))
    }

    fn remove(&self, key: &i64) -> Result<()> {
        self.books.lock().expect("books").retain(|b| b.id != Some(*key));
        Ok(())
    }

    fn select(&self, filter: &Filter) -> Result<Vec<Book>> {
        Ok(self
            .fetch_all()?
            .into_iter()
            .filter(|b| filter.matches(b))
            .collect())
    }

    fn count(&self) -> Result<usize> {
        Ok(self.books.lock().expect("books").len())
    }

    fn last_id(&self) -> Result<i64> {
        Ok(Self::max_id(&self.books.lock().expect("books")))
    }

    fn begin(&self) -> Result<Option<TransactionToken>> {
        if !self.transactions {
            return Ok(None);
        }
        if self.fail_begin {
            return Err(TransactionError::begin(std::io::Error::other("pool exhausted")).into());
        }
        Ok(Some(TransactionToken::new(())))
    }

    fn attach(&mut self, _token: &TransactionToken) -> bool {
        self.transactions
    }

    fn release(&mut self, token: TransactionToken) -> Result<()> {
        self.released.lock().expect("released").push(token.id());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.books.lock().expect("books").clear();
        Ok(())
    }

    fn thread_safety(&self) -> ThreadSafety {
        ThreadSafety::Concurrent
    }
}
