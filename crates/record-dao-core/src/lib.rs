// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Core traits and types for record-dao.
//!
//! This crate defines a backend-agnostic persistence contract for immutable,
//! keyed records. It is used by code generated with `#[derive(Record)]` and
//! can also be used standalone with manual implementations.
//!
//! # Overview
//!
//! - [`Record`]: Persistable value with a key and named components
//! - [`Mapper`]: Per-type translator (key extraction, table naming, write
//!   payloads)
//! - [`Backend`]: Storage seam a concrete store implements
//! - [`Dao`]: CRUD, batch and filter operations composed over a backend
//! - [`TransactionToken`]: Opaque handle grouping operations
//! - [`GeneratorRegistry`]: Per-kind value generators for generated fields
//! - [`prelude`]: Convenient re-exports
//!
//! # Table naming
//!
//! A record's table is its explicit override when one is declared, otherwise
//! the lowercased simple type name with a literal `s` appended:
//!
//! ```rust
//! use record_dao_core::resolve_table_name;
//!
//! assert_eq!(resolve_table_name("Appointment", None), "appointments");
//! assert_eq!(resolve_table_name("Person", None), "persons");
//! assert_eq!(resolve_table_name("Person", Some("people")), "people");
//! ```
//!
//! # Usage
//!
//! Most users should use `record-dao` directly, which re-exports this crate
//! together with the derive macro:
//!
//! ```rust,ignore
//! use record_dao::prelude::*;
//!
//! let mut dao = Dao::new(MyBackend::connect(url)?);
//! dao.use_sequence_for(ValueKind::Int);
//! let saved = dao.save(&book)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod backend;
mod dao;
mod error;
mod filter;
mod generator;
mod mapper;
mod schema;
mod transaction;
mod value;

#[cfg(test)]
mod fixtures;

pub mod prelude;

use std::borrow::Cow;

pub use backend::{Backend, ThreadSafety};
pub use dao::Dao;
pub use error::{BoxError, DaoError, Result};
pub use filter::Filter;
pub use generator::{Generator, GeneratorRegistry, IdSequence};
pub use mapper::{ComponentPair, ComponentSet, KeyExtractor, Mapper, Record, RecordKey};
pub use schema::{FieldDescriptor, Schema, resolve_table_name};
pub use transaction::{TransactionBinding, TransactionError, TransactionToken};
pub use value::{FieldValue, Value, ValueKind};

/// Table name of record type `T`.
pub fn table_name<T: Record>() -> Cow<'static, str> {
    T::schema().table_name()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{Book, Tagged};

    #[test]
    fn table_name_of_types() {
        assert_eq!(table_name::<Book>(), "books");
        assert_eq!(table_name::<Tagged>(), "tag_table");
    }
}
