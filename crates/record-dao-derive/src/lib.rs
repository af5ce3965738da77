// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Procedural macro implementation for `record-dao`.
//!
//! This crate is an implementation detail. Depend on `record-dao`, which
//! re-exports the macro together with the traits the generated code refers
//! to through `::record_dao::...` paths.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

mod record;
mod utils;

use proc_macro::TokenStream;

/// Derive macro implementing `record_dao::Record` for a struct with named
/// fields.
///
/// # Overview
///
/// Every named field becomes a persisted component, in declaration order. The
/// macro builds the static schema once per type, the key accessor, and the
/// conversions to and from component pairs.
///
/// # Record Attributes
///
/// | Attribute | Required | Default | Description |
/// |-----------|----------|---------|-------------|
/// | `table` | No | lowercased type name + `s` | Explicit table name, used verbatim |
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `#[id]` | The record key. Exactly one field must carry it. |
/// | `#[id(generated)]` | Key assigned on save (by a generator or the backend). The field must be `Option<_>`. |
/// | `#[generated]` | Non-key field assigned on save. The field must be `Option<_>`. |
///
/// When the key field is `Option<T>`, the record's key type is `T` and an
/// unsaved record reports no key.
///
/// # Example
///
/// ```rust,ignore
/// use record_dao::Record;
///
/// #[derive(Debug, Clone, PartialEq, Record)]
/// pub struct Appointment {
///     #[id(generated)]
///     pub id: Option<i64>,
///
///     pub subject: String,
///
///     #[generated]
///     pub booked_at: Option<chrono::DateTime<chrono::Utc>>,
/// }
///
/// assert_eq!(record_dao::table_name::<Appointment>(), "appointments");
/// ```
///
/// With an explicit table:
///
/// ```rust,ignore
/// #[derive(Debug, Clone, Record)]
/// #[record(table = "people")]
/// pub struct Person {
///     #[id]
///     pub email: String,
///     pub name: String,
/// }
/// ```
///
/// # Generated Code
///
/// ```rust,ignore
/// impl ::record_dao::Record for Appointment {
///     type Key = i64;
///
///     fn schema() -> &'static ::record_dao::Schema { /* static SCHEMA */ }
///     fn key(&self) -> Option<i64> { self.id.clone() }
///     fn to_components(&self) -> Vec<::record_dao::ComponentPair> { /* ... */ }
///     fn from_components(components: Vec<::record_dao::ComponentPair>)
///         -> ::record_dao::Result<Self> { /* ... */ }
/// }
/// ```
///
/// # Restrictions
///
/// - Only structs with named fields are supported.
/// - Generic structs are rejected; the schema is a single `static`.
/// - Every field type must implement `record_dao::FieldValue`.
#[proc_macro_derive(Record, attributes(record, id, generated))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive(input)
}
