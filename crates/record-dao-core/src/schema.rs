// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Schema-declared field descriptors and table naming.
//!
//! Each record type owns exactly one [`Schema`], built in a `static` at
//! compile time (by `#[derive(Record)]` or by hand). The schema is the only
//! source of introspection: no runtime type inspection takes place.
//!
//! # Table naming
//!
//! | Declaration | Table |
//! |-------------|-------|
//! | `struct Appointment` | `appointments` |
//! | `struct Book` | `books` |
//! | `#[record(table = "custom")] struct Book` | `custom` |
//!
//! The default appends a literal `s` to the lowercased simple name. There is
//! no linguistic pluralization: `Person` becomes `persons`.

use std::borrow::Cow;

use crate::value::ValueKind;

/// Descriptor of one persistable component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    /// Component name.
    pub name:      &'static str,

    /// Field type.
    pub kind:      ValueKind,

    /// Value is produced by a generator or the backend when null.
    pub generated: bool,

    /// Component is the record identity.
    pub key:       bool
}

impl FieldDescriptor {
    /// Plain component.
    pub const fn new(name: &'static str, kind: ValueKind) -> Self {
        Self {
            name,
            kind,
            generated: false,
            key: false
        }
    }

    /// Mark the component as generated.
    #[must_use]
    pub const fn generated(mut self) -> Self {
        self.generated = true;
        self
    }

    /// Mark the component as the identity.
    #[must_use]
    pub const fn key(mut self) -> Self {
        self.key = true;
        self
    }
}

/// Complete persistence schema of a record type.
///
/// # Example
///
/// ```rust
/// use record_dao_core::{FieldDescriptor, Schema, ValueKind};
///
/// static BOOK: Schema = Schema::new("Book", &[
///     FieldDescriptor::new("id", ValueKind::Int).key().generated(),
///     FieldDescriptor::new("title", ValueKind::Text),
/// ]);
///
/// assert_eq!(BOOK.table_name(), "books");
/// assert_eq!(BOOK.field_names(), vec!["id", "title"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    type_name:      &'static str,
    table_override: Option<&'static str>,
    fields:         &'static [FieldDescriptor]
}

impl Schema {
    /// Schema without a table-name override.
    pub const fn new(type_name: &'static str, fields: &'static [FieldDescriptor]) -> Self {
        Self {
            type_name,
            table_override: None,
            fields
        }
    }

    /// Attach an explicit table name.
    #[must_use]
    pub const fn with_table(mut self, table: &'static str) -> Self {
        self.table_override = Some(table);
        self
    }

    /// Type name as declared, possibly path-qualified.
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Last path segment of the type name.
    pub fn simple_name(&self) -> &'static str {
        simple_name(self.type_name)
    }

    /// Explicit table name, if configured.
    pub const fn table_override(&self) -> Option<&'static str> {
        self.table_override
    }

    /// Component descriptors in declaration order.
    pub const fn fields(&self) -> &'static [FieldDescriptor] {
        self.fields
    }

    /// Component names in declaration order.
    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }

    /// Look up a component by name.
    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// The identity component, if the schema declares one.
    pub fn key_field(&self) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|f| f.key)
    }

    /// Components flagged as generated.
    pub fn generated_fields(&self) -> impl Iterator<Item = &'static FieldDescriptor> {
        self.fields.iter().filter(|f| f.generated)
    }

    /// Resolved storage name.
    pub fn table_name(&self) -> Cow<'static, str> {
        resolve_table_name(self.simple_name(), self.table_override)
    }
}

/// Resolve a table name from a simple type name and an optional override.
///
/// The override is returned verbatim. Otherwise the name is lowercased and a
/// literal `s` is appended.
///
/// # Example
///
/// ```rust
/// use record_dao_core::resolve_table_name;
///
/// assert_eq!(resolve_table_name("Appointment", None), "appointments");
/// assert_eq!(resolve_table_name("Appointment", Some("custom")), "custom");
/// ```
pub fn resolve_table_name(simple_name: &str, table_override: Option<&'static str>) -> Cow<'static, str> {
    match table_override {
        Some(table) => Cow::Borrowed(table),
        None => {
            let mut table = simple_name.to_lowercase();
            table.push('s');
            Cow::Owned(table)
        }
    }
}

fn simple_name(type_name: &'static str) -> &'static str {
    let base = type_name.split('<').next().unwrap_or(type_name);
    base.rsplit("::").next().unwrap_or(base).trim()
}
