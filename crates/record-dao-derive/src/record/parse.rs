// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Parsing of `#[derive(Record)]` input.
//!
//! ```text
//! parse.rs (RecordDef + constructor)
//! ├── attrs.rs  - `#[record(...)]` via darling
//! └── field.rs  - `#[id]`, `#[id(generated)]`, `#[generated]`
//! ```

mod attrs;
mod field;

use darling::FromDeriveInput;
use syn::{DeriveInput, Ident};

pub use self::field::{FieldDef, StorageConfig};
use self::attrs::RecordAttrs;

/// Complete parsed record definition.
///
/// Created once per expansion and passed to every generator.
#[derive(Debug)]
pub struct RecordDef {
    /// Struct identifier.
    pub ident: Ident,

    /// Explicit table name from `#[record(table = "...")]`.
    pub table: Option<String>,

    /// Fields in declaration order.
    pub fields: Vec<FieldDef>,

    /// Index of the `#[id]` field in `fields`.
    pub key_index: usize
}

impl RecordDef {
    /// Parse a record definition from syn's `DeriveInput`.
    ///
    /// # Errors
    ///
    /// - Applied to an enum, union, tuple struct or unit struct
    /// - Generic struct
    /// - Empty `table` override
    /// - Zero or several `#[id]` fields
    /// - Malformed field attributes
    pub fn from_derive_input(input: &DeriveInput) -> darling::Result<Self> {
        let attrs = RecordAttrs::from_derive_input(input)?;

        if !attrs.generics.params.is_empty() {
            return Err(darling::Error::custom("Record cannot be derived for generic structs")
                .with_span(&attrs.generics));
        }
        if attrs.table.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(darling::Error::custom("`table` must not be empty").with_span(&attrs.ident));
        }

        let fields: Vec<FieldDef> = match &input.data {
            syn::Data::Struct(data) => match &data.fields {
                syn::Fields::Named(named) => {
                    let mut errors = darling::Error::accumulator();
                    let fields: Vec<FieldDef> = named
                        .named
                        .iter()
                        .filter_map(|field| errors.handle(FieldDef::from_field(field)))
                        .collect();
                    errors.finish_with(fields)?
                }
                _ => {
                    return Err(darling::Error::custom("Record requires named fields")
                        .with_span(&input.ident));
                }
            },
            _ => {
                return Err(darling::Error::custom("Record can only be derived for structs")
                    .with_span(&input.ident));
            }
        };

        let mut keys = fields.iter().enumerate().filter(|(_, f)| f.is_id());
        let key_index = match (keys.next(), keys.next()) {
            (Some((index, _)), None) => index,
            (None, _) => {
                return Err(darling::Error::custom(
                    "Record must have exactly one field with #[id] attribute"
                )
                .with_span(&input.ident));
            }
            (Some(_), Some((_, second))) => {
                return Err(darling::Error::custom(
                    "Record must have exactly one field with #[id] attribute"
                )
                .with_span(second.name()));
            }
        };

        Ok(Self {
            ident: attrs.ident,
            table: attrs.table,
            fields,
            key_index
        })
    }

    /// Struct identifier.
    #[must_use]
    pub fn name(&self) -> &Ident {
        &self.ident
    }

    /// Struct name as written, used for error messages and the schema.
    #[must_use]
    pub fn name_str(&self) -> String {
        self.ident.to_string()
    }

    /// The key field.
    #[must_use]
    pub fn key_field(&self) -> &FieldDef {
        &self.fields[self.key_index]
    }
}
