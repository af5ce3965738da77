// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Record-level attribute parsing with darling.
//!
//! | Attribute | Required | Default | Description |
//! |-----------|----------|---------|-------------|
//! | `table` | No | lowercased type name + `s` | Explicit table name |

use darling::FromDeriveInput;
use syn::{Generics, Ident};

/// Record-level attributes parsed from `#[record(...)]`.
///
/// ```rust,ignore
/// #[record(table = "people")]
/// ```
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(record), supports(struct_named))]
pub struct RecordAttrs {
    /// Struct identifier (e.g., `Person`).
    pub ident: Ident,

    /// Generic parameters, rejected by the constructor.
    pub generics: Generics,

    /// Explicit table name, used verbatim.
    #[darling(default)]
    pub table: Option<String>
}
