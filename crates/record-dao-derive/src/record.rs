// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Record derive macro implementation.
//!
//! # Architecture
//!
//! ```text
//! record.rs (orchestrator)
//! │
//! ├── parse/          → Attribute parsing (RecordDef, FieldDef)
//! │
//! ├── schema.rs       → `fn schema()` with the per-type static Schema
//! └── components.rs   → Key type, `key()`, to/from component pairs
//! ```
//!
//! Everything lands in a single `impl ::record_dao::Record for T` block.

mod components;
pub mod parse;
mod schema;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

use self::parse::RecordDef;

/// Main entry point for the Record derive macro.
pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match RecordDef::from_derive_input(&input) {
        Ok(record) => generate(&record).into(),
        Err(err) => err.write_errors().into()
    }
}

fn generate(record: &RecordDef) -> TokenStream2 {
    let ident = record.name();
    let key_type = components::key_type(record);
    let schema = schema::generate(record);
    let key = components::generate_key(record);
    let to_components = components::generate_to_components(record);
    let from_components = components::generate_from_components(record);

    quote! {
        #[automatically_derived]
        impl ::record_dao::Record for #ident {
            type Key = #key_type;

            #schema
            #key
            #to_components
            #from_components
        }
    }
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::*;

    fn expand(input: DeriveInput) -> String {
        let record = RecordDef::from_derive_input(&input).expect("valid record");
        generate(&record).to_string()
    }

    #[test]
    fn implements_record_trait() {
        let out = expand(parse_quote! {
            struct Book {
                #[id(generated)]
                id: Option<i64>,
                title: String,
            }
        });
        assert!(out.contains(":: record_dao :: Record for Book"));
        assert!(out.contains("type Key = i64"));
        assert!(out.contains("fn schema"));
        assert!(out.contains("fn key"));
        assert!(out.contains("fn to_components"));
        assert!(out.contains("fn from_components"));
    }

    #[test]
    fn non_optional_key_type_is_field_type() {
        let out = expand(parse_quote! {
            struct Person {
                #[id]
                email: String,
                name: String,
            }
        });
        assert!(out.contains("type Key = String"));
    }
}
