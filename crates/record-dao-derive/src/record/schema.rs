// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Schema generation.
//!
//! Produces `fn schema()` returning a reference to a function-local
//! `static`, so the descriptor list is built at compile time and shared by
//! every mapper of the type.
//!
//! ```rust,ignore
//! fn schema() -> &'static ::record_dao::Schema {
//!     static SCHEMA: ::record_dao::Schema = ::record_dao::Schema::new(
//!         concat!(module_path!(), "::", "Book"),
//!         &[
//!             FieldDescriptor::new("id", <Option<i64> as FieldValue>::KIND).key().generated(),
//!             FieldDescriptor::new("title", <String as FieldValue>::KIND),
//!         ],
//!     );
//!     &SCHEMA
//! }
//! ```

use proc_macro2::TokenStream;
use quote::quote;

use super::parse::{FieldDef, RecordDef};

/// Generate `fn schema()`.
pub fn generate(record: &RecordDef) -> TokenStream {
    let type_name = record.name_str();
    let descriptors = record.fields.iter().map(descriptor);
    let with_table = record.table.as_ref().map(|table| quote! { .with_table(#table) });

    quote! {
        fn schema() -> &'static ::record_dao::Schema {
            static SCHEMA: ::record_dao::Schema = ::record_dao::Schema::new(
                ::core::concat!(::core::module_path!(), "::", #type_name),
                &[#(#descriptors),*]
            )
            #with_table;
            &SCHEMA
        }
    }
}

fn descriptor(field: &FieldDef) -> TokenStream {
    let name = field.name_str();
    let ty = field.ty();
    let key = field.is_id().then(|| quote! { .key() });
    let generated = field.is_generated().then(|| quote! { .generated() });

    quote! {
        ::record_dao::FieldDescriptor::new(
            #name,
            <#ty as ::record_dao::FieldValue>::KIND
        )
        #key
        #generated
    }
}
