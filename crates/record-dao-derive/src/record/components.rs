// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Key and component conversion generation.
//!
//! | Key field type | `Key` | `key()` |
//! |----------------|-------|---------|
//! | `Option<T>` | `T` | `self.id.clone()` |
//! | `T` | `T` | `Some(self.id.clone())` |

use proc_macro2::TokenStream;
use quote::quote;

use super::parse::RecordDef;

/// The `Key` associated type.
pub fn key_type(record: &RecordDef) -> TokenStream {
    let field = record.key_field();
    match field.option_inner() {
        Some(inner) => quote! { #inner },
        None => {
            let ty = field.ty();
            quote! { #ty }
        }
    }
}

/// Generate `fn key()`.
pub fn generate_key(record: &RecordDef) -> TokenStream {
    let field = record.key_field();
    let name = field.name();
    let body = if field.option_inner().is_some() {
        quote! { ::core::clone::Clone::clone(&self.#name) }
    } else {
        quote! { ::core::option::Option::Some(::core::clone::Clone::clone(&self.#name)) }
    };

    quote! {
        fn key(&self) -> ::core::option::Option<Self::Key> {
            #body
        }
    }
}

/// Generate `fn to_components()`.
pub fn generate_to_components(record: &RecordDef) -> TokenStream {
    let pairs = record.fields.iter().map(|field| {
        let ident = field.name();
        let name = field.name_str();
        quote! {
            ::record_dao::ComponentPair::new(
                #name,
                ::record_dao::FieldValue::to_value(&self.#ident)
            )
        }
    });

    quote! {
        fn to_components(&self) -> ::std::vec::Vec<::record_dao::ComponentPair> {
            ::std::vec![#(#pairs),*]
        }
    }
}

/// Generate `fn from_components()`.
pub fn generate_from_components(record: &RecordDef) -> TokenStream {
    let type_name = record.name_str();
    let assignments = record.fields.iter().map(|field| {
        let ident = field.name();
        let name = field.name_str();
        quote! { #ident: set.take(#name)? }
    });

    quote! {
        fn from_components(
            components: ::std::vec::Vec<::record_dao::ComponentPair>
        ) -> ::record_dao::Result<Self> {
            let mut set = ::record_dao::ComponentSet::new(#type_name, components);
            ::core::result::Result::Ok(Self {
                #(#assignments),*
            })
        }
    }
}
