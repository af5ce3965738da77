// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field-level attribute parsing.
//!
//! | Attribute | Effect |
//! |-----------|--------|
//! | `#[id]` | Record key |
//! | `#[id(generated)]` | Record key, assigned on save |
//! | `#[generated]` | Assigned on save, omitted from writes while null |

use syn::{Field, Ident, Meta, Type};

use crate::utils::types::option_inner;

/// Storage flags of a field.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StorageConfig {
    /// Key field (`#[id]`).
    pub is_id: bool,

    /// Value assigned on save (`#[generated]` or `#[id(generated)]`).
    pub is_generated: bool
}

/// Field definition with parsed attributes.
#[derive(Debug)]
pub struct FieldDef {
    /// Field identifier.
    pub ident: Ident,

    /// Field type.
    pub ty: Type,

    /// Storage flags.
    pub storage: StorageConfig
}

impl FieldDef {
    /// Parse a field definition from syn's `Field`.
    ///
    /// # Errors
    ///
    /// - Unnamed field
    /// - Repeated `#[id]`
    /// - Unknown option inside `#[id(...)]`
    /// - Arguments passed to `#[generated]`
    /// - Generated field whose type is not `Option<_>`
    pub fn from_field(field: &Field) -> darling::Result<Self> {
        let ident = field.ident.clone().ok_or_else(|| {
            darling::Error::custom("Record fields must be named").with_span(field)
        })?;

        let mut storage = StorageConfig::default();
        for attr in &field.attrs {
            if attr.path().is_ident("id") {
                if storage.is_id {
                    return Err(darling::Error::duplicate_field("id").with_span(attr));
                }
                storage.is_id = true;
                if let Meta::List(_) = attr.meta {
                    attr.parse_nested_meta(|meta| {
                        if meta.path.is_ident("generated") {
                            storage.is_generated = true;
                            Ok(())
                        } else {
                            Err(meta.error("expected `generated`"))
                        }
                    })?;
                }
            } else if attr.path().is_ident("generated") {
                if !matches!(attr.meta, Meta::Path(_)) {
                    return Err(darling::Error::custom("`#[generated]` takes no arguments")
                        .with_span(attr));
                }
                storage.is_generated = true;
            }
        }

        if storage.is_generated && option_inner(&field.ty).is_none() {
            return Err(darling::Error::custom(format!(
                "generated field `{ident}` must be `Option<_>` so it can be unassigned"
            ))
            .with_span(&field.ty));
        }

        Ok(Self {
            ident,
            ty: field.ty.clone(),
            storage
        })
    }

    /// Field name as an identifier.
    #[must_use]
    pub fn name(&self) -> &Ident {
        &self.ident
    }

    /// Field name as a component name.
    #[must_use]
    pub fn name_str(&self) -> String {
        self.ident.to_string()
    }

    /// Field type.
    #[must_use]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// Inner type when the field is `Option<T>`.
    #[must_use]
    pub fn option_inner(&self) -> Option<&Type> {
        option_inner(&self.ty)
    }

    /// Check if this is the key field.
    #[must_use]
    pub fn is_id(&self) -> bool {
        self.storage.is_id
    }

    /// Check if this field is assigned on save.
    #[must_use]
    pub fn is_generated(&self) -> bool {
        self.storage.is_generated
    }
}
