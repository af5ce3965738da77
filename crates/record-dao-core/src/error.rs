// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Error taxonomy for DAO operations.
//!
//! "Not found" is never an error: lookups return `Option` or an empty `Vec`.
//! Everything else that can go wrong crosses the contract boundary as a
//! [`DaoError`].
//!
//! # Variants by kind
//!
//! | Kind | Variant(s) | Retried here |
//! |------|------------|--------------|
//! | Unsupported | [`DaoError::Unsupported`] | No |
//! | InvalidArgument | [`DaoError::InvalidArgument`], [`DaoError::OddFilterPairs`], [`DaoError::MissingComponent`], [`DaoError::TypeMismatch`] | No |
//! | TransactionFailure | [`DaoError::Transaction`] | No |
//! | KeyMismatch | [`DaoError::KeyMismatch`] | No |
//! | BackendFailure | [`DaoError::Backend`], [`DaoError::NotPersisted`] | No |
//!
//! Backends wrap their native faults with [`DaoError::backend`] so driver
//! error types never leak through the [`Dao`](crate::Dao) signature.

use thiserror::Error;

use crate::{transaction::TransactionError, value::ValueKind};

/// Boxed source error used for backend and transaction faults.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias used throughout the crate.
pub type Result<T, E = DaoError> = std::result::Result<T, E>;

/// Error returned by DAO and backend operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DaoError {
    /// The backend does not implement this operation.
    #[error("operation `{operation}` is not supported by this backend")]
    Unsupported {
        /// Name of the unsupported operation.
        operation: &'static str
    },

    /// A required argument was missing or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A flat filter sequence did not consist of whole (name, value) pairs.
    #[error("filter sequence must have even length, got {len}")]
    OddFilterPairs {
        /// Length of the rejected sequence.
        len: usize
    },

    /// Record reconstruction found no value for a declared component.
    #[error("record `{record}` is missing component `{field}`")]
    MissingComponent {
        /// Record type name.
        record: &'static str,
        /// Component name.
        field:  String
    },

    /// A component value could not be converted into the field type.
    #[error("component `{field}` expects {expected:?}, found {found}")]
    TypeMismatch {
        /// Component name, empty when converting a bare value.
        field:    String,
        /// Kind the field type accepts.
        expected: ValueKind,
        /// Description of the offending value.
        found:    String
    },

    /// Starting or releasing a transaction scope failed.
    #[error(transparent)]
    Transaction(#[from] TransactionError),

    /// `update` saved a record whose key differs from the input key.
    #[error("key changed during update of `{table}`: expected {expected}, got {actual}")]
    KeyMismatch {
        /// Table of the record.
        table:    String,
        /// Debug form of the key before the update.
        expected: String,
        /// Debug form of the key after the save.
        actual:   String
    },

    /// The backend reported success but returned no record.
    #[error("backend did not confirm persistence of a `{table}` record")]
    NotPersisted {
        /// Table of the record.
        table: String
    },

    /// Native storage fault, wrapped.
    #[error("backend failure: {0}")]
    Backend(#[source] BoxError)
}

impl DaoError {
    /// Wrap any backend-native error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use record_dao_core::DaoError;
    ///
    /// let err = DaoError::backend(std::io::Error::other("disk full"));
    /// assert!(err.is_backend());
    /// ```
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Box::new(err))
    }

    /// Build an [`DaoError::Unsupported`] for the named operation.
    pub const fn unsupported(operation: &'static str) -> Self {
        Self::Unsupported {
            operation
        }
    }

    /// Build an [`DaoError::InvalidArgument`].
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Check if this is an unsupported-operation error.
    pub const fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }

    /// Check if the caller passed a bad argument.
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument(_)
                | Self::OddFilterPairs { .. }
                | Self::MissingComponent { .. }
                | Self::TypeMismatch { .. }
        )
    }

    /// Check if this is a transaction failure.
    pub const fn is_transaction(&self) -> bool {
        matches!(self, Self::Transaction(_))
    }

    /// Check if this is an update key mismatch.
    pub const fn is_key_mismatch(&self) -> bool {
        matches!(self, Self::KeyMismatch { .. })
    }

    /// Check if this is a wrapped backend failure.
    pub const fn is_backend(&self) -> bool {
        matches!(self, Self::Backend(_) | Self::NotPersisted { .. })
    }
}
