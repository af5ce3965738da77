// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Transaction tokens and the DAO binding state.
//!
//! A [`TransactionToken`] is an opaque handle that correlates operations for
//! atomic commit or rollback. Its payload is defined by the backend that
//! created it (a connection, a session id, a write buffer...). Tokens are
//! cheap to clone, so one token can be passed to several DAOs that should
//! take part in the same unit of work.
//!
//! # Binding state machine
//!
//! ```text
//!            set_transaction_token(t)
//!   Unbound ─────────────────────────▶ Bound(t)
//!      ▲                                  │
//!      └────────────── close() ───────────┘
//! ```
//!
//! [`TransactionBinding`] replaces a nullable token with an explicit sum type
//! so the unbound state cannot be confused with a missing check.
//!
//! # Example
//!
//! ```rust
//! use record_dao_core::{TransactionBinding, TransactionToken};
//!
//! struct Session { name: &'static str }
//!
//! let token = TransactionToken::new(Session { name: "tx-1" });
//! let mut binding = TransactionBinding::default();
//! assert!(!binding.is_bound());
//!
//! binding.bind(token.clone());
//! assert_eq!(binding.token(), Some(&token));
//! assert_eq!(token.payload::<Session>().map(|s| s.name), Some("tx-1"));
//!
//! assert_eq!(binding.release(), Some(token));
//! assert!(!binding.is_bound());
//! ```

use std::{
    any::Any,
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering}
    }
};

use thiserror::Error;

use crate::error::BoxError;

static NEXT_TOKEN_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque handle grouping operations into one transaction.
#[derive(Clone)]
pub struct TransactionToken {
    id:      u64,
    payload: Arc<dyn Any + Send + Sync>
}

impl TransactionToken {
    /// Wrap a backend-defined payload. Every token gets a process-unique id.
    pub fn new<P: Any + Send + Sync>(payload: P) -> Self {
        Self {
            id:      NEXT_TOKEN_ID.fetch_add(1, Ordering::Relaxed),
            payload: Arc::new(payload)
        }
    }

    /// Process-unique token id.
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Borrow the payload if it has type `P`.
    pub fn payload<P: Any>(&self) -> Option<&P> {
        self.payload.downcast_ref::<P>()
    }

    /// Check the payload type.
    pub fn is<P: Any>(&self) -> bool {
        self.payload.is::<P>()
    }
}

impl PartialEq for TransactionToken {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TransactionToken {}

impl fmt::Debug for TransactionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransactionToken")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// Transaction binding of a DAO.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TransactionBinding {
    /// No transaction; every operation stands alone.
    #[default]
    Unbound,

    /// Operations are grouped under the token.
    Bound(TransactionToken)
}

impl TransactionBinding {
    /// Check if a token is bound.
    pub const fn is_bound(&self) -> bool {
        matches!(self, Self::Bound(_))
    }

    /// The bound token, if any.
    pub const fn token(&self) -> Option<&TransactionToken> {
        match self {
            Self::Bound(token) => Some(token),
            Self::Unbound => None
        }
    }

    /// Bind a token, returning the one it replaces.
    pub fn bind(&mut self, token: TransactionToken) -> Option<TransactionToken> {
        std::mem::replace(self, Self::Bound(token)).into_token()
    }

    /// Return to `Unbound`, handing back the released token.
    pub fn release(&mut self) -> Option<TransactionToken> {
        std::mem::take(self).into_token()
    }

    fn into_token(self) -> Option<TransactionToken> {
        match self {
            Self::Bound(token) => Some(token),
            Self::Unbound => None
        }
    }
}

/// Error type for transaction scope operations.
#[derive(Debug, Error)]
pub enum TransactionError {
    /// The backend could not acquire what it needs to group operations.
    #[error("failed to begin transaction: {0}")]
    Begin(#[source] BoxError),

    /// Releasing the resources of a bound token failed.
    #[error("failed to release transaction {token}: {source}")]
    Release {
        /// Id of the token being released.
        token:  u64,
        /// Backend error.
        #[source]
        source: BoxError
    }
}

impl TransactionError {
    /// Wrap a begin failure.
    pub fn begin(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Begin(Box::new(err))
    }

    /// Wrap a release failure for `token`.
    pub fn release(token: &TransactionToken, err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Release {
            token:  token.id(),
            source: Box::new(err)
        }
    }

    /// Check if this is a begin error.
    pub const fn is_begin(&self) -> bool {
        matches!(self, Self::Begin(_))
    }

    /// Check if this is a release error.
    pub const fn is_release(&self) -> bool {
        matches!(self, Self::Release { .. })
    }

    /// Get the inner error.
    pub fn into_inner(self) -> BoxError {
        match self {
            Self::Begin(source)
            | Self::Release {
                source, ..
            } => source
        }
    }
}
