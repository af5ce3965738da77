// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Convenient re-exports for common usage.
//!
//! # Usage
//!
//! ```rust
//! use record_dao_core::prelude::*;
//! ```

pub use crate::{
    Backend, ComponentPair, ComponentSet, Dao, DaoError, FieldDescriptor, FieldValue, Filter,
    Mapper, Record, Schema, ThreadSafety, TransactionBinding, TransactionToken, Value, ValueKind
};
