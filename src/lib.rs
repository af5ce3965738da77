// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

// Re-export all core types
pub use record_dao_core::*;
// Re-export derive macro
pub use record_dao_derive::Record;

/// Convenient re-exports for common usage, including the derive macro.
///
/// ```rust
/// use record_dao::prelude::*;
///
/// #[derive(Debug, Clone, PartialEq, Record)]
/// struct Note {
///     #[id(generated)]
///     id:   Option<i64>,
///     body: String
/// }
///
/// assert_eq!(record_dao::table_name::<Note>(), "notes");
/// ```
pub mod prelude {
    pub use record_dao_core::prelude::*;
    pub use record_dao_derive::Record;
}
