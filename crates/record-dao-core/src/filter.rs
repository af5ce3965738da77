// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Equality filters for `select_where`, `delete_where` and
//! `get_by_column_values`.
//!
//! A [`Filter`] is an ordered list of `(field, value)` predicates combined
//! with AND. The empty filter matches every record.
//!
//! # Construction
//!
//! ```rust
//! use record_dao_core::{Filter, Value};
//!
//! let typed = Filter::new().eq("department_id", 1).eq("first_name", "Piet");
//!
//! let flat = Filter::from_flat(vec![
//!     Value::from("department_id"),
//!     Value::from(1),
//!     Value::from("first_name"),
//!     Value::from("Piet"),
//! ])
//! .unwrap();
//!
//! assert_eq!(typed, flat);
//! assert!(Filter::from_flat(vec![Value::from("department_id")]).is_err());
//! ```

use std::{borrow::Cow, fmt};

use crate::{
    error::{DaoError, Result},
    mapper::{ComponentPair, Record},
    value::Value
};

/// AND-combined equality filter.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Filter {
    predicates: Vec<ComponentPair>
}

impl Filter {
    /// Empty filter, matches everything.
    pub const fn new() -> Self {
        Self {
            predicates: Vec::new()
        }
    }

    /// Add an equality predicate.
    #[must_use]
    pub fn eq(mut self, field: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        self.predicates.push(ComponentPair::new(field, value));
        self
    }

    /// Build from explicit pairs.
    pub fn from_pairs<N, V>(pairs: impl IntoIterator<Item = (N, V)>) -> Self
    where
        N: Into<Cow<'static, str>>,
        V: Into<Value>
    {
        Self {
            predicates: pairs
                .into_iter()
                .map(|(name, value)| ComponentPair::new(name, value))
                .collect()
        }
    }

    /// Decode an alternating `name, value, name, value, ...` sequence.
    ///
    /// # Errors
    ///
    /// [`DaoError::OddFilterPairs`] for odd length and
    /// [`DaoError::InvalidArgument`] when a name position is not text.
    pub fn from_flat(values: Vec<Value>) -> Result<Self> {
        if values.len() % 2 != 0 {
            return Err(DaoError::OddFilterPairs {
                len: values.len()
            });
        }
        let mut predicates = Vec::with_capacity(values.len() / 2);
        let mut iter = values.into_iter();
        while let (Some(name), Some(value)) = (iter.next(), iter.next()) {
            match name {
                Value::Text(name) => predicates.push(ComponentPair::new(name, value)),
                other => {
                    return Err(DaoError::invalid(format!(
                        "filter field name must be text, got {other}"
                    )));
                }
            }
        }
        Ok(Self {
            predicates
        })
    }

    /// Predicates in insertion order.
    pub fn predicates(&self) -> &[ComponentPair] {
        &self.predicates
    }

    /// Number of predicates.
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// Check if the filter has no predicates.
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Reject field names the record type does not declare.
    ///
    /// # Errors
    ///
    /// [`DaoError::InvalidArgument`] naming the first unknown field.
    pub fn validate_for<E: Record>(&self) -> Result<()> {
        let schema = E::schema();
        match self.predicates.iter().find(|p| schema.field(&p.name).is_none()) {
            Some(unknown) => Err(DaoError::invalid(format!(
                "`{}` has no component `{}`",
                schema.type_name(),
                unknown.name
            ))),
            None => Ok(())
        }
    }

    /// Evaluate against a record. Unknown fields never match.
    pub fn matches<E: Record>(&self, record: &E) -> bool {
        if self.predicates.is_empty() {
            return true;
        }
        let components = record.to_components();
        self.predicates.iter().all(|predicate| {
            components
                .iter()
                .any(|c| c.name == predicate.name && c.value == predicate.value)
        })
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.predicates.is_empty() {
            return f.write_str("true");
        }
        for (i, p) in self.predicates.iter().enumerate() {
            if i > 0 {
                f.write_str(" AND ")?;
            }
            write!(f, "{} = {}", p.name, p.value)?;
        }
        Ok(())
    }
}
