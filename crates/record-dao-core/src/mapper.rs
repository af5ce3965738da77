// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Records, component pairs and the per-type [`Mapper`].
//!
//! A [`Record`] is an immutable value made of named components, one of which
//! is its identity. The [`Mapper`] translates between a record and the
//! schema-level view backends work with.
//!
//! # Generated-field exclusion
//!
//! [`Mapper::drop_generated_fields`] omits a component from a write payload
//! if and only if it is flagged generated **and** its value is null:
//!
//! | generated | value | in payload |
//! |-----------|-------|------------|
//! | no | null | yes |
//! | no | set | yes |
//! | yes | null | **no** |
//! | yes | set | yes |

use std::{borrow::Cow, fmt, hash::Hash};

use crate::{
    error::{DaoError, Result},
    schema::{FieldDescriptor, Schema},
    value::{FieldValue, Value}
};

/// A single `(name, value)` binding of a persistable component.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComponentPair {
    /// Component name.
    pub name:  Cow<'static, str>,

    /// Component value.
    pub value: Value
}

impl ComponentPair {
    /// Create a pair.
    pub fn new(name: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        Self {
            name:  name.into(),
            value: value.into()
        }
    }
}

/// Bounds required of a record key.
///
/// Blanket-implemented; never implement it by hand.
pub trait RecordKey: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static {}

impl<T> RecordKey for T where T: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static {}

/// An immutable, keyed, persistable value.
///
/// Usually derived with `#[derive(Record)]`. A manual implementation looks
/// like this:
///
/// ```rust
/// use record_dao_core::prelude::*;
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Book {
///     id:    Option<i64>,
///     title: String
/// }
///
/// static BOOK: Schema = Schema::new("Book", &[
///     FieldDescriptor::new("id", ValueKind::Int).key().generated(),
///     FieldDescriptor::new("title", ValueKind::Text),
/// ]);
///
/// impl Record for Book {
///     type Key = i64;
///
///     fn schema() -> &'static Schema {
///         &BOOK
///     }
///
///     fn key(&self) -> Option<i64> {
///         self.id
///     }
///
///     fn to_components(&self) -> Vec<ComponentPair> {
///         vec![
///             ComponentPair::new("id", self.id.to_value()),
///             ComponentPair::new("title", self.title.to_value()),
///         ]
///     }
///
///     fn from_components(components: Vec<ComponentPair>) -> Result<Self, DaoError> {
///         let mut set = ComponentSet::new(BOOK.type_name(), components);
///         Ok(Self {
///             id:    set.take("id")?,
///             title: set.take("title")?
///         })
///     }
/// }
///
/// let book = Book { id: None, title: "Dune".into() };
/// assert_eq!(book.component("title"), Some(Value::from("Dune")));
/// ```
pub trait Record: Clone + Send + Sync + 'static {
    /// Identity type.
    type Key: RecordKey;

    /// The schema, built once per type.
    fn schema() -> &'static Schema;

    /// Extract the identity.
    ///
    /// Total: a record whose generated key has not been assigned yet returns
    /// `None` rather than failing.
    fn key(&self) -> Option<Self::Key>;

    /// All components in declaration order.
    fn to_components(&self) -> Vec<ComponentPair>;

    /// Rebuild a record from components.
    ///
    /// # Errors
    ///
    /// [`DaoError::MissingComponent`] or [`DaoError::TypeMismatch`] when the
    /// components do not describe a well-formed record.
    fn from_components(components: Vec<ComponentPair>) -> Result<Self>;

    /// Value of one component by name.
    fn component(&self, name: &str) -> Option<Value> {
        self.to_components()
            .into_iter()
            .find(|c| c.name == name)
            .map(|c| c.value)
    }
}

/// Owned component list consumed while rebuilding a record.
#[derive(Debug)]
pub struct ComponentSet {
    record: &'static str,
    pairs:  Vec<ComponentPair>
}

impl ComponentSet {
    /// Wrap components belonging to `record`.
    pub const fn new(record: &'static str, pairs: Vec<ComponentPair>) -> Self {
        Self {
            record,
            pairs
        }
    }

    /// Remove the named component and convert it to the field type.
    ///
    /// A missing component is treated as null, which optional fields accept.
    ///
    /// # Errors
    ///
    /// [`DaoError::MissingComponent`] when the component is absent and the
    /// field is not optional, [`DaoError::TypeMismatch`] when the value has
    /// the wrong kind.
    pub fn take<T: FieldValue>(&mut self, name: &str) -> Result<T> {
        match self.pairs.iter().position(|c| c.name == name) {
            Some(index) => {
                let pair = self.pairs.swap_remove(index);
                T::from_value(pair.value).map_err(|err| match err {
                    DaoError::TypeMismatch {
                        expected,
                        found,
                        ..
                    } => DaoError::TypeMismatch {
                        field: format!("{}.{name}", self.record),
                        expected,
                        found
                    },
                    other => other
                })
            }
            None => T::from_value(Value::Null).map_err(|_| DaoError::MissingComponent {
                record: self.record,
                field:  name.to_owned()
            })
        }
    }
}

/// Key extraction function of a mapper.
pub type KeyExtractor<E> = fn(&E) -> Option<<E as Record>::Key>;

/// Per-record-type translator.
///
/// Exactly one mapper exists per DAO, built at construction time and never
/// changed afterwards.
pub struct Mapper<E: Record> {
    schema:        &'static Schema,
    key_extractor: KeyExtractor<E>
}

impl<E: Record> Mapper<E> {
    /// Mapper using the record's own key.
    pub fn new() -> Self {
        Self {
            schema:        E::schema(),
            key_extractor: E::key
        }
    }

    /// Mapper with a custom key, e.g. a value derived from several
    /// components.
    pub fn with_key_extractor(key_extractor: KeyExtractor<E>) -> Self {
        Self {
            schema: E::schema(),
            key_extractor
        }
    }

    /// The key extraction function.
    pub fn key_extractor(&self) -> KeyExtractor<E> {
        self.key_extractor
    }

    /// Apply the key extractor.
    pub fn extract_key(&self, record: &E) -> Option<E::Key> {
        (self.key_extractor)(record)
    }

    /// Component descriptors in declaration order.
    pub fn components(&self) -> &'static [FieldDescriptor] {
        self.schema.fields()
    }

    /// Type descriptor used for name resolution.
    pub fn entity_type(&self) -> &'static Schema {
        self.schema
    }

    /// All component names, no implicit exclusions.
    pub fn persistent_field_names(&self) -> Vec<&'static str> {
        self.schema.field_names()
    }

    /// Resolve a table name from any schema.
    pub fn resolve_table_name(schema: &Schema) -> Cow<'static, str> {
        schema.table_name()
    }

    /// Table name of this mapper's record type.
    pub fn table_name(&self) -> Cow<'static, str> {
        Self::resolve_table_name(self.schema)
    }

    /// Write payload of `record`: all components except generated ones that
    /// are still null, in declaration order.
    pub fn drop_generated_fields(&self, record: &E) -> Vec<ComponentPair> {
        let mut components = record.to_components();
        self.schema
            .fields()
            .iter()
            .filter_map(|field| {
                let index = components.iter().position(|c| c.name == field.name)?;
                let pair = components.swap_remove(index);
                (!(field.generated && pair.value.is_null())).then_some(pair)
            })
            .collect()
    }

    /// Copy of `record` with some components replaced.
    ///
    /// The input record is left untouched.
    ///
    /// # Errors
    ///
    /// Fails when a replacement does not fit its field type.
    pub fn with_components(&self, record: &E, replacements: Vec<ComponentPair>) -> Result<E> {
        if replacements.is_empty() {
            return Ok(record.clone());
        }
        let mut components = record.to_components();
        for replacement in replacements {
            match components.iter_mut().find(|c| c.name == replacement.name) {
                Some(slot) => slot.value = replacement.value,
                None => {
                    return Err(DaoError::invalid(format!(
                        "`{}` has no component `{}`",
                        self.schema.type_name(),
                        replacement.name
                    )));
                }
            }
        }
        E::from_components(components)
    }
}

impl<E: Record> Default for Mapper<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Record> Clone for Mapper<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: Record> Copy for Mapper<E> {}

impl<E: Record> fmt::Debug for Mapper<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mapper")
            .field("type", &self.schema.type_name())
            .field("table", &self.table_name())
            .finish_non_exhaustive()
    }
}
