// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use record_dao::{Record, Value, ValueKind};

#[derive(Debug, Clone, PartialEq, Record)]
pub struct Book {
    #[id(generated)]
    pub id: Option<i64>,
    pub title: String,
}

fn main() {
    let schema = Book::schema();
    assert_eq!(schema.simple_name(), "Book");
    assert_eq!(schema.table_name(), "books");
    assert_eq!(schema.field_names(), vec!["id", "title"]);

    let id = schema.key_field().expect("key field");
    assert_eq!(id.name, "id");
    assert_eq!(id.kind, ValueKind::Int);
    assert!(id.generated);

    let book = Book { id: None, title: "Dune".into() };
    let key: Option<i64> = book.key();
    assert_eq!(key, None);
    assert_eq!(book.component("id"), Some(Value::Null));

    let rebuilt = Book::from_components(book.to_components()).expect("rebuild");
    assert_eq!(rebuilt, book);
}
