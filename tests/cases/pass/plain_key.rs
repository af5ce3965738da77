// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use record_dao::{Mapper, Record};

#[derive(Debug, Clone, PartialEq, Record)]
pub struct Person {
    pub name: String,
    #[id]
    pub email: String,
    pub age: Option<u32>,
}

fn main() {
    let person = Person {
        name: "Ann".into(),
        email: "ann@example.com".into(),
        age: None,
    };
    let key: Option<String> = person.key();
    assert_eq!(key.as_deref(), Some("ann@example.com"));

    let mapper = Mapper::<Person>::new();
    assert_eq!(mapper.persistent_field_names(), vec!["name", "email", "age"]);
    assert_eq!(mapper.drop_generated_fields(&person).len(), 3);
}
