// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use record_dao::{Record, table_name};

#[derive(Debug, Clone, Record)]
#[record(table = "custom")]
pub struct Appointment {
    #[id]
    pub code: String,
    pub subject: String,
}

#[derive(Debug, Clone, Record)]
pub struct Category {
    #[id]
    pub slug: String,
}

fn main() {
    assert_eq!(table_name::<Appointment>(), "custom");
    assert_eq!(Appointment::schema().table_override(), Some("custom"));
    assert_eq!(table_name::<Category>(), "categorys");
}
