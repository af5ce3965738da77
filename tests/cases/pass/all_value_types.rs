// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use chrono::{DateTime, NaiveDate, Utc};
use record_dao::{Record, ValueKind};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Record)]
pub struct Sample {
    #[id(generated)]
    pub id: Option<Uuid>,
    pub tiny: i8,
    pub small: i16,
    pub medium: i32,
    pub large: i64,
    pub byte: u8,
    pub word: u16,
    pub dword: u32,
    pub flag: bool,
    pub ratio: f32,
    pub precise: f64,
    pub name: String,
    pub blob: Vec<u8>,
    #[generated]
    pub created_at: Option<DateTime<Utc>>,
    pub birthday: Option<NaiveDate>,
}

fn main() {
    let kinds: Vec<ValueKind> = Sample::schema().fields().iter().map(|f| f.kind).collect();
    assert_eq!(kinds, vec![
        ValueKind::Uuid,
        ValueKind::Int,
        ValueKind::Int,
        ValueKind::Int,
        ValueKind::Int,
        ValueKind::Int,
        ValueKind::Int,
        ValueKind::Int,
        ValueKind::Bool,
        ValueKind::Float,
        ValueKind::Float,
        ValueKind::Text,
        ValueKind::Bytes,
        ValueKind::Timestamp,
        ValueKind::Date,
    ]);
    assert_eq!(Sample::schema().generated_fields().count(), 2);
}
