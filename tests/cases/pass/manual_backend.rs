// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use std::sync::Mutex;

use record_dao::prelude::*;

#[derive(Debug, Clone, PartialEq, Record)]
pub struct Note {
    #[id(generated)]
    pub id: Option<i64>,
    pub body: String,
}

#[derive(Default)]
struct Notes(Mutex<Vec<Note>>);

impl Backend<Note> for Notes {
    fn fetch(&self, key: &i64) -> record_dao::Result<Option<Note>> {
        let notes = self.0.lock().map_err(|e| DaoError::invalid(e.to_string()))?;
        Ok(notes.iter().find(|n| n.id == Some(*key)).cloned())
    }

    fn fetch_all(&self) -> record_dao::Result<Vec<Note>> {
        let notes = self.0.lock().map_err(|e| DaoError::invalid(e.to_string()))?;
        Ok(notes.clone())
    }

    fn store(&self, record: Note) -> record_dao::Result<Option<Note>> {
        let mut notes = self.0.lock().map_err(|e| DaoError::invalid(e.to_string()))?;
        notes.retain(|n| n.id != record.id);
        notes.push(record.clone());
        Ok(Some(record))
    }

    fn remove(&self, key: &i64) -> record_dao::Result<()> {
        let mut notes = self.0.lock().map_err(|e| DaoError::invalid(e.to_string()))?;
        notes.retain(|n| n.id != Some(*key));
        Ok(())
    }

    fn select(&self, filter: &Filter) -> record_dao::Result<Vec<Note>> {
        Ok(self.fetch_all()?.into_iter().filter(|n| filter.matches(n)).collect())
    }
}

fn main() {
    let mut dao = Dao::new(Notes::default());
    dao.use_sequence_for(ValueKind::Int);

    let saved = dao
        .save(&Note { id: None, body: "hello".into() })
        .expect("save")
        .expect("confirmed");
    assert_eq!(saved.id, Some(1));
    assert_eq!(dao.get(&1).expect("get"), Some(saved));
    assert!(dao.start_transaction().expect("begin").is_none());
}
