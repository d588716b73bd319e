use crate::errors::TrackerError;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: String,
    pub title: String,
    pub content: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJournalEntry {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub mood: Option<String>,
    pub image_url: Option<String>,
    pub audio_url: Option<String>,
    pub color: Option<String>,
}

impl NewJournalEntry {
    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty() && self.content.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

impl Journal {
    pub fn add(&mut self, new: NewJournalEntry, date: NaiveDate, time: NaiveTime) -> JournalEntry {
        let entry = JournalEntry {
            id: Uuid::new_v4().to_string(),
            title: new.title,
            content: new.content,
            date,
            time,
            mood: new.mood,
            image_url: new.image_url,
            audio_url: new.audio_url,
            color: new.color,
        };
        self.entries.push(entry.clone());
        entry
    }

    pub fn remove(&mut self, id: &str) -> Result<JournalEntry, TrackerError> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.id == id)
            .ok_or_else(|| TrackerError::JournalEntryNotFound(id.to_string()))?;
        Ok(self.entries.remove(index))
    }

    /// Newest first.
    pub fn entries(&self) -> Vec<JournalEntry> {
        let mut entries = self.entries.clone();
        entries.sort_by(|a, b| (b.date, b.time).cmp(&(a.date, a.time)));
        entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
