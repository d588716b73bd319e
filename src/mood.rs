//! Date-keyed mood entries.
//!
//! One entry per calendar date. Saving for a date that already has an entry
//! replaces it wholesale.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

const MOOD_ANCHORS: [(i32, &str); 5] = [
    (0, "Distressed"),
    (25, "Troubled"),
    (50, "Neutral"),
    (75, "Good"),
    (100, "Excellent"),
];

pub const EMOTIONS: [&str; 21] = [
    "annoyed",
    "anxious",
    "fearful",
    "depressed",
    "sad",
    "lonely",
    "guilty",
    "shame",
    "angry",
    "tired",
    "bored",
    "calm",
    "unmotivated",
    "relaxed",
    "productive",
    "content",
    "grateful",
    "confident",
    "proud",
    "love",
    "happy",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub date: NaiveDate,
    pub value: i32,
    pub label: String,
    pub comment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotions: Option<BTreeSet<String>>,
}

/// Mood entries keyed by the day they describe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<NaiveDate, MoodEntry>",
    into = "BTreeMap<NaiveDate, MoodEntry>"
)]
pub struct MoodStore {
    entries: BTreeMap<NaiveDate, MoodEntry>,
}

/// Re-keys loaded entries by their own `date`. An entry stored under its own
/// date wins over one that was filed under a different key.
impl From<BTreeMap<NaiveDate, MoodEntry>> for MoodStore {
    fn from(raw: BTreeMap<NaiveDate, MoodEntry>) -> Self {
        let (matched, misfiled): (Vec<_>, Vec<_>) =
            raw.into_iter().partition(|(key, entry)| *key == entry.date);

        let mut entries = BTreeMap::new();
        for (_, entry) in matched {
            entries.insert(entry.date, entry);
        }
        for (key, entry) in misfiled {
            warn!(key = %key, date = %entry.date, "mood entry filed under the wrong date");
            entries.entry(entry.date).or_insert(entry);
        }
        Self { entries }
    }
}

impl From<MoodStore> for BTreeMap<NaiveDate, MoodEntry> {
    fn from(store: MoodStore) -> Self {
        store.entries
    }
}

impl MoodStore {
    pub fn save_mood_entry(
        &mut self,
        value: i32,
        label: impl Into<String>,
        comment: impl Into<String>,
        emotions: Option<BTreeSet<String>>,
    ) -> MoodEntry {
        self.save_mood_entry_on(Local::now().date_naive(), value, label, comment, emotions)
    }

    /// Values outside 0..=100 are stored untouched.
    pub fn save_mood_entry_on(
        &mut self,
        today: NaiveDate,
        value: i32,
        label: impl Into<String>,
        comment: impl Into<String>,
        emotions: Option<BTreeSet<String>>,
    ) -> MoodEntry {
        let entry = MoodEntry {
            date: today,
            value,
            label: label.into(),
            comment: comment.into(),
            emotions,
        };
        self.entries.insert(today, entry.clone());
        entry
    }

    pub fn todays_mood_entry(&self) -> Option<MoodEntry> {
        self.todays_mood_entry_on(Local::now().date_naive())
    }

    pub fn todays_mood_entry_on(&self, today: NaiveDate) -> Option<MoodEntry> {
        self.mood_entry_by_date(today)
    }

    pub fn all_mood_entries(&self) -> Vec<MoodEntry> {
        self.entries.values().cloned().collect()
    }

    pub fn mood_entry_by_date(&self, date: NaiveDate) -> Option<MoodEntry> {
        self.entries.get(&date).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Nearest slider anchor for a mood score. Ties resolve to the lower anchor.
pub fn mood_label(value: i32) -> &'static str {
    let mut best = MOOD_ANCHORS[0];
    for anchor in MOOD_ANCHORS.iter().skip(1) {
        if (anchor.0 - value).abs() < (best.0 - value).abs() {
            best = *anchor;
        }
    }
    best.1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::parse_or_default;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    fn tags(items: &[&str]) -> Option<BTreeSet<String>> {
        Some(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn second_save_for_same_day_replaces_first() {
        let mut store = MoodStore::default();
        store.save_mood_entry_on(day(4), 20, "Troubled", "rough morning", tags(&["tired"]));
        store.save_mood_entry_on(day(4), 80, "Good", "", None);

        let entry = store.mood_entry_by_date(day(4)).unwrap();
        assert_eq!(entry.value, 80);
        assert_eq!(entry.label, "Good");
        assert_eq!(entry.comment, "");
        assert_eq!(entry.emotions, None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn saved_entry_is_todays_entry() {
        let mut store = MoodStore::default();
        let saved = store.save_mood_entry_on(
            day(9),
            64,
            "Good",
            "walked by the river",
            tags(&["calm", "grateful"]),
        );

        assert_eq!(store.todays_mood_entry_on(day(9)), Some(saved.clone()));
        assert_eq!(saved.date, day(9));
        assert_eq!(saved.value, 64);
        assert_eq!(saved.comment, "walked by the river");
        assert_eq!(saved.emotions.unwrap().len(), 2);
        assert_eq!(store.todays_mood_entry_on(day(10)), None);
    }

    #[test]
    fn out_of_range_value_is_kept() {
        let mut store = MoodStore::default();
        store.save_mood_entry_on(day(1), 140, "Excellent", "", None);
        assert_eq!(store.mood_entry_by_date(day(1)).unwrap().value, 140);
    }

    #[test]
    fn entries_listed_in_date_order() {
        let mut store = MoodStore::default();
        store.save_mood_entry_on(day(12), 50, "Neutral", "", None);
        store.save_mood_entry_on(day(2), 10, "Distressed", "", None);
        store.save_mood_entry_on(day(7), 90, "Excellent", "", None);

        let dates: Vec<NaiveDate> = store.all_mood_entries().iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![day(2), day(7), day(12)]);
    }

    #[test]
    fn serializes_as_date_keyed_object() {
        let mut store = MoodStore::default();
        store.save_mood_entry_on(day(5), 75, "Good", "ok", None);

        let json = serde_json::to_value(&store).unwrap();
        let entry = &json["2026-03-05"];
        assert_eq!(entry["value"], 75);
        assert_eq!(entry["date"], "2026-03-05");
        assert!(entry.get("emotions").is_none());

        let back: MoodStore = serde_json::from_value(json).unwrap();
        assert_eq!(back, store);
    }

    #[test]
    fn corrupt_blob_reads_as_no_entries() {
        let store: MoodStore = parse_or_default("mood_entries", b"{not json");
        assert!(store.all_mood_entries().is_empty());

        let store: MoodStore = parse_or_default("mood_entries", br#"["wrong", "shape"]"#);
        assert!(store.is_empty());

        let store: MoodStore =
            parse_or_default("mood_entries", br#"{"2026-03-01": {"value": "high"}}"#);
        assert!(store.is_empty());
    }

    #[test]
    fn duplicate_emotion_tags_collapse() {
        let raw = br#"{"2026-03-03": {"date": "2026-03-03", "value": 30, "label": "Troubled",
            "comment": "", "emotions": ["sad", "sad", "lonely"]}}"#;
        let store: MoodStore = parse_or_default("mood_entries", raw);
        let emotions = store.mood_entry_by_date(day(3)).unwrap().emotions.unwrap();
        assert_eq!(emotions.len(), 2);
    }

    #[test]
    fn loaded_entries_are_keyed_by_their_own_date() {
        let raw = br#"{
            "2026-03-03": {"date": "2026-03-05", "value": 10, "label": "Distressed", "comment": "misfiled"},
            "2026-03-05": {"date": "2026-03-05", "value": 70, "label": "Good", "comment": "home"},
            "2026-03-08": {"date": "2026-03-09", "value": 55, "label": "Neutral", "comment": "moved"}
        }"#;
        let store: MoodStore = parse_or_default("mood_entries", raw);

        assert_eq!(store.mood_entry_by_date(day(3)), None);
        assert_eq!(store.mood_entry_by_date(day(5)).unwrap().comment, "home");
        assert_eq!(store.mood_entry_by_date(day(8)), None);
        assert_eq!(store.mood_entry_by_date(day(9)).unwrap().value, 55);
        assert_eq!(store.len(), 2);
        assert!(store.all_mood_entries().iter().all(|e| e.date == day(5) || e.date == day(9)));
    }

    #[test]
    fn label_snaps_to_nearest_anchor() {
        assert_eq!(mood_label(0), "Distressed");
        assert_eq!(mood_label(12), "Distressed");
        assert_eq!(mood_label(13), "Troubled");
        assert_eq!(mood_label(50), "Neutral");
        assert_eq!(mood_label(70), "Good");
        assert_eq!(mood_label(88), "Excellent");
        assert_eq!(mood_label(-40), "Distressed");
        assert_eq!(mood_label(250), "Excellent");
    }
}
