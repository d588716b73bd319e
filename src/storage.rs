use crate::errors::AppError;
use crate::habits::HabitTracker;
use crate::journal::Journal;
use crate::models::AppData;
use crate::mood::MoodStore;
use serde::{Serialize, de::DeserializeOwned};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, error};

pub const MOOD_RECORD: &str = "mood_entries";
pub const JOURNAL_RECORD: &str = "journal_entries";
pub const HABITS_RECORD: &str = "habits";

/// Decodes a persisted record, falling back to the empty collection when the
/// bytes are not valid JSON of the expected shape.
pub fn parse_or_default<T: DeserializeOwned + Default>(record: &str, raw: &[u8]) -> T {
    match serde_json::from_slice(raw) {
        Ok(value) => value,
        Err(err) => {
            error!("failed to parse {record} record, starting empty: {err}");
            T::default()
        }
    }
}

pub fn record_path(data_dir: &Path, record: &str) -> PathBuf {
    data_dir.join(format!("{record}.json"))
}

pub async fn load_record<T: DeserializeOwned + Default>(data_dir: &Path, record: &str) -> T {
    let path = record_path(data_dir, record);
    match fs::read(&path).await {
        Ok(bytes) => parse_or_default(record, &bytes),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => T::default(),
        Err(err) => {
            error!("failed to read {}: {err}", path.display());
            T::default()
        }
    }
}

/// Writes next to the target and renames over it, so readers only ever see a
/// complete record.
pub async fn persist_record<T: Serialize>(
    data_dir: &Path,
    record: &str,
    value: &T,
) -> Result<(), AppError> {
    let path = record_path(data_dir, record);
    let tmp = data_dir.join(format!("{record}.json.tmp"));
    let payload = serde_json::to_vec_pretty(value).map_err(AppError::internal)?;
    fs::write(&tmp, payload).await?;
    fs::rename(&tmp, &path).await?;
    debug!("persisted {}", path.display());
    Ok(())
}

pub async fn load_data(data_dir: &Path) -> AppData {
    AppData {
        moods: load_record::<MoodStore>(data_dir, MOOD_RECORD).await,
        journal: load_record::<Journal>(data_dir, JOURNAL_RECORD).await,
        habits: load_record::<HabitTracker>(data_dir, HABITS_RECORD).await,
    }
}

/// Persists the records of `after` that differ from `before`.
pub async fn persist_changes(
    data_dir: &Path,
    before: &AppData,
    after: &AppData,
) -> Result<(), AppError> {
    if before.moods != after.moods {
        persist_record(data_dir, MOOD_RECORD, &after.moods).await?;
    }
    if before.journal != after.journal {
        persist_record(data_dir, JOURNAL_RECORD, &after.journal).await?;
    }
    if before.habits != after.habits {
        persist_record(data_dir, HABITS_RECORD, &after.habits).await?;
    }
    Ok(())
}
