use crate::errors::AppError;
use crate::models::AppData;
use crate::storage::persist_changes;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_dir: PathBuf,
    pub data: Arc<Mutex<AppData>>,
}

impl AppState {
    pub fn new(data_dir: PathBuf, data: AppData) -> Self {
        Self {
            data_dir,
            data: Arc::new(Mutex::new(data)),
        }
    }

    /// Applies `apply` to a copy of the data and swaps it in only once every
    /// changed record is on disk. On any error the shared data is untouched.
    pub async fn update<T, F>(&self, apply: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut AppData) -> Result<T, AppError>,
    {
        let mut data = self.data.lock().await;
        let mut next = data.clone();
        let value = apply(&mut next)?;
        persist_changes(&self.data_dir, &data, &next).await?;
        *data = next;
        Ok(value)
    }
}
