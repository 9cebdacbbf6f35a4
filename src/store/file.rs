use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    process,
    sync::atomic::{AtomicU64, Ordering},
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;

use super::{SettingsStore, StoreError};
use crate::domain::{Settings, Stats};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreDocument {
    #[serde(flatten)]
    settings: Settings,
    #[serde(default)]
    stats: Stats,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

/// Settings and stats kept in a single JSON document on disk.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_seq: AtomicU64,
}

impl JsonFileStore {
    /// Opens the document, writing defaults if it does not exist yet.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self {
            path: path.into(),
            write_seq: AtomicU64::new(0),
        };
        if fs::metadata(&store.path).await.is_err() {
            store.write_document(StoreDocument::default()).await?;
            tracing::info!(
                target: "store",
                path = %store.path.display(),
                "created settings document with defaults"
            );
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> Result<StoreDocument, StoreError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(StoreDocument::default()),
            Err(err) => return Err(StoreError::Unavailable(err.to_string())),
        };
        if raw.trim().is_empty() {
            return Ok(StoreDocument::default());
        }
        serde_json::from_str(&raw).map_err(|err| StoreError::Malformed(err.to_string()))
    }

    async fn write_document(&self, mut document: StoreDocument) -> Result<(), StoreError> {
        document.updated_at = Some(Utc::now());
        let payload = serde_json::to_vec_pretty(&document)
            .map_err(|err| StoreError::Malformed(err.to_string()))?;

        let seq = self.write_seq.fetch_add(1, Ordering::Relaxed);
        let tmp = self
            .path
            .with_extension(format!("{}.{seq}.tmp", process::id()));
        fs::write(&tmp, payload)
            .await
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;
        if let Err(err) = fs::rename(&tmp, &self.path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(StoreError::Unavailable(err.to_string()));
        }
        Ok(())
    }

    /// A malformed document is replaced wholesale on the next write.
    async fn read_for_update(&self) -> Result<StoreDocument, StoreError> {
        match self.read_document().await {
            Ok(document) => Ok(document),
            Err(StoreError::Malformed(reason)) => {
                tracing::warn!(
                    target: "store",
                    path = %self.path.display(),
                    %reason,
                    "overwriting malformed settings document"
                );
                Ok(StoreDocument::default())
            }
            Err(err) => Err(err),
        }
    }
}

#[async_trait]
impl SettingsStore for JsonFileStore {
    async fn load_settings(&self) -> Result<Settings, StoreError> {
        Ok(self.read_document().await?.settings)
    }

    async fn save_settings(&self, settings: &Settings) -> Result<(), StoreError> {
        let mut document = self.read_for_update().await?;
        document.settings = settings.clone();
        self.write_document(document).await
    }

    async fn load_stats(&self) -> Result<Stats, StoreError> {
        Ok(self.read_document().await?.stats)
    }

    async fn save_stats(&self, stats: &Stats) -> Result<(), StoreError> {
        let mut document = self.read_for_update().await?;
        document.stats = *stats;
        self.write_document(document).await
    }
}
