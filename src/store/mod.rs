//! Persistent key-value store for settings and counters.
//!
//! Every write replaces the full value of a key. Nothing here serialises a
//! read-modify-write cycle: two writers racing on the same key keep whichever
//! write lands last.

mod file;
#[cfg(test)]
mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Settings, Stats};

pub use file::JsonFileStore;
#[cfg(test)]
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("settings store unavailable: {0}")]
    Unavailable(String),
    #[error("settings document is malformed: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn load_settings(&self) -> Result<Settings, StoreError>;
    async fn save_settings(&self, settings: &Settings) -> Result<(), StoreError>;
    async fn load_stats(&self) -> Result<Stats, StoreError>;
    async fn save_stats(&self, stats: &Stats) -> Result<(), StoreError>;
}
