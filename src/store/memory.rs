use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{SettingsStore, StoreError};
use crate::domain::{Settings, Stats};

/// In-process store with switchable failures, for session tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    settings: Mutex<Settings>,
    stats: Mutex<Stats>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    malformed: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: Settings) -> Self {
        let store = Self::default();
        *store.settings.lock() = settings;
        store
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Settings reads report a corrupt document instead of an I/O failure.
    pub fn set_malformed(&self, malformed: bool) {
        self.malformed.store(malformed, Ordering::SeqCst);
    }

    pub fn settings(&self) -> Settings {
        self.settings.lock().clone()
    }

    pub fn stats(&self) -> Stats {
        *self.stats.lock()
    }

    fn check(&self, flag: &AtomicBool, op: &str) -> Result<(), StoreError> {
        if flag.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable(format!("{op} disabled")))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn load_settings(&self) -> Result<Settings, StoreError> {
        self.check(&self.fail_reads, "read")?;
        if self.malformed.load(Ordering::SeqCst) {
            return Err(StoreError::Malformed("expected value at line 1".into()));
        }
        Ok(self.settings.lock().clone())
    }

    async fn save_settings(&self, settings: &Settings) -> Result<(), StoreError> {
        self.check(&self.fail_writes, "write")?;
        *self.settings.lock() = settings.clone();
        Ok(())
    }

    async fn load_stats(&self) -> Result<Stats, StoreError> {
        self.check(&self.fail_reads, "read")?;
        Ok(*self.stats.lock())
    }

    async fn save_stats(&self, stats: &Stats) -> Result<(), StoreError> {
        self.check(&self.fail_writes, "write")?;
        *self.stats.lock() = *stats;
        Ok(())
    }
}
