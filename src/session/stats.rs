use std::sync::Arc;

use crate::{
    domain::{OutboundEvent, Stats},
    infrastructure::notifier::Notifier,
    store::SettingsStore,
};

/// Counts blocked/allowed passes in the shared store.
///
/// Each update is a plain load, increment, save. Two tabs updating at once
/// can lose an increment; that is accepted.
#[derive(Clone)]
pub struct StatsRecorder {
    store: Arc<dyn SettingsStore>,
    notifier: Notifier,
}

impl StatsRecorder {
    pub fn new(store: Arc<dyn SettingsStore>, notifier: Notifier) -> Self {
        Self { store, notifier }
    }

    pub async fn record(&self, is_educational: bool) -> Option<Stats> {
        let mut stats = match self.store.load_stats().await {
            Ok(stats) => stats,
            Err(err) => {
                tracing::warn!(target: "stats", error = %err, "failed to read stats");
                return None;
            }
        };
        stats.record(is_educational);
        self.publish(stats).await
    }

    pub async fn reset(&self) -> Option<Stats> {
        self.publish(Stats::default()).await
    }

    async fn publish(&self, stats: Stats) -> Option<Stats> {
        if let Err(err) = self.store.save_stats(&stats).await {
            tracing::warn!(target: "stats", error = %err, "failed to write stats");
            return None;
        }
        self.notifier.send(OutboundEvent::UpdateStats { stats });
        Some(stats)
    }
}
