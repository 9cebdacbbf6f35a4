use std::sync::Arc;

use crate::{
    domain::{sites, CustomSiteError, InboundMessage, Settings},
    session::StatsRecorder,
    store::SettingsStore,
};

/// Applies user settings edits to the store and says what to forward to the
/// page.
///
/// The store write and the page message are independent: a failed write is
/// logged and the running page still gets the new value.
pub struct SettingsControl {
    store: Arc<dyn SettingsStore>,
    stats: StatsRecorder,
}

impl SettingsControl {
    pub fn new(store: Arc<dyn SettingsStore>, stats: StatsRecorder) -> Self {
        Self { store, stats }
    }

    pub async fn apply(&self, message: &InboundMessage) {
        let mut settings = self.current().await;
        match message {
            InboundMessage::ToggleFilter { enabled } => settings.filter_active = *enabled,
            InboundMessage::UpdateCategories { categories } => {
                settings.categories = categories.clone();
            }
            InboundMessage::UpdateCustomSites { custom_sites } => {
                settings.custom_sites = sites::normalize_sites(custom_sites);
            }
            InboundMessage::UpdateSettings { settings: incoming } => {
                settings = incoming.clone();
                settings.custom_sites = sites::normalize_sites(&incoming.custom_sites);
            }
        }
        self.persist(&settings).await;
    }

    pub async fn add_custom_site(&self, domain: &str) -> Result<InboundMessage, CustomSiteError> {
        let mut settings = self.current().await;
        let added = sites::add_site(&mut settings.custom_sites, domain)?;
        tracing::info!(target: "store", domain = %added, "custom site added");
        self.persist(&settings).await;
        Ok(InboundMessage::UpdateCustomSites {
            custom_sites: settings.custom_sites,
        })
    }

    /// `None` when the domain was not listed.
    pub async fn remove_custom_site(&self, domain: &str) -> Option<InboundMessage> {
        let mut settings = self.current().await;
        if !sites::remove_site(&mut settings.custom_sites, domain) {
            return None;
        }
        tracing::info!(
            target: "store",
            domain = %sites::normalize_site(domain),
            "custom site removed"
        );
        self.persist(&settings).await;
        Some(InboundMessage::UpdateCustomSites {
            custom_sites: settings.custom_sites,
        })
    }

    pub async fn reset_stats(&self) {
        self.stats.reset().await;
    }

    async fn current(&self) -> Settings {
        match self.store.load_settings().await {
            Ok(settings) => settings,
            Err(err) => {
                tracing::warn!(
                    target: "store",
                    error = %err,
                    "settings read failed; editing defaults"
                );
                Settings::default()
            }
        }
    }

    async fn persist(&self, settings: &Settings) {
        if let Err(err) = self.store.save_settings(settings).await {
            tracing::warn!(target: "store", error = %err, "failed to save settings");
        }
    }
}
