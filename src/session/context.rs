use crate::domain::{sites, InboundMessage, Settings};

/// Settings snapshot plus the in-memory "disabled for this session" flag.
///
/// Refreshed explicitly from the store on page ready and from each inbound
/// settings message; nothing else mutates it.
#[derive(Debug, Clone, Default)]
pub struct FilterContext {
    pub settings: Settings,
    pub session_disabled: bool,
}

impl FilterContext {
    pub fn filtering_enabled(&self) -> bool {
        self.settings.filter_active && !self.session_disabled
    }

    pub fn apply(&mut self, message: &InboundMessage) {
        match message {
            InboundMessage::ToggleFilter { enabled } => self.settings.filter_active = *enabled,
            InboundMessage::UpdateCategories { categories } => {
                self.settings.categories = categories.clone();
            }
            InboundMessage::UpdateCustomSites { custom_sites } => {
                self.settings.custom_sites = sites::normalize_sites(custom_sites);
            }
            InboundMessage::UpdateSettings { settings } => {
                self.settings = settings.clone();
                self.settings.custom_sites = sites::normalize_sites(&settings.custom_sites);
            }
        }
    }
}
