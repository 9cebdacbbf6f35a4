use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::category::CategoryId;

#[derive(Debug, Clone, Default)]
pub struct WebContent {
    pub title: Option<String>,
    pub site_name: Option<String>,
    pub content: Option<String>,
}

pub type CategoryMap = BTreeMap<CategoryId, bool>;

/// User-facing filter settings as persisted in the settings store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_filter_active")]
    pub filter_active: bool,
    #[serde(
        default = "default_categories",
        deserialize_with = "deserialize_categories"
    )]
    pub categories: CategoryMap,
    #[serde(default)]
    pub custom_sites: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            filter_active: default_filter_active(),
            categories: default_categories(),
            custom_sites: Vec::new(),
        }
    }
}

impl Settings {
    /// A category missing from the map counts as disabled.
    pub fn is_category_enabled(&self, category: CategoryId) -> bool {
        self.categories.get(&category).copied().unwrap_or(false)
    }
}

fn default_filter_active() -> bool {
    true
}

pub fn default_categories() -> CategoryMap {
    CategoryId::TABLE_ORDER.iter().map(|c| (*c, true)).collect()
}

/// Unknown category keys are dropped rather than failing the whole document.
pub(crate) fn deserialize_categories<'de, D>(deserializer: D) -> Result<CategoryMap, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, bool>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(key, enabled)| {
            key.parse::<CategoryId>()
                .ok()
                .filter(|c| c.is_toggleable())
                .map(|c| (c, enabled))
        })
        .collect())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub blocked: u64,
    #[serde(default)]
    pub allowed: u64,
}

impl Stats {
    pub fn record(&mut self, is_educational: bool) {
        if is_educational {
            self.allowed = self.allowed.saturating_add(1);
        } else {
            self.blocked = self.blocked.saturating_add(1);
        }
    }
}

/// Result of one classification pass over a page or element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub is_educational: bool,
    pub category: Option<CategoryId>,
}

impl Verdict {
    pub fn educational(category: CategoryId) -> Self {
        Self {
            is_educational: true,
            category: Some(category),
        }
    }

    pub fn non_educational() -> Self {
        Self {
            is_educational: false,
            category: None,
        }
    }
}
