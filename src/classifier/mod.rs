//! Page and element classification.
//!
//! Decision order for a page is fixed: custom site, then the category domain
//! tables, then the keyword score over title and body. The first rule that
//! fires decides.

mod element;
pub mod keywords;
mod tables;

use tracing::debug;
use url::Url;

use crate::{
    config::HeuristicConfig,
    domain::{CategoryId, Settings, Verdict},
};

pub use element::ElementVerdict;
pub use tables::{match_custom_site, match_domain_table};

/// Inputs read from the current page for one pass.
#[derive(Debug, Clone, Default)]
pub struct PageSignals {
    pub url: String,
    pub domain: String,
    pub title: String,
    pub body_text: String,
}

impl PageSignals {
    pub fn new(url: &str, title: &str, body_text: &str) -> Self {
        let domain = Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_default();
        Self {
            url: url.to_string(),
            domain,
            title: title.to_string(),
            body_text: body_text.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Classifier {
    tuning: HeuristicConfig,
}

impl Classifier {
    pub fn new(tuning: HeuristicConfig) -> Self {
        Self { tuning }
    }

    /// Full page-level decision.
    pub fn classify(&self, page: &PageSignals, settings: &Settings) -> Verdict {
        if let Some(verdict) = self.classify_origin(page, settings) {
            return verdict;
        }
        self.classify_content(&page.title, &page.body_text)
    }

    /// Custom-site and domain-table rules only. `None` means neither matched.
    pub fn classify_origin(&self, page: &PageSignals, settings: &Settings) -> Option<Verdict> {
        let domain = page.domain.to_lowercase();
        let url = page.url.to_lowercase();

        if let Some(site) = match_custom_site(&domain, &settings.custom_sites) {
            debug!(target: "classifier", domain = %domain, site = %site, "custom site match");
            return Some(Verdict::educational(CategoryId::Custom));
        }

        match_domain_table(&domain, &url, settings).map(|category| {
            debug!(target: "classifier", domain = %domain, %category, "domain table match");
            Verdict::educational(category)
        })
    }

    pub fn classify_content(&self, title: &str, body_text: &str) -> Verdict {
        let score = self.content_score(title, body_text);
        if score >= self.tuning.page_threshold {
            debug!(target: "classifier", score, "content heuristic match");
            Verdict::educational(CategoryId::ContentBased)
        } else {
            Verdict::non_educational()
        }
    }

    /// Weighted keyword score; title hits weigh `title_weight`, body hits
    /// `body_weight` each.
    pub fn content_score(&self, title: &str, body_text: &str) -> f64 {
        let title_hits =
            keywords::keyword_hits(&title.to_lowercase(), keywords::EDUCATIONAL_KEYWORDS);
        let body_hits =
            keywords::keyword_hits(&body_text.to_lowercase(), keywords::EDUCATIONAL_KEYWORDS);
        title_hits as f64 * self.tuning.title_weight + body_hits as f64 * self.tuning.body_weight
    }
}
