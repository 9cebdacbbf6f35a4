use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;
use tracing::warn;

use crate::domain::{CategoryId, Settings};

static DOMAIN_TABLES: Lazy<Vec<(CategoryId, AhoCorasick)>> = Lazy::new(|| {
    CategoryId::TABLE_ORDER
        .iter()
        .filter_map(|category| {
            match AhoCorasick::builder()
                .ascii_case_insensitive(true)
                .build(category.domain_fragments())
            {
                Ok(ac) => Some((*category, ac)),
                Err(err) => {
                    warn!(
                        target: "classifier",
                        category = %category,
                        error = %err,
                        "failed to compile domain table"
                    );
                    None
                }
            }
        })
        .collect()
});

/// First enabled category whose table hits the host or the full URL.
pub fn match_domain_table(domain: &str, url: &str, settings: &Settings) -> Option<CategoryId> {
    DOMAIN_TABLES
        .iter()
        .filter(|(category, _)| settings.is_category_enabled(*category))
        .find(|(_, table)| table.is_match(domain) || table.is_match(url))
        .map(|(category, _)| *category)
}

/// Custom sites match by case-insensitive containment in the host.
pub fn match_custom_site(domain: &str, custom_sites: &[String]) -> Option<String> {
    let domain = domain.to_lowercase();
    custom_sites
        .iter()
        .map(|site| site.trim().to_lowercase())
        .find(|site| !site.is_empty() && domain.contains(site.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_decides_shared_fragments() {
        let settings = Settings::default();
        assert_eq!(
            match_domain_table("www.nature.com", "https://www.nature.com/", &settings),
            Some(CategoryId::Academic)
        );
    }

    #[test]
    fn url_path_fragments_match() {
        let settings = Settings::default();
        assert_eq!(
            match_domain_table("www.bbc.com", "https://www.bbc.com/future/article", &settings),
            Some(CategoryId::NewsEducational)
        );
        assert_eq!(
            match_domain_table("www.bbc.com", "https://www.bbc.com/sport", &settings),
            None
        );
    }

    #[test]
    fn custom_sites_ignore_case_and_blanks() {
        let sites = vec!["  ".to_string(), "Example.ORG".to_string()];
        assert_eq!(
            match_custom_site("learn.example.org", &sites),
            Some("example.org".to_string())
        );
        assert_eq!(match_custom_site("other.net", &sites), None);
    }
}
