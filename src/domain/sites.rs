use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static DOMAIN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)*[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?$",
    )
    .expect("valid domain regex")
});

const MAX_DOMAIN_LEN: usize = 253;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CustomSiteError {
    #[error("domain is empty")]
    Empty,
    #[error("not a valid domain: {0}")]
    Invalid(String),
    #[error("domain already listed: {0}")]
    Duplicate(String),
}

pub fn normalize_site(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Normalises a user-entered domain and checks it looks like a host name.
pub fn validate_site(raw: &str) -> Result<String, CustomSiteError> {
    let domain = normalize_site(raw);
    if domain.is_empty() {
        return Err(CustomSiteError::Empty);
    }
    if domain.len() > MAX_DOMAIN_LEN || !DOMAIN_REGEX.is_match(&domain) {
        return Err(CustomSiteError::Invalid(domain));
    }
    Ok(domain)
}

/// Trims, lowercases and deduplicates while keeping first-seen order.
pub fn normalize_sites<I, S>(sites: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for site in sites {
        let site = normalize_site(site.as_ref());
        if !site.is_empty() && !out.contains(&site) {
            out.push(site);
        }
    }
    out
}

pub fn add_site(sites: &mut Vec<String>, raw: &str) -> Result<String, CustomSiteError> {
    let domain = validate_site(raw)?;
    if sites.contains(&domain) {
        return Err(CustomSiteError::Duplicate(domain));
    }
    sites.push(domain.clone());
    Ok(domain)
}

pub fn remove_site(sites: &mut Vec<String>, raw: &str) -> bool {
    let domain = normalize_site(raw);
    let before = sites.len();
    sites.retain(|site| site != &domain);
    sites.len() != before
}
