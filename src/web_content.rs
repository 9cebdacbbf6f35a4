use anyhow::{Context, Result};
use dom_smoothie::{Config as ReadabilityConfig, Readability, TextMode};
use reqwest::Client;
use tracing::warn;
use url::Url;

use crate::{config::WebContentConfig, domain::WebContent};

pub struct WebContentFetcher {
    client: Client,
    config: WebContentConfig,
}

impl WebContentFetcher {
    pub fn new(client: Client, config: WebContentConfig) -> Self {
        Self { client, config }
    }

    /// Fetches a page for a fresh session. Any failure yields an empty page
    /// so the session still runs against the URL alone.
    pub async fn load(&self, raw_url: &str) -> WebContent {
        match self.fetch(raw_url).await {
            Ok(Some(content)) => content,
            Ok(None) => WebContent::default(),
            Err(err) => {
                warn!(target: "web", error = %err, url = raw_url, "page fetch failed");
                WebContent::default()
            }
        }
    }

    pub async fn fetch(&self, raw_url: &str) -> Result<Option<WebContent>> {
        let url = match Url::parse(raw_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => url,
            _ => {
                warn!(target: "web", url = raw_url, "unsupported url; skipping fetch");
                return Ok(None);
            }
        };

        let response = self
            .client
            .get(url.clone())
            .timeout(self.config.fetch_timeout)
            .send()
            .await
            .with_context(|| format!("failed to fetch {}", url))?;

        if !response.status().is_success() {
            warn!(target: "web", status = %response.status(), url = %url, "non-success status");
            return Ok(None);
        }

        let body = response.text().await?;
        Ok(self.extract(&body, &url))
    }

    fn extract(&self, html: &str, url: &Url) -> Option<WebContent> {
        let smoothie_cfg = ReadabilityConfig {
            text_mode: TextMode::Formatted,
            ..Default::default()
        };

        let mut readability = match Readability::new(html, Some(url.as_str()), Some(smoothie_cfg)) {
            Ok(reader) => reader,
            Err(err) => {
                warn!(target: "web", error = %err, url = %url, "Readability init failed");
                return None;
            }
        };

        let article = match readability.parse() {
            Ok(article) => article,
            Err(err) => {
                warn!(target: "web", error = %err, url = %url, "Readability parse failed");
                return None;
            }
        };

        let mut text = article.text_content.trim().to_string();
        truncate_on_char_boundary(&mut text, self.config.content_max_length);

        Some(WebContent {
            title: clean_str(Some(article.title)),
            site_name: clean_str(article.site_name),
            content: if text.is_empty() { None } else { Some(text) },
        })
    }
}

fn truncate_on_char_boundary(text: &mut String, max_len: usize) {
    if text.len() <= max_len {
        return;
    }
    let mut cut = max_len;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    text.truncate(cut);
}

fn clean_str(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim().to_string();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn fetcher() -> WebContentFetcher {
        WebContentFetcher::new(
            Client::new(),
            WebContentConfig {
                fetch_timeout: Duration::from_secs(1),
                content_max_length: 64,
            },
        )
    }

    #[test]
    fn truncation_respects_utf8() {
        let mut text = "héllo".to_string();
        truncate_on_char_boundary(&mut text, 2);
        assert_eq!(text, "h");
    }

    #[test]
    fn blank_strings_are_dropped() {
        assert_eq!(clean_str(Some("  ".into())), None);
        assert_eq!(clean_str(Some(" Site ".into())), Some("Site".into()));
    }

    #[tokio::test]
    async fn non_http_urls_load_as_empty_pages() {
        let content = fetcher().load("file:///etc/passwd").await;
        assert!(content.title.is_none());
        assert!(content.content.is_none());
    }
}
