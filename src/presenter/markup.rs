use super::dom::{Injection, Slot};

pub const OVERLAY_ID: &str = "educational-filter-overlay";
pub const OVERLAY_STYLES_ID: &str = "educational-filter-styles";
pub const DISABLE_BUTTON_ID: &str = "educational-filter-disable";
pub const NOTICE_ID: &str = "educational-focus-notice";
pub const FOCUS_STYLES_ID: &str = "educational-focus-styles";
pub const HIGHLIGHT_CLASS: &str = "educational-focus-highlight";
pub const DIM_CLASS: &str = "educational-focus-dim";

pub struct Suggestion {
    pub name: &'static str,
    pub url: &'static str,
    pub blurb: &'static str,
}

pub const SUGGESTIONS: &[Suggestion] = &[
    Suggestion {
        name: "Khan Academy",
        url: "https://khanacademy.org",
        blurb: "Free online courses",
    },
    Suggestion {
        name: "Coursera",
        url: "https://coursera.org",
        blurb: "University courses online",
    },
    Suggestion {
        name: "Stack Overflow",
        url: "https://stackoverflow.com",
        blurb: "Programming help",
    },
    Suggestion {
        name: "Wikipedia",
        url: "https://wikipedia.org",
        blurb: "Encyclopedia",
    },
];

const OVERLAY_CSS: &str = r#"
#educational-filter-overlay {
    position: fixed; top: 0; left: 0; width: 100%; height: 100%;
    background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
    z-index: 999999; display: flex; align-items: center; justify-content: center;
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
}
.educational-filter-content {
    background: white; padding: 40px; border-radius: 20px; text-align: center;
    max-width: 500px; box-shadow: 0 20px 60px rgba(0, 0, 0, 0.2);
}
.educational-filter-suggestions {
    background: #f8f9fa; padding: 20px; border-radius: 10px; margin: 20px 0; text-align: left;
}
.educational-filter-suggestions ul { list-style: none; padding: 0; }
.educational-filter-suggestions a { color: #667eea; text-decoration: none; font-weight: 500; }
.educational-filter-btn {
    background: #667eea; color: white; border: none; padding: 12px 24px;
    border-radius: 8px; cursor: pointer; font-size: 16px;
}
"#;

const FOCUS_CSS: &str = r#"
.educational-focus-highlight { outline: 2px solid #48bb78; background: rgba(72, 187, 120, 0.08); }
.educational-focus-dim { opacity: 0.25; filter: grayscale(80%); }
#educational-focus-notice {
    position: fixed; bottom: 20px; right: 20px; z-index: 999999; max-width: 320px;
    background: #2d3748; color: white; padding: 14px 18px; border-radius: 10px;
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
}
"#;

pub fn overlay_styles() -> Injection {
    Injection {
        id: OVERLAY_STYLES_ID,
        slot: Slot::Head,
        markup: format!("<style id=\"{OVERLAY_STYLES_ID}\">{OVERLAY_CSS}</style>"),
    }
}

pub fn focus_styles() -> Injection {
    Injection {
        id: FOCUS_STYLES_ID,
        slot: Slot::Head,
        markup: format!("<style id=\"{FOCUS_STYLES_ID}\">{FOCUS_CSS}</style>"),
    }
}

pub fn block_overlay(blocked_host: &str) -> Injection {
    let items: String = SUGGESTIONS
        .iter()
        .map(|s| {
            format!(
                "<li><a href=\"{}\" target=\"_blank\">{} - {}</a></li>",
                escape_html(s.url),
                escape_html(s.name),
                escape_html(s.blurb)
            )
        })
        .collect();

    let markup = format!(
        "<div id=\"{OVERLAY_ID}\">\
         <div class=\"educational-filter-content\">\
         <div class=\"educational-filter-icon\">🎓</div>\
         <h2>Educational Content Only</h2>\
         <p>{host} has been filtered as it doesn't appear to contain educational content.</p>\
         <p>Focus on learning with educational websites, courses, documentation, and research materials.</p>\
         <div class=\"educational-filter-suggestions\">\
         <h3>Try these educational sites instead:</h3><ul>{items}</ul></div>\
         <button id=\"{DISABLE_BUTTON_ID}\" class=\"educational-filter-btn\">\
         Disable Filter for This Session</button>\
         </div></div>",
        host = escape_html(if blocked_host.is_empty() {
            "This site"
        } else {
            blocked_host
        }),
    );

    Injection {
        id: OVERLAY_ID,
        slot: Slot::Body,
        markup,
    }
}

pub fn focus_notice() -> Injection {
    Injection {
        id: NOTICE_ID,
        slot: Slot::Body,
        markup: format!(
            "<div id=\"{NOTICE_ID}\">\
             <strong>Focus mode</strong>\
             <p>No educational content was found on this page.</p>\
             <button id=\"{DISABLE_BUTTON_ID}\" class=\"educational-filter-btn\">\
             Disable Filter for This Session</button></div>"
        ),
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
