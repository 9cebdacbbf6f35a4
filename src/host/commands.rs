use serde::Deserialize;

use crate::domain::{
    types::{deserialize_categories, CategoryMap},
    InboundMessage, Settings,
};

/// One line of host input.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum HostCommand {
    Load {
        url: String,
    },
    Navigate {
        url: String,
    },
    ToggleFilter {
        enabled: bool,
    },
    UpdateCategories {
        #[serde(deserialize_with = "deserialize_categories")]
        categories: CategoryMap,
    },
    UpdateCustomSites {
        #[serde(rename = "customSites")]
        custom_sites: Vec<String>,
    },
    UpdateSettings {
        settings: Settings,
    },
    AddCustomSite {
        domain: String,
    },
    RemoveCustomSite {
        domain: String,
    },
    ResetStats,
    DisableSession,
    /// Ask for the current rendered page.
    Snapshot,
}

/// Blank lines are `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<HostCommand>, serde_json::Error> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(line).map(Some)
}

impl HostCommand {
    /// The settings message a direct settings command forwards to the page.
    pub fn as_message(&self) -> Option<InboundMessage> {
        match self {
            HostCommand::ToggleFilter { enabled } => {
                Some(InboundMessage::ToggleFilter { enabled: *enabled })
            }
            HostCommand::UpdateCategories { categories } => Some(InboundMessage::UpdateCategories {
                categories: categories.clone(),
            }),
            HostCommand::UpdateCustomSites { custom_sites } => {
                Some(InboundMessage::UpdateCustomSites {
                    custom_sites: custom_sites.clone(),
                })
            }
            HostCommand::UpdateSettings { settings } => Some(InboundMessage::UpdateSettings {
                settings: settings.clone(),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_host_only_actions() {
        assert_eq!(
            parse_line(r#"{"action":"load","url":"https://example.org"}"#).unwrap(),
            Some(HostCommand::Load {
                url: "https://example.org".into()
            })
        );
        assert_eq!(
            parse_line(r#"{"action":"resetStats"}"#).unwrap(),
            Some(HostCommand::ResetStats)
        );
        assert_eq!(
            parse_line(r#" {"action":"addCustomSite","domain":"a.org"} "#).unwrap(),
            Some(HostCommand::AddCustomSite {
                domain: "a.org".into()
            })
        );
        assert_eq!(
            parse_line(r#"{"action":"snapshot"}"#).unwrap(),
            Some(HostCommand::Snapshot)
        );
        assert_eq!(parse_line("   ").unwrap(), None);
    }

    #[test]
    fn rejects_unknown_actions() {
        assert!(parse_line(r#"{"action":"explode"}"#).is_err());
        assert!(parse_line("not json").is_err());
    }

    #[test]
    fn settings_commands_forward_as_messages() {
        let cmd = parse_line(r#"{"action":"toggleFilter","enabled":true}"#)
            .unwrap()
            .unwrap();
        assert_eq!(
            cmd.as_message(),
            Some(InboundMessage::ToggleFilter { enabled: true })
        );

        let cmd = parse_line(r#"{"action":"updateSettings","settings":{}}"#)
            .unwrap()
            .unwrap();
        assert_eq!(
            cmd.as_message(),
            Some(InboundMessage::UpdateSettings {
                settings: Settings::default()
            })
        );
        assert_eq!(HostCommand::DisableSession.as_message(), None);
    }
}
