use serde::{Deserialize, Serialize};

use super::types::{deserialize_categories, CategoryMap, Settings, Stats};
use crate::presenter::OverlayState;

/// Settings messages delivered to a running page session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum InboundMessage {
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
}

/// Events emitted towards the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum OutboundEvent {
    ReportBlocked { url: String },
    ReportAllowed { url: String },
    UpdateStats { stats: Stats },
    OverlayChanged { state: OverlayState },
    PageSnapshot {
        url: String,
        filtering: bool,
        passes: u64,
        overlay: OverlayState,
        html: String,
    },
}

impl OutboundEvent {
    pub fn report(is_educational: bool, url: &str) -> Self {
        let url = url.to_string();
        if is_educational {
            OutboundEvent::ReportAllowed { url }
        } else {
            OutboundEvent::ReportBlocked { url }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CategoryId;

    #[test]
    fn inbound_messages_use_action_tags() {
        let msg: InboundMessage =
            serde_json::from_str(r#"{"action":"toggleFilter","enabled":false}"#).unwrap();
        assert_eq!(msg, InboundMessage::ToggleFilter { enabled: false });

        let msg: InboundMessage = serde_json::from_str(
            r#"{"action":"updateCategories","categories":{"academic":false,"reference":true}}"#,
        )
        .unwrap();
        let InboundMessage::UpdateCategories { categories } = msg else {
            panic!("wrong variant");
        };
        assert_eq!(categories.get(&CategoryId::Academic), Some(&false));

        let msg: InboundMessage = serde_json::from_str(
            r#"{"action":"updateCustomSites","customSites":["a.org"]}"#,
        )
        .unwrap();
        assert_eq!(
            msg,
            InboundMessage::UpdateCustomSites {
                custom_sites: vec!["a.org".into()]
            }
        );
    }

    #[test]
    fn outbound_events_serialize_for_the_host() {
        let json = serde_json::to_value(OutboundEvent::UpdateStats {
            stats: Stats {
                blocked: 6,
                allowed: 2,
            },
        })
        .unwrap();
        assert_eq!(json["action"], "updateStats");
        assert_eq!(json["stats"]["blocked"], 6);

        let json = serde_json::to_value(OutboundEvent::report(false, "https://x.test")).unwrap();
        assert_eq!(json["action"], "reportBlocked");

        let json = serde_json::to_value(OutboundEvent::OverlayChanged {
            state: OverlayState::Blocking,
        })
        .unwrap();
        assert_eq!(json["state"]["kind"], "blocking");
    }
}
