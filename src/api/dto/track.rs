//! DTO for anonymous analytics events.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Page event reported by the browser script.
///
/// Every field is optional; unknown fields are ignored.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TrackEvent {
    pub path: String,
    pub user_agent: String,
    pub timestamp: String,
    pub event: String,
    pub query: String,
    pub referrer: String,
    pub accept_language: String,
    pub timezone: String,
    /// Free-form, usually `{"w": .., "h": ..}`.
    pub screen: Value,
    pub viewport: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_event_deserializes() {
        let event: TrackEvent =
            serde_json::from_str(r#"{"event": "share_click", "path": "/Ana", "screen": {"w": 390, "h": 844}, "extra": 1}"#)
                .unwrap();

        assert_eq!(event.event, "share_click");
        assert_eq!(event.path, "/Ana");
        assert_eq!(event.screen["w"], 390);
        assert!(event.viewport.is_null());
    }
}
