//! Core type definitions for the beacon pipeline

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum label length in characters; longer labels are truncated
pub const MAX_LABEL_LEN: usize = 100;

/// Sentinel label used when no label source is available
pub const LABEL_UNAVAILABLE: &str = "N/A";

/// Kinds of observable page actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    PageView,
    LinkClick,
    ButtonClick,
    FormSubmit,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PageView => write!(f, "page_view"),
            Self::LinkClick => write!(f, "link_click"),
            Self::ButtonClick => write!(f, "button_click"),
            Self::FormSubmit => write!(f, "form_submit"),
        }
    }
}

impl std::str::FromStr for ActionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "page_view" | "pageview" => Ok(Self::PageView),
            "link_click" | "linkclick" => Ok(Self::LinkClick),
            "button_click" | "buttonclick" => Ok(Self::ButtonClick),
            "form_submit" | "formsubmit" => Ok(Self::FormSubmit),
            _ => Err(format!("Invalid action kind: {}", s)),
        }
    }
}

/// Normalized description of one observed page action
///
/// Immutable once built. Records are fire-and-forget: a record that fails
/// delivery is gone, never buffered or retried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// What happened
    pub action: ActionKind,
    /// Human-readable label, trimmed and bounded to [`MAX_LABEL_LEN`]
    pub label: String,
    /// Document path the action occurred on
    pub pathname: String,
    /// Capture time (at normalization, not at dispatch)
    pub timestamp: DateTime<Utc>,
}

/// JSON body POSTed to the collection endpoint
///
/// The event record's fields plus the session identity it is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirePayload {
    pub session_id: String,
    pub action: ActionKind,
    pub label: String,
    pub pathname: String,
    pub timestamp: DateTime<Utc>,
}

impl WirePayload {
    pub fn new(session_id: impl Into<String>, record: EventRecord) -> Self {
        Self {
            session_id: session_id.into(),
            action: record.action,
            label: record.label,
            pathname: record.pathname,
            timestamp: record.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_action_kind_roundtrip() {
        for kind in [
            ActionKind::PageView,
            ActionKind::LinkClick,
            ActionKind::ButtonClick,
            ActionKind::FormSubmit,
        ] {
            let parsed = ActionKind::from_str(&kind.to_string()).unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_action_kind_invalid() {
        assert!(ActionKind::from_str("scroll").is_err());
    }

    #[test]
    fn test_wire_payload_shape() {
        let record = EventRecord {
            action: ActionKind::LinkClick,
            label: "Buy Now".to_string(),
            pathname: "/".to_string(),
            timestamp: Utc::now(),
        };
        let payload = WirePayload::new("abc123", record);
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["session_id"], "abc123");
        assert_eq!(json["action"], "link_click");
        assert_eq!(json["label"], "Buy Now");
        assert_eq!(json["pathname"], "/");
        // chrono serializes DateTime<Utc> as RFC 3339 / ISO-8601
        assert!(json["timestamp"].as_str().unwrap().contains('T'));
    }
}
