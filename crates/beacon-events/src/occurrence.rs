//! Occurrence descriptors
//!
//! Minimal descriptions of what happened on the page, supplied by the
//! embedder (or replayed from a capture file). The pipeline never touches a
//! live DOM; these carry exactly the fields the label policy needs.

use serde::{Deserialize, Serialize};

/// One observable page occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occurrence {
    /// A click somewhere on the page
    Click { target: ClickTarget },
    /// A form submission
    Submit { form_id: Option<String> },
    /// One of the overlapping page-view trigger sources fired
    View { trigger: ViewTrigger },
    /// A back/forward (history) navigation; `pathname` is the path the
    /// page settles on, when known
    Navigation { pathname: Option<String> },
}

/// The element a click landed on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickTarget {
    /// Element tag name, lowercase ("button", "a", "div", ...)
    pub tag: String,
    /// Visible text content, if any
    #[serde(default)]
    pub text: Option<String>,
    /// Link target, for anchors
    #[serde(default)]
    pub href: Option<String>,
}

impl ClickTarget {
    pub fn button(text: impl Into<String>) -> Self {
        Self {
            tag: "button".to_string(),
            text: Some(text.into()),
            href: None,
        }
    }

    pub fn anchor(text: Option<String>, href: Option<String>) -> Self {
        Self {
            tag: "a".to_string(),
            text,
            href,
        }
    }
}

/// The overlapping lifecycle signals that can announce a page view
///
/// Several of these routinely fire for the same logical view; the gate
/// collapses them to one emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewTrigger {
    DomReady,
    WindowLoad,
    SectionLoad,
    PageLoaded,
    TimeoutFallback,
}

impl std::fmt::Display for ViewTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomReady => write!(f, "dom_ready"),
            Self::WindowLoad => write!(f, "window_load"),
            Self::SectionLoad => write!(f, "section_load"),
            Self::PageLoaded => write!(f, "page_loaded"),
            Self::TimeoutFallback => write!(f, "timeout_fallback"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occurrence_json_shape() {
        let occ = Occurrence::Click {
            target: ClickTarget::anchor(Some("Buy Now".to_string()), Some("/cart".to_string())),
        };
        let json = serde_json::to_value(&occ).unwrap();
        assert_eq!(json["click"]["target"]["tag"], "a");
        assert_eq!(json["click"]["target"]["text"], "Buy Now");
    }

    #[test]
    fn test_occurrence_parses_sparse_target() {
        let occ: Occurrence =
            serde_json::from_str(r#"{"click":{"target":{"tag":"button"}}}"#).unwrap();
        match occ {
            Occurrence::Click { target } => {
                assert_eq!(target.tag, "button");
                assert_eq!(target.text, None);
                assert_eq!(target.href, None);
            }
            other => panic!("unexpected occurrence: {:?}", other),
        }
    }

    #[test]
    fn test_view_trigger_parses_snake_case() {
        let occ: Occurrence =
            serde_json::from_str(r#"{"view":{"trigger":"window_load"}}"#).unwrap();
        assert_eq!(
            occ,
            Occurrence::View {
                trigger: ViewTrigger::WindowLoad
            }
        );
    }
}
