//! Event normalization
//!
//! Converts a raw occurrence into a canonical [`EventRecord`]: bounded
//! label, source path, capture-time timestamp. Label sources differ by
//! occurrence kind; every fallback chain ends in a sentinel, so
//! normalization cannot fail.

use beacon_core::{ActionKind, EventRecord, LABEL_UNAVAILABLE, MAX_LABEL_LEN};
use chrono::Utc;

use crate::occurrence::ClickTarget;

/// Build an event record
///
/// `raw_label` empty or absent falls back to the `"N/A"` sentinel;
/// `raw_pathname` absent falls back to `live_path`. The timestamp is taken
/// here, not at dispatch.
pub fn normalize(
    action: ActionKind,
    raw_label: Option<&str>,
    raw_pathname: Option<&str>,
    live_path: &str,
) -> EventRecord {
    EventRecord {
        action,
        label: clean_label(raw_label),
        pathname: raw_pathname.unwrap_or(live_path).to_string(),
        timestamp: Utc::now(),
    }
}

/// Trim and bound a raw label, substituting the sentinel when empty
///
/// Truncation counts characters, not bytes, so multi-byte labels stay valid.
pub fn clean_label(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => trimmed.chars().take(MAX_LABEL_LEN).collect(),
        _ => LABEL_UNAVAILABLE.to_string(),
    }
}

/// Map a click target to an action kind; clicks elsewhere are ignored
pub fn click_action(target: &ClickTarget) -> Option<ActionKind> {
    match target.tag.as_str() {
        "button" => Some(ActionKind::ButtonClick),
        "a" => Some(ActionKind::LinkClick),
        _ => None,
    }
}

/// Pick the label source for a click
///
/// Buttons use their visible text. Links use visible text, then the link
/// target, then the literal "link".
pub fn click_label(action: ActionKind, target: &ClickTarget) -> Option<String> {
    let text = target
        .text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    match action {
        ActionKind::ButtonClick => text,
        ActionKind::LinkClick => text
            .or_else(|| target.href.clone())
            .or_else(|| Some("link".to_string())),
        _ => None,
    }
}

/// Derive the label for a view event from the current path
///
/// Slashes are stripped; a root path yields "home".
pub fn view_label(path: &str) -> String {
    let stripped: String = path.chars().filter(|c| *c != '/').collect();
    if stripped.is_empty() {
        "home".to_string()
    } else {
        stripped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_sentinel_when_absent() {
        assert_eq!(clean_label(None), "N/A");
        assert_eq!(clean_label(Some("")), "N/A");
        assert_eq!(clean_label(Some("   ")), "N/A");
    }

    #[test]
    fn test_label_trimmed_then_truncated() {
        let raw = format!("  {}  ", "x".repeat(250));
        let label = clean_label(Some(&raw));
        assert_eq!(label.chars().count(), 100);
        assert!(!label.starts_with(' '));
    }

    #[test]
    fn test_label_truncation_is_char_safe() {
        let raw = "é".repeat(150);
        let label = clean_label(Some(&raw));
        assert_eq!(label.chars().count(), 100);
    }

    #[test]
    fn test_normalize_defaults_pathname_to_live_path() {
        let record = normalize(ActionKind::FormSubmit, Some("signup"), None, "/checkout");
        assert_eq!(record.pathname, "/checkout");
        assert_eq!(record.label, "signup");
    }

    #[test]
    fn test_normalize_explicit_pathname_wins() {
        let record = normalize(ActionKind::PageView, None, Some("/landing"), "/other");
        assert_eq!(record.pathname, "/landing");
        assert_eq!(record.label, "N/A");
    }

    #[test]
    fn test_click_action_mapping() {
        assert_eq!(
            click_action(&ClickTarget::button("Go")),
            Some(ActionKind::ButtonClick)
        );
        assert_eq!(
            click_action(&ClickTarget::anchor(None, None)),
            Some(ActionKind::LinkClick)
        );
        let div = ClickTarget {
            tag: "div".to_string(),
            text: Some("ignored".to_string()),
            href: None,
        };
        assert_eq!(click_action(&div), None);
    }

    #[test]
    fn test_button_label_uses_text() {
        let target = ClickTarget::button(" Buy Now ");
        let label = click_label(ActionKind::ButtonClick, &target);
        assert_eq!(label, Some("Buy Now".to_string()));
    }

    #[test]
    fn test_button_without_text_has_no_label() {
        let target = ClickTarget {
            tag: "button".to_string(),
            text: None,
            href: None,
        };
        assert_eq!(click_label(ActionKind::ButtonClick, &target), None);
    }

    #[test]
    fn test_link_label_fallback_chain() {
        let with_text = ClickTarget::anchor(Some("Docs".to_string()), Some("/docs".to_string()));
        assert_eq!(
            click_label(ActionKind::LinkClick, &with_text),
            Some("Docs".to_string())
        );

        let href_only = ClickTarget::anchor(Some("  ".to_string()), Some("/docs".to_string()));
        assert_eq!(
            click_label(ActionKind::LinkClick, &href_only),
            Some("/docs".to_string())
        );

        let bare = ClickTarget::anchor(None, None);
        assert_eq!(
            click_label(ActionKind::LinkClick, &bare),
            Some("link".to_string())
        );
    }

    #[test]
    fn test_view_label_strips_slashes() {
        assert_eq!(view_label("/"), "home");
        assert_eq!(view_label(""), "home");
        assert_eq!(view_label("/products/shoes"), "productsshoes");
    }
}
