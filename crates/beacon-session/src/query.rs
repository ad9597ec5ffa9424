//! Query-string parameter extraction
//!
//! The primary path parses the page URL strictly with [`url::Url`] and walks
//! its decoded query pairs. Pages hand us URLs we do not control, so inputs
//! strict parsing rejects (relative paths, scheme-less strings) fall back to
//! a manual parser: split on `&` then `=`, percent-decode both sides, match
//! the name case-sensitively. Both paths return the first match when a
//! parameter repeats.

use percent_encoding::percent_decode_str;
use url::Url;

/// Extract the first value of `name` from the query string of `page_url`
///
/// Values come back verbatim after percent-decoding; no trimming, no
/// normalization. Returns `None` when the parameter is absent or its value
/// does not decode as UTF-8.
pub fn param(page_url: &str, name: &str) -> Option<String> {
    match Url::parse(page_url) {
        Ok(parsed) => parsed
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned()),
        Err(_) => fallback_param(page_url, name),
    }
}

/// Manual query parser for inputs the strict parser rejects
fn fallback_param(page_url: &str, name: &str) -> Option<String> {
    let query = raw_query(page_url)?;

    for pair in query.split('&') {
        let (raw_key, raw_value) = match pair.split_once('=') {
            Some((k, v)) => (k, v),
            None => (pair, ""),
        };

        let key = match percent_decode_str(raw_key).decode_utf8() {
            Ok(key) => key,
            Err(_) => continue,
        };
        if key == name {
            return percent_decode_str(raw_value)
                .decode_utf8()
                .ok()
                .map(|v| v.into_owned());
        }
    }

    None
}

/// Slice out the query substring: after `?`, before any `#`
fn raw_query(page_url: &str) -> Option<&str> {
    let after = page_url.split_once('?')?.1;
    Some(after.split('#').next().unwrap_or(after))
}

/// Extract the document path of `page_url`, defaulting to "/"
pub fn pathname(page_url: &str) -> String {
    match Url::parse(page_url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => {
            let path = page_url
                .split(|c| c == '?' || c == '#')
                .next()
                .unwrap_or("");
            if path.is_empty() {
                "/".to_string()
            } else {
                path.to_string()
            }
        }
    }
}
