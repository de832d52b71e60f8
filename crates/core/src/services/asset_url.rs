//! Asset reference resolution.
//!
//! Stored asset references come in three shapes: a site-relative path, an
//! absolute URL, or an upload object carrying `filename` and/or `url`. Some
//! uploads were later moved to the static site under new paths, so known
//! file names are rewritten through a fixed table.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde_json::Value;
use url::Url;

/// Route that serves stored uploads by file name.
pub const UPLOADS_ROUTE: &str = "/api/uploads/file";

/// Upload file names that now live on the static site.
static STATIC_ASSETS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("iamai.webp", "/images/partners/iamai.jpg"),
        ("T9L.webp", "/images/partners/t9l.jpg"),
        ("interviews.webp", "/images/interviews.webp"),
        ("podcasts.webp", "/images/podcasts.webp"),
        ("events.webp", "/images/events.webp"),
        ("podcast-gradient.png", "/images/podcast-gradient.png"),
        ("event-gradient.png", "/images/event-gradient.png"),
        ("interview-gradient.png", "/images/interview-gradient.png"),
        ("obf-intro.mp3", "/audio/obf-intro.mp3"),
    ])
});

/// Static-site path for a known upload file name.
#[must_use]
pub fn static_asset_path(filename: &str) -> Option<&'static str> {
    STATIC_ASSETS.get(filename).copied()
}

/// Resolve an asset reference to a URL the site can serve.
///
/// Returns `None` when there is nothing usable; never fails.
#[must_use]
pub fn resolve_url(reference: Option<&Value>) -> Option<String> {
    match reference? {
        Value::String(s) => normalize_path(s),
        Value::Object(object) => {
            let filename = object.get("filename").and_then(Value::as_str);

            if let Some(path) = filename.and_then(static_asset_path) {
                return Some(path.to_string());
            }
            if let Some(url) = object.get("url").and_then(Value::as_str) {
                return normalize_path(url);
            }
            filename.map(|name| format!("{UPLOADS_ROUTE}/{name}"))
        }
        _ => None,
    }
}

/// Resolve an asset reference, falling back to `default`.
#[must_use]
pub fn resolve_url_or(reference: Option<&Value>, default: &str) -> String {
    resolve_url(reference).unwrap_or_else(|| default.to_string())
}

/// Strip scheme and host from absolute URLs; make other paths site-relative.
fn normalize_path(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else if s.starts_with('/') {
        Some(s.to_string())
    } else if s.starts_with("http") {
        Url::parse(s).ok().map(|url| url.path().to_string())
    } else {
        Some(format!("/{s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_known_filename_maps_to_static_path() {
        assert_eq!(
            resolve_url(Some(&json!({"filename": "iamai.webp"}))),
            Some("/images/partners/iamai.jpg".to_string())
        );
        // The table wins over a stored url.
        assert_eq!(
            resolve_url(Some(&json!({
                "filename": "obf-intro.mp3",
                "url": "https://cdn.example.com/media/obf-intro.mp3",
            }))),
            Some("/audio/obf-intro.mp3".to_string())
        );
    }

    #[test]
    fn test_absolute_url_keeps_only_path() {
        assert_eq!(
            resolve_url(Some(&json!({"url": "https://host/path/x.png"}))),
            Some("/path/x.png".to_string())
        );
        assert_eq!(
            resolve_url(Some(&json!("http://host:8080/a/b.webp?v=2"))),
            Some("/a/b.webp".to_string())
        );
    }

    #[test]
    fn test_relative_references() {
        assert_eq!(
            resolve_url(Some(&json!("/images/events.webp"))),
            Some("/images/events.webp".to_string())
        );
        assert_eq!(
            resolve_url(Some(&json!("images/events.webp"))),
            Some("/images/events.webp".to_string())
        );
    }

    #[test]
    fn test_unknown_filename_goes_through_uploads_route() {
        assert_eq!(
            resolve_url(Some(&json!({"filename": "team-photo.jpg"}))),
            Some("/api/uploads/file/team-photo.jpg".to_string())
        );
    }

    #[test]
    fn test_unusable_references() {
        assert_eq!(resolve_url(None), None);
        assert_eq!(resolve_url(Some(&Value::Null)), None);
        assert_eq!(resolve_url(Some(&json!(""))), None);
        assert_eq!(resolve_url(Some(&json!(42))), None);
        assert_eq!(resolve_url(Some(&json!({"alt": "no file"}))), None);
        assert_eq!(resolve_url(Some(&json!("http//not a url"))), None);
    }

    #[test]
    fn test_resolve_with_default() {
        assert_eq!(resolve_url_or(None, "/audio/obf-intro.mp3"), "/audio/obf-intro.mp3");
        assert_eq!(resolve_url_or(Some(&json!("/a.mp3")), "/b.mp3"), "/a.mp3");
    }
}
