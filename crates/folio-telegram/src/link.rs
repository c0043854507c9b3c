//! Deep links that open a chat with a prefilled message.

use url::Url;

use crate::error::Result;

/// Public deep-link host.
pub const DEFAULT_LINK_BASE: &str = "https://t.me";

/// Builds `{base}/{handle}?text={text}` with `text` percent-encoded.
///
/// # Errors
///
/// Returns an error if the resulting URL does not parse.
pub fn deep_link(base: &str, handle: &str, text: &str) -> Result<Url> {
    let base = base.trim_end_matches('/');
    let handle = handle.trim_start_matches('@');
    let encoded = urlencoding::encode(text);
    Ok(Url::parse(&format!("{base}/{handle}?text={encoded}"))?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_percent_encoded() {
        let url = deep_link(DEFAULT_LINK_BASE, "someone", "Hi! I'm Ann (a@b.c).\n\nBye & thanks").unwrap();
        let query = url.query().unwrap();
        assert!(query.starts_with("text="));
        assert!(!query.contains(' '));
        assert!(!query.contains('\n'));
        assert!(query.contains("%0A%0A"));
        assert!(query.contains("%26"));
    }

    #[test]
    fn test_text_round_trips_through_query() {
        let text = "Subject: Hello world\n\nMessage: ünïcode + symbols = ok?";
        let url = deep_link("https://t.me/", "@someone", text).unwrap();
        assert_eq!(url.path(), "/someone");
        let (key, value) = url.query_pairs().next().unwrap();
        assert_eq!(key, "text");
        assert_eq!(value, text);
    }
}
