//! `Link` response header handling.

use reqwest::header::{HeaderMap, LINK};

/// Returns the URL of the `rel="next"` directive in a raw `Link` header value.
///
/// Directives without a `;` separator are skipped. The relation is compared
/// verbatim after trimming, so `rel=next` or `REL="next"` do not match.
pub fn next_page_url(link_header: &str) -> Option<String> {
    for directive in link_header.split(',') {
        let mut parts = directive.split(';');
        let (Some(target), Some(rel)) = (parts.next(), parts.next()) else {
            continue;
        };

        if rel.trim() == r#"rel="next""# {
            let url = target
                .trim()
                .trim_start_matches('<')
                .trim_end_matches('>')
                .trim();
            if url.is_empty() {
                return None;
            }
            return Some(url.to_string());
        }
    }
    None
}

/// Looks up the `Link` header and extracts its next-page URL.
pub fn next_page_from_headers(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(LINK)?.to_str().ok()?;
    next_page_url(value)
}
