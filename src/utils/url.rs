// src/utils/url.rs

//! URL manipulation utilities.

/// Reduce a link to its identity: scheme, host and path with the query
/// string and fragment removed.
///
/// Purely textual, so scheme/host/path are kept byte-for-byte and malformed
/// input still yields a deterministic key.
///
/// # Examples
/// ```
/// use newsrelay::utils::url::canonicalize;
///
/// assert_eq!(
///     canonicalize("https://example.com/a/b?utm_source=x#top"),
///     "https://example.com/a/b"
/// );
/// ```
pub fn canonicalize(url: &str) -> String {
    let without_fragment = url.split_once('#').map_or(url, |(head, _)| head);
    let without_query = without_fragment
        .split_once('?')
        .map_or(without_fragment, |(head, _)| head);
    without_query.to_string()
}

/// Append a query fragment such as `outputType=amp` to a URL, respecting an
/// existing query string.
pub fn with_query(url: &str, query: &str) -> String {
    let query = query.trim_start_matches(['?', '&']);
    if query.is_empty() {
        return url.to_string();
    }
    let (head, fragment) = match url.split_once('#') {
        Some((head, fragment)) => (head, Some(fragment)),
        None => (url, None),
    };
    let separator = if !head.contains('?') {
        "?"
    } else if head.ends_with('?') || head.ends_with('&') {
        ""
    } else {
        "&"
    };
    match fragment {
        Some(fragment) => format!("{head}{separator}{query}#{fragment}"),
        None => format!("{head}{separator}{query}"),
    }
}
