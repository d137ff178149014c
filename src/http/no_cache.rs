//! Forced no-cache response headers
//!
//! Development servers fight the browser cache: a stale stylesheet or image
//! after an edit costs more debugging time than the headers cost bandwidth.
//! Every response leaving this server carries the header trio below so the
//! browser re-fetches assets on each reload.

use hyper::header::{HeaderMap, HeaderValue, CACHE_CONTROL, EXPIRES, PRAGMA};

pub const CACHE_CONTROL_VALUE: &str = "no-store, no-cache, must-revalidate, max-age=0";
pub const PRAGMA_VALUE: &str = "no-cache";
pub const EXPIRES_VALUE: &str = "0";

/// Set the three no-cache headers, replacing any existing values.
pub fn apply(headers: &mut HeaderMap) {
    headers.insert(CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL_VALUE));
    headers.insert(PRAGMA, HeaderValue::from_static(PRAGMA_VALUE));
    headers.insert(EXPIRES, HeaderValue::from_static(EXPIRES_VALUE));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_applies_exact_values() {
        let mut headers = HeaderMap::new();
        apply(&mut headers);

        assert_eq!(
            headers.get(CACHE_CONTROL).unwrap(),
            "no-store, no-cache, must-revalidate, max-age=0"
        );
        assert_eq!(headers.get(PRAGMA).unwrap(), "no-cache");
        assert_eq!(headers.get(EXPIRES).unwrap(), "0");
        assert_eq!(headers.len(), 3);
    }

    #[test]
    fn test_replaces_existing_cache_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("public, max-age=3600"));
        apply(&mut headers);

        assert_eq!(headers.get(CACHE_CONTROL).unwrap(), CACHE_CONTROL_VALUE);
        assert_eq!(headers.get_all(CACHE_CONTROL).iter().count(), 1);
    }
}
