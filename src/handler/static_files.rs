//! Static file serving
//!
//! Maps request paths to files under the serving root, with index file
//! lookup, generated directory listings, and traversal containment.

use crate::config::AppState;
use crate::http::{self, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;

/// Serve the resource at `raw_path` relative to the configured root.
pub async fn serve(raw_path: &str, state: &Arc<AppState>, is_head: bool) -> Response<Full<Bytes>> {
    let Some(decoded) = decode_percent(raw_path) else {
        return http::build_404_response();
    };

    let resolved = match resolve_path(&state.root, &decoded) {
        Ok(p) => p,
        Err(e) if e.kind() == ErrorKind::PermissionDenied => return http::build_403_response(),
        Err(_) => return http::build_404_response(),
    };

    if resolved.is_dir() {
        // Directories are addressed with a trailing slash so that relative
        // links inside served pages resolve correctly.
        if !decoded.ends_with('/') {
            return http::build_redirect_response(&format!("{decoded}/"));
        }

        if let Some(index) = find_index(&resolved, &state.config.files.index_files) {
            return serve_file(&index, is_head).await;
        }

        return serve_listing(&resolved, &decoded, is_head).await;
    }

    serve_file(&resolved, is_head).await
}

/// Resolve a decoded request path against the root directory.
///
/// Canonicalization resolves `..` and symlinks; anything that lands outside
/// the root is reported as not found rather than revealing what exists there.
fn resolve_path(root: &Path, decoded: &str) -> std::io::Result<PathBuf> {
    let relative = decoded.trim_start_matches('/');
    let candidate = root.join(relative);

    let canonical = candidate.canonicalize()?;
    if canonical.starts_with(root) {
        Ok(canonical)
    } else {
        Err(std::io::Error::new(
            ErrorKind::NotFound,
            "path escapes serving root",
        ))
    }
}

/// First existing index file in the directory, if any.
fn find_index(dir: &Path, index_files: &[String]) -> Option<PathBuf> {
    index_files
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}

async fn serve_file(path: &Path, is_head: bool) -> Response<Full<Bytes>> {
    match fs::read(path).await {
        Ok(content) => {
            let content_type = mime::content_type_for(path.extension().and_then(|e| e.to_str()));
            http::build_file_response(&content, content_type, is_head)
        }
        Err(e) if e.kind() == ErrorKind::PermissionDenied => http::build_403_response(),
        Err(e) => {
            if e.kind() != ErrorKind::NotFound {
                logger::log_error(&format!("Failed to read '{}': {e}", path.display()));
            }
            http::build_404_response()
        }
    }
}

async fn serve_listing(dir: &Path, request_path: &str, is_head: bool) -> Response<Full<Bytes>> {
    match read_entries(dir).await {
        Ok(entries) => {
            let html = render_listing(request_path, &entries);
            http::response::build_html_response(html, is_head)
        }
        Err(e) if e.kind() == ErrorKind::PermissionDenied => http::build_403_response(),
        Err(e) => {
            logger::log_error(&format!("Failed to list '{}': {e}", dir.display()));
            http::build_404_response()
        }
    }
}

/// Directory entries sorted by name, directories suffixed with `/`.
async fn read_entries(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut names = Vec::new();
    let mut entries = fs::read_dir(dir).await?;

    while let Some(entry) = entries.next_entry().await? {
        let mut name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type().await.is_ok_and(|t| t.is_dir()) {
            name.push('/');
        }
        names.push(name);
    }

    names.sort();
    Ok(names)
}

fn render_listing(request_path: &str, entries: &[String]) -> String {
    let title = format!("Directory listing for {}", escape_html(request_path));
    let items: String = entries
        .iter()
        .map(|name| {
            let escaped = escape_html(name);
            format!("<li><a href=\"{escaped}\">{escaped}</a></li>\n")
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title}</title>
</head>
<body>
<h1>{title}</h1>
<hr>
<ul>
{items}</ul>
<hr>
</body>
</html>"#
    )
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Decode `%XX` escapes in a request path.
///
/// Returns `None` for truncated or non-hex escapes and for sequences that do
/// not decode to valid UTF-8.
fn decode_percent(input: &str) -> Option<String> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes.get(i + 1..i + 3)?;
            let hi = (hex[0] as char).to_digit(16)?;
            let lo = (hex[1] as char).to_digit(16)?;
            out.push(u8::try_from(hi * 16 + lo).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8(out).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;

    fn setup_root(tag: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!("devserve-test-{tag}-{}", std::process::id()));
        let _ = std_fs::remove_dir_all(&root);
        std_fs::create_dir_all(root.join("assets")).unwrap();
        std_fs::write(root.join("index.html"), "<h1>hi</h1>").unwrap();
        std_fs::write(root.join("assets/app.css"), "body{}").unwrap();
        root.canonicalize().unwrap()
    }

    #[test]
    fn test_decode_percent() {
        assert_eq!(decode_percent("/a%20b.txt").unwrap(), "/a b.txt");
        assert_eq!(decode_percent("/plain").unwrap(), "/plain");
        assert!(decode_percent("/bad%2").is_none());
        assert!(decode_percent("/bad%zz").is_none());
    }

    #[test]
    fn test_resolve_existing_file() {
        let root = setup_root("resolve");
        let resolved = resolve_path(&root, "/assets/app.css").unwrap();
        assert!(resolved.ends_with("assets/app.css"));
        assert!(resolved.starts_with(&root));
    }

    #[test]
    fn test_resolve_rejects_escape() {
        let root = setup_root("escape");
        // "/.." resolves to the parent of the root, which exists but is
        // outside it
        assert!(resolve_path(&root, "/..").is_err());
        assert!(resolve_path(&root, "/../../etc/passwd").is_err());
    }

    #[test]
    fn test_resolve_missing_file() {
        let root = setup_root("missing");
        let err = resolve_path(&root, "/does-not-exist.png").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_find_index_prefers_first_match() {
        let root = setup_root("index");
        let order = vec!["index.html".to_string(), "index.htm".to_string()];
        let found = find_index(&root, &order).unwrap();
        assert!(found.ends_with("index.html"));

        assert!(find_index(&root.join("assets"), &order).is_none());
    }

    #[test]
    fn test_render_listing() {
        let entries = vec!["assets/".to_string(), "index.html".to_string()];
        let html = render_listing("/", &entries);
        assert!(html.contains("Directory listing for /"));
        assert!(html.contains("<a href=\"assets/\">assets/</a>"));
        assert!(html.contains("<a href=\"index.html\">index.html</a>"));
    }

    #[test]
    fn test_render_listing_escapes_names() {
        let entries = vec!["<script>.txt".to_string()];
        let html = render_listing("/", &entries);
        assert!(!html.contains("<script>.txt"));
        assert!(html.contains("&lt;script&gt;.txt"));
    }
}
