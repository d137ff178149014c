//! Access log formatting
//!
//! One line per handled request, in the Apache-style bracketed-date shape:
//! `<address> - - [<date-time>] "<method> <path> <version>" <status> -`

use chrono::{DateTime, Local};
use std::fmt;

/// Fields of one access-log line.
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    /// Client IP address
    pub remote_addr: String,
    /// Request timestamp
    pub time: DateTime<Local>,
    /// HTTP method (GET, HEAD, ...)
    pub method: String,
    /// Request path, including the query string if present
    pub path: String,
    /// Protocol version string, e.g. `HTTP/1.1`
    pub version: String,
    /// Response status code
    pub status: u16,
}

impl AccessLogEntry {
    /// Create an entry stamped with the current local time. The status is
    /// filled in once the response has been produced.
    pub fn new(remote_addr: String, method: String, path: String, version: String) -> Self {
        Self {
            remote_addr,
            time: Local::now(),
            method,
            path,
            version,
            status: 0,
        }
    }
}

impl fmt::Display for AccessLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - - [{}] \"{} {} {}\" {} -",
            self.remote_addr,
            self.time.format("%d/%b/%Y %H:%M:%S"),
            self.method,
            self.path,
            self.version,
            self.status,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_entry() -> AccessLogEntry {
        let mut entry = AccessLogEntry::new(
            "127.0.0.1".to_string(),
            "GET".to_string(),
            "/assets/app.css?v=3".to_string(),
            "HTTP/1.1".to_string(),
        );
        entry.status = 200;
        entry
    }

    #[test]
    fn test_line_shape() {
        let entry = create_test_entry();
        let line = entry.to_string();
        assert!(line.starts_with("127.0.0.1 - - ["));
        assert!(line.ends_with("\" 200 -"));
        assert!(line.contains("\"GET /assets/app.css?v=3 HTTP/1.1\""));
    }

    #[test]
    fn test_bracketed_timestamp_format() {
        let entry = create_test_entry();
        let line = entry.to_string();

        let open = line.find('[').unwrap();
        let close = line.find(']').unwrap();
        let ts = &line[open + 1..close];

        // e.g. "27/Aug/2026 14:30:05"
        assert_eq!(ts.len(), 20);
        let (date, time) = ts.split_once(' ').unwrap();
        let date_parts: Vec<&str> = date.split('/').collect();
        assert_eq!(date_parts.len(), 3);
        assert_eq!(date_parts[0].len(), 2);
        assert_eq!(date_parts[1].len(), 3);
        assert_eq!(date_parts[2].len(), 4);
        assert_eq!(time.split(':').count(), 3);
    }

    #[test]
    fn test_status_recorded_after_response() {
        let mut entry = AccessLogEntry::new(
            "10.0.0.5".to_string(),
            "GET".to_string(),
            "/does-not-exist.png".to_string(),
            "HTTP/1.1".to_string(),
        );
        entry.status = 404;
        assert!(entry.to_string().contains("\" 404 -"));
    }
}
