//! Logging module
//!
//! Banner and lifecycle lines go to stdout; diagnostics and the per-request
//! access log go to stderr.

mod format;

pub use format::AccessLogEntry;

use std::net::SocketAddr;
use std::path::Path;

/// Startup banner: URL, serving directory, feature notice.
pub fn log_server_start(addr: &SocketAddr, root: &Path) {
    println!("Dev server running at http://localhost:{}/", addr.port());
    println!("Serving from: {}", root.display());
    println!("No-cache headers enabled - assets always reload fresh");
}

/// Shutdown confirmation line.
pub fn log_server_stopped() {
    println!("Server stopped");
}

pub fn log_bind_failed(addr: &SocketAddr, err: &std::io::Error) {
    eprintln!("[ERROR] Failed to bind {addr}: {err}");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

/// One access-log line per handled request, on stderr.
pub fn log_access(entry: &AccessLogEntry) {
    eprintln!("{entry}");
}
