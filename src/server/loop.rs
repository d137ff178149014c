// Accept loop
// Accepts connections until the shutdown signal fires.

use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::handle_connection;
use crate::config::AppState;
use crate::logger;

/// Run the accept loop until `shutdown` is notified.
///
/// Each accepted connection is served in its own local task; a failed accept
/// is logged and the loop keeps going. On shutdown the listener is dropped,
/// which stops new connections, and the function returns so the caller can
/// print the confirmation line and exit 0.
#[allow(clippy::ignored_unit_patterns)]
pub async fn run_accept_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: Arc<Notify>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        handle_connection(stream, peer_addr, Arc::clone(&state));
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            _ = shutdown.notified() => {
                return Ok(());
            }
        }
    }
}
