// Connection service
// Serves a single TCP connection and runs the two response hooks: no-cache
// header augmentation and the access-log line.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::sync::Arc;

use crate::config::AppState;
use crate::handler;
use crate::http::no_cache;
use crate::logger::{self, AccessLogEntry};

/// Serve one connection in a spawned local task.
pub fn handle_connection(
    stream: tokio::net::TcpStream,
    peer_addr: std::net::SocketAddr,
    state: Arc<AppState>,
) {
    tokio::task::spawn_local(async move {
        let io = TokioIo::new(stream);
        let access_log = state.config.logging.access_log;

        let mut builder = http1::Builder::new();
        builder.keep_alive(true);

        let conn = builder.serve_connection(
            io,
            service_fn(move |req| {
                let state = Arc::clone(&state);
                async move { serve_request(req, peer_addr, &state, access_log).await }
            }),
        );

        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }
    });
}

/// Run the handler, then post-process the response.
///
/// The hooks run here, after the handler has prepared its response but
/// before hyper transmits it, so they cover every outcome uniformly:
/// 200, 301, 403, 404, and 405 alike.
async fn serve_request(
    req: Request<hyper::body::Incoming>,
    peer_addr: std::net::SocketAddr,
    state: &Arc<AppState>,
    access_log: bool,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let mut entry = begin_log_entry(&req, peer_addr);

    let mut response = handler::handle_request(req, state).await?;

    no_cache::apply(response.headers_mut());

    if access_log {
        entry.status = response.status().as_u16();
        logger::log_access(&entry);
    }

    Ok(response)
}

/// Capture the request-line fields before the request is consumed.
fn begin_log_entry(
    req: &Request<hyper::body::Incoming>,
    peer_addr: std::net::SocketAddr,
) -> AccessLogEntry {
    let path = req
        .uri()
        .path_and_query()
        .map_or_else(|| req.uri().path().to_string(), ToString::to_string);

    AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        path,
        format!("{:?}", req.version()),
    )
}
