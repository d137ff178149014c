// Listener setup
// Builds the TCP listener through socket2 for explicit socket options.

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::TcpListener;

/// Bind the listening socket.
///
/// `SO_REUSEADDR` allows rebinding through `TIME_WAIT` after a restart.
/// `SO_REUSEPORT` is not set: a second instance started on the same port
/// must fail with a bind error instead of silently sharing the socket.
pub fn bind_listener(addr: std::net::SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;

    socket.set_reuse_address(true)?;

    // Non-blocking mode for async compatibility
    socket.set_nonblocking(true)?;

    socket.bind(&addr.into())?;
    socket.listen(128)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}
