// Server module entry point
// Listener setup, accept loop, connection service, and signal handling

pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the module gets an explicit path
#[path = "loop.rs"]
pub mod accept_loop;

pub use accept_loop::run_accept_loop;
pub use listener::bind_listener;
