//! HTTP protocol layer
//!
//! Response builders, MIME inference, and the forced no-cache header set,
//! decoupled from the file-serving logic.

pub mod mime;
pub mod no_cache;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_403_response, build_404_response, build_405_response, build_file_response,
    build_options_response, build_redirect_response,
};
