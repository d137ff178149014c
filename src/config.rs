use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub files: FilesConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FilesConfig {
    pub root: String,
    pub index_files: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
}

impl Config {
    /// Load configuration from defaults, overridable through
    /// `DEVSERVE_`-prefixed environment variables.
    ///
    /// There is deliberately no configuration file: the server serves the
    /// current directory on a fixed port out of the box.
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix("DEVSERVE").separator("__"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("files.root", ".")?
            .set_default("files.index_files", vec!["index.html", "index.htm"])?
            .set_default("logging.access_log", true)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Absolute, canonicalized serving root. Resolved once at startup so
    /// per-request containment checks compare against a stable prefix.
    pub fn root_dir(&self) -> std::io::Result<PathBuf> {
        Path::new(&self.files.root).canonicalize()
    }
}

/// Shared per-process state: the loaded configuration and the resolved
/// serving root. Immutable after startup, so no locking is needed.
pub struct AppState {
    pub config: Config,
    pub root: PathBuf,
}

impl AppState {
    pub const fn new(config: Config, root: PathBuf) -> Self {
        Self { config, root }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::load().expect("default config loads");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.files.root, ".");
        assert_eq!(cfg.files.index_files, vec!["index.html", "index.htm"]);
        assert!(cfg.logging.access_log);
    }

    #[test]
    fn test_socket_addr() {
        let cfg = Config::load().expect("default config loads");
        let addr = cfg.socket_addr().expect("valid address");
        assert_eq!(addr.port(), 8080);
        assert!(addr.ip().is_unspecified());
    }
}
