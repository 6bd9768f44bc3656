//! Typed application settings.
//!
//! Built once from the [`ConfigStore`] during startup and shared by value
//! with the subsystems that need it.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::config::store::ConfigStore;

/// Listener port used when `APP_PORT` is absent or not a number.
pub const DEFAULT_PORT: u16 = 3000;

/// Configuration key holding the listener port.
pub const APP_PORT: &str = "APP_PORT";

/// Root configuration for the application.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// HTTP surface layout.
    pub http: HttpConfig,

    /// API documentation metadata.
    pub docs: DocsConfig,
}

impl AppConfig {
    /// Derive typed settings from the configuration store.
    pub fn from_store(store: &ConfigStore) -> Self {
        let port = match store.get(APP_PORT) {
            None => DEFAULT_PORT,
            Some(raw) => match raw.trim().parse::<u16>() {
                Ok(port) => port,
                Err(_) => {
                    tracing::warn!(
                        value = %raw,
                        default = DEFAULT_PORT,
                        "APP_PORT is not a valid port, using default"
                    );
                    DEFAULT_PORT
                }
            },
        };

        Self {
            listener: ListenerConfig {
                port,
                ..ListenerConfig::default()
            },
            ..Self::default()
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone)]
pub struct ListenerConfig {
    /// Interface to bind (all interfaces by default).
    pub host: IpAddr,

    /// TCP port.
    pub port: u16,
}

impl ListenerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

/// Path layout of the HTTP surface.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Prefix applied to every registered API route.
    pub api_prefix: String,

    /// Path serving the generated API description.
    pub docs_path: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            api_prefix: "/api".to_string(),
            docs_path: "/document".to_string(),
        }
    }
}

/// Metadata published in the API description.
#[derive(Debug, Clone)]
pub struct DocsConfig {
    pub title: String,
    pub description: String,
    pub version: String,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            title: "Boilerplate API".to_string(),
            description: "API for Boilerplate API".to_string(),
            version: "1.0.0".to_string(),
        }
    }
}
