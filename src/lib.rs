//! Application bootstrap skeleton library.

pub mod config;
pub mod docs;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::AppConfig;
pub use http::HttpServer;
pub use lifecycle::{bootstrap, Application, ShutdownContext, StartupOptions};
