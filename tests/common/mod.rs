//! Shared utilities for integration tests.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use api_skeleton::config::{load_env_file, ConfigStore, RuntimeMode};
use api_skeleton::lifecycle::Application;
use api_skeleton::routing::ApiRoutes;
use api_skeleton::StartupOptions;
use tokio::net::TcpStream;

/// Write `<dir>/.env.<mode>` with the given contents.
pub fn write_env(dir: &Path, mode: &str, contents: &str) {
    fs::write(dir.join(format!(".env.{}", mode)), contents).unwrap();
}

pub fn options(dir: &Path, mode: &str) -> StartupOptions {
    StartupOptions {
        app_root: dir.to_path_buf(),
        mode: RuntimeMode::new(mode).unwrap(),
    }
}

/// Compose the application from `<dir>/.env.<mode>` alone.
///
/// The process environment is left out so exported variables such as
/// `APP_PORT` cannot leak into the test.
pub fn prepare(dir: &Path, mode: &str, routes: ApiRoutes) -> Application {
    let options = options(dir, mode);
    let file = load_env_file(&options.app_root, &options.mode).unwrap();
    let store = ConfigStore::from_sources(file, std::iter::empty::<(String, String)>());
    Application::from_store(&store, routes)
}

/// Reserve an ephemeral port and release it for the server to bind.
pub fn free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// Poll until something accepts connections on `port`.
pub async fn wait_until_listening(port: u16) {
    let addr: SocketAddr = ([127, 0, 0, 1], port).into();
    for _ in 0..100 {
        if TcpStream::connect(addr).await.is_ok() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("nothing listening on {addr}");
}

/// HTTP client that never goes through a proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
