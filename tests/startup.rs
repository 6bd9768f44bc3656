//! Startup and shutdown against a live listener.

use std::time::Duration;

use api_skeleton::config::ConfigError;
use api_skeleton::lifecycle::{bootstrap, LifecycleState, StartupError};
use api_skeleton::routing::{ApiRoutes, RouteDoc};
use axum::{http::Method, routing::get};

mod common;

#[tokio::test]
async fn test_missing_env_file_aborts_bootstrap() {
    let dir = tempfile::tempdir().unwrap();
    common::write_env(dir.path(), "development", "APP_PORT=1\n");

    let result = tokio::time::timeout(
        Duration::from_secs(2),
        bootstrap(common::options(dir.path(), "production"), ApiRoutes::new()),
    )
    .await
    .expect("bootstrap must fail immediately");

    match result {
        Err(StartupError::Config(ConfigError::Unreadable { path, .. })) => {
            assert!(path.ends_with(".env.production"));
        }
        other => panic!("expected config error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_listener_binds_configured_port() {
    let dir = tempfile::tempdir().unwrap();
    let port = common::free_port();
    common::write_env(dir.path(), "test", &format!("APP_PORT={}\n", port));

    let app = common::prepare(dir.path(), "test", ApiRoutes::new());
    assert_eq!(app.bind_addr().port(), port);
    let shutdown = app.shutdown_context();

    let server = tokio::spawn(app.listen());
    common::wait_until_listening(port).await;

    let response = common::client()
        .get(format!("http://127.0.0.1:{}/document", port))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let document: serde_json::Value = response.json().await.unwrap();
    assert_eq!(document["info"]["title"], "Boilerplate API");

    assert!(shutdown.request_drain());
    let result = tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("server should stop after drain")
        .unwrap();
    assert!(result.is_ok());
    assert_eq!(shutdown.state(), LifecycleState::Terminated);
}

#[tokio::test]
async fn test_in_flight_request_finishes_with_connection_close() {
    let dir = tempfile::tempdir().unwrap();
    let port = common::free_port();
    common::write_env(dir.path(), "test", &format!("APP_PORT={}\n", port));

    let routes = ApiRoutes::new().route(
        RouteDoc::new(Method::GET, "/slow"),
        get(|| async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            "done"
        }),
    );
    let app = common::prepare(dir.path(), "test", routes);
    let shutdown = app.shutdown_context();

    let server = tokio::spawn(app.listen());
    common::wait_until_listening(port).await;

    let client = common::client();
    let quick = client
        .get(format!("http://127.0.0.1:{}/document", port))
        .send()
        .await
        .unwrap();
    assert!(quick.headers().get("connection").is_none());

    let in_flight = tokio::spawn(async move {
        client
            .get(format!("http://127.0.0.1:{}/api/slow", port))
            .send()
            .await
            .unwrap()
    });

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert!(shutdown.request_drain());
    assert!(!shutdown.request_drain());

    let response = in_flight.await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.headers()["connection"], "close");
    assert_eq!(response.text().await.unwrap(), "done");

    let result = tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("server should stop after drain")
        .unwrap();
    assert!(result.is_ok());
    assert_eq!(shutdown.state(), LifecycleState::Terminated);
}
