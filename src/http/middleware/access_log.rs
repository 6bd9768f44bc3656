//! Request logging in common log format.
//!
//! One line per request, emitted once the response is ready:
//! ```text
//! 127.0.0.1 - alice [10/Oct/2026:13:55:36 +0000] "GET /api/users?page=2 HTTP/1.1" 200 2326
//! ```

use std::fmt;
use std::net::SocketAddr;

use axum::{
    body::{Body, HttpBody},
    extract::ConnectInfo,
    http::{header, HeaderMap, Request, Version},
    middleware::Next,
    response::Response,
};
use base64::Engine;
use chrono::{DateTime, Utc};

/// A single access log record.
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    pub remote_addr: Option<String>,
    pub remote_user: Option<String>,
    pub time: DateTime<Utc>,
    pub method: String,
    pub url: String,
    pub version: Version,
    pub status: u16,
    pub content_length: Option<u64>,
}

impl fmt::Display for AccessLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} [{}] \"{} {} HTTP/{}\" {} ",
            self.remote_addr.as_deref().unwrap_or("-"),
            self.remote_user.as_deref().unwrap_or("-"),
            self.time.format("%d/%b/%Y:%H:%M:%S +0000"),
            self.method,
            self.url,
            http_version(self.version),
            self.status,
        )?;
        match self.content_length {
            Some(len) => write!(f, "{}", len),
            None => f.write_str("-"),
        }
    }
}

fn http_version(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2.0",
        Version::HTTP_3 => "3.0",
        _ => "1.1",
    }
}

/// User name from a `Basic` authorization header, if any.
fn basic_auth_user(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .ok()?;
    let credentials = String::from_utf8(decoded).ok()?;
    let (user, _) = credentials.split_once(':')?;
    Some(user.to_string())
}

fn response_length(response: &Response) -> Option<u64> {
    response
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .or_else(|| response.body().size_hint().exact())
}

/// Middleware emitting one access log line per request.
pub async fn access_log(request: Request<Body>, next: Next) -> Response {
    let remote_addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string());
    let remote_user = basic_auth_user(request.headers());
    let method = request.method().to_string();
    let url = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let version = request.version();

    let response = next.run(request).await;

    let entry = AccessLogEntry {
        remote_addr,
        remote_user,
        time: Utc::now(),
        method,
        url,
        version,
        status: response.status().as_u16(),
        content_length: response_length(&response),
    };
    tracing::info!(target: "access", "{}", entry);

    response
}
