//! OpenAPI document model and generation from the route registry.

use axum::http::Method;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::DocsConfig;
use crate::routing::RouteDoc;

/// Name of the bearer security scheme in `components.securitySchemes`.
pub const BEARER_SCHEME: &str = "bearer";

const OPENAPI_VERSION: &str = "3.0.0";

/// OpenAPI document root object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenApi {
    pub openapi: String,
    pub info: Info,
    pub paths: IndexMap<String, PathItem>,
    pub components: Components,
}

/// API metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub title: String,
    pub description: String,
    pub version: String,
}

/// Operations on one path, keyed by lower-case method name.
pub type PathItem = IndexMap<String, Operation>;

/// A documented endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    #[serde(rename = "operationId")]
    pub operation_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub responses: IndexMap<String, ResponseDoc>,
    /// Security requirements.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security: Vec<IndexMap<String, Vec<String>>>,
}

/// Response definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseDoc {
    pub description: String,
}

/// Reusable components.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    #[serde(rename = "securitySchemes")]
    pub security_schemes: IndexMap<String, SecurityScheme>,
}

/// Security scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityScheme {
    #[serde(rename = "type")]
    pub scheme_type: String,
    pub scheme: String,
    #[serde(rename = "bearerFormat")]
    pub bearer_format: String,
}

impl SecurityScheme {
    pub fn bearer() -> Self {
        Self {
            scheme_type: "http".to_string(),
            scheme: "bearer".to_string(),
            bearer_format: "JWT".to_string(),
        }
    }
}

impl OpenApi {
    /// Build the document for `routes`, each mounted under `prefix`.
    pub fn generate(config: &DocsConfig, prefix: &str, routes: &[RouteDoc]) -> Self {
        let mut paths: IndexMap<String, PathItem> = IndexMap::new();
        for route in routes {
            let path = join_path(prefix, &route.path);
            let operation = Operation {
                operation_id: operation_id(&route.method, &route.path),
                summary: route.summary.clone(),
                responses: IndexMap::from([(
                    "200".to_string(),
                    ResponseDoc {
                        description: String::new(),
                    },
                )]),
                security: if route.bearer_auth {
                    vec![IndexMap::from([(BEARER_SCHEME.to_string(), Vec::new())])]
                } else {
                    Vec::new()
                },
            };
            paths
                .entry(path)
                .or_default()
                .insert(route.method.as_str().to_ascii_lowercase(), operation);
        }

        let mut components = Components::default();
        components
            .security_schemes
            .insert(BEARER_SCHEME.to_string(), SecurityScheme::bearer());

        Self {
            openapi: OPENAPI_VERSION.to_string(),
            info: Info {
                title: config.title.clone(),
                description: config.description.clone(),
                version: config.version.clone(),
            },
            paths,
            components,
        }
    }
}

fn join_path(prefix: &str, path: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        prefix.to_string()
    } else {
        format!("{}/{}", prefix, path)
    }
}

/// `GET /users/{id}` → `get_users_id`.
fn operation_id(method: &Method, path: &str) -> String {
    let mut id = method.as_str().to_ascii_lowercase();
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        id.push('_');
        id.extend(
            segment
                .chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '_'),
        );
    }
    id
}
