//! Request validation and error normalisation.
//!
//! # Responsibilities
//! - Model per-field validation failures as an ordered tree
//! - Collapse a failure tree into exactly one Bad Request message
//! - Provide a `ValidatedJson<T>` extractor for request bodies
//!
//! # Selection Rule
//! Only the first top-level failure is reported. If it has nested
//! failures, the first nested failure is used instead (one level deep).
//! Of the chosen field's constraints, the message whose key comes last
//! in insertion order wins. Sibling failures and deeper levels are dropped.

use axum::{
    extract::{FromRequest, Request},
    Json,
};
use indexmap::IndexMap;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::http::error::ApiError;

/// Message used when the selected field carries no constraint messages.
pub const FALLBACK_MESSAGE: &str = "Bad Request";

/// A failing field with its constraint messages and nested failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldFailure {
    /// Field name.
    pub property: String,

    /// Failure kind → human-readable message, in insertion order.
    #[serde(default)]
    pub constraints: IndexMap<String, String>,

    /// Failures of nested fields.
    #[serde(default)]
    pub children: ValidationFailureTree,
}

impl FieldFailure {
    pub fn new(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            ..Self::default()
        }
    }

    /// Add a constraint message. Re-adding a kind replaces its message in place.
    pub fn constraint(mut self, kind: impl Into<String>, message: impl Into<String>) -> Self {
        self.constraints.insert(kind.into(), message.into());
        self
    }

    pub fn child(mut self, child: FieldFailure) -> Self {
        self.children.push(child);
        self
    }

    /// Message of the constraint whose key is last in iteration order.
    fn last_message(&self) -> Option<&str> {
        self.constraints.last().map(|(_, message)| message.as_str())
    }
}

/// Ordered sequence of field failures produced for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationFailureTree(Vec<FieldFailure>);

impl ValidationFailureTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, failure: FieldFailure) {
        self.0.push(failure);
    }

    pub fn with(mut self, failure: FieldFailure) -> Self {
        self.push(failure);
        self
    }

    pub fn first(&self) -> Option<&FieldFailure> {
        self.0.first()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<Vec<FieldFailure>> for ValidationFailureTree {
    fn from(failures: Vec<FieldFailure>) -> Self {
        Self(failures)
    }
}

impl FromIterator<FieldFailure> for ValidationFailureTree {
    fn from_iter<I: IntoIterator<Item = FieldFailure>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Collapse a failure tree into a single Bad Request.
///
/// Returns `None` for an empty tree.
pub fn normalize(failures: &ValidationFailureTree) -> Option<ApiError> {
    let first = failures.first()?;
    let selected = first.children.first().unwrap_or(first);

    let message = selected.last_message().unwrap_or_else(|| {
        tracing::warn!(
            property = %selected.property,
            "Validation failure without constraint messages"
        );
        FALLBACK_MESSAGE
    });

    tracing::debug!(
        failures = failures.len(),
        property = %selected.property,
        message = %message,
        "Validation failed"
    );

    Some(ApiError::BadRequest(message.to_string()))
}

/// Types that can check their own field values after deserialisation.
pub trait Validate {
    /// Return every failing field; an empty tree means the value is valid.
    fn validate(&self) -> ValidationFailureTree;
}

/// JSON body extractor that runs [`Validate`] before the handler sees the value.
///
/// Unknown fields are dropped by deserialisation. Malformed bodies and
/// failed validation both reject with a single Bad Request.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        match normalize(&value.validate()) {
            Some(err) => Err(err),
            None => Ok(Self(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request as HttpRequest, StatusCode},
        routing::post,
        Router,
    };
    use tower::ServiceExt;

    fn message(err: Option<ApiError>) -> String {
        match err {
            Some(ApiError::BadRequest(message)) => message,
            other => panic!("expected BadRequest, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_tree_produces_nothing() {
        assert_eq!(normalize(&ValidationFailureTree::new()), None);
    }

    #[test]
    fn test_last_constraint_key_wins() {
        let tree = ValidationFailureTree::new().with(
            FieldFailure::new("email")
                .constraint("isLength", "too short")
                .constraint("isEmail", "invalid format"),
        );

        for _ in 0..3 {
            assert_eq!(message(normalize(&tree)), "invalid format");
        }

        let reversed = ValidationFailureTree::new().with(
            FieldFailure::new("email")
                .constraint("isEmail", "invalid format")
                .constraint("isLength", "too short"),
        );
        assert_eq!(message(normalize(&reversed)), "too short");
    }

    #[test]
    fn test_later_siblings_are_ignored() {
        let tree = ValidationFailureTree::new()
            .with(FieldFailure::new("name").constraint("isNotEmpty", "name should not be empty"))
            .with(FieldFailure::new("age").constraint("min", "age must not be less than 0"));

        assert_eq!(message(normalize(&tree)), "name should not be empty");
    }

    #[test]
    fn test_descends_one_level_into_children() {
        let tree = ValidationFailureTree::new().with(
            FieldFailure::new("address")
                .constraint("isObject", "address must be an object")
                .child(
                    FieldFailure::new("city")
                        .constraint("isString", "city must be a string")
                        .constraint("isNotEmpty", "city should not be empty"),
                )
                .child(FieldFailure::new("zip").constraint("isPostalCode", "zip must be a postal code")),
        );

        assert_eq!(message(normalize(&tree)), "city should not be empty");
    }

    #[test]
    fn test_only_one_level_is_inspected() {
        let tree = ValidationFailureTree::new().with(
            FieldFailure::new("order").child(
                FieldFailure::new("customer")
                    .constraint("isDefined", "customer should be defined")
                    .child(FieldFailure::new("id").constraint("isUuid", "id must be a UUID")),
            ),
        );

        assert_eq!(message(normalize(&tree)), "customer should be defined");
    }

    #[test]
    fn test_missing_constraints_fall_back() {
        let tree = ValidationFailureTree::new()
            .with(FieldFailure::new("items").child(FieldFailure::new("0")));

        assert_eq!(message(normalize(&tree)), FALLBACK_MESSAGE);
    }

    #[test]
    fn test_tree_deserializes_in_order() {
        let tree: ValidationFailureTree = serde_json::from_str(
            r#"[{"property":"password","constraints":{"minLength":"password is too short","matches":"password is too weak"}}]"#,
        )
        .unwrap();

        assert_eq!(message(normalize(&tree)), "password is too weak");
    }

    #[derive(Debug, Deserialize)]
    struct CreateUser {
        email: String,
        age: i64,
    }

    impl Validate for CreateUser {
        fn validate(&self) -> ValidationFailureTree {
            let mut failures = ValidationFailureTree::new();
            if !self.email.contains('@') {
                failures.push(
                    FieldFailure::new("email")
                        .constraint("isNotEmpty", "email should not be empty")
                        .constraint("isEmail", "email must be an email"),
                );
            }
            if self.age < 0 {
                failures.push(FieldFailure::new("age").constraint("min", "age must not be less than 0"));
            }
            failures
        }
    }

    async fn create_user(ValidatedJson(user): ValidatedJson<CreateUser>) -> String {
        format!("{}:{}", user.email, user.age)
    }

    async fn post_json(body: &str) -> (StatusCode, serde_json::Value, String) {
        let app = Router::new().route("/users", post(create_user));
        let response = app
            .oneshot(
                HttpRequest::post("/users")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        let json = serde_json::from_str(&text).unwrap_or(serde_json::Value::Null);
        (status, json, text)
    }

    #[tokio::test]
    async fn test_extractor_passes_valid_body() {
        let (status, _, text) = post_json(r#"{"email":"a@b.io","age":30,"admin":true}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(text, "a@b.io:30");
    }

    #[tokio::test]
    async fn test_extractor_rejects_invalid_body() {
        let (status, json, _) = post_json(r#"{"email":"nope","age":-1}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["statusCode"], 400);
        assert_eq!(json["message"], "email must be an email");
        assert_eq!(json["error"], "Bad Request");
    }

    #[tokio::test]
    async fn test_extractor_rejects_malformed_json() {
        let (status, json, _) = post_json(r#"{"email":"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Bad Request");
        assert!(!json["message"].as_str().unwrap().is_empty());
    }
}
