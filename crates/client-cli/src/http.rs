//! HTTP access to the AssetVerse API.
//!
//! One configured client pointed at a fixed origin, always carrying the
//! session cookie. `ApiClient` is the base surface; `SecureClient` wraps it
//! and tears down the local session when the server answers 401/403, so a
//! stale cookie can never leave the process in a half-logged-in state.

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{ApiMessage, Page};

use crate::session::SessionHandle;

/// Server message that signals the employee limit of the current package;
/// matched exactly to route the caller to the upgrade affordance.
pub const EMPLOYEE_LIMIT_MESSAGE: &str = "Employee limit reached. Please upgrade your package.";

/// Errors surfaced to views; every variant maps to one user-facing affordance
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Session cookie rejected on a secure call; identity already cleared
    #[error("session expired, please log in again")]
    AuthExpired,

    /// The server refused because the package's employee limit is reached
    #[error("{0}")]
    LimitReached(String),

    /// Any other server-reported failure, message shown verbatim
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Transport failure before a response was received
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body did not match the expected shape
    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    fn from_response(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ApiMessage>(body)
            .ok()
            .and_then(|m| m.message)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });

        if message == EMPLOYEE_LIMIT_MESSAGE {
            ApiError::LimitReached(message)
        } else {
            ApiError::Api {
                status: status.as_u16(),
                message,
            }
        }
    }
}

/// Base client: fixed origin, shared cookie store, JSON in/out
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    origin: String,
}

impl ApiClient {
    pub fn new(origin: &str) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self {
            client,
            origin: origin.trim_end_matches('/').to_string(),
        })
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// The underlying reqwest client, for calls outside the API origin
    /// (image hosting upload).
    pub fn raw(&self) -> &reqwest::Client {
        &self.client
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
        body: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, ApiError> {
        let url = format!("{}{}", self.origin, path);
        let mut request = self.client.request(method.clone(), &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        tracing::debug!(%method, %url, "api request");
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::debug!(%status, "api request failed");
            return Err(ApiError::from_response(status, &text));
        }

        if text.is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let value = self.send(Method::GET, path, &[], None).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// GET a list endpoint and normalize the response into the canonical
    /// page shape, whatever the server chose to return.
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<Page<T>, ApiError> {
        let value = self.send(Method::GET, path, query, None).await?;
        Ok(Page::from_value(value)?)
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body)?;
        let value = self.send(Method::POST, path, &[], Some(body)).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// POST with no payload (logout)
    pub async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        self.send(Method::POST, path, &[], Some(serde_json::json!({})))
            .await?;
        Ok(())
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body)?;
        let value = self.send(Method::PUT, path, &[], Some(body)).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn delete(&self, path: &str) -> Result<ApiMessage, ApiError> {
        let value = self.send(Method::DELETE, path, &[], None).await?;
        if value.is_null() {
            return Ok(ApiMessage::default());
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// Authenticated surface. Same methods as [`ApiClient`], plus the 401/403
/// interception: the stored identity is cleared before the error reaches the
/// caller, so the caller's own error handling still runs but every later
/// role gate sees a logged-out session.
#[derive(Clone)]
pub struct SecureClient {
    api: ApiClient,
    session: SessionHandle,
}

impl SecureClient {
    pub fn new(api: ApiClient, session: SessionHandle) -> Self {
        Self { api, session }
    }

    fn intercept(&self, err: ApiError) -> ApiError {
        if let ApiError::Api {
            status: 401 | 403, ..
        } = err
        {
            tracing::warn!("authenticated call rejected, clearing session");
            self.session.lock().expect("session lock").force_expire();
            return ApiError::AuthExpired;
        }
        err
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.api.get(path).await.map_err(|e| self.intercept(e))
    }

    pub async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<Page<T>, ApiError> {
        self.api
            .get_page(path, query)
            .await
            .map_err(|e| self.intercept(e))
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.api
            .post(path, body)
            .await
            .map_err(|e| self.intercept(e))
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.api.put(path, body).await.map_err(|e| self.intercept(e))
    }

    pub async fn delete(&self, path: &str) -> Result<ApiMessage, ApiError> {
        self.api.delete(path).await.map_err(|e| self.intercept(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_message_is_classified() {
        let body = format!("{{\"message\":\"{}\"}}", EMPLOYEE_LIMIT_MESSAGE);
        let err = ApiError::from_response(StatusCode::FORBIDDEN, &body);
        assert!(matches!(err, ApiError::LimitReached(_)));
    }

    #[test]
    fn test_other_messages_stay_generic() {
        let err = ApiError::from_response(
            StatusCode::BAD_REQUEST,
            "{\"message\":\"Asset not found\"}",
        );
        match err {
            ApiError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Asset not found");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_message_falls_back_to_status_reason() {
        let err = ApiError::from_response(StatusCode::INTERNAL_SERVER_ERROR, "");
        match err {
            ApiError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Internal Server Error");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_origin_trailing_slash_trimmed() {
        let api = ApiClient::new("https://api.example.com/").unwrap();
        assert_eq!(api.origin(), "https://api.example.com");
    }

    #[test]
    fn test_transport_failure_is_network_not_auth() {
        use crate::session::SessionState;
        use std::sync::{Arc, Mutex};

        // nothing listens on port 1; the call fails in transport, which must
        // not be mistaken for an auth rejection and must not expire the session
        let api = ApiClient::new("http://127.0.0.1:1").unwrap();
        let session: SessionHandle = Arc::new(Mutex::new(SessionState::default()));
        let secure = SecureClient::new(api, Arc::clone(&session));

        let err = tokio_test::block_on(secure.get::<serde_json::Value>("/users/me")).unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
        assert!(!session.lock().unwrap().was_expired());
    }
}
