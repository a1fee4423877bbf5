//! # API crate: HTTP access to the Itda backends
//!
//! [`HttpBackend`] implements the backend traits declared in `store`
//! ([`AuthBackend`], [`MeetingBackend`], [`AiBackend`]) with `reqwest`, which
//! runs on top of `fetch` in the browser and on hyper natively.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`endpoints`] | Base URL parsing and per-endpoint URL building |
//! | [`response`] | Status checking and error message extraction |
//!
//! ## Requests
//!
//! Calls to the main API send cookies (`credentials: include` in the browser,
//! a cookie jar natively) and, when a token is stored under [`TOKEN_KEY`], a
//! bearer `Authorization` header. The AI server is called anonymously.
//!
//! Payloads that still need normalizing are returned as raw JSON; the stores
//! run them through `store::normalize`.

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use store::backend::{AiBackend, AuthBackend, BackendError, MeetingBackend};
use store::config::ClientConfig;
use store::form::MeetingForm;
use store::models::{
    AiSearchRequest, AiSearchResult, LoginRequest, MeetingSearchRequest, PreferenceProfile,
    SignupRequest,
};
use store::normalize::{normalize_meeting, unwrap_record};
use store::persist::KeyValueStorage;

pub mod endpoints;
pub mod response;

pub use endpoints::Endpoints;

/// Storage key of the bearer token.
pub const TOKEN_KEY: &str = "token";

/// Keys a login payload may carry its bearer token under.
const TOKEN_FIELDS: &[&str] = &["token", "accessToken", "access_token"];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid base url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

type TokenStorage = Arc<dyn KeyValueStorage + Send + Sync>;

/// reqwest-backed implementation of every backend trait.
#[derive(Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    endpoints: Endpoints,
    tokens: Option<TokenStorage>,
}

impl std::fmt::Debug for HttpBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpBackend")
            .field("endpoints", &self.endpoints)
            .field("tokens", &self.tokens.is_some())
            .finish()
    }
}

fn build_client() -> Result<reqwest::Client, ConfigError> {
    let builder = reqwest::Client::builder();
    #[cfg(not(target_arch = "wasm32"))]
    let builder = builder.cookie_store(true);
    builder.build().map_err(|e| ConfigError::Client(e.to_string()))
}

/// Pull a bearer token out of a login payload, if it carries one.
pub fn token_from_payload(payload: &Value) -> Option<&str> {
    let record = unwrap_record(payload);
    TOKEN_FIELDS
        .iter()
        .find_map(|key| record.get(*key).and_then(Value::as_str))
        .filter(|t| !t.is_empty())
}

impl HttpBackend {
    pub fn new(endpoints: Endpoints) -> Result<Self, ConfigError> {
        Ok(Self {
            client: build_client()?,
            endpoints,
            tokens: None,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        Self::new(Endpoints::from_config(&config.api)?)
    }

    /// Builder method to read and write the bearer token through `storage`.
    pub fn with_token_storage(mut self, storage: impl KeyValueStorage + Send + Sync + 'static) -> Self {
        self.tokens = Some(Arc::new(storage));
        self
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    fn bearer_token(&self) -> Option<String> {
        self.tokens
            .as_ref()
            .and_then(|s| s.get_item(TOKEN_KEY))
            .filter(|t| !t.is_empty())
    }

    /// A request to the main API, with cookies and the stored bearer token.
    fn api_request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);
        #[cfg(target_arch = "wasm32")]
        let builder = builder.fetch_credentials_include();
        match self.bearer_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, BackendError> {
        let response = builder.send().await.map_err(response::transport_error)?;
        response::ensure_success(response).await
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, BackendError> {
        self.send(builder)
            .await?
            .json::<T>()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))
    }

    async fn send_unit(&self, builder: RequestBuilder) -> Result<(), BackendError> {
        self.send(builder).await.map(|_| ())
    }
}

impl AuthBackend for HttpBackend {
    async fn login(&self, request: &LoginRequest) -> Result<Value, BackendError> {
        let payload: Value = self
            .send_json(self.api_request(Method::POST, self.endpoints.login()).json(request))
            .await?;
        if let (Some(storage), Some(token)) = (&self.tokens, token_from_payload(&payload)) {
            storage.set_item(TOKEN_KEY, token);
        }
        Ok(payload)
    }

    async fn signup(&self, request: &SignupRequest) -> Result<(), BackendError> {
        self.send_unit(self.api_request(Method::POST, self.endpoints.signup()).json(request))
            .await
    }

    async fn logout(&self) -> Result<(), BackendError> {
        let result = self
            .send_unit(self.api_request(Method::POST, self.endpoints.logout()))
            .await;
        if let Some(storage) = &self.tokens {
            storage.remove_item(TOKEN_KEY);
        }
        result
    }

    async fn check_session(&self) -> Result<Value, BackendError> {
        self.send_json(self.api_request(Method::GET, self.endpoints.session()))
            .await
    }

    async fn save_preferences(&self, user_id: i64, profile: &PreferenceProfile) -> Result<(), BackendError> {
        self.send_unit(
            self.api_request(Method::PUT, self.endpoints.preferences(user_id))
                .json(profile),
        )
        .await
    }
}

impl MeetingBackend for HttpBackend {
    async fn list_meetings(&self) -> Result<Value, BackendError> {
        self.send_json(self.api_request(Method::GET, self.endpoints.meetings()))
            .await
    }

    async fn search_meetings(&self, request: &MeetingSearchRequest) -> Result<Value, BackendError> {
        self.send_json(
            self.api_request(Method::POST, self.endpoints.meeting_search())
                .json(request),
        )
        .await
    }

    async fn meeting_by_id(&self, meeting_id: i64) -> Result<Value, BackendError> {
        self.send_json(self.api_request(Method::GET, self.endpoints.meeting(meeting_id)))
            .await
    }

    async fn meetings_by_category(&self, category: &str, subcategory: Option<&str>) -> Result<Value, BackendError> {
        self.send_json(self.api_request(
            Method::GET,
            self.endpoints.category(category, subcategory),
        ))
        .await
    }

    async fn personalized_recommendation(&self, user_id: i64) -> Result<Value, BackendError> {
        self.send_json(self.api_request(Method::GET, self.endpoints.personalized(user_id)))
            .await
    }

    async fn create_meeting(&self, form: &MeetingForm) -> Result<i64, BackendError> {
        let payload: Value = self
            .send_json(self.api_request(Method::POST, self.endpoints.meetings()).json(form))
            .await?;
        normalize_meeting(unwrap_record(&payload))
            .meeting_id
            .ok_or_else(|| BackendError::Decode("create response has no meetingId".to_string()))
    }

    async fn join_meeting(&self, meeting_id: i64) -> Result<(), BackendError> {
        self.send_unit(self.api_request(Method::POST, self.endpoints.join(meeting_id)))
            .await
    }
}

impl AiBackend for HttpBackend {
    async fn search(&self, request: &AiSearchRequest) -> Result<AiSearchResult, BackendError> {
        self.send_json(
            self.client
                .post(self.endpoints.ai_search())
                .json(request),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use store::MemoryStorage;

    #[test]
    fn test_token_from_payload() {
        assert_eq!(token_from_payload(&json!({"userId": 1, "token": "abc"})), Some("abc"));
        assert_eq!(
            token_from_payload(&json!({"data": {"accessToken": "xyz"}})),
            Some("xyz")
        );
        assert_eq!(token_from_payload(&json!({"userId": 1, "token": ""})), None);
        assert_eq!(token_from_payload(&json!({"userId": 1})), None);
    }

    #[test]
    fn test_bearer_token_comes_from_storage() {
        let storage = MemoryStorage::new();
        let backend = HttpBackend::from_config(&ClientConfig::default())
            .unwrap()
            .with_token_storage(storage.clone());
        assert_eq!(backend.bearer_token(), None);

        storage.set_item(TOKEN_KEY, "t0k3n");
        assert_eq!(backend.bearer_token().as_deref(), Some("t0k3n"));

        let request = backend
            .api_request(Method::POST, backend.endpoints().join(4))
            .build()
            .unwrap();
        assert_eq!(
            request.headers().get("authorization").unwrap(),
            "Bearer t0k3n"
        );
        assert_eq!(request.url().path(), "/api/meetings/4/join");
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = ClientConfig::default().with_base_urls("::", "http://localhost:8000/api");
        assert!(matches!(
            HttpBackend::from_config(&config),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }
}
