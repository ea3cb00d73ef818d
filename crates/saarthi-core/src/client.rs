//! API Client
//!
//! Thin JSON wrapper over an `HttpTransport`: builds headers, attaches the
//! bearer token, and turns non-2xx responses into `ClientError::Status`
//! carrying the server's `detail` message.

use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::{ClientError, Result};
use crate::model::{
    Branding, Health, LoginRequest, MessageResponse, NewUser, RegisterRequest, TokenResponse,
    UpdateMeRequest, UserPatch, UserProfile, UserRecord,
};
use crate::transport::{HttpRequest, HttpTransport, Method};

/// Per-request options. `RequestOptions::default()` is a bare GET.
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Value>,
    pub token: Option<String>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post() -> Self {
        Self::with_method(Method::Post)
    }

    pub fn put() -> Self {
        Self::with_method(Method::Put)
    }

    pub fn delete() -> Self {
        Self::with_method(Method::Delete)
    }

    fn with_method(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// Attach a JSON body
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Attach a bearer token
    #[must_use]
    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

/// JSON client for the portal API
#[derive(Clone)]
pub struct ApiClient {
    config: ApiConfig,
    transport: Rc<dyn HttpTransport>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .field("transport", &self.transport.name())
            .finish()
    }
}

impl ApiClient {
    pub fn new(config: ApiConfig, transport: Rc<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Perform a request and decode the JSON body into `T`
    pub async fn request<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<T> {
        let value = self.send(path, options).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Perform a request and return the parsed body.
    ///
    /// An empty or unparseable body reads as `{}`.
    pub async fn send(&self, path: &str, options: RequestOptions) -> Result<Value> {
        let request = self.build(path, options)?;
        let method = request.method;
        tracing::debug!(%method, url = %request.url, "api request");

        let response = self.transport.send(request).await.inspect_err(|e| {
            tracing::warn!(%method, path, "request failed: {}", e);
        })?;

        let data = parse_body(&response.body);

        if response.is_success() {
            Ok(data)
        } else {
            let detail = data
                .get("detail")
                .and_then(Value::as_str)
                .filter(|d| !d.trim().is_empty());
            tracing::warn!(%method, path, status = response.status, detail, "api error");
            Err(ClientError::status(response.status, detail))
        }
    }

    fn build(&self, path: &str, options: RequestOptions) -> Result<HttpRequest> {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        if let Some(token) = options.token.as_deref().filter(|t| !t.is_empty()) {
            headers.push(("Authorization".into(), format!("Bearer {token}")));
        }

        let body = options.body.as_ref().map(serde_json::to_string).transpose()?;

        Ok(HttpRequest {
            method: options.method,
            url: self.config.url(path),
            headers,
            body,
        })
    }

    // ------------------------------------------------------------------
    // Public endpoints
    // ------------------------------------------------------------------

    pub async fn branding(&self) -> Result<Branding> {
        self.request("/branding", RequestOptions::get()).await
    }

    pub async fn health(&self) -> Result<Health> {
        self.request("/health", RequestOptions::get()).await
    }

    // ------------------------------------------------------------------
    // Auth
    // ------------------------------------------------------------------

    pub async fn register(&self, body: &RegisterRequest) -> Result<Value> {
        self.send("/auth/register", RequestOptions::post().json(body)?).await
    }

    pub async fn login(&self, body: &LoginRequest) -> Result<TokenResponse> {
        self.request("/auth/login", RequestOptions::post().json(body)?).await
    }

    pub async fn me(&self, token: &str) -> Result<UserProfile> {
        self.request("/auth/me", RequestOptions::get().bearer(token)).await
    }

    pub async fn update_me(&self, token: &str, body: &UpdateMeRequest) -> Result<UserProfile> {
        self.request("/auth/me", RequestOptions::put().json(body)?.bearer(token))
            .await
    }

    pub async fn delete_me(&self, token: &str) -> Result<MessageResponse> {
        self.request("/auth/me", RequestOptions::delete().bearer(token))
            .await
    }

    // ------------------------------------------------------------------
    // Users CRUD
    // ------------------------------------------------------------------

    pub async fn list_users(&self) -> Result<Vec<UserRecord>> {
        self.request("/api/users", RequestOptions::get()).await
    }

    pub async fn get_user(&self, id: &str) -> Result<UserRecord> {
        self.request(&user_path(id), RequestOptions::get()).await
    }

    pub async fn create_user(&self, body: &NewUser) -> Result<UserRecord> {
        self.request("/api/users", RequestOptions::post().json(body)?).await
    }

    pub async fn update_user(&self, id: &str, body: &UserPatch) -> Result<UserRecord> {
        self.request(&user_path(id), RequestOptions::put().json(body)?).await
    }

    /// The API answers 204 with no body; nothing to decode.
    pub async fn delete_user(&self, id: &str) -> Result<()> {
        self.send(&user_path(id), RequestOptions::delete()).await.map(|_| ())
    }
}

fn user_path(id: &str) -> String {
    format!("/api/users/{id}")
}

fn parse_body(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
}
