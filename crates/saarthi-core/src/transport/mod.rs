//! HTTP Transport
//!
//! The seam between `ApiClient` and whatever actually moves bytes: `reqwest`
//! in the runtime crate, `MockTransport` in tests.

mod mock;

pub use mock::MockTransport;

use async_trait::async_trait;

use crate::error::Result;

/// HTTP verbs used by the portal API
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully built request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Path component of the URL (everything after the authority)
    pub fn path(&self) -> &str {
        let rest = self
            .url
            .split_once("://")
            .map_or(self.url.as_str(), |(_, rest)| rest);
        rest.find('/').map_or("/", |idx| &rest[idx..])
    }

    /// Body parsed as JSON, if there is one
    pub fn json_body(&self) -> Option<serde_json::Value> {
        self.body
            .as_deref()
            .and_then(|body| serde_json::from_str(body).ok())
    }
}

/// Raw response: status code and body text
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn json(status: u16, value: &serde_json::Value) -> Self {
        Self::new(status, value.to_string())
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Transport trait (Strategy pattern)
///
/// Futures are not `Send`: the client runs on a single UI thread and browser
/// fetch futures cannot cross threads.
#[async_trait(?Send)]
pub trait HttpTransport {
    /// Perform the request. Only failures to get *any* response are errors;
    /// non-2xx statuses come back as `Ok`.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;

    /// Transport name, for logs
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(url: &str) -> HttpRequest {
        HttpRequest {
            method: Method::Get,
            url: url.into(),
            headers: vec![("Content-Type".into(), "application/json".into())],
            body: None,
        }
    }

    #[test]
    fn test_path_extraction() {
        assert_eq!(request("http://localhost:8000/auth/me").path(), "/auth/me");
        assert_eq!(request("https://api.example.org").path(), "/");
        assert_eq!(request("/api/users/7").path(), "/api/users/7");
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        assert_eq!(request("/x").header("content-type"), Some("application/json"));
        assert_eq!(request("/x").header("Authorization"), None);
    }

    #[test]
    fn test_success_range() {
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(302, "").is_success());
        assert!(!HttpResponse::new(404, "").is_success());
    }
}
