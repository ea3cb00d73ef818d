//! reqwest Transport
//!
//! Implementation of `HttpTransport` on top of `reqwest`. No retries and no
//! timeout are configured.

use std::rc::Rc;

use async_trait::async_trait;
use saarthi_core::{
    ApiClient, ApiConfig,
    error::{ClientError, Result},
    transport::{HttpRequest, HttpResponse, HttpTransport, Method},
};

/// Network transport backed by a shared `reqwest::Client`
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuse an existing client (connection pool, custom TLS, ...)
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn convert_method(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }

    fn build(&self, request: HttpRequest) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .request(Self::convert_method(request.method), &request.url);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        builder
    }
}

#[async_trait(?Send)]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let response = self
            .build(request)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        // An unreadable body is treated like an empty one; the client then
        // falls back to its default message.
        let body = response.text().await.unwrap_or_else(|e| {
            tracing::warn!(status, "could not read response body: {}", e);
            String::new()
        });

        Ok(HttpResponse { status, body })
    }

    fn name(&self) -> &str {
        "reqwest"
    }
}

/// Build an `ApiClient` that talks to `config.base_url` over the network
pub fn connect(config: ApiConfig) -> ApiClient {
    ApiClient::new(config, Rc::new(ReqwestTransport::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_conversion() {
        assert_eq!(ReqwestTransport::convert_method(Method::Get), reqwest::Method::GET);
        assert_eq!(ReqwestTransport::convert_method(Method::Delete), reqwest::Method::DELETE);
    }

    #[test]
    fn test_request_building() {
        let transport = ReqwestTransport::new();
        let request = transport
            .build(HttpRequest {
                method: Method::Put,
                url: "http://localhost:8000/auth/me".into(),
                headers: vec![
                    ("Content-Type".into(), "application/json".into()),
                    ("Authorization".into(), "Bearer jwt-1".into()),
                ],
                body: Some("{}".into()),
            })
            .build()
            .unwrap();

        assert_eq!(request.method(), reqwest::Method::PUT);
        assert_eq!(request.url().path(), "/auth/me");
        assert_eq!(request.headers()["authorization"], "Bearer jwt-1");
        assert_eq!(request.body().and_then(|b| b.as_bytes()), Some(&b"{}"[..]));
    }

    #[tokio::test]
    async fn test_malformed_base_url_is_network_error() {
        // Rejected while building the request, so nothing is dialed
        let api = connect(ApiConfig::new("not a url"));
        let err = api.health().await.unwrap_err();
        assert!(matches!(err, ClientError::Network(_)));
        assert_eq!(err.user_message(), "Unable to reach the server. Please try again.");
    }
}
