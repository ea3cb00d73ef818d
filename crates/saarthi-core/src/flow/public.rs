//! Public Info
//!
//! Read-only branding and health, fetched concurrently at mount.

use crate::client::ApiClient;
use crate::state::PublicInfo;

#[derive(Clone, Debug)]
pub struct PublicInfoLoader {
    api: ApiClient,
}

impl PublicInfoLoader {
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Fetch branding and health together. Both succeed or neither is shown.
    pub async fn load(&self) -> PublicInfo {
        match futures::try_join!(self.api.branding(), self.api.health()) {
            Ok((branding, health)) => PublicInfo {
                branding: Some(branding),
                health: Some(health),
                error: None,
            },
            Err(e) => {
                tracing::warn!("public info unavailable: {}", e);
                PublicInfo {
                    error: Some(e.user_message()),
                    ..PublicInfo::default()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use serde_json::json;

    use super::*;
    use crate::config::ApiConfig;
    use crate::state::{FALLBACK_NAME, FALLBACK_STATUS};
    use crate::transport::{Method, MockTransport};

    #[tokio::test]
    async fn test_loads_both_records() {
        let mock = Rc::new(
            MockTransport::with_latency()
                .respond(
                    Method::Get,
                    "/branding",
                    200,
                    json!({ "name": "GramSaarthi", "tagline": "Village first", "description": "Portal" }),
                )
                .respond(Method::Get, "/health", 200, json!({ "status": "ok" })),
        );
        let loader = PublicInfoLoader::new(ApiClient::new(ApiConfig::default(), mock.clone()));

        let info = loader.load().await;

        assert_eq!(info.tagline(), "Village first");
        assert_eq!(info.status(), "ok");
        assert!(info.error.is_none());
        assert_eq!(mock.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_failure_keeps_fallback_copy() {
        let mock = Rc::new(
            MockTransport::new()
                .respond(Method::Get, "/branding", 200, json!({ "name": "Elsewhere" }))
                .respond(Method::Get, "/health", 503, json!({ "detail": "Database offline" })),
        );
        let loader = PublicInfoLoader::new(ApiClient::new(ApiConfig::default(), mock));

        let info = loader.load().await;

        assert_eq!(info.name(), FALLBACK_NAME);
        assert_eq!(info.status(), FALLBACK_STATUS);
        assert_eq!(info.error.as_deref(), Some("Database offline"));
    }
}
