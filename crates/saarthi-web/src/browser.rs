//! Browser Integrations
//!
//! `localStorage`-backed token store and `window.confirm` prompts.

use saarthi_core::{ClientError, Confirm, Result, TokenStore};

/// Keeps the session token in `window.localStorage` under a fixed key
#[derive(Clone, Debug)]
pub struct LocalTokenStore {
    key: String,
}

impl LocalTokenStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<web_sys::Storage> {
        web_sys::window()
            .ok_or_else(|| ClientError::Storage("no window".into()))?
            .local_storage()
            .map_err(|e| ClientError::Storage(format!("{e:?}")))?
            .ok_or_else(|| ClientError::Storage("localStorage disabled".into()))
    }
}

impl TokenStore for LocalTokenStore {
    fn load(&self) -> Option<String> {
        Self::storage()
            .ok()?
            .get_item(&self.key)
            .ok()
            .flatten()
            .filter(|token| !token.is_empty())
    }

    fn save(&self, token: &str) -> Result<()> {
        Self::storage()?
            .set_item(&self.key, token)
            .map_err(|e| ClientError::Storage(format!("{e:?}")))
    }

    fn clear(&self) -> Result<()> {
        Self::storage()?
            .remove_item(&self.key)
            .map_err(|e| ClientError::Storage(format!("{e:?}")))
    }
}

/// Native `window.confirm` dialog. Anything but an explicit OK is a no.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserConfirm;

impl Confirm for BrowserConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(prompt).ok())
            .unwrap_or(false)
    }
}
