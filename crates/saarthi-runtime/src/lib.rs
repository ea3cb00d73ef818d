//! # saarthi-runtime
//!
//! Transports that carry `saarthi-core` requests over the network.
//!
//! ## Transports
//!
//! - **reqwest** (default): works natively and in the browser (fetch-backed on wasm32)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use saarthi_runtime::connect;
//! use saarthi_core::ApiConfig;
//!
//! let api = connect(ApiConfig::from_env());
//! let health = api.health().await?;
//! ```

#[cfg(feature = "reqwest")]
pub mod http;

#[cfg(feature = "reqwest")]
pub use http::{ReqwestTransport, connect};

// Re-export core types for convenience
pub use saarthi_core::{ApiClient, ApiConfig, ClientError, HttpTransport, Result};
