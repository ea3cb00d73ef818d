//! # saarthi-core
//!
//! Platform-independent client logic for the GramSaarthi portal.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Flows                                 │
//! │  ┌────────────┐   ┌────────────┐   ┌────────────────────┐     │
//! │  │ PublicInfo │   │  AuthFlow  │   │     UsersFlow      │     │
//! │  └─────┬──────┘   └─────┬──────┘   └─────────┬──────────┘     │
//! │        └────────────────┼────────────────────┘                │
//! │                  ┌──────┴──────┐      ┌──────────────┐        │
//! │                  │  ApiClient  │      │  TokenStore  │        │
//! │                  └──────┬──────┘      └──────────────┘        │
//! │                  ┌──────┴────────┐                            │
//! │                  │ HttpTransport │  (Strategy)                │
//! │                  └───────────────┘                            │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Flows mutate plain, cloneable state containers so a UI layer can keep them
//! in its own reactive primitives. The `HttpTransport` and `TokenStore` traits
//! are the seams where the browser (or a test double) plugs in.

pub mod client;
pub mod config;
pub mod error;
pub mod flow;
pub mod model;
pub mod state;
pub mod storage;
pub mod transport;
pub mod validate;

pub use client::{ApiClient, RequestOptions};
pub use config::ApiConfig;
pub use error::{ClientError, Result};
pub use flow::{AuthFlow, Confirm, Outcome, PublicInfoLoader, UsersFlow};
pub use model::{Role, UserProfile, UserRecord};
pub use state::{AuthMode, AuthState, Page, PublicInfo, UsersState};
pub use storage::{MemoryTokenStore, TokenStore};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Method};
