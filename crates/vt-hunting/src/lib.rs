//! `vt-hunting` - async client for VirusTotal Livehunt hunting rulesets.
//!
//! ```text
//! HuntingApi   ← trait seam: page / update / create
//!     │
//!     ▼
//! VtClient     ← reqwest client, `x-apikey` auth, v3 JSON envelopes
//!     │
//!     ▼
//! HuntingError ← transport, API error object, or unparseable body
//! ```
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use vt_hunting::{HuntingApi, PageQuery, VtClient, DEFAULT_BASE_URL};
//!
//! let client = VtClient::new(&api_key, DEFAULT_BASE_URL, Duration::from_secs(30))?;
//! let page = client
//!     .ruleset_page(&PageQuery {
//!         filter: "name:auto_network_watch_* tag:autogenerated".into(),
//!         limit: 10,
//!         cursor: None,
//!     })
//!     .await?;
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod types;

pub use api::HuntingApi;
pub use client::{VtClient, DEFAULT_BASE_URL, RULESETS_PATH};
pub use error::HuntingError;
pub use types::{NewRuleset, Page, PageQuery, Ruleset};

/// Convenience `Result` alias for this crate.
pub type Result<T> = std::result::Result<T, HuntingError>;
