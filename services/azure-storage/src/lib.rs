//! Shared Key signing for blob and queue storage.
//!
//! This crate signs storage REST requests with the Shared Key scheme:
//! the request is canonicalized into a string to sign, which is hashed with
//! HMAC-SHA256 keyed by the account key and sent as
//! `Authorization: SharedKey <account>:<signature>`.
//!
//! # Example
//!
//! ```rust,no_run
//! use storsign_azure_storage::{Config, DefaultCredentialProvider, RequestSigner, Service};
//! use storsign_core::{Context, OsEnv, Result, Signer};
//!
//! # async fn example() -> Result<()> {
//! let ctx = Context::new().with_env(OsEnv);
//! let config = Config::default().from_env(&ctx, Service::Queue)?;
//!
//! let mut builder = RequestSigner::new();
//! if let Some(version) = &config.service_version {
//!     builder = builder.with_service_version(version);
//! }
//! let signer = Signer::new(ctx, DefaultCredentialProvider::new(&config), builder);
//!
//! let mut parts = http::Request::get("http://127.0.0.1:10001/devstoreaccount1/myqueue/messages")
//!     .body(())
//!     .unwrap()
//!     .into_parts()
//!     .0;
//! signer.sign(&mut parts).await?;
//! # Ok(())
//! # }
//! ```
//!
//! The canonicalization itself is exposed as plain functions, see [`sign`]
//! and [`string_to_sign`].

mod constants;

mod config;
pub use config::{Config, Service};

mod connection_string;

mod credential;
pub use credential::Credential;

mod error_response;
pub use error_response::{StorageErrorResponse, AUTHENTICATION_FAILED};

mod sign_request;
pub use sign_request::{format_authorization, sign, string_to_sign, ContentLength, RequestSigner};

mod provide_credential;
pub use provide_credential::*;
