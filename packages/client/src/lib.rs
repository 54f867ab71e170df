//! FreshBooks client - CRUD binding for the FreshBooks XML API.
//!
//! This crate maps resource records to FreshBooks request documents and
//! maps response documents back onto records. The `category` resource is
//! fully bound.
//!
//! # Example
//!
//! ```
//! use freshbooks_client::config;
//!
//! // Validate an account name and derive its endpoint
//! assert!(config::validate_account("acme-ltd").is_ok());
//! assert_eq!(
//!     config::api_url("acme-ltd"),
//!     "https://acme-ltd.freshbooks.com/api/2.1/xml-in"
//! );
//! ```
//!
//! ```no_run
//! use freshbooks_client::{ClientConfig, FreshBooks};
//!
//! # async fn demo() -> freshbooks_client::Result<()> {
//! let client = FreshBooks::from_config(&ClientConfig::new("acme-ltd", "token")?)?;
//! let mut category = client.category();
//! category.set_name("Travel");
//! let created = category.create().await?;
//! println!("created category {:?}", created.id());
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Configuration constants, validation and connection settings
//! - [`types`]: Verbs, field sets and records
//! - [`schema`]: Resource schema descriptors
//! - [`error`]: Error types and Result alias
//! - [`xml`]: Request building and response reading
//! - [`transport`]: Transport trait (plus a mock under `test-utils`)
//! - [`http`]: HTTP transport
//! - [`client`]: Parent client handed to every entity
//! - [`category`]: The category resource
//! - [`cli`]: Command-line interface

pub mod category;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod schema;
pub mod transport;
pub mod types;
pub mod xml;

// Re-export commonly used items
pub use category::Category;
pub use client::FreshBooks;
pub use config::{validate_account, ClientConfig};
pub use error::{FreshBooksError, Result};
pub use http::HttpTransport;
pub use transport::Transport;
pub use types::{FieldSet, ListOptions, Record, Verb};
