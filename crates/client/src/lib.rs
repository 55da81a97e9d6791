//! `produto-client`
//!
//! **Responsibility:** typed access to the product REST API.
//!
//! This crate provides:
//! - [`ProductService`], a thin façade over the five product endpoints
//! - the [`Transport`] seam it talks through, and a reqwest-backed [`HttpTransport`]
//! - client configuration and error types
//!
//! Every operation returns a cold future: no request leaves the process until
//! the future is polled, and dropping it abandons the call.

pub mod config;
pub mod error;
pub mod http;
pub mod service;
pub mod transport;

pub use config::ClientConfig;
pub use error::{ClientError, ConfigError, TransportError};
pub use http::HttpTransport;
pub use service::ProductService;
pub use transport::{ApiRequest, ApiResponse, Transport};

pub use produto_products::{Link, Links, PageRequest, Product, ProductDraft, ProductId, ProductPage};
