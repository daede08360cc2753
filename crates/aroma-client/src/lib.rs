//! # aroma-client: Cloud API Client for Aroma POS
//!
//! This crate is the terminal's only network boundary: it looks up products
//! and submits finished sales to the cloud API over HTTPS.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Client Architecture                               │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                      SalesClient                                 │  │
//! │  │                                                                  │  │
//! │  │  One reqwest::Client, bearer token and timeout from config,     │  │
//! │  │  cheap to clone (clones share the connection pool)              │  │
//! │  └────────────────────────────┬─────────────────────────────────────┘  │
//! │                               │                                         │
//! │         ┌─────────────────────┼─────────────────────┐                  │
//! │         ▼                     ▼                     ▼                   │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────┐    │
//! │  │ fetch_product  │  │ fetch_product  │  │  create_sale           │    │
//! │  │   (by id)      │  │   _by_sku      │  │                        │    │
//! │  │                │  │                │  │  POST /sales with a    │    │
//! │  │ GET /products/ │  │ GET /products/ │  │  fresh clientRequestId │    │
//! │  │ {id}           │  │ sku/{sku}      │  │  for deduplication     │    │
//! │  └────────────────┘  └────────────────┘  └────────────────────────┘    │
//! │                                                                         │
//! │  Non-success statuses map to typed ApiError variants; the session      │
//! │  layer keys its keep-or-clear decision off them.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`client`] - The `SalesClient` itself
//! - [`config`] - API endpoint, store and device configuration
//! - [`error`] - API error types with retry/rejection categorization
//! - [`types`] - Wire DTOs (camelCase JSON) and payload assembly
//!
//! ## Usage
//!
//! ```rust,ignore
//! use aroma_client::{ClientConfig, CreateSaleRequest, SalesClient};
//!
//! let config = ClientConfig::load_or_default(None);
//! let client = SalesClient::new(&config)?;
//!
//! let product = client.fetch_product_by_sku("LAV-330").await?;
//!
//! let request = CreateSaleRequest::build(&cart, tenders.payments(), client.device_id());
//! let sale = client.create_sale(&request).await?;
//! println!("Document: {}", sale.document_number);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod client;
pub mod config;
pub mod error;
pub mod types;

// =============================================================================
// Re-exports
// =============================================================================

pub use client::SalesClient;
pub use config::{ApiSettings, ClientConfig, DeviceConfig, StoreConfig};
pub use error::{ApiError, ApiResult};
pub use types::{CreateSaleRequest, CreateSaleResponse, ProductRecord, SaleLine, TenderDto};
