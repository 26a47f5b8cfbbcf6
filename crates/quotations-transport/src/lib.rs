//! HTTP transport for per-session quotation lists.
//!
//! Provides:
//! - Request shapes and validation
//! - Axum router for `/quotations` (feature: http)

pub mod protocol;

#[cfg(feature = "http")]
pub mod http;

pub use protocol::{CreateQuotationRequest, ErrorBody, SessionQuery, ValidationError};
