//! Session-keyed quotation storage and request handling.
//!
//! Provides:
//! - `QuotationService` - List, create and delete per session
//! - Storage implementations (memory)

pub mod manager;
pub mod storage;

pub use manager::{QuotationService, ServiceError};
