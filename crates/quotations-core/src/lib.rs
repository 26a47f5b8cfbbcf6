//! Core abstractions for per-session quotation lists.
//!
//! This crate provides the fundamental building blocks:
//! - `Quotation` / `NewQuotation` - Stored record and its create payload
//! - `default_quotations` - The immutable seed list
//! - `IdPolicy` - How a new record's id is derived
//! - `QuotationStorage` - Storage trait for session-keyed lists

pub mod id_policy;
pub mod quotation;
pub mod traits;

pub use id_policy::{IdPolicy, LengthPlusOne, MaxPlusOne};
pub use quotation::{NewQuotation, Quotation, QuotationId, default_quotations};
pub use traits::{QuotationStorage, StorageError};
