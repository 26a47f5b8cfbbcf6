//! Request and error shapes for the quotations API.

use quotations_core::NewQuotation;
use serde::{Deserialize, Serialize};

/// Query string carried by every quotations request.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionQuery {
    /// Opaque session key.
    pub session: String,
}

impl SessionQuery {
    /// The session key, if non-empty.
    ///
    /// # Errors
    /// Returns error if the key is empty.
    pub fn session(&self) -> Result<&str, ValidationError> {
        if self.session.is_empty() {
            return Err(ValidationError::Empty("session"));
        }
        Ok(&self.session)
    }
}

/// Body of `POST /quotations`.
///
/// Unknown fields are rejected.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateQuotationRequest {
    /// The quoted content.
    pub text: String,
    /// Who said it.
    pub author: String,
    /// Stored as `isSticky`; absent means false.
    #[serde(default)]
    pub sticky: bool,
}

impl CreateQuotationRequest {
    /// Check required fields and convert into a create payload.
    ///
    /// # Errors
    /// Returns error if `text` or `author` is empty.
    pub fn validate(self) -> Result<NewQuotation, ValidationError> {
        if self.text.is_empty() {
            return Err(ValidationError::Empty("text"));
        }
        if self.author.is_empty() {
            return Err(ValidationError::Empty("author"));
        }
        Ok(NewQuotation::new(self.text, self.author).sticky(self.sticky))
    }
}

/// Validation failure on an otherwise well-formed request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("`{0}` must not be empty")]
    Empty(&'static str),
}

/// JSON body returned with every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// HTTP status code, repeated in the body.
    pub status_code: u16,
    /// Canonical reason phrase for the status.
    pub error: String,
    /// What was wrong with the request.
    pub message: String,
}
