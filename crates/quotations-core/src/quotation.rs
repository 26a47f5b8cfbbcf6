//! Quotation records and the default seed list.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Quotation identifier.
///
/// Only unique at the moment a record is created; see [`crate::IdPolicy`].
pub type QuotationId = i64;

/// A single stored quotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quotation {
    /// Record id within its session list.
    pub id: QuotationId,
    /// The quoted content.
    pub text: String,
    /// Who said it.
    pub author: String,
    /// Informational only; sticky records can still be deleted.
    pub is_sticky: bool,
}

/// Validated payload for creating a quotation.
///
/// Carries `sticky` as it arrives from the caller. The stored record uses
/// `is_sticky`, and [`NewQuotation::into_quotation`] is where the two meet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuotation {
    /// The quoted content.
    pub text: String,
    /// Who said it.
    pub author: String,
    /// Becomes `is_sticky` on the stored record.
    pub sticky: bool,
}

impl NewQuotation {
    /// Create a non-sticky payload.
    #[must_use]
    pub fn new(text: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
            sticky: false,
        }
    }

    /// Set the sticky flag.
    #[must_use]
    pub const fn sticky(mut self, sticky: bool) -> Self {
        self.sticky = sticky;
        self
    }

    /// Turn the payload into a stored record with the given id.
    #[must_use]
    pub fn into_quotation(self, id: QuotationId) -> Quotation {
        Quotation {
            id,
            text: self.text,
            author: self.author,
            is_sticky: self.sticky,
        }
    }
}

const DEFAULT_ENTRIES: [(&str, &str); 5] = [
    (
        "Humanity is smart. Sometime in the technology world we think we \
         are smarter, but we are not smarter than you.",
        "Mitchell Baker",
    ),
    (
        "A computer would deserve to be called intelligent if it could \
         deceive a human into believing that it was human.",
        "Alan Turing",
    ),
    (
        "If you optimize everything, you will always be unhappy.",
        "Donald Knuth",
    ),
    (
        "If you don't fail at least 90 percent of the time, you're not \
         aiming high enough",
        "Alan Kay",
    ),
    ("Colorless green ideas sleep furiously.", "Noam Chomsky"),
];

/// The process-wide default list.
///
/// Built on first access and never mutated. Ids are 1-based positions and
/// every record is sticky.
#[must_use]
pub fn default_quotations() -> &'static [Quotation] {
    static DEFAULTS: OnceLock<Vec<Quotation>> = OnceLock::new();
    DEFAULTS.get_or_init(|| {
        (1..)
            .zip(DEFAULT_ENTRIES)
            .map(|(id, (text, author))| {
                NewQuotation::new(text, author)
                    .sticky(true)
                    .into_quotation(id)
            })
            .collect()
    })
}
