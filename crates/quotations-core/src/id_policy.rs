//! Id assignment for newly created quotations.

use crate::{Quotation, QuotationId};

/// Derives the id for a record about to be appended to `current`.
pub trait IdPolicy: Send + Sync {
    /// Id for the next record.
    fn next_id(&self, current: &[Quotation]) -> QuotationId;

    /// Short name, used in logs and configuration.
    fn name(&self) -> &'static str;
}

impl<P: IdPolicy + ?Sized> IdPolicy for Box<P> {
    fn next_id(&self, current: &[Quotation]) -> QuotationId {
        (**self).next_id(current)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// `len + 1`.
///
/// Deletions do not renumber, so after any delete the new id can repeat an
/// id still present in the list. This is the default behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct LengthPlusOne;

impl IdPolicy for LengthPlusOne {
    fn next_id(&self, current: &[Quotation]) -> QuotationId {
        QuotationId::try_from(current.len())
            .unwrap_or(QuotationId::MAX)
            .saturating_add(1)
    }

    fn name(&self) -> &'static str {
        "length"
    }
}

/// `max(id) + 1`, or 1 for an empty list. Never repeats a live id.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxPlusOne;

impl IdPolicy for MaxPlusOne {
    fn next_id(&self, current: &[Quotation]) -> QuotationId {
        current
            .iter()
            .map(|q| q.id)
            .max()
            .map_or(1, |max| max.saturating_add(1))
    }

    fn name(&self) -> &'static str {
        "max"
    }
}
