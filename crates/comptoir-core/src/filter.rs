//! # Filtering/Search Projections
//!
//! Pure functions deriving filtered views over in-memory collections.
//! Nothing here touches persistence; list screens fetch a collection once
//! and project it through these.

use chrono::{DateTime, Utc};

use crate::document::FinancialDocument;
use crate::types::{Counterparty, DocumentStatus};

/// Documents whose counterparty name or reference contains the needle,
/// case-insensitively. An empty needle matches everything.
pub fn documents_by_name<'a>(
    docs: &'a [FinancialDocument],
    needle: &str,
) -> Vec<&'a FinancialDocument> {
    let needle = needle.trim().to_lowercase();
    docs.iter()
        .filter(|d| {
            needle.is_empty()
                || d.counterparty_name.to_lowercase().contains(&needle)
                || d.reference.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Documents dated within the inclusive `[from, to]` range; either bound
/// may be open.
pub fn documents_by_date_range<'a>(
    docs: &'a [FinancialDocument],
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> Vec<&'a FinancialDocument> {
    docs.iter()
        .filter(|d| from.is_none_or(|f| d.date >= f) && to.is_none_or(|t| d.date <= t))
        .collect()
}

/// Documents in the given payment status.
pub fn documents_by_status(
    docs: &[FinancialDocument],
    status: DocumentStatus,
) -> Vec<&FinancialDocument> {
    docs.iter().filter(|d| d.status == status).collect()
}

/// Counterparties whose name contains the needle, case-insensitively.
pub fn counterparties_by_name<'a>(
    list: &'a [Counterparty],
    needle: &str,
) -> Vec<&'a Counterparty> {
    let needle = needle.trim().to_lowercase();
    list.iter()
        .filter(|c| needle.is_empty() || c.name.to_lowercase().contains(&needle))
        .collect()
}

/// Counterparties carrying the given classification tag (exact,
/// case-insensitive).
pub fn counterparties_by_category<'a>(
    list: &'a [Counterparty],
    category: &str,
) -> Vec<&'a Counterparty> {
    list.iter()
        .filter(|c| c.category.eq_ignore_ascii_case(category))
        .collect()
}
