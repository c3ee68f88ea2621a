//! Category filter over loaded reports

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::report::ReportDocument;

/// Token that disables category filtering
pub const WILDCARD: &str = "all";

/// True when the request means "every category"
pub fn is_wildcard(requested: &str) -> bool {
    let requested = requested.trim();
    requested.is_empty() || requested.eq_ignore_ascii_case(WILDCARD)
}

/// Keep reports whose category contains `requested`, case-insensitively.
///
/// Substring matching lets partial requests such as `hep` select
/// `hepatique`. An empty or wildcard request returns the input unchanged.
pub fn filter_by_category(
    documents: &[Arc<ReportDocument>],
    requested: &str,
) -> Vec<Arc<ReportDocument>> {
    if is_wildcard(requested) {
        return documents.to_vec();
    }

    let needle = requested.trim().to_lowercase();
    documents
        .iter()
        .filter(|doc| doc.category.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Distinct categories, sorted
pub fn available_categories(documents: &[Arc<ReportDocument>]) -> Vec<String> {
    documents
        .iter()
        .map(|doc| doc.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
