//! Query matching that decides which regions are displayed.

use std::sync::Arc;

use crate::types::RegionDataset;

/// Region shown when the query is blank.
pub const DEFAULT_REGION: &str = "Tamil Nadu";

/// Select the datasets to display for `query`.
///
/// A blank query selects only the dataset named exactly `default_region`.
/// Otherwise every dataset whose name contains the query, ignoring case,
/// is selected in its original order.
pub fn select(
    datasets: &[Arc<RegionDataset>],
    query: &str,
    default_region: &str,
) -> Vec<Arc<RegionDataset>> {
    if query.trim().is_empty() {
        return datasets
            .iter()
            .filter(|d| d.region.name == default_region)
            .cloned()
            .collect();
    }

    let needle = query.to_lowercase();
    datasets
        .iter()
        .filter(|d| d.region.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
