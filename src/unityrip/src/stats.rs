//! Aggregate statistics over the asset catalog

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::catalog::AssetRecord;
use crate::file_utils::format_bytes;

/// Summary of a completed extraction, recomputed from scratch per call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub total: usize,
    pub by_type: BTreeMap<String, usize>,
    pub total_size: String,
    pub bundle_count: usize,
}

/// Single pass over the catalog: counts by type, total size, distinct
/// bundle names. Pure — same input, same output.
pub fn build_stats(assets: &[AssetRecord]) -> StatsSummary {
    let mut by_type: BTreeMap<String, usize> = BTreeMap::new();
    let mut bundles: BTreeSet<&str> = BTreeSet::new();
    let mut total_bytes = 0u64;

    for asset in assets {
        *by_type.entry(asset.asset_type.clone()).or_insert(0) += 1;
        bundles.insert(&asset.bundle);
        total_bytes += asset.size_bytes;
    }

    StatsSummary {
        total: assets.len(),
        by_type,
        total_size: format_bytes(total_bytes),
        bundle_count: bundles.len(),
    }
}
