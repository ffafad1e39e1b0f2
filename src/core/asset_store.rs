//! In-memory asset ledger
//!
//! This module provides the `InMemoryAssetStore`, a read-only map of asset id
//! to [`FinancialAsset`] loaded once before processing starts. Balances are
//! never written by the engine; the ledger-update collaborator is external.

use crate::core::traits::AssetStore;
use crate::types::{AssetId, FinancialAsset};
use std::collections::HashMap;

/// Read-only in-memory implementation of [`AssetStore`]
#[derive(Debug, Default, Clone)]
pub struct InMemoryAssetStore {
    /// Map of asset ids to assets
    assets: HashMap<AssetId, FinancialAsset>,
}

impl InMemoryAssetStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a set of assets
    ///
    /// If two assets share an id, the last one wins.
    pub fn from_assets(assets: impl IntoIterator<Item = FinancialAsset>) -> Self {
        let mut store = Self::new();
        for asset in assets {
            store.insert(asset);
        }
        store
    }

    /// Add or replace an asset
    pub fn insert(&mut self, asset: FinancialAsset) {
        self.assets.insert(asset.id.clone(), asset);
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Get all assets sorted by id
    pub fn get_all_assets(&self) -> Vec<&FinancialAsset> {
        let mut assets: Vec<&FinancialAsset> = self.assets.values().collect();
        assets.sort_by(|a, b| a.id.cmp(&b.id));
        assets
    }
}

impl AssetStore for InMemoryAssetStore {
    fn find_by_id(&self, id: &str) -> Option<FinancialAsset> {
        self.assets.get(id).cloned()
    }

    fn find_pooled_candidates(&self, asset_type: &str, min_dollars: i64) -> Vec<FinancialAsset> {
        self.get_all_assets()
            .into_iter()
            .filter(|asset| {
                asset.active
                    && asset.asset_type == asset_type
                    && !asset.balance.is_negative()
                    && asset.balance.dollars() > min_dollars
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CurrencyValue;

    fn asset(id: &str, asset_type: &str, cents: i64, active: bool) -> FinancialAsset {
        FinancialAsset {
            id: id.to_string(),
            owner: "bank".to_string(),
            active,
            balance: CurrencyValue::from_cents(cents),
            asset_type: asset_type.to_string(),
        }
    }

    #[test]
    fn test_find_by_id() {
        let store = InMemoryAssetStore::from_assets([asset("a", "1", 100, true)]);

        assert_eq!(store.find_by_id("a").map(|a| a.id), Some("a".to_string()));
        assert!(store.find_by_id("missing").is_none());
    }

    #[test]
    fn test_pooled_candidates_filter() {
        let store = InMemoryAssetStore::from_assets([
            asset("pool-low", "3", 40_000, true),
            asset("pool-high", "3", 90_000, true),
            asset("pool-negative", "3", -5_000, true),
            asset("pool-inactive", "3", 100_000, false),
            asset("checking", "1", 100_000, true),
            asset("pool-exact", "3", 50_000, true),
        ]);

        let candidates = store.find_pooled_candidates("3", 500);
        let ids: Vec<&str> = candidates.iter().map(|a| a.id.as_str()).collect();

        // Strictly greater than the threshold, non-negative, active, pool type only
        assert_eq!(ids, vec!["pool-high"]);
    }

    #[test]
    fn test_duplicate_ids_last_wins() {
        let store = InMemoryAssetStore::from_assets([
            asset("a", "1", 100, true),
            asset("a", "1", 200, true),
        ]);

        assert_eq!(store.len(), 1);
        assert_eq!(store.find_by_id("a").unwrap().balance, CurrencyValue::from_cents(200));
    }
}
