//! Endpoint resolution
//!
//! Turns an [`AssetToken`] into a concrete [`FinancialAsset`]. Explicit ids
//! are looked up directly. Pool tokens select the pooled system account with
//! the largest dollar balance among those able to cover the request.

use crate::core::traits::AssetStore;
use crate::types::{AssetToken, FinancialAsset, PaymentError, PoolKind};
use tracing::{debug, warn};

/// Resolves source and target tokens against an asset store
pub struct AssetResolver<'a, A: AssetStore> {
    store: &'a A,
    pooled_asset_type: &'a str,
}

impl<'a, A: AssetStore> AssetResolver<'a, A> {
    /// # Arguments
    ///
    /// * `store` - Asset store to read from
    /// * `pooled_asset_type` - Account type id of the pooled system accounts
    pub fn new(store: &'a A, pooled_asset_type: &'a str) -> Self {
        Self {
            store,
            pooled_asset_type,
        }
    }

    /// Resolve a token to an asset
    ///
    /// # Arguments
    ///
    /// * `token` - Explicit id or pool selector
    /// * `requested_dollars` - Whole dollars of the transaction amount; pool
    ///   candidates must hold strictly more than this
    ///
    /// # Errors
    ///
    /// - `AssetResolutionFailure` if an explicit id does not exist
    /// - `NoPooledAssetAvailable` if no pool account qualifies
    pub fn resolve(
        &self,
        token: &AssetToken,
        requested_dollars: i64,
    ) -> Result<FinancialAsset, PaymentError> {
        match token {
            AssetToken::Explicit(id) => self.store.find_by_id(id).ok_or_else(|| {
                warn!(asset = %id, "explicit asset not found");
                PaymentError::asset_resolution_failure(id)
            }),
            AssetToken::SystemPool(kind) => self.select_pooled(*kind, requested_dollars),
        }
    }

    fn select_pooled(
        &self,
        kind: PoolKind,
        requested_dollars: i64,
    ) -> Result<FinancialAsset, PaymentError> {
        let candidates = self
            .store
            .find_pooled_candidates(self.pooled_asset_type, requested_dollars);

        // Highest dollar balance wins; equal balances go to the smallest id
        let selected = candidates
            .into_iter()
            .filter(|asset| {
                asset.active
                    && !asset.balance.is_negative()
                    && asset.balance.dollars() > requested_dollars
            })
            .min_by(|a, b| {
                b.balance
                    .dollars()
                    .cmp(&a.balance.dollars())
                    .then_with(|| a.id.cmp(&b.id))
            });

        match selected {
            Some(asset) => {
                debug!(pool = %kind, asset = %asset.id, "selected pooled asset");
                Ok(asset)
            }
            None => {
                warn!(pool = %kind, min_dollars = requested_dollars, "no pooled asset available");
                Err(PaymentError::no_pooled_asset(kind, requested_dollars))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CurrencyValue;

    /// Store that returns its pool list unfiltered, to exercise the resolver's own checks
    struct FixedPool {
        assets: Vec<FinancialAsset>,
    }

    impl AssetStore for FixedPool {
        fn find_by_id(&self, id: &str) -> Option<FinancialAsset> {
            self.assets.iter().find(|a| a.id == id).cloned()
        }

        fn find_pooled_candidates(&self, asset_type: &str, _min: i64) -> Vec<FinancialAsset> {
            self.assets
                .iter()
                .filter(|a| a.asset_type == asset_type)
                .cloned()
                .collect()
        }
    }

    fn pool_asset(id: &str, dollars: i64, negative: bool) -> FinancialAsset {
        FinancialAsset {
            id: id.to_string(),
            owner: "bank".to_string(),
            active: true,
            balance: CurrencyValue::new(dollars, 0, negative).unwrap(),
            asset_type: "3".to_string(),
        }
    }

    #[test]
    fn test_deposit_pool_selects_highest_eligible_balance() {
        let store = FixedPool {
            assets: vec![
                pool_asset("a", 400, false),
                pool_asset("b", 900, false),
                pool_asset("c", 50, true),
            ],
        };
        let resolver = AssetResolver::new(&store, "3");

        let asset = resolver
            .resolve(&AssetToken::SystemPool(PoolKind::Deposit), 500)
            .unwrap();

        assert_eq!(asset.id, "b");
    }

    #[test]
    fn test_negative_balance_is_never_selected() {
        let store = FixedPool {
            assets: vec![pool_asset("c", 5_000, true), pool_asset("d", 600, false)],
        };
        let resolver = AssetResolver::new(&store, "3");

        let asset = resolver
            .resolve(&AssetToken::SystemPool(PoolKind::Withdrawal), 500)
            .unwrap();

        assert_eq!(asset.id, "d");
    }

    #[test]
    fn test_ties_break_on_ascending_id() {
        let store = FixedPool {
            assets: vec![
                pool_asset("pool-z", 900, false),
                pool_asset("pool-a", 900, false),
                pool_asset("pool-m", 900, false),
            ],
        };
        let resolver = AssetResolver::new(&store, "3");

        let asset = resolver
            .resolve(&AssetToken::SystemPool(PoolKind::Deposit), 100)
            .unwrap();

        assert_eq!(asset.id, "pool-a");
    }

    #[test]
    fn test_threshold_is_strict() {
        let store = FixedPool {
            assets: vec![pool_asset("a", 500, false)],
        };
        let resolver = AssetResolver::new(&store, "3");

        let result = resolver.resolve(&AssetToken::SystemPool(PoolKind::Deposit), 500);

        assert_eq!(
            result.unwrap_err(),
            PaymentError::no_pooled_asset(PoolKind::Deposit, 500)
        );
    }

    #[test]
    fn test_other_pool_type_is_ignored() {
        let store = FixedPool {
            assets: vec![pool_asset("a", 900, false)],
        };
        let resolver = AssetResolver::new(&store, "7");

        let result = resolver.resolve(&AssetToken::SystemPool(PoolKind::Deposit), 10);

        assert!(matches!(
            result,
            Err(PaymentError::NoPooledAssetAvailable { .. })
        ));
    }

    #[test]
    fn test_explicit_id_lookup() {
        let store = FixedPool {
            assets: vec![pool_asset("a", 10, false)],
        };
        let resolver = AssetResolver::new(&store, "3");

        let found = resolver.resolve(&AssetToken::Explicit("a".to_string()), 0);
        let missing = resolver.resolve(&AssetToken::Explicit("zzz".to_string()), 0);

        assert_eq!(found.unwrap().id, "a");
        assert_eq!(
            missing.unwrap_err(),
            PaymentError::asset_resolution_failure("zzz")
        );
    }
}
