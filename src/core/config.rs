//! Engine configuration

use crate::types::DEFAULT_POOLED_ASSET_TYPE;

/// How the engine treats a status or type name with no matching record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReferencePolicy {
    /// Reject the request with `ReferenceNotFound`
    #[default]
    Strict,
    /// Log a warning and continue without the record
    Lenient,
}

/// Settings of a [`TransactionEngine`](crate::core::TransactionEngine)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Account type id of the pooled system accounts
    pub pooled_asset_type: String,
    pub reference_policy: ReferencePolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pooled_asset_type: DEFAULT_POOLED_ASSET_TYPE.to_string(),
            reference_policy: ReferencePolicy::default(),
        }
    }
}
