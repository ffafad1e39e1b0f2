//! Ledger endpoint types
//!
//! A [`FinancialAsset`] is anything a transaction can move money from or to:
//! a bank account, a card, or a loan. Requests name their endpoints with an
//! [`AssetToken`], which is either an explicit asset id or a request to draw
//! on the pooled system accounts.

use super::currency::CurrencyValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Asset identifier
pub type AssetId = String;

/// Account type id of the pooled system accounts
pub const DEFAULT_POOLED_ASSET_TYPE: &str = "3";

/// Any account, card, or loan ledger endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialAsset {
    /// Unique asset id
    pub id: AssetId,

    /// Owning user id
    pub owner: String,

    /// Whether the asset is open for new activity
    pub active: bool,

    /// Current ledger balance
    pub balance: CurrencyValue,

    /// Account type id; pooled system accounts carry the configured pool type
    pub asset_type: String,
}

/// Which pooled counterparty a request asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoolKind {
    /// Funds enter the ledger; a pool account acts as the source
    Deposit,
    /// Funds leave the ledger; a pool account acts as the target
    Withdrawal,
}

impl PoolKind {
    /// The literal request value that selects this pool
    pub fn sentinel(self) -> &'static str {
        match self {
            PoolKind::Deposit => "Deposit",
            PoolKind::Withdrawal => "Withdrawal",
        }
    }
}

impl fmt::Display for PoolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sentinel())
    }
}

/// Reference to a transaction endpoint as given by the caller
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetToken {
    /// A concrete asset id
    Explicit(AssetId),
    /// Any eligible pooled system account
    SystemPool(PoolKind),
}

impl AssetToken {
    /// Interpret a raw source reference; `"Deposit"` selects the deposit pool
    pub fn source(raw: &str) -> Self {
        if raw == PoolKind::Deposit.sentinel() {
            AssetToken::SystemPool(PoolKind::Deposit)
        } else {
            AssetToken::Explicit(raw.to_string())
        }
    }

    /// Interpret a raw target reference; `"Withdrawal"` selects the withdrawal pool
    pub fn target(raw: &str) -> Self {
        if raw == PoolKind::Withdrawal.sentinel() {
            AssetToken::SystemPool(PoolKind::Withdrawal)
        } else {
            AssetToken::Explicit(raw.to_string())
        }
    }

    /// Treat a pool token as the literal id it was spelled with
    ///
    /// Used on ledgers that have no pooled counterparties.
    pub fn into_explicit(self) -> Self {
        match self {
            AssetToken::SystemPool(kind) => AssetToken::Explicit(kind.sentinel().to_string()),
            explicit => explicit,
        }
    }
}

impl fmt::Display for AssetToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetToken::Explicit(id) => f.write_str(id),
            AssetToken::SystemPool(kind) => f.write_str(kind.sentinel()),
        }
    }
}
