//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `currency`: The dollars/cents money value
//! - `asset`: Ledger endpoints and endpoint tokens
//! - `transaction`: Transaction-related types and identifiers
//! - `page`: Paging of listings and search results
//! - `error`: Error types for the transaction engine

pub mod asset;
pub mod currency;
pub mod error;
pub mod page;
pub mod transaction;

pub use asset::{AssetId, AssetToken, FinancialAsset, PoolKind, DEFAULT_POOLED_ASSET_TYPE};
pub use currency::CurrencyValue;
pub use error::{ErrorResponse, PaymentError, ReferenceKind};
pub use page::{Page, PageRequest, DEFAULT_PAGE_SIZE};
pub use transaction::{
    FinancialTransaction, NewTransactionRequest, NumberedRequest, StatusRecord, TransactionId,
    TransactionSpecialization, TransactionStatus, TransactionView, TypeRecord, DEPOSIT_TYPE_NAME,
};
