//! Core business logic module
//!
//! This module contains the transaction processing components:
//! - `traits` - Store abstractions consumed by the engine
//! - `engine` - Transaction creation, update, search, and listing
//! - `asset_resolver` - Explicit id and pooled account resolution
//! - `balance_rules` - Accept/decline rules
//! - `status_resolver` - Decision to status and note mapping
//! - `search` - Free-text search classification and history filters
//! - `config` - Engine settings
//! - `asset_store`, `reference_store`, `transaction_store` - In-memory stores
//! - `batch_processor` - Concurrent request processing for the async strategy

pub mod asset_resolver;
pub mod asset_store;
pub mod balance_rules;
pub mod batch_processor;
pub mod config;
pub mod engine;
pub mod reference_store;
pub mod search;
pub mod status_resolver;
pub mod traits;
pub mod transaction_store;

pub use asset_resolver::AssetResolver;
pub use asset_store::InMemoryAssetStore;
pub use balance_rules::{BalanceRuleEngine, DeclineReason, Decision};
pub use batch_processor::{BatchProcessor, ProcessingResult};
pub use config::{EngineConfig, ReferencePolicy};
pub use engine::{HealthStatus, InMemoryEngine, TransactionEngine};
pub use reference_store::InMemoryReferenceStore;
pub use search::{SearchCriteria, TransactionFilter};
pub use status_resolver::{Resolution, StatusResolver};
pub use traits::{AssetStore, StatusStore, TransactionStore, TypeStore};
pub use transaction_store::InMemoryTransactionStore;
