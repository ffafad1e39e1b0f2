//! Transaction Engine Library
//! # Overview
//!
//! This library creates account, card, and loan transactions for a banking
//! backend. Each proposed transaction has its endpoints resolved, is accepted
//! or declined against the endpoint balances, and is stored once in its
//! terminal status with an explanatory note. Stored transactions can be
//! updated, listed, and searched with free-text input.
//!
//! A CSV front end drives the engine with either a sync or an async strategy.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (CurrencyValue, FinancialAsset, FinancialTransaction, etc.)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::engine`] - Creation orchestration, updates, search, listings
//!   - [`core::asset_resolver`] - Explicit id and pooled account resolution
//!   - [`core::balance_rules`] - Accept/decline rules
//!   - [`core::status_resolver`] - Terminal status and decline notes
//!   - [`core::search`] - Search input classification
//!   - [`core::traits`] - Store abstractions, with in-memory implementations
//! - [`io`] - CSV reading and writing
//! - [`strategy`] - Pluggable sync/async processing pipelines
//!
//! # Accept/Decline Rules
//!
//! Balances are compared in whole dollars. A transaction is approved when the
//! source covers the amount and the amount does not exceed the target
//! balance. Transactions of type `Deposit` are always approved.
//!
//! # Pooled System Accounts
//!
//! On the account ledger, a source of `Deposit` or a target of `Withdrawal`
//! stands for the bank's pooled accounts: the active pool account with the
//! largest dollar balance above the amount is used.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{EngineConfig, InMemoryEngine, ReferencePolicy, TransactionEngine};
pub use io::{load_assets, ResultWriter};
pub use types::{
    CurrencyValue, FinancialAsset, FinancialTransaction, NewTransactionRequest, PaymentError,
    TransactionSpecialization, TransactionStatus, TransactionView,
};
