//! Error types for the transaction engine
//!
//! This module defines all error types that can occur while creating,
//! updating, and searching transactions, plus the CSV boundary errors of the
//! command-line front end.
//!
//! # Error Categories
//!
//! - **Client Errors**: Incorrect specialization, unresolvable assets, unknown
//!   reference records, missing transactions. These map to a client error
//!   response carrying a timestamp and message.
//! - **Internal Errors**: Creation and storage failures.
//! - **Boundary Errors**: File I/O and CSV parsing problems.

use super::asset::PoolKind;
use super::transaction::TransactionSpecialization;
use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Which kind of reference record a lookup was for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReferenceKind {
    Status,
    Type,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceKind::Status => f.write_str("Transaction status"),
            ReferenceKind::Type => f.write_str("Transaction type"),
        }
    }
}

/// Main error type for the transaction engine
///
/// Each variant includes the context needed to explain the failure to the
/// caller without consulting logs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaymentError {
    /// File not found at the specified path
    ///
    /// This is a fatal error that prevents processing from starting.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// Asset ledger row that cannot be read
    ///
    /// Fatal: the ledger load stops at the first bad row. `line` is the
    /// file line of that row, counting the header as line 1.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Money value that cannot be represented as dollars and cents
    #[error("Invalid amount '{amount}': {reason}")]
    InvalidAmount {
        /// The rejected amount as given
        amount: String,
        /// Why it was rejected
        reason: String,
    },

    /// The request is tagged for a different ledger than the one invoked
    ///
    /// Raised before any lookup or write takes place.
    #[error("Unable to create {expected} transaction from request with {actual} specialization")]
    IncorrectSpecialization {
        /// Ledger that was invoked
        expected: TransactionSpecialization,
        /// Specialization carried by the request
        actual: TransactionSpecialization,
    },

    /// An explicit asset id does not exist
    #[error("Asset '{reference}' could not be resolved")]
    AssetResolutionFailure {
        /// The id as given by the caller
        reference: String,
    },

    /// No pooled system account can cover the requested amount
    #[error("No {pool} pool asset holds more than {min_dollars} dollars")]
    NoPooledAssetAvailable {
        /// Pool that was asked for
        pool: PoolKind,
        /// Dollar threshold candidates had to exceed
        min_dollars: i64,
    },

    /// A status or type record could not be found by name
    #[error("{kind} '{name}' not found")]
    ReferenceNotFound {
        /// Kind of reference record
        kind: ReferenceKind,
        /// Name that was looked up
        name: String,
    },

    /// Update target does not exist
    #[error("Transaction {id} not found")]
    TransactionNotFound {
        /// Transaction id that was not found
        id: String,
    },

    /// Internal failure while creating a transaction
    #[error("Transaction creation failed: {message}")]
    CreationFailed {
        /// Description of the underlying failure
        message: String,
    },

    /// Failure reported by a store outside the creation path
    #[error("Storage error: {message}")]
    StorageError {
        /// Description of the store failure
        message: String,
    },
}

// Conversion from io::Error to PaymentError
impl From<std::io::Error> for PaymentError {
    fn from(error: std::io::Error) -> Self {
        PaymentError::IoError {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl PaymentError {
    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: &str, reason: &str) -> Self {
        PaymentError::InvalidAmount {
            amount: amount.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an IncorrectSpecialization error
    pub fn incorrect_specialization(
        expected: TransactionSpecialization,
        actual: TransactionSpecialization,
    ) -> Self {
        PaymentError::IncorrectSpecialization { expected, actual }
    }

    /// Create an AssetResolutionFailure error
    pub fn asset_resolution_failure(reference: &str) -> Self {
        PaymentError::AssetResolutionFailure {
            reference: reference.to_string(),
        }
    }

    /// Create a NoPooledAssetAvailable error
    pub fn no_pooled_asset(pool: PoolKind, min_dollars: i64) -> Self {
        PaymentError::NoPooledAssetAvailable { pool, min_dollars }
    }

    /// Create a ReferenceNotFound error
    pub fn reference_not_found(kind: ReferenceKind, name: &str) -> Self {
        PaymentError::ReferenceNotFound {
            kind,
            name: name.to_string(),
        }
    }

    /// Create a TransactionNotFound error
    pub fn transaction_not_found(id: &str) -> Self {
        PaymentError::TransactionNotFound { id: id.to_string() }
    }

    /// Create a CreationFailed error
    pub fn creation_failed(message: impl Into<String>) -> Self {
        PaymentError::CreationFailed {
            message: message.into(),
        }
    }

    /// Create a StorageError error
    pub fn storage(message: impl Into<String>) -> Self {
        PaymentError::StorageError {
            message: message.into(),
        }
    }

    /// Whether the error stems from an endpoint that could not be resolved
    pub fn is_asset_resolution_failure(&self) -> bool {
        matches!(
            self,
            PaymentError::AssetResolutionFailure { .. } | PaymentError::NoPooledAssetAvailable { .. }
        )
    }

    /// Whether the error is the caller's to fix
    ///
    /// Client errors are reported with a timestamped message; everything
    /// else is an internal failure.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PaymentError::IncorrectSpecialization { .. }
                | PaymentError::AssetResolutionFailure { .. }
                | PaymentError::NoPooledAssetAvailable { .. }
                | PaymentError::ReferenceNotFound { .. }
                | PaymentError::TransactionNotFound { .. }
                | PaymentError::InvalidAmount { .. }
        )
    }
}

/// Body of a client error response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub timestamp: NaiveDateTime,
    pub message: String,
}

impl ErrorResponse {
    pub fn from_error(error: &PaymentError) -> Self {
        Self {
            timestamp: Local::now().naive_local(),
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::file_not_found(
        PaymentError::FileNotFound { path: "assets.csv".to_string() },
        "File not found: assets.csv"
    )]
    #[case::parse_error_with_line(
        PaymentError::ParseError { line: Some(42), message: "Invalid field".to_string() },
        "CSV parse error at line 42: Invalid field"
    )]
    #[case::parse_error_without_line(
        PaymentError::ParseError { line: None, message: "Invalid field".to_string() },
        "CSV parse error: Invalid field"
    )]
    #[case::incorrect_specialization(
        PaymentError::incorrect_specialization(TransactionSpecialization::Account, TransactionSpecialization::Card),
        "Unable to create ACCOUNT transaction from request with CARD specialization"
    )]
    #[case::asset_resolution_failure(
        PaymentError::asset_resolution_failure("acc-404"),
        "Asset 'acc-404' could not be resolved"
    )]
    #[case::no_pooled_asset(
        PaymentError::no_pooled_asset(PoolKind::Deposit, 500),
        "No Deposit pool asset holds more than 500 dollars"
    )]
    #[case::reference_not_found(
        PaymentError::reference_not_found(ReferenceKind::Type, "Refund"),
        "Transaction type 'Refund' not found"
    )]
    #[case::transaction_not_found(
        PaymentError::transaction_not_found("tx-1"),
        "Transaction tx-1 not found"
    )]
    #[case::creation_failed(
        PaymentError::creation_failed("disk full"),
        "Transaction creation failed: disk full"
    )]
    fn test_error_display(#[case] error: PaymentError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::specialization(PaymentError::incorrect_specialization(TransactionSpecialization::Loan, TransactionSpecialization::Card), true)]
    #[case::not_found(PaymentError::transaction_not_found("tx-1"), true)]
    #[case::pool(PaymentError::no_pooled_asset(PoolKind::Withdrawal, 10), true)]
    #[case::creation_failed(PaymentError::creation_failed("boom"), false)]
    #[case::storage(PaymentError::storage("offline"), false)]
    fn test_is_client_error(#[case] error: PaymentError, #[case] expected: bool) {
        assert_eq!(error.is_client_error(), expected);
    }

    #[test]
    fn test_pool_and_explicit_failures_are_resolution_failures() {
        assert!(PaymentError::asset_resolution_failure("x").is_asset_resolution_failure());
        assert!(PaymentError::no_pooled_asset(PoolKind::Deposit, 1).is_asset_resolution_failure());
        assert!(!PaymentError::transaction_not_found("x").is_asset_resolution_failure());
    }

    #[test]
    fn test_error_response_carries_message() {
        let error = PaymentError::transaction_not_found("tx-9");
        let before = Local::now().naive_local();
        let response = ErrorResponse::from_error(&error);
        let after = Local::now().naive_local();

        assert_eq!(response.message, "Transaction tx-9 not found");
        assert!(before <= response.timestamp && response.timestamp <= after);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: PaymentError = io_error.into();
        assert!(matches!(error, PaymentError::IoError { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }
}
