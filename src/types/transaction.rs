//! Transaction-related types for the transaction engine
//!
//! This module defines the ledger specializations, status lifecycle,
//! reference records, the incoming request shape, the stored transaction,
//! and the external view returned to callers.

use super::asset::{AssetToken, FinancialAsset};
use super::currency::CurrencyValue;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Transaction identifier
pub type TransactionId = String;

/// Name of the transaction type that bypasses balance checks
pub const DEPOSIT_TYPE_NAME: &str = "Deposit";

/// Which concrete ledger a transaction belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionSpecialization {
    /// Bank account ledger
    Account,
    /// Card ledger
    Card,
    /// Loan ledger
    Loan,
}

impl TransactionSpecialization {
    pub const ALL: [TransactionSpecialization; 3] = [
        TransactionSpecialization::Account,
        TransactionSpecialization::Card,
        TransactionSpecialization::Loan,
    ];

    /// Whether pooled system accounts can stand in for a missing endpoint
    ///
    /// Only the account ledger keeps pooled counterparties.
    pub fn honours_system_pool(self) -> bool {
        matches!(self, TransactionSpecialization::Account)
    }
}

impl fmt::Display for TransactionSpecialization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionSpecialization::Account => f.write_str("ACCOUNT"),
            TransactionSpecialization::Card => f.write_str("CARD"),
            TransactionSpecialization::Loan => f.write_str("LOAN"),
        }
    }
}

impl FromStr for TransactionSpecialization {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ACCOUNT" => Ok(TransactionSpecialization::Account),
            "CARD" => Ok(TransactionSpecialization::Card),
            "LOAN" => Ok(TransactionSpecialization::Loan),
            _ => Err(format!("Invalid transaction specialization: '{}'", s)),
        }
    }
}

/// Lifecycle stage of a transaction
///
/// The numeric codes match the status records held by the status store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    Declined = 1,
    Pending = 2,
    Approved = 3,
}

impl TransactionStatus {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(TransactionStatus::Declined),
            2 => Some(TransactionStatus::Pending),
            3 => Some(TransactionStatus::Approved),
            _ => None,
        }
    }

    /// Built-in display name, used when no status record is available
    pub fn name(self) -> &'static str {
        match self {
            TransactionStatus::Declined => "Declined",
            TransactionStatus::Pending => "Pending",
            TransactionStatus::Approved => "Approved",
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, TransactionStatus::Pending)
    }
}

/// A transaction status reference record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub code: u8,
    pub name: String,
}

/// A transaction type reference record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRecord {
    pub id: u32,
    pub name: String,
}

impl TypeRecord {
    pub fn is_deposit(&self) -> bool {
        self.name == DEPOSIT_TYPE_NAME
    }
}

/// A proposed transaction as submitted by a caller
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransactionRequest {
    /// Ledger the caller intends the transaction for
    pub specialization: TransactionSpecialization,

    /// Amount to move
    pub amount: CurrencyValue,

    /// Where the money comes from
    pub source: AssetToken,

    /// Where the money goes
    pub target: AssetToken,

    /// Requested status name; validated against the status store
    pub status_name: String,

    /// Transaction type name, e.g. `Deposit` or `Payment`
    pub type_name: String,

    /// Free-text notes
    pub notes: Option<String>,
}

/// A request tagged with its 1-based position in the input
#[derive(Debug, Clone, PartialEq)]
pub struct NumberedRequest {
    pub number: u64,
    pub request: NewTransactionRequest,
}

/// A transaction as held by the transaction store
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialTransaction {
    pub id: TransactionId,
    pub specialization: TransactionSpecialization,
    pub amount: CurrencyValue,
    pub status: TransactionStatus,
    pub status_name: String,

    /// Source asset as resolved at creation time
    pub source: FinancialAsset,

    /// Target asset as resolved at creation time
    pub target: FinancialAsset,

    /// `None` only when created under the lenient reference policy
    pub transaction_type: Option<TypeRecord>,

    pub notes: Option<String>,
    pub status_time: NaiveDateTime,
}

impl FinancialTransaction {
    /// Whether the asset is either endpoint of this transaction
    pub fn involves(&self, asset_id: &str) -> bool {
        self.source.id == asset_id || self.target.id == asset_id
    }

    /// Translate to the external view shape
    pub fn to_view(&self) -> TransactionView {
        TransactionView {
            id: self.id.clone(),
            specialization: self.specialization,
            amount: self.amount,
            status_code: self.status.code(),
            status_name: self.status_name.clone(),
            source_id: self.source.id.clone(),
            target_id: self.target.id.clone(),
            type_name: self.transaction_type.as_ref().map(|t| t.name.clone()),
            notes: self.notes.clone(),
            status_time: self.status_time,
        }
    }
}

/// Transaction as returned to callers of the engine
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionView {
    pub id: TransactionId,
    pub specialization: TransactionSpecialization,
    pub amount: CurrencyValue,
    pub status_code: u8,
    pub status_name: String,
    pub source_id: String,
    pub target_id: String,
    pub type_name: Option<String>,
    pub notes: Option<String>,
    pub status_time: NaiveDateTime,
}

impl TransactionView {
    pub fn status(&self) -> Option<TransactionStatus> {
        TransactionStatus::from_code(self.status_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ACCOUNT", TransactionSpecialization::Account)]
    #[case("card", TransactionSpecialization::Card)]
    #[case("Loan", TransactionSpecialization::Loan)]
    fn test_specialization_from_str(
        #[case] raw: &str,
        #[case] expected: TransactionSpecialization,
    ) {
        assert_eq!(raw.parse::<TransactionSpecialization>().unwrap(), expected);
    }

    #[test]
    fn test_specialization_from_str_rejects_unknown() {
        assert!("MORTGAGE".parse::<TransactionSpecialization>().is_err());
    }

    #[rstest]
    #[case(TransactionStatus::Declined, 1)]
    #[case(TransactionStatus::Pending, 2)]
    #[case(TransactionStatus::Approved, 3)]
    fn test_status_codes(#[case] status: TransactionStatus, #[case] code: u8) {
        assert_eq!(status.code(), code);
        assert_eq!(TransactionStatus::from_code(code), Some(status));
    }

    #[test]
    fn test_only_pending_is_not_terminal() {
        assert!(!TransactionStatus::Pending.is_terminal());
        assert!(TransactionStatus::Approved.is_terminal());
        assert!(TransactionStatus::Declined.is_terminal());
        assert_eq!(TransactionStatus::from_code(4), None);
    }
}
