//! Accept/decline rules
//!
//! The engine compares whole-dollar balances only: every value is reduced to
//! `dollars + cents / 100` (integer division) before comparison. A
//! transaction is accepted when the source can cover the amount and the
//! amount does not exceed the target balance, or unconditionally when its
//! type is `Deposit`.
//!
//! On decline each reason is checked independently, so a single transaction
//! can be declined for both insufficient funds and overpayment.

use crate::types::{CurrencyValue, FinancialAsset, TypeRecord};
use tracing::{debug, info};

/// Why a transaction was declined
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclineReason {
    /// Source balance is below the amount
    InsufficientFunds {
        amount: CurrencyValue,
        source_balance: CurrencyValue,
    },
    /// Amount exceeds what the target balance says is owed
    Overpayment {
        amount: CurrencyValue,
        target_balance: CurrencyValue,
    },
}

impl DeclineReason {
    /// Customer-facing explanation of the decline
    pub fn note(&self) -> String {
        match self {
            DeclineReason::InsufficientFunds {
                amount,
                source_balance,
            } => format!(
                "You attempted to pay {} from a source with {}. Due to lack of funds, the transaction has been declined.",
                amount, source_balance
            ),
            DeclineReason::Overpayment {
                amount,
                target_balance,
            } => format!(
                "You attempted to pay {} towards a balance of {}. This is greater than what was owed, so the transaction was declined.",
                amount, target_balance
            ),
        }
    }
}

/// Outcome of evaluating a proposed transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Accepted,
    /// Reasons in evaluation order: insufficient funds, then overpayment
    Declined(Vec<DeclineReason>),
}

impl Decision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Decision::Accepted)
    }
}

/// Stateless accept/decline rule set
pub struct BalanceRuleEngine;

impl BalanceRuleEngine {
    /// Evaluate a proposed transaction against its resolved endpoints
    ///
    /// # Arguments
    ///
    /// * `source` - Resolved source asset
    /// * `target` - Resolved target asset
    /// * `amount` - Transaction amount
    /// * `transaction_type` - Type record, if one was bound; only a type named
    ///   `Deposit` bypasses the balance checks
    pub fn evaluate(
        source: &FinancialAsset,
        target: &FinancialAsset,
        amount: &CurrencyValue,
        transaction_type: Option<&TypeRecord>,
    ) -> Decision {
        let source_balance = source.balance.whole_dollars();
        let target_balance = target.balance.whole_dollars();
        let requested = amount.whole_dollars();
        let is_deposit = transaction_type.is_some_and(TypeRecord::is_deposit);

        if (source_balance >= requested && requested <= target_balance) || is_deposit {
            debug!(source = %source.id, target = %target.id, "transaction accepted");
            return Decision::Accepted;
        }

        let mut reasons = Vec::with_capacity(2);

        if source_balance < requested {
            info!(source = %source.id, "transaction declined due to lack of funds");
            reasons.push(DeclineReason::InsufficientFunds {
                amount: *amount,
                source_balance: source.balance,
            });
        }

        if requested > target_balance && !is_deposit {
            info!(target = %target.id, "transaction declined due to overpayment");
            reasons.push(DeclineReason::Overpayment {
                amount: *amount,
                target_balance: target.balance,
            });
        }

        Decision::Declined(reasons)
    }
}
