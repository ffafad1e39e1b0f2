//! Maps an accept/decline decision to the terminal status of a transaction

use crate::core::balance_rules::Decision;
use crate::core::traits::StatusStore;
use crate::types::TransactionStatus;
use tracing::warn;

/// Terminal status and explanatory note for a transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub status: TransactionStatus,
    /// Name from the status record, or the built-in name if the record is missing
    pub status_name: String,
    /// Decline explanation; `None` for approvals
    pub note: Option<String>,
}

pub struct StatusResolver<'a, S: StatusStore> {
    statuses: &'a S,
}

impl<'a, S: StatusStore> StatusResolver<'a, S> {
    pub fn new(statuses: &'a S) -> Self {
        Self { statuses }
    }

    /// Resolve a decision
    ///
    /// Declines carry one sentence per reason, joined with a single space.
    /// A missing status record is logged and the status is assigned anyway.
    pub fn resolve(&self, decision: &Decision) -> Resolution {
        let (status, note) = match decision {
            Decision::Accepted => (TransactionStatus::Approved, None),
            Decision::Declined(reasons) => {
                let note = reasons
                    .iter()
                    .map(|reason| reason.note())
                    .collect::<Vec<_>>()
                    .join(" ");
                (TransactionStatus::Declined, Some(note))
            }
        };

        let status_name = match self.statuses.find_by_code(status.code()) {
            Some(record) => record.name,
            None => {
                warn!(code = status.code(), "status record not found, using built-in name");
                status.name().to_string()
            }
        };

        Resolution {
            status,
            status_name,
            note,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::balance_rules::DeclineReason;
    use crate::core::reference_store::InMemoryReferenceStore;
    use crate::types::CurrencyValue;

    fn dollars(d: i64) -> CurrencyValue {
        CurrencyValue::new(d, 0, false).unwrap()
    }

    #[test]
    fn test_accepted_is_approved_without_note() {
        let store = InMemoryReferenceStore::with_defaults();
        let resolution = StatusResolver::new(&store).resolve(&Decision::Accepted);

        assert_eq!(resolution.status, TransactionStatus::Approved);
        assert_eq!(resolution.status_name, "Approved");
        assert_eq!(resolution.note, None);
    }

    #[test]
    fn test_both_reasons_joined_in_order() {
        let store = InMemoryReferenceStore::with_defaults();
        let decision = Decision::Declined(vec![
            DeclineReason::InsufficientFunds {
                amount: dollars(50),
                source_balance: dollars(10),
            },
            DeclineReason::Overpayment {
                amount: dollars(50),
                target_balance: dollars(20),
            },
        ]);

        let resolution = StatusResolver::new(&store).resolve(&decision);

        assert_eq!(resolution.status, TransactionStatus::Declined);
        assert_eq!(
            resolution.note.as_deref(),
            Some(
                "You attempted to pay $50.00 from a source with $10.00. Due to lack of funds, the transaction has been declined. \
                 You attempted to pay $50.00 towards a balance of $20.00. This is greater than what was owed, so the transaction was declined."
            )
        );
    }

    #[test]
    fn test_missing_record_falls_back_to_built_in_name() {
        let store = InMemoryReferenceStore::new();
        let resolution = StatusResolver::new(&store).resolve(&Decision::Declined(vec![]));

        assert_eq!(resolution.status, TransactionStatus::Declined);
        assert_eq!(resolution.status_name, "Declined");
    }

    #[test]
    fn test_record_name_is_used() {
        let mut store = InMemoryReferenceStore::with_defaults();
        store.add_status(3, "Settled");

        let resolution = StatusResolver::new(&store).resolve(&Decision::Accepted);

        assert_eq!(resolution.status_name, "Settled");
    }
}
