//! In-memory transaction status and type records

use crate::core::traits::{StatusStore, TypeStore};
use crate::types::{StatusRecord, TransactionStatus, TypeRecord};

/// Type names seeded by [`InMemoryReferenceStore::with_defaults`]
pub const DEFAULT_TYPE_NAMES: [&str; 4] = ["Deposit", "Withdrawal", "Payment", "Transfer"];

/// Read-only status and type records
#[derive(Debug, Default, Clone)]
pub struct InMemoryReferenceStore {
    statuses: Vec<StatusRecord>,
    types: Vec<TypeRecord>,
}

impl InMemoryReferenceStore {
    /// Create a store with no records
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the three lifecycle statuses and the standard types
    pub fn with_defaults() -> Self {
        let mut store = Self::new();
        for status in [
            TransactionStatus::Declined,
            TransactionStatus::Pending,
            TransactionStatus::Approved,
        ] {
            store.add_status(status.code(), status.name());
        }
        for (index, name) in DEFAULT_TYPE_NAMES.iter().enumerate() {
            store.add_type(index as u32 + 1, name);
        }
        store
    }

    pub fn add_status(&mut self, code: u8, name: &str) {
        self.statuses.retain(|s| s.code != code);
        self.statuses.push(StatusRecord {
            code,
            name: name.to_string(),
        });
    }

    pub fn add_type(&mut self, id: u32, name: &str) {
        self.types.retain(|t| t.id != id);
        self.types.push(TypeRecord {
            id,
            name: name.to_string(),
        });
    }
}

impl StatusStore for InMemoryReferenceStore {
    fn find_by_name(&self, name: &str) -> Option<StatusRecord> {
        self.statuses.iter().find(|s| s.name == name).cloned()
    }

    fn find_by_code(&self, code: u8) -> Option<StatusRecord> {
        self.statuses.iter().find(|s| s.code == code).cloned()
    }
}

impl TypeStore for InMemoryReferenceStore {
    fn find_by_name(&self, name: &str) -> Option<TypeRecord> {
        self.types.iter().find(|t| t.name == name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_lifecycle() {
        let store = InMemoryReferenceStore::with_defaults();

        assert_eq!(StatusStore::find_by_code(&store, 1).unwrap().name, "Declined");
        assert_eq!(StatusStore::find_by_name(&store, "Approved").unwrap().code, 3);
        assert!(TypeStore::find_by_name(&store, "Deposit").unwrap().is_deposit());
        assert!(TypeStore::find_by_name(&store, "Refund").is_none());
    }

    #[test]
    fn test_add_status_replaces_code() {
        let mut store = InMemoryReferenceStore::with_defaults();
        store.add_status(3, "Settled");

        assert_eq!(StatusStore::find_by_code(&store, 3).unwrap().name, "Settled");
        assert!(StatusStore::find_by_name(&store, "Approved").is_none());
    }
}
