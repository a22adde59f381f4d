//! Service layer for the finance tracker
//!
//! [`FinanceStore`] owns every entity collection and is the only thing that
//! mutates them. Its operations are spread over one file per area; each file
//! adds an `impl FinanceStore` block. After every mutation the whole state is
//! handed to the repository. A failed save is logged and never changes the
//! outcome of the mutation.

pub mod account;
pub mod category;
pub mod credit;
pub mod data;
pub mod goal;
pub mod macros;
pub mod recurring;
pub mod summary;
pub mod transaction;
pub mod transfer;

pub use account::AccountSummary;
pub use summary::{CashFlow, CategoryBudgetStatus, CategoryTotal};
pub use transfer::TransferReceipt;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::clock::{Clock, SystemClock};
use crate::error::FinanceResult;
use crate::models::{FinanceState, MonthKey};
use crate::storage::Repository;

/// The finance domain store
pub struct FinanceStore {
    state: FinanceState,
    repository: Repository,
    clock: Arc<dyn Clock>,
}

impl FinanceStore {
    /// Open a store over `repository`, starting from the default seed when
    /// nothing has been saved yet
    pub fn open(repository: Repository) -> FinanceResult<Self> {
        Self::open_with_clock(repository, Arc::new(SystemClock))
    }

    pub fn open_with_clock(repository: Repository, clock: Arc<dyn Clock>) -> FinanceResult<Self> {
        let state = match repository.load()? {
            Some(state) => {
                tracing::debug!(
                    store = repository.name(),
                    records = state.record_count(),
                    "Loaded finance state"
                );
                state
            }
            None => {
                tracing::info!(store = repository.name(), "No saved state, starting from defaults");
                FinanceState::seeded()
            }
        };

        Ok(Self {
            state,
            repository,
            clock,
        })
    }

    /// A seeded store backed by memory only
    pub fn in_memory() -> Self {
        Self::from_state(FinanceState::seeded(), Repository::in_memory())
    }

    /// Wrap an existing state. Nothing is written until the first mutation.
    pub fn from_state(state: FinanceState, repository: Repository) -> Self {
        Self {
            state,
            repository,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used for dates and the current month
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn state(&self) -> &FinanceState {
        &self.state
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// The month key evaluated right now
    pub fn current_month(&self) -> MonthKey {
        self.clock.current_month()
    }

    /// Persist the current state. Failures are logged, not returned.
    fn commit(&self) {
        if let Err(e) = self.repository.save(&self.state) {
            warn!(store = self.repository.name(), error = %e, "Failed to persist finance state");
        }
    }
}

impl std::fmt::Debug for FinanceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinanceStore")
            .field("repository", &self.repository)
            .field("records", &self.state.record_count())
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::fixture;
    use super::*;
    use crate::error::FinanceError;
    use crate::models::{Account, AccountType};
    use crate::storage::{MemoryStorage, StateStorage, STORE_NAME};

    struct FailingStorage;

    impl StateStorage for FailingStorage {
        fn get_item(&self, _name: &str) -> FinanceResult<Option<String>> {
            Ok(None)
        }
        fn set_item(&self, _name: &str, _value: &str) -> FinanceResult<()> {
            Err(FinanceError::Storage("disk full".into()))
        }
        fn remove_item(&self, _name: &str) -> FinanceResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_open_empty_repository_seeds_without_saving() {
        let storage = MemoryStorage::new();
        let store = FinanceStore::open(Repository::new(storage.clone())).unwrap();

        assert_eq!(store.state().accounts.len(), 2);
        assert_eq!(store.state().categories.len(), 4);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_mutation_persists_and_reopens() {
        let storage = MemoryStorage::new();
        let mut store = FinanceStore::open(Repository::new(storage.clone())).unwrap();
        store
            .add_account(Account::new("Vacation", AccountType::Savings))
            .unwrap();

        assert!(storage.get_item(STORE_NAME).unwrap().is_some());

        let reopened = FinanceStore::open(Repository::new(storage)).unwrap();
        assert_eq!(reopened.state(), store.state());
    }

    #[test]
    fn test_open_corrupt_document_fails() {
        let storage = MemoryStorage::new();
        storage.set_item(STORE_NAME, "{\"accounts\": 3}").unwrap();
        assert!(FinanceStore::open(Repository::new(storage)).is_err());
    }

    #[test]
    fn test_persistence_failure_does_not_fail_mutation() {
        let mut store = FinanceStore::from_state(FinanceState::seeded(), Repository::new(FailingStorage));
        let id = store
            .add_account(Account::new("Wallet", AccountType::Cash))
            .unwrap();
        assert!(store.state().account(&id).is_some());
    }

    #[test]
    fn test_current_month_follows_clock() {
        let (store, clock, _) = fixture();
        assert_eq!(store.current_month().to_string(), "2024-03");
        clock.advance_days(30);
        assert_eq!(store.current_month().to_string(), "2024-04");
    }
}
