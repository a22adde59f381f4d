//! Account operations
//!
//! CRUD for accounts plus per-account balance summaries. Deleting an account
//! removes its transactions and the partner legs of its transfers.

use std::collections::HashSet;

use tracing::debug;

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Account, AccountId, AccountPatch, Money};

use super::FinanceStore;

/// Summary of an account with computed fields
#[derive(Debug, Clone, PartialEq)]
pub struct AccountSummary {
    pub account: Account,
    /// Income minus expenses over all of the account's transactions
    pub balance: Money,
    /// Number of transactions on the account
    pub transaction_count: usize,
}

impl FinanceStore {
    pub fn accounts(&self) -> &[Account] {
        &self.state.accounts
    }

    pub fn account(&self, id: &AccountId) -> Option<&Account> {
        self.state.account(id)
    }

    /// Find an account by ID or by case-insensitive name
    pub fn find_account(&self, query: &str) -> Option<&Account> {
        let query = query.trim();
        self.state
            .accounts
            .iter()
            .find(|a| a.id.as_str() == query)
            .or_else(|| {
                self.state
                    .accounts
                    .iter()
                    .find(|a| a.name.eq_ignore_ascii_case(query))
            })
    }

    /// Append an account and return its ID
    pub fn add_account(&mut self, account: Account) -> FinanceResult<AccountId> {
        account
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        let id = account.id.clone();
        debug!(account_id = %id, name = %account.name, "Adding account");
        self.state.accounts.push(account);
        self.commit();
        Ok(id)
    }

    /// Apply a patch to an account. Returns false if the account doesn't exist.
    pub fn update_account(&mut self, id: &AccountId, patch: AccountPatch) -> FinanceResult<bool> {
        let Some(account) = self.state.accounts.iter_mut().find(|a| &a.id == id) else {
            return Ok(false);
        };

        let mut updated = account.clone();
        patch.apply(&mut updated);
        updated
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        *account = updated;
        self.commit();
        Ok(true)
    }

    /// Remove an account, every transaction on it, and the other leg of any
    /// transfer one of those transactions belonged to
    ///
    /// Transactions are swept even when no account has this id, so dangling
    /// rows left by an import are cleaned up too. Returns whether anything
    /// was removed.
    pub fn delete_account(&mut self, id: &AccountId) -> bool {
        let account_count = self.state.accounts.len();
        self.state.accounts.retain(|a| &a.id != id);
        let removed_account = self.state.accounts.len() != account_count;

        let transfer_ids: HashSet<_> = self
            .state
            .transactions
            .iter()
            .filter(|t| &t.account_id == id)
            .filter_map(|t| t.transfer_id.clone())
            .collect();

        let txn_count = self.state.transactions.len();
        self.state.transactions.retain(|t| {
            &t.account_id != id
                && t
                    .transfer_id
                    .as_ref()
                    .map_or(true, |tid| !transfer_ids.contains(tid))
        });

        let removed_transactions = txn_count - self.state.transactions.len();
        if !removed_account && removed_transactions == 0 {
            return false;
        }

        debug!(
            account_id = %id,
            removed_account,
            removed_transactions,
            "Deleted account"
        );
        self.commit();
        true
    }

    /// Every account with its balance, in account order
    pub fn account_summaries(&self) -> Vec<AccountSummary> {
        self.state
            .accounts
            .iter()
            .map(|account| AccountSummary {
                account: account.clone(),
                balance: self.account_balance(&account.id),
                transaction_count: self
                    .state
                    .transactions
                    .iter()
                    .filter(|t| t.account_id == account.id)
                    .count(),
            })
            .collect()
    }

    /// Sum of every account's balance, savings included
    pub fn total_balance(&self) -> Money {
        self.state
            .accounts
            .iter()
            .map(|a| self.account_balance(&a.id))
            .sum()
    }
}
