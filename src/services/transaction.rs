//! Transaction operations
//!
//! Transactions are kept most-recent-first by insertion. Edits and deletes
//! are transfer-aware: both legs of a transfer share amount, date and
//! description, and are deleted together.

use tracing::debug;

use crate::error::{FinanceError, FinanceResult};
use crate::models::{
    AccountId, MonthKey, NewTransaction, Transaction, TransactionId, TransactionPatch,
};

use super::FinanceStore;

impl FinanceStore {
    /// All transactions, most recently added first
    pub fn transactions(&self) -> &[Transaction] {
        &self.state.transactions
    }

    pub fn transaction(&self, id: &TransactionId) -> Option<&Transaction> {
        self.state.transaction(id)
    }

    /// Transactions on one account, most recently added first
    pub fn account_transactions<'a>(
        &'a self,
        account_id: &'a AccountId,
    ) -> impl Iterator<Item = &'a Transaction> + 'a {
        self.state
            .transactions
            .iter()
            .filter(move |t| &t.account_id == account_id)
    }

    /// Transactions dated within a month on the local calendar
    pub fn transactions_in_month(&self, month: MonthKey) -> impl Iterator<Item = &Transaction> {
        self.state
            .transactions
            .iter()
            .filter(move |t| month.contains(&t.date))
    }

    /// The other leg of a transfer, if `id` is one
    pub fn transfer_partner(&self, id: &TransactionId) -> Option<&Transaction> {
        let txn = self.state.transaction(id)?;
        let transfer_id = txn.transfer_id.as_ref()?;
        self.state
            .transactions
            .iter()
            .find(|t| &t.id != id && t.transfer_id.as_ref() == Some(transfer_id))
    }

    /// Prepend a transaction, dated now unless a date is given
    pub fn add_transaction(&mut self, new: NewTransaction) -> FinanceResult<TransactionId> {
        let txn = new.into_transaction(self.now());
        txn.validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        let id = self.push_transaction(txn);
        self.commit();
        Ok(id)
    }

    /// Prepend without validating or persisting
    pub(super) fn push_transaction(&mut self, txn: Transaction) -> TransactionId {
        let id = txn.id.clone();
        debug!(
            transaction_id = %id,
            kind = %txn.kind,
            amount = %txn.amount,
            account_id = %txn.account_id,
            "Recording transaction"
        );
        self.state.transactions.insert(0, txn);
        id
    }

    /// Apply a patch to a transaction. When the row is a transfer leg, changes
    /// to amount, date or description are applied to the partner leg too.
    pub fn update_transaction(
        &mut self,
        id: &TransactionId,
        patch: TransactionPatch,
    ) -> FinanceResult<bool> {
        let Some(index) = self.state.transactions.iter().position(|t| &t.id == id) else {
            return Ok(false);
        };

        let shared = patch.touches_shared_fields().then(|| patch.shared_fields());

        let mut updated = self.state.transactions[index].clone();
        patch.apply(&mut updated);
        updated
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        let transfer_id = updated.transfer_id.clone();
        self.state.transactions[index] = updated;

        if let (Some(transfer_id), Some(shared)) = (transfer_id, shared) {
            for partner in self
                .state
                .transactions
                .iter_mut()
                .filter(|t| &t.id != id && t.transfer_id.as_ref() == Some(&transfer_id))
            {
                shared.clone().apply(partner);
            }
        }

        self.commit();
        Ok(true)
    }

    /// Delete a transaction; a transfer leg takes its partner with it
    pub fn delete_transaction(&mut self, id: &TransactionId) -> bool {
        let Some(txn) = self.state.transaction(id) else {
            return false;
        };

        match txn.transfer_id.clone() {
            Some(transfer_id) => {
                self.state
                    .transactions
                    .retain(|t| t.transfer_id.as_ref() != Some(&transfer_id));
                debug!(transaction_id = %id, transfer_id = %transfer_id, "Deleted transfer");
            }
            None => {
                self.state.transactions.retain(|t| &t.id != id);
                debug!(transaction_id = %id, "Deleted transaction");
            }
        }

        self.commit();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{bank_id, cash_id, fixture};
    use super::*;
    use crate::clock::Clock;
    use crate::models::{Money, TransactionType};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_add_transaction_prepends_and_defaults_date() {
        let (mut store, clock, _) = fixture();
        let bank = bank_id(&store);

        let first = store
            .add_transaction(NewTransaction::income(bank.clone(), Money::from_units(10)))
            .unwrap();
        let older = Utc.with_ymd_and_hms(2023, 1, 1, 12, 0, 0).unwrap();
        let second = store
            .add_transaction(
                NewTransaction::expense(bank, Money::from_units(4)).with_date(older),
            )
            .unwrap();

        let ids: Vec<_> = store.transactions().iter().map(|t| t.id.clone()).collect();
        assert_eq!(ids, vec![second.clone(), first.clone()]);
        assert_eq!(store.transaction(&first).unwrap().date, clock.now());
        assert_eq!(store.transaction(&second).unwrap().date, older);
    }

    #[test]
    fn test_add_transaction_rejects_negative_amount() {
        let (mut store, _, _) = fixture();
        let err = store
            .add_transaction(NewTransaction::expense(bank_id(&store), Money::from_units(-3)))
            .unwrap_err();
        assert!(err.is_validation());
        assert!(store.transactions().is_empty());
    }

    #[test]
    fn test_update_plain_transaction() {
        let (mut store, _, _) = fixture();
        let id = store
            .add_transaction(NewTransaction::expense(bank_id(&store), Money::from_units(8)))
            .unwrap();

        let patch = TransactionPatch {
            kind: Some(TransactionType::Income),
            description: Some(Some("Refund".into())),
            ..Default::default()
        };
        assert!(store.update_transaction(&id, patch).unwrap());

        let txn = store.transaction(&id).unwrap();
        assert!(txn.is_income());
        assert_eq!(txn.description.as_deref(), Some("Refund"));
        assert!(!store
            .update_transaction(&TransactionId::from("nope"), TransactionPatch::default())
            .unwrap());
    }

    #[test]
    fn test_update_transfer_leg_keeps_legs_in_sync() {
        let (mut store, _, _) = fixture();
        let cash = cash_id(&store);
        let bank = bank_id(&store);
        let receipt = store
            .create_transfer(&bank, &cash, Money::from_units(50), None, None, None)
            .unwrap();

        let date = Utc.with_ymd_and_hms(2024, 3, 2, 9, 0, 0).unwrap();
        let patch = TransactionPatch {
            amount: Some(Money::from_units(70)),
            date: Some(date),
            ..Default::default()
        };
        assert!(store.update_transaction(&receipt.credit_id, patch).unwrap());

        let debit = store.transaction(&receipt.debit_id).unwrap();
        assert_eq!(debit.amount, Money::from_units(70));
        assert_eq!(debit.date, date);
        assert_eq!(debit.account_id, bank);
        assert_eq!(store.account_balance(&bank), Money::from_units(-70));
        assert_eq!(store.account_balance(&cash), Money::from_units(70));
    }

    #[test]
    fn test_delete_plain_transaction() {
        let (mut store, _, _) = fixture();
        let bank = bank_id(&store);
        let keep = store
            .add_transaction(NewTransaction::income(bank.clone(), Money::from_units(1)))
            .unwrap();
        let gone = store
            .add_transaction(NewTransaction::income(bank, Money::from_units(2)))
            .unwrap();

        assert!(store.delete_transaction(&gone));
        assert!(!store.delete_transaction(&gone));
        assert_eq!(store.transactions().len(), 1);
        assert!(store.transaction(&keep).is_some());
    }

    #[test]
    fn test_transactions_in_month() {
        let (mut store, _, _) = fixture();
        let bank = bank_id(&store);
        store
            .add_transaction(NewTransaction::income(bank.clone(), Money::from_units(1)))
            .unwrap();
        store
            .add_transaction(
                NewTransaction::income(bank.clone(), Money::from_units(2))
                    .with_date(Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()),
            )
            .unwrap();

        let march = MonthKey::new(2024, 3).unwrap();
        assert_eq!(store.transactions_in_month(march).count(), 1);
        assert_eq!(store.account_transactions(&bank).count(), 2);
    }
}
