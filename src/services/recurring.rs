//! Recurring payment operations
//!
//! Paying a recurring payment records an expense and marks the current month
//! as settled. A second payment in the same month is a no-op.

use tracing::{debug, info};

use crate::error::{FinanceError, FinanceResult};
use crate::models::{
    NewTransaction, Recurring, RecurringId, RecurringPatch, TransactionId,
};

use super::FinanceStore;

impl FinanceStore {
    pub fn recurrings(&self) -> &[Recurring] {
        &self.state.recurrings
    }

    pub fn recurring(&self, id: &RecurringId) -> Option<&Recurring> {
        self.state.recurring(id)
    }

    /// Add a recurring payment. Any paid months it carries are dropped.
    pub fn add_recurring(&mut self, mut recurring: Recurring) -> FinanceResult<RecurringId> {
        recurring.paid_months.clear();
        recurring
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        let id = recurring.id.clone();
        debug!(recurring_id = %id, name = %recurring.name, "Adding recurring payment");
        self.state.recurrings.push(recurring);
        self.commit();
        Ok(id)
    }

    pub fn update_recurring(&mut self, id: &RecurringId, patch: RecurringPatch) -> FinanceResult<bool> {
        let Some(recurring) = self.state.recurrings.iter_mut().find(|r| &r.id == id) else {
            return Ok(false);
        };

        let mut updated = recurring.clone();
        patch.apply(&mut updated);
        updated
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        *recurring = updated;
        self.commit();
        Ok(true)
    }

    /// Remove a recurring payment. Transactions it created are kept.
    pub fn delete_recurring(&mut self, id: &RecurringId) -> bool {
        let before = self.state.recurrings.len();
        self.state.recurrings.retain(|r| &r.id != id);
        if self.state.recurrings.len() == before {
            return false;
        }

        debug!(recurring_id = %id, "Deleted recurring payment");
        self.commit();
        true
    }

    /// Whether the recurring payment is settled for the current month
    pub fn is_recurring_paid(&self, id: &RecurringId) -> bool {
        let month = self.current_month();
        self.state
            .recurring(id)
            .is_some_and(|r| r.is_paid(&month))
    }

    /// Pay this month's instance of a recurring payment
    ///
    /// Returns the new expense's ID, or None if the payment doesn't exist or
    /// the current month is already settled.
    pub fn pay_recurring(&mut self, id: &RecurringId) -> Option<TransactionId> {
        let month = self.current_month();
        let now = self.now();

        let recurring = self.state.recurring(id)?;
        if recurring.is_paid(&month) {
            debug!(recurring_id = %id, month = %month, "Recurring payment already settled");
            return None;
        }

        let txn = NewTransaction::expense(recurring.account_id.clone(), recurring.amount)
            .with_description(format!("Recurring payment: {}", recurring.name))
            .with_category(recurring.category_id.clone())
            .into_transaction(now);
        let name = recurring.name.clone();

        let txn_id = self.push_transaction(txn);
        if let Some(recurring) = self.state.recurrings.iter_mut().find(|r| &r.id == id) {
            recurring.mark_paid(month);
        }

        info!(recurring = %name, month = %month, "Paid recurring payment");
        self.commit();
        Some(txn_id)
    }

    /// Set or clear the current month's paid flag without touching
    /// transactions. Returns false if the payment doesn't exist.
    pub fn toggle_recurring_paid(&mut self, id: &RecurringId, paid: bool) -> bool {
        let month = self.current_month();
        let Some(recurring) = self.state.recurrings.iter_mut().find(|r| &r.id == id) else {
            return false;
        };

        let changed = if paid {
            recurring.mark_paid(month)
        } else {
            recurring.unmark_paid(&month)
        };

        if changed {
            debug!(recurring_id = %id, month = %month, paid, "Toggled recurring paid state");
            self.commit();
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{bank_id, fixture};
    use super::*;
    use crate::models::{Money, MonthKey};

    #[test]
    fn test_pay_recurring_is_idempotent_within_month() {
        let (mut store, _, _) = fixture();
        let bank = bank_id(&store);
        let id = store
            .add_recurring(Recurring::new("Internet", Money::from_units(80), 5, bank.clone()))
            .unwrap();

        assert_eq!(store.monthly_obligations_remaining(), Money::from_units(80));

        let txn_id = store.pay_recurring(&id).unwrap();
        let txn = store.transaction(&txn_id).unwrap();
        assert_eq!(txn.amount, Money::from_units(80));
        assert_eq!(txn.description.as_deref(), Some("Recurring payment: Internet"));
        assert_eq!(txn.account_id, bank);
        assert_eq!(store.monthly_obligations_remaining(), Money::zero());
        assert!(store.is_recurring_paid(&id));

        assert_eq!(store.pay_recurring(&id), None);
        assert_eq!(store.transactions().len(), 1);
        assert_eq!(store.monthly_obligations_remaining(), Money::zero());
        assert_eq!(store.recurring(&id).unwrap().paid_months.len(), 1);
    }

    #[test]
    fn test_pay_recurring_again_next_month() {
        let (mut store, clock, _) = fixture();
        let id = store
            .add_recurring(Recurring::new("Rent", Money::from_units(500), 1, bank_id(&store)))
            .unwrap();

        store.pay_recurring(&id).unwrap();
        clock.advance_days(31);
        assert!(!store.is_recurring_paid(&id));
        assert!(store.pay_recurring(&id).is_some());

        let months: Vec<_> = store
            .recurring(&id)
            .unwrap()
            .paid_months
            .iter()
            .map(MonthKey::to_string)
            .collect();
        assert_eq!(months, vec!["2024-03", "2024-04"]);
    }

    #[test]
    fn test_pay_unknown_recurring() {
        let (mut store, _, _) = fixture();
        assert_eq!(store.pay_recurring(&RecurringId::from("nope")), None);
        assert!(!store.toggle_recurring_paid(&RecurringId::from("nope"), true));
    }

    #[test]
    fn test_toggle_recurring_paid_leaves_transactions_alone() {
        let (mut store, _, _) = fixture();
        let id = store
            .add_recurring(Recurring::new("Gym", Money::from_units(30), 12, bank_id(&store)))
            .unwrap();

        let txn_id = store.pay_recurring(&id).unwrap();
        assert!(store.toggle_recurring_paid(&id, false));
        assert!(!store.is_recurring_paid(&id));
        assert!(store.transaction(&txn_id).is_some());

        assert!(store.toggle_recurring_paid(&id, true));
        assert!(store.toggle_recurring_paid(&id, true));
        assert_eq!(store.recurring(&id).unwrap().paid_months.len(), 1);
    }

    #[test]
    fn test_add_recurring_rejects_bad_due_day() {
        let (mut store, _, _) = fixture();
        let err = store
            .add_recurring(Recurring::new("Phone", Money::from_units(20), 32, bank_id(&store)))
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_update_and_delete_recurring() {
        let (mut store, _, _) = fixture();
        let id = store
            .add_recurring(Recurring::new("Phone", Money::from_units(20), 3, bank_id(&store)))
            .unwrap();

        let patch = RecurringPatch {
            amount: Some(Money::from_units(25)),
            ..Default::default()
        };
        assert!(store.update_recurring(&id, patch).unwrap());
        assert_eq!(store.monthly_obligations_total(), Money::from_units(25));

        assert!(store.delete_recurring(&id));
        assert!(!store.delete_recurring(&id));
        assert_eq!(store.monthly_obligations_total(), Money::zero());
    }
}
