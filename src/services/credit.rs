//! Credit operations
//!
//! Paying an installment records an expense, stamps the current month and
//! advances `paid`, which never passes the credit's total.

use tracing::{debug, info};

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Credit, CreditId, CreditPatch, NewTransaction, TransactionId};

use super::FinanceStore;

impl FinanceStore {
    pub fn credits(&self) -> &[Credit] {
        &self.state.credits
    }

    pub fn credit(&self, id: &CreditId) -> Option<&Credit> {
        self.state.credit(id)
    }

    pub fn add_credit(&mut self, credit: Credit) -> FinanceResult<CreditId> {
        credit
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        let id = credit.id.clone();
        debug!(credit_id = %id, name = %credit.name, total = %credit.total, "Adding credit");
        self.state.credits.push(credit);
        self.commit();
        Ok(id)
    }

    /// Apply a patch; `paid` is re-clamped to the (possibly new) total
    pub fn update_credit(&mut self, id: &CreditId, patch: CreditPatch) -> FinanceResult<bool> {
        let Some(credit) = self.state.credits.iter_mut().find(|c| &c.id == id) else {
            return Ok(false);
        };

        let mut updated = credit.clone();
        patch.apply(&mut updated);
        updated
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        *credit = updated;
        self.commit();
        Ok(true)
    }

    pub fn delete_credit(&mut self, id: &CreditId) -> bool {
        let before = self.state.credits.len();
        self.state.credits.retain(|c| &c.id != id);
        if self.state.credits.len() == before {
            return false;
        }

        debug!(credit_id = %id, "Deleted credit");
        self.commit();
        true
    }

    /// Pay this month's installment
    ///
    /// Returns the new expense's ID, or None if the credit doesn't exist or
    /// an installment was already paid this month. A credit that is already
    /// paid off still records the expense; `paid` stays at the total.
    pub fn pay_credit_installment(&mut self, id: &CreditId) -> Option<TransactionId> {
        let month = self.current_month();
        let now = self.now();

        let credit = self.state.credit(id)?;
        if credit.is_paid_for(&month) {
            debug!(credit_id = %id, month = %month, "Installment already paid");
            return None;
        }

        let txn = NewTransaction::expense(credit.account_id.clone(), credit.monthly_installment)
            .with_description(format!("Credit payment: {}", credit.name))
            .into_transaction(now);
        let name = credit.name.clone();

        let txn_id = self.push_transaction(txn);
        if let Some(credit) = self.state.credits.iter_mut().find(|c| &c.id == id) {
            credit.apply_installment(month);
            info!(
                credit = %name,
                month = %month,
                paid = %credit.paid,
                total = %credit.total,
                "Paid credit installment"
            );
        }

        self.commit();
        Some(txn_id)
    }
}
