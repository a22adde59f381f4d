//! Transfers between accounts
//!
//! A transfer is two transactions sharing one transfer ID: an expense leg on
//! the source account and an income leg on the destination. Each leg counts
//! as an ordinary expense or income on its own account, so balances come out
//! right without special-casing.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::{FinanceError, FinanceResult};
use crate::models::{
    AccountId, CategoryId, Money, NewTransaction, TransactionId, TransactionType, TransferId,
};

use super::FinanceStore;

/// Description given to transfer legs when none is supplied
pub const DEFAULT_TRANSFER_DESCRIPTION: &str = "Transfer";

/// IDs produced by creating a transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReceipt {
    /// The expense leg on the source account
    pub debit_id: TransactionId,
    /// The income leg on the destination account
    pub credit_id: TransactionId,
    pub transfer_id: TransferId,
}

impl FinanceStore {
    /// Move money from one account to another
    ///
    /// Passing the same account twice records two legs that cancel out.
    pub fn create_transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: Money,
        date: Option<DateTime<Utc>>,
        description: Option<String>,
        category_id: Option<CategoryId>,
    ) -> FinanceResult<TransferReceipt> {
        if amount.is_negative() {
            return Err(FinanceError::Validation(
                "Transfer amount must not be negative".into(),
            ));
        }

        let transfer_id = TransferId::new();
        let date = date.unwrap_or_else(|| self.now());
        let description =
            description.unwrap_or_else(|| DEFAULT_TRANSFER_DESCRIPTION.to_string());

        let leg = |kind: TransactionType, account_id: &AccountId| {
            let mut new = NewTransaction::new(kind, account_id.clone(), amount)
                .with_date(date)
                .with_description(description.clone())
                .with_category(category_id.clone());
            new.transfer_id = Some(transfer_id.clone());
            new.into_transaction(date)
        };

        let debit = leg(TransactionType::Expense, from);
        let credit = leg(TransactionType::Income, to);

        // Debit ends up first once both are prepended
        let credit_id = self.push_transaction(credit);
        let debit_id = self.push_transaction(debit);

        debug!(
            transfer_id = %transfer_id,
            from = %from,
            to = %to,
            amount = %amount,
            "Created transfer"
        );
        self.commit();

        Ok(TransferReceipt {
            debit_id,
            credit_id,
            transfer_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{bank_id, cash_id, fixture};
    use super::*;

    #[test]
    fn test_transfer_symmetry() {
        let (mut store, _, _) = fixture();
        let cash = cash_id(&store);
        let bank = bank_id(&store);
        store
            .add_transaction(NewTransaction::income(bank.clone(), Money::from_units(1000)))
            .unwrap();

        let receipt = store
            .create_transfer(&bank, &cash, Money::from_units(250), None, None, None)
            .unwrap();

        assert_eq!(store.account_balance(&bank), Money::from_units(750));
        assert_eq!(store.account_balance(&cash), Money::from_units(250));

        let debit = store.transaction(&receipt.debit_id).unwrap();
        let credit = store.transaction(&receipt.credit_id).unwrap();
        assert!(debit.is_expense());
        assert!(credit.is_income());
        assert_eq!(debit.date, credit.date);
        assert_eq!(debit.transfer_id.as_ref(), Some(&receipt.transfer_id));
        assert_eq!(credit.transfer_id.as_ref(), Some(&receipt.transfer_id));
        assert_eq!(debit.description.as_deref(), Some("Transfer"));
        assert_eq!(store.transactions()[0].id, receipt.debit_id);
        assert_eq!(store.transactions()[1].id, receipt.credit_id);
        assert_eq!(
            store.transfer_partner(&receipt.debit_id).unwrap().id,
            receipt.credit_id
        );
    }

    #[test]
    fn test_deleting_either_leg_removes_both() {
        let (mut store, _, _) = fixture();
        let cash = cash_id(&store);
        let bank = bank_id(&store);

        let first = store
            .create_transfer(&bank, &cash, Money::from_units(10), None, None, None)
            .unwrap();
        let second = store
            .create_transfer(&cash, &bank, Money::from_units(4), None, Some("Back".into()), None)
            .unwrap();

        assert!(store.delete_transaction(&first.credit_id));
        assert!(store.delete_transaction(&second.debit_id));
        assert!(store.transactions().is_empty());
        assert_eq!(store.account_balance(&bank), Money::zero());
    }

    #[test]
    fn test_transfer_to_same_account_is_balance_neutral() {
        let (mut store, _, _) = fixture();
        let bank = bank_id(&store);

        store
            .create_transfer(&bank, &bank, Money::from_units(30), None, None, None)
            .unwrap();
        assert_eq!(store.transactions().len(), 2);
        assert_eq!(store.account_balance(&bank), Money::zero());
    }

    #[test]
    fn test_negative_transfer_rejected() {
        let (mut store, _, _) = fixture();
        let bank = bank_id(&store);
        let cash = cash_id(&store);

        assert!(store
            .create_transfer(&bank, &cash, Money::from_units(-1), None, None, None)
            .is_err());
        assert!(store.transactions().is_empty());
    }
}
