//! Recurring payment model
//!
//! A recurring payment is a fixed monthly obligation (rent, internet, ...).
//! Its per-month paid state is the set of month keys in `paid_months`.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, CategoryId, RecurringId};
use super::money::Money;
use super::month::MonthKey;

/// A monthly obligation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recurring {
    pub id: RecurringId,
    pub name: String,
    pub amount: Money,

    /// Day of month the payment is due (1-31, advisory only)
    pub due_day: u8,

    /// Account the payment is drawn from
    pub account_id: AccountId,

    #[serde(default)]
    pub category_id: Option<CategoryId>,

    /// Months already settled
    #[serde(default)]
    pub paid_months: Vec<MonthKey>,
}

impl Recurring {
    pub fn new(name: impl Into<String>, amount: Money, due_day: u8, account_id: AccountId) -> Self {
        Self {
            id: RecurringId::new(),
            name: name.into(),
            amount,
            due_day,
            account_id,
            category_id: None,
            paid_months: Vec::new(),
        }
    }

    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_id(mut self, id: impl Into<RecurringId>) -> Self {
        self.id = id.into();
        self
    }

    /// Whether the given month has been settled
    pub fn is_paid(&self, month: &MonthKey) -> bool {
        self.paid_months.contains(month)
    }

    /// Record the month as settled. Returns false if it already was.
    pub fn mark_paid(&mut self, month: MonthKey) -> bool {
        if self.is_paid(&month) {
            return false;
        }
        self.paid_months.push(month);
        true
    }

    /// Forget the month's settlement. Returns false if it was not settled.
    pub fn unmark_paid(&mut self, month: &MonthKey) -> bool {
        let before = self.paid_months.len();
        self.paid_months.retain(|m| m != month);
        self.paid_months.len() != before
    }

    pub fn validate(&self) -> Result<(), RecurringValidationError> {
        if self.name.trim().is_empty() {
            return Err(RecurringValidationError::EmptyName);
        }
        if self.amount.is_negative() {
            return Err(RecurringValidationError::NegativeAmount);
        }
        if !(1..=31).contains(&self.due_day) {
            return Err(RecurringValidationError::InvalidDueDay(self.due_day));
        }
        let mut seen = self.paid_months.clone();
        seen.sort();
        if let Some(w) = seen.windows(2).find(|w| w[0] == w[1]) {
            return Err(RecurringValidationError::DuplicatePaidMonth(w[0]));
        }
        Ok(())
    }
}

impl fmt::Display for Recurring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, due day {})", self.name, self.amount, self.due_day)
    }
}

/// Field-by-field update for a recurring payment. Paid state is changed
/// only through the store's pay/toggle operations.
#[derive(Debug, Clone, Default)]
pub struct RecurringPatch {
    pub name: Option<String>,
    pub amount: Option<Money>,
    pub due_day: Option<u8>,
    pub account_id: Option<AccountId>,
    pub category_id: Option<Option<CategoryId>>,
}

impl RecurringPatch {
    pub fn apply(self, recurring: &mut Recurring) {
        if let Some(name) = self.name {
            recurring.name = name;
        }
        if let Some(amount) = self.amount {
            recurring.amount = amount;
        }
        if let Some(due_day) = self.due_day {
            recurring.due_day = due_day;
        }
        if let Some(account_id) = self.account_id {
            recurring.account_id = account_id;
        }
        if let Some(category_id) = self.category_id {
            recurring.category_id = category_id;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecurringValidationError {
    EmptyName,
    NegativeAmount,
    InvalidDueDay(u8),
    DuplicatePaidMonth(MonthKey),
}

impl fmt::Display for RecurringValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Recurring payment name cannot be empty"),
            Self::NegativeAmount => write!(f, "Recurring payment amount cannot be negative"),
            Self::InvalidDueDay(day) => write!(f, "Due day must be between 1 and 31, got {}", day),
            Self::DuplicatePaidMonth(month) => write!(f, "Month {} is recorded as paid more than once", month),
        }
    }
}

impl std::error::Error for RecurringValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn internet() -> Recurring {
        Recurring::new("Internet", Money::from_units(80_000), 5, AccountId::new())
    }

    #[test]
    fn test_mark_paid_is_idempotent() {
        let mut recurring = internet();
        let month = MonthKey::new(2025, 1).unwrap();

        assert!(recurring.mark_paid(month));
        assert!(!recurring.mark_paid(month));
        assert_eq!(recurring.paid_months, vec![month]);

        assert!(recurring.unmark_paid(&month));
        assert!(!recurring.unmark_paid(&month));
        assert!(!recurring.is_paid(&month));
    }

    #[test]
    fn test_validation() {
        assert!(internet().validate().is_ok());

        let mut recurring = internet();
        recurring.due_day = 0;
        assert_eq!(recurring.validate(), Err(RecurringValidationError::InvalidDueDay(0)));

        let mut recurring = internet();
        let month = MonthKey::new(2025, 2).unwrap();
        recurring.paid_months = vec![month, MonthKey::new(2025, 1).unwrap(), month];
        assert_eq!(recurring.validate(), Err(RecurringValidationError::DuplicatePaidMonth(month)));
    }

    #[test]
    fn test_json_shape() {
        let parsed: Recurring = serde_json::from_str(
            r#"{"id":"r","name":"Rent","amount":900,"dueDay":1,"accountId":"a","paidMonths":["2025-01"]}"#,
        )
        .unwrap();
        assert!(parsed.is_paid(&MonthKey::new(2025, 1).unwrap()));
        assert_eq!(parsed.due_day, 1);
    }
}
