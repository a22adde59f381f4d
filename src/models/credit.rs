//! Credit model
//!
//! A credit is a loan repaid in monthly installments. `paid` is a running
//! total clamped to `total`; `last_paid_month` prevents paying twice in one
//! month.

use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, CreditId};
use super::money::Money;
use super::month::MonthKey;

/// A loan paid off in installments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credit {
    pub id: CreditId,
    pub name: String,

    /// Amount owed in total
    pub total: Money,

    /// Amount repaid so far
    #[serde(default)]
    pub paid: Money,

    pub monthly_installment: Money,

    /// Day of month the installment is due (1-31, advisory only)
    pub due_day: u8,

    /// Account installments are paid from
    pub account_id: AccountId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_paid_month: Option<MonthKey>,
}

impl Credit {
    pub fn new(
        name: impl Into<String>,
        total: Money,
        monthly_installment: Money,
        due_day: u8,
        account_id: AccountId,
    ) -> Self {
        Self {
            id: CreditId::new(),
            name: name.into(),
            total,
            paid: Money::zero(),
            monthly_installment,
            due_day,
            account_id,
            last_paid_month: None,
        }
    }

    /// Start from an amount already repaid, clamped to the total
    pub fn with_paid(mut self, paid: Money) -> Self {
        self.paid = clamp(paid, self.total);
        self
    }

    pub fn with_id(mut self, id: impl Into<CreditId>) -> Self {
        self.id = id.into();
        self
    }

    /// Whether an installment was already applied in the given month
    pub fn is_paid_for(&self, month: &MonthKey) -> bool {
        self.last_paid_month.as_ref() == Some(month)
    }

    /// Amount still owed
    pub fn remaining(&self) -> Money {
        self.total.saturating_sub(self.paid)
    }

    pub fn is_paid_off(&self) -> bool {
        self.paid >= self.total
    }

    /// Installments left to pay, counting a smaller final one
    pub fn installments_remaining(&self) -> u32 {
        let remaining = self.remaining();
        if remaining.is_zero() || !self.monthly_installment.is_positive() {
            return 0;
        }
        let count = (remaining.amount() / self.monthly_installment.amount()).ceil();
        count.to_u32().unwrap_or(u32::MAX)
    }

    /// Apply one installment for `month`, keeping `paid` within `[0, total]`
    pub fn apply_installment(&mut self, month: MonthKey) {
        self.paid = clamp(self.paid + self.monthly_installment, self.total);
        self.last_paid_month = Some(month);
    }

    pub fn validate(&self) -> Result<(), CreditValidationError> {
        if self.name.trim().is_empty() {
            return Err(CreditValidationError::EmptyName);
        }
        if self.total.is_negative() || self.monthly_installment.is_negative() {
            return Err(CreditValidationError::NegativeAmount);
        }
        if self.paid.is_negative() || self.paid > self.total {
            return Err(CreditValidationError::PaidOutOfRange);
        }
        if !(1..=31).contains(&self.due_day) {
            return Err(CreditValidationError::InvalidDueDay(self.due_day));
        }
        Ok(())
    }
}

fn clamp(value: Money, total: Money) -> Money {
    value.max(Money::zero()).min(total.max(Money::zero()))
}

impl fmt::Display for Credit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} of {} paid)", self.name, self.paid, self.total)
    }
}

/// Field-by-field update for a credit
#[derive(Debug, Clone, Default)]
pub struct CreditPatch {
    pub name: Option<String>,
    pub total: Option<Money>,
    pub paid: Option<Money>,
    pub monthly_installment: Option<Money>,
    pub due_day: Option<u8>,
    pub account_id: Option<AccountId>,
}

impl CreditPatch {
    /// Apply the patch; `paid` is re-clamped against the resulting total
    pub fn apply(self, credit: &mut Credit) {
        if let Some(name) = self.name {
            credit.name = name;
        }
        if let Some(total) = self.total {
            credit.total = total;
        }
        if let Some(paid) = self.paid {
            credit.paid = paid;
        }
        if let Some(installment) = self.monthly_installment {
            credit.monthly_installment = installment;
        }
        if let Some(due_day) = self.due_day {
            credit.due_day = due_day;
        }
        if let Some(account_id) = self.account_id {
            credit.account_id = account_id;
        }
        credit.paid = clamp(credit.paid, credit.total);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreditValidationError {
    EmptyName,
    NegativeAmount,
    PaidOutOfRange,
    InvalidDueDay(u8),
}

impl fmt::Display for CreditValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Credit name cannot be empty"),
            Self::NegativeAmount => write!(f, "Credit amounts cannot be negative"),
            Self::PaidOutOfRange => write!(f, "Paid amount must be between zero and the total"),
            Self::InvalidDueDay(day) => write!(f, "Due day must be between 1 and 31, got {}", day),
        }
    }
}

impl std::error::Error for CreditValidationError {}
