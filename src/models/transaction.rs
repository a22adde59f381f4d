//! Transaction model
//!
//! Amounts are always non-negative magnitudes; the direction comes from the
//! transaction type. A transfer between accounts is stored as two rows
//! sharing one transfer ID: an expense leg on the source account and an
//! income leg on the destination.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, CategoryId, TransactionId, TransferId};
use super::money::Money;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money leaving the account
    Expense,
    /// Money entering the account
    Income,
    /// Legacy marker type; carries no balance effect
    Transfer,
}

impl TransactionType {
    /// Parse transaction type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "expense" | "out" => Some(Self::Expense),
            "income" | "in" => Some(Self::Income),
            "transfer" => Some(Self::Transfer),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense => write!(f, "Expense"),
            Self::Income => write!(f, "Income"),
            Self::Transfer => write!(f, "Transfer"),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Direction of the money movement
    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// Magnitude of the movement
    pub amount: Money,

    /// When the transaction happened
    pub date: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The account this transaction belongs to
    pub account_id: AccountId,

    #[serde(default)]
    pub category_id: Option<CategoryId>,

    /// Shared by both legs of a transfer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_id: Option<TransferId>,
}

impl Transaction {
    /// Check if this row is one leg of a transfer
    pub fn is_transfer(&self) -> bool {
        self.transfer_id.is_some()
    }

    /// Check if this is an expense
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Check if this is an income
    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    /// The amount with the sign applied to an account balance
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
            TransactionType::Transfer => Money::zero(),
        }
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.amount.is_negative() {
            return Err(TransactionValidationError::NegativeAmount);
        }

        Ok(())
    }
}

/// The fields of a transaction about to be added. The store assigns the ID
/// and, when `date` is None, the current instant.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub id: Option<TransactionId>,
    pub kind: TransactionType,
    pub amount: Money,
    pub date: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub account_id: AccountId,
    pub category_id: Option<CategoryId>,
    pub transfer_id: Option<TransferId>,
}

impl NewTransaction {
    pub fn new(kind: TransactionType, account_id: AccountId, amount: Money) -> Self {
        Self {
            id: None,
            kind,
            amount,
            date: None,
            description: None,
            account_id,
            category_id: None,
            transfer_id: None,
        }
    }

    /// An expense on the given account
    pub fn expense(account_id: AccountId, amount: Money) -> Self {
        Self::new(TransactionType::Expense, account_id, amount)
    }

    /// An income on the given account
    pub fn income(account_id: AccountId, amount: Money) -> Self {
        Self::new(TransactionType::Income, account_id, amount)
    }

    pub fn with_id(mut self, id: impl Into<TransactionId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category(mut self, category_id: Option<CategoryId>) -> Self {
        self.category_id = category_id;
        self
    }

    /// Materialize the transaction, filling the ID and date
    pub fn into_transaction(self, now: DateTime<Utc>) -> Transaction {
        Transaction {
            id: self.id.unwrap_or_default(),
            kind: self.kind,
            amount: self.amount,
            date: self.date.unwrap_or(now),
            description: self.description,
            account_id: self.account_id,
            category_id: self.category_id,
            transfer_id: self.transfer_id,
        }
    }
}

/// Field-by-field update for a transaction
#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub kind: Option<TransactionType>,
    pub amount: Option<Money>,
    pub date: Option<DateTime<Utc>>,
    pub description: Option<Option<String>>,
    pub account_id: Option<AccountId>,
    pub category_id: Option<Option<CategoryId>>,
}

impl TransactionPatch {
    /// Whether the patch touches a field both transfer legs must share
    pub fn touches_shared_fields(&self) -> bool {
        self.amount.is_some() || self.date.is_some() || self.description.is_some()
    }

    /// The subset of this patch that a transfer partner leg receives
    pub fn shared_fields(&self) -> Self {
        Self {
            amount: self.amount,
            date: self.date,
            description: self.description.clone(),
            ..Default::default()
        }
    }

    pub fn apply(self, txn: &mut Transaction) {
        if let Some(kind) = self.kind {
            txn.kind = kind;
        }
        if let Some(amount) = self.amount {
            txn.amount = amount;
        }
        if let Some(date) = self.date {
            txn.date = date;
        }
        if let Some(description) = self.description {
            txn.description = description;
        }
        if let Some(account_id) = self.account_id {
            txn.account_id = account_id;
        }
        if let Some(category_id) = self.category_id {
            txn.category_id = category_id;
        }
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NegativeAmount,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount => write!(f, "Transaction amount cannot be negative"),
        }
    }
}

impl std::error::Error for TransactionValidationError {}
