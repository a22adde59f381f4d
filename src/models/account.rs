//! Account model
//!
//! Represents places money is kept: cash, bank accounts and savings.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::AccountId;
use super::money::Money;

/// Type of financial account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Cash/wallet
    Cash,
    /// Bank account
    #[default]
    Bank,
    /// Savings account, kept out of the spendable balance
    Savings,
}

impl AccountType {
    /// Returns true if money in this account counts toward what can be spent
    pub fn is_spendable(&self) -> bool {
        !matches!(self, Self::Savings)
    }

    /// Parse account type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cash" | "wallet" => Some(Self::Cash),
            "bank" | "checking" => Some(Self::Bank),
            "savings" | "saving" => Some(Self::Savings),
            _ => None,
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cash => write!(f, "Cash"),
            Self::Bank => write!(f, "Bank"),
            Self::Savings => write!(f, "Savings"),
        }
    }
}

/// A financial account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Unique identifier
    pub id: AccountId,

    /// Account name (e.g., "Bank")
    pub name: String,

    /// Type of account
    #[serde(rename = "type")]
    pub account_type: AccountType,

    /// Savings target, meaningful for savings accounts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_amount: Option<Money>,
}

impl Account {
    /// Create a new account with a fresh ID
    pub fn new(name: impl Into<String>, account_type: AccountType) -> Self {
        Self {
            id: AccountId::new(),
            name: name.into(),
            account_type,
            target_amount: None,
        }
    }

    /// Set a savings target
    pub fn with_target_amount(mut self, target: Money) -> Self {
        self.target_amount = Some(target);
        self
    }

    /// Use a caller-supplied ID instead of the generated one
    pub fn with_id(mut self, id: impl Into<AccountId>) -> Self {
        self.id = id.into();
        self
    }

    /// Validate the account
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if self.name.trim().is_empty() {
            return Err(AccountValidationError::EmptyName);
        }

        if self.target_amount.is_some_and(|t| t.is_negative()) {
            return Err(AccountValidationError::NegativeTarget);
        }

        Ok(())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.account_type)
    }
}

/// Field-by-field update for an account; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct AccountPatch {
    pub name: Option<String>,
    pub account_type: Option<AccountType>,
    /// `Some(None)` clears the target
    pub target_amount: Option<Option<Money>>,
}

impl AccountPatch {
    pub fn apply(self, account: &mut Account) {
        if let Some(name) = self.name {
            account.name = name;
        }
        if let Some(account_type) = self.account_type {
            account.account_type = account_type;
        }
        if let Some(target) = self.target_amount {
            account.target_amount = target;
        }
    }
}

/// Validation errors for accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    EmptyName,
    NegativeTarget,
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Account name cannot be empty"),
            Self::NegativeTarget => write!(f, "Target amount cannot be negative"),
        }
    }
}

impl std::error::Error for AccountValidationError {}
