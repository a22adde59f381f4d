//! Macro models
//!
//! A macro is a one-tap template that records an expense with a preset
//! amount, account and category. Macros live in named groups and are
//! soft-deleted so they can be restored.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, CategoryId, MacroGroupId, MacroId};
use super::money::Money;

/// A reusable expense template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Macro {
    pub id: MacroId,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,

    pub amount: Money,

    #[serde(default)]
    pub category_id: Option<CategoryId>,

    pub account_id: AccountId,

    /// Soft-delete flag
    #[serde(default)]
    pub deleted: bool,
}

impl Macro {
    pub fn new(name: impl Into<String>, amount: Money, account_id: AccountId) -> Self {
        Self {
            id: MacroId::new(),
            name: name.into(),
            emoji: None,
            amount,
            category_id: None,
            account_id,
            deleted: false,
        }
    }

    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }

    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_id(mut self, id: impl Into<MacroId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn validate(&self) -> Result<(), MacroValidationError> {
        if self.name.trim().is_empty() {
            return Err(MacroValidationError::EmptyName);
        }
        if self.amount.is_negative() {
            return Err(MacroValidationError::NegativeAmount);
        }
        Ok(())
    }
}

impl fmt::Display for Macro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.emoji {
            Some(emoji) => write!(f, "{} {} ({})", emoji, self.name, self.amount),
            None => write!(f, "{} ({})", self.name, self.amount),
        }
    }
}

/// A named, ordered collection of macros
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroGroup {
    pub id: MacroGroupId,
    pub name: String,
    #[serde(default)]
    pub macros: Vec<Macro>,
}

impl MacroGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: MacroGroupId::new(),
            name: name.into(),
            macros: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<MacroGroupId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn find(&self, macro_id: &MacroId) -> Option<&Macro> {
        self.macros.iter().find(|m| &m.id == macro_id)
    }

    pub fn find_mut(&mut self, macro_id: &MacroId) -> Option<&mut Macro> {
        self.macros.iter_mut().find(|m| &m.id == macro_id)
    }

    /// Macros that have not been soft-deleted, in display order
    pub fn active(&self) -> impl Iterator<Item = &Macro> {
        self.macros.iter().filter(|m| !m.deleted)
    }
}

/// Field-by-field update for a macro
#[derive(Debug, Clone, Default)]
pub struct MacroPatch {
    pub name: Option<String>,
    pub emoji: Option<Option<String>>,
    pub amount: Option<Money>,
    pub category_id: Option<Option<CategoryId>>,
    pub account_id: Option<AccountId>,
}

impl MacroPatch {
    pub fn apply(self, target: &mut Macro) {
        if let Some(name) = self.name {
            target.name = name;
        }
        if let Some(emoji) = self.emoji {
            target.emoji = emoji;
        }
        if let Some(amount) = self.amount {
            target.amount = amount;
        }
        if let Some(category_id) = self.category_id {
            target.category_id = category_id;
        }
        if let Some(account_id) = self.account_id {
            target.account_id = account_id;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MacroValidationError {
    EmptyName,
    NegativeAmount,
}

impl fmt::Display for MacroValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Macro name cannot be empty"),
            Self::NegativeAmount => write!(f, "Macro amount cannot be negative"),
        }
    }
}

impl std::error::Error for MacroValidationError {}
