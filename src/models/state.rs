//! The aggregate of every entity collection
//!
//! `FinanceState` is what gets persisted, exported and imported. It has no
//! behavior beyond lookups; mutations go through the store.

use serde::{Deserialize, Serialize};

use super::account::{Account, AccountType};
use super::category::Category;
use super::credit::Credit;
use super::goal::Goal;
use super::ids::{AccountId, CategoryId, CreditId, GoalId, MacroGroupId, RecurringId, TransactionId};
use super::macros::MacroGroup;
use super::recurring::Recurring;
use super::transaction::Transaction;

/// Names and emojis of the categories every fresh store starts with
pub const DEFAULT_CATEGORIES: [(&str, &str); 4] = [
    ("General", "📦"),
    ("Transport", "🚌"),
    ("Food", "🍔"),
    ("Subscriptions", "🧾"),
];

/// Every entity collection held by the store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceState {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub categories: Vec<Category>,
    /// Most recently added first
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub macro_groups: Vec<MacroGroup>,
    #[serde(default)]
    pub recurrings: Vec<Recurring>,
    #[serde(default)]
    pub credits: Vec<Credit>,
    #[serde(default)]
    pub goals: Vec<Goal>,
}

impl FinanceState {
    /// The default seed: a cash and a bank account plus the starter
    /// categories. IDs are freshly generated on every call.
    pub fn seeded() -> Self {
        let accounts = vec![
            Account::new("Cash", AccountType::Cash),
            Account::new("Bank", AccountType::Bank),
        ];

        let categories = DEFAULT_CATEGORIES
            .iter()
            .map(|(name, emoji)| Category::new(*name).with_emoji(*emoji))
            .collect();

        Self {
            accounts,
            categories,
            ..Default::default()
        }
    }

    pub fn account(&self, id: &AccountId) -> Option<&Account> {
        self.accounts.iter().find(|a| &a.id == id)
    }

    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| &c.id == id)
    }

    pub fn transaction(&self, id: &TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| &t.id == id)
    }

    pub fn macro_group(&self, id: &MacroGroupId) -> Option<&MacroGroup> {
        self.macro_groups.iter().find(|g| &g.id == id)
    }

    pub fn recurring(&self, id: &RecurringId) -> Option<&Recurring> {
        self.recurrings.iter().find(|r| &r.id == id)
    }

    pub fn credit(&self, id: &CreditId) -> Option<&Credit> {
        self.credits.iter().find(|c| &c.id == id)
    }

    pub fn goal(&self, id: &GoalId) -> Option<&Goal> {
        self.goals.iter().find(|g| &g.id == id)
    }

    /// Total number of records across all collections
    pub fn record_count(&self) -> usize {
        self.accounts.len()
            + self.categories.len()
            + self.transactions.len()
            + self.macro_groups.iter().map(|g| 1 + g.macros.len()).sum::<usize>()
            + self.recurrings.len()
            + self.credits.len()
            + self.goals.len()
    }
}
