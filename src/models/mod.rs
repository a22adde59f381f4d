//! Core data models for the finance tracker
//!
//! This module contains all the data structures that represent the finance
//! domain: accounts, categories, transactions, macros, recurring payments,
//! credits and savings goals.

pub mod account;
pub mod category;
pub mod credit;
pub mod goal;
pub mod ids;
pub mod macros;
pub mod money;
pub mod month;
pub mod recurring;
pub mod state;
pub mod transaction;

pub use account::{Account, AccountPatch, AccountType};
pub use category::{Category, CategoryPatch};
pub use credit::{Credit, CreditPatch};
pub use goal::{Goal, GoalPatch};
pub use ids::{
    AccountId, CategoryId, CreditId, GoalId, MacroGroupId, MacroId, RecurringId, TransactionId,
    TransferId,
};
pub use macros::{Macro, MacroGroup, MacroPatch};
pub use money::Money;
pub use month::MonthKey;
pub use recurring::{Recurring, RecurringPatch};
pub use state::FinanceState;
pub use transaction::{NewTransaction, Transaction, TransactionPatch, TransactionType};
