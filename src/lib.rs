//! Finance Tracker - personal finance tracking from the terminal
//!
//! This library holds the whole domain: accounts, categories, transactions
//! and transfers, expense macros, recurring payments, credits and savings
//! goals, plus the derived figures built on them (balances, obligations,
//! safe-to-spend and monthly spending).
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Core data models and the [`models::FinanceState`] aggregate
//! - `services`: [`FinanceStore`], the only thing that mutates the state
//! - `storage`: Pluggable persistence of the state as one JSON document
//! - `config`: Path resolution and user settings
//! - `backup`: Rolling backups and restore
//! - `export`: JSON, YAML and CSV export
//! - `cli` / `display`: The `finance` binary's commands and formatting
//! - `clock`: Injectable time source
//! - `logging`: Tracing subscriber setup
//!
//! # Example
//!
//! ```rust
//! use finance_tracker::models::{Money, NewTransaction, Recurring};
//! use finance_tracker::FinanceStore;
//!
//! let mut store = FinanceStore::in_memory();
//! let bank = store.accounts()[1].id.clone();
//!
//! store
//!     .add_transaction(NewTransaction::income(bank.clone(), Money::from_units(1_000_000)))
//!     .unwrap();
//! let internet = store
//!     .add_recurring(Recurring::new("Internet", Money::from_units(80_000), 5, bank))
//!     .unwrap();
//! assert_eq!(store.safe_to_spend(), Money::from_units(920_000));
//!
//! store.pay_recurring(&internet);
//! assert_eq!(store.safe_to_spend(), Money::from_units(920_000));
//! ```

pub mod backup;
pub mod cli;
pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{FinanceError, FinanceResult, ImportError};
pub use services::FinanceStore;
pub use storage::{Repository, StateStorage};
