//! Savings goal model
//!
//! Goals track money set aside toward a target. The saved amount moves only
//! through explicit deposits and withdrawals, never through transactions.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::GoalId;
use super::money::Money;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: GoalId,
    pub name: String,
    pub target_amount: Money,
    #[serde(default)]
    pub saved_amount: Money,
}

impl Goal {
    pub fn new(name: impl Into<String>, target_amount: Money) -> Self {
        Self {
            id: GoalId::new(),
            name: name.into(),
            target_amount,
            saved_amount: Money::zero(),
        }
    }

    pub fn with_saved(mut self, saved: Money) -> Self {
        self.saved_amount = saved.max(Money::zero());
        self
    }

    pub fn with_id(mut self, id: impl Into<GoalId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn deposit(&mut self, amount: Money) {
        self.saved_amount += amount;
    }

    /// Withdraw from the goal; the saved amount never drops below zero
    pub fn withdraw(&mut self, amount: Money) {
        self.saved_amount = self.saved_amount.saturating_sub(amount);
    }

    /// Amount still needed to reach the target
    pub fn remaining(&self) -> Money {
        self.target_amount.saturating_sub(self.saved_amount)
    }

    /// Progress toward the target as a percentage, capped at 100
    pub fn progress_percent(&self) -> f64 {
        if !self.target_amount.is_positive() {
            return 0.0;
        }
        (self.saved_amount.to_f64() / self.target_amount.to_f64() * 100.0).min(100.0)
    }

    pub fn is_reached(&self) -> bool {
        self.target_amount.is_positive() && self.saved_amount >= self.target_amount
    }

    pub fn validate(&self) -> Result<(), GoalValidationError> {
        if self.name.trim().is_empty() {
            return Err(GoalValidationError::EmptyName);
        }
        if self.target_amount.is_negative() || self.saved_amount.is_negative() {
            return Err(GoalValidationError::NegativeAmount);
        }
        Ok(())
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} / {})", self.name, self.saved_amount, self.target_amount)
    }
}

/// Field-by-field update for a goal
#[derive(Debug, Clone, Default)]
pub struct GoalPatch {
    pub name: Option<String>,
    pub target_amount: Option<Money>,
    pub saved_amount: Option<Money>,
}

impl GoalPatch {
    pub fn apply(self, goal: &mut Goal) {
        if let Some(name) = self.name {
            goal.name = name;
        }
        if let Some(target) = self.target_amount {
            goal.target_amount = target;
        }
        if let Some(saved) = self.saved_amount {
            goal.saved_amount = saved.max(Money::zero());
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    EmptyName,
    NegativeAmount,
}

impl fmt::Display for GoalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Goal name cannot be empty"),
            Self::NegativeAmount => write!(f, "Goal amounts cannot be negative"),
        }
    }
}

impl std::error::Error for GoalValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deposit_and_withdraw() {
        let mut goal = Goal::new("Trip", Money::from_units(2000));
        goal.deposit(Money::from_units(500));
        assert_eq!(goal.saved_amount, Money::from_units(500));
        assert_eq!(goal.remaining(), Money::from_units(1500));
        assert_eq!(goal.progress_percent(), 25.0);

        goal.withdraw(Money::from_units(800));
        assert_eq!(goal.saved_amount, Money::zero());
    }

    #[test]
    fn test_progress_caps_at_100() {
        let goal = Goal::new("Phone", Money::from_units(100)).with_saved(Money::from_units(150));
        assert_eq!(goal.progress_percent(), 100.0);
        assert!(goal.is_reached());
        assert_eq!(goal.remaining(), Money::zero());
    }

    #[test]
    fn test_zero_target_has_no_progress() {
        let goal = Goal::new("Someday", Money::zero());
        assert_eq!(goal.progress_percent(), 0.0);
        assert!(!goal.is_reached());
    }
}
