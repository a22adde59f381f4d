//! Savings goal operations

use tracing::debug;

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Goal, GoalId, GoalPatch, Money};

use super::FinanceStore;

impl FinanceStore {
    pub fn goals(&self) -> &[Goal] {
        &self.state.goals
    }

    pub fn goal(&self, id: &GoalId) -> Option<&Goal> {
        self.state.goal(id)
    }

    pub fn add_goal(&mut self, goal: Goal) -> FinanceResult<GoalId> {
        goal.validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        let id = goal.id.clone();
        debug!(goal_id = %id, name = %goal.name, "Adding goal");
        self.state.goals.push(goal);
        self.commit();
        Ok(id)
    }

    pub fn update_goal(&mut self, id: &GoalId, patch: GoalPatch) -> FinanceResult<bool> {
        let Some(goal) = self.state.goals.iter_mut().find(|g| &g.id == id) else {
            return Ok(false);
        };

        let mut updated = goal.clone();
        patch.apply(&mut updated);
        updated
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        *goal = updated;
        self.commit();
        Ok(true)
    }

    pub fn delete_goal(&mut self, id: &GoalId) -> bool {
        let before = self.state.goals.len();
        self.state.goals.retain(|g| &g.id != id);
        if self.state.goals.len() == before {
            return false;
        }

        self.commit();
        true
    }

    /// Put money toward a goal
    pub fn add_to_goal(&mut self, id: &GoalId, amount: Money) -> FinanceResult<bool> {
        self.adjust_goal(id, amount, Goal::deposit)
    }

    /// Take money out of a goal; the saved amount stops at zero
    pub fn remove_from_goal(&mut self, id: &GoalId, amount: Money) -> FinanceResult<bool> {
        self.adjust_goal(id, amount, Goal::withdraw)
    }

    fn adjust_goal(
        &mut self,
        id: &GoalId,
        amount: Money,
        op: fn(&mut Goal, Money),
    ) -> FinanceResult<bool> {
        if amount.is_negative() {
            return Err(FinanceError::Validation(
                "Goal adjustment must not be negative".into(),
            ));
        }

        let Some(goal) = self.state.goals.iter_mut().find(|g| &g.id == id) else {
            return Ok(false);
        };

        op(goal, amount);
        debug!(goal_id = %id, saved = %goal.saved_amount, "Adjusted goal");
        self.commit();
        Ok(true)
    }
}
