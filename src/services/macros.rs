//! Macro operations
//!
//! Macros are grouped one-tap expense templates. Removing a macro from a
//! group only sets its soft-delete flag; deleting a group removes it and its
//! macros outright.

use tracing::{debug, info};

use crate::error::{FinanceError, FinanceResult};
use crate::models::{
    Macro, MacroGroup, MacroGroupId, MacroId, MacroPatch, Money, NewTransaction, TransactionId,
};

use super::FinanceStore;

impl FinanceStore {
    pub fn macro_groups(&self) -> &[MacroGroup] {
        &self.state.macro_groups
    }

    pub fn macro_group(&self, id: &MacroGroupId) -> Option<&MacroGroup> {
        self.state.macro_group(id)
    }

    /// Look up a macro within a group
    pub fn find_macro(&self, group_id: &MacroGroupId, macro_id: &MacroId) -> Option<&Macro> {
        self.state.macro_group(group_id)?.find(macro_id)
    }

    /// Macros that are not soft-deleted, with their group, across all groups
    pub fn active_macros(&self) -> Vec<(&MacroGroup, &Macro)> {
        self.state
            .macro_groups
            .iter()
            .flat_map(|g| g.macros.iter().filter(|m| !m.deleted).map(move |m| (g, m)))
            .collect()
    }

    /// Soft-deleted macros, with their group
    pub fn deleted_macros(&self) -> Vec<(&MacroGroup, &Macro)> {
        self.state
            .macro_groups
            .iter()
            .flat_map(|g| g.macros.iter().filter(|m| m.deleted).map(move |m| (g, m)))
            .collect()
    }

    pub fn add_macro_group(&mut self, group: MacroGroup) -> FinanceResult<MacroGroupId> {
        if group.name.trim().is_empty() {
            return Err(FinanceError::Validation(
                "Macro group name cannot be empty".into(),
            ));
        }
        for m in &group.macros {
            m.validate()
                .map_err(|e| FinanceError::Validation(e.to_string()))?;
        }

        let id = group.id.clone();
        debug!(group_id = %id, name = %group.name, "Adding macro group");
        self.state.macro_groups.push(group);
        self.commit();
        Ok(id)
    }

    /// Remove a group and every macro in it
    pub fn delete_macro_group(&mut self, group_id: &MacroGroupId) -> bool {
        let before = self.state.macro_groups.len();
        self.state.macro_groups.retain(|g| &g.id != group_id);
        if self.state.macro_groups.len() == before {
            return false;
        }

        debug!(group_id = %group_id, "Deleted macro group");
        self.commit();
        true
    }

    /// Append a macro to a group. Returns None if the group doesn't exist.
    pub fn add_macro_to_group(
        &mut self,
        group_id: &MacroGroupId,
        m: Macro,
    ) -> FinanceResult<Option<MacroId>> {
        m.validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        let Some(group) = self.state.macro_groups.iter_mut().find(|g| &g.id == group_id) else {
            return Ok(None);
        };

        let id = m.id.clone();
        debug!(group_id = %group_id, macro_id = %id, name = %m.name, "Adding macro");
        group.macros.push(m);
        self.commit();
        Ok(Some(id))
    }

    pub fn update_macro_in_group(
        &mut self,
        group_id: &MacroGroupId,
        macro_id: &MacroId,
        patch: MacroPatch,
    ) -> FinanceResult<bool> {
        let Some(target) = self
            .state
            .macro_groups
            .iter_mut()
            .find(|g| &g.id == group_id)
            .and_then(|g| g.find_mut(macro_id))
        else {
            return Ok(false);
        };

        let mut updated = target.clone();
        patch.apply(&mut updated);
        updated
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        *target = updated;
        self.commit();
        Ok(true)
    }

    /// Soft-delete a macro; it stays in its group
    pub fn delete_macro_from_group(&mut self, group_id: &MacroGroupId, macro_id: &MacroId) -> bool {
        self.set_macro_deleted(group_id, macro_id, true)
    }

    /// Clear a macro's soft-delete flag
    pub fn restore_macro_in_group(&mut self, group_id: &MacroGroupId, macro_id: &MacroId) -> bool {
        self.set_macro_deleted(group_id, macro_id, false)
    }

    fn set_macro_deleted(&mut self, group_id: &MacroGroupId, macro_id: &MacroId, deleted: bool) -> bool {
        let Some(target) = self
            .state
            .macro_groups
            .iter_mut()
            .find(|g| &g.id == group_id)
            .and_then(|g| g.find_mut(macro_id))
        else {
            return false;
        };

        target.deleted = deleted;
        debug!(group_id = %group_id, macro_id = %macro_id, deleted, "Changed macro visibility");
        self.commit();
        true
    }

    /// Record an expense from a macro, optionally with a different amount
    ///
    /// Returns None if the macro isn't in the group. Soft-deleted macros can
    /// still be triggered.
    pub fn trigger_macro(
        &mut self,
        macro_id: &MacroId,
        group_id: &MacroGroupId,
        override_amount: Option<Money>,
    ) -> FinanceResult<Option<TransactionId>> {
        let Some(m) = self.find_macro(group_id, macro_id) else {
            return Ok(None);
        };

        let amount = override_amount.unwrap_or(m.amount);
        if amount.is_negative() {
            return Err(FinanceError::Validation(
                "Macro amount must not be negative".into(),
            ));
        }

        let new = NewTransaction::expense(m.account_id.clone(), amount)
            .with_description(m.name.clone())
            .with_category(m.category_id.clone());
        let name = m.name.clone();

        let txn = new.into_transaction(self.now());
        let id = self.push_transaction(txn);
        info!(macro_name = %name, amount = %amount, "Triggered macro");
        self.commit();
        Ok(Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{cash_id, fixture};
    use super::*;

    fn store_with_coffee() -> (FinanceStore, MacroGroupId, MacroId) {
        let (mut store, _, _) = fixture();
        let cash = cash_id(&store);
        let food = store.find_category("Food").unwrap().id.clone();

        let group = store.add_macro_group(MacroGroup::new("Daily")).unwrap();
        let coffee = store
            .add_macro_to_group(
                &group,
                Macro::new("Coffee", Money::from_units(3), cash)
                    .with_emoji("☕")
                    .with_category(food),
            )
            .unwrap()
            .unwrap();
        (store, group, coffee)
    }

    #[test]
    fn test_trigger_macro_records_expense() {
        let (mut store, group, coffee) = store_with_coffee();
        let cash = cash_id(&store);

        let id = store.trigger_macro(&coffee, &group, None).unwrap().unwrap();
        let txn = store.transaction(&id).unwrap();

        assert!(txn.is_expense());
        assert_eq!(txn.amount, Money::from_units(3));
        assert_eq!(txn.description.as_deref(), Some("Coffee"));
        assert_eq!(txn.account_id, cash);
        assert_eq!(txn.category_id, store.find_macro(&group, &coffee).unwrap().category_id);
        assert_eq!(store.account_balance(&cash), Money::from_units(-3));
    }

    #[test]
    fn test_trigger_macro_with_override() {
        let (mut store, group, coffee) = store_with_coffee();
        let id = store
            .trigger_macro(&coffee, &group, Some(Money::from_units(5)))
            .unwrap()
            .unwrap();
        assert_eq!(store.transaction(&id).unwrap().amount, Money::from_units(5));
    }

    #[test]
    fn test_trigger_missing_macro_returns_none() {
        let (mut store, group, coffee) = store_with_coffee();
        let other = store.add_macro_group(MacroGroup::new("Other")).unwrap();

        assert_eq!(store.trigger_macro(&MacroId::from("x"), &group, None).unwrap(), None);
        assert_eq!(store.trigger_macro(&coffee, &other, None).unwrap(), None);
        assert!(store.transactions().is_empty());
    }

    #[test]
    fn test_soft_delete_round_trip() {
        let (mut store, group, coffee) = store_with_coffee();
        let before = store.find_macro(&group, &coffee).unwrap().clone();

        assert!(store.delete_macro_from_group(&group, &coffee));
        assert!(store.find_macro(&group, &coffee).unwrap().deleted);
        assert_eq!(store.macro_group(&group).unwrap().macros.len(), 1);
        assert!(store.active_macros().is_empty());
        assert_eq!(store.deleted_macros().len(), 1);

        assert!(store.restore_macro_in_group(&group, &coffee));
        assert_eq!(store.find_macro(&group, &coffee).unwrap(), &before);
        assert_eq!(store.active_macros().len(), 1);
    }

    #[test]
    fn test_update_macro() {
        let (mut store, group, coffee) = store_with_coffee();
        let patch = MacroPatch {
            amount: Some(Money::from_units(4)),
            emoji: Some(None),
            ..Default::default()
        };

        assert!(store.update_macro_in_group(&group, &coffee, patch).unwrap());
        let m = store.find_macro(&group, &coffee).unwrap();
        assert_eq!(m.amount, Money::from_units(4));
        assert_eq!(m.emoji, None);
        assert!(!store
            .update_macro_in_group(&group, &MacroId::from("x"), MacroPatch::default())
            .unwrap());
    }

    #[test]
    fn test_add_macro_to_missing_group() {
        let (mut store, _, _) = store_with_coffee();
        let cash = cash_id(&store);
        let result = store
            .add_macro_to_group(
                &MacroGroupId::from("missing"),
                Macro::new("Bus", Money::from_units(2), cash),
            )
            .unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn test_delete_macro_group() {
        let (mut store, group, _) = store_with_coffee();
        assert!(store.delete_macro_group(&group));
        assert!(store.macro_groups().is_empty());
        assert!(!store.delete_macro_group(&group));
    }
}
