//! Category operations

use tracing::debug;

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Category, CategoryId, CategoryPatch};

use super::FinanceStore;

impl FinanceStore {
    pub fn categories(&self) -> &[Category] {
        &self.state.categories
    }

    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.state.category(id)
    }

    /// Find a category by ID or by case-insensitive name
    pub fn find_category(&self, query: &str) -> Option<&Category> {
        let query = query.trim();
        self.state
            .categories
            .iter()
            .find(|c| c.id.as_str() == query)
            .or_else(|| {
                self.state
                    .categories
                    .iter()
                    .find(|c| c.name.eq_ignore_ascii_case(query))
            })
    }

    pub fn add_category(&mut self, category: Category) -> FinanceResult<CategoryId> {
        category
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        let id = category.id.clone();
        debug!(category_id = %id, name = %category.name, "Adding category");
        self.state.categories.push(category);
        self.commit();
        Ok(id)
    }

    pub fn update_category(&mut self, id: &CategoryId, patch: CategoryPatch) -> FinanceResult<bool> {
        let Some(category) = self.state.categories.iter_mut().find(|c| &c.id == id) else {
            return Ok(false);
        };

        let mut updated = category.clone();
        patch.apply(&mut updated);
        updated
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        *category = updated;
        self.commit();
        Ok(true)
    }

    /// Remove a category. Nothing else is deleted: transactions, macros,
    /// recurring payments and child categories just lose the reference.
    ///
    /// References are cleared even when no category has this id. Returns
    /// whether anything changed.
    pub fn delete_category(&mut self, id: &CategoryId) -> bool {
        let before = self.state.categories.len();
        self.state.categories.retain(|c| &c.id != id);
        let removed_category = self.state.categories.len() != before;

        let target = Some(id);
        let mut cleared = 0usize;
        let mut clear = |reference: &mut Option<CategoryId>| {
            if reference.as_ref() == target {
                *reference = None;
                cleared += 1;
            }
        };
        for txn in &mut self.state.transactions {
            clear(&mut txn.category_id);
        }
        for group in &mut self.state.macro_groups {
            for m in &mut group.macros {
                clear(&mut m.category_id);
            }
        }
        for recurring in &mut self.state.recurrings {
            clear(&mut recurring.category_id);
        }
        for category in &mut self.state.categories {
            clear(&mut category.parent_id);
        }

        if !removed_category && cleared == 0 {
            return false;
        }

        debug!(category_id = %id, removed_category, cleared, "Deleted category");
        self.commit();
        true
    }
}
