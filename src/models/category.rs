//! Category model
//!
//! Categories label expenses. A category may carry a monthly budget and may
//! point at a parent, though the hierarchy is only used for display.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;
use super::money::Money;

/// A spending category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name
    pub name: String,

    /// Display emoji
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,

    /// Parent category, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CategoryId>,

    /// Monthly spending budget
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_monthly: Option<Money>,
}

impl Category {
    /// Create a new category with a fresh ID
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            emoji: None,
            parent_id: None,
            budget_monthly: None,
        }
    }

    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }

    pub fn with_parent(mut self, parent_id: CategoryId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn with_budget(mut self, budget: Money) -> Self {
        self.budget_monthly = Some(budget);
        self
    }

    pub fn with_id(mut self, id: impl Into<CategoryId>) -> Self {
        self.id = id.into();
        self
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.budget_monthly.is_some_and(|b| b.is_negative()) {
            return Err(CategoryValidationError::NegativeBudget);
        }

        if self.parent_id.as_ref() == Some(&self.id) {
            return Err(CategoryValidationError::OwnParent);
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.emoji {
            Some(emoji) => write!(f, "{} {}", emoji, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Field-by-field update for a category
#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub emoji: Option<Option<String>>,
    pub parent_id: Option<Option<CategoryId>>,
    pub budget_monthly: Option<Option<Money>>,
}

impl CategoryPatch {
    pub fn apply(self, category: &mut Category) {
        if let Some(name) = self.name {
            category.name = name;
        }
        if let Some(emoji) = self.emoji {
            category.emoji = emoji;
        }
        if let Some(parent_id) = self.parent_id {
            category.parent_id = parent_id;
        }
        if let Some(budget) = self.budget_monthly {
            category.budget_monthly = budget;
        }
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NegativeBudget,
    OwnParent,
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NegativeBudget => write!(f, "Monthly budget cannot be negative"),
            Self::OwnParent => write!(f, "Category cannot be its own parent"),
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let parent = Category::new("Home");
        let category = Category::new("Rent")
            .with_emoji("🏠")
            .with_parent(parent.id.clone())
            .with_budget(Money::from_units(900));

        assert_eq!(category.parent_id, Some(parent.id));
        assert_eq!(category.budget_monthly, Some(Money::from_units(900)));
        assert_eq!(category.to_string(), "🏠 Rent");
    }

    #[test]
    fn test_validation() {
        assert!(Category::new("Food").validate().is_ok());
        assert_eq!(Category::new("").validate(), Err(CategoryValidationError::EmptyName));

        let category = Category::new("Loop").with_id("c1").with_parent(CategoryId::from("c1"));
        assert_eq!(category.validate(), Err(CategoryValidationError::OwnParent));
    }

    #[test]
    fn test_patch_clears_optional_fields() {
        let mut category = Category::new("Food").with_emoji("🍔").with_budget(Money::from_units(300));
        CategoryPatch {
            emoji: Some(None),
            budget_monthly: Some(Some(Money::from_units(350))),
            ..Default::default()
        }
        .apply(&mut category);

        assert!(category.emoji.is_none());
        assert_eq!(category.budget_monthly, Some(Money::from_units(350)));
    }

    #[test]
    fn test_accepts_null_parent() {
        let category: Category =
            serde_json::from_str(r#"{"id":"c","name":"Food","parentId":null,"budgetMonthly":null}"#)
                .unwrap();
        assert!(category.parent_id.is_none());
        assert!(category.budget_monthly.is_none());
    }
}
