//! Category display formatting

use crate::models::{Category, CategoryId};

fn label(category: &Category) -> String {
    match &category.emoji {
        Some(emoji) => format!("{} {}", emoji, category.name),
        None => category.name.clone(),
    }
}

/// Format categories as a tree, children under their parent
///
/// Categories whose parent no longer exists are shown at the top level.
pub fn format_category_tree(categories: &[Category], symbol: &str) -> String {
    if categories.is_empty() {
        return "No categories found.\n".to_string();
    }

    let exists = |id: &CategoryId| categories.iter().any(|c| &c.id == id);
    let is_root = |c: &Category| c.parent_id.as_ref().map_or(true, |p| !exists(p));

    let line = |c: &Category, indent: &str| {
        let budget = c
            .budget_monthly
            .map(|b| format!("  (budget {}/month)", b.format_with_symbol(symbol)))
            .unwrap_or_default();
        format!("{}{}{}\n", indent, label(c), budget)
    };

    let mut output = String::new();
    for root in categories.iter().filter(|c| is_root(*c)) {
        output.push_str(&line(root, ""));
        for child in categories
            .iter()
            .filter(|c| c.parent_id.as_ref() == Some(&root.id))
        {
            output.push_str(&line(child, "  └ "));
        }
    }
    output
}

/// Format a single category's details
pub fn format_category_details(category: &Category, parent: Option<&Category>, symbol: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("Category: {}\n", label(category)));
    output.push_str(&format!("  ID:      {}\n", category.id));
    if let Some(parent) = parent {
        output.push_str(&format!("  Parent:  {}\n", parent.name));
    }
    match category.budget_monthly {
        Some(budget) => output.push_str(&format!(
            "  Budget:  {} per month\n",
            budget.format_with_symbol(symbol)
        )),
        None => output.push_str("  Budget:  none\n"),
    }
    output
}
