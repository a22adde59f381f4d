//! Display for macros, recurring payments, credits and goals

use super::report::{format_bar, format_percentage};
use super::transaction::short_id;
use super::{render_table, Align};
use crate::models::{AccountId, Money};
use crate::services::FinanceStore;

fn account_name<'a>(store: &'a FinanceStore, id: &AccountId) -> &'a str {
    store.account(id).map(|a| a.name.as_str()).unwrap_or("Unknown")
}

/// Macro groups and their macros. Soft-deleted macros are listed only when
/// `include_deleted` is set.
pub fn format_macro_groups(store: &FinanceStore, include_deleted: bool, symbol: &str) -> String {
    if store.macro_groups().is_empty() {
        return "No macro groups found.\n".to_string();
    }

    let mut output = String::new();
    for group in store.macro_groups() {
        output.push_str(&format!("{} [{}]\n", group.name, short_id(group.id.as_str())));

        let macros: Vec<_> = group
            .macros
            .iter()
            .filter(|m| include_deleted || !m.deleted)
            .collect();
        if macros.is_empty() {
            output.push_str("  (empty)\n");
            continue;
        }

        for m in macros {
            let emoji = m.emoji.as_deref().map(|e| format!("{} ", e)).unwrap_or_default();
            let category = m
                .category_id
                .as_ref()
                .and_then(|id| store.category(id))
                .map(|c| format!(", {}", c.name))
                .unwrap_or_default();
            output.push_str(&format!(
                "  {}{}  {}  ({}{}){}  [{}]\n",
                emoji,
                m.name,
                m.amount.format_with_symbol(symbol),
                account_name(store, &m.account_id),
                category,
                if m.deleted { "  deleted" } else { "" },
                short_id(m.id.as_str()),
            ));
        }
    }
    output
}

/// Recurring payments with this month's paid state
pub fn format_recurring_list(store: &FinanceStore, symbol: &str) -> String {
    if store.recurrings().is_empty() {
        return "No recurring payments found.\n".to_string();
    }

    let month = store.current_month();
    let rows: Vec<Vec<String>> = store
        .recurrings()
        .iter()
        .map(|r| {
            vec![
                short_id(r.id.as_str()).to_string(),
                r.name.clone(),
                r.amount.format_with_symbol(symbol),
                r.due_day.to_string(),
                account_name(store, &r.account_id).to_string(),
                if r.is_paid(&month) { "paid" } else { "due" }.to_string(),
            ]
        })
        .collect();

    let mut output = format!("Recurring payments, {}\n\n", month);
    output.push_str(&render_table(
        &[
            ("ID", Align::Left),
            ("Name", Align::Left),
            ("Amount", Align::Right),
            ("Day", Align::Right),
            ("Account", Align::Left),
            ("Status", Align::Left),
        ],
        &rows,
    ));
    output
}

/// Credits with repayment progress
pub fn format_credit_list(store: &FinanceStore, symbol: &str) -> String {
    if store.credits().is_empty() {
        return "No credits found.\n".to_string();
    }

    let month = store.current_month();
    let rows: Vec<Vec<String>> = store
        .credits()
        .iter()
        .map(|c| {
            let status = if c.is_paid_off() {
                "paid off".to_string()
            } else if c.is_paid_for(&month) {
                "paid this month".to_string()
            } else {
                format!("{} left", c.installments_remaining())
            };
            vec![
                short_id(c.id.as_str()).to_string(),
                c.name.clone(),
                c.paid.format_with_symbol(symbol),
                c.total.format_with_symbol(symbol),
                c.monthly_installment.format_with_symbol(symbol),
                c.due_day.to_string(),
                status,
            ]
        })
        .collect();

    render_table(
        &[
            ("ID", Align::Left),
            ("Name", Align::Left),
            ("Paid", Align::Right),
            ("Total", Align::Right),
            ("Installment", Align::Right),
            ("Day", Align::Right),
            ("Status", Align::Left),
        ],
        &rows,
    )
}

/// Savings goals with a progress bar
pub fn format_goal_list(store: &FinanceStore, symbol: &str) -> String {
    if store.goals().is_empty() {
        return "No goals found.\n".to_string();
    }

    let rows: Vec<Vec<String>> = store
        .goals()
        .iter()
        .map(|g| {
            vec![
                short_id(g.id.as_str()).to_string(),
                g.name.clone(),
                g.saved_amount.format_with_symbol(symbol),
                g.target_amount.format_with_symbol(symbol),
                format_percentage(g.progress_percent()),
                format_bar(g.progress_percent(), 100.0, 20),
            ]
        })
        .collect();

    let saved: Money = store.goals().iter().map(|g| g.saved_amount).sum();
    let mut output = render_table(
        &[
            ("ID", Align::Left),
            ("Name", Align::Left),
            ("Saved", Align::Right),
            ("Target", Align::Right),
            ("Progress", Align::Right),
            ("", Align::Left),
        ],
        &rows,
    );
    output.push_str(&format!("\nTotal saved: {}\n", saved.format_with_symbol(symbol)));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Credit, Goal, Macro, MacroGroup, Recurring};

    #[test]
    fn test_macro_groups_hide_deleted() {
        let mut store = FinanceStore::in_memory();
        let cash = store.accounts()[0].id.clone();
        let group = store.add_macro_group(MacroGroup::new("Daily")).unwrap();
        store
            .add_macro_to_group(&group, Macro::new("Coffee", Money::from_units(3), cash.clone()).with_emoji("☕"))
            .unwrap();
        let bus = store
            .add_macro_to_group(&group, Macro::new("Bus", Money::from_units(2), cash))
            .unwrap()
            .unwrap();
        store.delete_macro_from_group(&group, &bus);

        let visible = format_macro_groups(&store, false, "$");
        assert!(visible.contains("☕ Coffee  $3.00  (Cash)"));
        assert!(!visible.contains("Bus"));

        let all = format_macro_groups(&store, true, "$");
        assert!(all.contains("deleted"));
    }

    #[test]
    fn test_recurring_list_shows_status() {
        let mut store = FinanceStore::in_memory();
        let bank = store.accounts()[1].id.clone();
        let id = store
            .add_recurring(Recurring::new("Internet", Money::from_units(80), 5, bank))
            .unwrap();
        assert!(format_recurring_list(&store, "$").contains("due"));

        store.pay_recurring(&id).unwrap();
        assert!(format_recurring_list(&store, "$").contains("paid"));
    }

    #[test]
    fn test_credit_and_goal_lists() {
        let mut store = FinanceStore::in_memory();
        let bank = store.accounts()[1].id.clone();
        store
            .add_credit(Credit::new("Laptop", Money::from_units(1000), Money::from_units(300), 10, bank))
            .unwrap();
        store
            .add_goal(Goal::new("Trip", Money::from_units(400)).with_saved(Money::from_units(100)))
            .unwrap();

        assert!(format_credit_list(&store, "$").contains("4 left"));
        let goals = format_goal_list(&store, "$");
        assert!(goals.contains("25%"));
        assert!(goals.contains("Total saved: $100.00"));
    }
}
