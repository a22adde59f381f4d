//! Derived figures
//!
//! Everything here is a pure function of the current state. Balances count
//! transfer legs as ordinary income and expense on their own account, which
//! nets out correctly. Spending aggregates (expenses by category, cash flow,
//! category budgets) always leave transfer legs out, since moving money
//! between your own accounts is neither income nor spending.

use crate::models::{AccountId, Category, CategoryId, Money, MonthKey, Transaction};

use super::FinanceStore;

/// Spending in one category bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    /// None for uncategorized expenses
    pub category_id: Option<CategoryId>,
    pub total: Money,
}

/// Income and expenses of one month, transfers excluded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CashFlow {
    pub month: MonthKey,
    pub income: Money,
    pub expenses: Money,
}

impl CashFlow {
    pub fn net(&self) -> Money {
        self.income - self.expenses
    }
}

/// A budgeted category's spending for one month
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBudgetStatus {
    pub category: Category,
    pub budget: Money,
    pub spent: Money,
}

impl CategoryBudgetStatus {
    /// Budget left; negative when overspent
    pub fn remaining(&self) -> Money {
        self.budget - self.spent
    }

    pub fn is_over_budget(&self) -> bool {
        self.spent > self.budget
    }

    /// Share of the budget spent, as a percentage (uncapped)
    pub fn percent_used(&self) -> f64 {
        if !self.budget.is_positive() {
            return 0.0;
        }
        self.spent.to_f64() / self.budget.to_f64() * 100.0
    }
}

impl FinanceStore {
    /// Income minus expenses on one account. Unknown accounts are zero.
    pub fn account_balance(&self, account_id: &AccountId) -> Money {
        self.state
            .transactions
            .iter()
            .filter(|t| &t.account_id == account_id)
            .map(Transaction::signed_amount)
            .sum()
    }

    /// Sum of balances over every account that isn't savings
    pub fn total_spendable_balance(&self) -> Money {
        self.state
            .accounts
            .iter()
            .filter(|a| a.account_type.is_spendable())
            .map(|a| self.account_balance(&a.id))
            .sum()
    }

    /// Every recurring amount plus every credit installment, paid or not
    pub fn monthly_obligations_total(&self) -> Money {
        let recurring: Money = self.state.recurrings.iter().map(|r| r.amount).sum();
        let credits: Money = self
            .state
            .credits
            .iter()
            .map(|c| c.monthly_installment)
            .sum();
        recurring + credits
    }

    /// What is still owed for the current month
    pub fn monthly_obligations_remaining(&self) -> Money {
        let month = self.current_month();

        let recurring: Money = self
            .state
            .recurrings
            .iter()
            .filter(|r| !r.is_paid(&month))
            .map(|r| r.amount)
            .sum();
        let credits: Money = self
            .state
            .credits
            .iter()
            .filter(|c| !c.is_paid_for(&month))
            .map(|c| c.monthly_installment)
            .sum();
        recurring + credits
    }

    /// Spendable balance minus this month's unpaid obligations
    pub fn safe_to_spend(&self) -> Money {
        self.total_spendable_balance() - self.monthly_obligations_remaining()
    }

    /// Expenses in a month (default: the current one) grouped by category.
    /// Buckets appear in the order their first expense is found.
    pub fn expenses_by_category(&self, month: Option<MonthKey>) -> Vec<CategoryTotal> {
        let month = month.unwrap_or_else(|| self.current_month());
        let mut totals: Vec<CategoryTotal> = Vec::new();

        for txn in self.spending_in(month).filter(|t| t.is_expense()) {
            match totals.iter_mut().find(|b| b.category_id == txn.category_id) {
                Some(bucket) => bucket.total += txn.amount,
                None => totals.push(CategoryTotal {
                    category_id: txn.category_id.clone(),
                    total: txn.amount,
                }),
            }
        }
        totals
    }

    /// Income and expenses for a month
    pub fn cash_flow(&self, month: MonthKey) -> CashFlow {
        let mut flow = CashFlow {
            month,
            income: Money::zero(),
            expenses: Money::zero(),
        };
        for txn in self.spending_in(month) {
            if txn.is_income() {
                flow.income += txn.amount;
            } else if txn.is_expense() {
                flow.expenses += txn.amount;
            }
        }
        flow
    }

    /// Cash flow for `months` consecutive months, oldest first, ending at `end`
    pub fn cash_flow_trend(&self, end: MonthKey, months: usize) -> Vec<CashFlow> {
        let mut keys = Vec::with_capacity(months);
        let mut month = end;
        for _ in 0..months {
            keys.push(month);
            month = month.prev();
        }
        keys.into_iter().rev().map(|m| self.cash_flow(m)).collect()
    }

    /// Spending against budget for every category that has a monthly budget
    pub fn category_budget_status(&self, month: MonthKey) -> Vec<CategoryBudgetStatus> {
        let totals = self.expenses_by_category(Some(month));

        self.state
            .categories
            .iter()
            .filter_map(|category| {
                let budget = category.budget_monthly?;
                let spent = totals
                    .iter()
                    .find(|t| t.category_id.as_ref() == Some(&category.id))
                    .map_or(Money::zero(), |t| t.total);
                Some(CategoryBudgetStatus {
                    category: category.clone(),
                    budget,
                    spent,
                })
            })
            .collect()
    }

    /// Non-transfer transactions dated within `month`
    fn spending_in(&self, month: MonthKey) -> impl Iterator<Item = &Transaction> {
        self.transactions_in_month(month)
            .filter(|t| !t.is_transfer())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{bank_id, cash_id, fixture};
    use super::*;
    use crate::models::{Account, AccountType, Credit, NewTransaction, Recurring};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_account_balance_and_spendable() {
        let (mut store, _, _) = fixture();
        let bank = bank_id(&store);
        let cash = cash_id(&store);
        let savings = store
            .add_account(Account::new("Rainy day", AccountType::Savings))
            .unwrap();

        store
            .add_transaction(NewTransaction::income(bank.clone(), Money::from_units(1000)))
            .unwrap();
        store
            .add_transaction(NewTransaction::expense(bank.clone(), Money::from_units(150)))
            .unwrap();
        store
            .add_transaction(NewTransaction::income(cash.clone(), Money::from_units(40)))
            .unwrap();
        store
            .create_transfer(&bank, &savings, Money::from_units(200), None, None, None)
            .unwrap();

        assert_eq!(store.account_balance(&bank), Money::from_units(650));
        assert_eq!(store.account_balance(&savings), Money::from_units(200));
        assert_eq!(store.account_balance(&AccountId::from("ghost")), Money::zero());
        assert_eq!(store.total_spendable_balance(), Money::from_units(690));
        assert_eq!(store.total_balance(), Money::from_units(890));
    }

    #[test]
    fn test_obligations_and_safe_to_spend() {
        let (mut store, _, _) = fixture();
        let bank = bank_id(&store);

        store
            .add_transaction(NewTransaction::income(bank.clone(), Money::from_units(2000)))
            .unwrap();
        let rent = store
            .add_recurring(Recurring::new("Rent", Money::from_units(700), 1, bank.clone()))
            .unwrap();
        store
            .add_recurring(Recurring::new("Internet", Money::from_units(50), 5, bank.clone()))
            .unwrap();
        store
            .add_credit(Credit::new("Car", Money::from_units(3000), Money::from_units(250), 15, bank))
            .unwrap();

        assert_eq!(store.monthly_obligations_total(), Money::from_units(1000));
        assert_eq!(store.monthly_obligations_remaining(), Money::from_units(1000));
        assert_eq!(store.safe_to_spend(), Money::from_units(1000));

        store.pay_recurring(&rent).unwrap();

        assert_eq!(store.monthly_obligations_total(), Money::from_units(1000));
        assert_eq!(store.monthly_obligations_remaining(), Money::from_units(300));
        assert_eq!(store.total_spendable_balance(), Money::from_units(1300));
        assert_eq!(
            store.safe_to_spend(),
            store.total_spendable_balance() - store.monthly_obligations_remaining()
        );
        assert_eq!(store.safe_to_spend(), Money::from_units(1000));
    }

    #[test]
    fn test_expenses_by_category_groups_and_skips_transfers() {
        let (mut store, _, _) = fixture();
        let bank = bank_id(&store);
        let cash = cash_id(&store);
        let food = store.find_category("Food").unwrap().id.clone();

        for amount in [10, 15] {
            store
                .add_transaction(
                    NewTransaction::expense(bank.clone(), Money::from_units(amount))
                        .with_category(Some(food.clone())),
                )
                .unwrap();
        }
        store
            .add_transaction(NewTransaction::expense(bank.clone(), Money::from_units(7)))
            .unwrap();
        store
            .add_transaction(
                NewTransaction::expense(bank.clone(), Money::from_units(99))
                    .with_category(Some(food.clone()))
                    .with_date(Utc.with_ymd_and_hms(2024, 2, 10, 12, 0, 0).unwrap()),
            )
            .unwrap();
        store
            .create_transfer(&bank, &cash, Money::from_units(500), None, None, Some(food.clone()))
            .unwrap();

        let totals = store.expenses_by_category(None);
        assert_eq!(totals.len(), 2);
        let food_total = totals.iter().find(|t| t.category_id.as_ref() == Some(&food)).unwrap();
        assert_eq!(food_total.total, Money::from_units(25));
        let none_total = totals.iter().find(|t| t.category_id.is_none()).unwrap();
        assert_eq!(none_total.total, Money::from_units(7));

        let february = store.expenses_by_category(MonthKey::new(2024, 2));
        assert_eq!(february.len(), 1);
        assert_eq!(february[0].total, Money::from_units(99));
    }

    #[test]
    fn test_cash_flow_and_trend() {
        let (mut store, _, _) = fixture();
        let bank = bank_id(&store);
        let cash = cash_id(&store);

        store
            .add_transaction(NewTransaction::income(bank.clone(), Money::from_units(900)))
            .unwrap();
        store
            .add_transaction(NewTransaction::expense(bank.clone(), Money::from_units(300)))
            .unwrap();
        store
            .add_transaction(
                NewTransaction::income(bank.clone(), Money::from_units(100))
                    .with_date(Utc.with_ymd_and_hms(2024, 1, 20, 12, 0, 0).unwrap()),
            )
            .unwrap();
        store
            .create_transfer(&bank, &cash, Money::from_units(50), None, None, None)
            .unwrap();

        let march = MonthKey::new(2024, 3).unwrap();
        let flow = store.cash_flow(march);
        assert_eq!(flow.income, Money::from_units(900));
        assert_eq!(flow.expenses, Money::from_units(300));
        assert_eq!(flow.net(), Money::from_units(600));

        let trend = store.cash_flow_trend(march, 3);
        let months: Vec<_> = trend.iter().map(|f| f.month.to_string()).collect();
        assert_eq!(months, vec!["2024-01", "2024-02", "2024-03"]);
        assert_eq!(trend[0].income, Money::from_units(100));
        assert_eq!(trend[1].net(), Money::zero());
    }

    #[test]
    fn test_category_budget_status() {
        let (mut store, _, _) = fixture();
        let bank = bank_id(&store);
        let food = store
            .add_category(Category::new("Groceries").with_budget(Money::from_units(200)))
            .unwrap();

        store
            .add_transaction(
                NewTransaction::expense(bank, Money::from_units(250)).with_category(Some(food.clone())),
            )
            .unwrap();

        let status = store.category_budget_status(MonthKey::new(2024, 3).unwrap());
        assert_eq!(status.len(), 1);
        assert_eq!(status[0].category.id, food);
        assert_eq!(status[0].spent, Money::from_units(250));
        assert_eq!(status[0].remaining(), Money::from_units(-50));
        assert!(status[0].is_over_budget());
        assert!((status[0].percent_used() - 125.0).abs() < 1e-9);
    }
}
