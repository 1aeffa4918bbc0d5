//! Expense-specific use cases.

use crate::dates::{Clock, MonthCursor};
use crate::model::amount::Amount;
use crate::model::expense::{Expense, NewExpense};
use crate::query::filter::{query_expenses, ExpenseCriteria};
use crate::repo::{CollectionStore, RepoResult};
use crate::service::collection_service::CollectionService;
use crate::stats::sum_amounts;

/// Expense service over any expense store.
pub type ExpenseService<S> = CollectionService<Expense, S>;

/// One month of expenses plus its total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyExpenses {
    pub month: MonthCursor,
    /// Most recent first.
    pub items: Vec<Expense>,
    /// Sum over `items`.
    pub total: Amount,
}

impl<S: CollectionStore<Expense>> CollectionService<Expense, S> {
    /// Creates an expense, defaulting its date to `clock.today()`.
    pub fn record(&mut self, draft: NewExpense, clock: &Clock) -> RepoResult<Expense> {
        self.create(draft.dated_for(clock))
    }

    /// Filtered expenses, most recent first.
    pub fn query(&self, criteria: &ExpenseCriteria) -> RepoResult<Vec<Expense>> {
        Ok(query_expenses(&self.list()?, criteria))
    }

    /// Expenses in `month` that also satisfy `criteria`; the month replaces
    /// any interval already set on `criteria`.
    pub fn list_month(
        &self,
        month: MonthCursor,
        criteria: &ExpenseCriteria,
    ) -> RepoResult<MonthlyExpenses> {
        let scoped = criteria.clone().within(month.interval());
        let items = self.query(&scoped)?;
        let total = sum_amounts(&items, None);
        Ok(MonthlyExpenses {
            month,
            items,
            total,
        })
    }

    /// Total spent in `month`.
    pub fn month_total(&self, month: MonthCursor) -> RepoResult<Amount> {
        Ok(sum_amounts(&self.list()?, Some(month.interval())))
    }
}
