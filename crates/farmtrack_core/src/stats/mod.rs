//! Aggregator: counts, sums and top-N selections over record snapshots.
//!
//! # Responsibility
//! - Compute summary values without touching stores or performing I/O.
//! - Share day-boundary semantics with the query engine so badges and lists
//!   agree.
//!
//! # Invariants
//! - Sums use exact integer cents and are independent of input order.
//! - Top-N selection is a stable sort followed by truncation.

pub mod dashboard;

use crate::dates::{Clock, DateInterval};
use crate::model::amount::Amount;
use crate::model::expense::Expense;
use crate::model::task::Task;
use crate::query::bucket::{classify_task, TaskBucket};
use crate::query::filter::{sort_expenses_by_recency, sort_tasks_by_due};

pub use dashboard::{dashboard_summary, DashboardSummary};

/// Number of records satisfying `predicate`.
pub fn count_where<T>(records: &[T], predicate: impl Fn(&T) -> bool) -> usize {
    records.iter().filter(|record| predicate(record)).count()
}

/// Total expense amount, optionally restricted to `within` (inclusive).
pub fn sum_amounts(expenses: &[Expense], within: Option<DateInterval>) -> Amount {
    expenses
        .iter()
        .filter(|expense| within.map_or(true, |interval| interval.contains(expense.date)))
        .map(|expense| expense.amount)
        .sum()
}

/// First `n` records after a stable sort by `key`. Ties keep input order.
pub fn top_n_by_key<T, K, F>(records: &[T], n: usize, key: F) -> Vec<T>
where
    T: Clone,
    K: Ord,
    F: FnMut(&T) -> K,
{
    let mut sorted = records.to_vec();
    sorted.sort_by_key(key);
    sorted.truncate(n);
    sorted
}

/// Incomplete tasks with the earliest due dates.
pub fn upcoming_tasks(tasks: &[Task], n: usize) -> Vec<Task> {
    let mut pending: Vec<Task> = tasks.iter().filter(|task| !task.completed).cloned().collect();
    sort_tasks_by_due(&mut pending);
    pending.truncate(n);
    pending
}

/// Most recent expenses by date.
pub fn recent_expenses(expenses: &[Expense], n: usize) -> Vec<Expense> {
    let mut sorted = expenses.to_vec();
    sort_expenses_by_recency(&mut sorted);
    sorted.truncate(n);
    sorted
}

/// Per-bucket task counts for list tabs and dashboard badges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskCounts {
    pub all: usize,
    pub incomplete: usize,
    pub today: usize,
    pub upcoming: usize,
    pub overdue: usize,
    pub completed: usize,
}

impl TaskCounts {
    /// Count shown on the tab for `bucket`.
    pub fn for_bucket(&self, bucket: TaskBucket) -> usize {
        match bucket {
            TaskBucket::All => self.all,
            TaskBucket::Today => self.today,
            TaskBucket::Upcoming => self.upcoming,
            TaskBucket::Overdue => self.overdue,
            TaskBucket::Completed => self.completed,
        }
    }
}

/// Classifies every task once at `clock`.
///
/// `today + upcoming + overdue == incomplete` always holds.
pub fn task_counts(tasks: &[Task], clock: &Clock) -> TaskCounts {
    let mut counts = TaskCounts {
        all: tasks.len(),
        ..TaskCounts::default()
    };
    for task in tasks {
        match classify_task(task, clock) {
            TaskBucket::Completed => counts.completed += 1,
            TaskBucket::Today => counts.today += 1,
            TaskBucket::Upcoming => counts.upcoming += 1,
            TaskBucket::Overdue => counts.overdue += 1,
            TaskBucket::All => {}
        }
    }
    counts.incomplete = counts.today + counts.upcoming + counts.overdue;
    counts
}
