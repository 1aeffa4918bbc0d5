//! Dashboard summary.

use crate::dates::{Clock, MonthCursor};
use crate::model::amount::Amount;
use crate::model::crop::Crop;
use crate::model::expense::Expense;
use crate::model::task::Task;
use crate::stats::{count_where, recent_expenses, sum_amounts, task_counts, upcoming_tasks};

/// Default number of rows in the dashboard's recent lists.
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Figures shown on the farm dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    /// Crops not yet harvested.
    pub active_crops: usize,
    pub total_crops: usize,
    /// Incomplete tasks.
    pub pending_tasks: usize,
    /// Incomplete tasks due on the clock's current day.
    pub tasks_due_today: usize,
    pub overdue_tasks: usize,
    pub month: MonthCursor,
    /// Expense total for `month`.
    pub monthly_expenses: Amount,
    pub upcoming_tasks: Vec<Task>,
    pub recent_expenses: Vec<Expense>,
}

/// Computes the dashboard from snapshots of all three collections.
pub fn dashboard_summary(
    crops: &[Crop],
    tasks: &[Task],
    expenses: &[Expense],
    clock: &Clock,
    recent_limit: usize,
) -> DashboardSummary {
    let counts = task_counts(tasks, clock);
    let month = clock.current_month();

    DashboardSummary {
        active_crops: count_where(crops, Crop::is_active),
        total_crops: crops.len(),
        pending_tasks: counts.incomplete,
        tasks_due_today: counts.today,
        overdue_tasks: counts.overdue,
        month,
        monthly_expenses: sum_amounts(expenses, Some(month.interval())),
        upcoming_tasks: upcoming_tasks(tasks, recent_limit),
        recent_expenses: recent_expenses(expenses, recent_limit),
    }
}
