//! Dashboard use case.
//!
//! # Responsibility
//! - Snapshot the three collections and hand them to the aggregator.
//!
//! # Invariants
//! - The summary reflects one `list` call per store; no partial re-reads.

use crate::dates::Clock;
use crate::model::crop::Crop;
use crate::model::expense::Expense;
use crate::model::task::Task;
use crate::repo::{CollectionStore, RepoResult};
use crate::stats::dashboard::{dashboard_summary, DashboardSummary, DEFAULT_RECENT_LIMIT};
use log::debug;

/// Read-only view over the crop, task and expense stores.
pub struct DashboardService<'a, C, T, E> {
    crops: &'a C,
    tasks: &'a T,
    expenses: &'a E,
    recent_limit: usize,
}

impl<'a, C, T, E> DashboardService<'a, C, T, E>
where
    C: CollectionStore<Crop>,
    T: CollectionStore<Task>,
    E: CollectionStore<Expense>,
{
    pub fn new(crops: &'a C, tasks: &'a T, expenses: &'a E) -> Self {
        Self {
            crops,
            tasks,
            expenses,
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }

    /// Overrides the length of the upcoming-task and recent-expense lists.
    pub fn with_recent_limit(mut self, recent_limit: usize) -> Self {
        self.recent_limit = recent_limit;
        self
    }

    pub fn summary(&self, clock: &Clock) -> RepoResult<DashboardSummary> {
        let crops = self.crops.list()?;
        let tasks = self.tasks.list()?;
        let expenses = self.expenses.list()?;
        debug!(
            "event=dashboard_summary module=service status=ok crops={} tasks={} expenses={}",
            crops.len(),
            tasks.len(),
            expenses.len()
        );
        Ok(dashboard_summary(
            &crops,
            &tasks,
            &expenses,
            clock,
            self.recent_limit,
        ))
    }
}
