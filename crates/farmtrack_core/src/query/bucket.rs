//! Derived task buckets.
//!
//! Buckets are computed from the due date and completion flag at evaluation
//! time; they are never stored.

use crate::dates::Clock;
use crate::model::task::Task;
use crate::model::validation::ValidationError;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Named task grouping used by list tabs and counters.
///
/// `Today`, `Upcoming`, `Overdue` and `Completed` are mutually exclusive and
/// cover every task; `All` is the unfiltered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskBucket {
    All,
    /// Incomplete, due on the clock's current calendar day.
    Today,
    /// Incomplete, due on a later calendar day (hence strictly after now).
    Upcoming,
    /// Incomplete, due before the start of today.
    Overdue,
    /// Completed, regardless of due date.
    Completed,
}

impl TaskBucket {
    pub const ALL: [TaskBucket; 5] = [
        TaskBucket::All,
        TaskBucket::Today,
        TaskBucket::Upcoming,
        TaskBucket::Overdue,
        TaskBucket::Completed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Today => "today",
            Self::Upcoming => "upcoming",
            Self::Overdue => "overdue",
            Self::Completed => "completed",
        }
    }

    /// Tab label.
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All Tasks",
            Self::Today => "Today",
            Self::Upcoming => "Upcoming",
            Self::Overdue => "Overdue",
            Self::Completed => "Completed",
        }
    }

    /// Whether `task` belongs to this bucket at `clock`.
    pub fn contains(self, task: &Task, clock: &Clock) -> bool {
        match self {
            Self::All => true,
            named => classify_task(task, clock) == named,
        }
    }
}

impl Display for TaskBucket {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskBucket {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|bucket| bucket.as_str() == normalized)
            .ok_or_else(|| {
                ValidationError::single(
                    "Valid task bucket is required (all, today, upcoming, overdue, completed)",
                )
            })
    }
}

/// Returns the single named bucket `task` falls into. Never returns `All`.
///
/// Day comparison happens in the clock's offset, so a task due later today
/// is `Today`, not `Upcoming`.
pub fn classify_task(task: &Task, clock: &Clock) -> TaskBucket {
    if task.completed {
        return TaskBucket::Completed;
    }

    let due_day = clock.local_day(task.due_date);
    let today = clock.today();
    if due_day == today {
        TaskBucket::Today
    } else if due_day > today {
        TaskBucket::Upcoming
    } else {
        TaskBucket::Overdue
    }
}
