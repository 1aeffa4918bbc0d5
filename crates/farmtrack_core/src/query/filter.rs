//! Criteria value objects and collection filters.
//!
//! # Invariants
//! - Empty criteria select every record in input order.
//! - Text, enum and interval predicates are ANDed; evaluation order does not
//!   affect the result.
//! - Canonical ordering: tasks by due date ascending, expenses by date
//!   descending, crops in store order. Ties keep input order.

use crate::dates::{Clock, DateInterval};
use crate::model::crop::{Crop, CropStatus};
use crate::model::expense::{Expense, ExpenseCategory};
use crate::model::task::{CropRef, Priority, Task, TaskType};
use crate::query::bucket::TaskBucket;
use crate::query::text::{Searchable, TextMatcher};
use std::cmp::Reverse;

/// Filter options for the crop list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CropCriteria {
    pub text: Option<String>,
    pub status: Option<CropStatus>,
}

impl CropCriteria {
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_status(mut self, status: CropStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Filter options for the task list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskCriteria {
    pub text: Option<String>,
    pub task_type: Option<TaskType>,
    pub priority: Option<Priority>,
    /// `None` and `Some(TaskBucket::All)` both disable bucket filtering.
    pub bucket: Option<TaskBucket>,
    /// Due-date calendar day (in the clock's offset) must fall inside.
    pub due_within: Option<DateInterval>,
    pub crop: Option<CropRef>,
}

impl TaskCriteria {
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_bucket(mut self, bucket: TaskBucket) -> Self {
        self.bucket = Some(bucket);
        self
    }

    pub fn with_type(mut self, task_type: TaskType) -> Self {
        self.task_type = Some(task_type);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_due_within(mut self, interval: DateInterval) -> Self {
        self.due_within = Some(interval);
        self
    }

    pub fn with_crop(mut self, crop: CropRef) -> Self {
        self.crop = Some(crop);
        self
    }
}

/// Filter options for the expense list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseCriteria {
    pub text: Option<String>,
    pub category: Option<ExpenseCategory>,
    pub within: Option<DateInterval>,
}

impl ExpenseCriteria {
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_category(mut self, category: ExpenseCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn within(mut self, interval: DateInterval) -> Self {
        self.within = Some(interval);
        self
    }
}

fn text_passes<R: Searchable>(matcher: Option<&TextMatcher>, record: &R) -> bool {
    matcher.map_or(true, |matcher| matcher.matches(record))
}

fn equals_if_set<T: PartialEq>(expected: Option<T>, actual: T) -> bool {
    expected.map_or(true, |value| value == actual)
}

/// Crops matching every active criterion, in input order.
pub fn filter_crops(crops: &[Crop], criteria: &CropCriteria) -> Vec<Crop> {
    let matcher = TextMatcher::from_term(criteria.text.as_deref());
    crops
        .iter()
        .filter(|crop| equals_if_set(criteria.status, crop.status))
        .filter(|crop| text_passes(matcher.as_ref(), *crop))
        .cloned()
        .collect()
}

/// Tasks matching every active criterion, in input order.
pub fn filter_tasks(tasks: &[Task], criteria: &TaskCriteria, clock: &Clock) -> Vec<Task> {
    let matcher = TextMatcher::from_term(criteria.text.as_deref());
    tasks
        .iter()
        .filter(|task| equals_if_set(criteria.task_type, task.task_type))
        .filter(|task| equals_if_set(criteria.priority, task.priority))
        .filter(|task| equals_if_set(criteria.crop, task.crop))
        .filter(|task| {
            criteria
                .bucket
                .map_or(true, |bucket| bucket.contains(task, clock))
        })
        .filter(|task| {
            criteria
                .due_within
                .map_or(true, |interval| interval.contains(clock.local_day(task.due_date)))
        })
        .filter(|task| text_passes(matcher.as_ref(), *task))
        .cloned()
        .collect()
}

/// Expenses matching every active criterion, in input order.
pub fn filter_expenses(expenses: &[Expense], criteria: &ExpenseCriteria) -> Vec<Expense> {
    let matcher = TextMatcher::from_term(criteria.text.as_deref());
    expenses
        .iter()
        .filter(|expense| equals_if_set(criteria.category, expense.category))
        .filter(|expense| {
            criteria
                .within
                .map_or(true, |interval| interval.contains(expense.date))
        })
        .filter(|expense| text_passes(matcher.as_ref(), *expense))
        .cloned()
        .collect()
}

/// Stable sort by due date, earliest first.
pub fn sort_tasks_by_due(tasks: &mut [Task]) {
    tasks.sort_by_key(|task| task.due_date);
}

/// Stable sort by expense date, most recent first.
pub fn sort_expenses_by_recency(expenses: &mut [Expense]) {
    expenses.sort_by_key(|expense| Reverse(expense.date));
}

/// Filtered crops in store order.
pub fn query_crops(crops: &[Crop], criteria: &CropCriteria) -> Vec<Crop> {
    filter_crops(crops, criteria)
}

/// Filtered tasks sorted by due date ascending.
pub fn query_tasks(tasks: &[Task], criteria: &TaskCriteria, clock: &Clock) -> Vec<Task> {
    let mut selected = filter_tasks(tasks, criteria, clock);
    sort_tasks_by_due(&mut selected);
    selected
}

/// Filtered expenses sorted by date descending.
pub fn query_expenses(expenses: &[Expense], criteria: &ExpenseCriteria) -> Vec<Expense> {
    let mut selected = filter_expenses(expenses, criteria);
    sort_expenses_by_recency(&mut selected);
    selected
}

#[cfg(test)]
mod tests {
    use super::{equals_if_set, sort_expenses_by_recency};
    use crate::model::amount::Amount;
    use crate::model::expense::{Expense, NewExpense};
    use chrono::{NaiveDate, TimeZone, Utc};
    use uuid::Uuid;

    #[test]
    fn unset_enum_criterion_passes_everything() {
        assert!(equals_if_set(None::<u8>, 3));
        assert!(equals_if_set(Some(3), 3));
        assert!(!equals_if_set(Some(2), 3));
    }

    #[test]
    fn recency_sort_keeps_input_order_for_same_day() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let make = |description: &str, day: u32| {
            let draft = NewExpense {
                description: Some(description.into()),
                amount: Some(Amount::from_units(1)),
                category: None,
                date: NaiveDate::from_ymd_opt(2024, 1, day),
            };
            Expense::from_draft(Uuid::new_v4(), draft, now).unwrap()
        };
        let mut expenses = vec![make("a", 2), make("b", 5), make("c", 2)];
        sort_expenses_by_recency(&mut expenses);
        let order: Vec<_> = expenses.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(order, ["b", "a", "c"]);
    }
}
