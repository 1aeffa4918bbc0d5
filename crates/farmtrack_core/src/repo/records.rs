//! [`Record`] bindings for the farm record kinds.

use crate::model::crop::{Crop, CropPatch, NewCrop};
use crate::model::expense::{Expense, ExpensePatch, NewExpense};
use crate::model::task::{NewTask, Task, TaskPatch};
use crate::model::validation::ValidationError;
use crate::model::RecordId;
use crate::repo::Record;
use chrono::{DateTime, Utc};

impl Record for Crop {
    type Draft = NewCrop;
    type Patch = CropPatch;

    const COLLECTION: &'static str = "crops";

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, draft: NewCrop, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        Crop::from_draft(id, draft, now)
    }

    fn merged(&self, patch: CropPatch, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        Crop::merged(self, patch, now)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Crop::validate(self)
    }
}

impl Record for Task {
    type Draft = NewTask;
    type Patch = TaskPatch;

    const COLLECTION: &'static str = "tasks";

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, draft: NewTask, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        Task::from_draft(id, draft, now)
    }

    fn merged(&self, patch: TaskPatch, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        Task::merged(self, patch, now)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Task::validate(self)
    }
}

impl Record for Expense {
    type Draft = NewExpense;
    type Patch = ExpensePatch;

    const COLLECTION: &'static str = "expenses";

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(
        id: RecordId,
        draft: NewExpense,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        Expense::from_draft(id, draft, now)
    }

    fn merged(&self, patch: ExpensePatch, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        Expense::merged(self, patch, now)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Expense::validate(self)
    }
}
