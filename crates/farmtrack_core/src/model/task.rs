//! Field task domain model.
//!
//! # Responsibility
//! - Define the task record, its type/priority enums and crop soft reference.
//! - Own the completion state machine.
//!
//! # Invariants
//! - `completed_date` is `Some` exactly when `completed` is true.
//! - `crop` may point at a crop that no longer exists; that is a valid state.

use crate::model::crop::Crop;
use crate::model::validation::{is_blank, is_missing, normalize_text, ValidationError, Violations};
use crate::model::RecordId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Kind of field work a task represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    Watering,
    Fertilizing,
    Harvesting,
    Planting,
    Weeding,
    Maintenance,
}

impl TaskType {
    pub const ALL: [TaskType; 6] = [
        TaskType::Watering,
        TaskType::Fertilizing,
        TaskType::Harvesting,
        TaskType::Planting,
        TaskType::Weeding,
        TaskType::Maintenance,
    ];

    /// Stable wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Watering => "watering",
            Self::Fertilizing => "fertilizing",
            Self::Harvesting => "harvesting",
            Self::Planting => "planting",
            Self::Weeding => "weeding",
            Self::Maintenance => "maintenance",
        }
    }
}

impl Display for TaskType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| ValidationError::single(INVALID_TYPE_MESSAGE))
    }
}

/// Task urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Stable wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_str() == normalized)
            .ok_or_else(|| ValidationError::single(INVALID_PRIORITY_MESSAGE))
    }
}

const INVALID_TYPE_MESSAGE: &str = "Valid task type is required";
const INVALID_PRIORITY_MESSAGE: &str = "Valid priority is required (low, medium, high)";

/// Soft reference from a task to the crop it concerns.
///
/// Serialized as a nullable crop id; `null` means the task applies to all
/// crops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<RecordId>", into = "Option<RecordId>")]
pub enum CropRef {
    AllCrops,
    Crop(RecordId),
}

/// Outcome of resolving a [`CropRef`] against a crop collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CropResolution {
    AllCrops,
    Resolved(String),
    /// The referenced crop is not in the collection (for example deleted).
    Unresolved(RecordId),
}

impl CropResolution {
    /// Label shown next to a task. Unresolved references fall back to the
    /// "All Crops" label.
    pub fn label(&self) -> &str {
        match self {
            Self::Resolved(name) => name.as_str(),
            Self::AllCrops | Self::Unresolved(_) => "All Crops",
        }
    }
}

impl CropRef {
    /// Looks the reference up in `crops` without failing on dangling ids.
    pub fn resolve(&self, crops: &[Crop]) -> CropResolution {
        match self {
            Self::AllCrops => CropResolution::AllCrops,
            Self::Crop(id) => crops
                .iter()
                .find(|crop| crop.id == *id)
                .map_or(CropResolution::Unresolved(*id), |crop| {
                    CropResolution::Resolved(crop.name.clone())
                }),
        }
    }

    pub fn crop_id(&self) -> Option<RecordId> {
        match self {
            Self::AllCrops => None,
            Self::Crop(id) => Some(*id),
        }
    }
}

impl From<Option<RecordId>> for CropRef {
    fn from(value: Option<RecordId>) -> Self {
        value.map_or(Self::AllCrops, Self::Crop)
    }
}

impl From<CropRef> for Option<RecordId> {
    fn from(value: CropRef) -> Self {
        value.crop_id()
    }
}

/// Stored task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: RecordId,
    pub title: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub priority: Priority,
    pub due_date: DateTime<Utc>,
    #[serde(rename = "crop_id")]
    pub crop: CropRef,
    pub completed: bool,
    pub completed_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Caller-provided fields for a new task. New tasks always start incomplete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: Option<String>,
    pub task_type: Option<TaskType>,
    pub priority: Option<Priority>,
    pub due_date: Option<DateTime<Utc>>,
    /// Use `Some(CropRef::AllCrops)` for the "all crops" sentinel.
    pub crop: Option<CropRef>,
    pub notes: Option<String>,
}

/// Partial task update. Completion is changed only via
/// [`Task::toggle_completion`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub task_type: Option<TaskType>,
    pub priority: Option<Priority>,
    pub due_date: Option<DateTime<Utc>>,
    pub crop: Option<CropRef>,
    pub notes: Option<String>,
}

impl NewTask {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Violations::new();
        violations.check(is_missing(self.title.as_deref()), "Title is required");
        violations.check(self.crop.is_none(), "Crop is required");
        violations.check(self.due_date.is_none(), "Due date is required");
        violations.check(self.priority.is_none(), INVALID_PRIORITY_MESSAGE);
        violations.check(self.task_type.is_none(), INVALID_TYPE_MESSAGE);
        violations.finish()
    }
}

impl Task {
    /// Builds an incomplete task from a validated draft.
    pub fn from_draft(
        id: RecordId,
        draft: NewTask,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        draft.validate()?;
        let (Some(task_type), Some(priority), Some(due_date), Some(crop)) =
            (draft.task_type, draft.priority, draft.due_date, draft.crop)
        else {
            return Err(ValidationError::single("Due date is required"));
        };

        Ok(Self {
            id,
            title: draft.title.unwrap_or_default().trim().to_string(),
            task_type,
            priority,
            due_date,
            crop,
            completed: false,
            completed_date: None,
            notes: normalize_text(draft.notes),
            created_at,
            updated_at: None,
        })
    }

    /// Returns a copy with `patch` applied, revalidated as a whole.
    pub fn merged(&self, patch: TaskPatch, updated_at: DateTime<Utc>) -> Result<Self, ValidationError> {
        let mut next = self.clone();
        if let Some(title) = patch.title {
            next.title = title.trim().to_string();
        }
        if let Some(task_type) = patch.task_type {
            next.task_type = task_type;
        }
        if let Some(priority) = patch.priority {
            next.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            next.due_date = due_date;
        }
        if let Some(crop) = patch.crop {
            next.crop = crop;
        }
        if patch.notes.is_some() {
            next.notes = normalize_text(patch.notes);
        }
        next.updated_at = Some(updated_at);
        next.validate()?;
        Ok(next)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Violations::new();
        violations.check(is_blank(&self.title), "Title is required");
        violations.check(
            self.completed != self.completed_date.is_some(),
            "Completed date must be set exactly when the task is completed",
        );
        violations.finish()
    }

    /// Flips completion. Incomplete -> Complete stamps `completed_date`
    /// with `now`; Complete -> Incomplete clears it.
    pub fn toggle_completion(&mut self, now: DateTime<Utc>) {
        self.completed = !self.completed;
        self.completed_date = self.completed.then_some(now);
        self.updated_at = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::{CropRef, CropResolution, NewTask, Priority, Task, TaskType};
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn draft() -> NewTask {
        NewTask {
            title: Some("Water tomato plants".into()),
            task_type: Some(TaskType::Watering),
            priority: Some(Priority::High),
            due_date: Some(Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap()),
            crop: Some(CropRef::AllCrops),
            notes: None,
        }
    }

    #[test]
    fn new_task_starts_incomplete() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let task = Task::from_draft(Uuid::new_v4(), draft(), now).unwrap();
        assert!(!task.completed);
        assert_eq!(task.completed_date, None);
    }

    #[test]
    fn empty_draft_lists_all_required_fields() {
        let err = NewTask::default().validate().unwrap_err();
        assert_eq!(err.messages().len(), 5);
        assert!(err.contains("Due date is required"));
        assert!(err.contains("Valid priority is required (low, medium, high)"));
    }

    #[test]
    fn toggling_twice_restores_incomplete_state() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let mut task = Task::from_draft(Uuid::new_v4(), draft(), now).unwrap();

        task.toggle_completion(now);
        assert!(task.completed);
        assert_eq!(task.completed_date, Some(now));
        assert!(task.validate().is_ok());

        task.toggle_completion(now);
        assert!(!task.completed);
        assert_eq!(task.completed_date, None);
    }

    #[test]
    fn crop_ref_serializes_as_nullable_id() {
        let id = Uuid::new_v4();
        assert_eq!(serde_json::to_value(CropRef::AllCrops).unwrap(), serde_json::Value::Null);
        assert_eq!(
            serde_json::to_value(CropRef::Crop(id)).unwrap(),
            serde_json::Value::String(id.to_string())
        );
        let decoded: CropRef = serde_json::from_value(serde_json::Value::Null).unwrap();
        assert_eq!(decoded, CropRef::AllCrops);
    }

    #[test]
    fn dangling_reference_is_unresolved_not_an_error() {
        let id = Uuid::new_v4();
        let resolution = CropRef::Crop(id).resolve(&[]);
        assert_eq!(resolution, CropResolution::Unresolved(id));
        assert_eq!(resolution.label(), "All Crops");
    }

    #[test]
    fn priority_parse_rejects_unknown_values() {
        assert_eq!(" HIGH ".parse::<Priority>().unwrap(), Priority::High);
        assert!("urgent".parse::<Priority>().is_err());
        assert!("mowing".parse::<TaskType>().is_err());
    }
}
