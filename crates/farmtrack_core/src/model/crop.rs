//! Crop domain model.
//!
//! # Responsibility
//! - Define the crop record and its planting lifecycle status.
//! - Convert drafts/patches into validated records.
//!
//! # Invariants
//! - `planted_date <= expected_harvest` whenever a crop is written.
//! - `name`, `variety` and `field_location` are never blank.

use crate::model::validation::{is_blank, is_missing, normalize_text, ValidationError, Violations};
use crate::model::RecordId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Planting lifecycle status of a crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropStatus {
    Planted,
    Growing,
    Ready,
    Harvested,
}

impl CropStatus {
    /// Every status in lifecycle order.
    pub const ALL: [CropStatus; 4] = [
        CropStatus::Planted,
        CropStatus::Growing,
        CropStatus::Ready,
        CropStatus::Harvested,
    ];

    /// Stable wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Planted => "planted",
            Self::Growing => "growing",
            Self::Ready => "ready",
            Self::Harvested => "harvested",
        }
    }
}

impl Display for CropStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CropStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| ValidationError::single("Valid crop status is required"))
    }
}

/// Stored crop record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crop {
    pub id: RecordId,
    pub name: String,
    pub variety: String,
    pub planted_date: NaiveDate,
    pub expected_harvest: NaiveDate,
    pub field_location: String,
    pub status: CropStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Caller-provided fields for a new crop.
///
/// Required fields are optional here so that every missing one is reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCrop {
    pub name: Option<String>,
    pub variety: Option<String>,
    pub planted_date: Option<NaiveDate>,
    pub expected_harvest: Option<NaiveDate>,
    pub field_location: Option<String>,
    /// Defaults to `planted` when absent.
    pub status: Option<CropStatus>,
    pub notes: Option<String>,
}

/// Partial crop update. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CropPatch {
    pub name: Option<String>,
    pub variety: Option<String>,
    pub planted_date: Option<NaiveDate>,
    pub expected_harvest: Option<NaiveDate>,
    pub field_location: Option<String>,
    pub status: Option<CropStatus>,
    /// `Some("")` clears the notes.
    pub notes: Option<String>,
}

impl NewCrop {
    /// Checks required fields and the planting window.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Violations::new();
        violations.check(is_missing(self.name.as_deref()), "Crop name is required");
        violations.check(is_missing(self.variety.as_deref()), "Variety is required");
        violations.check(self.planted_date.is_none(), "Planted date is required");
        violations.check(
            self.expected_harvest.is_none(),
            "Expected harvest date is required",
        );
        if let (Some(planted), Some(harvest)) = (self.planted_date, self.expected_harvest) {
            violations.check(
                planted > harvest,
                "Expected harvest date must be after planted date",
            );
        }
        violations.check(
            is_missing(self.field_location.as_deref()),
            "Field location is required",
        );
        violations.finish()
    }
}

impl Crop {
    /// Builds a crop from a validated draft.
    pub fn from_draft(
        id: RecordId,
        draft: NewCrop,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        draft.validate()?;
        let (Some(planted_date), Some(expected_harvest)) =
            (draft.planted_date, draft.expected_harvest)
        else {
            return Err(ValidationError::single("Planted date is required"));
        };

        Ok(Self {
            id,
            name: trimmed(draft.name),
            variety: trimmed(draft.variety),
            planted_date,
            expected_harvest,
            field_location: trimmed(draft.field_location),
            status: draft.status.unwrap_or(CropStatus::Planted),
            notes: normalize_text(draft.notes),
            created_at,
            updated_at: None,
        })
    }

    /// Returns a copy with `patch` applied, revalidated as a whole.
    pub fn merged(&self, patch: CropPatch, updated_at: DateTime<Utc>) -> Result<Self, ValidationError> {
        let mut next = self.clone();
        if let Some(name) = patch.name {
            next.name = name.trim().to_string();
        }
        if let Some(variety) = patch.variety {
            next.variety = variety.trim().to_string();
        }
        if let Some(planted) = patch.planted_date {
            next.planted_date = planted;
        }
        if let Some(harvest) = patch.expected_harvest {
            next.expected_harvest = harvest;
        }
        if let Some(location) = patch.field_location {
            next.field_location = location.trim().to_string();
        }
        if let Some(status) = patch.status {
            next.status = status;
        }
        if patch.notes.is_some() {
            next.notes = normalize_text(patch.notes);
        }
        next.updated_at = Some(updated_at);
        next.validate()?;
        Ok(next)
    }

    /// Checks invariants of a complete record.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Violations::new();
        violations.check(is_blank(&self.name), "Crop name is required");
        violations.check(is_blank(&self.variety), "Variety is required");
        violations.check(
            self.planted_date > self.expected_harvest,
            "Expected harvest date must be after planted date",
        );
        violations.check(is_blank(&self.field_location), "Field location is required");
        violations.finish()
    }

    /// Whether the crop still occupies a field (not yet harvested).
    pub fn is_active(&self) -> bool {
        self.status != CropStatus::Harvested
    }

    /// Signed whole days from `today` until the expected harvest.
    ///
    /// Zero or negative means the crop is due for harvest.
    pub fn days_to_harvest(&self, today: NaiveDate) -> i64 {
        (self.expected_harvest - today).num_days()
    }
}

fn trimmed(value: Option<String>) -> String {
    value.map(|text| text.trim().to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{Crop, CropPatch, CropStatus, NewCrop};
    use chrono::{NaiveDate, TimeZone, Utc};
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn wheat_draft() -> NewCrop {
        NewCrop {
            name: Some(" Wheat ".into()),
            variety: Some("Hard Red Winter".into()),
            planted_date: Some(date(2024, 3, 1)),
            expected_harvest: Some(date(2024, 7, 15)),
            field_location: Some("North Field A".into()),
            status: None,
            notes: Some("   ".into()),
        }
    }

    #[test]
    fn draft_defaults_status_and_trims_text() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let crop = Crop::from_draft(Uuid::new_v4(), wheat_draft(), now).unwrap();
        assert_eq!(crop.name, "Wheat");
        assert_eq!(crop.status, CropStatus::Planted);
        assert_eq!(crop.notes, None);
        assert_eq!(crop.updated_at, None);
    }

    #[test]
    fn empty_draft_reports_every_missing_field() {
        let err = NewCrop::default().validate().unwrap_err();
        assert_eq!(
            err.messages(),
            [
                "Crop name is required",
                "Variety is required",
                "Planted date is required",
                "Expected harvest date is required",
                "Field location is required",
            ]
        );
    }

    #[test]
    fn harvest_before_planting_is_rejected() {
        let mut draft = wheat_draft();
        draft.expected_harvest = Some(date(2024, 2, 1));
        let err = draft.validate().unwrap_err();
        assert!(err.contains("Expected harvest date must be after planted date"));
    }

    #[test]
    fn merged_revalidates_planting_window() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let crop = Crop::from_draft(Uuid::new_v4(), wheat_draft(), now).unwrap();
        let patch = CropPatch {
            planted_date: Some(date(2024, 8, 1)),
            ..CropPatch::default()
        };
        assert!(crop.merged(patch, now).is_err());

        let ok = crop
            .merged(
                CropPatch {
                    status: Some(CropStatus::Growing),
                    ..CropPatch::default()
                },
                now,
            )
            .unwrap();
        assert_eq!(ok.status, CropStatus::Growing);
        assert_eq!(ok.updated_at, Some(now));
    }

    #[test]
    fn status_parse_is_case_insensitive_and_rejects_unknown() {
        assert_eq!("Growing".parse::<CropStatus>().unwrap(), CropStatus::Growing);
        let err = "fallow".parse::<CropStatus>().unwrap_err();
        assert!(err.contains("Valid crop status is required"));
    }

    #[test]
    fn days_to_harvest_counts_calendar_days() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let crop = Crop::from_draft(Uuid::new_v4(), wheat_draft(), now).unwrap();
        assert_eq!(crop.days_to_harvest(date(2024, 7, 10)), 5);
        assert_eq!(crop.days_to_harvest(date(2024, 7, 20)), -5);
    }
}
