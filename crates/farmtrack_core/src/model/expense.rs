//! Expense domain model.
//!
//! # Invariants
//! - `amount` is a non-negative exact amount (see [`Amount`]).
//! - `description` is never blank.
//! - Expenses have no relation to crops or tasks.

use crate::dates::Clock;
use crate::model::amount::{Amount, INVALID_AMOUNT_MESSAGE};
use crate::model::validation::{is_blank, is_missing, ValidationError, Violations};
use crate::model::RecordId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Bookkeeping category of an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Seeds,
    Fertilizer,
    Equipment,
    Fuel,
    Labor,
    Utilities,
    Maintenance,
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 8] = [
        ExpenseCategory::Seeds,
        ExpenseCategory::Fertilizer,
        ExpenseCategory::Equipment,
        ExpenseCategory::Fuel,
        ExpenseCategory::Labor,
        ExpenseCategory::Utilities,
        ExpenseCategory::Maintenance,
        ExpenseCategory::Other,
    ];

    /// Stable wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Seeds => "seeds",
            Self::Fertilizer => "fertilizer",
            Self::Equipment => "equipment",
            Self::Fuel => "fuel",
            Self::Labor => "labor",
            Self::Utilities => "utilities",
            Self::Maintenance => "maintenance",
            Self::Other => "other",
        }
    }
}

impl Display for ExpenseCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| ValidationError::single("Valid expense category is required"))
    }
}

/// Stored expense record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: RecordId,
    pub description: String,
    /// Exact amount in cents.
    #[serde(rename = "amount_cents")]
    pub amount: Amount,
    pub category: ExpenseCategory,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Caller-provided fields for a new expense.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewExpense {
    pub description: Option<String>,
    pub amount: Option<Amount>,
    /// Defaults to `other` when absent.
    pub category: Option<ExpenseCategory>,
    /// Defaults to today on the caller's clock; see [`NewExpense::dated_for`].
    pub date: Option<NaiveDate>,
}

/// Partial expense update. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpensePatch {
    pub description: Option<String>,
    pub amount: Option<Amount>,
    pub category: Option<ExpenseCategory>,
    pub date: Option<NaiveDate>,
}

impl NewExpense {
    /// Fills a missing date with `clock.today()`, so the expense lands in the
    /// same calendar month the dashboard reports for that moment.
    pub fn dated_for(mut self, clock: &Clock) -> Self {
        self.date.get_or_insert_with(|| clock.today());
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Violations::new();
        violations.check(
            is_missing(self.description.as_deref()),
            "Description is required",
        );
        violations.check(self.amount.is_none(), INVALID_AMOUNT_MESSAGE);
        violations.finish()
    }
}

impl Expense {
    /// Builds a stored expense. A draft still undated here gets the UTC day
    /// of `created_at`; callers with a [`Clock`] date it first.
    pub fn from_draft(
        id: RecordId,
        draft: NewExpense,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        draft.validate()?;
        let Some(amount) = draft.amount else {
            return Err(ValidationError::single(INVALID_AMOUNT_MESSAGE));
        };

        Ok(Self {
            id,
            description: draft.description.unwrap_or_default().trim().to_string(),
            amount,
            category: draft.category.unwrap_or(ExpenseCategory::Other),
            date: draft.date.unwrap_or_else(|| created_at.date_naive()),
            created_at,
            updated_at: None,
        })
    }

    pub fn merged(
        &self,
        patch: ExpensePatch,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let mut next = self.clone();
        if let Some(description) = patch.description {
            next.description = description.trim().to_string();
        }
        if let Some(amount) = patch.amount {
            next.amount = amount;
        }
        if let Some(category) = patch.category {
            next.category = category;
        }
        if let Some(date) = patch.date {
            next.date = date;
        }
        next.updated_at = Some(updated_at);
        next.validate()?;
        Ok(next)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Violations::new();
        violations.check(is_blank(&self.description), "Description is required");
        violations.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{Expense, ExpenseCategory, ExpensePatch, NewExpense};
    use crate::dates::Clock;
    use crate::model::amount::Amount;
    use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};
    use uuid::Uuid;

    #[test]
    fn draft_defaults_category_and_date() {
        let now = Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap();
        let draft = NewExpense {
            description: Some("Diesel Fuel".into()),
            amount: Some(Amount::from_units(280)),
            ..NewExpense::default()
        };
        let expense = Expense::from_draft(Uuid::new_v4(), draft, now).unwrap();
        assert_eq!(expense.category, ExpenseCategory::Other);
        assert_eq!(expense.date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
    }

    #[test]
    fn undated_draft_takes_local_day_of_clock() {
        let offset = FixedOffset::west_opt(5 * 3600).unwrap();
        let clock = Clock::new(offset.with_ymd_and_hms(2024, 1, 31, 20, 0, 0).unwrap());
        let draft = NewExpense {
            description: Some("Late feed delivery".into()),
            amount: Some(Amount::from_units(100)),
            ..NewExpense::default()
        }
        .dated_for(&clock);
        let expense = Expense::from_draft(Uuid::new_v4(), draft, clock.now_utc()).unwrap();
        assert_eq!(expense.date, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
    }

    #[test]
    fn explicit_date_survives_dating() {
        let clock = Clock::at_utc(Utc.with_ymd_and_hms(2024, 1, 31, 12, 0, 0).unwrap());
        let day = NaiveDate::from_ymd_opt(2024, 1, 2);
        let draft = NewExpense {
            date: day,
            ..NewExpense::default()
        };
        assert_eq!(draft.dated_for(&clock).date, day);
    }

    #[test]
    fn missing_description_and_amount_are_reported() {
        let err = NewExpense::default().validate().unwrap_err();
        assert_eq!(
            err.messages(),
            ["Description is required", "Amount must be a non-negative number"]
        );
    }

    #[test]
    fn blank_description_patch_is_rejected() {
        let now = Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap();
        let draft = NewExpense {
            description: Some("Seeds".into()),
            amount: Some(Amount::from_units(10)),
            ..NewExpense::default()
        };
        let expense = Expense::from_draft(Uuid::new_v4(), draft, now).unwrap();
        let patch = ExpensePatch {
            description: Some("  ".into()),
            ..ExpensePatch::default()
        };
        assert!(expense.merged(patch, now).is_err());
    }

    #[test]
    fn amount_serializes_as_cents() {
        let now = Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap();
        let draft = NewExpense {
            description: Some("Seeds".into()),
            amount: Some("450.25".parse().unwrap()),
            category: Some(ExpenseCategory::Seeds),
            date: None,
        };
        let expense = Expense::from_draft(Uuid::new_v4(), draft, now).unwrap();
        let json = serde_json::to_value(&expense).unwrap();
        assert_eq!(json["amount_cents"], 45_025);
        assert_eq!(json["category"], "seeds");
        assert_eq!(json["date"], "2024-01-05");
    }
}
