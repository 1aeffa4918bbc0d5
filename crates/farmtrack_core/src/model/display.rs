//! Presentation metadata for enumerated record fields.
//!
//! Every enum maps to its label, icon and badge through an exhaustive match,
//! so adding a variant without metadata is a compile error.

use crate::model::crop::CropStatus;
use crate::model::expense::ExpenseCategory;
use crate::model::task::{Priority, TaskType};
use crate::weather::WeatherCondition;

/// Badge color variant understood by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BadgeVariant {
    Default,
    Primary,
    Secondary,
    Accent,
    Success,
    Warning,
    Error,
    Info,
}

impl BadgeVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Accent => "accent",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

/// Label, icon name and badge variant for one enum value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayMeta {
    pub label: &'static str,
    pub icon: &'static str,
    pub badge: BadgeVariant,
}

impl DisplayMeta {
    const fn new(label: &'static str, icon: &'static str, badge: BadgeVariant) -> Self {
        Self { label, icon, badge }
    }
}

/// Types with a fixed presentation lookup.
pub trait Describe {
    fn display_meta(&self) -> DisplayMeta;
}

impl Describe for CropStatus {
    fn display_meta(&self) -> DisplayMeta {
        match self {
            Self::Planted => DisplayMeta::new("Planted", "Sprout", BadgeVariant::Info),
            Self::Growing => DisplayMeta::new("Growing", "Sprout", BadgeVariant::Warning),
            Self::Ready => DisplayMeta::new("Ready", "Wheat", BadgeVariant::Success),
            Self::Harvested => DisplayMeta::new("Harvested", "Package", BadgeVariant::Secondary),
        }
    }
}

impl Describe for TaskType {
    fn display_meta(&self) -> DisplayMeta {
        match self {
            Self::Watering => DisplayMeta::new("Watering", "Droplets", BadgeVariant::Info),
            Self::Fertilizing => DisplayMeta::new("Fertilizing", "Beaker", BadgeVariant::Secondary),
            Self::Harvesting => DisplayMeta::new("Harvesting", "Scissors", BadgeVariant::Success),
            Self::Planting => DisplayMeta::new("Planting", "Sprout", BadgeVariant::Primary),
            Self::Weeding => DisplayMeta::new("Weeding", "Trash2", BadgeVariant::Warning),
            Self::Maintenance => DisplayMeta::new("Maintenance", "Wrench", BadgeVariant::Default),
        }
    }
}

impl Describe for Priority {
    fn display_meta(&self) -> DisplayMeta {
        match self {
            Self::Low => DisplayMeta::new("Low", "ArrowDown", BadgeVariant::Info),
            Self::Medium => DisplayMeta::new("Medium", "Minus", BadgeVariant::Warning),
            Self::High => DisplayMeta::new("High", "ArrowUp", BadgeVariant::Error),
        }
    }
}

impl Describe for ExpenseCategory {
    fn display_meta(&self) -> DisplayMeta {
        match self {
            Self::Seeds => DisplayMeta::new("Seeds", "Sprout", BadgeVariant::Primary),
            Self::Fertilizer => DisplayMeta::new("Fertilizer", "Beaker", BadgeVariant::Secondary),
            Self::Equipment => DisplayMeta::new("Equipment", "Wrench", BadgeVariant::Accent),
            Self::Fuel => DisplayMeta::new("Fuel", "Fuel", BadgeVariant::Warning),
            Self::Labor => DisplayMeta::new("Labor", "Users", BadgeVariant::Info),
            Self::Utilities => DisplayMeta::new("Utilities", "Zap", BadgeVariant::Error),
            Self::Maintenance => DisplayMeta::new("Maintenance", "Settings", BadgeVariant::Success),
            Self::Other => DisplayMeta::new("Other", "Receipt", BadgeVariant::Default),
        }
    }
}

impl Describe for WeatherCondition {
    fn display_meta(&self) -> DisplayMeta {
        match self {
            Self::Sunny => DisplayMeta::new("Sunny", "Sun", BadgeVariant::Warning),
            Self::Cloudy => DisplayMeta::new("Cloudy", "Cloud", BadgeVariant::Default),
            Self::Rainy => DisplayMeta::new("Rainy", "CloudRain", BadgeVariant::Info),
            Self::Snowy => DisplayMeta::new("Snowy", "CloudSnow", BadgeVariant::Secondary),
            Self::Stormy => DisplayMeta::new("Stormy", "Zap", BadgeVariant::Error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BadgeVariant, Describe};
    use crate::model::crop::CropStatus;
    use crate::model::expense::ExpenseCategory;
    use crate::model::task::{Priority, TaskType};
    use crate::weather::WeatherCondition;

    #[test]
    fn crop_status_badges_follow_lifecycle_colors() {
        assert_eq!(CropStatus::Planted.display_meta().badge, BadgeVariant::Info);
        assert_eq!(CropStatus::Ready.display_meta().badge, BadgeVariant::Success);
        assert_eq!(
            CropStatus::Harvested.display_meta().badge,
            BadgeVariant::Secondary
        );
    }

    #[test]
    fn every_expense_category_has_a_distinct_badge() {
        let mut seen = std::collections::HashSet::new();
        for category in ExpenseCategory::ALL {
            assert!(seen.insert(category.display_meta().badge));
        }
    }

    #[test]
    fn task_icons_and_priority_badges() {
        assert_eq!(TaskType::Watering.display_meta().icon, "Droplets");
        assert_eq!(TaskType::Maintenance.display_meta().icon, "Wrench");
        assert_eq!(Priority::High.display_meta().badge, BadgeVariant::Error);
        assert_eq!(Priority::Low.display_meta().badge.as_str(), "info");
    }

    #[test]
    fn weather_condition_icons() {
        assert_eq!(WeatherCondition::Rainy.display_meta().icon, "CloudRain");
        assert_eq!(WeatherCondition::Stormy.display_meta().icon, "Zap");
    }
}
