//! Sample farm data for first runs and demos.
//!
//! Dates are relative to the supplied clock, so a freshly seeded store always
//! shows a task due today, two upcoming tasks and expenses in the recent past.

use crate::dates::Clock;
use crate::model::amount::Amount;
use crate::model::crop::{Crop, CropStatus, NewCrop};
use crate::model::expense::{Expense, ExpenseCategory, NewExpense};
use crate::model::task::{CropRef, NewTask, Priority, Task, TaskType};
use crate::repo::{CollectionStore, RepoResult};
use crate::service::CollectionService;
use chrono::{Days, Duration, NaiveDate};
use log::info;

/// Number of records inserted per collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub crops: usize,
    pub tasks: usize,
    pub expenses: usize,
}

impl SeedReport {
    pub fn is_empty(&self) -> bool {
        self.crops == 0 && self.tasks == 0 && self.expenses == 0
    }
}

/// Inserts the sample data when all three collections are empty.
///
/// Any existing record leaves every collection untouched and returns an
/// empty report.
pub fn seed_if_empty<C, T, E>(
    crops: &mut CollectionService<Crop, C>,
    tasks: &mut CollectionService<Task, T>,
    expenses: &mut CollectionService<Expense, E>,
    clock: &Clock,
) -> RepoResult<SeedReport>
where
    C: CollectionStore<Crop>,
    T: CollectionStore<Task>,
    E: CollectionStore<Expense>,
{
    let occupied =
        !crops.list()?.is_empty() || !tasks.list()?.is_empty() || !expenses.list()?.is_empty();
    if occupied {
        info!("event=seed module=service status=skipped reason=not_empty");
        return Ok(SeedReport::default());
    }

    let today = clock.today();
    let mut report = SeedReport::default();

    let mut crop_ids = Vec::new();
    for draft in sample_crops(today) {
        crop_ids.push(crops.create(draft)?.id);
        report.crops += 1;
    }

    let now = clock.now_utc();
    let task_rows = [
        (
            "Water tomato plants",
            "Check soil moisture and water if needed",
            TaskType::Watering,
            Priority::High,
            0,
        ),
        (
            "Fertilize crops",
            "Apply organic fertilizer",
            TaskType::Fertilizing,
            Priority::Medium,
            1,
        ),
        (
            "Harvest lettuce",
            "Ready for harvest",
            TaskType::Harvesting,
            Priority::High,
            2,
        ),
    ];
    for (index, row) in task_rows.into_iter().enumerate() {
        let (title, notes, task_type, priority, days_ahead) = row;
        let crop = crop_ids
            .get(index)
            .copied()
            .map_or(CropRef::AllCrops, CropRef::Crop);
        tasks.create(NewTask {
            title: Some(title.to_string()),
            task_type: Some(task_type),
            priority: Some(priority),
            due_date: Some(now + Duration::days(days_ahead)),
            crop: Some(crop),
            notes: Some(notes.to_string()),
        })?;
        report.tasks += 1;
    }

    let expense_rows = [
        ("Wheat Seeds", 450, ExpenseCategory::Seeds, 5),
        ("Organic Fertilizer", 320, ExpenseCategory::Fertilizer, 12),
        ("Tractor Maintenance", 850, ExpenseCategory::Maintenance, 8),
        ("Irrigation Equipment", 1200, ExpenseCategory::Equipment, 15),
        ("Diesel Fuel", 280, ExpenseCategory::Fuel, 3),
    ];
    for (description, units, category, days_ago) in expense_rows {
        expenses.create(NewExpense {
            description: Some(description.to_string()),
            amount: Some(Amount::from_units(units)),
            category: Some(category),
            date: today.checked_sub_days(Days::new(days_ago)),
        })?;
        report.expenses += 1;
    }

    info!(
        "event=seed module=service status=ok crops={} tasks={} expenses={}",
        report.crops, report.tasks, report.expenses
    );
    Ok(report)
}

fn sample_crops(today: NaiveDate) -> Vec<NewCrop> {
    // name, variety, planted offset, harvest offset, field, status, notes
    let rows = [
        (
            "Wheat",
            "Hard Red Winter",
            -45,
            90,
            "North Field A",
            CropStatus::Growing,
            "Regular irrigation schedule",
        ),
        (
            "Corn",
            "Sweet Corn",
            -60,
            30,
            "South Field B",
            CropStatus::Growing,
            "Monitor for pests",
        ),
        (
            "Soybeans",
            "Roundup Ready",
            -120,
            -10,
            "East Field C",
            CropStatus::Harvested,
            "Successful harvest",
        ),
    ];
    rows.into_iter()
        .map(
            |(name, variety, planted, harvest, field, status, notes)| NewCrop {
                name: Some(name.to_string()),
                variety: Some(variety.to_string()),
                planted_date: Some(today + Duration::days(planted)),
                expected_harvest: Some(today + Duration::days(harvest)),
                field_location: Some(field.to_string()),
                status: Some(status),
                notes: Some(notes.to_string()),
            },
        )
        .collect()
}
