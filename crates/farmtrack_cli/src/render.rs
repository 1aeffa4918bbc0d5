//! Plain-text rendering for terminal output.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use farmtrack_core::service::MonthlyExpenses;
use farmtrack_core::weather::DailyForecast;
use farmtrack_core::{
    Crop, CropResolution, DashboardSummary, Describe, RecordId, Task, TaskBucket, TaskCounts,
};

pub(crate) fn dashboard(summary: &DashboardSummary, crops: &[Crop], offset: FixedOffset) {
    println!("Farm Dashboard");
    println!(
        "  Active crops:    {} of {}",
        summary.active_crops, summary.total_crops
    );
    println!(
        "  Pending tasks:   {} ({} due today, {} overdue)",
        summary.pending_tasks, summary.tasks_due_today, summary.overdue_tasks
    );
    println!(
        "  Expenses {}: ${}",
        summary.month.label(),
        summary.monthly_expenses
    );

    println!();
    println!("Upcoming tasks");
    if summary.upcoming_tasks.is_empty() {
        println!("  (none)");
    }
    for task in &summary.upcoming_tasks {
        let crop = task.crop.resolve(crops);
        println!(
            "  {}  {:<28} {:<8} {}",
            local_day(task.due_date, offset),
            task.title,
            task.priority.display_meta().label,
            crop.label()
        );
    }

    println!();
    println!("Recent expenses");
    if summary.recent_expenses.is_empty() {
        println!("  (none)");
    }
    for expense in &summary.recent_expenses {
        println!(
            "  {}  {:<28} {:<12} ${:>10}",
            expense.date,
            expense.description,
            expense.category.display_meta().label,
            expense.amount.to_string()
        );
    }
}

pub(crate) fn crops(crops: &[Crop], today: NaiveDate) {
    if crops.is_empty() {
        println!("No crops found.");
        return;
    }
    for crop in crops {
        let harvest = match crop.days_to_harvest(today) {
            days if days > 0 => format!("{days} days to harvest"),
            _ => "Ready for harvest!".to_string(),
        };
        println!(
            "{}  {:<12} {:<18} {:<16} [{}] {}",
            crop.id,
            crop.name,
            crop.variety,
            crop.field_location,
            crop.status.display_meta().label,
            harvest
        );
    }
}

pub(crate) fn tasks(
    tasks: &[Task],
    crop_names: &[(RecordId, CropResolution)],
    counts: &TaskCounts,
    active: TaskBucket,
    offset: FixedOffset,
) {
    let tabs: Vec<String> = TaskBucket::ALL
        .iter()
        .map(|bucket| {
            let marker = if *bucket == active { "*" } else { "" };
            format!("{marker}{} ({})", bucket.label(), counts.for_bucket(*bucket))
        })
        .collect();
    println!("{}", tabs.join("  "));

    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }
    for task in tasks {
        let crop = crop_names
            .iter()
            .find(|(id, _)| *id == task.id)
            .map_or("All Crops", |(_, resolution)| resolution.label());
        let check = if task.completed { "x" } else { " " };
        println!(
            "[{check}] {}  {}  {:<28} {:<12} {:<8} {}",
            task.id,
            local_time(task.due_date, offset),
            task.title,
            task.task_type.display_meta().label,
            task.priority.display_meta().label,
            crop
        );
    }
}

pub(crate) fn expenses(monthly: &MonthlyExpenses) {
    println!("{}: ${}", monthly.month.label(), monthly.total);
    if monthly.items.is_empty() {
        println!("No expenses found.");
        return;
    }
    for expense in &monthly.items {
        println!(
            "{}  {}  {:<28} {:<12} ${:>10}",
            expense.id,
            expense.date,
            expense.description,
            expense.category.display_meta().label,
            expense.amount.to_string()
        );
    }
}

pub(crate) fn weather(today: &DailyForecast, preview: &[DailyForecast]) {
    println!(
        "{}: {}°F {} (feels like {}°F, humidity {}%, wind {} mph)",
        today.location,
        today.temperature,
        today.condition.display_meta().label,
        today.feels_like,
        today.humidity,
        today.wind_speed
    );
    for day in preview {
        println!(
            "  {:<4} {:<10} {}°/{}°",
            day.day,
            day.condition.display_meta().label,
            day.high,
            day.low
        );
    }
}

fn local_day(instant: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    instant.with_timezone(&offset).date_naive()
}

fn local_time(instant: DateTime<Utc>, offset: FixedOffset) -> String {
    instant
        .with_timezone(&offset)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::{local_day, local_time};
    use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};

    #[test]
    fn due_day_follows_configured_offset() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let due = Utc.with_ymd_and_hms(2024, 5, 1, 22, 0, 0).unwrap();
        assert_eq!(local_day(due, offset), NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
        assert_eq!(local_time(due, offset), "2024-05-02 00:00");
    }
}
