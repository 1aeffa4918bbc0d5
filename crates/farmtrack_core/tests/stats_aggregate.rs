use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use farmtrack_core::stats::dashboard::dashboard_summary;
use farmtrack_core::stats::{recent_expenses, sum_amounts, task_counts, top_n_by_key, upcoming_tasks};
use farmtrack_core::{
    Amount, Clock, Crop, CropRef, CropStatus, DateInterval, Expense, ExpenseCategory, NewCrop,
    NewExpense, NewTask, Priority, Task, TaskBucket, TaskType,
};
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 20, 10, 0, 0).unwrap()
}

fn expense(description: &str, amount: &str, day: NaiveDate) -> Expense {
    let draft = NewExpense {
        description: Some(description.into()),
        amount: Some(amount.parse::<Amount>().unwrap()),
        category: Some(ExpenseCategory::Other),
        date: Some(day),
    };
    Expense::from_draft(Uuid::new_v4(), draft, now()).unwrap()
}

fn task(title: &str, due: DateTime<Utc>) -> Task {
    let draft = NewTask {
        title: Some(title.into()),
        task_type: Some(TaskType::Watering),
        priority: Some(Priority::Medium),
        due_date: Some(due),
        crop: Some(CropRef::AllCrops),
        notes: None,
    };
    Task::from_draft(Uuid::new_v4(), draft, now()).unwrap()
}

fn crop(name: &str, status: CropStatus) -> Crop {
    let draft = NewCrop {
        name: Some(name.into()),
        variety: Some("Standard".into()),
        planted_date: Some(date(2023, 11, 1)),
        expected_harvest: Some(date(2024, 6, 1)),
        field_location: Some("Home Field".into()),
        status: Some(status),
        notes: None,
    };
    Crop::from_draft(Uuid::new_v4(), draft, now()).unwrap()
}

fn task_fixture() -> Vec<Task> {
    let now = now();
    let mut done = task("done", now - Duration::days(2));
    done.toggle_completion(now);
    vec![
        task("today early", now - Duration::hours(3)),
        task("today late", now + Duration::hours(5)),
        task("tomorrow", now + Duration::days(1)),
        task("next week", now + Duration::days(7)),
        task("last week", now - Duration::days(7)),
        done,
    ]
}

#[test]
fn month_sum_only_counts_interval() {
    let expenses = vec![
        expense("january", "100", date(2024, 1, 5)),
        expense("february", "50", date(2024, 2, 1)),
    ];
    let january = DateInterval::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap();

    assert_eq!(sum_amounts(&expenses, Some(january)), Amount::from_units(100));
    assert_eq!(sum_amounts(&expenses, None), Amount::from_units(150));
    assert_eq!(sum_amounts(&[], None), Amount::ZERO);
}

#[test]
fn sums_are_exact_to_the_cent_and_order_independent() {
    let mut expenses = vec![
        expense("a", "0.10", date(2024, 1, 1)),
        expense("b", "0.20", date(2024, 1, 2)),
        expense("c", "1999.99", date(2024, 1, 3)),
        expense("d", "0.01", date(2024, 1, 4)),
    ];
    let forward = sum_amounts(&expenses, None);
    expenses.reverse();
    let backward = sum_amounts(&expenses, None);

    assert_eq!(forward.cents(), 200_030);
    assert_eq!(forward, backward);
    assert_eq!(forward.to_string(), "2000.30");
}

#[test]
fn bucket_counts_partition_incomplete_tasks() {
    let clock = Clock::at_utc(now());
    let counts = task_counts(&task_fixture(), &clock);

    assert_eq!(counts.all, 6);
    assert_eq!(counts.today, 2);
    assert_eq!(counts.upcoming, 2);
    assert_eq!(counts.overdue, 1);
    assert_eq!(counts.completed, 1);
    assert_eq!(counts.today + counts.upcoming + counts.overdue, counts.incomplete);
    assert_eq!(counts.incomplete + counts.completed, counts.all);
    assert_eq!(counts.for_bucket(TaskBucket::All), 6);
}

#[test]
fn counts_agree_with_bucket_filters() {
    let clock = Clock::at_utc(now());
    let tasks = task_fixture();
    let counts = task_counts(&tasks, &clock);

    for bucket in TaskBucket::ALL {
        let listed = tasks.iter().filter(|t| bucket.contains(t, &clock)).count();
        assert_eq!(counts.for_bucket(bucket), listed, "bucket {bucket}");
    }
}

#[test]
fn top_n_is_bounded_sorted_and_idempotent() {
    let tasks = task_fixture();
    let top = upcoming_tasks(&tasks, 3);
    let titles: Vec<_> = top.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, ["last week", "today early", "today late"]);
    assert_eq!(upcoming_tasks(&top, 3), top);
    assert!(upcoming_tasks(&tasks, 0).is_empty());
    assert_eq!(upcoming_tasks(&tasks, 50).len(), 5);

    let expenses = vec![
        expense("old", "1", date(2024, 1, 1)),
        expense("newest", "1", date(2024, 1, 9)),
        expense("tie first", "1", date(2024, 1, 5)),
        expense("tie second", "1", date(2024, 1, 5)),
    ];
    let recent = recent_expenses(&expenses, 3);
    let descriptions: Vec<_> = recent.iter().map(|e| e.description.as_str()).collect();
    assert_eq!(descriptions, ["newest", "tie first", "tie second"]);
    assert_eq!(recent_expenses(&recent, 3), recent);

    let by_date = top_n_by_key(&expenses, 2, |e| e.date);
    assert_eq!(by_date[0].description, "old");
}

#[test]
fn dashboard_summary_combines_collections() {
    let clock = Clock::at_utc(now());
    let crops = vec![
        crop("Wheat", CropStatus::Growing),
        crop("Corn", CropStatus::Ready),
        crop("Soybeans", CropStatus::Harvested),
    ];
    let expenses = vec![
        expense("Wheat Seeds", "450", date(2024, 1, 15)),
        expense("Diesel Fuel", "280.25", date(2024, 1, 17)),
        expense("Old invoice", "999", date(2023, 12, 31)),
    ];

    let summary = dashboard_summary(&crops, &task_fixture(), &expenses, &clock, 2);

    assert_eq!(summary.active_crops, 2);
    assert_eq!(summary.total_crops, 3);
    assert_eq!(summary.pending_tasks, 5);
    assert_eq!(summary.tasks_due_today, 2);
    assert_eq!(summary.overdue_tasks, 1);
    assert_eq!(summary.month.label(), "January 2024");
    assert_eq!(summary.monthly_expenses.to_string(), "730.25");
    assert_eq!(summary.upcoming_tasks.len(), 2);
    assert_eq!(summary.recent_expenses[0].description, "Diesel Fuel");
    assert_eq!(summary.recent_expenses.len(), 2);
}

#[test]
fn dashboard_of_empty_farm_is_zeroed() {
    let clock = Clock::at_utc(now());
    let summary = dashboard_summary(&[], &[], &[], &clock, 5);

    assert_eq!(summary.active_crops, 0);
    assert_eq!(summary.pending_tasks, 0);
    assert_eq!(summary.monthly_expenses, Amount::ZERO);
    assert!(summary.upcoming_tasks.is_empty());
    assert!(summary.recent_expenses.is_empty());
}
