//! Command handlers.

use crate::render;
use crate::{
    Command, CropCommand, CropFields, ExpenseCommand, ExpenseFields, TaskCommand, TaskFields,
};
use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, FixedOffset, Utc};
use farmtrack_core::dates::{parse_instant_lenient, parse_month};
use farmtrack_core::db::Connection;
use farmtrack_core::service::{resolve_crop_names, seed_if_empty};
use farmtrack_core::weather::{StaticWeatherProvider, WeatherProvider};
use farmtrack_core::{
    db, Clock, Crop, CropCriteria, CropPatch, CropRef, CropService, DashboardService, Expense,
    ExpenseCriteria, ExpensePatch, ExpenseService, FarmConfig, NewCrop, NewExpense, NewTask,
    RecordId, SqliteStore, Task, TaskCriteria, TaskPatch, TaskService,
};
use log::info;

/// Services over one open database.
struct Farm<'conn> {
    crops: CropService<SqliteStore<'conn, Crop>>,
    tasks: TaskService<SqliteStore<'conn, Task>>,
    expenses: ExpenseService<SqliteStore<'conn, Expense>>,
}

impl<'conn> Farm<'conn> {
    fn open(conn: &'conn Connection) -> Result<Self> {
        Ok(Self {
            crops: CropService::new(SqliteStore::<Crop>::try_new(conn)?),
            tasks: TaskService::new(SqliteStore::<Task>::try_new(conn)?),
            expenses: ExpenseService::new(SqliteStore::<Expense>::try_new(conn)?),
        })
    }
}

pub(crate) fn run(cmd: Command, config: &FarmConfig) -> Result<()> {
    let offset = config.clock.offset()?;
    let clock = Clock::system(offset);
    info!(
        "event=cli_command module=cli status=start command={}",
        command_name(&cmd)
    );

    if let Command::Weather = cmd {
        let provider = StaticWeatherProvider::default();
        render::weather(&provider.today()?, &provider.preview()?);
        return Ok(());
    }

    let conn = db::open_db(&config.database.path).with_context(|| {
        format!("failed to open database {}", config.database.path.display())
    })?;
    let mut farm = Farm::open(&conn)?;

    match cmd {
        Command::Dashboard => {
            let summary = DashboardService::new(
                farm.crops.store(),
                farm.tasks.store(),
                farm.expenses.store(),
            )
            .with_recent_limit(config.dashboard.recent_limit)
            .summary(&clock)?;
            render::dashboard(&summary, &farm.crops.list()?, offset);
        }
        Command::Seed => {
            let report = seed_if_empty(&mut farm.crops, &mut farm.tasks, &mut farm.expenses, &clock)?;
            if report.is_empty() {
                println!("Database already has records; nothing seeded.");
            } else {
                println!(
                    "Seeded {} crops, {} tasks and {} expenses.",
                    report.crops, report.tasks, report.expenses
                );
            }
        }
        Command::Crops(command) => crop_command(command, &mut farm, &clock)?,
        Command::Tasks(command) => task_command(command, &mut farm, &clock)?,
        Command::Expenses(command) => expense_command(command, &mut farm, &clock)?,
        Command::Weather => {}
    }
    Ok(())
}

fn crop_command(command: CropCommand, farm: &mut Farm<'_>, clock: &Clock) -> Result<()> {
    match command {
        CropCommand::Ls { search, status } => {
            let criteria = CropCriteria {
                text: search,
                status,
            };
            render::crops(&farm.crops.query(&criteria)?, clock.today());
        }
        CropCommand::Add(fields) => {
            let crop = farm.crops.create(new_crop(fields))?;
            println!("Crop added: {} ({})", crop.name, crop.id);
        }
        CropCommand::Update { id, fields } => {
            let crop = farm.crops.update(id, crop_patch(fields))?;
            println!("Crop updated: {} ({})", crop.name, crop.id);
        }
        CropCommand::Rm { id } => report_delete("Crop", id, farm.crops.delete_if_present(id)?),
    }
    Ok(())
}

fn task_command(command: TaskCommand, farm: &mut Farm<'_>, clock: &Clock) -> Result<()> {
    let offset = clock.offset();
    match command {
        TaskCommand::Ls {
            bucket,
            search,
            task_type,
            priority,
        } => {
            let criteria = TaskCriteria {
                text: search,
                task_type,
                priority,
                bucket: Some(bucket),
                ..TaskCriteria::default()
            };
            let listed = farm.tasks.query(&criteria, clock)?;
            let counts = farm.tasks.counts(clock)?;
            let names = resolve_crop_names(&listed, &farm.crops.list()?);
            render::tasks(&listed, &names, &counts, bucket, offset);
        }
        TaskCommand::Add(fields) => {
            let task = farm.tasks.create(new_task(fields, offset)?)?;
            println!("Task added: {} ({})", task.title, task.id);
        }
        TaskCommand::Update { id, fields } => {
            let task = farm.tasks.update(id, task_patch(fields, offset)?)?;
            println!("Task updated: {} ({})", task.title, task.id);
        }
        TaskCommand::Toggle { id } => {
            let task = farm.tasks.toggle_complete(id, clock)?;
            let state = if task.completed { "completed" } else { "reopened" };
            println!("Task {state}: {}", task.title);
        }
        TaskCommand::Rm { id } => report_delete("Task", id, farm.tasks.delete_if_present(id)?),
    }
    Ok(())
}

fn expense_command(command: ExpenseCommand, farm: &mut Farm<'_>, clock: &Clock) -> Result<()> {
    match command {
        ExpenseCommand::Ls {
            month,
            search,
            category,
        } => {
            let cursor = match month.as_deref() {
                Some(text) => parse_month(text)
                    .ok_or_else(|| anyhow!("invalid month `{text}`; expected YYYY-MM"))?,
                None => clock.current_month(),
            };
            let criteria = ExpenseCriteria {
                text: search,
                category,
                within: None,
            };
            render::expenses(&farm.expenses.list_month(cursor, &criteria)?);
        }
        ExpenseCommand::Add(fields) => {
            let expense = farm.expenses.record(new_expense(fields), clock)?;
            println!(
                "Expense added: {} {} ({})",
                expense.description, expense.amount, expense.id
            );
        }
        ExpenseCommand::Update { id, fields } => {
            let expense = farm.expenses.update(id, expense_patch(fields))?;
            println!(
                "Expense updated: {} {} ({})",
                expense.description, expense.amount, expense.id
            );
        }
        ExpenseCommand::Rm { id } => {
            report_delete("Expense", id, farm.expenses.delete_if_present(id)?)
        }
    }
    Ok(())
}

fn command_name(cmd: &Command) -> &'static str {
    match cmd {
        Command::Dashboard => "dashboard",
        Command::Crops(_) => "crops",
        Command::Tasks(_) => "tasks",
        Command::Expenses(_) => "expenses",
        Command::Weather => "weather",
        Command::Seed => "seed",
    }
}

fn report_delete(kind: &str, id: RecordId, removed: bool) {
    if removed {
        println!("{kind} deleted: {id}");
    } else {
        println!("{kind} not found: {id}");
    }
}

fn new_crop(fields: CropFields) -> NewCrop {
    NewCrop {
        name: fields.name,
        variety: fields.variety,
        planted_date: fields.planted,
        expected_harvest: fields.harvest,
        field_location: fields.field,
        status: fields.status,
        notes: fields.notes,
    }
}

fn crop_patch(fields: CropFields) -> CropPatch {
    CropPatch {
        name: fields.name,
        variety: fields.variety,
        planted_date: fields.planted,
        expected_harvest: fields.harvest,
        field_location: fields.field,
        status: fields.status,
        notes: fields.notes,
    }
}

fn new_task(fields: TaskFields, offset: FixedOffset) -> Result<NewTask> {
    Ok(NewTask {
        title: fields.title,
        task_type: fields.task_type,
        priority: fields.priority,
        due_date: parse_due(fields.due.as_deref(), offset)?,
        crop: parse_crop_ref(fields.crop.as_deref())?,
        notes: fields.notes,
    })
}

fn task_patch(fields: TaskFields, offset: FixedOffset) -> Result<TaskPatch> {
    Ok(TaskPatch {
        title: fields.title,
        task_type: fields.task_type,
        priority: fields.priority,
        due_date: parse_due(fields.due.as_deref(), offset)?,
        crop: parse_crop_ref(fields.crop.as_deref())?,
        notes: fields.notes,
    })
}

fn new_expense(fields: ExpenseFields) -> NewExpense {
    NewExpense {
        description: fields.description,
        amount: fields.amount,
        category: fields.category,
        date: fields.date,
    }
}

fn expense_patch(fields: ExpenseFields) -> ExpensePatch {
    ExpensePatch {
        description: fields.description,
        amount: fields.amount,
        category: fields.category,
        date: fields.date,
    }
}

fn parse_due(text: Option<&str>, offset: FixedOffset) -> Result<Option<DateTime<Utc>>> {
    let Some(text) = text else {
        return Ok(None);
    };
    match parse_instant_lenient(text, offset) {
        Some(instant) => Ok(Some(instant)),
        None => bail!("invalid due date `{text}`; expected YYYY-MM-DD or RFC 3339"),
    }
}

fn parse_crop_ref(text: Option<&str>) -> Result<Option<CropRef>> {
    let Some(text) = text else {
        return Ok(None);
    };
    if text.trim().eq_ignore_ascii_case("all") {
        return Ok(Some(CropRef::AllCrops));
    }
    let id: RecordId = text
        .trim()
        .parse()
        .with_context(|| format!("invalid crop id `{text}`"))?;
    Ok(Some(CropRef::Crop(id)))
}
