//! CLI entry point for FarmTrack.
//!
//! # Responsibility
//! - Parse arguments, load configuration and open the record database.
//! - Dispatch to command handlers; all rendering lives in `render`.

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use farmtrack_core::{
    Amount, CropStatus, ExpenseCategory, FarmConfig, Priority, RecordId, TaskBucket, TaskType,
};
use std::path::PathBuf;

mod commands;
mod render;

/// Track crops, field tasks and farm expenses.
#[derive(Parser, Debug)]
#[command(name = "farmtrack", version)]
struct Cli {
    /// Config file (defaults to ./farmtrack.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Database file, overriding the configured path.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the farm dashboard.
    Dashboard,

    /// Manage crops.
    #[command(subcommand)]
    Crops(CropCommand),

    /// Manage field tasks.
    #[command(subcommand)]
    Tasks(TaskCommand),

    /// Manage expenses.
    #[command(subcommand)]
    Expenses(ExpenseCommand),

    /// Show the weekly weather forecast.
    Weather,

    /// Insert sample data into an empty database.
    Seed,
}

#[derive(Subcommand, Debug)]
enum CropCommand {
    /// List crops, optionally filtered.
    Ls {
        #[arg(short, long)]
        search: Option<String>,
        #[arg(long)]
        status: Option<CropStatus>,
    },
    /// Add a crop.
    Add(CropFields),
    /// Update fields of an existing crop.
    Update {
        id: RecordId,
        #[command(flatten)]
        fields: CropFields,
    },
    /// Delete a crop. Tasks referring to it keep their dangling reference.
    Rm { id: RecordId },
}

#[derive(Args, Debug)]
struct CropFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    variety: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    planted: Option<NaiveDate>,
    /// YYYY-MM-DD
    #[arg(long)]
    harvest: Option<NaiveDate>,
    #[arg(long)]
    field: Option<String>,
    #[arg(long)]
    status: Option<CropStatus>,
    #[arg(long)]
    notes: Option<String>,
}

#[derive(Subcommand, Debug)]
enum TaskCommand {
    /// List tasks, earliest due first.
    Ls {
        #[arg(short, long, default_value = "all")]
        bucket: TaskBucket,
        #[arg(short, long)]
        search: Option<String>,
        #[arg(long = "type")]
        task_type: Option<TaskType>,
        #[arg(long)]
        priority: Option<Priority>,
    },
    /// Add a task.
    Add(TaskFields),
    /// Update fields of an existing task.
    Update {
        id: RecordId,
        #[command(flatten)]
        fields: TaskFields,
    },
    /// Flip a task between complete and incomplete.
    Toggle { id: RecordId },
    /// Delete a task.
    Rm { id: RecordId },
}

#[derive(Args, Debug)]
struct TaskFields {
    #[arg(long)]
    title: Option<String>,
    #[arg(long = "type")]
    task_type: Option<TaskType>,
    #[arg(long)]
    priority: Option<Priority>,
    /// YYYY-MM-DD (local midnight) or RFC 3339.
    #[arg(long)]
    due: Option<String>,
    /// Crop id, or `all` for every crop.
    #[arg(long)]
    crop: Option<String>,
    #[arg(long)]
    notes: Option<String>,
}

#[derive(Subcommand, Debug)]
enum ExpenseCommand {
    /// List expenses of one month, most recent first.
    Ls {
        /// YYYY-MM; defaults to the current month.
        #[arg(short, long)]
        month: Option<String>,
        #[arg(short, long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<ExpenseCategory>,
    },
    /// Add an expense.
    Add(ExpenseFields),
    /// Update fields of an existing expense.
    Update {
        id: RecordId,
        #[command(flatten)]
        fields: ExpenseFields,
    },
    /// Delete an expense.
    Rm { id: RecordId },
}

#[derive(Args, Debug)]
struct ExpenseFields {
    #[arg(long)]
    description: Option<String>,
    /// Non-negative amount such as `12` or `12.50`.
    #[arg(long)]
    amount: Option<Amount>,
    #[arg(long)]
    category: Option<ExpenseCategory>,
    /// YYYY-MM-DD; defaults to today on add.
    #[arg(long)]
    date: Option<NaiveDate>,
}

fn main() -> Result<()> {
    let Cli { config, db, cmd } = Cli::parse();

    let mut config = match config {
        Some(path) => FarmConfig::load(&path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => FarmConfig::load_from_dir(".")?,
    };
    if let Some(db) = db {
        config.database.path = db;
    }

    if let Some(dir) = &config.logging.dir {
        let level = config
            .logging
            .level
            .as_deref()
            .unwrap_or_else(|| farmtrack_core::default_log_level());
        farmtrack_core::init_logging(level, dir)
            .map_err(|err| anyhow!("failed to initialize logging: {err}"))?;
    }

    commands::run(cmd, &config)
}
