//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into use-case level APIs.
//! - Keep the CLI decoupled from storage details.

pub mod collection_service;
pub mod crop_service;
pub mod dashboard_service;
pub mod expense_service;
pub mod seed;
pub mod task_service;

pub use collection_service::CollectionService;
pub use crop_service::CropService;
pub use dashboard_service::DashboardService;
pub use expense_service::{ExpenseService, MonthlyExpenses};
pub use seed::{seed_if_empty, SeedReport};
pub use task_service::{resolve_crop_names, TaskService};
