//! Task-specific use cases.

use crate::dates::Clock;
use crate::model::crop::Crop;
use crate::model::task::{CropResolution, Task};
use crate::model::RecordId;
use crate::query::bucket::TaskBucket;
use crate::query::filter::{query_tasks, TaskCriteria};
use crate::repo::{CollectionStore, ErrorKind, Record, RepoError, RepoResult};
use crate::service::collection_service::{log_failure, CollectionService};
use crate::stats::{task_counts, TaskCounts};
use log::info;

/// Task service over any task store.
pub type TaskService<S> = CollectionService<Task, S>;

impl<S: CollectionStore<Task>> CollectionService<Task, S> {
    /// Flips completion of `id`, stamping or clearing `completed_date`.
    pub fn toggle_complete(&mut self, id: RecordId, clock: &Clock) -> RepoResult<Task> {
        let Some(mut task) = self.get(id)? else {
            log_failure("task_toggle", Task::COLLECTION, ErrorKind::NotFound);
            return Err(RepoError::not_found::<Task>(id));
        };
        task.toggle_completion(clock.now_utc());
        let stored = self.store_mut().replace(&task)?;
        info!(
            "event=task_toggle module=service status=ok id={} completed={}",
            stored.id, stored.completed
        );
        Ok(stored)
    }

    /// Tasks in `bucket`, earliest due first.
    pub fn list_bucket(&self, bucket: TaskBucket, clock: &Clock) -> RepoResult<Vec<Task>> {
        let tasks = self.list()?;
        Ok(query_tasks(
            &tasks,
            &TaskCriteria::default().with_bucket(bucket),
            clock,
        ))
    }

    /// Filtered tasks, earliest due first.
    pub fn query(&self, criteria: &TaskCriteria, clock: &Clock) -> RepoResult<Vec<Task>> {
        let tasks = self.list()?;
        Ok(query_tasks(&tasks, criteria, clock))
    }

    /// Tab counters for the current snapshot.
    pub fn counts(&self, clock: &Clock) -> RepoResult<TaskCounts> {
        Ok(task_counts(&self.list()?, clock))
    }
}

/// Resolves each task's crop reference against `crops`.
pub fn resolve_crop_names(tasks: &[Task], crops: &[Crop]) -> Vec<(RecordId, CropResolution)> {
    tasks
        .iter()
        .map(|task| (task.id, task.crop.resolve(crops)))
        .collect()
}
