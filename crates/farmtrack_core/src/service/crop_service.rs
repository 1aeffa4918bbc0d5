//! Crop-specific use cases.

use crate::model::crop::Crop;
use crate::query::filter::{query_crops, CropCriteria};
use crate::repo::{CollectionStore, RepoResult};
use crate::service::collection_service::CollectionService;

/// Crop service over any crop store.
pub type CropService<S> = CollectionService<Crop, S>;

impl<S: CollectionStore<Crop>> CollectionService<Crop, S> {
    /// Filtered crops in store order.
    pub fn query(&self, criteria: &CropCriteria) -> RepoResult<Vec<Crop>> {
        Ok(query_crops(&self.list()?, criteria))
    }
}
