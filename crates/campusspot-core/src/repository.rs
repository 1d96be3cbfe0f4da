//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Implementations own their
//! database handle and are cloned into request handlers.

use uuid::Uuid;

use crate::error::CampusResult;
use crate::models::{
    review::{CreateReview, Review},
    spot::{CreateSpot, Spot, UpdateSpot},
};

pub trait SpotRepository: Send + Sync {
    /// All spots, most recently created first.
    fn list(&self) -> impl Future<Output = CampusResult<Vec<Spot>>> + Send;
    /// Stamps `created_at` and `likes = 0` on the stored record.
    fn create(&self, input: CreateSpot) -> impl Future<Output = CampusResult<Spot>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = CampusResult<Spot>> + Send;
    /// Merge the provided fields into an existing spot.
    fn update(
        &self,
        id: Uuid,
        input: UpdateSpot,
    ) -> impl Future<Output = CampusResult<Spot>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = CampusResult<()>> + Send;
}

// ---------------------------------------------------------------------------
// Reviews (append-only)
// ---------------------------------------------------------------------------

pub trait ReviewRepository: Send + Sync {
    /// Reviews for `spot_id`, most recent first. Unknown ids yield an
    /// empty list.
    fn list_by_spot(&self, spot_id: &str)
    -> impl Future<Output = CampusResult<Vec<Review>>> + Send;
    /// Append a review. `spot_id` is not checked against existing spots.
    fn create(&self, input: CreateReview) -> impl Future<Output = CampusResult<Review>> + Send;
}
