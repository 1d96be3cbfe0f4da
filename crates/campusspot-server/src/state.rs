use std::sync::Arc;

use campusspot_core::repository::{ReviewRepository, SpotRepository};

/// Shared request state: the two stores, constructed once at startup.
pub struct AppState<S, R> {
    pub spots: Arc<S>,
    pub reviews: Arc<R>,
}

impl<S, R> AppState<S, R>
where
    S: SpotRepository,
    R: ReviewRepository,
{
    pub fn new(spots: S, reviews: R) -> Self {
        Self {
            spots: Arc::new(spots),
            reviews: Arc::new(reviews),
        }
    }
}

impl<S, R> Clone for AppState<S, R> {
    fn clone(&self) -> Self {
        Self {
            spots: self.spots.clone(),
            reviews: self.reviews.clone(),
        }
    }
}
