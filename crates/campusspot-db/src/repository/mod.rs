//! SurrealDB repository implementations.

mod review;
mod spot;

pub use review::SurrealReviewRepository;
pub use spot::SurrealSpotRepository;
