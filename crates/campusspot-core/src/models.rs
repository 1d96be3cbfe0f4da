//! Domain models for CampusSpot.

pub mod review;
pub mod spot;
