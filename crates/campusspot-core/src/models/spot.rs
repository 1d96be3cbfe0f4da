//! Study spot domain model.
//!
//! A spot is a place on campus to study: a named location inside a
//! building, with outlet availability and a rough noise level. Every
//! descriptive field is optional because clients may submit partial
//! payloads.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoiseLevel {
    Quiet,
    Moderate,
    Noisy,
}

impl NoiseLevel {
    pub const ALL: [NoiseLevel; 3] = [NoiseLevel::Quiet, NoiseLevel::Moderate, NoiseLevel::Noisy];

    pub fn as_str(&self) -> &'static str {
        match self {
            NoiseLevel::Quiet => "quiet",
            NoiseLevel::Moderate => "moderate",
            NoiseLevel::Noisy => "noisy",
        }
    }
}

impl fmt::Display for NoiseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoiseLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quiet" => Ok(NoiseLevel::Quiet),
            "moderate" => Ok(NoiseLevel::Moderate),
            "noisy" => Ok(NoiseLevel::Noisy),
            other => Err(format!("unknown noise level: {other}")),
        }
    }
}

/// A stored study spot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Spot {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_outlet: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noise_level: Option<NoiseLevel>,
    /// Always 0 at creation; no operation increments it.
    pub likes: i64,
    pub created_at: DateTime<Utc>,
}

/// Fields accepted when creating a spot. Any subset may be present.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateSpot {
    pub name: Option<String>,
    pub building: Option<String>,
    pub floor: Option<String>,
    pub has_outlet: Option<bool>,
    pub noise_level: Option<NoiseLevel>,
}

/// Fields merged into an existing spot. `None` leaves the stored value
/// unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSpot {
    pub name: Option<String>,
    pub building: Option<String>,
    pub floor: Option<String>,
    pub has_outlet: Option<bool>,
    pub noise_level: Option<NoiseLevel>,
}

impl UpdateSpot {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.building.is_none()
            && self.floor.is_none()
            && self.has_outlet.is_none()
            && self.noise_level.is_none()
    }
}
