//! Review domain model.
//!
//! Reviews are append-only. `spot_id` is a plain string and is never
//! checked against the spot collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CampusError, CampusResult};

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;
pub const MAX_COMMENT_CHARS: usize = 500;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub spot_id: String,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateReview {
    pub spot_id: String,
    pub rating: u8,
    pub comment: String,
}

impl CreateReview {
    /// Checks the rating range and comment length.
    pub fn validate(&self) -> CampusResult<()> {
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(CampusError::validation(format!(
                "rating must be between {MIN_RATING} and {MAX_RATING}, got {}",
                self.rating
            )));
        }

        let chars = self.comment.chars().count();
        if chars > MAX_COMMENT_CHARS {
            return Err(CampusError::validation(format!(
                "comment must be at most {MAX_COMMENT_CHARS} characters, got {chars}"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(rating: u8, comment: &str) -> CreateReview {
        CreateReview {
            spot_id: "anything".into(),
            rating,
            comment: comment.into(),
        }
    }

    #[test]
    fn accepts_ratings_in_range() {
        for rating in MIN_RATING..=MAX_RATING {
            assert!(review(rating, "ok").validate().is_ok());
        }
    }

    #[test]
    fn rejects_out_of_range_rating() {
        assert!(matches!(
            review(0, "ok").validate(),
            Err(CampusError::Validation { .. })
        ));
        assert!(review(6, "ok").validate().is_err());
    }

    #[test]
    fn comment_limit_counts_characters_not_bytes() {
        let at_limit = "é".repeat(MAX_COMMENT_CHARS);
        assert!(review(3, &at_limit).validate().is_ok());

        let over = "a".repeat(MAX_COMMENT_CHARS + 1);
        assert!(review(3, &over).validate().is_err());
    }

    #[test]
    fn deserializes_camel_case_payload() {
        let input: CreateReview =
            serde_json::from_str(r#"{"spotId":"abc","rating":4,"comment":"Nice"}"#).unwrap();
        assert_eq!(input.spot_id, "abc");
        assert_eq!(input.rating, 4);
    }

    #[test]
    fn missing_fields_are_rejected() {
        assert!(serde_json::from_str::<CreateReview>(r#"{"spotId":"abc"}"#).is_err());
    }
}
