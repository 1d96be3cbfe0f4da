//! SurrealDB implementation of [`ReviewRepository`].

use campusspot_core::error::CampusResult;
use campusspot_core::models::review::{CreateReview, Review};
use campusspot_core::repository::ReviewRepository;
use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct ReviewRow {
    spot_id: String,
    rating: i64,
    comment: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct ReviewRowWithId {
    record_id: String,
    spot_id: String,
    rating: i64,
    comment: String,
    created_at: DateTime<Utc>,
}

impl ReviewRow {
    fn into_review(self, id: Uuid) -> Result<Review, DbError> {
        let rating = u8::try_from(self.rating)
            .map_err(|_| DbError::Decode(format!("rating out of range: {}", self.rating)))?;
        Ok(Review {
            id,
            spot_id: self.spot_id,
            rating,
            comment: self.comment,
            created_at: self.created_at,
        })
    }
}

impl ReviewRowWithId {
    fn try_into_review(self) -> Result<Review, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        ReviewRow {
            spot_id: self.spot_id,
            rating: self.rating,
            comment: self.comment,
            created_at: self.created_at,
        }
        .into_review(id)
    }
}

/// SurrealDB implementation of the Review repository.
#[derive(Clone)]
pub struct SurrealReviewRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealReviewRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> ReviewRepository for SurrealReviewRepository<C> {
    async fn list_by_spot(&self, spot_id: &str) -> CampusResult<Vec<Review>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * \
                 FROM review WHERE spot_id = $spot_id \
                 ORDER BY created_at DESC",
            )
            .bind(("spot_id", spot_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ReviewRowWithId> = result.take(0).map_err(DbError::from)?;

        let reviews = rows
            .into_iter()
            .map(|row| row.try_into_review())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(reviews)
    }

    async fn create(&self, input: CreateReview) -> CampusResult<Review> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('review', $id) SET \
                 spot_id = $spot_id, rating = $rating, \
                 comment = $comment, created_at = time::now()",
            )
            .bind(("id", id_str.clone()))
            .bind(("spot_id", input.spot_id))
            .bind(("rating", i64::from(input.rating)))
            .bind(("comment", input.comment))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<ReviewRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "Review".into(),
            id: id_str,
        })?;

        Ok(row.into_review(id)?)
    }
}
