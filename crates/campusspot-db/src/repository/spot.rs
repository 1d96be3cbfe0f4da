//! SurrealDB implementation of [`SpotRepository`].

use campusspot_core::error::CampusResult;
use campusspot_core::models::spot::{CreateSpot, NoiseLevel, Spot, UpdateSpot};
use campusspot_core::repository::SpotRepository;
use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

const ENTITY: &str = "Spot";

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct SpotRow {
    name: Option<String>,
    building: Option<String>,
    floor: Option<String>,
    has_outlet: Option<bool>,
    noise_level: Option<String>,
    likes: i64,
    created_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct SpotRowWithId {
    record_id: String,
    name: Option<String>,
    building: Option<String>,
    floor: Option<String>,
    has_outlet: Option<bool>,
    noise_level: Option<String>,
    likes: i64,
    created_at: DateTime<Utc>,
}

fn parse_noise_level(value: Option<String>) -> Result<Option<NoiseLevel>, DbError> {
    value
        .map(|s| s.parse::<NoiseLevel>().map_err(DbError::Decode))
        .transpose()
}

impl SpotRow {
    fn into_spot(self, id: Uuid) -> Result<Spot, DbError> {
        Ok(Spot {
            id,
            name: self.name,
            building: self.building,
            floor: self.floor,
            has_outlet: self.has_outlet,
            noise_level: parse_noise_level(self.noise_level)?,
            likes: self.likes,
            created_at: self.created_at,
        })
    }
}

impl SpotRowWithId {
    fn try_into_spot(self) -> Result<Spot, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        SpotRow {
            name: self.name,
            building: self.building,
            floor: self.floor,
            has_outlet: self.has_outlet,
            noise_level: self.noise_level,
            likes: self.likes,
            created_at: self.created_at,
        }
        .into_spot(id)
    }
}

/// Collects the `SET` clauses for whichever fields are present.
fn field_assignments(
    name: bool,
    building: bool,
    floor: bool,
    has_outlet: bool,
    noise_level: bool,
) -> Vec<&'static str> {
    let mut sets = Vec::new();
    if name {
        sets.push("name = $name");
    }
    if building {
        sets.push("building = $building");
    }
    if floor {
        sets.push("floor = $floor");
    }
    if has_outlet {
        sets.push("has_outlet = $has_outlet");
    }
    if noise_level {
        sets.push("noise_level = $noise_level");
    }
    sets
}

fn not_found(id: &str) -> DbError {
    DbError::NotFound {
        entity: ENTITY.into(),
        id: id.into(),
    }
}

/// SurrealDB implementation of the Spot repository.
#[derive(Clone)]
pub struct SurrealSpotRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealSpotRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> SpotRepository for SurrealSpotRepository<C> {
    async fn list(&self) -> CampusResult<Vec<Spot>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * \
                 FROM spot ORDER BY created_at DESC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SpotRowWithId> = result.take(0).map_err(DbError::from)?;

        let spots = rows
            .into_iter()
            .map(|row| row.try_into_spot())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(spots)
    }

    async fn create(&self, input: CreateSpot) -> CampusResult<Spot> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let mut sets = field_assignments(
            input.name.is_some(),
            input.building.is_some(),
            input.floor.is_some(),
            input.has_outlet.is_some(),
            input.noise_level.is_some(),
        );
        sets.push("likes = 0");
        sets.push("created_at = time::now()");

        let query = format!(
            "CREATE type::record('spot', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(name) = input.name {
            builder = builder.bind(("name", name));
        }
        if let Some(building) = input.building {
            builder = builder.bind(("building", building));
        }
        if let Some(floor) = input.floor {
            builder = builder.bind(("floor", floor));
        }
        if let Some(has_outlet) = input.has_outlet {
            builder = builder.bind(("has_outlet", has_outlet));
        }
        if let Some(noise_level) = input.noise_level {
            builder = builder.bind(("noise_level", noise_level.as_str()));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<SpotRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| not_found(&id_str))?;

        Ok(row.into_spot(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> CampusResult<Spot> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('spot', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SpotRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| not_found(&id_str))?;

        Ok(row.into_spot(id)?)
    }

    async fn update(&self, id: Uuid, input: UpdateSpot) -> CampusResult<Spot> {
        // Nothing to merge; still report a missing record.
        if input.is_empty() {
            return self.get_by_id(id).await;
        }

        let id_str = id.to_string();

        let sets = field_assignments(
            input.name.is_some(),
            input.building.is_some(),
            input.floor.is_some(),
            input.has_outlet.is_some(),
            input.noise_level.is_some(),
        );

        // UPDATE on a missing record id returns no rows.
        let query = format!(
            "UPDATE type::record('spot', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(name) = input.name {
            builder = builder.bind(("name", name));
        }
        if let Some(building) = input.building {
            builder = builder.bind(("building", building));
        }
        if let Some(floor) = input.floor {
            builder = builder.bind(("floor", floor));
        }
        if let Some(has_outlet) = input.has_outlet {
            builder = builder.bind(("has_outlet", has_outlet));
        }
        if let Some(noise_level) = input.noise_level {
            builder = builder.bind(("noise_level", noise_level.as_str()));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<SpotRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| not_found(&id_str))?;

        Ok(row.into_spot(id)?)
    }

    async fn delete(&self, id: Uuid) -> CampusResult<()> {
        let id_str = id.to_string();

        let result = self
            .db
            .query("DELETE type::record('spot', $id) RETURN BEFORE")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let removed: Vec<SpotRow> = result.take(0).map_err(DbError::from)?;
        if removed.is_empty() {
            return Err(not_found(&id_str).into());
        }

        Ok(())
    }
}
