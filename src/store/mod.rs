//! Read access to the persistent transit store.
//!
//! The store is a PostGIS-backed relational database the service never
//! writes to. A handful of request-path lookups run per query; the rest of
//! the surface exists only to feed the graph loader at startup.

use crate::{graph::ServiceDay, shared::time::Time};
use chrono::Timelike;
use sqlx::postgres::{PgPool, PgPoolOptions};
use thiserror::Error;

/// Cap on rows a viewport query may return, so a wide box cannot flood
/// the response.
pub const BOX_QUERY_LIMIT: i64 = 200;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StopRow {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub stop_type: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LineRow {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub line_type: String,
    pub color: String,
    pub operator_id: i64,
    pub origin: String,
    pub destination: String,
    pub stop_count: i64,
}

#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct PatternRow {
    pub line_id: i64,
    pub direction: i16,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LineMetaRow {
    pub code: String,
    pub line_type: String,
    pub color: String,
}

#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct ProximityRow {
    pub from_id: i64,
    pub to_id: i64,
    pub meters: f64,
}

const STOP_COLUMNS: &str = "id, code, name_fr AS name, \
     ST_Y(location::geometry) AS lat, ST_X(location::geometry) AS lon, stop_type";

const LINE_COLUMNS: &str = "l.id, l.code, l.name_fr AS name, l.line_type, l.color, \
     l.operator_id, l.origin_name AS origin, l.destination_name AS destination, \
     (SELECT COUNT(DISTINCT ls.stop_id) FROM line_stops ls WHERE ls.line_id = l.id) AS stop_count";

/// Gateway over the bounded connection pool. Cloning shares the pool.
#[derive(Debug, Clone)]
pub struct StoreGateway {
    pool: PgPool,
}

impl StoreGateway {
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(16)
            .acquire_timeout(std::time::Duration::from_secs(5))
            .connect(url)
            .await?;
        Ok(Self { pool })
    }

    /// Health probe; true when a trivial query round-trips.
    pub async fn ping(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    // Request-path lookups.

    pub async fn stops_in_box(
        &self,
        min_lat: f64,
        min_lon: f64,
        max_lat: f64,
        max_lon: f64,
    ) -> Result<Vec<StopRow>, StoreError> {
        let rows = sqlx::query_as::<_, StopRow>(&format!(
            "SELECT {STOP_COLUMNS} FROM stops \
             WHERE location::geometry && ST_MakeEnvelope($1, $2, $3, $4, 4326) \
             ORDER BY id LIMIT $5"
        ))
        .bind(min_lon)
        .bind(min_lat)
        .bind(max_lon)
        .bind(max_lat)
        .bind(BOX_QUERY_LIMIT)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn stop_by_id(&self, id: i64) -> Result<Option<StopRow>, StoreError> {
        let row = sqlx::query_as::<_, StopRow>(&format!(
            "SELECT {STOP_COLUMNS} FROM stops WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn list_lines(&self) -> Result<Vec<LineRow>, StoreError> {
        let rows = sqlx::query_as::<_, LineRow>(&format!(
            "SELECT {LINE_COLUMNS} FROM lines l ORDER BY l.id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn line_by_id(&self, id: i64) -> Result<Option<LineRow>, StoreError> {
        let row = sqlx::query_as::<_, LineRow>(&format!(
            "SELECT {LINE_COLUMNS} FROM lines l WHERE l.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn stops_on_line(
        &self,
        line_id: i64,
        direction: i16,
    ) -> Result<Vec<StopRow>, StoreError> {
        let rows = sqlx::query_as::<_, StopRow>(
            "SELECT s.id, s.code, s.name_fr AS name, \
                    ST_Y(s.location::geometry) AS lat, ST_X(s.location::geometry) AS lon, \
                    s.stop_type \
             FROM stops s \
             JOIN line_stops ls ON ls.stop_id = s.id \
             WHERE ls.line_id = $1 AND ls.direction = $2 \
             ORDER BY ls.stop_sequence",
        )
        .bind(line_id)
        .bind(direction)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn lines_serving_stop(&self, stop_id: i64) -> Result<Vec<LineRow>, StoreError> {
        let rows = sqlx::query_as::<_, LineRow>(&format!(
            "SELECT DISTINCT {LINE_COLUMNS} FROM lines l \
             JOIN line_stops ls ON ls.line_id = l.id \
             WHERE ls.stop_id = $1 \
             ORDER BY l.id"
        ))
        .bind(stop_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // Loader dump queries. These run once at startup; any failure here is
    // fatal to the process.

    pub async fn list_stops(&self) -> Result<Vec<StopRow>, StoreError> {
        let rows = sqlx::query_as::<_, StopRow>(&format!(
            "SELECT {STOP_COLUMNS} FROM stops ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn pattern_list(&self) -> Result<Vec<PatternRow>, StoreError> {
        let rows = sqlx::query_as::<_, PatternRow>(
            "SELECT DISTINCT line_id, direction FROM line_stops ORDER BY line_id, direction",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn stops_of_pattern(
        &self,
        line_id: i64,
        direction: i16,
    ) -> Result<Vec<i64>, StoreError> {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT stop_id FROM line_stops \
             WHERE line_id = $1 AND direction = $2 \
             ORDER BY stop_sequence",
        )
        .bind(line_id)
        .bind(direction)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }

    pub async fn line_meta(&self, line_id: i64) -> Result<Option<LineMetaRow>, StoreError> {
        let row = sqlx::query_as::<_, LineMetaRow>(
            "SELECT code, line_type, color FROM lines WHERE id = $1",
        )
        .bind(line_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// First-stop departures of one pattern for one service day, in
    /// timetable order.
    pub async fn schedules_for_first_stop(
        &self,
        line_id: i64,
        direction: i16,
        stop_id: i64,
        service: ServiceDay,
    ) -> Result<Vec<Time>, StoreError> {
        let times = sqlx::query_scalar::<_, chrono::NaiveTime>(
            "SELECT departure_time FROM schedules \
             WHERE line_id = $1 AND direction = $2 AND stop_id = $3 AND day_type = $4 \
             ORDER BY departure_time",
        )
        .bind(line_id)
        .bind(direction)
        .bind(stop_id)
        .bind(service.as_str())
        .fetch_all(&self.pool)
        .await?;
        Ok(times
            .into_iter()
            .map(|t| Time::from_seconds(t.num_seconds_from_midnight()))
            .collect())
    }

    /// Every ordered pair of distinct stops within `radius_m` metres of each
    /// other, with the geodesic distance between them.
    pub async fn proximity_pairs(&self, radius_m: f64) -> Result<Vec<ProximityRow>, StoreError> {
        let rows = sqlx::query_as::<_, ProximityRow>(
            "SELECT a.id AS from_id, b.id AS to_id, \
                    ST_Distance(a.location, b.location) AS meters \
             FROM stops a \
             JOIN stops b ON a.id <> b.id \
             WHERE ST_DWithin(a.location, b.location, $1) \
             ORDER BY a.id, b.id",
        )
        .bind(radius_m)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
