//! Parameterized read queries over the `measurement` and `station` tables.
//!
//! Every function takes a connection borrowed from the request's scoped
//! `PoolConnection`; nothing here writes.

use chrono::NaiveDate;
use sqlx::SqliteConnection;

use super::models::{Measurement, Station, TemperatureStats};

/// All measurements on or after `since`, in storage order.
pub async fn precipitation_since(
    conn: &mut SqliteConnection,
    since: NaiveDate,
) -> Result<Vec<Measurement>, sqlx::Error> {
    sqlx::query_as::<_, Measurement>(
        "SELECT id, station, date, prcp, tobs
         FROM measurement
         WHERE date >= ?1",
    )
    .bind(since)
    .fetch_all(conn)
    .await
}

/// Codes of all stations, in storage order.
pub async fn list_station_codes(conn: &mut SqliteConnection) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>("SELECT station FROM station")
        .fetch_all(conn)
        .await
}

/// Number of stations. Used by the health check.
pub async fn count_stations(conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM station")
        .fetch_one(conn)
        .await
}

/// Look up a station by its numeric row id.
pub async fn get_station(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<Station>, sqlx::Error> {
    sqlx::query_as::<_, Station>(
        "SELECT id, station, name, latitude, longitude, elevation
         FROM station
         WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(conn)
    .await
}

/// Measurements from one station on or after `since`, in storage order.
pub async fn temperature_observations_since(
    conn: &mut SqliteConnection,
    station_code: &str,
    since: NaiveDate,
) -> Result<Vec<Measurement>, sqlx::Error> {
    sqlx::query_as::<_, Measurement>(
        "SELECT id, station, date, prcp, tobs
         FROM measurement
         WHERE date >= ?1 AND station = ?2",
    )
    .bind(since)
    .bind(station_code)
    .fetch_all(conn)
    .await
}

/// MIN/AVG/MAX of `tobs` over `start <= date [<= end]`.
///
/// SQL aggregates over an empty set yield a single row of NULLs, which
/// surfaces as `None` in every field.
pub async fn temperature_stats(
    conn: &mut SqliteConnection,
    start: NaiveDate,
    end: Option<NaiveDate>,
) -> Result<TemperatureStats, sqlx::Error> {
    sqlx::query_as::<_, TemperatureStats>(
        "SELECT MIN(tobs) AS min, AVG(tobs) AS avg, MAX(tobs) AS max
         FROM measurement
         WHERE date >= ?1 AND (?2 IS NULL OR date <= ?2)",
    )
    .bind(start)
    .bind(end)
    .fetch_one(conn)
    .await
}
