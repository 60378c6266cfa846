use chrono::NaiveDate;
use sqlx::FromRow;

/// A weather station. Table `station`.
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)] // All fields populated by FromRow; coordinates are not served yet
pub struct Station {
    pub id: i64,
    /// Station code (e.g. "USC00519281"), referenced by `measurement.station`.
    pub station: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

/// One station's daily reading. Table `measurement`.
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)] // All fields populated by FromRow; some accessed only via route projections
pub struct Measurement {
    pub id: i64,
    /// Code of the reporting station.
    pub station: String,
    pub date: NaiveDate,
    /// Precipitation in inches; NULL when the station did not report it.
    pub prcp: Option<f64>,
    /// Temperature observation.
    pub tobs: f64,
}

/// MIN/AVG/MAX of `measurement.tobs` over a filtered set.
///
/// Every field is None when the filtered set is empty.
#[derive(Debug, Clone, Copy, PartialEq, FromRow)]
pub struct TemperatureStats {
    pub min: Option<f64>,
    pub avg: Option<f64>,
    pub max: Option<f64>,
}
