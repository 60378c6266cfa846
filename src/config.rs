use chrono::{Days, NaiveDate};

/// Last measurement date in the bundled dataset snapshot.
const DEFAULT_REFERENCE_DATE: &str = "2017-08-23";
/// Last observation date used for the temperature-observation window.
const DEFAULT_TOBS_REFERENCE_DATE: &str = "2017-08-18";
const DEFAULT_WINDOW_DAYS: u64 = 365;
/// `station.id` of the most active station in the dataset snapshot.
const DEFAULT_TOBS_STATION_ID: i64 = 6;

/// Application configuration, parsed from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    /// Upper bound on pooled read-only connections.
    pub db_max_connections: u32,
    pub dataset: DatasetConfig,
}

/// Constants tied to one snapshot of the dataset.
///
/// These are fixed values, never derived from the store: the "past 12 months"
/// windows are anchored to the snapshot's last dates and the temperature
/// observations come from one pre-selected station.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetConfig {
    pub reference_date: NaiveDate,
    pub tobs_reference_date: NaiveDate,
    pub window_days: u64,
    pub tobs_station_id: i64,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            reference_date: parse_date(DEFAULT_REFERENCE_DATE),
            tobs_reference_date: parse_date(DEFAULT_TOBS_REFERENCE_DATE),
            window_days: DEFAULT_WINDOW_DAYS,
            tobs_station_id: DEFAULT_TOBS_STATION_ID,
        }
    }
}

impl DatasetConfig {
    /// First date included in the precipitation window.
    pub fn precipitation_since(&self) -> NaiveDate {
        window_start(self.reference_date, self.window_days)
    }

    /// First date included in the temperature-observation window.
    pub fn tobs_since(&self) -> NaiveDate {
        window_start(self.tobs_reference_date, self.window_days)
    }
}

fn window_start(reference: NaiveDate, days: u64) -> NaiveDate {
    reference
        .checked_sub_days(Days::new(days))
        .unwrap_or(NaiveDate::MIN)
}

fn parse_date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("date constant must be YYYY-MM-DD")
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = DatasetConfig::default();
        Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:Resources/hawaii.sqlite".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .expect("PORT must be a valid u16"),
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .expect("DB_MAX_CONNECTIONS must be a valid u32"),
            dataset: DatasetConfig {
                reference_date: std::env::var("REFERENCE_DATE")
                    .map(|v| parse_date(&v))
                    .unwrap_or(defaults.reference_date),
                tobs_reference_date: std::env::var("TOBS_REFERENCE_DATE")
                    .map(|v| parse_date(&v))
                    .unwrap_or(defaults.tobs_reference_date),
                window_days: std::env::var("WINDOW_DAYS")
                    .map(|v| v.parse().expect("WINDOW_DAYS must be a valid u64"))
                    .unwrap_or(defaults.window_days),
                tobs_station_id: std::env::var("TOBS_STATION_ID")
                    .map(|v| v.parse().expect("TOBS_STATION_ID must be a valid i64"))
                    .unwrap_or(defaults.tobs_station_id),
            },
        }
    }
}
