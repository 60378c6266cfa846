//! Shared helpers for date parsing and temperature rounding.

use chrono::NaiveDate;

use crate::errors::AppError;

/// Date format accepted in URL path segments.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a strict `YYYY-MM-DD` date from a path segment.
///
/// chrono alone also accepts single-digit months/days and signed years, so
/// the shape is checked first.
pub(crate) fn parse_iso_date(s: &str) -> Result<NaiveDate, AppError> {
    let bytes = s.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(AppError::BadRequest(format!(
            "Invalid date '{}': expected format YYYY-MM-DD",
            s
        )));
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| AppError::BadRequest(format!("Invalid date '{}': {}", s, e)))
}

/// Round to 1 decimal place. Returns None for non-finite inputs (NaN, ±Inf).
pub(crate) fn round_1dp(v: f64) -> Option<f64> {
    if !v.is_finite() {
        tracing::warn!("round_1dp received non-finite value {}, dropping", v);
        return None;
    }
    format!("{:.1}", v).parse().ok()
}

/// Round an optional aggregate to 1 decimal place.
pub(crate) fn opt_round_1dp(v: Option<f64>) -> Option<f64> {
    v.and_then(round_1dp)
}

/// Render an aggregate for the text summaries; missing values print as `null`.
pub(crate) fn display_1dp(v: Option<f64>) -> String {
    match opt_round_1dp(v) {
        Some(v) => format!("{:.1}", v),
        None => "null".to_string(),
    }
}
