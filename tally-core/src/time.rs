//! Ingestion clock: "today" in a user's time zone.

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;

use crate::error::IngestError;

pub const DEFAULT_TIMEZONE: &str = "Asia/Kolkata";

/// Today's calendar date in an IANA tz like "Asia/Kolkata".
pub fn today_in(tz: &str) -> Result<NaiveDate, IngestError> {
    let tz: Tz = tz.parse().map_err(|_| IngestError::InvalidInput {
        message: format!("invalid timezone: {tz}"),
    })?;
    Ok(Utc::now().with_timezone(&tz).date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_today_in_known_zone() {
        let today = today_in("America/Chicago").unwrap();
        let utc = Utc::now().date_naive();
        // Chicago is never more than a day away from UTC
        assert!((utc - today).num_days().abs() <= 1);
    }

    #[test]
    fn test_today_in_rejects_unknown_zone() {
        assert!(today_in("Mars/Olympus").is_err());
    }
}
