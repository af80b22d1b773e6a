use std::time::{SystemTime, UNIX_EPOCH};
use chrono::{DateTime, Utc};

/// Timestamps reported by Steam.
pub type ServerTime = DateTime<Utc>;

/// Converts a unix timestamp into a [`ServerTime`]. Out of range timestamps resolve to the
/// epoch.
pub fn timestamp_to_server_time(timestamp: i64) -> ServerTime {
    DateTime::from_timestamp(timestamp, 0).unwrap_or_default()
}

/// Seconds since the unix epoch on this machine.
pub fn get_system_time() -> u64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(n) => n.as_secs(),
        // should never occur
        Err(_) => 0,
    }
}
