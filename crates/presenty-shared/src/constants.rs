use chrono::Duration;

/// Application name
pub const APP_NAME: &str = "Presenty";

/// Minutes a student is blocked from scanning after an accepted scan
pub const SCAN_COOLDOWN_MINUTES: i64 = 30;

/// Milliseconds per reported minute of remaining cooldown
pub const MILLIS_PER_MINUTE: i64 = 60_000;

/// Seconds before the scanner re-arms after a year/division mismatch
pub const MISMATCH_RESCAN_DELAY_SECS: u64 = 3;

/// Subject label used when a history record carries none
pub const UNKNOWN_SUBJECT: &str = "Unknown";

/// Wire code for a present student
pub const STATUS_PRESENT: &str = "P";

/// Wire code for an absent student
pub const STATUS_ABSENT: &str = "A";

/// Default API base URL (local backend)
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Divisions a teacher can issue codes for when nothing is configured
pub const DEFAULT_DIVISIONS: &[&str] = &["A", "B"];

/// Cooldown window as a chrono duration
pub fn scan_cooldown() -> Duration {
    Duration::minutes(SCAN_COOLDOWN_MINUTES)
}
