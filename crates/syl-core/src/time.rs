//! The catalog stores `installed_at` as whole seconds since the Unix epoch.

use chrono::{DateTime, Utc};

/// Convert catalog seconds into a UTC timestamp.
///
/// Out-of-range values clamp to the epoch.
#[must_use]
pub fn from_epoch_seconds(secs: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(secs, 0).unwrap_or_default()
}

/// Current time truncated to whole seconds.
#[must_use]
pub fn now_seconds() -> i64 {
    Utc::now().timestamp()
}
