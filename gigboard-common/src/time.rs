//! Timestamp utilities
//!
//! Aggregation functions never read the clock themselves; handlers grab
//! one reference instant here and pass it down, so a single request sees
//! a consistent "now".

use chrono::{DateTime, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}
