//! Output formatting for scan results.
//!
//! Three renderers over the same [`crate::duplicates::FindReport`]:
//! - [`table`]: human-readable tables (also used by the finder's verbose
//!   mode)
//! - [`json`]: full report plus summary as a single JSON document
//! - [`csv`]: flat rows, one per duplicate-file member

pub mod csv;
pub mod json;
pub mod table;

use std::time::SystemTime;

use chrono::{DateTime, SecondsFormat, Utc};

/// Render a timestamp as RFC 3339 (UTC, second precision).
pub(crate) fn rfc3339(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).to_rfc3339_opts(SecondsFormat::Secs, true)
}
