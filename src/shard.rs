//! Shard Name Resolver: validated date components to physical table names.
//!
//! Pure code, no I/O. The ingestion pipeline names each table at write time
//! and this module must reproduce those names byte for byte; there is no
//! existence probe and no fuzzy matching. A wrong name simply fails at
//! query time.
//!
//! Three naming conventions exist:
//! - per-day shards, `<monthname><DD><YYYY>` (e.g. `june082025`);
//! - per-range shards, `permit_durations_<start>_to_<end>`;
//! - one static `permit_durations` table filtered by a date window.
//!
//! Which convention an endpoint uses is fixed when its route is wired up,
//! never derived from request data.

use crate::dates::DayParts;
use crate::error::GatewayError;

/// Static table behind the filtered range scheme.
pub const PERMIT_DURATIONS_TABLE: &str = "permit_durations";

/// Registry table enumerating ingested shards. Always present.
pub const INVENTORY_TABLE: &str = "data_inventory";

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Resolved storage locator handed to the projector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryTarget {
    /// Scan one named shard table in full.
    Table(String),
    /// Scan a static table with a half-open date window, start inclusive.
    Filtered {
        table: &'static str,
        start: String,
        end: String,
    },
}

impl QueryTarget {
    /// Table name used for logging and error context.
    pub fn table_name(&self) -> &str {
        match self {
            Self::Table(name) => name,
            Self::Filtered { table, .. } => table,
        }
    }
}

/// Naming convention used by the permit range endpoints. The day-scan
/// endpoint takes a different input shape (one token, not two) and has its
/// own constructor, [`day_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeScheme {
    /// Dedicated shard per ingested range.
    NamedShard,
    /// Shared `permit_durations` table filtered on file date.
    Filtered,
}

impl RangeScheme {
    /// Map two already-validated `YYYY-MM-DD` tokens to a query target.
    pub fn target(self, start: &str, end: &str) -> QueryTarget {
        match self {
            Self::NamedShard => {
                QueryTarget::Table(format!("permit_durations_{start}_to_{end}"))
            }
            Self::Filtered => QueryTarget::Filtered {
                table: PERMIT_DURATIONS_TABLE,
                start: start.to_string(),
                end: end.to_string(),
            },
        }
    }
}

/// Per-day shard name for a validated `MMDDYYYY` token.
///
/// The day is zero-padded to two digits regardless of how the input was
/// written, so day 8 always yields `08`. Months outside 1..=12 have no
/// naming entry and fail resolution.
pub fn day_table(parts: &DayParts) -> Result<String, GatewayError> {
    let index = (parts.month as usize)
        .checked_sub(1)
        .filter(|i| *i < MONTH_NAMES.len())
        .ok_or(GatewayError::Resolution { month: parts.month })?;

    Ok(format!(
        "{name}{day:02}{year:04}",
        name = MONTH_NAMES[index],
        day = parts.day,
        year = parts.year
    ))
}
