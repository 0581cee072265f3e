//! Persisted prediction history.

mod history;
mod record;

pub use history::{HistoryLog, HistoryStore};
pub use record::{HistoryRow, PredictionRecord, COLUMNS, REQUIRED_COLUMNS};

/// Version written into the `Schema Version` column of new rows.
pub const SCHEMA_VERSION: u32 = 2;
/// Rows from files predating the `Schema Version` column.
pub const LEGACY_SCHEMA_VERSION: u32 = 1;
