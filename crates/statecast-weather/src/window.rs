//! Leading slice of an hourly series for the forecast table.

use crate::types::{HourlyEntry, HourlyRecord};

/// First `size` entries by position (all of them if there are fewer).
pub fn hourly_window(hourly: &HourlyRecord, size: usize) -> Vec<HourlyEntry> {
    hourly.entries().take(size).collect()
}
