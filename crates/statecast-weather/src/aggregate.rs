//! Daily summaries derived from hourly series.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::types::{DailyAggregate, HourlyRecord, RegionDataset};

#[derive(Debug, Default)]
struct Bucket {
    temperature: f64,
    humidity: f64,
    wind_speed: f64,
    count: usize,
}

/// Group hourly readings by calendar date and average each measurement.
///
/// Dates appear in the order they first occur in the series. The date of a
/// timestamp is its own date part; timestamps are already in the time zone
/// the API answered in.
pub fn daily_aggregates(hourly: &HourlyRecord) -> Vec<DailyAggregate> {
    let mut order: Vec<NaiveDate> = Vec::new();
    let mut buckets: HashMap<NaiveDate, Bucket> = HashMap::new();

    for entry in hourly.entries() {
        let date = entry.time.date();
        let bucket = buckets.entry(date).or_insert_with(|| {
            order.push(date);
            Bucket::default()
        });
        bucket.temperature += entry.temperature;
        bucket.humidity += entry.humidity;
        bucket.wind_speed += entry.wind_speed;
        bucket.count += 1;
    }

    order
        .into_iter()
        .filter_map(|date| {
            let bucket = buckets.get(&date)?;
            let n = bucket.count as f64;
            Some(DailyAggregate {
                date,
                mean_temperature: round1(bucket.temperature / n),
                mean_humidity: round1(bucket.humidity / n),
                mean_wind_speed: round1(bucket.wind_speed / n),
            })
        })
        .collect()
}

impl RegionDataset {
    /// Daily aggregates for this dataset. Recomputed on every call.
    pub fn daily(&self) -> Vec<DailyAggregate> {
        daily_aggregates(&self.hourly)
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
