use chrono::{NaiveDate, NaiveDateTime};
use statecast_core::{AppError, NetworkError};

/// Named geographic point in the region catalog
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Region {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }
}

/// Reading representing "now" for a region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentConditions {
    /// °C
    pub temperature: f64,
    /// km/h
    pub wind_speed: f64,
}

/// One row of an hourly series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlyEntry {
    pub time: NaiveDateTime,
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
}

/// Hourly series stored as parallel columns.
///
/// All columns have the same length; position `i` in each describes `time[i]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HourlyRecord {
    time: Vec<NaiveDateTime>,
    temperature: Vec<f64>,
    humidity: Vec<f64>,
    wind_speed: Vec<f64>,
}

impl HourlyRecord {
    /// Build a record, rejecting columns of unequal length.
    pub fn new(
        time: Vec<NaiveDateTime>,
        temperature: Vec<f64>,
        humidity: Vec<f64>,
        wind_speed: Vec<f64>,
    ) -> Result<Self, WeatherError> {
        let len = time.len();
        if temperature.len() != len || humidity.len() != len || wind_speed.len() != len {
            return Err(WeatherError::Parse(format!(
                "hourly columns differ in length (time={}, temperature={}, humidity={}, wind_speed={})",
                len,
                temperature.len(),
                humidity.len(),
                wind_speed.len()
            )));
        }

        Ok(Self {
            time,
            temperature,
            humidity,
            wind_speed,
        })
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Row view over the columns, in original order.
    pub fn entries(&self) -> impl Iterator<Item = HourlyEntry> + '_ {
        (0..self.len()).map(move |i| HourlyEntry {
            time: self.time[i],
            temperature: self.temperature[i],
            humidity: self.humidity[i],
            wind_speed: self.wind_speed[i],
        })
    }
}

/// Everything fetched for one region in one cycle
#[derive(Debug, Clone, PartialEq)]
pub struct RegionDataset {
    pub region: Region,
    pub current: CurrentConditions,
    pub hourly: HourlyRecord,
}

/// Mean readings for one calendar date, rounded to one decimal place
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    pub mean_temperature: f64,
    pub mean_humidity: f64,
    pub mean_wind_speed: f64,
}

/// Failure of a single region request
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WeatherError {
    #[error("{0}")]
    Network(#[from] NetworkError),
    #[error("Parse error: {0}")]
    Parse(String),
}

impl WeatherError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Network(e) => e.user_message(),
            Self::Parse(_) => "Received an unexpected response from the weather service.",
        }
    }
}

impl From<WeatherError> for AppError {
    fn from(e: WeatherError) -> Self {
        match e {
            WeatherError::Network(e) => AppError::Network(e),
            WeatherError::Parse(msg) => AppError::Network(NetworkError::InvalidResponse(msg)),
        }
    }
}

/// The one error a fetch cycle surfaces: the first region request that failed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{region}: {cause}")]
pub struct FetchBatchError {
    pub region: String,
    pub cause: WeatherError,
}

impl FetchBatchError {
    pub fn new(region: impl Into<String>, cause: WeatherError) -> Self {
        Self {
            region: region.into(),
            cause,
        }
    }

    pub fn user_message(&self) -> &'static str {
        self.cause.user_message()
    }
}
