//! Plain-text rendering of the application state.

use std::fmt;

use chrono::NaiveDateTime;
use statecast_weather::{hourly_window, AppState, FetchStatus, RegionDataset};

#[derive(Debug, Clone, Copy)]
pub struct ViewOptions {
    pub hourly_window: usize,
    pub past_days: u32,
}

/// Renders one frame. `now` is the wall-clock time shown in the header.
pub struct View<'a> {
    pub state: &'a AppState,
    pub options: ViewOptions,
    pub now: NaiveDateTime,
}

impl fmt::Display for View<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state.status() {
            FetchStatus::Loading => return writeln!(f, "Loading..."),
            FetchStatus::Failed(error) => {
                writeln!(f, "Error fetching data: {}", error)?;
                return writeln!(f, "{}", error.user_message());
            }
            FetchStatus::Ready => {}
        }

        writeln!(f, "Weather Data Overview")?;
        writeln!(f, "Current Date & Time: {}", self.now.format("%Y-%m-%d %H:%M:%S"))?;
        if self.state.query().trim().is_empty() {
            writeln!(f, "Showing: {}", self.state.default_region())?;
        } else {
            writeln!(f, "Search: {:?}", self.state.query())?;
        }

        if self.state.selection().is_empty() {
            writeln!(f)?;
            return writeln!(f, "No results found");
        }

        for dataset in self.state.selection() {
            writeln!(f)?;
            self.region_block(f, dataset)?;
        }
        Ok(())
    }
}

impl View<'_> {
    fn region_block(&self, f: &mut fmt::Formatter<'_>, dataset: &RegionDataset) -> fmt::Result {
        writeln!(f, "== {} ==", dataset.region.name)?;
        writeln!(f)?;
        writeln!(f, "Current Weather")?;
        writeln!(f, "  Temperature: {}°C", dataset.current.temperature)?;
        writeln!(f, "  Wind Speed: {} km/h", dataset.current.wind_speed)?;

        writeln!(f)?;
        writeln!(f, "Hourly Forecast")?;
        writeln!(
            f,
            "  {:<16} | {:>16} | {:>21} | {:>17}",
            "Time", "Temperature (°C)", "Relative Humidity (%)", "Wind Speed (km/h)"
        )?;
        for row in hourly_window(&dataset.hourly, self.options.hourly_window) {
            writeln!(
                f,
                "  {:<16} | {:>16} | {:>21} | {:>17}",
                row.time.format("%Y-%m-%d %H:%M").to_string(),
                format!("{}°C", row.temperature),
                format!("{}%", row.humidity),
                format!("{} km/h", row.wind_speed),
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Past {} Days Data", self.options.past_days)?;
        writeln!(
            f,
            "  {:<10} | {:>24} | {:>20} | {:>25}",
            "Date", "Average Temperature (°C)", "Average Humidity (%)", "Average Wind Speed (km/h)"
        )?;
        for day in dataset.daily() {
            writeln!(
                f,
                "  {:<10} | {:>24} | {:>20} | {:>25}",
                day.date.format("%Y-%m-%d").to_string(),
                format!("{:.1}°C", day.mean_temperature),
                format!("{:.1}%", day.mean_humidity),
                format!("{:.1} km/h", day.mean_wind_speed),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statecast_core::NetworkError;
    use statecast_weather::{
        CurrentConditions, Event, FetchBatchError, HourlyRecord, Region, WeatherError,
        DEFAULT_REGION,
    };

    fn now() -> NaiveDateTime {
        NaiveDateTime::parse_from_str("2024-06-11T09:30", "%Y-%m-%dT%H:%M").unwrap()
    }

    fn options() -> ViewOptions {
        ViewOptions {
            hourly_window: 24,
            past_days: 10,
        }
    }

    fn dataset(name: &str, hours: usize) -> RegionDataset {
        let start = NaiveDateTime::parse_from_str("2024-06-01T00:00", "%Y-%m-%dT%H:%M").unwrap();
        RegionDataset {
            region: Region::new(name, 11.1271, 78.6569),
            current: CurrentConditions {
                temperature: 31.4,
                wind_speed: 12.2,
            },
            hourly: HourlyRecord::new(
                (0..hours)
                    .map(|h| start + chrono::Duration::hours(h as i64))
                    .collect(),
                vec![28.0; hours],
                vec![75.0; hours],
                vec![10.0; hours],
            )
            .unwrap(),
        }
    }

    fn render(state: &AppState) -> String {
        View {
            state,
            options: options(),
            now: now(),
        }
        .to_string()
    }

    #[test]
    fn test_loading() {
        let state = AppState::new(DEFAULT_REGION);
        assert_eq!(render(&state), "Loading...\n");
    }

    #[test]
    fn test_failed_shows_error_only() {
        let error = FetchBatchError::new("Goa", WeatherError::Network(NetworkError::Timeout));
        let state = AppState::new(DEFAULT_REGION).apply(Event::FetchCompleted(Err(error)));
        let out = render(&state);

        assert!(out.starts_with("Error fetching data: Goa: Request timed out"));
        assert!(!out.contains("Hourly Forecast"));
    }

    #[test]
    fn test_no_results() {
        let state = AppState::new(DEFAULT_REGION)
            .apply(Event::FetchCompleted(Ok(vec![dataset("Tamil Nadu", 48)])))
            .apply(Event::QueryChanged("zzz".into()));
        let out = render(&state);

        assert!(out.contains("Search: \"zzz\""));
        assert!(out.ends_with("No results found\n"));
    }

    #[test]
    fn test_blank_query_header_names_default_region() {
        let state = AppState::new(DEFAULT_REGION)
            .apply(Event::FetchCompleted(Ok(vec![dataset("Tamil Nadu", 48)])))
            .apply(Event::QueryChanged("   ".into()));
        let out = render(&state);

        assert!(out.contains("Showing: Tamil Nadu"));
        assert!(!out.contains("Search:"));
        assert!(out.contains("== Tamil Nadu =="));
    }

    #[test]
    fn test_region_block() {
        let state = AppState::new(DEFAULT_REGION)
            .apply(Event::FetchCompleted(Ok(vec![dataset("Tamil Nadu", 48)])));
        let out = render(&state);

        assert!(out.contains("Current Date & Time: 2024-06-11 09:30:00"));
        assert!(out.contains("== Tamil Nadu =="));
        assert!(out.contains("Temperature: 31.4°C"));
        assert!(out.contains("Wind Speed: 12.2 km/h"));
        assert!(out.contains("Past 10 Days Data"));

        // 24 hourly rows, 2 daily rows
        assert_eq!(out.lines().filter(|l| l.contains(":00 ")).count(), 24);
        assert!(out.contains("2024-06-01 23:00"));
        assert!(!out.contains("2024-06-02 00:00"));
        assert_eq!(out.matches("28.0°C").count(), 2);
    }
}
