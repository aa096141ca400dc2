//! Weather pipeline for Statecast
//!
//! Fetches Open-Meteo forecasts for a fixed region catalog, derives daily
//! summaries and selects what to display from a search query.

pub mod aggregate;
pub mod cache;
pub mod catalog;
pub mod fetcher;
pub mod filter;
pub mod provider;
pub mod state;
pub mod types;
pub mod window;

pub use aggregate::daily_aggregates;
pub use cache::{CachedSource, WeatherCache};
pub use fetcher::ForecastFetcher;
pub use filter::{select, DEFAULT_REGION};
pub use provider::{ForecastProvider, ForecastSource};
pub use state::{AppState, Event, FetchStatus};
pub use types::*;
pub use window::hourly_window;
