//! Application state and the events that move it.
//!
//! `AppState::apply` is a pure transition: it consumes the old state and
//! returns the new one, so it can be driven from tests without a terminal.

use std::sync::Arc;

use crate::filter;
use crate::types::{FetchBatchError, RegionDataset};

#[derive(Debug, Clone, PartialEq)]
pub enum FetchStatus {
    Loading,
    Ready,
    Failed(FetchBatchError),
}

#[derive(Debug, Clone)]
pub enum Event {
    /// A fetch cycle began
    FetchStarted,
    /// A fetch cycle finished, all-or-nothing
    FetchCompleted(Result<Vec<RegionDataset>, FetchBatchError>),
    /// The search text changed
    QueryChanged(String),
    /// Clear the search text; does not fetch again
    Refresh,
}

#[derive(Debug, Clone)]
pub struct AppState {
    datasets: Vec<Arc<RegionDataset>>,
    query: String,
    selection: Vec<Arc<RegionDataset>>,
    status: FetchStatus,
    default_region: String,
}

impl AppState {
    /// Startup state: nothing loaded, a fetch is pending.
    pub fn new(default_region: impl Into<String>) -> Self {
        Self {
            datasets: Vec::new(),
            query: String::new(),
            selection: Vec::new(),
            status: FetchStatus::Loading,
            default_region: default_region.into(),
        }
    }

    pub fn apply(self, event: Event) -> Self {
        match event {
            Event::FetchStarted => Self {
                status: FetchStatus::Loading,
                ..self
            },
            Event::FetchCompleted(Ok(datasets)) => {
                let datasets: Vec<_> = datasets.into_iter().map(Arc::new).collect();
                let selection = filter::select(&datasets, &self.query, &self.default_region);
                Self {
                    datasets,
                    selection,
                    status: FetchStatus::Ready,
                    ..self
                }
            }
            Event::FetchCompleted(Err(error)) => Self {
                status: FetchStatus::Failed(error),
                ..self
            },
            Event::QueryChanged(query) => {
                let selection = filter::select(&self.datasets, &query, &self.default_region);
                Self {
                    query,
                    selection,
                    ..self
                }
            }
            Event::Refresh => {
                let selection = filter::select(&self.datasets, "", &self.default_region);
                Self {
                    query: String::new(),
                    selection,
                    ..self
                }
            }
        }
    }

    pub fn datasets(&self) -> &[Arc<RegionDataset>] {
        &self.datasets
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selection(&self) -> &[Arc<RegionDataset>] {
        &self.selection
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn default_region(&self) -> &str {
        &self.default_region
    }
}
