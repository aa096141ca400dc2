//! Batch fetch across all regions with fail-fast semantics.

use std::sync::Arc;

use statecast_core::NetworkError;
use tokio::task::JoinSet;
use tracing::instrument;

use crate::provider::ForecastSource;
use crate::types::{FetchBatchError, Region, RegionDataset, WeatherError};

#[derive(Debug)]
pub struct ForecastFetcher<S> {
    source: Arc<S>,
}

impl<S> Clone for ForecastFetcher<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<S: ForecastSource> ForecastFetcher<S> {
    pub fn new(source: S) -> Self {
        Self {
            source: Arc::new(source),
        }
    }

    /// Fetch every region concurrently.
    ///
    /// Succeeds only if every request succeeds; the result is in `regions` order.
    /// The first failure aborts the outstanding requests and is returned as-is.
    #[instrument(skip_all, fields(regions = regions.len()))]
    pub async fn fetch_all(&self, regions: &[Region]) -> Result<Vec<RegionDataset>, FetchBatchError> {
        let mut tasks = JoinSet::new();

        for (index, region) in regions.iter().enumerate() {
            let source = Arc::clone(&self.source);
            let region = region.clone();
            tasks.spawn(async move {
                let result = source.fetch(&region).await;
                (index, region.name, result)
            });
        }

        let mut slots: Vec<Option<RegionDataset>> = vec![None; regions.len()];

        while let Some(joined) = tasks.join_next().await {
            let (index, name, result) = match joined {
                Ok(done) => done,
                Err(e) => {
                    tasks.abort_all();
                    tracing::error!("Forecast task failed to complete: {}", e);
                    return Err(FetchBatchError::new(
                        "unknown",
                        WeatherError::Network(NetworkError::ConnectionFailed(e.to_string())),
                    ));
                }
            };

            match result {
                Ok(dataset) => slots[index] = Some(dataset),
                Err(cause) => {
                    tasks.abort_all();
                    tracing::error!("Forecast fetch for {} failed: {}", name, cause);
                    return Err(FetchBatchError::new(name, cause));
                }
            }
        }

        let datasets: Vec<RegionDataset> = slots.into_iter().flatten().collect();
        tracing::info!("Fetched forecasts for {} regions", datasets.len());
        Ok(datasets)
    }
}
