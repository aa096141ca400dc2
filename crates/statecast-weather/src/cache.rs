//! In-memory forecast cache. Nothing is written to disk.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::provider::ForecastSource;
use crate::types::{Region, RegionDataset, WeatherError};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    region: String,
    past_days: u32,
}

#[derive(Debug)]
struct CacheEntry {
    dataset: RegionDataset,
    stored_at: Instant,
}

#[derive(Debug)]
pub struct WeatherCache {
    ttl: Duration,
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
}

impl WeatherCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Fresh entry for `region` over a `past_days` window, if any.
    pub fn get(&self, region: &str, past_days: u32) -> Option<RegionDataset> {
        self.get_at(region, past_days, Instant::now())
    }

    fn get_at(&self, region: &str, past_days: u32, now: Instant) -> Option<RegionDataset> {
        let key = CacheKey {
            region: region.to_string(),
            past_days,
        };
        let mut entries = self.entries.lock();
        match entries.get(&key) {
            Some(entry) if now.duration_since(entry.stored_at) < self.ttl => {
                Some(entry.dataset.clone())
            }
            Some(_) => {
                entries.remove(&key);
                None
            }
            None => None,
        }
    }

    pub fn insert(&self, past_days: u32, dataset: RegionDataset) {
        let key = CacheKey {
            region: dataset.region.name.clone(),
            past_days,
        };
        self.entries.lock().insert(
            key,
            CacheEntry {
                dataset,
                stored_at: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

/// Wraps a source so repeated fetches within the TTL skip the network.
pub struct CachedSource<S> {
    inner: S,
    cache: WeatherCache,
}

impl<S: ForecastSource> CachedSource<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            cache: WeatherCache::new(ttl),
        }
    }
}

impl<S: ForecastSource> ForecastSource for CachedSource<S> {
    async fn fetch(&self, region: &Region) -> Result<RegionDataset, WeatherError> {
        let past_days = self.inner.past_days();
        if let Some(hit) = self.cache.get(&region.name, past_days) {
            tracing::debug!("Cache hit for {}", region.name);
            return Ok(hit);
        }

        let dataset = self.inner.fetch(region).await?;
        self.cache.insert(past_days, dataset.clone());
        tracing::debug!("Cached {} ({} entries)", region.name, self.cache.len());
        Ok(dataset)
    }

    fn past_days(&self) -> u32 {
        self.inner.past_days()
    }
}
