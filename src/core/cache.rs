use crate::core::error::ConversionError;
use crate::core::rates::{RateSource, RateTable};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, warn};

struct CachedTable {
    table: Arc<RateTable>,
    stored_at: Instant,
}

/// Single-slot rate cache: holds the table of the last base that was fetched.
///
/// A request for the held base is served without touching the source. Any
/// other base replaces the slot wholesale on success and leaves it untouched
/// on failure. The slot lock is held across the fetch so concurrent callers
/// never interleave fetch and replace.
pub struct RateCache<S: RateSource> {
    source: S,
    slot: Mutex<Option<CachedTable>>,
    max_age: Option<Duration>,
}

impl<S: RateSource> RateCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            slot: Mutex::new(None),
            max_age: None,
        }
    }

    /// Treat a held table older than `max_age` as absent.
    pub fn with_max_age(mut self, max_age: Option<Duration>) -> Self {
        self.max_age = max_age;
        self
    }

    pub async fn get_rates(&self, base: &str) -> Result<Arc<RateTable>, ConversionError> {
        let mut slot = self.slot.lock().await;
        if let Some(cached) = slot.as_ref() {
            if cached.table.base() == base && self.is_fresh(cached) {
                debug!("Cache HIT for base: {}", base);
                return Ok(Arc::clone(&cached.table));
            }
        }

        debug!("Cache MISS for base: {}", base);
        match self.source.fetch_rates(base).await {
            Ok(table) => {
                let table = Arc::new(table);
                debug!("Cache PUT for base: {} ({} rates)", base, table.len());
                *slot = Some(CachedTable {
                    table: Arc::clone(&table),
                    stored_at: Instant::now(),
                });
                Ok(table)
            }
            Err(e) => {
                warn!(%base, error = %e, "Rate fetch failed, keeping previous table");
                Err(ConversionError::FetchFailed {
                    base: base.to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }

    /// The held table whatever its base, if any and still fresh.
    pub async fn current(&self) -> Option<Arc<RateTable>> {
        let slot = self.slot.lock().await;
        slot.as_ref()
            .filter(|cached| self.is_fresh(cached))
            .map(|cached| Arc::clone(&cached.table))
    }

    fn is_fresh(&self, cached: &CachedTable) -> bool {
        match self.max_age {
            Some(max_age) => cached.stored_at.elapsed() <= max_age,
            None => true,
        }
    }
}
