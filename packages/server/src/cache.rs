//! Memoization of the last fetch result.
//!
//! One user interaction triggers one fetch cycle; the dashboard changes
//! filters far more often than the source data changes, so the last
//! cleaned result is kept keyed by the exact fetch filter set. Any
//! change to a filter value misses the cache and triggers a fresh
//! fetch. This is an optimization only; correctness never depends on a
//! hit.

use std::sync::Arc;

use fire_map_source::FetchOptions;
use fire_map_source_models::{CleanReport, IncidentRecord};

/// A cached cleaning result for one fetch filter set.
struct CachedFetch {
    options: FetchOptions,
    records: Arc<Vec<IncidentRecord>>,
    clean: CleanReport,
}

/// Single-slot memoization of the last fetch.
#[derive(Default)]
pub struct FetchCache {
    last: Option<CachedFetch>,
}

impl FetchCache {
    /// Creates an empty cache.
    #[must_use]
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Returns the cached result for exactly these options, if present.
    #[must_use]
    pub fn get(&self, options: &FetchOptions) -> Option<(Arc<Vec<IncidentRecord>>, CleanReport)> {
        self.last
            .as_ref()
            .filter(|cached| cached.options == *options)
            .map(|cached| (Arc::clone(&cached.records), cached.clean))
    }

    /// Replaces the cached result. The previous entry, if any, is
    /// discarded, since only the active filter set is worth keeping.
    pub fn store(
        &mut self,
        options: FetchOptions,
        records: Arc<Vec<IncidentRecord>>,
        clean: CleanReport,
    ) {
        self.last = Some(CachedFetch {
            options,
            records,
            clean,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(department: Option<&str>) -> FetchOptions {
        FetchOptions {
            department: department.map(String::from),
            ..FetchOptions::default()
        }
    }

    #[test]
    fn hit_requires_identical_options() {
        let mut cache = FetchCache::new();
        cache.store(
            options(Some("Boyacá")),
            Arc::new(Vec::new()),
            CleanReport::default(),
        );

        assert!(cache.get(&options(Some("Boyacá"))).is_some());
        assert!(cache.get(&options(Some("Casanare"))).is_none());
        assert!(cache.get(&options(None)).is_none());
    }

    #[test]
    fn any_filter_change_invalidates() {
        let mut cache = FetchCache::new();
        cache.store(options(None), Arc::new(Vec::new()), CleanReport::default());
        assert!(cache.get(&options(None)).is_some());

        let mut changed = options(None);
        changed.limit = Some(100);
        assert!(cache.get(&changed).is_none());

        // Storing the new key evicts the old one.
        cache.store(changed.clone(), Arc::new(Vec::new()), CleanReport::default());
        assert!(cache.get(&options(None)).is_none());
        assert!(cache.get(&changed).is_some());
    }
}
