//! Memoized tree positions per feature and density.
//!
//! The first request for a key computes the placement inside the map's entry
//! lock; every later request, from any backend or thread, gets the same
//! shared slice.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::DashMap;
use glam::DVec2;

use crate::map::FeatureId;

/// Ordered tree positions of one feature, shared between render passes.
pub type PlacementSet = Arc<[DVec2]>;

/// Cache key: the owning feature and the density its trees were placed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlacementKey {
    pub feature: FeatureId,
    density_bits: u64,
}

impl PlacementKey {
    pub fn new(feature: FeatureId, density: f64) -> Self {
        // Fold -0.0 into 0.0 so both spell the same key.
        let density = if density == 0.0 { 0.0 } else { density };
        Self {
            feature,
            density_bits: density.to_bits(),
        }
    }

    pub fn density(&self) -> f64 {
        f64::from_bits(self.density_bits)
    }
}

/// Write-once store of placement sets.
#[derive(Default)]
pub struct PlacementCache {
    entries: DashMap<PlacementKey, PlacementSet>,
    computations: AtomicUsize,
}

impl PlacementCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached set for `key`, running `compute` only on the first request.
    pub fn get_or_compute<F>(&self, key: PlacementKey, compute: F) -> PlacementSet
    where
        F: FnOnce() -> Vec<DVec2>,
    {
        if let Some(hit) = self.entries.get(&key) {
            return Arc::clone(hit.value());
        }

        let entry = self.entries.entry(key).or_insert_with(|| {
            self.computations.fetch_add(1, Ordering::Relaxed);
            compute().into()
        });
        Arc::clone(entry.value())
    }

    /// Number of placements computed so far (cache misses).
    pub fn computations(&self) -> usize {
        self.computations.load(Ordering::Relaxed)
    }
}
