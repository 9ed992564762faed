// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Concurrency-safe, append-only sink for invocation records.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use vigil_core::RequestRecord;

/// One key's append-only sequence of records. Sharing the series by `Arc`
/// lets an append hold only this key's mutex, never the registry map lock.
type Series = Arc<Mutex<Vec<RequestRecord>>>;

/// Central sink that accumulates [`RequestRecord`]s keyed by call-site
/// identity (`api_name`).
///
/// Records are grouped into per-key series; within a series, order reflects
/// completion order of the recorded invocations. Series are append-only:
/// nothing in this registry removes or rewrites a record, so the registry
/// grows without bound for as long as it lives. Whoever constructs the
/// registry owns its lifetime and with it the retention of the data.
///
/// # Concurrency
///
/// The map of series is guarded by an [`RwLock`] that is read-locked to
/// locate a series and write-locked only on first use of a key. An append
/// takes just the target series' own mutex, so recorders on distinct keys
/// never serialize against each other.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    series: RwLock<HashMap<String, Series>>,
}

impl MetricsRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            series: RwLock::new(HashMap::new()),
        }
    }

    /// Creates an empty registry pre-sized for `capacity` distinct keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            series: RwLock::new(HashMap::with_capacity(capacity)),
        }
    }

    /// Appends `record` to the series stored under `key`, creating the series
    /// on first use.
    ///
    /// Fire-and-forget: never fails and never blocks on anything but the
    /// key's own mutex.
    pub fn record(&self, key: &str, record: RequestRecord) {
        let series = self.series_for(key);
        // An append never leaves the vec in a torn state, so a guard
        // recovered from a poisoned mutex is still valid.
        let mut records = series.lock().unwrap_or_else(PoisonError::into_inner);
        records.push(record);
    }

    /// Returns a read-only copy of the series under `key`, in completion
    /// order; empty if the key is unknown.
    pub fn snapshot(&self, key: &str) -> Vec<RequestRecord> {
        let map = self.series.read().unwrap_or_else(PoisonError::into_inner);
        match map.get(key) {
            Some(series) => series
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
            None => Vec::new(),
        }
    }

    /// Returns all known `api_name` keys.
    pub fn keys(&self) -> Vec<String> {
        let map = self.series.read().unwrap_or_else(PoisonError::into_inner);
        map.keys().cloned().collect()
    }

    /// Returns the number of records stored under `key` (0 if unknown).
    pub fn count(&self, key: &str) -> usize {
        let map = self.series.read().unwrap_or_else(PoisonError::into_inner);
        match map.get(key) {
            Some(series) => series.lock().unwrap_or_else(PoisonError::into_inner).len(),
            None => 0,
        }
    }

    /// Returns the number of distinct keys known to the registry.
    pub fn key_count(&self) -> usize {
        let map = self.series.read().unwrap_or_else(PoisonError::into_inner);
        map.len()
    }

    /// Returns `true` if no record has ever been submitted.
    pub fn is_empty(&self) -> bool {
        self.key_count() == 0
    }

    /// Looks up the series for `key`, creating it on first use. The entry API
    /// resolves concurrent first-use of the same key to a single series.
    fn series_for(&self, key: &str) -> Series {
        {
            let map = self.series.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(series) = map.get(key) {
                return Arc::clone(series);
            }
        }

        let mut map = self.series.write().unwrap_or_else(PoisonError::into_inner);
        let series = map.entry(key.to_string()).or_insert_with(|| {
            log::trace!("[MetricsRegistry] New series for key: {key}");
            Arc::new(Mutex::new(Vec::new()))
        });
        Arc::clone(series)
    }
}
