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

//! Monotonic elapsed-time measurement.

use std::time::{Duration, Instant};

/// A stopwatch over [`Instant`], the monotonic clock.
///
/// Durations computed from it can never go negative, regardless of wall-clock
/// adjustments happening while the stopwatch runs.
#[derive(Debug, Clone)]
pub struct Stopwatch {
    started: Instant,
}

impl Stopwatch {
    /// Creates a stopwatch and starts it immediately.
    #[inline]
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Elapsed time since the stopwatch was started (or last restarted).
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Elapsed time in whole milliseconds.
    #[inline]
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed().as_millis() as u64
    }

    /// Resets the start point to now.
    #[inline]
    pub fn restart(&mut self) {
        self.started = Instant::now();
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn stopwatch_starts_near_zero() {
        let watch = Stopwatch::new();
        assert!(
            watch.elapsed() < Duration::from_millis(50),
            "Initial elapsed ({:?}) should be very small",
            watch.elapsed()
        );
    }

    #[test]
    fn stopwatch_elapsed_grows_past_a_sleep() {
        let watch = Stopwatch::new();
        thread::sleep(Duration::from_millis(20));

        assert!(watch.elapsed() >= Duration::from_millis(20));
        assert!(watch.elapsed_ms() >= 20);
    }

    #[test]
    fn stopwatch_restart_resets_the_origin() {
        let mut watch = Stopwatch::new();
        thread::sleep(Duration::from_millis(20));
        watch.restart();

        assert!(
            watch.elapsed() < Duration::from_millis(20),
            "Elapsed after restart ({:?}) should not include the earlier sleep",
            watch.elapsed()
        );
    }
}
