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

//! The immutable record of one completed invocation.

use serde::{Deserialize, Serialize};

/// Identity and timing of one successfully completed invocation.
///
/// Constructed exactly once per completed call and never mutated afterwards:
/// all fields are private and only readable through accessors.
///
/// The two time fields serve different purposes and come from different
/// clocks. `response_time_ms` is measured with a monotonic clock and is the
/// authoritative duration; `start_timestamp_ms` is a single wall-clock read
/// taken when the call began, kept for correlation with external logs, and
/// may be approximate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestRecord {
    api_name: String,
    start_timestamp_ms: u64,
    response_time_ms: u64,
}

impl RequestRecord {
    /// Creates a record for a completed invocation.
    pub fn new(
        api_name: impl Into<String>,
        start_timestamp_ms: u64,
        response_time_ms: u64,
    ) -> Self {
        Self {
            api_name: api_name.into(),
            start_timestamp_ms,
            response_time_ms,
        }
    }

    /// The call-site identity, `"<type-identity>::<method-name>"`.
    pub fn api_name(&self) -> &str {
        &self.api_name
    }

    /// Wall-clock start of the call, in milliseconds since the Unix epoch.
    pub fn start_timestamp_ms(&self) -> u64 {
        self.start_timestamp_ms
    }

    /// Elapsed time of the call in milliseconds, from a monotonic clock.
    pub fn response_time_ms(&self) -> u64 {
        self.response_time_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_exposes_its_fields() {
        let record = RequestRecord::new("Greeter::greet", 1_700_000_000_000, 5);
        assert_eq!(record.api_name(), "Greeter::greet");
        assert_eq!(record.start_timestamp_ms(), 1_700_000_000_000);
        assert_eq!(record.response_time_ms(), 5);
    }

    #[test]
    fn record_serializes_for_log_export() {
        let record = RequestRecord::new("Greeter::greet", 42, 7);

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"api_name\":\"Greeter::greet\""));
        assert!(json.contains("\"response_time_ms\":7"));

        let back: RequestRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
