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

//! The per-target unit that times, forwards, and reports calls.

use crate::metrics::registry::MetricsRegistry;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use vigil_core::{CallArguments, Dispatch, DispatchResult, RequestRecord, Stopwatch};

/// Times each forwarded call and reports it to the bound registry.
///
/// The interceptor is a strict pass-through observer: arguments and return
/// values flow through unmodified, and a delegate failure is returned exactly
/// as raised, with no record written for that call. It holds no mutable
/// state; the target and registry references are fixed at construction, so
/// any number of threads can invoke through it in parallel.
#[derive(Debug)]
pub struct InvocationInterceptor {
    target: Arc<dyn Dispatch>,
    registry: Arc<MetricsRegistry>,
}

impl InvocationInterceptor {
    /// Binds an interceptor to a target and a registry.
    pub fn new(target: Arc<dyn Dispatch>, registry: Arc<MetricsRegistry>) -> Self {
        Self { target, registry }
    }

    /// Forwards `(method, args)` to the target, recording identity and
    /// elapsed time on success.
    ///
    /// The duration comes from a monotonic [`Stopwatch`]; the wall clock is
    /// read once, before the call, only for the record's informational start
    /// timestamp.
    pub fn invoke(&self, method: &str, args: CallArguments) -> DispatchResult {
        let start_timestamp_ms = wall_clock_ms();
        let stopwatch = Stopwatch::new();

        let value = self.target.dispatch(method, args)?;

        let api_name = format!("{}::{}", self.target.type_identity(), method);
        let record = RequestRecord::new(api_name.as_str(), start_timestamp_ms, stopwatch.elapsed_ms());
        self.registry.record(&api_name, record);
        Ok(value)
    }

    /// The wrapped target.
    pub fn target(&self) -> &Arc<dyn Dispatch> {
        &self.target
    }

    /// The registry this interceptor reports to.
    pub fn registry(&self) -> &Arc<MetricsRegistry> {
        &self.registry
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch. A pre-epoch
/// clock reads as 0; the value feeds an informational field only.
fn wall_clock_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}
