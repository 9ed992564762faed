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

//! # Vigil Telemetry
//!
//! The runtime interception-and-metrics layer: wraps any object exposing a
//! capability set behind a proxy that transparently times every call and
//! accumulates the timings in a concurrency-safe registry. The wrapped
//! object's code and its call sites stay unchanged; callers observe identical
//! success and failure semantics, plus metrics accumulation on the success
//! path.
//!
//! The contracts live in `vigil-core`; this crate provides the central pieces
//! that act on them: [`MetricsRegistry`], [`InvocationInterceptor`], and
//! [`InterceptionProxyFactory`].

#![warn(missing_docs)]

pub mod metrics;
pub mod proxy;

pub use metrics::registry::MetricsRegistry;
pub use proxy::factory::{InterceptedProxy, InterceptionProxyFactory};
pub use proxy::interceptor::InvocationInterceptor;
