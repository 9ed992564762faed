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

//! The uniform call surface an interceptable object exposes.
//!
//! Rust has no runtime reflection, so an object that wants its calls
//! intercepted routes them through a single `(method, arguments) -> result`
//! entry point instead of a generated per-interface stub. The [`Dispatch`]
//! trait is that entry point: it names the implementing type, enumerates the
//! methods it exposes (its capability set), and executes one of them on
//! demand. A proxy that implements `Dispatch` over the same capability set is
//! a drop-in stand-in for the object it wraps.

use serde_json::Value;
use std::fmt::{self, Debug, Display};

/// Arguments for a dispatched call, in declaration order.
pub type CallArguments = Vec<Value>;

/// A failure raised by the dispatched method itself.
///
/// Boxed so the original error kind stays downcastable through any number of
/// forwarding layers; an interceptor returns this value untouched.
pub type DispatchError = Box<dyn std::error::Error + Send + Sync>;

/// Result of a dispatched call.
pub type DispatchResult = Result<Value, DispatchError>;

/// The uniform call surface of an object whose invocations can be
/// intercepted.
///
/// Implementors translate `(method, args)` pairs into real method calls on
/// themselves. The contract an implementation must uphold:
///
/// - [`type_identity`](Dispatch::type_identity) is stable for the lifetime of
///   the object and shared by all instances of the same type.
/// - [`capability_set`](Dispatch::capability_set) lists every method name
///   that [`dispatch`](Dispatch::dispatch) accepts; an empty slice means the
///   object exposes nothing to proxy.
/// - [`dispatch`](Dispatch::dispatch) with a name outside the capability set
///   returns an error (see [`unknown_method`]) rather than panicking.
pub trait Dispatch: Send + Sync + Debug + 'static {
    /// Stable identity of the implementing type (e.g. `"Greeter"`).
    fn type_identity(&self) -> &'static str;

    /// The capability set: names of the methods reachable through
    /// [`dispatch`](Dispatch::dispatch).
    fn capability_set(&self) -> &[&'static str];

    /// Invokes `method` with `args` and returns its result.
    fn dispatch(&self, method: &str, args: CallArguments) -> DispatchResult;
}

/// Builds the standard error a [`Dispatch`] implementor returns from the
/// fallback arm of its method match.
pub fn unknown_method(identity: &'static str, method: &str) -> DispatchError {
    Box::new(UnknownMethod {
        identity,
        method: method.to_string(),
    })
}

/// A method name was dispatched that is not part of the target's capability
/// set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMethod {
    /// Identity of the target that rejected the call.
    pub identity: &'static str,
    /// The method name that was not recognized.
    pub method: String,
}

impl Display for UnknownMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown method '{}' on {}", self.method, self.identity)
    }
}

impl std::error::Error for UnknownMethod {}

/// An error that can occur while constructing a proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyError {
    /// The target exposes no capability set, so there is nothing to forward.
    UnsupportedTarget {
        /// Identity of the target that could not be wrapped.
        identity: String,
    },
}

impl Display for ProxyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProxyError::UnsupportedTarget { identity } => {
                write!(f, "Target '{identity}' exposes no capability set to proxy")
            }
        }
    }
}

impl std::error::Error for ProxyError {}
