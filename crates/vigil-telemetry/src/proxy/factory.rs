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

//! Construction of intercepted proxies.

use crate::metrics::registry::MetricsRegistry;
use crate::proxy::interceptor::InvocationInterceptor;
use std::sync::Arc;
use vigil_core::{CallArguments, Dispatch, DispatchResult, ProxyError};

/// Builds proxies that expose a target's capability set with every call
/// routed through an [`InvocationInterceptor`].
///
/// Each factory owns an [`Arc<MetricsRegistry>`] that all proxies it creates
/// report into; the registry lives for as long as someone holds it, not for
/// the life of the process. Construct with [`new`](Self::new) for a private
/// sink, or [`with_registry`](Self::with_registry) to aggregate several
/// factories (or externally created proxies) into one shared sink.
///
/// The factory only establishes the forwarding relationship. It performs no
/// timing and writes nothing to the registry.
#[derive(Debug)]
pub struct InterceptionProxyFactory {
    registry: Arc<MetricsRegistry>,
}

impl InterceptionProxyFactory {
    /// Creates a factory owning a fresh, empty registry.
    pub fn new() -> Self {
        Self {
            registry: Arc::new(MetricsRegistry::new()),
        }
    }

    /// Creates a factory reporting into an externally owned registry.
    pub fn with_registry(registry: Arc<MetricsRegistry>) -> Self {
        Self { registry }
    }

    /// The registry every proxy from this factory reports into.
    pub fn registry(&self) -> &Arc<MetricsRegistry> {
        &self.registry
    }

    /// Wraps `target` in a proxy exposing the same capability set.
    ///
    /// # Errors
    ///
    /// Returns [`ProxyError::UnsupportedTarget`] when the target's capability
    /// set is empty; no proxy is built and the registry is left untouched.
    pub fn create_proxy(&self, target: Arc<dyn Dispatch>) -> Result<InterceptedProxy, ProxyError> {
        if target.capability_set().is_empty() {
            return Err(ProxyError::UnsupportedTarget {
                identity: target.type_identity().to_string(),
            });
        }

        log::debug!(
            "[InterceptionProxyFactory] Wrapped target: {} ({} methods)",
            target.type_identity(),
            target.capability_set().len()
        );
        Ok(InterceptedProxy {
            interceptor: InvocationInterceptor::new(target, Arc::clone(&self.registry)),
        })
    }
}

impl Default for InterceptionProxyFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// A stand-in for a wrapped target: same identity, same capability set, with
/// every dispatched call timed and reported.
///
/// The proxy implements [`Dispatch`] itself, so anything programmed against
/// the trait accepts it in place of the bare target.
#[derive(Debug)]
pub struct InterceptedProxy {
    interceptor: InvocationInterceptor,
}

impl Dispatch for InterceptedProxy {
    fn type_identity(&self) -> &'static str {
        self.interceptor.target().type_identity()
    }

    fn capability_set(&self) -> &[&'static str] {
        self.interceptor.target().capability_set()
    }

    fn dispatch(&self, method: &str, args: CallArguments) -> DispatchResult {
        self.interceptor.invoke(method, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vigil_core::unknown_method;

    #[derive(Debug)]
    struct Counter;

    impl Dispatch for Counter {
        fn type_identity(&self) -> &'static str {
            "Counter"
        }

        fn capability_set(&self) -> &[&'static str] {
            &["increment", "decrement"]
        }

        fn dispatch(&self, method: &str, args: CallArguments) -> DispatchResult {
            let value = args.first().and_then(serde_json::Value::as_i64).unwrap_or(0);
            match method {
                "increment" => Ok(json!(value + 1)),
                "decrement" => Ok(json!(value - 1)),
                other => Err(unknown_method(self.type_identity(), other)),
            }
        }
    }

    /// A target exposing nothing; cannot be proxied.
    #[derive(Debug)]
    struct Opaque;

    impl Dispatch for Opaque {
        fn type_identity(&self) -> &'static str {
            "Opaque"
        }

        fn capability_set(&self) -> &[&'static str] {
            &[]
        }

        fn dispatch(&self, method: &str, _args: CallArguments) -> DispatchResult {
            Err(unknown_method(self.type_identity(), method))
        }
    }

    #[test]
    fn proxy_mirrors_identity_and_capability_set() {
        let factory = InterceptionProxyFactory::new();
        let proxy = factory.create_proxy(Arc::new(Counter)).unwrap();

        assert_eq!(proxy.type_identity(), "Counter");
        assert_eq!(proxy.capability_set(), &["increment", "decrement"]);
    }

    #[test]
    fn proxy_creation_writes_no_records() {
        let factory = InterceptionProxyFactory::new();
        factory.create_proxy(Arc::new(Counter)).unwrap();

        assert!(factory.registry().is_empty());
    }

    #[test]
    fn calls_through_the_proxy_are_recorded_per_method() {
        let factory = InterceptionProxyFactory::new();
        let proxy = factory.create_proxy(Arc::new(Counter)).unwrap();

        assert_eq!(proxy.dispatch("increment", vec![json!(1)]).unwrap(), json!(2));
        assert_eq!(proxy.dispatch("increment", vec![json!(5)]).unwrap(), json!(6));
        assert_eq!(proxy.dispatch("decrement", vec![json!(5)]).unwrap(), json!(4));

        let registry = factory.registry();
        assert_eq!(registry.count("Counter::increment"), 2);
        assert_eq!(registry.count("Counter::decrement"), 1);
    }

    #[test]
    fn target_without_capabilities_is_rejected() {
        let factory = InterceptionProxyFactory::new();

        let err = factory.create_proxy(Arc::new(Opaque)).unwrap_err();
        assert_eq!(
            err,
            ProxyError::UnsupportedTarget {
                identity: "Opaque".to_string()
            }
        );
        assert!(factory.registry().keys().is_empty());
    }

    #[test]
    fn two_proxies_can_share_one_registry() {
        let registry = Arc::new(MetricsRegistry::new());
        let factory = InterceptionProxyFactory::with_registry(Arc::clone(&registry));

        let first = factory.create_proxy(Arc::new(Counter)).unwrap();
        let second = factory.create_proxy(Arc::new(Counter)).unwrap();

        first.dispatch("increment", vec![json!(0)]).unwrap();
        second.dispatch("increment", vec![json!(0)]).unwrap();

        // Same type identity, same key: counts from both instances merge.
        assert_eq!(registry.count("Counter::increment"), 2);
    }
}
