/*!
# Adapter Registry

An id-keyed store of [`AlgorithmAdapter`]s that UI selectors are populated from.

Registration never fails: a duplicate id is logged and ignored, the first adapter stays.
Iteration follows registration order, so selectors list algorithms in a stable order.

The process-wide [`default_registry`] is built once on first use and holds all built-in
adapters.

```
use graphtrace::{algo::*, registry::*};

let registry = default_registry();
assert_eq!(registry.get("dijkstra").map(|a| a.metadata().name), Some("Dijkstra"));
assert_eq!(
    registry.failure_message("no-such-algorithm"),
    GENERIC_FAILURE_MESSAGE
);
```
*/

use std::sync::OnceLock;

use fxhash::FxHashMap;
use serde::Serialize;
use tracing::{debug, warn};

use crate::algo::*;

/// Failure message for ids that are not registered
pub const GENERIC_FAILURE_MESSAGE: &str = "The algorithm could not complete on this graph.";

/// Entry of an algorithm selector
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct AlgorithmOption {
    pub id: &'static str,
    pub name: &'static str,
    pub category: Category,
}

/// Id-keyed adapter store
#[derive(Default)]
pub struct AlgorithmRegistry {
    order: Vec<&'static str>,
    adapters: FxHashMap<&'static str, Box<dyn AlgorithmAdapter>>,
}

impl AlgorithmRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding all built-in adapters
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(BfsAdapter);
        registry.register(DfsAdapter);
        registry.register(BfsPathAdapter);
        registry.register(DfsPathAdapter);
        registry.register(DijkstraAdapter);
        registry.register(BellmanFordAdapter);
        registry.register(PrimAdapter);
        registry.register(CycleDetectionAdapter);
        registry
    }

    /// Registers `adapter` under its id and returns *true*.
    /// If the id is taken, nothing changes, a warning is logged and *false* is returned.
    pub fn register<A>(&mut self, adapter: A) -> bool
    where
        A: AlgorithmAdapter + 'static,
    {
        let id = adapter.id();
        if self.adapters.contains_key(id) {
            warn!(id, "algorithm already registered, keeping the existing adapter");
            return false;
        }

        debug!(id, "registered algorithm");
        self.order.push(id);
        self.adapters.insert(id, Box::new(adapter));
        true
    }

    /// Returns the adapter registered under `id`
    pub fn get(&self, id: &str) -> Option<&dyn AlgorithmAdapter> {
        self.adapters.get(id).map(|a| a.as_ref())
    }

    /// Returns *true* if an adapter is registered under `id`
    pub fn contains(&self, id: &str) -> bool {
        self.adapters.contains_key(id)
    }

    /// All adapters in registration order
    pub fn all(&self) -> impl Iterator<Item = &dyn AlgorithmAdapter> + '_ {
        self.order.iter().filter_map(|id| self.get(id))
    }

    /// All adapters of `category` in registration order
    pub fn by_category(
        &self,
        category: Category,
    ) -> impl Iterator<Item = &dyn AlgorithmAdapter> + '_ {
        self.all().filter(move |a| a.metadata().category == category)
    }

    /// Selector entries in registration order
    pub fn options(&self) -> Vec<AlgorithmOption> {
        self.all()
            .map(|a| {
                let metadata = a.metadata();
                AlgorithmOption {
                    id: metadata.id,
                    name: metadata.name,
                    category: metadata.category,
                }
            })
            .collect()
    }

    /// Failure message of the adapter registered under `id`, or [`GENERIC_FAILURE_MESSAGE`]
    pub fn failure_message(&self, id: &str) -> &'static str {
        self.get(id)
            .map_or(GENERIC_FAILURE_MESSAGE, |a| a.metadata().failure_message)
    }

    /// Number of registered adapters
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns *true* if no adapter is registered
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Removes all adapters
    pub fn clear(&mut self) {
        self.order.clear();
        self.adapters.clear();
    }
}

/// The process-wide registry with all built-in adapters
pub fn default_registry() -> &'static AlgorithmRegistry {
    static REGISTRY: OnceLock<AlgorithmRegistry> = OnceLock::new();
    REGISTRY.get_or_init(AlgorithmRegistry::with_defaults)
}
