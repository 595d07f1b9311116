//! In-memory service container.

use super::{SERVICE_CONTAINER, ServiceLocator, SharedService};
use crate::ServiceError;
use std::any::Any;
use std::collections::BTreeMap;
use std::sync::{Arc, Weak};

/// Collects services before the container is frozen.
#[derive(Default)]
pub struct ContainerBuilder {
    services: BTreeMap<String, SharedService>,
}

impl ContainerBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an owned service under `name`.
    #[must_use]
    pub fn register<T: Any + Send + Sync>(self, name: impl Into<String>, service: T) -> Self {
        self.register_shared(name, Arc::new(service))
    }

    /// Register an already shared service under `name`. A later registration
    /// under the same name replaces the earlier one.
    #[must_use]
    pub fn register_shared<T: Any + Send + Sync>(
        mut self,
        name: impl Into<String>,
        service: Arc<T>,
    ) -> Self {
        let name = name.into();
        if name == SERVICE_CONTAINER {
            tracing::warn!("Ignoring registration under reserved service name '{}'", name);
            return self;
        }
        self.services.insert(name, service);
        self
    }

    /// Freeze the builder into a shareable container.
    #[must_use]
    pub fn build(self) -> Arc<Container> {
        let services = self.services;
        Arc::new_cyclic(|this| Container {
            services,
            this: this.clone(),
        })
    }
}

/// Fail-fast service locator over a fixed set of services.
///
/// The `container` key always resolves to the container itself. It is held
/// weakly so the container does not own itself.
pub struct Container {
    services: BTreeMap<String, SharedService>,
    this: Weak<Container>,
}

impl Container {
    /// Check whether `name` resolves to a service.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        name == SERVICE_CONTAINER || self.services.contains_key(name)
    }

    /// Registered service names, in order. The implicit `container` entry is
    /// not listed.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.services.keys().map(String::as_str)
    }

    /// Number of explicitly registered services.
    #[must_use]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Check if no services are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl ServiceLocator for Container {
    fn get(&self, name: &str) -> Result<SharedService, ServiceError> {
        if name == SERVICE_CONTAINER {
            return self
                .this
                .upgrade()
                .map(|container| container as SharedService)
                .ok_or_else(|| ServiceError::Unavailable(name.to_string()));
        }

        self.services
            .get(name)
            .cloned()
            .ok_or_else(|| ServiceError::NotRegistered(name.to_string()))
    }

    fn has(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("services", &self.services.keys().collect::<Vec<_>>())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{Logger, SERVICE_LOGGER, fetch};

    #[test]
    fn container_resolves_itself() {
        let container = ContainerBuilder::new()
            .register(SERVICE_LOGGER, Logger::new("boot"))
            .build();

        let this: Arc<Container> = fetch(container.as_ref(), SERVICE_CONTAINER).expect("self");
        assert!(Arc::ptr_eq(&this, &container));
        assert!(this.contains(SERVICE_LOGGER));
    }

    #[test]
    fn reserved_name_cannot_be_overridden() {
        let container = ContainerBuilder::new()
            .register(SERVICE_CONTAINER, Logger::new("impostor"))
            .build();

        assert!(container.is_empty());
        assert!(fetch::<Container>(container.as_ref(), SERVICE_CONTAINER).is_ok());
    }

    #[test]
    fn unknown_name_fails_fast() {
        let container = ContainerBuilder::new().build();
        assert!(!container.has("missing"));
        assert_eq!(
            container.get("missing").err(),
            Some(ServiceError::NotRegistered("missing".to_string()))
        );
    }

    #[test]
    fn names_are_sorted() {
        let container = ContainerBuilder::new()
            .register("output", 1u8)
            .register("config", 2u8)
            .build();
        assert_eq!(container.names().collect::<Vec<_>>(), vec!["config", "output"]);
        assert_eq!(container.len(), 2);
    }
}
