//! # Services Module
//!
//! The ambient services handed to consumer objects, and the locator they are
//! fetched from.
//!
//! A [`ServiceLocator`] is a keyed store of type-erased services. The
//! [`Container`] is the in-memory implementation used by the host; it fails
//! fast on unknown names. Each service has a well-known key, listed below,
//! which is also the key the injector asks for.

mod alias;
mod config;
mod console;
mod container;
mod hooks;
mod logger;

pub use alias::{SELF_ALIAS, SiteAlias, SiteAliasManager};
pub use config::Config;
pub use console::{Input, Output, OutputAdapter, ProgressIndicator};
pub use container::{Container, ContainerBuilder};
pub use hooks::HookManager;
pub use logger::Logger;

use crate::ServiceError;
use std::any::Any;
use std::sync::Arc;

// =============================================================================
// SERVICE KEYS
// =============================================================================

pub const SERVICE_CONFIG: &str = "config";
pub const SERVICE_LOGGER: &str = "logger";
pub const SERVICE_CONTAINER: &str = "container";
pub const SERVICE_INPUT: &str = "input";
pub const SERVICE_OUTPUT: &str = "output";
pub const SERVICE_PROGRESS_INDICATOR: &str = "progressIndicator";
pub const SERVICE_HOOK_MANAGER: &str = "hookManager";
pub const SERVICE_OUTPUT_ADAPTER: &str = "outputAdapter";
pub const SERVICE_SITE_ALIAS_MANAGER: &str = "site.alias.manager";

/// A type-erased, shareable service.
pub type SharedService = Arc<dyn Any + Send + Sync>;

// =============================================================================
// SERVICE LOCATOR
// =============================================================================

/// A keyed store of ambient services.
///
/// Whether an unknown name is an error or something else is up to the
/// implementor; callers propagate whatever `get` returns.
pub trait ServiceLocator: Send + Sync {
    /// Fetch the service registered under `name`.
    fn get(&self, name: &str) -> Result<SharedService, ServiceError>;

    /// Check whether a service is available under `name`.
    fn has(&self, name: &str) -> bool {
        self.get(name).is_ok()
    }
}

/// Fetch a service and downcast it to its concrete type.
pub fn fetch<T: Any + Send + Sync>(
    locator: &dyn ServiceLocator,
    name: &str,
) -> Result<Arc<T>, ServiceError> {
    locator
        .get(name)?
        .downcast::<T>()
        .map_err(|_| ServiceError::TypeMismatch {
            name: name.to_string(),
            expected: std::any::type_name::<T>(),
        })
}

// =============================================================================
// TESTS
// =============================================================================
