//! Custom event hook table.

use std::collections::BTreeMap;

/// Maps custom event names to the handlers registered for them.
///
/// Handlers are identified by name and kept in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookManager {
    hooks: BTreeMap<String, Vec<String>>,
}

impl HookManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `event`.
    #[must_use]
    pub fn with_hook(mut self, event: impl Into<String>, handler: impl Into<String>) -> Self {
        self.hooks
            .entry(event.into())
            .or_default()
            .push(handler.into());
        self
    }

    /// Handlers registered for `event`, in registration order.
    #[must_use]
    pub fn custom_event_handlers(&self, event: &str) -> &[String] {
        self.hooks.get(event).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every event with at least one handler.
    pub fn events(&self) -> impl Iterator<Item = &str> {
        self.hooks.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handlers_keep_registration_order() {
        let hooks = HookManager::new()
            .with_hook("pre-command", "audit")
            .with_hook("pre-command", "lock")
            .with_hook("post-command", "unlock");

        assert_eq!(hooks.custom_event_handlers("pre-command"), ["audit", "lock"]);
        assert!(hooks.custom_event_handlers("unknown").is_empty());
        assert_eq!(hooks.events().collect::<Vec<_>>(), vec!["post-command", "pre-command"]);
    }
}
