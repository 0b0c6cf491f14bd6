use std::collections::HashMap;

use anyhow::{anyhow, Result};

use super::handler::ActionHandler;
use super::ActionId;

/// Registry of action handlers, keyed by action identifier.
///
/// Handlers are boxed rather than shared: the pipeline owns the registry
/// exclusively and drives it from the single frame-processing path, so no
/// locking is needed. `ActionId::None` is never registered; the dispatcher
/// resolves it to a no-op before reaching the registry.
pub struct ActionRegistry {
    handlers: HashMap<ActionId, Box<dyn ActionHandler>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a handler for an action, replacing any previous one.
    pub fn register<H: ActionHandler + 'static>(&mut self, action: ActionId, handler: H) {
        if action == ActionId::None {
            log::warn!("ignoring handler {} registered for 'none'", handler.name());
            return;
        }
        self.handlers.insert(action, Box::new(handler));
    }

    pub fn contains(&self, action: ActionId) -> bool {
        self.handlers.contains_key(&action)
    }

    /// Actions with a registered handler.
    pub fn list(&self) -> Vec<ActionId> {
        self.handlers.keys().copied().collect()
    }

    /// Invoke the handler registered for `action`.
    pub fn invoke(&mut self, action: ActionId) -> Result<String> {
        let handler = self
            .handlers
            .get_mut(&action)
            .ok_or_else(|| anyhow!("no handler registered for action '{}'", action))?;
        handler.invoke()
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
