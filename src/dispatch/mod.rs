//! Action dispatch.
//!
//! The dispatcher resolves a confirmed gesture event to a named action
//! identifier through the user's mapping, then invokes the registered
//! handler for that identifier. It performs no OS calls itself and never
//! treats a handler failure as fatal: the outcome of every dispatch is a
//! plain `ActionResult` the caller can log and drop.

mod handler;
mod handlers;
mod registry;

use serde::{Deserialize, Serialize};

pub use handler::ActionHandler;
pub use handlers::{
    default_registry, AppLaunchHandler, ScreenshotHandler, ScriptHandler, StubHandler,
};
pub use registry::ActionRegistry;

use crate::config::GestureMapping;
use crate::stabilize::GestureEvent;

/// Named host-system action a gesture can be bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionId {
    OpenPhotos,
    OpenNotes,
    OpenCalendar,
    TakeScreenshot,
    TurnMusic,
    /// Explicitly bound to nothing; dispatch resolves to a no-op.
    None,
}

impl ActionId {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionId::OpenPhotos => "open_photos",
            ActionId::OpenNotes => "open_notes",
            ActionId::OpenCalendar => "open_calendar",
            ActionId::TakeScreenshot => "take_screenshot",
            ActionId::TurnMusic => "turn_music",
            ActionId::None => "none",
        }
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of dispatching one confirmed event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionResult {
    /// The handler ran; carries its short status string.
    Performed { action: ActionId, status: String },
    /// The event's label is unmapped or mapped to `none`. Not an error.
    NoOp,
    /// The handler (or registry lookup) failed. Reported, never propagated.
    Failed { action: ActionId, error: String },
}

impl ActionResult {
    pub fn is_noop(&self) -> bool {
        matches!(self, ActionResult::NoOp)
    }
}

/// Resolve a confirmed event to an action and invoke its handler.
///
/// Lookup order: event label -> gesture identifier -> configured action
/// identifier -> registered handler. Any break in that chain short of the
/// handler yields `NoOp`; a mapped action with no registered handler, or a
/// handler error, yields `Failed`.
pub fn dispatch(
    event: &GestureEvent,
    mapping: &GestureMapping,
    registry: &mut ActionRegistry,
) -> ActionResult {
    let Some(key) = event.label.mapping_key() else {
        return ActionResult::NoOp;
    };
    let Some(action) = mapping.action_for(key) else {
        return ActionResult::NoOp;
    };
    if action == ActionId::None {
        return ActionResult::NoOp;
    }

    match registry.invoke(action) {
        Ok(status) => {
            log::info!("action {}: {}", action, status);
            ActionResult::Performed { action, status }
        }
        Err(err) => {
            log::warn!("action {} failed: {:#}", action, err);
            ActionResult::Failed {
                action,
                error: format!("{:#}", err),
            }
        }
    }
}
