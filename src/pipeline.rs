//! Frame-synchronous gesture pipeline.
//!
//! One `process_frame` call runs classification, combining, stabilization,
//! and (on confirmation) dispatch to completion before the next frame is
//! accepted. Per-frame tracker failures are downgraded, never propagated:
//! a malformed observation makes the whole frame read as "no gesture" and
//! the loop moves on, because live camera input drops out routinely
//! (occlusion, lighting, hands leaving the frame).

use std::time::Instant;

use crate::classify::{classify, combine, CombinedLabel, GeometryThresholds};
use crate::config::GestureMapping;
use crate::dispatch::{dispatch, ActionRegistry, ActionResult};
use crate::stabilize::{GestureEvent, GestureStabilizer};
use crate::{Gesture, LandmarkFrame};

/// Hands considered per frame; extra detections are ignored.
const MAX_HANDS: usize = 2;

type EventCallback = Box<dyn FnMut(&GestureEvent) + Send>;

/// Counters for status display and health logging.
#[derive(Clone, Copy, Debug, Default)]
pub struct PipelineStats {
    pub frames_processed: u64,
    /// Frames downgraded to "no gesture" because of malformed observations.
    pub frames_invalid: u64,
    pub events_confirmed: u64,
}

pub struct GesturePipeline {
    thresholds: GeometryThresholds,
    stabilizer: GestureStabilizer,
    mapping: GestureMapping,
    registry: ActionRegistry,
    on_event: Option<EventCallback>,
    stats: PipelineStats,
}

impl GesturePipeline {
    pub fn new(
        thresholds: GeometryThresholds,
        stabilizer: GestureStabilizer,
        mapping: GestureMapping,
        registry: ActionRegistry,
    ) -> Self {
        Self {
            thresholds,
            stabilizer,
            mapping,
            registry,
            on_event: None,
            stats: PipelineStats::default(),
        }
    }

    /// Register a notification callback invoked on every confirmed event,
    /// before dispatch. Intended for status display.
    pub fn on_event<F: FnMut(&GestureEvent) + Send + 'static>(&mut self, callback: F) {
        self.on_event = Some(Box::new(callback));
    }

    /// Process one frame. Returns the dispatch outcome when this frame
    /// confirmed a gesture, `None` otherwise.
    pub fn process_frame(&mut self, frame: &LandmarkFrame, now: Instant) -> Option<ActionResult> {
        self.stats.frames_processed += 1;

        let label = self.label_frame(frame);
        let event = self.stabilizer.observe(label, now)?;
        self.stats.events_confirmed += 1;

        if let Some(callback) = self.on_event.as_mut() {
            callback(&event);
        }
        Some(dispatch(&event, &self.mapping, &mut self.registry))
    }

    /// Classify and combine one frame's hands. Malformed observations
    /// downgrade the whole frame to `CombinedLabel::None`.
    fn label_frame(&mut self, frame: &LandmarkFrame) -> CombinedLabel {
        let mut labels: Vec<Option<Gesture>> = Vec::with_capacity(MAX_HANDS);
        for hand in frame.hands.iter().take(MAX_HANDS) {
            match classify(hand, &self.thresholds) {
                Ok(label) => labels.push(label),
                Err(err) => {
                    log::warn!("frame skipped: {}", err);
                    self.stats.frames_invalid += 1;
                    return CombinedLabel::None;
                }
            }
        }
        combine(&labels)
    }

    /// Drop all debounce state (user-triggered reset).
    pub fn reset(&mut self) {
        self.stabilizer.reset();
    }

    /// Replace the gesture-to-action mapping at runtime.
    pub fn set_mapping(&mut self, mapping: GestureMapping) {
        self.mapping = mapping;
    }

    pub fn stats(&self) -> PipelineStats {
        self.stats
    }

    /// Current candidate hold length, for status display.
    pub fn repeat_count(&self) -> u32 {
        self.stabilizer.repeat_count()
    }
}
