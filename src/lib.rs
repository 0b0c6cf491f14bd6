//! handwave - gesture-to-action core
//!
//! This crate turns a per-frame stream of hand landmarks into debounced
//! gesture events and routes each confirmed event to a configured desktop
//! action.
//!
//! # Architecture
//!
//! The per-frame path is strictly sequential:
//!
//! 1. A `LandmarkSource` supplies 0-2 `HandObservation`s per frame.
//! 2. `classify::single` maps each observation to an `Option<Gesture>`
//!    using pure finger-extension geometry.
//! 3. `classify::combine` merges the per-hand labels into one
//!    `CombinedLabel` (two identical non-empty labels become their own
//!    paired identity, distinct from the single-hand gesture).
//! 4. `stabilize::GestureStabilizer` requires a run of identical labels
//!    before confirming, then enforces a non-blocking cooldown so a held
//!    pose fires its action exactly once.
//! 5. `dispatch` resolves the confirmed event through the configured
//!    gesture-to-action mapping and invokes the named `ActionHandler`.
//!
//! Camera capture and the landmark tracking model itself are upstream
//! collaborators: the crate starts at landmark coordinates and ends at
//! handler invocation. No per-frame failure is fatal to the loop; live
//! tracker input is assumed to be unreliable.
//!
//! # Module structure
//!
//! - `classify`: single-hand rules and the multi-hand combiner
//! - `stabilize`: the debouncing state machine
//! - `dispatch`: action identifiers, registry, and concrete handlers
//! - `source`: landmark frame sources (synthetic, trace replay)
//! - `config`: daemon configuration and the gesture-to-action mapping
//! - `pipeline`: frame-synchronous wiring of the above

use serde::{Deserialize, Serialize};

pub mod classify;
pub mod config;
pub mod dispatch;
pub mod pipeline;
pub mod source;
pub mod stabilize;

pub use classify::{classify, combine, ClassifyError, CombinedLabel, GeometryThresholds, PinchRule};
pub use config::{GestureMapping, HandwavedConfig, SourceSettings, StabilizerSettings};
pub use dispatch::{
    default_registry, dispatch, ActionHandler, ActionId, ActionRegistry, ActionResult, StubHandler,
};
pub use pipeline::GesturePipeline;
pub use source::{open_source, LandmarkSource, SourceStats, SyntheticSource, TraceSource};
pub use stabilize::{GestureEvent, GestureStabilizer};

// -------------------- Landmark schema --------------------

/// Landmarks per tracked hand. The upstream tracker emits exactly this many,
/// in a fixed order that is never permuted.
pub const LANDMARKS_PER_HAND: usize = 21;

/// Wrist landmark index.
pub const WRIST: usize = 0;

/// Fingertip landmark indices: thumb, index, middle, ring, pinky.
pub const FINGER_TIPS: [usize; 5] = [4, 8, 12, 16, 20];

/// Finger base landmark indices, paired positionally with `FINGER_TIPS`.
pub const FINGER_BASES: [usize; 5] = [2, 5, 9, 13, 17];

pub const THUMB_TIP: usize = FINGER_TIPS[0];
pub const INDEX_TIP: usize = FINGER_TIPS[1];

/// A single tracked keypoint in normalized image space.
///
/// `x` and `y` are in `[0, 1]` with y growing downward; `z` is a relative
/// depth estimate where smaller means closer to the camera.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Left/right label assigned by the upstream tracker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Handedness {
    Left,
    Right,
}

/// One tracked hand in one frame: an ordered landmark sequence plus the
/// tracker's handedness label.
///
/// Observations are created fresh every frame and discarded after
/// classification. Structural validity (exactly [`LANDMARKS_PER_HAND`]
/// points) is checked by the classifier, which rejects malformed
/// observations instead of guessing.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HandObservation {
    pub landmarks: Vec<Landmark>,
    pub handedness: Handedness,
}

impl HandObservation {
    pub fn new(landmarks: Vec<Landmark>, handedness: Handedness) -> Self {
        Self {
            landmarks,
            handedness,
        }
    }

    /// Number of landmarks supplied by the tracker for this hand.
    pub fn landmark_count(&self) -> usize {
        self.landmarks.len()
    }
}

/// Everything the tracker produced for one frame: zero to two hands.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LandmarkFrame {
    pub hands: Vec<HandObservation>,
}

impl LandmarkFrame {
    /// A frame with no detected hands.
    pub fn empty() -> Self {
        Self { hands: Vec::new() }
    }

    pub fn hand_count(&self) -> usize {
        self.hands.len()
    }
}

// -------------------- Gesture labels --------------------

/// A recognized single-hand gesture. "Nothing recognized" is represented as
/// `Option::None` at the classifier seam and as [`CombinedLabel::None`] once
/// per-hand labels have been merged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    /// Thumb up, all other fingers folded.
    Like,
    /// Thumb down, all other fingers folded.
    Dislike,
    /// Open palm, all five fingers extended.
    Stop,
    /// Thumb and index tip pinched together, remaining fingers up.
    Okay,
}

impl Gesture {
    /// Stable identifier used in configuration mappings and logs.
    pub fn key(self) -> &'static str {
        match self {
            Gesture::Like => "is_like",
            Gesture::Dislike => "is_dislike",
            Gesture::Stop => "is_stop",
            Gesture::Okay => "is_okay",
        }
    }

    /// Identifier for the both-hands-identical form of this gesture.
    ///
    /// `is_two_dislike` is spelled without the plural `s` to stay compatible
    /// with existing configuration files.
    pub fn paired_key(self) -> &'static str {
        match self {
            Gesture::Like => "is_two_likes",
            Gesture::Dislike => "is_two_dislike",
            Gesture::Stop => "is_two_stops",
            Gesture::Okay => "is_two_okay",
        }
    }
}

impl std::fmt::Display for Gesture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landmark_indices_are_paired() {
        assert_eq!(FINGER_TIPS.len(), FINGER_BASES.len());
        for (tip, base) in FINGER_TIPS.iter().zip(FINGER_BASES.iter()) {
            assert!(base < tip, "base {} must precede tip {}", base, tip);
            assert!(*tip < LANDMARKS_PER_HAND);
        }
    }

    #[test]
    fn gesture_keys_are_stable() {
        assert_eq!(Gesture::Like.key(), "is_like");
        assert_eq!(Gesture::Stop.paired_key(), "is_two_stops");
        assert_eq!(Gesture::Dislike.paired_key(), "is_two_dislike");
    }
}
