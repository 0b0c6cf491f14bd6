//! Single-hand gesture rules.
//!
//! The classifier is a pure function from one hand's landmarks to an
//! optional gesture label. Rules are evaluated in a fixed priority order and
//! the first match wins:
//!
//! 1. closed-fist gate (blocks Like/Dislike)
//! 2. Like: thumb extended, nothing else
//! 3. Dislike: nothing extended, not a fist
//! 4. Stop: all five fingers extended
//! 5. Okay: thumb tip and index tip pinched together
//!
//! Coordinates follow the normalized image convention: y grows downward, so
//! "above" means numerically smaller y; z is relative depth with smaller
//! values closer to the camera.

use serde::Deserialize;
use thiserror::Error;

use crate::{
    HandObservation, FINGER_BASES, FINGER_TIPS, INDEX_TIP, LANDMARKS_PER_HAND, THUMB_TIP,
};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("invalid observation: expected {expected} landmarks, got {actual}")]
    InvalidObservation { expected: usize, actual: usize },
}

/// Which rule confirms the Okay pinch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinchRule {
    /// Reference behavior: |dx| and |dy| between thumb tip and index tip each
    /// under the closeness threshold, gated on not being a fist.
    #[default]
    AxisAligned,
    /// Stricter: true Euclidean tip distance under the threshold, and the
    /// middle, ring, and pinky fingers all extended.
    Euclidean,
}

/// Tunable geometry thresholds, all in normalized image units.
///
/// The thumb margin is deliberately larger than the finger margin (the thumb
/// travels further between folded and extended); the two stay independently
/// tunable.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct GeometryThresholds {
    /// Vertical margin a non-thumb fingertip must clear above its base.
    pub finger_margin: f32,
    /// Vertical margin the thumb tip must clear above the thumb base.
    pub thumb_margin: f32,
    /// Max horizontal tip-to-base displacement for the closed-fist test.
    pub fist_closeness: f32,
    /// Max thumb-tip/index-tip separation for the Okay pinch.
    pub pinch_closeness: f32,
    /// Okay-pinch rule variant.
    pub pinch_rule: PinchRule,
}

impl Default for GeometryThresholds {
    fn default() -> Self {
        Self {
            finger_margin: 0.02,
            thumb_margin: 0.05,
            fist_closeness: 0.05,
            pinch_closeness: 0.05,
            pinch_rule: PinchRule::AxisAligned,
        }
    }
}

/// Classify one hand. Pure and deterministic given the landmark positions.
///
/// Returns `Ok(None)` for poses that match no rule, and
/// [`ClassifyError::InvalidObservation`] when the tracker supplied a
/// structurally malformed observation.
pub fn classify(
    hand: &HandObservation,
    thresholds: &GeometryThresholds,
) -> Result<Option<crate::Gesture>, ClassifyError> {
    let points = &hand.landmarks;
    if points.len() != LANDMARKS_PER_HAND {
        return Err(ClassifyError::InvalidObservation {
            expected: LANDMARKS_PER_HAND,
            actual: points.len(),
        });
    }

    let is_fist = FINGER_TIPS
        .iter()
        .zip(FINGER_BASES.iter())
        .all(|(&tip, &base)| (points[tip].x - points[base].x).abs() < thresholds.fist_closeness);

    // Extended flags, thumb first.
    let mut extended = [false; 5];
    extended[0] = {
        let tip = points[FINGER_TIPS[0]];
        let base = points[FINGER_BASES[0]];
        tip.y < base.y - thresholds.thumb_margin && tip.z < base.z
    };
    for finger in 1..5 {
        let tip = points[FINGER_TIPS[finger]];
        let base = points[FINGER_BASES[finger]];
        extended[finger] = tip.y < base.y - thresholds.finger_margin && tip.z < base.z;
    }

    let thumb = extended[0];
    let any_other = extended[1..].iter().any(|&e| e);

    if !is_fist && thumb && !any_other {
        return Ok(Some(crate::Gesture::Like));
    }
    if !is_fist && !thumb && !any_other {
        return Ok(Some(crate::Gesture::Dislike));
    }
    if extended.iter().all(|&e| e) {
        return Ok(Some(crate::Gesture::Stop));
    }

    let thumb_tip = points[THUMB_TIP];
    let index_tip = points[INDEX_TIP];
    let pinched = match thresholds.pinch_rule {
        PinchRule::AxisAligned => {
            !is_fist
                && (index_tip.x - thumb_tip.x).abs() < thresholds.pinch_closeness
                && (index_tip.y - thumb_tip.y).abs() < thresholds.pinch_closeness
        }
        PinchRule::Euclidean => {
            let dx = index_tip.x - thumb_tip.x;
            let dy = index_tip.y - thumb_tip.y;
            (dx * dx + dy * dy).sqrt() < thresholds.pinch_closeness
                && extended[2]
                && extended[3]
                && extended[4]
        }
    };
    if pinched {
        return Ok(Some(crate::Gesture::Okay));
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::poses;
    use crate::{Gesture, Handedness, Landmark};

    fn classify_default(hand: &HandObservation) -> Option<Gesture> {
        classify(hand, &GeometryThresholds::default()).expect("valid observation")
    }

    #[test]
    fn open_palm_is_stop() {
        assert_eq!(
            classify_default(&poses::open_palm(Handedness::Right)),
            Some(Gesture::Stop)
        );
    }

    #[test]
    fn thumb_up_is_like() {
        assert_eq!(
            classify_default(&poses::thumbs_up(Handedness::Right)),
            Some(Gesture::Like)
        );
    }

    #[test]
    fn thumb_down_is_dislike() {
        assert_eq!(
            classify_default(&poses::thumbs_down(Handedness::Left)),
            Some(Gesture::Dislike)
        );
    }

    #[test]
    fn pinch_is_okay_under_both_rules() {
        let hand = poses::okay_pinch(Handedness::Right);
        assert_eq!(classify_default(&hand), Some(Gesture::Okay));

        let euclidean = GeometryThresholds {
            pinch_rule: PinchRule::Euclidean,
            ..GeometryThresholds::default()
        };
        assert_eq!(
            classify(&hand, &euclidean).expect("valid observation"),
            Some(Gesture::Okay)
        );
    }

    #[test]
    fn closed_fist_is_unrecognized() {
        assert_eq!(classify_default(&poses::closed_fist(Handedness::Right)), None);
    }

    #[test]
    fn fist_never_classifies_as_like_or_dislike() {
        // The fist gate must win even though nothing is extended, which would
        // otherwise satisfy the Dislike rule.
        let label = classify_default(&poses::closed_fist(Handedness::Left));
        assert_ne!(label, Some(Gesture::Like));
        assert_ne!(label, Some(Gesture::Dislike));
    }

    #[test]
    fn fist_never_classifies_as_okay() {
        // Tips of a closed fist can sit within pinch distance of the thumb;
        // both pinch rules must still reject it.
        for rule in [PinchRule::AxisAligned, PinchRule::Euclidean] {
            let thresholds = GeometryThresholds {
                pinch_rule: rule,
                ..GeometryThresholds::default()
            };
            let label =
                classify(&poses::closed_fist(Handedness::Right), &thresholds).expect("valid");
            assert_ne!(label, Some(Gesture::Okay), "rule {:?}", rule);
        }
    }

    #[test]
    fn all_extended_is_stop_regardless_of_fist_result() {
        // Force the degenerate pose where every tip sits directly above its
        // base: the fist test passes on |dx| alone, but all five extension
        // flags are set and Stop must still win.
        let mut hand = poses::open_palm(Handedness::Right);
        for (&tip, &base) in FINGER_TIPS.iter().zip(FINGER_BASES.iter()) {
            hand.landmarks[tip].x = hand.landmarks[base].x;
        }
        assert_eq!(classify_default(&hand), Some(Gesture::Stop));
    }

    #[test]
    fn short_observation_is_invalid() {
        let hand = HandObservation::new(vec![Landmark::default(); 20], Handedness::Left);
        assert_eq!(
            classify(&hand, &GeometryThresholds::default()),
            Err(ClassifyError::InvalidObservation {
                expected: LANDMARKS_PER_HAND,
                actual: 20
            })
        );
    }

    #[test]
    fn oversized_observation_is_invalid() {
        let hand = HandObservation::new(vec![Landmark::default(); 22], Handedness::Right);
        assert!(classify(&hand, &GeometryThresholds::default()).is_err());
    }

    #[test]
    fn finger_margin_is_respected() {
        // A palm whose fingertips clear their bases by less than the margin
        // must not count as extended.
        let mut hand = poses::open_palm(Handedness::Right);
        for finger in 1..5 {
            let base_y = hand.landmarks[FINGER_BASES[finger]].y;
            hand.landmarks[FINGER_TIPS[finger]].y = base_y - 0.01;
        }
        assert_ne!(classify_default(&hand), Some(Gesture::Stop));
    }
}
