//! Canonical hand poses in normalized landmark coordinates.
//!
//! Shared by the synthetic source and by tests that need geometrically
//! honest observations. The scaffold places finger bases along a horizontal
//! line at y = 0.60 with the wrist below them (y grows downward), then each
//! pose moves tips relative to their bases the way the classifier measures
//! them.

use crate::{
    HandObservation, Handedness, Landmark, FINGER_BASES, FINGER_TIPS, LANDMARKS_PER_HAND, WRIST,
};

/// Finger base x positions: thumb, index, middle, ring, pinky.
const BASE_X: [f32; 5] = [0.36, 0.40, 0.48, 0.56, 0.64];
const BASE_Y: f32 = 0.60;

/// Neutral scaffold: bases in place, every other landmark mid-palm.
fn scaffold() -> Vec<Landmark> {
    let mut points = vec![Landmark::new(0.5, 0.7, 0.0); LANDMARKS_PER_HAND];
    points[WRIST] = Landmark::new(0.5, 0.8, 0.0);
    for (finger, &base) in FINGER_BASES.iter().enumerate() {
        points[base] = Landmark::new(BASE_X[finger], BASE_Y, 0.0);
    }
    points
}

fn fold_finger(points: &mut [Landmark], finger: usize) {
    // Folded: tip below its base, slightly further from the camera, directly
    // over the base so the fist test's |dx| check can pass.
    points[FINGER_TIPS[finger]] = Landmark::new(BASE_X[finger], 0.68, 0.02);
}

fn extend_finger(points: &mut [Landmark], finger: usize) {
    // Extended: tip well above its base and closer to the camera, offset
    // horizontally so an open hand never reads as a fist.
    points[FINGER_TIPS[finger]] = Landmark::new(BASE_X[finger] + 0.06, 0.45, -0.05);
}

/// Open palm, all five fingers extended: the Stop gesture.
pub fn open_palm(handedness: Handedness) -> HandObservation {
    let mut points = scaffold();
    for finger in 0..5 {
        extend_finger(&mut points, finger);
    }
    HandObservation::new(points, handedness)
}

/// Thumb up, other fingers folded: the Like gesture.
pub fn thumbs_up(handedness: Handedness) -> HandObservation {
    let mut points = scaffold();
    extend_finger(&mut points, 0);
    for finger in 1..5 {
        fold_finger(&mut points, finger);
    }
    HandObservation::new(points, handedness)
}

/// Thumb down, other fingers folded: the Dislike gesture.
pub fn thumbs_down(handedness: Handedness) -> HandObservation {
    let mut points = scaffold();
    // Thumb hangs below its base, offset so the pose is not a fist.
    points[FINGER_TIPS[0]] = Landmark::new(BASE_X[0] + 0.06, 0.70, 0.02);
    for finger in 1..5 {
        fold_finger(&mut points, finger);
    }
    HandObservation::new(points, handedness)
}

/// Thumb and index tips pinched, middle/ring/pinky raised: the Okay gesture
/// under both pinch rules.
pub fn okay_pinch(handedness: Handedness) -> HandObservation {
    let mut points = scaffold();
    // Thumb reaches across without counting as extended (inside the 0.05
    // vertical margin).
    points[FINGER_TIPS[0]] = Landmark::new(0.44, 0.56, -0.01);
    // Index tip meets the thumb tip.
    points[FINGER_TIPS[1]] = Landmark::new(0.445, 0.555, -0.01);
    for finger in 2..5 {
        extend_finger(&mut points, finger);
    }
    HandObservation::new(points, handedness)
}

/// Closed fist: every tip horizontally over its base. Unrecognized by
/// design; the tips also sit within pinch distance of the thumb, which is
/// exactly the ambiguity the fist gate exists to reject.
pub fn closed_fist(handedness: Handedness) -> HandObservation {
    let mut points = scaffold();
    for (finger, &tip) in FINGER_TIPS.iter().enumerate() {
        points[tip] = Landmark::new(BASE_X[finger] + 0.01, 0.65, 0.03);
    }
    HandObservation::new(points, handedness)
}

/// Structurally malformed observation (tracker glitch): too few landmarks.
pub fn truncated(handedness: Handedness) -> HandObservation {
    HandObservation::new(vec![Landmark::default(); 10], handedness)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poses_carry_the_full_landmark_set() {
        for pose in [
            open_palm(Handedness::Left),
            thumbs_up(Handedness::Right),
            thumbs_down(Handedness::Left),
            okay_pinch(Handedness::Right),
            closed_fist(Handedness::Left),
        ] {
            assert_eq!(pose.landmark_count(), LANDMARKS_PER_HAND);
        }
        assert_ne!(truncated(Handedness::Left).landmark_count(), LANDMARKS_PER_HAND);
    }
}
