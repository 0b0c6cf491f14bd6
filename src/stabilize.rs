//! Temporal gesture stabilization.
//!
//! A per-frame label stream from a live tracker is noisy: single-frame
//! misclassifications are routine. The stabilizer confirms a gesture only
//! after an unbroken run of identical labels, then enforces a cooldown so a
//! held pose triggers its action exactly once.
//!
//! Counting consecutive frames instead of wall-clock time keeps confirmation
//! independent of the capture frame rate. The cooldown is a timestamp
//! comparison evaluated on each `observe` call, never a sleep: frame
//! acquisition is not stalled while the stabilizer is quiet.

use std::time::{Duration, Instant, SystemTime};

use crate::classify::CombinedLabel;

/// A confirmed, debounced gesture occurrence.
#[derive(Clone, Debug, PartialEq)]
pub struct GestureEvent {
    pub label: CombinedLabel,
    /// Hands that formed the gesture (1 or 2).
    pub hand_count: u8,
    /// Wall-clock confirmation time, for status display.
    pub timestamp: SystemTime,
}

/// Debounce phase. Owned exclusively by the stabilizer and mutated only from
/// the frame-processing path.
#[derive(Clone, Debug)]
enum Phase {
    /// No candidate label.
    Idle,
    /// A candidate has been seen `count` consecutive frames (count < threshold
    /// until confirmation).
    Accumulating { candidate: CombinedLabel, count: u32 },
    /// Just confirmed; labels are absorbed without accumulation until the
    /// deadline passes.
    Cooldown { until: Instant },
}

/// Repeat-count debouncer with a non-blocking cooldown.
pub struct GestureStabilizer {
    threshold: u32,
    cooldown: Duration,
    phase: Phase,
    last_confirmed: Option<CombinedLabel>,
}

impl GestureStabilizer {
    /// `threshold` is the number of consecutive identical frames required to
    /// confirm; `cooldown` is the quiet period after a confirmation.
    pub fn new(threshold: u32, cooldown: Duration) -> Self {
        Self {
            threshold: threshold.max(1),
            cooldown,
            phase: Phase::Idle,
            last_confirmed: None,
        }
    }

    /// Feed one frame's combined label. Returns a confirmed event for at most
    /// one frame per unbroken run of identical labels.
    ///
    /// `now` drives the cooldown deadline; passing it in keeps the state
    /// machine deterministic under test.
    pub fn observe(&mut self, label: CombinedLabel, now: Instant) -> Option<GestureEvent> {
        if let Phase::Cooldown { until } = self.phase {
            if now < until {
                return None;
            }
            // Cooldown elapsed; the current frame is processed normally.
            self.phase = Phase::Idle;
        }

        if label.is_none() {
            self.phase = Phase::Idle;
            return None;
        }

        let count = match &mut self.phase {
            Phase::Accumulating { candidate, count } if *candidate == label => {
                *count += 1;
                *count
            }
            _ => {
                self.phase = Phase::Accumulating {
                    candidate: label.clone(),
                    count: 1,
                };
                1
            }
        };

        if count < self.threshold {
            return None;
        }

        log::info!(
            "gesture confirmed: {} after {} consecutive frames",
            label,
            count
        );
        self.phase = Phase::Cooldown {
            until: now + self.cooldown,
        };
        self.last_confirmed = Some(label.clone());
        Some(GestureEvent {
            hand_count: label.hand_count(),
            label,
            timestamp: SystemTime::now(),
        })
    }

    /// Drop any candidate and cooldown; the next frame starts from scratch.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.last_confirmed = None;
    }

    /// Consecutive frames the current candidate has been held (0 when idle or
    /// cooling down). Exposed for status display.
    pub fn repeat_count(&self) -> u32 {
        match &self.phase {
            Phase::Accumulating { count, .. } => *count,
            _ => 0,
        }
    }

    /// The most recently confirmed label, if any.
    pub fn last_confirmed(&self) -> Option<&CombinedLabel> {
        self.last_confirmed.as_ref()
    }

    /// True while the post-confirmation quiet period is in effect.
    pub fn in_cooldown(&self, now: Instant) -> bool {
        matches!(self.phase, Phase::Cooldown { until } if now < until)
    }
}
