//! Gesture classification.
//!
//! Two pure, stateless stages:
//! - `single`: one hand's landmarks -> optional gesture label, using
//!   finger-extension geometry with tunable thresholds.
//! - `combine`: 0-2 per-hand labels -> one `CombinedLabel` for the frame.
//!
//! Neither stage keeps state between frames; all temporal logic lives in
//! `crate::stabilize`.

mod combine;
mod single;

pub use combine::{combine, CombinedLabel};
pub use single::{classify, ClassifyError, GeometryThresholds, PinchRule};
