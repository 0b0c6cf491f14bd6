//! Synthetic landmark source (`stub://`).
//!
//! Replays a fixed pose script so the full pipeline can run without a
//! camera or tracker: a held open palm, a gap, both palms together, a gap,
//! then the cycle repeats. With the default stabilizer threshold of 50 the
//! script confirms one single-hand and one two-hand gesture per cycle.

use anyhow::Result;

use super::{poses, LandmarkSource, SourceStats};
use crate::{Handedness, LandmarkFrame};

/// Frames per script segment.
const HOLD_FRAMES: u64 = 60;
const GAP_FRAMES: u64 = 20;
const CYCLE_FRAMES: u64 = (HOLD_FRAMES + GAP_FRAMES) * 2;

pub struct SyntheticSource {
    url: String,
    frame_count: u64,
}

impl SyntheticSource {
    pub fn new(url: String) -> Self {
        Self { url, frame_count: 0 }
    }
}

impl LandmarkSource for SyntheticSource {
    fn connect(&mut self) -> Result<()> {
        log::info!("SyntheticSource: connected to {}", self.url);
        Ok(())
    }

    fn next_frame(&mut self) -> Result<Option<LandmarkFrame>> {
        let position = self.frame_count % CYCLE_FRAMES;
        self.frame_count += 1;

        let frame = if position < HOLD_FRAMES {
            LandmarkFrame {
                hands: vec![poses::open_palm(Handedness::Right)],
            }
        } else if position < HOLD_FRAMES + GAP_FRAMES {
            LandmarkFrame::empty()
        } else if position < HOLD_FRAMES + GAP_FRAMES + HOLD_FRAMES {
            LandmarkFrame {
                hands: vec![
                    poses::open_palm(Handedness::Left),
                    poses::open_palm(Handedness::Right),
                ],
            }
        } else {
            LandmarkFrame::empty()
        };
        Ok(Some(frame))
    }

    fn is_healthy(&self) -> bool {
        true
    }

    fn stats(&self) -> SourceStats {
        SourceStats {
            frames_supplied: self.frame_count,
            url: self.url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_alternates_hands_and_gaps() {
        let mut source = SyntheticSource::new("stub://test".to_string());
        source.connect().unwrap();

        let mut counts = Vec::new();
        for _ in 0..CYCLE_FRAMES {
            let frame = source.next_frame().unwrap().expect("endless");
            counts.push(frame.hand_count());
        }
        assert_eq!(counts[0], 1);
        assert_eq!(counts[HOLD_FRAMES as usize], 0);
        assert_eq!(counts[(HOLD_FRAMES + GAP_FRAMES) as usize], 2);
        assert_eq!(counts[(CYCLE_FRAMES - 1) as usize], 0);
        assert_eq!(source.stats().frames_supplied, CYCLE_FRAMES);
    }
}
