//! Landmark frame sources.
//!
//! Sources supply, per frame, zero to two hand observations from the
//! upstream tracker:
//! - Synthetic source (`stub://` URLs): scripted pose cycle for tests and
//!   demos.
//! - Trace source: JSONL recordings of landmark frames from disk.
//!
//! A live camera tracker is an external integration point behind the same
//! trait; this crate deliberately starts at landmark coordinates.
//!
//! Sources never interpret the landmarks: classification, validity checks,
//! and debouncing all happen downstream.

pub mod poses;
mod stub;
mod trace;

use anyhow::{anyhow, Result};

use crate::config::SourceSettings;
use crate::LandmarkFrame;

pub use stub::SyntheticSource;
pub use trace::TraceSource;

/// Per-frame landmark supplier.
pub trait LandmarkSource {
    /// Prepare the source (open files, connect to the tracker).
    fn connect(&mut self) -> Result<()>;

    /// The next frame, or `None` when a finite source is exhausted.
    fn next_frame(&mut self) -> Result<Option<LandmarkFrame>>;

    /// False once the source has stopped producing usable frames.
    fn is_healthy(&self) -> bool;

    fn stats(&self) -> SourceStats;
}

/// Statistics for a landmark source.
#[derive(Clone, Debug)]
pub struct SourceStats {
    pub frames_supplied: u64,
    pub url: String,
}

/// Open the source named by the settings URL: `stub://` for the synthetic
/// source, a local `.jsonl` path for trace replay.
pub fn open_source(settings: &SourceSettings) -> Result<Box<dyn LandmarkSource>> {
    if settings.url.starts_with("stub://") {
        return Ok(Box::new(SyntheticSource::new(settings.url.clone())));
    }
    if settings.url.ends_with(".jsonl") {
        return Ok(Box::new(TraceSource::new(settings.url.clone())));
    }
    Err(anyhow!(
        "unsupported source url '{}' (expected stub:// or a .jsonl trace; \
         live trackers integrate via the LandmarkSource trait)",
        settings.url
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(url: &str) -> SourceSettings {
        SourceSettings {
            url: url.to_string(),
            target_fps: 30,
        }
    }

    #[test]
    fn stub_urls_open_the_synthetic_source() {
        let mut source = open_source(&settings("stub://hand_tracker")).expect("open");
        source.connect().expect("connect");
        assert!(source.next_frame().expect("frame").is_some());
    }

    #[test]
    fn unknown_urls_are_rejected() {
        assert!(open_source(&settings("rtsp://camera")).is_err());
    }
}
