//! Trace replay source.
//!
//! Reads landmark frames from a local JSONL file: one JSON-encoded
//! `LandmarkFrame` per line, blank lines skipped. Traces are finite;
//! `next_frame` reports `None` at end-of-file so the caller can stop
//! cleanly. A malformed line is a per-frame error (the loop logs and
//! continues), not the end of the trace.

use std::fs::File;
use std::io::{BufRead, BufReader};

use anyhow::{anyhow, Context, Result};

use super::{LandmarkSource, SourceStats};
use crate::LandmarkFrame;

pub struct TraceSource {
    path: String,
    reader: Option<BufReader<File>>,
    frame_count: u64,
    healthy: bool,
}

impl TraceSource {
    pub fn new(path: String) -> Self {
        Self {
            path,
            reader: None,
            frame_count: 0,
            healthy: true,
        }
    }
}

impl LandmarkSource for TraceSource {
    fn connect(&mut self) -> Result<()> {
        let file = File::open(&self.path)
            .with_context(|| format!("failed to open trace {}", self.path))?;
        self.reader = Some(BufReader::new(file));
        log::info!("TraceSource: connected to {}", self.path);
        Ok(())
    }

    fn next_frame(&mut self) -> Result<Option<LandmarkFrame>> {
        let reader = self
            .reader
            .as_mut()
            .ok_or_else(|| anyhow!("trace source not connected"))?;

        loop {
            let mut line = String::new();
            let read = reader.read_line(&mut line).map_err(|e| {
                self.healthy = false;
                anyhow!("trace read failed at frame {}: {}", self.frame_count, e)
            })?;
            if read == 0 {
                return Ok(None);
            }
            if line.trim().is_empty() {
                continue;
            }
            let frame: LandmarkFrame = serde_json::from_str(line.trim()).with_context(|| {
                format!("malformed trace line after frame {}", self.frame_count)
            })?;
            self.frame_count += 1;
            return Ok(Some(frame));
        }
    }

    fn is_healthy(&self) -> bool {
        self.healthy
    }

    fn stats(&self) -> SourceStats {
        SourceStats {
            frames_supplied: self.frame_count,
            url: self.path.clone(),
        }
    }
}
