//! handwaved - hand gesture daemon
//!
//! This daemon:
//! 1. Pulls landmark frames from the configured source (stub or trace)
//! 2. Classifies each hand and combines the per-hand labels
//! 3. Debounces the label stream through the gesture stabilizer
//! 4. Dispatches confirmed gestures to their configured actions
//! 5. Logs source health and pipeline counters periodically

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;

use handwave::{
    default_registry, open_source, GesturePipeline, GestureStabilizer, HandwavedConfig,
};

#[derive(Parser, Debug)]
#[command(name = "handwaved", version, about = "hand gesture daemon")]
struct Cli {
    /// Path to a TOML config file.
    #[arg(long, env = "HANDWAVE_CONFIG")]
    config: Option<PathBuf>,

    /// Landmark source URL (stub:// or a .jsonl trace), overriding the config.
    #[arg(long)]
    source_url: Option<String>,

    /// Consecutive identical frames required to confirm a gesture.
    #[arg(long)]
    gesture_threshold: Option<u32>,

    /// Quiet period after a confirmation, in seconds.
    #[arg(long)]
    cooldown_secs: Option<u64>,

    /// Frame loop pacing target.
    #[arg(long)]
    target_fps: Option<u32>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut cfg = HandwavedConfig::load_from(cli.config.as_deref())?;
    if let Some(url) = cli.source_url {
        cfg.source.url = url;
    }
    if let Some(threshold) = cli.gesture_threshold {
        cfg.stabilizer.gesture_threshold = threshold;
    }
    if let Some(secs) = cli.cooldown_secs {
        cfg.stabilizer.cooldown = Duration::from_secs(secs);
    }
    if let Some(fps) = cli.target_fps {
        cfg.source.target_fps = fps;
    }
    cfg.validate()?;

    let registry = default_registry();
    let mut actions = registry.list();
    actions.sort_by_key(|a| a.as_str());
    log::info!(
        "registered actions: {}",
        actions
            .iter()
            .map(|a| a.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    for (gesture, action) in cfg.mapping.iter() {
        log::info!("mapping {} -> {}", gesture, action);
    }

    let mut source = open_source(&cfg.source)?;
    source.connect()?;

    let stabilizer = GestureStabilizer::new(cfg.stabilizer.gesture_threshold, cfg.stabilizer.cooldown);
    let mut pipeline = GesturePipeline::new(cfg.classifier, stabilizer, cfg.mapping.clone(), registry);
    pipeline.on_event(|event| {
        log::info!("gesture event: {} hands={}", event.label, event.hand_count);
    });

    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_flag = shutdown.clone();
    ctrlc::set_handler(move || {
        shutdown_flag.store(true, Ordering::SeqCst);
    })?;

    let frame_interval = Duration::from_millis(1000 / u64::from(cfg.source.target_fps).max(1));
    let mut last_health_log = Instant::now();

    log::info!(
        "handwaved running. source={} threshold={} cooldown={}s",
        cfg.source.url,
        cfg.stabilizer.gesture_threshold,
        cfg.stabilizer.cooldown.as_secs()
    );

    while !shutdown.load(Ordering::SeqCst) {
        let frame = match source.next_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                log::info!("source exhausted, shutting down");
                break;
            }
            Err(e) => {
                // Per-frame source errors (a malformed trace line, a tracker
                // hiccup) are logged and the loop continues.
                log::warn!("frame read failed: {}", e);
                continue;
            }
        };

        pipeline.process_frame(&frame, Instant::now());

        if last_health_log.elapsed() >= Duration::from_secs(5) {
            let source_stats = source.stats();
            let stats = pipeline.stats();
            log::info!(
                "source health={} frames={} url={} | pipeline processed={} invalid={} confirmed={}",
                source.is_healthy(),
                source_stats.frames_supplied,
                source_stats.url,
                stats.frames_processed,
                stats.frames_invalid,
                stats.events_confirmed
            );
            last_health_log = Instant::now();
        }

        std::thread::sleep(frame_interval);
    }

    let stats = pipeline.stats();
    log::info!(
        "handwaved stopped. processed={} invalid={} confirmed={}",
        stats.frames_processed,
        stats.frames_invalid,
        stats.events_confirmed
    );
    Ok(())
}
