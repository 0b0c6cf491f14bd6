//! End-to-end pipeline scenarios: landmark frames in, handler invocations out.

use std::time::{Duration, Instant};

use handwave::config::GestureMapping;
use handwave::dispatch::{ActionId, ActionRegistry, ActionResult, StubHandler};
use handwave::source::{open_source, poses, LandmarkSource};
use handwave::{
    GeometryThresholds, GesturePipeline, GestureStabilizer, Handedness, LandmarkFrame,
    SourceSettings,
};

const FRAME_INTERVAL: Duration = Duration::from_millis(100);

struct Stubs {
    photos: StubHandler,
    calendar: StubHandler,
    music: StubHandler,
}

fn stubbed_pipeline(threshold: u32, cooldown: Duration) -> (GesturePipeline, Stubs) {
    let stubs = Stubs {
        photos: StubHandler::new("open_photos"),
        calendar: StubHandler::new("open_calendar"),
        music: StubHandler::new("turn_music"),
    };
    let mut registry = ActionRegistry::new();
    registry.register(ActionId::OpenPhotos, stubs.photos.clone());
    registry.register(ActionId::OpenCalendar, stubs.calendar.clone());
    registry.register(ActionId::TurnMusic, stubs.music.clone());

    let pipeline = GesturePipeline::new(
        GeometryThresholds::default(),
        GestureStabilizer::new(threshold, cooldown),
        GestureMapping::default(),
        registry,
    );
    (pipeline, stubs)
}

fn like_frame() -> LandmarkFrame {
    LandmarkFrame {
        hands: vec![poses::thumbs_up(Handedness::Right)],
    }
}

#[test]
fn fifty_like_frames_open_photos_exactly_once() {
    let (mut pipeline, stubs) = stubbed_pipeline(50, Duration::from_secs(10));
    let start = Instant::now();

    let mut performed = Vec::new();
    for i in 0..120u32 {
        let now = start + FRAME_INTERVAL * i;
        if let Some(result) = pipeline.process_frame(&like_frame(), now) {
            performed.push((i, result));
        }
    }

    // Confirmation lands on the 50th consecutive frame and the cooldown
    // suppresses the rest of the held pose.
    assert_eq!(performed.len(), 1);
    let (frame_index, result) = &performed[0];
    assert_eq!(*frame_index, 49);
    assert!(matches!(
        result,
        ActionResult::Performed {
            action: ActionId::OpenPhotos,
            ..
        }
    ));
    assert_eq!(stubs.photos.invocations(), 1);
    assert_eq!(stubs.calendar.invocations(), 0);
}

#[test]
fn gesture_mapped_to_none_makes_no_external_call() {
    let (mut pipeline, stubs) = stubbed_pipeline(3, Duration::from_secs(10));
    let mut mapping = GestureMapping::default();
    mapping.bind("is_two_stops", ActionId::None).expect("bind");
    pipeline.set_mapping(mapping);

    let frame = LandmarkFrame {
        hands: vec![
            poses::open_palm(Handedness::Left),
            poses::open_palm(Handedness::Right),
        ],
    };
    let start = Instant::now();
    let mut results = Vec::new();
    for i in 0..3u32 {
        if let Some(result) = pipeline.process_frame(&frame, start + FRAME_INTERVAL * i) {
            results.push(result);
        }
    }

    // The gesture still confirms (it is observable) but resolves to a no-op.
    assert_eq!(results.len(), 1);
    assert!(results[0].is_noop());
    assert_eq!(stubs.music.invocations(), 0);
    assert_eq!(stubs.photos.invocations(), 0);
    assert_eq!(stubs.calendar.invocations(), 0);
}

#[test]
fn malformed_observations_break_the_run_without_stopping_the_loop() {
    let (mut pipeline, stubs) = stubbed_pipeline(5, Duration::from_secs(10));
    let start = Instant::now();

    // A glitchy tracker: every third frame is truncated.
    for i in 0..30u32 {
        let frame = if i % 3 == 2 {
            LandmarkFrame {
                hands: vec![poses::truncated(Handedness::Right)],
            }
        } else {
            like_frame()
        };
        let result = pipeline.process_frame(&frame, start + FRAME_INTERVAL * i);
        assert!(result.is_none(), "no run of 5 clean frames ever forms");
    }

    assert_eq!(stubs.photos.invocations(), 0);
    assert_eq!(pipeline.stats().frames_invalid, 10);
    assert_eq!(pipeline.stats().frames_processed, 30);
}

#[test]
fn synthetic_source_drives_single_and_paired_confirmations() {
    let settings = SourceSettings {
        url: "stub://hand_tracker".to_string(),
        target_fps: 30,
    };
    let mut source = open_source(&settings).expect("open");
    source.connect().expect("connect");

    // Short cooldown so the paired segment of the script is not absorbed.
    let (mut pipeline, stubs) = stubbed_pipeline(50, Duration::from_secs(1));

    let start = Instant::now();
    // One full script cycle: palm hold, gap, both palms, gap.
    for i in 0..160u32 {
        let frame = source
            .next_frame()
            .expect("synthetic frames never fail")
            .expect("synthetic source is endless");
        pipeline.process_frame(&frame, start + FRAME_INTERVAL * i);
    }

    // Single open palm maps to open_calendar, the paired form to turn_music.
    assert_eq!(stubs.calendar.invocations(), 1);
    assert_eq!(stubs.music.invocations(), 1);
    assert_eq!(stubs.photos.invocations(), 0);
    assert_eq!(pipeline.stats().events_confirmed, 2);
}
