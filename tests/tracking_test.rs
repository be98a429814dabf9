use facetrack_rs::tracker::{TrackedEntry, advance, confirmed};
use facetrack_rs::{DetectionSource, PipelineConfig, Rect, TrackRegistry, TrackerConfig, TrackerPipeline};

fn entry(rect: Rect, count: u32) -> TrackedEntry {
    TrackedEntry { rect, count }
}

#[test]
fn test_basic_tracking() {
    let mut registry = TrackRegistry::with_default_config();
    let face = Rect::new(0.0, 0.0, 10.0, 10.0);

    // Round 1: new face is tracked but not yet rendered.
    let rendered1 = registry.update(&[face]).unwrap();
    assert_eq!(registry.entries(), &[entry(face, 1)]);
    assert!(rendered1.is_empty());

    // Round 2: same face drifted slightly.
    let drifted = Rect::new(1.0, 1.0, 10.0, 10.0);
    let rendered2 = registry.update(&[drifted]).unwrap();
    assert_eq!(registry.entries(), &[entry(drifted, 2)]);
    assert!(rendered2.is_empty());

    // Round 3: confirmed.
    let rendered3 = registry.update(&[face]).unwrap();
    assert_eq!(registry.entries(), &[entry(face, 3)]);
    assert_eq!(rendered3, vec![face]);

    // Round 4: face disappears, nothing is remembered.
    let rendered4 = registry.update(&[]).unwrap();
    assert!(registry.entries().is_empty());
    assert!(rendered4.is_empty());

    // Round 5: face reappears and starts over.
    registry.update(&[face]).unwrap();
    assert_eq!(registry.entries(), &[entry(face, 1)]);
}

#[test]
fn test_new_face_next_to_tracked_one() {
    let config = TrackerConfig::default();
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let a_moved = Rect::new(2.0, 0.0, 10.0, 10.0);
    let b = Rect::new(100.0, 100.0, 10.0, 10.0);

    let round1 = advance(&[], &[a], &config);
    let round2 = advance(&round1, &[a_moved, b], &config);

    assert_eq!(round2, vec![entry(a_moved, 2), entry(b, 1)]);
    assert!(confirmed(&round2, &config).is_empty());
}

#[test]
fn test_one_shot_false_positive_never_rendered() {
    let mut registry = TrackRegistry::with_default_config();
    let face = Rect::new(50.0, 50.0, 30.0, 30.0);
    let blip = Rect::new(300.0, 10.0, 20.0, 20.0);

    registry.update(&[face]).unwrap();
    registry.update(&[face, blip]).unwrap();
    let rendered = registry.update(&[face]).unwrap();

    assert_eq!(rendered, vec![face]);
}

#[test]
fn test_flicker_resets_count() {
    let mut registry = TrackRegistry::with_default_config();
    let face = Rect::new(50.0, 50.0, 30.0, 30.0);

    registry.update(&[face]).unwrap();
    registry.update(&[face]).unwrap();
    registry.update(&[]).unwrap();
    registry.update(&[face]).unwrap();
    let rendered = registry.update(&[face]).unwrap();

    assert_eq!(registry.entries(), &[entry(face, 2)]);
    assert!(rendered.is_empty());
}

#[test]
fn test_stricter_confirmation() {
    let config = TrackerConfig {
        min_persistence: 4,
        ..TrackerConfig::default()
    };
    let mut registry = TrackRegistry::new(config).unwrap();
    let face = Rect::new(0.0, 0.0, 10.0, 10.0);

    for _ in 0..4 {
        assert!(registry.update(&[face]).unwrap().is_empty());
    }
    assert_eq!(registry.update(&[face]).unwrap(), vec![face]);
}

#[derive(Debug, thiserror::Error)]
#[error("unreachable")]
struct NeverFails;

struct StaticDetector(Vec<Rect>);

impl DetectionSource for StaticDetector {
    type Error = NeverFails;

    fn detect(&mut self, _input: &[u8], _width: u32, _height: u32) -> Result<Vec<Rect>, Self::Error> {
        Ok(self.0.clone())
    }
}

#[test]
fn test_pipeline_with_default_schedule() {
    let face = Rect::new(10.0, 10.0, 40.0, 40.0);
    let mut pipeline =
        TrackerPipeline::new(StaticDetector(vec![face]), PipelineConfig::default()).unwrap();

    // Detection on frames 0, 5, 10: confirmed on frame 10.
    let frame = vec![0u8; 16];
    for i in 0..10 {
        let rendered = pipeline.process_frame(&frame, 4, 4).unwrap();
        assert!(rendered.is_empty(), "frame {i} should render nothing");
    }
    assert_eq!(pipeline.process_frame(&frame, 4, 4).unwrap(), &[face]);
    assert_eq!(pipeline.process_frame(&frame, 4, 4).unwrap(), &[face]);
    assert_eq!(pipeline.stats().sampling_rounds, 3);
}
