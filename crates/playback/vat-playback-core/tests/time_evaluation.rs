use std::rc::Rc;

use vat_playback_core::{
    evaluate, project_params, sample_track, ClipCatalog, Clock, ManualClock, ParamKey,
    ParamValue, PlaybackConfig, PlaybackStateMachine, Slot, TrackParam,
};

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn machine_on(catalog: &str, clock: &ManualClock, start: i32) -> PlaybackStateMachine {
    let json = vat_test_fixtures::catalogs::json(catalog).expect("load catalog fixture");
    let catalog = Rc::new(ClipCatalog::from_json(&json).expect("parse catalog fixture"));
    let cfg = PlaybackConfig {
        random_seed: Some(31),
        ..PlaybackConfig::default()
    };
    let mut m = PlaybackStateMachine::new(Rc::new(clock.clone()), &cfg);
    m.initialize(catalog, start).expect("initialize");
    m
}

#[test]
fn frames_advance_with_time_not_with_pulls() {
    let clock = ManualClock::new(5.0);
    let m = machine_on("idle-run", &clock, 0);
    let s = m.snapshot().unwrap();

    // Idle runs at 30 fps from t=5.
    assert_eq!(sample_track(s.track(Slot::A), 5.0).frame, 0);
    assert_eq!(sample_track(s.track(Slot::A), 5.5).frame, 15);
    // 31 frames per loop: t=5 + 31/30 wraps to frame 0.
    assert_eq!(sample_track(s.track(Slot::A), 5.0 + 31.0 / 30.0 + 0.001).frame, 0);

    clock.set(9.0);
    assert_eq!(m.update_and_get_state(0.0).unwrap(), s);
}

#[test]
fn crossfade_weight_follows_published_timing() {
    let clock = ManualClock::new(1.0);
    let mut m = machine_on("idle-run", &clock, 0);
    m.play_index(1, 0.3).unwrap();
    let s = m.snapshot().unwrap();

    approx(evaluate(&s, 1.0).weight_b, 0.0, 1e-6);
    approx(evaluate(&s, 1.15).weight_b, 0.5, 1e-3);
    approx(evaluate(&s, 1.3).weight_b, 1.0, 1e-6);
    approx(evaluate(&s, 4.0).weight_b, 1.0, 1e-6);

    // Fading back toward A reverses the weight.
    clock.set(2.0);
    m.play_index(0, 0.5).unwrap();
    let s = m.snapshot().unwrap();
    approx(evaluate(&s, 2.25).weight_b, 0.5, 1e-3);
    approx(evaluate(&s, 2.5).weight_b, 0.0, 1e-6);
}

#[test]
fn random_start_is_visible_immediately() {
    let clock = ManualClock::new(12.0);
    let mut m = machine_on("creature", &clock, 0);
    for _ in 0..50 {
        clock.advance(0.37);
        m.play_index_random_start(1, 0.0).unwrap();
        let s = m.snapshot().unwrap();
        let dest = s.destination();
        // The backdated start time puts the chosen frame on screen at call time.
        assert_eq!(sample_track(dest, clock.now()).frame, dest.debug_frame_index);
    }
}

#[test]
fn sequence_plays_one_continuous_span() {
    let clock = ManualClock::new(2.0);
    let mut m = machine_on("creature", &clock, 0);
    m.play_sequence(2, 5, 0.2, false, 0.0).unwrap();
    let s = m.snapshot().unwrap();
    let dest = s.destination();

    // Span 100..=239 at the last clip's 24 fps; clip boundaries pass without a cut.
    assert_eq!(sample_track(dest, 2.0).frame, 100);
    assert_eq!(sample_track(dest, 3.25).frame, 130);
    assert_eq!(sample_track(dest, 2.0 + 100.0 / 24.0).frame, 200);
}

#[test]
fn published_offsets_match_snapshot() {
    let clock = ManualClock::new(0.75);
    let mut m = machine_on("idle-run", &clock, 0);
    clock.set(1.25);
    m.play_index(1, 0.3).unwrap();
    let batch = project_params(&m.snapshot().unwrap());
    assert_eq!(
        batch.get(ParamKey::Track(Slot::A, TrackParam::TimeOffset)),
        Some(ParamValue::Float(0.75))
    );
    assert_eq!(
        batch.get(ParamKey::Track(Slot::B, TrackParam::TimeOffset)),
        Some(ParamValue::Float(1.25))
    );
    assert_eq!(
        batch.get(ParamKey::Track(Slot::B, TrackParam::Loop)),
        Some(ParamValue::Float(1.0))
    );
}
