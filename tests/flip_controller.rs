use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use flipview::prelude::*;

fn flip_view(config: FlipConfig) -> (FlipController<SlotStack>, SlotId, SlotId) {
    let mut controller =
        FlipController::with_config(SlotStack::new(), AnimationLibrary::builtin(), config)
            .unwrap();
    let back = SlotId::next();
    let front = SlotId::next();
    controller.bind_slot(back).unwrap();
    controller.bind_slot(front).unwrap();
    (controller, front, back)
}

fn record_flips(controller: &mut FlipController<SlotStack>) -> Arc<Mutex<Vec<FlipSide>>> {
    let flips = Arc::new(Mutex::new(Vec::new()));
    let sink = flips.clone();
    controller.set_on_flip(move |side| sink.lock().unwrap().push(side));
    flips
}

/// Trigger and play a default-length (400ms) flip to the end.
fn play_flip(controller: &mut FlipController<SlotStack>) {
    let t0 = Instant::now();
    controller.trigger();
    controller.advance(t0);
    controller.advance(t0 + Duration::from_millis(400));
}

#[test]
fn test_initial_state() {
    let (controller, front, back) = flip_view(FlipConfig::default());
    assert_eq!(controller.current_side(), FlipSide::Front);
    assert!(!controller.is_animating());
    assert_eq!(controller.front_slot(), Some(front));
    assert_eq!(controller.back_slot(), Some(back));

    let slots = controller.provider();
    assert_eq!(slots.visibility(front), Some(Visibility::Visible));
    assert_eq!(slots.visibility(back), Some(Visibility::Hidden));
    assert_eq!(slots.depth_hint(front), Some(8000.0));
    assert_eq!(slots.depth_hint(back), Some(8000.0));
}

#[test]
fn test_depth_hint_follows_density() {
    let mut controller = FlipController::with_config(
        SlotStack::with_density(2.5),
        AnimationLibrary::builtin(),
        FlipConfig::default(),
    )
    .unwrap();
    let slot = SlotId::next();
    controller.bind_slot(slot).unwrap();
    assert_eq!(controller.provider().depth_hint(slot), Some(20000.0));
}

#[test]
fn test_flip_to_back() {
    let (mut controller, front, back) = flip_view(FlipConfig::default());
    let flips = record_flips(&mut controller);
    let t0 = Instant::now();

    controller.trigger();
    assert!(controller.is_animating());
    assert_eq!(controller.current_side(), FlipSide::Front);
    assert_eq!(
        controller.provider().visibility(back),
        Some(Visibility::Visible)
    );

    controller.advance(t0);
    controller.advance(t0 + Duration::from_millis(399));
    assert!(controller.is_animating());
    assert!(flips.lock().unwrap().is_empty());

    controller.advance(t0 + Duration::from_millis(400));
    assert!(!controller.is_animating());
    assert_eq!(controller.current_side(), FlipSide::Back);
    assert_eq!(
        controller.provider().visibility(front),
        Some(Visibility::Hidden)
    );
    assert_eq!(
        controller.provider().visibility(back),
        Some(Visibility::Visible)
    );
    assert_eq!(*flips.lock().unwrap(), vec![FlipSide::Back]);
}

#[test]
fn test_faces_swap_at_half_time() {
    let (mut controller, front, back) = flip_view(FlipConfig::default());
    let t0 = Instant::now();
    controller.trigger();
    controller.advance(t0);

    controller.advance(t0 + Duration::from_millis(100));
    let front_t = controller.provider().transform(front).unwrap();
    let back_t = controller.provider().transform(back).unwrap();
    assert_eq!(front_t.alpha, 1.0);
    assert_eq!(back_t.alpha, 0.0);
    assert!(front_t.rotation_x > 0.0 && front_t.rotation_x < 90.0);
    assert!(back_t.rotation_x < 0.0 && back_t.rotation_x > -180.0);

    controller.advance(t0 + Duration::from_millis(300));
    assert_eq!(controller.provider().transform(front).unwrap().alpha, 0.0);
    assert_eq!(controller.provider().transform(back).unwrap().alpha, 1.0);

    controller.advance(t0 + Duration::from_millis(400));
    assert_eq!(
        controller.provider().transform(back),
        Some(SlotTransform::IDENTITY)
    );
    let front_t = controller.provider().transform(front).unwrap();
    assert_eq!(front_t.rotation_x, 180.0);
    assert_eq!(front_t.alpha, 0.0);
}

#[test]
fn test_triggers_while_animating_are_dropped() {
    let (mut controller, _, _) = flip_view(FlipConfig::default());
    let flips = record_flips(&mut controller);
    let t0 = Instant::now();

    controller.trigger();
    controller.advance(t0);
    for _ in 0..5 {
        controller.trigger();
        assert!(controller.is_animating());
        assert_eq!(controller.current_side(), FlipSide::Front);
    }

    controller.advance(t0 + Duration::from_millis(400));
    assert_eq!(controller.current_side(), FlipSide::Back);
    assert_eq!(*flips.lock().unwrap(), vec![FlipSide::Back]);
}

#[test]
fn test_round_trip() {
    let (mut controller, front, back) = flip_view(FlipConfig::default());
    let flips = record_flips(&mut controller);

    play_flip(&mut controller);
    play_flip(&mut controller);

    assert_eq!(controller.current_side(), FlipSide::Front);
    assert_eq!(*flips.lock().unwrap(), vec![FlipSide::Back, FlipSide::Front]);
    assert_eq!(
        controller.provider().transform(front),
        Some(SlotTransform::IDENTITY)
    );
    assert_eq!(
        controller.provider().visibility(back),
        Some(Visibility::Hidden)
    );
}

#[test]
fn test_flip_once() {
    let (mut controller, _, _) = flip_view(FlipConfig::new().flip_once(true));
    play_flip(&mut controller);
    assert_eq!(controller.current_side(), FlipSide::Back);

    for _ in 0..3 {
        controller.trigger();
        assert!(!controller.is_animating());
        assert_eq!(controller.current_side(), FlipSide::Back);
    }
}

#[test]
fn test_disabled_view_does_not_flip() {
    let (mut controller, _, _) = flip_view(FlipConfig::new().enabled(false));
    controller.trigger();
    assert!(!controller.is_animating());
    assert!(!controller.on_gesture(Gesture::Tap));
}

#[test]
fn test_set_duration_retimes_pair() {
    let (mut controller, _, _) = flip_view(FlipConfig::default());
    controller.set_duration(250).unwrap();

    let pair = controller.pair().unwrap();
    assert_eq!(pair.out_anim().step(0).unwrap().duration_ms(), 250);
    assert_eq!(pair.out_anim().step(1).unwrap().start_delay_ms(), 125);
    assert_eq!(pair.in_anim().step(1).unwrap().duration_ms(), 250);
    assert_eq!(pair.in_anim().step(2).unwrap().start_delay_ms(), 125);
    assert_eq!(controller.config().duration_ms, 250);
    assert_eq!(controller.current_side(), FlipSide::Front);
}

#[test]
fn test_negative_duration_is_rejected() {
    let (mut controller, _, _) = flip_view(FlipConfig::default());
    assert!(matches!(
        controller.set_duration(-1),
        Err(FlipError::InvalidConfig(_))
    ));
    assert_eq!(controller.config().duration_ms, 400);
}

fn auto_flip_back_view() -> FlipController<SlotStack> {
    let config = FlipConfig::new()
        .auto_flip_back(true)
        .auto_flip_back_delay_ms(1000);
    flip_view(config).0
}

#[test]
fn test_auto_flip_back_is_scheduled() {
    let mut controller = auto_flip_back_view();
    play_flip(&mut controller);

    assert_eq!(
        controller.take_scheduled_flip_back(),
        Some(Duration::from_millis(1000))
    );
    assert_eq!(controller.take_scheduled_flip_back(), None);

    // The host's timer fires
    play_flip(&mut controller);
    assert_eq!(controller.current_side(), FlipSide::Front);
    assert_eq!(controller.take_scheduled_flip_back(), None);
}

#[test]
fn test_auto_flip_back_off_schedules_nothing() {
    let (mut controller, _, _) = flip_view(FlipConfig::new().auto_flip_back_delay_ms(1000));
    play_flip(&mut controller);
    assert_eq!(controller.current_side(), FlipSide::Back);
    assert_eq!(controller.take_scheduled_flip_back(), None);
}

#[test]
fn test_undrained_flip_backs_do_not_pile_up() {
    let mut controller = auto_flip_back_view();
    let config = controller.config().clone().auto_flip_back_delay_ms(500);
    for _ in 0..50 {
        play_flip(&mut controller);
        play_flip(&mut controller);
    }
    controller.configure(config).unwrap();
    play_flip(&mut controller);

    // Only the latest request survives
    assert_eq!(
        controller.take_scheduled_flip_back(),
        Some(Duration::from_millis(500))
    );
    assert_eq!(controller.take_scheduled_flip_back(), None);
}

#[test]
fn test_stale_flip_back_is_harmless() {
    let mut controller = auto_flip_back_view();
    play_flip(&mut controller);
    assert!(controller.take_scheduled_flip_back().is_some());

    let config = controller.config().clone().flip_once(true);
    controller.configure(config).unwrap();

    controller.trigger();
    assert!(!controller.is_animating());
    assert_eq!(controller.current_side(), FlipSide::Back);
}

#[test]
fn test_third_slot_is_rejected() {
    let (mut controller, front, back) = flip_view(FlipConfig::default());
    let err = controller.bind_slot(SlotId::next()).unwrap_err();
    assert!(matches!(err, FlipError::StructuralViolation { slots: 3 }));
    assert_eq!(controller.provider().slot_count(), 2);
    assert_eq!(controller.front_slot(), Some(front));
    assert_eq!(controller.back_slot(), Some(back));
}

#[test]
fn test_adopt_rejects_overfull_provider() {
    let mut slots = SlotStack::new();
    for _ in 0..3 {
        slots.add_slot(SlotId::next());
    }
    let mut controller =
        FlipController::with_config(slots, AnimationLibrary::builtin(), FlipConfig::default())
            .unwrap();
    assert!(matches!(
        controller.adopt_slots(),
        Err(FlipError::StructuralViolation { slots: 3 })
    ));
}

#[test]
fn test_adopt_existing_slots() {
    let mut slots = SlotStack::new();
    let (back, front) = (SlotId::next(), SlotId::next());
    slots.add_slot(back);
    slots.add_slot(front);
    let mut controller =
        FlipController::with_config(slots, AnimationLibrary::builtin(), FlipConfig::default())
            .unwrap();
    controller.adopt_slots().unwrap();
    assert_eq!(controller.front_slot(), Some(front));
    assert_eq!(
        controller.provider().visibility(back),
        Some(Visibility::Hidden)
    );
    play_flip(&mut controller);
    assert_eq!(controller.current_side(), FlipSide::Back);
}

#[test]
fn test_fewer_than_two_slots_cannot_flip() {
    let mut controller = FlipController::with_config(
        SlotStack::new(),
        AnimationLibrary::builtin(),
        FlipConfig::default(),
    )
    .unwrap();
    controller.trigger();
    assert!(!controller.is_animating());

    let only = SlotId::next();
    controller.bind_slot(only).unwrap();
    controller.trigger();
    controller.flip_immediate(false);
    assert!(!controller.is_animating());
    assert_eq!(controller.current_side(), FlipSide::Front);
    assert_eq!(controller.front_slot(), Some(only));
    assert_eq!(controller.back_slot(), None);
}

#[test]
fn test_clear_slots_resets_to_front() {
    let (mut controller, _, _) = flip_view(FlipConfig::default());
    play_flip(&mut controller);
    assert_eq!(controller.current_side(), FlipSide::Back);

    controller.clear_slots();
    assert_eq!(controller.current_side(), FlipSide::Front);
    assert_eq!(controller.provider().slot_count(), 0);
    assert_eq!(controller.front_slot(), None);
}

#[test]
fn test_clear_slots_drops_running_flip() {
    let (mut controller, _, _) = flip_view(FlipConfig::default());
    let flips = record_flips(&mut controller);
    controller.trigger();
    controller.advance(Instant::now());
    controller.clear_slots();

    assert!(!controller.is_animating());
    assert!(!controller.pair().unwrap().is_running());
    assert!(flips.lock().unwrap().is_empty());

    let (back, front) = (SlotId::next(), SlotId::next());
    controller.bind_slot(back).unwrap();
    controller.bind_slot(front).unwrap();
    play_flip(&mut controller);
    assert_eq!(controller.current_side(), FlipSide::Back);
}

#[test]
fn test_flip_immediate_without_animation() {
    let (mut controller, front, back) = flip_view(FlipConfig::default());
    let flips = record_flips(&mut controller);

    controller.flip_immediate(false);
    assert_eq!(controller.current_side(), FlipSide::Back);
    assert!(!controller.is_animating());
    assert_eq!(*flips.lock().unwrap(), vec![FlipSide::Back]);
    assert_eq!(
        controller.provider().visibility(front),
        Some(Visibility::Hidden)
    );
    assert_eq!(
        controller.provider().transform(back),
        Some(SlotTransform::IDENTITY)
    );

    let pair = controller.pair().unwrap();
    assert!(!pair.out_anim().is_instant());
    assert_eq!(pair.total_duration_ms(), 400);
    assert_eq!(pair.out_anim().step(1).unwrap().start_delay_ms(), 200);
}

#[test]
fn test_flip_immediate_with_animation_runs_normally() {
    let (mut controller, _, _) = flip_view(FlipConfig::default());
    controller.flip_immediate(true);
    assert!(controller.is_animating());
    assert_eq!(controller.current_side(), FlipSide::Front);
}

#[test]
fn test_flip_immediate_bypasses_enabled_only() {
    let (mut controller, _, _) = flip_view(FlipConfig::new().enabled(false).flip_once(true));
    controller.flip_immediate(false);
    assert_eq!(controller.current_side(), FlipSide::Back);

    controller.flip_immediate(false);
    assert_eq!(controller.current_side(), FlipSide::Back);

    controller.trigger();
    assert!(!controller.is_animating());
}

#[test]
fn test_flip_immediate_does_not_preempt() {
    let (mut controller, _, _) = flip_view(FlipConfig::default());
    let t0 = Instant::now();
    controller.trigger();
    controller.advance(t0);

    controller.flip_immediate(false);
    assert!(controller.is_animating());
    assert_eq!(controller.current_side(), FlipSide::Front);

    controller.advance(t0 + Duration::from_millis(400));
    assert_eq!(controller.current_side(), FlipSide::Back);
}

#[test]
fn test_zero_duration_completes_synchronously() {
    let (mut controller, _, _) = flip_view(FlipConfig::new().duration_ms(0));
    controller.trigger();
    assert!(!controller.is_animating());
    assert_eq!(controller.current_side(), FlipSide::Back);
}

#[test]
fn test_configure_mid_flight_waits_for_completion() {
    let (mut controller, front, _) = flip_view(FlipConfig::default());
    let t0 = Instant::now();
    controller.trigger();
    controller.advance(t0);

    let config = FlipConfig::new()
        .direction(FlipAxis::Horizontal, OriginEdge::Right)
        .duration_ms(100);
    controller.configure(config).unwrap();
    assert_eq!(controller.config().axis, FlipAxis::Horizontal);
    assert_eq!(controller.pair().unwrap().duration_ms(), Some(400));

    // The running flip keeps its original timing
    controller.advance(t0 + Duration::from_millis(100));
    assert!(controller.is_animating());
    controller.advance(t0 + Duration::from_millis(400));
    assert_eq!(controller.current_side(), FlipSide::Back);

    let pair = controller.pair().unwrap();
    assert_eq!(pair.duration_ms(), Some(100));
    assert_eq!(pair.out_anim().sample(u64::MAX).rotation_y, -180.0);

    // The hidden front slot holds the end state of the vertical flip until
    // the next flip redraws it
    assert_eq!(
        controller.provider().transform(front).unwrap().rotation_x,
        180.0
    );

    let t1 = Instant::now();
    controller.trigger();
    controller.advance(t1);
    let entering = controller.provider().transform(front).unwrap();
    assert_eq!(entering.rotation_x, 0.0);
    assert_eq!(entering.rotation_y, 180.0);

    controller.advance(t1 + Duration::from_millis(100));
    assert_eq!(controller.current_side(), FlipSide::Front);
    assert_eq!(
        controller.provider().transform(front),
        Some(SlotTransform::IDENTITY)
    );
}

#[test]
fn test_flip_back_after_axis_change_leaves_front_flat() {
    let (mut controller, front, back) =
        flip_view(FlipConfig::new().direction(FlipAxis::Horizontal, OriginEdge::Left));
    play_flip(&mut controller);
    assert_eq!(controller.current_side(), FlipSide::Back);
    assert_ne!(
        controller.provider().transform(front).unwrap().rotation_y,
        0.0
    );

    controller
        .configure(FlipConfig::new().direction(FlipAxis::Vertical, OriginEdge::Top))
        .unwrap();
    play_flip(&mut controller);

    assert_eq!(controller.current_side(), FlipSide::Front);
    assert_eq!(
        controller.provider().transform(front),
        Some(SlotTransform::IDENTITY)
    );
    assert_eq!(
        controller.provider().visibility(front),
        Some(Visibility::Visible)
    );
    assert_eq!(
        controller.provider().visibility(back),
        Some(Visibility::Hidden)
    );
    let hidden = controller.provider().transform(back).unwrap();
    assert_eq!(hidden.rotation_y, 0.0);
    assert_eq!(hidden.alpha, 0.0);
}

#[test]
fn test_missing_animations_fail_at_configure() {
    let mut library = AnimationLibrary::builtin();
    library.remove(FlipAxis::Horizontal, OriginEdge::Left);

    let result = FlipController::with_config(
        SlotStack::new(),
        library.clone(),
        FlipConfig::new().direction(FlipAxis::Horizontal, OriginEdge::Left),
    );
    assert!(matches!(
        result,
        Err(FlipError::MissingAnimationResources { .. })
    ));

    let mut controller =
        FlipController::with_config(SlotStack::new(), library, FlipConfig::default()).unwrap();
    let err = controller
        .configure(FlipConfig::new().direction(FlipAxis::Horizontal, OriginEdge::Left))
        .unwrap_err();
    assert!(matches!(err, FlipError::MissingAnimationResources { .. }));
    assert_eq!(controller.config().axis, FlipAxis::Vertical);
}

#[test]
fn test_unconfigured_controller_does_not_flip() {
    let mut controller = FlipController::new(SlotStack::new(), AnimationLibrary::builtin());
    controller.bind_slot(SlotId::next()).unwrap();
    controller.bind_slot(SlotId::next()).unwrap();
    controller.trigger();
    assert!(!controller.is_animating());
    assert!(controller.pair().is_none());

    controller.configure(FlipConfig::default()).unwrap();
    controller.trigger();
    assert!(controller.is_animating());
}

#[test]
fn test_gestures() {
    let (mut controller, _, _) = flip_view(FlipConfig::default());
    assert!(controller.on_gesture(Gesture::Down));
    assert!(!controller.on_gesture(Gesture::Fling {
        velocity_x: 3000.0,
        velocity_y: 0.0
    }));
    assert!(!controller.on_gesture(Gesture::Drag { dx: 40.0, dy: 0.0 }));
    assert!(!controller.is_animating());

    assert!(controller.on_gesture(Gesture::Tap));
    assert!(controller.is_animating());
}

#[test]
fn test_gestures_ignored_without_touch_trigger() {
    let (mut controller, _, _) = flip_view(FlipConfig::new().trigger_on_gesture(false));
    assert!(!controller.on_gesture(Gesture::Down));
    assert!(!controller.on_gesture(Gesture::Tap));
    assert!(!controller.is_animating());

    controller.trigger();
    assert!(controller.is_animating());
}

#[test]
fn test_tap_detector_drives_flip() {
    let (mut controller, _, _) = flip_view(FlipConfig::default());
    let mut detector = TapDetector::new();
    let t0 = Instant::now();

    let events = [
        (PointerEvent::Down { x: 50.0, y: 50.0 }, t0),
        (PointerEvent::Up { x: 51.0, y: 50.0 }, t0 + Duration::from_millis(90)),
    ];
    for (event, at) in events {
        if let Some(gesture) = detector.feed(event, at) {
            controller.on_gesture(gesture);
        }
    }
    assert!(controller.is_animating());
}

#[test]
fn test_attributes_configure_controller() {
    let attributes = FlipAttributes::from_pairs([
        ("flipAxis", "horizontal"),
        ("flipOriginEdge", "left"),
        ("flipDurationMs", "300"),
    ])
    .unwrap();
    let (mut controller, _, _) = flip_view(attributes.to_config());
    assert_eq!(controller.pair().unwrap().duration_ms(), Some(300));

    let t0 = Instant::now();
    controller.trigger();
    controller.advance(t0);
    controller.advance(t0 + Duration::from_millis(300));
    assert_eq!(controller.current_side(), FlipSide::Back);
}
