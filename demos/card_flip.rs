//! Flips a card on a simulated tap and lets it flip back on its own.
//!
//! Run with `RUST_LOG=debug cargo run --example card_flip` to see the flip
//! lifecycle logged.

use std::time::{Duration, Instant};

use flipview::prelude::*;

fn main() -> flipview::Result<()> {
    env_logger::init();

    let attributes = FlipAttributes::from_pairs([
        ("flipAxis", "horizontal"),
        ("flipOriginEdge", "right"),
        ("flipDurationMs", "600"),
        ("autoFlipBack", "true"),
        ("autoFlipBackTimeMs", "800"),
    ])?;

    let mut controller = FlipController::with_config(
        SlotStack::with_density(2.0),
        AnimationLibrary::builtin(),
        attributes.to_config(),
    )?;
    let back = SlotId::next();
    let front = SlotId::next();
    controller.bind_slot(back)?;
    controller.bind_slot(front)?;
    controller.set_on_flip(|side| log::info!("Now showing the {:?}", side));

    // A quick tap in the middle of the card
    let mut detector = TapDetector::with_density(2.0);
    let now = Instant::now();
    for (event, at) in [
        (PointerEvent::Down { x: 120.0, y: 80.0 }, now),
        (
            PointerEvent::Up { x: 121.0, y: 80.0 },
            now + Duration::from_millis(70),
        ),
    ] {
        if let Some(gesture) = detector.feed(event, at) {
            controller.on_gesture(gesture);
        }
    }

    let mut flip_loop = FlipLoop::new()?;
    let mut flips = 0;
    let mut was_animating = controller.is_animating();
    flip_loop.run_until(&mut controller, Duration::from_secs(5), |c| {
        if was_animating && !c.is_animating() {
            flips += 1;
        }
        was_animating = c.is_animating();
        flips == 2
    })?;

    for slot in [front, back] {
        let Some(state) = controller.provider().get(slot) else {
            continue;
        };
        let corner = state
            .transform
            .to_matrix(240.0, 160.0, state.depth_hint)
            .apply_to_point(0.0, 0.0);
        log::info!(
            "Slot {}: {:?}, alpha {}, top-left corner at {:?}",
            slot.as_u64(),
            state.visibility,
            state.transform.alpha,
            corner
        );
    }
    Ok(())
}
