//! Event loop integration.
//!
//! [`FlipLoop`] owns a calloop event loop whose data is the
//! [`FlipController`]. A repeating frame timer advances the running flip, and
//! every auto-flip-back the controller requests becomes a one-shot timer on
//! the same loop. Everything runs on the thread that dispatches the loop.

use std::time::{Duration, Instant};

use calloop::timer::{TimeoutAction, Timer};
use calloop::{EventLoop, LoopHandle, LoopSignal};

use crate::error::Result;
use crate::flip::FlipController;
use crate::slots::ViewSlotProvider;

/// Default frame interval (~60 fps)
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

pub struct FlipLoop<P: ViewSlotProvider + 'static> {
    event_loop: EventLoop<'static, FlipController<P>>,
}

impl<P: ViewSlotProvider + 'static> FlipLoop<P> {
    pub fn new() -> Result<Self> {
        Self::with_frame_interval(FRAME_INTERVAL)
    }

    pub fn with_frame_interval(frame_interval: Duration) -> Result<Self> {
        let event_loop: EventLoop<'static, FlipController<P>> = EventLoop::try_new()?;
        let handle = event_loop.handle();
        let timer_handle = handle.clone();

        handle
            .insert_source(Timer::immediate(), move |_, _, controller| {
                controller.advance(Instant::now());
                if let Some(delay) = controller.take_scheduled_flip_back() {
                    schedule_flip_back(&timer_handle, delay);
                }
                TimeoutAction::ToDuration(frame_interval)
            })
            .map_err(|e| e.error)?;

        Ok(Self { event_loop })
    }

    pub fn handle(&self) -> LoopHandle<'static, FlipController<P>> {
        self.event_loop.handle()
    }

    pub fn signal(&self) -> LoopSignal {
        self.event_loop.get_signal()
    }

    /// Process pending events, waiting at most `timeout` for one.
    pub fn dispatch(
        &mut self,
        timeout: Option<Duration>,
        controller: &mut FlipController<P>,
    ) -> Result<()> {
        self.event_loop.dispatch(timeout, controller)?;
        Ok(())
    }

    /// Dispatch until `until` returns true or `deadline` passes.
    ///
    /// Returns whether `until` was satisfied.
    pub fn run_until<F>(
        &mut self,
        controller: &mut FlipController<P>,
        deadline: Duration,
        mut until: F,
    ) -> Result<bool>
    where
        F: FnMut(&FlipController<P>) -> bool,
    {
        let end = Instant::now() + deadline;
        loop {
            if until(controller) {
                return Ok(true);
            }
            let now = Instant::now();
            if now >= end {
                return Ok(false);
            }
            self.dispatch(Some(end - now), controller)?;
        }
    }

    /// Dispatch until [`LoopSignal::stop`] is called.
    pub fn run(&mut self, controller: &mut FlipController<P>) -> Result<()> {
        self.event_loop.run(None::<Duration>, controller, |_| {})?;
        Ok(())
    }
}

/// One-shot timer that re-triggers the controller. A trigger that is no
/// longer allowed when the timer fires is a no-op.
fn schedule_flip_back<P: ViewSlotProvider + 'static>(
    handle: &LoopHandle<'static, FlipController<P>>,
    delay: Duration,
) {
    log::debug!("Auto flip back in {}ms", delay.as_millis());
    let inserted = handle.insert_source(Timer::from_duration(delay), |_, _, controller| {
        controller.trigger();
        TimeoutAction::Drop
    });
    if let Err(err) = inserted {
        log::warn!("Failed to schedule auto flip back: {}", err.error);
    }
}
