use flow_core::error::non_negative;
use flow_core::{Action, ActionContext, Handle, SetupError};

type TickFn = Box<dyn FnMut(f32, Handle)>;
type CompleteFn = Box<dyn FnOnce(bool)>;

/// Calls a function on every gated tick, forever or for a fixed time.
pub struct Ticker {
    tick: TickFn,
    on_complete: Option<CompleteFn>,
    ticking_time: f32,
    elapsed: f32,
}

impl Ticker {
    /// Ticks until stopped. The handle passed to `tick` lets the function stop
    /// its own ticker.
    pub fn new(tick: impl FnMut(f32, Handle) + 'static) -> Self {
        Self {
            tick: Box::new(tick),
            on_complete: None,
            ticking_time: 0.0,
            elapsed: 0.0,
        }
    }

    /// Ticks for `seconds` of accrued time, then completes. `0` ticks forever.
    pub fn for_time(mut self, seconds: f32) -> Self {
        self.ticking_time = seconds;
        self
    }

    pub fn on_complete(mut self, on_complete: impl FnOnce(bool) + 'static) -> Self {
        self.on_complete = Some(Box::new(on_complete));
        self
    }
}

impl Action for Ticker {
    fn setup(&mut self, ctx: &ActionContext<'_>) -> Result<(), SetupError> {
        let ticking_time = non_negative("ticking time", self.ticking_time)?;
        if ticking_time > 0.0 {
            ctx.set_max_action_time(ticking_time);
        }
        Ok(())
    }

    fn tick(&mut self, delta: f32, ctx: &ActionContext<'_>) {
        self.elapsed += delta;
        (self.tick)(delta, ctx.handle());

        if self.ticking_time > 0.0 && self.elapsed >= self.ticking_time && !ctx.is_finished() {
            ctx.mark_as_finished();
            self.complete(false, ctx);
        }
    }

    fn complete(&mut self, stopped: bool, _ctx: &ActionContext<'_>) {
        if let Some(on_complete) = self.on_complete.take() {
            on_complete(stopped);
        }
    }

    fn reset(&mut self, _call_update: bool, _ctx: &ActionContext<'_>) {
        self.elapsed = 0.0;
    }
}
