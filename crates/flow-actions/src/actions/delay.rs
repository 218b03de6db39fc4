use flow_core::error::non_negative;
use flow_core::{Action, ActionContext, SetupError};

/// Runs a callback once the accrued time exceeds the delay.
pub struct Delay {
    delay: f32,
    current: f32,
    callback: Option<Box<dyn FnOnce(bool)>>,
}

impl Delay {
    /// `callback` receives `stopped`.
    pub fn new(seconds: f32, callback: impl FnOnce(bool) + 'static) -> Self {
        Self {
            delay: seconds,
            current: 0.0,
            callback: Some(Box::new(callback)),
        }
    }
}

impl Action for Delay {
    fn setup(&mut self, ctx: &ActionContext<'_>) -> Result<(), SetupError> {
        self.delay = non_negative("delay", self.delay)?;
        if self.delay > 0.0 {
            ctx.set_max_action_time(self.delay);
        }
        Ok(())
    }

    fn tick(&mut self, delta: f32, ctx: &ActionContext<'_>) {
        self.current += delta;
        if self.current > self.delay {
            ctx.mark_as_finished();
            self.complete(false, ctx);
        }
    }

    fn complete(&mut self, stopped: bool, _ctx: &ActionContext<'_>) {
        if let Some(callback) = self.callback.take() {
            callback(stopped);
        }
    }

    fn reset(&mut self, _call_update: bool, _ctx: &ActionContext<'_>) {
        self.current = 0.0;
    }
}
