use flow_core::{Action, ActionContext};

/// Runs a callback after a number of ticks.
///
/// The callback fires on tick `ticks + 1`: `DelayTicks::new(0, ..)` fires on
/// the first tick the action receives, which is never the frame that added it.
pub struct DelayTicks {
    ticks: u32,
    current: u32,
    callback: Option<Box<dyn FnOnce(bool)>>,
}

impl DelayTicks {
    pub fn new(ticks: u32, callback: impl FnOnce(bool) + 'static) -> Self {
        Self {
            ticks,
            current: 0,
            callback: Some(Box::new(callback)),
        }
    }
}

impl Action for DelayTicks {
    fn tick(&mut self, _delta: f32, ctx: &ActionContext<'_>) {
        self.current += 1;
        if self.current > self.ticks {
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
        self.current = 0;
    }
}
