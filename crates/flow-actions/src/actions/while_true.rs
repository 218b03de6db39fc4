use flow_core::{Action, ActionContext, SetupError};

use super::Timeout;

type CompleteFn = Box<dyn FnOnce(bool, bool)>;

/// Calls a tick function for as long as a predicate holds.
///
/// Launching while the predicate is already false is rejected with
/// [`SetupError::PredicateFalse`]. The optional completion callback receives
/// `(timed_out, stopped)`.
pub struct WhileTrueExecute {
    predicate: Box<dyn FnMut() -> bool>,
    tick: Box<dyn FnMut(f32)>,
    on_complete: Option<CompleteFn>,
    timeout_secs: f32,
    timeout: Timeout,
}

impl WhileTrueExecute {
    pub fn new(predicate: impl FnMut() -> bool + 'static, tick: impl FnMut(f32) + 'static) -> Self {
        Self {
            predicate: Box::new(predicate),
            tick: Box::new(tick),
            on_complete: None,
            timeout_secs: 0.0,
            timeout: Timeout::default(),
        }
    }

    pub fn with_timeout(mut self, seconds: f32) -> Self {
        self.timeout_secs = seconds;
        self
    }

    pub fn on_complete(mut self, on_complete: impl FnOnce(bool, bool) + 'static) -> Self {
        self.on_complete = Some(Box::new(on_complete));
        self
    }

    fn finish(&mut self, timed_out: bool, ctx: &ActionContext<'_>) {
        ctx.mark_as_finished();
        if let Some(on_complete) = self.on_complete.take() {
            on_complete(timed_out, false);
        }
    }
}

impl Action for WhileTrueExecute {
    fn setup(&mut self, ctx: &ActionContext<'_>) -> Result<(), SetupError> {
        self.timeout = Timeout::setup(self.timeout_secs, ctx)?;
        if !(self.predicate)() {
            return Err(SetupError::PredicateFalse);
        }
        Ok(())
    }

    fn tick(&mut self, delta: f32, ctx: &ActionContext<'_>) {
        if self.timeout.expired(delta) {
            self.finish(true, ctx);
        } else if (self.predicate)() {
            (self.tick)(delta);
        } else {
            self.finish(false, ctx);
        }
    }

    fn complete(&mut self, stopped: bool, _ctx: &ActionContext<'_>) {
        if let Some(on_complete) = self.on_complete.take() {
            on_complete(false, stopped);
        }
    }

    fn reset(&mut self, _call_update: bool, _ctx: &ActionContext<'_>) {
        self.timeout = Timeout::new(self.timeout_secs);
    }
}
