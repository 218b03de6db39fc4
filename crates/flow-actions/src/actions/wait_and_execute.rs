use flow_core::{Action, ActionContext, SetupError};

use super::Timeout;

type Predicate = Box<dyn FnMut(f32) -> bool>;
type Callback = Box<dyn FnOnce(bool, bool)>;

/// Polls a predicate every tick and runs a callback once it holds.
///
/// The callback receives `(timed_out, stopped)`. If the predicate already holds
/// during setup, the callback runs right away and no action is created; the
/// launch reports [`SetupError::AlreadySatisfied`] and yields an invalid
/// handle.
pub struct WaitAndExecute {
    predicate: Predicate,
    callback: Option<Callback>,
    timeout_secs: f32,
    timeout: Timeout,
}

impl WaitAndExecute {
    /// `predicate` receives the gated delta, `0.0` for the check during setup.
    pub fn new(
        predicate: impl FnMut(f32) -> bool + 'static,
        callback: impl FnOnce(bool, bool) + 'static,
    ) -> Self {
        Self {
            predicate: Box::new(predicate),
            callback: Some(Box::new(callback)),
            timeout_secs: 0.0,
            timeout: Timeout::default(),
        }
    }

    /// Gives up after `seconds`, running the callback with `timed_out = true`.
    /// `0` waits forever.
    pub fn with_timeout(mut self, seconds: f32) -> Self {
        self.timeout_secs = seconds;
        self
    }

    fn finish(&mut self, timed_out: bool, ctx: &ActionContext<'_>) {
        ctx.mark_as_finished();
        if let Some(callback) = self.callback.take() {
            callback(timed_out, false);
        }
    }
}

impl Action for WaitAndExecute {
    fn setup(&mut self, ctx: &ActionContext<'_>) -> Result<(), SetupError> {
        self.timeout = Timeout::setup(self.timeout_secs, ctx)?;
        if (self.predicate)(0.0) {
            self.finish(false, ctx);
            return Err(SetupError::AlreadySatisfied);
        }
        Ok(())
    }

    fn tick(&mut self, delta: f32, ctx: &ActionContext<'_>) {
        if self.timeout.expired(delta) {
            self.finish(true, ctx);
        } else if (self.predicate)(delta) {
            self.finish(false, ctx);
        }
    }

    fn complete(&mut self, stopped: bool, _ctx: &ActionContext<'_>) {
        if let Some(callback) = self.callback.take() {
            callback(false, stopped);
        }
    }

    fn reset(&mut self, _call_update: bool, _ctx: &ActionContext<'_>) {
        self.timeout = Timeout::new(self.timeout_secs);
    }
}
