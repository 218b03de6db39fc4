use flow_core::error::positive;
use flow_core::{Action, ActionContext, SetupError};

/// Runs a function on launch, then blocks further runs for `lock` seconds.
///
/// Used with an instance id: retriggers while the lock is alive are ignored.
pub struct TimeLock {
    lock: f32,
    current: f32,
    exec: Option<Box<dyn FnOnce()>>,
}

impl TimeLock {
    pub fn new(lock: f32, exec: impl FnOnce() + 'static) -> Self {
        Self {
            lock,
            current: 0.0,
            exec: Some(Box::new(exec)),
        }
    }
}

impl Action for TimeLock {
    fn setup(&mut self, ctx: &ActionContext<'_>) -> Result<(), SetupError> {
        self.lock = positive("lock time", self.lock)?;
        ctx.set_max_action_time(self.lock);
        Ok(())
    }

    fn init(&mut self, _ctx: &ActionContext<'_>) {
        self.current = 0.0;
        if let Some(exec) = self.exec.take() {
            exec();
        }
    }

    fn tick(&mut self, delta: f32, ctx: &ActionContext<'_>) {
        self.current += delta;
        if self.current >= self.lock {
            ctx.mark_as_finished();
        }
    }

    fn reset(&mut self, _call_update: bool, _ctx: &ActionContext<'_>) {
        self.current = 0.0;
    }
}
