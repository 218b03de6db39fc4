use flow_core::error::positive;
use flow_core::{Action, ActionContext, SetupError};
use tracing::trace;

/// Rate limiter: runs a function at most once per `lock` seconds.
///
/// The first launch runs immediately. Retriggers that arrive inside the lock
/// window are queued, up to `max_queued`, and released one per window.
/// Retriggers after the window has passed run immediately and open a new one.
pub struct DoNoMoreThanXTime {
    lock: f32,
    max_queued: u32,
    current: f32,
    queued: u32,
    exec: Box<dyn FnMut()>,
}

impl DoNoMoreThanXTime {
    pub fn new(lock: f32, max_queued: u32, exec: impl FnMut() + 'static) -> Self {
        Self {
            lock,
            max_queued,
            current: 0.0,
            queued: 0,
            exec: Box::new(exec),
        }
    }

    fn run(&mut self) {
        self.current = 0.0;
        (self.exec)();
    }
}

impl Action for DoNoMoreThanXTime {
    fn setup(&mut self, _ctx: &ActionContext<'_>) -> Result<(), SetupError> {
        self.lock = positive("lock time", self.lock)?;
        if self.max_queued == 0 {
            return Err(SetupError::ZeroCount { what: "max queued" });
        }
        Ok(())
    }

    fn init(&mut self, _ctx: &ActionContext<'_>) {
        self.queued = 0;
        self.run();
    }

    fn retriggered(&mut self, ctx: &ActionContext<'_>) {
        if self.current < self.lock {
            if self.queued < self.max_queued {
                self.queued += 1;
            }
            trace!(handle = %ctx.handle(), queued = self.queued, "run queued");
        } else {
            self.run();
        }
    }

    fn tick(&mut self, delta: f32, _ctx: &ActionContext<'_>) {
        if self.current < self.lock {
            self.current += delta;
        }
        if self.queued > 0 && self.current >= self.lock {
            self.queued -= 1;
            self.run();
        }
    }

    fn reset(&mut self, _call_update: bool, _ctx: &ActionContext<'_>) {
        self.current = 0.0;
        self.queued = 0;
    }
}
