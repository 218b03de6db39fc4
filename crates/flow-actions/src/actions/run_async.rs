use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::thread;

use flow_core::{Action, ActionContext, SetupError};
use tracing::{debug, error};

use super::Timeout;

type Work = Box<dyn FnOnce() + Send>;
type Callback = Box<dyn FnOnce(bool, bool)>;

/// Where background work of [`RunAsyncThen`] runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AsyncPriority {
    /// The tokio blocking pool when called inside a runtime, otherwise a
    /// dedicated thread.
    #[default]
    Normal,
    /// Always a dedicated thread.
    High,
}

/// Runs work off the frame thread, then a callback back on it.
///
/// The frame thread polls a single completion flag every tick. The callback
/// receives `(timed_out, stopped)`. Stopping the action does not cancel the
/// work: it runs to the end and its completion is ignored.
pub struct RunAsyncThen {
    work: Option<Work>,
    callback: Option<Callback>,
    priority: AsyncPriority,
    timeout_secs: f32,
    timeout: Timeout,
    done: Arc<AtomicBool>,
}

impl RunAsyncThen {
    pub fn new(work: impl FnOnce() + Send + 'static, callback: impl FnOnce(bool, bool) + 'static) -> Self {
        Self {
            work: Some(Box::new(work)),
            callback: Some(Box::new(callback)),
            priority: AsyncPriority::Normal,
            timeout_secs: 0.0,
            timeout: Timeout::default(),
            done: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_timeout(mut self, seconds: f32) -> Self {
        self.timeout_secs = seconds;
        self
    }

    pub fn with_priority(mut self, priority: AsyncPriority) -> Self {
        self.priority = priority;
        self
    }

    fn finish(&mut self, timed_out: bool, ctx: &ActionContext<'_>) {
        ctx.mark_as_finished();
        if let Some(callback) = self.callback.take() {
            callback(timed_out, false);
        }
    }
}

impl Action for RunAsyncThen {
    fn setup(&mut self, ctx: &ActionContext<'_>) -> Result<(), SetupError> {
        self.timeout = Timeout::setup(self.timeout_secs, ctx)?;
        Ok(())
    }

    fn init(&mut self, ctx: &ActionContext<'_>) {
        let Some(work) = self.work.take() else {
            return;
        };
        let flag = Arc::downgrade(&self.done);
        let job = move || {
            work();
            signal(&flag);
        };

        match dispatch(self.priority, job) {
            Ok(worker) => debug!(handle = %ctx.handle(), worker, "async work dispatched"),
            Err(err) => {
                error!(handle = %ctx.handle(), %err, "failed to dispatch async work");
                ctx.mark_as_finished();
            }
        }
    }

    fn tick(&mut self, delta: f32, ctx: &ActionContext<'_>) {
        if self.timeout.expired(delta) {
            self.finish(true, ctx);
        } else if self.done.load(Ordering::Acquire) {
            self.finish(false, ctx);
        }
    }

    fn complete(&mut self, stopped: bool, _ctx: &ActionContext<'_>) {
        if let Some(callback) = self.callback.take() {
            callback(false, stopped);
        }
    }
}

fn signal(flag: &Weak<AtomicBool>) {
    if let Some(done) = flag.upgrade() {
        done.store(true, Ordering::Release);
    }
}

fn dispatch(priority: AsyncPriority, job: impl FnOnce() + Send + 'static) -> std::io::Result<&'static str> {
    if priority == AsyncPriority::Normal {
        if let Ok(runtime) = tokio::runtime::Handle::try_current() {
            drop(runtime.spawn_blocking(job));
            return Ok("tokio-blocking");
        }
    }

    let name = match priority {
        AsyncPriority::Normal => "flow-async",
        AsyncPriority::High => "flow-async-high",
    };
    thread::Builder::new().name(name.to_owned()).spawn(job)?;
    Ok(name)
}
