//! Awaiters for coroutines spawned with [`Flow::spawn`](crate::Flow::spawn).
//!
//! Each awaiter launches a backing action through the [`Launcher`] and suspends
//! the coroutine until that action completes naturally. Stopping the backing
//! action with completion also resumes it; stopping it without completion, or
//! losing its owner, leaves the coroutine suspended for good.
//!
//! ```ignore
//! let script = flow.downgrade();
//! flow.spawn(async move {
//!     script.on(&owner).wait_seconds(1.5).await;
//!     let timed_out = script.on(&owner).wait_until(|_| door_open(), 5.0).await;
//! });
//! ```

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use flow_core::{Continuation, Suspend};

use crate::actions::{Delay, DelayTicks, RunAsyncThen, WaitAndExecute};
use crate::flow::Launcher;

impl Launcher {
    /// Resumes after `seconds` of accrued time.
    pub fn wait_seconds(self, seconds: f32) -> Suspend {
        self.suspend(move |continuation| {
            Delay::new(seconds, move |_stopped| continuation.resume())
        })
    }

    /// Resumes after `ticks` frames.
    pub fn wait_ticks(self, ticks: u32) -> Suspend {
        self.suspend(move |continuation| {
            DelayTicks::new(ticks, move |_stopped| continuation.resume())
        })
    }

    /// Resumes once `predicate` holds. Resolves to `true` if it timed out
    /// instead. A `timeout` of `0` waits forever.
    pub fn wait_until(
        self,
        predicate: impl FnMut(f32) -> bool + 'static,
        timeout: f32,
    ) -> impl Future<Output = bool> {
        self.suspend_with_outcome(move |continuation, outcome| {
            WaitAndExecute::new(predicate, move |timed_out, _stopped| {
                outcome.set(timed_out);
                continuation.resume();
            })
            .with_timeout(timeout)
        })
    }

    /// Runs `work` off the frame thread and resumes once it is done. Resolves to
    /// `true` if it timed out instead.
    pub fn run_async_and_wait(
        self,
        work: impl FnOnce() + Send + 'static,
        timeout: f32,
    ) -> impl Future<Output = bool> {
        self.suspend_with_outcome(move |continuation, outcome| {
            RunAsyncThen::new(work, move |timed_out, _stopped| {
                outcome.set(timed_out);
                continuation.resume();
            })
            .with_timeout(timeout)
        })
    }

    fn suspend<A, F>(self, build: F) -> Suspend
    where
        A: flow_core::Action,
        F: FnOnce(Continuation) -> A + 'static,
    {
        let driver = self.driver.clone();
        Suspend::new(driver, move |continuation| self.launch(build(continuation)))
    }

    fn suspend_with_outcome<A, F>(self, build: F) -> impl Future<Output = bool>
    where
        A: flow_core::Action,
        F: FnOnce(Continuation, Rc<Cell<bool>>) -> A + 'static,
    {
        let outcome = Rc::new(Cell::new(false));
        let slot = Rc::clone(&outcome);
        let suspend = self.suspend(move |continuation| build(continuation, slot));
        async move {
            suspend.await;
            outcome.get()
        }
    }
}
