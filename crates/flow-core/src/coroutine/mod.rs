//! Coroutine suspension bridge.
//!
//! A coroutine is any `Future<Output = ()>` spawned with
//! [`Driver::spawn_coroutine`](crate::Driver::spawn_coroutine). It runs on the
//! frame thread, polled by the driver's local executor. An awaiter suspends it
//! by registering a backing action that receives a [`Continuation`]; when the
//! action completes naturally it calls [`Continuation::resume`] and the
//! coroutine continues from the suspension point.
//!
//! If the backing action is stopped without completion, the continuation is
//! dropped unused and the coroutine stays suspended. It is never resumed and
//! nothing is reported.

mod suspend;

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::task::Waker;

use crate::driver::WeakDriver;

pub use suspend::Suspend;

/// Shared between a suspended coroutine and its continuation.
#[derive(Default)]
pub(crate) struct ResumeSlot {
    resumed: Cell<bool>,
    waker: RefCell<Option<Waker>>,
}

impl ResumeSlot {
    pub(crate) fn is_resumed(&self) -> bool {
        self.resumed.get()
    }

    pub(crate) fn register(&self, waker: &Waker) {
        let mut slot = self.waker.borrow_mut();
        match slot.as_ref() {
            Some(current) if current.will_wake(waker) => {}
            _ => *slot = Some(waker.clone()),
        }
    }
}

/// One-shot resumption token for a suspended coroutine.
///
/// Consumed by [`resume`](Self::resume), so a coroutine can be resumed at most
/// once per suspension.
pub struct Continuation {
    slot: Rc<ResumeSlot>,
    driver: WeakDriver,
}

impl Continuation {
    pub(crate) fn new(slot: Rc<ResumeSlot>, driver: WeakDriver) -> Self {
        Self { slot, driver }
    }

    /// Resumes the suspended coroutine and runs it up to its next suspension
    /// point, unless the driver is already polling coroutines further up the
    /// stack, in which case it picks the coroutine up before returning.
    pub fn resume(self) {
        self.slot.resumed.set(true);
        if let Some(waker) = self.slot.waker.borrow_mut().take() {
            waker.wake();
        }
        if let Some(driver) = self.driver.upgrade() {
            driver.run_coroutines();
        }
    }
}

impl fmt::Debug for Continuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Continuation")
            .field("resumed", &self.slot.resumed.get())
            .finish()
    }
}

thread_local! {
    static DRAINING: Cell<bool> = const { Cell::new(false) };
}

/// Marks this thread as draining a coroutine pool. Only one pool may be
/// drained at a time on a thread.
pub(crate) struct DrainGuard(());

impl DrainGuard {
    pub(crate) fn enter() -> Option<Self> {
        DRAINING.with(|draining| {
            if draining.replace(true) {
                None
            } else {
                Some(Self(()))
            }
        })
    }
}

impl Drop for DrainGuard {
    fn drop(&mut self) {
        DRAINING.with(|draining| draining.set(false));
    }
}
