use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use super::{Continuation, ResumeSlot};
use crate::driver::WeakDriver;
use crate::handle::Handle;

type Register = Box<dyn FnOnce(Continuation) -> Handle>;

/// Future that suspends a coroutine on a backing action.
///
/// On first poll it calls `register` with a fresh [`Continuation`]. The
/// registered action is expected to call [`Continuation::resume`] when it
/// completes naturally. If `register` returns an invalid handle the action was
/// rejected or already satisfied during setup, and the coroutine continues
/// immediately.
pub struct Suspend {
    state: State,
}

enum State {
    Start { driver: WeakDriver, register: Register },
    Waiting { slot: Rc<ResumeSlot>, handle: Handle },
    Done,
}

impl Suspend {
    pub fn new(
        driver: WeakDriver,
        register: impl FnOnce(Continuation) -> Handle + 'static,
    ) -> Self {
        Self {
            state: State::Start {
                driver,
                register: Box::new(register),
            },
        }
    }

    /// Handle of the backing action, invalid until the first poll.
    pub fn handle(&self) -> Handle {
        match &self.state {
            State::Waiting { handle, .. } => *handle,
            _ => Handle::invalid(),
        }
    }
}

impl Future for Suspend {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let this = self.get_mut();

        match std::mem::replace(&mut this.state, State::Done) {
            State::Start { driver, register } => {
                let slot = Rc::new(ResumeSlot::default());
                slot.register(cx.waker());
                let handle = register(Continuation::new(Rc::clone(&slot), driver));

                if slot.is_resumed() || !handle.is_valid() {
                    return Poll::Ready(());
                }
                tracing::trace!(%handle, "coroutine suspended");
                this.state = State::Waiting { slot, handle };
                Poll::Pending
            }
            State::Waiting { slot, handle } => {
                if slot.is_resumed() {
                    return Poll::Ready(());
                }
                slot.register(cx.waker());
                this.state = State::Waiting { slot, handle };
                Poll::Pending
            }
            State::Done => Poll::Ready(()),
        }
    }
}

impl fmt::Debug for Suspend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.state {
            State::Start { .. } => "start",
            State::Waiting { .. } => "waiting",
            State::Done => "done",
        };
        f.debug_struct("Suspend")
            .field("state", &state)
            .field("handle", &self.handle())
            .finish()
    }
}
