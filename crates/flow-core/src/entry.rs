//! Registry entries: engine state plus the boxed variant body.

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::action::{Action, ActionContext, ActionCore};
use crate::error::SetupError;
use crate::timing::Clock;

/// A call into the variant body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum BodyCall {
    Init,
    Tick(f32),
    Complete(bool),
    Reset(bool),
    Retrigger,
}

pub(crate) struct ActionEntry {
    pub core: ActionCore,
    body: RefCell<Box<dyn Action>>,
    /// Calls that arrived while the body was busy (an action stopping or
    /// retriggering itself from its own callback). Run as soon as it returns.
    deferred: RefCell<VecDeque<BodyCall>>,
}

impl ActionEntry {
    pub(crate) fn new(core: ActionCore, body: Box<dyn Action>) -> Self {
        Self {
            core,
            body: RefCell::new(body),
            deferred: RefCell::new(VecDeque::new()),
        }
    }

    #[inline]
    pub(crate) fn is_valid(&self) -> bool {
        self.core.is_valid()
    }

    /// Runs the setup hook. Calls deferred during setup wait for `init`, and
    /// are dropped with the action if setup rejects it.
    pub(crate) fn setup(&self) -> Result<(), SetupError> {
        let ctx = ActionContext::new(&self.core);
        let result = self.body.borrow_mut().setup(&ctx);
        if result.is_err() {
            self.deferred.borrow_mut().clear();
        }
        result
    }

    /// Marks the action finished and, when asked, completes it as stopped.
    pub(crate) fn stop(&self, complete: bool) {
        self.core.finished.set(true);
        if complete {
            self.call(BodyCall::Complete(true));
        }
    }

    /// Applies tick gating and ticks the body when the gate opens.
    pub(crate) fn dispatch(&self, raw_delta: f32, clock: Clock) {
        let mut timing = self.core.timing.get();
        let step = timing.advance(raw_delta, &self.core.settings, self.core.paused.get(), clock);
        self.core.timing.set(timing);

        if let Some(delta) = step {
            self.call(BodyCall::Tick(delta));
        }
    }

    /// Runs `call` on the body now, or queues it if the body is already running
    /// further up the stack. Ticks are never queued.
    pub(crate) fn call(&self, call: BodyCall) {
        match self.body.try_borrow_mut() {
            Ok(mut body) => {
                let ctx = ActionContext::new(&self.core);
                invoke(body.as_mut(), call, &ctx);
                drop(body);
                self.flush_deferred();
            }
            Err(_) => {
                if !matches!(call, BodyCall::Tick(_)) {
                    tracing::trace!(handle = %self.core.handle, ?call, "body busy, deferring call");
                    self.deferred.borrow_mut().push_back(call);
                }
            }
        }
    }

    fn flush_deferred(&self) {
        loop {
            let Some(call) = self.deferred.borrow_mut().pop_front() else {
                break;
            };
            let Ok(mut body) = self.body.try_borrow_mut() else {
                self.deferred.borrow_mut().push_front(call);
                break;
            };
            let ctx = ActionContext::new(&self.core);
            invoke(body.as_mut(), call, &ctx);
        }
    }
}

fn invoke(body: &mut dyn Action, call: BodyCall, ctx: &ActionContext<'_>) {
    match call {
        BodyCall::Init => body.init(ctx),
        BodyCall::Tick(delta) => body.tick(delta, ctx),
        BodyCall::Complete(stopped) => body.complete(stopped, ctx),
        BodyCall::Reset(call_update) => body.reset(call_update, ctx),
        BodyCall::Retrigger => body.retriggered(ctx),
    }
}
