//! The action variant contract.
//!
//! This module defines the [`Action`] trait every concrete action implements to
//! plug into the [`Driver`](crate::Driver), and the [`ActionContext`] through
//! which an action reaches the engine-owned part of its state.

use std::any::TypeId;
use std::cell::Cell;

use crate::error::SetupError;
use crate::handle::Handle;
use crate::instance::InstanceId;
use crate::owner::WeakOwner;
use crate::settings::ActionSettings;
use crate::timing::Timing;

/// A scheduled unit of deferred, timed or conditional work.
///
/// The engine drives every action through the same lifecycle:
///
/// ```text
/// setup ──Err──▶ discarded
///   │Ok
///   ▼
/// init ─▶ pending ─▶ active ⇄ paused ─▶ finished ─▶ purged
/// ```
///
/// Variants only decide *when they are done* (by calling
/// [`ActionContext::mark_as_finished`]); when they may tick and with which delta
/// is decided by the driver's tick gating.
///
/// # Re-entrancy
///
/// Callbacks invoked from these methods may freely call back into the
/// [`Driver`](crate::Driver): add new actions (they land in the pending list),
/// stop or pause others, or stop the action currently running. An action must
/// never add itself recursively from `tick`.
pub trait Action: 'static {
    /// Validates the arguments captured at construction.
    ///
    /// An `Err` discards the action before `init` or `tick` ever run. Call
    /// [`ActionContext::set_max_action_time`] here if the action has a fixed
    /// lifetime.
    fn setup(&mut self, _ctx: &ActionContext<'_>) -> Result<(), SetupError> {
        Ok(())
    }

    /// Runs exactly once, synchronously, right after a successful `setup`.
    /// May already finish the action.
    fn init(&mut self, _ctx: &ActionContext<'_>) {}

    /// Runs at most once per frame with the gated delta time.
    fn tick(&mut self, _delta: f32, _ctx: &ActionContext<'_>) {}

    /// Completion hook. `stopped` is `true` when completion was forced from
    /// outside rather than reached naturally.
    fn complete(&mut self, _stopped: bool, _ctx: &ActionContext<'_>) {}

    /// Rewinds variant state for restart-in-place. No-op by default.
    fn reset(&mut self, _call_update: bool, _ctx: &ActionContext<'_>) {}

    /// Another launch with this action's instance id arrived while it is alive.
    fn retriggered(&mut self, _ctx: &ActionContext<'_>) {}
}

/// Engine-owned state of one action.
///
/// Everything the driver may need to touch while the variant body is busy lives
/// here in cells, so stopping or pausing an action from inside its own callback
/// never conflicts with the running body.
pub(crate) struct ActionCore {
    pub handle: Handle,
    pub instance_id: InstanceId,
    pub owner: WeakOwner,
    pub settings: ActionSettings,
    pub type_id: TypeId,
    pub type_name: &'static str,
    pub finished: Cell<bool>,
    pub paused: Cell<bool>,
    pub timing: Cell<Timing>,
}

impl ActionCore {
    pub(crate) fn new<A: Action>(
        handle: Handle,
        instance_id: InstanceId,
        owner: WeakOwner,
        settings: ActionSettings,
    ) -> Self {
        let timing = Timing::new(&settings);
        let paused = settings.start_paused;
        Self {
            handle,
            instance_id,
            owner,
            settings,
            type_id: TypeId::of::<A>(),
            type_name: std::any::type_name::<A>(),
            finished: Cell::new(false),
            paused: Cell::new(paused),
            timing: Cell::new(timing),
        }
    }

    /// Not finished and the owner still exists.
    #[inline]
    pub(crate) fn is_valid(&self) -> bool {
        !self.finished.get() && self.owner.is_alive()
    }
}

/// The narrow view of engine state handed to action bodies.
pub struct ActionContext<'a> {
    core: &'a ActionCore,
}

impl<'a> ActionContext<'a> {
    pub(crate) fn new(core: &'a ActionCore) -> Self {
        Self { core }
    }

    #[inline]
    pub fn handle(&self) -> Handle {
        self.core.handle
    }

    #[inline]
    pub fn instance_id(&self) -> InstanceId {
        self.core.instance_id
    }

    #[inline]
    pub fn settings(&self) -> &ActionSettings {
        &self.core.settings
    }

    #[inline]
    pub fn owner(&self) -> &WeakOwner {
        &self.core.owner
    }

    /// Dilated time accrued by the driver for this action.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.core.timing.get().elapsed
    }

    /// Not finished and the owner still exists.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.core.is_valid()
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.core.finished.get()
    }

    /// One-way latch: the action will never tick again and is purged at the
    /// start of the next tick pass.
    #[inline]
    pub fn mark_as_finished(&self) {
        self.core.finished.set(true);
    }

    /// Declares the action's lifetime so the driver can hand it one final tick
    /// with the right delta once the time is up.
    ///
    /// This does not stop the action: its `tick` must still finish it.
    pub fn set_max_action_time(&self, seconds: f32) {
        let mut timing = self.core.timing.get();
        timing.max_time = seconds.max(0.0);
        self.core.timing.set(timing);
    }
}
