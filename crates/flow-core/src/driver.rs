//! The per-session action registry and its frame-tick driver.
//!
//! The registry keeps two ordered lists: `active` actions, ticked this pass, and
//! `pending` actions, added since the last pass. Keeping them apart is what
//! guarantees that an action added from inside a callback is never ticked in the
//! pass that created it, and that the list being iterated is never mutated.
//!
//! No borrow of the registry is ever held while an action body runs, so bodies
//! and their callbacks may call any [`Driver`] operation.

use std::any::TypeId;
use std::cell::RefCell;
use std::future::Future;
use std::rc::{Rc, Weak};

use futures::executor::{LocalPool, LocalSpawner};
use futures::task::LocalSpawnExt;
use tracing::{debug, trace, warn};

use crate::action::{Action, ActionCore};
use crate::config::DriverConfig;
use crate::coroutine;
use crate::entry::{ActionEntry, BodyCall};
use crate::error::SetupError;
use crate::handle::Handle;
use crate::instance::InstanceId;
use crate::owner::{AsOwner, WeakOwner};
use crate::settings::ActionSettings;
use crate::timing::Clock;

/// Snapshot of registry counters for diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DriverStats {
    pub active: usize,
    pub pending: usize,
    pub last_handle: Handle,
    pub globally_paused: bool,
}

/// Owns every active and pending action of a session and drives them once per
/// host frame.
///
/// `Driver` is a cheap, cloneable handle to the shared registry. It is
/// deliberately `!Send`: the registry and all action state belong to a single
/// scheduling thread, and handing the driver to another thread does not compile.
#[derive(Clone)]
pub struct Driver {
    inner: Rc<DriverInner>,
}

/// Non-owning reference to a [`Driver`], held by continuations.
#[derive(Clone)]
pub struct WeakDriver {
    inner: Weak<DriverInner>,
}

struct DriverInner {
    registry: RefCell<Registry>,
    coroutines: RefCell<LocalPool>,
    spawner: LocalSpawner,
}

struct Registry {
    active: Vec<Rc<ActionEntry>>,
    pending: Vec<Rc<ActionEntry>>,
    last_handle: Handle,
    globally_paused: bool,
    clock: Clock,
}

impl Registry {
    fn entries(&self) -> impl Iterator<Item = &Rc<ActionEntry>> {
        self.active.iter().chain(self.pending.iter())
    }

    fn find(&self, handle: Handle) -> Option<Rc<ActionEntry>> {
        if !handle.is_valid() {
            return None;
        }
        self.entries().find(|e| e.core.handle == handle).cloned()
    }

    fn find_valid(&self, handle: Handle) -> Option<Rc<ActionEntry>> {
        self.find(handle).filter(|e| e.is_valid())
    }

    fn find_instanced(&self, instance_id: InstanceId) -> Option<Rc<ActionEntry>> {
        if !instance_id.is_valid() {
            return None;
        }
        self.entries()
            .find(|e| e.core.instance_id == instance_id && e.is_valid())
            .cloned()
    }

    fn collect_valid(&self, mut filter: impl FnMut(&ActionEntry) -> bool) -> Vec<Rc<ActionEntry>> {
        self.entries()
            .filter(|&e| e.is_valid() && filter(&**e))
            .cloned()
            .collect()
    }
}

impl Default for Driver {
    fn default() -> Self {
        Self::new(DriverConfig::default())
    }
}

impl Driver {
    pub fn new(config: DriverConfig) -> Self {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        let registry = Registry {
            active: Vec::new(),
            pending: Vec::new(),
            last_handle: Handle::invalid(),
            globally_paused: config.start_paused,
            clock: Clock {
                host_paused: config.host_paused,
                time_dilation: config.time_dilation,
            },
        };

        Self {
            inner: Rc::new(DriverInner {
                registry: RefCell::new(registry),
                coroutines: RefCell::new(pool),
                spawner,
            }),
        }
    }

    pub fn downgrade(&self) -> WeakDriver {
        WeakDriver {
            inner: Rc::downgrade(&self.inner),
        }
    }

    // ------------------------------------------------------------------------
    // Frame tick
    // ------------------------------------------------------------------------

    /// Runs one tick pass. Call once per host frame.
    ///
    /// 1. purge finished actions and actions whose owner is gone
    /// 2. promote pending actions to active
    /// 3. tick every active, still valid action through the gate
    ///
    /// A complete no-op while the driver is globally paused.
    pub fn tick(&self, delta_seconds: f32) {
        let (batch, clock) = {
            let mut registry = self.inner.registry.borrow_mut();
            if registry.globally_paused {
                return;
            }

            let before = registry.active.len() + registry.pending.len();
            registry.active.retain(|e| e.is_valid());
            registry.pending.retain(|e| e.is_valid());
            let purged = before - registry.active.len() - registry.pending.len();

            let promoted = registry.pending.len();
            let pending = std::mem::take(&mut registry.pending);
            registry.active.extend(pending);

            if purged > 0 || promoted > 0 {
                trace!(purged, promoted, active = registry.active.len(), "tick pass");
            }

            (registry.active.clone(), registry.clock)
        };

        for entry in &batch {
            if entry.is_valid() {
                entry.dispatch(delta_seconds, clock);
            }
        }

        self.run_coroutines();
    }

    pub fn set_global_pause(&self, paused: bool) {
        self.inner.registry.borrow_mut().globally_paused = paused;
    }

    pub fn is_globally_paused(&self) -> bool {
        self.inner.registry.borrow().globally_paused
    }

    /// Pauses or resumes the host simulation. Actions that do not ignore pause
    /// accrue no time while it is paused.
    pub fn set_host_paused(&self, paused: bool) {
        self.inner.registry.borrow_mut().clock.host_paused = paused;
    }

    pub fn is_host_paused(&self) -> bool {
        self.inner.registry.borrow().clock.host_paused
    }

    pub fn set_time_dilation(&self, dilation: f32) {
        self.inner.registry.borrow_mut().clock.time_dilation = dilation.max(0.0);
    }

    pub fn time_dilation(&self) -> f32 {
        self.inner.registry.borrow().clock.time_dilation
    }

    // ------------------------------------------------------------------------
    // Adding
    // ------------------------------------------------------------------------

    /// Launches `action`, or routes into the retrigger hook of the live action
    /// that already carries `instance_id`.
    ///
    /// Returns the handle of the new action, the handle of the retriggered one,
    /// or an invalid handle if setup rejected the action.
    pub fn add_action<A: Action>(
        &self,
        owner: &impl AsOwner,
        settings: ActionSettings,
        instance_id: InstanceId,
        action: A,
    ) -> Handle {
        match self.try_add_action(owner, settings, instance_id, action) {
            Ok(handle) => handle,
            Err(err) if err.is_benign() => {
                debug!(action = std::any::type_name::<A>(), %err, "action finished during setup");
                Handle::invalid()
            }
            Err(err) => {
                warn!(action = std::any::type_name::<A>(), %err, "action failed to start");
                Handle::invalid()
            }
        }
    }

    /// Same as [`add_action`](Self::add_action) but reports why setup failed.
    pub fn try_add_action<A: Action>(
        &self,
        owner: &impl AsOwner,
        settings: ActionSettings,
        instance_id: InstanceId,
        action: A,
    ) -> Result<Handle, SetupError> {
        let existing = self.inner.registry.borrow().find_instanced(instance_id);
        if let Some(entry) = existing {
            debug!(
                handle = %entry.core.handle,
                instance = %instance_id,
                "instance already running, retriggering"
            );
            entry.call(BodyCall::Retrigger);
            return Ok(entry.core.handle);
        }

        let handle = self.inner.registry.borrow_mut().last_handle.increment();
        let core = ActionCore::new::<A>(handle, instance_id, owner.as_owner(), settings);
        let entry = Rc::new(ActionEntry::new(core, Box::new(action)));

        // Queued before setup so a launch with the same instance id from inside
        // setup or init finds this entry and retriggers it.
        self.inner.registry.borrow_mut().pending.push(Rc::clone(&entry));
        if let Err(err) = entry.setup() {
            entry.stop(false);
            self.inner
                .registry
                .borrow_mut()
                .pending
                .retain(|e| !Rc::ptr_eq(e, &entry));
            return Err(err);
        }
        entry.call(BodyCall::Init);

        trace!(
            %handle,
            action = entry.core.type_name,
            label = entry.core.settings.label.as_deref(),
            "action added"
        );
        Ok(handle)
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// Returns `true` while the action is active or pending and still valid.
    pub fn is_action_running(&self, handle: Handle) -> bool {
        self.inner.registry.borrow().find_valid(handle).is_some()
    }

    /// Returns `true` while an action carrying `instance_id` is alive.
    pub fn is_instanced_action_running(&self, instance_id: InstanceId) -> bool {
        self.inner
            .registry
            .borrow()
            .find_instanced(instance_id)
            .is_some()
    }

    /// Handle of the live action carrying `instance_id`, or an invalid handle.
    pub fn find_instanced_action(&self, instance_id: InstanceId) -> Handle {
        self.inner
            .registry
            .borrow()
            .find_instanced(instance_id)
            .map(|e| e.core.handle)
            .unwrap_or_default()
    }

    /// Pause state of a live action, `None` if the handle is unknown or stale.
    pub fn is_action_paused(&self, handle: Handle) -> Option<bool> {
        self.inner
            .registry
            .borrow()
            .find_valid(handle)
            .map(|e| e.core.paused.get())
    }

    pub fn stats(&self) -> DriverStats {
        let registry = self.inner.registry.borrow();
        DriverStats {
            active: registry.active.len(),
            pending: registry.pending.len(),
            last_handle: registry.last_handle,
            globally_paused: registry.globally_paused,
        }
    }

    // ------------------------------------------------------------------------
    // Pause / resume / reset
    // ------------------------------------------------------------------------

    /// Pauses a live action. Returns `false` if it was not found.
    pub fn pause_action(&self, handle: Handle) -> bool {
        self.set_paused(handle, true)
    }

    /// Resumes a paused action. Elapsed time continues where it stopped.
    pub fn resume_action(&self, handle: Handle) -> bool {
        self.set_paused(handle, false)
    }

    fn set_paused(&self, handle: Handle, paused: bool) -> bool {
        let Some(entry) = self.inner.registry.borrow().find_valid(handle) else {
            return false;
        };
        entry.core.paused.set(paused);
        debug!(%handle, paused, "action pause changed");
        true
    }

    /// Rewinds the engine timers of a live action and calls its `reset` hook.
    pub fn reset_action(&self, handle: Handle, call_update: bool) -> bool {
        let entry = self.inner.registry.borrow().find_valid(handle);
        entry.map(|e| Self::reset_entry(&e, call_update)).is_some()
    }

    pub fn reset_instanced_action(&self, instance_id: InstanceId, call_update: bool) -> bool {
        let entry = self.inner.registry.borrow().find_instanced(instance_id);
        entry.map(|e| Self::reset_entry(&e, call_update)).is_some()
    }

    fn reset_entry(entry: &ActionEntry, call_update: bool) {
        let mut timing = entry.core.timing.get();
        timing.rewind(&entry.core.settings);
        entry.core.timing.set(timing);
        entry.call(BodyCall::Reset(call_update));
    }

    // ------------------------------------------------------------------------
    // Removal
    // ------------------------------------------------------------------------

    /// Stops one action. With `complete`, its completion runs synchronously as
    /// stopped before this returns. Returns `false` if the handle was not live.
    pub fn remove_action(&self, handle: Handle, complete: bool) -> bool {
        let entry = self.inner.registry.borrow().find_valid(handle);
        match entry {
            Some(entry) => {
                debug!(%handle, complete, "removing action");
                entry.stop(complete);
                true
            }
            None => false,
        }
    }

    /// Stops the live action carrying `instance_id`.
    pub fn remove_instanced_action(&self, instance_id: InstanceId, complete: bool) -> bool {
        let entry = self.inner.registry.borrow().find_instanced(instance_id);
        match entry {
            Some(entry) => {
                debug!(instance = %instance_id, complete, "removing instanced action");
                entry.stop(complete);
                true
            }
            None => false,
        }
    }

    /// Stops every live action of variant `A`, optionally only those of `owner`.
    pub fn remove_actions_of<A: Action>(&self, complete: bool, owner: Option<&WeakOwner>) -> usize {
        self.remove_actions_of_type(TypeId::of::<A>(), complete, owner)
    }

    pub fn remove_actions_of_type(
        &self,
        type_id: TypeId,
        complete: bool,
        owner: Option<&WeakOwner>,
    ) -> usize {
        self.remove_matching(complete, |e| {
            e.core.type_id == type_id && owner.is_none_or(|o| e.core.owner.same_owner(o))
        })
    }

    /// Stops every live action, optionally only those of `owner`.
    pub fn remove_all_actions(&self, complete: bool, owner: Option<&WeakOwner>) -> usize {
        self.remove_matching(complete, |e| {
            owner.is_none_or(|o| e.core.owner.same_owner(o))
        })
    }

    fn remove_matching(&self, complete: bool, filter: impl FnMut(&ActionEntry) -> bool) -> usize {
        let matched = self.inner.registry.borrow().collect_valid(filter);
        for entry in &matched {
            entry.stop(complete);
        }
        if !matched.is_empty() {
            debug!(count = matched.len(), complete, "removed actions");
        }
        matched.len()
    }

    // ------------------------------------------------------------------------
    // Coroutines
    // ------------------------------------------------------------------------

    /// Spawns a coroutine onto the frame thread and runs it to its first
    /// suspension point before returning.
    ///
    /// Coroutines suspend on the awaiters built on [`Suspend`](crate::Suspend)
    /// and are resumed when their backing action completes. The driver owns
    /// every coroutine, so a coroutine reaches it through a [`WeakDriver`]; a
    /// strong clone captured inside keeps the driver alive while suspended.
    pub fn spawn_coroutine(&self, coroutine: impl Future<Output = ()> + 'static) {
        if let Err(err) = self.inner.spawner.spawn_local(coroutine) {
            warn!(%err, "failed to spawn coroutine");
            return;
        }
        self.run_coroutines();
    }

    /// Polls every woken coroutine until none can make progress.
    ///
    /// Skipped while a coroutine pool is already being drained on this thread;
    /// the outer drain picks the woken tasks up before it returns.
    pub(crate) fn run_coroutines(&self) {
        let Ok(mut pool) = self.inner.coroutines.try_borrow_mut() else {
            return;
        };
        let Some(_guard) = coroutine::DrainGuard::enter() else {
            return;
        };
        pool.run_until_stalled();
    }
}

impl WeakDriver {
    pub fn upgrade(&self) -> Option<Driver> {
        self.inner.upgrade().map(|inner| Driver { inner })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;
    use crate::action::ActionContext;
    use crate::owner::Owner;

    #[derive(Default)]
    struct Log {
        ticks: Vec<f32>,
        completions: Vec<bool>,
        retriggers: usize,
        resets: Vec<bool>,
    }

    /// Records every call; finishes after `lifetime` ticks when set.
    struct Recorder {
        log: Rc<RefCell<Log>>,
        lifetime: Option<usize>,
        reject: bool,
    }

    impl Recorder {
        fn new(log: &Rc<RefCell<Log>>) -> Self {
            Self {
                log: Rc::clone(log),
                lifetime: None,
                reject: false,
            }
        }
    }

    impl Action for Recorder {
        fn setup(&mut self, _ctx: &ActionContext<'_>) -> Result<(), SetupError> {
            if self.reject {
                return Err(SetupError::ZeroCount { what: "recorder" });
            }
            Ok(())
        }

        fn tick(&mut self, delta: f32, ctx: &ActionContext<'_>) {
            let mut log = self.log.borrow_mut();
            log.ticks.push(delta);
            if self.lifetime.is_some_and(|n| log.ticks.len() >= n) {
                ctx.mark_as_finished();
            }
        }

        fn complete(&mut self, stopped: bool, _ctx: &ActionContext<'_>) {
            self.log.borrow_mut().completions.push(stopped);
        }

        fn reset(&mut self, call_update: bool, _ctx: &ActionContext<'_>) {
            self.log.borrow_mut().resets.push(call_update);
        }

        fn retriggered(&mut self, _ctx: &ActionContext<'_>) {
            self.log.borrow_mut().retriggers += 1;
        }
    }

    struct Other;
    impl Action for Other {}

    fn add(driver: &Driver, owner: &Owner, log: &Rc<RefCell<Log>>) -> Handle {
        driver.add_action(owner, ActionSettings::default(), InstanceId::invalid(), Recorder::new(log))
    }

    #[test]
    fn handles_are_unique_and_valid() {
        let driver = Driver::default();
        let owner = Owner::new("test");
        let log = Rc::new(RefCell::new(Log::default()));

        let handles: Vec<_> = (0..50).map(|_| add(&driver, &owner, &log)).collect();
        for (i, a) in handles.iter().enumerate() {
            assert!(a.is_valid());
            for b in &handles[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(driver.stats().pending, 50);
    }

    #[test]
    fn rejected_setup_returns_invalid_handle_and_queues_nothing() {
        let driver = Driver::default();
        let owner = Owner::new("test");
        let log = Rc::new(RefCell::new(Log::default()));

        let mut recorder = Recorder::new(&log);
        recorder.reject = true;
        let result =
            driver.try_add_action(&owner, ActionSettings::default(), InstanceId::invalid(), recorder);

        assert_eq!(result, Err(SetupError::ZeroCount { what: "recorder" }));
        assert_eq!(driver.stats().pending, 0);
        driver.tick(0.1);
        assert!(log.borrow().ticks.is_empty());
    }

    #[test]
    fn pending_actions_tick_from_the_next_pass() {
        let driver = Driver::default();
        let owner = Owner::new("test");
        let log = Rc::new(RefCell::new(Log::default()));

        let handle = add(&driver, &owner, &log);
        assert!(driver.is_action_running(handle));
        assert!(log.borrow().ticks.is_empty());

        driver.tick(0.25);
        assert_eq!(log.borrow().ticks, vec![0.25]);
        assert_eq!(driver.stats().active, 1);
    }

    #[test]
    fn finished_actions_are_purged_before_the_next_pass() {
        let driver = Driver::default();
        let owner = Owner::new("test");
        let log = Rc::new(RefCell::new(Log::default()));

        let mut recorder = Recorder::new(&log);
        recorder.lifetime = Some(1);
        let handle =
            driver.add_action(&owner, ActionSettings::default(), InstanceId::invalid(), recorder);

        driver.tick(0.1);
        assert!(!driver.is_action_running(handle));
        assert_eq!(driver.stats().active, 1);

        driver.tick(0.1);
        assert_eq!(driver.stats().active, 0);
        assert_eq!(log.borrow().ticks.len(), 1);
    }

    #[test]
    fn global_pause_skips_purge_and_promotion() {
        let driver = Driver::default();
        let owner = Owner::new("test");
        let log = Rc::new(RefCell::new(Log::default()));

        add(&driver, &owner, &log);
        driver.set_global_pause(true);
        driver.tick(1.0);

        assert_eq!(driver.stats().pending, 1);
        assert!(log.borrow().ticks.is_empty());

        driver.set_global_pause(false);
        driver.tick(1.0);
        assert_eq!(log.borrow().ticks.len(), 1);
    }

    #[test]
    fn instance_id_retriggers_existing_action() {
        let driver = Driver::default();
        let owner = Owner::new("test");
        let log = Rc::new(RefCell::new(Log::default()));
        let id = InstanceId::new();

        let first = driver.add_action(&owner, ActionSettings::default(), id, Recorder::new(&log));
        let second = driver.add_action(&owner, ActionSettings::default(), id, Recorder::new(&log));

        assert_eq!(first, second);
        assert_eq!(log.borrow().retriggers, 1);
        assert_eq!(driver.stats().pending, 1);
        assert_eq!(driver.find_instanced_action(id), first);

        assert!(driver.remove_instanced_action(id, false));
        let third = driver.add_action(&owner, ActionSettings::default(), id, Recorder::new(&log));
        assert_ne!(third, first);
    }

    #[test]
    fn remove_with_and_without_complete() {
        let driver = Driver::default();
        let owner = Owner::new("test");
        let log = Rc::new(RefCell::new(Log::default()));

        let quiet = add(&driver, &owner, &log);
        let loud = add(&driver, &owner, &log);

        assert!(driver.remove_action(quiet, false));
        assert!(log.borrow().completions.is_empty());

        assert!(driver.remove_action(loud, true));
        assert_eq!(log.borrow().completions, vec![true]);

        // Already finished: nothing to stop, completion does not run twice.
        assert!(!driver.remove_action(loud, true));
        assert_eq!(log.borrow().completions.len(), 1);
    }

    #[test]
    fn invalid_handle_is_never_found() {
        let driver = Driver::default();
        assert!(!driver.is_action_running(Handle::invalid()));
        assert!(!driver.remove_action(Handle::invalid(), true));
        assert!(!driver.pause_action(Handle::invalid()));
        assert_eq!(driver.is_action_paused(Handle::invalid()), None);
    }

    #[test]
    fn remove_by_type_and_owner() {
        let driver = Driver::default();
        let a = Owner::new("a");
        let b = Owner::new("b");
        let log = Rc::new(RefCell::new(Log::default()));

        add(&driver, &a, &log);
        add(&driver, &b, &log);
        driver.add_action(&a, ActionSettings::default(), InstanceId::invalid(), Other);

        assert_eq!(driver.remove_actions_of::<Recorder>(false, Some(&a.as_owner())), 1);
        assert_eq!(driver.remove_actions_of::<Recorder>(false, None), 1);
        assert_eq!(driver.remove_all_actions(false, None), 1);
        assert_eq!(driver.remove_all_actions(false, None), 0);
    }

    #[test]
    fn owner_death_drops_actions_without_completion() {
        let driver = Driver::default();
        let owner = Owner::new("doomed");
        let log = Rc::new(RefCell::new(Log::default()));

        let handle = add(&driver, &owner, &log);
        drop(owner);
        assert!(!driver.is_action_running(handle));

        driver.tick(0.1);
        assert_eq!(driver.stats().active, 0);
        assert!(log.borrow().ticks.is_empty());
        assert!(log.borrow().completions.is_empty());
    }

    #[test]
    fn reset_rewinds_engine_timers_and_calls_hook() {
        let driver = Driver::default();
        let owner = Owner::new("test");
        let log = Rc::new(RefCell::new(Log::default()));

        let handle = driver.add_action(
            &owner,
            ActionSettings::delay_first(1.0),
            InstanceId::invalid(),
            Recorder::new(&log),
        );
        driver.tick(0.6);
        driver.tick(0.6);
        driver.tick(0.1);
        assert_eq!(log.borrow().ticks.len(), 1);

        assert!(driver.reset_action(handle, true));
        assert_eq!(log.borrow().resets, vec![true]);

        // The first delay applies again.
        driver.tick(0.5);
        assert_eq!(log.borrow().ticks.len(), 1);
    }

    /// Launches another action under its own instance id from `init`.
    struct Relauncher {
        driver: WeakDriver,
        owner: WeakOwner,
        instance_id: InstanceId,
        log: Rc<RefCell<Log>>,
        nested: Rc<Cell<Handle>>,
    }

    impl Action for Relauncher {
        fn init(&mut self, _ctx: &ActionContext<'_>) {
            let Some(driver) = self.driver.upgrade() else {
                return;
            };
            let handle = driver.add_action(
                &self.owner,
                ActionSettings::default(),
                self.instance_id,
                Recorder::new(&self.log),
            );
            self.nested.set(handle);
        }

        fn retriggered(&mut self, _ctx: &ActionContext<'_>) {
            self.log.borrow_mut().retriggers += 1;
        }
    }

    #[test]
    fn same_instance_launched_during_init_retriggers_the_new_action() {
        let driver = Driver::default();
        let owner = Owner::new("test");
        let log = Rc::new(RefCell::new(Log::default()));
        let nested = Rc::new(Cell::new(Handle::invalid()));
        let id = InstanceId::new();

        let handle = driver.add_action(
            &owner,
            ActionSettings::default(),
            id,
            Relauncher {
                driver: driver.downgrade(),
                owner: owner.as_owner(),
                instance_id: id,
                log: Rc::clone(&log),
                nested: Rc::clone(&nested),
            },
        );

        assert!(handle.is_valid());
        assert_eq!(nested.get(), handle);
        assert_eq!(log.borrow().retriggers, 1);
        assert_eq!(driver.stats().pending, 1);

        driver.tick(0.1);
        assert!(log.borrow().ticks.is_empty());
    }

    struct SelfStopper {
        driver: Driver,
        completed: Rc<Cell<usize>>,
    }

    impl Action for SelfStopper {
        fn tick(&mut self, _delta: f32, ctx: &ActionContext<'_>) {
            self.driver.remove_action(ctx.handle(), true);
        }

        fn complete(&mut self, stopped: bool, _ctx: &ActionContext<'_>) {
            assert!(stopped);
            self.completed.set(self.completed.get() + 1);
        }
    }

    #[test]
    fn action_may_stop_itself_from_its_own_tick() {
        let driver = Driver::default();
        let owner = Owner::new("test");
        let completed = Rc::new(Cell::new(0));

        let handle = driver.add_action(
            &owner,
            ActionSettings::default(),
            InstanceId::invalid(),
            SelfStopper {
                driver: driver.clone(),
                completed: Rc::clone(&completed),
            },
        );

        driver.tick(0.1);
        assert_eq!(completed.get(), 1);
        assert!(!driver.is_action_running(handle));

        driver.tick(0.1);
        assert_eq!(completed.get(), 1);
    }
}
