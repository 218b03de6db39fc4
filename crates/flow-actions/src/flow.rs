//! The user-facing launch API.
//!
//! [`Flow`] wraps a [`Driver`] and exposes the registry operations under short
//! names. [`Flow::on`] returns a [`Launcher`] bound to an owner; the launcher
//! carries the settings and instance id for the next launch and offers one
//! method per action variant.
//!
//! Coroutines and callbacks that live inside the flow capture a [`WeakFlow`]
//! from [`Flow::downgrade`]. A captured [`Flow`] is a strong reference from the
//! registry back to itself and keeps the whole session alive.

use std::future::Future;

use flow_core::{
    Action, ActionSettings, AsOwner, Driver, DriverConfig, DriverStats, Handle, InstanceId,
    SetupError, WeakDriver, WeakOwner,
};
use tracing::debug;

use crate::actions::{
    Delay, DelayTicks, DoNTimes, DoNoMoreThanXTime, DoOnce, RunAsyncThen, Ticker, TimeLock,
    Timeline, WaitAndExecute, WhileTrueExecute,
};

/// Action launcher and controller for one session.
#[derive(Clone, Default)]
pub struct Flow {
    driver: Driver,
}

impl Flow {
    pub fn new(config: DriverConfig) -> Self {
        Self {
            driver: Driver::new(config),
        }
    }

    pub fn from_driver(driver: Driver) -> Self {
        Self { driver }
    }

    pub fn driver(&self) -> &Driver {
        &self.driver
    }

    /// Non-owning handle for coroutines and callbacks owned by this flow.
    pub fn downgrade(&self) -> WeakFlow {
        WeakFlow {
            driver: self.driver.downgrade(),
        }
    }

    /// Runs one frame. See [`Driver::tick`].
    pub fn tick(&self, delta_seconds: f32) {
        self.driver.tick(delta_seconds);
    }

    /// Starts a launch bound to `owner` with default settings and no instance.
    pub fn on(&self, owner: &impl AsOwner) -> Launcher {
        Launcher::new(self.driver.downgrade(), owner)
    }

    /// Generates a fresh instance id for at-most-one-active launches.
    pub fn new_instance_id() -> InstanceId {
        InstanceId::new()
    }

    pub fn is_handle_valid(handle: Handle) -> bool {
        handle.is_valid()
    }

    pub fn is_running(&self, handle: Handle) -> bool {
        self.driver.is_action_running(handle)
    }

    pub fn is_instance_running(&self, instance_id: InstanceId) -> bool {
        self.driver.is_instanced_action_running(instance_id)
    }

    pub fn pause(&self, handle: Handle) -> bool {
        self.driver.pause_action(handle)
    }

    pub fn resume(&self, handle: Handle) -> bool {
        self.driver.resume_action(handle)
    }

    pub fn is_paused(&self, handle: Handle) -> Option<bool> {
        self.driver.is_action_paused(handle)
    }

    pub fn reset(&self, handle: Handle, call_update: bool) -> bool {
        self.driver.reset_action(handle, call_update)
    }

    pub fn reset_instanced(&self, instance_id: InstanceId, call_update: bool) -> bool {
        self.driver.reset_instanced_action(instance_id, call_update)
    }

    /// Stops an action. With `complete`, its callback runs as stopped.
    pub fn stop(&self, handle: Handle, complete: bool) -> bool {
        self.driver.remove_action(handle, complete)
    }

    pub fn stop_instanced(&self, instance_id: InstanceId, complete: bool) -> bool {
        self.driver.remove_instanced_action(instance_id, complete)
    }

    /// Stops every action of variant `A`, optionally only those of `owner`.
    pub fn stop_actions_of<A: Action>(&self, owner: Option<&WeakOwner>, complete: bool) -> usize {
        self.driver.remove_actions_of::<A>(complete, owner)
    }

    /// Stops every action, optionally only those of `owner`.
    pub fn stop_all(&self, owner: Option<&WeakOwner>, complete: bool) -> usize {
        self.driver.remove_all_actions(complete, owner)
    }

    pub fn set_global_pause(&self, paused: bool) {
        self.driver.set_global_pause(paused);
    }

    pub fn set_host_paused(&self, paused: bool) {
        self.driver.set_host_paused(paused);
    }

    pub fn set_time_dilation(&self, dilation: f32) {
        self.driver.set_time_dilation(dilation);
    }

    pub fn stats(&self) -> DriverStats {
        self.driver.stats()
    }

    /// Spawns a coroutine. It runs until its first `await` before this returns.
    pub fn spawn(&self, coroutine: impl Future<Output = ()> + 'static) {
        self.driver.spawn_coroutine(coroutine);
    }
}

/// A [`Flow`] that does not keep its session alive.
#[derive(Clone)]
pub struct WeakFlow {
    driver: WeakDriver,
}

impl WeakFlow {
    pub fn upgrade(&self) -> Option<Flow> {
        self.driver.upgrade().map(Flow::from_driver)
    }

    /// Like [`Flow::on`]. Launches made after the flow is dropped return an
    /// invalid handle.
    pub fn on(&self, owner: &impl AsOwner) -> Launcher {
        Launcher::new(self.driver.clone(), owner)
    }
}

/// A pending launch: owner, settings and instance id for the next action.
#[must_use = "a launcher does nothing until an action is launched with it"]
pub struct Launcher {
    pub(crate) driver: WeakDriver,
    pub(crate) owner: WeakOwner,
    pub(crate) settings: ActionSettings,
    pub(crate) instance_id: InstanceId,
}

impl Launcher {
    fn new(driver: WeakDriver, owner: &impl AsOwner) -> Self {
        Self {
            driver,
            owner: owner.as_owner(),
            settings: ActionSettings::default(),
            instance_id: InstanceId::invalid(),
        }
    }

    pub fn settings(mut self, settings: ActionSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn instance(mut self, instance_id: InstanceId) -> Self {
        self.instance_id = instance_id;
        self
    }

    /// Launches any action. An invalid handle means setup rejected it or the
    /// flow was dropped.
    pub fn launch<A: Action>(self, action: A) -> Handle {
        match self.driver.upgrade() {
            Some(driver) => driver.add_action(&self.owner, self.settings, self.instance_id, action),
            None => {
                debug!(action = std::any::type_name::<A>(), "flow dropped, launch ignored");
                Handle::invalid()
            }
        }
    }

    /// Like [`launch`](Self::launch) but reports why setup rejected the action.
    pub fn try_launch<A: Action>(self, action: A) -> Result<Handle, SetupError> {
        let driver = self.driver.upgrade().ok_or(SetupError::DriverDropped)?;
        driver.try_add_action(&self.owner, self.settings, self.instance_id, action)
    }

    pub fn ticker(self, tick: impl FnMut(f32, Handle) + 'static) -> Handle {
        self.launch(Ticker::new(tick))
    }

    pub fn ticker_for(
        self,
        seconds: f32,
        tick: impl FnMut(f32, Handle) + 'static,
        on_complete: impl FnOnce(bool) + 'static,
    ) -> Handle {
        self.launch(Ticker::new(tick).for_time(seconds).on_complete(on_complete))
    }

    pub fn delay(self, seconds: f32, callback: impl FnOnce(bool) + 'static) -> Handle {
        self.launch(Delay::new(seconds, callback))
    }

    pub fn delay_ticks(self, ticks: u32, callback: impl FnOnce(bool) + 'static) -> Handle {
        self.launch(DelayTicks::new(ticks, callback))
    }

    pub fn wait_and_execute(
        self,
        predicate: impl FnMut(f32) -> bool + 'static,
        callback: impl FnOnce(bool, bool) + 'static,
        timeout: f32,
    ) -> Handle {
        self.launch(WaitAndExecute::new(predicate, callback).with_timeout(timeout))
    }

    pub fn while_true_execute(
        self,
        predicate: impl FnMut() -> bool + 'static,
        tick: impl FnMut(f32) + 'static,
    ) -> Handle {
        self.launch(WhileTrueExecute::new(predicate, tick))
    }

    pub fn run_async_then(
        self,
        work: impl FnOnce() + Send + 'static,
        callback: impl FnOnce(bool, bool) + 'static,
    ) -> Handle {
        self.launch(RunAsyncThen::new(work, callback))
    }

    pub fn do_once(self, exec: impl FnOnce() + 'static) -> Handle {
        self.launch(DoOnce::new(exec))
    }

    pub fn do_n_times(self, times: u32, exec: impl FnMut(u32) + 'static) -> Handle {
        self.launch(DoNTimes::new(times, exec))
    }

    pub fn do_no_more_than(
        self,
        lock: f32,
        max_queued: u32,
        exec: impl FnMut() + 'static,
    ) -> Handle {
        self.launch(DoNoMoreThanXTime::new(lock, max_queued, exec))
    }

    pub fn time_lock(self, lock: f32, exec: impl FnOnce() + 'static) -> Handle {
        self.launch(TimeLock::new(lock, exec))
    }

    pub fn timeline(
        self,
        start: f32,
        stop: f32,
        time: f32,
        tick: impl FnMut(f32, f32) + 'static,
    ) -> Handle {
        self.launch(Timeline::new(start, stop, time, tick))
    }
}
