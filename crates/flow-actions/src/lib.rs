//! Ready-made actions and the launch facade for `flow-core`.
//!
//! ```ignore
//! let flow = Flow::default();
//! let player = Owner::new("player");
//!
//! flow.on(&player).delay(2.0, |stopped| println!("fired, stopped: {stopped}"));
//! flow.on(&player)
//!     .settings(ActionSettings::tick_interval(0.5))
//!     .ticker(|dt, _| println!("tick {dt}"));
//!
//! loop {
//!     flow.tick(frame_delta());
//! }
//! ```
//!
//! - [`Flow`]: registry controls (stop, pause, reset, host clock)
//! - [`Launcher`]: one method per variant, plus coroutine awaiters
//! - [`actions`]: the variants themselves, for custom launches

pub mod actions;
mod coroutine;
mod flow;

pub use actions::{
    AsyncPriority, BlendFunc, Delay, DelayTicks, DoNTimes, DoNoMoreThanXTime, DoOnce, Lerp,
    RunAsyncThen, Ticker, TimeLock, Timeline, WaitAndExecute, WhileTrueExecute,
};
pub use flow::{Flow, Launcher, WeakFlow};

pub use flow_core::{
    Action, ActionContext, ActionSettings, AsOwner, Driver, DriverConfig, DriverStats, Handle,
    InstanceId, Owner, SetupError, WeakDriver, WeakOwner,
};
