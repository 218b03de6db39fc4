//! Concrete action variants.
//!
//! Each variant is a plain [`Action`](flow_core::Action) implementation holding
//! boxed callbacks, so every launch of a variant shares one type and can be
//! stopped by type through `Driver::remove_actions_of`.
//!
//! Variants finish themselves: on natural completion they run their own
//! completion callback with `stopped = false` and mark themselves finished. The
//! driver runs the same callback with `stopped = true` when an action is stopped
//! with completion.

mod blend;
mod delay;
mod delay_ticks;
mod do_n_times;
mod do_no_more_than;
mod do_once;
mod run_async;
mod ticker;
mod time_lock;
mod timeline;
mod wait_and_execute;
mod while_true;

pub use blend::{BlendFunc, Lerp};
pub use delay::Delay;
pub use delay_ticks::DelayTicks;
pub use do_n_times::DoNTimes;
pub use do_no_more_than::DoNoMoreThanXTime;
pub use do_once::DoOnce;
pub use run_async::{AsyncPriority, RunAsyncThen};
pub use ticker::Ticker;
pub use time_lock::TimeLock;
pub use timeline::Timeline;
pub use wait_and_execute::WaitAndExecute;
pub use while_true::WhileTrueExecute;

use flow_core::error::non_negative;
use flow_core::{ActionContext, SetupError};

/// Optional time limit shared by the waiting variants.
///
/// A limit of `0` means "no limit". A positive limit is also declared as the
/// action's max time, so the final tick carries the right delta.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Timeout {
    left: Option<f32>,
}

impl Timeout {
    pub(crate) fn new(seconds: f32) -> Self {
        Self {
            left: (seconds > 0.0).then_some(seconds),
        }
    }

    pub(crate) fn setup(seconds: f32, ctx: &ActionContext<'_>) -> Result<Self, SetupError> {
        let seconds = non_negative("timeout", seconds)?;
        let timeout = Self::new(seconds);
        if let Some(limit) = timeout.left {
            ctx.set_max_action_time(limit);
        }
        Ok(timeout)
    }

    /// Counts `delta` down and reports whether the limit ran out.
    pub(crate) fn expired(&mut self, delta: f32) -> bool {
        match self.left.as_mut() {
            Some(left) => {
                *left -= delta;
                *left <= 0.0
            }
            None => false,
        }
    }
}
