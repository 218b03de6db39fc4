//! Setup validation errors.
//!
//! Setup is the only error channel an action has. A failed setup is a local,
//! silent failure: the driver logs it, drops the action, and hands the caller an
//! invalid [`Handle`](crate::Handle). Nothing here ever escalates to a panic.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum SetupError {
    #[error("{what} must not be negative (got {value})")]
    NegativeTime { what: &'static str, value: f32 },

    #[error("{what} must be greater than zero (got {value})")]
    NonPositiveTime { what: &'static str, value: f32 },

    #[error("{what} must be greater than zero")]
    ZeroCount { what: &'static str },

    #[error("invalid {what}: {reason}")]
    InvalidValue {
        what: &'static str,
        reason: &'static str,
    },

    #[error("start and stop values are equal")]
    EmptyRange,

    /// The awaited condition already holds, the action finished during setup.
    #[error("condition already satisfied during setup")]
    AlreadySatisfied,

    /// The loop condition does not hold, there is nothing to run.
    #[error("predicate is false during setup")]
    PredicateFalse,

    #[error("the driver was dropped before the action could be added")]
    DriverDropped,
}

impl SetupError {
    /// Returns `true` for outcomes that are a normal early exit rather than a
    /// caller mistake.
    pub const fn is_benign(&self) -> bool {
        matches!(self, Self::AlreadySatisfied | Self::PredicateFalse)
    }
}

/// Validates a duration that may be zero.
pub fn non_negative(what: &'static str, value: f32) -> Result<f32, SetupError> {
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(SetupError::NegativeTime { what, value })
    }
}

/// Validates a duration that must be strictly positive.
pub fn positive(what: &'static str, value: f32) -> Result<f32, SetupError> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(SetupError::NonPositiveTime { what, value })
    }
}
