//! Opaque identifiers for scheduled actions.

use std::fmt;

/// Identifies one scheduled action inside a [`Driver`](crate::Driver).
///
/// Handles are issued by pre-incrementing a per-driver counter, so `0` is never
/// handed out and acts as the invalid sentinel. Values are never recycled, which
/// means a stale handle can not silently start pointing at a newer action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Handle(u64);

impl Handle {
    /// The invalid sentinel.
    pub const INVALID: Self = Self(0);

    /// Returns an invalid handle.
    #[inline]
    pub const fn invalid() -> Self {
        Self::INVALID
    }

    /// Returns `true` unless this is the invalid sentinel.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }

    /// Turns this handle into the invalid sentinel.
    #[inline]
    pub fn invalidate(&mut self) {
        self.0 = 0;
    }

    /// Raw counter value, mostly useful for logging.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Advances the counter and returns the new value. Driver only.
    pub(crate) fn increment(&mut self) -> Self {
        self.0 += 1;
        *self
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_invalid() {
        assert!(!Handle::default().is_valid());
        assert_eq!(Handle::invalid(), Handle::INVALID);
    }

    #[test]
    fn increment_never_issues_zero() {
        let mut counter = Handle::invalid();
        let first = counter.increment();
        let second = counter.increment();

        assert!(first.is_valid());
        assert_ne!(first, second);
        assert_eq!(second.get(), 2);
    }

    #[test]
    fn invalidate_resets_to_sentinel() {
        let mut counter = Handle::invalid();
        let mut handle = counter.increment();
        handle.invalidate();
        assert!(!handle.is_valid());
        assert_eq!(handle.to_string(), "0");
    }
}
