//! Instance identifiers for at-most-one-active action groups.
//!
//! An [`InstanceId`] marks a group of possible launches as mutually exclusive:
//! while an action carrying the id is active or pending, further launches with
//! the same id are routed into that action's retrigger hook instead of creating
//! a new action.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static DYNAMIC_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Namespace an [`InstanceId`] belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InstanceKind {
    /// Generated by [`InstanceId::new`].
    #[default]
    Dynamic,
    /// Chosen by the caller through [`InstanceId::fixed`].
    Fixed,
}

/// Deduplication key for action launches.
///
/// Generated ids come from a process-wide monotonic counter, independent of
/// the per-driver handle counter. The value `0` is the invalid sentinel in both
/// namespaces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstanceId {
    kind: InstanceKind,
    id: u64,
}

impl InstanceId {
    /// Generates a fresh, process-unique id.
    pub fn new() -> Self {
        let id = DYNAMIC_COUNTER.fetch_add(1, Ordering::Relaxed) + 1;
        Self {
            kind: InstanceKind::Dynamic,
            id,
        }
    }

    /// Returns a caller-chosen id. Fixed ids never collide with generated ones.
    pub const fn fixed(id: u64) -> Self {
        Self {
            kind: InstanceKind::Fixed,
            id,
        }
    }

    /// Returns the invalid sentinel (no deduplication).
    pub const fn invalid() -> Self {
        Self {
            kind: InstanceKind::Dynamic,
            id: 0,
        }
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.id != 0
    }

    #[inline]
    pub fn invalidate(&mut self) {
        self.id = 0;
    }

    /// Makes this id valid by generating a fresh one if it is currently invalid.
    pub fn validate(&mut self) -> Self {
        if !self.is_valid() {
            *self = Self::new();
        }
        *self
    }

    #[inline]
    pub const fn kind(self) -> InstanceKind {
        self.kind
    }

    #[inline]
    pub const fn get(self) -> u64 {
        self.id
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            InstanceKind::Dynamic => write!(f, "d{}", self.id),
            InstanceKind::Fixed => write!(f, "f{}", self.id),
        }
    }
}
