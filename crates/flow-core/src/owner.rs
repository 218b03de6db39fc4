//! Weak owner references.
//!
//! Every action is bound to an owning context. The action never keeps its owner
//! alive: it holds a [`WeakOwner`] and becomes invalid the moment the last strong
//! reference to the owner is dropped.

use std::any::Any;
use std::fmt;
use std::rc::{Rc, Weak};

/// Strong owning context for actions.
///
/// Dropping every clone of an `Owner` ends all actions launched on it; they are
/// purged on the next driver tick without their completion callbacks.
#[derive(Clone)]
pub struct Owner {
    inner: Rc<OwnerLabel>,
}

struct OwnerLabel(String);

impl Owner {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(OwnerLabel(label.into())),
        }
    }

    pub fn label(&self) -> &str {
        &self.inner.0
    }

    /// Explicitly ends this handle to the owner. Same as dropping it.
    pub fn destroy(self) {}
}

impl fmt::Debug for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Owner").field(&self.inner.0).finish()
    }
}

/// Non-owning back-reference to an owner, stored in every action.
#[derive(Clone)]
pub struct WeakOwner {
    inner: Weak<dyn Any>,
}

impl WeakOwner {
    /// An owner reference that is never alive. Actions bound to it are purged on
    /// the next tick.
    pub fn dangling() -> Self {
        Self {
            inner: Weak::<()>::new(),
        }
    }

    /// Returns `true` while the owner still exists.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// Returns `true` if both references point at the same owner.
    #[inline]
    pub fn same_owner(&self, other: &WeakOwner) -> bool {
        Weak::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for WeakOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakOwner")
            .field("alive", &self.is_alive())
            .finish()
    }
}

/// Anything that can act as the owning context of an action.
///
/// Implemented for [`Owner`] and for any `Rc<T>`, so game objects already held
/// in an `Rc` can own actions directly.
pub trait AsOwner {
    fn as_owner(&self) -> WeakOwner;
}

impl AsOwner for Owner {
    fn as_owner(&self) -> WeakOwner {
        let weak: Weak<OwnerLabel> = Rc::downgrade(&self.inner);
        WeakOwner { inner: weak }
    }
}

impl<T: 'static> AsOwner for Rc<T> {
    fn as_owner(&self) -> WeakOwner {
        let weak: Weak<T> = Rc::downgrade(self);
        WeakOwner { inner: weak }
    }
}

impl AsOwner for WeakOwner {
    fn as_owner(&self) -> WeakOwner {
        self.clone()
    }
}

impl<O: AsOwner + ?Sized> AsOwner for &O {
    fn as_owner(&self) -> WeakOwner {
        (**self).as_owner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weak_owner_follows_owner_lifetime() {
        let owner = Owner::new("player");
        let weak = owner.as_owner();
        assert!(weak.is_alive());

        owner.destroy();
        assert!(!weak.is_alive());
    }

    #[test]
    fn clones_keep_owner_alive() {
        let owner = Owner::new("npc");
        let clone = owner.clone();
        let weak = owner.as_owner();

        drop(owner);
        assert!(weak.is_alive());
        drop(clone);
        assert!(!weak.is_alive());
    }

    #[test]
    fn rc_values_can_own_actions() {
        let object = Rc::new(42_u32);
        let weak = object.as_owner();
        assert!(weak.same_owner(&object.as_owner()));
        assert!(!weak.same_owner(&Owner::new("other").as_owner()));

        drop(object);
        assert!(!weak.is_alive());
    }

    #[test]
    fn dangling_is_never_alive() {
        assert!(!WeakOwner::dangling().is_alive());
    }
}
