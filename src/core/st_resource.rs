use std::{
    cell::{Ref, RefCell, RefMut},
    rc::Rc,
};

/// A single-threaded, reference-counted value with interior mutability.
///
/// Lets the logic thread hand the same state (a readiness flag, a recipe
/// sink) to both a deferred task and the code that later inspects it.
///
/// # Examples
///
/// ```
/// # use voxel_decor::core::StResource;
/// let ready = StResource::new(false);
/// let seen_by_task = ready.clone();
///
/// *ready.get_mut() = true;
/// assert!(*seen_by_task.get());
/// ```
///
/// # Panics
/// `get_mut` panics if a borrow from `get` or `get_mut` is still alive.
pub struct StResource<T> {
    resource: Rc<RefCell<T>>,
}

impl<T> StResource<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource: Rc::new(RefCell::new(resource)),
        }
    }

    /// Shared access to the value.
    pub fn get(&self) -> Ref<'_, T> {
        self.resource.borrow()
    }

    /// Exclusive access to the value.
    pub fn get_mut(&self) -> RefMut<'_, T> {
        self.resource.borrow_mut()
    }
}

impl<T> Clone for StResource<T> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
        }
    }
}
