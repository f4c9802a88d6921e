//! Non-owning references from a focus manager to the controls it drives.

use std::sync::{Arc, Weak};

/// A control that can capture and release input.
///
/// Both calls must be harmless when the control is already in the
/// requested state.
pub trait Focusable: Send + Sync {
    fn focus(&self);
    fn blur(&self);
}

/// Slot holding a weak reference to one bound control.
///
#[derive(Clone)]
pub struct InputHandle {
    control: Option<Weak<dyn Focusable>>,
}

impl InputHandle {
    /// Return a new unbound handle.
    ///
    pub fn new() -> Self {
        InputHandle { control: None }
    }

    /// Attach the control, replacing any previous binding.
    ///
    pub fn bind<C: Focusable + 'static>(&mut self, control: &Arc<C>) {
        let weak: Weak<C> = Arc::downgrade(control);
        self.control = Some(weak);
    }

    pub fn unbind(&mut self) {
        self.control = None;
    }

    /// Returns true while the attached control is still alive.
    ///
    pub fn is_bound(&self) -> bool {
        self.upgrade().is_some()
    }

    /// Request input capture on the control, if any.
    ///
    pub fn focus(&self) {
        if let Some(control) = self.upgrade() {
            control.focus();
        }
    }

    /// Release input capture on the control, if any.
    ///
    pub fn blur(&self) {
        if let Some(control) = self.upgrade() {
            control.blur();
        }
    }

    fn upgrade(&self) -> Option<Arc<dyn Focusable>> {
        self.control.as_ref().and_then(Weak::upgrade)
    }
}

impl std::fmt::Debug for InputHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputHandle")
            .field("bound", &self.is_bound())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counter {
        focused: AtomicUsize,
        blurred: AtomicUsize,
    }

    impl Focusable for Counter {
        fn focus(&self) {
            self.focused.fetch_add(1, Ordering::SeqCst);
        }

        fn blur(&self) {
            self.blurred.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn unbound_handle_is_a_no_op() {
        let handle = InputHandle::new();
        assert!(!handle.is_bound());
        handle.focus();
        handle.blur();
    }

    #[test]
    fn bound_handle_forwards_calls() {
        let control = Arc::new(Counter::default());
        let mut handle = InputHandle::new();
        handle.bind(&control);
        assert!(handle.is_bound());
        handle.focus();
        handle.blur();
        handle.blur();
        assert_eq!(control.focused.load(Ordering::SeqCst), 1);
        assert_eq!(control.blurred.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn handle_does_not_keep_control_alive() {
        let control = Arc::new(Counter::default());
        let mut handle = InputHandle::new();
        handle.bind(&control);
        drop(control);
        assert!(!handle.is_bound());
        handle.focus();
    }

    #[test]
    fn unbind_detaches_control() {
        let control = Arc::new(Counter::default());
        let mut handle = InputHandle::new();
        handle.bind(&control);
        handle.unbind();
        handle.blur();
        assert_eq!(control.blurred.load(Ordering::SeqCst), 0);
    }
}
