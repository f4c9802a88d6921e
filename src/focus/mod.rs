//! Input focus coordination.
//!
//! A `FocusManager` keeps at most one input of a form focused at a time.
//! It holds a weak handle per input, blurs the previous owner when another
//! input reports focus, and ignores blur notifications that arrive after a
//! newer input already took over.

mod error;
mod handle;

pub use error::FocusError;
pub use handle::{Focusable, InputHandle};

use log::*;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

/// Coordinates focus across a fixed set of named inputs.
///
#[derive(Debug)]
pub struct FocusManager<T> {
    ids: Vec<T>,
    handles: Vec<InputHandle>,
    index: HashMap<T, usize>,
    focused: Option<T>,
}

impl<T> FocusManager<T>
where
    T: Eq + Hash + Clone + Debug,
{
    /// Return a new unfocused instance managing the given inputs in order.
    /// Repeated identifiers keep their first position.
    ///
    pub fn new<I: IntoIterator<Item = T>>(ids: I) -> Self {
        let mut manager = FocusManager {
            ids: vec![],
            handles: vec![],
            index: HashMap::new(),
            focused: None,
        };
        for id in ids {
            if manager.index.contains_key(&id) {
                warn!("Ignoring duplicate focus input {:?}", id);
                continue;
            }
            manager.index.insert(id.clone(), manager.ids.len());
            manager.ids.push(id);
            manager.handles.push(InputHandle::new());
        }
        manager
    }

    /// Attach a control to the input, replacing any previous one.
    ///
    pub fn bind<C: Focusable + 'static>(
        &mut self,
        id: &T,
        control: &Arc<C>,
    ) -> Result<(), FocusError> {
        let position = self.position(id)?;
        self.handles[position].bind(control);
        Ok(())
    }

    pub fn unbind(&mut self, id: &T) -> Result<(), FocusError> {
        let position = self.position(id)?;
        self.handles[position].unbind();
        Ok(())
    }

    /// Record that the input gained focus, blurring the previous owner.
    ///
    pub fn on_focus(&mut self, id: &T) -> Result<(), FocusError> {
        self.position(id)?;
        if let Some(previous) = self.focused.as_ref().filter(|current| *current != id) {
            trace!("Focus moving from {:?} to {:?}", previous, id);
            self.handles[self.index[previous]].blur();
        }
        self.focused = Some(id.clone());
        Ok(())
    }

    /// Record that the input lost focus. Stale notifications for an input
    /// that no longer owns focus leave the state alone.
    ///
    pub fn on_blur(&mut self, id: &T) -> Result<(), FocusError> {
        self.position(id)?;
        if self.focused.as_ref() == Some(id) {
            self.focused = None;
        } else {
            trace!("Ignoring stale blur for {:?}", id);
        }
        Ok(())
    }

    /// Ask the input's control to take focus. The focus state follows once
    /// the control reports back through `on_focus`.
    ///
    pub fn focus_input(&self, id: &T) -> Result<(), FocusError> {
        let position = self.position(id)?;
        self.handles[position].focus();
        Ok(())
    }

    /// Blur every bound control in declaration order and clear focus.
    ///
    pub fn blur_all(&mut self) {
        for handle in &self.handles {
            handle.blur();
        }
        self.focused = None;
    }

    pub fn focused(&self) -> Option<&T> {
        self.focused.as_ref()
    }

    pub fn is_focused(&self, id: &T) -> bool {
        self.focused.as_ref() == Some(id)
    }

    pub fn is_bound(&self, id: &T) -> Result<bool, FocusError> {
        let position = self.position(id)?;
        Ok(self.handles[position].is_bound())
    }

    /// Identifiers in declaration order.
    ///
    pub fn ids(&self) -> &[T] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Return the input declared after the given one, if any.
    ///
    pub fn next_input(&self, id: &T) -> Result<Option<&T>, FocusError> {
        let position = self.position(id)?;
        Ok(self.ids.get(position + 1))
    }

    /// Return the input declared before the given one, if any.
    ///
    pub fn previous_input(&self, id: &T) -> Result<Option<&T>, FocusError> {
        let position = self.position(id)?;
        Ok(position.checked_sub(1).and_then(|p| self.ids.get(p)))
    }

    fn position(&self, id: &T) -> Result<usize, FocusError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| FocusError::unknown(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Control that appends every call to a shared journal.
    struct Recorder {
        name: &'static str,
        journal: Arc<Mutex<Vec<String>>>,
    }

    impl Focusable for Recorder {
        fn focus(&self) {
            self.journal
                .lock()
                .unwrap()
                .push(format!("focus:{}", self.name));
        }

        fn blur(&self) {
            self.journal
                .lock()
                .unwrap()
                .push(format!("blur:{}", self.name));
        }
    }

    fn bound_manager(
        names: &[&'static str],
    ) -> (
        FocusManager<&'static str>,
        Vec<Arc<Recorder>>,
        Arc<Mutex<Vec<String>>>,
    ) {
        let journal = Arc::new(Mutex::new(vec![]));
        let mut manager = FocusManager::new(names.iter().copied());
        let controls: Vec<Arc<Recorder>> = names
            .iter()
            .map(|&name| {
                Arc::new(Recorder {
                    name,
                    journal: Arc::clone(&journal),
                })
            })
            .collect();
        for (name, control) in names.iter().zip(&controls) {
            manager.bind(name, control).unwrap();
        }
        (manager, controls, journal)
    }

    fn take(journal: &Arc<Mutex<Vec<String>>>) -> Vec<String> {
        std::mem::take(&mut *journal.lock().unwrap())
    }

    #[test]
    fn starts_unfocused() {
        let manager = FocusManager::new(["email", "password"]);
        assert_eq!(manager.focused(), None);
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn empty_manager_never_focuses() {
        let mut manager: FocusManager<&str> = FocusManager::new(vec![]);
        assert!(manager.is_empty());
        assert!(manager.on_focus(&"email").is_err());
        manager.blur_all();
        assert_eq!(manager.focused(), None);
    }

    #[test]
    fn login_scenario() {
        let (mut manager, _controls, journal) = bound_manager(&["email", "password"]);

        manager.on_focus(&"email").unwrap();
        assert_eq!(manager.focused(), Some(&"email"));
        assert!(take(&journal).is_empty());

        manager.on_focus(&"password").unwrap();
        assert_eq!(manager.focused(), Some(&"password"));
        assert_eq!(take(&journal), vec!["blur:email"]);

        manager.on_blur(&"email").unwrap();
        assert_eq!(manager.focused(), Some(&"password"));

        manager.blur_all();
        assert_eq!(manager.focused(), None);
        assert_eq!(take(&journal), vec!["blur:email", "blur:password"]);
    }

    #[test]
    fn on_focus_is_idempotent() {
        let (mut manager, _controls, journal) = bound_manager(&["name", "email"]);
        manager.on_focus(&"name").unwrap();
        manager.on_focus(&"name").unwrap();
        assert_eq!(manager.focused(), Some(&"name"));
        assert!(take(&journal).is_empty());
    }

    #[test]
    fn matching_blur_clears_focus() {
        let (mut manager, _controls, _journal) = bound_manager(&["name"]);
        manager.on_focus(&"name").unwrap();
        manager.on_blur(&"name").unwrap();
        assert_eq!(manager.focused(), None);
    }

    #[test]
    fn blur_while_unfocused_is_ignored() {
        let (mut manager, _controls, _journal) = bound_manager(&["name", "email"]);
        manager.on_blur(&"email").unwrap();
        assert_eq!(manager.focused(), None);
    }

    #[test]
    fn blur_all_from_unfocused_still_blurs_controls() {
        let (mut manager, _controls, journal) = bound_manager(&["a", "b", "c"]);
        manager.blur_all();
        assert_eq!(manager.focused(), None);
        assert_eq!(take(&journal), vec!["blur:a", "blur:b", "blur:c"]);
    }

    #[test]
    fn blur_all_skips_unbound_inputs() {
        let journal = Arc::new(Mutex::new(vec![]));
        let mut manager = FocusManager::new(["a", "b"]);
        let b = Arc::new(Recorder {
            name: "b",
            journal: Arc::clone(&journal),
        });
        manager.bind(&"b", &b).unwrap();
        manager.on_focus(&"a").unwrap();
        manager.blur_all();
        assert_eq!(take(&journal), vec!["blur:b"]);
        assert_eq!(manager.focused(), None);
    }

    #[test]
    fn focus_input_does_not_change_state() {
        let (manager, _controls, journal) = bound_manager(&["email", "password"]);
        manager.focus_input(&"password").unwrap();
        assert_eq!(manager.focused(), None);
        assert_eq!(take(&journal), vec!["focus:password"]);
    }

    #[test]
    fn focus_input_only_touches_its_own_handle() {
        let (manager, _controls, journal) = bound_manager(&["a", "b"]);
        manager.focus_input(&"a").unwrap();
        assert_eq!(take(&journal), vec!["focus:a"]);
    }

    #[test]
    fn focus_moves_even_if_previous_control_is_gone() {
        let (mut manager, mut controls, journal) = bound_manager(&["a", "b"]);
        manager.on_focus(&"a").unwrap();
        controls.remove(0);
        manager.on_focus(&"b").unwrap();
        assert_eq!(manager.focused(), Some(&"b"));
        assert!(take(&journal).is_empty());
        assert!(!manager.is_bound(&"a").unwrap());
    }

    #[test]
    fn unknown_input_is_rejected_without_touching_state() {
        let (mut manager, _controls, journal) = bound_manager(&["email"]);
        manager.on_focus(&"email").unwrap();
        let error = manager.on_focus(&"phone").unwrap_err();
        assert!(matches!(error, FocusError::UnknownInput { .. }));
        assert!(manager.on_blur(&"phone").is_err());
        assert!(manager.focus_input(&"phone").is_err());
        assert!(manager.unbind(&"phone").is_err());
        assert_eq!(manager.focused(), Some(&"email"));
        assert!(take(&journal).is_empty());
    }

    #[test]
    fn duplicates_keep_first_position() {
        let manager = FocusManager::new(["a", "b", "a", "c"]);
        assert_eq!(manager.ids(), &["a", "b", "c"]);
        assert_eq!(manager.next_input(&"b").unwrap(), Some(&"c"));
    }

    #[test]
    fn neighbours_follow_declaration_order() {
        let manager = FocusManager::new(["a", "b", "c"]);
        assert_eq!(manager.next_input(&"a").unwrap(), Some(&"b"));
        assert_eq!(manager.next_input(&"c").unwrap(), None);
        assert_eq!(manager.previous_input(&"a").unwrap(), None);
        assert_eq!(manager.previous_input(&"c").unwrap(), Some(&"b"));
    }

    #[test]
    fn at_most_one_input_focused() {
        let (mut manager, _controls, _journal) = bound_manager(&["a", "b", "c"]);
        let steps: [(bool, &str); 8] = [
            (true, "a"),
            (true, "b"),
            (false, "a"),
            (true, "c"),
            (false, "b"),
            (false, "c"),
            (true, "a"),
            (true, "a"),
        ];
        let mut expected: Option<&str> = None;
        for (is_focus, id) in steps {
            if is_focus {
                manager.on_focus(&id).unwrap();
                expected = Some(id);
            } else {
                manager.on_blur(&id).unwrap();
                if expected == Some(id) {
                    expected = None;
                }
            }
            assert_eq!(manager.focused().copied(), expected);
            let count = manager.ids().iter().filter(|id| manager.is_focused(id)).count();
            assert!(count <= 1);
        }
    }
}
