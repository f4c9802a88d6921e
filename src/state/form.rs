//! Form editing state types.
//!
//! A `Form` owns one text input per field and a `FocusManager` over them.
//! Input controls never update the manager directly: capturing or releasing
//! input queues a `FocusNotice`, and `Form::dispatch_notices` delivers the
//! queue to the manager afterwards, the same way a widget toolkit delivers
//! focus events after the call that caused them.

use crate::focus::{FocusManager, Focusable};
use log::*;
use ratatui::style::Style;
use std::collections::VecDeque;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tui_textarea::{CursorMove, TextArea};

const MASK_CHAR: char = '\u{2022}';

/// A field of a form, in display order.
///
pub trait FormField: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    const ALL: &'static [Self];

    fn label(&self) -> &'static str;

    fn placeholder(&self) -> &'static str {
        ""
    }

    /// Secret fields are masked when drawn.
    fn is_secret(&self) -> bool {
        false
    }
}

/// Focus change reported by an input control.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FocusNotice<F> {
    Focused(F),
    Blurred(F),
}

type NoticeQueue<F> = Arc<Mutex<VecDeque<FocusNotice<F>>>>;

/// Result of advancing through a form with Enter.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FormStep {
    Moved,
    Submitted,
}

/// Input control bound to one form field.
///
pub struct InputControl<F> {
    id: F,
    captured: AtomicBool,
    notices: NoticeQueue<F>,
}

impl<F: FormField> InputControl<F> {
    fn new(id: F, notices: NoticeQueue<F>) -> Self {
        InputControl {
            id,
            captured: AtomicBool::new(false),
            notices,
        }
    }

    /// Returns true while the control holds input capture.
    ///
    pub fn is_captured(&self) -> bool {
        self.captured.load(Ordering::SeqCst)
    }

    fn notify(&self, notice: FocusNotice<F>) {
        if let Ok(mut queue) = self.notices.lock() {
            queue.push_back(notice);
        }
    }
}

impl<F: FormField> Focusable for InputControl<F> {
    fn focus(&self) {
        if !self.captured.swap(true, Ordering::SeqCst) {
            self.notify(FocusNotice::Focused(self.id));
        }
    }

    fn blur(&self) {
        if self.captured.swap(false, Ordering::SeqCst) {
            self.notify(FocusNotice::Blurred(self.id));
        }
    }
}

struct Field<F> {
    id: F,
    area: TextArea<'static>,
    control: Arc<InputControl<F>>,
}

/// Text inputs for one form plus the focus manager that coordinates them.
///
pub struct Form<F> {
    fields: Vec<Field<F>>,
    focus: FocusManager<F>,
    notices: NoticeQueue<F>,
}

impl<F: FormField> Default for Form<F> {
    fn default() -> Self {
        Form::new()
    }
}

impl<F: FormField> Form<F> {
    /// Return a new form with one empty, bound input per field.
    ///
    pub fn new() -> Self {
        let notices: NoticeQueue<F> = Arc::new(Mutex::new(VecDeque::new()));
        let mut focus = FocusManager::new(F::ALL.iter().copied());
        let mut fields = Vec::with_capacity(F::ALL.len());
        for id in F::ALL.iter().copied() {
            let control = Arc::new(InputControl::new(id, Arc::clone(&notices)));
            if let Err(e) = focus.bind(&id, &control) {
                error!("Failed to bind form input: {}", e);
            }
            fields.push(Field {
                id,
                area: new_area(id, ""),
                control,
            });
        }
        Form {
            fields,
            focus,
            notices,
        }
    }

    pub fn focused(&self) -> Option<F> {
        self.focus.focused().copied()
    }

    pub fn is_focused(&self, id: F) -> bool {
        self.focus.is_focused(&id)
    }

    /// Deliver queued control notices to the focus manager in arrival order,
    /// including the blur notices raised while delivering.
    ///
    pub fn dispatch_notices(&mut self) {
        loop {
            let pending: Vec<FocusNotice<F>> = match self.notices.lock() {
                Ok(mut queue) => queue.drain(..).collect(),
                Err(_) => return,
            };
            if pending.is_empty() {
                break;
            }
            for notice in pending {
                let result = match notice {
                    FocusNotice::Focused(id) => self.focus.on_focus(&id),
                    FocusNotice::Blurred(id) => self.focus.on_blur(&id),
                };
                if let Err(e) = result {
                    error!("Dropped focus notice {:?}: {}", notice, e);
                }
            }
        }
    }

    /// Move focus to the field.
    ///
    pub fn focus_field(&mut self, id: F) {
        if let Err(e) = self.focus.focus_input(&id) {
            error!("Failed to focus form input: {}", e);
        }
        self.dispatch_notices();
    }

    pub fn focus_first(&mut self) {
        if let Some(first) = F::ALL.first() {
            self.focus_field(*first);
        }
    }

    /// Focus the following field, wrapping to the first.
    ///
    pub fn focus_next(&mut self) {
        match self.focused() {
            Some(current) => match self.focus.next_input(&current).ok().flatten() {
                Some(next) => {
                    let next = *next;
                    self.focus_field(next);
                }
                None => self.focus_first(),
            },
            None => self.focus_first(),
        }
    }

    /// Focus the preceding field, wrapping to the last.
    ///
    pub fn focus_previous(&mut self) {
        let target = match self.focused() {
            Some(current) => self
                .focus
                .previous_input(&current)
                .ok()
                .flatten()
                .copied()
                .or_else(|| F::ALL.last().copied()),
            None => F::ALL.last().copied(),
        };
        if let Some(target) = target {
            self.focus_field(target);
        }
    }

    /// Chain to the next field, or release every input when the last field
    /// was focused.
    ///
    pub fn advance(&mut self) -> FormStep {
        let next = match self.focused() {
            Some(current) => self.focus.next_input(&current).ok().flatten().copied(),
            None => F::ALL.first().copied(),
        };
        match next {
            Some(next) => {
                self.focus_field(next);
                FormStep::Moved
            }
            None => {
                self.blur_all();
                FormStep::Submitted
            }
        }
    }

    /// Release input capture on every field.
    ///
    pub fn blur_all(&mut self) {
        self.focus.blur_all();
        self.dispatch_notices();
    }

    /// Type into the focused field. Returns false if nothing is focused.
    ///
    pub fn insert_char(&mut self, c: char) -> bool {
        match self.focused_area() {
            Some(area) => {
                area.insert_char(c);
                true
            }
            None => false,
        }
    }

    /// Delete the character before the cursor in the focused field.
    ///
    pub fn delete_char(&mut self) -> bool {
        match self.focused_area() {
            Some(area) => area.delete_char(),
            None => false,
        }
    }

    pub fn move_cursor(&mut self, cursor_move: CursorMove) {
        if let Some(area) = self.focused_area() {
            area.move_cursor(cursor_move);
        }
    }

    /// Return the trimmed text of the field.
    ///
    pub fn value(&self, id: F) -> String {
        self.field(id)
            .map(|field| field.area.lines().join(" ").trim().to_string())
            .unwrap_or_default()
    }

    /// Replace the text of the field, keeping the cursor at the end.
    ///
    pub fn set_value(&mut self, id: F, text: &str) {
        if let Some(field) = self.fields.iter_mut().find(|field| field.id == id) {
            field.area = new_area(id, text);
        }
    }

    /// Empty every field and release focus.
    ///
    pub fn clear(&mut self) {
        self.blur_all();
        for field in self.fields.iter_mut() {
            field.area = new_area(field.id, "");
        }
    }

    /// Returns true when the control bound to the field holds input capture.
    ///
    pub fn is_captured(&self, id: F) -> bool {
        self.field(id)
            .map(|field| field.control.is_captured())
            .unwrap_or(false)
    }

    /// Iterate over fields in display order as (field, input, focused).
    ///
    pub fn inputs_mut(&mut self) -> impl Iterator<Item = (F, &mut TextArea<'static>, bool)> {
        let focused = self.focused();
        self.fields
            .iter_mut()
            .map(move |field| (field.id, &mut field.area, Some(field.id) == focused))
    }

    fn field(&self, id: F) -> Option<&Field<F>> {
        self.fields.iter().find(|field| field.id == id)
    }

    fn focused_area(&mut self) -> Option<&mut TextArea<'static>> {
        let focused = self.focused()?;
        self.fields
            .iter_mut()
            .find(|field| field.id == focused)
            .map(|field| &mut field.area)
    }
}

fn new_area<F: FormField>(id: F, text: &str) -> TextArea<'static> {
    let mut area = TextArea::new(vec![text.to_string()]);
    if id.is_secret() {
        area.set_mask_char(MASK_CHAR);
    }
    area.set_placeholder_text(id.placeholder());
    area.set_cursor_line_style(Style::default());
    area.move_cursor(CursorMove::End);
    area
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
    enum Probe {
        First,
        Second,
        Third,
    }

    impl FormField for Probe {
        const ALL: &'static [Self] = &[Probe::First, Probe::Second, Probe::Third];

        fn label(&self) -> &'static str {
            match self {
                Probe::First => "First",
                Probe::Second => "Second",
                Probe::Third => "Third",
            }
        }

        fn is_secret(&self) -> bool {
            matches!(self, Probe::Third)
        }
    }

    fn type_text(form: &mut Form<Probe>, text: &str) {
        for c in text.chars() {
            assert!(form.insert_char(c));
        }
    }

    #[test]
    fn new_form_is_unfocused() {
        let form: Form<Probe> = Form::new();
        assert_eq!(form.focused(), None);
        assert!(!form.is_captured(Probe::First));
    }

    #[test]
    fn focus_field_updates_manager_through_notice() {
        let mut form: Form<Probe> = Form::new();
        form.focus_field(Probe::Second);
        assert_eq!(form.focused(), Some(Probe::Second));
        assert!(form.is_captured(Probe::Second));
    }

    #[test]
    fn moving_focus_releases_previous_control() {
        let mut form: Form<Probe> = Form::new();
        form.focus_field(Probe::First);
        form.focus_field(Probe::Second);
        assert_eq!(form.focused(), Some(Probe::Second));
        assert!(!form.is_captured(Probe::First));
        assert!(form.is_captured(Probe::Second));
    }

    #[test]
    fn late_blur_notice_does_not_clear_new_focus() {
        let mut form: Form<Probe> = Form::new();
        form.focus_field(Probe::First);
        // Both notices arrive together, the blur of First after the focus of Second.
        form.fields[1].control.focus();
        form.fields[0].control.blur();
        form.dispatch_notices();
        assert_eq!(form.focused(), Some(Probe::Second));
    }

    #[test]
    fn typing_goes_to_focused_field_only() {
        let mut form: Form<Probe> = Form::new();
        assert!(!form.insert_char('x'));
        form.focus_field(Probe::First);
        type_text(&mut form, "ab");
        form.focus_next();
        type_text(&mut form, "cd");
        assert!(form.delete_char());
        assert_eq!(form.value(Probe::First), "ab");
        assert_eq!(form.value(Probe::Second), "c");
        assert_eq!(form.value(Probe::Third), "");
    }

    #[test]
    fn focus_next_and_previous_wrap() {
        let mut form: Form<Probe> = Form::new();
        form.focus_next();
        assert_eq!(form.focused(), Some(Probe::First));
        form.focus_previous();
        assert_eq!(form.focused(), Some(Probe::Third));
        form.focus_next();
        assert_eq!(form.focused(), Some(Probe::First));
    }

    #[test]
    fn advance_submits_after_last_field() {
        let mut form: Form<Probe> = Form::new();
        assert_eq!(form.advance(), FormStep::Moved);
        assert_eq!(form.focused(), Some(Probe::First));
        assert_eq!(form.advance(), FormStep::Moved);
        assert_eq!(form.advance(), FormStep::Moved);
        assert_eq!(form.focused(), Some(Probe::Third));
        assert_eq!(form.advance(), FormStep::Submitted);
        assert_eq!(form.focused(), None);
        assert!(Probe::ALL.iter().all(|id| !form.is_captured(*id)));
    }

    #[test]
    fn blur_all_releases_everything() {
        let mut form: Form<Probe> = Form::new();
        form.focus_field(Probe::Third);
        form.blur_all();
        assert_eq!(form.focused(), None);
        assert!(!form.is_captured(Probe::Third));
    }

    #[test]
    fn set_value_and_clear() {
        let mut form: Form<Probe> = Form::new();
        form.set_value(Probe::Second, "  Casa Veche ");
        assert_eq!(form.value(Probe::Second), "Casa Veche");
        form.focus_field(Probe::Second);
        form.insert_char('!');
        assert_eq!(form.value(Probe::Second), "Casa Veche !");
        form.clear();
        assert_eq!(form.value(Probe::Second), "");
        assert_eq!(form.focused(), None);
    }

    #[test]
    fn inputs_mut_marks_focused_field() {
        let mut form: Form<Probe> = Form::new();
        form.focus_field(Probe::Second);
        let flags: Vec<(Probe, bool)> = form
            .inputs_mut()
            .map(|(id, _, focused)| (id, focused))
            .collect();
        assert_eq!(
            flags,
            vec![
                (Probe::First, false),
                (Probe::Second, true),
                (Probe::Third, false)
            ]
        );
    }
}
