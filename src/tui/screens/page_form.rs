//! Editing screen for the obfuscation form page.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::dom::{Document, ElementId, ElementKind};
use crate::tui::action::Action;
use crate::tui::widgets::{Focus, draw_form};

/// Focus state for editing the fields of one form.
#[derive(Debug, Clone, Default)]
pub struct PageFormState {
    root: Option<ElementId>,
    focus: Focus,
}

impl PageFormState {
    /// Edits the fields under `root`; with no root, every field on the page.
    pub fn new(root: Option<ElementId>) -> Self {
        Self {
            root,
            focus: Focus::default(),
        }
    }

    /// Editable elements that are currently rendered, in document order.
    pub fn focusable(&self, doc: &Document) -> Vec<ElementId> {
        let ids = match self.root {
            Some(root) => doc.subtree(root),
            None => doc.ids(),
        };
        ids.into_iter()
            .filter(|&id| doc.get(id).is_some_and(|e| e.is_editable()))
            .filter(|&id| doc.is_rendered(id))
            .collect()
    }

    pub fn focused(&self, doc: &Document) -> Option<ElementId> {
        let focusable = self.focusable(doc);
        focusable.get(self.focus.clamped(focusable.len())).copied()
    }

    /// Applies a key press to the page.
    pub fn handle_key(&mut self, doc: &mut Document, key: KeyEvent) -> Action {
        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return Action::Quit,
            KeyCode::Char('c') if control => return Action::Quit,
            KeyCode::Tab | KeyCode::Down => {
                self.focus.next(self.focusable(doc).len());
                return Action::None;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus.prev(self.focusable(doc).len());
                return Action::None;
            }
            _ => {}
        }

        let Some(element) = self.focused(doc).and_then(|id| doc.get_mut(id)) else {
            return Action::None;
        };
        let changed = match (&element.kind, key.code) {
            (ElementKind::TextInput, KeyCode::Char(c)) if !control => {
                element.value.push(c);
                true
            }
            (ElementKind::TextInput, KeyCode::Backspace) => element.value.pop().is_some(),
            (ElementKind::Checkbox, KeyCode::Char(' ') | KeyCode::Enter) => {
                element.checked = !element.checked;
                true
            }
            (ElementKind::Select { options }, KeyCode::Left | KeyCode::Right)
                if !options.is_empty() =>
            {
                let len = options.len();
                let current = options
                    .iter()
                    .position(|(value, _)| *value == element.value)
                    .unwrap_or(0);
                let next = if key.code == KeyCode::Right {
                    (current + 1) % len
                } else {
                    (current + len - 1) % len
                };
                element.value = options[next].0.clone();
                true
            }
            _ => false,
        };

        if changed { Action::Edited } else { Action::None }
    }
}

/// Renders the page form with the focused field highlighted.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_page_form(state: &PageFormState, doc: &Document, frame: &mut Frame, area: Rect) {
    draw_form(doc, state.root, state.focused(doc), frame, area);
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEventKind, KeyEventState};

    use super::*;
    use crate::dom::{Dom, PageOptions, obfuscation_form_page};
    use crate::model::Field;
    use crate::preview::locate_form;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn setup() -> (Document, PageFormState) {
        let doc = obfuscation_form_page(&PageOptions {
            group: "12".into(),
            ..PageOptions::default()
        });
        let state = PageFormState::new(locate_form(&doc));
        (doc, state)
    }

    fn el(doc: &Document, field: Field) -> ElementId {
        doc.element_by_id(field.element_id()).unwrap()
    }

    fn focus_on(state: &mut PageFormState, doc: &mut Document, field: Field) {
        let target = el(doc, field);
        while state.focused(doc) != Some(target) {
            state.handle_key(doc, press(KeyCode::Tab));
        }
    }

    #[test]
    fn focus_starts_on_group() {
        let (doc, state) = setup();
        assert_eq!(state.focused(&doc), Some(el(&doc, Field::Group)));
    }

    #[test]
    fn typing_edits_text_field() {
        let (mut doc, mut state) = setup();
        assert_eq!(state.handle_key(&mut doc, press(KeyCode::Char('4'))), Action::Edited);
        assert_eq!(doc.value(&el(&doc, Field::Group)), "124");
        assert_eq!(state.handle_key(&mut doc, press(KeyCode::Backspace)), Action::Edited);
        assert_eq!(doc.value(&el(&doc, Field::Group)), "12");
    }

    #[test]
    fn backspace_on_empty_field_changes_nothing() {
        let (mut doc, mut state) = setup();
        focus_on(&mut state, &mut doc, Field::CustomName);
        assert_eq!(state.handle_key(&mut doc, press(KeyCode::Backspace)), Action::None);
    }

    #[test]
    fn space_toggles_checkbox() {
        let (mut doc, mut state) = setup();
        focus_on(&mut state, &mut doc, Field::OptOut);
        assert_eq!(state.handle_key(&mut doc, press(KeyCode::Char(' '))), Action::Edited);
        assert!(!doc.is_checked(&el(&doc, Field::OptOut)));
    }

    #[test]
    fn arrows_cycle_select_options() {
        let (mut doc, mut state) = setup();
        focus_on(&mut state, &mut doc, Field::ObfuscationType);
        let select = el(&doc, Field::ObfuscationType);
        let start = doc.value(&select);

        assert_eq!(state.handle_key(&mut doc, press(KeyCode::Right)), Action::Edited);
        assert_ne!(doc.value(&select), start);
        state.handle_key(&mut doc, press(KeyCode::Left));
        assert_eq!(doc.value(&select), start);
    }

    #[test]
    fn readonly_and_hidden_fields_are_skipped() {
        let (doc, state) = setup();
        let focusable = state.focusable(&doc);
        assert!(!focusable.contains(&el(&doc, Field::Preview)));
        assert!(!focusable.contains(&el(&doc, Field::RandomKey)));
        assert!(focusable.contains(&el(&doc, Field::RandomKeyRotateName)));

        let mut doc = doc;
        let rotate = el(&doc, Field::RandomKeyRotateName);
        let row = doc.closest_row(&rotate).unwrap();
        doc.set_displayed(&row, false);
        assert!(!state.focusable(&doc).contains(&rotate));
    }

    #[test]
    fn back_tab_wraps_to_last_field() {
        let (mut doc, mut state) = setup();
        state.handle_key(&mut doc, press(KeyCode::BackTab));
        let last = *state.focusable(&doc).last().unwrap();
        assert_eq!(state.focused(&doc), Some(last));
    }

    #[test]
    fn escape_and_ctrl_c_quit() {
        let (mut doc, mut state) = setup();
        assert_eq!(state.handle_key(&mut doc, press(KeyCode::Esc)), Action::Quit);
        let ctrl_c = KeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..press(KeyCode::Char('c'))
        };
        assert_eq!(state.handle_key(&mut doc, ctrl_c), Action::Quit);
        assert_eq!(doc.value(&el(&doc, Field::Group)), "12");
    }
}
