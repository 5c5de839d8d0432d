//! Renders the rows of a [`Document`] form as terminal lines.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::dom::{Document, Element, ElementId, ElementKind};

const LABEL_WIDTH: usize = 26;

/// Focus position over a list of focusable elements whose length may change
/// between key presses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Focus {
    index: usize,
}

impl Focus {
    /// Moves to the next of `len` entries, wrapping around.
    pub fn next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.index = (self.clamped(len) + 1) % len;
    }

    /// Moves to the previous of `len` entries, wrapping around.
    pub fn prev(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.index = (self.clamped(len) + len - 1) % len;
    }

    /// Index into a list of `len` entries; the last one when the list shrank.
    pub fn clamped(self, len: usize) -> usize {
        self.index.min(len.saturating_sub(1))
    }
}

/// One line per rendered row under `root`, with the focused element highlighted.
pub fn form_lines(doc: &Document, root: ElementId, focused: Option<ElementId>) -> Vec<Line<'static>> {
    doc.subtree(root)
        .into_iter()
        .filter(|&id| doc.get(id).is_some_and(|e| e.kind == ElementKind::Row))
        .filter(|&id| doc.is_rendered(id))
        .map(|row| row_line(doc, row, focused))
        .collect()
}

fn row_line(doc: &Document, row: ElementId, focused: Option<ElementId>) -> Line<'static> {
    let label = doc
        .get(row)
        .and_then(|e| e.label.clone())
        .unwrap_or_default();
    let mut spans = vec![Span::styled(
        format!("{label:<LABEL_WIDTH$}"),
        Style::default().fg(Color::Cyan),
    )];
    for &child in doc.children(row) {
        let Some(element) = doc.get(child) else {
            continue;
        };
        let style = if Some(child) == focused {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else if element.readonly {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };
        spans.push(Span::styled(element_text(element), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn element_text(element: &Element) -> String {
    match &element.kind {
        ElementKind::TextInput => format!("[{}]", element.value),
        ElementKind::Checkbox => {
            let mark = if element.checked { 'x' } else { ' ' };
            match &element.label {
                Some(label) => format!("[{mark}] {label}"),
                None => format!("[{mark}]"),
            }
        }
        ElementKind::Select { options } => {
            let label = options
                .iter()
                .find(|(value, _)| *value == element.value)
                .map_or(element.value.as_str(), |(_, label)| label.as_str());
            format!("< {label} >")
        }
        _ => String::new(),
    }
}

/// Renders the form under `root` inside a titled border.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_form(
    doc: &Document,
    root: Option<ElementId>,
    focused: Option<ElementId>,
    frame: &mut Frame,
    area: Rect,
) {
    let block = Block::default()
        .title(format!(" {} ", doc.path()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let lines = match root {
        Some(root) => form_lines(doc, root, focused),
        None => vec![Line::from(Span::styled(
            "no form on this page",
            Style::default().fg(Color::Red),
        ))],
    };
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}
