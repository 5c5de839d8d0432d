//! Status bar widget: one line of preview pipeline state.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::random_key::RandomKeyState;

/// Data passed to the status bar widget.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusBarContext {
    /// Preview endpoint path of the current page.
    pub endpoint: String,
    /// `false` when no form was found to bind to.
    pub bound: bool,
    /// Passes sent but not yet applied.
    pub in_flight: usize,
    pub random_key: Option<RandomKeyState>,
    /// Keys come from the fallback generator.
    pub fallback_keys: bool,
    /// Failure of the most recently applied pass.
    pub last_failure: Option<String>,
}

/// Renders a one-line status bar.
///
/// Display format:
/// - Bound:   `POST /admin/x/preview/  1 in flight  random key on`
/// - Failure: the line above followed by the error in red
/// - Unbound: `preview inactive` in red
#[mutants::skip]
pub fn draw_status_bar(ctx: &StatusBarContext, frame: &mut Frame, area: Rect) {
    frame.render_widget(Paragraph::new(status_line(ctx)), area);
}

fn status_line(ctx: &StatusBarContext) -> Line<'static> {
    let cyan = Style::default().fg(Color::Cyan);
    let red = Style::default().fg(Color::Red);
    let yellow = Style::default().fg(Color::Yellow);

    if !ctx.bound {
        return Line::from(Span::styled("preview inactive", red));
    }

    let mut spans = vec![Span::styled(format!("POST {}", ctx.endpoint), cyan)];
    if ctx.in_flight > 0 {
        spans.push(Span::styled(format!("  {} in flight", ctx.in_flight), yellow));
    }
    if let Some(state) = ctx.random_key {
        spans.push(Span::styled(format!("  {}", state.label()), cyan));
    }
    if ctx.fallback_keys {
        spans.push(Span::styled("  weak rng", yellow));
    }
    if let Some(failure) = &ctx.last_failure {
        spans.push(Span::styled(format!("  {failure}"), red));
    }
    Line::from(spans)
}
