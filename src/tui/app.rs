use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::layout::{Constraint, Layout};
use ratatui::{Frame, Terminal};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::dom::{Document, ElementId};
use crate::preview::{PreviewOutcome, PreviewSynchronizer, PreviewTransport, locate_form, preview_path};

use super::action::Action;
use super::error::AppError;
use super::screens::PageFormState;
use super::screens::page_form::draw_page_form;
use super::widgets::{StatusBarContext, draw_status_bar};

/// How long the UI waits for a terminal event before checking for outcomes.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Top-level application state.
///
/// The page lives on the UI thread. Pending previews run on `runtime` and send
/// their outcomes back over a channel; the UI applies them in arrival order.
pub struct App<T> {
    document: Document,
    form: Option<ElementId>,
    screen: PageFormState,
    sync: PreviewSynchronizer<T>,
    runtime: Handle,
    outcomes_tx: UnboundedSender<PreviewOutcome<ElementId>>,
    outcomes_rx: UnboundedReceiver<PreviewOutcome<ElementId>>,
    in_flight: usize,
    last_failure: Option<String>,
    should_quit: bool,
}

impl<T: PreviewTransport> App<T> {
    /// Binds to the form on `document`; passes are spawned on `runtime`.
    pub fn new(document: Document, transport: T, runtime: Handle) -> Self {
        let form = locate_form(&document);
        let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();
        Self {
            document,
            form,
            screen: PageFormState::new(form),
            sync: PreviewSynchronizer::new(transport),
            runtime,
            outcomes_tx,
            outcomes_rx,
            in_flight: 0,
            last_failure: None,
            should_quit: false,
        }
    }

    /// Main event loop: apply outcomes → draw → poll for a key → dispatch.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        self.refresh();
        while !self.should_quit {
            self.drain_outcomes();
            terminal.draw(|frame| self.draw(frame))?;
            if event::poll(POLL_INTERVAL)?
                && let Event::Key(key) = event::read()?
            {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn draw(&self, frame: &mut Frame) {
        let [body, status] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());
        draw_page_form(&self.screen, &self.document, frame, body);
        draw_status_bar(&self.status(), frame, status);
    }

    /// Handles a key press; edits start a preview pass.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match self.screen.handle_key(&mut self.document, key) {
            Action::None => {}
            Action::Edited => self.refresh(),
            Action::Quit => self.should_quit = true,
        }
    }

    /// Starts a preview pass for the bound form. Without one, nothing is sent.
    pub fn refresh(&mut self) {
        if self.form.is_none() {
            return;
        }
        let Some(pending) = self.sync.begin_pass(&mut self.document) else {
            return;
        };
        self.in_flight += 1;
        let outcomes = self.outcomes_tx.clone();
        self.runtime.spawn(async move {
            let outcome = pending.resolve().await;
            if outcomes.send(outcome).is_err() {
                tracing::trace!("app closed before preview arrived");
            }
        });
    }

    /// Applies every outcome that has arrived. Returns how many were applied.
    pub fn drain_outcomes(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(outcome) = self.outcomes_rx.try_recv() {
            outcome.apply(&mut self.document);
            self.last_failure = outcome.failure().map(ToString::to_string);
            self.in_flight = self.in_flight.saturating_sub(1);
            applied += 1;
        }
        applied
    }

    pub fn status(&self) -> StatusBarContext {
        StatusBarContext {
            endpoint: preview_path(self.document.path()),
            bound: self.form.is_some(),
            in_flight: self.in_flight,
            random_key: self.sync.last_state(),
            fallback_keys: self.sync.controller().generator().is_using_fallback(),
            last_failure: self.last_failure.clone(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Returns the bound form, if any.
    pub fn form(&self) -> Option<ElementId> {
        self.form
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Returns `true` if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::dom::{Dom, Element, PageOptions, obfuscation_form_page};
    use crate::model::Field;
    use crate::preview::{FakeTransport, PreviewError};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent {
            kind: KeyEventKind::Release,
            ..press(code)
        }
    }

    fn make_app(transport: &FakeTransport) -> App<FakeTransport> {
        let page = obfuscation_form_page(&PageOptions {
            path: "/admin/app/model/3/change/".into(),
            csrf_token: "tok3n".into(),
            group: "12".into(),
            ..PageOptions::default()
        });
        App::new(page, transport.clone(), Handle::current())
    }

    fn preview(app: &App<FakeTransport>) -> String {
        let out = app.document().element_by_id(Field::Preview.element_id()).unwrap();
        app.document().value(&out)
    }

    /// Lets spawned passes finish and applies their outcomes.
    async fn settle(app: &mut App<FakeTransport>) {
        for _ in 0..100 {
            tokio::task::yield_now().await;
            app.drain_outcomes();
            if app.in_flight() == 0 {
                return;
            }
        }
        panic!("passes still in flight");
    }

    #[tokio::test]
    async fn refresh_applies_preview() {
        let transport = FakeTransport::default();
        transport.respond(r#"{"preview": "ABCD┃EFGH"}"#);
        let mut app = make_app(&transport);

        app.refresh();
        assert_eq!(app.in_flight(), 1);
        settle(&mut app).await;
        assert_eq!(preview(&app), "ABCD┃EFGH");
        assert_eq!(transport.requests()[0].path, "/admin/app/model/3/preview/");
    }

    #[tokio::test]
    async fn typing_sends_a_pass_per_edit() {
        let transport = FakeTransport::default();
        let mut app = make_app(&transport);

        app.handle_key(press(KeyCode::Char('3')));
        app.handle_key(press(KeyCode::Char('4')));
        settle(&mut app).await;

        let groups: Vec<String> = transport
            .requests()
            .iter()
            .map(|r| r.body.get("group").unwrap_or_default().to_string())
            .collect();
        assert_eq!(groups, vec!["123", "1234"]);
    }

    #[tokio::test]
    async fn navigation_sends_nothing() {
        let transport = FakeTransport::default();
        let mut app = make_app(&transport);

        app.handle_key(press(KeyCode::Tab));
        app.handle_key(press(KeyCode::BackTab));
        settle(&mut app).await;
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn failure_clears_preview_and_is_reported() {
        let transport = FakeTransport::default();
        transport.respond(r#"{"preview": "first"}"#);
        transport.fail(PreviewError::Network("refused".into()));
        let mut app = make_app(&transport);

        app.refresh();
        settle(&mut app).await;
        assert_eq!(preview(&app), "first");

        app.refresh();
        settle(&mut app).await;
        assert_eq!(preview(&app), "");
        assert_eq!(app.status().last_failure.as_deref(), Some("network error: refused"));
    }

    #[tokio::test]
    async fn unbound_page_sends_nothing() {
        let transport = FakeTransport::default();
        let mut doc = Document::new("/admin/app/model/add/");
        doc.append(None, Element::text("id_group", "group"));
        doc.append(None, Element::text("id_preview", "preview").readonly());
        let mut app = App::new(doc, transport.clone(), Handle::current());

        assert!(app.form().is_none());
        app.refresh();
        app.handle_key(press(KeyCode::Char('7')));
        settle(&mut app).await;
        assert!(transport.requests().is_empty());
        assert!(!app.status().bound);
    }

    #[tokio::test]
    async fn escape_quits_and_release_is_ignored() {
        let transport = FakeTransport::default();
        let mut app = make_app(&transport);

        app.handle_key(release(KeyCode::Esc));
        assert!(!app.should_quit());
        app.handle_key(press(KeyCode::Esc));
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn draw_renders_form_and_status() {
        let transport = FakeTransport::default();
        let mut app = make_app(&transport);
        app.refresh();
        settle(&mut app).await;

        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        let buffer = terminal.backend().buffer();
        let text: String = (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n");
        assert!(text.contains("/admin/app/model/3/change/"));
        assert!(text.contains("Group"));
        assert!(text.contains("POST /admin/app/model/3/preview/"));
        assert!(text.contains("random key off"));
    }
}
