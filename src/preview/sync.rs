use rand::TryRngCore;
use rand::rngs::OsRng;

use super::endpoint::preview_path;
use super::error::PreviewError;
use super::transport::{PreviewRequest, PreviewTransport, TransportFuture, parse_preview};
use crate::collector::collect;
use crate::dom::{Dom, FieldRegistry};
use crate::model::Field;
use crate::random_key::{RandomKeyController, RandomKeyState};

/// Runs preview passes against a page.
///
/// A pass reconciles the random key, snapshots the form, and posts the
/// snapshot to the preview endpoint derived from the page path. Passes are
/// never serialized: when several are in flight, whichever completes last
/// decides what the output field shows.
pub struct PreviewSynchronizer<T, S = OsRng> {
    transport: T,
    controller: RandomKeyController<S>,
    passes: u64,
    last_state: Option<RandomKeyState>,
}

impl<T: PreviewTransport> PreviewSynchronizer<T, OsRng> {
    pub fn new(transport: T) -> Self {
        Self::with_controller(transport, RandomKeyController::new())
    }
}

impl<T: PreviewTransport, S: TryRngCore> PreviewSynchronizer<T, S> {
    pub fn with_controller(transport: T, controller: RandomKeyController<S>) -> Self {
        Self {
            transport,
            controller,
            passes: 0,
            last_state: None,
        }
    }

    /// Runs the synchronous part of a pass and sends the request.
    ///
    /// Returns `None` without touching the page when it has no output field.
    pub fn begin_pass<D: Dom>(&mut self, dom: &mut D) -> Option<PendingPreview<D::Element>> {
        self.passes += 1;
        let pass = self.passes;

        let fields = FieldRegistry::resolve(dom);
        let Some(output) = fields.get(Field::Preview).cloned() else {
            tracing::debug!(pass, "no preview field, skipping pass");
            return None;
        };

        let state = self.controller.reconcile(dom, &fields);
        self.last_state = Some(state);

        let body = collect(dom, &fields);
        let path = preview_path(&dom.location_path());
        let csrf_token = fields.csrf_token(dom);
        tracing::debug!(
            pass,
            endpoint = %path,
            state = state.label(),
            entries = body.len(),
            "starting preview pass"
        );

        let future = self.transport.send(PreviewRequest {
            path,
            csrf_token,
            body,
        });
        Some(PendingPreview {
            output,
            pass,
            future,
        })
    }

    /// Runs a whole pass and writes its result to the page.
    pub async fn on_fields_changed<D: Dom>(
        &mut self,
        dom: &mut D,
    ) -> Option<PreviewOutcome<D::Element>> {
        let pending = self.begin_pass(dom)?;
        let outcome = pending.resolve().await;
        outcome.apply(dom);
        Some(outcome)
    }

    /// Number of passes started so far, including skipped ones.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Random key state applied by the most recent pass that reached the page.
    pub fn last_state(&self) -> Option<RandomKeyState> {
        self.last_state
    }

    pub fn controller(&self) -> &RandomKeyController<S> {
        &self.controller
    }
}

/// A pass waiting on its response. Dropping it abandons the pass.
pub struct PendingPreview<E> {
    output: E,
    pass: u64,
    future: TransportFuture,
}

impl<E> PendingPreview<E> {
    pub fn pass(&self) -> u64 {
        self.pass
    }

    /// Waits for the response. Failures become an empty preview.
    #[tracing::instrument(name = "preview", skip_all, fields(pass = self.pass))]
    pub async fn resolve(self) -> PreviewOutcome<E> {
        let Self {
            output,
            pass,
            future,
        } = self;
        match future.await.and_then(|body| parse_preview(&body)) {
            Ok(preview) => {
                tracing::debug!(chars = preview.chars().count(), "preview received");
                PreviewOutcome {
                    output,
                    pass,
                    preview,
                    failure: None,
                }
            }
            Err(err) => {
                tracing::debug!(error = %err, "preview failed, clearing output");
                PreviewOutcome {
                    output,
                    pass,
                    preview: String::new(),
                    failure: Some(err),
                }
            }
        }
    }
}

/// The finished result of one pass.
#[derive(Debug)]
pub struct PreviewOutcome<E> {
    output: E,
    pass: u64,
    preview: String,
    failure: Option<PreviewError>,
}

impl<E> PreviewOutcome<E> {
    /// Writes the preview (empty after a failure) into the output field.
    pub fn apply<D: Dom<Element = E>>(&self, dom: &mut D) {
        dom.set_value(&self.output, &self.preview);
    }

    pub fn pass(&self) -> u64 {
        self.pass
    }

    pub fn preview(&self) -> &str {
        &self.preview
    }

    /// Why the pass produced no preview, if it failed.
    pub fn failure(&self) -> Option<&PreviewError> {
        self.failure.as_ref()
    }
}
