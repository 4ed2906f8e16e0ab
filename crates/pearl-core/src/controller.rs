//! Request lifecycle for one chat session
//!
//! A submission moves through three steps so that a UI event loop never blocks on
//! the network: `begin` records the user turn and prepares the request,
//! `Submission::dispatch` awaits the backend, and `complete` renders the reply or
//! the fallback message. `submit` runs all three in sequence.

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::ai::{GenerateRequest, GenerationBackend, GenerationOptions};
use crate::config::{Config, OverlapPolicy};
use crate::error::ChatError;
use crate::markup;
use crate::prompt::PromptPayload;
use crate::state::{PendingState, SubmissionId, Turn};
use crate::surface::DisplaySurface;

/// Shown in place of a reply whenever a request fails, whatever the cause
pub const FALLBACK_MESSAGE: &str = "Sorry, there was an error processing your request.";

/// Fixed per-deployment settings used to build every request
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSettings {
    pub model: String,
    pub instruction_prefix: String,
    pub options: Option<GenerationOptions>,
    pub overlap_policy: OverlapPolicy,
}

impl From<&Config> for ChatSettings {
    fn from(config: &Config) -> Self {
        Self {
            model: config.model.clone(),
            instruction_prefix: config.instruction_prefix.clone(),
            options: config.options,
            overlap_policy: config.overlap_policy,
        }
    }
}

/// A prepared backend call, owned by whoever drives it to completion
#[derive(Debug)]
pub struct Submission {
    id: SubmissionId,
    request: GenerateRequest,
    cancel: CancellationToken,
}

impl Submission {
    pub fn id(&self) -> SubmissionId {
        self.id
    }

    pub fn request(&self) -> &GenerateRequest {
        &self.request
    }

    /// Await the backend. Resolves with `ChatError::Cancelled` as soon as the
    /// submission is aborted or superseded.
    pub async fn dispatch(self, backend: &dyn GenerationBackend) -> Completion {
        let outcome = tokio::select! {
            _ = self.cancel.cancelled() => Err(ChatError::Cancelled),
            result = backend.generate(&self.request) => result,
        };

        Completion {
            id: self.id,
            outcome,
        }
    }
}

/// The resolved result of a dispatched submission
#[derive(Debug)]
pub struct Completion {
    pub id: SubmissionId,
    pub outcome: Result<String, ChatError>,
}

pub struct ChatController {
    settings: ChatSettings,
    state: PendingState,
    in_flight: Option<CancellationToken>,
    next_id: u64,
    turns: Vec<Turn>,
}

impl ChatController {
    pub fn new(settings: ChatSettings) -> Self {
        Self {
            settings,
            state: PendingState::Idle,
            in_flight: None,
            next_id: 0,
            turns: Vec::new(),
        }
    }

    pub fn settings(&self) -> &ChatSettings {
        &self.settings
    }

    pub fn state(&self) -> PendingState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        self.state.is_pending()
    }

    /// Conversation so far, in display order
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Record the user's turn and prepare the backend call.
    ///
    /// Returns `None` without touching any state when the trimmed text is empty,
    /// or when a request is outstanding under `OverlapPolicy::Reject`.
    pub fn begin<S>(&mut self, raw_user_text: &str, surface: &mut S) -> Option<Submission>
    where
        S: DisplaySurface + ?Sized,
    {
        let user_text = raw_user_text.trim();
        if user_text.is_empty() {
            return None;
        }

        if let PendingState::AwaitingResponse { submission } = self.state {
            match self.settings.overlap_policy {
                OverlapPolicy::Reject => {
                    debug!(outstanding = submission.0, "request outstanding, submission rejected");
                    return None;
                }
                OverlapPolicy::Supersede => {
                    debug!(outstanding = submission.0, "superseding outstanding request");
                    if let Some(token) = self.in_flight.take() {
                        token.cancel();
                    }
                }
            }
        }

        let turn = Turn::user(user_text);
        surface.append_message(turn.role, &turn.content);
        self.turns.push(turn);
        surface.clear_input();

        let id = SubmissionId(self.next_id);
        self.next_id += 1;
        self.state = PendingState::AwaitingResponse { submission: id };
        surface.set_pending(true);

        let prompt = PromptPayload::new(&self.settings.instruction_prefix, user_text).build();
        let request = GenerateRequest::new(&self.settings.model, prompt, self.settings.options);
        let cancel = CancellationToken::new();
        self.in_flight = Some(cancel.clone());

        debug!(submission = id.0, model = %request.model, "submission started");

        Some(Submission {
            id,
            request,
            cancel,
        })
    }

    /// Render the outcome of the current submission. Completions of cancelled or
    /// superseded submissions are dropped.
    pub fn complete<S>(&mut self, completion: Completion, surface: &mut S)
    where
        S: DisplaySurface + ?Sized,
    {
        let is_current = matches!(
            self.state,
            PendingState::AwaitingResponse { submission } if submission == completion.id
        );
        if !is_current {
            debug!(submission = completion.id.0, "discarding stale completion");
            return;
        }

        self.state = PendingState::Idle;
        self.in_flight = None;
        surface.set_pending(false);

        let turn = match completion.outcome {
            Ok(text) => {
                debug!(submission = completion.id.0, len = text.len(), "reply received");
                let rendered = markup::render(&text);
                Turn::assistant(text, rendered)
            }
            Err(err) => {
                warn!(submission = completion.id.0, error = %err, "generation request failed");
                Turn::assistant_plain(FALLBACK_MESSAGE)
            }
        };

        surface.append_message(turn.role, &turn.content);
        self.turns.push(turn);
    }

    /// Abort the outstanding request, if any. Nothing is appended.
    pub fn cancel<S>(&mut self, surface: &mut S) -> bool
    where
        S: DisplaySurface + ?Sized,
    {
        let PendingState::AwaitingResponse { submission } = self.state else {
            return false;
        };

        if let Some(token) = self.in_flight.take() {
            token.cancel();
        }
        self.state = PendingState::Idle;
        surface.set_pending(false);

        debug!(submission = submission.0, "submission cancelled");
        true
    }

    /// Handle one submission end to end
    pub async fn submit<S>(
        &mut self,
        raw_user_text: &str,
        backend: &dyn GenerationBackend,
        surface: &mut S,
    ) where
        S: DisplaySurface + ?Sized,
    {
        let Some(submission) = self.begin(raw_user_text, surface) else {
            return;
        };
        let completion = submission.dispatch(backend).await;
        self.complete(completion, surface);
    }
}
