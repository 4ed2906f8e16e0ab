use std::sync::Arc;

use pearl_core::{ChatController, ChatSettings, Completion, Config, GenerationBackend};
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::tui::AppEvent;
use crate::view::ChatView;

pub struct App {
    pub should_quit: bool,
    pub view: ChatView,
    pub controller: ChatController,
    backend: Arc<dyn GenerationBackend>,
    events: UnboundedSender<AppEvent>,
}

impl App {
    pub fn new(
        config: &Config,
        backend: Arc<dyn GenerationBackend>,
        events: UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            should_quit: false,
            view: ChatView::new(),
            controller: ChatController::new(ChatSettings::from(config)),
            backend,
            events,
        }
    }

    pub fn model(&self) -> &str {
        &self.controller.settings().model
    }

    /// Submit the input line. The backend call runs on a background task and its
    /// completion comes back through the event channel.
    pub fn submit(&mut self) {
        let input = self.view.input.clone();
        let Some(submission) = self.controller.begin(&input, &mut self.view) else {
            return;
        };

        let backend = Arc::clone(&self.backend);
        let events = self.events.clone();
        tokio::spawn(async move {
            let completion = submission.dispatch(backend.as_ref()).await;
            if events.send(AppEvent::Completion(completion)).is_err() {
                debug!("event loop gone, dropping completion");
            }
        });
    }

    pub fn cancel(&mut self) {
        self.controller.cancel(&mut self.view);
    }

    pub fn on_completion(&mut self, completion: Completion) {
        self.controller.complete(completion, &mut self.view);
    }
}
