//! The contract a front-end implements so the controller can draw into it

use crate::state::{DisplayContent, Role};

/// Presentation-side hooks used by the request lifecycle. Holds no business logic.
pub trait DisplaySurface {
    /// User content is drawn literally; `DisplayContent::Markup` is drawn with its
    /// structure applied, not escaped a second time.
    fn append_message(&mut self, role: Role, content: &DisplayContent);

    fn set_pending(&mut self, pending: bool);

    fn clear_input(&mut self);
}

/// Surface calls recorded in order, for headless use and tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    Message(Role, DisplayContent),
    Pending(bool),
    InputCleared,
}

/// A display surface that only records what it was asked to draw
#[derive(Debug, Default)]
pub struct Transcript {
    events: Vec<SurfaceEvent>,
    pending: bool,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SurfaceEvent] {
        &self.events
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn messages(&self) -> impl Iterator<Item = (Role, &DisplayContent)> {
        self.events.iter().filter_map(|event| match event {
            SurfaceEvent::Message(role, content) => Some((*role, content)),
            _ => None,
        })
    }
}

impl DisplaySurface for Transcript {
    fn append_message(&mut self, role: Role, content: &DisplayContent) {
        self.events.push(SurfaceEvent::Message(role, content.clone()));
    }

    fn set_pending(&mut self, pending: bool) {
        self.pending = pending;
        self.events.push(SurfaceEvent::Pending(pending));
    }

    fn clear_input(&mut self) {
        self.events.push(SurfaceEvent::InputCleared);
    }
}
