#![forbid(unsafe_code)]

use jinrou_view::{Component, Node, Scope, UiEvent};

use super::{button, frame, heading, paragraph};
use crate::defs::MessageDialog;
use crate::orchestrator::Closer;

/// Message with a single close button.
pub struct MessageContent {
    def: MessageDialog,
    closer: Closer<()>,
}

impl MessageContent {
    pub fn new(def: MessageDialog, closer: Closer<()>) -> Self {
        Self { def, closer }
    }
}

impl Component for MessageContent {
    fn name(&self) -> &'static str {
        "MessageDialog"
    }

    fn render(&self, _scope: &Scope) -> Node {
        frame(
            "message",
            self.def.modal,
            [
                heading(self.def.title.as_str()),
                paragraph(self.def.message.as_str()),
                button("ok", self.def.ok.as_str()),
            ],
        )
    }

    fn handle_event(&mut self, event: &UiEvent, _scope: &Scope) -> bool {
        match event {
            UiEvent::Submit | UiEvent::Cancel => {
                self.closer.close(());
                true
            }
            _ => false,
        }
    }
}
