#![forbid(unsafe_code)]

use jinrou_view::{Component, Node, Scope, UiEvent};

use super::{button, frame, heading, paragraph};
use crate::defs::{PlayerDialog, PlayerProfile};
use crate::orchestrator::Closer;

/// Player name form. `Input` edits the name; `Submit` with a blank name is
/// consumed but does not close.
pub struct PlayerContent {
    def: PlayerDialog,
    name: String,
    closer: Closer<Option<PlayerProfile>>,
}

impl PlayerContent {
    pub fn new(def: PlayerDialog, closer: Closer<Option<PlayerProfile>>) -> Self {
        Self {
            def,
            name: String::new(),
            closer,
        }
    }
}

impl Component for PlayerContent {
    fn name(&self) -> &'static str {
        "PlayerDialog"
    }

    fn render(&self, _scope: &Scope) -> Node {
        let mut children = vec![heading(self.def.title.as_str())];
        if let Some(message) = &self.def.message {
            children.push(paragraph(message.as_str()));
        }
        let mut input = Node::element("input", []).attr("value", self.name.clone());
        if let Some(icon) = &self.def.icon {
            input = input.attr("data-icon", icon.clone());
        }
        children.push(input);
        children.push(button("ok", self.def.ok.as_str()));
        children.push(button("cancel", self.def.cancel.as_str()));
        frame("player", self.def.modal, children)
    }

    fn handle_event(&mut self, event: &UiEvent, _scope: &Scope) -> bool {
        match event {
            UiEvent::Input(text) => {
                self.name = text.clone();
                true
            }
            UiEvent::Submit => {
                let name = self.name.trim();
                if !name.is_empty() {
                    self.closer.close(Some(PlayerProfile {
                        name: name.to_owned(),
                        icon: self.def.icon.clone(),
                    }));
                }
                true
            }
            UiEvent::Cancel => {
                self.closer.close(None);
                true
            }
            _ => false,
        }
    }
}
