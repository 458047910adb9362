#![forbid(unsafe_code)]

use jinrou_view::{Component, Node, Scope, UiEvent};

use super::{button, frame, heading, option, paragraph};
use crate::defs::SelectDialog;
use crate::orchestrator::Closer;

/// Single choice among options; the first option starts selected.
pub struct SelectContent {
    def: SelectDialog,
    selected: usize,
    closer: Closer<Option<String>>,
}

impl SelectContent {
    pub fn new(def: SelectDialog, closer: Closer<Option<String>>) -> Self {
        Self {
            def,
            selected: 0,
            closer,
        }
    }
}

impl Component for SelectContent {
    fn name(&self) -> &'static str {
        "SelectDialog"
    }

    fn render(&self, _scope: &Scope) -> Node {
        let options = self
            .def
            .options
            .iter()
            .enumerate()
            .map(|(i, o)| option(i, i == self.selected, [Node::text(o.label.as_str())]));
        frame(
            "select",
            self.def.modal,
            [
                heading(self.def.title.as_str()),
                paragraph(self.def.message.as_str()),
                Node::element("select", options),
                button("ok", self.def.ok.as_str()),
                button("cancel", self.def.cancel.as_str()),
            ],
        )
    }

    fn handle_event(&mut self, event: &UiEvent, _scope: &Scope) -> bool {
        match event {
            UiEvent::Select(index) if *index < self.def.options.len() => {
                self.selected = *index;
                true
            }
            UiEvent::Submit => {
                let value = self.def.options.get(self.selected).map(|o| o.value.clone());
                self.closer.close(value);
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
