#![forbid(unsafe_code)]

use jinrou_i18n::Translated;
use jinrou_view::{Component, Node, Scope, UiEvent};

use super::{button, frame, heading, label, option};
use crate::defs::IconSelectDialog;
use crate::orchestrator::Closer;

/// Icon picker. `Select(i)` picks a candidate, `Input(url)` enters one by
/// hand; `Submit` without a choice is consumed but does not close.
pub struct IconSelectContent {
    def: IconSelectDialog,
    choice: Option<String>,
    title: Translated,
    ok: Translated,
    cancel: Translated,
    closer: Closer<Option<String>>,
}

impl IconSelectContent {
    pub fn new(def: IconSelectDialog, closer: Closer<Option<String>>) -> Self {
        Self {
            def,
            choice: None,
            title: label("icon_select.title"),
            ok: label("icon_select.ok"),
            cancel: label("icon_select.cancel"),
            closer,
        }
    }
}

impl Component for IconSelectContent {
    fn name(&self) -> &'static str {
        "IconSelectDialog"
    }

    fn render(&self, scope: &Scope) -> Node {
        let candidates = self.def.candidates.iter().enumerate().map(|(i, url)| {
            let selected = self.choice.as_deref() == Some(url.as_str());
            option(i, selected, [Node::element("img", []).attr("src", url.clone())])
        });
        frame(
            "icon-select",
            self.def.modal,
            [
                heading(self.title.render(scope)),
                Node::element("ul", candidates),
                Node::element("input", []).attr("value", self.choice.clone().unwrap_or_default()),
                button("ok", self.ok.render(scope)),
                button("cancel", self.cancel.render(scope)),
            ],
        )
    }

    fn handle_event(&mut self, event: &UiEvent, _scope: &Scope) -> bool {
        match event {
            UiEvent::Select(index) => match self.def.candidates.get(*index) {
                Some(url) => {
                    self.choice = Some(url.clone());
                    true
                }
                None => false,
            },
            UiEvent::Input(url) => {
                let url = url.trim();
                self.choice = (!url.is_empty()).then(|| url.to_owned());
                true
            }
            UiEvent::Submit => {
                if let Some(choice) = self.choice.clone() {
                    self.closer.close(Some(choice));
                }
                true
            }
            UiEvent::Cancel => {
                self.closer.close(None);
                true
            }
            UiEvent::Toggle(_) => false,
        }
    }
}
