#![forbid(unsafe_code)]

use jinrou_i18n::{Interp, PlaceholderBindings, Translated};
use jinrou_view::{Component, Node, Scope, UiEvent};

use super::{NAMESPACE, button, frame, heading, label, option};
use crate::defs::{KickDialog, KickResult, KickTarget};
use crate::orchestrator::Closer;

/// Pick a player to kick. `Select(i)` picks the target, any `Toggle`
/// flips the re-entry ban. The confirmation line interpolates the
/// selected player's name and follows language changes while shown.
pub struct KickContent {
    def: KickDialog,
    selected: usize,
    noentry: bool,
    title: Translated,
    noentry_label: Translated,
    ok: Translated,
    cancel: Translated,
    confirm: Interp,
    closer: Closer<Option<KickResult>>,
}

fn bindings(target: Option<&KickTarget>) -> PlaceholderBindings {
    let name = target.map(|t| t.name.as_str()).unwrap_or_default();
    PlaceholderBindings::new().bind("name", Node::element("strong", [Node::text(name)]))
}

impl KickContent {
    pub fn new(def: KickDialog, closer: Closer<Option<KickResult>>) -> Self {
        let confirm = Interp::new(NAMESPACE, "kick.confirm").bindings(bindings(def.players.first()));
        Self {
            def,
            selected: 0,
            noentry: false,
            title: label("kick.title"),
            noentry_label: label("kick.noentry"),
            ok: label("kick.ok"),
            cancel: label("kick.cancel"),
            confirm,
            closer,
        }
    }
}

impl Component for KickContent {
    fn name(&self) -> &'static str {
        "KickDialog"
    }

    fn activate(&mut self, scope: &Scope) {
        self.confirm.activate(scope);
    }

    fn deactivate(&mut self) {
        self.confirm.deactivate();
    }

    fn render(&self, scope: &Scope) -> Node {
        let players = self
            .def
            .players
            .iter()
            .enumerate()
            .map(|(i, p)| option(i, i == self.selected, [Node::text(p.name.as_str())]));
        let mut checkbox = Node::element("input", []).attr("type", "checkbox");
        if self.noentry {
            checkbox = checkbox.attr("checked", "true");
        }
        frame(
            "kick",
            self.def.modal,
            [
                heading(self.title.render(scope)),
                Node::element("select", players),
                Node::element("label", [checkbox, self.noentry_label.render(scope)]),
                Node::element("p", [self.confirm.render(scope)]),
                button("ok", self.ok.render(scope)),
                button("cancel", self.cancel.render(scope)),
            ],
        )
    }

    fn handle_event(&mut self, event: &UiEvent, _scope: &Scope) -> bool {
        match event {
            UiEvent::Select(index) if *index < self.def.players.len() => {
                self.selected = *index;
                self.confirm.set_bindings(bindings(self.def.players.get(*index)));
                true
            }
            UiEvent::Toggle(_) => {
                self.noentry = !self.noentry;
                true
            }
            UiEvent::Submit => {
                let result = self.def.players.get(self.selected).map(|p| KickResult {
                    id: p.id.clone(),
                    noentry: self.noentry,
                });
                self.closer.close(result);
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
