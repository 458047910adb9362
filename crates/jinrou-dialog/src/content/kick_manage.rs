#![forbid(unsafe_code)]

use jinrou_i18n::{Interp, PlaceholderBindings, Translated};
use jinrou_view::{Component, Node, Scope, UiEvent};

use super::{NAMESPACE, button, frame, heading, label, option};
use crate::defs::{KickManageDialog, KickManageResult};
use crate::orchestrator::Closer;

/// Lift bans. `Toggle(i)` marks user `i`; `Submit` returns the marked
/// users in list order.
pub struct KickManageContent {
    def: KickManageDialog,
    marked: Vec<bool>,
    title: Translated,
    ok: Translated,
    cancel: Translated,
    count: Interp,
    closer: Closer<Option<KickManageResult>>,
}

impl KickManageContent {
    pub fn new(def: KickManageDialog, closer: Closer<Option<KickManageResult>>) -> Self {
        let count = Interp::new(NAMESPACE, "kick_manage.count").bindings(
            PlaceholderBindings::new().bind("count", def.users.len().to_string()),
        );
        Self {
            marked: vec![false; def.users.len()],
            def,
            title: label("kick_manage.title"),
            ok: label("kick_manage.ok"),
            cancel: label("kick_manage.cancel"),
            count,
            closer,
        }
    }
}

impl Component for KickManageContent {
    fn name(&self) -> &'static str {
        "KickManageDialog"
    }

    fn activate(&mut self, scope: &Scope) {
        self.count.activate(scope);
    }

    fn deactivate(&mut self) {
        self.count.deactivate();
    }

    fn render(&self, scope: &Scope) -> Node {
        let users = self
            .def
            .users
            .iter()
            .zip(&self.marked)
            .enumerate()
            .map(|(i, (user, marked))| option(i, *marked, [Node::text(user.as_str())]));
        frame(
            "kick-manage",
            self.def.modal,
            [
                heading(self.title.render(scope)),
                Node::element("p", [self.count.render(scope)]),
                Node::element("ul", users),
                button("ok", self.ok.render(scope)),
                button("cancel", self.cancel.render(scope)),
            ],
        )
    }

    fn handle_event(&mut self, event: &UiEvent, _scope: &Scope) -> bool {
        match event {
            UiEvent::Toggle(index) => match self.marked.get_mut(*index) {
                Some(marked) => {
                    *marked = !*marked;
                    true
                }
                None => false,
            },
            UiEvent::Submit => {
                let remove = self
                    .def
                    .users
                    .iter()
                    .zip(&self.marked)
                    .filter(|(_, marked)| **marked)
                    .map(|(user, _)| user.clone())
                    .collect();
                self.closer.close(Some(KickManageResult { remove }));
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::test_support::{localization, mount, rendered, send};
    use futures::executor::block_on;

    fn def() -> KickManageDialog {
        KickManageDialog {
            modal: true,
            users: vec!["alice".into(), "bob".into(), "carol".into()],
        }
    }

    #[test]
    fn count_is_interpolated() {
        let (doc, _result) = mount(Some(localization()), |close| KickManageContent::new(def(), close));
        assert_eq!(
            rendered(&doc).find("p").map(Node::text_content).as_deref(),
            Some("3人が追放されています")
        );
    }

    #[test]
    fn submit_returns_marked_users_in_order() {
        let (doc, result) = mount(Some(localization()), |close| KickManageContent::new(def(), close));
        let consumed = send(
            &doc,
            &[UiEvent::Toggle(2), UiEvent::Toggle(0), UiEvent::Toggle(1), UiEvent::Toggle(1), UiEvent::Toggle(9)],
        );
        assert_eq!(consumed, vec![true, true, true, true, false]);
        send(&doc, &[UiEvent::Submit]);
        assert_eq!(
            block_on(result).unwrap(),
            Some(KickManageResult {
                remove: vec!["alice".into(), "carol".into()],
            })
        );
    }
}
