#![forbid(unsafe_code)]

use jinrou_view::{Component, Node, Scope, UiEvent};

use super::{button, frame, heading, paragraph};
use crate::defs::ConfirmDialog;
use crate::orchestrator::Closer;

/// Yes/no question. `Submit` answers yes, `Cancel` answers no.
pub struct ConfirmContent {
    def: ConfirmDialog,
    closer: Closer<bool>,
}

impl ConfirmContent {
    pub fn new(def: ConfirmDialog, closer: Closer<bool>) -> Self {
        Self { def, closer }
    }
}

impl Component for ConfirmContent {
    fn name(&self) -> &'static str {
        "ConfirmDialog"
    }

    fn render(&self, _scope: &Scope) -> Node {
        frame(
            "confirm",
            self.def.modal,
            [
                heading(self.def.title.as_str()),
                paragraph(self.def.message.as_str()),
                button("yes", self.def.yes.as_str()),
                button("no", self.def.no.as_str()),
            ],
        )
    }

    fn handle_event(&mut self, event: &UiEvent, _scope: &Scope) -> bool {
        let answer = match event {
            UiEvent::Submit => true,
            UiEvent::Cancel => false,
            _ => return false,
        };
        self.closer.close(answer);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::test_support::{mount, send};
    use futures::executor::block_on;

    fn def() -> ConfirmDialog {
        ConfirmDialog {
            modal: true,
            title: "確認".into(),
            message: "部屋を削除しますか？".into(),
            yes: "はい".into(),
            no: "いいえ".into(),
        }
    }

    #[test]
    fn submit_answers_yes() {
        let (doc, result) = mount(None, |close| ConfirmContent::new(def(), close));
        send(&doc, &[UiEvent::Submit]);
        assert!(block_on(result).unwrap());
    }

    #[test]
    fn cancel_answers_no_and_later_events_fall_through() {
        let (doc, result) = mount(None, |close| ConfirmContent::new(def(), close));
        assert_eq!(send(&doc, &[UiEvent::Cancel, UiEvent::Submit]), vec![true, false]);
        assert!(!block_on(result).unwrap());
    }
}
