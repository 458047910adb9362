#![forbid(unsafe_code)]

//! Content components of the built-in dialogs.
//!
//! Each component owns the [`Closer`](crate::Closer) of its dialog and
//! drives it from [`UiEvent`](jinrou_view::UiEvent)s: `Submit` and `Cancel`
//! complete the interaction, `Select`/`Toggle`/`Input` edit form state.
//! Localized components render their labels through the provided
//! [`Localization`](jinrou_i18n::Localization) (namespace
//! [`NAMESPACE`]).

mod confirm;
mod icon_select;
mod kick;
mod kick_manage;
mod message;
mod player;
mod select;

pub use confirm::ConfirmContent;
pub use icon_select::IconSelectContent;
pub use kick::KickContent;
pub use kick_manage::KickManageContent;
pub use message::MessageContent;
pub use player::PlayerContent;
pub use select::SelectContent;

use jinrou_i18n::Translated;
use jinrou_view::Node;

/// Resource namespace of localized dialog labels.
pub const NAMESPACE: &str = "game_client";

fn frame(kind: &'static str, modal: bool, children: impl IntoIterator<Item = Node>) -> Node {
    Node::element("dialog", children)
        .attr("class", kind)
        .attr("modal", modal.to_string())
}

fn heading(text: impl Into<Node>) -> Node {
    Node::element("h1", [text.into()])
}

fn paragraph(text: impl Into<Node>) -> Node {
    Node::element("p", [text.into()])
}

fn button(action: &'static str, label: impl Into<Node>) -> Node {
    Node::element("button", [label.into()]).attr("data-action", action)
}

fn label(key: &'static str) -> Translated {
    Translated::new(move |t| Node::text(t.t(key))).namespace(NAMESPACE)
}

fn option(index: usize, selected: bool, children: impl IntoIterator<Item = Node>) -> Node {
    let node = Node::element("option", children).attr("data-index", index.to_string());
    if selected { node.attr("selected", "true") } else { node }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::rc::Rc;

    use jinrou_i18n::{Localization, ResourceCatalog};
    use jinrou_view::{Component, Document, LayerDocument, Node, UiEvent};

    use crate::channel::ResultFuture;
    use crate::orchestrator::{Closer, DialogHost};

    pub fn localization() -> Localization {
        let mut catalog = ResourceCatalog::new();
        catalog.add_bundle(
            "ja",
            super::NAMESPACE,
            [
                ("icon_select.title", "アイコン選択"),
                ("icon_select.ok", "決定"),
                ("icon_select.cancel", "キャンセル"),
                ("kick.title", "追放"),
                ("kick.noentry", "再入室禁止"),
                ("kick.confirm", "{{name}}を追放しますか？"),
                ("kick.ok", "追放"),
                ("kick.cancel", "キャンセル"),
                ("kick_manage.title", "追放リスト"),
                ("kick_manage.count", "{{count}}人が追放されています"),
                ("kick_manage.ok", "解除"),
                ("kick_manage.cancel", "閉じる"),
            ],
        );
        catalog.add_bundle("en", super::NAMESPACE, [("kick.confirm", "Kick {{name}}?")]);
        Localization::builder(catalog).build()
    }

    /// Show `make(closer)` in a fresh document, optionally localized.
    pub fn mount<T, C>(
        localization: Option<Localization>,
        make: impl FnOnce(Closer<T>) -> C + 'static,
    ) -> (Rc<LayerDocument>, ResultFuture<T>)
    where
        T: 'static,
        C: Component + 'static,
    {
        let doc = Rc::new(LayerDocument::new());
        let dyn_doc: Rc<dyn Document> = doc.clone();
        let host = DialogHost::new(dyn_doc);
        let future = host.show(localization, move |open, close| {
            open.open(make(close));
        });
        (doc, future)
    }

    pub fn rendered(doc: &LayerDocument) -> Node {
        doc.top().and_then(|id| doc.render(id)).unwrap_or_default()
    }

    /// Dispatch `events` in order; returns which were consumed.
    pub fn send(doc: &LayerDocument, events: &[UiEvent]) -> Vec<bool> {
        events.iter().map(|event| doc.dispatch(event)).collect()
    }
}
