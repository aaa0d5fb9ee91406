//! Modal dialog wrapper with a guarded close handler.

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ModalProps {
    pub title: AttrValue,
    pub open: bool,
    /// Whether the close affordances are active; submission flows pass
    /// `false` while a request is in flight.
    #[prop_or(true)]
    pub can_close: bool,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(Modal)]
pub(crate) fn modal(props: &ModalProps) -> Html {
    if !props.open {
        return html! {};
    }
    let close = {
        let can_close = props.can_close;
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| {
            if can_close {
                on_close.emit(());
            }
        })
    };
    html! {
        <div class="modal modal-open" role="dialog">
            <div class="modal-box">
                <div class="flex items-center justify-between gap-2">
                    <h3 class="text-lg font-semibold">{props.title.clone()}</h3>
                    <button
                        class="btn btn-ghost btn-sm"
                        disabled={!props.can_close}
                        onclick={close.clone()}
                    >{"✕"}</button>
                </div>
                { for props.children.iter() }
            </div>
            <div class="modal-backdrop" onclick={close}></div>
        </div>
    }
}
