//! Previous/next pager controls for client-side paginated grids.

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct PagerControlsProps {
    /// Clamped current page index.
    pub page: usize,
    /// Total page count (always at least one).
    pub pages: usize,
    pub on_page: Callback<usize>,
}

#[function_component(PagerControls)]
pub(crate) fn pager_controls(props: &PagerControlsProps) -> Html {
    if props.pages <= 1 {
        return html! {};
    }
    let page = props.page;
    let on_prev = {
        let on_page = props.on_page.clone();
        Callback::from(move |_| on_page.emit(page.saturating_sub(1)))
    };
    let on_next = {
        let on_page = props.on_page.clone();
        Callback::from(move |_| on_page.emit(page + 1))
    };
    html! {
        <div class="join pager">
            <button class="btn btn-ghost btn-sm join-item" disabled={page == 0} onclick={on_prev}>{"‹"}</button>
            <span class="join-item px-2 text-sm">{format!("{} / {}", page + 1, props.pages)}</span>
            <button class="btn btn-ghost btn-sm join-item" disabled={page + 1 >= props.pages} onclick={on_next}>{"›"}</button>
        </div>
    }
}
