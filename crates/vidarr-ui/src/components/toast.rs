//! Toast host rendering the store's toast queue.
//!
//! # Design
//! - Toasts auto-dismiss after a few seconds; the timers are dropped when
//!   the queue changes so a dismissed toast cannot fire twice.

use crate::core::store::{AppStore, Toast, ToastKind, app_dispatch, dismiss_toast};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use gloo_timers::callback::Timeout;
use yew::prelude::*;
use yewdux::prelude::use_selector;

const AUTO_DISMISS_MS: u32 = 4_000;

#[function_component(ToastHost)]
pub(crate) fn toast_host() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let toasts = use_selector(|store: &AppStore| store.toasts.items.clone());
    let on_dismiss = Callback::from(|id: u64| {
        app_dispatch().reduce_mut(|store| dismiss_toast(store, id));
    });

    {
        let toasts = (*toasts).clone();
        let on_dismiss = on_dismiss.clone();
        use_effect_with_deps(
            move |list: &Vec<Toast>| {
                let mut handles = Vec::new();
                for toast in list {
                    let on_dismiss = on_dismiss.clone();
                    let id = toast.id;
                    handles.push(Timeout::new(AUTO_DISMISS_MS, move || on_dismiss.emit(id)));
                }
                move || drop(handles)
            },
            toasts,
        );
    }

    html! {
        <div class="toast-host" aria-live="polite" aria-atomic="true">
            {for toasts.iter().map(|toast| {
                render_toast(toast, &on_dismiss, bundle.text("toast.dismiss"))
            })}
        </div>
    }
}

fn render_toast(toast: &Toast, on_dismiss: &Callback<u64>, dismiss_label: String) -> Html {
    let class = match toast.kind {
        ToastKind::Info => "alert-info",
        ToastKind::Success => "alert-success",
        ToastKind::Error => "alert-error",
    };
    let id = toast.id;
    let on_close = {
        let on_dismiss = on_dismiss.clone();
        Callback::from(move |_| on_dismiss.emit(id))
    };

    html! {
        <div class={classes!("alert", class)} role="status">
            <span>{toast.message.clone()}</span>
            <button class="btn btn-ghost btn-xs" aria-label={dismiss_label} onclick={on_close}>{"✕"}</button>
        </div>
    }
}
