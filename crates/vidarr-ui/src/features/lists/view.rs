//! List CRUD and add-to-list modals.
//!
//! # Design
//! - Client-side validation failures stay inline; they never reach a toast
//!   and never issue a network call.
//! - The add-to-list modal seeds its session from the pre-loaded
//!   `containingListIds` and marks lists added on success *or* on a 409, so
//!   membership never needs a re-fetch within the session.
//! - Item counts render optimistically while the lists endpoint revalidates
//!   in the background.

use crate::app::api::ApiCtx;
use crate::components::atoms::EmptyState;
use crate::components::modal::Modal;
use crate::core::fetch::{FetchOptions, invalidate_where, use_fetch};
use crate::core::store::{ToastKind, app_dispatch, push_toast};
use crate::features::lists::api::{
    LISTS_KEY, SOCIAL_FEED_KEY, add_item, create_list, delete_list, lists_for_item_key,
    update_list,
};
use crate::features::lists::logic::{bump_item_count, share_link};
use crate::features::lists::state::{AddToListSession, ListFormState};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use gloo::utils::window;
use vidarr_api_models::{CustomList, ListsForItem, MediaType};
use yew::prelude::*;

fn invalidate_list_keys() {
    invalidate_where(|key| {
        key.starts_with(LISTS_KEY) || key == SOCIAL_FEED_KEY
    });
}

#[derive(Properties, PartialEq)]
pub(crate) struct CreateListModalProps {
    pub open: bool,
    #[prop_or_default]
    pub existing: Option<CustomList>,
    pub on_close: Callback<()>,
}

#[function_component(CreateListModal)]
pub(crate) fn create_list_modal(props: &CreateListModalProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key);
    let api_ctx = use_context::<ApiCtx>();

    let form = use_state(ListFormState::default);
    let error = use_state(|| None as Option<String>);
    let saving = use_state(|| false);
    let copied = use_state(|| false);

    {
        let form = form.clone();
        let error = error.clone();
        let copied = copied.clone();
        use_effect_with_deps(
            move |(open, existing): &(bool, Option<CustomList>)| {
                if *open {
                    form.set(existing.as_ref().map_or_else(
                        ListFormState::default,
                        ListFormState::from_list,
                    ));
                    error.set(None);
                    copied.set(false);
                }
                || ()
            },
            (props.open, props.existing.clone()),
        );
    }

    let Some(api_ctx) = api_ctx else {
        return html! {};
    };

    let is_edit = props.existing.is_some();
    let title = if is_edit { t("lists.edit") } else { t("lists.create") };

    let on_save = {
        let api_ctx = api_ctx.clone();
        let bundle = bundle;
        let form = form.clone();
        let error = error.clone();
        let saving = saving.clone();
        let existing_id = props.existing.as_ref().map(|list| list.id);
        let on_close = props.on_close.clone();
        Callback::from(move |_| {
            let payload = match form.validate() {
                Ok(payload) => payload,
                Err(key) => {
                    // Inline only: no network call, no toast.
                    error.set(Some(bundle.text(key)));
                    return;
                }
            };
            error.set(None);
            saving.set(true);
            let client = api_ctx.client.clone();
            let error = error.clone();
            let saving = saving.clone();
            let on_close = on_close.clone();
            let bundle = bundle;
            yew::platform::spawn_local(async move {
                let result = match existing_id {
                    Some(id) => update_list(&client, id, &payload).await,
                    None => create_list(&client, &payload).await,
                };
                match result {
                    Ok(_) => {
                        let message = if existing_id.is_some() {
                            bundle.text("toast.list_updated")
                        } else {
                            bundle.text("toast.list_created")
                        };
                        app_dispatch()
                            .reduce_mut(|store| push_toast(store, ToastKind::Success, message));
                        invalidate_list_keys();
                        on_close.emit(());
                    }
                    Err(err) => {
                        error.set(Some(err.user_message(&bundle)));
                    }
                }
                saving.set(false);
            });
        })
    };

    let on_delete = {
        let api_ctx = api_ctx.clone();
        let bundle = bundle;
        let existing_id = props.existing.as_ref().map(|list| list.id);
        let on_close = props.on_close.clone();
        let saving = saving.clone();
        let confirm_text = t("lists.delete_confirm");
        Callback::from(move |_| {
            let Some(id) = existing_id else { return };
            if !gloo::dialogs::confirm(&confirm_text) {
                return;
            }
            saving.set(true);
            let client = api_ctx.client.clone();
            let on_close = on_close.clone();
            let saving = saving.clone();
            let bundle = bundle;
            yew::platform::spawn_local(async move {
                match delete_list(&client, id).await {
                    Ok(()) => {
                        app_dispatch().reduce_mut(|store| {
                            push_toast(store, ToastKind::Success, bundle.text("toast.list_deleted"))
                        });
                        invalidate_list_keys();
                        on_close.emit(());
                    }
                    Err(err) => {
                        app_dispatch().reduce_mut(|store| {
                            push_toast(store, ToastKind::Error, err.user_message(&bundle))
                        });
                    }
                }
                saving.set(false);
            });
        })
    };

    let on_copy_link = {
        let existing = props.existing.clone();
        let copied = copied.clone();
        Callback::from(move |_| {
            let Some(list) = existing.as_ref() else { return };
            let origin = window().location().origin().unwrap_or_default();
            if let Some(link) = share_link(&origin, list) {
                let _ = window().navigator().clipboard().write_text(&link);
                copied.set(true);
            }
        })
    };

    html! {
        <Modal title={title} open={props.open} on_close={props.on_close.clone()}>
            <div class="flex flex-col gap-3 pt-2">
                <label class="form-control">
                    <span class="label-text">{t("lists.name")}</span>
                    <input
                        type="text"
                        class="input input-bordered input-sm"
                        placeholder={t("lists.name_placeholder")}
                        value={form.name.clone()}
                        oninput={{
                            let form = form.clone();
                            Callback::from(move |event: InputEvent| {
                                if let Some(input) = event.target_dyn_into::<web_sys::HtmlInputElement>() {
                                    let mut next = (*form).clone();
                                    next.name = input.value();
                                    form.set(next);
                                }
                            })
                        }}
                    />
                </label>
                <label class="form-control">
                    <span class="label-text">{t("lists.description")}</span>
                    <textarea
                        class="textarea textarea-bordered textarea-sm"
                        value={form.description.clone()}
                        oninput={{
                            let form = form.clone();
                            Callback::from(move |event: InputEvent| {
                                if let Some(input) = event.target_dyn_into::<web_sys::HtmlTextAreaElement>() {
                                    let mut next = (*form).clone();
                                    next.description = input.value();
                                    form.set(next);
                                }
                            })
                        }}
                    ></textarea>
                </label>
                <label class="label cursor-pointer justify-start gap-2">
                    <input
                        type="checkbox"
                        class="toggle toggle-sm"
                        checked={form.is_public}
                        onchange={{
                            let form = form.clone();
                            Callback::from(move |event: Event| {
                                if let Some(input) = event.target_dyn_into::<web_sys::HtmlInputElement>() {
                                    let mut next = (*form).clone();
                                    next.is_public = input.checked();
                                    form.set(next);
                                }
                            })
                        }}
                    />
                    <span class="label-text">{t("lists.public")}</span>
                </label>
                {if let Some(list) = props.existing.as_ref().filter(|list| list.is_public) {
                    let origin = window().location().origin().unwrap_or_default();
                    let link = share_link(&origin, list).unwrap_or_default();
                    html! {
                        <div class="flex items-center gap-2 text-sm">
                            <span class="text-base-content/60 truncate">{link}</span>
                            <button class="btn btn-ghost btn-xs" onclick={on_copy_link}>
                                {if *copied { t("lists.copied") } else { t("lists.copy_link") }}
                            </button>
                        </div>
                    }
                } else { html! {} }}
                {if let Some(message) = error.as_ref() {
                    html! { <p class="text-error text-sm">{message.clone()}</p> }
                } else { html! {} }}
                <div class="modal-action">
                    {if is_edit {
                        html! {
                            <button class="btn btn-error btn-outline btn-sm" disabled={*saving} onclick={on_delete}>
                                {t("lists.delete")}
                            </button>
                        }
                    } else { html! {} }}
                    <button class="btn btn-primary btn-sm" disabled={*saving} onclick={on_save}>
                        {if *saving { t("lists.saving") } else { t("lists.save") }}
                    </button>
                </div>
            </div>
        </Modal>
    }
}

/// Below this many lists the modal renders one button per list; above it, a
/// dropdown. Both variants share the same session-membership rule.
const BUTTON_VARIANT_MAX: usize = 5;

#[derive(Properties, PartialEq)]
pub(crate) struct AddToListModalProps {
    pub open: bool,
    pub tmdb_id: i64,
    pub media_type: MediaType,
    pub on_close: Callback<()>,
}

#[function_component(AddToListModal)]
pub(crate) fn add_to_list_modal(props: &AddToListModalProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key);
    let api_ctx = use_context::<ApiCtx>();

    let key = props
        .open
        .then(|| lists_for_item_key(props.media_type, props.tmdb_id));
    let payload = use_fetch::<ListsForItem>(key, FetchOptions::default());

    let session = use_state(|| None as Option<AddToListSession>);
    let busy = use_state(|| None as Option<i64>);
    let picked = use_state(|| None as Option<i64>);

    {
        let session = session.clone();
        let picked = picked.clone();
        use_effect_with_deps(
            move |_| {
                session.set(None);
                picked.set(None);
                || ()
            },
            (props.open, props.tmdb_id, props.media_type),
        );
    }
    {
        // Seed the session once from the pre-loaded membership ids; no
        // further fetches are needed to keep it accurate.
        let session = session.clone();
        let containing = payload
            .data
            .as_ref()
            .map(|payload| payload.containing_list_ids.clone());
        use_effect_with_deps(
            move |containing: &Option<Vec<i64>>| {
                if let Some(ids) = containing {
                    if session.is_none() {
                        session.set(Some(AddToListSession::new(ids.iter().copied())));
                    }
                }
                || ()
            },
            containing,
        );
    }

    let Some(api_ctx) = api_ctx else {
        return html! {};
    };

    let lists: Vec<CustomList> = payload.data.as_ref().map_or_else(Vec::new, |payload| {
        let mut lists = payload.lists.clone();
        if let Some(session) = session.as_ref() {
            for list in payload.lists.iter() {
                if session.was_added(list.id) {
                    lists = bump_item_count(&lists, list.id);
                }
            }
        }
        lists
    });

    let on_add = {
        let api_ctx = api_ctx;
        let bundle = bundle;
        let session = session.clone();
        let busy = busy.clone();
        let tmdb_id = props.tmdb_id;
        let media_type = props.media_type;
        Callback::from(move |list_id: i64| {
            if busy.is_some() {
                return;
            }
            busy.set(Some(list_id));
            let client = api_ctx.client.clone();
            let session = session.clone();
            let busy = busy.clone();
            let bundle = bundle;
            yew::platform::spawn_local(async move {
                let result = add_item(&client, list_id, media_type, tmdb_id).await;
                match result {
                    Ok(()) => {
                        let mut next = session.as_ref().cloned().unwrap_or_default();
                        next.mark_added(list_id);
                        session.set(Some(next));
                        app_dispatch().reduce_mut(|store| {
                            push_toast(store, ToastKind::Success, bundle.text("toast.added_to_list"))
                        });
                        invalidate_list_keys();
                    }
                    Err(err) if err.is_already_applied() => {
                        // 409: the list already contained the item; mark it
                        // so it stays non-selectable this session.
                        let mut next = session.as_ref().cloned().unwrap_or_default();
                        next.mark_added(list_id);
                        session.set(Some(next));
                        app_dispatch().reduce_mut(|store| {
                            push_toast(store, ToastKind::Info, bundle.text("lists.already_added"))
                        });
                    }
                    Err(err) => {
                        app_dispatch().reduce_mut(|store| {
                            push_toast(store, ToastKind::Error, err.user_message(&bundle))
                        });
                    }
                }
                busy.set(None);
            });
        })
    };

    let is_selectable = |list_id: i64| {
        session
            .as_ref()
            .is_none_or(|session| session.is_selectable(list_id))
    };

    let body = if lists.is_empty() {
        html! { <EmptyState title={AttrValue::from(t("lists.empty"))} /> }
    } else if lists.len() <= BUTTON_VARIANT_MAX {
        // Multi-select button variant.
        html! {
            <ul class="flex flex-col gap-2">
                {for lists.iter().map(|list| {
                    let selectable = is_selectable(list.id);
                    let id = list.id;
                    let on_add = on_add.clone();
                    html! {
                        <li class="flex items-center justify-between gap-2">
                            <div class="min-w-0">
                                <p class="truncate text-sm font-medium">{list.name.clone()}</p>
                                <p class="text-base-content/60 text-xs">
                                    {format!("{} items", list.item_count)}
                                </p>
                            </div>
                            <button
                                class="btn btn-primary btn-xs"
                                disabled={!selectable || *busy == Some(id)}
                                onclick={Callback::from(move |_| on_add.emit(id))}
                            >
                                {if selectable { t("lists.add") } else { t("lists.added") }}
                            </button>
                        </li>
                    }
                })}
            </ul>
        }
    } else {
        // Dropdown variant for long list collections.
        let on_pick = {
            let picked = picked.clone();
            Callback::from(move |event: Event| {
                if let Some(select) = event.target_dyn_into::<web_sys::HtmlSelectElement>() {
                    picked.set(select.value().parse::<i64>().ok());
                }
            })
        };
        let on_submit = {
            let on_add = on_add.clone();
            let picked = picked.clone();
            Callback::from(move |_| {
                if let Some(id) = *picked {
                    on_add.emit(id);
                }
            })
        };
        let pick_disabled = picked.is_none_or(|id| !is_selectable(id));
        html! {
            <div class="flex items-center gap-2">
                <select class="select select-bordered select-sm grow" onchange={on_pick}>
                    <option value="" selected={picked.is_none()}>{t("lists.pick")}</option>
                    {for lists.iter().map(|list| {
                        let selectable = is_selectable(list.id);
                        html! {
                            <option
                                value={list.id.to_string()}
                                disabled={!selectable}
                                selected={*picked == Some(list.id)}
                            >
                                {if selectable {
                                    format!("{} ({} items)", list.name, list.item_count)
                                } else {
                                    format!("{} — {}", list.name, t("lists.already_added"))
                                }}
                            </option>
                        }
                    })}
                </select>
                <button
                    class="btn btn-primary btn-sm"
                    disabled={pick_disabled || busy.is_some()}
                    onclick={on_submit}
                >{t("lists.add")}</button>
            </div>
        }
    };

    html! {
        <Modal title={t("lists.add_title")} open={props.open} on_close={props.on_close.clone()}>
            <div class="flex flex-col gap-3 pt-2">
                {if payload.is_loading {
                    html! { <progress class="progress w-full"></progress> }
                } else {
                    body
                }}
            </div>
        </Modal>
    }
}
