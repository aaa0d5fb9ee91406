//! Admin settings panels.
//!
//! # Design
//! - Admin resources are server-authoritative: every write re-fetches the
//!   affected endpoint instead of patching locally.
//! - The backups panel prunes the persisted validation cache on every
//!   successful list fetch, so badges for deleted archives never render.

use crate::app::api::ApiCtx;
use crate::components::atoms::EmptyState;
use crate::core::fetch::{FetchHandle, FetchOptions, use_fetch};
use crate::core::store::{AppStore, ToastKind, app_dispatch, push_toast};
use crate::features::admin::api::{
    BACKUPS_KEY, JELLYFIN_LIBRARIES_KEY, JELLYFIN_SCAN_KEY, JELLYFIN_STATUS_KEY,
    NOTIFICATIONS_KEY, USERS_KEY, create_backup, delete_backup, delete_endpoint, save_endpoint,
    save_user_permissions, set_library_enabled, start_scan, validate_backup,
};
use crate::features::admin::backups::{
    CachedValidation, LocalValidationStore, ValidationCache, prune_to_server, record_validation,
    size_label,
};
use crate::features::admin::jellyfin::{scan_percent, sorted_libraries};
use crate::features::admin::notifications::{can_delete, has_type, subscribed_labels, toggle_type};
use crate::features::admin::users::{PERMISSION_ROWS, has_explicit, toggle_permission};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use crate::services::error::ApiError;
use std::rc::Rc;
use uuid::Uuid;
use vidarr_api_models::{
    Backup, JellyfinLibrary, JellyfinStatus, NotificationEndpoint, PortalUser, ScanProgress,
    permissions,
};
use yew::prelude::*;
use yewdux::prelude::use_selector;

fn report_error(error: &ApiError, bundle: &TranslationBundle) {
    let message = error.user_message(bundle);
    app_dispatch().reduce_mut(|store| push_toast(store, ToastKind::Error, message));
}

fn report_success(key: &str, bundle: &TranslationBundle) {
    let message = bundle.text(key);
    app_dispatch().reduce_mut(|store| push_toast(store, ToastKind::Success, message));
}

#[function_component(AdminView)]
pub(crate) fn admin_view() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let user = use_selector(|store: &AppStore| store.session.user.clone());
    let is_admin = user
        .as_ref()
        .as_ref()
        .is_some_and(|user| permissions::has(user.permissions, permissions::ADMIN));

    if !is_admin {
        return html! {
            <EmptyState
                title={AttrValue::from(bundle.text("admin.forbidden"))}
                description={Some(AttrValue::from(bundle.text("admin.forbidden_hint")))}
            />
        };
    }

    html! {
        <div class="admin grid gap-4 xl:grid-cols-2">
            <BackupsPanel />
            <JellyfinPanel />
            <NotificationsPanel />
            <UsersPanel />
        </div>
    }
}

#[function_component(BackupsPanel)]
fn backups_panel() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key);
    let api_ctx = use_context::<ApiCtx>();
    let backups: FetchHandle<Vec<Backup>> = use_fetch(
        Some(BACKUPS_KEY.to_string()),
        FetchOptions {
            refresh_interval_ms: 0,
            revalidate_on_focus: true,
        },
    );
    let cache = use_state(ValidationCache::default);
    let creating = use_state(|| false);
    let validating = use_state(|| None as Option<String>);

    {
        // Prune stale validation badges on every successful list fetch.
        let cache = cache.clone();
        let rows = backups.data.clone();
        use_effect_with_deps(
            move |rows: &Option<Rc<Vec<Backup>>>| {
                if let Some(rows) = rows {
                    cache.set(prune_to_server(&LocalValidationStore, rows));
                }
                || ()
            },
            rows,
        );
    }

    let Some(api_ctx) = api_ctx else {
        return html! {};
    };

    let on_create = {
        let api_ctx = api_ctx.clone();
        let creating = creating.clone();
        let mutate = backups.mutate.clone();
        Callback::from(move |_| {
            if *creating {
                return;
            }
            creating.set(true);
            let client = api_ctx.client.clone();
            let creating = creating.clone();
            let mutate = mutate.clone();
            yew::platform::spawn_local(async move {
                match create_backup(&client).await {
                    Ok(()) => report_success("toast.backup_created", &bundle),
                    Err(err) => report_error(&err, &bundle),
                }
                mutate.emit(());
                creating.set(false);
            });
        })
    };

    let on_validate = {
        let api_ctx = api_ctx.clone();
        let cache = cache.clone();
        let validating = validating.clone();
        Callback::from(move |name: String| {
            if validating.is_some() {
                return;
            }
            validating.set(Some(name.clone()));
            let client = api_ctx.client.clone();
            let cache = cache.clone();
            let validating = validating.clone();
            yew::platform::spawn_local(async move {
                match validate_backup(&client, &name).await {
                    Ok(validation) => {
                        let entry =
                            CachedValidation::from_response(&validation, chrono::Utc::now());
                        cache.set(record_validation(&LocalValidationStore, &name, entry));
                    }
                    Err(err) => report_error(&err, &bundle),
                }
                validating.set(None);
            });
        })
    };

    let on_delete = {
        let api_ctx = api_ctx.clone();
        let mutate = backups.mutate.clone();
        let confirm_text = t("admin.backup_delete_confirm");
        Callback::from(move |name: String| {
            if !gloo::dialogs::confirm(&confirm_text) {
                return;
            }
            let client = api_ctx.client.clone();
            let mutate = mutate.clone();
            yew::platform::spawn_local(async move {
                match delete_backup(&client, &name).await {
                    Ok(()) => report_success("toast.backup_deleted", &bundle),
                    Err(err) => report_error(&err, &bundle),
                }
                mutate.emit(());
            });
        })
    };

    let rows: &[Backup] = backups.data.as_deref().map_or(&[], Vec::as_slice);
    html! {
        <section class="card bg-base-100 shadow">
            <div class="card-body gap-3">
                <div class="flex items-center justify-between">
                    <h3 class="card-title text-base">{t("admin.backups")}</h3>
                    <button class="btn btn-primary btn-sm" disabled={*creating} onclick={on_create}>
                        {if *creating { t("admin.backup_creating") } else { t("admin.backup_create") }}
                    </button>
                </div>
                {if rows.is_empty() {
                    html! { <EmptyState title={AttrValue::from(t("admin.backups_empty"))} /> }
                } else {
                    html! {
                        <table class="table table-sm">
                            <thead>
                                <tr>
                                    <th>{t("admin.backup_name")}</th>
                                    <th>{t("admin.backup_size")}</th>
                                    <th>{t("admin.backup_created")}</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                {for rows.iter().map(|backup| {
                                    let name = backup.name.clone();
                                    let badge = cache.get(&backup.name).map(|entry| {
                                        if entry.valid {
                                            html! { <span class="badge badge-success badge-sm">{t("admin.backup_valid")}</span> }
                                        } else {
                                            html! {
                                                <span class="badge badge-error badge-sm" title={entry.detail.clone().unwrap_or_default()}>
                                                    {t("admin.backup_invalid")}
                                                </span>
                                            }
                                        }
                                    });
                                    let validate = {
                                        let on_validate = on_validate.clone();
                                        let name = name.clone();
                                        Callback::from(move |_| on_validate.emit(name.clone()))
                                    };
                                    let delete = {
                                        let on_delete = on_delete.clone();
                                        let name = name.clone();
                                        Callback::from(move |_| on_delete.emit(name.clone()))
                                    };
                                    let is_validating = validating.as_deref() == Some(backup.name.as_str());
                                    html! {
                                        <tr>
                                            <td class="flex items-center gap-2">
                                                {backup.name.clone()}
                                                {badge.unwrap_or_default()}
                                            </td>
                                            <td>{size_label(backup.size_bytes)}</td>
                                            <td>{backup.created_at.format("%Y-%m-%d %H:%M").to_string()}</td>
                                            <td class="text-right">
                                                <button class="btn btn-ghost btn-xs" disabled={is_validating} onclick={validate}>
                                                    {if is_validating { t("admin.backup_validating") } else { t("admin.backup_validate") }}
                                                </button>
                                                <button class="btn btn-ghost btn-xs text-error" onclick={delete}>
                                                    {t("common.delete")}
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                })}
                            </tbody>
                        </table>
                    }
                }}
            </div>
        </section>
    }
}

#[function_component(JellyfinPanel)]
fn jellyfin_panel() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key);
    let api_ctx = use_context::<ApiCtx>();
    let status: FetchHandle<JellyfinStatus> = use_fetch(
        Some(JELLYFIN_STATUS_KEY.to_string()),
        FetchOptions {
            refresh_interval_ms: 30_000,
            revalidate_on_focus: true,
        },
    );
    let libraries: FetchHandle<Vec<JellyfinLibrary>> =
        use_fetch(Some(JELLYFIN_LIBRARIES_KEY.to_string()), FetchOptions::default());
    let scan: FetchHandle<ScanProgress> = use_fetch(
        Some(JELLYFIN_SCAN_KEY.to_string()),
        FetchOptions {
            refresh_interval_ms: 5_000,
            revalidate_on_focus: false,
        },
    );

    let Some(api_ctx) = api_ctx else {
        return html! {};
    };

    let on_toggle_library = {
        let api_ctx = api_ctx.clone();
        let mutate = libraries.mutate.clone();
        Callback::from(move |(id, enabled): (Uuid, bool)| {
            let client = api_ctx.client.clone();
            let mutate = mutate.clone();
            yew::platform::spawn_local(async move {
                if let Err(err) = set_library_enabled(&client, id, enabled).await {
                    report_error(&err, &bundle);
                }
                mutate.emit(());
            });
        })
    };

    let scanning = scan.data.as_deref().is_some_and(|scan| scan.running);
    let on_scan = {
        let api_ctx = api_ctx.clone();
        let mutate = scan.mutate.clone();
        Callback::from(move |_| {
            let client = api_ctx.client.clone();
            let mutate = mutate.clone();
            yew::platform::spawn_local(async move {
                match start_scan(&client).await {
                    Ok(()) => report_success("toast.scan_started", &bundle),
                    Err(err) => report_error(&err, &bundle),
                }
                mutate.emit(());
            });
        })
    };

    let library_rows =
        sorted_libraries(libraries.data.as_deref().cloned().unwrap_or_default());
    html! {
        <section class="card bg-base-100 shadow">
            <div class="card-body gap-3">
                <div class="flex items-center justify-between">
                    <h3 class="card-title text-base">{t("admin.jellyfin")}</h3>
                    {match status.data.as_deref() {
                        Some(status) if status.connected => html! {
                            <span class="badge badge-success badge-sm">
                                {status.server_name.clone().unwrap_or_else(|| t("admin.jellyfin_connected"))}
                            </span>
                        },
                        Some(_) => html! {
                            <span class="badge badge-error badge-sm">{t("admin.jellyfin_disconnected")}</span>
                        },
                        None => html! {},
                    }}
                </div>
                <ul class="flex flex-col gap-1">
                    {for library_rows.iter().map(|library| {
                        let id = library.id;
                        let enabled = library.enabled;
                        let on_toggle = {
                            let on_toggle_library = on_toggle_library.clone();
                            Callback::from(move |_| on_toggle_library.emit((id, !enabled)))
                        };
                        html! {
                            <li class="flex items-center justify-between gap-2 text-sm">
                                <span>
                                    {library.name.clone()}
                                    <span class="text-base-content/60 text-xs">
                                        {format!(" · {} items", library.item_count)}
                                    </span>
                                </span>
                                <input
                                    type="checkbox"
                                    class="toggle toggle-sm"
                                    checked={library.enabled}
                                    onchange={on_toggle}
                                />
                            </li>
                        }
                    })}
                </ul>
                <div class="flex items-center gap-2">
                    <button class="btn btn-primary btn-sm" disabled={scanning} onclick={on_scan}>
                        {if scanning { t("admin.jellyfin_scanning") } else { t("admin.jellyfin_scan") }}
                    </button>
                    {match scan.data.as_deref() {
                        Some(progress) if progress.running => html! {
                            <div class="flex grow items-center gap-2">
                                <progress
                                    class="progress progress-primary grow"
                                    value={scan_percent(progress).to_string()}
                                    max="100"
                                ></progress>
                                <span class="text-base-content/60 text-xs">
                                    {progress.current_library.clone().unwrap_or_default()}
                                </span>
                            </div>
                        },
                        _ => html! {},
                    }}
                </div>
            </div>
        </section>
    }
}

#[function_component(NotificationsPanel)]
fn notifications_panel() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key);
    let api_ctx = use_context::<ApiCtx>();
    let endpoints: FetchHandle<Vec<NotificationEndpoint>> =
        use_fetch(Some(NOTIFICATIONS_KEY.to_string()), FetchOptions::default());
    // (endpoint being edited, whether it is new)
    let editing = use_state(|| None as Option<(NotificationEndpoint, bool)>);
    let saving = use_state(|| false);

    let Some(api_ctx) = api_ctx else {
        return html! {};
    };

    let on_new = {
        let editing = editing.clone();
        Callback::from(move |_| {
            editing.set(Some((
                NotificationEndpoint {
                    id: Uuid::new_v4(),
                    name: String::new(),
                    kind: "webhook".to_string(),
                    enabled: true,
                    is_global: false,
                    types: 0,
                    config: serde_json::Value::Null,
                },
                true,
            )));
        })
    };

    let on_save = {
        let api_ctx = api_ctx.clone();
        let editing = editing.clone();
        let saving = saving.clone();
        let mutate = endpoints.mutate.clone();
        Callback::from(move |_| {
            let Some((endpoint, is_new)) = editing.as_ref().cloned() else {
                return;
            };
            if endpoint.name.trim().is_empty() {
                return;
            }
            saving.set(true);
            let client = api_ctx.client.clone();
            let editing = editing.clone();
            let saving = saving.clone();
            let mutate = mutate.clone();
            yew::platform::spawn_local(async move {
                match save_endpoint(&client, &endpoint, is_new).await {
                    Ok(_) => {
                        report_success("toast.endpoint_saved", &bundle);
                        editing.set(None);
                        mutate.emit(());
                    }
                    Err(err) => report_error(&err, &bundle),
                }
                saving.set(false);
            });
        })
    };

    let on_delete = {
        let api_ctx = api_ctx.clone();
        let mutate = endpoints.mutate.clone();
        Callback::from(move |id: Uuid| {
            let client = api_ctx.client.clone();
            let mutate = mutate.clone();
            yew::platform::spawn_local(async move {
                match delete_endpoint(&client, id).await {
                    Ok(()) => report_success("toast.endpoint_deleted", &bundle),
                    Err(err) => report_error(&err, &bundle),
                }
                mutate.emit(());
            });
        })
    };

    let rows: &[NotificationEndpoint] = endpoints.data.as_deref().map_or(&[], Vec::as_slice);
    html! {
        <section class="card bg-base-100 shadow">
            <div class="card-body gap-3">
                <div class="flex items-center justify-between">
                    <h3 class="card-title text-base">{t("admin.notifications")}</h3>
                    <button class="btn btn-primary btn-sm" onclick={on_new}>
                        {t("admin.notification_add")}
                    </button>
                </div>
                <ul class="flex flex-col gap-1">
                    {for rows.iter().map(|endpoint| {
                        let deletable = can_delete(endpoint);
                        let id = endpoint.id;
                        let edit = {
                            let editing = editing.clone();
                            let endpoint = endpoint.clone();
                            Callback::from(move |_| editing.set(Some((endpoint.clone(), false))))
                        };
                        let delete = {
                            let on_delete = on_delete.clone();
                            Callback::from(move |_| on_delete.emit(id))
                        };
                        html! {
                            <li class="flex items-center justify-between gap-2 text-sm">
                                <span class="flex min-w-0 items-center gap-2">
                                    <span class="truncate font-medium">{endpoint.name.clone()}</span>
                                    <span class="badge badge-ghost badge-sm">{endpoint.kind.clone()}</span>
                                    {if endpoint.is_global {
                                        html! { <span class="badge badge-info badge-sm">{t("admin.notification_global")}</span> }
                                    } else { html! {} }}
                                    {if !endpoint.enabled {
                                        html! { <span class="badge badge-warning badge-sm">{t("admin.notification_disabled")}</span> }
                                    } else { html! {} }}
                                    <span class="text-base-content/60 hidden text-xs lg:inline">
                                        {subscribed_labels(endpoint.types).join(", ")}
                                    </span>
                                </span>
                                <span class="shrink-0">
                                    <button class="btn btn-ghost btn-xs" onclick={edit}>{t("common.edit")}</button>
                                    <button class="btn btn-ghost btn-xs text-error" disabled={!deletable} onclick={delete}>
                                        {t("common.delete")}
                                    </button>
                                </span>
                            </li>
                        }
                    })}
                </ul>
                {if let Some((endpoint, _)) = editing.as_ref() {
                    let endpoint = endpoint.clone();
                    html! {
                        <div class="rounded-box bg-base-200 flex flex-col gap-2 p-3">
                            <input
                                type="text"
                                class="input input-bordered input-sm"
                                placeholder={t("admin.notification_name")}
                                value={endpoint.name.clone()}
                                oninput={{
                                    let editing = editing.clone();
                                    Callback::from(move |event: InputEvent| {
                                        if let Some(input) = event.target_dyn_into::<web_sys::HtmlInputElement>() {
                                            if let Some((mut endpoint, is_new)) = editing.as_ref().cloned() {
                                                endpoint.name = input.value();
                                                editing.set(Some((endpoint, is_new)));
                                            }
                                        }
                                    })
                                }}
                            />
                            <div class="flex flex-wrap gap-2">
                                {for vidarr_api_models::notification_types::ALL.iter().map(|(bit, label)| {
                                    let bit = *bit;
                                    let checked = has_type(endpoint.types, bit);
                                    let editing = editing.clone();
                                    html! {
                                        <label class="label cursor-pointer gap-1 text-xs">
                                            <input
                                                type="checkbox"
                                                class="checkbox checkbox-xs"
                                                checked={checked}
                                                onchange={Callback::from(move |_| {
                                                    if let Some((mut endpoint, is_new)) = editing.as_ref().cloned() {
                                                        endpoint.types = toggle_type(endpoint.types, bit);
                                                        editing.set(Some((endpoint, is_new)));
                                                    }
                                                })}
                                            />
                                            {*label}
                                        </label>
                                    }
                                })}
                            </div>
                            <div class="flex justify-end gap-2">
                                <button class="btn btn-ghost btn-sm" onclick={{
                                    let editing = editing.clone();
                                    Callback::from(move |_| editing.set(None))
                                }}>{t("common.cancel")}</button>
                                <button class="btn btn-primary btn-sm" disabled={*saving} onclick={on_save.clone()}>
                                    {t("common.save")}
                                </button>
                            </div>
                        </div>
                    }
                } else { html! {} }}
            </div>
        </section>
    }
}

#[function_component(UsersPanel)]
fn users_panel() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key);
    let api_ctx = use_context::<ApiCtx>();
    let users: FetchHandle<Vec<PortalUser>> =
        use_fetch(Some(USERS_KEY.to_string()), FetchOptions::default());
    // (user id, edited permission mask)
    let editing = use_state(|| None as Option<(i64, u64)>);
    let saving = use_state(|| false);

    let Some(api_ctx) = api_ctx else {
        return html! {};
    };

    let on_save = {
        let api_ctx = api_ctx.clone();
        let editing = editing.clone();
        let saving = saving.clone();
        let mutate = users.mutate.clone();
        Callback::from(move |_| {
            let Some((user_id, mask)) = *editing else { return };
            saving.set(true);
            let client = api_ctx.client.clone();
            let editing = editing.clone();
            let saving = saving.clone();
            let mutate = mutate.clone();
            yew::platform::spawn_local(async move {
                match save_user_permissions(&client, user_id, mask).await {
                    Ok(()) => {
                        report_success("toast.user_saved", &bundle);
                        editing.set(None);
                        mutate.emit(());
                    }
                    Err(err) => report_error(&err, &bundle),
                }
                saving.set(false);
            });
        })
    };

    let rows: &[PortalUser] = users.data.as_deref().map_or(&[], Vec::as_slice);
    html! {
        <section class="card bg-base-100 shadow">
            <div class="card-body gap-3">
                <h3 class="card-title text-base">{t("admin.users")}</h3>
                <ul class="flex flex-col gap-1">
                    {for rows.iter().map(|user| {
                        let user_id = user.id;
                        let is_editing = editing.as_ref().is_some_and(|(id, _)| *id == user_id);
                        let toggle_edit = {
                            let editing = editing.clone();
                            let permissions = user.permissions;
                            Callback::from(move |_| {
                                if editing.as_ref().is_some_and(|(id, _)| *id == user_id) {
                                    editing.set(None);
                                } else {
                                    editing.set(Some((user_id, permissions)));
                                }
                            })
                        };
                        html! {
                            <li class="rounded-box bg-base-200 p-2">
                                <div class="flex items-center justify-between gap-2 text-sm">
                                    <span>
                                        <span class="font-medium">{user.username.clone()}</span>
                                        <span class="text-base-content/60 text-xs">
                                            {crate::i18n::with_count(
                                                &format!(" · {}", t("social.request_count")),
                                                user.request_count as usize,
                                            )}
                                        </span>
                                    </span>
                                    <button class="btn btn-ghost btn-xs" onclick={toggle_edit}>
                                        {if is_editing { t("common.cancel") } else { t("admin.permissions") }}
                                    </button>
                                </div>
                                {if is_editing {
                                    let mask = editing.as_ref().map_or(0, |(_, mask)| *mask);
                                    html! {
                                        <div class="mt-2 flex flex-wrap items-center gap-2">
                                            {for PERMISSION_ROWS.iter().map(|(bit, key)| {
                                                let bit = *bit;
                                                let editing = editing.clone();
                                                html! {
                                                    <label class="label cursor-pointer gap-1 text-xs">
                                                        <input
                                                            type="checkbox"
                                                            class="checkbox checkbox-xs"
                                                            checked={has_explicit(mask, bit)}
                                                            onchange={Callback::from(move |_| {
                                                                if let Some((id, mask)) = *editing {
                                                                    editing.set(Some((id, toggle_permission(mask, bit))));
                                                                }
                                                            })}
                                                        />
                                                        {t(key)}
                                                    </label>
                                                }
                                            })}
                                            <button class="btn btn-primary btn-xs" disabled={*saving} onclick={on_save.clone()}>
                                                {t("common.save")}
                                            </button>
                                        </div>
                                    }
                                } else { html! {} }}
                            </li>
                        }
                    })}
                </ul>
            </div>
        </section>
    }
}
