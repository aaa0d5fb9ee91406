//! Episode-request wizard modal.
//!
//! # Design
//! - All state changes flow through one reducer over [`WizardState`], so
//!   rapid episode toggles apply as pure set operations with no races.
//! - Season details arrive from the bounded prefetch pool or a lazy fetch
//!   on expand; either way a season is fetched once per modal session.
//! - Closing is blocked while the bulk submission is in flight.

use crate::app::api::ApiCtx;
use crate::components::modal::Modal;
use crate::core::fetch::invalidate_where;
use crate::core::store::{AppStore, app_dispatch, push_toast};
use crate::features::requests::api::{
    REQUESTS_KEY, fetch_quality_profiles, fetch_season_episodes, fetch_seasons, search_releases,
    submit_bulk_request,
};
use crate::features::requests::prefetch::PrefetchPool;
use crate::features::requests::wizard::{
    MONITORING_CHOICES, SeasonSlot, TourPage, WizardEvent, WizardState, WizardStep, is_selectable,
    monitoring_from_value, monitoring_value, submit_outcome,
};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use gloo::console;
use std::rc::Rc;
use vidarr_api_models::{
    Episode, MonitoringOption, QualityProfile, ReleaseCandidate, Season, permissions,
};
use yew::prelude::*;
use yewdux::prelude::use_selector;

enum WizardMsg {
    Opened,
    Reset,
    Event(WizardEvent),
    SeasonsLoaded(Vec<Season>),
    SeasonResolved(u32, Option<Vec<Episode>>),
    ToggleExpanded(u32),
    ToggleEpisode(u32, u32),
    ToggleSeason(u32),
    SetMonitoring(MonitoringOption),
    SetQualityProfile(Option<i64>),
    SetSubmitting(bool),
}

impl Reducible for WizardState {
    type Action = WizardMsg;

    fn reduce(self: Rc<Self>, action: WizardMsg) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            WizardMsg::Opened => next = Self::opened(),
            WizardMsg::Reset => next = Self::default(),
            WizardMsg::Event(event) => next.apply(event),
            WizardMsg::SeasonsLoaded(seasons) => {
                next.arena = crate::features::requests::wizard::SeasonArena::new(&seasons);
                // The pool fetches every season; mark them all loading so
                // the lazy expand path cannot fetch twice.
                for season in seasons {
                    next.arena.begin_load(season.season_number);
                }
                next.apply(WizardEvent::SeasonsLoaded);
            }
            WizardMsg::SeasonResolved(season, Some(episodes)) => {
                next.arena.finish_load(season, episodes);
            }
            WizardMsg::SeasonResolved(season, None) => {
                next.arena.reset_slot(season);
            }
            WizardMsg::ToggleExpanded(season) => {
                // Expanding an unfetched season claims its slot, so a rapid
                // collapse/re-expand cannot fetch it twice.
                if next.toggle_expanded(season) {
                    next.arena.begin_load(season);
                }
            }
            WizardMsg::ToggleEpisode(season, episode) => {
                if let Some(episodes) = next.arena.episodes(season) {
                    let episodes = episodes.to_vec();
                    next.selection.toggle(season, &episodes, episode);
                }
            }
            WizardMsg::ToggleSeason(season) => {
                if let Some(episodes) = next.arena.episodes(season) {
                    let episodes = episodes.to_vec();
                    next.selection.toggle_season(season, &episodes);
                }
            }
            WizardMsg::SetMonitoring(option) => next.monitoring = option,
            WizardMsg::SetQualityProfile(id) => next.quality_profile_id = id,
            WizardMsg::SetSubmitting(submitting) => next.submitting = submitting,
        }
        Rc::new(next)
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct RequestWizardModalProps {
    pub open: bool,
    pub tmdb_id: i64,
    pub title: String,
    pub on_close: Callback<()>,
}

#[function_component(RequestWizardModal)]
pub(crate) fn request_wizard_modal(props: &RequestWizardModalProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key);
    let api_ctx = use_context::<ApiCtx>();
    let viewer = use_selector(|store: &AppStore| store.session.user.clone());

    let state = use_reducer(WizardState::default);
    let pool = use_mut_ref(|| None as Option<PrefetchPool>);
    let profiles = use_state(Vec::<QualityProfile>::new);

    {
        // Open starts a fresh session; close aborts in-flight prefetches and
        // discards everything, including the selection.
        let state = state.dispatcher();
        let pool = pool.clone();
        use_effect_with_deps(
            move |(open, _tmdb_id): &(bool, i64)| {
                if *open {
                    state.dispatch(WizardMsg::Opened);
                } else {
                    *pool.borrow_mut() = None;
                    state.dispatch(WizardMsg::Reset);
                }
                || ()
            },
            (props.open, props.tmdb_id),
        );
    }
    {
        // Entering LoadingSeasons triggers the season-list fetch, then the
        // bounded prefetch pool for season details.
        let dispatcher = state.dispatcher();
        let pool = pool.clone();
        let api_ctx = api_ctx.clone();
        let tmdb_id = props.tmdb_id;
        use_effect_with_deps(
            move |step: &WizardStep| {
                if *step == WizardStep::LoadingSeasons {
                    if let Some(api_ctx) = api_ctx {
                        let client = api_ctx.client.clone();
                        let dispatcher = dispatcher.clone();
                        let pool = pool.clone();
                        yew::platform::spawn_local(async move {
                            match fetch_seasons(&client, tmdb_id).await {
                                Ok(seasons) => {
                                    let numbers: Vec<u32> = seasons
                                        .iter()
                                        .map(|season| season.season_number)
                                        .collect();
                                    dispatcher.dispatch(WizardMsg::SeasonsLoaded(seasons));
                                    let on_result = {
                                        let dispatcher = dispatcher.clone();
                                        Callback::from(move |(season, episodes)| {
                                            dispatcher.dispatch(WizardMsg::SeasonResolved(
                                                season, episodes,
                                            ));
                                        })
                                    };
                                    *pool.borrow_mut() =
                                        PrefetchPool::start(client, tmdb_id, numbers, on_result);
                                }
                                Err(err) => {
                                    app_dispatch().reduce_mut(|store| {
                                        push_toast(
                                            store,
                                            crate::core::store::ToastKind::Error,
                                            err.user_message(&bundle),
                                        );
                                    });
                                    dispatcher.dispatch(WizardMsg::Event(
                                        WizardEvent::SeasonsFailed,
                                    ));
                                }
                            }
                        });
                    }
                }
                || ()
            },
            state.step,
        );
    }
    {
        // Quality profiles load once per open.
        let profiles = profiles.clone();
        let api_ctx = api_ctx.clone();
        use_effect_with_deps(
            move |open: &bool| {
                if *open {
                    if let Some(api_ctx) = api_ctx {
                        let client = api_ctx.client.clone();
                        let profiles = profiles.clone();
                        yew::platform::spawn_local(async move {
                            match fetch_quality_profiles(&client).await {
                                Ok(list) => profiles.set(list),
                                Err(err) => {
                                    console::warn!("quality profiles unavailable", err.to_string());
                                }
                            }
                        });
                    }
                }
                || ()
            },
            props.open,
        );
    }

    let Some(api_ctx) = api_ctx else {
        return html! {};
    };

    let on_expand = {
        let state = state.clone();
        let api_ctx = api_ctx.clone();
        let tmdb_id = props.tmdb_id;
        Callback::from(move |season: u32| {
            let not_loaded = *state.arena.slot(season) == SeasonSlot::NotLoaded;
            state.dispatch(WizardMsg::ToggleExpanded(season));
            let now_expanded = !state.expanded.contains(&season);
            if now_expanded && not_loaded {
                // Lazy path for seasons the pool failed to prefetch.
                let client = api_ctx.client.clone();
                let dispatcher = state.dispatcher();
                yew::platform::spawn_local(async move {
                    let result = fetch_season_episodes(&client, tmdb_id, season).await;
                    dispatcher.dispatch(WizardMsg::SeasonResolved(season, result.ok()));
                });
            }
        })
    };

    let on_submit = {
        let state = state.clone();
        let api_ctx = api_ctx.clone();
        let tmdb_id = props.tmdb_id;
        let on_close = props.on_close.clone();
        Callback::from(move |_| {
            let Some(body) = state.request_body(tmdb_id) else {
                return;
            };
            if state.submitting {
                return;
            }
            state.dispatch(WizardMsg::SetSubmitting(true));
            let client = api_ctx.client.clone();
            let dispatcher = state.dispatcher();
            let on_close = on_close.clone();
            yew::platform::spawn_local(async move {
                let result = submit_bulk_request(&client, &body).await;
                let succeeded = matches!(&result, Ok(_))
                    || matches!(&result, Err(err) if err.is_already_applied());
                for (kind, message) in submit_outcome(&result, &bundle) {
                    app_dispatch().reduce_mut(|store| push_toast(store, kind, message));
                }
                dispatcher.dispatch(WizardMsg::SetSubmitting(false));
                if succeeded {
                    invalidate_where(|key| key.starts_with(REQUESTS_KEY));
                    on_close.emit(());
                }
            });
        })
    };

    let can_search_releases = viewer
        .as_ref()
        .as_ref()
        .is_some_and(|user| permissions::has(user.permissions, permissions::VIEW_RELEASES));

    let body = match state.step {
        WizardStep::Idle => html! {},
        WizardStep::Tour(page) => render_tour(page, &state, &bundle),
        WizardStep::LoadingSeasons => html! {
            <div class="flex flex-col items-center gap-2 p-6">
                <progress class="progress w-full"></progress>
                <p class="text-base-content/60 text-sm">{t("wizard.loading_seasons")}</p>
            </div>
        },
        WizardStep::SeasonList => render_season_list(
            &state,
            &profiles,
            &bundle,
            &on_expand,
            &on_submit,
            can_search_releases.then_some(ReleaseSearchProps {
                tmdb_id: props.tmdb_id,
                initial_query: props.title.clone(),
            }),
        ),
    };

    html! {
        <Modal
            title={AttrValue::from(format!("{} — {}", t("wizard.title"), props.title.clone()))}
            open={props.open}
            can_close={state.can_close()}
            on_close={props.on_close.clone()}
        >
            {body}
        </Modal>
    }
}

fn render_tour(
    page: TourPage,
    state: &UseReducerHandle<WizardState>,
    bundle: &TranslationBundle,
) -> Html {
    let t = |key: &str| bundle.text(key);
    let (headline, copy) = match page {
        TourPage::Type => ("wizard.tour_type", "wizard.tour_type_copy"),
        TourPage::Rating => ("wizard.tour_rating", "wizard.tour_rating_copy"),
        TourPage::Genre => ("wizard.tour_genre", "wizard.tour_genre_copy"),
    };
    let next = {
        let state = state.dispatcher();
        Callback::from(move |_| state.dispatch(WizardMsg::Event(WizardEvent::TourNext)))
    };
    let skip = {
        let state = state.dispatcher();
        Callback::from(move |_| state.dispatch(WizardMsg::Event(WizardEvent::TourSkip)))
    };
    html! {
        <div class="flex flex-col gap-3 p-2">
            <h4 class="font-medium">{t(headline)}</h4>
            <p class="text-base-content/70 text-sm">{t(copy)}</p>
            <div class="modal-action">
                <button class="btn btn-ghost btn-sm" onclick={skip}>{t("wizard.tour_skip")}</button>
                <button class="btn btn-primary btn-sm" onclick={next}>{t("wizard.tour_next")}</button>
            </div>
        </div>
    }
}

struct ReleaseSearchProps {
    tmdb_id: i64,
    initial_query: String,
}

fn render_season_list(
    state: &UseReducerHandle<WizardState>,
    profiles: &UseStateHandle<Vec<QualityProfile>>,
    bundle: &TranslationBundle,
    on_expand: &Callback<u32>,
    on_submit: &Callback<MouseEvent>,
    release_search: Option<ReleaseSearchProps>,
) -> Html {
    let t = |key: &str| bundle.text(key);
    let selected = state.selection.total();

    let on_monitoring = {
        let state = state.dispatcher();
        Callback::from(move |event: Event| {
            if let Some(select) = event.target_dyn_into::<web_sys::HtmlSelectElement>() {
                state.dispatch(WizardMsg::SetMonitoring(monitoring_from_value(&select.value())));
            }
        })
    };
    let on_profile = {
        let state = state.dispatcher();
        Callback::from(move |event: Event| {
            if let Some(select) = event.target_dyn_into::<web_sys::HtmlSelectElement>() {
                state.dispatch(WizardMsg::SetQualityProfile(select.value().parse().ok()));
            }
        })
    };

    html! {
        <div class="flex flex-col gap-3 pt-2">
            <ul class="flex max-h-96 flex-col gap-1 overflow-y-auto">
                {for state.arena.season_numbers().map(|season| {
                    render_season_row(season, state, bundle, on_expand)
                })}
            </ul>
            <div class="grid gap-2 md:grid-cols-2">
                <label class="form-control">
                    <span class="label-text text-xs">{t("wizard.monitoring")}</span>
                    <select class="select select-bordered select-sm" onchange={on_monitoring}>
                        {for MONITORING_CHOICES.iter().map(|(option, control, key)| html! {
                            <option
                                value={*control}
                                selected={monitoring_value(state.monitoring) == *control}
                            >{t(key)}</option>
                        })}
                    </select>
                </label>
                <label class="form-control">
                    <span class="label-text text-xs">{t("wizard.quality_profile")}</span>
                    <select class="select select-bordered select-sm" onchange={on_profile}>
                        <option value="" selected={state.quality_profile_id.is_none()}>
                            {t("wizard.quality_default")}
                        </option>
                        {for profiles.iter().map(|profile| html! {
                            <option
                                value={profile.id.to_string()}
                                selected={state.quality_profile_id == Some(profile.id)}
                            >{profile.name.clone()}</option>
                        })}
                    </select>
                </label>
            </div>
            {match release_search {
                Some(search) => html! {
                    <ReleaseSearchSection tmdb_id={search.tmdb_id} initial_query={search.initial_query} />
                },
                None => html! {},
            }}
            <div class="modal-action items-center">
                <span class="text-base-content/60 grow text-sm">
                    {crate::i18n::with_count(&t("wizard.selected_count"), selected)}
                </span>
                <button
                    class="btn btn-primary btn-sm"
                    disabled={selected == 0 || state.submitting}
                    onclick={on_submit.clone()}
                >
                    {if state.submitting { t("wizard.submitting") } else { t("wizard.submit") }}
                </button>
            </div>
        </div>
    }
}

fn render_season_row(
    season: u32,
    state: &UseReducerHandle<WizardState>,
    bundle: &TranslationBundle,
    on_expand: &Callback<u32>,
) -> Html {
    let t = |key: &str| bundle.text(key);
    let expanded = state.expanded.contains(&season);
    let checked_count = state.selection.season_count(season);
    let toggle = {
        let on_expand = on_expand.clone();
        Callback::from(move |_| on_expand.emit(season))
    };
    let select_all = {
        let state = state.dispatcher();
        Callback::from(move |_| state.dispatch(WizardMsg::ToggleSeason(season)))
    };

    html! {
        <li class="rounded-box bg-base-200">
            <button class="flex w-full items-center justify-between gap-2 p-2 text-left" onclick={toggle}>
                <span class="text-sm font-medium">
                    {format!("{} {}", t("wizard.season"), season)}
                </span>
                <span class="flex items-center gap-2">
                    {if checked_count > 0 {
                        html! { <span class="badge badge-primary badge-sm">{checked_count}</span> }
                    } else { html! {} }}
                    <span class="text-base-content/60">{if expanded { "▾" } else { "▸" }}</span>
                </span>
            </button>
            {if expanded {
                match state.arena.slot(season) {
                    SeasonSlot::NotLoaded | SeasonSlot::Loading => html! {
                        <div class="p-2"><progress class="progress w-full"></progress></div>
                    },
                    SeasonSlot::Loaded(episodes) => html! {
                        <div class="flex flex-col gap-1 p-2 pt-0">
                            <button class="btn btn-ghost btn-xs self-start" onclick={select_all}>
                                {t("wizard.select_all")}
                            </button>
                            <ul class="grid gap-1 md:grid-cols-2">
                                {for episodes.iter().map(|episode| {
                                    render_episode_row(season, episode, state, bundle)
                                })}
                            </ul>
                        </div>
                    },
                }
            } else { html! {} }}
        </li>
    }
}

fn render_episode_row(
    season: u32,
    episode: &Episode,
    state: &UseReducerHandle<WizardState>,
    bundle: &TranslationBundle,
) -> Html {
    let number = episode.episode_number;
    let selectable = is_selectable(episode);
    // Locked episodes render pre-checked and disabled; the toggle is a
    // no-op for them regardless.
    let checked = !selectable || state.selection.is_selected(season, number);
    let lock_key = if episode.available {
        Some("status.available")
    } else if episode.downloading {
        Some("status.processing")
    } else if episode.requested {
        Some("status.requested")
    } else {
        None
    };
    let on_toggle = {
        let state = state.dispatcher();
        Callback::from(move |_| state.dispatch(WizardMsg::ToggleEpisode(season, number)))
    };

    html! {
        <li class="flex items-center gap-2 text-sm">
            <input
                type="checkbox"
                class="checkbox checkbox-sm"
                checked={checked}
                disabled={!selectable}
                onchange={on_toggle}
            />
            <span class={classes!("truncate", if selectable { "" } else { "opacity-50" })}>
                {format!(
                    "E{:02} {}",
                    number,
                    episode.name.clone().unwrap_or_default()
                )}
            </span>
            {match lock_key {
                Some(key) => html! {
                    <span class="badge badge-ghost badge-xs">{bundle.text(key)}</span>
                },
                None => html! {},
            }}
        </li>
    }
}

#[derive(Properties, PartialEq)]
struct ReleaseSearchSectionProps {
    tmdb_id: i64,
    initial_query: String,
}

/// Admin-only raw release search sub-flow.
#[function_component(ReleaseSearchSection)]
fn release_search_section(props: &ReleaseSearchSectionProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key);
    let api_ctx = use_context::<ApiCtx>();
    let query = use_state(|| props.initial_query.clone());
    let results = use_state(Vec::<ReleaseCandidate>::new);
    let searching = use_state(|| false);
    let searched = use_state(|| false);

    let on_search = {
        let api_ctx = api_ctx.clone();
        let query = query.clone();
        let results = results.clone();
        let searching = searching.clone();
        let searched = searched.clone();
        let tmdb_id = props.tmdb_id;
        Callback::from(move |_| {
            let Some(api_ctx) = api_ctx.clone() else { return };
            if *searching {
                return;
            }
            searching.set(true);
            let client = api_ctx.client.clone();
            let query_text = (*query).clone();
            let results = results.clone();
            let searching = searching.clone();
            let searched = searched.clone();
            yew::platform::spawn_local(async move {
                match search_releases(&client, tmdb_id, &query_text).await {
                    Ok(candidates) => results.set(candidates),
                    Err(err) => {
                        app_dispatch().reduce_mut(|store| {
                            push_toast(
                                store,
                                crate::core::store::ToastKind::Error,
                                err.user_message(&bundle),
                            );
                        });
                    }
                }
                searched.set(true);
                searching.set(false);
            });
        })
    };

    html! {
        <details class="collapse-arrow bg-base-200 collapse">
            <summary class="collapse-title text-sm font-medium">
                {t("wizard.release_search")}
            </summary>
            <div class="collapse-content flex flex-col gap-2">
                <p class="text-base-content/60 text-xs">{t("wizard.release_search_hint")}</p>
                <div class="flex items-center gap-2">
                    <input
                        type="text"
                        class="input input-bordered input-sm grow"
                        value={(*query).clone()}
                        oninput={{
                            let query = query.clone();
                            Callback::from(move |event: InputEvent| {
                                if let Some(input) = event.target_dyn_into::<web_sys::HtmlInputElement>() {
                                    query.set(input.value());
                                }
                            })
                        }}
                    />
                    <button class="btn btn-primary btn-sm" disabled={*searching} onclick={on_search}>
                        {t("wizard.search")}
                    </button>
                </div>
                {if *searching {
                    html! { <progress class="progress w-full"></progress> }
                } else if results.is_empty() && *searched {
                    html! { <p class="text-base-content/60 text-sm">{t("wizard.no_releases")}</p> }
                } else {
                    html! {
                        <ul class="flex flex-col gap-1">
                            {for results.iter().map(|candidate| html! {
                                <li class="flex items-center justify-between gap-2 text-xs">
                                    <span class="truncate" title={candidate.title.clone()}>
                                        {candidate.title.clone()}
                                    </span>
                                    <span class="text-base-content/60 shrink-0">
                                        {format!(
                                            "{} · {} · {}",
                                            candidate.indexer,
                                            crate::features::admin::backups::size_label(candidate.size_bytes),
                                            candidate.seeders.map_or_else(
                                                || "—".to_string(),
                                                |seeders| format!("{seeders} seeders"),
                                            ),
                                        )}
                                    </span>
                                </li>
                            })}
                        </ul>
                    }
                }}
            </div>
        </details>
    }
}
