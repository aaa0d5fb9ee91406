//! Recent requests panel: stat tiles, filter tabs, paged grid.

use crate::components::atoms::{EmptyState, PagerControls, StatusBadge};
use crate::core::fetch::{FetchOptions, use_fetch};
use crate::features::dashboard::state::RequestsPanelState;
use crate::features::requests::api::REQUESTS_KEY;
use crate::features::requests::logic::{StatusBucket, StatusCounts, StatusFilter};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use vidarr_api_models::MediaRequest;
use yew::prelude::*;

const PAGE_SIZE: usize = 6;

#[function_component(RecentRequestsPanel)]
pub(crate) fn recent_requests_panel() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key);
    let requests = use_fetch::<Vec<MediaRequest>>(
        Some(REQUESTS_KEY.to_string()),
        FetchOptions {
            refresh_interval_ms: 30_000,
            revalidate_on_focus: true,
        },
    );
    let state = use_state(|| RequestsPanelState::new(PAGE_SIZE));

    let rows: &[MediaRequest] = requests.data.as_deref().map_or(&[], Vec::as_slice);
    let counts = StatusCounts::tally(rows.iter().map(|request| request.status.as_str()));
    let paged = state.paged(rows);

    let set_filter = {
        let state = state.clone();
        Callback::from(move |filter: StatusFilter| {
            let mut next = (*state).clone();
            next.set_filter(filter);
            state.set(next);
        })
    };
    let set_page = {
        let state = state.clone();
        Callback::from(move |page: usize| {
            let mut next = (*state).clone();
            next.set_page(page);
            state.set(next);
        })
    };

    let filter_tab = |filter: StatusFilter, label: String| {
        let active = state.filter == filter;
        let set_filter = set_filter.clone();
        html! {
            <button
                class={classes!("tab", if active { "tab-active" } else { "" })}
                onclick={Callback::from(move |_| set_filter.emit(filter))}
            >{label}</button>
        }
    };

    html! {
        <section class="card bg-base-100 shadow panel-requests">
            <div class="card-body gap-3">
                <div class="flex items-center justify-between">
                    <h3 class="card-title text-base">{t("dashboard.requests_title")}</h3>
                    {if let Some(error) = requests.error.as_ref() {
                        html! { <span class="text-error text-xs">{error.clone()}</span> }
                    } else { html! {} }}
                </div>
                <div class="grid grid-cols-5 gap-2 stat-tiles">
                    {for StatusBucket::STAT_TILES.iter().map(|bucket| html! {
                        <div class="stat-tile rounded-box bg-base-200 p-2 text-center">
                            <p class="text-lg font-semibold">{counts.for_bucket(*bucket)}</p>
                            <p class="text-base-content/60 text-xs">{t(bucket.label_key())}</p>
                        </div>
                    })}
                </div>
                <div class="tabs tabs-boxed tabs-sm">
                    {filter_tab(StatusFilter::All, t("dashboard.filter_all"))}
                    {for StatusBucket::STAT_TILES.iter().map(|bucket| {
                        filter_tab(StatusFilter::Bucket(*bucket), t(bucket.label_key()))
                    })}
                </div>
                {if requests.is_loading {
                    html! { <progress class="progress w-full"></progress> }
                } else if paged.items.is_empty() {
                    html! { <EmptyState title={AttrValue::from(t("dashboard.empty_requests"))} /> }
                } else {
                    html! {
                        <ul class="request-grid grid gap-2 md:grid-cols-2">
                            {for paged.items.iter().map(|request| html! {
                                <li class="rounded-box bg-base-200 flex items-center justify-between gap-2 p-2">
                                    <div class="min-w-0">
                                        <p class="truncate text-sm font-medium">{request.title.clone()}</p>
                                        <p class="text-base-content/60 text-xs">
                                            {format!("{} {}", t("requests.requested_by"), request.requested_by)}
                                        </p>
                                    </div>
                                    <StatusBadge status={AttrValue::from(request.status.clone())} />
                                </li>
                            })}
                        </ul>
                    }
                }}
                <PagerControls page={paged.page} pages={paged.pages} on_page={set_page} />
            </div>
        </section>
    }
}
