//! Recently-added library grid with a media-type filter.

use crate::components::atoms::{EmptyState, PagerControls, PosterCard};
use crate::core::fetch::{FetchOptions, use_fetch};
use crate::features::dashboard::state::{RecentlyAddedState, media_status_label_key};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use vidarr_api_models::{LibraryItem, MediaType};
use yew::prelude::*;

const PAGE_SIZE: usize = 6;

#[function_component(RecentlyAddedPanel)]
pub(crate) fn recently_added_panel() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key);
    let items = use_fetch::<Vec<LibraryItem>>(
        Some("/api/v1/library/recent".to_string()),
        FetchOptions {
            refresh_interval_ms: 60_000,
            revalidate_on_focus: true,
        },
    );
    let state = use_state(|| RecentlyAddedState::new(PAGE_SIZE));

    let rows: &[LibraryItem] = items.data.as_deref().map_or(&[], Vec::as_slice);
    let (page_items, page, pages) = state.paged(rows);

    let set_filter = {
        let state = state.clone();
        Callback::from(move |filter: Option<MediaType>| {
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

    let filter_tab = |filter: Option<MediaType>, label: String| {
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
        <section class="card bg-base-100 shadow">
            <div class="card-body gap-3">
                <div class="flex items-center justify-between">
                    <h3 class="card-title text-base">{t("dashboard.recently_added")}</h3>
                    <div class="tabs tabs-boxed tabs-sm">
                        {filter_tab(None, t("dashboard.filter_all"))}
                        {filter_tab(Some(MediaType::Movie), t("media.movies"))}
                        {filter_tab(Some(MediaType::Tv), t("media.series"))}
                    </div>
                </div>
                {if page_items.is_empty() {
                    html! { <EmptyState title={AttrValue::from(t("dashboard.empty_generic"))} /> }
                } else {
                    html! {
                        <div class="grid grid-cols-3 gap-2 lg:grid-cols-6">
                            {for page_items.iter().map(|item| html! {
                                <PosterCard
                                    title={AttrValue::from(item.title.clone())}
                                    poster_url={item.poster_url.clone().map(AttrValue::from)}
                                    badge={html! {
                                        <span class="badge badge-ghost badge-sm">
                                            {t(media_status_label_key(item.media_status))}
                                        </span>
                                    }}
                                />
                            })}
                        </div>
                    }
                }}
                <PagerControls {page} {pages} on_page={set_page} />
            </div>
        </section>
    }
}
