use crate::components::atoms::EmptyState;
use crate::core::fetch::{FetchOptions, use_fetch};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use vidarr_api_models::UpcomingEpisode;
use yew::prelude::*;

#[function_component(UpcomingPanel)]
pub(crate) fn upcoming_panel() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key);
    let episodes = use_fetch::<Vec<UpcomingEpisode>>(
        Some("/api/v1/calendar/upcoming".to_string()),
        FetchOptions {
            refresh_interval_ms: 300_000,
            revalidate_on_focus: false,
        },
    );

    let rows: &[UpcomingEpisode] = episodes.data.as_deref().map_or(&[], Vec::as_slice);
    html! {
        <section class="card bg-base-100 shadow">
            <div class="card-body gap-2">
                <h3 class="card-title text-base">{t("dashboard.upcoming")}</h3>
                {if rows.is_empty() {
                    html! { <EmptyState title={AttrValue::from(t("dashboard.empty_generic"))} /> }
                } else {
                    html! {
                        <ul class="flex flex-col gap-1">
                            {for rows.iter().map(|episode| html! {
                                <li class="flex items-center justify-between gap-2 text-sm">
                                    <span class="truncate">
                                        {format!(
                                            "{} S{:02}E{:02}",
                                            episode.series_title,
                                            episode.season_number,
                                            episode.episode_number
                                        )}
                                    </span>
                                    <span class="text-base-content/60 text-xs">
                                        {episode.air_date.format("%b %d").to_string()}
                                    </span>
                                </li>
                            })}
                        </ul>
                    }
                }}
            </div>
        </section>
    }
}
