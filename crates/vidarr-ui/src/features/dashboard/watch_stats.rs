use crate::core::fetch::{FetchOptions, use_fetch};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use vidarr_api_models::WatchStats;
use yew::prelude::*;

#[function_component(WatchStatsPanel)]
pub(crate) fn watch_stats_panel() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key);
    let stats = use_fetch::<WatchStats>(
        Some("/api/v1/users/me/watch-stats".to_string()),
        FetchOptions::default(),
    );

    html! {
        <section class="card bg-base-100 shadow">
            <div class="card-body gap-2">
                <h3 class="card-title text-base">{t("dashboard.watch_stats")}</h3>
                {match stats.data.as_deref() {
                    Some(stats) => html! {
                        <div class="grid grid-cols-3 gap-2 text-center">
                            <div>
                                <p class="text-xl font-semibold">{stats.total_plays}</p>
                                <p class="text-base-content/60 text-xs">{t("dashboard.plays")}</p>
                            </div>
                            <div>
                                <p class="text-xl font-semibold">{stats.total_minutes / 60}</p>
                                <p class="text-base-content/60 text-xs">{t("dashboard.hours")}</p>
                            </div>
                            <div>
                                <p class="truncate text-xl font-semibold">
                                    {stats.top_genre.clone().unwrap_or_else(|| "—".to_string())}
                                </p>
                                <p class="text-base-content/60 text-xs">{t("dashboard.top_genre")}</p>
                            </div>
                        </div>
                    },
                    None => html! { <progress class="progress w-full"></progress> },
                }}
            </div>
        </section>
    }
}
