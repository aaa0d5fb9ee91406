use crate::components::atoms::EmptyState;
use crate::core::fetch::{FetchOptions, use_fetch};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use vidarr_api_models::ContinueWatchingItem;
use yew::prelude::*;

#[function_component(ContinueWatchingPanel)]
pub(crate) fn continue_watching_panel() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key);
    let items = use_fetch::<Vec<ContinueWatchingItem>>(
        Some("/api/v1/library/continue-watching".to_string()),
        FetchOptions {
            refresh_interval_ms: 60_000,
            revalidate_on_focus: true,
        },
    );

    let rows: &[ContinueWatchingItem] = items.data.as_deref().map_or(&[], Vec::as_slice);
    html! {
        <section class="card bg-base-100 shadow">
            <div class="card-body gap-2">
                <h3 class="card-title text-base">{t("dashboard.continue_watching")}</h3>
                {if rows.is_empty() {
                    html! { <EmptyState title={AttrValue::from(t("dashboard.empty_generic"))} /> }
                } else {
                    html! {
                        <ul class="flex flex-col gap-2">
                            {for rows.iter().map(|item| {
                                let percent = item.progress_percent.clamp(0.0, 100.0);
                                html! {
                                    <li class="rounded-box bg-base-200 p-2">
                                        <div class="flex items-center justify-between gap-2 text-sm">
                                            <p class="truncate font-medium">{item.title.clone()}</p>
                                            <span class="text-base-content/60 text-xs">
                                                {format!("{} min", item.remaining_minutes)}
                                            </span>
                                        </div>
                                        <progress class="progress progress-primary w-full" value={format!("{percent}")} max="100"></progress>
                                    </li>
                                }
                            })}
                        </ul>
                    }
                }}
            </div>
        </section>
    }
}
