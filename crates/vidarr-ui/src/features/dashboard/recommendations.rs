//! Personalized recommendations with request / add-to-list actions.

use crate::components::atoms::{EmptyState, PosterCard};
use crate::core::commands::{self, UiCommand};
use crate::core::fetch::{FetchOptions, use_fetch};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use vidarr_api_models::{MediaType, Recommendation};
use yew::prelude::*;

#[function_component(RecommendationsPanel)]
pub(crate) fn recommendations_panel() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key);
    let recommendations = use_fetch::<Vec<Recommendation>>(
        Some("/api/v1/discover/recommendations".to_string()),
        FetchOptions::default(),
    );

    let rows: &[Recommendation] = recommendations.data.as_deref().map_or(&[], Vec::as_slice);
    html! {
        <section class="card bg-base-100 shadow">
            <div class="card-body gap-2">
                <h3 class="card-title text-base">{t("dashboard.recommendations")}</h3>
                {if rows.is_empty() {
                    html! { <EmptyState title={AttrValue::from(t("dashboard.empty_generic"))} /> }
                } else {
                    html! {
                        <div class="grid grid-cols-3 gap-2 lg:grid-cols-6">
                            {for rows.iter().map(|recommendation| {
                                let tmdb_id = recommendation.tmdb_id;
                                let media_type = recommendation.media_type;
                                let title = recommendation.title.clone();
                                let on_request = Callback::from(move |_: MouseEvent| {
                                    commands::publish(&UiCommand::OpenRequestWizard {
                                        tmdb_id,
                                        title: title.clone(),
                                    });
                                });
                                let on_add = Callback::from(move |_: MouseEvent| {
                                    commands::publish(&UiCommand::OpenAddToList { tmdb_id, media_type });
                                });
                                html! {
                                    <div class="flex flex-col gap-1">
                                        <PosterCard
                                            title={AttrValue::from(recommendation.title.clone())}
                                            poster_url={recommendation.poster_url.clone().map(AttrValue::from)}
                                            footer={AttrValue::from(format!("{:.0}% match", recommendation.score * 100.0))}
                                        />
                                        <div class="join justify-center">
                                            {if media_type == MediaType::Tv {
                                                html! {
                                                    <button class="btn btn-primary btn-xs join-item" onclick={on_request}>
                                                        {t("dashboard.request")}
                                                    </button>
                                                }
                                            } else { html! {} }}
                                            <button class="btn btn-ghost btn-xs join-item" onclick={on_add}>
                                                {t("lists.add_title")}
                                            </button>
                                        </div>
                                    </div>
                                }
                            })}
                        </div>
                    }
                }}
            </div>
        </section>
    }
}
