use crate::components::atoms::EmptyState;
use crate::core::fetch::{FetchOptions, use_fetch};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use vidarr_api_models::Achievement;
use yew::prelude::*;

#[function_component(AchievementsPanel)]
pub(crate) fn achievements_panel() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key);
    let achievements = use_fetch::<Vec<Achievement>>(
        Some("/api/v1/users/me/achievements".to_string()),
        FetchOptions::default(),
    );

    let rows: &[Achievement] = achievements.data.as_deref().map_or(&[], Vec::as_slice);
    html! {
        <section class="card bg-base-100 shadow">
            <div class="card-body gap-2">
                <h3 class="card-title text-base">{t("dashboard.achievements")}</h3>
                {if rows.is_empty() {
                    html! { <EmptyState title={AttrValue::from(t("dashboard.empty_generic"))} /> }
                } else {
                    html! {
                        <ul class="flex flex-col gap-1">
                            {for rows.iter().map(|achievement| {
                                let earned = achievement.earned_at.is_some();
                                html! {
                                    <li class={classes!(
                                        "flex", "items-center", "justify-between", "gap-2",
                                        "text-sm",
                                        if earned { "" } else { "opacity-50" }
                                    )}>
                                        <span title={achievement.description.clone()}>
                                            {achievement.name.clone()}
                                        </span>
                                        {if earned {
                                            html! { <span class="badge badge-success badge-sm">{t("dashboard.earned")}</span> }
                                        } else {
                                            html! { <span class="badge badge-ghost badge-sm">{t("dashboard.locked")}</span> }
                                        }}
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
