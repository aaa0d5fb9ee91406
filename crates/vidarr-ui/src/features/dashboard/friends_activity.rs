use crate::app::routes::Route;
use crate::components::atoms::EmptyState;
use crate::core::fetch::{FetchOptions, use_fetch};
use crate::features::lists::api::SOCIAL_FEED_KEY;
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use vidarr_api_models::FriendActivity;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(FriendsActivityPanel)]
pub(crate) fn friends_activity_panel() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key);
    let feed = use_fetch::<Vec<FriendActivity>>(
        Some(SOCIAL_FEED_KEY.to_string()),
        FetchOptions {
            refresh_interval_ms: 60_000,
            revalidate_on_focus: true,
        },
    );

    let rows: &[FriendActivity] = feed.data.as_deref().map_or(&[], Vec::as_slice);
    html! {
        <section class="card bg-base-100 shadow">
            <div class="card-body gap-2">
                <h3 class="card-title text-base">{t("dashboard.friends_activity")}</h3>
                {if rows.is_empty() {
                    html! { <EmptyState title={AttrValue::from(t("dashboard.empty_generic"))} /> }
                } else {
                    html! {
                        <ul class="flex flex-col gap-1">
                            {for rows.iter().map(|entry| html! {
                                <li class="text-sm">
                                    <Link<Route>
                                        to={Route::Profile { username: entry.username.clone() }}
                                        classes="link link-hover font-medium"
                                    >
                                        {entry.username.clone()}
                                    </Link<Route>>
                                    {format!(" {} ", entry.action)}
                                    <span class="font-medium">{entry.title.clone()}</span>
                                    <span class="text-base-content/60 text-xs">
                                        {format!(" · {}", entry.timestamp.format("%b %d, %H:%M"))}
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
