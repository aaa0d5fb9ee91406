//! Profile page and friend action button.
//!
//! # Design
//! - Friend status renders only from the last server-confirmed profile;
//!   actions fire, then the profile key is re-fetched. No optimistic
//!   patching, by policy.

use crate::app::api::ApiCtx;
use crate::components::atoms::EmptyState;
use crate::core::fetch::{FetchOptions, use_fetch};
use crate::core::store::{ToastKind, app_dispatch, push_toast};
use crate::features::social::api::{perform_action, profile_key};
use crate::features::social::logic::{
    FriendAction, FriendAffordance, affordance_for, can_view_details,
};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use crate::core::store::AppStore;
use vidarr_api_models::UserProfile;
use yew::prelude::*;
use yewdux::prelude::use_selector;

#[derive(Properties, PartialEq)]
pub(crate) struct ProfilePageProps {
    pub username: String,
}

#[function_component(ProfilePage)]
pub(crate) fn profile_page(props: &ProfilePageProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key);
    let viewer = use_selector(|store: &AppStore| store.session.user.clone());
    let profile = use_fetch::<UserProfile>(
        Some(profile_key(&props.username)),
        FetchOptions {
            refresh_interval_ms: 0,
            revalidate_on_focus: true,
        },
    );

    let Some(data) = profile.data.as_ref() else {
        return html! {
            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    {if profile.is_loading {
                        html! { <progress class="progress w-full"></progress> }
                    } else {
                        html! {
                            <EmptyState
                                title={AttrValue::from(t("social.profile_unavailable"))}
                                description={profile.error.clone().map(AttrValue::from)}
                            />
                        }
                    }}
                </div>
            </div>
        };
    };

    let is_self = viewer
        .as_ref()
        .as_ref()
        .is_some_and(|viewer| viewer.username == data.username);
    let details_visible = can_view_details(data.visibility, data.friend_status, is_self);

    html! {
        <div class="profile flex flex-col gap-4">
            <div class="card bg-base-100 shadow">
                <div class="card-body flex-row items-center justify-between gap-3">
                    <div class="flex items-center gap-3">
                        <div class="avatar placeholder">
                            <div class="bg-base-300 w-12 rounded-full">
                                {match data.avatar_url.clone() {
                                    Some(url) => html! { <img src={url} alt={data.username.clone()} /> },
                                    None => html! {
                                        <span class="text-lg">
                                            {data.username.chars().next().unwrap_or('?')}
                                        </span>
                                    },
                                }}
                            </div>
                        </div>
                        <div>
                            <h2 class="text-lg font-semibold">{data.username.clone()}</h2>
                            <p class="text-base-content/60 text-sm">
                                {crate::i18n::with_count(
                                    &t("social.request_count"),
                                    data.request_count as usize,
                                )}
                            </p>
                        </div>
                    </div>
                    {if is_self {
                        html! {}
                    } else {
                        html! {
                            <FriendActionButton
                                username={props.username.clone()}
                                profile={(**data).clone()}
                                on_changed={profile.mutate.clone()}
                            />
                        }
                    }}
                </div>
            </div>
            {if details_visible {
                html! {
                    <div class="grid gap-4 md:grid-cols-2">
                        <div class="card bg-base-100 shadow">
                            <div class="card-body gap-2">
                                <h3 class="card-title text-base">{t("social.taste_overlap")}</h3>
                                {match data.taste_overlap.as_ref() {
                                    Some(overlap) => {
                                        let percent = (overlap.score.clamp(0.0, 1.0) * 100.0).round();
                                        html! {
                                            <>
                                                <progress
                                                    class="progress progress-primary w-full"
                                                    value={format!("{percent}")}
                                                    max="100"
                                                ></progress>
                                                <p class="text-sm">{format!("{percent:.0}%")}</p>
                                                <ul class="flex flex-wrap gap-1">
                                                    {for overlap.shared_favorites.iter().map(|title| html! {
                                                        <li class="badge badge-ghost badge-sm">{title.clone()}</li>
                                                    })}
                                                </ul>
                                            </>
                                        }
                                    }
                                    None => html! {
                                        <p class="text-base-content/60 text-sm">{t("social.no_overlap")}</p>
                                    },
                                }}
                            </div>
                        </div>
                    </div>
                }
            } else {
                html! {
                    <EmptyState
                        title={AttrValue::from(t("social.profile_hidden"))}
                        description={Some(AttrValue::from(t("social.profile_hidden_hint")))}
                    />
                }
            }}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct FriendActionButtonProps {
    pub username: String,
    pub profile: UserProfile,
    /// Fired after any action completes; the parent re-fetches the profile.
    pub on_changed: Callback<()>,
}

#[function_component(FriendActionButton)]
pub(crate) fn friend_action_button(props: &FriendActionButtonProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let api_ctx = use_context::<ApiCtx>();
    let busy = use_state(|| false);
    let hovering = use_state(|| false);

    let affordance = affordance_for(props.profile.friend_status);
    if affordance == FriendAffordance::Hidden {
        return html! {};
    }

    let action = match affordance {
        FriendAffordance::AddFriend => Some(FriendAction::SendRequest),
        FriendAffordance::RequestSent => Some(FriendAction::CancelRequest),
        FriendAffordance::AcceptRequest => Some(FriendAction::AcceptRequest),
        FriendAffordance::Unfriend => Some(FriendAction::Unfriend),
        FriendAffordance::Hidden => None,
    };
    let on_click = {
        let api_ctx = api_ctx.clone();
        let username = props.username.clone();
        let on_changed = props.on_changed.clone();
        let busy = busy.clone();
        Callback::from(move |_| {
            let (Some(api_ctx), Some(action)) = (api_ctx.clone(), action) else {
                return;
            };
            if *busy {
                return;
            }
            busy.set(true);
            let client = api_ctx.client.clone();
            let username = username.clone();
            let on_changed = on_changed.clone();
            let busy = busy.clone();
            yew::platform::spawn_local(async move {
                if let Err(err) = perform_action(&client, action, &username).await {
                    app_dispatch().reduce_mut(|store| {
                        push_toast(store, ToastKind::Error, err.user_message(&bundle));
                    });
                }
                // Success or failure, re-render from the server's word.
                on_changed.emit(());
                busy.set(false);
            });
        })
    };

    // Unfriend confirms via a hover-label swap: the single click then fires
    // the removal.
    let label = if affordance == FriendAffordance::Unfriend && *hovering {
        bundle.text("social.unfriend_confirm")
    } else {
        bundle.text(affordance.label_key())
    };
    let class = match affordance {
        FriendAffordance::Unfriend => "btn btn-outline btn-error btn-sm",
        FriendAffordance::AcceptRequest => "btn btn-primary btn-sm",
        _ => "btn btn-ghost btn-sm",
    };

    html! {
        <button
            class={class}
            disabled={affordance.is_disabled() || *busy}
            onmouseenter={{
                let hovering = hovering.clone();
                Callback::from(move |_| hovering.set(true))
            }}
            onmouseleave={{
                let hovering = hovering.clone();
                Callback::from(move |_| hovering.set(false))
            }}
            onclick={on_click}
        >{label}</button>
    }
}
