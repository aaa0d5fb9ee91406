//! App boot: contexts, preferences, session bootstrap, command-driven
//! modals, routing.

use crate::components::shell::AppShell;
use crate::components::toast::ToastHost;
use crate::core::commands::{self, UiCommand};
use crate::core::store::app_dispatch;
use crate::features::admin::view::AdminView;
use crate::features::dashboard::shell::DashboardView;
use crate::features::lists::view::{AddToListModal, CreateListModal};
use crate::features::requests::view::RequestWizardModal;
use crate::features::social::view::ProfilePage;
use crate::i18n::TranslationBundle;
use crate::services::api::api_base_url;
use api::ApiCtx;
use preferences::{
    DENSITY_KEY, LOCALE_KEY, THEME_KEY, apply_theme, load_density, load_locale, load_theme,
    set_storage,
};
use std::rc::Rc;
use vidarr_api_models::{MediaType, SessionInfo};
use yew::prelude::*;
use yew_router::prelude::*;

pub(crate) mod api;
pub(crate) mod preferences;
pub(crate) mod routes;

use routes::Route;

fn switch(route: Route) -> Html {
    match route {
        Route::Dashboard => html! { <DashboardView /> },
        Route::Profile { username } => html! { <ProfilePage {username} /> },
        Route::Admin => html! { <AdminView /> },
        Route::NotFound => html! {
            <div class="p-8 text-center">
                <h2 class="text-lg font-semibold">{"404"}</h2>
            </div>
        },
    }
}

#[function_component(VidarrApp)]
fn vidarr_app() -> Html {
    let theme = use_state(load_theme);
    let density = use_state(load_density);
    let locale = use_state(load_locale);
    let api_ctx = use_memo(|_| ApiCtx::new(api_base_url()), ());
    let bundle = {
        let locale = *locale;
        use_memo(move |_| TranslationBundle::new(locale), locale)
    };

    let create_list_open = use_state(|| false);
    let add_to_list = use_state(|| None as Option<(i64, MediaType)>);
    let wizard = use_state(|| None as Option<(i64, String)>);

    {
        let theme = *theme;
        use_effect_with_deps(
            move |_| {
                apply_theme(theme);
                set_storage(THEME_KEY, theme.as_str());
                || ()
            },
            theme,
        );
    }
    {
        let density = *density;
        use_effect_with_deps(
            move |_| {
                set_storage(DENSITY_KEY, density.as_str());
                || ()
            },
            density,
        );
    }
    {
        let locale = *locale;
        use_effect_with_deps(
            move |_| {
                set_storage(LOCALE_KEY, locale.as_lang_tag());
                || ()
            },
            locale,
        );
    }
    {
        // Session bootstrap: current user plus the CSRF token every
        // mutating call must echo.
        let api_ctx = (*api_ctx).clone();
        use_effect_with_deps(
            move |_| {
                app_dispatch().reduce_mut(|store| store.session.loading = true);
                let client = api_ctx.client.clone();
                yew::platform::spawn_local(async move {
                    match client.get_json::<SessionInfo>("/api/v1/auth/session").await {
                        Ok(session) => {
                            client.set_csrf_token(&session.csrf_token);
                            app_dispatch().reduce_mut(|store| {
                                store.session.user = Some(Rc::new(session.user));
                                store.session.error = None;
                                store.session.loading = false;
                            });
                        }
                        Err(err) => {
                            app_dispatch().reduce_mut(|store| {
                                store.session.error = Some(err.to_string());
                                store.session.loading = false;
                            });
                        }
                    }
                });
                || ()
            },
            (),
        );
    }
    {
        // Shell-level modals open through the typed command bus, never
        // through ambient window events.
        let create_list_open = create_list_open.clone();
        let add_to_list = add_to_list.clone();
        let wizard = wizard.clone();
        use_effect_with_deps(
            move |_| {
                let guard = commands::subscribe(Callback::from(move |command| match command {
                    UiCommand::OpenCreateListModal => create_list_open.set(true),
                    UiCommand::OpenAddToList { tmdb_id, media_type } => {
                        add_to_list.set(Some((tmdb_id, media_type)));
                    }
                    UiCommand::OpenRequestWizard { tmdb_id, title } => {
                        wizard.set(Some((tmdb_id, title)));
                    }
                }));
                move || drop(guard)
            },
            (),
        );
    }

    let on_theme_toggle = {
        let theme = theme.clone();
        Callback::from(move |()| theme.set(theme.toggled()))
    };
    let on_density = {
        let density = density.clone();
        Callback::from(move |value| density.set(value))
    };
    let on_locale = {
        let locale = locale.clone();
        Callback::from(move |value| locale.set(value))
    };

    html! {
        <BrowserRouter>
            <ContextProvider<TranslationBundle> context={*bundle}>
                <ContextProvider<ApiCtx> context={(*api_ctx).clone()}>
                    <AppShell
                        theme={*theme}
                        density={*density}
                        locale={*locale}
                        {on_theme_toggle}
                        {on_density}
                        {on_locale}
                    >
                        <Switch<Route> render={switch} />
                    </AppShell>
                    <CreateListModal
                        open={*create_list_open}
                        on_close={{
                            let create_list_open = create_list_open.clone();
                            Callback::from(move |()| create_list_open.set(false))
                        }}
                    />
                    {match (*add_to_list).clone() {
                        Some((tmdb_id, media_type)) => html! {
                            <AddToListModal
                                open={true}
                                {tmdb_id}
                                {media_type}
                                on_close={{
                                    let add_to_list = add_to_list.clone();
                                    Callback::from(move |()| add_to_list.set(None))
                                }}
                            />
                        },
                        None => html! {},
                    }}
                    {match (*wizard).clone() {
                        Some((tmdb_id, title)) => html! {
                            <RequestWizardModal
                                open={true}
                                {tmdb_id}
                                {title}
                                on_close={{
                                    let wizard = wizard.clone();
                                    Callback::from(move |()| wizard.set(None))
                                }}
                            />
                        },
                        None => html! {},
                    }}
                    <ToastHost />
                </ContextProvider<ApiCtx>>
            </ContextProvider<TranslationBundle>>
        </BrowserRouter>
    }
}

/// Mount the application onto the document body.
pub fn run_app() {
    console_error_panic_hook::set_once();
    yew::Renderer::<VidarrApp>::new().render();
}
