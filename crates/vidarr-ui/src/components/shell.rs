//! App shell: navbar, preference controls, page container.

use crate::app::preferences::{Density, ThemeMode};
use crate::app::routes::Route;
use crate::core::commands::{self, UiCommand};
use crate::core::store::AppStore;
use crate::i18n::{DEFAULT_LOCALE, LocaleCode, TranslationBundle};
use vidarr_api_models::permissions;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

#[derive(Properties, PartialEq)]
pub(crate) struct AppShellProps {
    pub theme: ThemeMode,
    pub density: Density,
    pub locale: LocaleCode,
    pub on_theme_toggle: Callback<()>,
    pub on_density: Callback<Density>,
    pub on_locale: Callback<LocaleCode>,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(AppShell)]
pub(crate) fn app_shell(props: &AppShellProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key);
    let user = use_selector(|store: &AppStore| store.session.user.clone());

    let on_theme = {
        let on_theme_toggle = props.on_theme_toggle.clone();
        Callback::from(move |_| on_theme_toggle.emit(()))
    };
    let on_density = {
        let on_density = props.on_density.clone();
        Callback::from(move |event: Event| {
            if let Some(select) = event.target_dyn_into::<web_sys::HtmlSelectElement>() {
                let density = match select.value().as_str() {
                    "compact" => Density::Compact,
                    "comfy" => Density::Comfy,
                    _ => Density::Normal,
                };
                on_density.emit(density);
            }
        })
    };
    let on_locale = {
        let on_locale = props.on_locale.clone();
        Callback::from(move |event: Event| {
            if let Some(select) = event.target_dyn_into::<web_sys::HtmlSelectElement>() {
                if let Some(locale) = LocaleCode::from_lang_tag(&select.value()) {
                    on_locale.emit(locale);
                }
            }
        })
    };
    let on_create_list = Callback::from(|_| {
        commands::publish(&UiCommand::OpenCreateListModal);
    });

    let is_admin = user
        .as_ref()
        .as_ref()
        .is_some_and(|user| permissions::has(user.permissions, permissions::ADMIN));

    html! {
        <div class={classes!("app-shell", format!("density-{}", props.density.as_str()))}>
            <header class="navbar bg-base-100 shadow-sm">
                <div class="flex-1 gap-2">
                    <Link<Route> to={Route::Dashboard} classes="btn btn-ghost text-lg font-semibold">
                        {"Vidarr"}
                    </Link<Route>>
                    {if is_admin {
                        html! {
                            <Link<Route> to={Route::Admin} classes="btn btn-ghost btn-sm">
                                {t("nav.admin")}
                            </Link<Route>>
                        }
                    } else { html! {} }}
                </div>
                <div class="flex items-center gap-2">
                    <button class="btn btn-ghost btn-sm" onclick={on_create_list}>
                        {t("lists.create")}
                    </button>
                    <select class="select select-sm" onchange={on_density} value={props.density.as_str()}>
                        {for Density::all().iter().map(|density| html! {
                            <option value={density.as_str()} selected={*density == props.density}>
                                {t(&format!("density.{}", density.as_str()))}
                            </option>
                        })}
                    </select>
                    <select class="select select-sm" onchange={on_locale} value={props.locale.as_lang_tag()}>
                        {for LocaleCode::all().iter().map(|locale| html! {
                            <option value={locale.as_lang_tag()} selected={*locale == props.locale}>
                                {locale.label()}
                            </option>
                        })}
                    </select>
                    <button class="btn btn-ghost btn-sm" onclick={on_theme} title={t("nav.theme")}>
                        {match props.theme {
                            ThemeMode::Dark => "☾",
                            ThemeMode::Light => "☀",
                        }}
                    </button>
                    {match user.as_ref().as_ref() {
                        Some(user) => html! {
                            <Link<Route>
                                to={Route::Profile { username: user.username.clone() }}
                                classes="btn btn-ghost btn-sm"
                            >
                                {user.username.clone()}
                            </Link<Route>>
                        },
                        None => html! {},
                    }}
                </div>
            </header>
            <main class="page-container p-4">
                { for props.children.iter() }
            </main>
        </div>
    }
}
