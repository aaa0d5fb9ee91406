//! Backing-service health panel, polled more aggressively than the rest.

use crate::core::fetch::{FetchOptions, use_fetch};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use vidarr_api_models::ServiceStatus;
use yew::prelude::*;

#[function_component(ServiceHealthPanel)]
pub(crate) fn service_health_panel() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key);
    let services = use_fetch::<Vec<ServiceStatus>>(
        Some("/api/v1/status/services".to_string()),
        FetchOptions {
            refresh_interval_ms: 15_000,
            revalidate_on_focus: true,
        },
    );

    let rows: &[ServiceStatus] = services.data.as_deref().map_or(&[], Vec::as_slice);
    html! {
        <section class="card bg-base-100 shadow">
            <div class="card-body gap-2">
                <h3 class="card-title text-base">{t("dashboard.service_health")}</h3>
                <ul class="flex flex-col gap-1">
                    {for rows.iter().map(|service| html! {
                        <li class="flex items-center justify-between gap-2 text-sm">
                            <span class="flex items-center gap-2">
                                <span class={classes!(
                                    "status-dot",
                                    if service.ok { "bg-success" } else { "bg-error" }
                                )}></span>
                                {service.name.clone()}
                            </span>
                            <span class="text-base-content/60 text-xs">
                                {service.message.clone().unwrap_or_else(|| {
                                    service.latency_ms.map_or_else(
                                        || "—".to_string(),
                                        |latency| format!("{latency} ms"),
                                    )
                                })}
                            </span>
                        </li>
                    })}
                </ul>
                {if let Some(error) = services.error.as_ref() {
                    html! { <p class="text-error text-xs">{error.clone()}</p> }
                } else { html! {} }}
            </div>
        </section>
    }
}
