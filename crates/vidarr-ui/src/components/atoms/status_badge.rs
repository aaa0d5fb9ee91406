//! Status badge for request status strings.
//!
//! Rendering routes through the shared classification, so badges can never
//! disagree with the stat tiles or filter predicates.

use crate::features::requests::logic::classify_status;
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct StatusBadgeProps {
    pub status: AttrValue,
}

#[function_component(StatusBadge)]
pub(crate) fn status_badge(props: &StatusBadgeProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let bucket = classify_status(&props.status);
    html! {
        <span class={classes!(bucket.badge_class(), "badge-sm")}>
            {bundle.text(bucket.label_key())}
        </span>
    }
}
