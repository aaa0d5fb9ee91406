//! Poster card for media grids.

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct PosterCardProps {
    pub title: AttrValue,
    #[prop_or_default]
    pub poster_url: Option<AttrValue>,
    #[prop_or_default]
    pub badge: Html,
    #[prop_or_default]
    pub footer: Option<AttrValue>,
}

#[function_component(PosterCard)]
pub(crate) fn poster_card(props: &PosterCardProps) -> Html {
    html! {
        <div class="card bg-base-100 shadow poster-card">
            <figure class="poster-figure">
                {match props.poster_url.clone() {
                    Some(url) => html! { <img src={url} alt={props.title.clone()} loading="lazy" /> },
                    None => html! { <div class="poster-placeholder">{props.title.chars().next().unwrap_or('?')}</div> },
                }}
            </figure>
            <div class="card-body gap-1 p-3">
                <div class="flex items-center justify-between gap-2">
                    <p class="truncate text-sm font-medium" title={props.title.clone()}>
                        {props.title.clone()}
                    </p>
                    {props.badge.clone()}
                </div>
                {props.footer.clone().map(|footer| html! {
                    <p class="text-base-content/60 text-xs">{footer}</p>
                }).unwrap_or_default()}
            </div>
        </div>
    }
}
