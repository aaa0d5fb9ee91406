//! Route table for the portal pages.

use yew_router::prelude::*;

#[derive(Clone, Debug, PartialEq, Routable)]
pub(crate) enum Route {
    #[at("/")]
    Dashboard,
    #[at("/users/:username")]
    Profile { username: String },
    #[at("/admin")]
    Admin,
    #[not_found]
    #[at("/404")]
    NotFound,
}
