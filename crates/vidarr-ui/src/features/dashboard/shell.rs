//! Dashboard page composing the independent panels.
//!
//! Panels share nothing: each owns its fetch key, refresh cadence, and
//! pagination, so a failure in one cannot corrupt another.

use crate::features::dashboard::achievements::AchievementsPanel;
use crate::features::dashboard::continue_watching::ContinueWatchingPanel;
use crate::features::dashboard::friends_activity::FriendsActivityPanel;
use crate::features::dashboard::recent_requests::RecentRequestsPanel;
use crate::features::dashboard::recently_added::RecentlyAddedPanel;
use crate::features::dashboard::recommendations::RecommendationsPanel;
use crate::features::dashboard::service_health::ServiceHealthPanel;
use crate::features::dashboard::upcoming::UpcomingPanel;
use crate::features::dashboard::watch_stats::WatchStatsPanel;
use yew::prelude::*;

#[function_component(DashboardView)]
pub(crate) fn dashboard_view() -> Html {
    html! {
        <div class="dashboard grid gap-4 xl:grid-cols-3">
            <div class="flex flex-col gap-4 xl:col-span-2">
                <RecentRequestsPanel />
                <RecentlyAddedPanel />
                <RecommendationsPanel />
            </div>
            <div class="flex flex-col gap-4">
                <ServiceHealthPanel />
                <ContinueWatchingPanel />
                <UpcomingPanel />
                <WatchStatsPanel />
                <AchievementsPanel />
                <FriendsActivityPanel />
            </div>
        </div>
    }
}
