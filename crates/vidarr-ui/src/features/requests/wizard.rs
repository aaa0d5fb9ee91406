//! Episode-request wizard state.
//!
//! # Design
//! - The step is a tagged union with one transition function, so states
//!   like "loading and showing results at once" cannot be represented.
//! - Season episodes live in an arena keyed by season number
//!   (`NotLoaded | Loading | Loaded`), filled lazily on expand and eagerly
//!   by the prefetch pool; a season is fetched once per modal session.
//! - Selection is a per-season ordered set; episodes that are already
//!   available, requested, or downloading can never enter it.

use crate::core::store::ToastKind;
use crate::i18n::{TranslationBundle, with_count};
use crate::services::error::ApiError;
use std::collections::{BTreeMap, BTreeSet};
use vidarr_api_models::{
    BulkEpisodeRequest, BulkRequestResponse, Episode, MonitoringOption, Season, SeasonSelection,
};

/// Pages of the informational tour shown before the season list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TourPage {
    /// Media-type overview page.
    Type,
    /// Rating overview page.
    Rating,
    /// Genre overview page.
    Genre,
}

/// Wizard step as an explicit tagged union.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WizardStep {
    /// Modal closed / nothing started.
    Idle,
    /// Informational tour page.
    Tour(TourPage),
    /// Season list fetch outstanding.
    LoadingSeasons,
    /// Season list ready for selection.
    SeasonList,
}

/// Events driving the wizard step machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WizardEvent {
    /// The modal was opened.
    Open,
    /// Advance the tour one page.
    TourNext,
    /// Skip the remainder of the tour.
    TourSkip,
    /// The season list arrived.
    SeasonsLoaded,
    /// The season list fetch failed.
    SeasonsFailed,
}

/// The wizard's single transition function. Unknown combinations leave the
/// step unchanged, so no event sequence can reach an impossible state.
#[must_use]
pub const fn advance(step: WizardStep, event: WizardEvent) -> WizardStep {
    match (step, event) {
        (WizardStep::Idle, WizardEvent::Open) => WizardStep::Tour(TourPage::Type),
        (WizardStep::Tour(TourPage::Type), WizardEvent::TourNext) => {
            WizardStep::Tour(TourPage::Rating)
        }
        (WizardStep::Tour(TourPage::Rating), WizardEvent::TourNext) => {
            WizardStep::Tour(TourPage::Genre)
        }
        (WizardStep::Tour(TourPage::Genre), WizardEvent::TourNext)
        | (WizardStep::Tour(_), WizardEvent::TourSkip) => WizardStep::LoadingSeasons,
        (WizardStep::LoadingSeasons, WizardEvent::SeasonsLoaded) => WizardStep::SeasonList,
        (WizardStep::LoadingSeasons, WizardEvent::SeasonsFailed) => WizardStep::Idle,
        (step, _) => step,
    }
}

/// Load state for one season's episode list.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum SeasonSlot {
    /// Nothing fetched yet.
    #[default]
    NotLoaded,
    /// A fetch is outstanding.
    Loading,
    /// Episodes are cached for the rest of the modal session.
    Loaded(Vec<Episode>),
}

/// Arena of season slots keyed by season number.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeasonArena {
    slots: BTreeMap<u32, SeasonSlot>,
}

impl SeasonArena {
    /// Seed the arena with one `NotLoaded` slot per season.
    #[must_use]
    pub fn new(seasons: &[Season]) -> Self {
        Self {
            slots: seasons
                .iter()
                .map(|season| (season.season_number, SeasonSlot::NotLoaded))
                .collect(),
        }
    }

    /// Season numbers in ascending order.
    pub fn season_numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.slots.keys().copied()
    }

    /// Current slot for `season`.
    #[must_use]
    pub fn slot(&self, season: u32) -> &SeasonSlot {
        static NOT_LOADED: SeasonSlot = SeasonSlot::NotLoaded;
        self.slots.get(&season).unwrap_or(&NOT_LOADED)
    }

    /// Mark `season` as loading. Returns `false` when a fetch already
    /// started or finished, so a season is only ever fetched once.
    pub fn begin_load(&mut self, season: u32) -> bool {
        match self.slots.get(&season) {
            Some(SeasonSlot::NotLoaded) => {
                self.slots.insert(season, SeasonSlot::Loading);
                true
            }
            _ => false,
        }
    }

    /// Store fetched episodes for `season`.
    pub fn finish_load(&mut self, season: u32, episodes: Vec<Episode>) {
        self.slots.insert(season, SeasonSlot::Loaded(episodes));
    }

    /// Put a failed season back to `NotLoaded` so it can be retried.
    pub fn reset_slot(&mut self, season: u32) {
        self.slots.insert(season, SeasonSlot::NotLoaded);
    }

    /// Loaded episodes for `season`, when present.
    #[must_use]
    pub fn episodes(&self, season: u32) -> Option<&[Episode]> {
        match self.slots.get(&season) {
            Some(SeasonSlot::Loaded(episodes)) => Some(episodes),
            _ => None,
        }
    }
}

/// Whether an episode may be toggled into the selection.
#[must_use]
pub const fn is_selectable(episode: &Episode) -> bool {
    !(episode.available || episode.requested || episode.downloading)
}

/// Per-season selection of episode numbers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    by_season: BTreeMap<u32, BTreeSet<u32>>,
}

impl Selection {
    /// Toggle one episode. A no-op for episodes that are unavailable for
    /// selection, so they can never enter the checked set.
    pub fn toggle(&mut self, season: u32, episodes: &[Episode], episode_number: u32) {
        let Some(episode) = episodes
            .iter()
            .find(|episode| episode.episode_number == episode_number)
        else {
            return;
        };
        if !is_selectable(episode) {
            return;
        }
        let set = self.by_season.entry(season).or_default();
        if !set.remove(&episode_number) {
            set.insert(episode_number);
        }
        if set.is_empty() {
            self.by_season.remove(&season);
        }
    }

    /// Toggle a whole season between "all selectable episodes checked" and
    /// "none checked". Implemented as the complement within the selectable
    /// set, which makes a toggle pair restore the starting selection; the
    /// selectable set is recomputed on every call because availability can
    /// change between loads.
    pub fn toggle_season(&mut self, season: u32, episodes: &[Episode]) {
        let selectable: BTreeSet<u32> = episodes
            .iter()
            .filter(|episode| is_selectable(episode))
            .map(|episode| episode.episode_number)
            .collect();
        if selectable.is_empty() {
            return;
        }
        let current = self.by_season.remove(&season).unwrap_or_default();
        let next: BTreeSet<u32> = selectable.difference(&current).copied().collect();
        if !next.is_empty() {
            self.by_season.insert(season, next);
        }
    }

    /// Whether `episode_number` of `season` is checked.
    #[must_use]
    pub fn is_selected(&self, season: u32, episode_number: u32) -> bool {
        self.by_season
            .get(&season)
            .is_some_and(|set| set.contains(&episode_number))
    }

    /// Checked episodes in `season`.
    #[must_use]
    pub fn season_count(&self, season: u32) -> usize {
        self.by_season.get(&season).map_or(0, BTreeSet::len)
    }

    /// Total checked episodes.
    #[must_use]
    pub fn total(&self) -> usize {
        self.by_season.values().map(BTreeSet::len).sum()
    }

    /// Whether nothing is checked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_season.is_empty()
    }

    /// Group the selection into the per-season wire manifest.
    #[must_use]
    pub fn manifest(&self) -> Vec<SeasonSelection> {
        self.by_season
            .iter()
            .map(|(season, episodes)| SeasonSelection {
                season_number: *season,
                episodes: episodes.iter().copied().collect(),
            })
            .collect()
    }
}

/// Complete wizard state for one open-modal session. Dropped on close, so
/// nothing here outlives the modal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WizardState {
    /// Current step.
    pub step: WizardStep,
    /// Season slot arena.
    pub arena: SeasonArena,
    /// Checked episodes.
    pub selection: Selection,
    /// Expanded season panels.
    pub expanded: BTreeSet<u32>,
    /// Monitoring policy sent with the bulk request.
    pub monitoring: MonitoringOption,
    /// Optional quality profile override.
    pub quality_profile_id: Option<i64>,
    /// True while the bulk request is in flight; blocks closing.
    pub submitting: bool,
}

impl Default for WizardStep {
    fn default() -> Self {
        Self::Idle
    }
}

impl WizardState {
    /// Fresh state for a newly opened modal.
    #[must_use]
    pub fn opened() -> Self {
        Self {
            step: advance(WizardStep::Idle, WizardEvent::Open),
            monitoring: MonitoringOption::None,
            ..Self::default()
        }
    }

    /// Feed an event through the step machine.
    pub fn apply(&mut self, event: WizardEvent) {
        self.step = advance(self.step, event);
    }

    /// Expand or collapse a season panel; returns `true` when the season is
    /// now expanded (the caller then ensures its episodes are loading).
    pub fn toggle_expanded(&mut self, season: u32) -> bool {
        if self.expanded.remove(&season) {
            false
        } else {
            self.expanded.insert(season);
            true
        }
    }

    /// Closing is blocked while a submission is in flight so a partially
    /// applied request is never abandoned.
    #[must_use]
    pub const fn can_close(&self) -> bool {
        !self.submitting
    }

    /// Build the bulk request body, or `None` when nothing is checked.
    #[must_use]
    pub fn request_body(&self, tmdb_id: i64) -> Option<BulkEpisodeRequest> {
        if self.selection.is_empty() {
            return None;
        }
        Some(BulkEpisodeRequest {
            tmdb_id,
            seasons: self.selection.manifest(),
            monitoring: self.monitoring,
            quality_profile_id: self.quality_profile_id,
        })
    }
}

/// Monitoring choices offered by the wizard: option, select-control value,
/// label key.
pub const MONITORING_CHOICES: [(MonitoringOption, &str, &str); 8] = [
    (MonitoringOption::All, "all", "monitoring.all"),
    (MonitoringOption::Future, "future", "monitoring.future"),
    (MonitoringOption::Missing, "missing", "monitoring.missing"),
    (MonitoringOption::Existing, "existing", "monitoring.existing"),
    (MonitoringOption::Pilot, "pilot", "monitoring.pilot"),
    (MonitoringOption::FirstSeason, "firstSeason", "monitoring.first_season"),
    (MonitoringOption::LatestSeason, "latestSeason", "monitoring.latest_season"),
    (MonitoringOption::None, "none", "monitoring.none"),
];

/// Parse a select-control value back into a monitoring option.
#[must_use]
pub fn monitoring_from_value(value: &str) -> MonitoringOption {
    MONITORING_CHOICES
        .iter()
        .find(|(_, control, _)| *control == value)
        .map_or(MonitoringOption::None, |(option, _, _)| *option)
}

/// Select-control value for a monitoring option.
#[must_use]
pub fn monitoring_value(option: MonitoringOption) -> &'static str {
    MONITORING_CHOICES
        .iter()
        .find(|(choice, _, _)| *choice == option)
        .map_or("none", |(_, control, _)| control)
}

/// Toast plan for a finished submission.
///
/// Partial success is deliberately two messages, a success toast with the
/// requested count plus a separate info toast for the skipped episodes,
/// never one combined string.
#[must_use]
pub fn submit_outcome(
    result: &Result<BulkRequestResponse, ApiError>,
    bundle: &TranslationBundle,
) -> Vec<(ToastKind, String)> {
    match result {
        Ok(response) => {
            let mut toasts = Vec::new();
            if response.count > 0 {
                toasts.push((
                    ToastKind::Success,
                    with_count(&bundle.text("toast.bulk_success"), response.count as usize),
                ));
            }
            if !response.skipped.is_empty() {
                toasts.push((
                    ToastKind::Info,
                    with_count(&bundle.text("toast.bulk_skipped"), response.skipped.len()),
                ));
            }
            if toasts.is_empty() {
                toasts.push((ToastKind::Info, bundle.text("toast.bulk_nothing")));
            }
            toasts
        }
        Err(error) if error.is_already_applied() => {
            vec![(ToastKind::Info, error.user_message(bundle))]
        }
        Err(error) => vec![(ToastKind::Error, error.user_message(bundle))],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{LocaleCode, TranslationBundle};
    use vidarr_api_models::EpisodeRef;

    fn episode(number: u32, available: bool, requested: bool, downloading: bool) -> Episode {
        Episode {
            episode_number: number,
            name: None,
            available,
            requested,
            downloading,
        }
    }

    fn open_season() -> Vec<Episode> {
        vec![
            episode(1, true, false, false),
            episode(2, false, true, false),
            episode(3, false, false, true),
            episode(4, false, false, false),
            episode(5, false, false, false),
        ]
    }

    #[test]
    fn transition_function_walks_the_tour_and_nothing_else() {
        let mut step = WizardStep::Idle;
        step = advance(step, WizardEvent::Open);
        assert_eq!(step, WizardStep::Tour(TourPage::Type));
        step = advance(step, WizardEvent::TourNext);
        step = advance(step, WizardEvent::TourNext);
        assert_eq!(step, WizardStep::Tour(TourPage::Genre));
        step = advance(step, WizardEvent::TourNext);
        assert_eq!(step, WizardStep::LoadingSeasons);
        step = advance(step, WizardEvent::SeasonsLoaded);
        assert_eq!(step, WizardStep::SeasonList);

        // Unknown combinations are inert.
        assert_eq!(advance(step, WizardEvent::SeasonsLoaded), step);
        assert_eq!(advance(WizardStep::Idle, WizardEvent::TourNext), WizardStep::Idle);
        assert_eq!(
            advance(WizardStep::Tour(TourPage::Rating), WizardEvent::TourSkip),
            WizardStep::LoadingSeasons
        );
    }

    #[test]
    fn locked_episodes_never_enter_the_selection() {
        let episodes = open_season();
        let mut selection = Selection::default();
        for locked in [1, 2, 3] {
            selection.toggle(1, &episodes, locked);
            assert!(!selection.is_selected(1, locked), "episode {locked}");
        }
        selection.toggle(1, &episodes, 4);
        assert!(selection.is_selected(1, 4));
        assert_eq!(selection.total(), 1);
    }

    #[test]
    fn select_all_toggles_between_all_and_none() {
        let episodes = open_season();
        let mut selection = Selection::default();
        selection.toggle_season(1, &episodes);
        assert!(selection.is_selected(1, 4));
        assert!(selection.is_selected(1, 5));
        assert!(!selection.is_selected(1, 1), "locked episode stays out");

        selection.toggle_season(1, &episodes);
        assert_eq!(selection.season_count(1), 0);
    }

    #[test]
    fn select_all_is_idempotent_in_pairs() {
        // With an unchanged selectable set, a toggle pair restores the
        // starting selection even when it was partial.
        let episodes = open_season();
        let mut selection = Selection::default();
        selection.toggle(1, &episodes, 4);
        let before = selection.clone();

        selection.toggle_season(1, &episodes);
        selection.toggle_season(1, &episodes);
        assert_eq!(selection, before);
    }

    #[test]
    fn select_all_recomputes_the_selectable_set() {
        let mut episodes = open_season();
        let mut selection = Selection::default();
        selection.toggle_season(1, &episodes);
        assert_eq!(selection.season_count(1), 2);

        // Episode 4 became available between loads; the next toggle must not
        // keep it checked.
        episodes[3].available = true;
        selection.toggle_season(1, &episodes);
        assert!(!selection.is_selected(1, 4));
        selection.toggle_season(1, &episodes);
        assert!(!selection.is_selected(1, 4));
        assert!(selection.is_selected(1, 5));
    }

    #[test]
    fn manifest_groups_by_season_in_order() {
        let season_two = vec![episode(1, false, false, false), episode(2, false, false, false)];
        let season_one = vec![episode(7, false, false, false)];
        let mut selection = Selection::default();
        selection.toggle(2, &season_two, 2);
        selection.toggle(2, &season_two, 1);
        selection.toggle(1, &season_one, 7);
        let manifest = selection.manifest();
        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest[0].season_number, 1);
        assert_eq!(manifest[0].episodes, vec![7]);
        assert_eq!(manifest[1].episodes, vec![1, 2]);
    }

    #[test]
    fn arena_fetches_each_season_once() {
        let seasons = vec![
            Season { season_number: 1, episode_count: 10 },
            Season { season_number: 2, episode_count: 8 },
        ];
        let mut arena = SeasonArena::new(&seasons);
        assert!(arena.begin_load(1));
        assert!(!arena.begin_load(1), "loading seasons are not re-fetched");
        arena.finish_load(1, open_season());
        assert!(!arena.begin_load(1), "loaded seasons are not re-fetched");
        assert_eq!(arena.episodes(1).map(<[Episode]>::len), Some(5));
        assert_eq!(arena.episodes(2), None);

        arena.begin_load(2);
        arena.reset_slot(2);
        assert!(arena.begin_load(2), "reset seasons may retry");
    }

    #[test]
    fn partial_success_produces_two_distinct_toasts() {
        let bundle = TranslationBundle::new(LocaleCode::En);
        let response = BulkRequestResponse {
            count: 3,
            skipped: vec![
                EpisodeRef { season_number: 1, episode_number: 1 },
                EpisodeRef { season_number: 1, episode_number: 2 },
            ],
        };
        let toasts = submit_outcome(&Ok(response), &bundle);
        assert_eq!(toasts.len(), 2);
        assert_eq!(toasts[0].0, ToastKind::Success);
        assert!(toasts[0].1.contains('3'), "success toast mentions the count");
        assert_eq!(toasts[1].0, ToastKind::Info);
        assert!(toasts[1].1.contains('2'), "info toast mentions the skipped count");
    }

    #[test]
    fn conflict_is_a_soft_success_notice() {
        let bundle = TranslationBundle::new(LocaleCode::En);
        let error = ApiError::Conflict {
            code: Some("already_requested".to_string()),
        };
        let toasts = submit_outcome(&Err(error), &bundle);
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].0, ToastKind::Info);
        assert_eq!(toasts[0].1, bundle.text("error.already_requested"));
    }

    #[test]
    fn missing_episodes_surface_as_a_distinct_error() {
        let bundle = TranslationBundle::new(LocaleCode::En);
        let error = ApiError::Unprocessable {
            code: Some("missing_episodes".to_string()),
            missing: vec![EpisodeRef { season_number: 4, episode_number: 2 }],
        };
        let toasts = submit_outcome(&Err(error), &bundle);
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].0, ToastKind::Error);
        assert_eq!(toasts[0].1, bundle.text("error.missing_episodes"));
    }

    #[test]
    fn monitoring_control_values_round_trip() {
        for (option, control, _) in MONITORING_CHOICES {
            assert_eq!(monitoring_from_value(control), option);
            assert_eq!(monitoring_value(option), control);
        }
        assert_eq!(monitoring_from_value("bogus"), MonitoringOption::None);
    }

    #[test]
    fn close_is_blocked_while_submitting() {
        let mut state = WizardState::opened();
        assert!(state.can_close());
        state.submitting = true;
        assert!(!state.can_close());
    }

    #[test]
    fn request_body_requires_a_selection() {
        let mut state = WizardState::opened();
        assert_eq!(state.request_body(1399), None);
        let episodes = vec![episode(1, false, false, false)];
        state.arena.finish_load(1, episodes.clone());
        state.selection.toggle(1, &episodes, 1);
        state.monitoring = MonitoringOption::Future;
        let body = state.request_body(1399).expect("body builds");
        assert_eq!(body.tmdb_id, 1399);
        assert_eq!(body.monitoring, MonitoringOption::Future);
        assert_eq!(body.seasons.len(), 1);
    }
}
