//! Explicit application state and its transition function.
//!
//! Every user input and every worker result is expressed as an [`Action`]
//! and applied with [`AppState::reduce`]. The reducer performs no I/O; when
//! a transition needs the network it returns an [`Effect`] which the caller
//! hands to [`crate::core::worker`]. This keeps every transition testable
//! without threads or sockets.
//!
//! Feed fetches and place lookups are tagged with a [`RequestId`] from a
//! per-operation monotonic sequence. A response is applied only if its id is
//! still the latest issued for that operation, so an out-of-order completion
//! can never overwrite newer data.

use std::time::Duration;

use crate::core::event_store::EventStore;
use crate::core::feed::TimeWindow;
use crate::core::filter::{self, FilterCriteria, SearchArea};
use crate::core::quake_record::{Coordinate, QuakeRecord};
use crate::core::view::{self, Camera, ViewMode};
use crate::util::error::QuakeViewError;

/// Identifier of one asynchronous request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

/// Monotonic request counters, one per operation class.
#[derive(Debug, Clone, Default)]
pub struct RequestSeq {
    feed: u64,
    geocode: u64,
}

impl RequestSeq {
    pub fn next_feed(&mut self) -> RequestId {
        self.feed += 1;
        RequestId(self.feed)
    }

    pub fn next_geocode(&mut self) -> RequestId {
        self.geocode += 1;
        RequestId(self.geocode)
    }

    pub fn is_current_feed(&self, id: RequestId) -> bool {
        id.0 == self.feed
    }

    pub fn is_current_geocode(&self, id: RequestId) -> bool {
        id.0 == self.geocode
    }
}

/// The event currently opened in the detail window, if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Selection {
    #[default]
    None,
    Selected(QuakeRecord),
}

impl Selection {
    pub fn event(&self) -> Option<&QuakeRecord> {
        match self {
            Self::None => None,
            Self::Selected(event) => Some(event),
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.event().is_some_and(|e| e.id == id)
    }
}

/// A failure surfaced to the user. Prior state is always preserved.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// The feed could not be fetched or decoded.
    FetchFailed { window: TimeWindow, message: String },
    /// The geocoder had no match for the query.
    LocationNotFound { query: String },
    /// The geocoder could not be reached or returned garbage.
    LookupFailed { query: String, message: String },
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FetchFailed { window, message } => {
                write!(f, "Could not load {}: {message}", window.label().to_lowercase())
            }
            Self::LocationNotFound { query } => write!(f, "No place found for \"{query}\""),
            Self::LookupFailed { query, message } => {
                write!(f, "Search for \"{query}\" failed: {message}")
            }
        }
    }
}

/// Inputs to the reducer: user intents and worker results.
#[derive(Debug)]
pub enum Action {
    SelectTimeWindow(TimeWindow),
    Refresh,
    FeedLoaded {
        request: RequestId,
        window: TimeWindow,
        result: Result<Vec<QuakeRecord>, QuakeViewError>,
        elapsed: Duration,
    },
    SetMinMagnitude(f64),
    EditSearchText(String),
    SubmitSearch,
    LocationResolved {
        request: RequestId,
        query: String,
        result: Result<Coordinate, QuakeViewError>,
    },
    ClearLocation,
    /// Drop the search area and the magnitude threshold together.
    ResetFilters,
    ActivateMarker(QuakeRecord),
    DismissDetails,
    ToggleViewMode,
    DismissNotice,
}

/// Network work requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchFeed { request: RequestId, window: TimeWindow },
    Geocode { request: RequestId, query: String },
}

/// All state the UI renders from.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Window selected by the user (may differ from the installed one while loading).
    pub time_window: TimeWindow,
    pub store: EventStore,
    pub criteria: FilterCriteria,
    /// Text in the search box; only used when a search is submitted.
    pub search_text: String,
    /// Indices into `store.events()`; always `filter::visible_indices(store, criteria)`.
    visible: Vec<usize>,
    pub selection: Selection,
    pub view_mode: ViewMode,
    requests: RequestSeq,
    /// A feed request is in flight.
    pub loading: bool,
    /// A place lookup is in flight.
    pub resolving: bool,
    pub notice: Option<Notice>,
    /// Duration of the last successful fetch.
    pub last_fetch_elapsed: Option<Duration>,
}

impl AppState {
    /// State restored from persisted preferences. Call [`AppState::reduce`]
    /// with [`Action::Refresh`] to issue the first fetch.
    pub fn with_preferences(window: TimeWindow, min_magnitude: f64, view_mode: ViewMode) -> Self {
        Self {
            time_window: window,
            criteria: FilterCriteria {
                min_magnitude: min_magnitude.max(0.0),
                location: None,
            },
            view_mode,
            ..Self::default()
        }
    }

    /// Apply one action. Returns the network work it requires, if any.
    pub fn reduce(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::SelectTimeWindow(window) => {
                self.time_window = window;
                Some(self.begin_fetch())
            }
            Action::Refresh => Some(self.begin_fetch()),
            Action::FeedLoaded {
                request,
                window,
                result,
                elapsed,
            } => {
                self.finish_fetch(request, window, result, elapsed);
                None
            }
            Action::SetMinMagnitude(m) => {
                self.criteria.min_magnitude = m.max(0.0);
                self.recompute();
                None
            }
            Action::EditSearchText(text) => {
                self.search_text = text;
                None
            }
            Action::SubmitSearch => {
                let query = self.search_text.trim();
                if query.is_empty() {
                    return None;
                }
                let query = query.to_owned();
                let request = self.requests.next_geocode();
                self.resolving = true;
                tracing::debug!("Geocode request {:?} for \"{}\"", request, query);
                Some(Effect::Geocode { request, query })
            }
            Action::LocationResolved {
                request,
                query,
                result,
            } => {
                self.finish_lookup(request, query, result);
                None
            }
            Action::ClearLocation => {
                self.criteria.clear_location();
                self.recompute();
                None
            }
            Action::ResetFilters => {
                self.criteria.clear();
                self.search_text.clear();
                self.recompute();
                None
            }
            Action::ActivateMarker(event) => {
                self.selection = Selection::Selected(event);
                None
            }
            Action::DismissDetails => {
                self.selection = Selection::None;
                None
            }
            Action::ToggleViewMode => {
                self.view_mode = self.view_mode.toggled();
                None
            }
            Action::DismissNotice => {
                self.notice = None;
                None
            }
        }
    }

    fn begin_fetch(&mut self) -> Effect {
        let request = self.requests.next_feed();
        self.loading = true;
        tracing::debug!("Feed request {:?} for {}", request, self.time_window.feed_id());
        Effect::FetchFeed {
            request,
            window: self.time_window,
        }
    }

    fn finish_fetch(
        &mut self,
        request: RequestId,
        window: TimeWindow,
        result: Result<Vec<QuakeRecord>, QuakeViewError>,
        elapsed: Duration,
    ) {
        if !self.requests.is_current_feed(request) {
            tracing::debug!("Discarding stale feed response {:?} for {}", request, window.feed_id());
            return;
        }
        self.loading = false;

        match result {
            Ok(events) => {
                tracing::info!(
                    "Loaded {} events for {} in {:.2}s",
                    events.len(),
                    window.feed_id(),
                    elapsed.as_secs_f64()
                );
                self.store.install(window, events);
                self.last_fetch_elapsed = Some(elapsed);
                if matches!(self.notice, Some(Notice::FetchFailed { .. })) {
                    self.notice = None;
                }
                self.recompute();
            }
            Err(e) => {
                tracing::warn!("Error fetching {} feed: {}", window.feed_id(), e);
                self.notice = Some(Notice::FetchFailed {
                    window,
                    message: e.to_string(),
                });
            }
        }
    }

    fn finish_lookup(&mut self, request: RequestId, query: String, result: Result<Coordinate, QuakeViewError>) {
        if !self.requests.is_current_geocode(request) {
            tracing::debug!("Discarding stale geocode response {:?} for \"{}\"", request, query);
            return;
        }
        self.resolving = false;

        match result {
            Ok(center) => {
                tracing::info!("Search \"{}\" resolved to {}", query, center);
                self.criteria.location = Some(SearchArea { query, center });
                if matches!(
                    self.notice,
                    Some(Notice::LocationNotFound { .. } | Notice::LookupFailed { .. })
                ) {
                    self.notice = None;
                }
                self.recompute();
            }
            Err(QuakeViewError::LocationNotFound(_)) => {
                tracing::info!("No place found for \"{}\"", query);
                self.notice = Some(Notice::LocationNotFound { query });
            }
            Err(e) => {
                tracing::warn!("Geocoding \"{}\" failed: {}", query, e);
                self.notice = Some(Notice::LookupFailed {
                    query,
                    message: e.to_string(),
                });
            }
        }
    }

    fn recompute(&mut self) {
        self.visible = filter::visible_indices(self.store.events(), &self.criteria);
    }

    /// Indices of the visible subset into [`EventStore::events`].
    pub fn visible_indices(&self) -> &[usize] {
        &self.visible
    }

    /// The visible subset, in feed order.
    pub fn visible_events(&self) -> impl Iterator<Item = &QuakeRecord> + '_ {
        let events = self.store.events();
        self.visible.iter().filter_map(move |&i| events.get(i))
    }

    /// Clone of the visible subset, for export threads.
    pub fn visible_event_list(&self) -> Vec<QuakeRecord> {
        self.visible_events().cloned().collect()
    }

    pub fn camera(&self) -> Camera {
        view::camera(self.view_mode, self.store.events(), &self.visible)
    }

    pub fn selected(&self) -> Option<&QuakeRecord> {
        self.selection.event()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::quake_record::test_support::quake;

    fn loaded(state: &mut AppState, events: Vec<QuakeRecord>) {
        let Some(Effect::FetchFeed { request, window }) = state.reduce(Action::Refresh) else {
            panic!("refresh must fetch");
        };
        state.reduce(Action::FeedLoaded {
            request,
            window,
            result: Ok(events),
            elapsed: Duration::from_millis(10),
        });
    }

    fn visible_ids(state: &AppState) -> Vec<String> {
        state.visible_events().map(|e| e.id.clone()).collect()
    }

    #[test]
    fn test_load_publishes_visible_subset() {
        let mut s = AppState::default();
        loaded(&mut s, vec![quake("a", Some(1.0), 0.0, 0.0), quake("b", Some(3.0), 0.0, 0.0)]);
        assert_eq!(visible_ids(&s), vec!["a", "b"]);
        assert!(!s.loading);
    }

    #[test]
    fn test_select_window_issues_fetch() {
        let mut s = AppState::default();
        let effect = s.reduce(Action::SelectTimeWindow(TimeWindow::PastMonth));
        assert!(matches!(
            effect,
            Some(Effect::FetchFeed { window: TimeWindow::PastMonth, .. })
        ));
        assert!(s.loading);
    }

    #[test]
    fn test_stale_feed_response_is_dropped() {
        let mut s = AppState::default();
        let Some(Effect::FetchFeed { request: first, .. }) =
            s.reduce(Action::SelectTimeWindow(TimeWindow::PastWeek))
        else {
            panic!()
        };
        let Some(Effect::FetchFeed { request: second, .. }) =
            s.reduce(Action::SelectTimeWindow(TimeWindow::PastDay))
        else {
            panic!()
        };

        s.reduce(Action::FeedLoaded {
            request: second,
            window: TimeWindow::PastDay,
            result: Ok(vec![quake("day", None, 0.0, 0.0)]),
            elapsed: Duration::ZERO,
        });
        s.reduce(Action::FeedLoaded {
            request: first,
            window: TimeWindow::PastWeek,
            result: Ok(vec![quake("week", None, 0.0, 0.0)]),
            elapsed: Duration::ZERO,
        });
        assert_eq!(visible_ids(&s), vec!["day"]);
        assert_eq!(s.store.window(), Some(TimeWindow::PastDay));
    }

    #[test]
    fn test_magnitude_change_recomputes() {
        let mut s = AppState::default();
        loaded(&mut s, vec![quake("a", Some(1.0), 0.0, 0.0), quake("b", Some(4.5), 0.0, 0.0)]);
        assert!(s.reduce(Action::SetMinMagnitude(4.0)).is_none());
        assert_eq!(visible_ids(&s), vec!["b"]);
        s.reduce(Action::SetMinMagnitude(0.0));
        assert_eq!(visible_ids(&s), vec!["a", "b"]);
    }

    #[test]
    fn test_blank_search_does_nothing() {
        let mut s = AppState::default();
        s.reduce(Action::EditSearchText("   ".into()));
        assert!(s.reduce(Action::SubmitSearch).is_none());
        assert!(!s.resolving);
    }

    #[test]
    fn test_search_trims_query() {
        let mut s = AppState::default();
        s.reduce(Action::EditSearchText("  Lima ".into()));
        let effect = s.reduce(Action::SubmitSearch);
        assert!(matches!(effect, Some(Effect::Geocode { ref query, .. }) if query == "Lima"));
        assert!(s.resolving);
    }

    #[test]
    fn test_stale_lookup_is_dropped() {
        let mut s = AppState::default();
        loaded(&mut s, vec![quake("a", Some(1.0), 0.0, 0.0)]);
        s.reduce(Action::EditSearchText("first".into()));
        let Some(Effect::Geocode { request: first, .. }) = s.reduce(Action::SubmitSearch) else {
            panic!()
        };
        s.reduce(Action::EditSearchText("second".into()));
        let Some(Effect::Geocode { request: second, .. }) = s.reduce(Action::SubmitSearch) else {
            panic!()
        };

        s.reduce(Action::LocationResolved {
            request: second,
            query: "second".into(),
            result: Ok(Coordinate::new(1.0, 1.0)),
        });
        s.reduce(Action::LocationResolved {
            request: first,
            query: "first".into(),
            result: Ok(Coordinate::new(60.0, 60.0)),
        });
        let area = s.criteria.location.as_ref().unwrap();
        assert_eq!(area.query, "second");
        assert_eq!(visible_ids(&s), vec!["a"]);
    }

    #[test]
    fn test_lookup_error_surfaces_notice() {
        let mut s = AppState::default();
        s.reduce(Action::EditSearchText("x".into()));
        let Some(Effect::Geocode { request, .. }) = s.reduce(Action::SubmitSearch) else {
            panic!()
        };
        s.reduce(Action::LocationResolved {
            request,
            query: "x".into(),
            result: Err(QuakeViewError::Geocode("bad".into())),
        });
        assert!(matches!(s.notice, Some(Notice::LookupFailed { .. })));
        assert!(!s.resolving);
        s.reduce(Action::DismissNotice);
        assert!(s.notice.is_none());
    }

    #[test]
    fn test_clear_location_restores_subset() {
        let mut s = AppState::default();
        loaded(&mut s, vec![quake("near", Some(1.0), 0.0, 0.0), quake("far", Some(1.0), 45.0, 45.0)]);
        s.reduce(Action::EditSearchText("here".into()));
        let Some(Effect::Geocode { request, .. }) = s.reduce(Action::SubmitSearch) else {
            panic!()
        };
        s.reduce(Action::LocationResolved {
            request,
            query: "here".into(),
            result: Ok(Coordinate::new(0.5, 0.5)),
        });
        assert_eq!(visible_ids(&s), vec!["near"]);
        s.reduce(Action::ClearLocation);
        assert_eq!(visible_ids(&s), vec!["near", "far"]);
    }

    #[test]
    fn test_reset_filters_restores_full_collection() {
        let mut s = AppState::default();
        loaded(
            &mut s,
            vec![quake("a", Some(1.0), 10.0, 10.0), quake("b", Some(6.0), -40.0, 170.0)],
        );
        s.reduce(Action::SetMinMagnitude(5.0));
        s.reduce(Action::EditSearchText("Wellington".into()));
        let Some(Effect::Geocode { request, query }) = s.reduce(Action::SubmitSearch) else {
            panic!("search must geocode");
        };
        s.reduce(Action::LocationResolved {
            request,
            query,
            result: Ok(Coordinate::new(-41.0, 174.0)),
        });
        assert_eq!(s.visible_indices(), &[1]);

        assert!(s.reduce(Action::ResetFilters).is_none());
        assert!(s.criteria.is_empty());
        assert!(s.search_text.is_empty());
        assert_eq!(s.visible_indices(), &[0, 1]);
    }

    #[test]
    fn test_selection_overwrite_and_dismiss() {
        let mut s = AppState::default();
        s.reduce(Action::ActivateMarker(quake("a", None, 0.0, 0.0)));
        s.reduce(Action::ActivateMarker(quake("b", None, 0.0, 0.0)));
        assert!(s.selection.is_selected("b"));
        s.reduce(Action::DismissDetails);
        assert_eq!(s.selection, Selection::None);
    }

    #[test]
    fn test_with_preferences_clamps_negative_magnitude() {
        let s = AppState::with_preferences(TimeWindow::PastWeek, -1.0, ViewMode::Recent);
        assert_eq!(s.criteria.min_magnitude, 0.0);
        assert_eq!(s.time_window, TimeWindow::PastWeek);
        assert_eq!(s.view_mode, ViewMode::Recent);
    }
}
