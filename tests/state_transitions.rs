//! Integration tests for the reducer: fetch, search, selection and view flows.

mod common;

use std::time::Duration;

use quakeview::core::feed::TimeWindow;
use quakeview::core::quake_record::{Coordinate, QuakeRecord};
use quakeview::core::state::{Action, AppState, Effect, Notice, Selection};
use quakeview::core::view::{Camera, ViewMode};
use quakeview::util::error::QuakeViewError;

fn load(state: &mut AppState, events: Vec<QuakeRecord>) {
    let Some(Effect::FetchFeed { request, window }) = state.reduce(Action::Refresh) else {
        panic!("refresh must request a fetch");
    };
    assert!(state.reduce(Action::FeedLoaded {
        request,
        window,
        result: Ok(events),
        elapsed: Duration::from_millis(120),
    })
    .is_none());
}

fn search(state: &mut AppState, query: &str, result: Result<Coordinate, QuakeViewError>) {
    state.reduce(Action::EditSearchText(query.into()));
    let Some(Effect::Geocode { request, query }) = state.reduce(Action::SubmitSearch) else {
        panic!("non-empty search must request a lookup");
    };
    state.reduce(Action::LocationResolved { request, query, result });
}

fn visible_ids(state: &AppState) -> Vec<String> {
    state.visible_events().map(|e| e.id.clone()).collect()
}

fn sample() -> Vec<QuakeRecord> {
    common::events(&[
        ("tokyo", Some(4.8), 35.6, 139.7),
        ("chile", Some(6.2), -33.4, -70.6),
        ("osaka", Some(2.1), 34.7, 135.5),
    ])
}

#[test]
fn fetch_installs_events_and_clears_loading() {
    let mut state = AppState::default();
    load(&mut state, sample());
    assert!(!state.loading);
    assert_eq!(state.store.len(), 3);
    assert_eq!(state.store.window(), Some(TimeWindow::PastDay));
    assert_eq!(visible_ids(&state), ["tokyo", "chile", "osaka"]);
    assert_eq!(state.last_fetch_elapsed, Some(Duration::from_millis(120)));
}

#[test]
fn fetch_failure_keeps_previous_events_and_subset() {
    let mut state = AppState::default();
    load(&mut state, sample());
    state.reduce(Action::SetMinMagnitude(4.0));
    let before = visible_ids(&state);

    let Some(Effect::FetchFeed { request, .. }) = state.reduce(Action::SelectTimeWindow(TimeWindow::PastWeek)) else {
        panic!("window change must fetch");
    };
    state.reduce(Action::FeedLoaded {
        request,
        window: TimeWindow::PastWeek,
        result: Err(QuakeViewError::FeedFormat("truncated".into())),
        elapsed: Duration::ZERO,
    });

    assert_eq!(visible_ids(&state), before);
    assert_eq!(state.store.window(), Some(TimeWindow::PastDay));
    assert!(matches!(state.notice, Some(Notice::FetchFailed { window: TimeWindow::PastWeek, .. })));
    assert!(!state.loading);
}

#[test]
fn stale_feed_response_is_ignored() {
    let mut state = AppState::default();
    let Some(Effect::FetchFeed { request: first, .. }) = state.reduce(Action::Refresh) else {
        panic!("refresh must fetch");
    };
    let Some(Effect::FetchFeed { request: second, .. }) = state.reduce(Action::SelectTimeWindow(TimeWindow::PastMonth))
    else {
        panic!("window change must fetch");
    };

    state.reduce(Action::FeedLoaded {
        request: second,
        window: TimeWindow::PastMonth,
        result: Ok(common::events(&[("month", Some(3.0), 0.0, 0.0)])),
        elapsed: Duration::ZERO,
    });
    state.reduce(Action::FeedLoaded {
        request: first,
        window: TimeWindow::PastDay,
        result: Ok(common::events(&[("day", Some(3.0), 0.0, 0.0)])),
        elapsed: Duration::ZERO,
    });

    assert_eq!(visible_ids(&state), ["month"]);
    assert_eq!(state.store.window(), Some(TimeWindow::PastMonth));
}

#[test]
fn resolved_search_restricts_subset() {
    let mut state = AppState::default();
    load(&mut state, sample());
    search(&mut state, "Tokyo", Ok(Coordinate::new(35.68, 139.69)));

    assert_eq!(visible_ids(&state), ["tokyo"]);
    assert!(!state.resolving);
    let area = state.criteria.location.as_ref().expect("search area set");
    assert_eq!(area.query, "Tokyo");
}

#[test]
fn search_and_magnitude_conjoin() {
    let mut state = AppState::default();
    load(&mut state, sample());
    search(&mut state, "Japan", Ok(Coordinate::new(35.0, 137.0)));
    assert_eq!(visible_ids(&state), ["tokyo", "osaka"]);

    state.reduce(Action::SetMinMagnitude(3.0));
    assert_eq!(visible_ids(&state), ["tokyo"]);

    state.reduce(Action::ClearLocation);
    assert_eq!(visible_ids(&state), ["tokyo", "chile"]);
}

#[test]
fn location_not_found_keeps_subset_and_sets_notice() {
    let mut state = AppState::default();
    load(&mut state, sample());
    search(&mut state, "Tokyo", Ok(Coordinate::new(35.68, 139.69)));
    let before = visible_ids(&state);

    search(&mut state, "Atlantis", Err(QuakeViewError::LocationNotFound("Atlantis".into())));

    assert_eq!(visible_ids(&state), before);
    assert_eq!(
        state.notice,
        Some(Notice::LocationNotFound {
            query: "Atlantis".into()
        })
    );

    state.reduce(Action::DismissNotice);
    assert!(state.notice.is_none());
}

#[test]
fn blank_search_does_nothing() {
    let mut state = AppState::default();
    state.reduce(Action::EditSearchText("   ".into()));
    assert!(state.reduce(Action::SubmitSearch).is_none());
    assert!(!state.resolving);
}

#[test]
fn selection_round_trip() {
    let mut state = AppState::default();
    load(&mut state, sample());
    let chile = state.visible_events().nth(1).cloned().expect("two events visible");

    state.reduce(Action::ActivateMarker(chile.clone()));
    assert_eq!(state.selected(), Some(&chile));
    assert!(state.selection.is_selected("chile"));

    state.reduce(Action::DismissDetails);
    assert_eq!(state.selection, Selection::None);
}

#[test]
fn recent_view_centres_on_newest_visible_event() {
    let mut state = AppState::default();
    load(&mut state, sample());
    state.reduce(Action::ToggleViewMode);
    assert_eq!(state.view_mode, ViewMode::Recent);
    assert_eq!(state.camera().center, Coordinate::new(35.6, 139.7));

    state.reduce(Action::SetMinMagnitude(5.0));
    assert_eq!(state.camera().center, Coordinate::new(-33.4, -70.6));
}

#[test]
fn recent_view_with_empty_subset_falls_back_to_world() {
    let mut state = AppState::default();
    load(&mut state, sample());
    state.reduce(Action::ToggleViewMode);
    state.reduce(Action::SetMinMagnitude(9.0));
    assert_eq!(state.camera(), Camera::world());

    state.reduce(Action::ToggleViewMode);
    assert_eq!(state.view_mode, ViewMode::World);
    assert_eq!(state.camera(), Camera::world());
}
