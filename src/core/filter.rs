//! In-memory filtering logic for QuakeView.
//!
//! The [`FilterCriteria`] struct holds the user-configurable criteria. The
//! visible subset is always derived from the full collection by
//! [`visible_indices`]; nothing edits it directly.
//!
//! Both predicates are conjoined: a place search honours the current
//! magnitude threshold, and changing the threshold keeps an active search.

use crate::core::quake_record::{Coordinate, QuakeRecord};
use crate::util::constants::SEARCH_HALF_WIDTH_DEG;

/// A resolved place search: the text the user typed and where it resolved to.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchArea {
    pub query: String,
    pub center: Coordinate,
}

/// Holds all active filter criteria.
///
/// The default matches every event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Minimum magnitude, inclusive. `0.0` means no magnitude filtering.
    pub min_magnitude: f64,

    /// Active place search, absent until a search resolves.
    pub location: Option<SearchArea>,
}

impl FilterCriteria {
    /// Test whether the given event passes **all** active criteria.
    ///
    /// Magnitude is checked first as it is a single comparison.
    pub fn matches(&self, event: &QuakeRecord) -> bool {
        if !passes_magnitude(event, self.min_magnitude) {
            return false;
        }
        match &self.location {
            Some(area) => within_search_box(event.coordinate, area.center),
            None => true,
        }
    }

    /// Returns `true` if all criteria are at their default (pass-all) state.
    pub fn is_empty(&self) -> bool {
        self.min_magnitude == 0.0 && self.location.is_none()
    }

    /// Drop the active place search.
    pub fn clear_location(&mut self) {
        self.location = None;
    }

    /// Reset all criteria to the pass-all state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Magnitude predicate: `magnitude >= min_magnitude`.
///
/// A threshold of exactly zero means "no filtering" and passes everything,
/// including events the feed has not sized yet. Any other threshold,
/// negative ones included, is compared against the magnitude and rejects
/// unsized events.
pub fn passes_magnitude(event: &QuakeRecord, min_magnitude: f64) -> bool {
    if min_magnitude == 0.0 {
        return true;
    }
    event.magnitude.is_some_and(|m| m >= min_magnitude)
}

/// Spatial predicate: strictly inside the ±[`SEARCH_HALF_WIDTH_DEG`] box
/// around `center`. Longitude does not wrap at the antimeridian.
pub fn within_search_box(point: Coordinate, center: Coordinate) -> bool {
    (point.lat - center.lat).abs() < SEARCH_HALF_WIDTH_DEG
        && (point.lon - center.lon).abs() < SEARCH_HALF_WIDTH_DEG
}

/// Indices into `events` of every event matching `criteria`, in input order.
pub fn visible_indices(events: &[QuakeRecord], criteria: &FilterCriteria) -> Vec<usize> {
    events
        .iter()
        .enumerate()
        .filter(|(_, event)| criteria.matches(event))
        .map(|(i, _)| i)
        .collect()
}

/// Derive the visible subset from a collection, a magnitude threshold and
/// an optional search centre. Pure and order preserving.
pub fn apply<'a>(
    events: &'a [QuakeRecord],
    min_magnitude: f64,
    location: Option<Coordinate>,
) -> Vec<&'a QuakeRecord> {
    events
        .iter()
        .filter(|event| passes_magnitude(event, min_magnitude))
        .filter(|event| location.map_or(true, |center| within_search_box(event.coordinate, center)))
        .collect()
}
