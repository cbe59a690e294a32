//! Holds the most recently fetched event collection.
//!
//! The collection lives behind an `Arc<[QuakeRecord]>` so that installing a
//! new fetch is a single pointer swap and readers (the UI, export threads)
//! can keep a cheap handle to the snapshot they started with.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::core::feed::{FeedSource, TimeWindow};
use crate::core::quake_record::QuakeRecord;
use crate::util::error::Result;

/// The current event collection and where it came from.
#[derive(Debug, Clone)]
pub struct EventStore {
    events: Arc<[QuakeRecord]>,
    /// Window the installed collection was fetched for. `None` until the
    /// first successful fetch.
    window: Option<TimeWindow>,
    /// When the installed collection was fetched.
    fetched_at: Option<DateTime<Utc>>,
}

impl Default for EventStore {
    fn default() -> Self {
        Self {
            events: Arc::from(Vec::new()),
            window: None,
            fetched_at: None,
        }
    }
}

impl EventStore {
    /// Fetch `window` from `source` and install the result.
    ///
    /// On failure the previously installed collection is left untouched and
    /// the error is returned. There is no retry.
    pub fn load(&mut self, source: &dyn FeedSource, window: TimeWindow) -> Result<Arc<[QuakeRecord]>> {
        match source.fetch(window) {
            Ok(events) => {
                self.install(window, events);
                Ok(self.snapshot())
            }
            Err(e) => {
                tracing::warn!(
                    "Fetch for {} failed, keeping {} previous events: {}",
                    window.feed_id(),
                    self.events.len(),
                    e
                );
                Err(e)
            }
        }
    }

    /// Replace the collection wholesale with a freshly fetched one.
    pub fn install(&mut self, window: TimeWindow, events: Vec<QuakeRecord>) {
        tracing::debug!("Installing {} events for {}", events.len(), window.feed_id());
        self.events = Arc::from(events);
        self.window = Some(window);
        self.fetched_at = Some(Utc::now());
    }

    pub fn events(&self) -> &[QuakeRecord] {
        &self.events
    }

    /// Shared handle to the installed collection.
    pub fn snapshot(&self) -> Arc<[QuakeRecord]> {
        Arc::clone(&self.events)
    }

    pub fn window(&self) -> Option<TimeWindow> {
        self.window
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
