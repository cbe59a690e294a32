//! Background execution of network effects.
//!
//! Each [`Effect`] runs on its own named thread. The result is sent to the
//! UI as a [`WorkerMessage`] via a [`crossbeam_channel`] sender; the UI polls
//! the receiving end each frame with non-blocking `try_recv` and converts
//! each message back into an [`Action`] for the reducer.
//!
//! Nothing here cancels an in-flight request. Out-of-order completions are
//! resolved by the request ids carried in every message.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::Sender;

use crate::core::feed::{FeedSource, TimeWindow};
use crate::core::geocode::Geocoder;
use crate::core::quake_record::{Coordinate, QuakeRecord};
use crate::core::state::{Action, Effect, RequestId};
use crate::util::error::{QuakeViewError, Result};

/// Messages sent from worker threads to the UI thread.
#[derive(Debug)]
pub enum WorkerMessage {
    /// A feed fetch finished (successfully or not).
    FeedFetched {
        request: RequestId,
        window: TimeWindow,
        result: Result<Vec<QuakeRecord>>,
        elapsed: Duration,
    },
    /// A place lookup finished.
    LocationResolved {
        request: RequestId,
        query: String,
        result: Result<Coordinate>,
    },
}

impl From<WorkerMessage> for Action {
    fn from(msg: WorkerMessage) -> Self {
        match msg {
            WorkerMessage::FeedFetched {
                request,
                window,
                result,
                elapsed,
            } => Action::FeedLoaded {
                request,
                window,
                result,
                elapsed,
            },
            WorkerMessage::LocationResolved {
                request,
                query,
                result,
            } => Action::LocationResolved {
                request,
                query,
                result,
            },
        }
    }
}

/// The external services effects are executed against.
#[derive(Clone)]
pub struct Services {
    pub feed: Arc<dyn FeedSource>,
    pub geocoder: Arc<dyn Geocoder>,
}

impl Services {
    pub fn new(feed: Arc<dyn FeedSource>, geocoder: Arc<dyn Geocoder>) -> Self {
        Self { feed, geocoder }
    }
}

/// Spawn a background thread that performs `effect` and reports on `sender`.
///
/// The thread always reports exactly once: a panic inside the feed or
/// geocoder is caught and sent as [`QuakeViewError::Worker`].
///
/// # Errors
/// Returns [`QuakeViewError::Io`] if the OS refuses to create the thread.
pub fn spawn_effect(
    effect: Effect,
    services: &Services,
    sender: Sender<WorkerMessage>,
) -> Result<std::thread::JoinHandle<()>> {
    let handle = match effect {
        Effect::FetchFeed { request, window } => {
            let feed = Arc::clone(&services.feed);
            std::thread::Builder::new()
                .name("feed-fetch".into())
                .spawn(move || {
                    let fetch = AssertUnwindSafe(|| run_fetch(feed.as_ref(), request, window));
                    let msg = panic::catch_unwind(fetch).unwrap_or_else(|payload| WorkerMessage::FeedFetched {
                        request,
                        window,
                        result: Err(panic_error("feed fetch", payload.as_ref())),
                        elapsed: Duration::ZERO,
                    });
                    if sender.send(msg).is_err() {
                        tracing::debug!("UI gone before feed response {:?} arrived", request);
                    }
                })?
        }
        Effect::Geocode { request, query } => {
            let geocoder = Arc::clone(&services.geocoder);
            std::thread::Builder::new()
                .name("geocode".into())
                .spawn(move || {
                    let lookup_query = query.clone();
                    let lookup = AssertUnwindSafe(|| run_lookup(geocoder.as_ref(), request, lookup_query));
                    let msg = panic::catch_unwind(lookup).unwrap_or_else(|payload| WorkerMessage::LocationResolved {
                        request,
                        query,
                        result: Err(panic_error("geocode", payload.as_ref())),
                    });
                    if sender.send(msg).is_err() {
                        tracing::debug!("UI gone before geocode response {:?} arrived", request);
                    }
                })?
        }
    };
    Ok(handle)
}

/// Turn a worker panic into an error so the UI still leaves its loading state.
fn panic_error(task: &str, payload: &(dyn Any + Send)) -> QuakeViewError {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".into());
    tracing::error!("{} worker panicked: {}", task, detail);
    QuakeViewError::Worker(format!("{task} panicked: {detail}"))
}

/// Perform a fetch synchronously. Exposed for tests and headless callers.
pub fn run_fetch(feed: &dyn FeedSource, request: RequestId, window: TimeWindow) -> WorkerMessage {
    let start = Instant::now();
    let result = feed.fetch(window);
    let elapsed = start.elapsed();
    if let Err(e) = &result {
        tracing::warn!("Feed fetch {:?} for {} failed: {}", request, window.feed_id(), e);
    }
    WorkerMessage::FeedFetched {
        request,
        window,
        result,
        elapsed,
    }
}

/// Perform a lookup synchronously. Exposed for tests and headless callers.
pub fn run_lookup(geocoder: &dyn Geocoder, request: RequestId, query: String) -> WorkerMessage {
    let result = geocoder.resolve(&query);
    if let Err(e) = &result {
        if !matches!(e, QuakeViewError::LocationNotFound(_)) {
            tracing::warn!("Lookup {:?} for \"{}\" failed: {}", request, query, e);
        }
    }
    WorkerMessage::LocationResolved {
        request,
        query,
        result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::quake_record::test_support::quake;
    use crate::core::state::{AppState, Notice};

    struct OneQuake;

    impl FeedSource for OneQuake {
        fn fetch(&self, _window: TimeWindow) -> Result<Vec<QuakeRecord>> {
            Ok(vec![quake("a", Some(2.0), 0.0, 0.0)])
        }
    }

    struct Nowhere;

    impl Geocoder for Nowhere {
        fn resolve(&self, query: &str) -> Result<Coordinate> {
            Err(QuakeViewError::LocationNotFound(query.into()))
        }
    }

    #[test]
    fn test_spawned_fetch_reports_on_channel() {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let services = Services::new(Arc::new(OneQuake), Arc::new(Nowhere));
        let handle = spawn_effect(
            Effect::FetchFeed {
                request: RequestId(7),
                window: TimeWindow::PastDay,
            },
            &services,
            tx,
        )
        .unwrap();
        handle.join().unwrap();

        match rx.recv().unwrap() {
            WorkerMessage::FeedFetched { request, result, .. } => {
                assert_eq!(request, RequestId(7));
                assert_eq!(result.unwrap().len(), 1);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    struct Exploding;

    impl FeedSource for Exploding {
        fn fetch(&self, _window: TimeWindow) -> Result<Vec<QuakeRecord>> {
            panic!("decoder blew up");
        }
    }

    impl Geocoder for Exploding {
        fn resolve(&self, _query: &str) -> Result<Coordinate> {
            panic!("lookup blew up");
        }
    }

    #[test]
    fn test_panicking_fetch_still_reports_and_clears_loading() {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let services = Services::new(Arc::new(Exploding), Arc::new(Nowhere));
        let mut state = AppState::default();
        let effect = state.reduce(Action::Refresh).unwrap();
        assert!(state.loading);

        spawn_effect(effect, &services, tx).unwrap().join().unwrap();

        let msg = rx.recv().unwrap();
        match &msg {
            WorkerMessage::FeedFetched { result: Err(QuakeViewError::Worker(detail)), .. } => {
                assert!(detail.contains("decoder blew up"), "detail: {detail}");
            }
            other => panic!("unexpected message: {other:?}"),
        }
        state.reduce(Action::from(msg));
        assert!(!state.loading);
        assert!(matches!(state.notice, Some(Notice::FetchFailed { .. })));
    }

    #[test]
    fn test_panicking_lookup_still_reports_and_clears_resolving() {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let services = Services::new(Arc::new(OneQuake), Arc::new(Exploding));
        let mut state = AppState::default();
        state.reduce(Action::EditSearchText("Lima".into()));
        let effect = state.reduce(Action::SubmitSearch).unwrap();
        assert!(state.resolving);

        spawn_effect(effect, &services, tx).unwrap().join().unwrap();

        state.reduce(Action::from(rx.recv().unwrap()));
        assert!(!state.resolving);
        assert!(matches!(
            &state.notice,
            Some(Notice::LookupFailed { query, message }) if query == "Lima" && message.contains("lookup blew up")
        ));
    }

    #[test]
    fn test_lookup_message_converts_to_action() {
        let msg = run_lookup(&Nowhere, RequestId(3), "atlantis".into());
        match Action::from(msg) {
            Action::LocationResolved { request, query, result } => {
                assert_eq!(request, RequestId(3));
                assert_eq!(query, "atlantis");
                assert!(matches!(result, Err(QuakeViewError::LocationNotFound(_))));
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }
}
