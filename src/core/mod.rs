//! Core domain modules for QuakeView.
//!
//! Contains the event data model, feed and geocoder clients, the event
//! store, in-memory filtering, map framing, the application state reducer,
//! and the background workers that execute network effects.

pub mod event_store;
pub mod feed;
pub mod filter;
pub mod geocode;
pub mod quake_record;
pub mod state;
pub mod view;
pub mod worker;
