//! UI sub-module re-exports for QuakeView.
//!
//! Each sub-module adds rendering methods to [`crate::app::QuakeViewApp`]
//! via `impl` blocks, keeping UI code separated from state management.

pub mod detail_panel;
pub mod event_table;
pub mod filter_panel;
pub mod map_view;
pub mod status_bar;
pub mod theme;
pub mod toolbar;
