//! Preview — the live embed preview.
//!
//! A `PreviewDialog` owns a rendering surface (through a `PreviewBridge`), a
//! busy indicator and the dialog view. Once the surface reports its initial
//! load, every form change is resolved into a fresh `ViewerConfig` and
//! pushed into the surface.
//!
//! The dialog is single-threaded: events are queued and processed in
//! arrival order by `pump`.

pub mod bridge;
pub mod busy;
pub mod controller;

pub use bridge::{PreviewBridge, RenderingSurface};
pub use busy::{BusyIndicator, NoBusyIndicator};
pub use controller::{DialogEvent, DialogOptions, DialogState, DialogView, PreviewDialog};
