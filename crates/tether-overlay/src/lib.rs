//! # Tether Overlay
//!
//! Decides *when* an anchored panel is repositioned. An [`OverlayInstance`]
//! is created per open panel, recomputes through [`tether_core::resolve_from`]
//! on open, after the first render tick, on resize, on scroll (capture phase)
//! and on explicit invalidation, and releases its host registrations on close.
//!
//! Host frameworks plug in through two traits:
//!
//! - [`tether_core::RectSource`] measures anchor, content and viewport
//! - [`Host`] registers event listeners and a one-shot deferred tick
//!
//! Everything is single-threaded; instances share no mutable state.

#![warn(clippy::all)]

mod host;
mod instance;
mod lifecycle;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use host::{Handler, Host, HostEvent, Listener, Task};
pub use instance::{OverlayInstance, Unsubscribe};
pub use lifecycle::{Effect, LifecycleState, RecomputeLifecycle, Trigger};
