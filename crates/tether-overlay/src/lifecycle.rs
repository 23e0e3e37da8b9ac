//! When to recompute.
//!
//! ```text
//! CLOSED --open--> OPEN_PENDING_MEASURE --mounted|resize|scroll|invalidate--> POSITIONED
//!    ^                     |                                                      |  ^
//!    |                   close                     resize|scroll|invalidate|mounted +--+
//!    +---------------------+------------------------------close-------------------+
//! ```

use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LifecycleState {
    #[default]
    Closed,
    /// Open, waiting one deferred tick for the content to mount
    OpenPendingMeasure,
    Positioned,
}

impl LifecycleState {
    pub fn is_open(self) -> bool {
        !matches!(self, LifecycleState::Closed)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LifecycleState::Closed => "closed",
            LifecycleState::OpenPendingMeasure => "open_pending_measure",
            LifecycleState::Positioned => "positioned",
        })
    }
}

/// Signals that drive the lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Open,
    /// The deferred tick after open; content has had a chance to mount
    Mounted,
    Resize,
    Scroll,
    Invalidate,
    /// Close or unmount
    Close,
}

/// What the owner must do in response to a trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Ignore,
    /// Register listeners, schedule the mount tick, run a provisional pass
    Acquire,
    Resolve,
    /// Release every registration
    Release,
}

/// The recompute state machine of a single overlay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecomputeLifecycle {
    state: LifecycleState,
}

impl RecomputeLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Advance on `trigger` and report the effect to carry out.
    pub fn apply(&mut self, trigger: Trigger) -> Effect {
        use LifecycleState::*;

        let (next, effect) = match (self.state, trigger) {
            (Closed, Trigger::Open) => (OpenPendingMeasure, Effect::Acquire),
            (Closed, _) => (Closed, Effect::Ignore),

            (_, Trigger::Close) => (Closed, Effect::Release),
            (state, Trigger::Open) => (state, Effect::Ignore),

            (OpenPendingMeasure | Positioned, _) => (Positioned, Effect::Resolve),
        };

        if next != self.state {
            tracing::debug!(from = %self.state, to = %next, ?trigger, "overlay lifecycle transition");
        }
        self.state = next;
        effect
    }
}
