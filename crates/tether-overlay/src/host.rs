//! The seam to the host UI framework.
//!
//! A host adapter supplies event listeners and a one-shot deferred tick. Each
//! registration hands back a [`Listener`] guard; dropping or releasing it
//! removes the registration.

use std::fmt;
use std::rc::Rc;

/// Window-level events an overlay recomputes on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostEvent {
    /// The window was resized
    Resize,
    /// The document or any scrollable ancestor scrolled
    Scroll,
}

impl HostEvent {
    /// Scroll is listened in the capture phase so nested scroll containers
    /// are caught as well as the document.
    pub fn capture(self) -> bool {
        matches!(self, HostEvent::Scroll)
    }
}

/// Callback a host invokes when an event fires
pub type Handler = Rc<dyn Fn()>;

/// Callback a host invokes once, after the current render tick
pub type Task = Box<dyn FnOnce()>;

/// Event and scheduling services provided by the host
pub trait Host {
    /// Register `handler` for `event` until the returned guard is released.
    fn listen(&self, event: HostEvent, handler: Handler) -> Listener;

    /// Run `task` once after the current tick, unless the guard is released first.
    fn defer(&self, task: Task) -> Listener;
}

impl<H: Host + ?Sized> Host for Rc<H> {
    fn listen(&self, event: HostEvent, handler: Handler) -> Listener {
        (**self).listen(event, handler)
    }

    fn defer(&self, task: Task) -> Listener {
        (**self).defer(task)
    }
}

/// A scoped host registration, released on drop
#[must_use = "dropping a Listener releases it immediately"]
pub struct Listener {
    release: Option<Box<dyn FnOnce()>>,
}

impl Listener {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }

    /// Release the registration. Safe to call any number of times.
    pub fn release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("active", &self.is_active())
            .finish()
    }
}
