//! A host double for driving overlays in tests.
//!
//! Nothing fires on its own: tests call [`ManualHost::fire`] and
//! [`ManualHost::run_deferred`] to simulate window events and the post-open
//! render tick.

use crate::host::{Handler, Host, HostEvent, Listener, Task};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Default)]
struct Registry {
    next_id: u64,
    handlers: Vec<(u64, HostEvent, Handler)>,
    tasks: Vec<(u64, Task)>,
}

impl Registry {
    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Single-threaded host whose events are fired by hand
#[derive(Clone, Default)]
pub struct ManualHost {
    registry: Rc<RefCell<Registry>>,
}

impl ManualHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invoke every handler registered for `event`; returns how many ran.
    pub fn fire(&self, event: HostEvent) -> usize {
        let handlers: Vec<Handler> = self
            .registry
            .borrow()
            .handlers
            .iter()
            .filter(|(_, registered, _)| *registered == event)
            .map(|(_, _, handler)| handler.clone())
            .collect();
        for handler in &handlers {
            handler();
        }
        handlers.len()
    }

    /// Run all pending deferred tasks; returns how many ran.
    pub fn run_deferred(&self) -> usize {
        let tasks = std::mem::take(&mut self.registry.borrow_mut().tasks);
        let count = tasks.len();
        for (_, task) in tasks {
            task();
        }
        count
    }

    pub fn listener_count(&self, event: HostEvent) -> usize {
        self.registry
            .borrow()
            .handlers
            .iter()
            .filter(|(_, registered, _)| *registered == event)
            .count()
    }

    pub fn pending_tasks(&self) -> usize {
        self.registry.borrow().tasks.len()
    }
}

impl Host for ManualHost {
    fn listen(&self, event: HostEvent, handler: Handler) -> Listener {
        let id = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.next_id();
            registry.handlers.push((id, event, handler));
            id
        };
        let registry = Rc::downgrade(&self.registry);
        Listener::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry.borrow_mut().handlers.retain(|(entry, ..)| *entry != id);
            }
        })
    }

    fn defer(&self, task: Task) -> Listener {
        let id = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.next_id();
            registry.tasks.push((id, task));
            id
        };
        let registry = Rc::downgrade(&self.registry);
        Listener::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry.borrow_mut().tasks.retain(|(entry, _)| *entry != id);
            }
        })
    }
}
