//! One open floating panel and its subscriptions.
//!
//! An [`OverlayInstance`] owns the rect source, the current request, the
//! recompute lifecycle and the host registrations made while open. Nested
//! panels (a submenu inside a menu) each get their own instance anchored to
//! their own trigger; instances share nothing but the host.
//!
//! Lifecycle, request and position live in `Cell`s, so `open`, `close` and
//! `set_request` may be called from anywhere, including from inside a
//! [`RectSource`] measurement or a position callback.

use crate::host::{Handler, Host, HostEvent, Listener, Task};
use crate::lifecycle::{Effect, LifecycleState, RecomputeLifecycle, Trigger};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use tether_core::{resolve_from, PlacementRequest, PositionResult, RectSource};
use tracing::{debug, trace};

/// Guard returned by [`OverlayInstance::subscribe`]; drop it to stop updates
pub type Unsubscribe = Listener;

/// Receives every recomputed position; `None` means hide the panel
type Callback = Rc<RefCell<dyn FnMut(Option<PositionResult>)>>;

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    entries: Vec<(u64, Callback)>,
}

impl Subscribers {
    fn insert(&mut self, callback: Callback) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, callback));
        id
    }

    fn remove(&mut self, id: u64) {
        self.entries.retain(|(entry, _)| *entry != id);
    }

    fn snapshot(&self) -> Vec<Callback> {
        self.entries.iter().map(|(_, cb)| cb.clone()).collect()
    }
}

struct Inner<S> {
    source: S,
    request: Cell<PlacementRequest>,
    lifecycle: Cell<RecomputeLifecycle>,
    position: Cell<Option<PositionResult>>,
    listeners: Cell<Vec<Listener>>,
    subscribers: RefCell<Subscribers>,
    /// A measurement is running; nested recompute requests set `stale`
    resolving: Cell<bool>,
    stale: Cell<bool>,
}

impl<S: RectSource> Inner<S> {
    fn advance(&self, trigger: Trigger) -> Effect {
        let mut lifecycle = self.lifecycle.get();
        let effect = lifecycle.apply(trigger);
        self.lifecycle.set(lifecycle);
        effect
    }

    fn is_open(&self) -> bool {
        self.lifecycle.get().state().is_open()
    }

    /// Position to hand subscribers, or `None` once the panel is closed.
    fn current(&self) -> Option<Option<PositionResult>> {
        self.is_open().then(|| self.position.get())
    }

    fn dispatch(&self, trigger: Trigger) {
        if self.advance(trigger) == Effect::Resolve {
            trace!(?trigger, "overlay recompute");
            self.refresh();
        }
    }

    /// Measure and publish. A request for another pass made while measuring
    /// (from the source itself) re-runs the measurement once it returns.
    fn refresh(&self) {
        if self.resolving.replace(true) {
            self.stale.set(true);
            return;
        }
        loop {
            self.stale.set(false);
            let position = resolve_from(&self.source, &self.request.get());
            if self.is_open() {
                self.position.set(position);
            }
            if !self.stale.get() {
                break;
            }
        }
        self.resolving.set(false);
        self.notify();
    }

    fn notify(&self) {
        let callbacks = self.subscribers.borrow().snapshot();
        for callback in callbacks {
            let Some(update) = self.current() else {
                trace!("overlay closed during notify, skipping remaining subscribers");
                return;
            };
            match callback.try_borrow_mut() {
                Ok(mut on_position) => (&mut *on_position)(update),
                Err(_) => trace!("skipping re-entrant position callback"),
            }
        }
    }

    fn close(&self) {
        if self.advance(Trigger::Close) != Effect::Release {
            return;
        }
        self.position.set(None);
        let released = self.listeners.take();
        debug!(listeners = released.len(), "overlay closed, releasing listeners");
        drop(released);
    }
}

/// A floating panel anchored to a trigger element
pub struct OverlayInstance<S, H> {
    host: H,
    inner: Rc<Inner<S>>,
}

impl<S: RectSource + 'static, H: Host> OverlayInstance<S, H> {
    pub fn new(source: S, host: H, request: PlacementRequest) -> Self {
        Self {
            host,
            inner: Rc::new(Inner {
                source,
                request: Cell::new(request),
                lifecycle: Cell::new(RecomputeLifecycle::new()),
                position: Cell::new(None),
                listeners: Cell::new(Vec::new()),
                subscribers: RefCell::new(Subscribers::default()),
                resolving: Cell::new(false),
                stale: Cell::new(false),
            }),
        }
    }

    /// Register `on_position` for every recomputation until the guard drops.
    ///
    /// If the panel is already open the current position is delivered
    /// straight away.
    pub fn subscribe(
        &self,
        on_position: impl FnMut(Option<PositionResult>) + 'static,
    ) -> Unsubscribe {
        let callback: Callback = Rc::new(RefCell::new(on_position));
        let id = self.inner.subscribers.borrow_mut().insert(callback.clone());

        if let Some(current) = self.inner.current() {
            (&mut *callback.borrow_mut())(current);
        }

        let inner = Rc::downgrade(&self.inner);
        Listener::new(move || {
            if let Some(inner) = inner.upgrade() {
                inner.subscribers.borrow_mut().remove(id);
            }
        })
    }

    /// The panel opened: register resize and scroll listeners, schedule the
    /// measure tick, and emit a provisional position.
    pub fn open(&self) {
        if self.inner.advance(Trigger::Open) != Effect::Acquire {
            return;
        }

        let listeners = vec![
            self.host.listen(HostEvent::Resize, self.handler(Trigger::Resize)),
            self.host.listen(HostEvent::Scroll, self.handler(Trigger::Scroll)),
            self.host.defer(self.task(Trigger::Mounted)),
        ];
        self.inner.listeners.set(listeners);

        trace!("overlay opened, provisional pass");
        self.inner.refresh();
    }

    /// The panel closed or unmounted. Releases every registration; calling it
    /// again is a no-op.
    pub fn close(&self) {
        self.inner.close();
    }

    /// Ask for a recompute outside of resize and scroll, e.g. after the
    /// content changed size.
    pub fn invalidate(&self) {
        self.inner.dispatch(Trigger::Invalidate);
    }

    /// Replace the request and recompute if open.
    pub fn set_request(&self, request: PlacementRequest) {
        self.inner.request.set(request);
        self.inner.dispatch(Trigger::Invalidate);
    }

    /// Resolve against current measurements without touching the lifecycle.
    pub fn resolve(&self) -> Option<PositionResult> {
        resolve_from(&self.inner.source, &self.inner.request.get())
    }

    /// Last emitted position; `None` while closed or once the anchor is lost.
    pub fn position(&self) -> Option<PositionResult> {
        self.inner.position.get()
    }

    pub fn request(&self) -> PlacementRequest {
        self.inner.request.get()
    }

    pub fn state(&self) -> LifecycleState {
        self.inner.lifecycle.get().state()
    }

    pub fn is_open(&self) -> bool {
        self.inner.is_open()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().entries.len()
    }

    fn handler(&self, trigger: Trigger) -> Handler {
        let inner: Weak<Inner<S>> = Rc::downgrade(&self.inner);
        Rc::new(move || {
            if let Some(inner) = inner.upgrade() {
                inner.dispatch(trigger);
            }
        })
    }

    fn task(&self, trigger: Trigger) -> Task {
        let handler = self.handler(trigger);
        Box::new(move || handler())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ManualHost;
    use proptest::prelude::*;
    use tether_core::{FixedRects, Placement, Rect, RectResult, Viewport};

    type SharedRects = Rc<RefCell<FixedRects>>;

    fn rects() -> SharedRects {
        Rc::new(RefCell::new(FixedRects::new(
            Rect::new(100.0, 100.0, 120.0, 30.0),
            Rect::ZERO,
            Viewport::new(800.0, 768.0),
        )))
    }

    fn mount(rects: &SharedRects) {
        rects.borrow_mut().content = Rect::new(0.0, 0.0, 200.0, 150.0);
    }

    fn recorder() -> (
        Rc<RefCell<Vec<Option<PositionResult>>>>,
        impl FnMut(Option<PositionResult>) + 'static,
    ) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |update| sink.borrow_mut().push(update))
    }

    #[test]
    fn open_emits_provisional_then_refines_after_tick() {
        let host = ManualHost::new();
        let rects = rects();
        let overlay = OverlayInstance::new(rects.clone(), host.clone(), PlacementRequest::default());
        let (seen, sink) = recorder();
        let _sub = overlay.subscribe(sink);

        overlay.open();
        assert_eq!(overlay.state(), LifecycleState::OpenPendingMeasure);
        assert_eq!(seen.borrow().len(), 1);
        assert!(seen.borrow()[0].is_some_and(|p| p.provisional));

        mount(&rects);
        assert_eq!(host.run_deferred(), 1);

        assert_eq!(overlay.state(), LifecycleState::Positioned);
        let refined = seen.borrow()[1].unwrap();
        assert!(!refined.provisional);
        assert_eq!(refined.top, 134.0);
    }

    #[test]
    fn open_registers_resize_and_capture_scroll() {
        let host = ManualHost::new();
        let overlay = OverlayInstance::new(rects(), host.clone(), PlacementRequest::default());
        assert_eq!(host.listener_count(HostEvent::Resize), 0);

        overlay.open();
        assert_eq!(host.listener_count(HostEvent::Resize), 1);
        assert_eq!(host.listener_count(HostEvent::Scroll), 1);
        assert_eq!(host.pending_tasks(), 1);
    }

    #[test]
    fn close_releases_every_registration() {
        let host = ManualHost::new();
        let overlay = OverlayInstance::new(rects(), host.clone(), PlacementRequest::default());
        overlay.open();

        overlay.close();
        overlay.close();

        assert_eq!(host.listener_count(HostEvent::Resize), 0);
        assert_eq!(host.listener_count(HostEvent::Scroll), 0);
        assert_eq!(host.pending_tasks(), 0);
        assert_eq!(overlay.state(), LifecycleState::Closed);
        assert_eq!(overlay.position(), None);
    }

    #[test]
    fn closing_before_the_tick_cancels_it() {
        let host = ManualHost::new();
        let overlay = OverlayInstance::new(rects(), host.clone(), PlacementRequest::default());
        let (seen, sink) = recorder();
        let _sub = overlay.subscribe(sink);

        overlay.open();
        overlay.close();

        assert_eq!(host.run_deferred(), 0);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn scroll_recomputes_from_fresh_measurements() {
        let host = ManualHost::new();
        let rects = rects();
        mount(&rects);
        let overlay = OverlayInstance::new(rects.clone(), host.clone(), PlacementRequest::default());
        let (seen, sink) = recorder();
        let _sub = overlay.subscribe(sink);
        overlay.open();
        host.run_deferred();
        let before = overlay.position().unwrap();

        rects.borrow_mut().scroll_by(0.0, 50.0);
        host.fire(HostEvent::Scroll);

        let after = seen.borrow().last().copied().flatten().unwrap();
        let anchor = rects.borrow().anchor.unwrap();
        assert_eq!(anchor.top, 50.0);
        assert_eq!(after.top, anchor.bottom() + 4.0 + 50.0);
        assert_eq!(after.left, before.left);
        assert_eq!(seen.borrow().len(), 3);
    }

    #[test]
    fn resize_recomputes_and_may_flip() {
        let host = ManualHost::new();
        let rects = rects();
        mount(&rects);
        let overlay = OverlayInstance::new(rects.clone(), host.clone(), PlacementRequest::default());
        overlay.open();
        host.run_deferred();
        assert_eq!(overlay.position().map(|p| p.placement), Some(Placement::Bottom));

        rects.borrow_mut().anchor = Some(Rect::new(300.0, 100.0, 120.0, 30.0));
        rects.borrow_mut().viewport = Viewport::new(800.0, 400.0);
        host.fire(HostEvent::Resize);

        assert_eq!(overlay.position().map(|p| p.placement), Some(Placement::Top));
    }

    #[test]
    fn detached_anchor_emits_none() {
        let host = ManualHost::new();
        let rects = rects();
        mount(&rects);
        let overlay = OverlayInstance::new(rects.clone(), host.clone(), PlacementRequest::default());
        let (seen, sink) = recorder();
        let _sub = overlay.subscribe(sink);
        overlay.open();
        host.run_deferred();

        rects.borrow_mut().detach_anchor();
        overlay.invalidate();

        assert_eq!(seen.borrow().last().copied(), Some(None));
        assert_eq!(overlay.position(), None);
        assert!(overlay.is_open());
    }

    #[test]
    fn events_while_closed_do_nothing() {
        let host = ManualHost::new();
        let overlay = OverlayInstance::new(rects(), host.clone(), PlacementRequest::default());
        let (seen, sink) = recorder();
        let _sub = overlay.subscribe(sink);

        overlay.invalidate();
        assert_eq!(host.fire(HostEvent::Scroll), 0);

        assert!(seen.borrow().is_empty());
        assert_eq!(overlay.state(), LifecycleState::Closed);
    }

    #[test]
    fn dropping_the_guard_unsubscribes() {
        let host = ManualHost::new();
        let overlay = OverlayInstance::new(rects(), host.clone(), PlacementRequest::default());
        let (seen, sink) = recorder();
        let sub = overlay.subscribe(sink);
        assert_eq!(overlay.subscriber_count(), 1);

        drop(sub);
        overlay.open();

        assert_eq!(overlay.subscriber_count(), 0);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn late_subscriber_gets_current_position() {
        let host = ManualHost::new();
        let rects = rects();
        mount(&rects);
        let overlay = OverlayInstance::new(rects, host.clone(), PlacementRequest::default());
        overlay.open();
        host.run_deferred();

        let (seen, sink) = recorder();
        let _sub = overlay.subscribe(sink);

        assert_eq!(seen.borrow().as_slice(), &[overlay.position()]);
    }

    #[test]
    fn set_request_recomputes_when_open() {
        let host = ManualHost::new();
        let rects = rects();
        mount(&rects);
        let overlay = OverlayInstance::new(rects, host.clone(), PlacementRequest::default());
        overlay.open();
        host.run_deferred();

        overlay.set_request(PlacementRequest::new(Placement::Right));

        assert_eq!(overlay.position().map(|p| p.placement), Some(Placement::Right));
        assert_eq!(overlay.request().placement, Placement::Right);
    }

    #[test]
    fn submenu_and_menu_recompute_independently() {
        let host = ManualHost::new();
        let menu_rects = rects();
        mount(&menu_rects);
        let item_rects = Rc::new(RefCell::new(FixedRects::new(
            Rect::new(140.0, 110.0, 200.0, 28.0),
            Rect::new(0.0, 0.0, 180.0, 120.0),
            Viewport::new(800.0, 768.0),
        )));

        let menu = OverlayInstance::new(menu_rects, host.clone(), PlacementRequest::default());
        let submenu = OverlayInstance::new(
            item_rects,
            host.clone(),
            PlacementRequest::new(Placement::Right),
        );
        menu.open();
        submenu.open();
        host.run_deferred();
        assert_eq!(host.listener_count(HostEvent::Scroll), 2);

        submenu.close();
        assert_eq!(host.listener_count(HostEvent::Scroll), 1);
        assert_eq!(host.fire(HostEvent::Resize), 1);
        assert!(menu.position().is_some());
        assert_eq!(submenu.position(), None);
    }

    #[test]
    fn closing_from_inside_a_callback_is_safe() {
        let host = ManualHost::new();
        let rects = rects();
        mount(&rects);
        let overlay = Rc::new(OverlayInstance::new(
            rects,
            host.clone(),
            PlacementRequest::default(),
        ));
        overlay.open();
        host.run_deferred();

        let weak = Rc::downgrade(&overlay);
        let _sub = overlay.subscribe(move |update| {
            if update.is_some() {
                if let Some(overlay) = weak.upgrade() {
                    overlay.close();
                }
            }
        });

        assert_eq!(overlay.state(), LifecycleState::Closed);
        assert_eq!(host.listener_count(HostEvent::Scroll), 0);
    }

    #[test]
    fn subscribers_after_a_closing_one_see_nothing() {
        let host = ManualHost::new();
        let rects = rects();
        mount(&rects);
        let overlay = Rc::new(OverlayInstance::new(
            rects,
            host.clone(),
            PlacementRequest::default(),
        ));

        let weak = Rc::downgrade(&overlay);
        let _closer = overlay.subscribe(move |update| {
            if update.is_some() {
                if let Some(overlay) = weak.upgrade() {
                    overlay.close();
                }
            }
        });
        let (seen, sink) = recorder();
        let _watcher = overlay.subscribe(sink);

        overlay.open();

        assert_eq!(overlay.state(), LifecycleState::Closed);
        assert!(seen.borrow().is_empty());
    }

    /// Source that runs a one-shot hook the next time the anchor is measured
    struct HookedSource {
        rects: FixedRects,
        on_measure: RefCell<Option<Box<dyn FnOnce()>>>,
    }

    impl HookedSource {
        fn new() -> Rc<Self> {
            Rc::new(Self {
                rects: FixedRects::new(
                    Rect::new(100.0, 100.0, 120.0, 30.0),
                    Rect::new(0.0, 0.0, 200.0, 150.0),
                    Viewport::new(800.0, 768.0),
                ),
                on_measure: RefCell::new(None),
            })
        }

        fn arm(&self, hook: impl FnOnce() + 'static) {
            *self.on_measure.borrow_mut() = Some(Box::new(hook));
        }
    }

    impl RectSource for HookedSource {
        fn anchor_rect(&self) -> RectResult<Rect> {
            let hook = self.on_measure.borrow_mut().take();
            if let Some(hook) = hook {
                hook();
            }
            self.rects.anchor_rect()
        }

        fn content_rect(&self) -> Rect {
            self.rects.content_rect()
        }

        fn viewport(&self) -> Viewport {
            self.rects.viewport()
        }
    }

    #[test]
    fn close_during_measurement_releases_everything() {
        let host = ManualHost::new();
        let source = HookedSource::new();
        let overlay = Rc::new(OverlayInstance::new(
            source.clone(),
            host.clone(),
            PlacementRequest::default(),
        ));
        overlay.open();
        host.run_deferred();
        let (seen, sink) = recorder();
        let _sub = overlay.subscribe(sink);

        let weak = Rc::downgrade(&overlay);
        source.arm(move || {
            if let Some(overlay) = weak.upgrade() {
                overlay.close();
            }
        });
        overlay.invalidate();

        assert_eq!(overlay.state(), LifecycleState::Closed);
        assert_eq!(host.listener_count(HostEvent::Scroll), 0);
        assert_eq!(host.listener_count(HostEvent::Resize), 0);
        assert_eq!(overlay.position(), None);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn request_changed_during_measurement_is_applied() {
        let host = ManualHost::new();
        let source = HookedSource::new();
        let overlay = Rc::new(OverlayInstance::new(
            source.clone(),
            host.clone(),
            PlacementRequest::default(),
        ));
        let (seen, sink) = recorder();
        let _sub = overlay.subscribe(sink);

        let weak = Rc::downgrade(&overlay);
        source.arm(move || {
            if let Some(overlay) = weak.upgrade() {
                overlay.set_request(PlacementRequest::new(Placement::Right));
            }
        });
        overlay.open();

        assert_eq!(overlay.position().map(|p| p.placement), Some(Placement::Right));
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn reopening_during_measurement_keeps_one_set_of_listeners() {
        let host = ManualHost::new();
        let source = HookedSource::new();
        let overlay = Rc::new(OverlayInstance::new(
            source.clone(),
            host.clone(),
            PlacementRequest::default(),
        ));
        overlay.open();
        host.run_deferred();

        let weak = Rc::downgrade(&overlay);
        source.arm(move || {
            if let Some(overlay) = weak.upgrade() {
                overlay.close();
                overlay.open();
            }
        });
        overlay.invalidate();

        assert!(overlay.is_open());
        assert_eq!(host.listener_count(HostEvent::Scroll), 1);
        assert!(overlay.position().is_some());
    }

    #[test]
    fn resolve_reads_fresh_measurements_without_opening() {
        let host = ManualHost::new();
        let rects = rects();
        mount(&rects);
        let overlay = OverlayInstance::new(rects.clone(), host.clone(), PlacementRequest::default());

        let result = overlay.resolve().unwrap();
        assert_eq!(result.top, 134.0);
        assert_eq!(result.placement, Placement::Bottom);
        assert_eq!(overlay.state(), LifecycleState::Closed);
        assert_eq!(overlay.position(), None);
        assert_eq!(host.listener_count(HostEvent::Resize), 0);

        rects.borrow_mut().detach_anchor();
        assert_eq!(overlay.resolve(), None);
    }

    fn arb_trigger() -> impl Strategy<Value = Trigger> {
        prop_oneof![
            Just(Trigger::Open),
            Just(Trigger::Mounted),
            Just(Trigger::Resize),
            Just(Trigger::Scroll),
            Just(Trigger::Invalidate),
            Just(Trigger::Close),
        ]
    }

    proptest! {
        #[test]
        fn prop_listeners_held_iff_open(
            triggers in prop::collection::vec(arb_trigger(), 0..40)
        ) {
            let host = ManualHost::new();
            let rects = rects();
            mount(&rects);
            let overlay = OverlayInstance::new(rects, host.clone(), PlacementRequest::default());

            for trigger in triggers {
                match trigger {
                    Trigger::Open => overlay.open(),
                    Trigger::Close => overlay.close(),
                    Trigger::Mounted => {
                        host.run_deferred();
                    }
                    Trigger::Resize => {
                        host.fire(HostEvent::Resize);
                    }
                    Trigger::Scroll => {
                        host.fire(HostEvent::Scroll);
                    }
                    Trigger::Invalidate => overlay.invalidate(),
                }

                let expected = usize::from(overlay.is_open());
                prop_assert_eq!(host.listener_count(HostEvent::Resize), expected);
                prop_assert_eq!(host.listener_count(HostEvent::Scroll), expected);
                prop_assert_eq!(overlay.position().is_some(), overlay.is_open());
            }
        }
    }

    #[test]
    fn dropping_the_instance_releases_listeners() {
        let host = ManualHost::new();
        let overlay = OverlayInstance::new(rects(), host.clone(), PlacementRequest::default());
        overlay.open();

        drop(overlay);

        assert_eq!(host.listener_count(HostEvent::Resize), 0);
        assert_eq!(host.listener_count(HostEvent::Scroll), 0);
        assert_eq!(host.pending_tasks(), 0);
    }
}
