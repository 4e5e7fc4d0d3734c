use leptos::html::Div;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;

use nesta_shared::{RegionMetadata, TooltipState};

use crate::animation::{Presence, TOOLTIP_FADE_MS};
use crate::map::AnimationClock;
use crate::render_loop::now_ms;

/// Where pointer positions come from. Abstracted so listener bookkeeping can be
/// tested without a browser.
pub trait PointerSource {
    type Binding;

    /// Start delivering pointer client coordinates to `on_move`.
    fn attach(&mut self, on_move: Box<dyn Fn(f64, f64)>) -> Option<Self::Binding>;

    fn detach(&mut self, binding: Self::Binding);
}

/// Keeps at most one pointer listener alive, and only while the tooltip is shown.
pub struct PointerTracker<S: PointerSource> {
    source: S,
    binding: Option<S::Binding>,
}

impl<S: PointerSource> PointerTracker<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            binding: None,
        }
    }

    #[cfg(test)]
    pub fn is_attached(&self) -> bool {
        self.binding.is_some()
    }

    /// Attach `on_move` unless a listener is already attached.
    pub fn show(&mut self, on_move: impl Fn(f64, f64) + 'static) {
        if self.binding.is_some() {
            return;
        }
        self.binding = self.source.attach(Box::new(on_move));
    }

    pub fn hide(&mut self) {
        if let Some(binding) = self.binding.take() {
            self.source.detach(binding);
        }
    }
}

impl<S: PointerSource> Drop for PointerTracker<S> {
    fn drop(&mut self) {
        self.hide();
    }
}

/// `pointermove` on the window.
#[derive(Debug, Default)]
pub struct WindowPointerSource;

pub struct WindowPointerBinding {
    window: web_sys::Window,
    handler: Closure<dyn Fn(web_sys::MouseEvent)>,
}

impl PointerSource for WindowPointerSource {
    type Binding = WindowPointerBinding;

    fn attach(&mut self, on_move: Box<dyn Fn(f64, f64)>) -> Option<WindowPointerBinding> {
        let window = web_sys::window()?;
        let handler = Closure::<dyn Fn(web_sys::MouseEvent)>::new(move |e: web_sys::MouseEvent| {
            on_move(e.client_x() as f64, e.client_y() as f64);
        });
        window
            .add_event_listener_with_callback("pointermove", handler.as_ref().unchecked_ref())
            .ok()?;
        Some(WindowPointerBinding { window, handler })
    }

    fn detach(&mut self, binding: WindowPointerBinding) {
        let _ = binding.window.remove_event_listener_with_callback(
            "pointermove",
            binding.handler.as_ref().unchecked_ref(),
        );
    }
}

/// Match the pointer listener to tooltip visibility. `on_move` is only built
/// when a listener is about to be attached; `None` leaves the tracker detached.
pub fn sync_pointer_tracking<S, F>(
    tracker: &mut PointerTracker<S>,
    state: &TooltipState,
    on_move: impl FnOnce() -> Option<F>,
) where
    S: PointerSource,
    F: Fn(f64, f64) + 'static,
{
    if state.displayed().is_none() {
        tracker.hide();
        return;
    }
    if tracker.binding.is_some() {
        return;
    }
    if let Some(on_move) = on_move() {
        tracker.show(on_move);
    }
}

pub fn anchor_transform(x: f64, y: f64, (dx, dy): (f64, f64)) -> String {
    format!("translate3d({}px, {}px, 0)", x + dx, y + dy)
}

/// Entry animation for a tooltip card at visibility `level`.
pub fn card_style(level: f64) -> String {
    let scale = 0.9 + 0.1 * level;
    let lift = (1.0 - level) * 10.0;
    format!("opacity: {level:.3}; transform: translateY({lift:.2}px) scale({scale:.4});")
}

/// Floating region card following the pointer.
///
/// The card fades between regions instead of snapping; a card that is fading
/// out keeps showing the region it was opened for.
#[component]
pub fn Tooltip(state: Memo<TooltipState>, offset: (f64, f64)) -> impl IntoView {
    let AnimationClock(clock) = expect_context::<AnimationClock>();
    let anchor = NodeRef::<Div>::new();
    let cards = RwSignal::new(Presence::<String, RegionMetadata>::new(TOOLTIP_FADE_MS));
    let tracker = StoredValue::new_local(PointerTracker::new(WindowPointerSource));

    Effect::new(move || {
        let current = state.get();
        let now = now_ms();
        match current.displayed().cloned() {
            Some(meta) => cards.update(|c| c.show(meta.name.clone(), meta, now)),
            None => cards.update(|c| c.hide(now)),
        }
        tracker.update_value(|tracker| {
            sync_pointer_tracking(tracker, &current, || {
                let el = anchor.get_untracked()?;
                Some(move |x: f64, y: f64| {
                    let _ = web_sys::HtmlElement::style(&el)
                        .set_property("transform", &anchor_transform(x, y, offset));
                })
            });
        });
    });

    Effect::new(move || {
        let now = clock.get();
        if cards.with_untracked(|c| c.has_expired(now)) {
            cards.update(|c| {
                c.prune(now);
            });
        }
    });

    on_cleanup(move || {
        tracker.try_update_value(PointerTracker::hide);
    });

    view! {
        <div
            node_ref=anchor
            class="region-tooltip"
            style="position: fixed; left: 0; top: 0; z-index: 50; pointer-events: none; will-change: transform;"
        >
            <For
                each=move || {
                    cards.with(|c| {
                        c.entries()
                            .iter()
                            .map(|entry| (entry.serial, entry.value.clone()))
                            .collect::<Vec<_>>()
                    })
                }
                key=|card: &(u64, RegionMetadata)| card.0
                children=move |(serial, meta)| {
                    let level = move || cards.with(|c| c.level_of(serial, clock.get()));
                    view! { <TooltipCard meta=meta style=Signal::derive(move || card_style(level())) /> }
                }
            />
        </div>
    }
}

#[component]
fn TooltipCard(meta: RegionMetadata, style: Signal<String>) -> impl IntoView {
    let (badge_bg, badge_fg) = meta.badge_tone().colors();
    let status = meta.status_label();
    let clients = meta.clients_display();
    view! {
        <div
            style=move || {
                format!(
                    "position: absolute; left: 0; top: 0; min-width: 200px; padding: 12px 14px; \
                     background: rgba(15,23,42,0.92); border: 1px solid rgba(34,211,238,0.3); \
                     border-radius: 10px; box-shadow: 0 10px 30px rgba(0,0,0,0.45); \
                     backdrop-filter: blur(8px); color: #e2e8f0; font-size: 13px; \
                     transform-origin: top left; {}",
                    style.get()
                )
            }
        >
            <div style="font-size: 15px; font-weight: 600; color: #fff; margin-bottom: 8px;">
                {meta.name}
            </div>
            <div style="display: flex; justify-content: space-between; gap: 16px; margin-bottom: 6px;">
                <span style="color: #94a3b8;">"Active Clients:"</span>
                <span style="color: #22d3ee; font-weight: 600;">{clients}</span>
            </div>
            <div style="display: flex; justify-content: space-between; align-items: center; gap: 16px;">
                <span style="color: #94a3b8;">"Status:"</span>
                <span style=format!(
                    "padding: 2px 8px; border-radius: 999px; font-size: 11px; font-weight: 600; background: {badge_bg}; color: {badge_fg};"
                )>{status}</span>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use nesta_shared::{HoverState, RegionId, RegionShape};

    use super::*;

    #[derive(Default)]
    struct Counters {
        live: Cell<usize>,
        attaches: Cell<usize>,
        last_handler: RefCell<Option<Box<dyn Fn(f64, f64)>>>,
    }

    struct CountingSource(Rc<Counters>);

    impl PointerSource for CountingSource {
        type Binding = ();

        fn attach(&mut self, on_move: Box<dyn Fn(f64, f64)>) -> Option<()> {
            self.0.live.set(self.0.live.get() + 1);
            self.0.attaches.set(self.0.attaches.get() + 1);
            *self.0.last_handler.borrow_mut() = Some(on_move);
            Some(())
        }

        fn detach(&mut self, _binding: ()) {
            self.0.live.set(self.0.live.get() - 1);
        }
    }

    struct RefusingSource;

    impl PointerSource for RefusingSource {
        type Binding = ();

        fn attach(&mut self, _on_move: Box<dyn Fn(f64, f64)>) -> Option<()> {
            None
        }

        fn detach(&mut self, _binding: ()) {
            unreachable!("nothing was attached");
        }
    }

    #[test]
    fn visibility_toggles_keep_listener_count_balanced() {
        let counters = Rc::new(Counters::default());
        let mut tracker = PointerTracker::new(CountingSource(Rc::clone(&counters)));
        for _ in 0..25 {
            tracker.show(|_, _| {});
            // Showing again while visible must not stack listeners.
            tracker.show(|_, _| {});
            assert_eq!(counters.live.get(), 1);
            tracker.hide();
            assert_eq!(counters.live.get(), 0);
            tracker.hide();
            assert_eq!(counters.live.get(), 0);
        }
        assert_eq!(counters.attaches.get(), 25);
    }

    #[test]
    fn dropping_a_visible_tracker_detaches() {
        let counters = Rc::new(Counters::default());
        {
            let mut tracker = PointerTracker::new(CountingSource(Rc::clone(&counters)));
            tracker.show(|_, _| {});
            assert!(tracker.is_attached());
        }
        assert_eq!(counters.live.get(), 0);
    }

    #[test]
    fn handler_receives_pointer_positions() {
        let counters = Rc::new(Counters::default());
        let seen = Rc::new(Cell::new((0.0, 0.0)));
        let mut tracker = PointerTracker::new(CountingSource(Rc::clone(&counters)));
        let sink = Rc::clone(&seen);
        tracker.show(move |x, y| sink.set((x, y)));
        if let Some(handler) = counters.last_handler.borrow().as_ref() {
            handler(120.0, 48.0);
        }
        assert_eq!(seen.get(), (120.0, 48.0));
    }

    #[test]
    fn failed_attach_is_not_counted_as_attached() {
        let mut tracker = PointerTracker::new(RefusingSource);
        tracker.show(|_, _| {});
        assert!(!tracker.is_attached());
        tracker.hide();
    }

    #[test]
    fn tooltip_visibility_drives_a_single_listener() {
        let owner = Owner::new();
        owner.with(|| {
            let hover = RwSignal::new(HoverState::default());
            let shapes = vec![RegionShape {
                id: RegionId::from_index(0),
                path_data: "M0,0L10,0L10,10Z".to_string(),
                centroid: (5.0, 5.0),
                meta: RegionMetadata::name_only("Alpha"),
            }];
            let state = Memo::new(move |_| hover.with(|h| TooltipState::from_hover(h, &shapes)));

            let counters = Rc::new(Counters::default());
            let mut tracker = PointerTracker::new(CountingSource(Rc::clone(&counters)));
            let sync = |tracker: &mut PointerTracker<CountingSource>| {
                let current = state.get_untracked();
                sync_pointer_tracking(tracker, &current, || Some(|_: f64, _: f64| {}));
            };

            sync(&mut tracker);
            assert_eq!(counters.live.get(), 0);

            for _ in 0..3 {
                hover.update(|h| h.enter(RegionId::from_index(0)));
                sync(&mut tracker);
                assert_eq!(counters.live.get(), 1);
                // Content refreshes while visible must not stack listeners.
                sync(&mut tracker);
                assert_eq!(counters.live.get(), 1);

                hover.update(|h| h.leave(&RegionId::from_index(0)));
                sync(&mut tracker);
                assert_eq!(counters.live.get(), 0);
            }
            assert_eq!(counters.attaches.get(), 3);
        });
    }

    #[test]
    fn missing_anchor_leaves_tracker_detached() {
        let counters = Rc::new(Counters::default());
        let mut tracker = PointerTracker::new(CountingSource(Rc::clone(&counters)));
        let visible = TooltipState {
            visible: true,
            content: Some(RegionMetadata::name_only("Alpha")),
        };
        sync_pointer_tracking(&mut tracker, &visible, || None::<fn(f64, f64)>);
        assert!(!tracker.is_attached());
        assert_eq!(counters.attaches.get(), 0);
    }

    #[test]
    fn anchor_follows_pointer_with_offset() {
        assert_eq!(
            anchor_transform(100.0, 200.0, (20.0, -20.0)),
            "translate3d(120px, 180px, 0)"
        );
    }

    #[test]
    fn card_style_runs_from_lowered_to_resting() {
        assert_eq!(
            card_style(0.0),
            "opacity: 0.000; transform: translateY(10.00px) scale(0.9000);"
        );
        assert_eq!(
            card_style(1.0),
            "opacity: 1.000; transform: translateY(0.00px) scale(1.0000);"
        );
    }
}
