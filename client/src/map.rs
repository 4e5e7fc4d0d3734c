use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use nesta_shared::{HoverState, MetadataTable, RegionId, RegionShape, TooltipState};

use crate::layers::{HighlightOverlay, MapDefs, ReticleOverlay, ScanBeamOverlay, StaticShapeLayer};
use crate::lifecycle::{MapPhase, MountGuard, complete_load, shape_source};
use crate::loader;
use crate::render_loop::{RenderScheduler, now_ms};
use crate::tooltip::Tooltip;

/// Frame timestamp in milliseconds, advanced once per animation frame while the
/// map is ready. Overlays bind their time-based attributes to it.
#[derive(Clone, Copy)]
pub struct AnimationClock(pub RwSignal<f64>);

/// Interactive region map: loads the boundary dataset once, then renders the
/// static layer, animated overlays and the pointer-following tooltip.
#[component]
pub fn RegionMap() -> impl IntoView {
    let config = loader::read_config();
    let phase = RwSignal::new(MapPhase::Loading);
    let hover = RwSignal::new(HoverState::default());
    let clock = RwSignal::new(now_ms());
    provide_context(AnimationClock(clock));

    let ready = Memo::new(move |_| phase.with(MapPhase::is_ready));
    let shapes = shape_source(phase);
    let active_shape: Memo<Option<RegionShape>> = Memo::new(move |_| {
        hover.with(|h| {
            h.active()
                .and_then(|id| shapes.with(|set| set.find(id).cloned()))
        })
    });
    let tooltip = Memo::new(move |_| hover.with(|h| shapes.with(|set| TooltipState::from_hover(h, set))));

    let on_hover = Callback::new(move |id: RegionId| hover.update(|h| h.enter(id)));
    let on_leave = Callback::new(move |id: RegionId| hover.update(|h| h.leave(&id)));

    let guard = MountGuard::new();
    {
        let guard = guard.clone();
        on_cleanup(move || guard.release());
    }
    {
        let config = config.clone();
        Effect::new(move || {
            let config = config.clone();
            let guard = guard.clone();
            spawn_local(async move {
                let result = loader::load_regions(&config, &MetadataTable::builtin()).await;
                if let Err(e) = &result {
                    web_sys::console::warn_1(&format!("region dataset failed to load: {e}").into());
                }
                complete_load(phase, &guard, result);
            });
        });
    }

    let frames = StoredValue::new_local(RenderScheduler::new(move || clock.try_set(now_ms()).is_none()));
    Effect::new(move || {
        if ready.get() {
            frames.with_value(RenderScheduler::mark_dirty);
        }
    });

    let view_box = config.view_box();
    let (width, height) = (config.width, config.height);
    let center = config.center();
    let offset = config.tooltip_offset;

    view! {
        <div class="region-map" style="position: relative; width: 100%; max-width: 800px; margin: 0 auto;">
            <Show
                when=move || ready.get()
                fallback=|| view! {
                    <div class="map-loading" style="display: flex; align-items: center; justify-content: center; aspect-ratio: 4 / 5;">
                        <div class="map-spinner"></div>
                    </div>
                }
            >
                <div class="map-ambience"></div>
                <svg
                    class="map-surface"
                    viewBox=view_box.clone()
                    preserveAspectRatio="xMidYMid meet"
                    style="position: relative; display: block; width: 100%; height: auto;"
                >
                    <MapDefs shapes=shapes />
                    <StaticShapeLayer shapes=shapes on_hover=on_hover on_leave=on_leave />
                    <HighlightOverlay active=active_shape />
                    <ScanBeamOverlay width=width height=height />
                    <ReticleOverlay active=active_shape center=center />
                </svg>
                <Tooltip state=tooltip offset=offset />
            </Show>
        </div>
    }
}
