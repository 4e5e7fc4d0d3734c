//! SVG layers of the region map, bottom to top: definitions, static regions,
//! highlight, scan beam, reticle. Everything above the static layer ignores
//! pointer events so hover hit-testing only ever sees region paths.

use leptos::prelude::*;

use nesta_shared::{RegionId, RegionShape, ShapeSet};

use crate::animation::{
    HIGHLIGHT_FADE_MS, INNER_RING_PERIOD_MS, OUTER_RING_PERIOD_MS, Presence, ReticleMotion,
    ReticlePose, ScanSweep, Spin, ring_rotation, scale_about,
};
use crate::map::AnimationClock;
use crate::render_loop::now_ms;

pub const GRID_PATTERN_ID: &str = "grid-pattern";
pub const HOVER_GRADIENT_ID: &str = "hover-gradient";
pub const GLOW_FILTER_ID: &str = "glow";
pub const MAP_MASK_ID: &str = "map-mask";

const ACCENT_CYAN: &str = "#22d3ee";
const ACCENT_BLUE: &str = "#3b82f6";
const HIGHLIGHT_STROKE: &str = "#67e8f9";

/// Holes in multi-ring regions stay unfilled regardless of winding order.
const FILL_RULE: &str = "evenodd";
const GLOW_BLUR_RESULT: &str = "coloredBlur";
/// Blurred copy underneath, crisp stroke on top.
const GLOW_MERGE_INPUTS: [&str; 2] = [GLOW_BLUR_RESULT, "SourceGraphic"];

fn url(id: &str) -> String {
    format!("url(#{id})")
}

/// Highlight scale at visibility `level`: grows from 98% to full size.
pub fn highlight_scale(level: f64) -> f64 {
    0.98 + 0.02 * level
}

/// Shared SVG definitions: grid fill, hover gradient, glow filter and the
/// silhouette mask that confines the scan beam to land.
#[component]
pub fn MapDefs(shapes: Memo<ShapeSet>) -> impl IntoView {
    view! {
        <defs>
            <pattern id=GRID_PATTERN_ID width="40" height="40" patternUnits="userSpaceOnUse">
                <path d="M 40 0 L 0 0 0 40" fill="none" stroke="rgba(148,163,184,0.1)" stroke-width="0.5" />
                <circle cx="1" cy="1" r="1" fill="rgba(34,211,238,0.2)" />
            </pattern>
            <linearGradient id=HOVER_GRADIENT_ID x1="0%" y1="0%" x2="100%" y2="100%">
                <stop offset="0%" stop-color=ACCENT_CYAN stop-opacity="0.8" />
                <stop offset="100%" stop-color=ACCENT_BLUE stop-opacity="0.9" />
            </linearGradient>
            <filter id=GLOW_FILTER_ID x="-50%" y="-50%" width="200%" height="200%">
                <feGaussianBlur stdDeviation="4" result=GLOW_BLUR_RESULT />
                <feMerge>
                    {GLOW_MERGE_INPUTS
                        .iter()
                        .map(|input| view! { <feMergeNode in=*input /> })
                        .collect_view()}
                </feMerge>
            </filter>
            <mask id=MAP_MASK_ID>
                <g>
                    {move || {
                        shapes
                            .with(|set| {
                                set.iter()
                                    .map(|shape| view! { <path d=shape.path_data.clone() fill="white" fill-rule=FILL_RULE /> })
                                    .collect_view()
                            })
                    }}
                </g>
            </mask>
        </defs>
    }
}

/// Reactive body of the static layer: one path per region, each reporting
/// pointer enter/leave by id.
///
/// Reads only `shapes`, so it re-runs once per load no matter how often the
/// hover state changes.
pub fn static_region_paths(
    shapes: Memo<ShapeSet>,
    on_hover: Callback<RegionId>,
    on_leave: Callback<RegionId>,
) -> impl Fn() -> AnyView + Send + Sync + 'static {
    let fill = url(GRID_PATTERN_ID);
    move || {
        shapes.with(|set| {
            set.iter()
                .map(|shape| {
                    let enter_id = shape.id.clone();
                    let leave_id = shape.id.clone();
                    view! {
                        <path
                            class="region"
                            id=shape.id.to_string()
                            d=shape.path_data.clone()
                            fill=fill.clone()
                            fill-rule=FILL_RULE
                            stroke="rgba(56,189,248,0.2)"
                            stroke-width="0.5"
                            on:pointerenter=move |_| on_hover.run(enter_id.clone())
                            on:pointerleave=move |_| on_leave.run(leave_id.clone())
                        />
                    }
                })
                .collect_view()
                .into_any()
        })
    }
}

#[component]
pub fn StaticShapeLayer(
    shapes: Memo<ShapeSet>,
    on_hover: Callback<RegionId>,
    on_leave: Callback<RegionId>,
) -> impl IntoView {
    view! { <g class="static-regions">{static_region_paths(shapes, on_hover, on_leave)}</g> }
}

/// Glow and gradient fill over the active region. Switching regions fades the
/// old highlight out while the new one fades in.
#[component]
pub fn HighlightOverlay(active: Memo<Option<RegionShape>>) -> impl IntoView {
    let AnimationClock(clock) = expect_context::<AnimationClock>();
    let highlights = RwSignal::new(Presence::<RegionId, RegionShape>::new(HIGHLIGHT_FADE_MS));

    Effect::new(move || {
        let now = now_ms();
        match active.get() {
            Some(shape) => highlights.update(|h| h.show(shape.id.clone(), shape, now)),
            None => highlights.update(|h| h.hide(now)),
        }
    });

    Effect::new(move || {
        let now = clock.get();
        if highlights.with_untracked(|h| h.has_expired(now)) {
            highlights.update(|h| {
                h.prune(now);
            });
        }
    });

    view! {
        <g class="highlight-layer" pointer-events="none">
            <For
                each=move || {
                    highlights
                        .with(|h| {
                            h.entries()
                                .iter()
                                .map(|entry| (entry.serial, entry.value.clone()))
                                .collect::<Vec<_>>()
                        })
                }
                key=|item: &(u64, RegionShape)| item.0
                children=move |(serial, shape)| {
                    let level = move || highlights.with(|h| h.level_of(serial, clock.get()));
                    let centroid = shape.centroid;
                    view! {
                        <path
                            d=shape.path_data.clone()
                            fill="none"
                            fill-rule=FILL_RULE
                            stroke=ACCENT_CYAN
                            stroke-width="6"
                            stroke-opacity="0.3"
                            filter=url(GLOW_FILTER_ID)
                            opacity=move || format!("{:.3}", level())
                        />
                        <path
                            d=shape.path_data
                            fill=url(HOVER_GRADIENT_ID)
                            fill-rule=FILL_RULE
                            stroke=HIGHLIGHT_STROKE
                            stroke-width="2"
                            opacity=move || format!("{:.3}", level())
                            transform=move || scale_about(centroid, highlight_scale(level()))
                            style="filter: drop-shadow(0 0 10px rgba(34,211,238,0.5));"
                        />
                    }
                }
            />
        </g>
    }
}

/// Thin gradient bar sweeping across the landmass, clipped by the silhouette mask.
#[component]
pub fn ScanBeamOverlay(width: f64, height: f64) -> impl IntoView {
    let AnimationClock(clock) = expect_context::<AnimationClock>();
    let sweep = ScanSweep::across(width);
    view! {
        <g class="scan-beam" mask=url(MAP_MASK_ID) pointer-events="none">
            <rect
                y="0"
                width="10"
                height=height.to_string()
                fill=url(HOVER_GRADIENT_ID)
                opacity="0.3"
                x=move || format!("{:.2}", sweep.x_at(clock.get()))
            />
        </g>
    }
}

/// Rotating target rings that spring to the active region's centroid, and
/// sink back to the map center when nothing is hovered.
#[component]
pub fn ReticleOverlay(active: Memo<Option<RegionShape>>, center: (f64, f64)) -> impl IntoView {
    let AnimationClock(clock) = expect_context::<AnimationClock>();
    let motion = StoredValue::new(ReticleMotion::new(center));
    let pose = RwSignal::new(ReticlePose::hidden_at(center));

    Effect::new(move || {
        let now = clock.get();
        let target = active.with_untracked(|shape| shape.as_ref().map(|s| s.centroid));
        let Some(next) = motion.try_update_value(|m| m.advance(now, target)) else {
            return;
        };
        if pose.get_untracked() != next {
            pose.set(next);
        }
    });

    let rotate = move |period: f64, spin: Spin| {
        move || format!("rotate({:.2})", ring_rotation(clock.get(), period, spin))
    };

    view! {
        <g
            class="reticle"
            pointer-events="none"
            transform=move || pose.with(ReticlePose::transform)
            opacity=move || pose.with(|p| format!("{:.3}", p.opacity))
        >
            <circle
                r="40"
                fill="none"
                stroke=ACCENT_CYAN
                stroke-width="1"
                stroke-dasharray="4 6"
                opacity="0.6"
                transform=rotate(OUTER_RING_PERIOD_MS, Spin::Clockwise)
            />
            <circle
                r="32"
                fill="none"
                stroke=ACCENT_BLUE
                stroke-width="1"
                stroke-dasharray="20 20"
                opacity="0.4"
                transform=rotate(INNER_RING_PERIOD_MS, Spin::CounterClockwise)
            />
            <line x1="-10" y1="0" x2="10" y2="0" stroke=ACCENT_CYAN stroke-width="2" />
            <line x1="0" y1="-10" x2="0" y2="10" stroke=ACCENT_CYAN stroke-width="2" />
        </g>
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use nesta_shared::{HoverState, RegionMetadata};

    use super::*;
    use crate::lifecycle::{MapPhase, shape_source};

    fn shapes(names: &[&str]) -> ShapeSet {
        ShapeSet::new(
            names
                .iter()
                .enumerate()
                .map(|(index, name)| RegionShape {
                    id: RegionId::from_index(index),
                    path_data: "M0,0L10,0L10,10Z".to_string(),
                    centroid: (5.0, 5.0),
                    meta: RegionMetadata::name_only(*name),
                })
                .collect(),
        )
    }

    #[test]
    fn static_layer_renders_once_per_load() {
        let owner = Owner::new();
        owner.with(|| {
            let set = shapes(&["Alpha", "Beta"]);
            let phase = RwSignal::new(MapPhase::Ready(set.clone()));
            let hover = RwSignal::new(HoverState::default());
            let on_hover = Callback::new(move |id: RegionId| hover.update(|h| h.enter(id)));
            let on_leave = Callback::new(move |id: RegionId| hover.update(|h| h.leave(&id)));

            let render = static_region_paths(shape_source(phase), on_hover, on_leave);
            let renders = Arc::new(AtomicUsize::new(0));
            let layer = {
                let renders = Arc::clone(&renders);
                Memo::new(move |_| {
                    renders.fetch_add(1, Ordering::SeqCst);
                    let _ = render();
                })
            };
            layer.get_untracked();
            assert_eq!(renders.load(Ordering::SeqCst), 1);

            for index in 0..10 {
                let id = RegionId::from_index(index % 2);
                on_hover.run(id.clone());
                on_leave.run(id);
            }
            on_hover.run(RegionId::from_index(1));
            assert_eq!(hover.with_untracked(|h| h.active().cloned()), Some(RegionId::from_index(1)));
            // Re-setting the same collection is not a change either.
            phase.set(MapPhase::Ready(set.clone()));
            layer.get_untracked();
            assert_eq!(renders.load(Ordering::SeqCst), 1);

            phase.set(MapPhase::Ready(shapes(&["Gamma"])));
            layer.get_untracked();
            assert_eq!(renders.load(Ordering::SeqCst), 2);
        });
    }

    #[test]
    fn highlight_grows_to_full_size() {
        assert!((highlight_scale(0.0) - 0.98).abs() < 1e-12);
        assert!((highlight_scale(1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn glow_keeps_the_source_above_its_blur() {
        assert_eq!(GLOW_MERGE_INPUTS.first(), Some(&GLOW_BLUR_RESULT));
        assert_eq!(GLOW_MERGE_INPUTS.last(), Some(&"SourceGraphic"));
    }

    #[test]
    fn region_paths_use_even_odd_fill() {
        assert_eq!(FILL_RULE, "evenodd");
    }

    #[test]
    fn url_references_fragment() {
        assert_eq!(url(MAP_MASK_ID), "url(#map-mask)");
    }
}
