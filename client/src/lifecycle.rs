use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;

use nesta_shared::{LoadError, ShapeSet};

/// Container state. Exactly one load per mount; `Ready` is terminal.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MapPhase {
    #[default]
    Loading,
    Ready(ShapeSet),
}

impl MapPhase {
    /// Terminal phase for a finished load. A failed load renders an empty map.
    pub fn settle(result: Result<ShapeSet, LoadError>) -> Self {
        Self::Ready(result.unwrap_or_default())
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn shapes(&self) -> ShapeSet {
        match self {
            Self::Loading => ShapeSet::empty(),
            Self::Ready(shapes) => shapes.clone(),
        }
    }
}

/// The shape collection every layer reads. Only notifies when a load swaps in a
/// new collection, so hover activity never re-runs the static layer.
pub fn shape_source(phase: RwSignal<MapPhase>) -> Memo<ShapeSet> {
    Memo::new(move |_| phase.with(MapPhase::shapes))
}

/// Cleared when the container unmounts; late async results check it first.
#[derive(Debug, Clone)]
pub struct MountGuard(Arc<AtomicBool>);

impl MountGuard {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_mounted(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn release(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for MountGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply a finished load unless the container is gone or already settled.
/// Returns whether the phase changed.
pub fn complete_load(
    phase: RwSignal<MapPhase>,
    guard: &MountGuard,
    result: Result<ShapeSet, LoadError>,
) -> bool {
    if !guard.is_mounted() {
        return false;
    }
    if phase.try_with_untracked(MapPhase::is_ready).unwrap_or(true) {
        return false;
    }
    phase.try_set(MapPhase::settle(result)).is_none()
}
