use crate::region::{RegionId, RegionMetadata, RegionShape};

/// Which region the pointer is over. At most one at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoverState {
    active: Option<RegionId>,
}

impl HoverState {
    pub fn active(&self) -> Option<&RegionId> {
        self.active.as_ref()
    }

    pub fn is_active(&self, id: &RegionId) -> bool {
        self.active.as_ref() == Some(id)
    }

    /// Pointer entered `id`. Replaces any previous region in one step.
    pub fn enter(&mut self, id: RegionId) {
        self.active = Some(id);
    }

    /// Pointer left `id`. A leave for a region that is no longer active is
    /// stale (its neighbour's enter already arrived) and is ignored.
    pub fn leave(&mut self, id: &RegionId) {
        if self.is_active(id) {
            self.active = None;
        }
    }
}

/// What the tooltip should show. `content` is meaningless while hidden.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TooltipState {
    pub visible: bool,
    pub content: Option<RegionMetadata>,
}

impl TooltipState {
    pub fn hidden() -> Self {
        Self::default()
    }

    pub fn from_hover(hover: &HoverState, shapes: &[RegionShape]) -> Self {
        let content = hover
            .active()
            .and_then(|id| shapes.iter().find(|shape| &shape.id == id))
            .map(|shape| shape.meta.clone());
        Self {
            visible: content.is_some(),
            content,
        }
    }

    /// Content to render, or `None` while hidden.
    pub fn displayed(&self) -> Option<&RegionMetadata> {
        self.content.as_ref().filter(|_| self.visible)
    }
}
