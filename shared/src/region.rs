use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Identifier of a region within one loaded dataset (`state-<index>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegionId(String);

impl RegionId {
    pub fn from_index(index: usize) -> Self {
        Self(format!("state-{index}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegionStatus {
    Active,
    Growing,
    New,
}

impl RegionStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Growing => "Growing",
            Self::New => "New",
        }
    }
}

/// Visual treatment of the status badge. `New` and a missing status share the neutral look.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Active,
    Growing,
    Neutral,
}

impl BadgeTone {
    /// (background, foreground) CSS colors.
    pub fn colors(self) -> (&'static str, &'static str) {
        match self {
            Self::Active => ("rgba(34,197,94,0.2)", "#4ade80"),
            Self::Growing => ("rgba(59,130,246,0.2)", "#60a5fa"),
            Self::Neutral => ("#334155", "#cbd5e1"),
        }
    }
}

/// Business metadata shown in the tooltip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionMetadata {
    pub name: String,
    #[serde(default)]
    pub clients: Option<u32>,
    #[serde(default)]
    pub status: Option<RegionStatus>,
}

impl RegionMetadata {
    pub fn name_only(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            clients: None,
            status: None,
        }
    }

    pub fn clients_display(&self) -> u32 {
        self.clients.unwrap_or(0)
    }

    pub fn status_label(&self) -> &'static str {
        self.status.map_or("N/A", RegionStatus::label)
    }

    pub fn badge_tone(&self) -> BadgeTone {
        match self.status {
            Some(RegionStatus::Active) => BadgeTone::Active,
            Some(RegionStatus::Growing) => BadgeTone::Growing,
            Some(RegionStatus::New) | None => BadgeTone::Neutral,
        }
    }
}

/// A projected region ready for rendering. Never mutated after load.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionShape {
    pub id: RegionId,
    /// SVG path commands in canvas space.
    pub path_data: String,
    pub centroid: (f64, f64),
    pub meta: RegionMetadata,
}

impl RegionShape {
    pub fn name(&self) -> &str {
        &self.meta.name
    }
}

/// Shared, immutable collection of shapes for one load.
///
/// Equality is pointer identity: two sets compare equal only if they are the
/// same allocation, so reactive memos keyed on a `ShapeSet` only fire when a
/// load replaces the whole collection.
#[derive(Debug, Clone)]
pub struct ShapeSet(Arc<[RegionShape]>);

impl ShapeSet {
    pub fn new(shapes: Vec<RegionShape>) -> Self {
        Self(shapes.into())
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn find(&self, id: &RegionId) -> Option<&RegionShape> {
        self.0.iter().find(|shape| &shape.id == id)
    }
}

impl Default for ShapeSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl Deref for ShapeSet {
    type Target = [RegionShape];

    fn deref(&self) -> &[RegionShape] {
        &self.0
    }
}

impl PartialEq for ShapeSet {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
