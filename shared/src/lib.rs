pub mod config;
pub mod error;
pub mod geometry;
pub mod hover;
pub mod metadata;
pub mod projection;
pub mod region;

pub use config::MapConfig;
pub use error::LoadError;
pub use hover::{HoverState, TooltipState};
pub use metadata::{MetadataEntry, MetadataTable};
pub use region::*;
