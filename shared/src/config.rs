use serde::{Deserialize, Serialize};

pub const DEFAULT_GEOJSON_URL: &str =
    "https://raw.githubusercontent.com/geohacker/india/master/state/india_state.geojson";

/// Settings for the presence map. Every field falls back to its default when
/// missing from the JSON block the page embeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub geojson_url: String,
    pub width: f64,
    pub height: f64,
    /// Inset kept clear on every side when fitting the projection.
    pub margin: f64,
    /// Feature property keys tried in order for the region name.
    pub name_keys: Vec<String>,
    /// Tooltip offset from the raw pointer position, in CSS pixels.
    pub tooltip_offset: (f64, f64),
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            geojson_url: DEFAULT_GEOJSON_URL.to_string(),
            width: 800.0,
            height: 1000.0,
            margin: 20.0,
            name_keys: vec!["st_nm".into(), "state".into(), "NAME_1".into()],
            tooltip_offset: (20.0, -20.0),
        }
    }
}

impl MapConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }

    pub fn view_box(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }
}
