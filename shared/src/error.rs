use thiserror::Error;

/// Why a boundary dataset could not be turned into region shapes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    #[error("fetch error: {0}")]
    Fetch(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("dataset is not a FeatureCollection")]
    NotFeatureCollection,
}

impl From<geojson::Error> for LoadError {
    fn from(err: geojson::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
