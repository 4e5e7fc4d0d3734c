use nesta_shared::geometry::regions_from_geojson;
use nesta_shared::{LoadError, MapConfig, MetadataTable, ShapeSet};

const CONFIG_ELEMENT_ID: &str = "map-config";

/// Read the page's inline `<script id="map-config">` JSON block.
/// Missing block means defaults; a malformed one is logged and ignored.
pub fn read_config() -> MapConfig {
    let Some(raw) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|element| element.text_content())
    else {
        return MapConfig::default();
    };
    if raw.trim().is_empty() {
        return MapConfig::default();
    }
    match MapConfig::from_json(&raw) {
        Ok(config) => config,
        Err(e) => {
            web_sys::console::warn_1(
                &format!("map config ignored, using defaults: {e}").into(),
            );
            MapConfig::default()
        }
    }
}

/// GET the boundary dataset as text.
pub async fn fetch_geojson(url: &str) -> Result<String, LoadError> {
    let resp = gloo_net::http::Request::get(url)
        .send()
        .await
        .map_err(|e| LoadError::Fetch(e.to_string()))?;

    if !resp.ok() {
        return Err(LoadError::Status(resp.status()));
    }

    resp.text()
        .await
        .map_err(|e| LoadError::Fetch(e.to_string()))
}

/// Fetch, parse and project the configured dataset.
pub async fn load_regions(
    config: &MapConfig,
    table: &MetadataTable,
) -> Result<ShapeSet, LoadError> {
    let raw = fetch_geojson(&config.geojson_url).await?;
    let build = regions_from_geojson(&raw, config, table)?;
    if build.skipped > 0 {
        web_sys::console::info_1(
            &format!("skipped {} features without polygon geometry", build.skipped).into(),
        );
    }
    web_sys::console::info_1(&format!("loaded {} regions", build.shapes.len()).into());
    Ok(ShapeSet::new(build.shapes))
}
