//! Boundary dataset → projected region shapes.

use std::fmt::Write;

use geo::{BoundingRect, Centroid, Coord, Geometry, LineString, MultiPolygon, Polygon};
use geojson::{Feature, FeatureCollection, GeoJson};

use crate::config::MapConfig;
use crate::error::LoadError;
use crate::metadata::MetadataTable;
use crate::projection::{Bounds, FitTransform, Mercator};
use crate::region::{RegionId, RegionShape};

const UNKNOWN_REGION_NAME: &str = "Unknown region";

/// Result of processing one dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionBuild {
    pub shapes: Vec<RegionShape>,
    /// Features dropped for lacking polygonal geometry.
    pub skipped: usize,
}

/// Parse a GeoJSON document, requiring a top-level FeatureCollection.
pub fn parse_collection(raw: &str) -> Result<FeatureCollection, LoadError> {
    match raw.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => Ok(collection),
        _ => Err(LoadError::NotFeatureCollection),
    }
}

pub fn regions_from_geojson(
    raw: &str,
    config: &MapConfig,
    table: &MetadataTable,
) -> Result<RegionBuild, LoadError> {
    let collection = parse_collection(raw)?;
    Ok(build_regions(collection, config, table))
}

/// Project every feature into the configured canvas and attach metadata.
///
/// The projection is fit to the bounds of all polygonal features together, so
/// region positions are relative to the whole dataset. Ids come from the
/// feature's index in the collection and stay unique when features are skipped.
pub fn build_regions(
    collection: FeatureCollection,
    config: &MapConfig,
    table: &MetadataTable,
) -> RegionBuild {
    let mut bounds = Bounds::empty();
    let mut projected = Vec::with_capacity(collection.features.len());
    let mut skipped = 0;

    for (index, feature) in collection.features.into_iter().enumerate() {
        let name = feature_name(&feature, &config.name_keys)
            .unwrap_or(UNKNOWN_REGION_NAME)
            .to_string();
        let polygons = feature_polygons(feature);
        if polygons.0.is_empty() {
            skipped += 1;
            continue;
        }
        let raw = map_multi_polygon(&polygons, |x, y| {
            let (px, py) = Mercator.project(x, y);
            bounds.include(px, py);
            (px, py)
        });
        projected.push((index, name, raw));
    }

    let fit = FitTransform::fit_extent(&bounds, config.width, config.height, config.margin);
    let mut shapes = Vec::with_capacity(projected.len());

    for (index, name, raw) in projected {
        let canvas = map_multi_polygon(&raw, |x, y| fit.apply(x, y));
        let path_data = path_data(&canvas);
        if path_data.is_empty() {
            skipped += 1;
            continue;
        }
        let centroid = shape_centroid(&canvas, config.width, config.height);
        shapes.push(RegionShape {
            id: RegionId::from_index(index),
            path_data,
            centroid,
            meta: table.resolve(&name),
        });
    }

    RegionBuild { shapes, skipped }
}

/// First non-empty string property among `keys`.
pub fn feature_name<'a>(feature: &'a Feature, keys: &[String]) -> Option<&'a str> {
    let props = feature.properties.as_ref()?;
    keys.iter()
        .filter_map(|key| props.get(key).and_then(|v| v.as_str()))
        .find(|name| !name.is_empty())
}

fn feature_polygons(feature: Feature) -> MultiPolygon<f64> {
    let Some(geometry) = feature.geometry else {
        return MultiPolygon(Vec::new());
    };
    let Ok(geometry) = Geometry::<f64>::try_from(geometry.value) else {
        return MultiPolygon(Vec::new());
    };
    let mut polygons = Vec::new();
    collect_polygons(geometry, &mut polygons);
    // Degenerate rings would still widen the fit bounds without drawing anything.
    let polygons = polygons
        .into_iter()
        .filter(|polygon| is_drawable(polygon.exterior()))
        .map(|polygon| {
            let (exterior, interiors) = polygon.into_inner();
            let interiors = interiors.into_iter().filter(is_drawable).collect();
            Polygon::new(exterior, interiors)
        })
        .collect();
    MultiPolygon(polygons)
}

/// A ring needs at least two distinct coordinates to produce a path.
fn is_drawable(ring: &LineString<f64>) -> bool {
    let Some(first) = ring.0.first() else {
        return false;
    };
    ring.0.iter().any(|c| c != first)
}

fn collect_polygons(geometry: Geometry<f64>, out: &mut Vec<Polygon<f64>>) {
    match geometry {
        Geometry::Polygon(polygon) => out.push(polygon),
        Geometry::MultiPolygon(multi) => out.extend(multi.0),
        Geometry::GeometryCollection(collection) => {
            for inner in collection.0 {
                collect_polygons(inner, out);
            }
        }
        _ => {}
    }
}

fn map_multi_polygon(
    multi: &MultiPolygon<f64>,
    mut f: impl FnMut(f64, f64) -> (f64, f64),
) -> MultiPolygon<f64> {
    let mut map_ring = |ring: &LineString<f64>| -> LineString<f64> {
        ring.0
            .iter()
            .map(|c| {
                let (x, y) = f(c.x, c.y);
                Coord { x, y }
            })
            .collect::<Vec<_>>()
            .into()
    };
    let polygons = multi
        .0
        .iter()
        .map(|polygon| {
            let exterior = map_ring(polygon.exterior());
            let interiors = polygon.interiors().iter().map(&mut map_ring).collect();
            Polygon::new(exterior, interiors)
        })
        .collect();
    MultiPolygon(polygons)
}

/// Area-weighted centroid in canvas space, clamped to the canvas.
fn shape_centroid(multi: &MultiPolygon<f64>, width: f64, height: f64) -> (f64, f64) {
    let (x, y) = match multi.centroid() {
        Some(point) if point.x().is_finite() && point.y().is_finite() => (point.x(), point.y()),
        _ => multi
            .bounding_rect()
            .map(|rect| (rect.center().x, rect.center().y))
            .unwrap_or((width / 2.0, height / 2.0)),
    };
    (x.clamp(0.0, width), y.clamp(0.0, height))
}

/// Serialize polygons as SVG path commands, one closed subpath per ring.
pub fn path_data(multi: &MultiPolygon<f64>) -> String {
    let mut out = String::new();
    for polygon in &multi.0 {
        write_ring(&mut out, polygon.exterior());
        for interior in polygon.interiors() {
            write_ring(&mut out, interior);
        }
    }
    out
}

fn write_ring(buf: &mut String, ring: &LineString<f64>) {
    let mut coords = ring.0.as_slice();
    if coords.len() > 1 && coords.first() == coords.last() {
        coords = &coords[..coords.len() - 1];
    }
    if coords.len() < 2 {
        return;
    }
    for (i, c) in coords.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        let _ = write!(buf, "{cmd}{},{}", round2(c.x), round2(c.y));
    }
    buf.push('Z');
}

fn round2(v: f64) -> f64 {
    let r = (v * 100.0).round() / 100.0;
    // Avoid "-0" in the output.
    if r == 0.0 { 0.0 } else { r }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use serde_json::json;

    use super::*;
    use crate::metadata::MetadataEntry;
    use crate::region::RegionStatus;

    fn square(lon: f64, lat: f64, size: f64) -> serde_json::Value {
        json!([[
            [lon, lat],
            [lon + size, lat],
            [lon + size, lat + size],
            [lon, lat + size],
            [lon, lat]
        ]])
    }

    fn collection(features: Vec<serde_json::Value>) -> FeatureCollection {
        let raw = json!({ "type": "FeatureCollection", "features": features }).to_string();
        parse_collection(&raw).expect("fixture should parse")
    }

    fn polygon_feature(props: serde_json::Value, lon: f64, lat: f64) -> serde_json::Value {
        json!({
            "type": "Feature",
            "properties": props,
            "geometry": { "type": "Polygon", "coordinates": square(lon, lat, 2.0) }
        })
    }

    fn alpha_table() -> MetadataTable {
        MetadataTable::new([(
            "Alpha".to_string(),
            MetadataEntry {
                clients: Some(10),
                status: Some(RegionStatus::Active),
            },
        )])
    }

    #[test]
    fn builds_one_shape_per_polygon_feature() {
        let fc = collection(vec![
            polygon_feature(json!({"st_nm": "Alpha"}), 72.0, 18.0),
            polygon_feature(json!({"st_nm": "Beta"}), 76.0, 12.0),
        ]);
        let build = build_regions(fc, &MapConfig::default(), &alpha_table());
        assert_eq!(build.skipped, 0);
        assert_eq!(build.shapes.len(), 2);

        let alpha = &build.shapes[0];
        assert_eq!(alpha.id.as_str(), "state-0");
        assert_eq!(alpha.meta.clients, Some(10));
        assert_eq!(alpha.meta.status, Some(RegionStatus::Active));
        assert!(alpha.path_data.starts_with('M'));
        assert!(alpha.path_data.ends_with('Z'));

        let beta = &build.shapes[1];
        assert_eq!(beta.name(), "Beta");
        assert_eq!(beta.meta.clients_display(), 0);
        assert_eq!(beta.meta.status_label(), "N/A");
    }

    #[test]
    fn ids_are_unique_and_centroids_stay_on_canvas() {
        let features = (0..40)
            .map(|i| {
                let lon = 68.0 + (i % 8) as f64 * 3.5;
                let lat = 8.0 + (i / 8) as f64 * 5.5;
                polygon_feature(json!({ "NAME_1": format!("Region {i}") }), lon, lat)
            })
            .collect();
        let config = MapConfig::default();
        let build = build_regions(collection(features), &config, &MetadataTable::builtin());
        assert_eq!(build.shapes.len(), 40);

        let ids: HashSet<_> = build.shapes.iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids.len(), build.shapes.len());

        for shape in &build.shapes {
            let (x, y) = shape.centroid;
            assert!((0.0..=800.0).contains(&x), "x out of bounds: {x}");
            assert!((0.0..=1000.0).contains(&y), "y out of bounds: {y}");
            assert!(!shape.path_data.is_empty());
        }
    }

    #[test]
    fn projected_geometry_respects_fit_margin() {
        let fc = collection(vec![
            polygon_feature(json!({"st_nm": "West"}), 70.0, 10.0),
            polygon_feature(json!({"st_nm": "East"}), 90.0, 30.0),
        ]);
        let build = build_regions(fc, &MapConfig::default(), &MetadataTable::default());
        for shape in &build.shapes {
            for token in shape.path_data.split(['M', 'L', 'Z']).filter(|t| !t.is_empty()) {
                let (x, y) = token.split_once(',').expect("coordinate pair");
                let x: f64 = x.parse().expect("x");
                let y: f64 = y.parse().expect("y");
                assert!((19.99..=780.01).contains(&x), "x outside margin: {x}");
                assert!((19.99..=980.01).contains(&y), "y outside margin: {y}");
            }
        }
    }

    #[test]
    fn north_is_up_on_canvas() {
        let fc = collection(vec![
            polygon_feature(json!({"st_nm": "South"}), 78.0, 8.0),
            polygon_feature(json!({"st_nm": "North"}), 78.0, 30.0),
        ]);
        let build = build_regions(fc, &MapConfig::default(), &MetadataTable::default());
        let south = build.shapes[0].centroid;
        let north = build.shapes[1].centroid;
        assert!(north.1 < south.1);
    }

    #[test]
    fn degenerate_features_do_not_shift_the_fit() {
        let dot = json!({
            "type": "Feature",
            "properties": {"st_nm": "Dot"},
            "geometry": { "type": "Polygon", "coordinates": [[[10.0, 10.0], [10.0, 10.0]]] }
        });
        let real = || {
            vec![
                polygon_feature(json!({"st_nm": "Alpha"}), 72.0, 18.0),
                polygon_feature(json!({"st_nm": "Beta"}), 76.0, 12.0),
            ]
        };
        let config = MapConfig::default();
        let table = MetadataTable::default();
        let clean = build_regions(collection(real()), &config, &table);

        let mut with_dot = real();
        with_dot.insert(0, dot);
        let noisy = build_regions(collection(with_dot), &config, &table);

        assert_eq!(noisy.skipped, 1);
        let clean_paths: Vec<&str> = clean.shapes.iter().map(|s| s.path_data.as_str()).collect();
        let noisy_paths: Vec<&str> = noisy.shapes.iter().map(|s| s.path_data.as_str()).collect();
        assert_eq!(noisy_paths, clean_paths);
        assert_eq!(noisy.shapes[0].centroid, clean.shapes[0].centroid);
    }

    #[test]
    fn name_falls_back_through_property_keys() {
        let fc = collection(vec![
            polygon_feature(json!({"st_nm": "", "state": "Gamma", "NAME_1": "Ignored"}), 72.0, 18.0),
            polygon_feature(json!({"NAME_1": "Delta"}), 76.0, 12.0),
            polygon_feature(json!({"other": "x"}), 80.0, 20.0),
        ]);
        let build = build_regions(fc, &MapConfig::default(), &MetadataTable::default());
        let names: Vec<&str> = build.shapes.iter().map(RegionShape::name).collect();
        assert_eq!(names, vec!["Gamma", "Delta", UNKNOWN_REGION_NAME]);
    }

    #[test]
    fn non_polygonal_features_are_skipped_without_reusing_ids() {
        let fc = collection(vec![
            json!({
                "type": "Feature",
                "properties": {"st_nm": "Capital"},
                "geometry": {"type": "Point", "coordinates": [77.2, 28.6]}
            }),
            json!({"type": "Feature", "properties": {"st_nm": "Void"}, "geometry": null}),
            polygon_feature(json!({"st_nm": "Alpha"}), 72.0, 18.0),
        ]);
        let build = build_regions(fc, &MapConfig::default(), &MetadataTable::default());
        assert_eq!(build.skipped, 2);
        assert_eq!(build.shapes.len(), 1);
        assert_eq!(build.shapes[0].id.as_str(), "state-2");
    }

    #[test]
    fn multipolygon_emits_a_subpath_per_ring() {
        let fc = collection(vec![json!({
            "type": "Feature",
            "properties": {"st_nm": "Islands"},
            "geometry": {
                "type": "MultiPolygon",
                "coordinates": [square(92.0, 10.0, 1.0), square(93.0, 12.0, 1.0)]
            }
        })]);
        let build = build_regions(fc, &MapConfig::default(), &MetadataTable::default());
        let path = &build.shapes[0].path_data;
        assert_eq!(path.matches('M').count(), 2);
        assert_eq!(path.matches('Z').count(), 2);
        // Closing coordinate is implied by Z.
        assert_eq!(path.matches('L').count(), 6);
    }

    #[test]
    fn parse_rejects_non_collections_and_garbage() {
        let feature = polygon_feature(json!({"st_nm": "Alpha"}), 72.0, 18.0).to_string();
        assert_eq!(
            parse_collection(&feature).err(),
            Some(LoadError::NotFeatureCollection)
        );
        assert!(matches!(
            parse_collection("<html>rate limited</html>"),
            Err(LoadError::Parse(_))
        ));
    }

    #[test]
    fn empty_collection_builds_no_shapes() {
        let build = build_regions(collection(Vec::new()), &MapConfig::default(), &alpha_table());
        assert!(build.shapes.is_empty());
        assert_eq!(build.skipped, 0);
    }

    #[test]
    fn path_coordinates_are_rounded() {
        let ring: LineString<f64> = vec![(0.004, -0.001), (10.126, 0.0), (10.0, 5.557)].into();
        let multi = MultiPolygon(vec![Polygon::new(ring, Vec::new())]);
        assert_eq!(path_data(&multi), "M0,0L10.13,0L10,5.56Z");
    }
}
