//! End-to-end pipeline tests over real GeoJSON files.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tempfile::TempDir;

use curblabel::matching::MatchMode;
use curblabel::pipeline::{self, PipelineConfig};
use curblabel::PipelineError;

fn write_collection(dir: &Path, name: &str, features: Vec<Value>) -> PathBuf {
    let path = dir.join(name);
    let collection = json!({
        "type": "FeatureCollection",
        "features": features,
    });
    fs::write(&path, serde_json::to_string_pretty(&collection).unwrap()).unwrap();
    path
}

fn sign(lon: f64, lat: f64, label: &str) -> Value {
    json!({
        "type": "Feature",
        "geometry": {"type": "Point", "coordinates": [lon, lat]},
        "properties": {"regulation_type": label},
    })
}

fn curb(id: &str, coords: Vec<[f64; 2]>) -> Value {
    json!({
        "type": "Feature",
        "geometry": {"type": "LineString", "coordinates": coords},
        "properties": {"label": id, "block": "100"},
    })
}

/// Three touching segments, one sign near the first, plus an isolated
/// segment far away.
fn chain_inputs(dir: &Path) -> (PathBuf, PathBuf) {
    let signs = write_collection(
        dir,
        "signs.geojson",
        vec![
            sign(0.0002, 37.770_01, "No Parking"),
            // Excluded category, must never become a source.
            sign(0.0028, 37.770_01, "Street Cleaning 8am-10am"),
        ],
    );
    let curbs = write_collection(
        dir,
        "curbs.geojson",
        vec![
            curb("a", vec![[0.0, 37.77], [0.001, 37.77]]),
            curb("b", vec![[0.001, 37.77], [0.002, 37.77]]),
            curb("c", vec![[0.002, 37.77], [0.003, 37.77]]),
            curb("isolated", vec![[1.0, 38.0], [1.001, 38.0]]),
        ],
    );
    (signs, curbs)
}

fn read_features(path: &Path) -> Vec<Value> {
    let collection: Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(collection["type"], "FeatureCollection");
    collection["features"].as_array().unwrap().clone()
}

fn property<'a>(feature: &'a Value, key: &str) -> &'a Value {
    &feature["properties"][key]
}

#[test]
fn chain_labels_propagate_and_isolated_gets_sentinel() {
    let dir = TempDir::new().unwrap();
    let (signs, curbs) = chain_inputs(dir.path());
    let output = dir.path().join("labeled.geojson");

    let summary =
        pipeline::run(&signs, &curbs, &output, &PipelineConfig::default()).unwrap();

    assert_eq!(summary.total_segments, 4);
    assert_eq!(summary.qualifying_signs, 1);
    assert_eq!(summary.excluded_signs, 1);
    assert_eq!(summary.direct, 1);
    assert_eq!(summary.propagated, 2);
    assert_eq!(summary.unresolved, 1);
    assert!(summary.reached_fixpoint);

    let features = read_features(&output);
    assert_eq!(features.len(), 4);

    // Output order mirrors input order.
    for (feature, id) in features.iter().zip(["a", "b", "c", "isolated"]) {
        assert_eq!(property(feature, "label"), id);
    }

    for feature in &features[..3] {
        assert_eq!(property(feature, "regulation_type"), "No Parking");
        assert_eq!(property(feature, "assigned_automatically"), true);
    }
    // Only the direct assignment records a sign distance.
    assert!(property(&features[0], "distance_to_sign").is_f64());
    assert!(property(&features[1], "distance_to_sign").is_null());

    assert_eq!(property(&features[3], "regulation_type"), "Unknown");
    assert_eq!(property(&features[3], "assigned_automatically"), false);

    // Untouched passthrough properties survive.
    for feature in &features {
        assert_eq!(property(feature, "block"), "100");
    }
}

#[test]
fn all_signs_excluded_is_fatal_and_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let signs = write_collection(
        dir.path(),
        "signs.geojson",
        vec![sign(0.0002, 37.770_01, "Street Cleaning")],
    );
    let curbs = write_collection(
        dir.path(),
        "curbs.geojson",
        vec![curb("a", vec![[0.0, 37.77], [0.001, 37.77]])],
    );
    let output = dir.path().join("labeled.geojson");

    let err = pipeline::run(&signs, &curbs, &output, &PipelineConfig::default()).unwrap_err();
    assert!(matches!(err, PipelineError::NoValidSigns));
    assert!(!output.exists());
}

#[test]
fn missing_regulation_property_is_fatal() {
    let dir = TempDir::new().unwrap();
    let signs = write_collection(
        dir.path(),
        "signs.geojson",
        vec![json!({
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [0.0, 37.77]},
            "properties": {"name": "unrelated"},
        })],
    );
    let curbs = write_collection(
        dir.path(),
        "curbs.geojson",
        vec![curb("a", vec![[0.0, 37.77], [0.001, 37.77]])],
    );
    let output = dir.path().join("labeled.geojson");

    let err = pipeline::run(&signs, &curbs, &output, &PipelineConfig::default()).unwrap_err();
    assert!(matches!(err, PipelineError::MissingProperty("regulation_type")));
}

#[test]
fn malformed_curb_features_survive_to_output_with_sentinel() {
    let dir = TempDir::new().unwrap();
    let signs = write_collection(
        dir.path(),
        "signs.geojson",
        vec![sign(0.0002, 37.770_01, "No Parking")],
    );
    let curbs = write_collection(
        dir.path(),
        "curbs.geojson",
        vec![
            curb("good", vec![[0.0, 37.77], [0.001, 37.77]]),
            // Single-vertex polyline, geometrically unusable.
            curb("short", vec![[0.5, 37.77]]),
            json!({
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [0.5, 37.77]},
                "properties": {"label": "not-a-line"},
            }),
        ],
    );
    let output = dir.path().join("labeled.geojson");

    let summary =
        pipeline::run(&signs, &curbs, &output, &PipelineConfig::default()).unwrap();
    assert_eq!(summary.total_segments, 3);
    assert_eq!(summary.malformed_segments, 2);
    assert_eq!(summary.direct, 1);

    let features = read_features(&output);
    assert_eq!(features.len(), 3);
    assert_eq!(property(&features[1], "regulation_type"), "Unknown");
    assert_eq!(property(&features[2], "regulation_type"), "Unknown");

    // Input geometry is echoed, never rebuilt from parsed vertices.
    assert_eq!(features[1]["geometry"]["type"], "LineString");
    assert_eq!(
        features[1]["geometry"]["coordinates"].as_array().unwrap().len(),
        1
    );
    assert_eq!(features[2]["geometry"]["type"], "Point");
}

#[test]
fn non_linestring_geometry_round_trips_unchanged() {
    let dir = TempDir::new().unwrap();
    let signs = write_collection(
        dir.path(),
        "signs.geojson",
        vec![sign(0.0002, 37.770_01, "No Parking")],
    );
    let curbs = write_collection(
        dir.path(),
        "curbs.geojson",
        vec![
            curb("good", vec![[0.0, 37.77], [0.001, 37.77]]),
            json!({
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [0.5, 37.77]},
                "properties": {"label": "point"},
            }),
            json!({
                "type": "Feature",
                "geometry": null,
                "properties": {"label": "ghost"},
            }),
        ],
    );
    let output = dir.path().join("labeled.geojson");

    pipeline::run(&signs, &curbs, &output, &PipelineConfig::default()).unwrap();

    let features = read_features(&output);
    assert_eq!(features[0]["geometry"]["type"], "LineString");
    assert_eq!(features[1]["geometry"]["type"], "Point");
    assert_eq!(features[1]["geometry"]["coordinates"], json!([0.5, 37.77]));
    assert!(features[2]["geometry"].is_null());
    // Label results still apply on top of the untouched geometry.
    assert_eq!(property(&features[1], "regulation_type"), "Unknown");
    assert_eq!(property(&features[2], "regulation_type"), "Unknown");
}

#[test]
fn curb_to_sign_mode_honors_distance_threshold() {
    let dir = TempDir::new().unwrap();
    let signs = write_collection(
        dir.path(),
        "signs.geojson",
        // ~2m north of the near curb's start vertex.
        vec![sign(0.0, 37.770_018, "Loading Zone")],
    );
    let curbs = write_collection(
        dir.path(),
        "curbs.geojson",
        vec![
            curb("near", vec![[0.0, 37.77], [0.0001, 37.77]]),
            // Start vertex roughly a kilometer away.
            curb("far", vec![[0.01, 37.77], [0.0101, 37.77]]),
        ],
    );
    let output = dir.path().join("labeled.geojson");

    let mut config = PipelineConfig::default();
    config.matching.mode = MatchMode::CurbToSign;

    let summary = pipeline::run(&signs, &curbs, &output, &config).unwrap();
    assert_eq!(summary.direct, 1);

    let features = read_features(&output);
    assert_eq!(property(&features[0], "regulation_type"), "Loading Zone");
    let distance = property(&features[0], "distance_to_sign").as_f64().unwrap();
    assert!(distance > 0.0 && distance <= 8.0, "distance {}", distance);
    assert_eq!(property(&features[1], "regulation_type"), "Unknown");
}

#[test]
fn unusable_sign_labels_are_filtered_at_load() {
    let dir = TempDir::new().unwrap();
    let signs = write_collection(
        dir.path(),
        "signs.geojson",
        vec![
            sign(0.0002, 37.770_01, "  \u{1f}No Parking\u{1f}  "),
            sign(0.0005, 37.770_01, "nan"),
            sign(0.0006, 37.770_01, ""),
        ],
    );
    let curbs = write_collection(
        dir.path(),
        "curbs.geojson",
        vec![curb("a", vec![[0.0, 37.77], [0.001, 37.77]])],
    );
    let output = dir.path().join("labeled.geojson");

    let summary =
        pipeline::run(&signs, &curbs, &output, &PipelineConfig::default()).unwrap();
    assert_eq!(summary.qualifying_signs, 1);

    let features = read_features(&output);
    // Control characters and padding stripped before assignment.
    assert_eq!(property(&features[0], "regulation_type"), "No Parking");
}

#[test]
fn repeated_runs_produce_identical_output() {
    let dir = TempDir::new().unwrap();
    let (signs, curbs) = chain_inputs(dir.path());
    let out1 = dir.path().join("run1.geojson");
    let out2 = dir.path().join("run2.geojson");

    let config = PipelineConfig::default();
    let sum1 = pipeline::run(&signs, &curbs, &out1, &config).unwrap();
    let sum2 = pipeline::run(&signs, &curbs, &out2, &config).unwrap();

    assert_eq!(sum1, sum2);
    assert_eq!(
        fs::read_to_string(&out1).unwrap(),
        fs::read_to_string(&out2).unwrap()
    );
}
