//! GeoJSON FeatureCollection reading and writing.
//!
//! A deliberately thin layer over serde_json: its only contract is to
//! produce a set of sign points and a set of curb segments with their
//! property maps, and to write the updated segments back out. Unreadable
//! or structurally malformed files are fatal; individual bad features
//! are skipped with a warning.

use std::fs;
use std::path::Path;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::GeoPoint;
use crate::error::{PipelineError, Result};
use crate::features::{clean_label, CurbSegment, LabelState, SignPoint, UNKNOWN_LABEL};

/// Property carrying the regulation category on sign features and
/// written back onto curb features.
pub const REGULATION_PROPERTY: &str = "regulation_type";

/// Property carrying the curb segment identifier.
pub const SEGMENT_ID_PROPERTY: &str = "label";

#[derive(Debug, Serialize, Deserialize)]
struct FeatureCollection {
    #[serde(rename = "type")]
    kind: String,
    features: Vec<Feature>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Feature {
    #[serde(rename = "type")]
    kind: String,
    /// Kept as a raw value so unsupported geometry types degrade to a
    /// per-feature warning instead of failing the whole parse, and so
    /// the input geometry can be echoed into the output untouched.
    geometry: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    properties: Option<Map<String, Value>>,
}

/// Counters from loading the sign collection.
#[derive(Debug, Default)]
pub struct SignLoadReport {
    /// Usable signs with cleaned labels.
    pub signs: Vec<SignPoint>,
    /// Features present in the input file.
    pub total_features: usize,
    /// Features dropped for an invalid or missing label.
    pub invalid_labels: usize,
    /// Features dropped for non-Point or unparseable geometry.
    pub skipped_geometry: usize,
}

/// Counters from loading the curb collection.
#[derive(Debug, Default)]
pub struct CurbLoadReport {
    /// Working set of segments, one per input feature.
    pub segments: Vec<CurbSegment>,
    /// Features whose geometry was not a usable LineString.
    pub malformed_geometry: usize,
}

fn read_collection(path: &Path) -> Result<FeatureCollection> {
    let contents = fs::read_to_string(path)?;
    let collection: FeatureCollection = serde_json::from_str(&contents)?;
    if collection.kind != "FeatureCollection" {
        return Err(PipelineError::NotFeatureCollection(collection.kind));
    }
    Ok(collection)
}

fn parse_position(value: &Value) -> Option<GeoPoint> {
    let coords = value.as_array()?;
    if coords.len() < 2 {
        return None;
    }
    Some(GeoPoint::new(coords[0].as_f64()?, coords[1].as_f64()?))
}

fn parse_line(value: &Value) -> Option<Vec<GeoPoint>> {
    value
        .as_array()?
        .iter()
        .map(parse_position)
        .collect::<Option<Vec<_>>>()
}

/// Load regulation sign points.
///
/// Signs with empty or unusable labels are filtered here, at the
/// source, so an invalid label can never be assigned downstream. It is
/// fatal when the regulation property is absent from every feature.
pub fn load_signs(path: &Path) -> Result<SignLoadReport> {
    let collection = read_collection(path)?;
    let mut report = SignLoadReport {
        total_features: collection.features.len(),
        ..Default::default()
    };
    let mut saw_property = false;

    for (i, feature) in collection.features.iter().enumerate() {
        // Property presence is recorded before the geometry guard, so a
        // file of bad geometries is not misdiagnosed as missing the
        // regulation property.
        let raw_label = feature
            .properties
            .as_ref()
            .and_then(|p| p.get(REGULATION_PROPERTY));
        if raw_label.is_some() {
            saw_property = true;
        }

        let position = match &feature.geometry {
            Some(g) if g["type"] == "Point" => parse_position(&g["coordinates"]),
            _ => None,
        };
        let Some(position) = position else {
            warn!("sign feature {} has non-Point or unparseable geometry, skipping", i);
            report.skipped_geometry += 1;
            continue;
        };

        match raw_label.and_then(Value::as_str).and_then(clean_label) {
            Some(label) => report.signs.push(SignPoint::new(position, label)),
            None => {
                debug!("sign feature {} has no usable label, skipping", i);
                report.invalid_labels += 1;
            }
        }
    }

    if !saw_property && !collection.features.is_empty() {
        return Err(PipelineError::MissingProperty(REGULATION_PROPERTY));
    }

    info!(
        "loaded {} signs ({} usable, {} invalid labels, {} bad geometries)",
        report.total_features,
        report.signs.len(),
        report.invalid_labels,
        report.skipped_geometry
    );
    Ok(report)
}

/// Load curb segments.
///
/// Every input feature becomes a working-set segment so the output
/// collection has the same cardinality as the input; features without a
/// usable LineString keep an empty vertex list and are skipped by the
/// geometric stages.
pub fn load_curbs(path: &Path) -> Result<CurbLoadReport> {
    let collection = read_collection(path)?;
    let mut report = CurbLoadReport::default();

    for (i, feature) in collection.features.into_iter().enumerate() {
        let vertices = match &feature.geometry {
            Some(g) if g["type"] == "LineString" => {
                parse_line(&g["coordinates"]).unwrap_or_default()
            }
            _ => Vec::new(),
        };
        if vertices.len() < 2 {
            warn!("curb feature {} is not a usable LineString", i);
            report.malformed_geometry += 1;
        }

        let properties = feature.properties.unwrap_or_default();
        let id = match properties.get(SEGMENT_ID_PROPERTY) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => {
                debug!("curb feature {} has no id property, synthesizing", i);
                format!("feature-{}", i)
            }
        };

        let mut segment = CurbSegment::new(id, vertices);
        segment.properties = properties;
        segment.geometry = feature.geometry.unwrap_or(Value::Null);
        report.segments.push(segment);
    }

    info!(
        "loaded {} curb segments ({} malformed geometries)",
        report.segments.len(),
        report.malformed_geometry
    );
    Ok(report)
}

/// Write the updated curb collection.
///
/// Input geometry is echoed into the output untouched, whatever its
/// type. Each segment's properties are echoed with the label result
/// applied: the assigned category (or the `"Unknown"` sentinel),
/// whether it was assigned automatically, and for direct assignments
/// the great-circle distance to the source sign in meters.
pub fn write_curbs(path: &Path, segments: &[CurbSegment]) -> Result<()> {
    let features: Vec<Feature> = segments
        .iter()
        .map(|segment| {
            let mut properties = segment.properties.clone();

            match &segment.state {
                LabelState::Unlabeled => {
                    properties.insert(
                        REGULATION_PROPERTY.to_string(),
                        Value::String(UNKNOWN_LABEL.to_string()),
                    );
                    properties.insert("assigned_automatically".to_string(), Value::Bool(false));
                }
                LabelState::Direct { label, distance_m } => {
                    properties
                        .insert(REGULATION_PROPERTY.to_string(), Value::String(label.clone()));
                    properties.insert("assigned_automatically".to_string(), Value::Bool(true));
                    if let Some(n) = serde_json::Number::from_f64(*distance_m) {
                        properties.insert("distance_to_sign".to_string(), Value::Number(n));
                    }
                }
                LabelState::Propagated { label } => {
                    properties
                        .insert(REGULATION_PROPERTY.to_string(), Value::String(label.clone()));
                    properties.insert("assigned_automatically".to_string(), Value::Bool(true));
                }
            }

            // Only segments built in code (no raw geometry) get a
            // LineString synthesized from their vertices.
            let geometry = if segment.geometry.is_null() {
                segment.is_valid_polyline().then(|| {
                    serde_json::json!({
                        "type": "LineString",
                        "coordinates": segment
                            .vertices
                            .iter()
                            .map(|v| serde_json::json!([v.x, v.y]))
                            .collect::<Vec<_>>(),
                    })
                })
            } else {
                Some(segment.geometry.clone())
            };

            Feature {
                kind: "Feature".to_string(),
                geometry,
                properties: Some(properties),
            }
        })
        .collect();

    let collection = FeatureCollection {
        kind: "FeatureCollection".to_string(),
        features,
    };

    fs::write(path, serde_json::to_string_pretty(&collection)?)?;
    info!("wrote {} segments to {}", segments.len(), path.display());
    Ok(())
}
