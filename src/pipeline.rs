//! End-to-end labeling pipeline.
//!
//! Wires the stages together: load signs and curbs, build the endpoint
//! adjacency graph, run direct assignment and propagation, write the
//! labeled collection back out.

use std::fs;
use std::path::Path;

use log::info;
use serde::Deserialize;

use crate::adjacency::{AdjacencyConfig, AdjacencyGraph};
use crate::assign::{AssignConfig, AssignmentSummary, LabelEngine};
use crate::error::Result;
use crate::io::{load_curbs, load_signs};
use crate::matching::MatchConfig;

/// Aggregate configuration for one pipeline run, loadable from a TOML
/// file with every section and field optional.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Nearest-match resolver settings.
    pub matching: MatchConfig,
    /// Assignment and propagation settings.
    pub assignment: AssignConfig,
    /// Endpoint adjacency settings.
    pub adjacency: AdjacencyConfig,
}

impl PipelineConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(basic_toml::from_str(&contents)?)
    }
}

/// Run the full pipeline from input paths to an output file.
///
/// Returns the assignment summary for reporting. Fatal conditions
/// (unreadable input, no valid signs) surface as errors; per-feature
/// anomalies are logged and counted.
pub fn run(
    signs_path: &Path,
    curbs_path: &Path,
    output_path: &Path,
    config: &PipelineConfig,
) -> Result<AssignmentSummary> {
    let sign_report = load_signs(signs_path)?;
    let curb_report = load_curbs(curbs_path)?;
    let mut segments = curb_report.segments;

    let graph = AdjacencyGraph::build(&segments, &config.adjacency);
    info!(
        "adjacency graph: {} segments, {} edges",
        graph.len(),
        graph.edge_count()
    );

    let engine = LabelEngine::new(config.matching.clone(), config.assignment.clone());
    let summary = engine.run(&sign_report.signs, &mut segments, &graph)?;

    crate::io::write_curbs(output_path, &segments)?;

    info!(
        "labeled {}/{} segments ({} direct, {} propagated, {} unresolved) in {} rounds",
        summary.direct + summary.propagated,
        summary.total_segments,
        summary.direct,
        summary.propagated,
        summary.unresolved,
        summary.rounds
    );
    Ok(summary)
}
