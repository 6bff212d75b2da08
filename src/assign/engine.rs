//! Label assignment and neighbor propagation.
//!
//! The engine owns the full working set of segments for one run:
//!
//! 1. **Direct assignment**: every segment whose nearest qualifying
//!    sign can be resolved (mode-dependent, see
//!    [`crate::matching::MatchMode`]) takes that sign's label.
//! 2. **Propagation**: unlabeled segments adopt a neighbor's label when
//!    their labeled neighbors agree on exactly one distinct label.
//!    Rounds repeat until a fixpoint or the iteration cap.
//!
//! A round's assignments are buffered and applied only after the full
//! scan, so newly labeled segments become visible to the *next* round
//! only. This keeps results deterministic and independent of the
//! in-round iteration order.

use std::collections::HashSet;

use log::{debug, warn};

use super::AssignConfig;
use crate::adjacency::AdjacencyGraph;
use crate::core::haversine_distance;
use crate::error::{PipelineError, Result};
use crate::features::{CurbSegment, LabelState, SignPoint};
use crate::matching::{
    nearest_curb_brute, nearest_curb_indexed, nearest_sign_within, CurbSpatialIndex, MatchConfig,
    MatchMode, SignIndex,
};

/// Segment count above which sign→curb matching goes through the R-tree.
/// Below this, the brute-force scan is cheaper than building the index.
const MIN_SEGMENTS_FOR_INDEX: usize = 32;

/// Counters reported after one engine run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AssignmentSummary {
    /// Segments in the working set.
    pub total_segments: usize,
    /// Segments skipped for malformed geometry.
    pub malformed_segments: usize,
    /// Signs that survived excluded-category filtering.
    pub qualifying_signs: usize,
    /// Signs dropped by excluded-category filtering.
    pub excluded_signs: usize,
    /// Segments labeled directly from a sign.
    pub direct: usize,
    /// Segments labeled by neighbor propagation.
    pub propagated: usize,
    /// Segments still unlabeled at termination (reported via sentinel).
    pub unresolved: usize,
    /// Propagation rounds that made at least one assignment.
    pub rounds: usize,
    /// Whether propagation reached a fixpoint (a full pass with zero
    /// assignments) rather than the iteration cap.
    pub reached_fixpoint: bool,
}

/// Label assignment and propagation engine.
#[derive(Clone, Debug)]
pub struct LabelEngine {
    match_config: MatchConfig,
    assign_config: AssignConfig,
}

impl LabelEngine {
    /// Create an engine from its two configuration halves.
    pub fn new(match_config: MatchConfig, assign_config: AssignConfig) -> Self {
        Self {
            match_config,
            assign_config,
        }
    }

    /// Run direct assignment and propagation over the working set.
    ///
    /// Signs are read-only; segments are mutated in place. Fails when no
    /// qualifying sign remains after excluded-category filtering, since
    /// there is nothing to assign from.
    pub fn run(
        &self,
        signs: &[SignPoint],
        segments: &mut [CurbSegment],
        graph: &AdjacencyGraph,
    ) -> Result<AssignmentSummary> {
        let mut summary = AssignmentSummary {
            total_segments: segments.len(),
            ..Default::default()
        };

        // Per-segment warnings were already emitted at load time; the
        // engine only counts.
        summary.malformed_segments = segments
            .iter()
            .filter(|s| !s.is_valid_polyline())
            .count();
        if summary.malformed_segments > 0 {
            debug!(
                "{} of {} segments have malformed geometry and are skipped",
                summary.malformed_segments,
                segments.len()
            );
        }

        let qualifying: Vec<&SignPoint> = signs
            .iter()
            .filter(|s| !self.assign_config.is_excluded(&s.label))
            .collect();
        summary.qualifying_signs = qualifying.len();
        summary.excluded_signs = signs.len() - qualifying.len();
        debug!(
            "{} of {} signs qualify as assignment sources",
            qualifying.len(),
            signs.len()
        );

        if qualifying.is_empty() {
            return Err(PipelineError::NoValidSigns);
        }

        match self.match_config.mode {
            MatchMode::SignToCurb => self.assign_sign_to_curb(&qualifying, segments),
            MatchMode::CurbToSign => self.assign_curb_to_sign(&qualifying, segments),
        }
        summary.direct = segments.iter().filter(|s| s.state.is_labeled()).count();

        let (rounds, propagated, reached_fixpoint) = self.propagate(segments, graph);
        summary.rounds = rounds;
        summary.propagated = propagated;
        summary.reached_fixpoint = reached_fixpoint;
        summary.unresolved = segments.len() - summary.direct - summary.propagated;

        Ok(summary)
    }

    /// Snap every qualifying sign onto its nearest segment, then give
    /// each segment the label of the snapped sign closest to its start
    /// (smallest arc length; exact ties keep the earliest sign in input
    /// order).
    fn assign_sign_to_curb(&self, qualifying: &[&SignPoint], segments: &mut [CurbSegment]) {
        let index = if segments.len() >= MIN_SEGMENTS_FOR_INDEX {
            Some(CurbSpatialIndex::build(segments))
        } else {
            None
        };

        // (arc_length, label, metric distance) of the current best sign
        // per segment.
        let mut best: Vec<Option<(f64, &str, f64)>> = vec![None; segments.len()];

        for sign in qualifying {
            let matched = match &index {
                Some(idx) => nearest_curb_indexed(sign.position, segments, idx),
                None => nearest_curb_brute(sign.position, segments),
            };
            let Some(m) = matched else { continue };

            let distance_m = haversine_distance(sign.position, m.projection.point);
            let slot = &mut best[m.segment_index];
            let better = match slot {
                Some((arc, _, _)) => m.projection.arc_length < *arc,
                None => true,
            };
            if better {
                *slot = Some((m.projection.arc_length, sign.label.as_str(), distance_m));
            }
        }

        for (segment, slot) in segments.iter_mut().zip(best) {
            if let Some((_, label, distance_m)) = slot {
                segment.state = LabelState::Direct {
                    label: label.to_string(),
                    distance_m,
                };
            }
        }
    }

    /// For each valid segment, look up the nearest qualifying sign from
    /// its start vertex; accept within the metric threshold.
    fn assign_curb_to_sign(&self, qualifying: &[&SignPoint], segments: &mut [CurbSegment]) {
        let owned: Vec<SignPoint> = qualifying.iter().map(|&s| s.clone()).collect();
        let index = SignIndex::build(&owned);

        for segment in segments.iter_mut() {
            let Some(start) = segment.start() else { continue };
            if !segment.is_valid_polyline() {
                continue;
            }

            if let Some((sign_index, distance_m)) =
                nearest_sign_within(start, &owned, &index, self.match_config.max_distance_m)
            {
                segment.state = LabelState::Direct {
                    label: owned[sign_index].label.clone(),
                    distance_m,
                };
            }
        }
    }

    /// Iterate propagation rounds until fixpoint or cap.
    ///
    /// Returns `(rounds_with_assignments, total_propagated, reached_fixpoint)`.
    fn propagate(
        &self,
        segments: &mut [CurbSegment],
        graph: &AdjacencyGraph,
    ) -> (usize, usize, bool) {
        let cap = self
            .assign_config
            .max_iterations
            .unwrap_or(segments.len());

        let mut rounds = 0;
        let mut total = 0;

        while rounds < cap {
            // Two-phase: collect this round's assignments against the
            // labels as they stood at the round boundary.
            let mut pending: Vec<(usize, String)> = Vec::new();

            for (i, segment) in segments.iter().enumerate() {
                if segment.state.is_labeled() || !segment.is_valid_polyline() {
                    continue;
                }

                let neighbor_labels: HashSet<&str> = graph
                    .neighbors(i)
                    .iter()
                    .filter_map(|&n| segments[n].state.label())
                    .collect();

                if neighbor_labels.len() == 1 {
                    let label = neighbor_labels.into_iter().next().unwrap_or_default();
                    pending.push((i, label.to_string()));
                }
            }

            if pending.is_empty() {
                debug!("propagation reached fixpoint after {} rounds", rounds);
                return (rounds, total, true);
            }

            debug!(
                "propagation round {}: {} assignments",
                rounds + 1,
                pending.len()
            );
            total += pending.len();
            for (i, label) in pending {
                segments[i].state = LabelState::Propagated { label };
            }
            rounds += 1;
        }

        let remaining = segments.iter().filter(|s| !s.state.is_labeled()).count();
        if remaining > 0 {
            warn!(
                "propagation stopped at iteration cap {} with {} segments unlabeled",
                cap, remaining
            );
        }
        (rounds, total, remaining == 0)
    }
}
