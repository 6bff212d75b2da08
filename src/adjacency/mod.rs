//! Endpoint-adjacency graph over curb segments.
//!
//! Two segments are adjacent iff any endpoint (first or last vertex) of
//! one lies within a small tolerance of any endpoint of the other. The
//! graph is symmetric, built once per run, and treated as immutable
//! afterwards.
//!
//! Two builders are provided:
//! - `build_naive`: O(S²) all-pairs endpoint comparison
//! - `build_indexed`: R-tree over endpoints, O(S log S)
//!
//! Both must produce the identical neighbor sets.

use std::collections::HashSet;

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use serde::Deserialize;

use crate::core::GeoPoint;
use crate::features::CurbSegment;

/// Adjacency builder configuration.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct AdjacencyConfig {
    /// Endpoint proximity tolerance in raw coordinate units.
    pub tolerance: f64,
}

impl Default for AdjacencyConfig {
    fn default() -> Self {
        Self { tolerance: 1e-6 }
    }
}

/// A segment endpoint stored in the R-tree.
#[derive(Clone, Copy, Debug)]
struct Endpoint {
    position: [f64; 2],
    segment_index: usize,
}

impl RTreeObject for Endpoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

impl PointDistance for Endpoint {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.position[0] - point[0];
        let dy = self.position[1] - point[1];
        dx * dx + dy * dy
    }
}

/// Symmetric segment-index → neighbor-set mapping.
#[derive(Clone, Debug, PartialEq)]
pub struct AdjacencyGraph {
    neighbors: Vec<HashSet<usize>>,
}

impl AdjacencyGraph {
    /// Build the graph with the indexed builder.
    pub fn build(segments: &[CurbSegment], config: &AdjacencyConfig) -> Self {
        Self::build_indexed(segments, config.tolerance)
    }

    /// All-pairs reference builder.
    pub fn build_naive(segments: &[CurbSegment], tolerance: f64) -> Self {
        let mut graph = Self::with_len(segments.len());
        let tol_sq = tolerance * tolerance;

        for i in 0..segments.len() {
            let Some(ends_i) = segment_endpoints(&segments[i]) else {
                continue;
            };
            for j in (i + 1)..segments.len() {
                let Some(ends_j) = segment_endpoints(&segments[j]) else {
                    continue;
                };
                let touching = ends_i.iter().any(|a| {
                    ends_j
                        .iter()
                        .any(|b| a.planar_distance_squared(b) <= tol_sq)
                });
                if touching {
                    graph.add_edge(i, j);
                }
            }
        }

        graph
    }

    /// Endpoint R-tree builder. Produces the same graph as
    /// [`AdjacencyGraph::build_naive`].
    pub fn build_indexed(segments: &[CurbSegment], tolerance: f64) -> Self {
        let mut graph = Self::with_len(segments.len());
        let tol_sq = tolerance * tolerance;

        let endpoints: Vec<Endpoint> = segments
            .iter()
            .enumerate()
            .filter_map(|(i, s)| segment_endpoints(s).map(|ends| (i, ends)))
            .flat_map(|(i, ends)| {
                ends.into_iter().map(move |p| Endpoint {
                    position: [p.x, p.y],
                    segment_index: i,
                })
            })
            .collect();

        let tree = RTree::bulk_load(endpoints.clone());

        for endpoint in &endpoints {
            for other in tree.locate_within_distance(endpoint.position, tol_sq) {
                if other.segment_index != endpoint.segment_index {
                    graph.add_edge(endpoint.segment_index, other.segment_index);
                }
            }
        }

        graph
    }

    fn with_len(len: usize) -> Self {
        Self {
            neighbors: vec![HashSet::new(); len],
        }
    }

    fn add_edge(&mut self, a: usize, b: usize) {
        self.neighbors[a].insert(b);
        self.neighbors[b].insert(a);
    }

    /// Neighbor set of a segment.
    pub fn neighbors(&self, index: usize) -> &HashSet<usize> {
        &self.neighbors[index]
    }

    /// Whether two segments share an endpoint within tolerance.
    pub fn is_adjacent(&self, a: usize, b: usize) -> bool {
        self.neighbors[a].contains(&b)
    }

    /// Number of segments the graph was built over.
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    /// Check if the graph covers no segments.
    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    /// Total number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.neighbors.iter().map(|n| n.len()).sum::<usize>() / 2
    }
}

/// First and last vertex of a valid polyline.
fn segment_endpoints(segment: &CurbSegment) -> Option<[GeoPoint; 2]> {
    if !segment.is_valid_polyline() {
        return None;
    }
    Some([segment.vertices[0], *segment.vertices.last()?])
}
