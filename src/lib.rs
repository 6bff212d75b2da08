//! Curb regulation labeling from street sign points.
//!
//! Given a GeoJSON collection of regulation signs (points) and one of
//! curb segments (polylines), this crate assigns each segment the
//! regulation of its nearest qualifying sign and then propagates labels
//! across touching segments until a fixpoint.
//!
//! # Architecture
//!
//! - [`core`]: planar and great-circle distance primitives, polyline
//!   projection
//! - [`features`]: sign and curb segment types, label cleaning and
//!   label state
//! - [`matching`]: nearest-match resolution in both directions, with
//!   spatial indices and brute-force reference paths
//! - [`adjacency`]: endpoint adjacency graph over segments
//! - [`assign`]: direct assignment plus round-based neighbor
//!   propagation
//! - [`io`]: GeoJSON FeatureCollection reading and writing
//! - [`pipeline`]: end-to-end orchestration
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use curblabel::pipeline::{self, PipelineConfig};
//!
//! let config = PipelineConfig::default();
//! let summary = pipeline::run(
//!     Path::new("signs.geojson"),
//!     Path::new("curbs.geojson"),
//!     Path::new("labeled.geojson"),
//!     &config,
//! )?;
//! println!("{} segments labeled directly", summary.direct);
//! # Ok::<(), curblabel::PipelineError>(())
//! ```

pub mod adjacency;
pub mod assign;
pub mod core;
pub mod error;
pub mod features;
pub mod io;
pub mod matching;
pub mod pipeline;

pub use adjacency::{AdjacencyConfig, AdjacencyGraph};
pub use assign::{AssignConfig, AssignmentSummary, LabelEngine};
pub use self::core::{haversine_distance, GeoPoint, EARTH_RADIUS_M};
pub use error::{PipelineError, Result};
pub use features::{CurbSegment, LabelState, SignPoint, UNKNOWN_LABEL};
pub use matching::{MatchConfig, MatchMode};
pub use pipeline::PipelineConfig;
