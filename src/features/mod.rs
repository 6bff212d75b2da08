//! Feature types for the labeling pipeline.
//!
//! - [`SignPoint`]: immutable regulation sign point
//! - [`CurbSegment`]: curb polyline with mutable label state
//! - [`LabelState`]: per-segment assignment state and provenance

pub mod label;
pub mod segment;
pub mod sign;

pub use label::{clean_label, LabelState, UNKNOWN_LABEL};
pub use segment::CurbSegment;
pub use sign::SignPoint;
