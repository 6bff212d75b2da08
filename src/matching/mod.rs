//! Nearest-match resolver.
//!
//! Matches signs and curb segments in either direction:
//! - [`sign_to_curb`]: per sign, the nearest curb polyline (with the
//!   projection used later to order signs along a segment)
//! - [`curb_to_sign`]: per curb start vertex, the nearest sign within a
//!   metric threshold
//!
//! Matching never mutates its inputs. Indexed paths must agree with the
//! brute-force scans on identical inputs.

pub mod config;
pub mod curb_to_sign;
pub mod sign_to_curb;
pub mod spatial_index;

pub use config::{MatchConfig, MatchMode};
pub use curb_to_sign::{nearest_sign_brute, nearest_sign_within, SignIndex};
pub use sign_to_curb::{nearest_curb_brute, nearest_curb_indexed, CurbMatch};
pub use spatial_index::CurbSpatialIndex;
