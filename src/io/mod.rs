//! Reading and writing GeoJSON feature collections.

pub mod geojson;

pub use geojson::{
    load_curbs, load_signs, write_curbs, CurbLoadReport, SignLoadReport, REGULATION_PROPERTY,
    SEGMENT_ID_PROPERTY,
};
