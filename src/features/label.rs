//! Regulation label cleaning and per-segment label state.

/// Sentinel written for segments that finish the run unlabeled.
///
/// Distinct from an absent/empty label: it marks "resolution attempted
/// and failed" rather than "not yet processed".
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Clean a raw regulation label from input properties.
///
/// Strips the U+001F control character sometimes embedded by upstream
/// exports, trims whitespace, and rejects empty or `"nan"` values.
/// Returns `None` for anything that is not a usable category string.
pub fn clean_label(raw: &str) -> Option<String> {
    let cleaned: String = raw.chars().filter(|&c| c != '\u{1f}').collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() || cleaned.eq_ignore_ascii_case("nan") {
        return None;
    }
    Some(cleaned.to_string())
}

/// Label state of a curb segment.
///
/// Valid transitions are `Unlabeled → Direct` and
/// `Unlabeled → Propagated` only. Once labeled, a segment is never
/// overwritten; propagation fills unlabeled segments exclusively.
#[derive(Clone, Debug, PartialEq)]
pub enum LabelState {
    /// No label assigned yet (or terminally unresolved).
    Unlabeled,
    /// Label taken from the nearest qualifying sign.
    Direct {
        /// Assigned regulation category.
        label: String,
        /// Great-circle distance to the source sign, in meters.
        distance_m: f64,
    },
    /// Label adopted from an adjacent segment. The original point-source
    /// lineage is not retained past the donating neighbor.
    Propagated {
        /// Assigned regulation category.
        label: String,
    },
}

impl LabelState {
    /// The assigned label, if any.
    pub fn label(&self) -> Option<&str> {
        match self {
            LabelState::Unlabeled => None,
            LabelState::Direct { label, .. } | LabelState::Propagated { label } => Some(label),
        }
    }

    /// Whether any label has been assigned.
    #[inline]
    pub fn is_labeled(&self) -> bool {
        !matches!(self, LabelState::Unlabeled)
    }

    /// Distance to the source sign for direct assignments.
    pub fn distance_m(&self) -> Option<f64> {
        match self {
            LabelState::Direct { distance_m, .. } => Some(*distance_m),
            _ => None,
        }
    }
}
