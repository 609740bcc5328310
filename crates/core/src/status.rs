//! Drawing status codes and the release-status gate.
//!
//! Provides the closed drawing status enumeration, the raw-code mapping
//! used when normalizing heterogeneous source rows, and the two-value
//! release-status domain enforced on field distribution updates.

use serde::Serialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Drawing status
// ---------------------------------------------------------------------------

/// Normalized drawing status.
///
/// Raw source rows carry free-form status codes; [`DrawingStatus::from_raw`]
/// maps them onto this closed set. Rows from the yet-to-release and
/// yet-to-return collections ignore their raw code entirely (see
/// `aggregate::map_source_row`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DrawingStatus {
    /// Approved.
    #[serde(rename = "APP")]
    App,
    /// Revise and resubmit.
    #[serde(rename = "REV")]
    Rev,
    /// Rejected.
    #[serde(rename = "REJ")]
    Rej,
    /// Pending review.
    #[serde(rename = "PND")]
    Pnd,
    /// For further use (not yet released).
    #[serde(rename = "FFU")]
    Ffu,
}

impl DrawingStatus {
    /// Return the status as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::App => "APP",
            Self::Rev => "REV",
            Self::Rej => "REJ",
            Self::Pnd => "PND",
            Self::Ffu => "FFU",
        }
    }

    /// Map a raw source status code onto the closed set.
    ///
    /// `R&R` is the legacy spelling of revise-and-resubmit and maps to
    /// [`DrawingStatus::Rev`]. Absent or unrecognized codes fall back to
    /// [`DrawingStatus::Pnd`]. The mapping is idempotent: feeding any
    /// normalized code back through it returns the same status.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("APP") => Self::App,
            Some("R&R") | Some("REV") => Self::Rev,
            Some("REJ") => Self::Rej,
            Some("PND") => Self::Pnd,
            Some("FFU") => Self::Ffu,
            _ => Self::Pnd,
        }
    }
}

// ---------------------------------------------------------------------------
// Release status
// ---------------------------------------------------------------------------

/// Wire string for [`ReleaseStatus::PartiallyReleased`].
pub const RELEASE_PARTIALLY: &str = "Partially Released";

/// Wire string for [`ReleaseStatus::YetToBeReleased`].
pub const RELEASE_YET_TO_BE: &str = "Yet to Be Released";

/// All valid release status strings.
const VALID_RELEASE_STATUSES: &[&str] = &[RELEASE_PARTIALLY, RELEASE_YET_TO_BE];

/// Whether a drawing has been distributed to the field.
///
/// A drawing may carry no release status at all until one is first set;
/// after that, either value may overwrite either value. The gate's only
/// job is rejecting anything outside the two-value domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReleaseStatus {
    #[serde(rename = "Partially Released")]
    PartiallyReleased,
    #[serde(rename = "Yet to Be Released")]
    YetToBeReleased,
}

impl ReleaseStatus {
    /// Return the status as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PartiallyReleased => RELEASE_PARTIALLY,
            Self::YetToBeReleased => RELEASE_YET_TO_BE,
        }
    }

    /// Parse a release status from its exact wire string.
    ///
    /// The match is case-sensitive: anything other than the two literal
    /// strings is a validation error, never a silent coercion.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            RELEASE_PARTIALLY => Ok(Self::PartiallyReleased),
            RELEASE_YET_TO_BE => Ok(Self::YetToBeReleased),
            _ => Err(CoreError::Validation(format!(
                "Invalid release status '{s}'. Must be one of: {}",
                VALID_RELEASE_STATUSES.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
