// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Error types for box queries, interpolation settings and triangulation.

/// Invalid arguments to box queries or interpolation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GeomError {
    /// Requested an AABB edge outside `0..12`.
    #[error("edge index out of range: {index} (expected 0..12)")]
    EdgeIndexOutOfRange {
        /// Offending index.
        index: usize,
    },

    /// Requested an AABB corner outside `0..8`.
    #[error("corner index out of range: {index} (expected 0..8)")]
    CornerIndexOutOfRange {
        /// Offending index.
        index: usize,
    },

    /// A tolerance is non-finite or not strictly positive.
    #[error("invalid tolerance `{name}`: must be finite and > 0")]
    InvalidTolerance {
        /// Name of the tolerance field.
        name: &'static str,
    },
}

/// Ear clipping failed to produce a full triangulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TriangulateError {
    /// The contour has fewer than three points.
    #[error("contour has {len} points; at least 3 are required")]
    TooFewPoints {
        /// Number of points supplied.
        len: usize,
    },

    /// No ear could be clipped, even with relaxed tests. The contour is
    /// degenerate or self-intersecting.
    #[error("no ear found with {remaining} vertices remaining")]
    NoEarFound {
        /// Vertices left in the working polygon when clipping stalled.
        remaining: usize,
    },
}
