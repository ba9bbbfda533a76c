// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Transform interpolation between two samples (previous/current).
//!
//! A basis pair is classified into one of three strategies:
//! - [`Method::Lerp`]: row-wise linear blend. Used whenever either basis
//!   cannot be expressed as a rotation (degenerate axes, shear, reflection),
//!   and when both rotations are nearly identical.
//! - [`Method::Slerp`]: both bases are pure rotations; blend their
//!   quaternions.
//! - [`Method::ScaledSlerp`]: rotations with per-axis scale; orthonormalise,
//!   blend the rotation and lerp the axis lengths.
//!
//! Classification is recomputed on every [`interpolate_basis`] call. Callers
//! that know the method is stable across many frames can classify once with
//! [`find_method`] and use the `*_via_method` entry points.
//!
//! The free functions use [`Tolerances::default`]. Build a
//! [`TransformInterpolator`] to use other thresholds.

mod quat_ops;

use gimbal_math::{Basis, Quat, Transform2D, Transform3D, Vec3};
use tracing::trace;

use crate::error::GeomError;

pub use gimbal_math::{CMP_EPSILON, UNIT_EPSILON};

/// Minimum row length after a linear blend.
pub const SMALLEST_AXIS_LENGTH: f32 = 1e-4;
/// Allowed deviation of a rotation's determinant from `+1`.
pub const DETERMINANT_EPSILON: f32 = 1e-2;
/// Allowed deviation of squared column lengths from `1` before a basis is
/// treated as scaled.
pub const ORTHO_EPSILON: f32 = 1e-3;
/// Allowed per-element deviation of `B·Bᵀ` from the identity.
pub const ORTHOGONALITY_EPSILON: f32 = 1e-2;
/// Squared column length below which an axis counts as collapsed.
pub const SLERP_EPSILON: f32 = 1e-5;

/// Basis blending strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Method {
    /// Row-wise linear blend with a minimum axis length.
    Lerp,
    /// Quaternion SLERP of two pure rotations.
    Slerp,
    /// SLERP of the orthonormalised bases plus a linear blend of axis lengths.
    ScaledSlerp,
}

/// Numeric thresholds used by classification and blending.
///
/// `Default` yields the module constants. With the `serde` feature, missing
/// fields fall back to their defaults, so a profile only needs to list the
/// thresholds it overrides.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Tolerances {
    /// See [`SMALLEST_AXIS_LENGTH`].
    pub smallest_axis_length: f32,
    /// See [`DETERMINANT_EPSILON`].
    pub determinant: f32,
    /// See [`ORTHO_EPSILON`].
    pub ortho: f32,
    /// See [`ORTHOGONALITY_EPSILON`].
    pub orthogonality: f32,
    /// See [`SLERP_EPSILON`].
    pub slerp: f32,
    /// Near-parallel threshold for quaternion pairs; see [`CMP_EPSILON`].
    pub cmp: f32,
    /// Allowed deviation of an extracted quaternion's squared norm from `1`;
    /// see [`UNIT_EPSILON`].
    pub unit: f32,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            smallest_axis_length: SMALLEST_AXIS_LENGTH,
            determinant: DETERMINANT_EPSILON,
            ortho: ORTHO_EPSILON,
            orthogonality: ORTHOGONALITY_EPSILON,
            slerp: SLERP_EPSILON,
            cmp: CMP_EPSILON,
            unit: UNIT_EPSILON,
        }
    }
}

impl Tolerances {
    /// Checks that every threshold is finite and strictly positive.
    pub fn validate(&self) -> Result<(), GeomError> {
        let fields = [
            ("smallest_axis_length", self.smallest_axis_length),
            ("determinant", self.determinant),
            ("ortho", self.ortho),
            ("orthogonality", self.orthogonality),
            ("slerp", self.slerp),
            ("cmp", self.cmp),
            ("unit", self.unit),
        ];
        match fields.iter().find(|(_, v)| !(v.is_finite() && *v > 0.0)) {
            Some((name, _)) => Err(GeomError::InvalidTolerance { name: *name }),
            None => Ok(()),
        }
    }
}

/// Per-basis classification result.
#[derive(Debug, Clone, Copy)]
enum BasisKind {
    /// Not representable as a (scaled) rotation.
    Linear,
    /// Rotation `quat`, with `scaled` set when the columns were not unit
    /// length.
    Rotation { quat: Quat, scaled: bool },
}

/// Interpolator carrying its own [`Tolerances`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransformInterpolator {
    tolerances: Tolerances,
}

impl TransformInterpolator {
    /// Creates an interpolator after validating `tolerances`.
    pub fn new(tolerances: Tolerances) -> Result<Self, GeomError> {
        tolerances.validate()?;
        Ok(Self { tolerances })
    }

    /// Thresholds in use.
    pub fn tolerances(&self) -> &Tolerances {
        &self.tolerances
    }

    /// Chooses the blending strategy for `prev → curr`.
    ///
    /// Either basis failing the rotation checks forces [`Method::Lerp`], as
    /// does a pair of nearly identical rotations. Otherwise the result is
    /// [`Method::ScaledSlerp`] if either basis carried scale, else
    /// [`Method::Slerp`].
    pub fn find_method(&self, prev: &Basis, curr: &Basis) -> Method {
        let method = match (self.classify(prev), self.classify(curr)) {
            (
                BasisKind::Rotation { quat: q0, scaled: s0 },
                BasisKind::Rotation { quat: q1, scaled: s1 },
            ) => {
                if q0.dot(&q1).abs() >= 1.0 - self.tolerances.cmp {
                    Method::Lerp
                } else if s0 || s1 {
                    Method::ScaledSlerp
                } else {
                    Method::Slerp
                }
            }
            _ => Method::Lerp,
        };
        trace!(?method, "classified basis pair");
        method
    }

    fn classify(&self, basis: &Basis) -> BasisKind {
        let tol = &self.tolerances;
        let lengths_sq = Vec3::new(
            basis.column(0).length_squared(),
            basis.column(1).length_squared(),
            basis.column(2).length_squared(),
        );

        let mut b = *basis;
        let mut scaled = false;
        if !lengths_sq.is_equal_approx_with(&Vec3::ONE, tol.ortho) {
            if lengths_sq.to_array().iter().any(|l| *l < tol.slerp) {
                return BasisKind::Linear;
            }
            let [lx, ly, lz] = lengths_sq.to_array().map(f32::sqrt);
            b = b.scaled_columns(&Vec3::new(1.0 / lx, 1.0 / ly, 1.0 / lz));
            scaled = true;
        }

        let det = b.determinant();
        if !gimbal_math::is_equal_approx_with(det, 1.0, tol.determinant)
            || !b.is_orthogonal(tol.orthogonality)
        {
            return BasisKind::Linear;
        }

        let quat = quat_ops::basis_to_quat(&b);
        if (quat.length_squared() - 1.0).abs() >= tol.unit {
            return BasisKind::Linear;
        }
        BasisKind::Rotation { quat, scaled }
    }

    /// Classifies the pair, then blends with the chosen method.
    pub fn interpolate_basis(&self, prev: &Basis, curr: &Basis, t: f32) -> Basis {
        self.interpolate_basis_via_method(prev, curr, t, self.find_method(prev, curr))
    }

    /// Blends with a precomputed `method`.
    ///
    /// `Slerp` and `ScaledSlerp` assume the bases passed classification; use
    /// [`TransformInterpolator::find_method`] to obtain a valid method.
    pub fn interpolate_basis_via_method(&self, prev: &Basis, curr: &Basis, t: f32, method: Method) -> Basis {
        match method {
            Method::Lerp => self.interpolate_basis_linear(prev, curr, t),
            Method::Slerp => self.basis_slerp_unchecked(prev, curr, t),
            Method::ScaledSlerp => self.interpolate_basis_scaled_slerp(prev, curr, t),
        }
    }

    /// Lerps the origins and blends the bases with a freshly chosen method.
    pub fn interpolate_transform_3d(&self, prev: &Transform3D, curr: &Transform3D, t: f32) -> Transform3D {
        Transform3D::new(
            self.interpolate_basis(&prev.basis, &curr.basis, t),
            prev.origin.lerp(&curr.origin, t),
        )
    }

    /// Lerps the origins and blends the bases with a precomputed `method`.
    pub fn interpolate_transform_3d_via_method(
        &self,
        prev: &Transform3D,
        curr: &Transform3D,
        t: f32,
        method: Method,
    ) -> Transform3D {
        Transform3D::new(
            self.interpolate_basis_via_method(&prev.basis, &curr.basis, t, method),
            prev.origin.lerp(&curr.origin, t),
        )
    }

    /// Blends two 2D transforms.
    ///
    /// When exactly one of them is a reflection, rotation cannot be blended
    /// continuously: the linear part snaps to `curr` and only the origin is
    /// lerped. Otherwise rotation and skew follow the shortest angle while
    /// scale and origin are lerped.
    #[allow(clippy::unused_self)]
    pub fn interpolate_transform_2d(&self, prev: &Transform2D, curr: &Transform2D, t: f32) -> Transform2D {
        if (prev.determinant() >= 0.0) != (curr.determinant() >= 0.0) {
            let mut out = *curr;
            out.set_origin(prev.origin().lerp(&curr.origin(), t));
            return out;
        }
        prev.interpolate_with(curr, t)
    }

    /// Row-wise lerp. A row shorter than `smallest_axis_length` gets its
    /// diagonal element set to that length so the result never collapses an
    /// axis.
    pub fn interpolate_basis_linear(&self, prev: &Basis, curr: &Basis, t: f32) -> Basis {
        let smallest = self.tolerances.smallest_axis_length;
        let mut out = prev.lerp(curr, t);
        for n in 0..3 {
            let row = out.row(n);
            if row.length_squared() < smallest * smallest {
                out.set_row(n, row.with_component(n, smallest));
            }
        }
        out
    }

    /// Orthonormalises both bases, SLERPs the rotations and rescales the
    /// columns by the lerped axis lengths.
    pub fn interpolate_basis_scaled_slerp(&self, prev: &Basis, curr: &Basis, t: f32) -> Basis {
        let (prev_rot, prev_lengths) = quat_ops::orthonormalize(prev);
        let (curr_rot, curr_lengths) = quat_ops::orthonormalize(curr);
        self.basis_slerp_unchecked(&prev_rot, &curr_rot, t)
            .scaled_columns(&prev_lengths.lerp(&curr_lengths, t))
    }

    /// SLERP of two orthonormal bases via their quaternions.
    pub fn basis_slerp_unchecked(&self, from: &Basis, to: &Basis, t: f32) -> Basis {
        Basis::from_quat(&self.quat_slerp_unchecked(
            &quat_ops::basis_to_quat(from),
            &quat_ops::basis_to_quat(to),
            t,
        ))
    }

    /// Shortest-arc SLERP of unit quaternions with a renormalised linear
    /// fallback for nearly parallel inputs.
    pub fn quat_slerp_unchecked(&self, from: &Quat, to: &Quat, t: f32) -> Quat {
        from.slerp_with_cutoff(to, t, self.tolerances.cmp)
    }
}

/// [`TransformInterpolator::find_method`] with default tolerances.
pub fn find_method(prev: &Basis, curr: &Basis) -> Method {
    TransformInterpolator::default().find_method(prev, curr)
}

/// [`TransformInterpolator::interpolate_basis`] with default tolerances.
pub fn interpolate_basis(prev: &Basis, curr: &Basis, t: f32) -> Basis {
    TransformInterpolator::default().interpolate_basis(prev, curr, t)
}

/// [`TransformInterpolator::interpolate_basis_via_method`] with default
/// tolerances.
pub fn interpolate_basis_via_method(prev: &Basis, curr: &Basis, t: f32, method: Method) -> Basis {
    TransformInterpolator::default().interpolate_basis_via_method(prev, curr, t, method)
}

/// [`TransformInterpolator::interpolate_transform_3d`] with default
/// tolerances.
pub fn interpolate_transform_3d(prev: &Transform3D, curr: &Transform3D, t: f32) -> Transform3D {
    TransformInterpolator::default().interpolate_transform_3d(prev, curr, t)
}

/// [`TransformInterpolator::interpolate_transform_3d_via_method`] with
/// default tolerances.
pub fn interpolate_transform_3d_via_method(
    prev: &Transform3D,
    curr: &Transform3D,
    t: f32,
    method: Method,
) -> Transform3D {
    TransformInterpolator::default().interpolate_transform_3d_via_method(prev, curr, t, method)
}

/// [`TransformInterpolator::interpolate_transform_2d`].
pub fn interpolate_transform_2d(prev: &Transform2D, curr: &Transform2D, t: f32) -> Transform2D {
    TransformInterpolator::default().interpolate_transform_2d(prev, curr, t)
}

/// [`TransformInterpolator::interpolate_basis_linear`] with
/// [`SMALLEST_AXIS_LENGTH`].
pub fn interpolate_basis_linear(prev: &Basis, curr: &Basis, t: f32) -> Basis {
    TransformInterpolator::default().interpolate_basis_linear(prev, curr, t)
}

/// [`TransformInterpolator::interpolate_basis_scaled_slerp`] with default
/// tolerances.
pub fn interpolate_basis_scaled_slerp(prev: &Basis, curr: &Basis, t: f32) -> Basis {
    TransformInterpolator::default().interpolate_basis_scaled_slerp(prev, curr, t)
}

/// [`TransformInterpolator::basis_slerp_unchecked`] with default tolerances.
pub fn basis_slerp_unchecked(from: &Basis, to: &Basis, t: f32) -> Basis {
    TransformInterpolator::default().basis_slerp_unchecked(from, to, t)
}

/// [`TransformInterpolator::quat_slerp_unchecked`] with [`CMP_EPSILON`].
pub fn quat_slerp_unchecked(from: &Quat, to: &Quat, t: f32) -> Quat {
    from.slerp(to, t)
}

/// Quaternion of an orthonormal, non-reflective basis (trace method with a
/// largest-diagonal pivot). Other inputs give meaningless results.
pub fn basis_to_quat_unchecked(basis: &Basis) -> Quat {
    quat_ops::basis_to_quat(basis)
}

/// Gram–Schmidt orthonormalisation of the columns; returns the orthonormal
/// basis and the original column lengths along the way.
///
/// An exactly zero column stays zero with length `0`.
pub fn basis_orthonormalize(basis: &Basis) -> (Basis, Vec3) {
    quat_ops::orthonormalize(basis)
}

/// Drift/corruption checksum: origin sum minus row 0 plus row 1 minus row 2.
///
/// Not used by any blend; compare values across frames to spot changes.
pub fn checksum_transform_3d(xform: &Transform3D) -> f32 {
    xform.origin.sum() - xform.basis.row(0).sum() + xform.basis.row(1).sum() - xform.basis.row(2).sum()
}
