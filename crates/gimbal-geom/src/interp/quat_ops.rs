// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Rotation kernels used by the interpolator. None of these validate their
//! input; callers classify the bases first.

use gimbal_math::{Basis, Quat, Vec3};

/// Quaternion of an orthonormal, non-reflective basis.
///
/// Uses the trace when it is positive; otherwise pivots on the largest
/// diagonal element so the square root never sees a near-zero argument.
pub(crate) fn basis_to_quat(m: &Basis) -> Quat {
    let trace = m.at(0, 0) + m.at(1, 1) + m.at(2, 2);
    let mut q = [0.0_f32; 4];

    if trace > 0.0 {
        let mut s = (trace + 1.0).sqrt();
        q[3] = s * 0.5;
        s = 0.5 / s;
        q[0] = (m.at(2, 1) - m.at(1, 2)) * s;
        q[1] = (m.at(0, 2) - m.at(2, 0)) * s;
        q[2] = (m.at(1, 0) - m.at(0, 1)) * s;
    } else {
        let i = if m.at(0, 0) < m.at(1, 1) {
            if m.at(1, 1) < m.at(2, 2) {
                2
            } else {
                1
            }
        } else if m.at(0, 0) < m.at(2, 2) {
            2
        } else {
            0
        };
        let j = (i + 1) % 3;
        let k = (i + 2) % 3;

        let mut s = (m.at(i, i) - m.at(j, j) - m.at(k, k) + 1.0).sqrt();
        q[i] = s * 0.5;
        s = 0.5 / s;
        q[3] = (m.at(k, j) - m.at(j, k)) * s;
        q[j] = (m.at(j, i) + m.at(i, j)) * s;
        q[k] = (m.at(k, i) + m.at(i, k)) * s;
    }

    Quat::from(q)
}

/// Normalises `v`, returning it with its original length.
///
/// Only an exactly zero vector is treated as degenerate (zero in, zero out).
fn normalize_with_length(v: Vec3) -> (Vec3, f32) {
    let length_sq = v.length_squared();
    if length_sq == 0.0 {
        return (Vec3::ZERO, 0.0);
    }
    let length = length_sq.sqrt();
    (v * (1.0 / length), length)
}

/// Gram–Schmidt on the columns of `basis`.
///
/// Returns the orthonormalised basis and the three lengths measured along the
/// way (the per-axis scale that was removed).
pub(crate) fn orthonormalize(basis: &Basis) -> (Basis, Vec3) {
    let (x, lx) = normalize_with_length(basis.column(0));
    let y = basis.column(1);
    let (y, ly) = normalize_with_length(y - x * x.dot(&y));
    let z = basis.column(2);
    let (z, lz) = normalize_with_length(z - (x * x.dot(&z) + y * y.dot(&z)));
    (Basis::from_columns(x, y, z), Vec3::new(lx, ly, lz))
}
