//! Staggered magnetic field from the azimuthal vector potential.
//!
//! In cylindrical coordinates with A = A_φ(r, z) φ̂:
//!   B_r = −∂A_φ/∂z
//!   B_z = (1/r) ∂(r A_φ)/∂r
//! Faces take the integral form of these derivatives across the cell, so the
//! discrete divergence of B vanishes exactly.

use jet_types::error::JetResult;
use jet_types::state::{BlockGeometry, FaceField, IndexBounds};
use jet_types::constants::{IB1, IB2, IB3, NFIELD};
use ndarray::Array4;

use crate::field_line::SolveTally;
use crate::flux::vector_potential;
use crate::params::JetContext;

/// Face areas smaller than this carry no flux.
const AREA_SAFE_MIN: f64 = 1e-14;

/// Mirror a radius across the inner radial edge.
#[inline]
pub fn reflect_across_inner_edge(x1min: f64, r: f64) -> f64 {
    2.0 * x1min - r
}

/// Radial extent of the active cell that mirrors a ghost cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MirroredCell {
    pub inner: f64,
    pub outer: f64,
}

/// Mirror image of ghost cell `i` (inner face below x1min).
///
/// The symmetry point is the midpoint of the ghost cell adjacent to x1min.
/// On stretched grids the outer face follows the radial ratio; otherwise
/// the ghost cell width is kept.
pub fn mirrored_cell(geom: &BlockGeometry, x1rat: f64, i: usize) -> MirroredCell {
    let ig = geom.is() - 1;
    let r_sym = 0.5 * (geom.x1f[ig] + geom.x1f[ig + 1]);
    let inner = 2.0 * r_sym - geom.x1f[i];
    let outer = if x1rat > 1.0 {
        x1rat * inner
    } else {
        inner + geom.x1f[i + 1] - geom.x1f[i]
    };
    MirroredCell { inner, outer }
}

/// B_r on a radial face from the vertical difference of A_φ.
#[inline]
pub fn radial_face_from_potential(
    ctx: &JetContext,
    rf: f64,
    z_lo: f64,
    z_hi: f64,
    dz: f64,
    tally: &SolveTally,
) -> f64 {
    (vector_potential(ctx, rf, z_lo, tally) - vector_potential(ctx, rf, z_hi, tally)) / dz
}

/// B_z on a vertical face from the radial difference of r·A_φ.
#[inline]
pub fn vertical_face_from_potential(
    ctx: &JetContext,
    r_lo: f64,
    r_hi: f64,
    z: f64,
    tally: &SolveTally,
) -> f64 {
    let den = r_hi * r_hi - r_lo * r_lo;
    if den.abs() < AREA_SAFE_MIN {
        return 0.0;
    }
    2.0 * (r_hi * vector_potential(ctx, r_hi, z, tally) - r_lo * vector_potential(ctx, r_lo, z, tally)) / den
}

/// Fill every face of a block from the vector potential using the
/// cylindrical edge lengths and face areas. The azimuthal faces take the
/// uniform ambient `by`.
pub fn face_field_from_potential(
    ctx: &JetContext,
    geom: &BlockGeometry,
    b: &mut FaceField,
    bounds: &IndexBounds,
) -> JetResult<()> {
    geom.check_face_field(b)?;
    let IndexBounds { il, iu, jl, ju, kl, ku } = *bounds;
    let tally = SolveTally::new();

    for k in kl..=ku {
        let (zf, zf_p1) = (geom.x3f[k], geom.x3f[k + 1]);
        for j in jl..=ju {
            for i in il..=iu + 1 {
                let rf = geom.x1f[i];
                let area = geom.face1_area(k, j, i);
                b.x1f[[k, j, i]] = if area.abs() < AREA_SAFE_MIN {
                    0.0
                } else {
                    let len = geom.edge2_length(k, j, i);
                    let len_p1 = geom.edge2_length(k + 1, j, i);
                    -(len_p1 * vector_potential(ctx, rf, zf_p1, &tally)
                        - len * vector_potential(ctx, rf, zf, &tally))
                        / area
                };
            }
        }
    }

    for k in kl..=ku {
        for j in jl..=ju + 1 {
            for i in il..=iu {
                b.x2f[[k, j, i]] = ctx.ambient_field[1];
            }
        }
    }

    for k in kl..=ku + 1 {
        let zf = geom.x3f[k];
        for j in jl..=ju {
            for i in il..=iu {
                let area = geom.face3_area(k, j, i);
                b.x3f[[k, j, i]] = if area.abs() < AREA_SAFE_MIN {
                    0.0
                } else {
                    let (rf, rf_p1) = (geom.x1f[i], geom.x1f[i + 1]);
                    (geom.edge2_length(k, j, i + 1) * vector_potential(ctx, rf_p1, zf, &tally)
                        - geom.edge2_length(k, j, i) * vector_potential(ctx, rf, zf, &tally))
                        / area
                };
            }
        }
    }
    tally.report("initial faces");
    Ok(())
}

/// Average staggered fields to cell centers, weighting the two faces by the
/// position of the cell center between them.
pub fn calculate_cell_centered_field(
    geom: &BlockGeometry,
    b: &FaceField,
    bcc: &mut Array4<f64>,
    bounds: &IndexBounds,
) -> JetResult<()> {
    geom.check_face_field(b)?;
    geom.check_cell_array("bcc", bcc, NFIELD)?;
    let IndexBounds { il, iu, jl, ju, kl, ku } = *bounds;

    for k in kl..=ku {
        let lw3 = (geom.x3f[k + 1] - geom.x3v[k]) / geom.dx3f[k];
        let rw3 = (geom.x3v[k] - geom.x3f[k]) / geom.dx3f[k];
        for j in jl..=ju {
            let lw2 = (geom.x2f[j + 1] - geom.x2v[j]) / geom.dx2f[j];
            let rw2 = (geom.x2v[j] - geom.x2f[j]) / geom.dx2f[j];
            for i in il..=iu {
                let lw1 = (geom.x1f[i + 1] - geom.x1v[i]) / geom.dx1f[i];
                let rw1 = (geom.x1v[i] - geom.x1f[i]) / geom.dx1f[i];
                bcc[[IB1, k, j, i]] = lw1 * b.x1f[[k, j, i]] + rw1 * b.x1f[[k, j, i + 1]];
                bcc[[IB2, k, j, i]] = lw2 * b.x2f[[k, j, i]] + rw2 * b.x2f[[k, j + 1, i]];
                bcc[[IB3, k, j, i]] = lw3 * b.x3f[[k, j, i]] + rw3 * b.x3f[[k + 1, j, i]];
            }
        }
    }
    Ok(())
}
