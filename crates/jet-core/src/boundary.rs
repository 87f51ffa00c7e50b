// ─────────────────────────────────────────────────────────────────────
// SRJet Inflow — Inner-x3 Inflow Boundary
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Jet inflow state in the ghost layers below the first active z index.
//!
//! Each ghost cell follows its field line down to the footpoint r0 and takes
//! the state of a cold-ish, pressure-matched flow with conserved Bernoulli
//! and Atwood parameters blended between jet and ambient values. The density
//! sees the azimuthal shape perturbation of the jet edge; the velocities do
//! not. Fields come from the vector potential, mirrored across x1min where a
//! face lies inside the axis region.

use jet_math::smoothstep::blend;
use jet_types::constants::{BZ_FLOOR, IB1, IB3, IDN, IPR, IVX, IVY, IVZ, NHYDRO};
use jet_types::error::{JetError, JetResult};
use jet_types::state::{BlockGeometry, FaceField, IndexBounds};
use ndarray::Array4;

use crate::bfield::{
    calculate_cell_centered_field, mirrored_cell, radial_face_from_potential,
    reflect_across_inner_edge, vertical_face_from_potential,
};
use crate::field_line::{azimuthal_pitch, footpoint_radius, radial_pitch, SolveTally};
use crate::params::JetContext;

/// Primitive state of one inflow ghost cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InflowState {
    pub footpoint: f64,
    pub density: f64,
    pub pressure: f64,
    /// (u_r, u_phi, u_z)
    pub four_velocity: [f64; 3],
    /// Lorentz factor with the perturbed jet edge; sets the density.
    pub lorentz: f64,
    /// Lorentz factor with the unperturbed edge; sets the velocity.
    pub lorentz_unperturbed: f64,
}

/// Lorentz factor of a flow with mass-loading Ψ, Atwood parameter and gas
/// pressure: the positive root of Γ_add·p·γ² + Ψ·γ − A = 0.
pub fn lorentz_from_psi(psi: f64, atwood: f64, gam_add: f64, pressure: f64) -> f64 {
    // Rationalized form of Ψ/(2Γ_add·p)·(sqrt(1 + 4Γ_add·p·A/Ψ²) − 1).
    let disc = 1.0 + 4.0 * gam_add * pressure * atwood / (psi * psi);
    2.0 * atwood / (psi * (1.0 + disc.sqrt()))
}

/// Inflow state on the field line rooted at `r0`, at height `z` and azimuth `phi`.
pub fn inflow_state(ctx: &JetContext, r0: f64, z: f64, phi: f64) -> InflowState {
    let smfnc = ctx.jet_weight(r0);
    let rad = r0 * (1.0 + ctx.dang * (ctx.mang * phi).cos());
    let step = ctx.jet_weight(rad);

    let phang = azimuthal_pitch(ctx, r0, smfnc);
    let pitch = radial_pitch(ctx, r0);
    let b_phi = ctx.toroidal_field_proxy(smfnc);

    let cl = &ctx.centerline;
    let bern_sm = blend(cl.bernoulli_jet, cl.bernoulli_ambient, step);
    let bern_np = blend(cl.bernoulli_jet, cl.bernoulli_ambient, smfnc);
    let atwood = blend(cl.atwood_jet, cl.atwood_ambient, smfnc);

    let psi = (atwood + b_phi * b_phi) / bern_sm;
    let psi_np = (atwood + b_phi * b_phi) / bern_np;
    debug_assert!(psi > 0.0 && psi_np > 0.0, "Ψ must be positive (Ψ={psi}, Ψ_np={psi_np})");

    let pressure = ctx.ambient.pressure;
    let lorentz = lorentz_from_psi(psi, atwood, ctx.gam_add, pressure);
    let lorentz_np = lorentz_from_psi(psi_np, atwood, ctx.gam_add, pressure);
    debug_assert!(lorentz_np >= 1.0 - 1e-9, "sub-luminal inflow requires γ >= 1, got {lorentz_np}");

    let decay = (-z / ctx.z0).exp();
    let uz = ((lorentz_np * lorentz_np - 1.0).max(0.0)
        / (1.0 + pitch * pitch * decay * decay + phang * phang))
        .sqrt();

    InflowState {
        footpoint: r0,
        density: psi / lorentz,
        pressure,
        four_velocity: [uz * pitch * decay, uz * phang, uz],
        lorentz,
        lorentz_unperturbed: lorentz_np,
    }
}

fn check_ghost_range(geom: &BlockGeometry, bounds: &IndexBounds, ngh: usize) -> JetResult<()> {
    let IndexBounds { il, iu, jl, ju, kl, ku } = *bounds;
    if kl < ngh {
        return Err(JetError::GridOutOfBounds { k: kl, j: jl, i: il });
    }
    if iu >= geom.ncells1 || ju >= geom.ncells2 || ku >= geom.ncells3 || il > iu || jl > ju {
        return Err(JetError::GridOutOfBounds { k: ku, j: ju, i: iu });
    }
    Ok(())
}

fn fill_ghost_primitives(
    ctx: &JetContext,
    geom: &BlockGeometry,
    prim: &mut Array4<f64>,
    bounds: &IndexBounds,
    ngh: usize,
    tally: &SolveTally,
) {
    let IndexBounds { il, iu, jl, ju, kl, .. } = *bounds;
    for kg in 1..=ngh {
        let k = kl - kg;
        let z = geom.x3v[k];
        for i in il..=iu {
            let r0 = footpoint_radius(ctx, geom.x1v[i], z, tally);
            for j in jl..=ju {
                let s = inflow_state(ctx, r0, z, geom.x2v[j]);
                prim[[IDN, k, j, i]] = s.density;
                prim[[IVX, k, j, i]] = s.four_velocity[0];
                prim[[IVY, k, j, i]] = s.four_velocity[1];
                prim[[IVZ, k, j, i]] = s.four_velocity[2];
                prim[[IPR, k, j, i]] = s.pressure;
            }
        }
    }
}

fn fill_ghost_faces(
    ctx: &JetContext,
    geom: &BlockGeometry,
    b: &mut FaceField,
    bounds: &IndexBounds,
    ngh: usize,
    tally: &SolveTally,
) {
    let IndexBounds { il, iu, jl, ju, kl, .. } = *bounds;
    let x1min = ctx.x1min;

    for kg in 1..=ngh {
        let k = kl - kg;
        let (zf, zf_p1, dz) = (geom.x3f[k], geom.x3f[k + 1], geom.dx3f[k]);
        for j in jl..=ju {
            for i in il..=iu + 1 {
                let rf = geom.x1f[i];
                b.x1f[[k, j, i]] = if rf < x1min {
                    let mir = reflect_across_inner_edge(x1min, rf);
                    -radial_face_from_potential(ctx, mir, zf, zf_p1, dz, tally)
                } else {
                    radial_face_from_potential(ctx, rf, zf, zf_p1, dz, tally)
                };
            }
        }
        for j in jl..=ju + 1 {
            for i in il..=iu {
                b.x2f[[k, j, i]] = 0.0;
            }
        }
        for j in jl..=ju {
            for i in il..=iu {
                let (rf, rf_p1) = (geom.x1f[i], geom.x1f[i + 1]);
                b.x3f[[k, j, i]] = if rf < x1min {
                    let m = mirrored_cell(geom, ctx.x1rat, i);
                    vertical_face_from_potential(ctx, m.inner, m.outer, zf, tally)
                } else {
                    vertical_face_from_potential(ctx, rf, rf_p1, zf, tally)
                };
            }
        }
    }
}

/// Inside the jet band, turn the radial velocity along the ghost field.
fn align_velocity_with_field(
    ctx: &JetContext,
    geom: &BlockGeometry,
    prim: &mut Array4<f64>,
    b: &FaceField,
    bounds: &IndexBounds,
    ngh: usize,
) -> JetResult<()> {
    let IndexBounds { il, iu, jl, ju, kl, .. } = *bounds;
    let ghosts = IndexBounds { il, iu, jl, ju, kl: kl - ngh, ku: kl - 1 };
    let mut bcc = geom.cell_field();
    calculate_cell_centered_field(geom, b, &mut bcc, &ghosts)?;

    let outer = ctx.outer_edge();
    for k in ghosts.kl..=ghosts.ku {
        for i in il..=iu {
            if geom.x1v[i] > outer {
                continue;
            }
            for j in jl..=ju {
                let bz = bcc[[IB3, k, j, i]];
                if bz.abs() > BZ_FLOOR {
                    prim[[IVX, k, j, i]] = prim[[IVZ, k, j, i]] * bcc[[IB1, k, j, i]] / bz;
                }
            }
        }
    }
    Ok(())
}

/// Fill the `ngh` ghost layers below `bounds.kl` with the jet inflow.
///
/// Primitives are set for every (i, j) in `bounds`; with magnetic fields on,
/// the radial, azimuthal and vertical faces of the ghost cells are set from
/// the vector potential and the radial velocity follows the field inside the
/// jet band.
#[allow(clippy::too_many_arguments)]
pub fn jet_inner_x3(
    ctx: &JetContext,
    geom: &BlockGeometry,
    prim: &mut Array4<f64>,
    b: &mut FaceField,
    time: f64,
    dt: f64,
    bounds: &IndexBounds,
    ngh: usize,
) -> JetResult<()> {
    geom.check_cell_array("prim", prim, NHYDRO)?;
    geom.check_face_field(b)?;
    check_ghost_range(geom, bounds, ngh)?;
    if ngh == 0 {
        return Ok(());
    }

    let tally = SolveTally::new();
    fill_ghost_primitives(ctx, geom, prim, bounds, ngh, &tally);
    if ctx.magnetic {
        fill_ghost_faces(ctx, geom, b, bounds, ngh, &tally);
        align_velocity_with_field(ctx, geom, prim, b, bounds, ngh)?;
    }
    tally.report("inner-x3 inflow");

    tracing::debug!(
        time,
        dt,
        ngh,
        kl = bounds.kl,
        cells = (bounds.iu - bounds.il + 1) * (bounds.ju - bounds.jl + 1) * ngh,
        magnetic = ctx.magnetic,
        "inner-x3 inflow filled"
    );
    Ok(())
}
