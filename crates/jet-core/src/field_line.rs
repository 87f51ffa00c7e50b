// ─────────────────────────────────────────────────────────────────────
// SRJet Inflow — Field-Line Mapping
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Footpoint radius r0 of the field line through (r, z).
//!
//! Field lines leave the reference boundary at r0 and bend outward with
//! height: r = r0 + pitch(r0)·z0·(1 − e^{−z/z0}). Inside the jet band the
//! relation is inverted with the bracketed secant solver; outside it lines
//! are either pinned to the inner edge or untouched.

use std::cell::Cell;

use jet_math::secant::{bracketed_secant, RootSolution};
use jet_math::smoothstep::blend;

use crate::params::JetContext;

/// Radial pitch u_r/u_z of the field line rooted at `r0`, growing linearly
/// from zero at the inner edge.
pub fn radial_pitch(ctx: &JetContext, r0: f64) -> f64 {
    let weight = ctx.jet_weight(r0);
    blend(ctx.jet.radial_pitch, ctx.ambient.radial_pitch, weight) * (r0 - ctx.x1min) / ctx.r_jet
}

/// Azimuthal pitch u_phi/u_z at footpoint `r0` for a given jet weight.
pub fn azimuthal_pitch(ctx: &JetContext, r0: f64, weight: f64) -> f64 {
    blend(ctx.jet.azimuthal_pitch, ctx.ambient.azimuthal_pitch, weight) * (r0 - ctx.x1min) / ctx.r_jet
}

/// Residual of the field-line equation; zero when `r0` is the footpoint of (r, z).
pub fn field_line_residual(ctx: &JetContext, r0: f64, r: f64, z: f64) -> f64 {
    r0 + radial_pitch(ctx, r0) * ctx.z0 * (1.0 - (-z / ctx.z0).exp()) - r
}

/// Full solver record for the footpoint of (r, z).
pub fn solve_footpoint(ctx: &JetContext, r: f64, z: f64) -> RootSolution {
    let outer = ctx.outer_edge();
    if r <= ctx.x1min {
        return RootSolution { root: ctx.x1min, residual: 0.0, iterations: 0, converged: true };
    }
    if r >= outer {
        return RootSolution { root: r, residual: 0.0, iterations: 0, converged: true };
    }

    let f = |r0: f64| field_line_residual(ctx, r0, r, z);
    match bracketed_secant(f, ctx.x1min, outer, &ctx.root_finder) {
        Ok(sol) => sol,
        Err(err) => {
            tracing::debug!(r, z, error = %err, "field-line solve failed, keeping r");
            RootSolution { root: r, residual: f64::NAN, iterations: 0, converged: false }
        }
    }
}

/// Tally of footpoint solves that stopped short of convergence during one
/// block fill. Misses are logged at `debug` per solve and reported once at
/// `warn` by [`SolveTally::report`].
#[derive(Debug, Default)]
pub struct SolveTally {
    misses: Cell<usize>,
}

impl SolveTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn misses(&self) -> usize {
        self.misses.get()
    }

    fn record(&self, sol: &RootSolution, r: f64, z: f64) -> f64 {
        if !sol.converged {
            self.misses.set(self.misses.get() + 1);
            tracing::debug!(
                r,
                z,
                estimate = sol.root,
                residual = sol.residual,
                iterations = sol.iterations,
                "field-line solve did not converge"
            );
        }
        sol.root
    }

    /// Emit a single warning for the fill named `stage` if any solve missed.
    pub fn report(&self, stage: &'static str) {
        let misses = self.misses.get();
        if misses > 0 {
            tracing::warn!(stage, misses, "field-line solves kept unconverged estimates");
        }
    }
}

/// Footpoint radius r0(r, z). Non-converged solves keep the best estimate
/// and are counted in `tally`.
pub fn footpoint_radius(ctx: &JetContext, r: f64, z: f64, tally: &SolveTally) -> f64 {
    tally.record(&solve_footpoint(ctx, r, z), r, z)
}
