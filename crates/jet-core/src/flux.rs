//! Poloidal flux function and azimuthal vector potential.
//!
//! The flux through a disc of footpoint radius x is
//!
//!   Φ(x) = ∫ b0·a²·s/(a² + s²)·smoothstep((s − r_jet)/dr_jet) ds
//!
//! from x1min. Below the transition band the smoothstep is 1 and the integral
//! is logarithmic; inside the band it is the closed-form antiderivative
//! [`transition_antiderivative`]; beyond the band Φ is constant. Matching the
//! integration constants at r_jet − dr_jet keeps Φ and dΦ/dx continuous.

use jet_types::constants::AXIS_RADIUS_FLOOR;

use crate::field_line::{footpoint_radius, SolveTally};
use crate::params::JetContext;

/// Antiderivative of the core integrand b0·a²·x/(a² + x²).
pub fn core_antiderivative(ctx: &JetContext, x: f64) -> f64 {
    let a2 = ctx.a * ctx.a;
    ctx.b0 * (a2 / 2.0) * (a2 + x * x).ln()
}

/// Antiderivative of the core integrand times the cubic transition weight.
pub fn transition_antiderivative(ctx: &JetContext, x: f64) -> f64 {
    let a = ctx.a;
    let a2 = a * a;
    let rj = ctx.r_jet;
    let dr = ctx.dr_jet;
    let polynomial = x * (-6.0 * a2 - 18.0 * dr * dr + 18.0 * rj * rj - 9.0 * rj * x + 2.0 * x * x);
    let arctan = 6.0 * a * (a2 + 3.0 * dr * dr - 3.0 * rj * rj) * (x / a).atan();
    let log = (9.0 * rj * a2 + 6.0 * dr.powi(3) + 9.0 * rj * dr * dr - 3.0 * rj.powi(3))
        * (a2 + x * x).ln();
    ctx.b0 * (ctx.d_coef * a2 / 6.0) * (polynomial + arctan + log)
}

/// Flux Φ enclosed by the field line with footpoint `x1`. Zero at x1min.
pub fn flux_function(ctx: &JetContext, x1: f64) -> f64 {
    let inner = ctx.inner_edge();
    let outer = ctx.outer_edge();
    let base = core_antiderivative(ctx, inner) - core_antiderivative(ctx, ctx.x1min);

    if x1 < inner {
        core_antiderivative(ctx, x1) - core_antiderivative(ctx, ctx.x1min)
    } else if x1 < outer {
        transition_antiderivative(ctx, x1) - transition_antiderivative(ctx, inner) + base
    } else {
        transition_antiderivative(ctx, outer) - transition_antiderivative(ctx, inner) + base
    }
}

/// Azimuthal vector potential A_φ(r, z) = Φ(r0(r, z)) / r.
pub fn vector_potential(ctx: &JetContext, r: f64, z: f64, tally: &SolveTally) -> f64 {
    if r.abs() < AXIS_RADIUS_FLOOR {
        return 0.0;
    }
    let r0 = footpoint_radius(ctx, r, z, tally);
    flux_function(ctx, r0) / r
}
