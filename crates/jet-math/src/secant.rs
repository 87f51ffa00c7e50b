// ─────────────────────────────────────────────────────────────────────
// SRJet Inflow — Bracketed Secant Solver
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Secant / false-position hybrid on a sign-changing bracket.
//!
//! Each step takes the secant through the two bracket endpoints and keeps the
//! endpoint whose residual has the opposite sign of the new point, so the
//! root stays bracketed. A flat secant (equal endpoint residuals) or a
//! candidate outside the bracket falls back to bisection.

use jet_types::error::{JetError, JetResult};

#[derive(Debug, Clone, Copy)]
pub struct SecantOptions {
    pub max_iterations: usize,
    pub residual_tolerance: f64,
    pub bracket_tolerance: f64,
}

impl Default for SecantOptions {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            residual_tolerance: 1e-5,
            bracket_tolerance: 1e-4,
        }
    }
}

/// Outcome of a bounded solve. `converged == false` carries the best
/// estimate reached before the iteration cap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootSolution {
    pub root: f64,
    pub residual: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// Find a root of `f` in `[lo, hi]`.
pub fn bracketed_secant<F>(f: F, lo: f64, hi: f64, opts: &SecantOptions) -> JetResult<RootSolution>
where
    F: Fn(f64) -> f64,
{
    if !lo.is_finite() || !hi.is_finite() || hi < lo {
        return Err(JetError::ConfigError(format!(
            "secant bracket must be finite with lo <= hi, got [{lo}, {hi}]"
        )));
    }
    if opts.max_iterations == 0 {
        return Err(JetError::ConfigError(
            "secant max_iterations must be >= 1".to_string(),
        ));
    }

    let tol = opts.residual_tolerance;
    let (mut r1, mut r2) = (lo, hi);
    let (mut f1, mut f2) = (f(r1), f(r2));

    if !f1.is_finite() || !f2.is_finite() {
        return Err(JetError::PhysicsViolation(format!(
            "non-finite residual at bracket endpoints: f({r1})={f1}, f({r2})={f2}"
        )));
    }
    if f1.abs() < tol {
        return Ok(RootSolution { root: r1, residual: f1, iterations: 0, converged: true });
    }
    if f2.abs() < tol {
        return Ok(RootSolution { root: r2, residual: f2, iterations: 0, converged: true });
    }
    if f1 * f2 > 0.0 {
        let (root, residual) = if f1.abs() <= f2.abs() { (r1, f1) } else { (r2, f2) };
        return Ok(RootSolution { root, residual, iterations: 0, converged: false });
    }

    let mut best = if f1.abs() <= f2.abs() { (r1, f1) } else { (r2, f2) };
    for iteration in 1..=opts.max_iterations {
        let denom = f2 - f1;
        let mut r3 = if denom != 0.0 {
            r1 - f1 * (r2 - r1) / denom
        } else {
            0.5 * (r1 + r2)
        };
        let (a, b) = if r1 <= r2 { (r1, r2) } else { (r2, r1) };
        if !(r3 >= a && r3 <= b) {
            r3 = 0.5 * (r1 + r2);
        }

        let f3 = f(r3);
        if !f3.is_finite() {
            return Err(JetError::SolverDiverged {
                iteration,
                message: format!("non-finite residual at x={r3}"),
            });
        }
        if f3.abs() < best.1.abs() {
            best = (r3, f3);
        }
        if f3.abs() < tol {
            return Ok(RootSolution { root: r3, residual: f3, iterations: iteration, converged: true });
        }

        if f1 * f3 < 0.0 {
            r2 = r3;
            f2 = f3;
        } else {
            r1 = r3;
            f1 = f3;
        }

        if (r1 - r2).abs() < opts.bracket_tolerance {
            return Ok(RootSolution { root: r3, residual: f3, iterations: iteration, converged: true });
        }
    }

    Ok(RootSolution {
        root: best.0,
        residual: best.1,
        iterations: opts.max_iterations,
        converged: false,
    })
}
