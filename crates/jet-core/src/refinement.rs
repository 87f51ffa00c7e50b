// ─────────────────────────────────────────────────────────────────────
// SRJet Inflow — Magnetization Refinement Criterion
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Block refinement driven by the peak magnetization σ = |B|²/ρ.

use jet_types::config::RefinementConfig;
use jet_types::constants::{IB1, IB2, IB3, IDN, NFIELD, NHYDRO};
use jet_types::error::{JetError, JetResult};
use jet_types::state::BlockGeometry;
use ndarray::Array4;

/// Host-facing refinement decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefinementSignal {
    Derefine = -1,
    NoChange = 0,
    Refine = 1,
}

impl RefinementSignal {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

/// Largest |B_cc|²/ρ over the active cells of a block.
pub fn max_magnetization(
    geom: &BlockGeometry,
    prim: &Array4<f64>,
    bcc: &Array4<f64>,
) -> JetResult<f64> {
    geom.check_cell_array("prim", prim, NHYDRO)?;
    geom.check_cell_array("bcc", bcc, NFIELD)?;

    let mut max_sigma = 0.0_f64;
    for k in geom.ks()..=geom.ke() {
        for j in geom.js()..=geom.je() {
            for i in geom.is()..=geom.ie() {
                let rho = prim[[IDN, k, j, i]];
                if rho.is_nan() || rho <= 0.0 {
                    return Err(JetError::PhysicsViolation(format!(
                        "non-positive density {rho} at k={k}, j={j}, i={i}"
                    )));
                }
                let b1 = bcc[[IB1, k, j, i]];
                let b2 = bcc[[IB2, k, j, i]];
                let b3 = bcc[[IB3, k, j, i]];
                max_sigma = max_sigma.max((b1 * b1 + b2 * b2 + b3 * b3) / rho);
            }
        }
    }
    Ok(max_sigma)
}

/// Refine strongly magnetized blocks; de-refine only below an explicit
/// lower threshold.
pub fn refinement_condition(
    cfg: &RefinementConfig,
    geom: &BlockGeometry,
    prim: &Array4<f64>,
    bcc: &Array4<f64>,
) -> JetResult<RefinementSignal> {
    let sigma = max_magnetization(geom, prim, bcc)?;
    let signal = if sigma > cfg.sigma_refine {
        RefinementSignal::Refine
    } else {
        match cfg.sigma_derefine {
            Some(lower) if sigma < lower => RefinementSignal::Derefine,
            _ => RefinementSignal::NoChange,
        }
    };
    tracing::debug!(max_sigma = sigma, ?signal, "refinement check");
    Ok(signal)
}
