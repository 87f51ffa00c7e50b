// ─────────────────────────────────────────────────────────────────────
// SRJet Inflow — Equation of State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Ideal-gas equation of state for special-relativistic MHD.
//!
//! Primitives carry the spatial four-velocity u^i = γ v^i, so the Lorentz
//! factor is sqrt(1 + u²) without a normalization check.

use jet_types::constants::{IB1, IB2, IB3, IDN, IEN, IM1, IM2, IM3, IPR, IVX, IVY, IVZ, NFIELD, NHYDRO};
use jet_types::error::JetResult;
use jet_types::state::{BlockGeometry, IndexBounds};
use ndarray::Array4;

/// Conversion from primitive to conserved variables.
pub trait EquationOfState {
    fn gamma(&self) -> f64;

    /// Convert cell `(k, j, i)` primitives and cell-centered field.
    fn conserved_cell(&self, prim: [f64; NHYDRO], bcc: [f64; NFIELD]) -> [f64; NHYDRO];

    fn primitive_to_conserved(
        &self,
        geom: &BlockGeometry,
        prim: &Array4<f64>,
        bcc: &Array4<f64>,
        cons: &mut Array4<f64>,
        bounds: &IndexBounds,
    ) -> JetResult<()> {
        geom.check_cell_array("prim", prim, NHYDRO)?;
        geom.check_cell_array("bcc", bcc, NFIELD)?;
        geom.check_cell_array("cons", cons, NHYDRO)?;
        let IndexBounds { il, iu, jl, ju, kl, ku } = *bounds;

        for k in kl..=ku {
            for j in jl..=ju {
                for i in il..=iu {
                    let w = [
                        prim[[IDN, k, j, i]],
                        prim[[IVX, k, j, i]],
                        prim[[IVY, k, j, i]],
                        prim[[IVZ, k, j, i]],
                        prim[[IPR, k, j, i]],
                    ];
                    let b = [bcc[[IB1, k, j, i]], bcc[[IB2, k, j, i]], bcc[[IB3, k, j, i]]];
                    let u = self.conserved_cell(w, b);
                    for (n, value) in u.into_iter().enumerate() {
                        cons[[n, k, j, i]] = value;
                    }
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SrMhdEos {
    pub gamma: f64,
}

impl SrMhdEos {
    pub fn new(gamma: f64) -> Self {
        SrMhdEos { gamma }
    }

    /// Γ / (Γ − 1)
    #[inline]
    pub fn gam_add(&self) -> f64 {
        self.gamma / (self.gamma - 1.0)
    }
}

impl EquationOfState for SrMhdEos {
    fn gamma(&self) -> f64 {
        self.gamma
    }

    fn conserved_cell(&self, prim: [f64; NHYDRO], bcc: [f64; NFIELD]) -> [f64; NHYDRO] {
        let rho = prim[IDN];
        let pgas = prim[IPR];
        let (u1, u2, u3) = (prim[IVX], prim[IVY], prim[IVZ]);
        let u0 = (1.0 + u1 * u1 + u2 * u2 + u3 * u3).sqrt();

        // Contravariant magnetic four-vector.
        let b0 = bcc[0] * u1 + bcc[1] * u2 + bcc[2] * u3;
        let b1 = (bcc[0] + b0 * u1) / u0;
        let b2 = (bcc[1] + b0 * u2) / u0;
        let b3 = (bcc[2] + b0 * u3) / u0;
        let b_sq = -b0 * b0 + b1 * b1 + b2 * b2 + b3 * b3;

        let wtot = rho + self.gam_add() * pgas + b_sq;
        let ptot = pgas + 0.5 * b_sq;

        let mut cons = [0.0; NHYDRO];
        cons[IDN] = rho * u0;
        cons[IEN] = wtot * u0 * u0 - b0 * b0 - ptot;
        cons[IM1] = wtot * u0 * u1 - b0 * b1;
        cons[IM2] = wtot * u0 * u2 - b0 * b2;
        cons[IM3] = wtot * u0 * u3 - b0 * b3;
        cons
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_frame_energy() {
        let eos = SrMhdEos::new(4.0 / 3.0);
        let cons = eos.conserved_cell([1.0, 0.0, 0.0, 0.0, 0.01], [0.0; 3]);
        assert!((cons[IDN] - 1.0).abs() < 1e-15);
        assert!((cons[IEN] - (1.0 + 0.01 / (4.0 / 3.0 - 1.0))).abs() < 1e-12);
        assert_eq!([cons[IM1], cons[IM2], cons[IM3]], [0.0; 3]);
    }

    #[test]
    fn test_rest_frame_magnetic_energy() {
        let eos = SrMhdEos::new(5.0 / 3.0);
        let cons = eos.conserved_cell([1.0, 0.0, 0.0, 0.0, 0.1], [0.3, 0.0, 0.4]);
        let expected = 1.0 + 0.1 / (2.0 / 3.0) + 0.5 * 0.25;
        assert!((cons[IEN] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_moving_hydro_momentum() {
        let eos = SrMhdEos::new(4.0 / 3.0);
        let u3 = 2.0;
        let cons = eos.conserved_cell([0.5, 0.0, 0.0, u3, 0.02], [0.0; 3]);
        let u0 = (1.0f64 + u3 * u3).sqrt();
        let w = 0.5 + 4.0 * 0.02;
        assert!((cons[IDN] - 0.5 * u0).abs() < 1e-12);
        assert!((cons[IM3] - w * u0 * u3).abs() < 1e-12);
        assert!((cons[IEN] - (w * u0 * u0 - 0.02)).abs() < 1e-12);
    }

    #[test]
    fn test_field_along_motion_adds_no_momentum_flux() {
        // B parallel to u: b^i u_i cancels the transverse part of w u0 u.
        let eos = SrMhdEos::new(4.0 / 3.0);
        let cons_b = eos.conserved_cell([1.0, 0.0, 0.0, 1.0, 0.01], [0.0, 0.0, 0.5]);
        let cons_0 = eos.conserved_cell([1.0, 0.0, 0.0, 1.0, 0.01], [0.0; 3]);
        assert!((cons_b[IM3] - cons_0[IM3]).abs() < 1e-12);
        assert_eq!(cons_b[IM1], 0.0);
    }
}
