// ─────────────────────────────────────────────────────────────────────
// SRJet Inflow — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Variable indices and numerical floors shared across the workspace.

/// Primitive density index.
pub const IDN: usize = 0;
/// Radial four-velocity index (u^r).
pub const IVX: usize = 1;
/// Azimuthal four-velocity index (u^phi).
pub const IVY: usize = 2;
/// Vertical four-velocity index (u^z).
pub const IVZ: usize = 3;
/// Gas pressure index.
pub const IPR: usize = 4;
/// Number of primitive hydro variables.
pub const NHYDRO: usize = 5;

/// Conserved energy index (shares the slot of the pressure).
pub const IEN: usize = 4;
/// Conserved momentum indices.
pub const IM1: usize = 1;
pub const IM2: usize = 2;
pub const IM3: usize = 3;

/// Cell-centered magnetic field components.
pub const IB1: usize = 0;
pub const IB2: usize = 1;
pub const IB3: usize = 2;
pub const NFIELD: usize = 3;

/// Below this |u_z| a pitch ratio u_r/u_z is taken as zero.
pub const PITCH_VZ_FLOOR: f64 = 1e-12;

/// Radii closer to the axis than this carry no vector potential.
pub const AXIS_RADIUS_FLOOR: f64 = 1e-12;

/// |B_z| floor for the field-aligned velocity correction.
pub const BZ_FLOOR: f64 = 1e-12;
