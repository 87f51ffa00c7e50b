//! Inflow boundary and initial state for magnetized relativistic jets.
//!
//! Field-line mapping, flux function and vector potential, the inner-x3
//! ghost-zone state, the problem generator and the host hooks.

pub mod bfield;
pub mod boundary;
pub mod eos;
pub mod field_line;
pub mod flux;
pub mod hooks;
pub mod params;
pub mod problem;
pub mod refinement;
