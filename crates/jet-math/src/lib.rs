//! Mathematical primitives for the jet inflow problem.

pub mod secant;
pub mod smoothstep;
