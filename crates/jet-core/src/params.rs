// ─────────────────────────────────────────────────────────────────────
// SRJet Inflow — Derived Parameters
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Immutable problem context built once from the configuration.
//!
//! Every field-line, flux and boundary routine takes a `&JetContext`; the
//! host shares one instance across blocks behind an `Arc`.

use jet_math::secant::SecantOptions;
use jet_math::smoothstep::smoothstep;
use jet_types::config::{ProblemConfig, RefinementConfig};
use jet_types::constants::PITCH_VZ_FLOOR;
use jet_types::error::JetResult;

/// Raw and derived scalars of one flow regime (jet core or ambient medium).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegimeState {
    pub density: f64,
    pub pressure: f64,
    /// Spatial four-velocity (u_r, u_phi, u_z).
    pub four_velocity: [f64; 3],
    pub lorentz: f64,
    /// γ(1 + Γ_add·p/ρ).
    pub enthalpy: f64,
    /// γ²(ρ + Γ_add·p).
    pub atwood: f64,
    /// u_r / u_z
    pub radial_pitch: f64,
    /// u_phi / u_z
    pub azimuthal_pitch: f64,
}

impl RegimeState {
    pub fn new(density: f64, pressure: f64, four_velocity: [f64; 3], gam_add: f64) -> Self {
        let [ur, uphi, uz] = four_velocity;
        let lorentz = (1.0 + ur * ur + uphi * uphi + uz * uz).sqrt();
        let (radial_pitch, azimuthal_pitch) = if uz.abs() < PITCH_VZ_FLOOR {
            (0.0, 0.0)
        } else {
            (ur / uz, uphi / uz)
        };
        RegimeState {
            density,
            pressure,
            four_velocity,
            lorentz,
            enthalpy: (1.0 + gam_add * pressure / density) * lorentz,
            atwood: lorentz * lorentz * (density + gam_add * pressure),
            radial_pitch,
            azimuthal_pitch,
        }
    }
}

/// Bernoulli and Atwood references evaluated at the inner radial edge.
///
/// The centerline pressure is the ambient pressure: sampling the block's
/// first radial cell would give the domain edge, not the axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterlineReference {
    pub pressure: f64,
    /// Toroidal field proxy at x1min.
    pub b_phi: f64,
    pub bernoulli_jet: f64,
    pub bernoulli_ambient: f64,
    pub atwood_jet: f64,
    pub atwood_ambient: f64,
}

#[derive(Debug, Clone)]
pub struct JetContext {
    pub ambient: RegimeState,
    pub jet: RegimeState,
    /// Uniform ambient field (bx, by, bz); only by seeds the azimuthal faces.
    pub ambient_field: [f64; 3],
    pub b0: f64,
    pub z0: f64,
    pub r_jet: f64,
    pub dr_jet: f64,
    /// Core lengthscale r_jet / 2.
    pub a: f64,
    /// Transition polynomial scale 1 / (4·dr_jet³).
    pub d_coef: f64,
    pub mang: f64,
    pub dang: f64,
    pub x1min: f64,
    pub x1rat: f64,
    pub gamma_ad: f64,
    /// Γ / (Γ − 1)
    pub gam_add: f64,
    pub centerline: CenterlineReference,
    pub root_finder: SecantOptions,
    pub refinement: RefinementConfig,
    pub magnetic: bool,
}

impl JetContext {
    pub fn from_config(config: &ProblemConfig) -> JetResult<Self> {
        config.validate()?;
        let p = &config.problem;
        let gamma_ad = config.hydro.gamma;
        let gam_add = gamma_ad / (gamma_ad - 1.0);

        let ambient = RegimeState::new(p.d, p.p, [p.vx, p.vy, p.vz], gam_add);
        let jet = RegimeState::new(p.djet, p.pjet, [p.vxjet, p.vyjet, p.vzjet], gam_add);
        let a = p.rjet / 2.0;
        let x1min = config.mesh.x1min;
        // Hydro-only runs carry no field at all.
        let b0 = if config.fields.magnetic { p.b0 } else { 0.0 };

        let centerline = {
            let p_cen = p.p;
            let weight = smoothstep((x1min - p.rjet) / p.drjet);
            let b_phi = (b0 * a * x1min / (a * a + x1min * x1min)) * weight;
            CenterlineReference {
                pressure: p_cen,
                b_phi,
                bernoulli_jet: (1.0 + gam_add * p_cen / p.djet) * jet.lorentz
                    + b_phi * b_phi / (jet.lorentz * p.djet),
                bernoulli_ambient: ambient.enthalpy,
                atwood_jet: jet.lorentz * jet.lorentz * (p.djet + gam_add * p_cen),
                atwood_ambient: ambient.atwood,
            }
        };

        let ctx = JetContext {
            ambient,
            jet,
            ambient_field: [p.bx, p.by, p.bz],
            b0,
            z0: p.z0,
            r_jet: p.rjet,
            dr_jet: p.drjet,
            a,
            d_coef: 1.0 / (4.0 * p.drjet.powi(3)),
            mang: p.mang,
            dang: p.dang,
            x1min,
            x1rat: config.mesh.x1rat,
            gamma_ad,
            gam_add,
            centerline,
            root_finder: SecantOptions {
                max_iterations: config.root_finder.max_iterations,
                residual_tolerance: config.root_finder.residual_tolerance,
                bracket_tolerance: config.root_finder.bracket_tolerance,
            },
            refinement: config.refinement,
            magnetic: config.fields.magnetic,
        };

        tracing::info!(
            gamma_jet = ctx.jet.lorentz,
            gamma_amb = ctx.ambient.lorentz,
            atwood_jet = ctx.jet.atwood,
            atwood_amb = ctx.ambient.atwood,
            r_jet = ctx.r_jet,
            dr_jet = ctx.dr_jet,
            b0 = ctx.b0,
            "jet context initialized"
        );
        Ok(ctx)
    }

    /// Outer edge of the jet transition band.
    #[inline]
    pub fn outer_edge(&self) -> f64 {
        self.r_jet + self.dr_jet
    }

    /// Inner edge of the jet transition band.
    #[inline]
    pub fn inner_edge(&self) -> f64 {
        self.r_jet - self.dr_jet
    }

    /// Jet weight of a field line: 1 in the core, 0 in the ambient medium.
    #[inline]
    pub fn jet_weight(&self, radius: f64) -> f64 {
        smoothstep((radius - self.r_jet) / self.dr_jet)
    }

    /// Toroidal field proxy b0·a·r_jet/(a² + r_jet²) scaled by the jet weight.
    #[inline]
    pub fn toroidal_field_proxy(&self, weight: f64) -> f64 {
        (self.b0 * self.a * self.r_jet / (self.a * self.a + self.r_jet * self.r_jet)) * weight
    }
}
