// ─────────────────────────────────────────────────────────────────────
// SRJet Inflow — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

use crate::error::{JetError, JetResult};

/// Top-level problem configuration.
/// Section names follow the simulation input deck: `problem`, `hydro`, `mesh`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemConfig {
    pub problem: JetProblemParams,
    pub hydro: HydroParams,
    pub mesh: MeshParams,
    #[serde(default)]
    pub root_finder: RootFinderConfig,
    #[serde(default)]
    pub refinement: RefinementConfig,
    #[serde(default)]
    pub fields: FieldConfig,
}

/// Ambient medium, jet core, jet geometry and boundary perturbation.
/// Velocities are spatial four-velocity components (u_r, u_phi, u_z).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JetProblemParams {
    pub d: f64,
    pub p: f64,
    pub vx: f64,
    pub vy: f64,
    pub vz: f64,
    #[serde(default)]
    pub bx: f64,
    #[serde(default)]
    pub by: f64,
    #[serde(default)]
    pub bz: f64,

    pub djet: f64,
    pub pjet: f64,
    /// Sets the opening angle of the jet (tan = vxjet / vzjet).
    pub vxjet: f64,
    /// Rotation four-velocity at the jet boundary.
    pub vyjet: f64,
    pub vzjet: f64,
    #[serde(default)]
    pub bxjet: f64,
    #[serde(default)]
    pub byjet: f64,
    #[serde(default)]
    pub bzjet: f64,
    /// Core poloidal field strength.
    #[serde(default)]
    pub b0: f64,
    /// Vertical decay scale of the field-line bending.
    pub z0: f64,

    pub rjet: f64,
    pub drjet: f64,

    /// Azimuthal mode number of the boundary shape perturbation.
    #[serde(default)]
    pub mang: f64,
    /// Relative amplitude of the boundary shape perturbation.
    #[serde(default)]
    pub dang: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HydroParams {
    /// Adiabatic index.
    pub gamma: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshParams {
    pub nx1: usize,
    #[serde(default = "default_one")]
    pub nx2: usize,
    pub nx3: usize,
    pub x1min: f64,
    pub x1max: f64,
    #[serde(default)]
    pub x2min: f64,
    #[serde(default = "default_two_pi")]
    pub x2max: f64,
    pub x3min: f64,
    pub x3max: f64,
    /// Geometric ratio of successive radial cell widths (1 = uniform).
    #[serde(default = "default_x1rat")]
    pub x1rat: f64,
    #[serde(default = "default_nghost")]
    pub nghost: usize,
    /// Enroll the refinement condition with the host.
    #[serde(default)]
    pub adaptive: bool,
}

/// Bounded secant solver settings for the field-line mapping.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RootFinderConfig {
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    /// Accept a candidate once |f| drops below this value.
    #[serde(default = "default_residual_tolerance")]
    pub residual_tolerance: f64,
    /// Stop once the bracket is narrower than this width.
    #[serde(default = "default_bracket_tolerance")]
    pub bracket_tolerance: f64,
}

/// Magnetization thresholds for the refinement predicate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RefinementConfig {
    #[serde(default = "default_sigma_refine")]
    pub sigma_refine: f64,
    /// De-refinement stays disabled unless a lower threshold is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sigma_derefine: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Evolve magnetic fields. Without them the inflow is purely hydrodynamic.
    #[serde(default = "default_true")]
    pub magnetic: bool,
}

fn default_one() -> usize {
    1
}
fn default_two_pi() -> f64 {
    std::f64::consts::TAU
}
fn default_x1rat() -> f64 {
    1.0
}
fn default_nghost() -> usize {
    2
}
fn default_max_iterations() -> usize {
    200
}
fn default_residual_tolerance() -> f64 {
    1e-5
}
fn default_bracket_tolerance() -> f64 {
    1e-4
}
fn default_sigma_refine() -> f64 {
    0.01
}
fn default_true() -> bool {
    true
}

impl Default for RootFinderConfig {
    fn default() -> Self {
        RootFinderConfig {
            max_iterations: default_max_iterations(),
            residual_tolerance: default_residual_tolerance(),
            bracket_tolerance: default_bracket_tolerance(),
        }
    }
}

impl Default for RefinementConfig {
    fn default() -> Self {
        RefinementConfig {
            sigma_refine: default_sigma_refine(),
            sigma_derefine: None,
        }
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig { magnetic: true }
    }
}

fn require_finite(name: &str, value: f64) -> JetResult<()> {
    if !value.is_finite() {
        return Err(JetError::ConfigError(format!(
            "{name} must be finite, got {value}"
        )));
    }
    Ok(())
}

fn require_positive(name: &str, value: f64) -> JetResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(JetError::ConfigError(format!(
            "{name} must be finite and > 0, got {value}"
        )));
    }
    Ok(())
}

impl ProblemConfig {
    /// Load from a JSON file and validate.
    pub fn from_file(path: &str) -> JetResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> JetResult<Self> {
        let config: Self = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject parameter sets the boundary construction cannot handle.
    pub fn validate(&self) -> JetResult<()> {
        let p = &self.problem;
        for (name, value) in [
            ("problem.vx", p.vx),
            ("problem.vy", p.vy),
            ("problem.vz", p.vz),
            ("problem.bx", p.bx),
            ("problem.by", p.by),
            ("problem.bz", p.bz),
            ("problem.vxjet", p.vxjet),
            ("problem.vyjet", p.vyjet),
            ("problem.vzjet", p.vzjet),
            ("problem.bxjet", p.bxjet),
            ("problem.byjet", p.byjet),
            ("problem.bzjet", p.bzjet),
            ("problem.b0", p.b0),
            ("problem.mang", p.mang),
            ("problem.dang", p.dang),
        ] {
            require_finite(name, value)?;
        }
        for (name, value) in [
            ("problem.d", p.d),
            ("problem.p", p.p),
            ("problem.djet", p.djet),
            ("problem.pjet", p.pjet),
            ("problem.z0", p.z0),
            ("problem.rjet", p.rjet),
            ("problem.drjet", p.drjet),
            ("mesh.x1rat", self.mesh.x1rat),
        ] {
            require_positive(name, value)?;
        }
        if !self.hydro.gamma.is_finite() || self.hydro.gamma <= 1.0 {
            return Err(JetError::ConfigError(format!(
                "hydro.gamma must be finite and > 1, got {}",
                self.hydro.gamma
            )));
        }
        if p.dang.abs() >= 1.0 {
            return Err(JetError::ConfigError(format!(
                "problem.dang must satisfy |dang| < 1, got {}",
                p.dang
            )));
        }

        let m = &self.mesh;
        if m.nx1 == 0 || m.nx2 == 0 || m.nx3 == 0 {
            return Err(JetError::ConfigError(
                "mesh.nx1, mesh.nx2, mesh.nx3 must be >= 1".to_string(),
            ));
        }
        if m.nghost == 0 {
            return Err(JetError::ConfigError(
                "mesh.nghost must be >= 1".to_string(),
            ));
        }
        for (name, lo, hi) in [
            ("x1", m.x1min, m.x1max),
            ("x2", m.x2min, m.x2max),
            ("x3", m.x3min, m.x3max),
        ] {
            require_finite(name, lo)?;
            require_finite(name, hi)?;
            if hi <= lo {
                return Err(JetError::ConfigError(format!(
                    "mesh.{name}max must exceed mesh.{name}min ({hi} <= {lo})"
                )));
            }
        }
        if m.x1min < 0.0 {
            return Err(JetError::ConfigError(format!(
                "mesh.x1min must be >= 0 in cylindrical coordinates, got {}",
                m.x1min
            )));
        }

        let rf = &self.root_finder;
        if rf.max_iterations == 0 {
            return Err(JetError::ConfigError(
                "root_finder.max_iterations must be >= 1".to_string(),
            ));
        }
        require_positive("root_finder.residual_tolerance", rf.residual_tolerance)?;
        require_positive("root_finder.bracket_tolerance", rf.bracket_tolerance)?;

        let r = &self.refinement;
        if r.sigma_refine.is_nan() || r.sigma_refine.is_sign_negative() {
            return Err(JetError::ConfigError(
                "refinement.sigma_refine must be >= 0".to_string(),
            ));
        }
        if let Some(lower) = r.sigma_derefine {
            if !lower.is_finite() || lower < 0.0 || lower >= r.sigma_refine {
                return Err(JetError::ConfigError(format!(
                    "refinement.sigma_derefine must lie in [0, sigma_refine), got {lower}"
                )));
            }
        }
        Ok(())
    }

    /// Build the geometry of a single block spanning the whole mesh.
    pub fn create_geometry(&self) -> crate::state::BlockGeometry {
        let m = &self.mesh;
        crate::state::BlockGeometry::new(crate::state::BlockSpec {
            nx1: m.nx1,
            nx2: m.nx2,
            nx3: m.nx3,
            x1min: m.x1min,
            x1max: m.x1max,
            x2min: m.x2min,
            x2max: m.x2max,
            x3min: m.x3min,
            x3max: m.x3max,
            x1rat: m.x1rat,
            nghost: m.nghost,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// CARGO_MANIFEST_DIR points to crates/jet-types/, configs/ lives two levels up.
    fn project_root() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
    }

    fn config_path(relative: &str) -> String {
        project_root().join(relative).to_string_lossy().to_string()
    }

    #[test]
    fn test_load_default_config() {
        let cfg = ProblemConfig::from_file(&config_path("configs/srjet_default.json")).unwrap();
        assert!((cfg.problem.rjet - 1.0).abs() < 1e-12);
        assert!((cfg.problem.drjet - 0.1).abs() < 1e-12);
        assert!((cfg.hydro.gamma - 4.0 / 3.0).abs() < 1e-4);
        assert_eq!(cfg.mesh.nghost, 2);
        assert_eq!(cfg.root_finder.max_iterations, 200);
        assert!(cfg.refinement.sigma_derefine.is_none());
        assert!(cfg.fields.magnetic);
    }

    #[test]
    fn test_load_all_configs() {
        for relative in [
            "configs/srjet_default.json",
            "configs/srjet_perturbed_amr.json",
            "configs/srjet_log_radial.json",
        ] {
            let path = config_path(relative);
            let result = ProblemConfig::from_file(&path);
            assert!(result.is_ok(), "Failed to load config {path}: {result:?}");
        }
    }

    #[test]
    fn test_roundtrip_serialization() {
        let cfg = ProblemConfig::from_file(&config_path("configs/srjet_perturbed_amr.json")).unwrap();
        let json = serde_json::to_string_pretty(&cfg).unwrap();
        let cfg2 = ProblemConfig::from_json(&json).unwrap();
        assert_eq!(cfg.mesh.nx1, cfg2.mesh.nx1);
        assert_eq!(cfg.mesh.adaptive, cfg2.mesh.adaptive);
        assert!((cfg.problem.dang - cfg2.problem.dang).abs() < 1e-15);
    }

    #[test]
    fn test_rejects_bad_gamma() {
        let mut cfg = ProblemConfig::from_file(&config_path("configs/srjet_default.json")).unwrap();
        cfg.hydro.gamma = 1.0;
        match cfg.validate() {
            Err(JetError::ConfigError(msg)) => assert!(msg.contains("gamma")),
            other => panic!("Unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_nonpositive_geometry() {
        let base = ProblemConfig::from_file(&config_path("configs/srjet_default.json")).unwrap();

        let mut cfg = base.clone();
        cfg.problem.drjet = 0.0;
        assert!(cfg.validate().is_err());

        let mut cfg = base.clone();
        cfg.problem.z0 = -1.0;
        assert!(cfg.validate().is_err());

        let mut cfg = base.clone();
        cfg.mesh.x3max = cfg.mesh.x3min;
        assert!(cfg.validate().is_err());

        let mut cfg = base;
        cfg.problem.d = f64::NAN;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_derefine_above_refine() {
        let mut cfg = ProblemConfig::from_file(&config_path("configs/srjet_default.json")).unwrap();
        cfg.refinement.sigma_derefine = Some(0.5);
        match cfg.validate() {
            Err(JetError::ConfigError(msg)) => assert!(msg.contains("sigma_derefine")),
            other => panic!("Unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_missing_required_parameter_is_error() {
        let json = r#"{
            "problem": { "d": 1.0, "p": 0.01 },
            "hydro": { "gamma": 1.3333 },
            "mesh": { "nx1": 8, "nx3": 8, "x1min": 0.0, "x1max": 2.0, "x3min": 0.0, "x3max": 4.0 }
        }"#;
        match ProblemConfig::from_json(json) {
            Err(JetError::Json(_)) => {}
            other => panic!("Expected JSON error, got {other:?}"),
        }
    }
}
