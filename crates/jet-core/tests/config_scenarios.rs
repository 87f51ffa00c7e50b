// ─────────────────────────────────────────────────────────────────────
// SRJet Inflow — Shipped Configuration Scenarios
// © 1998–2026 Miroslav Šotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Full host cycle for every configuration in `configs/`: enroll hooks,
//! initialize a block, fill the inflow ghosts and query refinement.

use jet_core::hooks::{BoundaryFace, HookRegistry, SrJetProblem};
use jet_core::refinement::RefinementSignal;
use jet_types::config::ProblemConfig;
use jet_types::constants::{IDN, IPR, IVZ};
use jet_types::state::{BlockGeometry, BlockState, IndexBounds};
use std::path::PathBuf;

fn config_path(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("configs")
        .join(name)
        .to_string_lossy()
        .into_owned()
}

fn run_cycle(name: &str) -> (ProblemConfig, HookRegistry, BlockGeometry, BlockState) {
    let cfg = ProblemConfig::from_file(&config_path(name)).unwrap();
    let mut registry = HookRegistry::new();
    let problem = SrJetProblem::init_user_mesh_data(&cfg, &mut registry).unwrap();
    let geom = cfg.create_geometry();
    let mut state = problem.problem_generator(&geom).unwrap();
    let applied = registry
        .apply_boundary(
            BoundaryFace::InnerX3,
            &geom,
            &mut state.prim,
            &mut state.b,
            0.0,
            1e-3,
            &IndexBounds::inner_x3(&geom),
            geom.spec.nghost,
        )
        .unwrap();
    assert!(applied);
    (cfg, registry, geom, state)
}

fn assert_physical_ghosts(name: &str) {
    let (cfg, _, geom, state) = run_cycle(name);
    for kg in 1..=geom.spec.nghost {
        let k = geom.ks() - kg;
        for j in 0..geom.ncells2 {
            for i in 0..geom.ncells1 {
                let rho = state.prim[[IDN, k, j, i]];
                assert!(rho.is_finite() && rho > 0.0, "{name}: rho={rho} at k={k}, j={j}, i={i}");
                assert_eq!(state.prim[[IPR, k, j, i]], cfg.problem.p);
                assert!(state.prim[[IVZ, k, j, i]] >= 0.0);
            }
        }
    }
    assert!(state.b.x1f.iter().chain(state.b.x3f.iter()).all(|v| v.is_finite()));
    assert!(state.cons.iter().all(|v| v.is_finite()));
}

#[test]
fn test_default_config_cycle() {
    assert_physical_ghosts("srjet_default.json");
}

#[test]
fn test_perturbed_amr_config_cycle() {
    assert_physical_ghosts("srjet_perturbed_amr.json");
}

#[test]
fn test_log_radial_config_cycle() {
    assert_physical_ghosts("srjet_log_radial.json");
}

#[test]
fn test_perturbation_breaks_azimuthal_symmetry() {
    let (_, _, geom, state) = run_cycle("srjet_perturbed_amr.json");
    let k = geom.ks() - 1;
    // Near the jet edge the density varies with azimuth.
    let i = (geom.is()..=geom.ie()).find(|&i| geom.x1v[i] > 0.95).unwrap();
    let densities: Vec<f64> = (geom.js()..=geom.je()).map(|j| state.prim[[IDN, k, j, i]]).collect();
    let spread = densities.iter().cloned().fold(f64::MIN, f64::max)
        - densities.iter().cloned().fold(f64::MAX, f64::min);
    assert!(spread > 1e-6, "spread {spread}");
}

#[test]
fn test_adaptive_config_refines_magnetized_block() {
    let (_, registry, geom, state) = run_cycle("srjet_perturbed_amr.json");
    let signal = registry.check_refinement(&geom, &state.prim, &state.bcc).unwrap();
    assert_eq!(signal, Some(RefinementSignal::Refine));
}

#[test]
fn test_static_config_has_no_refinement_hook() {
    let (_, registry, geom, state) = run_cycle("srjet_default.json");
    assert!(registry.check_refinement(&geom, &state.prim, &state.bcc).unwrap().is_none());
}
