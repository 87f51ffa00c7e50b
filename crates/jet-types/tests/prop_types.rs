// ─────────────────────────────────────────────────────────────────────
// SRJet Inflow — Property-Based Tests (proptest) for jet-types
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for jet-types using proptest.
//!
//! Covers: BlockGeometry construction invariants, face/centroid ordering,
//! container shapes.

use jet_types::constants::{NFIELD, NHYDRO};
use jet_types::state::{BlockGeometry, BlockSpec, BlockState, IndexBounds};
use proptest::prelude::*;

fn spec(nx1: usize, nx2: usize, nx3: usize, x1min: f64, x1rat: f64, nghost: usize) -> BlockSpec {
    BlockSpec {
        nx1,
        nx2,
        nx3,
        x1min,
        x1max: x1min + 3.0,
        x2min: 0.0,
        x2max: std::f64::consts::TAU,
        x3min: -1.0,
        x3max: 5.0,
        x1rat,
        nghost,
    }
}

// ── BlockGeometry Construction Invariants ────────────────────────────

proptest! {
    /// Cell counts include ghosts only on axes with more than one cell.
    #[test]
    fn geometry_cell_counts(
        nx1 in 1usize..64,
        nx2 in 1usize..16,
        nx3 in 1usize..64,
        ng in 1usize..4,
    ) {
        let geom = BlockGeometry::new(spec(nx1, nx2, nx3, 0.0, 1.0, ng));
        prop_assert_eq!(geom.ncells1, nx1 + 2 * ng);
        prop_assert_eq!(geom.ncells2, if nx2 > 1 { nx2 + 2 * ng } else { 1 });
        prop_assert_eq!(geom.ncells3, if nx3 > 1 { nx3 + 2 * ng } else { 1 });
        prop_assert_eq!(geom.x1f.len(), geom.ncells1 + 1);
        prop_assert_eq!(geom.x2f.len(), geom.ncells2 + 1);
        prop_assert_eq!(geom.x3f.len(), geom.ncells3 + 1);
    }

    /// Domain edges land exactly on the first and last active faces.
    #[test]
    fn geometry_domain_edges(
        nx1 in 2usize..64,
        nx3 in 2usize..64,
        x1min in 0.0f64..2.0,
        x1rat in 1.0f64..1.1,
    ) {
        let geom = BlockGeometry::new(spec(nx1, 1, nx3, x1min, x1rat, 2));
        prop_assert!((geom.x1f[geom.is()] - x1min).abs() < 1e-12);
        prop_assert!((geom.x1f[geom.ie() + 1] - (x1min + 3.0)).abs() < 1e-12);
        prop_assert!((geom.x3f[geom.ks()] - (-1.0)).abs() < 1e-12);
        prop_assert!((geom.x3f[geom.ke() + 1] - 5.0).abs() < 1e-12);
    }

    /// Faces increase monotonically and every center sits inside its cell.
    #[test]
    fn geometry_centers_inside_cells(
        nx1 in 2usize..48,
        x1min in 0.0f64..2.0,
        x1rat in 1.0f64..1.1,
    ) {
        let geom = BlockGeometry::new(spec(nx1, 1, 8, x1min, x1rat, 2));
        for i in 0..geom.ncells1 {
            prop_assert!(geom.x1f[i + 1] > geom.x1f[i]);
            prop_assert!(geom.x1v[i] > geom.x1f[i] - 1e-12);
            prop_assert!(geom.x1v[i] < geom.x1f[i + 1] + 1e-12);
        }
        for k in 0..geom.ncells3 {
            prop_assert!((geom.x3v[k] - 0.5 * (geom.x3f[k] + geom.x3f[k + 1])).abs() < 1e-12);
        }
    }

    /// Uniform radial spacing when x1rat = 1.
    #[test]
    fn geometry_uniform_spacing(nx1 in 2usize..64) {
        let geom = BlockGeometry::new(spec(nx1, 1, 8, 0.5, 1.0, 2));
        let dx = 3.0 / nx1 as f64;
        for i in 0..geom.ncells1 {
            prop_assert!((geom.dx1f[i] - dx).abs() < 1e-12,
                "Non-uniform spacing at {}: {} vs {}", i, geom.dx1f[i], dx);
        }
    }
}

// ── Container Invariants ─────────────────────────────────────────────

proptest! {
    /// BlockState arrays match the geometry and start at zero.
    #[test]
    fn block_state_shapes_and_zero_init(
        nx1 in 2usize..32,
        nx2 in 1usize..8,
        nx3 in 2usize..32,
    ) {
        let geom = BlockGeometry::new(spec(nx1, nx2, nx3, 0.0, 1.0, 2));
        let state = BlockState::new(&geom);
        prop_assert!(geom.check_cell_array("prim", &state.prim, NHYDRO).is_ok());
        prop_assert!(geom.check_cell_array("cons", &state.cons, NHYDRO).is_ok());
        prop_assert!(geom.check_cell_array("bcc", &state.bcc, NFIELD).is_ok());
        prop_assert!(geom.check_face_field(&state.b).is_ok());
        prop_assert!(state.prim.iter().all(|&v| v == 0.0));
        prop_assert!(state.b.x3f.iter().all(|&v| v == 0.0));
    }

    /// Active bounds sit strictly inside the full bounds.
    #[test]
    fn index_bounds_nesting(
        nx1 in 2usize..32,
        nx3 in 2usize..32,
    ) {
        let geom = BlockGeometry::new(spec(nx1, 1, nx3, 0.0, 1.0, 2));
        let active = IndexBounds::active(&geom);
        let full = IndexBounds::full(&geom);
        prop_assert!(full.il < active.il && active.iu < full.iu);
        prop_assert!(full.kl < active.kl && active.ku < full.ku);
        prop_assert_eq!(active.iu - active.il + 1, nx1);
        prop_assert_eq!(active.ku - active.kl + 1, nx3);
    }
}
