//! Initial block state: ambient medium threaded by the jet's poloidal field.

use jet_types::constants::{IDN, IPR, IVX, IVY, IVZ};
use jet_types::error::JetResult;
use jet_types::state::{BlockGeometry, BlockState, IndexBounds};

use crate::bfield::{calculate_cell_centered_field, face_field_from_potential};
use crate::eos::EquationOfState;
use crate::params::JetContext;

/// Fill every cell of the block, ghosts included, with the ambient state and
/// the vector-potential field, then derive the conserved variables.
pub fn problem_generator<E: EquationOfState>(
    ctx: &JetContext,
    geom: &BlockGeometry,
    eos: &E,
) -> JetResult<BlockState> {
    let mut state = BlockState::new(geom);
    let bounds = IndexBounds::full(geom);
    let amb = &ctx.ambient;

    for (n, value) in [
        (IDN, amb.density),
        (IVX, amb.four_velocity[0]),
        (IVY, amb.four_velocity[1]),
        (IVZ, amb.four_velocity[2]),
        (IPR, amb.pressure),
    ] {
        state.prim.index_axis_mut(ndarray::Axis(0), n).fill(value);
    }

    if ctx.magnetic {
        face_field_from_potential(ctx, geom, &mut state.b, &bounds)?;
        calculate_cell_centered_field(geom, &state.b, &mut state.bcc, &bounds)?;
    }
    eos.primitive_to_conserved(geom, &state.prim, &state.bcc, &mut state.cons, &bounds)?;

    tracing::debug!(
        ncells1 = geom.ncells1,
        ncells2 = geom.ncells2,
        ncells3 = geom.ncells3,
        "block initialized with ambient medium"
    );
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eos::SrMhdEos;
    use crate::params::test_support::base_config;
    use jet_types::constants::{IB2, IB3, IEN};

    #[test]
    fn test_ambient_primitives_everywhere() {
        let cfg = base_config();
        let ctx = JetContext::from_config(&cfg).unwrap();
        let geom = cfg.create_geometry();
        let state = problem_generator(&ctx, &geom, &SrMhdEos::new(cfg.hydro.gamma)).unwrap();
        assert!(state.prim.index_axis(ndarray::Axis(0), IDN).iter().all(|v| *v == 1.0));
        assert!(state.prim.index_axis(ndarray::Axis(0), IPR).iter().all(|v| *v == 0.01));
        assert!(state.prim.index_axis(ndarray::Axis(0), IVZ).iter().all(|v| *v == 0.0));
        assert!(state.cons.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_field_threads_jet_only() {
        let cfg = base_config();
        let ctx = JetContext::from_config(&cfg).unwrap();
        let geom = cfg.create_geometry();
        let state = problem_generator(&ctx, &geom, &SrMhdEos::new(cfg.hydro.gamma)).unwrap();
        let (k, j) = (geom.ks() + 2, 0);
        let inside = (geom.is()..=geom.ie()).find(|&i| geom.x1v[i] > 0.3).unwrap();
        let outside = (geom.is()..=geom.ie()).find(|&i| geom.x1f[i] > 1.2).unwrap();
        assert!(state.bcc[[IB3, k, j, inside]] > 0.0);
        assert!(state.bcc[[IB3, k, j, outside]].abs() < 1e-12);
        // Magnetic energy raises the total energy above the hydro value.
        let hydro_e = 1.0 + 0.01 / (cfg.hydro.gamma - 1.0);
        assert!(state.cons[[IEN, k, j, inside]] > hydro_e);
        assert!((state.cons[[IEN, k, j, outside]] - hydro_e).abs() < 1e-12);
    }

    #[test]
    fn test_azimuthal_faces_take_ambient_by() {
        let mut cfg = base_config();
        cfg.problem.by = 0.05;
        let ctx = JetContext::from_config(&cfg).unwrap();
        let geom = cfg.create_geometry();
        let state = problem_generator(&ctx, &geom, &SrMhdEos::new(cfg.hydro.gamma)).unwrap();
        assert!(state.b.x2f.iter().all(|v| *v == 0.05));
        assert!(state
            .bcc
            .index_axis(ndarray::Axis(0), IB2)
            .iter()
            .all(|v| (v - 0.05).abs() < 1e-15));
    }

    #[test]
    fn test_hydro_only_block_has_no_field() {
        let mut cfg = base_config();
        cfg.fields.magnetic = false;
        let ctx = JetContext::from_config(&cfg).unwrap();
        let geom = cfg.create_geometry();
        let state = problem_generator(&ctx, &geom, &SrMhdEos::new(cfg.hydro.gamma)).unwrap();
        assert!(state.bcc.iter().all(|v| *v == 0.0));
        assert!(state.b.x3f.iter().all(|v| *v == 0.0));
    }
}
