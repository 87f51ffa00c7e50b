// ─────────────────────────────────────────────────────────────────────
// SRJet Inflow — Host Hooks
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Enrollment of user boundary and refinement callbacks with the host mesh.
//!
//! Callbacks capture the shared `JetContext` through an `Arc`, so the
//! context is fully built before any block can invoke them.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use jet_types::config::ProblemConfig;
use jet_types::error::{JetError, JetResult};
use jet_types::state::{BlockGeometry, BlockState, FaceField, IndexBounds};
use ndarray::Array4;

use crate::boundary::jet_inner_x3;
use crate::eos::SrMhdEos;
use crate::params::JetContext;
use crate::problem::problem_generator;
use crate::refinement::{refinement_condition, RefinementSignal};

/// Physical boundary of the mesh a user function can be enrolled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundaryFace {
    InnerX1,
    OuterX1,
    InnerX2,
    OuterX2,
    InnerX3,
    OuterX3,
}

/// (geometry, primitives, face field, time, dt, bounds, ghost layers)
pub type UserBoundaryFn = Arc<
    dyn Fn(&BlockGeometry, &mut Array4<f64>, &mut FaceField, f64, f64, &IndexBounds, usize) -> JetResult<()>
        + Send
        + Sync,
>;

/// (geometry, primitives, cell-centered field)
pub type RefinementFn =
    Arc<dyn Fn(&BlockGeometry, &Array4<f64>, &Array4<f64>) -> JetResult<RefinementSignal> + Send + Sync>;

#[derive(Default, Clone)]
pub struct HookRegistry {
    boundaries: HashMap<BoundaryFace, UserBoundaryFn>,
    refinement: Option<RefinementFn>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enroll_boundary(&mut self, face: BoundaryFace, f: UserBoundaryFn) -> JetResult<()> {
        if self.boundaries.contains_key(&face) {
            return Err(JetError::ConfigError(format!(
                "user boundary for {face:?} already enrolled"
            )));
        }
        self.boundaries.insert(face, f);
        Ok(())
    }

    pub fn enroll_refinement(&mut self, f: RefinementFn) -> JetResult<()> {
        if self.refinement.is_some() {
            return Err(JetError::ConfigError(
                "user refinement condition already enrolled".to_string(),
            ));
        }
        self.refinement = Some(f);
        Ok(())
    }

    pub fn boundary(&self, face: BoundaryFace) -> Option<&UserBoundaryFn> {
        self.boundaries.get(&face)
    }

    pub fn refinement(&self) -> Option<&RefinementFn> {
        self.refinement.as_ref()
    }

    /// Run the function enrolled for `face`. Returns `false` when none is.
    #[allow(clippy::too_many_arguments)]
    pub fn apply_boundary(
        &self,
        face: BoundaryFace,
        geom: &BlockGeometry,
        prim: &mut Array4<f64>,
        b: &mut FaceField,
        time: f64,
        dt: f64,
        bounds: &IndexBounds,
        ngh: usize,
    ) -> JetResult<bool> {
        match self.boundaries.get(&face) {
            Some(f) => {
                f(geom, prim, b, time, dt, bounds, ngh)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Evaluate the refinement condition, if one is enrolled.
    pub fn check_refinement(
        &self,
        geom: &BlockGeometry,
        prim: &Array4<f64>,
        bcc: &Array4<f64>,
    ) -> JetResult<Option<RefinementSignal>> {
        self.refinement.as_ref().map(|f| f(geom, prim, bcc)).transpose()
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut faces: Vec<_> = self.boundaries.keys().collect();
        faces.sort_by_key(|face| **face as u8);
        f.debug_struct("HookRegistry")
            .field("boundaries", &faces)
            .field("refinement", &self.refinement.is_some())
            .finish()
    }
}

/// The magnetized relativistic jet problem as seen by the host.
#[derive(Debug, Clone)]
pub struct SrJetProblem {
    ctx: Arc<JetContext>,
    eos: SrMhdEos,
}

impl SrJetProblem {
    /// Build the shared context and enroll the inner-x3 inflow boundary,
    /// plus the magnetization refinement condition on adaptive meshes.
    pub fn init_user_mesh_data(config: &ProblemConfig, registry: &mut HookRegistry) -> JetResult<Self> {
        let ctx = Arc::new(JetContext::from_config(config)?);

        let bc_ctx = Arc::clone(&ctx);
        let inflow: UserBoundaryFn = Arc::new(
            move |geom: &BlockGeometry,
                  prim: &mut Array4<f64>,
                  b: &mut FaceField,
                  time: f64,
                  dt: f64,
                  bounds: &IndexBounds,
                  ngh: usize| {
                jet_inner_x3(&bc_ctx, geom, prim, b, time, dt, bounds, ngh)
            },
        );
        registry.enroll_boundary(BoundaryFace::InnerX3, inflow)?;

        if config.mesh.adaptive {
            let ref_ctx = Arc::clone(&ctx);
            let condition: RefinementFn = Arc::new(
                move |geom: &BlockGeometry, prim: &Array4<f64>, bcc: &Array4<f64>| {
                    refinement_condition(&ref_ctx.refinement, geom, prim, bcc)
                },
            );
            registry.enroll_refinement(condition)?;
        }

        tracing::info!(
            adaptive = config.mesh.adaptive,
            magnetic = ctx.magnetic,
            "jet problem hooks enrolled"
        );
        let eos = SrMhdEos::new(ctx.gamma_ad);
        Ok(SrJetProblem { ctx, eos })
    }

    pub fn context(&self) -> &Arc<JetContext> {
        &self.ctx
    }

    pub fn problem_generator(&self, geom: &BlockGeometry) -> JetResult<BlockState> {
        problem_generator(&self.ctx, geom, &self.eos)
    }
}
