// ─────────────────────────────────────────────────────────────────────
// SRJet Inflow — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use ndarray::{Array1, Array3, Array4};

use crate::constants::{NFIELD, NHYDRO};
use crate::error::{JetError, JetResult};

/// Extents of one cylindrical (r, phi, z) block.
#[derive(Debug, Clone, Copy)]
pub struct BlockSpec {
    pub nx1: usize,
    pub nx2: usize,
    pub nx3: usize,
    pub x1min: f64,
    pub x1max: f64,
    pub x2min: f64,
    pub x2max: f64,
    pub x3min: f64,
    pub x3max: f64,
    pub x1rat: f64,
    pub nghost: usize,
}

/// Cylindrical block geometry with ghost zones.
///
/// Index 0 along each axis is the outermost ghost cell; active cells run
/// `is..=ie` (and likewise `js`, `ks`). Axes with a single active cell carry
/// no ghosts.
#[derive(Debug, Clone)]
pub struct BlockGeometry {
    pub spec: BlockSpec,
    pub ng1: usize,
    pub ng2: usize,
    pub ng3: usize,
    pub ncells1: usize,
    pub ncells2: usize,
    pub ncells3: usize,
    pub x1f: Array1<f64>, // radial faces [ncells1 + 1]
    pub x1v: Array1<f64>, // radial volume centroids [ncells1]
    pub dx1f: Array1<f64>,
    pub x2f: Array1<f64>,
    pub x2v: Array1<f64>,
    pub dx2f: Array1<f64>,
    pub x3f: Array1<f64>,
    pub x3v: Array1<f64>,
    pub dx3f: Array1<f64>,
}

/// Face positions along one axis, ghosts included.
/// Ghost widths continue the geometric progression outward from the domain.
fn axis_faces(n: usize, ng: usize, min: f64, max: f64, rat: f64) -> Array1<f64> {
    let mut widths = Vec::with_capacity(n + 2 * ng);
    let uniform = (rat - 1.0).abs() < 1e-12;
    let dx0 = if uniform {
        (max - min) / n as f64
    } else {
        (max - min) * (rat - 1.0) / (rat.powi(n as i32) - 1.0)
    };

    for m in (1..=ng).rev() {
        widths.push(dx0 / rat.powi(m as i32));
    }
    for i in 0..n {
        widths.push(dx0 * rat.powi(i as i32));
    }
    let dx_last = dx0 * rat.powi(n as i32 - 1);
    for m in 1..=ng {
        widths.push(dx_last * rat.powi(m as i32));
    }

    let mut faces = Array1::zeros(n + 2 * ng + 1);
    let start = min - widths[..ng].iter().sum::<f64>();
    faces[0] = start;
    for (idx, w) in widths.iter().enumerate() {
        faces[idx + 1] = faces[idx] + w;
    }
    // Pin the domain edges exactly.
    faces[ng] = min;
    faces[ng + n] = max;
    faces
}

fn midpoints(faces: &Array1<f64>) -> Array1<f64> {
    Array1::from_shape_fn(faces.len() - 1, |i| 0.5 * (faces[i] + faces[i + 1]))
}

fn widths(faces: &Array1<f64>) -> Array1<f64> {
    Array1::from_shape_fn(faces.len() - 1, |i| faces[i + 1] - faces[i])
}

/// Volume centroid of an annulus [r_lo, r_hi].
/// Ghost cells straddling the axis fall back to the midpoint.
fn radial_centroids(faces: &Array1<f64>) -> Array1<f64> {
    Array1::from_shape_fn(faces.len() - 1, |i| {
        let (lo, hi) = (faces[i], faces[i + 1]);
        let den = hi * hi - lo * lo;
        if (lo < 0.0 && hi > 0.0) || den.abs() <= 1e-14 * (hi - lo).powi(2) {
            0.5 * (lo + hi)
        } else {
            (2.0 / 3.0) * (hi.powi(3) - lo.powi(3)) / den
        }
    })
}

impl BlockGeometry {
    pub fn new(spec: BlockSpec) -> Self {
        let ng1 = spec.nghost;
        let ng2 = if spec.nx2 > 1 { spec.nghost } else { 0 };
        let ng3 = if spec.nx3 > 1 { spec.nghost } else { 0 };

        let x1f = axis_faces(spec.nx1, ng1, spec.x1min, spec.x1max, spec.x1rat);
        let x2f = axis_faces(spec.nx2, ng2, spec.x2min, spec.x2max, 1.0);
        let x3f = axis_faces(spec.nx3, ng3, spec.x3min, spec.x3max, 1.0);

        BlockGeometry {
            spec,
            ng1,
            ng2,
            ng3,
            ncells1: spec.nx1 + 2 * ng1,
            ncells2: spec.nx2 + 2 * ng2,
            ncells3: spec.nx3 + 2 * ng3,
            x1v: radial_centroids(&x1f),
            dx1f: widths(&x1f),
            x2v: midpoints(&x2f),
            dx2f: widths(&x2f),
            x3v: midpoints(&x3f),
            dx3f: widths(&x3f),
            x1f,
            x2f,
            x3f,
        }
    }

    pub fn is(&self) -> usize {
        self.ng1
    }
    pub fn ie(&self) -> usize {
        self.ng1 + self.spec.nx1 - 1
    }
    pub fn js(&self) -> usize {
        self.ng2
    }
    pub fn je(&self) -> usize {
        self.ng2 + self.spec.nx2 - 1
    }
    pub fn ks(&self) -> usize {
        self.ng3
    }
    pub fn ke(&self) -> usize {
        self.ng3 + self.spec.nx3 - 1
    }

    /// Radial face area r·Δφ·Δz at face `i`.
    pub fn face1_area(&self, k: usize, j: usize, i: usize) -> f64 {
        self.x1f[i] * self.dx2f[j] * self.dx3f[k]
    }

    /// Vertical face area ½(r₊² − r₋²)·Δφ of cell `i`.
    pub fn face3_area(&self, _k: usize, j: usize, i: usize) -> f64 {
        0.5 * (self.x1f[i + 1].powi(2) - self.x1f[i].powi(2)) * self.dx2f[j]
    }

    /// Azimuthal edge length r·Δφ at radial face `i`.
    pub fn edge2_length(&self, _k: usize, j: usize, i: usize) -> f64 {
        self.x1f[i] * self.dx2f[j]
    }

    pub fn primitives(&self) -> Array4<f64> {
        Array4::zeros((NHYDRO, self.ncells3, self.ncells2, self.ncells1))
    }

    pub fn cell_field(&self) -> Array4<f64> {
        Array4::zeros((NFIELD, self.ncells3, self.ncells2, self.ncells1))
    }

    pub fn face_field(&self) -> FaceField {
        FaceField::zeros(self.ncells3, self.ncells2, self.ncells1)
    }

    /// Check that a cell-centered array matches this block.
    pub fn check_cell_array(&self, name: &str, arr: &Array4<f64>, nvar: usize) -> JetResult<()> {
        let expected = [nvar, self.ncells3, self.ncells2, self.ncells1];
        if arr.shape() != expected {
            return Err(JetError::ConfigError(format!(
                "{name} shape mismatch: expected {expected:?}, got {:?}",
                arr.shape()
            )));
        }
        Ok(())
    }

    pub fn check_face_field(&self, b: &FaceField) -> JetResult<()> {
        let (n3, n2, n1) = (self.ncells3, self.ncells2, self.ncells1);
        if b.x1f.dim() != (n3, n2, n1 + 1)
            || b.x2f.dim() != (n3, n2 + 1, n1)
            || b.x3f.dim() != (n3 + 1, n2, n1)
        {
            return Err(JetError::ConfigError(format!(
                "face field shape mismatch for block ({n3}, {n2}, {n1}): x1f {:?}, x2f {:?}, x3f {:?}",
                b.x1f.dim(),
                b.x2f.dim(),
                b.x3f.dim()
            )));
        }
        Ok(())
    }
}

/// Inclusive index ranges handed to boundary and generator routines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexBounds {
    pub il: usize,
    pub iu: usize,
    pub jl: usize,
    pub ju: usize,
    pub kl: usize,
    pub ku: usize,
}

impl IndexBounds {
    /// Active cells only.
    pub fn active(geom: &BlockGeometry) -> Self {
        IndexBounds {
            il: geom.is(),
            iu: geom.ie(),
            jl: geom.js(),
            ju: geom.je(),
            kl: geom.ks(),
            ku: geom.ke(),
        }
    }

    /// Every cell, ghosts included.
    pub fn full(geom: &BlockGeometry) -> Self {
        IndexBounds {
            il: 0,
            iu: geom.ncells1 - 1,
            jl: 0,
            ju: geom.ncells2 - 1,
            kl: 0,
            ku: geom.ncells3 - 1,
        }
    }

    /// Bounds used when the host fills the inner-x3 ghost layers: all radial
    /// and azimuthal cells, vertical range starting at the first active index.
    pub fn inner_x3(geom: &BlockGeometry) -> Self {
        IndexBounds {
            il: 0,
            iu: geom.ncells1 - 1,
            jl: 0,
            ju: geom.ncells2 - 1,
            kl: geom.ks(),
            ku: geom.ke(),
        }
    }
}

/// Staggered (face-centered) magnetic field.
#[derive(Debug, Clone)]
pub struct FaceField {
    pub x1f: Array3<f64>, // [ncells3, ncells2, ncells1 + 1]
    pub x2f: Array3<f64>, // [ncells3, ncells2 + 1, ncells1]
    pub x3f: Array3<f64>, // [ncells3 + 1, ncells2, ncells1]
}

impl FaceField {
    pub fn zeros(n3: usize, n2: usize, n1: usize) -> Self {
        FaceField {
            x1f: Array3::zeros((n3, n2, n1 + 1)),
            x2f: Array3::zeros((n3, n2 + 1, n1)),
            x3f: Array3::zeros((n3 + 1, n2, n1)),
        }
    }
}

/// Complete solution state of one block.
#[derive(Debug, Clone)]
pub struct BlockState {
    pub prim: Array4<f64>, // [NHYDRO, k, j, i]
    pub cons: Array4<f64>, // [NHYDRO, k, j, i]
    pub b: FaceField,
    pub bcc: Array4<f64>, // [NFIELD, k, j, i]
}

impl BlockState {
    pub fn new(geom: &BlockGeometry) -> Self {
        BlockState {
            prim: geom.primitives(),
            cons: geom.primitives(),
            b: geom.face_field(),
            bcc: geom.cell_field(),
        }
    }
}
