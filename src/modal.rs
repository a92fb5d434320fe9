//! Speed-parametrized eigenproblem and mode extraction.
//!
//! Free lateral vibration of the assembled rotor is governed by
//! `M x'' + (C + w G) x' + K x = 0`. The quadratic problem is reduced to
//! the first-order form
//!
//! ```text
//! A = | 0         I          |
//!     | -M^-1 K   -M^-1 Ct   |      Ct = C + w G
//! ```
//!
//! whose complex eigenvalues come in conjugate pairs `-sigma +/- i wd` for
//! underdamped modes. One representative per pair is retained: `wd` is its
//! imaginary part, `wn` its modulus, and the mode shape is the eigenvector
//! restricted to the displacement partition of the state vector.

use faer::{
    complex_native::c64,
    linalg::solvers::{Eigendecomposition, SpSolver},
    unzipped, zipped, Mat, MatRef, Side,
};
use itertools::Itertools;
use log::debug;

use crate::error::{Error, Result};

/// Modal analysis results at a fixed rotation speed.
#[derive(Debug)]
pub struct Modal {
    /// Rotation speed (rad/s) the analysis was run at
    pub speed: f64,
    /// Natural frequencies (rad/s), one per retained mode
    pub wn: Vec<f64>,
    /// Damped natural frequencies (rad/s), paired with `wn`
    pub wd: Vec<f64>,
    /// Retained eigenvalues, one conjugate representative per mode
    pub evalues: Vec<c64>,
    /// Mode shapes over the displacement partition, one column per mode
    pub shapes: Mat<c64>,
}

/// Solves the eigenproblem for the assembled matrices at the given speed,
/// retaining at most `n_eigen` state-space eigenvalues (two per mode).
pub fn solve(
    m: MatRef<f64>,
    k: MatRef<f64>,
    c: MatRef<f64>,
    g: MatRef<f64>,
    speed: f64,
    n_eigen: usize,
) -> Result<Modal> {
    let n = m.nrows();

    // damping plus speed-scaled gyroscopic coupling
    let mut ct = Mat::<f64>::zeros(n, n);
    zipped!(&mut ct.as_mut(), c, g).for_each(|unzipped!(ct, c, g)| *ct = *c + speed * *g);

    // The mass matrix must be positive definite for the state-space
    // reduction to exist; a massless DOF surfaces here.
    let llt = m.cholesky(Side::Lower).map_err(|_| Error::SingularMassMatrix)?;
    let mk = llt.solve(k);
    let mc = llt.solve(ct.as_ref());

    let mut a = Mat::<f64>::zeros(2 * n, 2 * n);
    (0..n).for_each(|i| a[(i, n + i)] = 1.);
    {
        let mut blk = a.as_mut().submatrix_mut(n, 0, n, n);
        zipped!(&mut blk, mk.as_ref()).for_each(|unzipped!(dst, v)| *dst = -*v);
    }
    {
        let mut blk = a.as_mut().submatrix_mut(n, n, n, n);
        zipped!(&mut blk, mc.as_ref()).for_each(|unzipped!(dst, v)| *dst = -*v);
    }

    let eig: Eigendecomposition<c64> = a.eigendecomposition();
    let s = eig.s().column_vector();
    let u = eig.u();

    let evalues = (0..2 * n).map(|i| s[i]).collect_vec();
    if evalues
        .iter()
        .any(|l| !l.re.is_finite() || !l.im.is_finite())
    {
        return Err(Error::EigenFailed);
    }

    // Deterministic ordering: ascending by (imaginary part, modulus),
    // rounded so that repeated roots compare equal and keep a stable
    // relative order.
    let mut order = (0..2 * n).collect_vec();
    order.sort_by(|&i, &j| {
        let (ai, bi) = sort_key(evalues[i]);
        let (aj, bj) = sort_key(evalues[j]);
        ai.total_cmp(&aj).then(bi.total_cmp(&bj))
    });

    // upper half: one conjugate representative per pair, ascending in wd
    let n_modes = (n_eigen / 2).min(n);
    let kept = &order[n..n + n_modes];

    let wd = kept.iter().map(|&i| evalues[i].im).collect_vec();
    let wn = kept.iter().map(|&i| modulus(evalues[i])).collect_vec();
    let shapes = Mat::from_fn(n, n_modes, |r, j| u[(r, kept[j])]);
    let retained = kept.iter().map(|&i| evalues[i]).collect_vec();

    debug!(
        "modal solve retained {} of {} eigenvalues at speed {} rad/s",
        n_modes,
        2 * n,
        speed
    );

    Ok(Modal {
        speed,
        wn,
        wd,
        evalues: retained,
        shapes,
    })
}

fn modulus(l: c64) -> f64 {
    (l.re * l.re + l.im * l.im).sqrt()
}

fn sort_key(l: c64) -> (f64, f64) {
    (round10(l.im), round10(modulus(l)))
}

fn round10(x: f64) -> f64 {
    (x * 1e10).round() / 1e10
}

//------------------------------------------------------------------------------
// Testing
//------------------------------------------------------------------------------
