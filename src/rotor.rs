//! Rotor assembly and modal analysis entry point.
//!
//! A [`Rotor`] owns an ordered chain of shaft elements plus the disks and
//! bearings attached to its nodes, assigns global degrees of freedom from
//! node numbers and scatter-adds every element's local matrices into the
//! global mass, stiffness, damping and gyroscopic matrices. [`Rotor::run`]
//! solves the speed-parametrized eigenproblem and caches the resulting
//! natural frequencies, damped frequencies and mode shapes.

use faer::{complex_native::c64, unzipped, zipped, Mat, MatRef};
use log::{debug, info};

use crate::elements::{BearingElement, DiskElement, ShaftElement, NODE_DOF};
use crate::error::{Error, Result};
use crate::modal::{self, Modal};

pub struct Rotor {
    shaft_elements: Vec<ShaftElement>,
    disk_elements: Vec<DiskElement>,
    bearing_elements: Vec<BearingElement>,
    speed: f64,
    n_nodes: usize,
    n_eigen: usize,
    modal: Option<Modal>,
}

impl Rotor {
    /// Builds a rotor from its elements and a rotation speed (rad/s).
    ///
    /// Shaft element `i` must span nodes `i` and `i + 1`; disks and
    /// bearings must sit on a node of that chain. Violations are
    /// construction errors, never clamped.
    pub fn new(
        shaft_elements: Vec<ShaftElement>,
        disk_elements: Vec<DiskElement>,
        bearing_elements: Vec<BearingElement>,
        speed: f64,
    ) -> Result<Rotor> {
        if shaft_elements.is_empty() {
            return Err(Error::EmptyShaft);
        }
        for (i, elm) in shaft_elements.iter().enumerate() {
            if elm.n() != i {
                return Err(Error::NonContiguousShaft {
                    expected: i,
                    found: elm.n(),
                });
            }
        }

        let n_nodes = shaft_elements.len() + 1;
        for node in disk_elements
            .iter()
            .map(|d| d.n())
            .chain(bearing_elements.iter().map(|b| b.n()))
        {
            if node >= n_nodes {
                return Err(Error::NodeOutOfRange {
                    node,
                    max: n_nodes - 1,
                });
            }
        }

        Ok(Rotor {
            shaft_elements,
            disk_elements,
            bearing_elements,
            speed,
            n_nodes,
            n_eigen: 12,
            modal: None,
        })
    }

    pub fn n_nodes(&self) -> usize {
        self.n_nodes
    }

    /// Total number of lateral degrees of freedom.
    pub fn ndof(&self) -> usize {
        self.n_nodes * NODE_DOF
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Changes the rotation speed and invalidates cached modal results.
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
        self.modal = None;
    }

    /// Number of state-space eigenvalues retained by `run` (two per mode).
    pub fn set_n_eigen(&mut self, n_eigen: usize) {
        self.n_eigen = n_eigen;
        self.modal = None;
    }

    //--------------------------------------------------------------------------
    // Global matrices
    //--------------------------------------------------------------------------

    /// Global mass matrix: shaft plus disk contributions.
    pub fn m(&self) -> Mat<f64> {
        let mut m = Mat::zeros(self.ndof(), self.ndof());

        self.shaft_elements.iter().for_each(|elm| {
            scatter_add(m.as_mut(), elm.m().as_ref(), NODE_DOF * elm.n());
        });
        self.disk_elements.iter().for_each(|elm| {
            scatter_add(m.as_mut(), elm.m().as_ref(), NODE_DOF * elm.n());
        });

        m
    }

    /// Global stiffness matrix at a speed: shaft bending plus bearing
    /// stiffness evaluated from its coefficient tables.
    pub fn k(&self, speed: f64) -> Mat<f64> {
        let mut k = Mat::zeros(self.ndof(), self.ndof());

        self.shaft_elements.iter().for_each(|elm| {
            scatter_add(k.as_mut(), elm.k().as_ref(), NODE_DOF * elm.n());
        });
        self.bearing_elements.iter().for_each(|elm| {
            scatter_add(k.as_mut(), elm.k(speed).as_ref(), NODE_DOF * elm.n());
        });

        k
    }

    /// Global viscous damping matrix at a speed: bearing damping only.
    pub fn c(&self, speed: f64) -> Mat<f64> {
        let mut c = Mat::zeros(self.ndof(), self.ndof());

        self.bearing_elements.iter().for_each(|elm| {
            scatter_add(c.as_mut(), elm.c(speed).as_ref(), NODE_DOF * elm.n());
        });

        c
    }

    /// Global gyroscopic matrix, unscaled by speed: shaft plus disk
    /// contributions. Skew-symmetric.
    pub fn g(&self) -> Mat<f64> {
        let mut g = Mat::zeros(self.ndof(), self.ndof());

        self.shaft_elements.iter().for_each(|elm| {
            scatter_add(g.as_mut(), elm.g().as_ref(), NODE_DOF * elm.n());
        });
        self.disk_elements.iter().for_each(|elm| {
            scatter_add(g.as_mut(), elm.g().as_ref(), NODE_DOF * elm.n());
        });

        g
    }

    //--------------------------------------------------------------------------
    // Modal analysis
    //--------------------------------------------------------------------------

    /// Assembles the global matrices at the current speed, solves the
    /// eigenproblem and caches the results. Element inputs are never
    /// mutated; repeated calls recompute from the current configuration.
    pub fn run(&mut self) -> Result<&Modal> {
        info!(
            "running modal analysis: {} nodes, {} dofs, speed {} rad/s",
            self.n_nodes,
            self.ndof(),
            self.speed
        );

        let m = self.m();
        let k = self.k(self.speed);
        let c = self.c(self.speed);
        let g = self.g();
        debug!(
            "assembled global matrices of dimension {}x{}",
            self.ndof(),
            self.ndof()
        );

        let modal = modal::solve(
            m.as_ref(),
            k.as_ref(),
            c.as_ref(),
            g.as_ref(),
            self.speed,
            self.n_eigen,
        )?;
        Ok(&*self.modal.insert(modal))
    }

    /// Modal results of the last `run`, if still valid.
    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    /// Natural frequencies (rad/s), ascending, after `run`.
    pub fn wn(&self) -> Option<&[f64]> {
        self.modal.as_ref().map(|m| m.wn.as_slice())
    }

    /// Damped natural frequencies (rad/s), ascending, after `run`.
    pub fn wd(&self) -> Option<&[f64]> {
        self.modal.as_ref().map(|m| m.wd.as_slice())
    }

    /// Mode shapes over the displacement partition, one column per entry
    /// of `wn`, after `run`.
    pub fn mode_shapes(&self) -> Option<MatRef<'_, c64>> {
        self.modal.as_ref().map(|m| m.shapes.as_ref())
    }

    pub fn shaft_elements(&self) -> &[ShaftElement] {
        &self.shaft_elements
    }

    pub fn disk_elements(&self) -> &[DiskElement] {
        &self.disk_elements
    }

    pub fn bearing_elements(&self) -> &[BearingElement] {
        &self.bearing_elements
    }
}

/// Accumulates a local element block into the global matrix at the given
/// first DOF index.
fn scatter_add(global: faer::MatMut<f64>, local: MatRef<f64>, first_dof: usize) {
    let n = local.nrows();
    let mut blk = global.submatrix_mut(first_dof, first_dof, n, n);
    zipped!(&mut blk, local).for_each(|unzipped!(g, e)| *g += *e);
}

//------------------------------------------------------------------------------
// Testing
//------------------------------------------------------------------------------
