//! Lumped disk element.
//!
//! A rigid disk attached to a single node, contributing translational mass,
//! diametral rotary inertia and speed-proportional gyroscopic coupling. It
//! has no stiffness of its own.

use std::f64::consts::PI;

use faer::{mat, Mat};

use crate::error::{Error, Result};
use crate::material::Material;

#[derive(Debug, Clone)]
pub struct DiskElement {
    n: usize,
    /// Lumped mass (kg)
    pub m: f64,
    /// Diametral moment of inertia (kg m^2)
    pub i_d: f64,
    /// Polar moment of inertia (kg m^2)
    pub i_p: f64,
}

impl DiskElement {
    /// Disk from its inertia properties.
    pub fn new(n: usize, m: f64, i_d: f64, i_p: f64) -> Result<Self> {
        for (label, value) in [("mass", m), ("diametral inertia", i_d), ("polar inertia", i_p)] {
            if !(value.is_finite() && value > 0.) {
                return Err(Error::InvalidGeometry(format!(
                    "disk {label} must be positive, got {value}"
                )));
            }
        }
        Ok(Self { n, m, i_d, i_p })
    }

    /// Disk inertia from hollow cylinder geometry.
    pub fn from_geometry(
        n: usize,
        material: &Material,
        width: f64,
        inner_d: f64,
        outer_d: f64,
    ) -> Result<Self> {
        if !(width.is_finite() && width > 0.) {
            return Err(Error::InvalidGeometry(format!(
                "disk width must be positive, got {width}"
            )));
        }
        if !(outer_d.is_finite() && outer_d > 0.) {
            return Err(Error::InvalidGeometry(format!(
                "disk outer diameter must be positive, got {outer_d}"
            )));
        }
        if !(inner_d.is_finite() && inner_d >= 0.) || inner_d >= outer_d {
            return Err(Error::InvalidGeometry(format!(
                "disk inner diameter {inner_d} must be non-negative and smaller than outer diameter {outer_d}"
            )));
        }

        let m = material.rho * PI * width * (outer_d.powi(2) - inner_d.powi(2)) / 4.;
        let i_p = material.rho * PI * width * (outer_d.powi(4) - inner_d.powi(4)) / 32.;
        let i_d = material.rho * PI * width * (outer_d.powi(4) - inner_d.powi(4)) / 64.
            + m * width * width / 12.;

        Self::new(n, m, i_d, i_p)
    }

    /// Node the disk is attached to.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Lumped mass matrix over `[x, y, alpha, beta]`.
    pub fn m(&self) -> Mat<f64> {
        mat![
            [self.m, 0., 0., 0.],
            [0., self.m, 0., 0.],
            [0., 0., self.i_d, 0.],
            [0., 0., 0., self.i_d],
        ]
    }

    /// Gyroscopic matrix, skew-symmetric, unscaled by rotation speed.
    pub fn g(&self) -> Mat<f64> {
        mat![
            [0., 0., 0., 0.],
            [0., 0., 0., 0.],
            [0., 0., 0., self.i_p],
            [0., 0., -self.i_p, 0.],
        ]
    }
}

//------------------------------------------------------------------------------
// Testing
//------------------------------------------------------------------------------
