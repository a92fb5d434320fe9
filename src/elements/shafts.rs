//! Shaft finite element.
//!
//! A Timoshenko beam segment of hollow circular cross section spanning two
//! adjacent nodes. Each node carries four lateral degrees of freedom
//! `[x, y, alpha, beta]`: translations in the two planes transverse to the
//! shaft axis and the rotations about x and y. The element produces 8x8
//! local mass, stiffness and gyroscopic matrices; the gyroscopic matrix is
//! returned unscaled and is multiplied by the rotation speed at solve time.

use std::f64::consts::PI;
use std::sync::Arc;

use faer::{mat, unzipped, zipped, Mat, Scale};

use crate::error::{Error, Result};
use crate::material::Material;

#[derive(Debug, Clone)]
pub struct ShaftElement {
    n: usize,
    /// Element length (m)
    pub l: f64,
    /// Inner diameter (m), zero for a solid section
    pub i_d: f64,
    /// Outer diameter (m)
    pub o_d: f64,
    pub material: Arc<Material>,
    shear_effects: bool,
    rotary_inertia: bool,
    gyroscopic: bool,
    /// Cross section area (m^2)
    area: f64,
    /// Second moment of area (m^4)
    second_moment: f64,
    /// Shear deformation parameter, zero for Euler-Bernoulli behavior
    phi: f64,
}

impl ShaftElement {
    /// Timoshenko element with shear deformation, rotary inertia and
    /// gyroscopic coupling enabled.
    pub fn new(l: f64, i_d: f64, o_d: f64, material: Arc<Material>, n: usize) -> Result<Self> {
        Self::with_effects(l, i_d, o_d, material, n, true, true, true)
    }

    /// Element with individual formulation effects toggled. Disabling
    /// `shear_effects` recovers the Euler-Bernoulli element.
    #[allow(clippy::too_many_arguments)]
    pub fn with_effects(
        l: f64,
        i_d: f64,
        o_d: f64,
        material: Arc<Material>,
        n: usize,
        shear_effects: bool,
        rotary_inertia: bool,
        gyroscopic: bool,
    ) -> Result<Self> {
        if !(l.is_finite() && l > 0.) {
            return Err(Error::InvalidGeometry(format!(
                "shaft element length must be positive, got {l}"
            )));
        }
        if !(o_d.is_finite() && o_d > 0.) {
            return Err(Error::InvalidGeometry(format!(
                "outer diameter must be positive, got {o_d}"
            )));
        }
        if !(i_d.is_finite() && i_d >= 0.) {
            return Err(Error::InvalidGeometry(format!(
                "inner diameter must be non-negative, got {i_d}"
            )));
        }
        if i_d >= o_d {
            return Err(Error::InvalidGeometry(format!(
                "inner diameter {i_d} must be smaller than outer diameter {o_d}"
            )));
        }

        let area = PI * (o_d.powi(2) - i_d.powi(2)) / 4.;
        let second_moment = PI * (o_d.powi(4) - i_d.powi(4)) / 64.;

        let phi = if shear_effects {
            // Cowper shear coefficient for a hollow circular section
            let nu = material.poisson;
            let r = i_d / o_d;
            let r2 = r * r;
            let r12 = (1. + r2) * (1. + r2);
            let kappa =
                6. * r12 * (1. + nu) / (r12 * (7. + 6. * nu) + r2 * (20. + 12. * nu));
            12. * material.e * second_moment / (material.g_s * kappa * area * l * l)
        } else {
            0.
        };

        Ok(Self {
            n,
            l,
            i_d,
            o_d,
            material,
            shear_effects,
            rotary_inertia,
            gyroscopic,
            area,
            second_moment,
            phi,
        })
    }

    /// First node spanned by the element.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Cross section area (m^2).
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Second moment of area (m^4).
    pub fn second_moment(&self) -> f64 {
        self.second_moment
    }

    pub fn shear_effects(&self) -> bool {
        self.shear_effects
    }

    /// Consistent mass matrix, translational inertia plus rotary inertia
    /// when enabled. Symmetric 8x8.
    pub fn m(&self) -> Mat<f64> {
        let phi = self.phi;
        let l = self.l;

        let m1 = 312. + 588. * phi + 280. * phi * phi;
        let m2 = (44. + 77. * phi + 35. * phi * phi) * l;
        let m3 = 108. + 252. * phi + 140. * phi * phi;
        let m4 = -(26. + 63. * phi + 35. * phi * phi) * l;
        let m5 = (8. + 14. * phi + 7. * phi * phi) * l * l;
        let m6 = -(6. + 14. * phi + 7. * phi * phi) * l * l;

        let mut m = mat![
            [m1, 0., 0., m2, m3, 0., 0., m4],
            [0., m1, -m2, 0., 0., m3, -m4, 0.],
            [0., -m2, m5, 0., 0., m4, m6, 0.],
            [m2, 0., 0., m5, -m4, 0., 0., m6],
            [m3, 0., 0., -m4, m1, 0., 0., -m2],
            [0., m3, m4, 0., 0., m1, m2, 0.],
            [0., -m4, m6, 0., 0., m2, m5, 0.],
            [m4, 0., 0., m6, -m2, 0., 0., m5],
        ] * Scale(
            self.material.rho * self.area * l / (840. * (1. + phi) * (1. + phi)),
        );

        if self.rotary_inertia {
            let s1 = 36.;
            let s2 = (3. - 15. * phi) * l;
            let s3 = (4. + 5. * phi + 10. * phi * phi) * l * l;
            let s4 = (-1. - 5. * phi + 5. * phi * phi) * l * l;

            let ms = mat![
                [s1, 0., 0., s2, -s1, 0., 0., s2],
                [0., s1, -s2, 0., 0., -s1, -s2, 0.],
                [0., -s2, s3, 0., 0., s2, s4, 0.],
                [s2, 0., 0., s3, -s2, 0., 0., s4],
                [-s1, 0., 0., -s2, s1, 0., 0., -s2],
                [0., -s1, s2, 0., 0., s1, s2, 0.],
                [0., -s2, s4, 0., 0., s2, s3, 0.],
                [s2, 0., 0., s4, -s2, 0., 0., s3],
            ] * Scale(
                self.material.rho * self.second_moment
                    / (30. * l * (1. + phi) * (1. + phi)),
            );

            zipped!(&mut m.as_mut(), ms.as_ref()).for_each(|unzipped!(a, b)| *a += *b);
        }

        m
    }

    /// Bending stiffness matrix. Symmetric 8x8 with the rigid-body motions
    /// in its nullspace.
    pub fn k(&self) -> Mat<f64> {
        let phi = self.phi;
        let l = self.l;

        let k3 = (4. + phi) * l * l;
        let k4 = (2. - phi) * l * l;

        mat![
            [12., 0., 0., 6. * l, -12., 0., 0., 6. * l],
            [0., 12., -6. * l, 0., 0., -12., -6. * l, 0.],
            [0., -6. * l, k3, 0., 0., 6. * l, k4, 0.],
            [6. * l, 0., 0., k3, -6. * l, 0., 0., k4],
            [-12., 0., 0., -6. * l, 12., 0., 0., -6. * l],
            [0., -12., 6. * l, 0., 0., 12., 6. * l, 0.],
            [0., -6. * l, k4, 0., 0., 6. * l, k3, 0.],
            [6. * l, 0., 0., k4, -6. * l, 0., 0., k3],
        ] * Scale(self.material.e * self.second_moment / ((1. + phi) * l.powi(3)))
    }

    /// Gyroscopic matrix, skew-symmetric 8x8, unscaled by rotation speed.
    pub fn g(&self) -> Mat<f64> {
        if !self.gyroscopic {
            return Mat::zeros(8, 8);
        }

        let phi = self.phi;
        let l = self.l;

        let g1 = 36.;
        let g2 = (3. - 15. * phi) * l;
        let g3 = (4. + 5. * phi + 10. * phi * phi) * l * l;
        let g4 = (-1. - 5. * phi + 5. * phi * phi) * l * l;

        mat![
            [0., -g1, g2, 0., 0., g1, g2, 0.],
            [g1, 0., 0., g2, -g1, 0., 0., g2],
            [-g2, 0., 0., -g3, g2, 0., 0., -g4],
            [0., -g2, g3, 0., 0., g2, g4, 0.],
            [0., g1, -g2, 0., 0., -g1, -g2, 0.],
            [-g1, 0., 0., -g2, g1, 0., 0., -g2],
            [-g2, 0., 0., -g4, g2, 0., 0., -g3],
            [0., -g2, g4, 0., 0., g2, g3, 0.],
        ] * Scale(
            -self.material.rho * self.second_moment * 2.
                / (15. * l * (1. + phi) * (1. + phi)),
        )
    }
}

//------------------------------------------------------------------------------
// Testing
//------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn steel() -> Arc<Material> {
        Arc::new(Material::steel())
    }

    fn element() -> ShaftElement {
        ShaftElement::new(0.25, 0., 0.05, steel(), 0).unwrap()
    }

    #[test]
    fn test_rejects_bad_geometry() {
        let steel = steel();
        assert!(ShaftElement::new(0., 0., 0.05, steel.clone(), 0).is_err());
        assert!(ShaftElement::new(-0.25, 0., 0.05, steel.clone(), 0).is_err());
        assert!(ShaftElement::new(0.25, 0., 0., steel.clone(), 0).is_err());
        assert!(ShaftElement::new(0.25, -0.01, 0.05, steel.clone(), 0).is_err());
        assert!(ShaftElement::new(0.25, 0.05, 0.05, steel, 0).is_err());
    }

    #[test]
    fn test_section_properties() {
        let elm = element();
        assert_relative_eq!(elm.area(), PI * 0.05_f64.powi(2) / 4., max_relative = 1e-12);
        assert_relative_eq!(
            elm.second_moment(),
            PI * 0.05_f64.powi(4) / 64.,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_mass_matrix_symmetry_and_rigid_translation() {
        let elm = element();
        let m = elm.m();
        for i in 0..8 {
            for j in 0..8 {
                assert_relative_eq!(m[(i, j)], m[(j, i)], max_relative = 1e-12);
            }
        }

        // unit rigid translation in x recovers the element mass
        let x_dofs = [0, 4];
        let mut mass = 0.;
        for &i in &x_dofs {
            for &j in &x_dofs {
                mass += m[(i, j)];
            }
        }
        let expected = elm.material.rho * elm.area() * elm.l;
        assert_relative_eq!(mass, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_stiffness_matrix_rigid_body_nullspace() {
        let elm = element();
        let k = elm.k();
        let l = elm.l;

        for i in 0..8 {
            for j in 0..8 {
                assert_relative_eq!(k[(i, j)], k[(j, i)], max_relative = 1e-12);
            }
        }

        // rigid translation in x: x0 = x1 = 1
        // rigid rotation about y: x1 = l, beta0 = beta1 = 1
        let translation = [1., 0., 0., 0., 1., 0., 0., 0.];
        let rotation = [0., 0., 0., 1., l, 0., 0., 1.];
        let scale = elm.material.e * elm.second_moment / l.powi(3);
        for mode in [translation, rotation] {
            for i in 0..8 {
                let r: f64 = (0..8).map(|j| k[(i, j)] * mode[j]).sum();
                assert!(r.abs() < 1e-9 * scale, "row {i} residual {r}");
            }
        }
    }

    #[test]
    fn test_gyroscopic_matrix_skew_symmetry() {
        let elm = element();
        let g = elm.g();
        for i in 0..8 {
            for j in 0..8 {
                assert_relative_eq!(g[(i, j)], -g[(j, i)], max_relative = 1e-12);
            }
        }

        let no_gyro =
            ShaftElement::with_effects(0.25, 0., 0.05, steel(), 0, true, true, false).unwrap();
        assert_eq!(no_gyro.g().norm_l2(), 0.);
    }

    #[test]
    fn test_euler_bernoulli_limit() {
        let elm =
            ShaftElement::with_effects(0.25, 0., 0.05, steel(), 0, false, false, true).unwrap();
        let l = elm.l;

        // classical consistent mass entries without shear or rotary inertia
        let m = elm.m();
        let mt = elm.material.rho * elm.area() * l / 420.;
        assert_relative_eq!(m[(0, 0)], 156. * mt, max_relative = 1e-12);
        assert_relative_eq!(m[(0, 3)], 22. * l * mt, max_relative = 1e-12);
        assert_relative_eq!(m[(0, 4)], 54. * mt, max_relative = 1e-12);
        assert_relative_eq!(m[(0, 7)], -13. * l * mt, max_relative = 1e-12);

        let k = elm.k();
        let kt = elm.material.e * elm.second_moment / l.powi(3);
        assert_relative_eq!(k[(0, 0)], 12. * kt, max_relative = 1e-12);
        assert_relative_eq!(k[(3, 3)], 4. * l * l * kt, max_relative = 1e-12);
    }

    #[test]
    fn test_shear_parameter_reduces_stiffness() {
        let timoshenko = element();
        let euler =
            ShaftElement::with_effects(0.25, 0., 0.05, steel(), 0, false, true, true).unwrap();
        assert!(timoshenko.k()[(0, 0)] < euler.k()[(0, 0)]);
    }
}
