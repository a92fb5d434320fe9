//! Bearing element.
//!
//! Linearized bearing at a single node, described by stiffness and viscous
//! damping coefficients acting on the two lateral translations. Direct and
//! cross-coupled terms are supported; every coefficient is either a
//! constant or a table over rotation speed, interpolated linearly when the
//! element matrices are evaluated. Bearings contribute no mass and no
//! gyroscopic terms.

use faer::Mat;

use crate::elements::NODE_DOF;
use crate::error::{Error, Result};

/// A bearing coefficient: constant or speed-dependent.
#[derive(Debug, Clone)]
pub enum Coefficient {
    Constant(f64),
    /// Piecewise-linear table over rotation speed (rad/s), clamped at the
    /// table ends.
    Table { speeds: Vec<f64>, values: Vec<f64> },
}

impl Coefficient {
    /// Validated speed-dependent coefficient table.
    pub fn table(speeds: Vec<f64>, values: Vec<f64>) -> Result<Coefficient> {
        let c = Coefficient::Table { speeds, values };
        c.validate()?;
        Ok(c)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        match self {
            Coefficient::Constant(v) => {
                if !v.is_finite() {
                    return Err(Error::InvalidCoefficient(format!(
                        "coefficient is not finite: {v}"
                    )));
                }
            }
            Coefficient::Table { speeds, values } => {
                if speeds.len() < 2 {
                    return Err(Error::InvalidCoefficient(
                        "coefficient table needs at least two points".into(),
                    ));
                }
                if speeds.len() != values.len() {
                    return Err(Error::InvalidCoefficient(format!(
                        "coefficient table has {} speeds but {} values",
                        speeds.len(),
                        values.len()
                    )));
                }
                if speeds.windows(2).any(|w| w[0] >= w[1]) {
                    return Err(Error::InvalidCoefficient(
                        "coefficient table speeds must be strictly increasing".into(),
                    ));
                }
                if speeds.iter().chain(values).any(|v| !v.is_finite()) {
                    return Err(Error::InvalidCoefficient(
                        "coefficient table contains non-finite entries".into(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Coefficient value at the given rotation speed.
    pub fn at(&self, speed: f64) -> f64 {
        match self {
            Coefficient::Constant(v) => *v,
            Coefficient::Table { speeds, values } => lerp(speeds, values, speed),
        }
    }
}

impl From<f64> for Coefficient {
    fn from(v: f64) -> Self {
        Coefficient::Constant(v)
    }
}

/// Piecewise-linear interpolation over a strictly increasing abscissa,
/// clamped at both ends.
fn lerp(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[xs.len() - 1] {
        return ys[ys.len() - 1];
    }
    let i = xs.partition_point(|&v| v <= x) - 1;
    let t = (x - xs[i]) / (xs[i + 1] - xs[i]);
    ys[i] + t * (ys[i + 1] - ys[i])
}

#[derive(Debug, Clone)]
pub struct BearingElement {
    n: usize,
    pub kxx: Coefficient,
    pub kyy: Coefficient,
    pub kxy: Coefficient,
    pub kyx: Coefficient,
    pub cxx: Coefficient,
    pub cyy: Coefficient,
    pub cxy: Coefficient,
    pub cyx: Coefficient,
}

impl BearingElement {
    /// Bearing with direct stiffness and damping coefficients; the
    /// cross-coupled terms start at zero.
    pub fn new(
        n: usize,
        kxx: impl Into<Coefficient>,
        kyy: impl Into<Coefficient>,
        cxx: impl Into<Coefficient>,
        cyy: impl Into<Coefficient>,
    ) -> Result<Self> {
        let bearing = Self {
            n,
            kxx: kxx.into(),
            kyy: kyy.into(),
            kxy: 0f64.into(),
            kyx: 0f64.into(),
            cxx: cxx.into(),
            cyy: cyy.into(),
            cxy: 0f64.into(),
            cyx: 0f64.into(),
        };
        for c in [&bearing.kxx, &bearing.kyy, &bearing.cxx, &bearing.cyy] {
            c.validate()?;
        }
        Ok(bearing)
    }

    /// Adds cross-coupled stiffness terms.
    pub fn with_cross_stiffness(
        mut self,
        kxy: impl Into<Coefficient>,
        kyx: impl Into<Coefficient>,
    ) -> Result<Self> {
        self.kxy = kxy.into();
        self.kyx = kyx.into();
        self.kxy.validate()?;
        self.kyx.validate()?;
        Ok(self)
    }

    /// Adds cross-coupled damping terms.
    pub fn with_cross_damping(
        mut self,
        cxy: impl Into<Coefficient>,
        cyx: impl Into<Coefficient>,
    ) -> Result<Self> {
        self.cxy = cxy.into();
        self.cyx = cyx.into();
        self.cxy.validate()?;
        self.cyx.validate()?;
        Ok(self)
    }

    /// Node the bearing acts on.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Stiffness matrix over `[x, y, alpha, beta]` at the given speed; the
    /// rotational block is zero.
    pub fn k(&self, speed: f64) -> Mat<f64> {
        let mut k = Mat::zeros(NODE_DOF, NODE_DOF);
        k[(0, 0)] = self.kxx.at(speed);
        k[(0, 1)] = self.kxy.at(speed);
        k[(1, 0)] = self.kyx.at(speed);
        k[(1, 1)] = self.kyy.at(speed);
        k
    }

    /// Viscous damping matrix over `[x, y, alpha, beta]` at the given speed.
    pub fn c(&self, speed: f64) -> Mat<f64> {
        let mut c = Mat::zeros(NODE_DOF, NODE_DOF);
        c[(0, 0)] = self.cxx.at(speed);
        c[(0, 1)] = self.cxy.at(speed);
        c[(1, 0)] = self.cyx.at(speed);
        c[(1, 1)] = self.cyy.at(speed);
        c
    }
}

//------------------------------------------------------------------------------
// Testing
//------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_constant_coefficients() {
        let b = BearingElement::new(0, 1e6, 8e5, 3e3, 2e3).unwrap();

        let k = b.k(0.);
        assert_eq!(k[(0, 0)], 1e6);
        assert_eq!(k[(1, 1)], 8e5);
        assert_eq!(k[(0, 1)], 0.);
        assert_eq!(k[(2, 2)], 0.);

        let c = b.c(500.);
        assert_eq!(c[(0, 0)], 3e3);
        assert_eq!(c[(1, 1)], 2e3);
    }

    #[test]
    fn test_cross_coupling_breaks_symmetry() {
        let b = BearingElement::new(0, 1e6, 1e6, 0., 0.)
            .unwrap()
            .with_cross_stiffness(5e5, 0.)
            .unwrap();
        let k = b.k(0.);
        assert_eq!(k[(0, 1)], 5e5);
        assert_eq!(k[(1, 0)], 0.);
    }

    #[test]
    fn test_table_interpolation() {
        let kxx = Coefficient::table(vec![0., 100., 200.], vec![1e6, 2e6, 4e6]).unwrap();
        assert_relative_eq!(kxx.at(50.), 1.5e6);
        assert_relative_eq!(kxx.at(150.), 3e6);
        // clamped outside the table
        assert_relative_eq!(kxx.at(-10.), 1e6);
        assert_relative_eq!(kxx.at(300.), 4e6);

        let b = BearingElement::new(0, kxx, 1e6, 0., 0.).unwrap();
        assert_relative_eq!(b.k(100.)[(0, 0)], 2e6);
    }

    #[test]
    fn test_rejects_malformed_tables() {
        assert!(Coefficient::table(vec![0., 0.], vec![1., 2.]).is_err());
        assert!(Coefficient::table(vec![100., 0.], vec![1., 2.]).is_err());
        assert!(Coefficient::table(vec![0., 100.], vec![1.]).is_err());
        assert!(Coefficient::table(vec![0.], vec![1.]).is_err());
        assert!(Coefficient::table(vec![0., 100.], vec![1., f64::NAN]).is_err());
    }
}
