//! Rotor public API contracts: eigenvalue count selection, result caching
//! and speed-dependent bearing tables.

use std::f64::consts::PI;
use std::sync::Arc;

use approx::assert_relative_eq;
use itertools::Itertools;
use rotr::elements::{BearingElement, Coefficient, DiskElement, ShaftElement};
use rotr::material::Material;
use rotr::rotor::Rotor;

fn steel() -> Arc<Material> {
    Arc::new(Material::steel())
}

fn base_rotor(bearings: Vec<BearingElement>, w: f64) -> Rotor {
    let steel = steel();
    let shaft = (0..6)
        .map(|i| ShaftElement::new(0.25, 0., 0.05, steel.clone(), i).unwrap())
        .collect_vec();
    let disks = vec![DiskElement::from_geometry(3, &steel, 0.07, 0.05, 0.28).unwrap()];
    Rotor::new(shaft, disks, bearings, w).unwrap()
}

fn isotropic_bearings(k: f64, c: f64) -> Vec<BearingElement> {
    vec![
        BearingElement::new(0, k, k, c, c).unwrap(),
        BearingElement::new(6, k, k, c, c).unwrap(),
    ]
}

#[test]
fn test_n_eigen_controls_mode_count() {
    let mut rotor = base_rotor(isotropic_bearings(1e6, 0.), 0.);

    rotor.run().unwrap();
    assert_eq!(rotor.wn().unwrap().len(), 6);

    rotor.set_n_eigen(4);
    assert!(rotor.wn().is_none());
    rotor.run().unwrap();
    assert_eq!(rotor.wn().unwrap().len(), 2);

    // requesting more than the model carries clamps to the dof count
    rotor.set_n_eigen(10_000);
    rotor.run().unwrap();
    assert_eq!(rotor.wn().unwrap().len(), rotor.ndof());
}

#[test]
fn test_rerun_is_reproducible() {
    let mut rotor = base_rotor(isotropic_bearings(1e6, 0.), 400.);

    let first = rotor.run().unwrap().wn.clone();
    let second = rotor.run().unwrap().wn.clone();
    assert_eq!(first, second);

    // a speed round trip restores the original results
    rotor.set_speed(800.);
    rotor.run().unwrap();
    rotor.set_speed(400.);
    let third = rotor.run().unwrap().wn.clone();
    for (a, b) in first.iter().zip(&third) {
        assert_relative_eq!(a, b, max_relative = 1e-9);
    }
}

#[test]
fn test_speed_dependent_bearing_tables() {
    let table = |lo: f64, hi: f64| {
        Coefficient::table(vec![0., 1000.], vec![lo, hi]).unwrap()
    };
    let bearings = vec![
        BearingElement::new(0, table(1e6, 2e6), table(1e6, 2e6), 0., 0.).unwrap(),
        BearingElement::new(6, table(1e6, 2e6), table(1e6, 2e6), 0., 0.).unwrap(),
    ];
    let rotor = base_rotor(bearings, 0.);

    // the assembled stiffness follows the interpolated coefficient
    let k0 = rotor.k(0.)[(0, 0)];
    let k500 = rotor.k(500.)[(0, 0)];
    let k1000 = rotor.k(1000.)[(0, 0)];
    assert_relative_eq!(k500 - k0, 0.5e6, max_relative = 1e-9);
    assert_relative_eq!(k1000 - k0, 1e6, max_relative = 1e-9);

    // stiffer supports at speed raise the lower modes
    let mut soft = base_rotor(isotropic_bearings(1e6, 0.), 0.);
    let mut stiff = base_rotor(
        vec![
            BearingElement::new(0, 2e6, 2e6, 0., 0.).unwrap(),
            BearingElement::new(6, 2e6, 2e6, 0., 0.).unwrap(),
        ],
        0.,
    );
    let wn_soft = soft.run().unwrap().wn.clone();
    let wn_stiff = stiff.run().unwrap().wn.clone();
    assert!(wn_stiff[0] > wn_soft[0]);
}

#[test]
fn test_damping_preserves_pairing_order() {
    let mut rotor = base_rotor(isotropic_bearings(1e6, 2e3), 0.);
    let modal = rotor.run().unwrap();

    assert_eq!(modal.wn.len(), modal.wd.len());
    assert_eq!(modal.shapes.ncols(), modal.wn.len());
    assert_eq!(modal.evalues.len(), modal.wn.len());
    for (l, (&wd, &wn)) in modal.evalues.iter().zip(modal.wd.iter().zip(&modal.wn)) {
        assert_relative_eq!(l.im, wd, max_relative = 1e-12);
        assert_relative_eq!((l.re * l.re + l.im * l.im).sqrt(), wn, max_relative = 1e-12);
        assert!(l.re < 0., "damped modes decay");
    }
}

#[test]
fn test_materials_are_shared_not_copied() {
    let steel = steel();
    let shaft = (0..4)
        .map(|i| ShaftElement::new(0.25, 0., 0.05, steel.clone(), i).unwrap())
        .collect_vec();
    assert_eq!(Arc::strong_count(&steel), 5);
    drop(shaft);
    assert_eq!(Arc::strong_count(&steel), 1);
}

#[test]
fn test_rpm_conversion_scenario() {
    // 4000 rpm expressed in rad/s drives the gyroscopic split
    let mut rotor = base_rotor(isotropic_bearings(1e6, 0.), 4000. * PI / 30.);
    rotor.run().unwrap();
    let wn = rotor.wn().unwrap();
    assert!(wn[0] < wn[1]);
}
