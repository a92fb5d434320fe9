//! Sweeps rotor speed and prints natural frequency rows for a
//! Campbell diagram.

use std::f64::consts::PI;
use std::sync::Arc;

use itertools::Itertools;
use rotr::elements::{BearingElement, DiskElement, ShaftElement};
use rotr::material::Material;
use rotr::rotor::Rotor;

const N_EL: usize = 6;
const MAX_RPM: f64 = 8000.;
const STEP_RPM: f64 = 250.;

fn main() {
    env_logger::init();

    let steel = Arc::new(Material::steel());

    // 1.5 m uniform shaft with two disks and isotropic bearings
    let shaft = (0..N_EL)
        .map(|i| ShaftElement::new(1.5 / N_EL as f64, 0., 0.05, steel.clone(), i).unwrap())
        .collect_vec();
    let disks = vec![
        DiskElement::from_geometry(2, &steel, 0.07, 0.05, 0.28).unwrap(),
        DiskElement::from_geometry(4, &steel, 0.07, 0.05, 0.35).unwrap(),
    ];
    let bearings = vec![
        BearingElement::new(0, 1e6, 1e6, 0., 0.).unwrap(),
        BearingElement::new(N_EL, 1e6, 1e6, 0., 0.).unwrap(),
    ];

    let mut rotor = Rotor::new(shaft, disks, bearings, 0.).unwrap();

    println!("speed_rpm,wn1,wn2,wn3,wn4,wn5,wn6");
    let mut rpm = 0.;
    while rpm <= MAX_RPM {
        rotor.set_speed(rpm * PI / 30.);
        rotor.run().unwrap();
        let row = rotor.wn().unwrap().iter().map(|w| format!("{w:.3}")).join(",");
        println!("{rpm},{row}");
        rpm += STEP_RPM;
    }
}
