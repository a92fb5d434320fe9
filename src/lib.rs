//! Finite element lateral dynamics of rotor-bearing systems.
//!
//! The crate models a rotating machine as a chain of shaft finite elements
//! with disks and bearings attached to its nodes, assembles the global
//! mass, stiffness, damping and gyroscopic matrices, and solves the
//! speed-parametrized eigenproblem for natural frequencies, damped natural
//! frequencies and mode shapes.
//!
//! ```no_run
//! use std::sync::Arc;
//! use rotr::elements::{BearingElement, DiskElement, ShaftElement};
//! use rotr::material::Material;
//! use rotr::rotor::Rotor;
//!
//! # fn main() -> rotr::Result<()> {
//! let steel = Arc::new(Material::steel());
//! let shaft = (0..6)
//!     .map(|i| ShaftElement::new(0.25, 0., 0.05, steel.clone(), i))
//!     .collect::<rotr::Result<Vec<_>>>()?;
//! let disks = vec![DiskElement::from_geometry(2, &steel, 0.07, 0.05, 0.28)?];
//! let bearings = vec![
//!     BearingElement::new(0, 1e6, 1e6, 0., 0.)?,
//!     BearingElement::new(6, 1e6, 1e6, 0., 0.)?,
//! ];
//!
//! let mut rotor = Rotor::new(shaft, disks, bearings, 0.)?;
//! rotor.run()?;
//! println!("wn = {:?}", rotor.wn().unwrap());
//! # Ok(())
//! # }
//! ```

pub mod elements;
pub mod error;
pub mod material;
pub mod modal;
pub mod rotor;

pub use error::{Error, Result};
pub use material::{Material, MaterialLibrary};
pub use rotor::Rotor;
