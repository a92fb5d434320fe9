//! Error types shared across the crate.

use thiserror::Error;

/// Errors raised while building materials and elements, assembling a rotor,
/// or solving the eigenproblem.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid material: {0}")]
    InvalidMaterial(String),

    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("invalid bearing coefficient: {0}")]
    InvalidCoefficient(String),

    #[error("rotor must contain at least one shaft element")]
    EmptyShaft,

    #[error("shaft elements must form a contiguous chain: expected element at node {expected}, found node {found}")]
    NonContiguousShaft { expected: usize, found: usize },

    #[error("node {node} is outside the shaft node range [0, {max}]")]
    NodeOutOfRange { node: usize, max: usize },

    #[error("mass matrix is singular or not positive definite")]
    SingularMassMatrix,

    #[error("eigenvalue computation produced non-finite values")]
    EigenFailed,

    #[error("material `{0}` not found in library")]
    MaterialNotFound(String),

    #[error("material library i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("material library parse error: {0}")]
    CatalogParse(String),

    #[error("material library write error: {0}")]
    CatalogWrite(String),
}

pub type Result<T> = std::result::Result<T, Error>;
