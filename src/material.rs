//! Isotropic material properties and the file-backed material library.
//!
//! A [`Material`] carries density and the isotropic elastic constants.
//! Exactly one of Young's modulus, shear modulus, and Poisson coefficient
//! may be omitted at construction; it is derived from the other two through
//! `E = 2 G (1 + nu)`. Elements hold materials behind an [`std::sync::Arc`]
//! so a single definition can be shared across a whole rotor.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const DEFAULT_COLOR: &str = "#525252";

/// Material used by shaft and disk elements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    name: String,
    /// Density (kg/m^3)
    pub rho: f64,
    /// Young's modulus (N/m^2)
    pub e: f64,
    /// Shear modulus (N/m^2)
    pub g_s: f64,
    /// Poisson coefficient
    pub poisson: f64,
    /// Display color used by plotting layers
    pub color: String,
}

impl Material {
    /// Creates a material from density and at least two of the three
    /// elastic constants; the missing one is derived.
    pub fn new(
        name: &str,
        rho: f64,
        e: Option<f64>,
        g_s: Option<f64>,
        poisson: Option<f64>,
    ) -> Result<Material> {
        validate_name(name)?;
        if !(rho.is_finite() && rho > 0.) {
            return Err(Error::InvalidMaterial(format!(
                "density must be positive, got {rho}"
            )));
        }
        let supplied = [e, g_s, poisson].iter().flatten().count();
        if supplied < 2 {
            return Err(Error::InvalidMaterial(
                "at least two of E, G_s and Poisson must be provided".into(),
            ));
        }

        let (e, g_s, poisson) = match (e, g_s, poisson) {
            (Some(e), Some(g_s), None) => (e, g_s, e / (2. * g_s) - 1.),
            (Some(e), None, Some(nu)) => (e, e / (2. * (1. + nu)), nu),
            (None, Some(g_s), Some(nu)) => (g_s * 2. * (1. + nu), g_s, nu),
            (Some(e), Some(g_s), Some(nu)) => (e, g_s, nu),
            _ => unreachable!(),
        };

        for (label, value) in [("E", e), ("G_s", g_s)] {
            if !(value.is_finite() && value > 0.) {
                return Err(Error::InvalidMaterial(format!(
                    "{label} must be positive, got {value}"
                )));
            }
        }
        if !poisson.is_finite() {
            return Err(Error::InvalidMaterial(format!(
                "Poisson coefficient is not finite: {poisson}"
            )));
        }

        Ok(Material {
            name: name.to_string(),
            rho,
            e,
            g_s,
            poisson,
            color: DEFAULT_COLOR.to_string(),
        })
    }

    /// Material from Young's and shear moduli.
    pub fn from_e_g(name: &str, rho: f64, e: f64, g_s: f64) -> Result<Material> {
        Material::new(name, rho, Some(e), Some(g_s), None)
    }

    /// Material from Young's modulus and Poisson coefficient.
    pub fn from_e_nu(name: &str, rho: f64, e: f64, poisson: f64) -> Result<Material> {
        Material::new(name, rho, Some(e), None, Some(poisson))
    }

    /// Material from shear modulus and Poisson coefficient.
    pub fn from_g_nu(name: &str, rho: f64, g_s: f64, poisson: f64) -> Result<Material> {
        Material::new(name, rho, None, Some(g_s), Some(poisson))
    }

    /// Reference steel (rho 7810 kg/m^3, E 211 GPa, G 81.2 GPa).
    pub fn steel() -> Material {
        Material {
            name: "Steel".to_string(),
            rho: 7810.,
            e: 211e9,
            g_s: 81.2e9,
            poisson: 211e9 / (2. * 81.2e9) - 1.,
            color: DEFAULT_COLOR.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the material; the same naming rule as construction applies.
    pub fn set_name(&mut self, name: &str) -> Result<()> {
        validate_name(name)?;
        self.name = name.to_string();
        Ok(())
    }

    /// Field-wise approximate comparison over the numeric properties.
    pub fn approx_eq(&self, other: &Material) -> bool {
        close(self.rho, other.rho)
            && close(self.e, other.e)
            && close(self.g_s, other.g_s)
            && close(self.poisson, other.poisson)
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidMaterial("name must not be empty".into()));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(Error::InvalidMaterial(format!(
            "whitespace is not allowed in material name `{name}`"
        )));
    }
    Ok(())
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-8 * a.abs().max(b.abs()).max(1.)
}

//------------------------------------------------------------------------------
// Material library
//------------------------------------------------------------------------------

/// File-backed catalog of named materials.
///
/// The catalog is one TOML file holding a `[materials.<name>]` table per
/// entry, rewritten as a whole on every modification. Entries are
/// independent copies of the materials put into it.
pub struct MaterialLibrary {
    path: PathBuf,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    materials: BTreeMap<String, MaterialRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct MaterialRecord {
    rho: f64,
    e: f64,
    g_s: f64,
    poisson: f64,
    color: String,
}

impl MaterialLibrary {
    /// Opens a library at the given file path. The file is created on the
    /// first `put`.
    pub fn open(path: impl Into<PathBuf>) -> MaterialLibrary {
        MaterialLibrary { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the named material.
    pub fn get(&self, name: &str) -> Result<Material> {
        let catalog = self.load()?;
        let record = catalog
            .materials
            .get(name)
            .ok_or_else(|| Error::MaterialNotFound(name.to_string()))?;
        let mut material = Material::new(
            name,
            record.rho,
            Some(record.e),
            Some(record.g_s),
            Some(record.poisson),
        )?;
        material.color = record.color.clone();
        Ok(material)
    }

    /// Inserts or replaces the material under its name.
    pub fn put(&self, material: &Material) -> Result<()> {
        let mut catalog = self.load()?;
        catalog.materials.insert(
            material.name().to_string(),
            MaterialRecord {
                rho: material.rho,
                e: material.e,
                g_s: material.g_s,
                poisson: material.poisson,
                color: material.color.clone(),
            },
        );
        self.store(&catalog)
    }

    /// Sorted names of all stored materials.
    pub fn list(&self) -> Result<Vec<String>> {
        let catalog = self.load()?;
        Ok(catalog.materials.keys().cloned().collect())
    }

    /// Removes the named material.
    pub fn delete(&self, name: &str) -> Result<()> {
        let mut catalog = self.load()?;
        if catalog.materials.remove(name).is_none() {
            return Err(Error::MaterialNotFound(name.to_string()));
        }
        self.store(&catalog)
    }

    fn load(&self) -> Result<CatalogFile> {
        if !self.path.exists() {
            return Ok(CatalogFile::default());
        }
        let text = std::fs::read_to_string(&self.path)?;
        toml::from_str(&text).map_err(|e| Error::CatalogParse(e.to_string()))
    }

    fn store(&self, catalog: &CatalogFile) -> Result<()> {
        let text =
            toml::to_string_pretty(catalog).map_err(|e| Error::CatalogWrite(e.to_string()))?;
        std::fs::write(&self.path, text)?;
        Ok(())
    }
}

//------------------------------------------------------------------------------
// Testing
//------------------------------------------------------------------------------
