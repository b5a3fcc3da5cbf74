/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! The structure-adapter boundary
//!
//! Structure loading and file parsing live outside this crate; callers hand
//! over either an already-loaded structure, a file hint together with a
//! loader, or an explicit ligand list that bypasses structure resolution.

use super::cell::CrystalCell;
use super::errors::{Result, StructureError};
use super::symmetry::{equivalent_positions, SymOp};
use crate::field::ligands::Ligand;
use std::path::{Path, PathBuf};

/// Interface expected from the external structure adapter
pub trait CrystalStructure {
    /// The unit-cell metric
    fn cell(&self) -> &CrystalCell;

    /// Distinct symmetry-equivalent positions of a fractional site
    fn equivalent_positions(&self, site: [f64; 3]) -> Vec<[f64; 3]>;

    /// Scatterer records, one `"label x y z"` string per site
    fn scatterers(&self) -> &[String];
}

/// External collaborator that turns a structure file into a loaded structure
pub trait StructureLoader {
    fn load(&self, path: &Path) -> Result<LoadedStructure>;
}

/// A fully specified structure: cell, space-group operators and sites
#[derive(Debug, Clone)]
pub struct LoadedStructure {
    cell: CrystalCell,
    operators: Vec<SymOp>,
    scatterers: Vec<String>,
}

impl LoadedStructure {
    /// Build from a cell, Jones-faithful operator triplets and scatterers
    ///
    /// An empty operator list falls back to the identity (P1).
    pub fn new(cell: CrystalCell, triplets: &[&str], scatterers: Vec<String>) -> Result<Self> {
        let operators = if triplets.is_empty() {
            vec![SymOp::identity()]
        } else {
            triplets
                .iter()
                .map(|t| SymOp::parse(t))
                .collect::<Result<Vec<_>>>()?
        };
        Ok(Self {
            cell,
            operators,
            scatterers,
        })
    }

    /// Number of space-group operators
    pub fn operator_count(&self) -> usize {
        self.operators.len()
    }
}

impl CrystalStructure for LoadedStructure {
    fn cell(&self) -> &CrystalCell {
        &self.cell
    }

    fn equivalent_positions(&self, site: [f64; 3]) -> Vec<[f64; 3]> {
        equivalent_positions(&self.operators, site)
    }

    fn scatterers(&self) -> &[String] {
        &self.scatterers
    }
}

/// How the structure was supplied to the model
pub enum StructureSource {
    /// A file path to be resolved by an external loader
    FileHint(PathBuf),
    /// An already-loaded structure
    Loaded(Box<dyn CrystalStructure>),
    /// A raw ligand list; structure resolution is skipped entirely
    ExplicitLigands(Vec<Ligand>),
}

impl StructureSource {
    /// Resolve a file hint through the given loader; other variants pass
    /// through unchanged
    pub fn resolve(self, loader: Option<&dyn StructureLoader>) -> Result<StructureSource> {
        match self {
            StructureSource::FileHint(path) => match loader {
                Some(loader) => Ok(StructureSource::Loaded(Box::new(loader.load(&path)?))),
                None => Err(StructureError::UnresolvedFileHint(
                    path.display().to_string(),
                )),
            },
            other => Ok(other),
        }
    }
}

impl std::fmt::Debug for StructureSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StructureSource::FileHint(path) => write!(f, "StructureSource::FileHint({:?})", path),
            StructureSource::Loaded(_) => write!(f, "StructureSource::Loaded(..)"),
            StructureSource::ExplicitLigands(l) => {
                write!(f, "StructureSource::ExplicitLigands({} ligands)", l.len())
            }
        }
    }
}
