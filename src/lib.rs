/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! # pointcharge-rs
//!
//! A point-charge crystal-field model for rare-earth ions.
//!
//! Converts a crystal structure (unit cell, space-group symmetry, atom
//! sites, formal charges) into the sparse set of real tesseral-harmonic
//! crystal-field parameters (Blm/IBlm, degrees l = 2, 4, 6, in meV)
//! describing the electrostatic environment of one magnetic ion.
//!
//! Structure-file parsing and the diagonalization of the resulting
//! crystal-field Hamiltonian are handled by external collaborators; this
//! crate covers everything between a loaded structure (or an explicit
//! ligand list) and the parameter map.
//!
//! ```
//! use pointcharge_rs::field::{Ligand, PointChargeModel};
//!
//! // One O2- ligand 2.3 Angstroms above an Er3+ ion
//! let mut model =
//!     PointChargeModel::from_ligands(vec![Ligand::new(-2.0, [0.0, 0.0, 2.3])]).unwrap();
//! model.set_ion("Er").unwrap();
//! let blm = model.calculate().unwrap();
//! assert!(blm["B20"] > 0.0);
//! ```

pub mod field;
pub mod structure;
pub mod utils;

pub use field::{Ligand, PointChargeModel, SearchSpec};
pub use structure::{CrystalCell, LoadedStructure, StructureError, StructureSource};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
