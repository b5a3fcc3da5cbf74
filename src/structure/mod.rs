/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Crystallographic geometry: unit cell, space-group symmetry and atom sites
//!
//! This module covers everything needed to turn a loaded structure into the
//! Cartesian neighbour geometry around one site: the cell metric with its
//! fractional/Cartesian transform pair, symmetry-operator application and
//! unique-label resolution of the scatterer list.

pub mod cell;
pub mod errors;
pub mod provider;
pub mod sites;
pub mod symmetry;

pub use cell::CrystalCell;
pub use errors::{Result, StructureError};
pub use provider::{CrystalStructure, LoadedStructure, StructureLoader, StructureSource};
pub use sites::{find_site, resolve_unique_sites, AtomSite};
pub use symmetry::SymOp;
