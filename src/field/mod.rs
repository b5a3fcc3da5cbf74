/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Crystal-field physics: ion tables, charge resolution, ligand search,
//! tesseral-harmonic evaluation and parameter accumulation

pub mod charges;
pub mod harmonics;
pub mod ion;
pub mod ligands;
pub mod model;

pub use charges::ChargeTable;
pub use harmonics::{blm_terms, parameter_names, BlmTerms};
pub use ion::Ion;
pub use ligands::{find_ligands, Ligand, SearchSpec, DEFAULT_MAX_DISTANCE, SUPERCELL_MARGIN};
pub use model::PointChargeModel;
