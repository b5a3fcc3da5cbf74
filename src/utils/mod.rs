/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Utility support for crystal-field calculations
//!
//! Physical constants and the small fixed-size linear algebra used by the
//! lattice transforms.

pub mod constants;
pub mod linalg;

pub use constants::{ANGSTROM_TO_METRE, BOHR_RADIUS, COULOMB_MEV_METRE};
pub use linalg::Mat3;
