/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Physical constants used in crystal-field calculations

/// Bohr radius in Angstroms
pub const BOHR_RADIUS: f64 = 0.52917721067;

/// Elementary charge in Coulombs
pub const ELEMENTARY_CHARGE: f64 = 1.602176634e-19;

/// Coulomb constant 1/(4*pi*eps0) in N m^2 / C^2
pub const COULOMB_CONSTANT: f64 = 8.9875517873681764e9;

/// Conversion from Angstroms to metres
pub const ANGSTROM_TO_METRE: f64 = 1.0e-10;

/// Coulomb energy scale e^2/(4*pi*eps0) expressed in meV*m per pair of
/// elementary charges: divide by a separation in metres to get meV
pub const COULOMB_MEV_METRE: f64 = COULOMB_CONSTANT * ELEMENTARY_CHARGE * 1000.0;
