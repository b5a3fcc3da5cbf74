/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Unit-cell metric and the fractional/Cartesian transform pair

use super::errors::{Result, StructureError};
use crate::utils::Mat3;

/// A crystallographic unit cell
///
/// Holds the six cell parameters and the derived transform pair between
/// fractional and Cartesian (Angstrom) coordinates. Immutable once built.
#[derive(Debug, Clone)]
pub struct CrystalCell {
    a: f64,
    b: f64,
    c: f64,
    alpha: f64,
    beta: f64,
    gamma: f64,
    frac_to_cart: Mat3,
    cart_to_frac: Mat3,
}

impl CrystalCell {
    /// Build a cell from lengths in Angstroms and angles in degrees
    ///
    /// Uses the standard crystallographic convention with the a axis along
    /// Cartesian x and the b axis in the x-y plane.
    pub fn new(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> Result<Self> {
        if a <= 0.0 || b <= 0.0 || c <= 0.0 {
            return Err(StructureError::SingularCell(format!(
                "non-positive axis length (a={}, b={}, c={})",
                a, b, c
            )));
        }

        let (ca, cb, cg) = (
            alpha.to_radians().cos(),
            beta.to_radians().cos(),
            gamma.to_radians().cos(),
        );
        let sg = gamma.to_radians().sin();
        if sg.abs() < 1e-12 {
            return Err(StructureError::SingularCell(format!("gamma = {} degrees", gamma)));
        }

        let volume_factor = 1.0 - ca * ca - cb * cb - cg * cg + 2.0 * ca * cb * cg;
        if volume_factor <= 0.0 {
            return Err(StructureError::SingularCell(format!(
                "degenerate angles (alpha={}, beta={}, gamma={})",
                alpha, beta, gamma
            )));
        }

        let frac_to_cart = Mat3::new([
            [a, b * cg, c * cb],
            [0.0, b * sg, c * (ca - cb * cg) / sg],
            [0.0, 0.0, c * volume_factor.sqrt() / sg],
        ]);
        let cart_to_frac = frac_to_cart
            .inverse()
            .ok_or_else(|| StructureError::SingularCell("transform is not invertible".into()))?;

        Ok(Self {
            a,
            b,
            c,
            alpha,
            beta,
            gamma,
            frac_to_cart,
            cart_to_frac,
        })
    }

    /// Convert fractional coordinates to Cartesian Angstroms
    pub fn to_cartesian(&self, frac: [f64; 3]) -> [f64; 3] {
        self.frac_to_cart.mul_vec(frac)
    }

    /// Convert Cartesian Angstroms to fractional coordinates
    pub fn to_fractional(&self, cart: [f64; 3]) -> [f64; 3] {
        self.cart_to_frac.mul_vec(cart)
    }

    /// The fractional-from-Cartesian transform matrix
    pub fn fractional_matrix(&self) -> &Mat3 {
        &self.cart_to_frac
    }

    /// Longest of the three cell axes in Angstroms
    pub fn longest_axis(&self) -> f64 {
        self.a.max(self.b).max(self.c)
    }

    /// Cell parameters (a, b, c, alpha, beta, gamma)
    pub fn parameters(&self) -> (f64, f64, f64, f64, f64, f64) {
        (self.a, self.b, self.c, self.alpha, self.beta, self.gamma)
    }
}
