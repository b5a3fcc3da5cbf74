/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Tesseral-harmonic evaluation of one ligand's crystal-field contribution
//!
//! For each ligand the 27 real tesseral-harmonic terms (5 for l=2, 9 for
//! l=4, 13 for l=6) are evaluated in closed form from the direction cosines
//! and scaled into meV. The polynomials carry the squared tesseral
//! normalization prefactors, so the accumulated coefficients multiply the
//! usual Stevens operators; the cubic invariants B44 = 5 B40 and
//! B64 = -21 B60 follow from these constants.

use super::ion::Ion;
use super::ligands::Ligand;
use crate::utils::constants::{ANGSTROM_TO_METRE, BOHR_RADIUS, COULOMB_MEV_METRE};
use std::f64::consts::PI;

/// Canonical parameter names for l=2, index-aligned with `BlmTerms::l2`
pub const L2_NAMES: [&str; 5] = ["B20", "B21", "IB21", "B22", "IB22"];

/// Canonical parameter names for l=4, index-aligned with `BlmTerms::l4`
pub const L4_NAMES: [&str; 9] = [
    "B40", "B41", "IB41", "B42", "IB42", "B43", "IB43", "B44", "IB44",
];

/// Canonical parameter names for l=6, index-aligned with `BlmTerms::l6`
pub const L6_NAMES: [&str; 13] = [
    "B60", "B61", "IB61", "B62", "IB62", "B63", "IB63", "B64", "IB64", "B65", "IB65", "B66",
    "IB66",
];

/// One ligand's scaled contribution to the 27 crystal-field parameters, in
/// meV, grouped by degree
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlmTerms {
    pub l2: [f64; 5],
    pub l4: [f64; 9],
    pub l6: [f64; 13],
}

impl BlmTerms {
    /// Iterate over (name, value) pairs for all 27 terms
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        L2_NAMES
            .iter()
            .zip(self.l2.iter())
            .chain(L4_NAMES.iter().zip(self.l4.iter()))
            .chain(L6_NAMES.iter().zip(self.l6.iter()))
            .map(|(&name, &value)| (name, value))
    }
}

/// All 27 canonical parameter names in degree order
pub fn parameter_names() -> impl Iterator<Item = &'static str> {
    L2_NAMES
        .iter()
        .chain(L4_NAMES.iter())
        .chain(L6_NAMES.iter())
        .copied()
}

/// Evaluate the scaled tesseral-harmonic terms for one ligand
///
/// `charge` is in elementary-charge units and the displacement in Angstroms.
/// The caller guarantees a nonzero distance.
pub fn blm_terms(ligand: &Ligand, ion: &Ion) -> BlmTerms {
    let [dx, dy, dz] = ligand.displacement;
    let r = ligand.distance();

    let ct = dz / r;
    let rho2 = dx * dx + dy * dy;
    let st = rho2.sqrt() / r;
    // On-axis ligand: zero the azimuthal factors rather than divide by zero;
    // every m != 0 term vanishes for this ligand
    let (cfi, sfi) = if rho2 == 0.0 {
        (0.0, 0.0)
    } else {
        let rho = rho2.sqrt();
        (dx / rho, dy / rho)
    };

    let ct2 = ct * ct;
    let st2 = st * st;

    // Multiple azimuthal angles by the addition formulas
    let c2 = cfi * cfi - sfi * sfi;
    let s2 = 2.0 * sfi * cfi;
    let c3 = c2 * cfi - s2 * sfi;
    let s3 = s2 * cfi + c2 * sfi;
    let c4 = c2 * c2 - s2 * s2;
    let s4 = 2.0 * s2 * c2;
    let c5 = c4 * cfi - s4 * sfi;
    let s5 = s4 * cfi + c4 * sfi;
    let c6 = c3 * c3 - s3 * s3;
    let s6 = 2.0 * s3 * c3;

    // Squared tesseral-harmonic normalization prefactors
    let z20 = 5.0 / (16.0 * PI);
    let z21 = 15.0 / (4.0 * PI);
    let z22 = 15.0 / (16.0 * PI);
    let z40 = 9.0 / (256.0 * PI);
    let z41 = 45.0 / (32.0 * PI);
    let z42 = 45.0 / (64.0 * PI);
    let z43 = 315.0 / (32.0 * PI);
    let z44 = 315.0 / (256.0 * PI);
    let z60 = 13.0 / (1024.0 * PI);
    let z61 = 273.0 / (256.0 * PI);
    let z62 = 1365.0 / (2048.0 * PI);
    let z63 = 1365.0 / (512.0 * PI);
    let z64 = 819.0 / (1024.0 * PI);
    let z65 = 9009.0 / (512.0 * PI);
    let z66 = 3003.0 / (2048.0 * PI);

    let p2 = 3.0 * ct2 - 1.0;
    let p4 = 35.0 * ct2 * ct2 - 30.0 * ct2 + 3.0;
    let p6 = 231.0 * ct2 * ct2 * ct2 - 315.0 * ct2 * ct2 + 105.0 * ct2 - 5.0;

    let l2 = [
        z20 * p2,
        z21 * st * ct * cfi,
        z21 * st * ct * sfi,
        z22 * st2 * c2,
        z22 * st2 * s2,
    ];

    let g41 = 7.0 * ct2 * ct - 3.0 * ct;
    let g42 = 7.0 * ct2 - 1.0;
    let l4 = [
        z40 * p4,
        z41 * st * g41 * cfi,
        z41 * st * g41 * sfi,
        z42 * st2 * g42 * c2,
        z42 * st2 * g42 * s2,
        z43 * st2 * st * ct * c3,
        z43 * st2 * st * ct * s3,
        z44 * st2 * st2 * c4,
        z44 * st2 * st2 * s4,
    ];

    let g61 = 33.0 * ct2 * ct2 * ct - 30.0 * ct2 * ct + 5.0 * ct;
    let g62 = 33.0 * ct2 * ct2 - 18.0 * ct2 + 1.0;
    let g63 = 11.0 * ct2 * ct - 3.0 * ct;
    let g64 = 11.0 * ct2 - 1.0;
    let l6 = [
        z60 * p6,
        z61 * st * g61 * cfi,
        z61 * st * g61 * sfi,
        z62 * st2 * g62 * c2,
        z62 * st2 * g62 * s2,
        z63 * st2 * st * g63 * c3,
        z63 * st2 * st * g63 * s3,
        z64 * st2 * st2 * g64 * c4,
        z64 * st2 * st2 * g64 * s4,
        z65 * st2 * st2 * st * ct * c5,
        z65 * st2 * st2 * st * ct * s5,
        z66 * st2 * st2 * st2 * c6,
        z66 * st2 * st2 * st2 * s6,
    ];

    let mut terms = BlmTerms { l2, l4, l6 };
    for (l, group) in [(2usize, &mut terms.l2[..]), (4, &mut terms.l4[..]), (6, &mut terms.l6[..])]
    {
        let factor = degree_factor(l, ligand.charge, r, ion);
        for value in group.iter_mut() {
            *value *= factor;
        }
    }
    terms
}

/// Scale factor converting a degree-l tesseral term into meV
///
/// -(4 pi / (2l+1)) * (q / r_m) * (a0 / r_A)^l * <r^l> * theta_l * E, with
/// E the Coulomb energy scale in meV metres.
fn degree_factor(l: usize, charge: f64, r: f64, ion: &Ion) -> f64 {
    let r_metres = r * ANGSTROM_TO_METRE;
    -(4.0 * PI / (2.0 * l as f64 + 1.0))
        * (charge / r_metres)
        * (BOHR_RADIUS / r).powi(l as i32)
        * ion.radial_expectation(l)
        * ion.stevens_factor(l)
        * COULOMB_MEV_METRE
}
