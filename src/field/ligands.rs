/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Supercell neighbour search around the magnetic ion
//!
//! Enumerates symmetry-equivalent atom positions over a supercell large
//! enough to contain the requested cutoff sphere and reduces them to an
//! ordered list of point-charge ligands.

use super::charges::ChargeTable;
use crate::structure::errors::{Result, StructureError};
use crate::structure::sites::{find_site, AtomSite};
use crate::structure::CrystalStructure;
use crate::utils::linalg::{norm, sub};
use log::debug;

/// Default search cutoff in Angstroms when none is configured
pub const DEFAULT_MAX_DISTANCE: f64 = 5.0;

/// Default safety margin applied to the supercell half-width
///
/// Overridable; 1.5 is generous for common cells but unverified for very
/// anisotropic metrics.
pub const SUPERCELL_MARGIN: f64 = 1.5;

/// Tolerance for merging distances into one neighbour shell (Angstroms)
const SHELL_TOL: f64 = 1e-6;

/// Distances below this are treated as the ion itself (Angstroms)
const SELF_TOL: f64 = 1e-6;

/// One point-charge ligand: formal charge and Cartesian displacement in
/// Angstroms from the magnetic ion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ligand {
    pub charge: f64,
    pub displacement: [f64; 3],
}

impl Ligand {
    pub fn new(charge: f64, displacement: [f64; 3]) -> Self {
        Self {
            charge,
            displacement,
        }
    }

    /// Distance from the magnetic ion in Angstroms
    pub fn distance(&self) -> f64 {
        norm(self.displacement)
    }
}

/// Search-cutoff mode; exactly one is active at a time
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchSpec {
    /// Keep every neighbour closer than this distance in Angstroms
    MaxDistance(f64),
    /// Keep the first n distinct-distance neighbour shells
    NeighbourShell(usize),
}

impl Default for SearchSpec {
    fn default() -> Self {
        SearchSpec::MaxDistance(DEFAULT_MAX_DISTANCE)
    }
}

/// Find the ligands around `ion_label`, sorted by ascending distance
///
/// Every resolved site is a candidate; its charge comes from the table
/// (defaulting with a warning when missing). Candidates are generated for
/// every symmetry-equivalent position of the magnetic ion and of each site
/// over the supercell, keeping separations greater than zero.
pub fn find_ligands(
    structure: &dyn CrystalStructure,
    sites: &[AtomSite],
    charges: &mut ChargeTable,
    ion_label: &str,
    spec: SearchSpec,
    margin: f64,
) -> Result<Vec<Ligand>> {
    if charges.is_empty() {
        return Err(StructureError::NoCharges);
    }
    let ion_site =
        find_site(sites, ion_label).ok_or_else(|| StructureError::IonNotFound(ion_label.into()))?;

    let cell = structure.cell();
    let radius = match spec {
        SearchSpec::MaxDistance(d) => d.abs(),
        // Provisional radius for shell mode: n axis lengths guarantee at
        // least n complete distinct-distance shells
        SearchSpec::NeighbourShell(n) => n.max(1) as f64 * cell.longest_axis(),
    };

    // Integer half-width of the supercell per lattice axis
    let mut half_width = [0i64; 3];
    for (i, w) in half_width.iter_mut().enumerate() {
        *w = (margin * radius * cell.fractional_matrix().row_norm(i)).ceil() as i64;
        *w = (*w).max(1);
    }

    let ion_positions: Vec<[f64; 3]> = structure
        .equivalent_positions(ion_site.position)
        .into_iter()
        .map(|p| cell.to_cartesian(p))
        .collect();

    // (distance, charge, displacement)
    let mut candidates: Vec<(f64, f64, [f64; 3])> = Vec::new();
    for site in sites {
        let charge = charges.resolve(&site.label);
        for eq_pos in structure.equivalent_positions(site.position) {
            for n0 in -half_width[0]..=half_width[0] {
                for n1 in -half_width[1]..=half_width[1] {
                    for n2 in -half_width[2]..=half_width[2] {
                        let frac = [
                            eq_pos[0] + n0 as f64,
                            eq_pos[1] + n1 as f64,
                            eq_pos[2] + n2 as f64,
                        ];
                        let cart = cell.to_cartesian(frac);
                        for ion_pos in &ion_positions {
                            let displacement = sub(cart, *ion_pos);
                            let distance = norm(displacement);
                            if distance > SELF_TOL && distance <= radius {
                                candidates.push((distance, charge, displacement));
                            }
                        }
                    }
                }
            }
        }
    }
    debug!(
        "ligand search around '{}': {} candidates within {:.3} A (half-widths {:?})",
        ion_label,
        candidates.len(),
        radius,
        half_width
    );

    candidates.sort_by(|a, b| a.0.total_cmp(&b.0));
    let cutoff = match spec {
        SearchSpec::MaxDistance(d) => d.abs(),
        SearchSpec::NeighbourShell(n) => shell_cutoff(&candidates, n.max(1)),
    };

    Ok(candidates
        .into_iter()
        .take_while(|(distance, _, _)| *distance < cutoff)
        .map(|(_, charge, displacement)| Ligand::new(charge, displacement))
        .collect())
}

/// Derived cutoff for shell mode: just above the n-th smallest distinct
/// distance, so ties at the shell boundary are kept together
fn shell_cutoff(sorted_candidates: &[(f64, f64, [f64; 3])], shells: usize) -> f64 {
    let mut unique: Vec<f64> = Vec::new();
    for &(distance, _, _) in sorted_candidates {
        match unique.last() {
            Some(&last) if distance - last < SHELL_TOL => {}
            _ => unique.push(distance),
        }
    }
    if unique.len() > shells {
        unique[shells]
    } else {
        unique.last().copied().unwrap_or(0.0) + 1.0
    }
}
