/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! The point-charge crystal-field model
//!
//! Owns the configuration (structure source, magnetic-ion label, charge
//! table, search cutoff) and accumulates per-ligand tesseral-harmonic
//! contributions into the sparse Blm parameter map.

use super::charges::ChargeTable;
use super::harmonics::{blm_terms, parameter_names};
use super::ion::{self, Ion};
use super::ligands::{find_ligands, Ligand, SearchSpec, SUPERCELL_MARGIN};
use crate::structure::errors::{Result, StructureError};
use crate::structure::sites::resolve_unique_sites;
use crate::structure::{AtomSite, CrystalStructure, StructureLoader, StructureSource};
use log::warn;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

/// Entries smaller than this magnitude are pruned from the result
const PRUNE_TOL: f64 = 1e-10;

/// A structure source after resolution at construction time
enum ResolvedSource {
    Structure {
        structure: Box<dyn CrystalStructure>,
        sites: Vec<AtomSite>,
    },
    Explicit(Vec<Ligand>),
}

/// Point-charge model for the crystal field around one magnetic ion
///
/// Built once from a structure source, then configured through the setters;
/// the ligand list is memoized per search cutoff and recomputed only when
/// the configuration changes. Not designed for concurrent mutation: parallel
/// scans should use independent instances.
pub struct PointChargeModel {
    source: ResolvedSource,
    ion_label: Option<String>,
    ion_override: Option<String>,
    charges: ChargeTable,
    spec: SearchSpec,
    spec_configured: bool,
    margin: f64,
    cache: Option<(SearchSpec, Vec<Ligand>)>,
}

impl PointChargeModel {
    /// Build a model from any structure source
    pub fn new(source: StructureSource) -> Result<Self> {
        Self::with_loader(source, None)
    }

    /// Build a model, resolving a file hint through the given loader
    pub fn with_loader(
        source: StructureSource,
        loader: Option<&dyn StructureLoader>,
    ) -> Result<Self> {
        let source = match source.resolve(loader)? {
            StructureSource::Loaded(structure) => {
                let sites = resolve_unique_sites(structure.scatterers())?;
                ResolvedSource::Structure { structure, sites }
            }
            StructureSource::ExplicitLigands(ligands) => {
                // A zero separation divides by zero in the harmonic terms
                // and poisons every running total with NaN
                if let Some(index) = ligands.iter().position(|l| !(l.distance() > 0.0)) {
                    return Err(StructureError::ZeroDisplacement(index));
                }
                ResolvedSource::Explicit(ligands)
            }
            StructureSource::FileHint(path) => {
                return Err(StructureError::UnresolvedFileHint(
                    path.display().to_string(),
                ))
            }
        };
        Ok(Self {
            source,
            ion_label: None,
            ion_override: None,
            charges: ChargeTable::new(),
            spec: SearchSpec::default(),
            spec_configured: false,
            margin: SUPERCELL_MARGIN,
            cache: None,
        })
    }

    /// Build a model from an already-loaded structure
    pub fn from_structure(structure: Box<dyn CrystalStructure>) -> Result<Self> {
        Self::new(StructureSource::Loaded(structure))
    }

    /// Build a model from an explicit Cartesian ligand list, bypassing all
    /// structure resolution
    pub fn from_ligands(ligands: Vec<Ligand>) -> Result<Self> {
        Self::new(StructureSource::ExplicitLigands(ligands))
    }

    /// Build a model from a structure file resolved by an external loader
    pub fn from_file(path: impl Into<PathBuf>, loader: &dyn StructureLoader) -> Result<Self> {
        Self::with_loader(StructureSource::FileHint(path.into()), Some(loader))
    }

    /// Which resolved atom site is the magnetic ion
    pub fn set_ion_label(&mut self, label: &str) {
        self.ion_label = Some(label.to_string());
        self.cache = None;
    }

    /// Override the physical-constants table used for the ion, for cases
    /// where the site label is not itself the element name
    ///
    /// Fails immediately for symbols outside the rare-earth table; a plain
    /// ion label is only checked at `calculate`, since labels need not be
    /// element names until an override is supplied.
    pub fn set_ion(&mut self, symbol: &str) -> Result<()> {
        ion::lookup(&ion::normalize_symbol(symbol))?;
        self.ion_override = Some(symbol.to_string());
        self.cache = None;
        Ok(())
    }

    /// Set the charge for one label or element-symbol prefix
    pub fn set_charge(&mut self, label_or_prefix: &str, charge: f64) {
        self.charges.set(label_or_prefix, charge);
        self.cache = None;
    }

    /// Replace the whole charge table
    pub fn set_charges(&mut self, charges: HashMap<String, f64>) {
        self.charges.replace(charges);
        self.cache = None;
    }

    /// Use an absolute distance cutoff in Angstroms; clears any
    /// neighbour-shell setting
    pub fn set_max_distance(&mut self, distance: f64) {
        if self.spec_configured && matches!(self.spec, SearchSpec::NeighbourShell(_)) {
            warn!("Discarding the configured neighbour-shell cutoff for a distance cutoff");
        }
        self.spec = SearchSpec::MaxDistance(distance.abs());
        self.spec_configured = true;
        self.cache = None;
    }

    /// Use an n-th-neighbour-shell cutoff; clears any distance setting
    pub fn set_neighbour_shell(&mut self, shells: usize) {
        if self.spec_configured && matches!(self.spec, SearchSpec::MaxDistance(_)) {
            warn!("Discarding the configured distance cutoff for a neighbour-shell cutoff");
        }
        self.spec = SearchSpec::NeighbourShell(shells.max(1));
        self.spec_configured = true;
        self.cache = None;
    }

    /// Override the supercell safety margin (default 1.5)
    pub fn set_supercell_margin(&mut self, margin: f64) {
        self.margin = margin;
        self.cache = None;
    }

    /// The active search specification
    pub fn search_spec(&self) -> SearchSpec {
        self.spec
    }

    /// Warnings recorded while resolving charges
    pub fn warnings(&self) -> &[String] {
        self.charges.warnings()
    }

    /// The ligand list for the current configuration
    ///
    /// Explicit ligands are returned as supplied; otherwise the supercell
    /// search runs (or its memoized result is reused).
    pub fn ligands(&mut self) -> Result<&[Ligand]> {
        let (structure, sites) = match &self.source {
            ResolvedSource::Explicit(ligands) => return Ok(ligands),
            ResolvedSource::Structure { structure, sites } => (structure.as_ref(), sites),
        };
        if self.cache.as_ref().map(|(key, _)| *key) != Some(self.spec) {
            let label = self.ion_label.as_deref().ok_or(StructureError::NoIonLabel)?;
            let ligands = find_ligands(
                structure,
                sites,
                &mut self.charges,
                label,
                self.spec,
                self.margin,
            )?;
            self.cache = Some((self.spec, ligands));
        }
        Ok(self.cache.as_ref().map(|(_, l)| l.as_slice()).unwrap_or(&[]))
    }

    /// The effective ion table entry: the explicit override when set, else
    /// the magnetic-ion label normalized to its element symbol
    fn effective_ion(&self) -> Result<&'static Ion> {
        let raw = self
            .ion_override
            .as_deref()
            .or(self.ion_label.as_deref())
            .ok_or(StructureError::NoIonLabel)?;
        ion::lookup(&ion::normalize_symbol(raw))
    }

    /// Run the point-charge calculation
    ///
    /// Returns the sparse map of canonical parameter names to values in meV;
    /// absent keys are implicitly zero. Repeated calls with unchanged
    /// configuration return identical output.
    pub fn calculate(&mut self) -> Result<BTreeMap<String, f64>> {
        let ion = self.effective_ion()?;

        let mut totals: BTreeMap<String, f64> = parameter_names()
            .map(|name| (name.to_string(), 0.0))
            .collect();
        for ligand in self.ligands()?.to_vec() {
            let terms = blm_terms(&ligand, ion);
            for (name, value) in terms.named() {
                if let Some(total) = totals.get_mut(name) {
                    *total += value;
                }
            }
        }

        totals.retain(|_, value| value.abs() >= PRUNE_TOL);
        Ok(totals)
    }
}

impl std::fmt::Debug for PointChargeModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let source = match &self.source {
            ResolvedSource::Structure { sites, .. } => format!("structure({} sites)", sites.len()),
            ResolvedSource::Explicit(ligands) => format!("explicit({} ligands)", ligands.len()),
        };
        f.debug_struct("PointChargeModel")
            .field("source", &source)
            .field("ion_label", &self.ion_label)
            .field("ion_override", &self.ion_override)
            .field("spec", &self.spec)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_explicit_ligand_on_axis() {
        let mut model = PointChargeModel::from_ligands(vec![Ligand::new(-2.0, [0.0, 0.0, 2.3])])
            .unwrap();
        model.set_ion("Er").unwrap();
        let result = model.calculate().unwrap();
        assert!(result.contains_key("B20"));
        assert!(!result.contains_key("B21"));
        assert!(!result.contains_key("IB22"));
    }

    #[test]
    fn test_ion_label_normalization() {
        let mut model = PointChargeModel::from_ligands(vec![Ligand::new(-2.0, [0.0, 0.0, 2.3])])
            .unwrap();
        model.set_ion_label("er1");
        let result = model.calculate().unwrap();
        assert!(result.contains_key("B20"));
    }

    #[test]
    fn test_unknown_ion_rejected_at_setup() {
        let mut model = PointChargeModel::from_ligands(vec![Ligand::new(-2.0, [0.0, 0.0, 2.3])])
            .unwrap();
        assert!(matches!(
            model.set_ion("Fe"),
            Err(StructureError::UnknownIon(_))
        ));
        // The failed override is not stored
        assert!(matches!(
            model.calculate(),
            Err(StructureError::NoIonLabel)
        ));
    }

    #[test]
    fn test_zero_displacement_ligand_rejected() {
        let result = PointChargeModel::from_ligands(vec![
            Ligand::new(-2.0, [0.0, 0.0, 2.0]),
            Ligand::new(-2.0, [0.0, 0.0, 0.0]),
        ]);
        assert!(matches!(
            result,
            Err(StructureError::ZeroDisplacement(1))
        ));
    }

    #[test]
    fn test_cutoff_mode_last_call_wins() {
        let mut model = PointChargeModel::from_ligands(vec![Ligand::new(-2.0, [0.0, 0.0, 2.0])])
            .unwrap();
        model.set_max_distance(3.0);
        model.set_neighbour_shell(2);
        assert_eq!(model.search_spec(), SearchSpec::NeighbourShell(2));
        model.set_max_distance(2.5);
        assert_eq!(model.search_spec(), SearchSpec::MaxDistance(2.5));
    }

    #[test]
    fn test_missing_ion_label_fatal() {
        let mut model = PointChargeModel::from_ligands(vec![Ligand::new(-2.0, [0.0, 0.0, 2.3])])
            .unwrap();
        assert!(matches!(
            model.calculate(),
            Err(StructureError::NoIonLabel)
        ));
    }

    #[test]
    fn test_idempotent_calculation() {
        let mut model = PointChargeModel::from_ligands(vec![
            Ligand::new(-2.0, [1.1, -0.4, 2.0]),
            Ligand::new(-1.0, [-2.0, 0.3, 0.9]),
        ])
        .unwrap();
        model.set_ion("Pr").unwrap();
        let first = model.calculate().unwrap();
        let second = model.calculate().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_sparsity_invariant() {
        let mut model = PointChargeModel::from_ligands(vec![Ligand::new(-2.0, [0.7, 1.9, -1.2])])
            .unwrap();
        model.set_ion("Tb").unwrap();
        let result = model.calculate().unwrap();
        for (name, value) in &result {
            assert!(value.abs() >= 1e-10, "{} = {} violates sparsity", name, value);
        }
    }

    #[test]
    fn test_octahedron_cubic_result() {
        let r = 2.0;
        let ligands = vec![
            Ligand::new(-2.0, [r, 0.0, 0.0]),
            Ligand::new(-2.0, [-r, 0.0, 0.0]),
            Ligand::new(-2.0, [0.0, r, 0.0]),
            Ligand::new(-2.0, [0.0, -r, 0.0]),
            Ligand::new(-2.0, [0.0, 0.0, r]),
            Ligand::new(-2.0, [0.0, 0.0, -r]),
        ];
        let mut model = PointChargeModel::from_ligands(ligands).unwrap();
        model.set_ion("Er").unwrap();
        let result = model.calculate().unwrap();
        // Cubic symmetry: only B40/B44 and B60/B64 survive (the l=2
        // contributions cancel), with the fixed ratios
        assert!(!result.contains_key("B20"));
        assert_relative_eq!(result["B44"] / result["B40"], 5.0, epsilon = 1e-8);
        assert_relative_eq!(result["B64"] / result["B60"], -21.0, epsilon = 1e-8);
        for name in ["B21", "IB21", "B42", "IB44", "B63", "IB66"] {
            assert!(!result.contains_key(name), "{} should be pruned", name);
        }
    }
}
