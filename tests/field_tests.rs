/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

use anyhow::Result;
use approx::assert_relative_eq;
use pointcharge_rs::structure::{CrystalCell, LoadedStructure, StructureError};
use pointcharge_rs::{Ligand, PointChargeModel, SearchSpec, StructureSource};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Er at the corner of a 4 A cubic cell with O on the three face-centred
/// axis positions: a perfect octahedral first shell at 2 A
fn octahedral_structure() -> Result<LoadedStructure> {
    let cell = CrystalCell::new(4.0, 4.0, 4.0, 90.0, 90.0, 90.0)?;
    let records: Vec<String> = ["Er 0 0 0", "O 0.5 0 0", "O 0 0.5 0", "O 0 0 0.5"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    Ok(LoadedStructure::new(cell, &[], records)?)
}

fn octahedral_model() -> Result<PointChargeModel> {
    let mut model = PointChargeModel::from_structure(Box::new(octahedral_structure()?))?;
    model.set_ion_label("Er");
    model.set_charge("Er", 3.0);
    model.set_charge("O", -2.0);
    Ok(model)
}

#[test]
fn test_on_axis_single_ligand() -> Result<()> {
    init_logging();
    let mut model = PointChargeModel::from_ligands(vec![Ligand::new(-2.0, [0.0, 0.0, 2.3])])?;
    model.set_ion("Er")?;
    let blm = model.calculate()?;

    // Only the axial m = 0 terms survive
    let mut keys: Vec<&str> = blm.keys().map(|k| k.as_str()).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["B20", "B40", "B60"]);

    // Sign flips with the ligand charge
    let mut positive = PointChargeModel::from_ligands(vec![Ligand::new(2.0, [0.0, 0.0, 2.3])])?;
    positive.set_ion("Er")?;
    let flipped = positive.calculate()?;
    assert_relative_eq!(flipped["B20"], -blm["B20"], epsilon = 1e-14);
    Ok(())
}

#[test]
fn test_octahedral_shell_cubic_ratios() -> Result<()> {
    init_logging();
    let mut model = octahedral_model()?;
    model.set_max_distance(2.5);
    let blm = model.calculate()?;

    assert!(!blm.contains_key("B20"), "l=2 terms cancel in cubic symmetry");
    assert_relative_eq!(blm["B44"] / blm["B40"], 5.0, epsilon = 1e-8);
    assert_relative_eq!(blm["B64"] / blm["B60"], -21.0, epsilon = 1e-8);
    for name in blm.keys() {
        assert!(!name.starts_with("IB"), "imaginary component {} survived", name);
    }
    Ok(())
}

#[test]
fn test_shell_and_distance_modes_agree() -> Result<()> {
    init_logging();
    let mut by_shell = octahedral_model()?;
    by_shell.set_neighbour_shell(1);
    let mut by_distance = octahedral_model()?;
    by_distance.set_max_distance(2.0 + 0.01);

    assert_eq!(by_shell.ligands()?.to_vec(), by_distance.ligands()?.to_vec());
    assert_eq!(by_shell.calculate()?, by_distance.calculate()?);
    Ok(())
}

#[test]
fn test_symmetry_equivalent_ion_positions() -> Result<()> {
    init_logging();
    // P-1: an Er on a general position has an inversion image, and each
    // image sees its own on-axis oxygen 1.2 A away
    let cell = CrystalCell::new(6.0, 6.0, 6.0, 90.0, 90.0, 90.0)?;
    let records: Vec<String> = ["Er 0.25 0.25 0.25", "O 0.25 0.25 0.45"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let structure = LoadedStructure::new(cell, &["x,y,z", "-x,-y,-z"], records)?;
    assert_eq!(structure.operator_count(), 2);

    let mut model = PointChargeModel::from_structure(Box::new(structure))?;
    model.set_ion_label("Er");
    model.set_charge("Er", 3.0);
    model.set_charge("O", -2.0);
    model.set_max_distance(2.0);
    let blm = model.calculate()?;
    assert_eq!(model.ligands()?.len(), 2);

    // Even-degree terms are inversion-even, so the two images accumulate
    // exactly twice the single-ligand result
    let mut single = PointChargeModel::from_ligands(vec![Ligand::new(-2.0, [0.0, 0.0, 1.2])])?;
    single.set_ion("Er")?;
    let reference = single.calculate()?;

    let keys: Vec<&str> = blm.keys().map(|k| k.as_str()).collect();
    assert_eq!(keys, vec!["B20", "B40", "B60"]);
    for (name, value) in &reference {
        assert_relative_eq!(blm[name], 2.0 * value, epsilon = 1e-10);
    }
    Ok(())
}

#[test]
fn test_calculate_is_idempotent() -> Result<()> {
    init_logging();
    let mut model = octahedral_model()?;
    model.set_max_distance(4.5);
    let first = model.calculate()?;
    let second = model.calculate()?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_sparsity_invariant() -> Result<()> {
    init_logging();
    let mut model = octahedral_model()?;
    model.set_max_distance(4.5);
    for (name, value) in model.calculate()? {
        assert!(
            value.abs() >= 1e-10,
            "{} = {} below the pruning threshold",
            name,
            value
        );
    }
    Ok(())
}

#[test]
fn test_explicit_ligand_round_trip() -> Result<()> {
    init_logging();
    let mut structure_path = octahedral_model()?;
    structure_path.set_max_distance(4.5);
    let expected = structure_path.calculate()?;

    let ligands = structure_path.ligands()?.to_vec();
    let mut explicit_path = PointChargeModel::from_ligands(ligands)?;
    explicit_path.set_ion("Er")?;
    assert_eq!(explicit_path.calculate()?, expected);
    Ok(())
}

#[test]
fn test_cache_invalidation_on_cutoff_change() -> Result<()> {
    init_logging();
    let mut model = octahedral_model()?;
    model.set_max_distance(2.5);
    assert_eq!(model.ligands()?.len(), 6);
    model.set_max_distance(4.1);
    assert_eq!(model.ligands()?.len(), 12);
    assert_eq!(model.search_spec(), SearchSpec::MaxDistance(4.1));
    Ok(())
}

#[test]
fn test_missing_charge_warns_and_defaults() -> Result<()> {
    init_logging();
    let cell = CrystalCell::new(4.0, 4.0, 4.0, 90.0, 90.0, 90.0)?;
    let records: Vec<String> = ["Er 0 0 0", "Cu 0.5 0.5 0.5"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let structure = LoadedStructure::new(cell, &[], records)?;
    let mut model = PointChargeModel::from_structure(Box::new(structure))?;
    model.set_ion_label("Er");
    model.set_charge("Er", 3.0);
    model.set_max_distance(4.5);
    model.calculate()?;
    assert_eq!(model.warnings().len(), 1);
    assert!(model.warnings()[0].contains("Cu"));
    Ok(())
}

#[test]
fn test_no_charges_is_fatal() -> Result<()> {
    init_logging();
    let mut model = PointChargeModel::from_structure(Box::new(octahedral_structure()?))?;
    model.set_ion_label("Er");
    assert!(matches!(
        model.calculate(),
        Err(StructureError::NoCharges)
    ));
    Ok(())
}

#[test]
fn test_unknown_ion_label_is_fatal() -> Result<()> {
    init_logging();
    let mut model = octahedral_model()?;
    model.set_ion_label("Dy");
    assert!(matches!(
        model.calculate(),
        Err(StructureError::IonNotFound(_))
    ));
    Ok(())
}

#[test]
fn test_file_hint_without_loader_is_fatal() {
    init_logging();
    let result = PointChargeModel::new(StructureSource::FileHint("structure.cif".into()));
    assert!(matches!(
        result,
        Err(StructureError::UnresolvedFileHint(_))
    ));
}
