/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for structure handling and crystal-field setup

use thiserror::Error;

/// Fatal errors raised while resolving a structure or configuring a
/// point-charge calculation
#[derive(Error, Debug)]
pub enum StructureError {
    #[error("Structure contains no atom sites")]
    EmptySites,

    #[error("Cannot parse scatterer record: {0}")]
    SiteParse(String),

    #[error("Cannot parse symmetry operator: {0}")]
    SymOpParse(String),

    #[error("Singular cell metric: {0}")]
    SingularCell(String),

    #[error("Magnetic ion label '{0}' not found among resolved atom sites")]
    IonNotFound(String),

    #[error("Unknown rare-earth ion symbol: {0}")]
    UnknownIon(String),

    #[error("No charges defined")]
    NoCharges,

    #[error("Explicit ligand at index {0} has zero displacement from the magnetic ion")]
    ZeroDisplacement(usize),

    #[error("No magnetic-ion label configured")]
    NoIonLabel,

    #[error("Structure file '{0}' requires an external loader")]
    UnresolvedFileHint(String),
}

/// Result type for structure operations
pub type Result<T> = std::result::Result<T, StructureError>;
