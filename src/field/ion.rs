/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Fixed physical tables for the trivalent rare-earth ions
//!
//! Radial expectation values <r^n> (n = 2, 4, 6, in units of the Bohr radius
//! to the n-th power) are the Freeman-Desclaux Dirac-Fock values; the Stevens
//! factors theta_l are the standard Hutchings values for the Hund's-rule
//! ground multiplet. Eu3+ (J = 0) and Gd3+ (L = 0) carry zero Stevens
//! factors, so their point-charge parameters vanish identically.

use crate::structure::errors::{Result, StructureError};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Physical constants of one rare-earth ion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ion {
    /// Element symbol in Title-case 2-letter form
    pub symbol: &'static str,
    /// <r^2> in units of a0^2
    pub r2: f64,
    /// <r^4> in units of a0^4
    pub r4: f64,
    /// <r^6> in units of a0^6
    pub r6: f64,
    /// Stevens factor theta_2 (alpha)
    pub alpha: f64,
    /// Stevens factor theta_4 (beta)
    pub beta: f64,
    /// Stevens factor theta_6 (gamma)
    pub gamma: f64,
}

impl Ion {
    /// Stevens factor for degree l (2, 4 or 6)
    pub fn stevens_factor(&self, l: usize) -> f64 {
        match l {
            2 => self.alpha,
            4 => self.beta,
            _ => self.gamma,
        }
    }

    /// Radial expectation value <r^l> for degree l (2, 4 or 6)
    pub fn radial_expectation(&self, l: usize) -> f64 {
        match l {
            2 => self.r2,
            4 => self.r4,
            _ => self.r6,
        }
    }
}

static ION_TABLE: Lazy<HashMap<&'static str, Ion>> = Lazy::new(|| {
    let ions = [
        Ion { symbol: "Ce", r2: 1.309, r4: 3.964, r6: 23.31, alpha: -5.7143e-2, beta: 6.3492e-3, gamma: 0.0 },
        Ion { symbol: "Pr", r2: 1.1963, r4: 3.3335, r6: 18.353, alpha: -2.1010e-2, beta: -7.3462e-4, gamma: 6.0994e-5 },
        Ion { symbol: "Nd", r2: 1.114, r4: 2.910, r6: 15.03, alpha: -6.4281e-3, beta: -2.9111e-4, gamma: -3.7988e-5 },
        Ion { symbol: "Pm", r2: 1.0353, r4: 2.5390, r6: 12.546, alpha: 7.7135e-3, beta: 4.0755e-4, gamma: 6.0781e-5 },
        Ion { symbol: "Sm", r2: 0.9743, r4: 2.260, r6: 10.55, alpha: 4.1270e-2, beta: 2.5012e-3, gamma: 0.0 },
        Ion { symbol: "Eu", r2: 0.9175, r4: 2.020, r6: 9.039, alpha: 0.0, beta: 0.0, gamma: 0.0 },
        Ion { symbol: "Gd", r2: 0.8671, r4: 1.820, r6: 7.831, alpha: 0.0, beta: 0.0, gamma: 0.0 },
        Ion { symbol: "Tb", r2: 0.8220, r4: 1.651, r6: 6.852, alpha: -1.0101e-2, beta: 1.2244e-4, gamma: -1.1212e-6 },
        Ion { symbol: "Dy", r2: 0.7814, r4: 1.505, r6: 6.048, alpha: -6.3492e-3, beta: -5.9200e-5, gamma: 1.0350e-6 },
        Ion { symbol: "Ho", r2: 0.7446, r4: 1.379, r6: 5.379, alpha: -2.2222e-3, beta: -3.3300e-5, gamma: -1.2937e-6 },
        Ion { symbol: "Er", r2: 0.7111, r4: 1.270, r6: 4.816, alpha: 2.5397e-3, beta: 4.4400e-5, gamma: 2.0699e-6 },
        Ion { symbol: "Tm", r2: 0.6804, r4: 1.174, r6: 4.340, alpha: 1.0101e-2, beta: 1.6325e-4, gamma: -5.6061e-6 },
        Ion { symbol: "Yb", r2: 0.6522, r4: 1.089, r6: 3.932, alpha: 3.1746e-2, beta: -1.7316e-3, gamma: 1.4800e-4 },
    ];
    ions.into_iter().map(|ion| (ion.symbol, ion)).collect()
});

/// Normalize an ion symbol or site label to Title-case 2-letter form
///
/// Takes the leading alphabetic characters (so site labels like `"Er1"`
/// reduce to the element symbol) and fixes the case.
pub fn normalize_symbol(label: &str) -> String {
    let alpha: String = label.chars().take_while(|c| c.is_ascii_alphabetic()).collect();
    let mut chars = alpha.chars();
    match chars.next() {
        Some(first) => {
            first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
        }
        None => String::new(),
    }
}

/// Look up an ion by (exact, normalized) symbol
pub fn lookup(symbol: &str) -> Result<&'static Ion> {
    ION_TABLE
        .get(symbol)
        .ok_or_else(|| StructureError::UnknownIon(symbol.to_string()))
}
