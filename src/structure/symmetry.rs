/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Space-group symmetry operators and equivalent-position generation
//!
//! Operators are parsed from Jones-faithful coordinate triplets such as
//! `"-y,x-y,z+1/2"` and applied in fractional coordinates.

use super::errors::{Result, StructureError};

/// Tolerance for identifying duplicate fractional positions
const POSITION_TOL: f64 = 1e-6;

/// One space-group operator: rotation part plus fractional translation
#[derive(Debug, Clone, PartialEq)]
pub struct SymOp {
    rotation: [[f64; 3]; 3],
    translation: [f64; 3],
}

impl SymOp {
    /// The identity operator `x,y,z`
    pub fn identity() -> Self {
        Self {
            rotation: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            translation: [0.0; 3],
        }
    }

    /// Parse a Jones-faithful triplet such as `"-y,x-y,z+1/2"`
    pub fn parse(triplet: &str) -> Result<Self> {
        let parts: Vec<&str> = triplet.split(',').collect();
        if parts.len() != 3 {
            return Err(StructureError::SymOpParse(triplet.to_string()));
        }
        let mut rotation = [[0.0; 3]; 3];
        let mut translation = [0.0; 3];
        for (row, part) in parts.iter().enumerate() {
            let (coeffs, shift) = parse_component(part)
                .ok_or_else(|| StructureError::SymOpParse(triplet.to_string()))?;
            rotation[row] = coeffs;
            translation[row] = shift;
        }
        Ok(Self {
            rotation,
            translation,
        })
    }

    /// Apply the operator to a fractional position (no wrapping)
    pub fn apply(&self, frac: [f64; 3]) -> [f64; 3] {
        let mut out = self.translation;
        for i in 0..3 {
            for j in 0..3 {
                out[i] += self.rotation[i][j] * frac[j];
            }
        }
        out
    }
}

/// Parse one component of a triplet, e.g. `"x-y+1/2"`, into the row of the
/// rotation matrix and the translation entry
fn parse_component(component: &str) -> Option<([f64; 3], f64)> {
    let mut coeffs = [0.0; 3];
    let mut shift = 0.0;
    let cleaned: String = component.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return None;
    }

    // Split into signed terms: each term is an axis letter or a fraction
    let mut terms: Vec<String> = Vec::new();
    let mut current = String::new();
    for ch in cleaned.chars() {
        if (ch == '+' || ch == '-') && !current.is_empty() {
            terms.push(current.clone());
            current.clear();
        }
        current.push(ch);
    }
    terms.push(current);

    for term in terms {
        let (sign, body) = match term.strip_prefix('-') {
            Some(rest) => (-1.0, rest),
            None => (1.0, term.strip_prefix('+').unwrap_or(&term)),
        };
        match body {
            "x" | "X" => coeffs[0] += sign,
            "y" | "Y" => coeffs[1] += sign,
            "z" | "Z" => coeffs[2] += sign,
            _ => {
                // Numeric translation, either a fraction like 1/2 or a decimal
                let value = if let Some((num, den)) = body.split_once('/') {
                    let num: f64 = num.parse().ok()?;
                    let den: f64 = den.parse().ok()?;
                    if den == 0.0 {
                        return None;
                    }
                    num / den
                } else {
                    body.parse().ok()?
                };
                shift += sign * value;
            }
        }
    }
    Some((coeffs, shift))
}

/// Wrap a fractional coordinate into [0, 1)
pub fn wrap_to_cell(frac: [f64; 3]) -> [f64; 3] {
    let mut out = [0.0; 3];
    for i in 0..3 {
        out[i] = frac[i] - frac[i].floor();
        // floor can leave exactly 1.0 behind for tiny negative inputs
        if out[i] >= 1.0 {
            out[i] -= 1.0;
        }
    }
    out
}

/// Generate the distinct symmetry-equivalent positions of a fractional site
///
/// Applies every operator, wraps into the unit cell and removes duplicates
/// within a small tolerance (special positions map onto themselves under
/// part of the group).
pub fn equivalent_positions(ops: &[SymOp], site: [f64; 3]) -> Vec<[f64; 3]> {
    let mut positions: Vec<[f64; 3]> = Vec::with_capacity(ops.len());
    for op in ops {
        let pos = wrap_to_cell(op.apply(site));
        let duplicate = positions.iter().any(|p| {
            (0..3).all(|i| {
                let d = (p[i] - pos[i]).abs();
                d < POSITION_TOL || (1.0 - d) < POSITION_TOL
            })
        });
        if !duplicate {
            positions.push(pos);
        }
    }
    positions
}
