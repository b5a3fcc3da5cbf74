/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Formal-charge resolution for atom labels

use log::warn;
use std::collections::HashMap;

/// Maps atom labels (or element-symbol prefixes) to formal charges in
/// elementary-charge units
///
/// Resolution order: exact label match, then the longest table key that is an
/// alphabetic prefix of the label (so `"O2"` falls back to `"O"`), then a
/// default of 0.0 with a recorded warning. Resolved values are cached per
/// label so repeated lookups within one calculation stay consistent and each
/// missing label is warned about once.
#[derive(Debug, Clone, Default)]
pub struct ChargeTable {
    charges: HashMap<String, f64>,
    resolved: HashMap<String, f64>,
    warnings: Vec<String>,
}

impl ChargeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the charge for one label or element-symbol prefix
    ///
    /// Invalidates the resolution cache and the recorded warnings; labels
    /// still missing after the change are warned about afresh.
    pub fn set(&mut self, label_or_prefix: &str, charge: f64) {
        self.charges.insert(label_or_prefix.to_string(), charge);
        self.resolved.clear();
        self.warnings.clear();
    }

    /// Replace the whole table
    pub fn replace(&mut self, charges: HashMap<String, f64>) {
        self.charges = charges;
        self.resolved.clear();
        self.warnings.clear();
    }

    /// Whether any charges are defined
    pub fn is_empty(&self) -> bool {
        self.charges.is_empty()
    }

    /// Resolve the charge for an atom label
    pub fn resolve(&mut self, label: &str) -> f64 {
        if let Some(&charge) = self.resolved.get(label) {
            return charge;
        }
        let charge = self.resolve_uncached(label);
        self.resolved.insert(label.to_string(), charge);
        charge
    }

    fn resolve_uncached(&mut self, label: &str) -> f64 {
        if let Some(&charge) = self.charges.get(label) {
            return charge;
        }

        // Element symbol: the label stripped of trailing digits/indices
        let base: String = label
            .chars()
            .take_while(|c| c.is_ascii_alphabetic())
            .collect();
        let mut best: Option<(&str, f64)> = None;
        for (key, &charge) in &self.charges {
            if base.starts_with(key.as_str()) {
                match best {
                    Some((held, _)) if held.len() >= key.len() => {}
                    _ => best = Some((key, charge)),
                }
            }
        }
        if let Some((_, charge)) = best {
            return charge;
        }

        let message = format!("No charge defined for atom '{}', defaulting to 0.0", label);
        warn!("{}", message);
        self.warnings.push(message);
        0.0
    }

    /// Warnings recorded during resolution (defaulted charges)
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}
