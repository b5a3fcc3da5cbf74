/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Atom-site records and unique-label resolution

use super::errors::{Result, StructureError};
use super::symmetry::wrap_to_cell;
use std::collections::HashMap;

/// One resolved atom site: unique label plus fractional position in [0, 1)
#[derive(Debug, Clone, PartialEq)]
pub struct AtomSite {
    pub label: String,
    pub position: [f64; 3],
}

/// Parse scatterer records `"label x y z"` and make duplicate labels unique
///
/// A base label occurring more than once gets ordinal suffixes in input
/// order (`O` twice becomes `O1`, `O2`); labels occurring once are kept as
/// written. Output order matches input order.
pub fn resolve_unique_sites(records: &[String]) -> Result<Vec<AtomSite>> {
    if records.is_empty() {
        return Err(StructureError::EmptySites);
    }

    let mut parsed: Vec<(String, [f64; 3])> = Vec::with_capacity(records.len());
    let mut counts: HashMap<String, usize> = HashMap::new();
    for record in records {
        let fields: Vec<&str> = record.split_whitespace().collect();
        if fields.len() != 4 {
            return Err(StructureError::SiteParse(record.clone()));
        }
        let mut position = [0.0; 3];
        for (i, field) in fields[1..].iter().enumerate() {
            position[i] = field
                .parse()
                .map_err(|_| StructureError::SiteParse(record.clone()))?;
        }
        let label = fields[0].to_string();
        *counts.entry(label.clone()).or_insert(0) += 1;
        parsed.push((label, wrap_to_cell(position)));
    }

    let mut seen: HashMap<String, usize> = HashMap::new();
    let sites = parsed
        .into_iter()
        .map(|(label, position)| {
            let unique_label = if counts[&label] > 1 {
                let ordinal = seen.entry(label.clone()).or_insert(0);
                *ordinal += 1;
                format!("{}{}", label, ordinal)
            } else {
                label
            };
            AtomSite {
                label: unique_label,
                position,
            }
        })
        .collect();
    Ok(sites)
}

/// Find a site by its resolved label
pub fn find_site<'a>(sites: &'a [AtomSite], label: &str) -> Option<&'a AtomSite> {
    sites.iter().find(|s| s.label == label)
}
