use std::collections::{BTreeSet, HashSet};
use std::io::Read;

use serde::Deserialize;

use super::offerings::empty_string_as_none;
use super::ImportError;
use crate::counseling::offerings::{Offering, PlacementDetails};

/// Minimum name similarity before a placement row is attached to a college.
pub const MATCH_THRESHOLD: f64 = 0.4;

/// A row of the placement report export.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlacementRecord {
    #[serde(rename = "College Name", default, deserialize_with = "empty_string_as_none")]
    pub college_name: Option<String>,
    #[serde(rename = "Avg Package", default, deserialize_with = "empty_string_as_none")]
    pub average_package: Option<String>,
    #[serde(
        rename = "Highest Package",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub highest_package: Option<String>,
    #[serde(
        rename = "Placement Report / Official Link",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub placement_link: Option<String>,
    #[serde(
        rename = "Short Description",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub description: Option<String>,
}

pub fn parse_placements<R: Read>(reader: R) -> Result<Vec<PlacementRecord>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();
    for record in csv_reader.deserialize::<PlacementRecord>() {
        records.push(record?);
    }
    Ok(records)
}

/// Lower-cased alphanumeric words longer than two characters.
fn tokenize(name: &str) -> HashSet<String> {
    let cleaned: String = name
        .to_lowercase()
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric() || ch.is_whitespace())
        .collect();
    cleaned
        .split_whitespace()
        .filter(|word| word.len() > 2)
        .map(str::to_string)
        .collect()
}

/// Dice coefficient of two token sets.
fn similarity(left: &HashSet<String>, right: &HashSet<String>) -> f64 {
    let total = left.len() + right.len();
    if total == 0 {
        return 0.0;
    }
    let shared = left.intersection(right).count();
    (shared * 2) as f64 / total as f64
}

/// Copy placement figures onto every offering of the best-matching college.
///
/// Returns the number of placement rows that found a match.
pub fn merge_placements(offerings: &mut [Offering], records: &[PlacementRecord]) -> usize {
    let names: Vec<(String, HashSet<String>)> = offerings
        .iter()
        .map(|offering| offering.name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(|name| {
            let tokens = tokenize(&name);
            (name, tokens)
        })
        .collect();

    let mut matched = 0;
    for record in records {
        let Some(college_name) = record.college_name.as_deref() else {
            continue;
        };
        let tokens = tokenize(college_name);

        let mut best: Option<(&str, f64)> = None;
        for (name, candidate) in &names {
            let score = similarity(&tokens, candidate);
            if score > best.map_or(0.0, |(_, best_score)| best_score) {
                best = Some((name.as_str(), score));
            }
        }

        let Some((name, score)) = best else {
            continue;
        };
        if score <= MATCH_THRESHOLD {
            continue;
        }

        let details = PlacementDetails {
            average_package: record.average_package.clone(),
            highest_package: record.highest_package.clone(),
            placement_link: record.placement_link.clone(),
            placement_description: record.description.clone(),
        };
        for offering in offerings.iter_mut().filter(|offering| offering.name == name) {
            offering.placement = details.clone();
        }
        matched += 1;
    }

    matched
}
