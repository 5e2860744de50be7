use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::branches::BranchCatalog;
use super::domain::{Community, Offering, Tier};
use crate::counseling::error::CounselingError;

pub const ALL_DISTRICTS: &str = "All Districts";

/// Minimum disability percentage that unlocks the PwD eligibility window.
pub const PWD_MIN_DISABILITY_PERCENTAGE: f64 = 40.0;
/// Points added to the filter ceiling for eligible PwD applicants.
pub const PWD_CUTOFF_BONUS: f64 = 40.0;

/// Choice filling looks this far below the applicant's cutoff for safe options...
pub const CHOICE_WINDOW_BELOW: f64 = 25.0;
/// ...and this far above it for dream options.
pub const CHOICE_WINDOW_ABOVE: f64 = 10.0;

/// Number fields arrive either as JSON numbers or as form strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl NumericInput {
    pub fn value(&self) -> Option<f64> {
        let parsed = match self {
            NumericInput::Number(value) => Some(*value),
            NumericInput::Text(raw) => raw.trim().parse::<f64>().ok(),
        };
        parsed.filter(|value| value.is_finite())
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Selection fields accept a single value or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Selection {
    One(String),
    Many(Vec<String>),
}

impl Selection {
    pub fn values(&self) -> Vec<String> {
        match self {
            Selection::One(value) => vec![value.clone()],
            Selection::Many(values) => values.clone(),
        }
    }
}

impl From<&str> for Selection {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

/// Inclusive cutoff range an offering must fall into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutoffBounds {
    pub min: Option<f64>,
    pub max: f64,
}

impl CutoffBounds {
    pub fn ceiling(max: f64) -> Self {
        Self { min: None, max }
    }

    pub fn window(center: f64, below: f64, above: f64) -> Self {
        Self {
            min: Some(center - below),
            max: center + above,
        }
    }

    pub fn contains(&self, cutoff: f64) -> bool {
        cutoff <= self.max && self.min.map_or(true, |min| cutoff >= min)
    }
}

/// Declarative predicate over offerings.
#[derive(Debug, Clone, PartialEq)]
pub struct OfferingFilter {
    pub category: Community,
    pub cutoff: CutoffBounds,
    pub branches: Option<BTreeSet<String>>,
    pub districts: Option<BTreeSet<String>>,
}

impl OfferingFilter {
    pub fn matches(&self, offering: &Offering) -> bool {
        offering.category == self.category
            && self.cutoff.contains(offering.cutoff)
            && self
                .branches
                .as_ref()
                .map_or(true, |branches| branches.contains(&offering.branch))
            && self
                .districts
                .as_ref()
                .map_or(true, |districts| districts.contains(&offering.district))
    }
}

/// Exact-match browse filter for the explore listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseFilter {
    pub district: Option<String>,
    pub tier: Option<Tier>,
}

impl BrowseFilter {
    pub fn matches(&self, offering: &Offering) -> bool {
        self.district
            .as_deref()
            .map_or(true, |district| offering.district == district)
            && self.tier.map_or(true, |tier| offering.tier == tier)
    }
}

/// Optional disability details sent with a prediction request.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PwdClaim {
    pub is_pwd: bool,
    pub disability_percentage: Option<f64>,
}

impl PwdClaim {
    pub fn ceiling_bonus(&self) -> f64 {
        match self.disability_percentage {
            Some(percentage) if self.is_pwd && percentage >= PWD_MIN_DISABILITY_PERCENTAGE => {
                PWD_CUTOFF_BONUS
            }
            _ => 0.0,
        }
    }
}

pub fn parse_cutoff(raw: Option<&NumericInput>) -> Result<f64, CounselingError> {
    let raw = raw.ok_or_else(|| CounselingError::invalid("cutoff is required"))?;
    raw.value()
        .ok_or_else(|| CounselingError::invalid("cutoff must be a number"))
}

pub fn parse_community(raw: Option<&str>, field: &str) -> Result<Community, CounselingError> {
    let raw = raw
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| CounselingError::invalid(format!("{field} is required")))?;
    raw.parse::<Community>()
        .map_err(|err| CounselingError::invalid(format!("{field}: {err}")))
}

/// Turns request fields into an [`OfferingFilter`].
#[derive(Debug, Clone)]
pub struct FilterBuilder<'a> {
    branches: &'a BranchCatalog,
    category: Community,
    cutoff: CutoffBounds,
    branch_selection: Vec<String>,
    district_selection: Vec<String>,
}

impl<'a> FilterBuilder<'a> {
    pub fn new(branches: &'a BranchCatalog, category: Community, cutoff: CutoffBounds) -> Self {
        Self {
            branches,
            category,
            cutoff,
            branch_selection: Vec::new(),
            district_selection: Vec::new(),
        }
    }

    pub fn branches(mut self, selection: Option<&Selection>) -> Self {
        self.branch_selection = selection.map(Selection::values).unwrap_or_default();
        self
    }

    pub fn districts(mut self, selection: Option<&Selection>) -> Self {
        self.district_selection = selection.map(Selection::values).unwrap_or_default();
        self
    }

    pub fn build(self) -> OfferingFilter {
        let branches = self.branches.expand(&self.branch_selection);
        let districts = district_set(&self.district_selection);

        OfferingFilter {
            category: self.category,
            cutoff: self.cutoff,
            branches,
            districts,
        }
    }
}

fn district_set(selection: &[String]) -> Option<BTreeSet<String>> {
    match selection.first() {
        None => None,
        Some(first) if first.trim() == ALL_DISTRICTS => None,
        Some(_) => {
            let districts: BTreeSet<String> = selection
                .iter()
                .map(|district| district.trim())
                .filter(|district| !district.is_empty())
                .map(str::to_string)
                .collect();
            if districts.is_empty() {
                None
            } else {
                Some(districts)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_input_accepts_strings_and_numbers() {
        assert_eq!(NumericInput::Text(" 187.5 ".to_string()).value(), Some(187.5));
        assert_eq!(NumericInput::Number(190.0).value(), Some(190.0));
        assert_eq!(NumericInput::Text("abc".to_string()).value(), None);
        assert_eq!(NumericInput::Text("NaN".to_string()).value(), None);
    }

    #[test]
    fn pwd_bonus_requires_flag_and_threshold() {
        let eligible = PwdClaim {
            is_pwd: true,
            disability_percentage: Some(45.0),
        };
        let below = PwdClaim {
            is_pwd: true,
            disability_percentage: Some(39.5),
        };
        let unflagged = PwdClaim {
            is_pwd: false,
            disability_percentage: Some(80.0),
        };
        assert_eq!(eligible.ceiling_bonus(), PWD_CUTOFF_BONUS);
        assert_eq!(below.ceiling_bonus(), 0.0);
        assert_eq!(unflagged.ceiling_bonus(), 0.0);
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let bounds = CutoffBounds::window(180.0, CHOICE_WINDOW_BELOW, CHOICE_WINDOW_ABOVE);
        assert!(bounds.contains(155.0));
        assert!(bounds.contains(190.0));
        assert!(!bounds.contains(154.99));
        assert!(!bounds.contains(190.01));
    }

    #[test]
    fn district_sentinel_disables_filter() {
        let catalog = BranchCatalog::standard();
        let filter = FilterBuilder::new(&catalog, Community::Oc, CutoffBounds::ceiling(190.0))
            .districts(Some(&Selection::from(ALL_DISTRICTS)))
            .build();
        assert!(filter.districts.is_none());

        let filter = FilterBuilder::new(&catalog, Community::Oc, CutoffBounds::ceiling(190.0))
            .districts(Some(&Selection::Many(vec![
                "Chennai".to_string(),
                "Madurai".to_string(),
            ])))
            .build();
        assert_eq!(filter.districts.map(|set| set.len()), Some(2));
    }

    #[test]
    fn missing_category_is_rejected() {
        let err = parse_community(None, "category").expect_err("category required");
        assert!(matches!(err, CounselingError::InvalidRequest(_)));
        let err = parse_community(Some("XYZ"), "category").expect_err("unknown category");
        assert!(err.to_string().contains("XYZ"));
    }
}
