use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for a single (college, branch, category) offering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OfferingId(pub String);

/// Reservation communities recognised by TNEA counseling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Community {
    Oc,
    Bc,
    Bcm,
    Mbc,
    Dnc,
    Sc,
    Sca,
    St,
}

impl Community {
    pub const ALL: [Community; 8] = [
        Community::Oc,
        Community::Bc,
        Community::Bcm,
        Community::Mbc,
        Community::Dnc,
        Community::Sc,
        Community::Sca,
        Community::St,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            Community::Oc => "OC",
            Community::Bc => "BC",
            Community::Bcm => "BCM",
            Community::Mbc => "MBC",
            Community::Dnc => "DNC",
            Community::Sc => "SC",
            Community::Sca => "SCA",
            Community::St => "ST",
        }
    }

    /// Communities covered by the income-based post-matric scholarship.
    pub const fn post_matric_eligible(self) -> bool {
        matches!(self, Community::Sc | Community::Sca | Community::St)
    }
}

impl fmt::Display for Community {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown community '{0}'")]
pub struct UnknownCommunity(pub String);

impl FromStr for Community {
    type Err = UnknownCommunity;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_uppercase();
        Community::ALL
            .into_iter()
            .find(|community| community.code() == normalized)
            .ok_or_else(|| UnknownCommunity(value.trim().to_string()))
    }
}

/// Coarse institutional quality band. Declaration order is the quality order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
}

impl Tier {
    pub const fn label(self) -> &'static str {
        match self {
            Tier::One => "1",
            Tier::Two => "2",
            Tier::Three => "3",
            Tier::Four => "4",
            Tier::Five => "5",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "1" => Ok(Tier::One),
            "2" => Ok(Tier::Two),
            "3" => Ok(Tier::Three),
            "4" => Ok(Tier::Four),
            "5" => Ok(Tier::Five),
            other => Err(format!("tier must be 1-5, got '{other}'")),
        }
    }
}

/// Fine quality band within a tier; `A` is the strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SubTier {
    A,
    B,
    C,
    D,
}

impl SubTier {
    pub const fn label(self) -> &'static str {
        match self {
            SubTier::A => "A",
            SubTier::B => "B",
            SubTier::C => "C",
            SubTier::D => "D",
        }
    }
}

impl FromStr for SubTier {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(SubTier::A),
            "B" => Ok(SubTier::B),
            "C" => Ok(SubTier::C),
            "D" => Ok(SubTier::D),
            other => Err(format!("sub-tier must be A-D, got '{other}'")),
        }
    }
}

/// Placement figures merged in from the placement report export.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_package: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highest_package: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement_description: Option<String>,
}

/// Campus facilities relevant to PwD applicants.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityProfile {
    pub wheelchair_access: bool,
    pub hostel_access: bool,
    pub transport_support: bool,
    pub medical_facility: bool,
    pub accessibility_score: u8,
}

impl Default for AccessibilityProfile {
    fn default() -> Self {
        Self {
            wheelchair_access: true,
            hostel_access: true,
            transport_support: false,
            medical_facility: true,
            accessibility_score: 75,
        }
    }
}

pub const DEFAULT_NIRF_RANK: u32 = 999;

/// One admission slot: a college branch for a single community.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Offering {
    pub id: OfferingId,
    pub code: Option<String>,
    pub name: String,
    pub branch: String,
    pub category: Community,
    pub cutoff: f64,
    pub tier: Tier,
    pub sub_tier: Option<SubTier>,
    pub district: String,
    pub nirf_rank: u32,
    #[serde(flatten)]
    pub placement: PlacementDetails,
    #[serde(flatten)]
    pub accessibility: AccessibilityProfile,
}

impl Offering {
    /// Institution label used in reasons and CLI output, e.g. `Tier 1A`.
    pub fn tier_label(&self) -> String {
        match self.sub_tier {
            Some(sub_tier) => format!("Tier {}{}", self.tier, sub_tier.label()),
            None => format!("Tier {}", self.tier),
        }
    }
}

/// Higher cutoff first. Shared tiebreak of both ranking paths.
pub fn cmp_cutoff_desc(left: &Offering, right: &Offering) -> Ordering {
    right.cutoff.total_cmp(&left.cutoff)
}

/// Distinct option lists used to populate selection controls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub districts: Vec<String>,
    pub branches: Vec<String>,
    pub categories: Vec<String>,
}

/// Slack absorbed when comparing a raw cutoff gap against a band threshold, so that
/// `195.3 - 190.3` still counts as a gap of 5.
pub const GAP_TOLERANCE: f64 = 1e-9;

/// Round to two decimals so displayed gaps do not carry float noise.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
