use serde::Serialize;

use super::domain::{Community, Offering, Tier};

pub const GOVERNMENT_INSTITUTION_FEE: u32 = 35_000;
pub const FIRST_GRADUATE_WAIVER: u32 = 25_000;
pub const POST_MATRIC_WAIVER: u32 = 50_000;
pub const POST_MATRIC_INCOME_LIMIT: f64 = 250_000.0;

pub const GOVT_SCHOOL_SCHEME: &str = "7.5% Govt School Full Waiver";
pub const FIRST_GRADUATE_SCHEME: &str = "First Graduate Concession";
pub const POST_MATRIC_SCHEME: &str = "Post Matric Scholarship";

const GOVERNMENT_NAME_MARKERS: [&str; 3] = ["university departments", "government college", "govt."];

/// Applicant circumstances that drive fee waivers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeeProfile {
    pub community: Community,
    /// Annual household income. `None` when not declared; treated as above every limit.
    pub income: Option<f64>,
    pub govt_school: bool,
    pub first_graduate: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeEstimate {
    pub total_fee: u32,
    pub net_fee: u32,
    pub waiver: u32,
    pub schemes: Vec<String>,
}

pub fn is_government_institution(name: &str) -> bool {
    let lowered = name.to_lowercase();
    GOVERNMENT_NAME_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
}

fn tier_base_fee(tier: Tier) -> u32 {
    match tier {
        Tier::One => 200_000,
        Tier::Two => 140_000,
        Tier::Three => 100_000,
        _ => 85_000,
    }
}

/// Estimated annual tuition after the scholarship schemes the applicant qualifies for.
pub fn estimate_fee(offering: &Offering, profile: &FeeProfile) -> FeeEstimate {
    let government = is_government_institution(&offering.name);
    let base_fee = if government {
        GOVERNMENT_INSTITUTION_FEE
    } else {
        tier_base_fee(offering.tier)
    };

    if profile.govt_school {
        return FeeEstimate {
            total_fee: base_fee,
            net_fee: 0,
            waiver: base_fee,
            schemes: vec![GOVT_SCHOOL_SCHEME.to_string()],
        };
    }

    let mut waiver: u32 = 0;
    let mut schemes = Vec::new();

    if profile.first_graduate {
        waiver += FIRST_GRADUATE_WAIVER;
        schemes.push(FIRST_GRADUATE_SCHEME.to_string());
    }

    let income_eligible = profile
        .income
        .map_or(false, |income| income < POST_MATRIC_INCOME_LIMIT);
    if profile.community.post_matric_eligible() && income_eligible {
        // Government tuition is already nominal, so the scheme adds nothing there.
        if !government {
            waiver += POST_MATRIC_WAIVER;
        }
        schemes.push(POST_MATRIC_SCHEME.to_string());
    }

    let waiver = waiver.min(base_fee);

    FeeEstimate {
        total_fee: base_fee,
        net_fee: base_fee - waiver,
        waiver,
        schemes,
    }
}

/// ROI proxy derived from tier, 0-100.
pub fn placement_score(tier: Tier) -> u8 {
    match tier {
        Tier::One => 95,
        Tier::Two => 80,
        Tier::Three => 65,
        Tier::Four => 50,
        Tier::Five => 40,
    }
}
