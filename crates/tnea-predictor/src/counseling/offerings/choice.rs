use serde::Serialize;

use super::domain::{
    cmp_cutoff_desc, round_cents, Offering, OfferingId, SubTier, Tier, GAP_TOLERANCE,
};
use super::fees::{estimate_fee, placement_score, FeeEstimate, FeeProfile};

/// Five-way admission band used when building a counseling choice list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProbabilityBand {
    Safe,
    Likely,
    Moderate,
    Dream,
    Ambitious,
}

impl ProbabilityBand {
    /// Band for a raw, unrounded gap.
    pub fn from_gap(diff: f64) -> Self {
        let diff = diff + GAP_TOLERANCE;
        if diff >= 5.0 {
            ProbabilityBand::Safe
        } else if diff >= 0.0 {
            ProbabilityBand::Likely
        } else if diff >= -2.0 {
            ProbabilityBand::Moderate
        } else if diff >= -5.0 {
            ProbabilityBand::Dream
        } else {
            ProbabilityBand::Ambitious
        }
    }

    pub const fn score(self) -> u8 {
        match self {
            ProbabilityBand::Safe => 95,
            ProbabilityBand::Likely => 80,
            ProbabilityBand::Moderate => 50,
            ProbabilityBand::Dream => 30,
            ProbabilityBand::Ambitious => 10,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ProbabilityBand::Safe => "Safe",
            ProbabilityBand::Likely => "Likely",
            ProbabilityBand::Moderate => "Moderate",
            ProbabilityBand::Dream => "Dream",
            ProbabilityBand::Ambitious => "Ambitious",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Probability {
    pub label: ProbabilityBand,
    pub score: u8,
}

impl From<ProbabilityBand> for Probability {
    fn from(band: ProbabilityBand) -> Self {
        Self {
            label: band,
            score: band.score(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceEntry {
    pub id: OfferingId,
    pub name: String,
    pub code: Option<String>,
    pub branch: String,
    pub cutoff: f64,
    pub tier: Tier,
    pub sub_tier: Option<SubTier>,
    pub district: String,
    pub diff: f64,
    pub probability: Probability,
    pub financials: FeeEstimate,
    pub placement_score: u8,
    pub reason: String,
}

impl ChoiceEntry {
    fn build(applicant_cutoff: f64, offering: Offering, profile: &FeeProfile) -> Self {
        let gap = applicant_cutoff - offering.cutoff;
        let diff = round_cents(gap);
        let band = ProbabilityBand::from_gap(gap);
        let financials = estimate_fee(&offering, profile);
        let reason = format!(
            "{} institute with {} chance.",
            offering.tier_label(),
            band.label()
        );

        Self {
            placement_score: placement_score(offering.tier),
            probability: band.into(),
            financials,
            reason,
            diff,
            id: offering.id,
            name: offering.name,
            code: offering.code,
            branch: offering.branch,
            cutoff: offering.cutoff,
            tier: offering.tier,
            sub_tier: offering.sub_tier,
            district: offering.district,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoiceList {
    pub count: usize,
    pub choices: Vec<ChoiceEntry>,
}

/// Build the ordered list to submit during counseling.
///
/// Allotment takes the first feasible choice in list order, so stronger tiers lead and the
/// safer fallbacks sit further down. Within a tier the higher cutoff comes first.
pub fn generate_choice_list(
    applicant_cutoff: f64,
    candidates: Vec<Offering>,
    profile: &FeeProfile,
) -> ChoiceList {
    let mut candidates = candidates;
    candidates.sort_by(|left, right| {
        left.tier
            .cmp(&right.tier)
            .then_with(|| cmp_cutoff_desc(left, right))
    });

    let choices: Vec<ChoiceEntry> = candidates
        .into_iter()
        .map(|offering| ChoiceEntry::build(applicant_cutoff, offering, profile))
        .collect();

    ChoiceList {
        count: choices.len(),
        choices,
    }
}
