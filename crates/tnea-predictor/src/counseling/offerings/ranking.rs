use serde::Serialize;

use super::domain::{cmp_cutoff_desc, round_cents, Offering, SubTier, Tier, GAP_TOLERANCE};

/// Qualitative admission chance on the prediction path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Chance {
    High,
    Medium,
    Low,
}

impl Chance {
    /// Band for a raw, unrounded gap. Only float noise is forgiven at a threshold.
    pub fn from_gap(diff: f64) -> Self {
        let diff = diff + GAP_TOLERANCE;
        if diff >= 5.0 {
            Chance::High
        } else if diff >= 2.0 {
            Chance::Medium
        } else {
            Chance::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Chance::High => "High",
            Chance::Medium => "Medium",
            Chance::Low => "Low",
        }
    }
}

/// Offering annotated with the gap to the applicant's cutoff.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedOffering {
    #[serde(flatten)]
    pub offering: Offering,
    pub diff: f64,
    pub chance: Chance,
}

fn tier_weight(tier: Tier) -> u32 {
    match tier {
        Tier::One => 100,
        Tier::Two => 50,
        _ => 0,
    }
}

fn sub_tier_weight(sub_tier: Option<SubTier>) -> u32 {
    match sub_tier {
        Some(SubTier::A) => 4,
        Some(SubTier::B) => 3,
        Some(SubTier::C) => 2,
        Some(SubTier::D) => 1,
        None => 0,
    }
}

/// Institutional quality; larger is better.
pub fn quality_score(offering: &Offering) -> u32 {
    tier_weight(offering.tier) + sub_tier_weight(offering.sub_tier)
}

/// Annotate and order candidates best institution first.
///
/// Candidates are already within reach of `request_cutoff`, so the list leads with the
/// strongest institutions rather than the easiest admits. Equal quality falls back to the
/// higher cutoff.
pub fn rank_predictions(request_cutoff: f64, candidates: Vec<Offering>) -> Vec<RankedOffering> {
    let mut ranked: Vec<RankedOffering> = candidates
        .into_iter()
        .map(|offering| {
            let gap = request_cutoff - offering.cutoff;
            RankedOffering {
                chance: Chance::from_gap(gap),
                diff: round_cents(gap),
                offering,
            }
        })
        .collect();

    ranked.sort_by(|left, right| {
        quality_score(&right.offering)
            .cmp(&quality_score(&left.offering))
            .then_with(|| cmp_cutoff_desc(&left.offering, &right.offering))
    });

    ranked
}
