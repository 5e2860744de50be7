use crate::infra::load_service;
use clap::Args;
use std::path::PathBuf;
use tnea_predictor::config::AppConfig;
use tnea_predictor::counseling::guidance::tnea_cutoff;
use tnea_predictor::counseling::offerings::{ChoiceEntry, RankedOffering, Selection};
use tnea_predictor::counseling::{ChoiceRequest, CounselingError, PredictionRequest};
use tnea_predictor::error::AppError;

#[derive(Args, Debug, Default)]
pub(crate) struct PredictArgs {
    /// TNEA cutoff out of 200. Derived from the marks when omitted.
    #[arg(long)]
    pub(crate) cutoff: Option<f64>,
    /// Mathematics mark out of 100
    #[arg(long)]
    pub(crate) maths: Option<f64>,
    /// Physics mark out of 100
    #[arg(long)]
    pub(crate) physics: Option<f64>,
    /// Chemistry mark out of 100
    #[arg(long)]
    pub(crate) chemistry: Option<f64>,
    /// Community code (OC, BC, BCM, MBC, DNC, SC, SCA, ST)
    #[arg(long)]
    pub(crate) category: String,
    /// Preferred branch code or name; repeat for several
    #[arg(long)]
    pub(crate) branch: Vec<String>,
    /// Preferred district; repeat for several
    #[arg(long)]
    pub(crate) district: Vec<String>,
    /// Disability percentage for a PwD claim
    #[arg(long)]
    pub(crate) disability_percentage: Option<f64>,
    /// Rows to print
    #[arg(long, default_value_t = 20)]
    pub(crate) limit: usize,
    /// Directory holding the offering and guidance exports
    #[arg(long)]
    pub(crate) data_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ChoicesArgs {
    /// TNEA cutoff out of 200. Derived from the marks when omitted.
    #[arg(long)]
    pub(crate) cutoff: Option<f64>,
    /// Mathematics mark out of 100
    #[arg(long)]
    pub(crate) maths: Option<f64>,
    /// Physics mark out of 100
    #[arg(long)]
    pub(crate) physics: Option<f64>,
    /// Chemistry mark out of 100
    #[arg(long)]
    pub(crate) chemistry: Option<f64>,
    /// Community code (OC, BC, BCM, MBC, DNC, SC, SCA, ST)
    #[arg(long)]
    pub(crate) community: String,
    /// Annual family income in rupees
    #[arg(long)]
    pub(crate) income: Option<f64>,
    /// Studied class 6 to 12 in government schools
    #[arg(long)]
    pub(crate) govt_school: bool,
    /// First graduate in the family
    #[arg(long)]
    pub(crate) first_graduate: bool,
    /// Preferred branch code or name; repeat for several
    #[arg(long)]
    pub(crate) branch: Vec<String>,
    /// Preferred district; repeat for several
    #[arg(long)]
    pub(crate) district: Vec<String>,
    /// Directory holding the offering and guidance exports
    #[arg(long)]
    pub(crate) data_dir: Option<PathBuf>,
}

fn resolve_cutoff(
    cutoff: Option<f64>,
    maths: Option<f64>,
    physics: Option<f64>,
    chemistry: Option<f64>,
) -> Result<f64, CounselingError> {
    match (cutoff, maths, physics, chemistry) {
        (Some(cutoff), _, _, _) => Ok(cutoff),
        (None, Some(maths), Some(physics), Some(chemistry)) => {
            Ok(tnea_cutoff(maths, physics, chemistry))
        }
        _ => Err(CounselingError::invalid(
            "provide --cutoff or all of --maths, --physics, --chemistry",
        )),
    }
}

fn selection(values: Vec<String>) -> Option<Selection> {
    if values.is_empty() {
        None
    } else {
        Some(Selection::Many(values))
    }
}

fn data_directory(overridden: Option<PathBuf>) -> Result<PathBuf, AppError> {
    match overridden {
        Some(directory) => Ok(directory),
        None => Ok(AppConfig::load()?.data.directory),
    }
}

pub(crate) fn run_predict(args: PredictArgs) -> Result<(), AppError> {
    let cutoff = resolve_cutoff(args.cutoff, args.maths, args.physics, args.chemistry)?;
    let service = load_service(&data_directory(args.data_dir)?)?;

    let request = PredictionRequest {
        cutoff: Some(cutoff.into()),
        category: Some(args.category),
        preferred_branch: selection(args.branch),
        preferred_district: selection(args.district),
        is_pwd: args.disability_percentage.is_some(),
        disability_percentage: args.disability_percentage.map(Into::into),
        ..PredictionRequest::default()
    };
    let ranked = service.predict(&request)?;

    println!("College prediction for cutoff {:.2}", cutoff);
    if ranked.is_empty() {
        println!("No offerings within reach for the given filters.");
        return Ok(());
    }
    println!("{} offerings within reach", ranked.len());
    for (position, entry) in ranked.iter().take(args.limit).enumerate() {
        println!("{}", prediction_line(position + 1, entry));
    }
    if ranked.len() > args.limit {
        println!("... {} more", ranked.len() - args.limit);
    }
    Ok(())
}

pub(crate) fn run_choices(args: ChoicesArgs) -> Result<(), AppError> {
    let cutoff = resolve_cutoff(args.cutoff, args.maths, args.physics, args.chemistry)?;
    let service = load_service(&data_directory(args.data_dir)?)?;

    let request = ChoiceRequest {
        cutoff: Some(cutoff.into()),
        community: Some(args.community),
        income: args.income.map(Into::into),
        is_govt_school: args.govt_school,
        is_first_graduate: args.first_graduate,
        preferred_branch: selection(args.branch),
        preferred_district: selection(args.district),
    };
    let list = service.generate_choices(&request)?;

    println!("Choice list for cutoff {:.2}", cutoff);
    if list.count == 0 {
        println!("No offerings inside the counseling window.");
        return Ok(());
    }
    for (position, entry) in list.choices.iter().enumerate() {
        println!("{}", choice_line(position + 1, entry));
    }
    Ok(())
}

pub(crate) fn prediction_line(position: usize, entry: &RankedOffering) -> String {
    let offering = &entry.offering;
    format!(
        "{:>3}. {} | {} | {} | cutoff {:.2} ({:+.2}) | {} chance",
        position,
        offering.name,
        offering.branch,
        offering.tier_label(),
        offering.cutoff,
        entry.diff,
        entry.chance.label()
    )
}

pub(crate) fn choice_line(position: usize, entry: &ChoiceEntry) -> String {
    let financials = &entry.financials;
    let schemes = if financials.schemes.is_empty() {
        String::new()
    } else {
        format!(" [{}]", financials.schemes.join(", "))
    };
    format!(
        "{:>3}. {} | {} | cutoff {:.2} ({:+.2}) | {} {}% | fee {} net {}{}",
        position,
        entry.name,
        entry.branch,
        entry.cutoff,
        entry.diff,
        entry.probability.label.label(),
        entry.probability.score,
        financials.total_fee,
        financials.net_fee,
        schemes
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tnea_predictor::counseling::offerings::{
        AccessibilityProfile, Chance, Community, Offering, OfferingId, PlacementDetails, SubTier,
        Tier,
    };

    #[test]
    fn cutoff_falls_back_to_marks() {
        assert_eq!(resolve_cutoff(Some(180.0), None, None, None).unwrap(), 180.0);
        assert_eq!(
            resolve_cutoff(None, Some(100.0), Some(90.0), Some(80.0)).unwrap(),
            185.0
        );
        assert!(resolve_cutoff(None, Some(100.0), None, Some(80.0)).is_err());
    }

    #[test]
    fn empty_preferences_mean_no_filter() {
        assert!(selection(Vec::new()).is_none());
        assert_eq!(
            selection(vec!["CSE".to_string()]),
            Some(Selection::Many(vec!["CSE".to_string()]))
        );
    }

    #[test]
    fn prediction_line_shows_tier_gap_and_chance() {
        let entry = RankedOffering {
            offering: Offering {
                id: OfferingId("psg-cse-oc".to_string()),
                code: Some("2006".to_string()),
                name: "PSG College of Technology".to_string(),
                branch: "COMPUTER SCIENCE AND ENGINEERING".to_string(),
                category: Community::Oc,
                cutoff: 190.0,
                tier: Tier::One,
                sub_tier: Some(SubTier::B),
                district: "Coimbatore".to_string(),
                nirf_rank: 63,
                placement: PlacementDetails::default(),
                accessibility: AccessibilityProfile::default(),
            },
            diff: 5.0,
            chance: Chance::High,
        };

        assert_eq!(
            prediction_line(1, &entry),
            "  1. PSG College of Technology | COMPUTER SCIENCE AND ENGINEERING | Tier 1B | cutoff 190.00 (+5.00) | High chance"
        );
    }
}
