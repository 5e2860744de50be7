use std::io::Read;

use serde::{Deserialize, Deserializer};

use super::ImportError;
use crate::counseling::offerings::domain::DEFAULT_NIRF_RANK;
use crate::counseling::offerings::{
    AccessibilityProfile, Community, Offering, OfferingId, PlacementDetails, SubTier, Tier,
};

/// Parse the offering export: one row per college, branch, and community.
pub fn parse_offerings<R: Read>(reader: R) -> Result<Vec<Offering>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut offerings = Vec::new();

    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        let line = record.position().map_or(index as u64 + 2, |pos| pos.line());
        let row: OfferingRow = record.deserialize(Some(&headers))?;
        let offering = row
            .into_offering(index + 1)
            .map_err(|reason| ImportError::InvalidRow { line, reason })?;
        offerings.push(offering);
    }

    Ok(offerings)
}

#[derive(Debug, Deserialize)]
struct OfferingRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    code: Option<String>,
    name: String,
    branch: String,
    category: String,
    cutoff: String,
    tier: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    sub_tier: Option<String>,
    #[serde(default)]
    district: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    nirf_rank: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    average_package: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    highest_package: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    placement_link: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    placement_description: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    wheelchair_access: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    hostel_access: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    transport_support: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    medical_facility: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    accessibility_score: Option<String>,
}

impl OfferingRow {
    fn into_offering(self, sequence: usize) -> Result<Offering, String> {
        if self.name.is_empty() {
            return Err("college name is empty".to_string());
        }
        if self.branch.is_empty() {
            return Err("branch is empty".to_string());
        }

        let category = self
            .category
            .parse::<Community>()
            .map_err(|err| err.to_string())?;
        let cutoff = self
            .cutoff
            .parse::<f64>()
            .ok()
            .filter(|cutoff| cutoff.is_finite() && *cutoff >= 0.0)
            .ok_or_else(|| format!("cutoff '{}' is not a non-negative number", self.cutoff))?;
        let tier = self.tier.parse::<Tier>()?;
        let sub_tier = self
            .sub_tier
            .as_deref()
            .map(str::parse::<SubTier>)
            .transpose()?;
        let nirf_rank = match self.nirf_rank.as_deref() {
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|_| format!("nirf_rank '{raw}' is not a whole number"))?,
            None => DEFAULT_NIRF_RANK,
        };

        let defaults = AccessibilityProfile::default();
        let accessibility = AccessibilityProfile {
            wheelchair_access: parse_flag(self.wheelchair_access, defaults.wheelchair_access)?,
            hostel_access: parse_flag(self.hostel_access, defaults.hostel_access)?,
            transport_support: parse_flag(self.transport_support, defaults.transport_support)?,
            medical_facility: parse_flag(self.medical_facility, defaults.medical_facility)?,
            accessibility_score: match self.accessibility_score.as_deref() {
                Some(raw) => raw
                    .parse::<u8>()
                    .ok()
                    .filter(|score| *score <= 100)
                    .ok_or_else(|| format!("accessibility_score '{raw}' must be 0-100"))?,
                None => defaults.accessibility_score,
            },
        };

        Ok(Offering {
            id: OfferingId(self.id.unwrap_or_else(|| format!("off-{sequence:06}"))),
            code: self.code,
            name: self.name,
            branch: self.branch,
            category,
            cutoff,
            tier,
            sub_tier,
            district: self.district,
            nirf_rank,
            placement: PlacementDetails {
                average_package: self.average_package,
                highest_package: self.highest_package,
                placement_link: self.placement_link,
                placement_description: self.placement_description,
            },
            accessibility,
        })
    }
}

fn parse_flag(raw: Option<String>, default: bool) -> Result<bool, String> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" => Ok(false),
        _ => Err(format!("'{raw}' is not a yes/no value")),
    }
}

pub(super) fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "id,code,name,branch,category,cutoff,tier,sub_tier,district\n";

    #[test]
    fn parses_minimal_rows_with_defaults() {
        let csv = format!(
            "{HEADER},2006,PSG College of Technology,MECHANICAL ENGINEERING,OC,192.5,1,A,Coimbatore\n"
        );
        let offerings = parse_offerings(csv.as_bytes()).expect("parses");
        assert_eq!(offerings.len(), 1);
        let offering = &offerings[0];
        assert_eq!(offering.id.0, "off-000001");
        assert_eq!(offering.code.as_deref(), Some("2006"));
        assert_eq!(offering.category, Community::Oc);
        assert_eq!(offering.tier, Tier::One);
        assert_eq!(offering.sub_tier, Some(SubTier::A));
        assert_eq!(offering.nirf_rank, DEFAULT_NIRF_RANK);
        assert_eq!(offering.accessibility, AccessibilityProfile::default());
    }

    #[test]
    fn rejects_unknown_community_with_line_number() {
        let csv = format!(
            "{HEADER}a1,1,College One,CIVIL ENGINEERING,OC,150,2,B,Salem\n\
a2,1,College One,CIVIL ENGINEERING,GEN,150,2,B,Salem\n"
        );
        let err = parse_offerings(csv.as_bytes()).expect_err("GEN is not a community");
        match err {
            ImportError::InvalidRow { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("GEN"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_negative_cutoff() {
        let csv = format!("{HEADER}a1,1,College One,CIVIL ENGINEERING,OC,-4,2,B,Salem\n");
        assert!(matches!(
            parse_offerings(csv.as_bytes()),
            Err(ImportError::InvalidRow { .. })
        ));
    }

    #[test]
    fn reads_accessibility_overrides() {
        let csv = "name,branch,category,cutoff,tier,wheelchair_access,accessibility_score\n\
College One,CIVIL ENGINEERING,SC,140,3,no,40\n";
        let offerings = parse_offerings(csv.as_bytes()).expect("parses");
        assert!(!offerings[0].accessibility.wheelchair_access);
        assert_eq!(offerings[0].accessibility.accessibility_score, 40);
        assert_eq!(offerings[0].sub_tier, None);
        assert_eq!(offerings[0].district, "");
    }
}
