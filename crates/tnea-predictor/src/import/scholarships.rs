use std::io::Read;

use serde::Deserialize;
use tracing::warn;

use super::offerings::empty_string_as_none;
use super::ImportError;
use crate::counseling::guidance::Scholarship;

#[derive(Debug, Deserialize)]
struct SchemeRow {
    #[serde(rename = "Scheme Name", default, deserialize_with = "empty_string_as_none")]
    scheme_name: Option<String>,
    #[serde(
        rename = "Category / Authority",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    category: Option<String>,
    #[serde(
        rename = "Eligibility Criteria",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    eligibility: Option<String>,
    #[serde(rename = "Income Limit", default, deserialize_with = "empty_string_as_none")]
    income_limit: Option<String>,
    #[serde(rename = "Applicable To", default, deserialize_with = "empty_string_as_none")]
    applicable_to: Option<String>,
    #[serde(
        rename = "Benefits Provided",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    benefits: Option<String>,
    #[serde(
        rename = "Amount / Fee Waiver",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    amount: Option<String>,
    #[serde(
        rename = "Application Mode",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    application_mode: Option<String>,
    #[serde(rename = "Remarks", default, deserialize_with = "empty_string_as_none")]
    remarks: Option<String>,
}

/// Parse the scheme sheet export. Rows without a scheme name are skipped.
pub fn parse_scholarships<R: Read>(reader: R) -> Result<Vec<Scholarship>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut scholarships = Vec::new();

    for (index, row) in csv_reader.deserialize::<SchemeRow>().enumerate() {
        let row = row?;
        let Some(scheme_name) = row.scheme_name else {
            warn!(row = index + 1, "skipping scholarship row without a scheme name");
            continue;
        };
        scholarships.push(Scholarship {
            scheme_name,
            category: row.category,
            eligibility: row.eligibility,
            income_limit: row.income_limit,
            applicable_to: row.applicable_to,
            benefits: row.benefits,
            amount: row.amount,
            application_mode: row.application_mode,
            remarks: row.remarks,
        });
    }

    Ok(scholarships)
}
