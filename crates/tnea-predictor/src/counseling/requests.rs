use serde::{Deserialize, Serialize};

use super::offerings::{NumericInput, Selection};

/// Body of `POST /predict`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRequest {
    #[serde(default)]
    pub cutoff: Option<NumericInput>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub preferred_branch: Option<Selection>,
    #[serde(default)]
    pub preferred_district: Option<Selection>,
    /// Older clients send the district under this name.
    #[serde(default)]
    pub district: Option<Selection>,
    #[serde(default, rename = "isPwD", alias = "isPwd")]
    pub is_pwd: bool,
    #[serde(default)]
    pub disability_percentage: Option<NumericInput>,
}

impl PredictionRequest {
    pub fn district_selection(&self) -> Option<&Selection> {
        self.preferred_district
            .as_ref()
            .filter(|selection| !selection.values().iter().all(|v| v.trim().is_empty()))
            .or(self.district.as_ref())
    }
}

/// Body of `POST /choice-filling/generate`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceRequest {
    #[serde(default)]
    pub cutoff: Option<NumericInput>,
    #[serde(default)]
    pub community: Option<String>,
    #[serde(default)]
    pub income: Option<NumericInput>,
    #[serde(default)]
    pub is_govt_school: bool,
    #[serde(default)]
    pub is_first_graduate: bool,
    #[serde(default)]
    pub preferred_branch: Option<Selection>,
    #[serde(default)]
    pub preferred_district: Option<Selection>,
}

/// Query string of `GET /colleges`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseQuery {
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub tier: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

pub const DEFAULT_BROWSE_LIMIT: usize = 12;

impl BrowseQuery {
    /// Missing, unparseable, or zero limits fall back to the default page size.
    pub fn limit(&self) -> usize {
        self.limit
            .as_deref()
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|limit| *limit > 0)
            .unwrap_or(DEFAULT_BROWSE_LIMIT)
    }
}
