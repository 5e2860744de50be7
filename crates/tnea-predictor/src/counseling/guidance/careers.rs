use serde::{Deserialize, Serialize};

use crate::counseling::error::CounselingError;
use crate::counseling::offerings::{Chance, NumericInput};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternateBranch {
    pub branch_name: String,
    pub similarity_score: u8,
    pub placement_overlap_score: u8,
}

/// Career goal mapped to its primary branch and nearby alternatives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerMapping {
    pub career_domain: String,
    pub primary_branch: String,
    #[serde(default)]
    pub alternate_branches: Vec<AlternateBranch>,
}

/// Skills to pick up in one year of study for a career domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillRoadmap {
    pub career_domain: String,
    pub year: u8,
    #[serde(default)]
    pub recommended_skills: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub project_types: Vec<String>,
}

pub const ACADEMIC_UPGRADES: [&str; 3] = [
    "Minor in Computer Science",
    "Honors Degree in Major",
    "NPTEL Certification in Data Science",
];

/// TNEA aggregate: maths out of 100 plus the physics/chemistry average.
pub fn tnea_cutoff(maths: f64, physics: f64, chemistry: f64) -> f64 {
    maths + (physics + chemistry) / 2.0
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternatePathRequest {
    #[serde(default)]
    pub career_domain: Option<String>,
    #[serde(default)]
    pub physics: Option<NumericInput>,
    #[serde(default)]
    pub chemistry: Option<NumericInput>,
    #[serde(default)]
    pub maths: Option<NumericInput>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    High,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DreamPath {
    pub branch: String,
    pub admission_probability: Chance,
    pub risk_level: RiskLevel,
    pub cutoff: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternatePathPrediction {
    pub dream_path: DreamPath,
    pub alternate_branches: Vec<AlternateBranch>,
    pub roadmap: Vec<SkillRoadmap>,
    pub academic_upgrades: Vec<&'static str>,
}

fn admission_probability(cutoff: f64) -> Chance {
    if cutoff > 190.0 {
        Chance::High
    } else if cutoff > 170.0 {
        Chance::Medium
    } else {
        Chance::Low
    }
}

fn risk_level(cutoff: f64) -> RiskLevel {
    if cutoff < 160.0 {
        RiskLevel::High
    } else {
        RiskLevel::Low
    }
}

fn mark(raw: Option<&NumericInput>, subject: &str) -> Result<f64, CounselingError> {
    raw.and_then(NumericInput::value)
        .ok_or_else(|| CounselingError::invalid(format!("{subject} mark must be a number")))
}

/// Career mappings and their year-by-year roadmaps, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct CareerCatalog {
    mappings: Vec<CareerMapping>,
    roadmaps: Vec<SkillRoadmap>,
}

impl CareerCatalog {
    pub fn new(mappings: Vec<CareerMapping>, roadmaps: Vec<SkillRoadmap>) -> Self {
        Self { mappings, roadmaps }
    }

    pub fn domains(&self) -> Vec<String> {
        self.mappings
            .iter()
            .map(|mapping| mapping.career_domain.clone())
            .collect()
    }

    pub fn predict(
        &self,
        request: &AlternatePathRequest,
    ) -> Result<AlternatePathPrediction, CounselingError> {
        let domain = request
            .career_domain
            .as_deref()
            .map(str::trim)
            .filter(|domain| !domain.is_empty())
            .ok_or_else(|| CounselingError::invalid("careerDomain is required"))?;

        let mapping = self
            .mappings
            .iter()
            .find(|mapping| mapping.career_domain == domain)
            .ok_or_else(|| CounselingError::not_found("Career domain not found"))?;

        let maths = mark(request.maths.as_ref(), "maths")?;
        let physics = mark(request.physics.as_ref(), "physics")?;
        let chemistry = mark(request.chemistry.as_ref(), "chemistry")?;
        let cutoff = tnea_cutoff(maths, physics, chemistry);

        let mut roadmap: Vec<SkillRoadmap> = self
            .roadmaps
            .iter()
            .filter(|step| step.career_domain == domain)
            .cloned()
            .collect();
        roadmap.sort_by_key(|step| step.year);

        Ok(AlternatePathPrediction {
            dream_path: DreamPath {
                branch: mapping.primary_branch.clone(),
                admission_probability: admission_probability(cutoff),
                risk_level: risk_level(cutoff),
                cutoff,
            },
            alternate_branches: mapping.alternate_branches.clone(),
            roadmap,
            academic_upgrades: ACADEMIC_UPGRADES.to_vec(),
        })
    }
}
