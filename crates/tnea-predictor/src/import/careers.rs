use std::io::Read;

use serde::Deserialize;

use super::ImportError;
use crate::counseling::guidance::{CareerCatalog, CareerMapping, SkillRoadmap};

#[derive(Debug, Default, Deserialize)]
struct CareerDocument {
    #[serde(default)]
    careers: Vec<CareerMapping>,
    #[serde(default)]
    roadmaps: Vec<SkillRoadmap>,
}

/// Parse the career-path seed document: `{ "careers": [...], "roadmaps": [...] }`.
pub fn parse_career_paths<R: Read>(reader: R) -> Result<CareerCatalog, ImportError> {
    let document: CareerDocument = serde_json::from_reader(reader)?;
    Ok(CareerCatalog::new(document.careers, document.roadmaps))
}
