//! Auxiliary data served next to the predictor: scholarships, reviews, career paths.

pub mod careers;
pub mod reviews;
pub mod scholarships;

pub use careers::{
    tnea_cutoff, AlternateBranch, AlternatePathPrediction, AlternatePathRequest, CareerCatalog,
    CareerMapping, DreamPath, RiskLevel, SkillRoadmap,
};
pub use reviews::{InMemoryReviewStore, Review, ReviewId, ReviewRepository, ReviewSubmission};
pub use scholarships::Scholarship;

/// Read-only reference collections loaded at startup.
#[derive(Debug, Clone, Default)]
pub struct GuidanceCatalog {
    pub scholarships: Vec<Scholarship>,
    pub careers: CareerCatalog,
}
