//! TNEA counseling: college prediction, choice filling, and the guidance endpoints.

pub mod error;
pub mod guidance;
pub mod offerings;
pub mod requests;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use error::CounselingError;
pub use requests::{BrowseQuery, ChoiceRequest, PredictionRequest};
pub use router::counseling_router;
pub use service::{CounselingService, CHOICE_FETCH_LIMIT, PREDICTION_FETCH_LIMIT};
