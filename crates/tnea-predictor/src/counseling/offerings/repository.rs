use super::domain::{FilterOptions, Offering};
use super::filter::{BrowseFilter, OfferingFilter};

/// Read access to the offering store so the service can be exercised in isolation.
pub trait OfferingRepository: Send + Sync {
    /// Offerings matching `filter`, highest cutoff first, at most `limit`.
    fn find(&self, filter: &OfferingFilter, limit: usize)
        -> Result<Vec<Offering>, RepositoryError>;
    /// Exact-match listing ordered by tier then cutoff descending.
    fn browse(&self, filter: &BrowseFilter, limit: usize) -> Result<Vec<Offering>, RepositoryError>;
    /// Lookup by internal id, falling back to the college code.
    fn get(&self, id_or_code: &str) -> Result<Option<Offering>, RepositoryError>;
    fn branches_for_code(&self, code: &str) -> Result<Vec<String>, RepositoryError>;
    fn filter_options(&self) -> Result<FilterOptions, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
