//! College offerings: filtering, the prediction ranking, and choice-list generation.

pub mod branches;
pub mod choice;
pub mod domain;
pub mod fees;
pub mod filter;
pub mod ranking;
pub mod repository;
pub mod store;

pub use branches::{BranchCatalog, ALL_BRANCHES};
pub use choice::{generate_choice_list, ChoiceEntry, ChoiceList, Probability, ProbabilityBand};
pub use domain::{
    AccessibilityProfile, Community, FilterOptions, Offering, OfferingId, PlacementDetails,
    SubTier, Tier,
};
pub use fees::{estimate_fee, placement_score, FeeEstimate, FeeProfile};
pub use filter::{
    BrowseFilter, CutoffBounds, FilterBuilder, NumericInput, OfferingFilter, PwdClaim, Selection,
    ALL_DISTRICTS,
};
pub use ranking::{quality_score, rank_predictions, Chance, RankedOffering};
pub use repository::{OfferingRepository, RepositoryError};
pub use store::InMemoryOfferingStore;
