use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::error::CounselingError;
use super::guidance::{
    AlternatePathPrediction, AlternatePathRequest, GuidanceCatalog, Review, ReviewRepository,
    ReviewSubmission, Scholarship,
};
use super::offerings::filter::{
    parse_community, parse_cutoff, CHOICE_WINDOW_ABOVE, CHOICE_WINDOW_BELOW,
};
use super::offerings::{
    generate_choice_list, rank_predictions, BranchCatalog, BrowseFilter, ChoiceList,
    CutoffBounds, FeeProfile, FilterBuilder, FilterOptions, Offering, OfferingRepository,
    PwdClaim, RankedOffering, Tier,
};
use super::requests::{BrowseQuery, ChoiceRequest, PredictionRequest};

/// Upper bound on candidates fetched for `/predict`.
pub const PREDICTION_FETCH_LIMIT: usize = 200;
/// Upper bound on candidates fetched for choice filling.
pub const CHOICE_FETCH_LIMIT: usize = 500;

/// Service composing the offering store, review store, and reference catalogs.
pub struct CounselingService<O, R> {
    offerings: Arc<O>,
    reviews: Arc<R>,
    guidance: Arc<GuidanceCatalog>,
    branches: Arc<BranchCatalog>,
}

impl<O, R> CounselingService<O, R>
where
    O: OfferingRepository + 'static,
    R: ReviewRepository + 'static,
{
    pub fn new(offerings: Arc<O>, reviews: Arc<R>, guidance: GuidanceCatalog) -> Self {
        Self {
            offerings,
            reviews,
            guidance: Arc::new(guidance),
            branches: Arc::new(BranchCatalog::standard()),
        }
    }

    pub fn filter_options(&self) -> Result<FilterOptions, CounselingError> {
        Ok(self.offerings.filter_options()?)
    }

    /// Explore listing: best tiers first, then the highest cutoffs.
    pub fn colleges(&self, query: &BrowseQuery) -> Result<Vec<Offering>, CounselingError> {
        let district = query
            .district
            .as_deref()
            .map(str::trim)
            .filter(|district| !district.is_empty());
        let tier = match query.tier.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => match raw.parse::<Tier>() {
                Ok(tier) => Some(tier),
                // An exact match on an unknown tier selects nothing.
                Err(_) => return Ok(Vec::new()),
            },
        };

        let filter = BrowseFilter {
            district: district.map(str::to_string),
            tier,
        };
        Ok(self.offerings.browse(&filter, query.limit())?)
    }

    pub fn college(&self, id_or_code: &str) -> Result<Offering, CounselingError> {
        self.offerings
            .get(id_or_code)?
            .ok_or_else(|| CounselingError::not_found("College not found"))
    }

    pub fn college_branches(&self, code: &str) -> Result<Vec<String>, CounselingError> {
        Ok(self.offerings.branches_for_code(code)?)
    }

    /// Offerings the applicant can reach, strongest institutions first.
    pub fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<Vec<RankedOffering>, CounselingError> {
        let cutoff = parse_cutoff(request.cutoff.as_ref())?;
        let category = parse_community(request.category.as_deref(), "category")?;
        let pwd = PwdClaim {
            is_pwd: request.is_pwd,
            disability_percentage: request
                .disability_percentage
                .as_ref()
                .and_then(|value| value.value()),
        };
        let ceiling = cutoff + pwd.ceiling_bonus();

        let filter = FilterBuilder::new(&self.branches, category, CutoffBounds::ceiling(ceiling))
            .branches(request.preferred_branch.as_ref())
            .districts(request.district_selection())
            .build();
        debug!(?filter, "prediction filter built");

        let candidates = self.offerings.find(&filter, PREDICTION_FETCH_LIMIT)?;
        info!(
            cutoff,
            ceiling,
            %category,
            candidates = candidates.len(),
            "prediction candidates fetched"
        );

        Ok(rank_predictions(cutoff, candidates))
    }

    /// Ordered counseling choice list with fee estimates.
    pub fn generate_choices(&self, request: &ChoiceRequest) -> Result<ChoiceList, CounselingError> {
        let cutoff = parse_cutoff(request.cutoff.as_ref())?;
        let community = parse_community(request.community.as_deref(), "community")?;

        let filter = FilterBuilder::new(
            &self.branches,
            community,
            CutoffBounds::window(cutoff, CHOICE_WINDOW_BELOW, CHOICE_WINDOW_ABOVE),
        )
        .branches(request.preferred_branch.as_ref())
        .districts(request.preferred_district.as_ref())
        .build();

        let candidates = self.offerings.find(&filter, CHOICE_FETCH_LIMIT)?;
        info!(
            cutoff,
            %community,
            candidates = candidates.len(),
            "choice candidates fetched"
        );

        let profile = FeeProfile {
            community,
            income: request.income.as_ref().and_then(|income| income.value()),
            govt_school: request.is_govt_school,
            first_graduate: request.is_first_graduate,
        };

        Ok(generate_choice_list(cutoff, candidates, &profile))
    }

    pub fn submit_review(&self, submission: ReviewSubmission) -> Result<Review, CounselingError> {
        let review = submission.into_review(Utc::now())?;
        let stored = self.reviews.insert(review)?;
        info!(review_id = %stored.id.0, college_code = %stored.college_code, "review stored");
        Ok(stored)
    }

    pub fn reviews(&self, college_code: &str) -> Result<Vec<Review>, CounselingError> {
        Ok(self.reviews.for_college(college_code)?)
    }

    pub fn scholarships(&self) -> &[Scholarship] {
        &self.guidance.scholarships
    }

    pub fn career_domains(&self) -> Vec<String> {
        self.guidance.careers.domains()
    }

    pub fn alternate_path(
        &self,
        request: &AlternatePathRequest,
    ) -> Result<AlternatePathPrediction, CounselingError> {
        self.guidance.careers.predict(request)
    }
}
