use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::counseling::guidance::{
    CareerCatalog, GuidanceCatalog, InMemoryReviewStore, Review, ReviewRepository, Scholarship,
};
use crate::counseling::offerings::{
    AccessibilityProfile, BrowseFilter, Community, FilterOptions, InMemoryOfferingStore,
    Offering, OfferingFilter, OfferingId, OfferingRepository, PlacementDetails, RepositoryError,
    SubTier, Tier,
};
use crate::counseling::{counseling_router, CounselingService};

pub(super) fn offering(
    id: &str,
    name: &str,
    branch: &str,
    category: Community,
    cutoff: f64,
    tier: Tier,
    sub_tier: Option<SubTier>,
) -> Offering {
    Offering {
        id: OfferingId(id.to_string()),
        code: None,
        name: name.to_string(),
        branch: branch.to_string(),
        category,
        cutoff,
        tier,
        sub_tier,
        district: "Chennai".to_string(),
        nirf_rank: 999,
        placement: PlacementDetails::default(),
        accessibility: AccessibilityProfile::default(),
    }
}

pub(super) fn with_code(mut offering: Offering, code: &str, district: &str) -> Offering {
    offering.code = Some(code.to_string());
    offering.district = district.to_string();
    offering
}

/// A small catalogue spanning tiers, communities, and districts.
pub(super) fn sample_offerings() -> Vec<Offering> {
    vec![
        with_code(
            offering(
                "ceg-cse-oc",
                "College of Engineering Guindy",
                "COMPUTER SCIENCE AND ENGINEERING",
                Community::Oc,
                190.0,
                Tier::One,
                Some(SubTier::A),
            ),
            "1",
            "Chennai",
        ),
        with_code(
            offering(
                "ceg-mech-oc",
                "College of Engineering Guindy",
                "MECHANICAL ENGINEERING",
                Community::Oc,
                176.0,
                Tier::One,
                Some(SubTier::A),
            ),
            "1",
            "Chennai",
        ),
        with_code(
            offering(
                "kec-cse-oc",
                "Kongu Engineering College",
                "COMPUTER SCIENCE AND ENGINEERING",
                Community::Oc,
                185.0,
                Tier::Two,
                Some(SubTier::B),
            ),
            "2711",
            "Erode",
        ),
        with_code(
            offering(
                "kec-it-oc",
                "Kongu Engineering College",
                "INFORMATION TECHNOLOGY",
                Community::Oc,
                193.0,
                Tier::Two,
                Some(SubTier::B),
            ),
            "2711",
            "Erode",
        ),
        with_code(
            offering(
                "gce-civil-oc",
                "Government College of Engineering Salem",
                "CIVIL ENGINEERING",
                Community::Oc,
                170.0,
                Tier::Two,
                Some(SubTier::A),
            ),
            "2602",
            "Salem",
        ),
        with_code(
            offering(
                "vce-cse-oc",
                "Velammal College of Engineering",
                "COMPUTER SCIENCE AND ENGINEERING",
                Community::Oc,
                160.0,
                Tier::Three,
                None,
            ),
            "5986",
            "Madurai",
        ),
        with_code(
            offering(
                "kec-cse-sc",
                "Kongu Engineering College",
                "COMPUTER SCIENCE AND ENGINEERING",
                Community::Sc,
                172.0,
                Tier::Two,
                Some(SubTier::B),
            ),
            "2711",
            "Erode",
        ),
        with_code(
            offering(
                "gce-civil-sc",
                "Government College of Engineering Salem",
                "CIVIL ENGINEERING",
                Community::Sc,
                150.0,
                Tier::Two,
                Some(SubTier::A),
            ),
            "2602",
            "Salem",
        ),
    ]
}

pub(super) fn guidance() -> GuidanceCatalog {
    GuidanceCatalog {
        scholarships: vec![Scholarship {
            scheme_name: "First Graduate Tuition Fee Concession".to_string(),
            category: Some("Government of Tamil Nadu".to_string()),
            eligibility: None,
            income_limit: None,
            applicable_to: Some("All communities".to_string()),
            benefits: None,
            amount: Some("Up to Rs. 25000 per year".to_string()),
            application_mode: None,
            remarks: None,
        }],
        careers: CareerCatalog::default(),
    }
}

pub(super) type MemoryService = CounselingService<InMemoryOfferingStore, InMemoryReviewStore>;

pub(super) fn build_service_with(offerings: Vec<Offering>) -> MemoryService {
    CounselingService::new(
        Arc::new(InMemoryOfferingStore::new(offerings)),
        Arc::new(InMemoryReviewStore::default()),
        guidance(),
    )
}

pub(super) fn build_service() -> MemoryService {
    build_service_with(sample_offerings())
}

pub(super) fn router_with_service<O, R>(service: CounselingService<O, R>) -> axum::Router
where
    O: OfferingRepository + 'static,
    R: ReviewRepository + 'static,
{
    counseling_router(Arc::new(service))
}

pub(super) struct UnavailableOfferings;

impl OfferingRepository for UnavailableOfferings {
    fn find(
        &self,
        _filter: &OfferingFilter,
        _limit: usize,
    ) -> Result<Vec<Offering>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn browse(
        &self,
        _filter: &BrowseFilter,
        _limit: usize,
    ) -> Result<Vec<Offering>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn get(&self, _id_or_code: &str) -> Result<Option<Offering>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn branches_for_code(&self, _code: &str) -> Result<Vec<String>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn filter_options(&self) -> Result<FilterOptions, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}

pub(super) struct UnavailableReviews;

impl ReviewRepository for UnavailableReviews {
    fn insert(&self, _review: Review) -> Result<Review, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn for_college(&self, _college_code: &str) -> Result<Vec<Review>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
