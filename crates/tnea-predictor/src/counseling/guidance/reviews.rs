use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::counseling::error::CounselingError;
use crate::counseling::offerings::RepositoryError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewId(pub String);

/// A student's review of a college, keyed by the counseling code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub college_code: String,
    pub user: String,
    pub rating: u8,
    pub comment: String,
    pub date: DateTime<Utc>,
}

/// Request body for `POST /reviews`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSubmission {
    #[serde(default)]
    pub college_code: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub rating: Option<i64>,
    #[serde(default)]
    pub comment: Option<String>,
}

static REVIEW_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_review_id() -> ReviewId {
    let id = REVIEW_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ReviewId(format!("rev-{id:06}"))
}

fn required(value: Option<String>, field: &str) -> Result<String, CounselingError> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| CounselingError::invalid(format!("{field} is required")))
}

impl ReviewSubmission {
    pub fn into_review(self, now: DateTime<Utc>) -> Result<Review, CounselingError> {
        let college_code = required(self.college_code, "collegeCode")?;
        let user = required(self.user, "user")?;
        let comment = required(self.comment, "comment")?;
        let rating = self
            .rating
            .ok_or_else(|| CounselingError::invalid("rating is required"))?;
        let rating = u8::try_from(rating)
            .ok()
            .filter(|rating| (1..=5).contains(rating))
            .ok_or_else(|| CounselingError::invalid("rating must be between 1 and 5"))?;

        Ok(Review {
            id: next_review_id(),
            college_code,
            user,
            rating,
            comment,
            date: now,
        })
    }
}

/// Storage for user-submitted reviews. Inserts are independent and unordered.
pub trait ReviewRepository: Send + Sync {
    fn insert(&self, review: Review) -> Result<Review, RepositoryError>;
    /// Reviews for a college, newest first.
    fn for_college(&self, college_code: &str) -> Result<Vec<Review>, RepositoryError>;
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryReviewStore {
    reviews: Arc<Mutex<Vec<Review>>>,
}

impl ReviewRepository for InMemoryReviewStore {
    fn insert(&self, review: Review) -> Result<Review, RepositoryError> {
        let mut guard = self
            .reviews
            .lock()
            .map_err(|_| RepositoryError::Unavailable("review store lock poisoned".to_string()))?;
        guard.push(review.clone());
        Ok(review)
    }

    fn for_college(&self, college_code: &str) -> Result<Vec<Review>, RepositoryError> {
        let guard = self
            .reviews
            .lock()
            .map_err(|_| RepositoryError::Unavailable("review store lock poisoned".to_string()))?;
        let mut reviews: Vec<Review> = guard
            .iter()
            .filter(|review| review.college_code == college_code)
            .cloned()
            .collect();
        reviews.sort_by(|left, right| right.date.cmp(&left.date));
        Ok(reviews)
    }
}
