use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use super::error::CounselingError;
use super::guidance::{AlternatePathRequest, ReviewRepository, ReviewSubmission};
use super::offerings::OfferingRepository;
use super::requests::{BrowseQuery, ChoiceRequest, PredictionRequest};
use super::service::CounselingService;

type SharedService<O, R> = State<Arc<CounselingService<O, R>>>;

/// Router exposing the predictor and guidance endpoints under `/api`.
pub fn counseling_router<O, R>(service: Arc<CounselingService<O, R>>) -> Router
where
    O: OfferingRepository + 'static,
    R: ReviewRepository + 'static,
{
    let api = Router::new()
        .route("/filters", get(filters_handler::<O, R>))
        .route("/colleges", get(colleges_handler::<O, R>))
        .route("/college/:id", get(college_handler::<O, R>))
        .route("/college_branches/:code", get(college_branches_handler::<O, R>))
        .route("/predict", post(predict_handler::<O, R>))
        .route(
            "/choice-filling/generate",
            post(choice_filling_handler::<O, R>),
        )
        .route("/reviews", post(submit_review_handler::<O, R>))
        .route("/reviews/:college_code", get(reviews_handler::<O, R>))
        .route("/scholarships", get(scholarships_handler::<O, R>))
        .route(
            "/alternate-path/domains",
            get(career_domains_handler::<O, R>),
        )
        .route(
            "/alternate-path/predict",
            post(alternate_path_handler::<O, R>),
        )
        .with_state(service);

    Router::new().nest("/api", api)
}

pub(crate) async fn filters_handler<O, R>(State(service): SharedService<O, R>) -> Response
where
    O: OfferingRepository + 'static,
    R: ReviewRepository + 'static,
{
    respond(service.filter_options())
}

pub(crate) async fn colleges_handler<O, R>(
    State(service): SharedService<O, R>,
    Query(query): Query<BrowseQuery>,
) -> Response
where
    O: OfferingRepository + 'static,
    R: ReviewRepository + 'static,
{
    respond(service.colleges(&query))
}

pub(crate) async fn college_handler<O, R>(
    State(service): SharedService<O, R>,
    Path(id): Path<String>,
) -> Response
where
    O: OfferingRepository + 'static,
    R: ReviewRepository + 'static,
{
    respond(service.college(&id))
}

pub(crate) async fn college_branches_handler<O, R>(
    State(service): SharedService<O, R>,
    Path(code): Path<String>,
) -> Response
where
    O: OfferingRepository + 'static,
    R: ReviewRepository + 'static,
{
    respond(service.college_branches(&code))
}

pub(crate) async fn predict_handler<O, R>(
    State(service): SharedService<O, R>,
    payload: Result<Json<PredictionRequest>, JsonRejection>,
) -> Response
where
    O: OfferingRepository + 'static,
    R: ReviewRepository + 'static,
{
    respond(json_body(payload).and_then(|request| service.predict(&request)))
}

pub(crate) async fn choice_filling_handler<O, R>(
    State(service): SharedService<O, R>,
    payload: Result<Json<ChoiceRequest>, JsonRejection>,
) -> Response
where
    O: OfferingRepository + 'static,
    R: ReviewRepository + 'static,
{
    respond(json_body(payload).and_then(|request| service.generate_choices(&request)))
}

pub(crate) async fn submit_review_handler<O, R>(
    State(service): SharedService<O, R>,
    payload: Result<Json<ReviewSubmission>, JsonRejection>,
) -> Response
where
    O: OfferingRepository + 'static,
    R: ReviewRepository + 'static,
{
    match json_body(payload).and_then(|submission| service.submit_review(submission)) {
        Ok(review) => (StatusCode::CREATED, Json(review)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn reviews_handler<O, R>(
    State(service): SharedService<O, R>,
    Path(college_code): Path<String>,
) -> Response
where
    O: OfferingRepository + 'static,
    R: ReviewRepository + 'static,
{
    respond(service.reviews(&college_code))
}

pub(crate) async fn scholarships_handler<O, R>(State(service): SharedService<O, R>) -> Response
where
    O: OfferingRepository + 'static,
    R: ReviewRepository + 'static,
{
    Json(service.scholarships()).into_response()
}

pub(crate) async fn career_domains_handler<O, R>(State(service): SharedService<O, R>) -> Response
where
    O: OfferingRepository + 'static,
    R: ReviewRepository + 'static,
{
    Json(service.career_domains()).into_response()
}

pub(crate) async fn alternate_path_handler<O, R>(
    State(service): SharedService<O, R>,
    payload: Result<Json<AlternatePathRequest>, JsonRejection>,
) -> Response
where
    O: OfferingRepository + 'static,
    R: ReviewRepository + 'static,
{
    respond(json_body(payload).and_then(|request| service.alternate_path(&request)))
}

/// Malformed or mistyped bodies are reported like any other invalid request.
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, CounselingError> {
    payload
        .map(|Json(body)| body)
        .map_err(CounselingError::from)
}

fn respond<T: serde::Serialize>(result: Result<T, CounselingError>) -> Response {
    match result {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(err) => err.into_response(),
    }
}
