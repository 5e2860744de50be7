use super::common::*;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::counseling::guidance::InMemoryReviewStore;
use crate::counseling::requests::PredictionRequest;
use crate::counseling::router::{predict_handler, reviews_handler};
use crate::counseling::CounselingService;

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn predict_route_returns_ranked_offerings() {
    let router = router_with_service(build_service());

    let response = router
        .oneshot(post_json(
            "/api/predict",
            json!({ "cutoff": "195", "category": "OC", "preferredBranch": ["CSE"] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let entries = body.as_array().expect("array body");
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["id"], "ceg-cse-oc");
    assert_eq!(entries[0]["chance"], "High");
    assert_eq!(entries[0]["diff"], 5.0);
    assert_eq!(entries[0]["tier"], "1");
    assert_eq!(entries[0]["subTier"], "A");
    assert_eq!(entries[0]["wheelchairAccess"], true);
}

#[tokio::test]
async fn predict_route_accepts_pwd_flag_spelling() {
    let router = router_with_service(build_service());

    let response = router
        .oneshot(post_json(
            "/api/predict",
            json!({
                "cutoff": 150,
                "category": "OC",
                "isPwD": true,
                "disabilityPercentage": "45"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body.as_array().map(Vec::len), Some(5));
}

#[tokio::test]
async fn predict_route_rejects_missing_category() {
    let router = router_with_service(build_service());

    let response = router
        .oneshot(post_json("/api/predict", json!({ "cutoff": 180 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert!(body["error"].as_str().expect("message").contains("category"));
}

#[tokio::test]
async fn mistyped_body_fields_are_bad_requests() {
    let bodies = [
        ("/api/predict", json!({ "cutoff": true, "category": "OC" })),
        ("/api/predict", json!({ "cutoff": 180, "category": 5 })),
        ("/api/predict", json!({ "cutoff": 180, "category": "OC", "isPwD": "true" })),
        ("/api/choice-filling/generate", json!({ "cutoff": [180], "community": "OC" })),
        ("/api/reviews", json!({ "collegeCode": "2711", "user": "Priya", "rating": "4", "comment": "ok" })),
        ("/api/alternate-path/predict", json!({ "careerDomain": 3 })),
    ];

    for (uri, body) in bodies {
        let router = router_with_service(build_service());
        let response = router.oneshot(post_json(uri, body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        let body = read_json_body(response).await;
        assert!(body["error"].as_str().is_some(), "{uri}: {body}");
    }
}

#[tokio::test]
async fn body_that_is_not_json_is_a_bad_request() {
    let router = router_with_service(build_service());

    let response = router
        .oneshot(
            Request::post("/api/predict")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("cutoff=180"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(read_json_body(response).await["error"].is_string());
}

#[tokio::test]
async fn predict_handler_hides_store_failures() {
    let service = Arc::new(CounselingService::new(
        Arc::new(UnavailableOfferings),
        Arc::new(InMemoryReviewStore::default()),
        guidance(),
    ));
    let request = PredictionRequest {
        cutoff: Some(180.0.into()),
        category: Some("OC".to_string()),
        ..PredictionRequest::default()
    };

    let response = predict_handler::<UnavailableOfferings, InMemoryReviewStore>(
        State(service),
        Ok(axum::Json(request)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = read_json_body(response).await;
    assert_eq!(body, json!({ "error": "Server Error" }));
}

#[tokio::test]
async fn reviews_handler_hides_store_failures() {
    let service = Arc::new(CounselingService::new(
        Arc::new(UnavailableOfferings),
        Arc::new(UnavailableReviews),
        guidance(),
    ));

    let response = reviews_handler::<UnavailableOfferings, UnavailableReviews>(
        State(service),
        axum::extract::Path("2711".to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn choice_route_reports_count_and_financials() {
    let router = router_with_service(build_service());

    let response = router
        .oneshot(post_json(
            "/api/choice-filling/generate",
            json!({ "cutoff": 180, "community": "OC", "isGovtSchool": true }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["count"], 5);
    let first = &body["choices"][0];
    assert_eq!(first["probability"], json!({ "label": "Ambitious", "score": 10 }));
    assert_eq!(first["financials"]["netFee"], 0);
    assert_eq!(first["financials"]["totalFee"], 200_000);
    assert_eq!(first["placementScore"], 95);
}

#[tokio::test]
async fn choice_route_returns_empty_list() {
    let router = router_with_service(build_service());

    let response = router
        .oneshot(post_json(
            "/api/choice-filling/generate",
            json!({ "cutoff": 90, "community": "BC" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json_body(response).await,
        json!({ "count": 0, "choices": [] })
    );
}

#[tokio::test]
async fn college_route_returns_not_found() {
    let router = router_with_service(build_service());

    let response = router.oneshot(get("/api/college/nowhere")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        read_json_body(response).await,
        json!({ "error": "College not found" })
    );
}

#[tokio::test]
async fn colleges_route_filters_by_district_and_tier() {
    let router = router_with_service(build_service());

    let response = router
        .oneshot(get("/api/colleges?district=Erode&tier=2&limit=2"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let entries = body.as_array().expect("array body");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["id"], "kec-it-oc");
    assert!(entries.iter().all(|entry| entry["district"] == "Erode"));
}

#[tokio::test]
async fn filters_and_branches_routes_list_distinct_values() {
    let service = Arc::new(build_service());

    let filters = crate::counseling::counseling_router(service.clone())
        .oneshot(get("/api/filters"))
        .await
        .unwrap();
    assert_eq!(filters.status(), StatusCode::OK);
    let body = read_json_body(filters).await;
    assert_eq!(body["categories"], json!(["OC", "SC"]));

    let branches = crate::counseling::counseling_router(service)
        .oneshot(get("/api/college_branches/1"))
        .await
        .unwrap();
    assert_eq!(
        read_json_body(branches).await,
        json!(["COMPUTER SCIENCE AND ENGINEERING", "MECHANICAL ENGINEERING"])
    );
}

#[tokio::test]
async fn reviews_are_created_then_listed() {
    let service = Arc::new(build_service());

    let created = crate::counseling::counseling_router(service.clone())
        .oneshot(post_json(
            "/api/reviews",
            json!({
                "collegeCode": "2711",
                "user": "Priya",
                "rating": 4,
                "comment": "Good labs"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let review = read_json_body(created).await;
    assert_eq!(review["collegeCode"], "2711");
    assert!(review["id"].as_str().expect("id").starts_with("rev-"));

    let listed = crate::counseling::counseling_router(service)
        .oneshot(get("/api/reviews/2711"))
        .await
        .unwrap();
    assert_eq!(listed.status(), StatusCode::OK);
    let reviews = read_json_body(listed).await;
    assert_eq!(reviews.as_array().map(Vec::len), Some(1));
    assert_eq!(reviews[0]["rating"], 4);
}

#[tokio::test]
async fn review_with_out_of_range_rating_is_rejected() {
    let router = router_with_service(build_service());

    let response = router
        .oneshot(post_json(
            "/api/reviews",
            json!({ "collegeCode": "2711", "user": "Arun", "rating": 9, "comment": "?" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn scholarships_route_lists_catalog() {
    let router = router_with_service(build_service());

    let response = router.oneshot(get("/api/scholarships")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body[0]["schemeName"], "First Graduate Tuition Fee Concession");
    assert!(body[0].get("remarks").is_none());
}

#[tokio::test]
async fn unknown_career_domain_is_not_found() {
    let router = router_with_service(build_service());

    let response = router
        .oneshot(post_json(
            "/api/alternate-path/predict",
            json!({ "careerDomain": "Astronomy", "maths": 90, "physics": 80, "chemistry": 85 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
