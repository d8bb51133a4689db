// tests/integration/subscriptions/pagination_tests.rs

use axum::http::StatusCode;
use tower::ServiceExt;

use crate::common::{app_helper, memory_repository::InMemorySubscriptionRepository, request, test_data};

fn app_with(count: usize) -> axum::Router {
    let (app, _repo) = app_helper::setup_app_with(InMemorySubscriptionRepository::with_rows(
        test_data::many_subscriptions(count),
    ));
    app
}

#[tokio::test]
async fn test_list_uses_default_pagination() {
    let res = app_with(45)
        .oneshot(request::empty_request("GET", "/api/v1/subscriptions"))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = request::body_json(res).await;
    let pagination = &body["data"]["pagination"];
    assert_eq!(pagination["page"], 1);
    assert_eq!(pagination["page_size"], 20);
    assert_eq!(pagination["total_count"], 45);
    assert_eq!(pagination["total_pages"], 3);
    assert_eq!(body["data"]["data"].as_array().unwrap().len(), 20);
}

#[tokio::test]
async fn test_list_is_ordered_by_created_at_desc() {
    let res = app_with(3)
        .oneshot(request::empty_request("GET", "/api/v1/subscriptions"))
        .await
        .unwrap();

    let body = request::body_json(res).await;
    let names: Vec<&str> = body["data"]["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["service_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Service 2", "Service 1", "Service 0"]);
}

#[tokio::test]
async fn test_list_last_page() {
    let res = app_with(45)
        .oneshot(request::empty_request(
            "GET",
            "/api/v1/subscriptions?page=3&page_size=20",
        ))
        .await
        .unwrap();

    let body = request::body_json(res).await;
    assert_eq!(body["data"]["data"].as_array().unwrap().len(), 5);
    assert_eq!(body["data"]["pagination"]["page"], 3);
}

#[tokio::test]
async fn test_list_clamps_out_of_range_values() {
    let res = app_with(5)
        .oneshot(request::empty_request(
            "GET",
            "/api/v1/subscriptions?page=0&page_size=500",
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = request::body_json(res).await;
    assert_eq!(body["data"]["pagination"]["page"], 1);
    assert_eq!(body["data"]["pagination"]["page_size"], 20);
}

#[tokio::test]
async fn test_list_empty() {
    let res = app_with(0)
        .oneshot(request::empty_request("GET", "/api/v1/subscriptions"))
        .await
        .unwrap();

    let body = request::body_json(res).await;
    assert_eq!(body["data"]["pagination"]["total_count"], 0);
    assert_eq!(body["data"]["pagination"]["total_pages"], 0);
    assert!(body["data"]["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_list_with_oversized_page_returns_empty_page() {
    let res = app_with(3)
        .oneshot(request::empty_request(
            "GET",
            "/api/v1/subscriptions?page=9223372036854775807&page_size=100",
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = request::body_json(res).await;
    assert_eq!(
        body["data"]["pagination"]["page"],
        i64::MAX as u64 / 100
    );
    assert_eq!(body["data"]["pagination"]["page_size"], 100);
    assert_eq!(body["data"]["pagination"]["total_count"], 3);
    assert!(body["data"]["data"].as_array().unwrap().is_empty());
}
