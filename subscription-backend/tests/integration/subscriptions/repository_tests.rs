// tests/integration/subscriptions/repository_tests.rs
//
// PostgreSQL コンテナを起動するため Docker が必要

use axum::http::StatusCode;
use chrono::Duration;
use subscription_backend::domain::sub_filter::SubFilter;
use subscription_backend::domain::subscription::Subscription;
use subscription_backend::repository::{SeaOrmSubscriptionRepository, SubscriptionRepository};
use tower::ServiceExt;
use uuid::Uuid;

use crate::common::{app_helper, db::TestDatabase, request, test_data};
use crate::common::test_data::date;

async fn setup_repository() -> (SeaOrmSubscriptionRepository, TestDatabase) {
    let db = TestDatabase::new().await;
    (SeaOrmSubscriptionRepository::new(db.connection.clone()), db)
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_find_update_delete() {
    let (repo, _db) = setup_repository().await;
    let sub = Subscription::new(
        "Yandex Plus".into(),
        400,
        Uuid::new_v4(),
        date(2025, 7, 1),
        Some(date(2025, 12, 31)),
    )
    .unwrap();
    let id = sub.id;

    let created = repo.create(sub.clone()).await.unwrap();
    assert_eq!(created.id, id);
    assert_eq!(created.price, 400);

    let found = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(found.service_name, "Yandex Plus");
    assert_eq!(found.end_date, Some(date(2025, 12, 31)));

    let mut changed = found.clone();
    changed.price = 599;
    changed.end_date = None;
    changed.updated_at = found.updated_at + Duration::seconds(10);
    let updated = repo.update(changed).await.unwrap().unwrap();
    assert_eq!(updated.price, 599);
    assert_eq!(updated.end_date, None);
    assert_eq!(updated.user_id, found.user_id);
    assert_eq!(updated.created_at, found.created_at);

    assert!(repo.delete(id).await.unwrap());
    assert!(repo.find_by_id(id).await.unwrap().is_none());
    assert!(!repo.delete(id).await.unwrap());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_missing_row_returns_none() {
    let (repo, _db) = setup_repository().await;
    let sub = Subscription::new("Netflix".into(), 599, Uuid::new_v4(), date(2025, 1, 1), None)
        .unwrap();

    assert!(repo.update(sub).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_find_all_paginated_orders_by_created_at_desc() {
    let (repo, _db) = setup_repository().await;
    for sub in test_data::many_subscriptions(25) {
        repo.create(sub).await.unwrap();
    }

    let (first, total) = repo.find_all_paginated(1, 20).await.unwrap();
    assert_eq!(total, 25);
    assert_eq!(first.len(), 20);
    assert_eq!(first[0].service_name, "Service 24");
    assert!(first
        .windows(2)
        .all(|pair| pair[0].created_at >= pair[1].created_at));

    let (second, _) = repo.find_all_paginated(2, 20).await.unwrap();
    assert_eq!(second.len(), 5);
    assert_eq!(second[4].service_name, "Service 0");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_sum_cost_filters() {
    let (repo, _db) = setup_repository().await;
    let (u1, u2, rows) = test_data::cost_fixture();
    for sub in rows {
        repo.create(sub).await.unwrap();
    }

    let all = repo.sum_cost(&SubFilter::default()).await.unwrap();
    assert_eq!(all, 600);

    let by_user = repo
        .sum_cost(&SubFilter::new(Some(u1), None, None, None))
        .await
        .unwrap();
    assert_eq!(by_user, 300);

    let from = repo
        .sum_cost(&SubFilter::new(None, None, Some(date(2024, 1, 10)), None))
        .await
        .unwrap();
    assert_eq!(from, 500);

    let by_service = repo
        .sum_cost(&SubFilter::new(Some(u2), Some("C".into()), None, None))
        .await
        .unwrap();
    assert_eq!(by_service, 300);

    // 終了日のない行は to に一致しない
    let to = repo
        .sum_cost(&SubFilter::new(None, None, None, Some(date(2030, 1, 1))))
        .await
        .unwrap();
    assert_eq!(to, 0);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_sum_cost_to_bound_applies_to_end_date() {
    let (repo, _db) = setup_repository().await;
    let user_id = Uuid::new_v4();
    for (price, end) in [(100, date(2024, 3, 1)), (200, date(2024, 6, 1))] {
        let sub = Subscription::new("Spotify".into(), price, user_id, date(2024, 1, 1), Some(end))
            .unwrap();
        repo.create(sub).await.unwrap();
    }

    let total = repo
        .sum_cost(&SubFilter::new(None, None, None, Some(date(2024, 3, 1))))
        .await
        .unwrap();
    assert_eq!(total, 100);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_api_against_postgres() {
    let (app, _db) = app_helper::setup_db_app().await;

    let res = app
        .clone()
        .oneshot(request::json_request(
            "POST",
            "/api/v1/subscriptions",
            &test_data::create_test_subscription_body(),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created = request::body_json(res).await;
    let id = created["data"]["id"].as_str().unwrap();

    let res = app
        .clone()
        .oneshot(request::empty_request(
            "GET",
            &format!("/api/v1/subscriptions/{}", id),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .oneshot(request::empty_request("GET", "/api/v1/subscriptions/cost"))
        .await
        .unwrap();
    let body = request::body_json(res).await;
    assert_eq!(body["data"]["total_cost"], 400);
}
