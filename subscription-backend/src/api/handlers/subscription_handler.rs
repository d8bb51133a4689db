// src/api/handlers/subscription_handler.rs
use crate::api::dto::common::{PaginationMeta, PaginationQuery};
use crate::api::dto::subscription_dto::{
    CostQueryDto, CreateSubscriptionDto, SubscriptionDto, SubscriptionListDto, TotalCostDto,
    UpdateSubscriptionDto,
};
use crate::api::AppState;
use crate::error::{AppError, AppResult};
use crate::extractors::{RequestId, ValidatedUuid};
use crate::types::ApiResponse;
use crate::utils::error_helper::convert_validation_errors;
use axum::{
    extract::{Json, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use serde_json::json;
use tracing::{info, warn};
use validator::Validate;

// --- CRUD Handlers ---

pub async fn create_subscription_handler(
    State(app_state): State<AppState>,
    RequestId(request_id): RequestId,
    Json(payload): Json<CreateSubscriptionDto>,
) -> AppResult<impl IntoResponse> {
    payload.validate().map_err(|e| {
        convert_validation_errors(e, "subscription_handler::create_subscription")
    })?;

    let created = app_state.subscription_service.create(payload).await?;

    info!(subscription_id = %created.id, "Subscription created via API");
    Ok((
        StatusCode::CREATED,
        ApiResponse::success(SubscriptionDto::from(created), request_id),
    ))
}

pub async fn get_subscription_handler(
    State(app_state): State<AppState>,
    RequestId(request_id): RequestId,
    ValidatedUuid(id): ValidatedUuid,
) -> AppResult<ApiResponse<SubscriptionDto>> {
    let subscription = app_state.subscription_service.get_by_id(id).await?;
    Ok(ApiResponse::success(subscription.into(), request_id))
}

pub async fn list_subscriptions_handler(
    State(app_state): State<AppState>,
    RequestId(request_id): RequestId,
    Query(query): Query<PaginationQuery>,
) -> AppResult<ApiResponse<SubscriptionListDto>> {
    let (page, page_size) = query.clamped();

    let result = app_state
        .subscription_service
        .get_all(page, page_size)
        .await?;

    let list = SubscriptionListDto {
        data: result
            .subscriptions
            .into_iter()
            .map(SubscriptionDto::from)
            .collect(),
        pagination: PaginationMeta {
            page: result.page,
            page_size: result.page_size,
            total_count: result.total_count,
            total_pages: result.total_pages,
        },
    };

    Ok(ApiResponse::success(list, request_id))
}

pub async fn update_subscription_handler(
    State(app_state): State<AppState>,
    RequestId(request_id): RequestId,
    ValidatedUuid(id): ValidatedUuid,
    Json(payload): Json<UpdateSubscriptionDto>,
) -> AppResult<ApiResponse<SubscriptionDto>> {
    payload.validate().map_err(|e| {
        convert_validation_errors(e, "subscription_handler::update_subscription")
    })?;

    let updated = app_state.subscription_service.update(id, payload).await?;
    Ok(ApiResponse::success(updated.into(), request_id))
}

pub async fn delete_subscription_handler(
    State(app_state): State<AppState>,
    ValidatedUuid(id): ValidatedUuid,
) -> AppResult<impl IntoResponse> {
    app_state.subscription_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// --- 集計 ---

pub async fn total_cost_handler(
    State(app_state): State<AppState>,
    RequestId(request_id): RequestId,
    Query(query): Query<CostQueryDto>,
) -> AppResult<ApiResponse<TotalCostDto>> {
    if !query.has_valid_range() {
        warn!(from = ?query.from, to = ?query.to, "Rejected inverted cost date range");
        return Err(AppError::BadRequest(
            "invalid date range: 'from' cannot be after 'to'".to_string(),
        ));
    }

    let total_cost = app_state
        .subscription_service
        .calculate_total_cost(query.clone())
        .await?;

    let total = TotalCostDto {
        total_cost,
        currency: app_state.config.cost_currency.clone(),
        filters: query,
    };

    Ok(ApiResponse::success(total, request_id))
}

async fn health_check_handler() -> impl IntoResponse {
    axum::Json(json!({ "status": "ok" }))
}

// --- Router Setup ---

pub fn subscription_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check_handler))
        .route(
            "/api/v1/subscriptions",
            get(list_subscriptions_handler).post(create_subscription_handler),
        )
        .route("/api/v1/subscriptions/cost", get(total_cost_handler))
        .route(
            "/api/v1/subscriptions/{id}",
            get(get_subscription_handler)
                .put(update_subscription_handler)
                .delete(delete_subscription_handler),
        )
        .with_state(app_state)
}
