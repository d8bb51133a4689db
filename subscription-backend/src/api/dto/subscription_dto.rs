// src/api/dto/subscription_dto.rs
use crate::api::dto::common::PaginationMeta;
use crate::domain::subscription::Subscription;
use crate::utils::validation::common;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// --- Request DTOs ---

#[derive(Deserialize, Serialize, Debug, Clone, Validate)]
pub struct CreateSubscriptionDto {
    #[validate(
        length(
            min = common::subscription::SERVICE_NAME_MIN_LENGTH,
            max = common::subscription::SERVICE_NAME_MAX_LENGTH,
            message = "Service name must be between 2 and 100 characters"
        ),
        custom(function = common::validate_service_name)
    )]
    pub service_name: String,

    #[validate(range(
        min = common::subscription::PRICE_MIN,
        message = "Price must be at least 1"
    ))]
    pub price: i64,

    pub user_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
}

/// 省略したフィールドは既存値を保持する
#[derive(Deserialize, Serialize, Debug, Clone, Default, Validate)]
pub struct UpdateSubscriptionDto {
    #[validate(
        length(
            min = common::subscription::SERVICE_NAME_MIN_LENGTH,
            max = common::subscription::SERVICE_NAME_MAX_LENGTH,
            message = "Service name must be between 2 and 100 characters"
        ),
        custom(function = common::validate_service_name)
    )]
    pub service_name: Option<String>,

    #[validate(range(
        min = common::subscription::PRICE_MIN,
        message = "Price must be at least 1"
    ))]
    pub price: Option<i64>,

    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

/// コスト集計のクエリ（日時は RFC 3339）
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct CostQueryDto {
    pub user_id: Option<Uuid>,
    pub service_name: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl CostQueryDto {
    /// 両端が指定され `from > to` の場合は不正
    pub fn has_valid_range(&self) -> bool {
        match (self.from, self.to) {
            (Some(from), Some(to)) => from <= to,
            _ => true,
        }
    }
}

// --- Response DTOs ---

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SubscriptionDto {
    pub id: Uuid,
    pub service_name: String,
    pub price: i64,
    pub user_id: Uuid,
    pub start_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Subscription> for SubscriptionDto {
    fn from(sub: Subscription) -> Self {
        Self {
            id: sub.id,
            service_name: sub.service_name,
            price: sub.price,
            user_id: sub.user_id,
            start_date: sub.start_date,
            end_date: sub.end_date,
            created_at: sub.created_at,
            updated_at: sub.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SubscriptionListDto {
    pub data: Vec<SubscriptionDto>,
    pub pagination: PaginationMeta,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TotalCostDto {
    pub total_cost: i64,
    pub currency: String,
    pub filters: CostQueryDto,
}
