// src/domain/subscription_model.rs
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use super::subscription::Subscription;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subscriptions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub service_name: String,
    pub price: i64,
    pub user_id: Uuid,
    pub start_date: DateTime<Utc>,
    #[sea_orm(nullable)]
    pub end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

// ID・タイムスタンプはドメイン側で採番済みなので既定の振る舞いのまま
impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Subscription {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            service_name: model.service_name,
            price: model.price,
            user_id: model.user_id,
            start_date: model.start_date,
            end_date: model.end_date,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<Subscription> for ActiveModel {
    fn from(sub: Subscription) -> Self {
        Self {
            id: Set(sub.id),
            service_name: Set(sub.service_name),
            price: Set(sub.price),
            user_id: Set(sub.user_id),
            start_date: Set(sub.start_date),
            end_date: Set(sub.end_date),
            created_at: Set(sub.created_at),
            updated_at: Set(sub.updated_at),
        }
    }
}
