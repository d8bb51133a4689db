// src/repository/subscription_repository.rs
use async_trait::async_trait;
use mockall::automock;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, Unchanged,
};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::sub_filter::SubFilter;
use crate::domain::subscription::Subscription;
use crate::domain::subscription_model::{
    self, ActiveModel as SubscriptionActiveModel, Entity as SubscriptionEntity,
};

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] DbErr),

    /// SQL 以外のバックエンド用
    #[error("storage error: {0}")]
    Storage(String),
}

/// サブスクリプションの永続化ポート
#[automock]
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    async fn create(&self, subscription: Subscription) -> Result<Subscription, RepositoryError>;

    /// 該当行がなければ `None`
    async fn update(
        &self,
        subscription: Subscription,
    ) -> Result<Option<Subscription>, RepositoryError>;

    /// 削除された行がなければ `false`
    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Subscription>, RepositoryError>;

    /// `created_at` 降順のページと全件数
    async fn find_all_paginated(
        &self,
        page: u64,
        page_size: u64,
    ) -> Result<(Vec<Subscription>, u64), RepositoryError>;

    async fn sum_cost(&self, filter: &SubFilter) -> Result<i64, RepositoryError>;
}

pub struct SeaOrmSubscriptionRepository {
    db: DatabaseConnection,
}

impl SeaOrmSubscriptionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn cost_conditions(filter: &SubFilter) -> Condition {
        let mut conditions = Condition::all();

        if let Some(user_id) = filter.user_id {
            conditions = conditions.add(subscription_model::Column::UserId.eq(user_id));
        }

        if let Some(service_name) = &filter.service_name {
            conditions =
                conditions.add(subscription_model::Column::ServiceName.eq(service_name.as_str()));
        }

        // from は開始日、to は終了日に適用（終了日 NULL の行は to に一致しない）
        if let Some(from) = filter.from {
            conditions = conditions.add(subscription_model::Column::StartDate.gte(from));
        }

        if let Some(to) = filter.to {
            conditions = conditions.add(subscription_model::Column::EndDate.lte(to));
        }

        conditions
    }
}

#[async_trait]
impl SubscriptionRepository for SeaOrmSubscriptionRepository {
    async fn create(&self, subscription: Subscription) -> Result<Subscription, RepositoryError> {
        let active_model: SubscriptionActiveModel = subscription.into();
        let model = active_model.insert(&self.db).await?;
        Ok(model.into())
    }

    async fn update(
        &self,
        subscription: Subscription,
    ) -> Result<Option<Subscription>, RepositoryError> {
        // user_id と created_at は不変なので更新対象に含めない
        let active_model = SubscriptionActiveModel {
            id: Unchanged(subscription.id),
            service_name: Set(subscription.service_name),
            price: Set(subscription.price),
            start_date: Set(subscription.start_date),
            end_date: Set(subscription.end_date),
            updated_at: Set(subscription.updated_at),
            ..Default::default()
        };

        match active_model.update(&self.db).await {
            Ok(model) => Ok(Some(model.into())),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let result = SubscriptionEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Subscription>, RepositoryError> {
        let model = SubscriptionEntity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn find_all_paginated(
        &self,
        page: u64,
        page_size: u64,
    ) -> Result<(Vec<Subscription>, u64), RepositoryError> {
        let offset = page.saturating_sub(1).saturating_mul(page_size);

        let models = SubscriptionEntity::find()
            .order_by(subscription_model::Column::CreatedAt, Order::Desc)
            .limit(page_size)
            .offset(offset)
            .all(&self.db)
            .await?;

        let total_count = SubscriptionEntity::find().count(&self.db).await?;

        Ok((models.into_iter().map(Into::into).collect(), total_count))
    }

    async fn sum_cost(&self, filter: &SubFilter) -> Result<i64, RepositoryError> {
        // SUM(bigint) は numeric を返すので BIGINT にキャスト
        let total = SubscriptionEntity::find()
            .select_only()
            .column_as(
                Expr::cust("CAST(COALESCE(SUM(price), 0) AS BIGINT)"),
                "total",
            )
            .filter(Self::cost_conditions(filter))
            .into_tuple::<i64>()
            .one(&self.db)
            .await?;

        Ok(total.unwrap_or(0))
    }
}
