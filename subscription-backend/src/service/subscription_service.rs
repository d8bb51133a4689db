// src/service/subscription_service.rs

use crate::api::dto::subscription_dto::{
    CostQueryDto, CreateSubscriptionDto, UpdateSubscriptionDto,
};
use crate::domain::sub_filter::SubFilter;
use crate::domain::subscription::{normalize_end_date, Subscription, ValidationError};
use crate::repository::{RepositoryError, SubscriptionRepository};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum SubscriptionServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("subscription not found: {0}")]
    NotFound(Uuid),

    #[error("{context}: {source}")]
    Repository {
        context: &'static str,
        #[source]
        source: RepositoryError,
    },
}

type ServiceResult<T> = Result<T, SubscriptionServiceError>;

fn repository_error(context: &'static str) -> impl FnOnce(RepositoryError) -> SubscriptionServiceError {
    move |source| {
        error!(error = %source, "{}", context);
        SubscriptionServiceError::Repository { context, source }
    }
}

/// 1ページ分の一覧結果
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionPage {
    pub subscriptions: Vec<Subscription>,
    pub page: u64,
    pub page_size: u64,
    pub total_count: u64,
    pub total_pages: u64,
}

/// 境界層を経由しない呼び出しでもオーバーフローしないよう飽和させる
pub fn page_offset(page: u64, page_size: u64) -> u64 {
    page.saturating_sub(1).saturating_mul(page_size)
}

pub fn total_pages(total_count: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total_count.div_ceil(page_size)
}

/// 部分更新のマージ。指定されたフィールドだけを上書きし、`updated_at` を `now` にする
///
/// `id`・`user_id`・`created_at` は常に既存値を保持する。検証は呼び出し側で行う。
pub fn apply_partial_update(
    existing: &Subscription,
    patch: &UpdateSubscriptionDto,
    now: DateTime<Utc>,
) -> Subscription {
    let mut merged = existing.clone();

    if let Some(service_name) = &patch.service_name {
        merged.service_name = service_name.clone();
    }
    if let Some(price) = patch.price {
        merged.price = price;
    }
    if let Some(start_date) = patch.start_date {
        merged.start_date = start_date;
    }
    if patch.end_date.is_some() {
        merged.end_date = normalize_end_date(patch.end_date);
    }
    merged.updated_at = now;

    merged
}

#[derive(Clone)]
pub struct SubscriptionService {
    repo: Arc<dyn SubscriptionRepository>,
}

impl SubscriptionService {
    pub fn new(repo: Arc<dyn SubscriptionRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, payload: CreateSubscriptionDto) -> ServiceResult<Subscription> {
        debug!(
            service_name = %payload.service_name,
            user_id = %payload.user_id,
            "Creating subscription"
        );

        let subscription = Subscription::new(
            payload.service_name,
            payload.price,
            payload.user_id,
            payload.start_date,
            payload.end_date,
        )
        .inspect_err(|e| warn!(error = %e, "Subscription validation failed"))?;

        let created = self
            .repo
            .create(subscription)
            .await
            .map_err(repository_error("failed to create subscription"))?;

        info!(
            subscription_id = %created.id,
            service_name = %created.service_name,
            price = created.price,
            "Subscription created"
        );
        Ok(created)
    }

    pub async fn update(
        &self,
        id: Uuid,
        patch: UpdateSubscriptionDto,
    ) -> ServiceResult<Subscription> {
        debug!(subscription_id = %id, "Updating subscription");

        let existing = self
            .repo
            .find_by_id(id)
            .await
            .map_err(repository_error("failed to get subscription"))?
            .ok_or_else(|| {
                warn!(subscription_id = %id, "Subscription not found for update");
                SubscriptionServiceError::NotFound(id)
            })?;

        let merged = apply_partial_update(&existing, &patch, Utc::now());
        merged.validate().inspect_err(|e| {
            warn!(subscription_id = %id, error = %e, "Updated subscription is invalid")
        })?;

        let updated = self
            .repo
            .update(merged)
            .await
            .map_err(repository_error("failed to update subscription"))?
            .ok_or(SubscriptionServiceError::NotFound(id))?;

        info!(subscription_id = %id, "Subscription updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        debug!(subscription_id = %id, "Deleting subscription");

        let deleted = self
            .repo
            .delete(id)
            .await
            .map_err(repository_error("failed to delete subscription"))?;

        if !deleted {
            warn!(subscription_id = %id, "Subscription not found for delete");
            return Err(SubscriptionServiceError::NotFound(id));
        }

        info!(subscription_id = %id, "Subscription deleted");
        Ok(())
    }

    pub async fn get_by_id(&self, id: Uuid) -> ServiceResult<Subscription> {
        debug!(subscription_id = %id, "Fetching subscription");

        let subscription = self
            .repo
            .find_by_id(id)
            .await
            .map_err(repository_error("failed to get subscription"))?
            .ok_or_else(|| {
                warn!(subscription_id = %id, "Subscription not found");
                SubscriptionServiceError::NotFound(id)
            })?;

        info!(subscription_id = %id, "Subscription fetched");
        Ok(subscription)
    }

    /// `page`・`page_size` は境界層でクランプ済みであること
    pub async fn get_all(&self, page: u64, page_size: u64) -> ServiceResult<SubscriptionPage> {
        debug!(
            page,
            page_size,
            offset = page_offset(page, page_size),
            "Listing subscriptions"
        );

        let (subscriptions, total_count) = self
            .repo
            .find_all_paginated(page, page_size)
            .await
            .map_err(repository_error("failed to get subscriptions"))?;

        info!(
            count = subscriptions.len(),
            total_count, "Subscriptions listed"
        );

        Ok(SubscriptionPage {
            subscriptions,
            page,
            page_size,
            total_count,
            total_pages: total_pages(total_count, page_size),
        })
    }

    pub async fn calculate_total_cost(&self, query: CostQueryDto) -> ServiceResult<i64> {
        let filter = SubFilter::new(query.user_id, query.service_name, query.from, query.to);
        debug!(?filter, "Calculating total cost");

        let total = self
            .repo
            .sum_cost(&filter)
            .await
            .map_err(repository_error("failed to calculate total cost"))?;

        info!(total_cost = total, "Total cost calculated");
        Ok(total)
    }
}
