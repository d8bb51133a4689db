// tests/common/memory_repository.rs

use async_trait::async_trait;
use std::sync::Mutex;
use subscription_backend::domain::sub_filter::SubFilter;
use subscription_backend::domain::subscription::Subscription;
use subscription_backend::repository::{RepositoryError, SubscriptionRepository};
use uuid::Uuid;

/// テスト用のインメモリリポジトリ
#[derive(Default)]
pub struct InMemorySubscriptionRepository {
    rows: Mutex<Vec<Subscription>>,
    fail_with: Mutex<Option<String>>,
}

impl InMemorySubscriptionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<Subscription>) -> Self {
        Self {
            rows: Mutex::new(rows),
            fail_with: Mutex::new(None),
        }
    }

    /// 以降の呼び出しをすべてストレージエラーにする
    pub fn fail_next_calls(&self, message: &str) {
        *self.fail_with.lock().unwrap() = Some(message.to_string());
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn check(&self) -> Result<(), RepositoryError> {
        match self.fail_with.lock().unwrap().as_ref() {
            Some(message) => Err(RepositoryError::Storage(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptionRepository {
    async fn create(&self, subscription: Subscription) -> Result<Subscription, RepositoryError> {
        self.check()?;
        self.rows.lock().unwrap().push(subscription.clone());
        Ok(subscription)
    }

    async fn update(
        &self,
        subscription: Subscription,
    ) -> Result<Option<Subscription>, RepositoryError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|row| row.id == subscription.id) {
            Some(row) => {
                row.service_name = subscription.service_name;
                row.price = subscription.price;
                row.start_date = subscription.start_date;
                row.end_date = subscription.end_date;
                row.updated_at = subscription.updated_at;
                Ok(Some(row.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|row| row.id != id);
        Ok(rows.len() < before)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Subscription>, RepositoryError> {
        self.check()?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|row| row.id == id)
            .cloned())
    }

    async fn find_all_paginated(
        &self,
        page: u64,
        page_size: u64,
    ) -> Result<(Vec<Subscription>, u64), RepositoryError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = rows.len() as u64;
        let offset = usize::try_from(page.saturating_sub(1).saturating_mul(page_size))
            .unwrap_or(usize::MAX);
        let page_rows = rows
            .into_iter()
            .skip(offset)
            .take(page_size as usize)
            .collect();

        Ok((page_rows, total))
    }

    async fn sum_cost(&self, filter: &SubFilter) -> Result<i64, RepositoryError> {
        self.check()?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|row| filter.matches(row))
            .map(|row| row.price)
            .sum())
    }
}
