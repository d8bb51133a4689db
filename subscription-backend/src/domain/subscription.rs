// src/domain/subscription.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// ドメイン不変条件の違反
///
/// `Subscription::validate` はこの順序で最初の違反を返す。
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("service name is required")]
    ServiceNameRequired,

    #[error("price must be positive")]
    PriceInvalid,

    #[error("start date is required")]
    StartDateRequired,

    #[error("end date cannot be before start date")]
    EndDateBeforeStart,
}

/// Unix epoch をゼロ値として扱う
pub fn is_zero_timestamp(ts: &DateTime<Utc>) -> bool {
    ts.timestamp() == 0 && ts.timestamp_subsec_nanos() == 0
}

/// ゼロ値の終了日は「終了日なし」に正規化する
pub fn normalize_end_date(end_date: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
    end_date.filter(|d| !is_zero_timestamp(d))
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: Uuid,
    pub service_name: String,
    /// 最小通貨単位
    pub price: i64,
    pub user_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Subscription {
    /// ID とタイムスタンプを採番し、検証済みのサブスクリプションを生成
    pub fn new(
        service_name: String,
        price: i64,
        user_id: Uuid,
        start_date: DateTime<Utc>,
        end_date: Option<DateTime<Utc>>,
    ) -> Result<Self, ValidationError> {
        let now = Utc::now();
        let subscription = Self {
            id: Uuid::new_v4(),
            service_name,
            price,
            user_id,
            start_date,
            end_date: normalize_end_date(end_date),
            created_at: now,
            updated_at: now,
        };

        subscription.validate()?;
        Ok(subscription)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.service_name.is_empty() {
            return Err(ValidationError::ServiceNameRequired);
        }

        if self.price <= 0 {
            return Err(ValidationError::PriceInvalid);
        }

        if is_zero_timestamp(&self.start_date) {
            return Err(ValidationError::StartDateRequired);
        }

        if let Some(end_date) = normalize_end_date(self.end_date) {
            if end_date < self.start_date {
                return Err(ValidationError::EndDateBeforeStart);
            }
        }

        Ok(())
    }

    /// 終了日がなければ常に有効。あれば `[start_date, end_date)` の範囲内か
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        match normalize_end_date(self.end_date) {
            None => true,
            Some(end_date) => self.start_date <= now && now < end_date,
        }
    }
}
