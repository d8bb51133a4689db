// src/domain/sub_filter.rs
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::subscription::{is_zero_timestamp, Subscription};

/// コスト集計用のフィルタ。`None` の次元は制約なし
///
/// `from` は `start_date` の下限、`to` は `end_date` の上限に適用される。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubFilter {
    pub user_id: Option<Uuid>,
    pub service_name: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl SubFilter {
    /// 空文字列とゼロ値の日時は「指定なし」として扱う
    pub fn new(
        user_id: Option<Uuid>,
        service_name: Option<String>,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            user_id,
            service_name: service_name.filter(|name| !name.is_empty()),
            from: from.filter(|d| !is_zero_timestamp(d)),
            to: to.filter(|d| !is_zero_timestamp(d)),
        }
    }

    /// ストレージに依存しない述語評価（インメモリ実装とテストで使用）
    ///
    /// `to` が指定された場合、終了日のない行は一致しない。
    pub fn matches(&self, subscription: &Subscription) -> bool {
        if let Some(user_id) = self.user_id {
            if subscription.user_id != user_id {
                return false;
            }
        }
        if let Some(service_name) = &self.service_name {
            if &subscription.service_name != service_name {
                return false;
            }
        }
        if let Some(from) = self.from {
            if subscription.start_date < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            match subscription.end_date {
                Some(end_date) if end_date <= to => {}
                _ => return false,
            }
        }
        true
    }
}
