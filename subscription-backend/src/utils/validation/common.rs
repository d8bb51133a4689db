// subscription-backend/src/utils/validation/common.rs

//! 共通バリデーション定数
//!
//! DTO 間で共有するバリデーションルールをまとめる。

use validator::ValidationError;

/// サブスクリプション関連の制約
pub mod subscription {
    pub const SERVICE_NAME_MIN_LENGTH: u64 = 2;
    pub const SERVICE_NAME_MAX_LENGTH: u64 = 100;
    pub const PRICE_MIN: i64 = 1;
}

/// ページネーションの制約
pub mod pagination {
    pub const DEFAULT_PAGE: u64 = 1;
    pub const DEFAULT_PAGE_SIZE: u64 = 20;
    pub const MAX_PAGE_SIZE: u64 = 100;
    /// `(page - 1) * MAX_PAGE_SIZE` が PostgreSQL の OFFSET (BIGINT) に収まる上限
    pub const MAX_PAGE: u64 = i64::MAX as u64 / MAX_PAGE_SIZE;
}

/// 空白のみのサービス名を拒否
pub fn validate_service_name(service_name: &str) -> Result<(), ValidationError> {
    if service_name.trim().is_empty() {
        let mut error = ValidationError::new("blank_service_name");
        error.message = Some("Service name must not be blank".into());
        return Err(error);
    }
    Ok(())
}
