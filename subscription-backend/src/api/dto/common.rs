// subscription-backend/src/api/dto/common.rs

use crate::utils::validation::common::pagination::{
    DEFAULT_PAGE, DEFAULT_PAGE_SIZE, MAX_PAGE, MAX_PAGE_SIZE,
};
use serde::{Deserialize, Serialize};

/// 一覧取得のクエリ。範囲外の値はエラーにせず既定値へ寄せる
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl PaginationQuery {
    /// `(page, page_size)` を返す。`page < 1` は 1、`page` の上限は `MAX_PAGE`、
    /// `page_size` が 1..=100 外なら既定値
    pub fn clamped(&self) -> (u64, u64) {
        let page = match self.page {
            Some(p) if p >= 1 => (p as u64).min(MAX_PAGE),
            _ => DEFAULT_PAGE,
        };
        let page_size = match self.page_size {
            Some(s) if (1..=MAX_PAGE_SIZE as i64).contains(&s) => s as u64,
            _ => DEFAULT_PAGE_SIZE,
        };
        (page, page_size)
    }
}

/// ページネーション情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub page: u64,
    pub page_size: u64,
    pub total_count: u64,
    pub total_pages: u64,
}
