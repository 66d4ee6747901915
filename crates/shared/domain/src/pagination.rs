//! Pagination contract for list endpoints.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_PAGE_NUMBER;
use crate::error::{DomainError, DomainResult};

/// Largest offset a SQL store accepts (signed 64-bit).
pub const MAX_OFFSET: u64 = i64::MAX as u64;

/// Pagination metadata computed for a list request.
///
/// `total` is the number of rows matching the filters before any
/// offset/limit is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Pagination {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub offset: u64,
    pub page_count: u64,
}

impl Pagination {
    /// Resolve the requested page and limit against the matching row count.
    ///
    /// A page below 1 resolves to 1. A limit below 1 resolves to
    /// `default_limit`, which must then parse as a positive integer.
    /// The offset is capped at [`MAX_OFFSET`]; such a page is simply empty.
    pub fn new(total: u64, page: i64, limit: i64, default_limit: &str) -> DomainResult<Self> {
        let limit = if limit > 0 {
            limit as u64
        } else {
            parse_default_limit(default_limit)?
        };
        let page = if page > 0 {
            page as u64
        } else {
            DEFAULT_PAGE_NUMBER
        };

        Ok(Self {
            total,
            page,
            limit,
            offset: (page - 1).saturating_mul(limit).min(MAX_OFFSET),
            page_count: total.div_ceil(limit),
        })
    }

    /// Rows to skip
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Maximum rows to return
    pub fn limit(&self) -> u64 {
        self.limit
    }
}

fn parse_default_limit(raw: &str) -> DomainResult<u64> {
    match raw.trim().parse::<i64>() {
        Ok(value) if value > 0 => Ok(value as u64),
        Ok(value) => Err(DomainError::invalid_pagination(format!(
            "default page size must be positive, got {}",
            value
        ))),
        Err(_) => Err(DomainError::invalid_pagination(format!(
            "default page size '{}' is not a number",
            raw
        ))),
    }
}
