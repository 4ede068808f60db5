//! HTTP Boundary
//!
//! axum router, DTOs and error mapping. The boundary only translates
//! between the wire and the use cases; no business rules live here.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::error::CoreError;

pub use router::build_router;

/// Common `?offset&limit` pagination parameters
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub offset: Option<i32>,
    pub limit: Option<i32>,
}

impl PageParams {
    /// Validate both parameters as non-negative, applying the defaults
    /// offset=0, limit=1
    pub fn validated(&self) -> Result<(u64, u64), CoreError> {
        let offset = self.offset.unwrap_or(0);
        let limit = self.limit.unwrap_or(1);

        if offset < 0 {
            return Err(CoreError::invalid("offset must be non-negative"));
        }
        if limit < 0 {
            return Err(CoreError::invalid("limit must be non-negative"));
        }

        Ok((offset as u64, limit as u64))
    }
}

/// Parse a positive u64 identifier from a path or query segment
pub(crate) fn parse_id(raw: &str, name: &str) -> Result<u64, CoreError> {
    let id: u64 = raw
        .parse()
        .map_err(|_| CoreError::invalid(format!("{name} must be a positive integer")))?;

    if id == 0 {
        return Err(CoreError::invalid(format!("{name} must be positive")));
    }

    Ok(id)
}

/// Parse a `YYYY-MM-DD` date
pub(crate) fn parse_date(raw: &str, name: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| CoreError::invalid(format!("{name} must be a YYYY-MM-DD date")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_params() {
        assert_eq!(PageParams::default().validated().unwrap(), (0, 1));

        let page = PageParams {
            offset: Some(4),
            limit: Some(20),
        };
        assert_eq!(page.validated().unwrap(), (4, 20));

        let negative = PageParams {
            offset: Some(-1),
            limit: None,
        };
        assert!(negative.validated().is_err());
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42", "courier_id").unwrap(), 42);
        assert!(parse_id("0", "courier_id").is_err());
        assert!(parse_id("-5", "courier_id").is_err());
        assert!(parse_id("abc", "courier_id").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2026-07-12", "date").unwrap(),
            NaiveDate::from_ymd_opt(2026, 7, 12).unwrap()
        );
        assert!(parse_date("12.07.2026", "date").is_err());
    }
}
