//! Pagination query schema

use serde::Serialize;
use serde_json::Value;
use validator::Validate;

use super::run_pipeline;
use crate::config::PaginationConfig;
use crate::constants::records;
use crate::error::ValidationErrors;
use crate::utils::raw::RawField;

pub(crate) const PAGE: &str = "page";
pub(crate) const SIZE: &str = "size";

/// Validated page coordinates: `page` and `size` are both at least 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageQuery {
    page: u32,
    size: u32,
}

#[derive(Validate)]
struct PageFields {
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    page: Option<u32>,

    #[validate(range(min = 1, message = "Size must be at least 1"))]
    size: Option<u32>,
}

impl PageQuery {
    /// Build from already-typed coordinates
    pub fn new(page: u32, size: u32) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_coordinates(Some(page), Some(size), &mut errors);
        errors.into_result()?;
        Ok(Self { page, size })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Number of items before this page
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.size)
    }

    /// Last page for `total` items; an empty collection still has page 1
    pub fn last_page(&self, total: u64) -> u64 {
        total.div_ceil(u64::from(self.size)).max(1)
    }
}

fn check_coordinates(page: Option<u32>, size: Option<u32>, errors: &mut ValidationErrors) {
    if let Err(field_errors) = (PageFields { page, size }).validate() {
        errors.merge_validator(records::PAGE_QUERY, &field_errors);
    }
}

/// Validate a raw `{page, size}` mapping; missing or null keys take defaults
pub fn validate_page_query(
    raw: &Value,
    config: &PaginationConfig,
) -> Result<PageQuery, ValidationErrors> {
    run_pipeline(records::PAGE_QUERY, raw, |fields, errors| {
        let page = match fields.typed::<u32>(PAGE, "a positive integer", errors) {
            RawField::Value(page) => Some(page),
            RawField::Absent | RawField::Null => Some(1),
            RawField::Invalid => None,
        };
        let size = match fields.typed::<u32>(SIZE, "a positive integer", errors) {
            RawField::Value(size) => Some(size),
            RawField::Absent | RawField::Null => Some(config.default_page_size),
            RawField::Invalid => None,
        };

        check_coordinates(page, size, errors);
        if let Some(size) = size {
            if size > config.max_page_size && !errors.has_field(SIZE) {
                errors.push(SIZE, format!("Size must be at most {}", config.max_page_size));
            }
        }

        Some(PageQuery {
            page: page?,
            size: size?,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_applied() {
        let query = validate_page_query(&json!({}), &PaginationConfig::default()).unwrap();
        assert_eq!(query.page(), 1);
        assert_eq!(query.size(), 20);
        assert_eq!(query.offset(), 0);
    }

    #[test]
    fn test_offset() {
        let query = validate_page_query(&json!({ "page": 3, "size": 10 }), &PaginationConfig::default())
            .unwrap();
        assert_eq!(query.offset(), 20);
    }

    #[test]
    fn test_rejects_zero_and_oversized() {
        let err = validate_page_query(&json!({ "page": 0, "size": 1000 }), &PaginationConfig::default())
            .unwrap_err();
        assert_eq!(err.messages_for("page"), vec!["Page must be at least 1"]);
        assert_eq!(err.messages_for("size"), vec!["Size must be at most 100"]);
    }

    #[test]
    fn test_rejects_negative_and_text() {
        let err = validate_page_query(&json!({ "page": -1, "size": "ten" }), &PaginationConfig::default())
            .unwrap_err();
        assert_eq!(err.messages_for("page"), vec!["page must be a positive integer"]);
        assert_eq!(err.messages_for("size"), vec!["size must be a positive integer"]);
    }

    #[test]
    fn test_last_page() {
        let query = PageQuery::new(1, 10).unwrap();
        assert_eq!(query.last_page(0), 1);
        assert_eq!(query.last_page(10), 1);
        assert_eq!(query.last_page(11), 2);
        assert!(PageQuery::new(0, 10).is_err());
        assert!(PageQuery::new(1, 0).is_err());
    }
}
