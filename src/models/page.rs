use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::ValidationError;

pub const DEFAULT_PAGE_LIMIT: i64 = 10;
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Raw `limit`/`offset`/`search` query parameters.
///
/// Kept as strings so malformed numbers surface as `INVALID_PAGINATION`
/// rather than a generic query rejection.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Page size, 1..=100 (default 10).
    pub limit: Option<String>,
    /// Rows to skip (default 0).
    pub offset: Option<String>,
    /// Case-insensitive substring filter, where the listing supports one.
    pub search: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
        }
    }
}

impl PageQuery {
    pub fn page(&self) -> Result<Page, ValidationError> {
        let limit = parse_param(self.limit.as_deref())?.unwrap_or(DEFAULT_PAGE_LIMIT);
        let offset = parse_param(self.offset.as_deref())?.unwrap_or(0);
        Ok(Page {
            limit: limit.clamp(1, MAX_PAGE_LIMIT),
            offset: offset.max(0),
        })
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

fn parse_param(raw: Option<&str>) -> Result<Option<i64>, ValidationError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ValidationError::InvalidPagination),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn query(limit: Option<&str>, offset: Option<&str>) -> PageQuery {
        PageQuery {
            limit: limit.map(Into::into),
            offset: offset.map(Into::into),
            search: None,
        }
    }

    #[rstest]
    #[case(None, None, Page { limit: 10, offset: 0 })]
    #[case(Some("3"), Some("2"), Page { limit: 3, offset: 2 })]
    #[case(Some("500"), None, Page { limit: 100, offset: 0 })]
    #[case(Some("0"), Some("-4"), Page { limit: 1, offset: 0 })]
    #[case(Some(" "), Some(""), Page { limit: 10, offset: 0 })]
    fn page_defaults_and_clamps(
        #[case] limit: Option<&str>,
        #[case] offset: Option<&str>,
        #[case] expected: Page,
    ) {
        assert_eq!(query(limit, offset).page(), Ok(expected));
    }

    #[rstest]
    #[case(Some("ten"), None)]
    #[case(None, Some("1.5"))]
    fn malformed_numbers_are_rejected(#[case] limit: Option<&str>, #[case] offset: Option<&str>) {
        assert_eq!(
            query(limit, offset).page(),
            Err(ValidationError::InvalidPagination)
        );
    }

    #[test]
    fn blank_search_is_ignored() {
        let q = PageQuery {
            search: Some("   ".into()),
            ..PageQuery::default()
        };
        assert_eq!(q.search(), None);
    }
}
