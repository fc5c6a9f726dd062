//! Page/limit resolution primitives shared by list endpoints.
//!
//! List endpoints receive pagination as raw, optional string fields. This
//! crate resolves them into a validated [`PageRequest`] against an explicit
//! [`PageDefaults`] value, so no endpoint carries its own hidden parameter
//! defaults. The resolved request exposes the offset/take pair used by the
//! persistence layer.

use serde::{Deserialize, Serialize};

/// Smallest accepted page number.
pub const PAGE_MIN: u32 = 1;
/// Largest accepted page number.
pub const PAGE_MAX: u32 = 10_000;
/// Smallest accepted page size.
pub const LIMIT_MIN: u32 = 1;
/// Largest accepted page size.
pub const LIMIT_MAX: u32 = 100;

/// Errors raised while resolving raw pagination fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// The page field is not an integer.
    #[error("page must be an integer")]
    PageNotInteger,
    /// The page field is an integer outside the accepted range.
    #[error("page must be between {min} and {max}")]
    PageOutOfRange {
        /// Smallest accepted value.
        min: u32,
        /// Largest accepted value.
        max: u32,
    },
    /// The limit field is not an integer.
    #[error("limit must be an integer")]
    LimitNotInteger,
    /// The limit field is an integer outside the accepted range.
    #[error("limit must be between {min} and {max}")]
    LimitOutOfRange {
        /// Smallest accepted value.
        min: u32,
        /// Largest accepted value.
        max: u32,
    },
}

/// Defaults applied when a pagination field is absent.
///
/// Resolved once at the validation boundary and handed to
/// [`PageRequest::resolve`]; business logic never sees an unresolved page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDefaults {
    /// Page used when the request carries no page field.
    pub page: u32,
    /// Page size used when the request carries no limit field.
    pub limit: u32,
}

impl Default for PageDefaults {
    fn default() -> Self {
        Self { page: 1, limit: 20 }
    }
}

/// A validated page/limit pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Resolve raw pagination fields against explicit defaults.
    ///
    /// Absent fields fall back to `defaults`; present fields must be
    /// numeric-looking integers. Fractional or non-numeric input is rejected,
    /// as are integers outside `[PAGE_MIN, PAGE_MAX]` / `[LIMIT_MIN,
    /// LIMIT_MAX]`. Defaults pass through the same range checks.
    ///
    /// # Errors
    ///
    /// Returns a [`PageRequestError`] naming the first offending field.
    pub fn resolve(
        raw_page: Option<&str>,
        raw_limit: Option<&str>,
        defaults: PageDefaults,
    ) -> Result<Self, PageRequestError> {
        let page = resolve_field(
            raw_page,
            defaults.page,
            PAGE_MIN,
            PAGE_MAX,
            PageRequestError::PageNotInteger,
            PageRequestError::PageOutOfRange {
                min: PAGE_MIN,
                max: PAGE_MAX,
            },
        )?;
        let limit = resolve_field(
            raw_limit,
            defaults.limit,
            LIMIT_MIN,
            LIMIT_MAX,
            PageRequestError::LimitNotInteger,
            PageRequestError::LimitOutOfRange {
                min: LIMIT_MIN,
                max: LIMIT_MAX,
            },
        )?;

        Ok(Self { page, limit })
    }

    /// Resolved page number.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Resolved page size.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of records to skip: `(page - 1) * limit`.
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.limit)
    }

    /// Number of records to take.
    pub fn take(&self) -> i64 {
        i64::from(self.limit)
    }
}

fn resolve_field(
    raw: Option<&str>,
    fallback: u32,
    min: u32,
    max: u32,
    not_integer: PageRequestError,
    out_of_range: PageRequestError,
) -> Result<u32, PageRequestError> {
    let value = match raw {
        None => i64::from(fallback),
        Some(text) => text.trim().parse::<i64>().map_err(|_| not_integer)?,
    };

    if value < i64::from(min) || value > i64::from(max) {
        return Err(out_of_range);
    }

    // Bounds are within u32 range, so the narrowing cannot fail.
    Ok(u32::try_from(value).unwrap_or(min))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn absent_fields_resolve_to_defaults() {
        let page = PageRequest::resolve(None, None, PageDefaults::default())
            .expect("defaults should resolve");

        assert_eq!(page.page(), 1);
        assert_eq!(page.limit(), 20);
        assert_eq!(page.offset(), 0);
        assert_eq!(page.take(), 20);
    }

    #[rstest]
    fn numeric_strings_are_coerced() {
        let page = PageRequest::resolve(Some("3"), Some("25"), PageDefaults::default())
            .expect("numeric strings should resolve");

        assert_eq!(page.page(), 3);
        assert_eq!(page.limit(), 25);
        assert_eq!(page.offset(), 50);
        assert_eq!(page.take(), 25);
    }

    #[rstest]
    #[case::zero_page("0")]
    #[case::negative_page("-1")]
    #[case::huge_page("10001")]
    fn out_of_range_pages_are_rejected(#[case] raw: &str) {
        let result = PageRequest::resolve(Some(raw), None, PageDefaults::default());

        assert_eq!(
            result,
            Err(PageRequestError::PageOutOfRange {
                min: PAGE_MIN,
                max: PAGE_MAX,
            })
        );
    }

    #[rstest]
    #[case::zero_limit("0")]
    #[case::over_limit("101")]
    fn out_of_range_limits_are_rejected(#[case] raw: &str) {
        let result = PageRequest::resolve(None, Some(raw), PageDefaults::default());

        assert_eq!(
            result,
            Err(PageRequestError::LimitOutOfRange {
                min: LIMIT_MIN,
                max: LIMIT_MAX,
            })
        );
    }

    #[rstest]
    #[case::fractional("1.5")]
    #[case::alphabetic("abc")]
    #[case::empty("")]
    fn non_integer_pages_are_rejected(#[case] raw: &str) {
        let result = PageRequest::resolve(Some(raw), None, PageDefaults::default());

        assert_eq!(result, Err(PageRequestError::PageNotInteger));
    }

    #[rstest]
    fn fractional_limits_are_rejected() {
        let result = PageRequest::resolve(None, Some("2.5"), PageDefaults::default());

        assert_eq!(result, Err(PageRequestError::LimitNotInteger));
    }

    #[rstest]
    fn surrounding_whitespace_is_tolerated() {
        let page = PageRequest::resolve(Some(" 2 "), Some(" 10 "), PageDefaults::default())
            .expect("padded numeric strings should resolve");

        assert_eq!(page.page(), 2);
        assert_eq!(page.limit(), 10);
    }

    #[rstest]
    fn consecutive_pages_cover_disjoint_offsets() {
        let first = PageRequest::resolve(Some("1"), Some("2"), PageDefaults::default())
            .expect("page 1 should resolve");
        let second = PageRequest::resolve(Some("2"), Some("2"), PageDefaults::default())
            .expect("page 2 should resolve");

        assert_eq!(first.offset(), 0);
        assert_eq!(second.offset(), 2);
        assert_eq!(first.take(), second.take());
    }
}
