//! Lenient query-string and path parsing.
//!
//! Numbers are read the way browsers' `parseInt` reads them: leading
//! whitespace, an optional sign, then as many digits as are present.
//! Anything unreadable falls back to the default.

use formkit_core::FormResult;
use formkit_store::query::{ListParams, SortOrder, DEFAULT_LIMIT, DEFAULT_PAGE, SORT_BY_CREATED_AT};
use formkit_store::ExportFormat;
use serde::Deserialize;

/// Query string of `GET /api/submissions`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub search: Option<String>,
}

impl ListQuery {
    /// Converts to checked [`ListParams`]. Unreadable numbers take their
    /// defaults; readable ones out of range fail with
    /// `"Invalid pagination parameters"`.
    pub fn into_params(self) -> FormResult<ListParams> {
        let params = self.into_unchecked_params();
        params.check()?;
        Ok(params)
    }

    fn into_unchecked_params(self) -> ListParams {
        let page = number_or(self.page.as_deref(), DEFAULT_PAGE);
        let limit = number_or(self.limit.as_deref(), DEFAULT_LIMIT);
        let sort_order = self
            .sort_order
            .as_deref()
            .map_or(SortOrder::Desc, SortOrder::from_param);

        let mut params = ListParams::new()
            .page(page)
            .limit(limit)
            .sort_by(self.sort_by.unwrap_or_else(|| SORT_BY_CREATED_AT.to_string()))
            .sort_order(sort_order);
        if let Some(search) = self.search.filter(|s| !s.is_empty()) {
            params = params.search(search);
        }
        params
    }
}

/// Query string of `GET /api/submissions/export`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportQuery {
    pub format: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub search: Option<String>,
}

impl ExportQuery {
    /// Splits into the export format (CSV when absent) and the ordering and
    /// search parameters. Pagination does not apply to exports.
    pub fn into_parts(self) -> FormResult<(ExportFormat, ListParams)> {
        let format = match self.format.as_deref() {
            None | Some("") => ExportFormat::default(),
            Some(name) => name.parse()?,
        };
        let list = ListQuery {
            page: None,
            limit: None,
            sort_by: self.sort_by,
            sort_order: self.sort_order,
            search: self.search,
        };
        Ok((format, list.into_unchecked_params()))
    }
}

/// Reads a submission id from a path segment. Unreadable or negative ids
/// yield `None`, which handlers treat as a missing submission.
pub fn parse_id(raw: &str) -> Option<u64> {
    parse_leading_int(raw).and_then(|n| u64::try_from(n).ok())
}

/// Parses the leading integer of `raw`, ignoring any trailing text.
///
/// ```
/// use formkit_api::params::parse_leading_int;
///
/// assert_eq!(parse_leading_int("12abc"), Some(12));
/// assert_eq!(parse_leading_int(" -3"), Some(-3));
/// assert_eq!(parse_leading_int("abc"), None);
/// ```
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude: i64 = digits[..end].parse().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

fn number_or(raw: Option<&str>, default: usize) -> usize {
    match raw.and_then(parse_leading_int) {
        None => default,
        // Negative values map to zero so the range check rejects them.
        Some(n) => usize::try_from(n).unwrap_or(0),
    }
}
