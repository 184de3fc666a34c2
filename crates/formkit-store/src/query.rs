//! List queries over submissions: parameters, search, ordering, and page
//! slicing.

use formkit_core::{FormError, FormResult};
use serde::Serialize;
use serde_json::Value;

use crate::submission::Submission;

/// Largest page size a list query may request.
pub const MAX_PAGE_SIZE: usize = 100;

/// Page returned when none is requested.
pub const DEFAULT_PAGE: usize = 1;

/// Page size used when none is requested.
pub const DEFAULT_LIMIT: usize = 10;

/// The only sort key that reorders results.
pub const SORT_BY_CREATED_AT: &str = "createdAt";

/// Direction for `createdAt` ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Oldest first.
    Asc,
    /// Newest first.
    #[default]
    Desc,
}

impl SortOrder {
    /// Reads a query-string value: exactly `"asc"` is ascending, anything
    /// else is descending.
    pub fn from_param(value: &str) -> Self {
        if value == "asc" {
            Self::Asc
        } else {
            Self::Desc
        }
    }
}

/// Parameters of a list or export query.
///
/// # Examples
///
/// ```
/// use formkit_store::query::{ListParams, SortOrder};
///
/// let params = ListParams::new().page(2).limit(5).sort_order(SortOrder::Asc);
/// assert_eq!(params.page, 2);
/// assert_eq!(params.sort_by, "createdAt");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    /// The page number (1-indexed).
    pub page: usize,
    /// Items per page, `1..=MAX_PAGE_SIZE`.
    pub limit: usize,
    /// Sort key. Only `"createdAt"` reorders; other keys keep insertion order.
    pub sort_by: String,
    /// Sort direction.
    pub sort_order: SortOrder,
    /// Case-insensitive text that some data value must contain.
    pub search: Option<String>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            sort_by: SORT_BY_CREATED_AT.to_string(),
            sort_order: SortOrder::Desc,
            search: None,
        }
    }
}

impl ListParams {
    /// Creates parameters with the defaults: page 1, limit 10, newest first.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page number.
    #[must_use]
    pub const fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    /// Sets the page size.
    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Sets the sort key.
    #[must_use]
    pub fn sort_by(mut self, key: impl Into<String>) -> Self {
        self.sort_by = key.into();
        self
    }

    /// Sets the sort direction.
    #[must_use]
    pub const fn sort_order(mut self, order: SortOrder) -> Self {
        self.sort_order = order;
        self
    }

    /// Sets the search text.
    #[must_use]
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    /// Checks `page >= 1` and `1 <= limit <= MAX_PAGE_SIZE`.
    pub fn check(&self) -> FormResult<()> {
        if self.page < 1 || self.limit < 1 || self.limit > MAX_PAGE_SIZE {
            return Err(FormError::BadRequest(
                "Invalid pagination parameters".to_string(),
            ));
        }
        Ok(())
    }
}

/// One page of a list query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPage {
    /// The submissions on this page.
    pub data: Vec<Submission>,
    /// Number of submissions matching the query across all pages.
    pub total: usize,
    /// The requested page number.
    pub page: usize,
    /// The requested page size.
    pub limit: usize,
    /// `ceil(total / limit)`, zero when nothing matches.
    pub total_pages: usize,
}

impl SubmissionPage {
    /// Slices `all` to the requested page. A page past the end is empty,
    /// not an error. `limit` must be non-zero.
    pub fn paginate(all: Vec<Submission>, page: usize, limit: usize) -> Self {
        let total = all.len();
        let total_pages = total.div_ceil(limit);
        let start = page.saturating_sub(1).saturating_mul(limit);
        let data = all.into_iter().skip(start).take(limit).collect();

        Self {
            data,
            total,
            page,
            limit,
            total_pages,
        }
    }
}

/// Keeps the submissions with a data value containing `search`,
/// case-insensitively. An empty or absent search keeps everything.
pub fn apply_search(submissions: Vec<Submission>, search: Option<&str>) -> Vec<Submission> {
    let Some(query) = search.filter(|q| !q.is_empty()) else {
        return submissions;
    };
    let query_lower = query.to_lowercase();
    submissions
        .into_iter()
        .filter(|s| s.data.values().any(|v| value_contains(v, &query_lower)))
        .collect()
}

/// Orders `submissions` in place. Sorting is stable, so submissions with
/// equal timestamps keep their insertion order.
pub fn apply_ordering(submissions: &mut [Submission], sort_by: &str, order: SortOrder) {
    if sort_by != SORT_BY_CREATED_AT {
        return;
    }
    match order {
        SortOrder::Asc => submissions.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortOrder::Desc => submissions.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }
}

fn value_contains(value: &Value, query_lower: &str) -> bool {
    match value {
        Value::String(s) => s.to_lowercase().contains(query_lower),
        Value::Number(n) => n.to_string().contains(query_lower),
        Value::Bool(b) => b.to_string().contains(query_lower),
        Value::Array(items) => items.iter().any(|v| value_contains(v, query_lower)),
        Value::Object(map) => map.values().any(|v| value_contains(v, query_lower)),
        Value::Null => false,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone, Utc};
    use serde_json::json;

    use super::*;

    fn submission(id: u64, offset_secs: i64, data: Value) -> Submission {
        Submission {
            id,
            data: data.as_object().cloned().unwrap(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
                + TimeDelta::seconds(offset_secs),
        }
    }

    fn ids(submissions: &[Submission]) -> Vec<u64> {
        submissions.iter().map(|s| s.id).collect()
    }

    #[test]
    fn test_list_params_default() {
        let params = ListParams::default();
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, 10);
        assert_eq!(params.sort_by, "createdAt");
        assert_eq!(params.sort_order, SortOrder::Desc);
        assert!(params.search.is_none());
    }

    #[test]
    fn test_sort_order_from_param() {
        assert_eq!(SortOrder::from_param("asc"), SortOrder::Asc);
        assert_eq!(SortOrder::from_param("desc"), SortOrder::Desc);
        assert_eq!(SortOrder::from_param("ASC"), SortOrder::Desc);
        assert_eq!(SortOrder::from_param(""), SortOrder::Desc);
    }

    #[test]
    fn test_check_bounds() {
        assert!(ListParams::new().check().is_ok());
        assert!(ListParams::new().limit(100).check().is_ok());
        for bad in [
            ListParams::new().page(0),
            ListParams::new().limit(0),
            ListParams::new().limit(101),
        ] {
            let err = bad.check().unwrap_err();
            assert_eq!(err.to_string(), "Invalid pagination parameters");
            assert_eq!(err.status_code(), 400);
        }
    }

    #[test]
    fn test_paginate_second_page_of_fifteen() {
        let all: Vec<_> = (1..=15).map(|i| submission(i, 0, json!({}))).collect();
        let page = SubmissionPage::paginate(all, 2, 10);
        assert_eq!(page.data.len(), 5);
        assert_eq!(page.total, 15);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.data[0].id, 11);
    }

    #[test]
    fn test_paginate_past_end_is_empty() {
        let all: Vec<_> = (1..=3).map(|i| submission(i, 0, json!({}))).collect();
        let page = SubmissionPage::paginate(all, 5, 10);
        assert!(page.data.is_empty());
        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page, 5);
    }

    #[test]
    fn test_paginate_empty() {
        let page = SubmissionPage::paginate(Vec::new(), 1, 10);
        assert_eq!(page.total_pages, 0);
        assert_eq!(
            serde_json::to_value(&page).unwrap(),
            json!({"data": [], "total": 0, "page": 1, "limit": 10, "totalPages": 0})
        );
    }

    #[test]
    fn test_ordering_is_stable() {
        let mut subs = vec![
            submission(1, 10, json!({})),
            submission(2, 5, json!({})),
            submission(3, 10, json!({})),
            submission(4, 0, json!({})),
        ];
        apply_ordering(&mut subs, "createdAt", SortOrder::Desc);
        assert_eq!(ids(&subs), vec![1, 3, 2, 4]);
        apply_ordering(&mut subs, "createdAt", SortOrder::Asc);
        assert_eq!(ids(&subs), vec![4, 2, 1, 3]);
    }

    #[test]
    fn test_other_sort_key_keeps_order() {
        let mut subs = vec![submission(1, 10, json!({})), submission(2, 0, json!({}))];
        apply_ordering(&mut subs, "name", SortOrder::Asc);
        assert_eq!(ids(&subs), vec![1, 2]);
    }

    #[test]
    fn test_search_matches_strings_numbers_and_arrays() {
        let subs = vec![
            submission(1, 0, json!({"name": "Grace Hopper", "age": 85})),
            submission(2, 0, json!({"name": "Alan", "interests": ["Music", "travel"]})),
            submission(3, 0, json!({"name": "Edsger", "newsletter": true})),
        ];
        assert_eq!(ids(&apply_search(subs.clone(), Some("hopper"))), vec![1]);
        assert_eq!(ids(&apply_search(subs.clone(), Some("MUSIC"))), vec![2]);
        assert_eq!(ids(&apply_search(subs.clone(), Some("85"))), vec![1]);
        assert_eq!(ids(&apply_search(subs.clone(), Some("true"))), vec![3]);
        assert_eq!(ids(&apply_search(subs.clone(), Some(""))), vec![1, 2, 3]);
        assert_eq!(ids(&apply_search(subs, None)), vec![1, 2, 3]);
    }

    #[test]
    fn test_search_does_not_match_keys() {
        let subs = vec![submission(1, 0, json!({"name": "Ada"}))];
        assert!(apply_search(subs, Some("name")).is_empty());
    }
}
