//! Pagination utilities for FreshBooks list responses.

use serde::{Deserialize, Serialize};

/// Pagination metadata of a list response.
///
/// Derived from the `page`, `pages`, `per_page` and `total` fields of the
/// list envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page number (1-indexed).
    pub page: u32,
    /// Total number of pages.
    pub pages: u32,
    /// Number of items per page (`per_page` on the wire).
    #[serde(rename = "per_page")]
    pub size: u32,
    /// Total number of items across all pages.
    pub total: u64,
}

impl Pagination {
    /// Whether there is a page after this one.
    pub fn has_more(&self) -> bool {
        self.page < self.pages
    }
}

/// A page of results from the FreshBooks API.
#[derive(Debug, Clone, Serialize)]
#[serde(bound = "T: Serialize")]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Pagination metadata from the envelope.
    pub pages: Pagination,
}

impl<T> Page<T> {
    /// Create a new page from items and pagination info.
    #[must_use]
    pub fn new(items: Vec<T>, pages: Pagination) -> Self {
        Self { items, pages }
    }

    /// Map the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            pages: self.pages,
        }
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Query parameters for list requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Number of items per page.
    pub per_page: Option<u32>,
    /// Related objects to include, e.g. `"lines"`.
    pub includes: Vec<String>,
}

impl ListParams {
    /// Create list params for a specific page.
    #[must_use]
    pub fn for_page(page: u32, per_page: u32) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
            includes: Vec::new(),
        }
    }

    /// Request an included relation (`include[]=<name>`).
    #[must_use]
    pub fn include(mut self, name: impl Into<String>) -> Self {
        self.includes.push(name.into());
        self
    }

    /// Render as query string pairs.
    ///
    /// `include[]` repeats, which the urlencoded serializer cannot express
    /// from a struct, so the pairs are built by hand.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            query.push(("per_page", per_page.to_string()));
        }
        for include in &self.includes {
            query.push(("include[]", include.clone()));
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pagination(page: u32, pages: u32) -> Pagination {
        Pagination {
            page,
            pages,
            size: 15,
            total: 40,
        }
    }

    #[test]
    fn test_has_more() {
        assert!(pagination(1, 3).has_more());
        assert!(!pagination(3, 3).has_more());
    }

    #[test]
    fn test_pagination_reads_per_page() {
        let pages: Pagination =
            serde_json::from_str(r#"{"page": 1, "pages": 1, "per_page": 15, "total": 7}"#).unwrap();
        assert_eq!(pages.size, 15);
        assert_eq!(pages.total, 7);
    }

    #[test]
    fn test_page_map() {
        let page = Page::new(vec![1, 2, 3], pagination(1, 1));
        let mapped = page.map(|x| x * 2);
        assert_eq!(mapped.items, vec![2, 4, 6]);
        assert_eq!(mapped.pages.page, 1);
    }

    #[test]
    fn test_list_params_query() {
        let params = ListParams::for_page(2, 50).include("lines");
        assert_eq!(
            params.to_query(),
            vec![
                ("page", "2".to_string()),
                ("per_page", "50".to_string()),
                ("include[]", "lines".to_string()),
            ]
        );
        assert!(ListParams::default().to_query().is_empty());
    }
}
