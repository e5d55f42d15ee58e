//! Read-side view types: pagination and the joined movie detail.

use chrono::NaiveDate;
use serde::Serialize;

/// A page request for browsing
#[derive(Debug, Clone, Copy)]
pub struct Page {
    /// 1-based page number; out-of-range values clamp
    pub number: usize,
    pub per_page: usize,
}

impl Page {
    pub const DEFAULT_PER_PAGE: usize = 20;

    pub fn new(number: usize) -> Self {
        Self {
            number,
            per_page: Self::DEFAULT_PER_PAGE,
        }
    }

    pub fn sized(number: usize, per_page: usize) -> Self {
        Self { number, per_page }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(1)
    }
}

/// One page of results plus the counts a pager needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageOf<T> {
    pub items: Vec<T>,
    /// The page actually served, after clamping
    pub number: usize,
    pub pages: usize,
    pub total: usize,
}

pub(super) fn paginate<T>(items: Vec<T>, page: Page) -> PageOf<T> {
    let per_page = page.per_page.max(1);
    let total = items.len();
    let pages = total.div_ceil(per_page).max(1);
    let number = page.number.clamp(1, pages);
    let items = items
        .into_iter()
        .skip((number - 1) * per_page)
        .take(per_page)
        .collect();
    PageOf {
        items,
        number,
        pages,
        total,
    }
}

/// One cast entry of a movie
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CastMember {
    pub uid: i64,
    pub name: String,
    pub character_role: String,
}

/// One review of a movie
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewView {
    pub uid: i64,
    pub reviewer: String,
    pub text: Option<String>,
    pub rating: i64,
}

/// The joined detail view of one movie.
///
/// Cast and reviews come out in key order, so repeated requests render
/// identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieDetail {
    pub mid: i64,
    pub title: String,
    pub director: String,
    pub release_date: NaiveDate,
    pub poster: Option<String>,
    pub cast: Vec<CastMember>,
    pub reviews: Vec<ReviewView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate_splits_and_counts() {
        let page = paginate((1..=5).collect(), Page::sized(1, 2));
        assert_eq!(page.items, vec![1, 2]);
        assert_eq!(page.pages, 3);
        assert_eq!(page.total, 5);
        let last = paginate((1..=5).collect(), Page::sized(3, 2));
        assert_eq!(last.items, vec![5]);
    }

    #[test]
    fn test_paginate_clamps_out_of_range() {
        let page = paginate((1..=3).collect(), Page::sized(9, 2));
        assert_eq!(page.number, 2);
        assert_eq!(page.items, vec![3]);
        let first = paginate((1..=3).collect(), Page::sized(0, 2));
        assert_eq!(first.number, 1);
    }

    #[test]
    fn test_paginate_empty() {
        let page = paginate(Vec::<i32>::new(), Page::new(1));
        assert!(page.items.is_empty());
        assert_eq!(page.pages, 1);
        assert_eq!(page.total, 0);
    }
}
