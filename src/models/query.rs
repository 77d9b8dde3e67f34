//! Paging parameters for the user listing endpoint.

use serde::{Deserialize, Serialize};

/// Page, page size, sort field, and sort order for `GET /users`.
///
/// The backend only understands a query that carries all four values, so
/// a partially filled query is rejected when the request is built. An
/// empty query (the [`Default`]) requests the unpaged listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageableQuery {
    pub page: Option<u32>,
    /// Number of users per page.
    pub offset: Option<u32>,
    /// Field name to sort by.
    pub sort: Option<String>,
    /// Sort direction, usually `asc` or `desc`.
    pub order: Option<String>,
}

impl PageableQuery {
    /// A fully specified query.
    pub fn new(page: u32, offset: u32, sort: impl Into<String>, order: impl Into<String>) -> Self {
        Self {
            page: Some(page),
            offset: Some(offset),
            sort: Some(sort.into()),
            order: Some(order.into()),
        }
    }

    /// Number of the four paging attributes that are set.
    pub fn present_fields(&self) -> usize {
        [
            self.page.is_some(),
            self.offset.is_some(),
            self.sort.is_some(),
            self.order.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }

    /// `true` when no paging attribute is set.
    pub fn is_empty(&self) -> bool {
        self.present_fields() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_query_is_empty() {
        let query = PageableQuery::default();
        assert!(query.is_empty());
        assert_eq!(query.present_fields(), 0);
    }

    #[test]
    fn new_sets_all_fields() {
        let query = PageableQuery::new(2, 25, "username", "desc");
        assert_eq!(query.present_fields(), 4);
        assert_eq!(query.sort.as_deref(), Some("username"));
    }

    #[test]
    fn partial_query_counts_fields() {
        let query = PageableQuery {
            page: Some(0),
            sort: Some("email".into()),
            ..Default::default()
        };
        assert_eq!(query.present_fields(), 2);
        assert!(!query.is_empty());
    }
}
