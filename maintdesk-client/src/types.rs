use serde::{Deserialize, Serialize};

/// Server-assigned primary key. `0` means "not yet created" / "unset".
pub type EntityId = u64;

// ============ Pagination ============

/// Query for one page of a collection.
///
/// `page` is **1-indexed** here, the way the console counts pages; the wire
/// format is 0-indexed and is produced by [`wire_page`](Self::wire_page).
/// Queries are hashable so cached pages can be keyed by the full
/// `(page, limit, search)` tuple.
///
/// # Default
///
/// The default is `page = 1, limit = 10`, with an empty search term.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    /// Page number (1-indexed).
    pub page: u32,
    /// Number of records per page.
    pub limit: u32,
    /// Free-text search term, empty for no filter.
    pub search: String,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            search: String::new(),
        }
    }
}

impl PageQuery {
    pub fn new(page: u32, limit: u32, search: impl Into<String>) -> Self {
        Self {
            page,
            limit,
            search: search.into(),
        }
    }

    /// Page number as sent on the wire (0-indexed).
    pub fn wire_page(&self) -> u32 {
        self.page.saturating_sub(1)
    }

    /// Clamp values to valid ranges.
    ///
    /// - `page` is clamped to `>= 1`
    /// - `limit` is clamped to `1..=max_limit`
    /// - `search` is trimmed
    #[must_use]
    pub fn validated(&self, max_limit: u32) -> Self {
        Self {
            page: self.page.max(1),
            limit: self.limit.clamp(1, max_limit.max(1)),
            search: self.search.trim().to_string(),
        }
    }

    /// Query-string pairs for `GET /<collection>`.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page", self.wire_page().to_string()),
            ("limit", self.limit.to_string()),
            ("search", self.search.clone()),
        ]
    }
}

/// One page of a collection.
///
/// # Type Parameters
///
/// * `T`: The record type (an entity, or raw `serde_json::Value` rows).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    /// Records on this page.
    pub items: Vec<T>,
    /// Page number (1-indexed).
    pub page: u32,
    /// Total number of pages reported by the server.
    pub total_pages: u32,
    /// Total number of records across all pages.
    pub total_records: u64,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, page: u32, total_pages: u32, total_records: u64) -> Self {
        Self {
            items,
            page,
            total_pages,
            total_records,
        }
    }

    /// An empty first page.
    pub fn empty() -> Self {
        Self::new(Vec::new(), 1, 0, 0)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Convert the records, keeping the pagination metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResponse<U> {
        PaginatedResponse {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            total_pages: self.total_pages,
            total_records: self.total_records,
        }
    }
}

// ============ Wire Types ============

/// `{ data, page, totalPages, totalRecords }` as returned by list endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListEnvelope<T> {
    pub data: Vec<T>,
    /// 0-indexed.
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_records: u64,
}

impl<T> ListEnvelope<T> {
    pub fn into_response(self) -> PaginatedResponse<T> {
        PaginatedResponse::new(
            self.data,
            self.page + 1,
            self.total_pages,
            self.total_records,
        )
    }
}

/// `{ message }` / `{ error }` bodies the server sends instead of a record.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct MessageBody {
    pub message: Option<String>,
    pub error: Option<String>,
}

impl MessageBody {
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error).filter(|m| !m.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_page_is_zero_indexed() {
        assert_eq!(PageQuery::new(1, 10, "").wire_page(), 0);
        assert_eq!(PageQuery::new(3, 10, "").wire_page(), 2);
        assert_eq!(PageQuery::new(0, 10, "").wire_page(), 0);
    }

    #[test]
    fn query_pairs_always_carry_search() {
        let pairs = PageQuery::new(2, 5, "acme").query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("page", "1".to_string()),
                ("limit", "5".to_string()),
                ("search", "acme".to_string()),
            ]
        );
    }

    #[test]
    fn validated_clamps_and_trims() {
        let q = PageQuery::new(0, 500, "  pump ").validated(100);
        assert_eq!(q, PageQuery::new(1, 100, "pump"));
    }

    #[test]
    fn envelope_converts_to_one_indexed_page() {
        let env: ListEnvelope<u32> = serde_json::from_str(
            r#"{"data":[1,2],"page":2,"totalPages":3,"totalRecords":12}"#,
        )
        .unwrap_or(ListEnvelope {
            data: Vec::new(),
            page: 0,
            total_pages: 0,
            total_records: 0,
        });
        let resp = env.into_response();
        assert_eq!(resp.items, vec![1, 2]);
        assert_eq!(resp.page, 3);
        assert_eq!(resp.total_pages, 3);
        assert_eq!(resp.total_records, 12);
    }

    #[test]
    fn message_body_prefers_message_over_error() {
        let body = MessageBody {
            message: Some("Client exists".into()),
            error: Some("conflict".into()),
        };
        assert_eq!(body.into_message().as_deref(), Some("Client exists"));
        assert_eq!(MessageBody::default().into_message(), None);
    }
}
