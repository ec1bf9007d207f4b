//! Per-query list cache with request ordering

use std::collections::{HashMap, HashSet};

use maintdesk_client::{PageQuery, PaginatedResponse};

/// Monotonic id attached to every fetch.
pub type RequestId = u64;

/// Settled keys kept before the oldest are forgotten.
pub const MAX_KEYS: usize = 32;

/// Caches pages by `(page, limit, search)` and drops out-of-order responses.
#[derive(Debug, Clone)]
pub struct ListCache<E> {
    pages: HashMap<PageQuery, PaginatedResponse<E>>,
    /// Latest request issued per key. A response for a key missing here was
    /// retired by `invalidate` or eviction.
    latest: HashMap<PageQuery, RequestId>,
    /// Keys whose latest request has not been answered yet.
    in_flight: HashSet<PageQuery>,
    next_request_id: RequestId,
}

impl<E> Default for ListCache<E> {
    fn default() -> Self {
        Self {
            pages: HashMap::new(),
            latest: HashMap::new(),
            in_flight: HashSet::new(),
            next_request_id: 1,
        }
    }
}

impl<E: Clone> ListCache<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a request id and mark it as the latest for `query`.
    pub fn issue(&mut self, query: &PageQuery) -> RequestId {
        let id = self.next_request_id;
        self.next_request_id += 1;
        self.latest.insert(query.clone(), id);
        self.in_flight.insert(query.clone());
        self.evict();
        id
    }

    /// Whether a response to `request_id` is still the newest for `query`.
    fn is_latest(&self, request_id: RequestId, query: &PageQuery) -> bool {
        self.latest
            .get(query)
            .is_some_and(|latest| request_id >= *latest)
    }

    /// Store a response. Returns `false` (and stores nothing) if a newer
    /// request for the same key has been issued or the request was retired.
    pub fn accept(
        &mut self,
        request_id: RequestId,
        query: &PageQuery,
        page: PaginatedResponse<E>,
    ) -> bool {
        if !self.is_latest(request_id, query) {
            log::debug!("Dropping stale response #{request_id} for page {}", query.page);
            return false;
        }
        self.in_flight.remove(query);
        self.pages.insert(query.clone(), page);
        true
    }

    /// Record a failed fetch. Returns `false` if the failure is stale.
    pub fn reject(&mut self, request_id: RequestId, query: &PageQuery) -> bool {
        if !self.is_latest(request_id, query) {
            return false;
        }
        self.in_flight.remove(query);
        true
    }

    /// A cached page issued since the last invalidation.
    pub fn fresh(&self, query: &PageQuery) -> Option<&PaginatedResponse<E>> {
        self.pages.get(query)
    }

    pub fn is_in_flight(&self, query: &PageQuery) -> bool {
        self.in_flight.contains(query)
    }

    /// Forget every page and retire requests still in flight, so answers
    /// computed before a mutation are never stored.
    pub fn invalidate(&mut self) {
        self.pages.clear();
        self.latest.clear();
        self.in_flight.clear();
    }

    /// Forget the oldest settled keys beyond [`MAX_KEYS`].
    fn evict(&mut self) {
        while self.latest.len() > MAX_KEYS {
            let oldest = self
                .latest
                .iter()
                .filter(|(query, _)| !self.in_flight.contains(*query))
                .min_by_key(|(_, id)| **id)
                .map(|(query, _)| query.clone());
            let Some(query) = oldest else { break };
            self.latest.remove(&query);
            self.pages.remove(&query);
        }
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(items: &[&str]) -> PaginatedResponse<String> {
        PaginatedResponse::new(items.iter().map(ToString::to_string).collect(), 1, 1, 1)
    }

    #[test]
    fn older_response_for_same_key_is_dropped() {
        let mut cache = ListCache::new();
        let q = PageQuery::new(1, 10, "ac");
        let first = cache.issue(&q);
        let second = cache.issue(&q);

        assert!(cache.accept(second, &q, page(&["new"])));
        assert!(!cache.accept(first, &q, page(&["old"])));
        assert!(!cache.is_in_flight(&q));
        assert_eq!(
            cache.fresh(&q).map(|p| p.items.clone()),
            Some(vec!["new".to_string()])
        );
    }

    #[test]
    fn keys_are_independent() {
        let mut cache = ListCache::new();
        let a = PageQuery::new(1, 10, "a");
        let b = PageQuery::new(1, 10, "ab");
        let ra = cache.issue(&a);
        let rb = cache.issue(&b);
        assert!(cache.accept(rb, &b, page(&["ab"])));
        assert!(cache.accept(ra, &a, page(&["a"])));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn invalidate_forgets_pages() {
        let mut cache = ListCache::new();
        for search in ["a", "ab", "abc"] {
            let q = PageQuery::new(1, 10, search);
            let r = cache.issue(&q);
            cache.accept(r, &q, page(&[search]));
        }
        assert_eq!(cache.len(), 3);
        cache.invalidate();
        assert!(cache.is_empty());
        assert!(cache.fresh(&PageQuery::new(1, 10, "a")).is_none());
    }

    #[test]
    fn invalidate_retires_requests_in_flight() {
        let mut cache = ListCache::new();
        let q = PageQuery::default();
        let before = cache.issue(&q);
        cache.invalidate();
        assert!(!cache.is_in_flight(&q));
        assert!(!cache.accept(before, &q, page(&["old"])));
        assert!(cache.fresh(&q).is_none());

        let after = cache.issue(&q);
        assert!(!cache.reject(before, &q));
        assert!(cache.accept(after, &q, page(&["new"])));
        assert_eq!(
            cache.fresh(&q).map(|p| p.items.clone()),
            Some(vec!["new".to_string()])
        );
    }

    #[test]
    fn settled_keys_are_bounded() {
        let mut cache = ListCache::new();
        for i in 0..(MAX_KEYS * 3) {
            let q = PageQuery::new(1, 10, format!("term {i}"));
            let r = cache.issue(&q);
            cache.accept(r, &q, page(&["x"]));
        }
        assert_eq!(cache.len(), MAX_KEYS);
        assert!(cache.fresh(&PageQuery::new(1, 10, "term 0")).is_none());
        let newest = PageQuery::new(1, 10, format!("term {}", MAX_KEYS * 3 - 1));
        assert!(cache.fresh(&newest).is_some());
    }

    #[test]
    fn eviction_keeps_keys_in_flight() {
        let mut cache = ListCache::new();
        let waiting = PageQuery::new(1, 10, "slow");
        let slow = cache.issue(&waiting);
        for i in 0..(MAX_KEYS * 2) {
            let q = PageQuery::new(1, 10, format!("term {i}"));
            let r = cache.issue(&q);
            cache.accept(r, &q, page(&["x"]));
        }
        assert!(cache.is_in_flight(&waiting));
        assert!(cache.accept(slow, &waiting, page(&["slow"])));
    }

    #[test]
    fn stale_failure_is_ignored() {
        let mut cache = ListCache::<String>::new();
        let q = PageQuery::default();
        let old = cache.issue(&q);
        let new = cache.issue(&q);
        assert!(!cache.reject(old, &q));
        assert!(cache.is_in_flight(&q));
        assert!(cache.reject(new, &q));
        assert!(!cache.is_in_flight(&q));
    }
}
