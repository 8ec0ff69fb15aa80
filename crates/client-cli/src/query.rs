//! List-view state: query construction, request sequencing, and cache
//! invalidation.
//!
//! Every list screen owns a [`ListController`]. Filter edits reset the page
//! and issue a new fetch ticket; results are applied only while their ticket
//! is still the newest one, so a slow response can never overwrite a newer
//! one. Mutations invalidate list keys through [`InvalidationSet`], which
//! grants each active view exactly one refetch per invalidation.

use shared::{AssetType, Page};

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Ticket identifying one issued fetch. Only the newest ticket may apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Query inputs of a list view
#[derive(Debug, Clone, PartialEq)]
pub struct ListParams {
    pub page: u32,
    pub limit: u32,
    pub search: String,
    pub kind: Option<AssetType>,
    pub sort: Option<String>,
}

impl ListParams {
    pub fn new(limit: u32) -> Self {
        Self {
            page: 1,
            limit,
            search: String::new(),
            kind: None,
            sort: None,
        }
    }

    /// Query pairs in the fixed order `page, limit, search, type, sort`,
    /// empty parameters omitted. The order keeps cache keys deterministic.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if !self.search.is_empty() {
            pairs.push(("search", self.search.clone()));
        }
        if let Some(kind) = self.kind {
            pairs.push(("type", kind.to_string()));
        }
        if let Some(sort) = &self.sort {
            if !sort.is_empty() {
                pairs.push(("sort", sort.clone()));
            }
        }
        pairs
    }
}

/// Cache key of one list query: endpoint plus the ordered query string
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(endpoint: &str, params: &ListParams) -> Self {
        let query: Vec<String> = params
            .to_pairs()
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        Self(format!("{}?{}", endpoint, query.join("&")))
    }

    pub fn endpoint(&self) -> &str {
        self.0.split('?').next().unwrap_or(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Per-view fetch coordinator. Owns the params and the applied page; issues
/// tickets and discards stale results.
#[derive(Debug)]
pub struct ListController<T> {
    endpoint: &'static str,
    params: ListParams,
    seq: u64,
    data: Page<T>,
    /// Ticket of the applied data, if any fetch has landed yet
    applied: Option<u64>,
}

impl<T> ListController<T> {
    pub fn new(endpoint: &'static str, limit: u32) -> Self {
        Self {
            endpoint,
            params: ListParams::new(limit),
            seq: 0,
            data: Page::empty(),
            applied: None,
        }
    }

    pub fn params(&self) -> &ListParams {
        &self.params
    }

    pub fn data(&self) -> &Page<T> {
        &self.data
    }

    pub fn cache_key(&self) -> CacheKey {
        CacheKey::new(self.endpoint, &self.params)
    }

    pub fn endpoint(&self) -> &'static str {
        self.endpoint
    }

    fn issue(&mut self) -> Ticket {
        self.seq += 1;
        Ticket(self.seq)
    }

    /// Change the search text. Resets the page to 1. Returns a ticket only
    /// when the input actually changed; an unchanged input issues no fetch.
    pub fn set_search(&mut self, search: &str) -> Option<Ticket> {
        if self.params.search == search {
            return None;
        }
        self.params.search = search.to_string();
        self.params.page = 1;
        Some(self.issue())
    }

    /// Change the type filter. Resets the page to 1.
    pub fn set_kind(&mut self, kind: Option<AssetType>) -> Option<Ticket> {
        if self.params.kind == kind {
            return None;
        }
        self.params.kind = kind;
        self.params.page = 1;
        Some(self.issue())
    }

    /// Change the sort key. Resets the page to 1.
    pub fn set_sort(&mut self, sort: Option<String>) -> Option<Ticket> {
        if self.params.sort == sort {
            return None;
        }
        self.params.sort = sort;
        self.params.page = 1;
        Some(self.issue())
    }

    /// Move to a page. The page is the one input that does not reset itself.
    pub fn set_page(&mut self, page: u32) -> Option<Ticket> {
        let page = page.max(1);
        if self.params.page == page {
            return None;
        }
        self.params.page = page;
        Some(self.issue())
    }

    pub fn next_page(&mut self) -> Option<Ticket> {
        if !self.has_next() {
            return None;
        }
        self.set_page(self.params.page + 1)
    }

    pub fn prev_page(&mut self) -> Option<Ticket> {
        if self.params.page <= 1 {
            return None;
        }
        self.set_page(self.params.page - 1)
    }

    /// Reissue the current query (after an invalidation).
    pub fn refetch(&mut self) -> Ticket {
        self.issue()
    }

    /// Apply a fetched page. Returns false (and drops the page) when a newer
    /// ticket has been issued since this fetch started.
    pub fn apply(&mut self, ticket: Ticket, page: Page<T>) -> bool {
        if ticket.0 != self.seq {
            tracing::debug!(
                stale = ticket.0,
                current = self.seq,
                "discarding stale list response"
            );
            return false;
        }
        self.data = page;
        self.applied = Some(ticket.0);
        true
    }

    /// Whether the applied data is for the newest issued ticket.
    pub fn is_current(&self) -> bool {
        self.applied == Some(self.seq)
    }

    /// Next is available when the server reported more pages, or, for
    /// endpoints without pagination metadata, when the page came back full.
    pub fn has_next(&self) -> bool {
        if self.data.pages > 1 {
            return self.params.page < self.data.pages;
        }
        self.data.items.len() as u32 == self.params.limit
    }

    pub fn has_prev(&self) -> bool {
        self.params.page > 1
    }
}

/// Pending list invalidations, keyed by endpoint prefix. A mutation declares
/// the endpoints it dirties; each active view then claims at most one
/// refetch per invalidation.
#[derive(Debug, Default)]
pub struct InvalidationSet {
    prefixes: Vec<String>,
}

impl InvalidationSet {
    pub fn invalidate(&mut self, endpoint: impl Into<String>) {
        let endpoint = endpoint.into();
        if !self.prefixes.contains(&endpoint) {
            self.prefixes.push(endpoint);
        }
    }

    /// Claim the invalidation covering `key`, removing it. Returns true when
    /// the view should refetch; a second call for the same invalidation
    /// returns false.
    pub fn claim(&mut self, key: &CacheKey) -> bool {
        let endpoint = key.endpoint();
        if let Some(pos) = self.prefixes.iter().position(|p| endpoint.starts_with(p.as_str())) {
            self.prefixes.remove(pos);
            return true;
        }
        false
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Page;

    fn page_of(n: usize) -> Page<u32> {
        Page {
            items: (0..n as u32).collect(),
            total: n as u64,
            pages: 1,
        }
    }

    #[test]
    fn test_query_pairs_fixed_order() {
        let mut params = ListParams::new(10);
        params.page = 3;
        params.search = "laptop".to_string();
        params.kind = Some(AssetType::Returnable);
        params.sort = Some("quantity".to_string());

        let pairs = params.to_pairs();
        let keys: Vec<&str> = pairs.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["page", "limit", "search", "type", "sort"]);
        assert_eq!(pairs[0].1, "3");
        assert_eq!(pairs[3].1, "Returnable");
    }

    #[test]
    fn test_empty_params_omitted() {
        let params = ListParams::new(10);
        let keys: Vec<&str> = params.to_pairs().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["page", "limit"]);
    }

    #[test]
    fn test_search_change_resets_page() {
        let mut ctl: ListController<u32> = ListController::new("/assets", 10);
        ctl.set_page(4);
        assert_eq!(ctl.params().page, 4);

        let ticket = ctl.set_search("laptop");
        assert!(ticket.is_some());
        assert_eq!(ctl.params().page, 1);
    }

    #[test]
    fn test_page_change_does_not_reset_itself() {
        let mut ctl: ListController<u32> = ListController::new("/assets", 10);
        ctl.set_search("laptop");
        let ticket = ctl.set_page(2);
        assert!(ticket.is_some());
        assert_eq!(ctl.params().page, 2);
        assert_eq!(ctl.params().search, "laptop");
    }

    #[test]
    fn test_unchanged_input_issues_no_fetch() {
        let mut ctl: ListController<u32> = ListController::new("/assets", 10);
        assert!(ctl.set_search("laptop").is_some());
        assert!(ctl.set_search("laptop").is_none());
        assert!(ctl.set_kind(None).is_none());
        assert!(ctl.set_page(1).is_none());
    }

    #[test]
    fn test_filter_change_issues_exactly_one_ticket() {
        let mut ctl: ListController<u32> = ListController::new("/assets", 10);
        let before = ctl.refetch();
        let after = ctl.set_kind(Some(AssetType::Returnable)).unwrap();
        assert_eq!(after.0, before.0 + 1);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut ctl: ListController<u32> = ListController::new("/assets", 10);
        let a = ctl.set_search("lap").unwrap();
        let b = ctl.set_search("laptop").unwrap();

        // B resolves first and is applied
        assert!(ctl.apply(b, page_of(2)));
        assert_eq!(ctl.data().items.len(), 2);
        assert!(ctl.is_current());

        // A resolves late and must not clobber B's data
        assert!(!ctl.apply(a, page_of(7)));
        assert_eq!(ctl.data().items.len(), 2);
    }

    #[test]
    fn test_late_current_response_applies() {
        let mut ctl: ListController<u32> = ListController::new("/assets", 10);
        let a = ctl.set_search("lap").unwrap();
        let b = ctl.set_search("laptop").unwrap();

        assert!(!ctl.apply(a, page_of(7)));
        assert!(ctl.apply(b, page_of(2)));
        assert_eq!(ctl.data().items.len(), 2);
    }

    #[test]
    fn test_next_gated_by_reported_pages() {
        let mut ctl: ListController<u32> = ListController::new("/assets", 10);
        let t = ctl.refetch();
        ctl.apply(
            t,
            Page {
                items: (0..10).collect(),
                total: 25,
                pages: 3,
            },
        );
        assert!(ctl.has_next());
        assert!(!ctl.has_prev());

        ctl.set_page(3);
        assert!(!ctl.has_next());
        assert!(ctl.has_prev());
    }

    #[test]
    fn test_next_gated_by_full_page_without_metadata() {
        let mut ctl: ListController<u32> = ListController::new("/assets", 10);
        let t = ctl.refetch();
        ctl.apply(t, page_of(10));
        assert!(ctl.has_next());

        let t = ctl.set_page(2).unwrap();
        ctl.apply(t, page_of(3));
        assert!(!ctl.has_next());
    }

    #[test]
    fn test_cache_key_deterministic() {
        let mut params = ListParams::new(10);
        params.search = "laptop".to_string();
        params.kind = Some(AssetType::NonReturnable);

        let key = CacheKey::new("/assets", &params);
        assert_eq!(
            key.as_str(),
            "/assets?page=1&limit=10&search=laptop&type=Non-returnable"
        );
        assert_eq!(key.endpoint(), "/assets");
    }

    #[test]
    fn test_invalidation_claimed_once() {
        let mut invalidations = InvalidationSet::default();
        invalidations.invalidate("/assets");

        let key = CacheKey::new("/assets", &ListParams::new(10));
        assert!(invalidations.claim(&key));
        assert!(!invalidations.claim(&key));
        assert!(invalidations.is_empty());
    }

    #[test]
    fn test_invalidation_does_not_cross_endpoints() {
        let mut invalidations = InvalidationSet::default();
        invalidations.invalidate("/requests");

        let key = CacheKey::new("/assets", &ListParams::new(10));
        assert!(!invalidations.claim(&key));
    }

    #[test]
    fn test_invalidation_deduplicates() {
        let mut invalidations = InvalidationSet::default();
        invalidations.invalidate("/assets");
        invalidations.invalidate("/assets");

        let key = CacheKey::new("/assets", &ListParams::new(10));
        assert!(invalidations.claim(&key));
        assert!(invalidations.is_empty());
    }
}
