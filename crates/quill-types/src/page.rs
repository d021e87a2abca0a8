use serde::Serialize;

pub const PAGE_SIZE: u64 = 10;

/// Pagination descriptor: derives offset/limit from a total item count and
/// a requested page index. An out-of-range index clamps back to page 1 with
/// a zero limit, so callers can skip the row query entirely.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub item_count: u64,
    pub page_index: u64,
    pub page_size: u64,
    pub page_count: u64,
    pub offset: u64,
    pub limit: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl Page {
    pub fn new(item_count: u64, page_index: u64) -> Self {
        Self::with_size(item_count, page_index, PAGE_SIZE)
    }

    pub fn with_size(item_count: u64, page_index: u64, page_size: u64) -> Self {
        let page_count = item_count / page_size + u64::from(item_count % page_size > 0);
        let (page_index, offset, limit) = if item_count == 0 || page_index > page_count {
            (1, 0, 0)
        } else {
            let page_index = page_index.max(1);
            (page_index, page_size * (page_index - 1), page_size)
        };
        Self {
            item_count,
            page_index,
            page_size,
            page_count,
            offset,
            limit,
            has_next: page_index < page_count,
            has_previous: page_index > 1,
        }
    }
}

/// Parse a `?page=N` query value, falling back to page 1 on garbage or
/// anything below 1.
pub fn page_index(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.parse::<u64>().ok())
        .filter(|p| *p >= 1)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_count_clamps_to_page_one_with_zero_limit() {
        let p = Page::new(0, 3);
        assert_eq!(p.page_index, 1);
        assert_eq!(p.page_count, 0);
        assert_eq!(p.offset, 0);
        assert_eq!(p.limit, 0);
        assert!(!p.has_next);
        assert!(!p.has_previous);
    }

    #[test]
    fn ninety_five_items_make_ten_pages() {
        let p = Page::new(95, 1);
        assert_eq!(p.page_count, 10);
        assert_eq!(p.offset, 0);
        assert_eq!(p.limit, 10);
        assert!(p.has_next);
        assert!(!p.has_previous);

        let last = Page::new(95, 10);
        assert_eq!(last.offset, 90);
        assert_eq!(last.limit, 10);
        // 5 items remain past offset 90; the limit stays at the page size
        // and the row query simply returns fewer rows.
        assert_eq!(last.item_count - last.offset, 5);
        assert!(!last.has_next);
        assert!(last.has_previous);
    }

    #[test]
    fn index_past_last_page_resets_to_first() {
        let p = Page::new(95, 11);
        assert_eq!(p.page_index, 1);
        assert_eq!(p.limit, 0);
    }

    #[test]
    fn page_index_parsing_falls_back_to_one() {
        assert_eq!(page_index(None), 1);
        assert_eq!(page_index(Some("abc")), 1);
        assert_eq!(page_index(Some("0")), 1);
        assert_eq!(page_index(Some("7")), 7);
    }
}
