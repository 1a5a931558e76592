//! Page slicing and page navigation links. Page numbers are 1-based.

use crate::store::StoreConfig;
use serde::{Serialize, Serializer};

/// One page of an ordered listing.
///
/// `from` and `to` are the 1-based inclusive bounds shown to the user,
/// clamped to `count`; an empty page past the end has `from == to == count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Results<T> {
    pub page: Vec<T>,
    pub from: usize,
    pub to: usize,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PageItem {
    Page {
        number: usize,
        href: String,
        current: bool,
    },
    Ellipsis {
        ellipsis: bool,
    },
}

/// Navigation for a paged listing. Absent parts serialize as `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLinks {
    #[serde(serialize_with = "some_or_false")]
    pub items: Option<Vec<PageItem>>,
    pub current: usize,
    #[serde(serialize_with = "some_or_false")]
    pub next: Option<Link>,
    #[serde(serialize_with = "some_or_false")]
    pub previous: Option<Link>,
}

pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1))
}

/// Slice `items` down to `page`. A page past the end is empty, not an error.
pub fn paginate<T>(items: Vec<T>, page: usize, page_size: usize) -> Results<T> {
    let page = page.max(1);
    let page_size = page_size.max(1);
    let count = items.len();
    let offset = (page - 1).saturating_mul(page_size);

    let slice: Vec<T> = items.into_iter().skip(offset).take(page_size).collect();
    Results {
        page: slice,
        from: offset.saturating_add(1).min(count),
        to: offset.saturating_add(page_size).min(count),
        count,
    }
}

/// Links for `page` of a `total`-item listing, showing the first and last
/// pages plus `window` pages either side of the current one.
pub fn page_links(total: usize, page: usize, page_size: usize, window: usize) -> PageLinks {
    let current = page.max(1);
    let pages = page_count(total, page_size);

    let previous = (current > 1 && pages > 0).then(|| link(current.saturating_sub(1).min(pages)));
    let next = (current < pages).then(|| link(current + 1));
    let items = (pages > 1).then(|| page_items(pages, current, window));

    PageLinks {
        items,
        current,
        next,
        previous,
    }
}

/// Applies a [`StoreConfig`]'s page size and window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    pub page_size: usize,
    pub window: usize,
}

impl Paginator {
    pub fn from_config(config: &StoreConfig) -> Self {
        Self {
            page_size: config.page_size,
            window: config.pagination_window,
        }
    }

    pub fn results<T>(&self, items: Vec<T>, page: usize) -> Results<T> {
        paginate(items, page, self.page_size)
    }

    pub fn links(&self, total: usize, page: usize) -> PageLinks {
        page_links(total, page, self.page_size, self.window)
    }
}

fn link(page: usize) -> Link {
    Link {
        href: format!("?page={}", page),
    }
}

fn page_items(pages: usize, current: usize, window: usize) -> Vec<PageItem> {
    let shown = (1..=pages).filter(|&n| n == 1 || n == pages || n.abs_diff(current) <= window);

    let mut items = Vec::new();
    let mut previous = 0;
    for number in shown {
        match number - previous {
            // A gap of one page shows that page rather than an ellipsis.
            2 if previous > 0 => items.push(page_item(previous + 1, current)),
            gap if gap > 2 && previous > 0 => items.push(PageItem::Ellipsis { ellipsis: true }),
            _ => {}
        }
        items.push(page_item(number, current));
        previous = number;
    }
    items
}

fn page_item(number: usize, current: usize) -> PageItem {
    PageItem::Page {
        number,
        href: format!("?page={}", number),
        current: number == current,
    }
}

fn some_or_false<T: Serialize, S: Serializer>(
    value: &Option<T>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match value {
        Some(value) => value.serialize(serializer),
        None => serializer.serialize_bool(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn numbers(items: &[PageItem]) -> Vec<Option<usize>> {
        items
            .iter()
            .map(|item| match item {
                PageItem::Page { number, .. } => Some(*number),
                PageItem::Ellipsis { .. } => None,
            })
            .collect()
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 10), 0);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(23, 10), 3);
    }

    #[test]
    fn test_page_zero_is_first_page() {
        let results = paginate((1..=5).collect(), 0, 2);
        assert_eq!(results.page, vec![1, 2]);
        assert_eq!(results.from, 1);
    }

    #[test]
    fn test_empty_listing() {
        let results = paginate(Vec::<u8>::new(), 1, 10);
        assert!(results.page.is_empty());
        assert_eq!((results.from, results.to, results.count), (0, 0, 0));

        let links = page_links(0, 1, 10, 1);
        assert!(links.items.is_none());
        assert!(links.next.is_none());
        assert!(links.previous.is_none());
    }

    #[test]
    fn test_window_with_ellipsis() {
        let links = page_links(100, 5, 10, 1);
        assert_eq!(
            numbers(links.items.as_ref().unwrap()),
            vec![Some(1), None, Some(4), Some(5), Some(6), None, Some(10)]
        );
    }

    #[test]
    fn test_single_gap_shows_page() {
        let links = page_links(50, 3, 10, 0);
        assert_eq!(
            numbers(links.items.as_ref().unwrap()),
            vec![Some(1), Some(2), Some(3), Some(4), Some(5)]
        );
    }

    #[test]
    fn test_serialized_shape() {
        let value = serde_json::to_value(page_links(5, 1, 10, 1)).unwrap();
        assert_eq!(
            value,
            json!({ "items": false, "current": 1, "next": false, "previous": false })
        );

        let value = serde_json::to_value(page_links(30, 2, 10, 1)).unwrap();
        assert_eq!(value["next"], json!({ "href": "?page=3" }));
        assert_eq!(value["previous"], json!({ "href": "?page=1" }));
        assert_eq!(value["items"][1], json!({ "number": 2, "href": "?page=2", "current": true }));
    }

    #[test]
    fn test_stale_page_links_back_to_last_page() {
        let links = page_links(23, 9, 10, 1);
        assert!(links.next.is_none());
        assert_eq!(links.previous.unwrap().href, "?page=3");
    }
}
