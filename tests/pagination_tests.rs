use casebook::model::Patient;
use casebook::pagination::{Paginator, page_count};
use casebook::presenter::{PatientPresenter, Presenter};
use casebook::{Store, StoreConfig, page_links, paginate};

fn items(n: usize) -> Vec<usize> {
    (1..=n).collect()
}

#[test]
fn test_first_page_starts_at_one() {
    let results = paginate(items(23), 1, 10);
    assert_eq!(results.from, 1);
    assert_eq!(results.to, 10);
    assert_eq!(results.count, 23);
    assert_eq!(results.page, items(10));
}

#[test]
fn test_last_partial_page() {
    let results = paginate(items(23), 3, 10);
    assert_eq!((results.from, results.to, results.count), (21, 23, 23));
    assert_eq!(results.page.len(), 3);
    assert_eq!(results.page, vec![21, 22, 23]);
}

#[test]
fn test_last_page_to_equals_total() {
    for total in [1, 9, 10, 11, 50] {
        let last = page_count(total, 10);
        assert_eq!(paginate(items(total), last, 10).to, total);
    }
}

#[test]
fn test_page_beyond_last_is_empty() {
    let results = paginate(items(23), 7, 10);
    assert!(results.page.is_empty());
    assert_eq!(results.count, 23);
    assert_eq!(results.to, 23);
}

#[test]
fn test_links_at_boundaries() {
    let first = page_links(23, 1, 10, 1);
    assert!(first.previous.is_none());
    assert_eq!(first.next.unwrap().href, "?page=2");
    assert_eq!(first.items.unwrap().len(), 3);

    let last = page_links(23, 3, 10, 1);
    assert!(last.next.is_none());
    assert_eq!(last.previous.unwrap().href, "?page=2");

    let single = page_links(4, 1, 10, 1);
    assert!(single.items.is_none());
    assert!(single.next.is_none());
    assert!(single.previous.is_none());
}

#[test]
fn test_paginator_uses_config() {
    let mut store = Store::new(StoreConfig::new().page_size(2)).unwrap();
    for name in ["A", "B", "C", "D", "E"] {
        store
            .create(Patient {
                first_name: name.to_string(),
                ..Patient::default()
            })
            .unwrap();
    }

    let paginator = Paginator::from_config(store.config());
    let patients = PatientPresenter::for_all(&store);
    let total = patients.len();
    let results = paginator.results(patients, 3);

    assert_eq!(results.page.len(), 1);
    assert_eq!(results.page[0].full_name, "E");
    assert_eq!((results.from, results.to), (5, 5));

    let links = paginator.links(total, 3);
    assert_eq!(links.current, 3);
    assert!(links.next.is_none());
}
