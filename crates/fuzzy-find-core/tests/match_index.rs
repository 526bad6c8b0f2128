use fuzzy_find_core::{MatchIndex, MatchRecord, RegionId};

fn index_with(count: u64) -> MatchIndex {
    let mut index = MatchIndex::new();
    for i in 0..count {
        index.push(MatchRecord::new(vec![RegionId(i * 2), RegionId(i * 2 + 1)]));
    }
    index
}

#[test]
fn test_empty_index_navigation_is_noop() {
    let mut index = MatchIndex::new();
    assert_eq!(index.select_next(), None);
    assert_eq!(index.select_previous(), None);
    assert_eq!(index.current_index(), None);
    assert!(index.current().is_none());
}

#[test]
fn test_next_and_previous_wrap() {
    let mut index = index_with(3);
    assert!(index.select(0));

    assert_eq!(index.select_next(), Some(1));
    assert_eq!(index.select_next(), Some(2));
    assert_eq!(index.select_next(), Some(0));

    assert_eq!(index.select_previous(), Some(2));
    assert_eq!(index.select_previous(), Some(1));
}

#[test]
fn test_navigation_is_cyclic_for_every_start() {
    for count in 1..=5u64 {
        let mut index = index_with(count);
        for start in 0..count as usize {
            index.select(start);
            for _ in 0..count {
                index.select_next();
            }
            assert_eq!(index.current_index(), Some(start));
            for _ in 0..count {
                index.select_previous();
            }
            assert_eq!(index.current_index(), Some(start));
        }
    }
}

#[test]
fn test_navigation_without_selection() {
    let mut index = index_with(4);
    assert_eq!(index.select_next(), Some(0));

    let mut index = index_with(4);
    assert_eq!(index.select_previous(), Some(3));
}

#[test]
fn test_select_out_of_range_and_clear() {
    let mut index = index_with(2);
    assert!(!index.select(2));
    assert_eq!(index.current_index(), None);

    index.select(1);
    assert_eq!(
        index.current().and_then(MatchRecord::first_region),
        Some(RegionId(2))
    );

    index.clear();
    assert!(index.is_empty());
    assert_eq!(index.current_index(), None);
}
