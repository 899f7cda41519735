use eatery_core::{page_numbers, PageToken};

use PageToken::{Ellipsis, Page};

#[test]
fn middle_page_keeps_neighbours() {
    assert_eq!(
        page_numbers(5, 8),
        vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(8)]
    );
}

#[test]
fn early_pages_show_leading_block() {
    for current in 1..=3 {
        assert_eq!(
            page_numbers(current, 8),
            vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(8)]
        );
    }
}

#[test]
fn late_pages_show_trailing_block() {
    for current in 6..=8 {
        assert_eq!(
            page_numbers(current, 8),
            vec![Page(1), Ellipsis, Page(5), Page(6), Page(7), Page(8)]
        );
    }
}

#[test]
fn six_pages_switch_between_leading_and_trailing_blocks() {
    assert_eq!(
        page_numbers(3, 6),
        vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(6)]
    );
    assert_eq!(
        page_numbers(4, 6),
        vec![Page(1), Ellipsis, Page(3), Page(4), Page(5), Page(6)]
    );
}

#[test]
fn compact_list_always_contains_current_first_and_last() {
    for page_count in 6..=30 {
        for current in 1..=page_count {
            let pages = page_numbers(current, page_count);
            assert_eq!(pages.first(), Some(&Page(1)));
            assert_eq!(pages.last(), Some(&Page(page_count)));
            assert!(pages.contains(&Page(current)));
        }
    }
}
