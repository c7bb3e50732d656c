//! Witness ranking UI tests

use super::*;
use steemblocks::app::{Screen, WitnessList};

#[test]
fn test_witness_screen_shows_first_page() {
    let app = create_test_app(Screen::WitnessList(WitnessList::new(mock_witnesses(25))), true);
    let buffer = render_to_buffer(&app, 120, 40);

    assert!(buffer_contains(&buffer, "Witnesses (page 1/2)"));
    assert!(buffer_contains(&buffer, "witness01"));
    assert!(buffer_contains(&buffer, "witness20"));
    assert!(!buffer_contains(&buffer, "witness21"));
    assert!(buffer_contains(&buffer, "100,000 MV"));
    assert!(buffer_contains(&buffer, "$0.250"));
}

#[test]
fn test_witness_screen_second_page() {
    let mut list = WitnessList::new(mock_witnesses(25));
    list.next_page();
    let app = create_test_app(Screen::WitnessList(list), true);
    let buffer = render_to_buffer(&app, 120, 40);

    assert!(buffer_contains(&buffer, "Witnesses (page 2/2)"));
    assert!(buffer_contains(&buffer, "witness21"));
    assert!(buffer_contains(&buffer, "witness25"));
    assert!(!buffer_contains(&buffer, "witness01 "));
}

#[test]
fn test_witness_screen_empty() {
    let app = create_test_app(Screen::WitnessList(WitnessList::new(vec![])), true);
    let buffer = render_to_buffer(&app, 120, 40);

    assert!(buffer_contains(&buffer, "No witnesses returned by the node"));
    assert!(buffer_contains(&buffer, "n/p page"));
}

#[test]
fn test_witness_screen_short_terminal_follows_selection() {
    let mut list = WitnessList::new(mock_witnesses(25));
    list.selected_index = 19;
    let app = create_test_app(Screen::WitnessList(list), true);
    let buffer = render_to_buffer(&app, 120, 24);

    assert!(buffer_contains(&buffer, "witness20"));
    assert!(buffer_contains(&buffer, "Witnesses (page 1/2)"));
    assert!(!buffer_contains(&buffer, "witness01"));
    assert!(!buffer_contains(&buffer, "witness21"));
}

#[test]
fn test_witness_screen_short_terminal_starts_at_top() {
    let app = create_test_app(Screen::WitnessList(WitnessList::new(mock_witnesses(25))), true);
    let buffer = render_to_buffer(&app, 120, 24);

    assert!(buffer_contains(&buffer, "witness01"));
    assert!(buffer_contains(&buffer, "witness18"));
    assert!(!buffer_contains(&buffer, "witness19"));
}
