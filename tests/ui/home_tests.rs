//! Home screen UI tests

use super::*;
use steemblocks::app::Screen;

#[test]
fn test_home_screen_shows_title() {
    let app = create_test_app(Screen::Home, true);
    let buffer = render_to_buffer(&app, 100, 40);

    assert!(buffer_contains(&buffer, "████"));
    assert!(buffer_contains(&buffer, "Terminal Steem Block Explorer"));
}

#[test]
fn test_home_screen_shows_search_placeholder() {
    let app = create_test_app(Screen::Home, true);
    let buffer = render_to_buffer(&app, 100, 40);

    assert!(buffer_contains(&buffer, "Search"));
    assert!(buffer_contains(
        &buffer,
        "Search by Block / Transaction ID / Account"
    ));
}

#[test]
fn test_home_screen_shows_typed_query() {
    let mut app = create_test_app(Screen::Home, true);
    app.search_input = tui_input::Input::new("steemit".to_string());
    let buffer = render_to_buffer(&app, 100, 40);

    assert!(buffer_contains(&buffer, "steemit"));
    assert!(!buffer_contains(&buffer, "Search by Block"));
}

#[test]
fn test_home_screen_shows_recent_searches() {
    let app = create_test_app(Screen::Home, true);
    let buffer = render_to_buffer(&app, 100, 40);

    assert!(buffer_contains(&buffer, "Recent Searches"));
    assert!(buffer_contains(&buffer, "dhaka.witness"));
    assert!(buffer_contains(&buffer, "5000000"));
}

#[test]
fn test_home_screen_shows_rpc_node() {
    let app = create_test_app(Screen::Home, true);
    let buffer = render_to_buffer(&app, 100, 40);

    assert!(buffer_contains(&buffer, "RPC: http://localhost:8090"));
}

#[test]
fn test_home_screen_shows_network_status() {
    let app = create_test_app(Screen::Home, true);
    let buffer = render_to_buffer(&app, 100, 40);

    assert!(buffer_contains(&buffer, "Network Status"));
    assert!(buffer_contains(&buffer, "#90000000"));
    assert!(buffer_contains(&buffer, "Irreversible"));
    assert!(buffer_contains(&buffer, "(-15)"));
}

#[test]
fn test_home_screen_shows_latest_blocks() {
    let app = create_test_app(Screen::Home, true);
    let buffer = render_to_buffer(&app, 100, 40);

    assert!(buffer_contains(&buffer, "Latest Blocks"));
    assert!(buffer_contains(&buffer, "#89999996"));
    assert!(buffer_contains(&buffer, "@witness05"));
    // newest block is marked
    assert!(buffer_contains(&buffer, "● #90000000"));
    assert!(!buffer_contains(&buffer, "● #89999999"));
}

#[test]
fn test_home_screen_bad_rpc_shows_reason() {
    let app = create_test_app(Screen::Home, false);
    let buffer = render_to_buffer(&app, 100, 40);

    assert!(buffer_contains(&buffer, "Invalid RPC URL"));
    assert!(!buffer_contains(&buffer, "Latest Blocks"));
}

#[test]
fn test_home_screen_history_selection_highlights_entry() {
    let mut app = create_test_app(Screen::Home, true);
    app.select_history_next();
    let buffer = render_to_buffer(&app, 100, 40);

    assert!(buffer_contains(&buffer, "dhaka.witness"));
    assert!(buffer_contains(&buffer, "Del remove"));
}
