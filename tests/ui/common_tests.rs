//! Common UI tests - error, loading, layout, and navigation

use super::*;
use steemblocks::app::{AccountResult, BlockResult, Screen, TxResult, WitnessList};

fn all_screens() -> Vec<Screen> {
    vec![
        Screen::Home,
        Screen::BlockResult(BlockResult {
            info: mock_block_info(),
            selected_index: 0,
            list_mode: true,
        }),
        Screen::TxResult(TxResult {
            info: mock_tx_info(),
            selected_link: 0,
        }),
        Screen::AccountResult(AccountResult {
            info: mock_account_info(),
            selected_index: 0,
        }),
        Screen::WitnessList(WitnessList::new(mock_witnesses(5))),
        Screen::Error("Error".to_string()),
        Screen::Loading("Loading...".to_string()),
    ]
}

// ==================== Error Screen Tests ====================

#[test]
fn test_error_screen_shows_message() {
    let screen = Screen::Error("Account @nobody not found\n\nRPC: http://localhost:8090".to_string());
    let app = create_test_app(screen, true);
    let buffer = render_to_buffer(&app, 80, 30);

    assert!(buffer_contains(&buffer, "Error"));
    assert!(buffer_contains(&buffer, "Account @nobody not found"));
    assert!(buffer_contains(&buffer, "RPC: http://localhost:8090"));
}

#[test]
fn test_error_screen_shows_route_error() {
    let screen = Screen::Error("Invalid block number: 0".to_string());
    let app = create_test_app(screen, true);
    let buffer = render_to_buffer(&app, 80, 30);

    assert!(buffer_contains(&buffer, "Invalid block number: 0"));
    assert!(buffer_contains(&buffer, "b back"));
}

// ==================== Loading Screen Tests ====================

#[test]
fn test_loading_screen_shows_message() {
    let screen = Screen::Loading("Fetching block #5000000...".to_string());
    let app = create_test_app(screen, true);
    let buffer = render_to_buffer(&app, 80, 30);

    assert!(buffer_contains(&buffer, "Loading"));
    assert!(buffer_contains(&buffer, "Fetching block #5000000..."));
}

// ==================== Navigation Help Tests ====================

#[test]
fn test_screens_show_navigation_help() {
    for screen in all_screens() {
        if matches!(screen, Screen::Loading(_)) {
            continue;
        }
        let app = create_test_app(screen, true);
        let buffer = render_to_buffer(&app, 120, 40);

        assert!(buffer_contains(&buffer, "Esc"));
    }
}

// ==================== Layout Tests ====================

#[test]
fn test_small_terminal_renders_without_panic() {
    for screen in all_screens() {
        let app = create_test_app(screen, true);
        let _ = render_to_buffer(&app, 40, 10);
    }
}

#[test]
fn test_large_terminal_renders_without_panic() {
    for screen in all_screens() {
        let app = create_test_app(screen, true);
        let _ = render_to_buffer(&app, 200, 100);
    }
}
