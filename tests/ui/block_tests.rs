//! Block page UI tests

use super::*;
use steemblocks::app::{BlockResult, Screen};

fn block_screen(list_mode: bool) -> Screen {
    Screen::BlockResult(BlockResult {
        info: mock_block_info(),
        selected_index: 0,
        list_mode,
    })
}

#[test]
fn test_block_screen_shows_block_number() {
    let app = create_test_app(block_screen(true), true);
    let buffer = render_to_buffer(&app, 120, 40);

    assert!(buffer_contains(&buffer, "Block #5000000"));
}

#[test]
fn test_block_screen_shows_header_fields() {
    let app = create_test_app(block_screen(false), true);
    let buffer = render_to_buffer(&app, 120, 40);

    assert!(buffer_contains(&buffer, "Witness: @smooth.witness"));
    assert!(buffer_contains(&buffer, "Previous: #4999999"));
    assert!(buffer_contains(&buffer, "2016-09-16"));
    assert!(buffer_contains(&buffer, "Transactions: 2"));
    assert!(buffer_contains(&buffer, "Virtual Ops: 1"));
}

#[test]
fn test_block_screen_lists_operations() {
    let app = create_test_app(block_screen(true), true);
    let buffer = render_to_buffer(&app, 120, 40);

    assert!(buffer_contains(&buffer, "Operations (3) [selected]"));
    assert!(buffer_contains(&buffer, "alice voted 100% on @bob/hello"));
    assert!(buffer_contains(&buffer, "a1b2c3d4e5...345678"));
    assert!(buffer_contains(&buffer, "producer_reward"));
}

#[test]
fn test_block_screen_info_mode_title() {
    let app = create_test_app(block_screen(false), true);
    let buffer = render_to_buffer(&app, 120, 40);

    assert!(buffer_contains(&buffer, "Operations (3) [Tab to select]"));
}

#[test]
fn test_block_screen_empty_block() {
    let mut info = mock_block_info();
    info.operations.clear();
    info.virtual_ops.clear();
    info.tx_count = 0;
    let screen = Screen::BlockResult(BlockResult {
        info,
        selected_index: 0,
        list_mode: true,
    });
    let app = create_test_app(screen, true);
    let buffer = render_to_buffer(&app, 120, 40);

    assert!(buffer_contains(&buffer, "No operations in this block"));
}

#[test]
fn test_first_block_has_no_previous_link() {
    let mut info = mock_block_info();
    info.number = 1;
    let screen = Screen::BlockResult(BlockResult {
        info,
        selected_index: 0,
        list_mode: false,
    });
    let app = create_test_app(screen, true);
    let buffer = render_to_buffer(&app, 120, 40);

    assert!(buffer_contains(&buffer, "Previous: Genesis"));
}
