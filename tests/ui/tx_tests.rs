//! Transaction page UI tests

use super::*;
use steemblocks::app::{Screen, TxResult};

fn tx_screen() -> Screen {
    Screen::TxResult(TxResult {
        info: mock_tx_info(),
        selected_link: 0,
    })
}

#[test]
fn test_tx_screen_shows_id() {
    let app = create_test_app(tx_screen(), true);
    let buffer = render_to_buffer(&app, 100, 40);

    assert!(buffer_contains(&buffer, "Transaction (1 op)"));
    assert!(buffer_contains(&buffer, TX_ID));
}

#[test]
fn test_tx_screen_shows_block_link() {
    let app = create_test_app(tx_screen(), true);
    let buffer = render_to_buffer(&app, 100, 40);

    assert!(buffer_contains(&buffer, "Block: #5000000"));
    assert!(buffer_contains(&buffer, "Position in Block: 0"));
    assert!(buffer_contains(&buffer, "Signatures: 1"));
}

#[test]
fn test_tx_screen_shows_operations_and_accounts() {
    let app = create_test_app(tx_screen(), true);
    let buffer = render_to_buffer(&app, 100, 40);

    assert!(buffer_contains(&buffer, "Operations"));
    assert!(buffer_contains(&buffer, "alice sent 1.000 STEEM to bob"));
    assert!(buffer_contains(&buffer, "@alice"));
    assert!(buffer_contains(&buffer, "@bob"));
}

#[test]
fn test_pending_tx_has_no_block_link() {
    let mut info = mock_tx_info();
    info.block_num = None;
    info.transaction_num = None;
    let app = create_test_app(
        Screen::TxResult(TxResult {
            info,
            selected_link: 0,
        }),
        true,
    );
    let buffer = render_to_buffer(&app, 100, 40);

    assert!(buffer_contains(&buffer, "Block: Pending"));
    assert!(!buffer_contains(&buffer, "Position in Block"));
}
