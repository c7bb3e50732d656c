//! Account page UI tests

use super::*;
use steemblocks::app::{AccountResult, Screen};

fn account_screen(info: steemblocks::rpc::AccountInfo) -> Screen {
    Screen::AccountResult(AccountResult {
        info,
        selected_index: 0,
    })
}

#[test]
fn test_account_screen_shows_name_and_profile() {
    let app = create_test_app(account_screen(mock_account_info()), true);
    let buffer = render_to_buffer(&app, 100, 40);

    assert!(buffer_contains(&buffer, "@dhaka.witness"));
    assert!(buffer_contains(&buffer, "Dhaka Witness"));
    assert!(buffer_contains(&buffer, "Location: Dhaka"));
    assert!(buffer_contains(&buffer, "Reputation: 62"));
    assert!(buffer_contains(&buffer, "Posts: 321"));
}

#[test]
fn test_account_screen_shows_wallet() {
    let app = create_test_app(account_screen(mock_account_info()), true);
    let buffer = render_to_buffer(&app, 100, 40);

    assert!(buffer_contains(&buffer, "STEEM: 1,234.500 STEEM"));
    assert!(buffer_contains(&buffer, "SBD: 2.000 SBD"));
    assert!(buffer_contains(&buffer, "Steem Power: 50,000.000 SP"));
    assert!(buffer_contains(&buffer, "Effective SP: 49,000.000 SP"));
}

#[test]
fn test_account_screen_shows_votes_and_recovery() {
    let app = create_test_app(account_screen(mock_account_info()), true);
    let buffer = render_to_buffer(&app, 100, 40);

    assert!(buffer_contains(&buffer, "Recovery: @steem"));
    assert!(buffer_contains(&buffer, "Witness Votes: 2 (alice, bob)"));
}

#[test]
fn test_account_screen_shows_history() {
    let app = create_test_app(account_screen(mock_account_info()), true);
    let buffer = render_to_buffer(&app, 100, 40);

    assert!(buffer_contains(&buffer, "Recent Activity (2)"));
    assert!(buffer_contains(&buffer, "account_witness_vote"));
}

#[test]
fn test_account_screen_without_profile_or_history() {
    let mut info = mock_account_info();
    info.profile = Default::default();
    info.history.clear();
    info.delegated_out_sp = 0.0;
    let app = create_test_app(account_screen(info), true);
    let buffer = render_to_buffer(&app, 100, 40);

    assert!(!buffer_contains(&buffer, "Dhaka Witness"));
    assert!(!buffer_contains(&buffer, "Effective SP"));
    assert!(buffer_contains(&buffer, "No recent activity"));
}
