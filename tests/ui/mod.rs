//! UI rendering tests for steemblocks
//!
//! These tests ensure the UI renders correctly by comparing against expected buffer output.
//! Run with: cargo test --test ui_tests

pub mod account_tests;
pub mod block_tests;
pub mod common_tests;
pub mod home_tests;
pub mod tx_tests;
pub mod witness_tests;

use steemblocks::app::{App, Screen};
use steemblocks::config::Config;
use steemblocks::rpc::{
    AccountInfo, Asset, BlockInfo, BlockSummary, NetworkInfo, OpSummary, Profile, TxInfo,
    WitnessInfo,
};
use steemblocks::ui::draw;

use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

pub const TX_ID: &str = "a1b2c3d4e5f60718293a4b5c6d7e8f9012345678";

// ==================== Test Data Builders ====================

pub fn mock_config() -> Config {
    Config {
        rpc_url: "http://localhost:8090".to_string(),
        recent_searches: vec![
            "dhaka.witness".to_string(),
            "5000000".to_string(),
            TX_ID.to_string(),
        ],
        refresh_secs: 3,
    }
}

pub fn mock_config_bad_rpc() -> Config {
    Config {
        rpc_url: "not-a-url".to_string(),
        recent_searches: vec![],
        refresh_secs: 3,
    }
}

fn steem(amount: f64) -> Asset {
    Asset {
        amount,
        symbol: "STEEM".to_string(),
    }
}

fn sbd(amount: f64) -> Asset {
    Asset {
        amount,
        symbol: "SBD".to_string(),
    }
}

pub fn mock_network_info() -> NetworkInfo {
    NetworkInfo {
        head_block: 90_000_000,
        irreversible_block: 89_999_985,
        current_witness: "dhaka.witness".to_string(),
        time: Some(1_727_784_000),
        current_supply: steem(480_000_000.0),
        sbd_supply: sbd(12_000_000.0),
        virtual_supply: steem(500_000_000.0),
        total_vesting_fund: steem(1_000.0),
        total_vesting_shares: Asset {
            amount: 2_000_000.0,
            symbol: "VESTS".to_string(),
        },
    }
}

pub fn mock_op(
    name: &str,
    description: &str,
    trx_id: Option<&str>,
    accounts: &[&str],
) -> OpSummary {
    OpSummary {
        name: name.to_string(),
        description: description.to_string(),
        accounts: accounts.iter().map(|a| a.to_string()).collect(),
        trx_id: trx_id.map(str::to_string),
        block: Some(5_000_000),
        timestamp: Some(1_474_000_000),
        is_virtual: trx_id.is_none(),
    }
}

pub fn mock_block_info() -> BlockInfo {
    BlockInfo {
        number: 5_000_000,
        block_id: "004c4b40f7b6ce0b2f7b3c0d4d3a9c3c2b7e1a11".to_string(),
        previous: "004c4b3f0e2a1b9c8d7e6f5a4b3c2d1e0f9a8b7c".to_string(),
        timestamp: 1_474_000_000,
        witness: "smooth.witness".to_string(),
        merkle_root: "6f1c0d1ae0f1c2b3a4d5e6f708192a3b4c5d6e7f".to_string(),
        signing_key: "STM8GC13uCZbP44HzMLV6zPZGwVQ8Nt4Kji8PapsPiNq1BK153XTX".to_string(),
        tx_count: 2,
        operations: vec![
            mock_op(
                "vote",
                "alice voted 100% on @bob/hello",
                Some(TX_ID),
                &["alice", "bob"],
            ),
            mock_op(
                "transfer",
                "carol sent 1.000 STEEM to dave",
                Some("bbbb000000000000000000000000000000000000"),
                &["carol", "dave"],
            ),
        ],
        virtual_ops: vec![mock_op(
            "producer_reward",
            "smooth.witness produced block (400.000000 VESTS)",
            None,
            &["smooth.witness"],
        )],
    }
}

pub fn mock_tx_info() -> TxInfo {
    TxInfo {
        id: TX_ID.to_string(),
        block_num: Some(5_000_000),
        transaction_num: Some(0),
        ref_block_num: 19263,
        ref_block_prefix: 3_264_239_523,
        expiration: Some(1_474_000_030),
        signatures: 1,
        operations: vec![mock_op(
            "transfer",
            "alice sent 1.000 STEEM to bob",
            Some(TX_ID),
            &["alice", "bob"],
        )],
    }
}

pub fn mock_account_info() -> AccountInfo {
    AccountInfo {
        name: "dhaka.witness".to_string(),
        created: Some(1_609_459_200),
        reputation: 62.4,
        post_count: 321,
        profile: Profile {
            name: Some("Dhaka Witness".to_string()),
            about: Some("Steem witness from Bangladesh".to_string()),
            location: Some("Dhaka".to_string()),
            website: None,
        },
        balance: steem(1_234.5),
        sbd_balance: sbd(2.0),
        savings_balance: steem(0.0),
        savings_sbd_balance: sbd(0.0),
        own_sp: 50_000.0,
        delegated_out_sp: 1_000.0,
        received_sp: 0.0,
        own_vests: 100_000_000.0,
        recovery_account: "steem".to_string(),
        proxy: None,
        witness_votes: vec!["alice".to_string(), "bob".to_string()],
        history: vec![
            mock_op(
                "account_witness_vote",
                "dhaka.witness voted for witness alice",
                Some(TX_ID),
                &["dhaka.witness", "alice"],
            ),
            mock_op(
                "curation_reward",
                "dhaka.witness curation reward 1.000000 VESTS",
                None,
                &["dhaka.witness"],
            ),
        ],
    }
}

pub fn mock_witnesses(n: usize) -> Vec<WitnessInfo> {
    (0..n)
        .map(|i| WitnessInfo {
            rank: i + 1,
            owner: format!("witness{:02}", i + 1),
            votes_mvests: 100_000.0 - (i as f64) * 1_000.0,
            total_missed: i as u64,
            last_confirmed_block: 89_999_990,
            url: String::new(),
            version: "0.23.1".to_string(),
            price_feed: Some(0.25),
            active: i % 10 != 9,
        })
        .collect()
}

pub fn mock_latest_blocks() -> Vec<BlockSummary> {
    (0..5u64)
        .map(|i| BlockSummary {
            number: 90_000_000 - i,
            witness: format!("witness{:02}", i + 1),
            timestamp: 1_727_784_000 - i * 3,
            tx_count: 10,
            op_count: 25,
            is_new: i == 0,
        })
        .collect()
}

pub fn create_test_app(screen: Screen, with_rpc: bool) -> App {
    let config = if with_rpc {
        mock_config()
    } else {
        mock_config_bad_rpc()
    };
    let mut app = App::new(config);
    app.screen = screen;
    if with_rpc {
        app.network_info = Some(mock_network_info());
        app.latest_blocks = mock_latest_blocks();
    }
    app
}

// ==================== Helper Functions ====================

/// Render the app to a buffer and return it
pub fn render_to_buffer(app: &App, width: u16, height: u16) -> Buffer {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            draw(frame, app);
        })
        .unwrap();
    terminal.backend().buffer().clone()
}

/// Check if buffer contains a specific string anywhere
pub fn buffer_contains(buffer: &Buffer, needle: &str) -> bool {
    let content = buffer_to_string(buffer);
    content.contains(needle)
}

/// Convert buffer to a single string for searching
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let mut content = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            content.push(
                buffer
                    .cell((x, y))
                    .map(|c| c.symbol().chars().next().unwrap_or(' '))
                    .unwrap_or(' '),
            );
        }
        content.push('\n');
    }
    content
}

/// Get a specific line from the buffer
#[allow(dead_code)]
pub fn buffer_line(buffer: &Buffer, y: u16) -> String {
    let mut line = String::new();
    for x in 0..buffer.area.width {
        if let Some(cell) = buffer.cell((x, y)) {
            line.push_str(cell.symbol());
        }
    }
    line.trim_end().to_string()
}

/// Print buffer for debugging
#[allow(dead_code)]
pub fn print_buffer(buffer: &Buffer) {
    for y in 0..buffer.area.height {
        println!("{}", buffer_line(buffer, y));
    }
}
