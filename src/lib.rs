//! steemblocks - Terminal Steem block explorer
//!
//! Classifies a search string as a block number, transaction id or account
//! name and shows the result fetched from a Steem JSON-RPC node.

pub mod app;
pub mod config;
pub mod route;
pub mod rpc;
pub mod search;
pub mod ui;

// Re-export commonly used types
pub use app::{AccountResult, App, BlockResult, NavLink, Screen, TxResult, WitnessList};
pub use config::Config;
pub use route::{Route, RouteError};
pub use search::{classify, SearchIntent, SearchKind};
