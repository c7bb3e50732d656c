use crate::config::Config;
use crate::route::Route;
use crate::rpc::{
    AccountInfo, BlockInfo, BlockSummary, NetworkInfo, OpSummary, SteemClient, TxInfo, WitnessInfo,
};
use std::time::{Duration, Instant};
use tui_input::Input;

/// Number of blocks kept in the live list on the home screen
pub const LATEST_BLOCKS_COUNT: u64 = 5;
pub const WITNESS_PAGE_SIZE: usize = 20;
pub const WITNESS_LIMIT: u32 = 100;

#[derive(Debug, Clone)]
pub enum Screen {
    Home,
    Loading(String),
    BlockResult(BlockResult),
    TxResult(TxResult),
    AccountResult(AccountResult),
    WitnessList(WitnessList),
    Error(String),
}

#[derive(Debug, Clone)]
pub struct BlockResult {
    pub info: BlockInfo,
    pub selected_index: usize,
    pub list_mode: bool, // true = operation list, false = info links
}

impl BlockResult {
    /// Transaction operations followed by virtual operations
    pub fn ops(&self) -> impl Iterator<Item = &OpSummary> {
        self.info.operations.iter().chain(self.info.virtual_ops.iter())
    }

    pub fn op_count(&self) -> usize {
        self.info.operations.len() + self.info.virtual_ops.len()
    }

    /// Witness, then previous block when there is one
    pub fn info_links(&self) -> Vec<NavLink> {
        let mut links = vec![NavLink::Account(self.info.witness.clone())];
        if self.info.number > 1 {
            links.push(NavLink::Block(self.info.number - 1));
        }
        links
    }
}

#[derive(Debug, Clone)]
pub struct TxResult {
    pub info: TxInfo,
    pub selected_link: usize,
}

impl TxResult {
    /// Block first, then every account of every operation in order
    pub fn links(&self) -> Vec<NavLink> {
        let mut links = Vec::new();
        if let Some(block) = self.info.block_num {
            links.push(NavLink::Block(block));
        }
        for op in &self.info.operations {
            for account in &op.accounts {
                links.push(NavLink::Account(account.clone()));
            }
        }
        links
    }
}

#[derive(Debug, Clone)]
pub struct AccountResult {
    pub info: AccountInfo,
    pub selected_index: usize, // index into history
}

#[derive(Debug, Clone)]
pub struct WitnessList {
    pub witnesses: Vec<WitnessInfo>,
    pub page: usize,
    pub selected_index: usize, // index within the current page
}

impl WitnessList {
    pub fn new(witnesses: Vec<WitnessInfo>) -> Self {
        Self {
            witnesses,
            page: 0,
            selected_index: 0,
        }
    }

    pub fn page_count(&self) -> usize {
        self.witnesses.len().div_ceil(WITNESS_PAGE_SIZE).max(1)
    }

    pub fn page_items(&self) -> &[WitnessInfo] {
        let start = (self.page * WITNESS_PAGE_SIZE).min(self.witnesses.len());
        let end = (start + WITNESS_PAGE_SIZE).min(self.witnesses.len());
        &self.witnesses[start..end]
    }

    pub fn next_page(&mut self) {
        if self.page + 1 < self.page_count() {
            self.page += 1;
            self.selected_index = 0;
        }
    }

    pub fn prev_page(&mut self) {
        if self.page > 0 {
            self.page -= 1;
            self.selected_index = 0;
        }
    }

    pub fn selected(&self) -> Option<&WitnessInfo> {
        self.page_items().get(self.selected_index)
    }
}

/// Navigable links from a screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavLink {
    Account(String),
    Block(u64),
    Transaction(String),
}

impl NavLink {
    /// View a followed link opens. Links already know their kind, so they
    /// skip the classifier.
    pub fn route(&self) -> Route {
        match self {
            Self::Account(name) => Route::Account(name.to_lowercase()),
            Self::Block(num) => Route::Block(*num),
            Self::Transaction(id) => Route::Transaction(id.to_lowercase()),
        }
    }

    /// Link for an operation row in a block: its transaction, or its actor
    /// for virtual ops
    pub fn from_block_op(op: &OpSummary) -> Option<Self> {
        op.trx_id
            .clone()
            .map(Self::Transaction)
            .or_else(|| op.accounts.first().cloned().map(Self::Account))
    }

    /// Link for an account history row: its transaction, or its block
    pub fn from_history_op(op: &OpSummary) -> Option<Self> {
        op.trx_id
            .clone()
            .map(Self::Transaction)
            .or_else(|| op.block.map(Self::Block))
    }
}

/// Whether the live block list is behind `head` and must be refetched
pub fn head_advanced(known_head: Option<u64>, head: u64) -> bool {
    known_head.map_or(true, |known| head > known)
}

/// Fires at most once per interval. Time is passed in so callers and
/// tests control the clock.
#[derive(Debug, Clone)]
pub struct RefreshTimer {
    interval: Duration,
    last: Option<Instant>,
}

impl RefreshTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// True if the timer never fired or the interval elapsed since it did
    pub fn due(&self, now: Instant) -> bool {
        match self.last {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        }
    }

    pub fn mark(&mut self, now: Instant) {
        self.last = Some(now);
    }

    /// Returns `due(now)` and marks the timer when it fires
    pub fn fire(&mut self, now: Instant) -> bool {
        if self.due(now) {
            self.mark(now);
            true
        } else {
            false
        }
    }
}

pub struct App {
    pub config: Config,
    pub screen: Screen,
    pub history: Vec<Screen>,
    pub search_input: Input,
    pub selected_history_index: Option<usize>,
    pub should_quit: bool,
    pub rpc_client: Option<SteemClient>,
    pub rpc_error: Option<String>,
    pub network_info: Option<NetworkInfo>,
    pub latest_blocks: Vec<BlockSummary>,
    pub refresh_timer: RefreshTimer,
    pub refresh_in_flight: bool,
}

impl App {
    pub fn new(config: Config) -> Self {
        let (rpc_client, rpc_error) = match SteemClient::new(&config.rpc_url) {
            Ok(client) => (Some(client), None),
            Err(e) => {
                log::error!("RPC node {} unusable: {e:#}", config.rpc_url);
                (None, Some(format!("{e:#}: {}", config.rpc_url)))
            }
        };
        let refresh_timer = RefreshTimer::new(Duration::from_secs(config.refresh_secs.max(1)));

        Self {
            config,
            screen: Screen::Home,
            history: Vec::new(),
            search_input: Input::default(),
            selected_history_index: None,
            should_quit: false,
            rpc_client,
            rpc_error,
            network_info: None,
            latest_blocks: Vec::new(),
            refresh_timer,
            refresh_in_flight: false,
        }
    }

    pub fn has_rpc(&self) -> bool {
        self.rpc_client.is_some()
    }

    pub fn rpc_url(&self) -> &str {
        &self.config.rpc_url
    }

    pub fn get_recent_searches(&self) -> &[String] {
        &self.config.recent_searches
    }

    pub fn select_history_prev(&mut self) {
        let len = self.config.recent_searches.len();
        if len == 0 {
            return;
        }

        self.selected_history_index = match self.selected_history_index {
            None => Some(0),
            Some(0) => None, // Wrap to search input
            Some(i) => Some(i - 1),
        };
    }

    pub fn select_history_next(&mut self) {
        let len = self.config.recent_searches.len();
        if len == 0 {
            return;
        }

        self.selected_history_index = match self.selected_history_index {
            None => Some(0),
            Some(i) if i >= len - 1 => None, // Wrap to search input
            Some(i) => Some(i + 1),
        };
    }

    pub fn get_selected_history_query(&self) -> Option<String> {
        self.selected_history_index
            .and_then(|i| self.config.recent_searches.get(i).cloned())
    }

    pub fn clear_history_selection(&mut self) {
        self.selected_history_index = None;
    }

    pub fn delete_selected_history(&mut self) {
        let Some(idx) = self.selected_history_index else {
            return;
        };
        if idx >= self.config.recent_searches.len() {
            return;
        }

        if let Err(e) = self.config.remove_recent_search(idx) {
            log::warn!("could not save recent searches: {e:#}");
        }

        if self.config.recent_searches.is_empty() {
            self.selected_history_index = None;
        } else if idx >= self.config.recent_searches.len() {
            self.selected_history_index = Some(self.config.recent_searches.len() - 1);
        }
    }

    /// Remember a query at the top of recent searches
    pub fn remember_search(&mut self, query: &str) {
        if let Err(e) = self.config.add_recent_search(query.to_string()) {
            log::warn!("could not save recent searches: {e:#}");
        }
    }

    /// Take the trimmed search input. Empty input is rejected here so the
    /// classifier never sees it; the caller remembers accepted queries.
    pub fn submit_search(&mut self) -> Option<String> {
        let query = self.search_input.value().trim().to_string();
        if query.is_empty() {
            return None;
        }

        self.search_input.reset();
        Some(query)
    }

    pub fn navigate_to(&mut self, screen: Screen) {
        if !matches!(self.screen, Screen::Home | Screen::Loading(_)) {
            self.history.push(self.screen.clone());
        }
        self.screen = screen;
    }

    pub fn go_back(&mut self) -> bool {
        if let Some(prev) = self.history.pop() {
            self.screen = prev;
            true
        } else {
            self.go_home();
            true
        }
    }

    pub fn go_home(&mut self) {
        self.history.clear();
        self.screen = Screen::Home;
    }

    pub fn set_loading(&mut self, msg: &str) {
        // Save current screen to history before showing loading (if it's a navigable screen)
        if !matches!(
            self.screen,
            Screen::Home | Screen::Loading(_) | Screen::Error(_)
        ) {
            self.history.push(self.screen.clone());
        }
        self.screen = Screen::Loading(msg.to_string());
    }

    pub fn set_error(&mut self, msg: String) {
        if !matches!(
            self.screen,
            Screen::Home | Screen::Loading(_) | Screen::Error(_)
        ) {
            self.history.push(self.screen.clone());
        }
        self.screen = Screen::Error(msg);
    }

    pub fn set_block_result(&mut self, info: BlockInfo) {
        self.navigate_to(Screen::BlockResult(BlockResult {
            info,
            selected_index: 0,
            list_mode: true,
        }));
    }

    pub fn set_tx_result(&mut self, info: TxInfo) {
        self.navigate_to(Screen::TxResult(TxResult {
            info,
            selected_link: 0,
        }));
    }

    pub fn set_account_result(&mut self, info: AccountInfo) {
        self.navigate_to(Screen::AccountResult(AccountResult {
            info,
            selected_index: 0,
        }));
    }

    pub fn set_witness_list(&mut self, witnesses: Vec<WitnessInfo>) {
        self.navigate_to(Screen::WitnessList(WitnessList::new(witnesses)));
    }

    pub fn set_network_info(&mut self, info: NetworkInfo) {
        self.network_info = Some(info);
    }

    /// Replace the live block list, flagging blocks not seen in the last refresh
    pub fn set_latest_blocks(&mut self, mut blocks: Vec<BlockSummary>) {
        for block in &mut blocks {
            block.is_new = !self
                .latest_blocks
                .iter()
                .any(|known| known.number == block.number);
        }
        blocks.truncate(LATEST_BLOCKS_COUNT as usize);
        self.latest_blocks = blocks;
    }

    /// Newest block in the live list
    pub fn latest_head(&self) -> Option<u64> {
        self.latest_blocks.first().map(|b| b.number)
    }

    pub fn is_on_home(&self) -> bool {
        matches!(self.screen, Screen::Home)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.screen, Screen::Loading(_))
    }

    /// Whether the home screen polling should start a refresh now
    pub fn should_refresh(&mut self, now: Instant) -> bool {
        if !self.is_on_home() || !self.has_rpc() || self.refresh_in_flight {
            return false;
        }
        self.refresh_timer.fire(now)
    }

    /// Move selection up
    pub fn select_prev(&mut self) {
        match &mut self.screen {
            Screen::BlockResult(result) => {
                if result.selected_index > 0 {
                    result.selected_index -= 1;
                }
            }
            Screen::TxResult(result) => {
                let max = result.links().len();
                if max > 0 {
                    if result.selected_link > 0 {
                        result.selected_link -= 1;
                    } else {
                        result.selected_link = max - 1;
                    }
                }
            }
            Screen::AccountResult(result) => {
                if result.selected_index > 0 {
                    result.selected_index -= 1;
                }
            }
            Screen::WitnessList(list) => {
                if list.selected_index > 0 {
                    list.selected_index -= 1;
                } else if list.page > 0 {
                    list.prev_page();
                    list.selected_index = list.page_items().len().saturating_sub(1);
                }
            }
            _ => {}
        }
    }

    /// Move selection down
    pub fn select_next(&mut self) {
        match &mut self.screen {
            Screen::BlockResult(result) => {
                let len = if result.list_mode {
                    result.op_count()
                } else {
                    result.info_links().len()
                };
                if len > 0 && result.selected_index < len - 1 {
                    result.selected_index += 1;
                }
            }
            Screen::TxResult(result) => {
                let max = result.links().len();
                if max > 0 {
                    result.selected_link = (result.selected_link + 1) % max;
                }
            }
            Screen::AccountResult(result) => {
                let len = result.info.history.len();
                if len > 0 && result.selected_index < len - 1 {
                    result.selected_index += 1;
                }
            }
            Screen::WitnessList(list) => {
                let len = list.page_items().len();
                if len > 0 && list.selected_index < len - 1 {
                    list.selected_index += 1;
                } else {
                    list.next_page();
                }
            }
            _ => {}
        }
    }

    /// Toggle between list mode and link mode (for blocks)
    pub fn toggle_mode(&mut self) {
        if let Screen::BlockResult(result) = &mut self.screen {
            result.list_mode = !result.list_mode;
            result.selected_index = 0;
        }
    }

    pub fn next_page(&mut self) {
        if let Screen::WitnessList(list) = &mut self.screen {
            list.next_page();
        }
    }

    pub fn prev_page(&mut self) {
        if let Screen::WitnessList(list) = &mut self.screen {
            list.prev_page();
        }
    }

    /// Get the currently selected navigation link
    pub fn get_selected_link(&self) -> Option<NavLink> {
        match &self.screen {
            Screen::BlockResult(result) => {
                if result.list_mode {
                    result
                        .ops()
                        .nth(result.selected_index)
                        .and_then(NavLink::from_block_op)
                } else {
                    result.info_links().get(result.selected_index).cloned()
                }
            }
            Screen::TxResult(result) => result.links().get(result.selected_link).cloned(),
            Screen::AccountResult(result) => result
                .info
                .history
                .get(result.selected_index)
                .and_then(NavLink::from_history_op),
            Screen::WitnessList(list) => list
                .selected()
                .map(|w| NavLink::Account(w.owner.clone())),
            _ => None,
        }
    }
}
