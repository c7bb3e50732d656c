use steemblocks::app::{head_advanced, App, NavLink, LATEST_BLOCKS_COUNT, WITNESS_LIMIT};
use steemblocks::config::Config;
use steemblocks::route::Route;
use steemblocks::rpc::{AccountInfo, BlockInfo, BlockSummary, NetworkInfo, TxInfo, WitnessInfo};
use steemblocks::search::classify;
use steemblocks::ui;

use anyhow::{anyhow, Context, Result};
use ratatui::{
    crossterm::{
        event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    },
    prelude::*,
};
use std::fs::OpenOptions;
use std::io::stdout;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tui_input::backend::crossterm::EventHandler;

const LOG_FILE: &str = "steemblocks.log";

#[tokio::main]
async fn main() -> Result<()> {
    // The TUI owns the terminal, so logs go to a file
    if let Err(e) = init_logging() {
        eprintln!("steemblocks: logging disabled: {e:#}");
    }

    let config = Config::load()?;
    log::info!(
        "starting with RPC node {} (refresh every {}s)",
        config.rpc_url,
        config.refresh_secs
    );

    run_tui(config).await?;

    Ok(())
}

/// Log to `<config dir>/steemblocks.log`, filtered by `RUST_LOG` (default `info`)
fn init_logging() -> Result<()> {
    let dir = Config::config_dir()?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create config directory {dir:?}"))?;

    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {path:?}"))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("Failed to install logger")?;

    Ok(())
}

/// Messages from async tasks back to the main loop
enum AsyncMessage {
    BlockResult(Result<BlockInfo>),
    TxResult(Result<TxInfo>),
    AccountResult(Result<AccountInfo>),
    Witnesses(Result<Vec<WitnessInfo>>),
    // Blocks are None when the head has not moved since the last refresh
    Refresh(Result<(NetworkInfo, Option<Vec<BlockSummary>>)>),
}

async fn run_tui(config: Config) -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = App::new(config);

    let (tx, mut rx) = mpsc::channel::<AsyncMessage>(10);

    let result = run_event_loop(&mut terminal, &mut app, tx, &mut rx).await;

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    tx: mpsc::Sender<AsyncMessage>,
    rx: &mut mpsc::Receiver<AsyncMessage>,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Live network status and latest blocks, only while on the home screen
        if app.should_refresh(Instant::now()) {
            spawn_refresh(app, tx.clone());
        }

        // Check for async results
        while let Ok(msg) = rx.try_recv() {
            match msg {
                AsyncMessage::BlockResult(Ok(info)) => app.set_block_result(info),
                AsyncMessage::TxResult(Ok(info)) => app.set_tx_result(info),
                AsyncMessage::AccountResult(Ok(info)) => app.set_account_result(info),
                AsyncMessage::Witnesses(Ok(witnesses)) => app.set_witness_list(witnesses),
                AsyncMessage::Refresh(Ok((info, blocks))) => {
                    app.refresh_in_flight = false;
                    app.set_network_info(info);
                    if let Some(blocks) = blocks {
                        app.set_latest_blocks(blocks);
                    }
                }
                AsyncMessage::BlockResult(Err(e))
                | AsyncMessage::TxResult(Err(e))
                | AsyncMessage::AccountResult(Err(e))
                | AsyncMessage::Witnesses(Err(e)) => {
                    log::error!("lookup failed: {e:#}");
                    // Use {:#} to get full error chain from anyhow
                    app.set_error(format!("{e:#}"));
                }
                AsyncMessage::Refresh(Err(e)) => {
                    // The home screen keeps the last known state
                    app.refresh_in_flight = false;
                    log::warn!("refresh failed: {e:#}");
                }
            }
        }

        // Poll for input events
        if event::poll(Duration::from_millis(50))? {
            let ev = event::read()?;

            if let Event::Key(key) = &ev {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // Global keys
                match key.code {
                    KeyCode::Esc => {
                        app.should_quit = true;
                    }
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        app.should_quit = true;
                    }
                    _ => {}
                }

                // Screen-specific keys
                if app.is_on_home() {
                    match key.code {
                        KeyCode::Enter => {
                            // Check if a history item is selected
                            if let Some(query) = app.get_selected_history_query() {
                                app.clear_history_selection();
                                app.remember_search(&query);
                                execute_search(app, &query, tx.clone());
                            } else if let Some(query) = app.submit_search() {
                                app.remember_search(&query);
                                execute_search(app, &query, tx.clone());
                            }
                        }
                        KeyCode::Tab => {
                            open_witnesses(app, tx.clone());
                        }
                        KeyCode::Up => {
                            app.select_history_prev();
                        }
                        KeyCode::Down => {
                            app.select_history_next();
                        }
                        KeyCode::Delete | KeyCode::Backspace
                            if app.selected_history_index.is_some() =>
                        {
                            app.delete_selected_history();
                        }
                        KeyCode::Esc => {}
                        _ => {
                            // Any other key clears history selection and goes to search
                            app.clear_history_selection();
                            app.search_input.handle_event(&ev);
                        }
                    }
                } else if !app.is_loading() {
                    match key.code {
                        KeyCode::Up | KeyCode::Char('k') => {
                            app.select_prev();
                        }
                        KeyCode::Down | KeyCode::Char('j') => {
                            app.select_next();
                        }
                        KeyCode::Right | KeyCode::Char('n') => {
                            app.next_page();
                        }
                        KeyCode::Left | KeyCode::Char('p') => {
                            app.prev_page();
                        }
                        KeyCode::Tab => {
                            app.toggle_mode();
                        }
                        KeyCode::Enter => {
                            if let Some(link) = app.get_selected_link() {
                                navigate_to_link(app, link, tx.clone());
                            }
                        }
                        KeyCode::Backspace | KeyCode::Char('b') => {
                            app.go_back();
                        }
                        KeyCode::Char('h') => {
                            app.go_home();
                        }
                        _ => {}
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn with_node(e: anyhow::Error, node: &str) -> anyhow::Error {
    anyhow!("{e:#}\n\nRPC: {node}")
}

fn spawn_refresh(app: &mut App, tx: mpsc::Sender<AsyncMessage>) {
    let Some(client) = app.rpc_client.clone() else {
        return;
    };
    app.refresh_in_flight = true;
    let known_head = app.latest_head();

    tokio::spawn(async move {
        let result: Result<(NetworkInfo, Option<Vec<BlockSummary>>)> = async {
            let info = client.get_network_info().await?;
            if !head_advanced(known_head, info.head_block) {
                return Ok((info, None));
            }
            let blocks = client
                .get_latest_blocks(info.head_block, LATEST_BLOCKS_COUNT)
                .await;
            Ok((info, Some(blocks)))
        }
        .await;
        let _ = tx.send(AsyncMessage::Refresh(result)).await;
    });
}

fn open_witnesses(app: &mut App, tx: mpsc::Sender<AsyncMessage>) {
    let Some(client) = app.rpc_client.clone() else {
        let msg = no_rpc_message(app);
        app.set_error(msg);
        return;
    };

    app.set_loading("Fetching witnesses...");
    tokio::spawn(async move {
        let node = client.url().to_string();
        let result = client
            .get_witnesses(WITNESS_LIMIT)
            .await
            .map_err(|e| with_node(e, &node));
        let _ = tx.send(AsyncMessage::Witnesses(result)).await;
    });
}

fn navigate_to_link(app: &mut App, link: NavLink, tx: mpsc::Sender<AsyncMessage>) {
    let route = link.route();
    log::info!("following link -> {}", route.path());
    open_route(app, route, tx);
}

fn no_rpc_message(app: &App) -> String {
    format!(
        "No usable RPC node: {}\n\nSet rpc_url in the config file or {}.",
        app.rpc_error.as_deref().unwrap_or(app.rpc_url()),
        steemblocks::config::RPC_ENV_VAR
    )
}

fn execute_search(app: &mut App, query: &str, tx: mpsc::Sender<AsyncMessage>) {
    let intent = classify(query);
    if intent.is_fallback() {
        log::debug!(
            "{query:?} matched no pattern, trying it as {}",
            intent.kind().as_str()
        );
    }

    let route = match Route::from_intent(&intent) {
        Ok(route) => route,
        Err(e) => {
            log::info!("rejected {}: {e}", intent.description());
            app.set_error(e.to_string());
            return;
        }
    };
    log::info!("{} -> {}", intent.description(), route.path());
    open_route(app, route, tx);
}

fn open_route(app: &mut App, route: Route, tx: mpsc::Sender<AsyncMessage>) {
    let Some(client) = app.rpc_client.clone() else {
        let msg = no_rpc_message(app);
        app.set_error(msg);
        return;
    };

    app.set_loading(&route.loading_message());

    tokio::spawn(async move {
        let node = client.url().to_string();
        let msg = match route {
            Route::Block(num) => AsyncMessage::BlockResult(
                client.get_block(num).await.map_err(|e| with_node(e, &node)),
            ),
            Route::Transaction(id) => AsyncMessage::TxResult(
                client
                    .get_transaction(&id)
                    .await
                    .map_err(|e| with_node(e, &node)),
            ),
            Route::Account(name) => AsyncMessage::AccountResult(
                client
                    .get_account(&name)
                    .await
                    .map_err(|e| with_node(e, &node)),
            ),
        };
        let _ = tx.send(msg).await;
    });
}
