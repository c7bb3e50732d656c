mod account_page;
mod block_page;
mod helper;
mod tx_page;
mod witness_page;

use account_page::draw_account_result;
use block_page::draw_block_result;
use helper::*;
use tx_page::draw_tx_result;
use witness_page::draw_witness_list;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::{App, Screen};
use crate::rpc::{BlockSummary, NetworkInfo};

const TITLE_ART: &str = r#"
███████╗████████╗███████╗███████╗███╗   ███╗
██╔════╝╚══██╔══╝██╔════╝██╔════╝████╗ ████║
███████╗   ██║   █████╗  █████╗  ██╔████╔██║
╚════██║   ██║   ██╔══╝  ██╔══╝  ██║╚██╔╝██║
███████║   ██║   ███████╗███████╗██║ ╚═╝ ██║
╚══════╝   ╚═╝   ╚══════╝╚══════╝╚═╝     ╚═╝
"#;

const SUBTITLE: &str = "blocks • Terminal Steem Block Explorer";

const NAV_HELP: &str = "↑↓ navigate • Enter select • Tab toggle • b back • h home • Esc quit";
const NAV_HELP_SIMPLE: &str = "↑↓ navigate • Enter select • b back • h home • Esc quit";
const NAV_HELP_NO_LIST: &str = "b back • h home • Esc quit";

pub fn draw(frame: &mut Frame, app: &App) {
    match &app.screen {
        Screen::Home => draw_home(frame, app),
        Screen::Loading(msg) => draw_loading(frame, msg),
        Screen::BlockResult(result) => draw_block_result(frame, result),
        Screen::TxResult(result) => draw_tx_result(frame, result),
        Screen::AccountResult(result) => draw_account_result(frame, result),
        Screen::WitnessList(list) => draw_witness_list(frame, list),
        Screen::Error(msg) => draw_error(frame, msg),
    }
}

fn draw_home(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let recent_searches = app.get_recent_searches();
    let has_history = !recent_searches.is_empty();

    // Calculate history section height (max 5 items + 2 for border)
    let history_height = if has_history {
        (recent_searches.len().min(5) + 2) as u16
    } else {
        0
    };

    let chunks = Layout::vertical([
        Constraint::Length(8),              // Title
        Constraint::Length(1),              // Subtitle
        Constraint::Length(1),              // Spacing
        Constraint::Length(3),              // Search bar
        Constraint::Length(history_height), // History
        Constraint::Length(1),              // RPC status
        Constraint::Length(1),              // Help
        Constraint::Min(0),                 // Network + latest blocks
    ])
    .split(area);

    let title = Paragraph::new(TITLE_ART)
        .style(Style::default().fg(Color::Cyan).bold())
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let subtitle = Paragraph::new(SUBTITLE)
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    frame.render_widget(subtitle, chunks[1]);

    let search_area = centered_rect(60, chunks[3]);
    let search_selected = app.selected_history_index.is_none();
    draw_search_bar_with_selection(frame, app, search_area, search_selected);

    if has_history {
        let history_area = centered_rect(60, chunks[4]);
        draw_history_list(frame, app, history_area);
    }

    let rpc_status = match &app.rpc_error {
        None => Line::from(vec![
            Span::styled("RPC: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                truncate_text(app.rpc_url(), 50),
                Style::default().fg(Color::Green),
            ),
        ]),
        Some(err) => Line::from(vec![
            Span::styled("RPC: ", Style::default().fg(Color::DarkGray)),
            Span::styled(truncate_text(err, 70), Style::default().fg(Color::Yellow)),
        ]),
    };
    let rpc_widget = Paragraph::new(rpc_status).alignment(Alignment::Center);
    frame.render_widget(rpc_widget, chunks[5]);

    let help_text = if has_history {
        "Enter search • ↑↓ history • Del remove • Tab witnesses • Esc quit"
    } else {
        "Enter to search • Tab witnesses • Esc to quit"
    };
    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[6]);

    let bottom = Layout::vertical([
        Constraint::Length(if app.network_info.is_some() { 3 } else { 0 }),
        Constraint::Min(0),
    ])
    .split(chunks[7]);

    if let Some(info) = &app.network_info {
        draw_network_status(frame, info, bottom[0]);
    }

    if !app.latest_blocks.is_empty() {
        draw_latest_blocks(frame, &app.latest_blocks, centered_rect(80, bottom[1]));
    }
}

fn draw_network_status(frame: &mut Frame, info: &NetworkInfo, area: Rect) {
    let net_block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Network Status ");

    let lines = vec![
        Line::from(vec![
            Span::styled("Head: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("#{}", info.head_block),
                Style::default().fg(Color::White),
            ),
            Span::raw("  "),
            Span::styled("Irreversible: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("#{} (-{})", info.irreversible_block, info.irreversible_lag()),
                Style::default().fg(Color::White),
            ),
            Span::raw("  "),
            Span::styled("Witness: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("@{}", info.current_witness),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        Line::from(vec![
            Span::styled("Supply: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format_asset(&info.current_supply),
                Style::default().fg(Color::Gray),
            ),
            Span::raw("  "),
            Span::styled("SBD: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format_asset(&info.sbd_supply),
                Style::default().fg(Color::Gray),
            ),
            Span::raw("  "),
            Span::styled("STEEM/MV: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format_amount(info.steem_per_mvests(), 3),
                Style::default().fg(Color::Gray),
            ),
        ]),
    ];

    let net_para = Paragraph::new(lines)
        .block(net_block)
        .alignment(Alignment::Center);
    frame.render_widget(net_para, area);
}

fn draw_latest_blocks(frame: &mut Frame, blocks: &[BlockSummary], area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Latest Blocks ");

    let items: Vec<ListItem> = blocks
        .iter()
        .map(|b| {
            let number_style = if b.is_new {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let marker = if b.is_new { "●" } else { " " };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{marker} "), Style::default().fg(Color::Green)),
                Span::styled(format!("#{:<10}", b.number), number_style),
                Span::styled(
                    format!("@{:<17}", b.witness),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(
                    format!("{:>3} txs {:>4} ops", b.tx_count, b.op_count),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(
                    format!("  {}", format_timestamp(b.timestamp)),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn draw_search_bar_with_selection(frame: &mut Frame, app: &App, area: Rect, selected: bool) {
    let border_color = if selected {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" 🔍 Search ")
        .title_style(Style::default().fg(border_color));

    let inner_width = area.width.saturating_sub(2) as usize;
    let scroll = app.search_input.visual_scroll(inner_width);

    let display_text = if app.search_input.value().is_empty() {
        Span::styled(
            "Search by Block / Transaction ID / Account",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::styled(app.search_input.value(), Style::default().fg(Color::White))
    };

    let input = Paragraph::new(display_text)
        .block(block)
        .scroll((0, scroll as u16));

    frame.render_widget(input, area);

    // Only show cursor if search bar is selected
    if selected {
        let cursor_x =
            area.x + 1 + (app.search_input.visual_cursor().saturating_sub(scroll)) as u16;
        let cursor_y = area.y + 1;

        if cursor_x < area.x + area.width.saturating_sub(1) {
            frame.set_cursor_position((cursor_x, cursor_y));
        }
    }
}

fn draw_history_list(frame: &mut Frame, app: &App, area: Rect) {
    let recent_searches = app.get_recent_searches();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Recent Searches ");

    let items: Vec<ListItem> = recent_searches
        .iter()
        .enumerate()
        .take(5)
        .map(|(i, query)| {
            let is_selected = app.selected_history_index == Some(i);
            let style = if is_selected {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default().fg(Color::Gray)
            };

            ListItem::new(format!(" {}", truncate_text(query, 60))).style(style)
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

fn draw_loading(frame: &mut Frame, msg: &str) {
    let area = frame.area();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Loading ");

    let spinner_frames = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
    let idx = (std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
        / 100) as usize
        % spinner_frames.len();

    let text = format!("{} {}", spinner_frames[idx], msg);
    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow));

    let centered = centered_rect_fixed(50, 5, area);
    frame.render_widget(paragraph, centered);
}

fn draw_error(frame: &mut Frame, msg: &str) {
    let area = frame.area();
    let padded = padded_rect(area, 1);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" ❌ Error ");

    let mut lines: Vec<Line> = msg
        .lines()
        .map(|line| Line::from(line.to_string()).fg(Color::Red))
        .collect();

    lines.push(Line::from(""));
    lines.push(Line::from(NAV_HELP_NO_LIST).fg(Color::DarkGray));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(ratatui::widgets::Wrap { trim: false });

    frame.render_widget(paragraph, padded);
}
