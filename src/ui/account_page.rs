use super::helper::*;
use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::{AccountResult, NavLink};
use crate::ui::{NAV_HELP_NO_LIST, NAV_HELP_SIMPLE};

pub fn draw_account_result(frame: &mut Frame, result: &AccountResult) {
    let area = frame.area();
    let info = &result.info;
    let padded = padded_rect(area, 1);

    let history_height = ((info.history.len() as u16) + 3)
        .max(5)
        .min(padded.height / 2);

    let chunks = Layout::vertical([
        Constraint::Min(10),                // Account info
        Constraint::Length(history_height), // History
        Constraint::Length(1),              // Nav help
    ])
    .split(padded);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" 👤 @{} ", info.name));

    let mut lines = vec![];

    if let Some(name) = &info.profile.name {
        lines.push(Line::from(vec![Span::styled(
            name.clone(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )]));
    }
    if let Some(about) = &info.profile.about {
        lines.push(Line::from(Span::styled(
            truncate_text(about, 120),
            Style::default().fg(Color::Gray),
        )));
    }
    if let Some(location) = &info.profile.location {
        lines.push(format_kv("Location", location));
    }
    if let Some(website) = &info.profile.website {
        lines.push(format_kv("Website", website));
    }

    lines.push(format_kv("Reputation", &format!("{:.0}", info.reputation.floor())));
    if let Some(created) = info.created {
        lines.push(format_kv("Created", &format_time_full(created)));
    }
    lines.push(format_kv("Posts", &info.post_count.to_string()));

    lines.push(Line::from(""));
    lines.push(Line::from(vec![Span::styled(
        "── Wallet ──",
        Style::default().fg(Color::Yellow),
    )]));
    lines.push(format_kv("STEEM", &format_asset(&info.balance)));
    lines.push(format_kv("SBD", &format_asset(&info.sbd_balance)));
    lines.push(format_kv(
        "Savings",
        &format!(
            "{} / {}",
            format_asset(&info.savings_balance),
            format_asset(&info.savings_sbd_balance)
        ),
    ));
    lines.push(format_kv("Steem Power", &format_sp(info.own_sp)));
    if info.delegated_out_sp > 0.0 || info.received_sp > 0.0 {
        lines.push(format_kv(
            "Delegations",
            &format!(
                "-{} / +{}",
                format_sp(info.delegated_out_sp),
                format_sp(info.received_sp)
            ),
        ));
        lines.push(format_kv("Effective SP", &format_sp(info.effective_sp())));
    }

    lines.push(Line::from(""));
    if !info.recovery_account.is_empty() {
        lines.push(format_kv("Recovery", &format!("@{}", info.recovery_account)));
    }
    if let Some(proxy) = &info.proxy {
        lines.push(format_kv("Witness Proxy", &format!("@{proxy}")));
    }
    let votes = if info.witness_votes.is_empty() {
        "none".to_string()
    } else {
        format!(
            "{} ({})",
            info.witness_votes.len(),
            truncate_text(&info.witness_votes.join(", "), 80)
        )
    };
    lines.push(format_kv("Witness Votes", &votes));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, chunks[0]);

    let history_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" Recent Activity ({}) ", info.history.len()));

    if info.history.is_empty() {
        let empty_msg = Paragraph::new("No recent activity")
            .block(history_block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty_msg, chunks[1]);
    } else {
        let visible_count = (chunks[1].height.saturating_sub(3)) as usize;
        let start = result.selected_index.saturating_sub(visible_count / 2);

        let mut items: Vec<ListItem> = vec![format_op_list_header()];
        items.extend(
            info.history
                .iter()
                .enumerate()
                .skip(start)
                .take(visible_count)
                .map(|(i, op)| {
                    let link = NavLink::from_history_op(op);
                    format_op_list_item(i, op, link.as_ref(), i == result.selected_index)
                }),
        );

        let list = List::new(items).block(history_block);
        frame.render_widget(list, chunks[1]);
    }

    let nav_help = if info.history.is_empty() {
        NAV_HELP_NO_LIST
    } else {
        NAV_HELP_SIMPLE
    };

    let help = Paragraph::new(nav_help)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[2]);
}
