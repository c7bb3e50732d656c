use super::helper::*;
use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::TxResult;
use crate::ui::NAV_HELP_SIMPLE;

pub fn draw_tx_result(frame: &mut Frame, result: &TxResult) {
    let area = frame.area();
    let info = &result.info;

    let chunks = Layout::vertical([
        Constraint::Min(12),   // Tx info
        Constraint::Length(1), // Nav help
    ])
    .split(padded_rect(area, 1));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(
            " 📄 Transaction ({} op{}) ",
            info.operations.len(),
            if info.operations.len() == 1 { "" } else { "s" }
        ));

    let mut link_idx = 0;

    let mut lines = vec![format_kv("Transaction ID", &info.id)];

    match info.block_num {
        Some(block_num) => {
            lines.push(format_kv_link(
                "Block",
                &format!("#{block_num}"),
                result.selected_link == link_idx,
            ));
            link_idx += 1;
        }
        None => lines.push(format_kv("Block", "Pending")),
    }

    if let Some(pos) = info.transaction_num {
        lines.push(format_kv("Position in Block", &pos.to_string()));
    }

    lines.push(format_kv(
        "Ref Block",
        &format!("{} / {}", info.ref_block_num, info.ref_block_prefix),
    ));
    if let Some(exp) = info.expiration {
        lines.push(format_kv("Expiration", &format_utc(exp)));
    }
    lines.push(format_kv("Signatures", &info.signatures.to_string()));

    lines.push(Line::from(""));
    lines.push(Line::from(vec![Span::styled(
        "── Operations ──",
        Style::default().fg(Color::Yellow),
    )]));

    for (i, op) in info.operations.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("{i:>3} "), Style::default().fg(Color::DarkGray)),
            Span::styled(
                op.name.clone(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  ", Style::default()),
            Span::styled(op.description.clone(), Style::default().fg(Color::Gray)),
        ]));

        for account in &op.accounts {
            lines.push(format_kv_link(
                "      Account",
                &format!("@{account}"),
                result.selected_link == link_idx,
            ));
            link_idx += 1;
        }
    }

    if info.operations.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No operations",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, chunks[0]);

    let help = Paragraph::new(NAV_HELP_SIMPLE)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[1]);
}
