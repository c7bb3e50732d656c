use super::helper::*;

use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::ui::NAV_HELP;

use crate::app::{BlockResult, NavLink};

pub fn draw_block_result(frame: &mut Frame, result: &BlockResult) {
    let area = frame.area();
    let info = &result.info;
    let padded = padded_rect(area, 1);

    let block_info_height: u16 = 12;

    // Operation list: 1 line per op plus borders and header, at least 3 ops,
    // at most half the terminal
    let min_op_height: u16 = 6;
    let max_op_height = padded.height / 2;
    let remaining = padded.height.saturating_sub(block_info_height + 1); // +1 for nav help
    let op_list_height = remaining.max(min_op_height).min(max_op_height);

    let chunks = Layout::vertical([
        Constraint::Length(padded.height.saturating_sub(op_list_height + 1)),
        Constraint::Length(op_list_height),
        Constraint::Length(1),
    ])
    .split(padded);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" 📦 Block #{} ", info.number));

    let link_selected = |idx: usize| !result.list_mode && result.selected_index == idx;

    let mut lines = vec![
        format_kv("Block ID", &info.block_id),
        format_kv("Timestamp", &format_time_full(info.timestamp)),
        format_kv_link("Witness", &format!("@{}", info.witness), link_selected(0)),
    ];

    if info.number > 1 {
        lines.push(format_kv_link(
            "Previous",
            &format!("#{} ({})", info.number - 1, truncate_hash(&info.previous)),
            link_selected(1),
        ));
    } else {
        lines.push(format_kv("Previous", "Genesis"));
    }

    lines.push(Line::from(""));
    lines.push(format_kv("Transactions", &info.tx_count.to_string()));
    lines.push(format_kv("Operations", &info.operations.len().to_string()));
    lines.push(format_kv("Virtual Ops", &info.virtual_ops.len().to_string()));
    lines.push(Line::from(""));
    lines.push(format_kv("Merkle Root", &info.merkle_root));
    if !info.signing_key.is_empty() {
        lines.push(format_kv("Signing Key", &info.signing_key));
    }

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, chunks[0]);

    let op_count = result.op_count();
    let op_title = if result.list_mode {
        format!(" Operations ({op_count}) [selected] ")
    } else {
        format!(" Operations ({op_count}) [Tab to select] ")
    };

    let op_block = Block::default()
        .borders(Borders::ALL)
        .border_style(if result.list_mode {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        })
        .title(op_title);

    if op_count == 0 {
        let empty_msg = Paragraph::new("No operations in this block")
            .block(op_block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty_msg, chunks[1]);
    } else {
        let visible_count = (chunks[1].height.saturating_sub(3)) as usize; // -2 borders, -1 header
        let start = result.selected_index.saturating_sub(visible_count / 2);

        let mut items: Vec<ListItem> = vec![format_op_list_header()];

        items.extend(
            result
                .ops()
                .enumerate()
                .skip(start)
                .take(visible_count)
                .map(|(i, op)| {
                    let is_selected = result.list_mode && i == result.selected_index;
                    let link = NavLink::from_block_op(op);
                    format_op_list_item(i, op, link.as_ref(), is_selected)
                }),
        );

        let list = List::new(items).block(op_block);
        frame.render_widget(list, chunks[1]);
    }

    let help = Paragraph::new(NAV_HELP)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[2]);
}
