use super::helper::*;
use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::{WitnessList, WITNESS_PAGE_SIZE};
use crate::rpc::WitnessInfo;

const NAV_HELP_PAGED: &str = "↑↓ navigate • n/p page • Enter select • b back • h home • Esc quit";

fn format_witness_item<'a>(witness: &WitnessInfo, selected: bool) -> ListItem<'a> {
    let owner_style = if witness.active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let feed = witness
        .price_feed
        .map(|p| format!("${p:.3}"))
        .unwrap_or_else(|| "—".to_string());

    let line = Line::from(vec![
        Span::styled(
            format!("{:>4} ", witness.rank),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(format!("{:<17}", witness.owner), owner_style),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{:>14}", format_mvests(witness.votes_mvests)),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{:>8}", witness.version),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(format!("{feed:>8}"), Style::default().fg(Color::Green)),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{:>8}", format_amount(witness.total_missed as f64, 0)),
            Style::default().fg(Color::Red),
        ),
    ]);

    let style = if selected {
        Style::default().bg(Color::Cyan).fg(Color::Black)
    } else {
        Style::default()
    };

    ListItem::new(line).style(style)
}

fn format_witness_header<'a>() -> ListItem<'a> {
    let header = Style::default().fg(Color::DarkGray);
    ListItem::new(Line::from(vec![
        Span::styled(format!("{:>4} ", "#"), header),
        Span::styled(format!("{:<17}", "Witness"), header),
        Span::styled(" │ ", header),
        Span::styled(format!("{:>14}", "Votes"), header),
        Span::styled(" │ ", header),
        Span::styled(format!("{:>8}", "Version"), header),
        Span::styled(" │ ", header),
        Span::styled(format!("{:>8}", "Feed"), header),
        Span::styled(" │ ", header),
        Span::styled(format!("{:>8}", "Missed"), header),
    ]))
}

pub fn draw_witness_list(frame: &mut Frame, list: &WitnessList) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Min(5),    // Witness table
        Constraint::Length(1), // Nav help
    ])
    .split(padded_rect(area, 1));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(
            " 🏛 Witnesses (page {}/{}) ",
            list.page + 1,
            list.page_count()
        ));

    if list.witnesses.is_empty() {
        let empty_msg = Paragraph::new("No witnesses returned by the node")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty_msg, chunks[0]);
    } else {
        let visible_count = (chunks[0].height.saturating_sub(3)) as usize; // -2 borders, -1 header
        let start = list.selected_index.saturating_sub(visible_count / 2);

        let mut items: Vec<ListItem> = vec![format_witness_header()];
        items.extend(
            list.page_items()
                .iter()
                .take(WITNESS_PAGE_SIZE)
                .enumerate()
                .skip(start)
                .take(visible_count)
                .map(|(i, w)| format_witness_item(w, i == list.selected_index)),
        );

        let table = List::new(items).block(block);
        frame.render_widget(table, chunks[0]);
    }

    let help = Paragraph::new(NAV_HELP_PAGED)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[1]);
}
