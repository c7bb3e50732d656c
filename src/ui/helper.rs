use chrono::DateTime;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::ListItem,
};

use crate::app::NavLink;
use crate::rpc::{Asset, OpSummary};

// ============================================================================
// Helper Functions
// ============================================================================

pub fn truncate_hash(hash: &str) -> String {
    if hash.len() > 20 {
        format!("{}...{}", &hash[..10], &hash[hash.len() - 6..])
    } else {
        hash.to_string()
    }
}

/// Cut free text to `max` characters, marking the cut with `…`
pub fn truncate_text(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let kept: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{kept}…")
    } else {
        text.to_string()
    }
}

/// Short label for where a link leads
pub fn link_label(link: &NavLink) -> String {
    match link {
        NavLink::Account(name) => format!("@{name}"),
        NavLink::Block(num) => format!("#{num}"),
        NavLink::Transaction(id) => truncate_hash(id),
    }
}

pub fn format_op_list_item<'a>(
    index: usize,
    op: &OpSummary,
    link: Option<&NavLink>,
    selected: bool,
) -> ListItem<'a> {
    let name_style = if op.is_virtual {
        Style::default().fg(Color::Magenta)
    } else {
        Style::default().fg(Color::Yellow)
    };

    let target = link.map(link_label).unwrap_or_else(|| "—".to_string());

    let line = Line::from(vec![
        Span::styled(
            format!("{index:>3} "),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(format!("{:<24}", truncate_text(&op.name, 24)), name_style),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{:<19}", target),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            truncate_text(&op.description, 80),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let style = if selected {
        Style::default().bg(Color::Cyan).fg(Color::Black)
    } else {
        Style::default()
    };

    ListItem::new(line).style(style)
}

pub fn format_op_list_header<'a>() -> ListItem<'a> {
    let line = Line::from(vec![
        Span::styled("    ", Style::default()),
        Span::styled(
            format!("{:<24}", "Operation"),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{:<19}", "Link"),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled("Details", Style::default().fg(Color::DarkGray)),
    ]);

    ListItem::new(line).style(Style::default())
}

pub fn format_kv(key: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key}: "), Style::default().fg(Color::DarkGray)),
        Span::styled(value.to_string(), Style::default().fg(Color::White)),
    ])
}

pub fn format_kv_link(key: &str, value: &str, selected: bool) -> Line<'static> {
    let style = if selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::UNDERLINED)
    };

    Line::from(vec![
        Span::styled(format!("{key}: "), Style::default().fg(Color::DarkGray)),
        Span::styled(value.to_string(), style),
    ])
}

pub fn format_time_ago(ts: u64, now: u64) -> String {
    let secs_ago = now.saturating_sub(ts);

    if secs_ago < 60 {
        format!("{secs_ago} secs ago")
    } else if secs_ago < 3600 {
        format!("{} mins ago", secs_ago / 60)
    } else if secs_ago < 86400 {
        format!("{} hours ago", secs_ago / 3600)
    } else {
        format!("{} days ago", secs_ago / 86400)
    }
}

pub fn format_timestamp(ts: u64) -> String {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format_time_ago(ts, now)
}

pub fn format_utc(ts: u64) -> String {
    i64::try_from(ts)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "—".to_string())
}

/// Absolute time followed by the relative age
pub fn format_time_full(ts: u64) -> String {
    format!("{} ({})", format_utc(ts), format_timestamp(ts))
}

/// Fixed decimals with `,` thousands separators
pub fn format_amount(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (whole, frac) = match formatted.split_once('.') {
        Some((whole, frac)) => (whole, Some(frac)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // No "-0.000"
    let is_zero = formatted.chars().all(|c| c == '0' || c == '.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    match frac {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

pub fn format_asset(asset: &Asset) -> String {
    format!("{} {}", format_amount(asset.amount, 3), asset.symbol)
}

pub fn format_sp(sp: f64) -> String {
    format!("{} SP", format_amount(sp, 3))
}

/// Vote weight in millions of VESTS
pub fn format_mvests(mvests: f64) -> String {
    format!("{} MV", format_amount(mvests, 0))
}

pub fn centered_rect(percent_x: u16, area: Rect) -> Rect {
    let popup_layout = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(area);

    popup_layout[1]
}

pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Length(height),
        Constraint::Fill(1),
        Constraint::Fill(1),
    ])
    .split(area);

    let horizontal = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width),
        Constraint::Fill(1),
    ])
    .split(vertical[1]);

    horizontal[1]
}

pub fn padded_rect(area: Rect, padding: u16) -> Rect {
    Rect {
        x: area.x + padding,
        y: area.y + padding,
        width: area.width.saturating_sub(padding * 2),
        height: area.height.saturating_sub(padding * 2),
    }
}
