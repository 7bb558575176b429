//! Shared styles for the dashboard widgets.

use credscope_core::NoticeLevel;
use credscope_models::Severity;
use ratatui::style::{Color, Modifier, Style};

pub fn header() -> Style {
    Style::default().fg(Color::Black).bg(Color::Cyan)
}

pub fn table_heading() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub fn selected_row() -> Style {
    Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

pub fn valid_mark(valid: bool) -> Style {
    if valid {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Red)
    }
}

pub fn severity(severity: Option<Severity>) -> Style {
    match severity {
        Some(Severity::MenosGrave) => Style::default().fg(Color::Yellow),
        Some(Severity::Grave) => Style::default().fg(Color::LightRed),
        Some(Severity::MuitoGrave) => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        None => Style::default().fg(Color::DarkGray),
    }
}

pub fn notice(level: NoticeLevel) -> Style {
    match level {
        NoticeLevel::Info => Style::default().fg(Color::Gray),
        NoticeLevel::Success => Style::default().fg(Color::Green),
        NoticeLevel::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}

pub fn prompt() -> Style {
    Style::default().fg(Color::Yellow)
}

pub fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}
