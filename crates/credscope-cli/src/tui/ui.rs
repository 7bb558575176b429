//! Rendering for the records dashboard.

use super::app::{App, Mode};
use super::theme;
use credscope_core::rows::ABBREVIATION_BUDGET;
use credscope_core::{SortDirection, abbreviate, extract_domain, is_truncated};
use credscope_models::{Record, Severity};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, List, ListItem, Paragraph, Row, Table};

pub fn draw(frame: &mut Frame, app: &mut App) {
    let [header_area, table_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_header(frame, header_area, app);
    draw_table(frame, table_area, app);
    draw_status(frame, status_area, app);

    match app.mode {
        Mode::SeverityPicker => draw_severity_picker(frame, app),
        Mode::Help => draw_help(frame),
        _ => {}
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let loading = if app.session.is_loading() {
        " [loading]"
    } else {
        ""
    };
    let text = format!(
        " credscope - {} - {} records{loading}",
        app.server_url, app.session.pager.total_elements
    );
    frame.render_widget(Paragraph::new(text).style(theme::header()), area);
}

fn draw_table(frame: &mut Frame, area: Rect, app: &mut App) {
    let heading = Row::new(vec![
        "Email", "Password", "URL", "Domain", "Valid", "Severity",
    ])
    .style(theme::table_heading());

    let rows: Vec<Row> = app
        .session
        .visible()
        .iter()
        .map(|record| record_row(record))
        .collect();

    let widths = [
        Constraint::Length(20),
        Constraint::Length(20),
        Constraint::Min(20),
        Constraint::Length(18),
        Constraint::Length(5),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths)
        .header(heading)
        .block(Block::default().borders(Borders::ALL))
        .row_highlight_style(theme::selected_row())
        .highlight_symbol("> ");

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

/// Abbreviated cell text with a copy marker when the value is cut off.
fn abbreviated_cell(value: &str) -> String {
    if is_truncated(value, ABBREVIATION_BUDGET) {
        format!("{} +", abbreviate(value, ABBREVIATION_BUDGET))
    } else {
        value.to_string()
    }
}

fn record_row(record: &Record) -> Row<'static> {
    let valid_text = if record.valid { "✓" } else { "✗" };
    let severity_text = record.severity.map_or("-", Severity::label);
    Row::new(vec![
        Cell::from(abbreviated_cell(&record.email)),
        Cell::from(abbreviated_cell(&record.password)),
        Cell::from(abbreviated_cell(&record.url)),
        Cell::from(extract_domain(&record.url)),
        Cell::from(valid_text).style(theme::valid_mark(record.valid)),
        Cell::from(severity_text).style(theme::severity(record.severity)),
    ])
}

fn draw_status(frame: &mut Frame, area: Rect, app: &App) {
    let line = match app.mode {
        Mode::Search => prompt_line("search", &app.input),
        Mode::Filter => prompt_line("filter", &app.input),
        _ => status_line(app),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn prompt_line<'a>(label: &'a str, input: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!(" {label}: "), theme::prompt()),
        Span::raw(input),
        Span::styled("▏", theme::prompt()),
    ])
}

fn status_line(app: &App) -> Line<'_> {
    let pager = &app.session.pager;
    let mut spans = vec![Span::raw(format!(
        " page {}/{}  size {}",
        pager.page + 1,
        pager.last_page() + 1,
        pager.page_size
    ))];

    if let Some((key, direction)) = app.session.sort {
        spans.push(Span::styled(
            format!("  sort {}{}", key.label(), direction_mark(direction)),
            theme::dim(),
        ));
    }
    let committed = app.session.search.committed();
    if !committed.is_empty() {
        spans.push(Span::styled(format!("  search \"{committed}\""), theme::dim()));
    }
    if !app.session.row_filter.is_empty() {
        spans.push(Span::styled(
            format!("  filter \"{}\"", app.session.row_filter),
            theme::dim(),
        ));
    }

    if let Some((notice, _)) = &app.notice {
        spans.push(Span::styled(
            format!("  {}", notice.text),
            theme::notice(notice.level),
        ));
    } else {
        spans.push(Span::styled("  ? help".to_string(), theme::dim()));
    }

    Line::from(spans)
}

fn direction_mark(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Asc => "↑",
        SortDirection::Desc => "↓",
    }
}

fn draw_severity_picker(frame: &mut Frame, app: &App) {
    let area = centered_rect(30, Severity::ALL.len() as u16 + 2, frame.area());
    frame.render_widget(Clear, area);

    let items: Vec<ListItem> = Severity::ALL
        .iter()
        .enumerate()
        .map(|(index, severity)| {
            let style = if index == app.picker_index {
                theme::selected_row()
            } else {
                theme::severity(Some(*severity))
            };
            ListItem::new(Line::from(Span::styled(severity.label(), style)))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Severity (Enter confirm, Esc cancel)"),
    );
    frame.render_widget(list, area);
}

fn draw_help(frame: &mut Frame) {
    const BINDINGS: &[(&str, &str)] = &[
        ("↑/↓", "select row"),
        ("←/→", "previous / next page"),
        ("]/[", "cycle page size"),
        ("/", "server search"),
        ("f", "local filter"),
        ("o / O / r", "sort key / clear / reverse"),
        ("v", "toggle validity"),
        ("s", "set severity"),
        ("d", "delete record"),
        ("c / e / u", "copy password / email / URL"),
        ("R", "reload page"),
        ("q", "quit"),
    ];

    let area = centered_rect(44, BINDINGS.len() as u16 + 2, frame.area());
    frame.render_widget(Clear, area);

    let items: Vec<ListItem> = BINDINGS
        .iter()
        .map(|(keys, action)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{keys:<10}"), theme::table_heading()),
                Span::raw(*action),
            ]))
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Keys"));
    frame.render_widget(list, area);
}

/// Fixed-size rect centered in `area`, clamped to its bounds.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
