//! Dashboard state and key handling.

use crossterm::event::{KeyCode, KeyEvent};
use credscope_core::{CopyField, Notice, NoticeBuffer, PAGE_SIZES, Session};
use credscope_models::Severity;
use ratatui::widgets::TableState;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long a transient notice stays on the status line.
const NOTICE_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Table,
    /// Server search prompt; keystrokes feed the debounce.
    Search,
    /// Local row filter prompt; applied live.
    Filter,
    SeverityPicker,
    Help,
}

pub struct App {
    pub session: Session,
    pub notices: NoticeBuffer,
    pub server_url: String,
    pub mode: Mode,
    pub table_state: TableState,
    /// Prompt buffer shared by the search and filter modes.
    pub input: String,
    /// Filter value to restore when the prompt is cancelled.
    prompt_backup: String,
    pub picker_index: usize,
    /// Notice currently on the status line and when it appeared.
    pub notice: Option<(Notice, Instant)>,
    /// Notices waiting for the status line, shown one per TTL in order.
    pending_notices: VecDeque<Notice>,
    pub should_quit: bool,
}

impl App {
    pub fn new(session: Session, notices: NoticeBuffer, server_url: String) -> Self {
        let mut table_state = TableState::default();
        table_state.select(Some(0));
        Self {
            session,
            notices,
            server_url,
            mode: Mode::Table,
            table_state,
            input: String::new(),
            prompt_backup: String::new(),
            picker_index: 0,
            notice: None,
            pending_notices: VecDeque::new(),
            should_quit: false,
        }
    }

    /// Id of the currently highlighted row, if any.
    pub fn selected_id(&self) -> Option<i64> {
        let index = self.table_state.selected()?;
        self.session.visible().get(index).map(|record| record.id)
    }

    /// Drive the session and expire the transient notice. Called every
    /// poll interval.
    pub fn tick(&mut self, now: Instant) {
        self.session.tick(now);
        self.pending_notices.extend(self.notices.drain());
        if let Some((_, shown_at)) = &self.notice
            && now.duration_since(*shown_at) > NOTICE_TTL
        {
            self.notice = None;
        }
        if self.notice.is_none()
            && let Some(next) = self.pending_notices.pop_front()
        {
            self.notice = Some((next, now));
        }
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let len = self.session.visible().len();
        if len == 0 {
            self.table_state.select(None);
            return;
        }
        match self.table_state.selected() {
            Some(index) if index < len => {}
            _ => self.table_state.select(Some(len - 1)),
        }
    }

    pub async fn handle_key(&mut self, key: KeyEvent) {
        match self.mode {
            Mode::Table => self.handle_table_key(key).await,
            Mode::Search => self.handle_search_key(key),
            Mode::Filter => self.handle_filter_key(key),
            Mode::SeverityPicker => self.handle_picker_key(key).await,
            Mode::Help => self.mode = Mode::Table,
        }
    }

    async fn handle_table_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Up => self.select_previous(),
            KeyCode::Down => self.select_next(),
            KeyCode::Left => self.session.previous_page(),
            KeyCode::Right => self.session.next_page(),
            KeyCode::Char(']') => self.cycle_page_size(1),
            KeyCode::Char('[') => self.cycle_page_size(-1),
            KeyCode::Char('/') => {
                self.input = self.session.search.committed().to_string();
                self.mode = Mode::Search;
            }
            KeyCode::Char('f') => {
                self.prompt_backup = self.session.row_filter.clone();
                self.input = self.session.row_filter.clone();
                self.mode = Mode::Filter;
            }
            KeyCode::Char('o') => self.session.cycle_sort_key(),
            KeyCode::Char('O') => self.session.clear_sort(),
            KeyCode::Char('r') => self.session.reverse_sort(),
            KeyCode::Char('v') => {
                if let Some(id) = self.selected_id() {
                    self.session.toggle_validity(id).await;
                }
            }
            KeyCode::Char('s') => {
                if self.selected_id().is_some() {
                    self.picker_index = 0;
                    self.mode = Mode::SeverityPicker;
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.selected_id() {
                    self.session.delete(id).await;
                }
            }
            KeyCode::Char('c') => self.copy_selected(CopyField::Password),
            KeyCode::Char('e') => self.copy_selected(CopyField::Email),
            KeyCode::Char('u') => self.copy_selected(CopyField::Url),
            KeyCode::Char('R') => self.session.refresh(),
            KeyCode::Char('?') => self.mode = Mode::Help,
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                let query = self.input.clone();
                self.session.submit_search(&query);
                self.mode = Mode::Table;
            }
            KeyCode::Esc => {
                self.session.cancel_search();
                self.mode = Mode::Table;
            }
            KeyCode::Backspace => {
                self.input.pop();
                self.session.search_typed(&self.input, Instant::now());
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                self.session.search_typed(&self.input, Instant::now());
            }
            _ => {}
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.mode = Mode::Table,
            KeyCode::Esc => {
                self.session.row_filter = self.prompt_backup.clone();
                self.mode = Mode::Table;
            }
            KeyCode::Backspace => {
                self.input.pop();
                self.session.row_filter = self.input.clone();
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                self.session.row_filter = self.input.clone();
            }
            _ => {}
        }
    }

    async fn handle_picker_key(&mut self, key: KeyEvent) {
        let count = Severity::ALL.len();
        match key.code {
            KeyCode::Up => self.picker_index = (self.picker_index + count - 1) % count,
            KeyCode::Down => self.picker_index = (self.picker_index + 1) % count,
            KeyCode::Enter => {
                let severity = Severity::ALL[self.picker_index];
                self.mode = Mode::Table;
                if let Some(id) = self.selected_id() {
                    self.session.assign_severity(id, severity).await;
                }
            }
            KeyCode::Esc => self.mode = Mode::Table,
            _ => {}
        }
    }

    fn select_previous(&mut self) {
        if let Some(index) = self.table_state.selected() {
            self.table_state.select(Some(index.saturating_sub(1)));
        }
    }

    fn select_next(&mut self) {
        let len = self.session.visible().len();
        if len == 0 {
            return;
        }
        let next = match self.table_state.selected() {
            Some(index) => (index + 1).min(len - 1),
            None => 0,
        };
        self.table_state.select(Some(next));
    }

    fn cycle_page_size(&mut self, step: i32) {
        let sizes = PAGE_SIZES;
        let current = sizes
            .iter()
            .position(|&size| size == self.session.pager.page_size)
            .unwrap_or(0);
        let next = (current as i32 + step).rem_euclid(sizes.len() as i32) as usize;
        self.session.set_page_size(sizes[next]);
    }

    fn copy_selected(&mut self, field: CopyField) {
        if let Some(id) = self.selected_id() {
            self.session.copy_field(id, field);
        }
    }
}
