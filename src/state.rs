use std::collections::VecDeque;
use std::time::Instant;

use chrono::NaiveDate;

use crate::filters::{FilterState, SEARCH_DEBOUNCE, cycle_position, cycle_team};
use crate::player::{Player, PlayerField, PlayerFilters, PlayerSummary, summarize};
use crate::player_store::{Notification, NotificationKind};
use crate::validation::{PlayerForm, ValidationErrors};

pub const DEFAULT_PAGE_SIZE: usize = 10;
const MAX_LOGS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Players,
    Detail,
    Form,
    ConfirmDelete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFocus {
    Table,
    NameSearch,
    Nation,
}

#[derive(Debug, Clone)]
pub struct FormState {
    pub form: PlayerForm,
    pub field: usize,
    pub errors: ValidationErrors,
    pub submitting: bool,
    pub return_to: Screen,
}

impl FormState {
    pub fn current_field(&self) -> PlayerField {
        PlayerField::ALL
            .get(self.field)
            .copied()
            .unwrap_or(PlayerField::Player)
    }
}

#[derive(Debug, Clone)]
pub enum PlayerCommand {
    FetchPlayers { filters: PlayerFilters },
    CreatePlayer(Player),
    UpdatePlayer(Player),
    DeletePlayer { name: String },
}

#[derive(Debug, Clone)]
pub enum Delta {
    SetPlayers {
        filters: PlayerFilters,
        players: Vec<Player>,
    },
    PlayersFailed {
        filters: PlayerFilters,
        message: String,
    },
    Saved(Player),
    SaveFailed(String),
    Deleted(String),
    DeleteFailed(String),
    Notify(Notification),
    Log(String),
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub screen: Screen,
    pub focus: InputFocus,
    pub filters: FilterState,
    pub players: Vec<Player>,
    pub loading: bool,
    pub load_error: Option<String>,
    pub selected: usize,
    pub page_size: usize,
    pub detail: Option<Player>,
    pub form: Option<FormState>,
    pub deleting: Option<Player>,
    pub delete_pending: bool,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
    refresh_requested: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(DEFAULT_PAGE_SIZE, FilterState::new(SEARCH_DEBOUNCE))
    }

    pub fn with_settings(page_size: usize, filters: FilterState) -> Self {
        Self {
            screen: Screen::Players,
            focus: InputFocus::Table,
            filters,
            players: Vec::new(),
            loading: false,
            load_error: None,
            selected: 0,
            page_size: page_size.max(1),
            detail: None,
            form: None,
            deleting: None,
            delete_pending: false,
            logs: VecDeque::new(),
            help_overlay: false,
            // First frame loads the unfiltered collection.
            refresh_requested: true,
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn request_refresh(&mut self) {
        self.refresh_requested = true;
    }

    /// Returns the fetch to send, if a refresh was requested since the last call.
    pub fn take_refresh(&mut self) -> Option<PlayerCommand> {
        if !std::mem::take(&mut self.refresh_requested) {
            return None;
        }
        self.loading = true;
        Some(PlayerCommand::FetchPlayers {
            filters: self.filters.filters().clone(),
        })
    }

    pub fn tick(&mut self, now: Instant) {
        if self.filters.tick(now) {
            self.on_filters_committed();
        }
    }

    pub fn summary(&self) -> PlayerSummary {
        summarize(&self.players)
    }

    // Pagination

    pub fn page_count(&self) -> usize {
        self.players.len().div_ceil(self.page_size).max(1)
    }

    /// Zero-based page holding the selected row.
    pub fn page(&self) -> usize {
        self.selected / self.page_size
    }

    pub fn page_range(&self) -> (usize, usize) {
        let start = (self.page() * self.page_size).min(self.players.len());
        let end = (start + self.page_size).min(self.players.len());
        (start, end)
    }

    pub fn page_rows(&self) -> &[Player] {
        let (start, end) = self.page_range();
        &self.players[start..end]
    }

    pub fn page_label(&self) -> String {
        let (start, end) = self.page_range();
        if self.players.is_empty() {
            return "No players".to_string();
        }
        format!(
            "Showing {} to {} of {} players | Page {}/{}",
            start + 1,
            end,
            self.players.len(),
            self.page() + 1,
            self.page_count()
        )
    }

    pub fn next_page(&mut self) {
        if self.page() + 1 < self.page_count() {
            self.selected = (self.page() + 1) * self.page_size;
        }
    }

    pub fn prev_page(&mut self) {
        if self.page() > 0 {
            self.selected = (self.page() - 1) * self.page_size;
        }
    }

    pub fn select_next(&mut self) {
        if self.players.is_empty() {
            self.selected = 0;
            return;
        }
        if self.selected + 1 < self.players.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn clamp_selection(&mut self) {
        if self.players.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.players.len() {
            self.selected = self.players.len() - 1;
        }
    }

    pub fn selected_player(&self) -> Option<&Player> {
        self.players.get(self.selected)
    }

    // Filters

    pub fn cycle_team_filter(&mut self) {
        let next = cycle_team(self.filters.filters().team.as_deref());
        if self.filters.set_team(next) {
            self.on_filters_committed();
        }
    }

    pub fn cycle_position_filter(&mut self) {
        let next = cycle_position(self.filters.filters().position.as_deref());
        if self.filters.set_position(next) {
            self.on_filters_committed();
        }
    }

    pub fn push_nation_char(&mut self, ch: char) {
        let mut nation = self.filters.nation_draft().to_string();
        nation.push(ch);
        if self.filters.set_nation(Some(nation)) {
            self.on_filters_committed();
        }
    }

    pub fn pop_nation_char(&mut self) {
        let mut nation = self.filters.nation_draft().to_string();
        nation.pop();
        if self.filters.set_nation(Some(nation)) {
            self.on_filters_committed();
        }
    }

    pub fn clear_filters(&mut self) {
        if self.filters.clear() {
            self.on_filters_committed();
        }
        self.focus = InputFocus::Table;
    }

    fn on_filters_committed(&mut self) {
        self.selected = 0;
        self.request_refresh();
    }

    // Detail drawer

    pub fn open_detail(&mut self) {
        if let Some(player) = self.selected_player().cloned() {
            self.detail = Some(player);
            self.screen = Screen::Detail;
        }
    }

    pub fn back_to_players(&mut self) {
        self.screen = Screen::Players;
        self.form = None;
        self.deleting = None;
        self.delete_pending = false;
    }

    // Form

    pub fn open_create_form(&mut self, today: NaiveDate) {
        self.open_form(PlayerForm::draft(today));
    }

    pub fn open_edit_form(&mut self) {
        let player = match self.screen {
            Screen::Detail => self.detail.clone(),
            _ => self.selected_player().cloned(),
        };
        if let Some(player) = player {
            self.open_form(PlayerForm::from_player(&player));
        }
    }

    fn open_form(&mut self, form: PlayerForm) {
        let return_to = match self.screen {
            Screen::Detail => Screen::Detail,
            _ => Screen::Players,
        };
        self.form = Some(FormState {
            form,
            field: 0,
            errors: ValidationErrors::default(),
            submitting: false,
            return_to,
        });
        self.screen = Screen::Form;
    }

    pub fn cancel_form(&mut self) {
        if let Some(state) = self.form.take() {
            self.screen = state.return_to;
        }
    }

    pub fn form_next_field(&mut self) {
        if let Some(state) = self.form.as_mut() {
            state.field = (state.field + 1) % PlayerField::ALL.len();
        }
    }

    pub fn form_prev_field(&mut self) {
        if let Some(state) = self.form.as_mut() {
            state.field = state
                .field
                .checked_sub(1)
                .unwrap_or(PlayerField::ALL.len() - 1);
        }
    }

    pub fn form_input(&mut self, ch: char) {
        if let Some(state) = self.form.as_mut() {
            let field = state.current_field();
            state.form.push_char(field, ch);
        }
    }

    pub fn form_backspace(&mut self) {
        if let Some(state) = self.form.as_mut() {
            let field = state.current_field();
            state.form.pop_char(field);
        }
    }

    /// Team and position are closed sets; the form cycles them instead of free typing.
    pub fn form_cycle_choice(&mut self) {
        let Some(state) = self.form.as_mut() else {
            return;
        };
        let field = state.current_field();
        let current = state.form.get(field).to_string();
        let next = match field {
            PlayerField::Team => cycle_team(Some(current.as_str())),
            PlayerField::Position => cycle_position(Some(current.as_str())),
            _ => return,
        };
        state.form.set(field, next.unwrap_or_default());
    }

    /// Validates the form; a valid form becomes a create or update command.
    pub fn form_submit(&mut self) -> Option<PlayerCommand> {
        let state = self.form.as_mut()?;
        if state.submitting {
            return None;
        }
        match state.form.validate() {
            Ok(player) => {
                state.errors = ValidationErrors::default();
                state.submitting = true;
                if player.is_new() {
                    Some(PlayerCommand::CreatePlayer(player))
                } else {
                    Some(PlayerCommand::UpdatePlayer(player))
                }
            }
            Err(errors) => {
                if let Some(first) = errors.iter().next() {
                    state.field = first.field.index();
                }
                state.errors = errors;
                None
            }
        }
    }

    // Delete dialog

    pub fn open_delete(&mut self) {
        let player = match self.screen {
            Screen::Detail => self.detail.clone(),
            _ => self.selected_player().cloned(),
        };
        if let Some(player) = player {
            self.deleting = Some(player);
            self.delete_pending = false;
            self.screen = Screen::ConfirmDelete;
        }
    }

    pub fn confirm_delete(&mut self) -> Option<PlayerCommand> {
        if self.delete_pending {
            return None;
        }
        let name = self.deleting.as_ref()?.player.clone();
        self.delete_pending = true;
        Some(PlayerCommand::DeletePlayer { name })
    }
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SetPlayers { filters, players } => {
            // Answers for filters that are no longer committed are dropped.
            if filters.normalized() != *state.filters.filters() {
                return;
            }
            state.players = players;
            state.loading = false;
            state.load_error = None;
            state.clamp_selection();
            if let Some(detail) = state.detail.as_ref()
                && let Some(fresh) = state.players.iter().find(|p| p.id.is_some() && p.id == detail.id)
            {
                state.detail = Some(fresh.clone());
            }
        }
        Delta::PlayersFailed { filters, message } => {
            if filters.normalized() != *state.filters.filters() {
                return;
            }
            state.loading = false;
            state.push_log(format!("[WARN] Failed to load players: {message}"));
            state.load_error = Some(message);
        }
        Delta::Saved(player) => {
            if let Some(form) = state.form.take()
                && state.screen == Screen::Form
            {
                state.screen = form.return_to;
            }
            if state
                .detail
                .as_ref()
                .is_some_and(|d| d.id.is_some() && d.id == player.id)
            {
                state.detail = Some(player);
            }
            state.request_refresh();
        }
        Delta::SaveFailed(_) => {
            if let Some(form) = state.form.as_mut() {
                form.submitting = false;
            }
        }
        Delta::Deleted(name) => {
            if state.detail.as_ref().is_some_and(|d| d.player == name) {
                state.detail = None;
            }
            state.deleting = None;
            state.delete_pending = false;
            if matches!(state.screen, Screen::ConfirmDelete | Screen::Detail) {
                state.screen = Screen::Players;
            }
            state.request_refresh();
        }
        Delta::DeleteFailed(_) => {
            state.delete_pending = false;
        }
        Delta::Notify(notification) => {
            let level = match notification.kind {
                NotificationKind::Success => "[INFO]",
                NotificationKind::Failure => "[WARN]",
            };
            state.push_log(format!(
                "{level} {}: {}",
                notification.title, notification.message
            ));
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}
