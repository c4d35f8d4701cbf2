use std::io;
use std::sync::Arc;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::Local;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use pl_dashboard::config::AppConfig;
use pl_dashboard::filters::FilterState;
use pl_dashboard::logging;
use pl_dashboard::player::{PlayerField, Position};
use pl_dashboard::player_api::PlayerClient;
use pl_dashboard::player_store::{Notification, PlayerStore};
use pl_dashboard::state::{AppState, Delta, InputFocus, PlayerCommand, Screen, apply_delta};
use pl_dashboard::worker;

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: Option<mpsc::Sender<PlayerCommand>>,
    api_label: String,
}

impl App {
    fn new(cmd_tx: Option<mpsc::Sender<PlayerCommand>>, config: &AppConfig) -> Self {
        Self {
            state: AppState::with_settings(config.page_size, FilterState::new(config.debounce)),
            should_quit: false,
            cmd_tx,
            api_label: format!("{}/player", config.api_base_url.trim_end_matches('/')),
        }
    }

    fn send(&mut self, cmd: PlayerCommand) {
        let Some(tx) = &self.cmd_tx else {
            self.state.push_log("[WARN] Player backend unavailable");
            return;
        };
        if tx.send(cmd).is_err() {
            self.state.loading = false;
            self.state.push_log("[WARN] Player worker stopped");
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        if self.state.help_overlay {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
                self.state.help_overlay = false;
            }
            return;
        }

        match self.state.screen {
            Screen::Players => self.on_players_key(key),
            Screen::Detail => self.on_detail_key(key),
            Screen::Form => self.on_form_key(key),
            Screen::ConfirmDelete => self.on_delete_key(key),
        }
    }

    fn on_players_key(&mut self, key: KeyEvent) {
        match self.state.focus {
            InputFocus::NameSearch => match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Tab => {
                    self.state.focus = InputFocus::Table
                }
                KeyCode::Backspace => self.state.filters.pop_name_char(Instant::now()),
                KeyCode::Char(ch) => self.state.filters.push_name_char(ch, Instant::now()),
                _ => {}
            },
            InputFocus::Nation => match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Tab => {
                    self.state.focus = InputFocus::Table
                }
                KeyCode::Backspace => self.state.pop_nation_char(),
                KeyCode::Char(ch) => self.state.push_nation_char(ch),
                _ => {}
            },
            InputFocus::Table => match key.code {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
                KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
                KeyCode::Char(']') | KeyCode::Right => self.state.next_page(),
                KeyCode::Char('[') | KeyCode::Left => self.state.prev_page(),
                KeyCode::Enter | KeyCode::Char('v') => self.state.open_detail(),
                KeyCode::Char('/') => self.state.focus = InputFocus::NameSearch,
                KeyCode::Char('n') => self.state.focus = InputFocus::Nation,
                KeyCode::Char('t') => self.state.cycle_team_filter(),
                KeyCode::Char('o') => self.state.cycle_position_filter(),
                KeyCode::Char('c') => self.state.clear_filters(),
                KeyCode::Char('a') => self.state.open_create_form(Local::now().date_naive()),
                KeyCode::Char('e') => self.state.open_edit_form(),
                KeyCode::Char('d') | KeyCode::Delete => self.state.open_delete(),
                KeyCode::Char('r') => {
                    self.state.request_refresh();
                    self.state.push_log("[INFO] Refresh requested");
                }
                KeyCode::Char('?') => self.state.help_overlay = true,
                _ => {}
            },
        }
    }

    fn on_detail_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('b') | KeyCode::Esc => self.state.back_to_players(),
            KeyCode::Char('e') => self.state.open_edit_form(),
            KeyCode::Char('d') | KeyCode::Delete => self.state.open_delete(),
            KeyCode::Char('?') => self.state.help_overlay = true,
            _ => {}
        }
    }

    fn on_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.state.cancel_form(),
            KeyCode::Tab | KeyCode::Down => self.state.form_next_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.form_prev_field(),
            KeyCode::Left | KeyCode::Right => self.state.form_cycle_choice(),
            KeyCode::Backspace => self.state.form_backspace(),
            KeyCode::Enter => match self.state.form_submit() {
                Some(cmd) => self.send(cmd),
                None => {
                    let invalid = self.state.form.as_ref().map(|f| f.errors.len()).unwrap_or(0);
                    if invalid > 0 {
                        self.state
                            .push_log(format!("[WARN] {invalid} field(s) need attention"));
                    }
                }
            },
            KeyCode::Char(ch) => self.state.form_input(ch),
            _ => {}
        }
    }

    fn on_delete_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                if let Some(cmd) = self.state.confirm_delete() {
                    self.send(cmd);
                }
            }
            KeyCode::Char('n') | KeyCode::Esc if !self.state.delete_pending => {
                self.state.back_to_players()
            }
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let config = AppConfig::from_env();
    if let Err(err) = logging::init_file_logging(&config.log_file) {
        eprintln!("warning: {err:#}");
    }
    tracing::info!(base_url = %config.api_base_url, "starting player dashboard");

    let client = PlayerClient::new(&config.api_base_url)?;
    let (note_tx, note_rx) = mpsc::channel();
    let store = Arc::new(
        PlayerStore::new(Arc::new(client))
            .with_stale_after(config.stale_after)
            .with_notifier(note_tx),
    );

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    worker::spawn_player_worker(store, tx, cmd_rx);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(Some(cmd_tx), &config);
    let res = run_app(&mut terminal, &mut app, &rx, &note_rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "dashboard loop failed");
        eprintln!("error: {err}");
    }
    tracing::info!("player dashboard stopped");
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: &mpsc::Receiver<Delta>,
    notes: &mpsc::Receiver<Notification>,
) -> io::Result<()> {
    // Short enough that a debounced search commits close to its deadline.
    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }
        while let Ok(note) = notes.try_recv() {
            apply_delta(&mut app.state, Delta::Notify(note));
        }

        app.state.tick(Instant::now());
        if let Some(cmd) = app.state.take_refresh() {
            app.send(cmd);
        }

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(1),
            Constraint::Length(5),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    render_summary(frame, chunks[1], &app.state);
    render_filter_bar(frame, chunks[2], &app.state);
    render_players(frame, chunks[3], app);

    let footer = Paragraph::new(footer_text(&app.state))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[4]);

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[5]);

    match app.state.screen {
        Screen::Players => {}
        Screen::Detail => render_detail_drawer(frame, frame.size(), &app.state),
        Screen::Form => render_form(frame, frame.size(), &app.state),
        Screen::ConfirmDelete => render_delete_dialog(frame, frame.size(), &app.state),
    }

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let status = if state.loading {
        "Loading...".to_string()
    } else if state.load_error.is_some() {
        "Load failed".to_string()
    } else {
        let n = state.players.len();
        format!("{n} {}", if n == 1 { "result" } else { "results" })
    };
    let line1 = format!(
        "  .-.  PL STATS | {} | {status}",
        state.filters.filters().describe()
    );
    let line2 = " /___\\".to_string();
    let line3 = "  |_|".to_string();
    format!("{line1}\n{line2}\n{line3}")
}

fn render_summary(frame: &mut Frame, area: Rect, state: &AppState) {
    let summary = state.summary();
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let cards = [
        ("Total Players", summary.total_players.to_string()),
        ("Total Goals", summary.total_goals.to_string()),
        ("Total Assists", summary.total_assists.to_string()),
        ("Avg xG", format!("{:.2}", summary.avg_xg)),
    ];
    for (idx, (title, value)) in cards.into_iter().enumerate() {
        let card = Paragraph::new(value)
            .style(Style::default().add_modifier(Modifier::BOLD))
            .block(Block::default().title(title).borders(Borders::ALL));
        frame.render_widget(card, cols[idx]);
    }
}

fn render_filter_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let filters = state.filters.filters();
    let focus_style = Style::default().fg(Color::Black).bg(Color::Cyan);
    let label_style = Style::default().fg(Color::DarkGray);

    let search = if state.filters.search_pending() {
        format!("{}…", state.filters.name_draft())
    } else {
        state.filters.name_draft().to_string()
    };
    let search_style = if state.focus == InputFocus::NameSearch {
        focus_style
    } else {
        Style::default()
    };
    let nation_style = if state.focus == InputFocus::Nation {
        focus_style
    } else {
        Style::default()
    };

    let line = Line::from(vec![
        Span::styled("Search ", label_style),
        Span::styled(format!("[{search}]"), search_style),
        Span::styled("  Team ", label_style),
        Span::raw(filters.team.clone().unwrap_or_else(|| "All Teams".to_string())),
        Span::styled("  Position ", label_style),
        Span::raw(filters.position.clone().unwrap_or_else(|| "All Positions".to_string())),
        Span::styled("  Nation ", label_style),
        Span::styled(format!("[{}]", state.filters.nation_draft()), nation_style),
    ]);

    let title = if state.filters.has_active_filters() {
        "Filters (c Clear)"
    } else {
        "Filters"
    };
    let bar = Paragraph::new(line).block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(bar, area);
}

fn player_columns() -> [Constraint; 11] {
    [
        Constraint::Min(18),
        Constraint::Length(18),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(8),
        Constraint::Length(4),
        Constraint::Length(6),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(6),
        Constraint::Length(11),
    ]
}

fn render_players(frame: &mut Frame, area: Rect, app: &App) {
    let state = &app.state;
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let widths = player_columns();
    render_players_header(frame, sections[0], &widths);

    let list_area = sections[1];
    if let Some(message) = &state.load_error {
        let text = format!(
            "Failed to load players. Please ensure your backend is running at {}\n{message}",
            app.api_label
        );
        let banner = Paragraph::new(text)
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true });
        frame.render_widget(banner, list_area);
        return;
    }
    if state.players.is_empty() {
        let msg = if state.loading {
            "Loading players..."
        } else {
            "No players found"
        };
        let empty = Paragraph::new(msg).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, list_area);
        return;
    }

    let (start, _) = state.page_range();
    let rows = state.page_rows();
    let visible = list_area.height as usize;
    let selected_in_page = state.selected.saturating_sub(start);
    let (first, last) = visible_range(selected_in_page, rows.len(), visible);

    for (i, idx) in (first..last).enumerate() {
        let row_area = Rect {
            x: list_area.x,
            y: list_area.y + i as u16,
            width: list_area.width,
            height: 1,
        };
        let selected = start + idx == state.selected;
        let row_style = if selected {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        if selected {
            frame.render_widget(Block::default().style(row_style), row_area);
        }

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(widths)
            .split(row_area);

        let p = &rows[idx];
        let pos_style = row_style.fg(position_color(&p.position));
        render_cell_text(frame, cols[0], &p.player, row_style);
        render_cell_text(frame, cols[1], &p.team, row_style);
        render_cell_text(frame, cols[2], &p.position, pos_style);
        render_cell_text(frame, cols[3], &p.number.to_string(), row_style);
        render_cell_text(frame, cols[4], &p.nation, row_style);
        render_cell_text(frame, cols[5], &p.age.to_string(), row_style);
        render_cell_text(frame, cols[6], &p.minutes.to_string(), row_style);
        render_cell_text(frame, cols[7], &p.goals.to_string(), row_style);
        render_cell_text(frame, cols[8], &p.assists.to_string(), row_style);
        render_cell_text(frame, cols[9], &format!("{:.2}", p.xg), row_style);
        render_cell_text(frame, cols[10], &p.date, row_style);
    }
}

fn render_players_header(frame: &mut Frame, area: Rect, widths: &[Constraint]) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths.iter().copied())
        .split(area);
    let style = Style::default().add_modifier(Modifier::BOLD);

    let titles = [
        "Player", "Team", "Pos", "#", "Nation", "Age", "Min", "G", "A", "xG", "Date",
    ];
    for (idx, title) in titles.iter().enumerate() {
        render_cell_text(frame, cols[idx], title, style);
    }
}

fn position_color(code: &str) -> Color {
    match Position::parse(code) {
        Some(Position::Goalkeeper) => Color::Yellow,
        Some(Position::Defender) => Color::Blue,
        Some(Position::Midfielder) => Color::Green,
        Some(Position::Forward) => Color::Red,
        None => Color::Gray,
    }
}

fn render_cell_text(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let text_area = Rect {
        x: area.x,
        y: area.y + (area.height / 2),
        width: area.width,
        height: 1,
    };
    let paragraph = Paragraph::new(text).style(style);
    frame.render_widget(paragraph, text_area);
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn footer_text(state: &AppState) -> String {
    let hints = match state.screen {
        Screen::Players => match state.focus {
            InputFocus::Table => {
                "j/k Move | [/] Page | Enter View | / Search | t Team | o Pos | n Nation | c Clear | a Add | e Edit | d Delete | ? Help | q Quit"
            }
            InputFocus::NameSearch | InputFocus::Nation => "Type to filter | Enter/Esc Done",
        },
        Screen::Detail => "b/Esc Back | e Edit | d Delete",
        Screen::Form => "Tab/↑/↓ Field | ←/→ Choose | Enter Save | Esc Cancel",
        Screen::ConfirmDelete => "y Delete | n Cancel",
    };
    format!("{} | {hints}", state.page_label())
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No notifications yet".to_string();
    }
    let start = state.logs.len().saturating_sub(3);
    state
        .logs
        .iter()
        .skip(start)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn detail_sections() -> Vec<(&'static str, Vec<PlayerField>)> {
    use PlayerField as F;
    vec![
        ("Profile", vec![F::Nation, F::Age, F::Number, F::Date]),
        ("Goals & Assists", vec![F::Goals, F::Assists, F::Minutes]),
        ("Expected Stats", vec![F::Xg, F::Npxg, F::Xag]),
        (
            "Shooting",
            vec![F::TotalShoot, F::ShootOnTarget, F::PenaltyShoot, F::PenaltyShootOnGoal],
        ),
        (
            "Passing",
            vec![
                F::PassesCompleted,
                F::PassesAttempted,
                F::PassCompletion,
                F::ProgressivePasses,
            ],
        ),
        (
            "Dribbling & Carries",
            vec![
                F::Touches,
                F::Carries,
                F::ProgressiveCarries,
                F::DribbleAttempts,
                F::SuccessfulDribbles,
                F::Dribbles,
            ],
        ),
        (
            "Defense & Creativity",
            vec![
                F::Tackles,
                F::Blocks,
                F::ShotCreatingActions,
                F::GoalCreatingActions,
            ],
        ),
        ("Discipline", vec![F::YellowCards, F::RedCards]),
    ]
}

fn render_detail_drawer(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(player) = &state.detail else {
        return;
    };
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);
    let drawer = cols[1];
    frame.render_widget(Clear, drawer);

    let position = Position::parse(&player.position)
        .map(|p| p.label().to_string())
        .unwrap_or_else(|| player.position.clone());
    let mut lines = vec![
        Line::from(Span::styled(
            format!("{} · {}", player.team, position),
            Style::default().fg(Color::Cyan),
        )),
        Line::from(""),
    ];
    for (title, fields) in detail_sections() {
        lines.push(Line::from(Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for field in fields {
            let mut value = player.display_value(field);
            match field {
                PlayerField::Number => value = format!("#{value}"),
                PlayerField::PassCompletion => value.push('%'),
                _ => {}
            }
            lines.push(Line::from(format!("  {:<22} {value}", field.label())));
        }
    }

    let title = format!("{} (b Back | e Edit | d Delete)", player.player);
    let detail = Paragraph::new(lines)
        .block(Block::default().title(title).borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    frame.render_widget(detail, drawer);
}

fn render_form(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(form) = &state.form else {
        return;
    };
    let popup_area = centered_rect(70, 85, area);
    frame.render_widget(Clear, popup_area);

    let title = if form.form.is_edit() {
        "Edit Player"
    } else {
        "Add New Player"
    };
    let title = if form.submitting {
        format!("{title} (saving...)")
    } else {
        title.to_string()
    };
    let block = Block::default().title(title).borders(Borders::ALL);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);
    if inner.height == 0 {
        return;
    }

    let mut lines = Vec::new();
    let mut focus_line = 0;
    for (idx, field) in PlayerField::ALL.iter().enumerate() {
        let focused = idx == form.field;
        if focused {
            focus_line = lines.len();
        }
        let style = if focused {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default()
        };
        let cursor = if focused { "_" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(format!("{:<22}", field.label()), Style::default().fg(Color::DarkGray)),
            Span::styled(format!("{}{cursor}", form.form.get(*field)), style),
        ]));
        if let Some(message) = form.errors.get(*field) {
            lines.push(Line::from(Span::styled(
                format!("{:<22}{message}", ""),
                Style::default().fg(Color::Red),
            )));
        }
    }

    let visible = inner.height as usize;
    let (start, end) = visible_range(focus_line, lines.len(), visible);
    let text = lines[start..end].to_vec();
    frame.render_widget(Paragraph::new(text), inner);
}

fn render_delete_dialog(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(player) = &state.deleting else {
        return;
    };
    let popup_area = centered_rect(50, 25, area);
    frame.render_widget(Clear, popup_area);

    let prompt = if state.delete_pending {
        "Deleting...".to_string()
    } else {
        "y Delete | n Cancel".to_string()
    };
    let text = format!(
        "Delete {} ({})?\nThis cannot be undone.\n\n{prompt}",
        player.player, player.team
    );
    let dialog = Paragraph::new(text)
        .block(Block::default().title("Delete Player").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(dialog, popup_area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "PL Stats - Help",
        "",
        "Players:",
        "  j/k or ↑/↓   Move selection",
        "  [ / ]        Previous / next page",
        "  Enter / v    Player details",
        "  /            Search by name",
        "  t            Cycle team filter",
        "  o            Cycle position filter",
        "  n            Filter by nation",
        "  c            Clear filters",
        "  a / e / d    Add / edit / delete player",
        "  r            Refresh",
        "",
        "Form:",
        "  Tab / ↑ / ↓  Move between fields",
        "  ← / →        Choose team or position",
        "  Enter        Save",
        "  Esc          Cancel",
        "",
        "  ?            Toggle help",
        "  q            Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
