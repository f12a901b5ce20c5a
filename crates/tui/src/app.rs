use std::{
    io, thread,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use memomatch_core::{
    AppConfig, DeckRng, Difficulty, GameController, Mode, Player, Screen, Session, ThemeKind,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::{
    backdrop::{Backdrop, Confetti},
    banner,
    cues::TerminalCues,
};

const INPUT_POLL: Duration = Duration::from_millis(100);
const TITLE: &str = "Memory Match";
const MODES: [Mode; 2] = [Mode::Solo, Mode::Duel];
const BUTTON_WIDTH: u16 = 30;
const BUTTON_HEIGHT: u16 = 3;
const MAX_CARD_WIDTH: u16 = 12;
const MAX_CARD_HEIGHT: u16 = 5;

#[derive(Debug, Clone, Copy)]
struct Palette {
    page: Color,
    text: Color,
    accent: Color,
    accent_alt: Color,
    panel: Color,
    muted: Color,
    success: Color,
    danger: Color,
}

impl Palette {
    fn for_theme(theme: ThemeKind) -> Self {
        match theme {
            ThemeKind::Dark => Self {
                page: Color::Rgb(3, 11, 26),
                text: Color::White,
                accent: Color::Rgb(0, 217, 255),
                accent_alt: Color::Rgb(0, 183, 255),
                panel: Color::Rgb(0, 30, 60),
                muted: Color::Rgb(90, 110, 140),
                success: Color::Rgb(120, 255, 140),
                danger: Color::Rgb(248, 113, 113),
            },
            ThemeKind::Light => Self {
                page: Color::Rgb(243, 244, 246),
                text: Color::Rgb(31, 41, 55),
                accent: Color::Rgb(0, 130, 200),
                accent_alt: Color::Rgb(0, 100, 170),
                panel: Color::Rgb(200, 215, 235),
                muted: Color::Rgb(120, 130, 150),
                success: Color::Rgb(22, 150, 70),
                danger: Color::Rgb(200, 30, 30),
            },
        }
    }
}

/// Clickable regions recorded while drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Mode(Mode),
    Difficulty(Difficulty),
    BackToModes,
    Card(usize),
    Restart,
    BackToLevels,
    Theme,
}

struct UiState {
    mode_cursor: usize,
    level_cursor: usize,
    card_cursor: usize,
    status: String,
    should_quit: bool,
    hit_areas: Vec<(Rect, Target)>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            mode_cursor: 0,
            level_cursor: 0,
            card_cursor: 0,
            status: "Choose a game mode".to_string(),
            should_quit: false,
            hit_areas: Vec::new(),
        }
    }
}

impl UiState {
    fn set_status(&mut self, message: impl Into<String>) {
        self.status = message.into();
    }

    fn register(&mut self, area: Rect, target: Target) {
        self.hit_areas.push((area, target));
    }

    fn target_at(&self, column: u16, row: u16) -> Option<Target> {
        self.hit_areas
            .iter()
            .rev()
            .find(|(area, _)| contains(*area, column, row))
            .map(|(_, target)| *target)
    }
}

/// Terminal front end for the memory game.
pub struct MemoMatchApp {
    controller: GameController<TerminalCues>,
    backdrop: Backdrop,
    confetti: Confetti,
    ui: UiState,
    tick_rate: Duration,
}

impl MemoMatchApp {
    pub fn new(config: &AppConfig) -> Self {
        let (width, height) = terminal::size().unwrap_or((80, 24));
        let controller = GameController::new(
            TerminalCues::new(config.sound),
            DeckRng::new(config.seed),
            config.theme,
            config.reveal_delay(),
        );
        Self {
            controller,
            backdrop: Backdrop::new(config.particle_count, width, height, config.theme, config.seed),
            confetti: Confetti::new(width, height),
            ui: UiState::default(),
            tick_rate: config.tick_rate(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let (event_tx, mut event_rx) = mpsc::channel::<Event>(128);
        spawn_input_thread(event_tx);

        let mut ticker = tokio::time::interval(self.tick_rate);
        let mut last_tick = Instant::now();

        let result: Result<()> = loop {
            if let Err(err) = terminal.draw(|frame| self.draw(frame)) {
                break Err(err).context("failed to draw frame");
            }
            if self.ui.should_quit {
                break Ok(());
            }

            tokio::select! {
                maybe_event = event_rx.recv() => match maybe_event {
                    Some(event) => self.handle_input(event),
                    None => break Ok(()),
                },
                _ = ticker.tick() => {
                    let now = Instant::now();
                    self.handle_tick(now.duration_since(last_tick));
                    last_tick = now;
                }
            }
        };

        self.controller.shutdown();
        restore_terminal(&mut terminal)?;
        info!("Terminal restored");
        result
    }

    fn handle_tick(&mut self, elapsed: Duration) {
        self.controller.advance(elapsed);
        for burst in self.controller.sink_mut().take_bursts() {
            self.confetti.launch(burst);
        }
        self.backdrop.sync_theme(self.controller.state().theme());
        self.backdrop.step();
        if self.confetti.is_active() {
            self.confetti.step();
        }
    }

    fn handle_input(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => {
                debug!(width, height, "Terminal resized");
                self.backdrop.resize(width, height);
                self.confetti.resize(width, height);
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        if let Some(target) = self.ui.target_at(mouse.column, mouse.row) {
            self.activate(target);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.ui.should_quit = true;
                return;
            }
            KeyCode::Char('t') | KeyCode::Char('T') => {
                self.activate(Target::Theme);
                return;
            }
            _ => {}
        }

        match self.controller.state().screen() {
            Screen::ModeSelect => self.handle_mode_key(key),
            Screen::DifficultySelect => self.handle_level_key(key),
            Screen::Playing | Screen::Ended => self.handle_board_key(key),
        }
    }

    fn handle_mode_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.ui.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => {
                self.ui.mode_cursor = step_cursor(self.ui.mode_cursor, 1, MODES.len());
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.ui.mode_cursor = step_cursor(self.ui.mode_cursor, -1, MODES.len());
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.activate(Target::Mode(MODES[self.ui.mode_cursor]));
            }
            _ => {}
        }
    }

    fn handle_level_key(&mut self, key: KeyEvent) {
        let entries = Difficulty::ALL.len() + 1;
        match key.code {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => {
                self.activate(Target::BackToModes)
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.ui.level_cursor = step_cursor(self.ui.level_cursor, 1, entries);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.ui.level_cursor = step_cursor(self.ui.level_cursor, -1, entries);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let target = Difficulty::ALL
                    .get(self.ui.level_cursor)
                    .map(|difficulty| Target::Difficulty(*difficulty))
                    .unwrap_or(Target::BackToModes);
                self.activate(target);
            }
            _ => {}
        }
    }

    fn handle_board_key(&mut self, key: KeyEvent) {
        let Some((cards, columns)) = self
            .controller
            .state()
            .session()
            .map(|session| (session.deck().len(), session.columns()))
        else {
            return;
        };

        let cursor = self.ui.card_cursor;
        match key.code {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => {
                self.activate(Target::BackToLevels)
            }
            KeyCode::Char('r') | KeyCode::Char('R') => self.activate(Target::Restart),
            KeyCode::Enter | KeyCode::Char(' ') => self.activate(Target::Card(cursor)),
            KeyCode::Left | KeyCode::Char('h') => {
                if cursor % columns > 0 {
                    self.ui.card_cursor = cursor - 1;
                }
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if cursor % columns + 1 < columns && cursor + 1 < cards {
                    self.ui.card_cursor = cursor + 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if cursor >= columns {
                    self.ui.card_cursor = cursor - columns;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if cursor + columns < cards {
                    self.ui.card_cursor = cursor + columns;
                }
            }
            _ => {}
        }
    }

    fn activate(&mut self, target: Target) {
        match target {
            Target::Mode(mode) => {
                self.controller.select_mode(mode);
                self.ui.level_cursor = 0;
                self.ui.set_status("Select difficulty");
            }
            Target::Difficulty(difficulty) => {
                self.controller.start_game(difficulty);
                self.confetti.clear();
                self.ui.card_cursor = 0;
                self.ui.set_status(format!("{difficulty} board dealt"));
            }
            Target::BackToModes => {
                self.controller.back_to_mode_select();
                self.ui.set_status("Choose a game mode");
            }
            Target::Card(index) => {
                self.ui.card_cursor = index;
                self.controller.flip(index);
            }
            Target::Restart => {
                self.controller.restart();
                self.confetti.clear();
                self.ui.card_cursor = 0;
                self.ui.set_status("Board reshuffled");
            }
            Target::BackToLevels => {
                self.controller.return_to_menu();
                self.confetti.clear();
                self.ui.set_status("Select difficulty");
            }
            Target::Theme => {
                self.controller.toggle_theme();
                self.backdrop.sync_theme(self.controller.state().theme());
            }
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.size();
        let palette = Palette::for_theme(self.controller.state().theme());
        self.ui.hit_areas.clear();

        frame.render_widget(
            Block::default().style(Style::default().bg(palette.page).fg(palette.text)),
            area,
        );
        self.backdrop.render(frame, area, palette.page);

        let banner_lines = banner::render(TITLE);
        let banner_fits = banner::width(&banner_lines) as u16 + 2 <= area.width;
        let banner_height = if banner_fits {
            banner_lines.len() as u16 + 2
        } else {
            3
        };
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(banner_height.min(area.height)),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_title(frame, layout[0], palette, banner_fits.then_some(banner_lines));
        match self.controller.state().screen() {
            Screen::ModeSelect => self.draw_mode_menu(frame, layout[1], palette),
            Screen::DifficultySelect => self.draw_level_menu(frame, layout[1], palette),
            Screen::Playing | Screen::Ended => {
                if let Some(session) = self.controller.state().session() {
                    Self::draw_board(frame, layout[1], session, &mut self.ui, palette);
                }
            }
        }
        self.render_theme_toggle(frame, area, palette);
        self.confetti.render(frame, area);
        self.render_status(frame, layout[2], palette);
    }

    fn render_title(
        &self,
        frame: &mut Frame,
        area: Rect,
        palette: Palette,
        banner_lines: Option<Vec<String>>,
    ) {
        let style = Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD);
        let mut content = vec![Line::from("")];
        match banner_lines {
            Some(lines) => {
                content.extend(lines.into_iter().map(|line| Line::from(Span::styled(line, style))))
            }
            None => content.push(Line::from(Span::styled("⚡ Memory Match Duel", style))),
        }
        frame.render_widget(Paragraph::new(content).alignment(Alignment::Center), area);
    }

    fn render_theme_toggle(&mut self, frame: &mut Frame, area: Rect, palette: Palette) {
        let label = match self.controller.state().theme() {
            ThemeKind::Dark => "☀ Light Mode",
            ThemeKind::Light => "🌙 Dark Mode",
        };
        let width = 18.min(area.width);
        let button = Rect::new(area.right().saturating_sub(width + 1), area.y, width, 3.min(area.height));
        Self::render_button(frame, button, label, false, palette);
        self.ui.register(button, Target::Theme);
    }

    fn draw_mode_menu(&mut self, frame: &mut Frame, area: Rect, palette: Palette) {
        let prompt = Paragraph::new(Line::from(Span::styled(
            "Choose Game Mode:",
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(prompt, Rect::new(area.x, area.y, area.width, 1.min(area.height)));

        let entries: Vec<(String, Target)> = MODES
            .iter()
            .map(|mode| (mode.label().to_string(), Target::Mode(*mode)))
            .collect();
        let selected = self.ui.mode_cursor;
        self.render_button_column(frame, shrink_top(area, 2), &entries, Some(selected), palette);
    }

    fn draw_level_menu(&mut self, frame: &mut Frame, area: Rect, palette: Palette) {
        let heading = match self.controller.state().mode() {
            Some(mode) => format!("{} · Select Difficulty:", mode.label()),
            None => "Select Difficulty:".to_string(),
        };
        let prompt = Paragraph::new(Line::from(Span::styled(
            heading,
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(prompt, Rect::new(area.x, area.y, area.width, 1.min(area.height)));

        let mut entries: Vec<(String, Target)> = Difficulty::ALL
            .iter()
            .map(|difficulty| (format!("🎮 {difficulty}"), Target::Difficulty(*difficulty)))
            .collect();
        entries.push(("⬅ Back".to_string(), Target::BackToModes));
        let selected = self.ui.level_cursor;
        self.render_button_column(frame, shrink_top(area, 2), &entries, Some(selected), palette);
    }

    fn draw_board(
        frame: &mut Frame,
        area: Rect,
        session: &Session,
        ui: &mut UiState,
        palette: Palette,
    ) {
        let header_height = match session.mode() {
            Mode::Solo => 1,
            Mode::Duel => 5,
        };
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(header_height),
                Constraint::Min(3),
                Constraint::Length(BUTTON_HEIGHT),
                Constraint::Length(2),
            ])
            .split(area);

        match session.mode() {
            Mode::Solo => render_countdown(frame, layout[0], session, palette),
            Mode::Duel => render_players(frame, layout[0], session, palette),
        }
        Self::render_grid(frame, layout[1], session, ui, palette);
        Self::render_board_buttons(frame, layout[2], ui, palette);

        if let Some(outcome) = session.outcome() {
            let banner = Paragraph::new(Line::from(Span::styled(
                outcome.message(),
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center);
            frame.render_widget(banner, shrink_top(layout[3], 1));
        }
    }

    fn render_grid(
        frame: &mut Frame,
        area: Rect,
        session: &Session,
        ui: &mut UiState,
        palette: Palette,
    ) {
        let cards = session.deck().len();
        let columns = session.columns().max(1);
        let rows = cards.div_ceil(columns).max(1);

        let cell_width = (area.width / columns as u16).clamp(5, MAX_CARD_WIDTH);
        let cell_height = (area.height / rows as u16).clamp(3, MAX_CARD_HEIGHT);
        let grid_width = cell_width * columns as u16;
        let origin_x = area.x + area.width.saturating_sub(grid_width) / 2;

        for card in session.deck().cards() {
            let column = (card.id % columns) as u16;
            let row = (card.id / columns) as u16;
            let cell = Rect::new(
                origin_x + column * cell_width,
                area.y + row * cell_height,
                cell_width.saturating_sub(1),
                cell_height,
            )
            .intersection(area);
            if cell.width == 0 || cell.height == 0 {
                continue;
            }

            let focused = card.id == ui.card_cursor;
            let matched = session.matched().contains(&card.id);
            let face_up = session.is_face_up(card.id);
            let border = if focused {
                palette.accent
            } else if matched {
                palette.success
            } else if face_up {
                palette.accent_alt
            } else {
                palette.muted
            };
            let mut border_style = Style::default().fg(border);
            if focused {
                border_style = border_style.add_modifier(Modifier::BOLD);
            }

            let face = if face_up {
                Span::styled(card.icon, Style::default().fg(palette.text))
            } else {
                Span::styled("?", Style::default().fg(palette.muted))
            };
            let padding = cell.height.saturating_sub(3) / 2;
            let mut lines: Vec<Line> = (0..padding).map(|_| Line::from("")).collect();
            lines.push(Line::from(face));

            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(if face_up {
                    BorderType::Double
                } else {
                    BorderType::Rounded
                })
                .border_style(border_style);
            frame.render_widget(Clear, cell);
            frame.render_widget(
                Paragraph::new(lines)
                    .alignment(Alignment::Center)
                    .style(Style::default().bg(palette.page))
                    .block(block),
                cell,
            );
            ui.register(cell, Target::Card(card.id));
        }
    }

    fn render_board_buttons(frame: &mut Frame, area: Rect, ui: &mut UiState, palette: Palette) {
        let width = BUTTON_WIDTH.min(area.width / 2);
        let total = width * 2 + 2;
        let x = area.x + area.width.saturating_sub(total) / 2;
        let restart = Rect::new(x, area.y, width, area.height);
        let back = Rect::new(x + width + 2, area.y, width, area.height).intersection(area);

        Self::render_button(frame, restart, "🔄 Restart (r)", false, palette);
        Self::render_button(frame, back, "⬅ Back (b)", false, palette);
        ui.register(restart, Target::Restart);
        ui.register(back, Target::BackToLevels);
    }

    fn render_button_column(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        entries: &[(String, Target)],
        selected: Option<usize>,
        palette: Palette,
    ) {
        let width = BUTTON_WIDTH.min(area.width);
        let x = area.x + area.width.saturating_sub(width) / 2;
        for (index, (label, target)) in entries.iter().enumerate() {
            let y = area.y + index as u16 * (BUTTON_HEIGHT + 1);
            let button = Rect::new(x, y, width, BUTTON_HEIGHT).intersection(area);
            if button.height < BUTTON_HEIGHT {
                break;
            }
            Self::render_button(frame, button, label, selected == Some(index), palette);
            self.ui.register(button, *target);
        }
    }

    fn render_button(
        frame: &mut Frame,
        area: Rect,
        label: &str,
        selected: bool,
        palette: Palette,
    ) {
        let (border, text) = if selected {
            (
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            (
                Style::default().fg(palette.accent_alt),
                Style::default().fg(palette.text),
            )
        };
        let label = if selected {
            format!("▶ {label}")
        } else {
            label.to_string()
        };
        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(label, text)))
                .alignment(Alignment::Center)
                .style(Style::default().bg(palette.panel))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(border),
                ),
            area,
        );
    }

    fn render_status(&self, frame: &mut Frame, area: Rect, palette: Palette) {
        let hints = match self.controller.state().screen() {
            Screen::ModeSelect | Screen::DifficultySelect => "↑/↓ move · Enter select · t theme · q quit",
            Screen::Playing | Screen::Ended => {
                "arrows move · Enter flip · r restart · b back · t theme · q quit"
            }
        };
        let line = Line::from(vec![
            Span::styled(self.ui.status.clone(), Style::default().fg(palette.text)),
            Span::styled("  │  ", Style::default().fg(palette.muted)),
            Span::styled(hints, Style::default().fg(palette.muted)),
        ]);
        frame.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }), area);
    }
}

fn render_countdown(frame: &mut Frame, area: Rect, session: &Session, palette: Palette) {
    let left = session.time_remaining().unwrap_or(0);
    let time_style = if session.is_low_on_time() {
        Style::default()
            .fg(palette.danger)
            .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK)
    } else {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    };
    let line = Line::from(vec![
        Span::raw("⏱ Time: "),
        Span::styled(format!("{left}s"), time_style),
        Span::styled(
            format!("   Turns: {}", session.turns()),
            Style::default().fg(palette.muted),
        ),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn render_players(frame: &mut Frame, area: Rect, session: &Session, palette: Palette) {
    let panel_width = 26.min(area.width / 2);
    let total = panel_width * 2 + 4;
    let x = area.x + area.width.saturating_sub(total) / 2;

    for (slot, player) in [Player::One, Player::Two].into_iter().enumerate() {
        let panel = Rect::new(
            x + slot as u16 * (panel_width + 4),
            area.y,
            panel_width,
            area.height,
        )
        .intersection(area);
        let active = session.current_player() == player && session.outcome().is_none();
        let (border, title) = if active {
            (
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            (
                Style::default().fg(palette.muted),
                Style::default().fg(palette.muted),
            )
        };
        let score = session.scores().get(player);
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(border)
                    .title(Span::styled(format!(" 👤 Player {} ", player.number()), title)),
            )
            .gauge_style(Style::default().fg(palette.accent).bg(palette.panel))
            .ratio(session.progress(player).clamp(0.0, 1.0))
            .label(format!("Score: {score}"));
        frame.render_widget(Clear, panel);
        frame.render_widget(gauge, panel);
    }
}

fn shrink_top(area: Rect, rows: u16) -> Rect {
    let rows = rows.min(area.height);
    Rect::new(area.x, area.y + rows, area.width, area.height - rows)
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.right() && row >= area.y && row < area.bottom()
}

fn step_cursor(cursor: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (cursor as isize + delta).rem_euclid(len as isize) as usize
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(sender: mpsc::Sender<Event>) {
    thread::spawn(move || loop {
        match event::poll(INPUT_POLL) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if sender.blocking_send(evt).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            },
            Ok(false) => {
                if sender.is_closed() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    #[test]
    fn cursor_wraps_both_ways() {
        assert_eq!(step_cursor(0, -1, 4), 3);
        assert_eq!(step_cursor(3, 1, 4), 0);
        assert_eq!(step_cursor(1, 1, 4), 2);
        assert_eq!(step_cursor(0, 1, 0), 0);
    }

    #[test]
    fn hit_test_prefers_last_registered() {
        let mut ui = UiState::default();
        ui.register(Rect::new(0, 0, 10, 10), Target::Card(0));
        ui.register(Rect::new(5, 0, 5, 3), Target::Theme);

        assert_eq!(ui.target_at(6, 1), Some(Target::Theme));
        assert_eq!(ui.target_at(2, 5), Some(Target::Card(0)));
        assert_eq!(ui.target_at(10, 0), None);
    }

    #[test]
    fn board_registers_every_card_and_both_buttons() {
        let mut controller = GameController::new(
            TerminalCues::new(false),
            DeckRng::seeded(3),
            ThemeKind::Dark,
            Duration::from_millis(1000),
        );
        controller.select_mode(Mode::Duel);
        controller.start_game(Difficulty::Easy);
        let session = controller.state().session().expect("session");

        let mut ui = UiState::default();
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).expect("test terminal");
        terminal
            .draw(|frame| {
                let area = frame.size();
                MemoMatchApp::draw_board(
                    frame,
                    area,
                    session,
                    &mut ui,
                    Palette::for_theme(ThemeKind::Dark),
                );
            })
            .expect("draw");

        let cards = ui
            .hit_areas
            .iter()
            .filter(|(_, target)| matches!(target, Target::Card(_)))
            .count();
        assert_eq!(cards, session.deck().len());
        assert!(ui.hit_areas.iter().any(|(_, target)| *target == Target::Restart));
        assert!(ui.hit_areas.iter().any(|(_, target)| *target == Target::BackToLevels));
    }

    #[test]
    fn shrink_top_saturates() {
        let area = Rect::new(0, 0, 10, 1);
        assert_eq!(shrink_top(area, 2).height, 0);
    }
}
