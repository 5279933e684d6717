//! Main TUI application state and rendering

use std::io;

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, info};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};

use crate::board::{color::Color, fen::to_fen, piece::Piece, piece::PROMOTION_CHOICES};
use crate::game::LocalGame;
use crate::interaction::{BoardSession, InteractionState, SquareView, Viewport};
use crate::tui::board_widget::{BoardGeometry, BoardWidget};
use crate::tui::input::PointerTracker;
use crate::tui::Theme;

/// Terminals at or below this many columns get the narrow layout.
pub const DEFAULT_NARROW_COLUMNS: u16 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TuiSettings {
    pub perspective: Color,
    pub narrow_columns: u16,
}

impl Default for TuiSettings {
    fn default() -> Self {
        Self {
            perspective: Color::White,
            narrow_columns: DEFAULT_NARROW_COLUMNS,
        }
    }
}

/// Terminal cells are roughly twice as tall as they are wide, so rows count
/// double when deciding orientation.
pub fn viewport_for(area: Rect, narrow_columns: u16) -> Viewport {
    Viewport::from_dimensions(
        u32::from(area.width),
        u32::from(area.height) * 2,
        u32::from(narrow_columns),
    )
}

fn promotion_key(code: KeyCode) -> Option<Piece> {
    match code {
        KeyCode::Char('q') => Some(Piece::Queen),
        KeyCode::Char('r') => Some(Piece::Rook),
        KeyCode::Char('b') => Some(Piece::Bishop),
        KeyCode::Char('n') => Some(Piece::Knight),
        _ => None,
    }
}

/// The side choosing a promotion piece, which is not necessarily whoever
/// stands on the promotion square.
fn promotion_color(session: &BoardSession) -> Option<Color> {
    session
        .state()
        .promotion()
        .map(|pending| pending.request.color)
}

fn piece_name(piece: Piece) -> &'static str {
    match piece {
        Piece::Pawn => "Pawn",
        Piece::Rook => "Rook",
        Piece::Knight => "Knight",
        Piece::Bishop => "Bishop",
        Piece::King => "King",
        Piece::Queen => "Queen",
    }
}

/// Main TUI application
pub struct TuiApp {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    theme: Theme,
    settings: TuiSettings,
    game: LocalGame,
    session: BoardSession,
    pointer: PointerTracker,
    geometry: Option<BoardGeometry>,
    should_quit: bool,
}

impl TuiApp {
    /// Takes over the terminal: raw mode, alternate screen, mouse capture.
    pub fn new(game: LocalGame, settings: TuiSettings, theme: Theme) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        let mut session = BoardSession::new();
        session.set_game_over(game.is_over());

        Ok(Self {
            terminal,
            theme,
            settings,
            game,
            session,
            pointer: PointerTracker::new(),
            geometry: None,
            should_quit: false,
        })
    }

    /// Run until the user quits
    pub fn run(&mut self) -> io::Result<()> {
        info!("starting board session from {}", to_fen(self.game.board()));
        while !self.should_quit {
            self.draw()?;
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key(key),
                Event::Mouse(mouse) => self.on_mouse(mouse),
                _ => {}
            }
            self.session.set_game_over(self.game.is_over());
        }
        info!("board session ended after {} moves", self.game.history().len());
        Ok(())
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.session.state().promotion().is_some() {
            match key.code {
                KeyCode::Esc => self.session.resolve_promotion(&mut self.game, None),
                code => {
                    if let Some(piece) = promotion_key(code) {
                        self.session.resolve_promotion(&mut self.game, Some(piece));
                    }
                }
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('n') => self.new_game(),
            KeyCode::Char('f') => {
                self.settings.perspective = self.settings.perspective.opposite();
                debug!("board flipped to {}", self.settings.perspective);
            }
            _ => {}
        }
    }

    fn on_mouse(&mut self, mouse: MouseEvent) {
        for event in self.pointer.translate(&mouse, self.geometry.as_ref()) {
            self.session.handle(&mut self.game, event);
        }
    }

    fn new_game(&mut self) {
        self.game.restart();
        self.pointer.reset();
        self.session.reset(InteractionState::new());
        self.session.set_game_over(self.game.is_over());
    }

    fn draw(&mut self) -> io::Result<()> {
        let game = &self.game;
        let session = &self.session;
        let theme = &self.theme;
        let settings = self.settings;
        let mut geometry = None;

        self.terminal.draw(|frame| {
            geometry = Self::render_frame(frame, game, session, settings, theme);
        })?;

        self.geometry = geometry;
        Ok(())
    }

    /// Render a single frame, returning where the board landed.
    fn render_frame(
        frame: &mut Frame,
        game: &LocalGame,
        session: &BoardSession,
        settings: TuiSettings,
        theme: &Theme,
    ) -> Option<BoardGeometry> {
        let size = frame.area();
        let viewport = viewport_for(size, settings.narrow_columns);

        // Board + info on top, status line at the bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(10), Constraint::Length(3)])
            .split(size);

        // Side by side when wide, stacked otherwise
        let board_chunks = if viewport.landscape && !viewport.narrow {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(main_chunks[0])
        } else {
            Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
                .split(main_chunks[0])
        };

        let views = session.board_view(game, viewport);
        let geometry = BoardGeometry::new(board_chunks[0], settings.perspective);
        match geometry {
            Some(geometry) => {
                let arrows = &session.state().arrows().arrows;
                let board = BoardWidget::new(&views, arrows, geometry, theme);
                frame.render_widget(board, board_chunks[0]);
            }
            None => {
                let warning = Paragraph::new("Terminal too small for the board")
                    .block(Block::default().borders(Borders::ALL).title("Board"))
                    .style(theme.text_style());
                frame.render_widget(warning, board_chunks[0]);
            }
        }

        Self::render_info_panel(frame, board_chunks[1], game, session, &views, theme);
        Self::render_status_panel(frame, main_chunks[1], game, session, theme);

        if let (Some(geometry), Some(color)) = (geometry, promotion_color(session)) {
            if let Some(view) = views.iter().find(|view| view.show_promotion_prompt) {
                Self::render_promotion_popup(frame, geometry, view, color, theme);
            }
        }

        geometry
    }

    /// Render the info panel with game details
    fn render_info_panel(
        frame: &mut Frame,
        area: Rect,
        game: &LocalGame,
        session: &BoardSession,
        views: &[SquareView],
        theme: &Theme,
    ) {
        let state = session.state();
        let mut info_text = String::new();

        info_text.push_str(&format!("FEN: {}\n\n", to_fen(game.board())));
        match game.ending() {
            Some(ending) => info_text.push_str(&format!("Result: {}\n\n", ending)),
            None => info_text.push_str(&format!("Turn: {}\n\n", game.board().turn())),
        }

        if let Some(record) = game.last_move() {
            info_text.push_str(&format!("Last Move: {}\n", record.request));
        }
        if let Some(hovered) = state.hovered() {
            info_text.push_str(&format!("Hovering: {}\n", hovered));
        }
        if let Some(selection) = state.selection() {
            info_text.push_str(&format!("Selected: {}\n", selection.square));
        }
        info_text.push('\n');

        // The prompt had no room next to the board, so it goes here
        let prompt_on_board = views.iter().any(|view| view.show_promotion_prompt);
        if let (Some(pending), false) = (state.promotion(), prompt_on_board) {
            info_text.push_str(&format!("Promote on {}: ", pending.square));
            for piece in PROMOTION_CHOICES.iter() {
                info_text.push_str(&format!("[{}] ", piece.to_fen(Color::Black)));
            }
            info_text.push_str("Esc cancels\n\n");
        }

        let history = game.history();
        if !history.is_empty() {
            info_text.push_str("Move History:\n");
            info_text.push_str("  # │ White      │ Black\n");
            info_text.push_str("  ──┼────────────┼────────────\n");
            for (i, pair) in history.chunks(2).enumerate() {
                let white = pair[0].request.to_string();
                let black = pair.get(1).map(|record| record.request.to_string());
                info_text.push_str(&format!(
                    " {:>2} │ {:<10} │ {}\n",
                    i + 1,
                    white,
                    black.unwrap_or_default()
                ));
            }
        }

        let paragraph = Paragraph::new(info_text)
            .block(Block::default().borders(Borders::ALL).title("Game Info"))
            .style(theme.text_style());

        frame.render_widget(paragraph, area);
    }

    fn render_status_panel(
        frame: &mut Frame,
        area: Rect,
        game: &LocalGame,
        session: &BoardSession,
        theme: &Theme,
    ) {
        let prompt_text = if let Some(ending) = game.ending() {
            format!("{}. n: new game, q: quit", ending)
        } else if session.state().promotion().is_some() {
            "Choose a promotion piece: q r b n, Esc cancels".to_string()
        } else {
            "Drag or click to move, right-drag to annotate. f: flip, n: new game, q: quit"
                .to_string()
        };

        let paragraph = Paragraph::new(prompt_text)
            .block(Block::default().borders(Borders::ALL).title("Input"))
            .style(theme.text_style());

        frame.render_widget(paragraph, area);
    }

    /// Popup anchored below the promotion square, kept on screen.
    fn render_promotion_popup(
        frame: &mut Frame,
        geometry: BoardGeometry,
        view: &SquareView,
        color: Color,
        theme: &Theme,
    ) {
        let lines: Vec<Line> = PROMOTION_CHOICES
            .iter()
            .map(|&piece| {
                Line::from(vec![
                    Span::raw(format!("{} ", piece.to_fen(Color::Black))),
                    Span::raw(format!("{} ", piece.to_unicode_piece_char(color))),
                    Span::raw(piece_name(piece)),
                ])
            })
            .collect();

        let screen = frame.area();
        let square = geometry.square_rect(view.square);
        let width = 14.min(screen.width);
        let height = (lines.len() as u16 + 2).min(screen.height);
        let x = square.x.min(screen.width.saturating_sub(width));
        let y = (square.y + square.height).min(screen.height.saturating_sub(height));
        let area = Rect::new(x, y, width, height);

        let popup = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Promote"))
            .style(theme.promotion_style());
        frame.render_widget(Clear, area);
        frame.render_widget(popup, area);
    }
}

impl Drop for TuiApp {
    fn drop(&mut self) {
        // Restore the terminal even when the loop bailed out with an error
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::fen::parse_fen;
    use crate::interaction::BoardEvent;
    use common::bitboard::square::*;

    fn drag(session: &mut BoardSession, game: &mut LocalGame, from: Square, to: Square) {
        session.handle(game, BoardEvent::DragStart { square: from });
        session.handle(game, BoardEvent::DragHover { square: to });
        session.handle(game, BoardEvent::Drop { square: to });
    }

    #[test]
    fn test_promotion_color_is_the_promoting_side() {
        let board = parse_fen("4k3/8/8/8/8/8/4p3/K7 b").unwrap();
        let mut game = LocalGame::new(board);
        let mut session = BoardSession::new();
        drag(&mut session, &mut game, E2, E1);

        let view = session.square_view(&game, E1, Viewport::new(false, true));
        assert!(view.show_promotion_prompt);
        assert_eq!(None, view.occupant);
        assert_eq!(Some(Color::Black), promotion_color(&session));
    }

    #[test]
    fn test_capture_promotion_uses_the_mover_color() {
        let board = parse_fen("3rk3/4P3/8/8/8/8/8/K7 w").unwrap();
        let mut game = LocalGame::new(board);
        let mut session = BoardSession::new();
        drag(&mut session, &mut game, E7, D8);

        let view = session.square_view(&game, D8, Viewport::new(false, true));
        assert_eq!(Some((Piece::Rook, Color::Black)), view.occupant);
        assert_eq!(Some(Color::White), promotion_color(&session));
    }

    #[test]
    fn test_no_promotion_color_without_pending_promotion() {
        assert_eq!(None, promotion_color(&BoardSession::new()));
    }

    #[test]
    fn test_viewport_counts_rows_double() {
        let wide = viewport_for(Rect::new(0, 0, 160, 50), DEFAULT_NARROW_COLUMNS);
        assert_eq!(Viewport::new(false, true), wide);

        let narrow_landscape = viewport_for(Rect::new(0, 0, 80, 24), DEFAULT_NARROW_COLUMNS);
        assert_eq!(Viewport::new(true, true), narrow_landscape);

        let narrow_portrait = viewport_for(Rect::new(0, 0, 60, 40), DEFAULT_NARROW_COLUMNS);
        assert_eq!(Viewport::new(true, false), narrow_portrait);
    }

    #[test]
    fn test_promotion_keys() {
        assert_eq!(Some(Piece::Queen), promotion_key(KeyCode::Char('q')));
        assert_eq!(Some(Piece::Knight), promotion_key(KeyCode::Char('n')));
        assert_eq!(None, promotion_key(KeyCode::Char('k')));
        assert_eq!(None, promotion_key(KeyCode::Esc));
    }
}
