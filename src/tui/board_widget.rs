//! Chess board widget for TUI rendering, and the mapping between terminal
//! cells and board squares that mouse input relies on.

use ratatui::{
    buffer::{Buffer, Cell},
    layout::Rect,
    style::Modifier,
    widgets::{Block, Borders, Widget},
};

use common::bitboard::Square;

use crate::board::color::Color as PieceColor;
use crate::interaction::SquareView;
use crate::tui::Theme;

/// Where the 64 squares sit inside a board area, for a given perspective.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardGeometry {
    origin_x: u16,
    origin_y: u16,
    square_width: u16,
    square_height: u16,
    perspective: PieceColor,
}

impl BoardGeometry {
    /// Lays the board out inside `area`, which includes the widget border.
    /// Returns `None` when the area is too small to draw every square.
    pub fn new(area: Rect, perspective: PieceColor) -> Option<Self> {
        let inner = Block::default().borders(Borders::ALL).inner(area);
        // 1 column for rank labels, 1 row each for the file labels above and below
        let available_width = inner.width.saturating_sub(1);
        let available_height = inner.height.saturating_sub(2);

        let square_width = (available_width / 8).min(6);
        let square_height = (available_height / 8).min(3);
        if square_width < 2 || square_height < 1 {
            return None;
        }

        Some(Self {
            origin_x: inner.x + 1,
            origin_y: inner.y + 1,
            square_width,
            square_height,
            perspective,
        })
    }

    pub fn perspective(&self) -> PieceColor {
        self.perspective
    }

    /// The square under a terminal cell, if any.
    pub fn square_at(&self, column: u16, row: u16) -> Option<Square> {
        if column < self.origin_x || row < self.origin_y {
            return None;
        }
        let x = (column - self.origin_x) / self.square_width;
        let y = (row - self.origin_y) / self.square_height;
        if x >= 8 || y >= 8 {
            return None;
        }
        Some(self.square_for_cell(x as u8, y as u8))
    }

    fn square_for_cell(&self, x: u8, y: u8) -> Square {
        match self.perspective {
            PieceColor::White => Square::from_rank_file(7 - y, x),
            PieceColor::Black => Square::from_rank_file(y, 7 - x),
        }
    }

    /// Column and row of `square` counted from the top-left of the board.
    fn cell_of(&self, square: Square) -> (u16, u16) {
        let (x, y) = match self.perspective {
            PieceColor::White => (square.file(), 7 - square.rank()),
            PieceColor::Black => (7 - square.file(), square.rank()),
        };
        (u16::from(x), u16::from(y))
    }

    pub fn square_rect(&self, square: Square) -> Rect {
        let (x, y) = self.cell_of(square);
        Rect::new(
            self.origin_x + x * self.square_width,
            self.origin_y + y * self.square_height,
            self.square_width,
            self.square_height,
        )
    }

    /// File letter for each board column, left to right.
    fn file_labels(&self) -> [char; 8] {
        let mut labels = ['a'; 8];
        for (x, label) in labels.iter_mut().enumerate() {
            *label = (b'a' + self.square_for_cell(x as u8, 0).file()) as char;
        }
        labels
    }

    fn rank_label(&self, y: u8) -> char {
        (b'1' + self.square_for_cell(0, y).rank()) as char
    }
}

/// Glyph pointing from `from` towards `to` as seen from `perspective`.
pub fn arrow_glyph(from: Square, to: Square, perspective: PieceColor) -> char {
    let mut d_file = i16::from(to.file()) - i16::from(from.file());
    let mut d_rank = i16::from(to.rank()) - i16::from(from.rank());
    if perspective == PieceColor::Black {
        d_file = -d_file;
        d_rank = -d_rank;
    }
    match (d_file.signum(), d_rank.signum()) {
        (0, 1) => '↑',
        (1, 1) => '↗',
        (1, 0) => '→',
        (1, -1) => '↘',
        (0, -1) => '↓',
        (-1, -1) => '↙',
        (-1, 0) => '←',
        (-1, 1) => '↖',
        _ => '•',
    }
}

/// Widget that renders the board as the interaction core sees it
pub struct BoardWidget<'a> {
    views: &'a [SquareView],
    arrows: &'a [(Square, Square)],
    geometry: BoardGeometry,
    theme: &'a Theme,
}

impl<'a> BoardWidget<'a> {
    pub fn new(
        views: &'a [SquareView],
        arrows: &'a [(Square, Square)],
        geometry: BoardGeometry,
        theme: &'a Theme,
    ) -> Self {
        Self {
            views,
            arrows,
            geometry,
            theme,
        }
    }

    fn render_square(&self, view: &SquareView, buf: &mut Buffer, clip: Rect) {
        let rect = self.geometry.square_rect(view.square);
        let (piece_char, piece_color) = match view.occupant {
            Some((piece, color)) => (piece.to_unicode_piece_char(color), Some(color)),
            None => (' ', None),
        };

        let mut style = self
            .theme
            .square_style(view.square.is_light(), piece_color, view.decoration());
        if view.is_drag_origin {
            style = style.add_modifier(Modifier::DIM);
        }

        for dy in 0..rect.height {
            for dx in 0..rect.width {
                let position = (rect.x + dx, rect.y + dy);
                let is_center = dx == rect.width / 2 && dy == rect.height / 2;
                let ch = if is_center { piece_char } else { ' ' };
                if let Some(cell) = cell_within(buf, clip, position) {
                    cell.set_char(ch).set_style(style);
                }
            }
        }
    }
}

fn cell_within(buf: &mut Buffer, clip: Rect, (x, y): (u16, u16)) -> Option<&mut Cell> {
    if x < clip.x || y < clip.y || x >= clip.x + clip.width || y >= clip.y + clip.height {
        return None;
    }
    buf.cell_mut((x, y))
}

impl Widget for BoardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Board")
            .border_style(self.theme.border_style());
        let inner = block.inner(area);
        block.render(area, buf);

        let geometry = self.geometry;
        let text_style = self.theme.text_style();

        // File labels above and below the squares, center-aligned
        let bottom = geometry.origin_y + 8 * geometry.square_height;
        for (x, label) in geometry.file_labels().iter().enumerate() {
            let column =
                geometry.origin_x + x as u16 * geometry.square_width + geometry.square_width / 2;
            for &row in &[inner.y, bottom] {
                if let Some(cell) = cell_within(buf, inner, (column, row)) {
                    cell.set_char(*label).set_style(text_style);
                }
            }
        }

        for y in 0u8..8 {
            let row = geometry.origin_y
                + u16::from(y) * geometry.square_height
                + geometry.square_height / 2;
            if let Some(cell) = cell_within(buf, inner, (inner.x, row)) {
                cell.set_char(geometry.rank_label(y)).set_style(text_style);
            }
        }

        for view in self.views {
            self.render_square(view, buf, inner);
        }

        // Arrow heads go in the top-left corner of the target square
        for &(from, to) in self.arrows {
            let rect = geometry.square_rect(to);
            let glyph = arrow_glyph(from, to, geometry.perspective);
            if let Some(cell) = cell_within(buf, inner, (rect.x, rect.y)) {
                cell.set_char(glyph).set_style(self.theme.annotation_style());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{piece::Piece, Board};
    use crate::game::executor::{ExecutorError, MoveExecutor, MoveRequest};
    use crate::interaction::{BoardSession, Viewport};
    use crate::oracle::MoveTable;
    use common::bitboard::square::*;

    struct Host {
        board: Board,
        table: MoveTable,
    }

    impl crate::oracle::LegalMoveOracle for Host {
        fn legal_destinations(&self, square: Square) -> common::bitboard::Bitboard {
            self.table.legal_destinations(square)
        }
    }

    impl crate::board::PieceLookup for Host {
        fn piece_at(&self, square: Square) -> Option<(Piece, PieceColor)> {
            self.board.get(square)
        }
    }

    impl MoveExecutor for Host {
        fn commit_move(&mut self, _: MoveRequest) -> Result<(), ExecutorError> {
            Ok(())
        }
    }

    fn area() -> Rect {
        Rect::new(0, 0, 2 + 1 + 8 * 4, 2 + 2 + 8 * 2)
    }

    #[test]
    fn test_geometry_maps_cells_to_squares() {
        let geometry = BoardGeometry::new(area(), PieceColor::White).unwrap();
        // border + rank label column
        assert_eq!(Some(A8), geometry.square_at(2, 2));
        assert_eq!(Some(H1), geometry.square_at(2 + 8 * 4 - 1, 2 + 8 * 2 - 1));
        assert_eq!(None, geometry.square_at(1, 2));
        assert_eq!(None, geometry.square_at(2 + 8 * 4, 2));
    }

    #[test]
    fn test_black_perspective_flips_the_board() {
        let geometry = BoardGeometry::new(area(), PieceColor::Black).unwrap();
        assert_eq!(Some(H1), geometry.square_at(2, 2));
        assert_eq!(Some(A8), geometry.square_at(2 + 8 * 4 - 1, 2 + 8 * 2 - 1));
        assert_eq!(['h', 'g', 'f', 'e', 'd', 'c', 'b', 'a'], geometry.file_labels());
    }

    #[test]
    fn test_square_rect_round_trips_through_square_at() {
        for &perspective in &[PieceColor::White, PieceColor::Black] {
            let geometry = BoardGeometry::new(area(), perspective).unwrap();
            for square in Square::all() {
                let rect = geometry.square_rect(square);
                assert_eq!(Some(square), geometry.square_at(rect.x, rect.y));
                assert_eq!(
                    Some(square),
                    geometry.square_at(rect.x + rect.width - 1, rect.y + rect.height - 1)
                );
            }
        }
    }

    #[test]
    fn test_too_small_area_has_no_geometry() {
        assert_eq!(None, BoardGeometry::new(Rect::new(0, 0, 12, 12), PieceColor::White));
    }

    #[test]
    fn test_arrow_glyph_follows_perspective() {
        assert_eq!('↑', arrow_glyph(E2, E4, PieceColor::White));
        assert_eq!('↓', arrow_glyph(E2, E4, PieceColor::Black));
        assert_eq!('↗', arrow_glyph(A1, H8, PieceColor::White));
    }

    #[test]
    fn test_render_paints_pieces_and_drop_targets() {
        let mut host = Host {
            board: Board::starting_position(),
            table: MoveTable::new().with(E2, &[E3, E4]),
        };
        let mut session = BoardSession::new();
        session.handle(
            &mut host,
            crate::interaction::BoardEvent::Click {
                square: E2,
                button: crate::interaction::MouseButton::Primary,
            },
        );
        let views = session.board_view(&host, Viewport::default());
        let theme = Theme::default();
        let geometry = BoardGeometry::new(area(), PieceColor::White).unwrap();

        let mut buf = Buffer::empty(area());
        BoardWidget::new(&views, &[(E2, E4)], geometry, &theme).render(area(), &mut buf);

        let e2 = geometry.square_rect(E2);
        let center = &buf[(e2.x + e2.width / 2, e2.y + e2.height / 2)];
        let pawn = Piece::Pawn.to_unicode_piece_char(PieceColor::White);
        assert_eq!(pawn.to_string(), center.symbol());
        assert_eq!(theme.selected, center.bg);

        let e4 = geometry.square_rect(E4);
        assert_eq!(theme.drop_target, buf[(e4.x + 1, e4.y)].bg);
        assert_eq!("↑", buf[(e4.x, e4.y)].symbol());
    }
}
