//! The board model: a flat 8x8 grid of optional pieces.
//!
//! `Board` is `Copy`, so every simulated position in search is an independent
//! value and no piece is ever reachable from two boards. All mutators keep the
//! invariant that a stored piece's `square` equals the grid index it sits on.

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_rules::BACK_RANK_ORDER;
use crate::game_state::chess_types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

/// Standard starting position.
pub fn initial_board() -> Board {
    let mut board = Board::empty();
    for color in [Color::White, Color::Black] {
        for (file, kind) in BACK_RANK_ORDER.iter().enumerate() {
            let square = Square::from_index_unchecked(color.home_rank() * 8 + file as u8);
            board.put(Piece::new(*kind, color, square));
        }
        for file in 0..8u8 {
            let square = Square::from_index_unchecked(color.pawn_start_rank() * 8 + file);
            board.put(Piece::new(PieceKind::Pawn, color, square));
        }
    }
    board
}

impl Board {
    pub const fn empty() -> Self {
        Self {
            squares: [None; 64],
        }
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.squares[square.index()].as_ref()
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.squares[square.index()].is_none()
    }

    /// True if `square` holds a piece of `color`.
    #[inline]
    pub fn is_occupied_by(&self, square: Square, color: Color) -> bool {
        matches!(self.piece_at(square), Some(p) if p.color == color)
    }

    /// Pieces in scan order a1..h8.
    pub fn all_pieces(&self) -> impl Iterator<Item = &Piece> {
        self.squares.iter().flatten()
    }

    pub fn pieces(&self, color: Color) -> impl Iterator<Item = &Piece> {
        self.all_pieces().filter(move |p| p.color == color)
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(color)
            .find(|p| p.kind == PieceKind::King)
            .map(|p| p.square)
    }

    pub fn count(&self, kind: PieceKind, color: Color) -> usize {
        self.pieces(color).filter(|p| p.kind == kind).count()
    }

    /// Put a fresh (unmoved) piece on `square`, replacing whatever was there.
    pub fn place(
        &mut self,
        kind: PieceKind,
        color: Color,
        square: Square,
    ) -> Result<Option<Piece>, ChessErrors> {
        if kind == PieceKind::King {
            if let Some(existing) = self.king_square(color) {
                if existing != square {
                    return Err(ChessErrors::DuplicateKing(color));
                }
            }
        }
        Ok(self.put(Piece::new(kind, color, square)))
    }

    /// Raw write; the piece's own square decides where it lands.
    #[inline]
    pub(crate) fn put(&mut self, piece: Piece) -> Option<Piece> {
        self.squares[piece.square.index()].replace(piece)
    }

    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.index()].take()
    }

    /// Move the piece on `from` to `to`, marking it as moved. Returns whatever
    /// stood on `to` before. Does nothing if `from` is empty.
    pub fn relocate(&mut self, from: Square, to: Square) -> Option<Piece> {
        let mut piece = self.squares[from.index()].take()?;
        piece.square = to;
        piece.has_moved = true;
        self.squares[to.index()].replace(piece)
    }

    /// Swap the kind of the piece on `square` in place (promotion).
    pub fn replace_kind(&mut self, square: Square, kind: PieceKind) {
        if let Some(piece) = self.squares[square.index()].as_mut() {
            piece.kind = kind;
        }
    }

    pub fn set_has_moved(&mut self, square: Square, has_moved: bool) {
        if let Some(piece) = self.squares[square.index()].as_mut() {
            piece.has_moved = has_moved;
        }
    }

    /// Build a board from an 8-line diagram, rank 8 first, one character per
    /// file: FEN letters for pieces, `.` for empty squares. Whitespace between
    /// characters is ignored.
    ///
    /// Kings and rooks on their home squares and pawns on their start rank are
    /// treated as unmoved, everything else as moved.
    pub fn from_diagram(diagram: &str) -> Result<Self, ChessErrors> {
        let rows: Vec<Vec<char>> = diagram
            .lines()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();
        if rows.len() != 8 {
            return Err(ChessErrors::InvalidDiagram(format!(
                "expected 8 ranks, found {}",
                rows.len()
            )));
        }

        let mut board = Board::empty();
        for (row_idx, row) in rows.iter().enumerate() {
            if row.len() != 8 {
                return Err(ChessErrors::InvalidDiagram(format!(
                    "rank {} has {} files",
                    8 - row_idx,
                    row.len()
                )));
            }
            let rank = 7 - row_idx as u8;
            for (file, ch) in row.iter().enumerate() {
                if *ch == '.' {
                    continue;
                }
                let kind = PieceKind::from_symbol(*ch).ok_or(ChessErrors::InvalidAlgebraicChar(*ch))?;
                let color = if ch.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                let square = Square::new(file as u8, rank)?;
                board.place(kind, color, square)?;
                board.set_has_moved(square, !is_home_square(kind, color, square));
            }
        }
        Ok(board)
    }
}

fn is_home_square(kind: PieceKind, color: Color, square: Square) -> bool {
    match kind {
        PieceKind::Pawn => square.rank() == color.pawn_start_rank(),
        PieceKind::King => square.rank() == color.home_rank() && square.file() == 4,
        PieceKind::Rook => {
            square.rank() == color.home_rank() && (square.file() == 0 || square.file() == 7)
        }
        _ => true,
    }
}
