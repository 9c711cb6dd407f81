//! Move application.
//!
//! [`apply_move`] is the validated entry point: it rejects anything that is not
//! a legal move and leaves the board untouched on failure. The simulation path
//! used by search and the legal-move filter skips validation and works on a
//! board copy the caller owns.

use tracing::debug;

use crate::chess_errors::ChessErrors;
use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Move, PieceKind, Square};
use crate::move_generation::legal_move_checks::{king_in_check, square_is_attacked};
use crate::moves::king_moves::castling_wing;
use crate::moves::move_descriptions::{MoveOutcome, SpecialMove};
use crate::moves::piece_moves::piece_move_is_legal;

/// Promotion piece used when the caller does not choose one.
pub const DEFAULT_PROMOTION: PieceKind = PieceKind::Queen;

/// Side effects of one move on the board, before check information is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BoardEffects {
    pub color: Color,
    pub moved: PieceKind,
    pub captured: Option<PieceKind>,
    pub special: SpecialMove,
    pub promotion: Option<PieceKind>,
}

/// Perform `mv` on `board` with no legality checks. Returns `None` if the
/// origin is empty.
pub(crate) fn make_move(board: &mut Board, mv: Move, promotion: PieceKind) -> Option<BoardEffects> {
    let piece = *board.piece_at(mv.from)?;
    let mut special = SpecialMove::Normal;
    let mut captured = board.piece_at(mv.to).map(|p| p.kind);

    // Castling: the king travels two files, the rook lands on the square it crossed.
    if piece.kind == PieceKind::King {
        if let Some(wing) = castling_wing(mv.from, mv.to) {
            let home = mv.from.rank();
            if let (Ok(rook_from), Ok(rook_to)) = (
                Square::new(wing.rook_file, home),
                Square::new(wing.rook_to_file, home),
            ) {
                board.relocate(rook_from, rook_to);
            }
            special = if wing.rook_file > mv.from.file() {
                SpecialMove::CastleKingside
            } else {
                SpecialMove::CastleQueenside
            };
        }
    }

    if piece.kind == PieceKind::Pawn {
        if mv.file_delta() != 0 && captured.is_none() {
            // En passant: the captured pawn sits beside the origin, on the destination file.
            if let Ok(victim) = Square::new(mv.to.file(), mv.from.rank()) {
                captured = board.remove(victim).map(|p| p.kind);
            }
            special = SpecialMove::EnPassant;
        } else if mv.rank_delta().abs() == 2 {
            special = SpecialMove::DoublePawnPush;
        }
    }

    board.relocate(mv.from, mv.to);

    let mut promoted = None;
    if piece.kind == PieceKind::Pawn && mv.to.rank() == piece.color.promotion_rank() {
        board.replace_kind(mv.to, promotion);
        promoted = Some(promotion);
    }

    Some(BoardEffects {
        color: piece.color,
        moved: piece.kind,
        captured,
        special,
        promotion: promoted,
    })
}

fn opponent_in_check(board: &Board, mover: Color) -> bool {
    let opponent = mover.opposite();
    board
        .king_square(opponent)
        .is_some_and(|king| square_is_attacked(board, king, opponent))
}

fn outcome_from(board: &Board, mv: Move, effects: BoardEffects) -> MoveOutcome {
    MoveOutcome {
        mv,
        color: effects.color,
        moved: effects.moved,
        captured: effects.captured,
        special: effects.special,
        promotion: effects.promotion,
        gives_check: opponent_in_check(board, effects.color),
    }
}

/// Apply a move already known to be legal. Promotion defaults to a queen.
pub fn apply_move_unchecked(board: &mut Board, mv: Move) -> Result<MoveOutcome, ChessErrors> {
    let effects = make_move(board, mv, DEFAULT_PROMOTION).ok_or(ChessErrors::NoPieceAtOrigin(mv.from))?;
    Ok(outcome_from(board, mv, effects))
}

/// Validate and apply a move, promoting to a queen if a pawn reaches the last
/// rank.
pub fn apply_move(
    board: &mut Board,
    from: Square,
    to: Square,
    last_move: Option<Move>,
) -> Result<MoveOutcome, ChessErrors> {
    apply_move_with_promotion(board, from, to, last_move, DEFAULT_PROMOTION)
}

/// Validate and apply a move with an explicit promotion choice. The choice is
/// ignored for moves that do not promote.
pub fn apply_move_with_promotion(
    board: &mut Board,
    from: Square,
    to: Square,
    last_move: Option<Move>,
    promotion: PieceKind,
) -> Result<MoveOutcome, ChessErrors> {
    if !promotion.is_promotion_target() {
        return Err(ChessErrors::InvalidPromotion(promotion));
    }

    let Some(piece) = board.piece_at(from).copied() else {
        debug!(%from, %to, "rejected move: empty origin");
        return Err(ChessErrors::NoPieceAtOrigin(from));
    };
    if board.is_occupied_by(to, piece.color) {
        debug!(%from, %to, "rejected move: destination holds own piece");
        return Err(ChessErrors::DestinationOccupiedByOwnPiece(to));
    }
    if from == to || !piece_move_is_legal(board, &piece, to, last_move) {
        debug!(%from, %to, kind = ?piece.kind, "rejected move: illegal geometry");
        return Err(ChessErrors::IllegalMove {
            kind: piece.kind,
            from,
            to,
        });
    }

    let mv = Move::new(from, to);
    let mut scratch = *board;
    let effects = make_move(&mut scratch, mv, promotion).ok_or(ChessErrors::NoPieceAtOrigin(from))?;
    if king_in_check(&scratch, piece.color) {
        debug!(%from, %to, color = %piece.color, "rejected move: own king left in check");
        return Err(ChessErrors::LeavesKingInCheck {
            color: piece.color,
            from,
            to,
        });
    }

    *board = scratch;
    Ok(outcome_from(board, mv, effects))
}
