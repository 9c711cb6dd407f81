//! Shared ray logic for the sliding pieces (bishop, rook, queen).
//!
//! A slide is legal when origin and destination share a rank, file or
//! diagonal and every square strictly between them is empty.

use crate::game_state::board::Board;
use crate::game_state::chess_types::Square;

/// Which lines a slider may travel along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideLines {
    Orthogonal,
    Diagonal,
    Both,
}

/// Unit step from `from` toward `to` if the two squares are aligned on a line
/// the slider may use.
#[inline]
pub fn slide_step(from: Square, to: Square, lines: SlideLines) -> Option<(i8, i8)> {
    if from == to {
        return None;
    }
    let df = to.file() as i8 - from.file() as i8;
    let dr = to.rank() as i8 - from.rank() as i8;
    let orthogonal = df == 0 || dr == 0;
    let diagonal = df.abs() == dr.abs();
    let allowed = match lines {
        SlideLines::Orthogonal => orthogonal,
        SlideLines::Diagonal => diagonal,
        SlideLines::Both => orthogonal || diagonal,
    };
    allowed.then_some((df.signum(), dr.signum()))
}

/// True if every square strictly between `from` and `to` along `step` is empty.
pub fn path_is_clear(board: &Board, from: Square, to: Square, step: (i8, i8)) -> bool {
    let mut current = from;
    loop {
        let Some(next) = current.offset(step.0, step.1) else {
            return false;
        };
        if next == to {
            return true;
        }
        if !board.is_empty(next) {
            return false;
        }
        current = next;
    }
}

/// Slider reaches `target` (ignoring what stands on it).
#[inline]
pub fn slider_reaches(board: &Board, from: Square, target: Square, lines: SlideLines) -> bool {
    slide_step(from, target, lines)
        .map(|step| path_is_clear(board, from, target, step))
        .unwrap_or(false)
}
