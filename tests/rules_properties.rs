//! End-to-end properties of the rules engine and both searches, exercised
//! only through the public crate surface.

use smart_chess::game_state::chess_types::{Color, Move, PieceKind, Square};
use smart_chess::search::board_scoring::HeuristicScorer;
use smart_chess::search::mcts::{MctsConfig, MctsTree};
use smart_chess::utils::algebraic::{algebraic_to_indices, indices_to_algebraic};
use smart_chess::{
    apply_move, best_move_minimax, initial_board, legal_moves, status, Board, ChessErrors, GameState,
    GameStatus, SpecialMove,
};

fn sq(s: &str) -> Square {
    s.parse().expect("test square should parse")
}

fn mv(from: &str, to: &str) -> Move {
    Move::new(sq(from), sq(to))
}

#[test]
fn algebraic_coordinates_round_trip() {
    for file in 0..8u8 {
        for rank in 0..8u8 {
            let text = indices_to_algebraic(file, rank).expect("in range");
            assert_eq!(algebraic_to_indices(&text).expect("round trip"), (file, rank));
        }
    }
    for text in ["a1", "h8", "e4", "c7"] {
        let (file, rank) = algebraic_to_indices(text).expect("valid coordinate");
        assert_eq!(indices_to_algebraic(file, rank).expect("in range"), text);
    }
    assert!(algebraic_to_indices("z9").is_err());
    assert!(indices_to_algebraic(8, 0).is_err());
}

#[test]
fn twenty_moves_for_each_side_at_the_start() {
    let mut board = initial_board();
    assert_eq!(legal_moves(&board, Color::White, None).len(), 20);
    for (from, to) in [("e2", "e4"), ("g1", "f3"), ("a2", "a3")] {
        let mut reply_board = board;
        apply_move(&mut reply_board, sq(from), sq(to), None).expect("opening move is legal");
        let last = Some(mv(from, to));
        assert_eq!(legal_moves(&reply_board, Color::Black, last).len(), 20);
    }
    apply_move(&mut board, sq("d2"), sq("d4"), None).expect("d2d4 is legal");
    apply_move(&mut board, sq("d7"), sq("d5"), Some(mv("d2", "d4"))).expect("d7d5 is legal");
    assert!(legal_moves(&board, Color::White, Some(mv("d7", "d5"))).len() > 20);
}

#[test]
fn moves_outside_the_legal_list_fail_and_leave_the_board_alone() {
    let board = initial_board();
    let legal = legal_moves(&board, Color::White, None);
    for from in Square::all() {
        if !board.is_occupied_by(from, Color::White) {
            continue;
        }
        for to in Square::all() {
            if legal.contains(&Move::new(from, to)) {
                continue;
            }
            let mut scratch = board;
            assert!(apply_move(&mut scratch, from, to, None).is_err(), "{from}{to} should fail");
            assert_eq!(scratch, board, "{from}{to} changed the board");
        }
    }
}

#[test]
fn en_passant_removes_the_pawn_that_passed() {
    let mut board = Board::from_diagram(
        "....k...
         ...p....
         ........
         ....P...
         ........
         ........
         ........
         ....K...",
    )
    .expect("diagram");
    apply_move(&mut board, sq("d7"), sq("d5"), None).expect("double push is legal");
    let last = Some(mv("d7", "d5"));
    assert!(legal_moves(&board, Color::White, last).contains(&mv("e5", "d6")));

    let outcome = apply_move(&mut board, sq("e5"), sq("d6"), last).expect("en passant is legal");
    assert_eq!(outcome.special, SpecialMove::EnPassant);
    assert_eq!(outcome.captured, Some(PieceKind::Pawn));
    assert!(board.piece_at(sq("d5")).is_none());
    assert_eq!(board.piece_at(sq("d6")).map(|p| p.color), Some(Color::White));
}

#[test]
fn castling_needs_unattacked_transit() {
    let open = Board::from_diagram(
        "r...k..r
         ........
         ........
         ........
         ........
         ........
         ........
         R...K..R",
    )
    .expect("diagram");
    let moves = legal_moves(&open, Color::White, None);
    assert!(moves.contains(&mv("e1", "g1")));
    assert!(moves.contains(&mv("e1", "c1")));

    let mut castled = open;
    let outcome = apply_move(&mut castled, sq("e1"), sq("c1"), None).expect("O-O-O is legal");
    assert_eq!(outcome.special, SpecialMove::CastleQueenside);
    assert_eq!(castled.piece_at(sq("d1")).map(|p| p.kind), Some(PieceKind::Rook));

    let attacked = Board::from_diagram(
        "r...k..r
         ........
         ........
         ........
         ....r...
         ........
         ........
         R...K..R",
    )
    .expect("diagram");
    let moves = legal_moves(&attacked, Color::White, None);
    assert!(!moves.contains(&mv("e1", "g1")));
    assert!(!moves.contains(&mv("e1", "c1")));
}

#[test]
fn fools_mate_ends_the_game() {
    let mut game = GameState::new_game();
    for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
        game.play_move(sq(from), sq(to)).expect("fool's mate move is legal");
    }
    assert_eq!(game.status(), GameStatus::Checkmate { winner: Color::Black });
    assert_eq!(game.status().loser(), Some(Color::White));
    assert!(game.legal_moves().is_empty());
    assert_eq!(
        status(game.board(), Color::White, game.last_move()),
        GameStatus::Checkmate { winner: Color::Black }
    );
    assert_eq!(game.play_move(sq("e1"), sq("f2")), Err(ChessErrors::GameAlreadyOver));
}

#[test]
fn depth_one_minimax_takes_the_winning_capture() {
    let board = Board::from_diagram(
        "....k...
         ........
         ........
         ...q....
         ....P...
         ..N.....
         ........
         ....K...",
    )
    .expect("diagram");
    for _ in 0..5 {
        let best = best_move_minimax(&board, 1, Color::White, None);
        assert!(
            best == Some(mv("e4", "d5")) || best == Some(mv("c3", "d5")),
            "expected a queen capture, got {best:?}"
        );
    }
}

#[test]
fn mcts_visit_counts_only_grow() {
    let scorer = HeuristicScorer::default();
    let config = MctsConfig {
        simulations: 0,
        rollouts_per_leaf: 2,
        rollout_depth: 8,
        seed: Some(21),
        ..MctsConfig::default()
    };
    let board = initial_board();
    let mut tree = MctsTree::new(&board, Color::White, None, &scorer, config);
    let mut previous: Vec<u32> = Vec::new();

    for _ in 0..60 {
        tree.run_iteration();
        let visits: Vec<u32> = (0..tree.len())
            .map(|i| tree.node(i).expect("node index in range").visits())
            .collect();
        for (before, after) in previous.iter().zip(&visits) {
            assert!(after >= before);
        }
        for i in 0..tree.len() {
            let node = tree.node(i).expect("node index in range");
            let child_sum: u32 = node
                .children()
                .iter()
                .map(|&c| tree.node(c).expect("child index in range").visits())
                .sum();
            assert!(child_sum < node.visits().max(1));
        }
        previous = visits;
    }
    assert_eq!(tree.root().visits(), 60);
}
