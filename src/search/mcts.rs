//! Monte Carlo Tree Search with UCB1 selection and parallel random playouts.
//!
//! The tree lives in a `Vec` arena; nodes refer to their parent and children by
//! index. Each node is simulated once on its first visit before any child is
//! expanded under it, so a node's visit count is always one more than the sum
//! of its children's visits.
//!
//! Rewards lie in `[-1, 1]` and are stored from the point of view of the side
//! that made the move into the node. Playouts for one leaf run on the rayon
//! pool; each gets its own RNG seeded from the tree RNG, so results do not
//! depend on thread scheduling.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Move};
use crate::move_generation::game_status::is_insufficient_material;
use crate::move_generation::legal_move_apply::{make_move, DEFAULT_PROMOTION};
use crate::move_generation::legal_move_checks::king_in_check;
use crate::move_generation::legal_move_generator::legal_moves;
use crate::search::board_scoring::{BoardScorer, HeuristicScorer};
use crate::search::minimax::seeded_rng;

/// Centipawn scale of the cutoff evaluation squashing.
const CUTOFF_SCALE: f64 = 400.0;
/// Cutoff rewards stay strictly inside the terminal win/loss values.
const CUTOFF_CEILING: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MctsConfig {
    /// Iteration budget.
    pub simulations: u32,
    pub time_limit: Option<Duration>,
    /// Independent playouts averaged per simulated leaf.
    pub rollouts_per_leaf: usize,
    /// Playout length in plies before falling back to static evaluation.
    pub rollout_depth: u16,
    /// UCB1 exploration constant `C`.
    pub exploration: f64,
    pub seed: Option<u64>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            simulations: 200,
            time_limit: None,
            rollouts_per_leaf: 4,
            rollout_depth: 24,
            exploration: std::f64::consts::SQRT_2,
            seed: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MctsNode {
    board: Board,
    to_move: Color,
    mv: Option<Move>,
    parent: Option<usize>,
    children: Vec<usize>,
    untried: Option<Vec<Move>>,
    visits: u32,
    value_sum: f64,
}

impl MctsNode {
    fn new(board: Board, to_move: Color, mv: Option<Move>, parent: Option<usize>) -> Self {
        Self {
            board,
            to_move,
            mv,
            parent,
            children: Vec::new(),
            untried: None,
            visits: 0,
            value_sum: 0.0,
        }
    }

    /// Move that led from the parent to this node. At the root this is the
    /// move played just before the search started.
    pub fn mv(&self) -> Option<Move> {
        self.mv
    }

    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    pub fn children(&self) -> &[usize] {
        &self.children
    }

    pub fn visits(&self) -> u32 {
        self.visits
    }

    pub fn to_move(&self) -> Color {
        self.to_move
    }

    /// Average reward for the side that moved into this node.
    pub fn mean_value(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.value_sum / f64::from(self.visits)
        }
    }

    fn is_fully_expanded(&self) -> bool {
        self.untried.as_ref().is_some_and(|moves| moves.is_empty())
    }
}

/// Root child summary after a search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChildStats {
    pub mv: Move,
    pub visits: u32,
    pub mean_value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MctsStats {
    pub iterations: u32,
    pub tree_size: usize,
    pub root_visits: u32,
    pub children: Vec<ChildStats>,
}

pub struct MctsTree<'s> {
    nodes: Vec<MctsNode>,
    scorer: &'s dyn BoardScorer,
    config: MctsConfig,
    rng: StdRng,
    iterations: u32,
}

impl<'s> MctsTree<'s> {
    pub fn new(
        board: &Board,
        color: Color,
        last_move: Option<Move>,
        scorer: &'s dyn BoardScorer,
        config: MctsConfig,
    ) -> Self {
        Self {
            nodes: vec![MctsNode::new(*board, color, last_move, None)],
            scorer,
            config,
            rng: seeded_rng(config.seed),
            iterations: 0,
        }
    }

    pub fn root(&self) -> &MctsNode {
        &self.nodes[0]
    }

    pub fn node(&self, index: usize) -> Option<&MctsNode> {
        self.nodes.get(index)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    fn untried_moves(&mut self, index: usize) -> &mut Vec<Move> {
        if self.nodes[index].untried.is_none() {
            let node = &self.nodes[index];
            let moves = legal_moves(&node.board, node.to_move, node.mv);
            self.nodes[index].untried = Some(moves);
        }
        self.nodes[index].untried.get_or_insert_with(Vec::new)
    }

    fn ucb1(&self, parent_visits: u32, child: &MctsNode) -> f64 {
        if child.visits == 0 {
            return f64::INFINITY;
        }
        let visits = f64::from(child.visits);
        child.mean_value() + self.config.exploration * (f64::from(parent_visits).ln() / visits).sqrt()
    }

    fn best_ucb_child(&self, index: usize) -> Option<usize> {
        let parent = &self.nodes[index];
        parent
            .children
            .iter()
            .copied()
            .map(|child| (child, self.ucb1(parent.visits, &self.nodes[child])))
            .fold(None, |best: Option<(usize, f64)>, (child, score)| match best {
                Some((_, best_score)) if best_score >= score => best,
                _ => Some((child, score)),
            })
            .map(|(child, _)| child)
    }

    fn add_child(&mut self, parent: usize, mv: Move) -> usize {
        let mut board = self.nodes[parent].board;
        make_move(&mut board, mv, DEFAULT_PROMOTION);
        let to_move = self.nodes[parent].to_move.opposite();
        let index = self.nodes.len();
        self.nodes.push(MctsNode::new(board, to_move, Some(mv), Some(parent)));
        self.nodes[parent].children.push(index);
        index
    }

    /// Walk down by UCB1 and return the node to simulate: the first unvisited
    /// node on the path, a freshly expanded child, or a terminal node.
    fn select_and_expand(&mut self) -> usize {
        let mut index = 0;
        loop {
            if self.nodes[index].visits == 0 {
                return index;
            }
            let untried_len = self.untried_moves(index).len();
            if untried_len > 0 {
                let pick = self.rng.random_range(0..untried_len);
                let mv = self.untried_moves(index).swap_remove(pick);
                return self.add_child(index, mv);
            }
            match self.best_ucb_child(index) {
                Some(child) => index = child,
                None => return index,
            }
        }
    }

    /// Average playout reward for the side that moved into `index`.
    fn simulate(&mut self, index: usize) -> f64 {
        let board = self.nodes[index].board;
        let to_move = self.nodes[index].to_move;
        let last_move = self.nodes[index].mv;
        let perspective = to_move.opposite();

        if self.nodes[index].is_fully_expanded() && self.nodes[index].children.is_empty() {
            return terminal_reward(&board, to_move, perspective);
        }

        let rollouts = self.config.rollouts_per_leaf.max(1);
        let seeds: Vec<u64> = (0..rollouts).map(|_| self.rng.random()).collect();
        let depth = self.config.rollout_depth;
        let scorer = self.scorer;
        let total: f64 = seeds
            .par_iter()
            .map(|&seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                rollout(&board, to_move, last_move, perspective, depth, scorer, &mut rng)
            })
            .collect::<Vec<f64>>()
            .iter()
            .sum();
        total / rollouts as f64
    }

    fn backpropagate(&mut self, leaf: usize, mut reward: f64) {
        let mut index = leaf;
        loop {
            let node = &mut self.nodes[index];
            node.visits += 1;
            node.value_sum += reward;
            let Some(parent) = node.parent else {
                break;
            };
            if self.nodes[parent].to_move != self.nodes[index].to_move {
                reward = -reward;
            }
            index = parent;
        }
    }

    /// One select / expand / simulate / backpropagate cycle.
    pub fn run_iteration(&mut self) {
        let leaf = self.select_and_expand();
        let reward = self.simulate(leaf);
        self.backpropagate(leaf, reward);
        self.iterations += 1;
        trace!(
            iteration = self.iterations,
            leaf,
            reward,
            tree_size = self.nodes.len(),
            "mcts iteration"
        );
    }

    fn root_is_terminal(&mut self) -> bool {
        self.untried_moves(0).is_empty() && self.nodes[0].children.is_empty()
    }

    /// Run until the simulation or time budget is spent. At least one root
    /// child is always expanded when a legal move exists.
    pub fn search(&mut self) -> Option<Move> {
        if self.root_is_terminal() {
            return None;
        }
        let start = Instant::now();
        let deadline = self.config.time_limit.map(|limit| start + limit);
        loop {
            let has_child = !self.nodes[0].children.is_empty();
            if has_child {
                if self.iterations >= self.config.simulations {
                    break;
                }
                if deadline.is_some_and(|d| Instant::now() >= d) {
                    break;
                }
            }
            self.run_iteration();
        }
        debug!(
            iterations = self.iterations,
            tree_size = self.nodes.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "mcts search finished"
        );
        self.best_move()
    }

    /// Most visited root child; ties go to the better mean value.
    pub fn best_move(&self) -> Option<Move> {
        self.root()
            .children
            .iter()
            .map(|&child| &self.nodes[child])
            .fold(None, |best: Option<&MctsNode>, node| match best {
                Some(b)
                    if (b.visits, b.mean_value()) >= (node.visits, node.mean_value()) =>
                {
                    Some(b)
                }
                _ => Some(node),
            })
            .and_then(|node| node.mv)
    }

    pub fn stats(&self) -> MctsStats {
        let children = self
            .root()
            .children
            .iter()
            .filter_map(|&child| {
                let node = &self.nodes[child];
                node.mv.map(|mv| ChildStats {
                    mv,
                    visits: node.visits,
                    mean_value: node.mean_value(),
                })
            })
            .collect();
        MctsStats {
            iterations: self.iterations,
            tree_size: self.nodes.len(),
            root_visits: self.root().visits,
            children,
        }
    }
}

/// Exact reward for a position with no legal move, for `perspective`.
fn terminal_reward(board: &Board, to_move: Color, perspective: Color) -> f64 {
    if !king_in_check(board, to_move) {
        return 0.0;
    }
    if to_move == perspective {
        -1.0
    } else {
        1.0
    }
}

/// Random playout from `board` with `to_move` to play. Returns the reward for
/// `perspective`: +1 win, -1 loss, 0 draw, or the squashed static evaluation
/// when the ply limit is reached first.
fn rollout(
    board: &Board,
    to_move: Color,
    last_move: Option<Move>,
    perspective: Color,
    max_plies: u16,
    scorer: &dyn BoardScorer,
    rng: &mut StdRng,
) -> f64 {
    let mut board = *board;
    let mut side = to_move;
    let mut last = last_move;
    for _ in 0..max_plies {
        let moves = legal_moves(&board, side, last);
        let Some(&mv) = moves.choose(rng) else {
            return terminal_reward(&board, side, perspective);
        };
        if is_insufficient_material(&board) {
            return 0.0;
        }
        make_move(&mut board, mv, DEFAULT_PROMOTION);
        side = side.opposite();
        last = Some(mv);
    }
    let eval = f64::from(scorer.score(&board, perspective));
    (eval / CUTOFF_SCALE).tanh() * CUTOFF_CEILING
}

/// MCTS move choice with the default heuristic for playout cutoffs.
pub fn best_move_mcts(
    board: &Board,
    color: Color,
    last_move: Option<Move>,
    simulation_budget: u32,
    time_budget: Option<Duration>,
) -> Option<Move> {
    let config = MctsConfig {
        simulations: simulation_budget,
        time_limit: time_budget,
        ..MctsConfig::default()
    };
    let scorer = HeuristicScorer::default();
    MctsTree::new(board, color, last_move, &scorer, config).search()
}
