//! Minimax with alpha-beta pruning over a prebuilt game tree.
//!
//! The root is always the maximizing side. Scores come from the tree's
//! `side_to_move` perspective. Every visited node records the value it
//! returned; children skipped by a cutoff keep no evaluation.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::game_state::chess_types::Move;
use crate::search::board_scoring::BoardScorer;
use crate::search::game_tree::{GameTree, NodeId};

/// Window bound standing in for an unbounded score.
pub const SCORE_INFINITY: i32 = i32::MAX;

/// Shared state of one search over one tree.
pub struct SearchContext<'a, S: BoardScorer> {
    tree: &'a GameTree,
    scorer: &'a S,
    leaves_evaluated: AtomicU64,
}

impl<'a, S: BoardScorer> SearchContext<'a, S> {
    pub fn new(tree: &'a GameTree, scorer: &'a S) -> Self {
        Self {
            tree,
            scorer,
            leaves_evaluated: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn tree(&self) -> &'a GameTree {
        self.tree
    }

    /// Static score of a leaf, recorded on the node.
    pub(crate) fn evaluate_leaf(&self, id: NodeId) -> i32 {
        let node = self.tree.node(id);
        let value = self.scorer.score(node.position(), self.tree.side_to_move());
        self.leaves_evaluated.fetch_add(1, Ordering::Relaxed);
        node.set_evaluation(value);
        value
    }

    pub(crate) fn finish(self, root_value: i32) -> SearchOutcome {
        let best_child = self.tree.best_root_child();
        SearchOutcome {
            root_value,
            best_child,
            best_move: best_child.and_then(|id| self.tree.node(id).mv()),
            leaves_evaluated: self.leaves_evaluated.into_inner(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub root_value: i32,
    /// First root child holding the root value; `None` if the root has no moves.
    pub best_child: Option<NodeId>,
    pub best_move: Option<Move>,
    pub leaves_evaluated: u64,
}

/// Fail-soft alpha-beta from `node`, scanning children in generation order.
pub fn alpha_beta<S: BoardScorer>(
    ctx: &SearchContext<'_, S>,
    node: NodeId,
    maximizing: bool,
    mut alpha: i32,
    mut beta: i32,
) -> i32 {
    let tree = ctx.tree();
    if tree.node(node).is_leaf() {
        return ctx.evaluate_leaf(node);
    }

    let value = if maximizing {
        let mut best = -SCORE_INFINITY;
        for child in tree.children(node) {
            best = best.max(alpha_beta(ctx, child, false, alpha, beta));
            alpha = alpha.max(best);
            if alpha >= beta {
                break;
            }
        }
        best
    } else {
        let mut best = SCORE_INFINITY;
        for child in tree.children(node) {
            best = best.min(alpha_beta(ctx, child, true, alpha, beta));
            beta = beta.min(best);
            if alpha >= beta {
                break;
            }
        }
        best
    };

    tree.node(node).set_evaluation(value);
    value
}

/// Searches the whole tree on the calling thread.
pub fn search_serial<S: BoardScorer>(tree: &GameTree, scorer: &S) -> SearchOutcome {
    let ctx = SearchContext::new(tree, scorer);
    let root_value = alpha_beta(&ctx, tree.root(), true, -SCORE_INFINITY, SCORE_INFINITY);
    ctx.finish(root_value)
}


#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::test_trees::{minimax, minimax_best_child, random_tree, tree_from_leaf_groups};
    use super::*;
    use crate::game_state::chess_types::Color;
    use crate::game_state::position_state::PositionState;
    use crate::search::board_scoring::StandardScorer;
    use crate::search::tree_builder::build_game_tree;

    #[test]
    fn cutoff_skips_leaves_without_changing_result() {
        let (tree, scorer) = tree_from_leaf_groups(&[&[5, 6], &[1, 9]]);
        let outcome = search_serial(&tree, &scorer);
        assert_eq!(outcome.root_value, 5);
        assert_eq!(outcome.leaves_evaluated, 3);
        assert_eq!(outcome.best_child, tree.children(tree.root()).next());
    }

    #[test]
    fn ties_resolve_to_first_child() {
        let (tree, scorer) = tree_from_leaf_groups(&[&[2, 7], &[4], &[4, 8], &[4]]);
        let outcome = search_serial(&tree, &scorer);
        assert_eq!(outcome.root_value, 4);
        assert_eq!(outcome.best_child, tree.children(tree.root()).nth(1));
        assert_eq!(outcome.best_move, tree.node(tree.children(tree.root()).nth(1).unwrap()).mv());
    }

    #[test]
    fn matches_exhaustive_minimax_on_random_trees() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for round in 0..200 {
            let depth = 1 + (round % 4) as u8;
            let (tree, scorer) = random_tree(&mut rng, depth);
            let outcome = search_serial(&tree, &scorer);
            assert_eq!(outcome.root_value, minimax(&tree, &scorer, tree.root(), true), "round {round}");
            assert_eq!(outcome.best_child, minimax_best_child(&tree, &scorer), "round {round}");
            assert!(outcome.leaves_evaluated as usize <= tree.leaf_count());
        }
    }

    #[test]
    fn matches_exhaustive_minimax_from_opening() {
        let tree = build_game_tree(PositionState::new_game(), Color::Dark, 2);
        let outcome = search_serial(&tree, &StandardScorer);
        assert_eq!(outcome.root_value, minimax(&tree, &StandardScorer, tree.root(), true));
        assert!(outcome.leaves_evaluated < tree.leaf_count() as u64);
        let mv = outcome.best_move.unwrap();
        assert!((16..32).contains(&mv.piece));
    }

    #[test]
    fn leaf_root_scores_itself() {
        let tree = build_game_tree(PositionState::new_game(), Color::Dark, 0);
        let outcome = search_serial(&tree, &StandardScorer);
        assert_eq!(outcome.root_value, 0);
        assert_eq!(outcome.best_move, None);
        assert_eq!(outcome.leaves_evaluated, 1);
    }
}
