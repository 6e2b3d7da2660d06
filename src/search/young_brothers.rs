//! Young-brothers-wait parallel alpha-beta.
//!
//! At every node on the leftmost path the eldest child is searched first,
//! recursively in the same manner. Its value tightens the window, and the
//! younger siblings are then searched concurrently with serial alpha-beta
//! under that window. Siblings never read each other's results, so the
//! combined value does not depend on completion order.
//!
//! With a full window at the root this returns the same root value and the
//! same best child as `search_serial`: a root child can only beat the eldest
//! when its true value exceeds the eldest's, and in that case it was searched
//! with a window that returns exact values.

use rayon::prelude::*;
use tracing::trace;

use crate::search::alpha_beta::{alpha_beta, SearchContext, SearchOutcome, SCORE_INFINITY};
use crate::search::board_scoring::BoardScorer;
use crate::search::game_tree::{GameTree, NodeId};
use crate::search::threading::WorkerPool;

pub fn young_brothers_wait<S: BoardScorer>(
    ctx: &SearchContext<'_, S>,
    node: NodeId,
    maximizing: bool,
    mut alpha: i32,
    mut beta: i32,
) -> i32 {
    let tree = ctx.tree();
    let mut children = tree.children(node);
    let Some(eldest) = children.next() else {
        return ctx.evaluate_leaf(node);
    };

    let seed = young_brothers_wait(ctx, eldest, !maximizing, alpha, beta);
    if maximizing {
        alpha = alpha.max(seed);
    } else {
        beta = beta.min(seed);
    }

    let value = if alpha >= beta || children.len() == 0 {
        seed
    } else {
        let younger: Vec<NodeId> = children.collect();
        if tree.node(node).depth() == 0 {
            trace!(siblings = younger.len(), seed, "dispatching root siblings");
        }
        let values = younger
            .par_iter()
            .map(|child| alpha_beta(ctx, *child, !maximizing, alpha, beta));
        if maximizing {
            values.reduce(|| seed, i32::max)
        } else {
            values.reduce(|| seed, i32::min)
        }
    };

    tree.node(node).set_evaluation(value);
    value
}

/// Searches the whole tree on `pool`, blocking until every task has joined.
pub fn search_parallel<S: BoardScorer>(
    tree: &GameTree,
    scorer: &S,
    pool: &WorkerPool,
) -> SearchOutcome {
    let ctx = SearchContext::new(tree, scorer);
    let root_value = pool.install(|| {
        young_brothers_wait(&ctx, tree.root(), true, -SCORE_INFINITY, SCORE_INFINITY)
    });
    ctx.finish(root_value)
}
