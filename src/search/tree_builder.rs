//! Fixed-horizon game tree construction.
//!
//! The side to move at the root is the computer. Its moves are discarded when
//! they leave its own king attacked; the opponent's moves are kept as
//! generated. A node that ends up with no children before the horizon is a
//! terminal leaf (mate or stalemate for the side to move there).

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::game_state::chess_types::{Color, Move};
use crate::game_state::position_state::PositionState;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::move_generator::generate_destinations_with;
use crate::search::game_tree::{push_children, GameTree, TreeNode};
use crate::search::threading::WorkerPool;

/// Children of `position` with `mover` to play, in generation order.
pub fn child_positions(
    position: &PositionState,
    mover: Color,
    computer: Color,
) -> Vec<(Move, PositionState)> {
    let occupancy = position.occupancy();
    let mut destinations = Vec::with_capacity(28);
    let mut children = Vec::with_capacity(40);

    for piece in mover.piece_ids() {
        destinations.clear();
        generate_destinations_with(position, &occupancy, piece, &mut destinations);
        for to in destinations.iter().copied() {
            let child = position.with_move(piece, to);
            if mover == computer && is_king_in_check(&child, computer) {
                continue;
            }
            children.push((Move::new(piece, to), child));
        }
    }
    children
}

/// Expands `nodes[index]` depth-first down to `max_depth`.
fn expand(nodes: &mut Vec<TreeNode>, index: usize, computer: Color, max_depth: u8) {
    let depth = nodes[index].depth();
    if depth >= max_depth {
        return;
    }
    let mover = if depth % 2 == 0 {
        computer
    } else {
        computer.opposite()
    };
    let position = *nodes[index].position();
    let range = push_children(nodes, index, child_positions(&position, mover, computer));
    for child in range {
        expand(nodes, child, computer, max_depth);
    }
}

/// Builds the full tree below `root` on the calling thread.
pub fn build_game_tree(root: PositionState, side_to_move: Color, max_depth: u8) -> GameTree {
    let mut tree = GameTree::new(root, side_to_move, max_depth);
    expand(tree.nodes_mut(), 0, side_to_move, max_depth);
    debug!(
        nodes = tree.len(),
        leaves = tree.leaf_count(),
        max_depth,
        "serial tree build finished"
    );
    tree
}

/// Builds the same tree as [`build_game_tree`], expanding groups of root
/// children on `pool`.
///
/// Root children are generated first and split into one contiguous group per
/// worker. Each group grows in its own arena from copies of its nodes; the
/// arenas are grafted back in group order once every task has joined.
pub fn build_game_tree_parallel(
    root: PositionState,
    side_to_move: Color,
    max_depth: u8,
    pool: &WorkerPool,
) -> GameTree {
    let mut tree = GameTree::new(root, side_to_move, max_depth);
    if max_depth == 0 {
        return tree;
    }

    let first_ply = child_positions(&root, side_to_move, side_to_move);
    let root_children = push_children(tree.nodes_mut(), 0, first_ply);
    if max_depth == 1 || root_children.is_empty() {
        debug!(nodes = tree.len(), "parallel tree build finished at first ply");
        return tree;
    }

    let group_size = root_children.len().div_ceil(pool.thread_count().max(1));
    let groups: Vec<(usize, Vec<TreeNode>)> = tree.nodes()[root_children.clone()]
        .chunks(group_size)
        .enumerate()
        .map(|(group, chunk)| {
            let first = root_children.start + group * group_size;
            (first, chunk.iter().map(TreeNode::detached).collect())
        })
        .collect();
    trace!(
        root_children = root_children.len(),
        groups = groups.len(),
        group_size,
        "partitioned root children"
    );

    let expanded: Vec<(usize, usize, Vec<TreeNode>)> = pool.install(|| {
        groups
            .into_par_iter()
            .map(|(first, mut local)| {
                let group_len = local.len();
                for index in 0..group_len {
                    expand(&mut local, index, side_to_move, max_depth);
                }
                trace!(first, group_len, nodes = local.len(), "group expanded");
                (first, group_len, local)
            })
            .collect()
    });

    for (first, group_len, local) in expanded {
        tree.graft(first, group_len, local);
    }

    debug!(
        nodes = tree.len(),
        leaves = tree.leaf_count(),
        max_depth,
        workers = pool.thread_count(),
        "parallel tree build finished"
    );
    tree
}
