//! Perft: exhaustive legal move-tree enumeration.
//!
//! Every traversal mutates a single position with apply/undo and leaves it
//! exactly as it found it. The collecting traversals record each move in
//! pre-order: a move is pushed, applied, its subtree explored, then undone.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Instant;

use log::{debug, trace};
use parking_lot::Mutex;

use crate::position::{Move, Position};

/// Node count and the moves visited while reaching those nodes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PerftReport {
    /// Leaf positions at the requested depth
    pub nodes: u64,
    /// Every move applied during the traversal, in pre-order
    pub moves: Vec<Move>,
}

/// Count the leaf nodes of the legal move tree rooted at `position`.
pub fn perft(position: &mut Position, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = position.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for &mv in moves.iter() {
        let undo = position.make_move(mv);
        nodes += perft(position, depth - 1);
        position.undo(undo);
    }
    nodes
}

/// Count leaf nodes and append every move applied to `moves`.
///
/// Moves are recorded in pre-order: each move is pushed just before its
/// subtree is explored. A listing that appends all of a node's moves before
/// descending holds the same moves in a different order.
///
/// Depth 0 counts the root as one node and records nothing.
pub fn perft_collect(position: &mut Position, depth: usize, moves: &mut Vec<Move>) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut nodes = 0;
    for &mv in position.legal_moves().iter() {
        moves.push(mv);
        let undo = position.make_move(mv);
        nodes += perft_collect(position, depth - 1, moves);
        position.undo(undo);
    }
    nodes
}

/// Serial traversal returning both the count and the move sequence.
pub fn perft_report(position: &mut Position, depth: usize) -> PerftReport {
    let start = Instant::now();
    let mut moves = Vec::new();
    let nodes = perft_collect(position, depth, &mut moves);
    debug!(
        "perft depth {depth}: {nodes} nodes, {} moves in {:?}",
        moves.len(),
        start.elapsed()
    );
    PerftReport { nodes, moves }
}

/// Leaf count below each root move, in generation order.
///
/// Depth 0 has no root moves to split on and yields an empty list.
pub fn perft_divide(position: &mut Position, depth: usize) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    let root_moves = position.legal_moves();
    let mut split = Vec::with_capacity(root_moves.len());
    for &mv in root_moves.iter() {
        let undo = position.make_move(mv);
        let nodes = perft(position, depth - 1);
        position.undo(undo);
        debug!("divide {mv}: {nodes}");
        split.push((mv, nodes));
    }
    split
}

/// Subtree result for one root move.
type RootSlot = Option<(u64, Vec<Move>)>;

/// Parallel version of [`perft_report`].
///
/// Root moves are handed out to `threads` workers through a shared cursor.
/// Each worker explores its subtrees on its own copy of the position, and
/// the per-root results are stitched together in root order, so the report
/// is identical to the serial one.
pub fn perft_parallel(position: &Position, depth: usize, threads: usize) -> PerftReport {
    if depth == 0 {
        return PerftReport {
            nodes: 1,
            moves: Vec::new(),
        };
    }

    let start = Instant::now();
    let root_moves = position.clone().legal_moves();
    let workers = threads.clamp(1, root_moves.len().max(1));
    let cursor = AtomicUsize::new(0);
    let slots: Mutex<Vec<RootSlot>> = Mutex::new(vec![None; root_moves.len()]);

    thread::scope(|scope| {
        for worker in 0..workers {
            let root_moves = &root_moves;
            let cursor = &cursor;
            let slots = &slots;
            scope.spawn(move || {
                let mut local = position.clone();
                loop {
                    let index = cursor.fetch_add(1, Ordering::Relaxed);
                    let Some(mv) = root_moves.get(index) else {
                        break;
                    };
                    trace!("worker {worker} takes root move {mv}");

                    let mut moves = vec![mv];
                    let undo = local.make_move(mv);
                    let nodes = perft_collect(&mut local, depth - 1, &mut moves);
                    local.undo(undo);

                    slots.lock()[index] = Some((nodes, moves));
                }
                trace!("worker {worker} done");
            });
        }
    });

    let mut report = PerftReport::default();
    for (nodes, moves) in slots.into_inner().into_iter().flatten() {
        report.nodes += nodes;
        report.moves.extend(moves);
    }
    debug!(
        "parallel perft depth {depth} on {workers} threads: {} nodes in {:?}",
        report.nodes,
        start.elapsed()
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_zero_is_one_node_without_moves() {
        let mut position = Position::new();
        let mut moves = Vec::new();
        assert_eq!(perft(&mut position, 0), 1);
        assert_eq!(perft_collect(&mut position, 0, &mut moves), 1);
        assert!(moves.is_empty());
        assert!(perft_divide(&mut position, 0).is_empty());
        assert_eq!(
            perft_parallel(&position, 0, 4),
            PerftReport {
                nodes: 1,
                moves: Vec::new()
            }
        );
    }

    #[test]
    fn test_collect_records_pre_order() {
        let mut position = Position::new();
        let mut moves = Vec::new();
        let nodes = perft_collect(&mut position, 2, &mut moves);
        assert_eq!(nodes, 400);
        // 20 root moves, each followed by its 20 replies
        assert_eq!(moves.len(), 420);
        let roots = Position::new().legal_moves();
        assert_eq!(moves[0], roots[0]);
        assert_eq!(moves[21], roots[1]);
    }

    #[test]
    fn test_collect_appends_to_existing_moves() {
        let mut position = Position::new();
        let sentinel = Move::quiet("a2".parse().unwrap(), "a3".parse().unwrap());
        let mut moves = vec![sentinel];
        perft_collect(&mut position, 1, &mut moves);
        assert_eq!(moves.len(), 21);
        assert_eq!(moves[0], sentinel);
    }

    #[test]
    fn test_traversals_restore_position() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let mut position = Position::from_fen(fen).unwrap();
        let original = position.clone();
        perft(&mut position, 2);
        assert_eq!(position, original);
        perft_report(&mut position, 2);
        assert_eq!(position, original);
        perft_divide(&mut position, 2);
        assert_eq!(position, original);
    }

    #[test]
    fn test_divide_sums_to_total() {
        let mut position = Position::new();
        let split = perft_divide(&mut position, 3);
        assert_eq!(split.len(), 20);
        assert_eq!(split.iter().map(|(_, n)| n).sum::<u64>(), 8902);
    }

    #[test]
    fn test_parallel_matches_serial() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let mut position = Position::from_fen(fen).unwrap();
        let serial = perft_report(&mut position, 3);
        for threads in [1, 3, 8] {
            let parallel = perft_parallel(&position, 3, threads);
            assert_eq!(parallel, serial, "threads = {threads}");
        }
        assert_eq!(serial.nodes, 97862);
    }

    #[test]
    fn test_parallel_with_no_root_moves() {
        // Fool's mate: White is checkmated
        let position =
            Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
                .unwrap();
        let report = perft_parallel(&position, 3, 4);
        assert_eq!(report, PerftReport::default());
    }
}
