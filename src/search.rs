//! Best-first (A*) search over the implicit graph of ring states.
//!
//! The frontier never updates priorities in place. A cheaper route to a ring
//! pushes a fresh node and records the new cost in the best-cost table; the
//! old node stays in the heap and is dropped when it surfaces because its
//! `g` no longer matches the table.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::rc::Rc;

use tracing::{debug, info, trace, warn};

use crate::goal::GoalPattern;
use crate::heuristic::{Heuristic, RunBreaks};
use crate::puzzle::{Move, Ring};

/// A ring reached by a particular path. Never mutated once created.
#[derive(Debug)]
pub struct SearchNode {
    ring: Rc<Ring>,
    g: usize,
    h: usize,
    parent: Option<Rc<SearchNode>>,
    mv: Option<Move>,
}

impl SearchNode {
    fn root(ring: Rc<Ring>, h: usize) -> Self {
        Self {
            ring,
            g: 0,
            h,
            parent: None,
            mv: None,
        }
    }

    pub fn ring(&self) -> &Ring {
        &self.ring
    }

    /// Moves made since the start.
    pub fn g(&self) -> usize {
        self.g
    }

    pub fn h(&self) -> usize {
        self.h
    }

    pub fn f(&self) -> usize {
        self.g + self.h
    }

    pub fn parent(&self) -> Option<&SearchNode> {
        self.parent.as_deref()
    }

    /// The move that produced this node from its parent.
    pub fn last_move(&self) -> Option<Move> {
        self.mv
    }
}

/// States from the start to `goal`, in order.
pub fn path_states(goal: &SearchNode) -> Vec<Rc<Ring>> {
    let mut path = Vec::with_capacity(goal.g + 1);
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(Rc::clone(&node.ring));
        current = node.parent();
    }
    path.reverse();
    path
}

/// Moves from the start to `goal`, in order.
pub fn path_moves(goal: &SearchNode) -> Vec<Move> {
    let mut moves = Vec::with_capacity(goal.g);
    let mut current = Some(goal);
    while let Some(node) = current {
        moves.extend(node.mv);
        current = node.parent();
    }
    moves.reverse();
    moves
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Stop after expanding this many nodes.
    pub max_expansions: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub expanded: usize,
    /// Nodes pushed onto the frontier, the start included.
    pub generated: usize,
    /// Popped nodes dropped because a cheaper route had been found.
    pub stale: usize,
}

#[derive(Debug)]
pub enum SearchOutcome {
    Solved(Rc<SearchNode>),
    /// The frontier ran dry: no arrangement of the goal is reachable.
    NoSolution,
    /// The expansion budget ran out before the goal was popped.
    BudgetExceeded,
}

#[derive(Debug)]
pub struct SearchResult {
    pub outcome: SearchOutcome,
    pub stats: SearchStats,
}

impl SearchResult {
    pub fn goal(&self) -> Option<&SearchNode> {
        match &self.outcome {
            SearchOutcome::Solved(node) => Some(&**node),
            _ => None,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.goal().is_some()
    }

    pub fn path(&self) -> Option<Vec<Rc<Ring>>> {
        self.goal().map(path_states)
    }

    pub fn moves(&self) -> Option<Vec<Move>> {
        self.goal().map(path_moves)
    }
}

struct FrontierEntry {
    seq: u64,
    node: Rc<SearchNode>,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    // BinaryHeap pops the greatest entry: smallest f, then largest g, then
    // the earliest pushed.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .node
            .f()
            .cmp(&self.node.f())
            .then_with(|| self.node.g.cmp(&other.node.g))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Default)]
struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    pushed: u64,
}

impl Frontier {
    fn push(&mut self, node: Rc<SearchNode>) {
        self.heap.push(FrontierEntry {
            seq: self.pushed,
            node,
        });
        self.pushed += 1;
    }

    fn pop(&mut self) -> Option<Rc<SearchNode>> {
        self.heap.pop().map(|entry| entry.node)
    }
}

/// Solve `start` with the run-break heuristic.
pub fn solve(start: &Ring, limits: SearchLimits) -> SearchResult {
    let goal = GoalPattern::from_ring(start);
    let heuristic = RunBreaks::new(&goal);
    astar(start, &goal, &heuristic, limits)
}

/// A* from `start` towards `goal`.
///
/// The first goal node popped is returned, so with an admissible heuristic
/// the path has the fewest possible moves. Ties on `f` go to the deeper
/// node and then to the node pushed first, which makes runs reproducible.
pub fn astar<H: Heuristic>(
    start: &Ring,
    goal: &GoalPattern,
    heuristic: &H,
    limits: SearchLimits,
) -> SearchResult {
    let mut frontier = Frontier::default();
    let mut best_cost: HashMap<Rc<Ring>, usize> = HashMap::new();
    let mut stats = SearchStats::default();

    let start = Rc::new(start.clone());
    let root = SearchNode::root(Rc::clone(&start), heuristic.estimate(&start));
    info!(
        event = "search_start",
        ring_size = start.len(),
        start = %start,
        h = root.h,
        max_expansions = ?limits.max_expansions,
    );
    best_cost.insert(start, 0);
    frontier.push(Rc::new(root));
    stats.generated += 1;

    let outcome = loop {
        let Some(node) = frontier.pop() else {
            break SearchOutcome::NoSolution;
        };

        if best_cost.get(node.ring()) != Some(&node.g) {
            debug!(ring = %node.ring, g = node.g, "discarding stale node");
            stats.stale += 1;
            continue;
        }

        if goal.is_reached(&node.ring) {
            break SearchOutcome::Solved(node);
        }

        if limits
            .max_expansions
            .is_some_and(|max| stats.expanded >= max)
        {
            debug!(expanded = stats.expanded, "expansion budget exhausted");
            break SearchOutcome::BudgetExceeded;
        }

        stats.expanded += 1;
        trace!(ring = %node.ring, g = node.g, h = node.h, "expanding");

        for mv in node.ring.legal_moves() {
            let next = match node.ring.apply_move(mv) {
                Ok(next) => next,
                Err(err) => {
                    warn!(%err, ring = %node.ring, "move generator produced an inapplicable move");
                    continue;
                }
            };

            let g = node.g + 1;
            if best_cost.get(&next).is_some_and(|&known| known <= g) {
                continue;
            }

            let next = Rc::new(next);
            best_cost.insert(Rc::clone(&next), g);
            let h = heuristic.estimate(&next);
            frontier.push(Rc::new(SearchNode {
                ring: next,
                g,
                h,
                parent: Some(Rc::clone(&node)),
                mv: Some(mv),
            }));
            stats.generated += 1;
        }
    };

    match &outcome {
        SearchOutcome::Solved(node) => info!(
            event = "search_end",
            outcome = "solved",
            moves = node.g,
            expanded = stats.expanded,
            generated = stats.generated,
            stale = stats.stale,
        ),
        SearchOutcome::NoSolution => info!(
            event = "search_end",
            outcome = "no_solution",
            expanded = stats.expanded,
            generated = stats.generated,
        ),
        SearchOutcome::BudgetExceeded => info!(
            event = "search_end",
            outcome = "budget_exceeded",
            expanded = stats.expanded,
            generated = stats.generated,
        ),
    }

    SearchResult { outcome, stats }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::Uninformed;
    use crate::puzzle::Side;

    fn ring(large: &[u32], small: &[u32]) -> Ring {
        Ring::new(large.to_vec(), small.to_vec()).unwrap()
    }

    fn smalls(path: &[Rc<Ring>]) -> Vec<Vec<u32>> {
        path.iter().map(|r| r.small().to_vec()).collect()
    }

    #[test]
    fn solved_start_returns_single_state() {
        let start = ring(&[1, 2, 2, 1, 3], &[1, 1, 2, 2, 0]);
        let result = solve(&start, SearchLimits::default());

        assert_eq!(smalls(&result.path().unwrap()), vec![vec![1, 1, 2, 2, 0]]);
        assert!(result.moves().unwrap().is_empty());
        assert_eq!(result.stats.expanded, 0);
        assert_eq!(result.stats.generated, 1);
    }

    #[test]
    fn finds_two_move_solution() {
        let start = ring(&[1, 2, 2, 1, 3], &[1, 2, 0, 1, 2]);
        let result = solve(&start, SearchLimits::default());

        assert_eq!(
            smalls(&result.path().unwrap()),
            vec![
                vec![1, 2, 0, 1, 2],
                vec![0, 2, 1, 1, 2],
                vec![2, 0, 1, 1, 2],
            ]
        );
        assert_eq!(
            result.moves().unwrap(),
            vec![Move::new(2, Side::Left), Move::new(1, Side::Right)]
        );

        let goal = result.goal().unwrap();
        assert_eq!(goal.g(), 2);
        assert_eq!(goal.h(), 0);
        assert_eq!(goal.f(), 2);
        assert_eq!(goal.last_move(), Some(Move::new(1, Side::Right)));
        assert_eq!(goal.parent().unwrap().g(), 1);
    }

    #[test]
    fn tie_break_prefers_deeper_then_older_nodes() {
        let start = ring(&[2, 3, 1, 2, 3, 1, 2], &[2, 1, 1, 3, 2, 3, 0]);
        let result = solve(&start, SearchLimits::default());

        assert_eq!(
            smalls(&result.path().unwrap()),
            vec![
                vec![2, 1, 1, 3, 2, 3, 0],
                vec![2, 0, 1, 3, 2, 3, 1],
                vec![0, 2, 1, 3, 2, 3, 1],
                vec![1, 2, 0, 3, 2, 3, 1],
                vec![1, 0, 2, 3, 2, 3, 1],
                vec![1, 2, 2, 3, 0, 3, 1],
                vec![1, 2, 2, 3, 3, 0, 1],
            ]
        );
        assert_eq!(result.stats.expanded, 56);
        assert_eq!(result.stats.generated, 127);
    }

    #[test]
    fn unreachable_goal_reports_no_solution() {
        // With every large disk showing 1 the cyclic order of the disks can
        // never change, and 2 1 3 is the mirror image of 1 2 3.
        let start = ring(&[1, 1, 1, 1], &[2, 1, 3, 0]);
        let result = solve(&start, SearchLimits::default());

        assert!(matches!(result.outcome, SearchOutcome::NoSolution));
        assert!(result.path().is_none());
        assert_eq!(result.stats.expanded, 12);
    }

    #[test]
    fn budget_is_a_distinct_outcome() {
        let start = ring(&[2, 3, 1, 2, 3, 1, 2], &[2, 1, 1, 3, 2, 3, 0]);
        let limits = SearchLimits {
            max_expansions: Some(10),
        };
        let result = solve(&start, limits);

        assert!(matches!(result.outcome, SearchOutcome::BudgetExceeded));
        assert_eq!(result.stats.expanded, 10);
        assert!(result.moves().is_none());
    }

    #[test]
    fn budget_does_not_block_an_already_solved_start() {
        let start = ring(&[1, 2, 2, 1, 3], &[1, 1, 2, 2, 0]);
        let limits = SearchLimits {
            max_expansions: Some(0),
        };
        assert!(solve(&start, limits).is_solved());
    }

    #[test]
    fn matches_uniform_cost_search() {
        let start = ring(&[3, 1, 2, 3, 2, 1, 2, 3, 1, 2], &[1, 2, 3, 1, 2, 3, 1, 2, 3, 0]);
        let goal = GoalPattern::from_ring(&start);

        let informed = solve(&start, SearchLimits::default());
        let blind = astar(&start, &goal, &Uninformed, SearchLimits::default());

        assert_eq!(informed.goal().unwrap().g(), 10);
        assert_eq!(blind.goal().unwrap().g(), 10);
        assert!(informed.stats.expanded < blind.stats.expanded);
    }

    #[test]
    fn frontier_orders_by_f_then_depth_then_age() {
        let r = Rc::new(ring(&[1, 1, 1], &[1, 2, 0]));
        let node = |g, h| {
            Rc::new(SearchNode {
                ring: Rc::clone(&r),
                g,
                h,
                parent: None,
                mv: None,
            })
        };

        let mut frontier = Frontier::default();
        frontier.push(node(1, 3)); // f = 4
        frontier.push(node(1, 2)); // f = 3, shallow
        frontier.push(node(2, 1)); // f = 3, deep, older
        frontier.push(node(2, 1)); // f = 3, deep, newer
        frontier.push(node(0, 5)); // f = 5

        let order: Vec<_> = std::iter::from_fn(|| frontier.pop())
            .map(|n| (n.f(), n.g()))
            .collect();
        assert_eq!(order, vec![(3, 2), (3, 2), (3, 1), (4, 1), (5, 0)]);

        let mut frontier = Frontier::default();
        let older = node(2, 1);
        let newer = node(2, 1);
        frontier.push(Rc::clone(&older));
        frontier.push(Rc::clone(&newer));
        assert!(Rc::ptr_eq(&frontier.pop().unwrap(), &older));
        assert!(Rc::ptr_eq(&frontier.pop().unwrap(), &newer));
    }
}
