//! Lower bounds on the number of moves left to reach the goal.

use std::collections::HashMap;

use crate::goal::{blank_last, GoalPattern};
use crate::puzzle::Ring;

pub trait Heuristic {
    fn estimate(&self, ring: &Ring) -> usize;
}

/// Counts breaks in the label runs.
///
/// The small ring is read once, starting just after the blank, so the blank
/// is the boundary of a linear pass over the other disks and a run split by
/// the blank is never penalised. Wherever the label changes to anything
/// other than the label whose run comes next in the goal, the pass has a
/// break. A move lifts a single disk out of the pass and drops it next to
/// the blank, touching at most two adjacent pairs, so half the breaks
/// (rounded up) never overestimates. The bound is zero exactly at the goal.
#[derive(Debug, Clone)]
pub struct RunBreaks {
    successors: HashMap<u32, u32>,
}

impl RunBreaks {
    pub fn new(goal: &GoalPattern) -> Self {
        let successors = goal
            .counts()
            .filter_map(|(label, _)| goal.next_label(label).map(|next| (label, next)))
            .collect();

        Self { successors }
    }

    pub fn breaks(&self, ring: &Ring) -> usize {
        let pass: Vec<u32> = blank_last(ring).take(ring.len() - 1).collect();

        pass.windows(2)
            .filter(|pair| {
                let (prev, cur) = (pair[0], pair[1]);
                cur != prev && self.successors.get(&prev) != Some(&cur)
            })
            .count()
    }
}

impl Heuristic for RunBreaks {
    fn estimate(&self, ring: &Ring) -> usize {
        self.breaks(ring).div_ceil(2)
    }
}

/// Always zero; turns the search into uniform-cost search.
#[derive(Debug, Clone, Copy, Default)]
pub struct Uninformed;

impl Heuristic for Uninformed {
    fn estimate(&self, _ring: &Ring) -> usize {
        0
    }
}
