//! Goal pattern and the rotation-invariant goal test.

use std::collections::BTreeMap;

use crate::puzzle::Ring;

/// The sorted arrangement a run is trying to reach: every label in
/// ascending order, each repeated as often as it occurs in the start ring,
/// followed by the blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalPattern {
    sequence: Vec<u32>,
    counts: BTreeMap<u32, usize>,
}

impl GoalPattern {
    pub fn from_ring(ring: &Ring) -> Self {
        let mut counts = BTreeMap::new();
        for &disk in ring.small().iter().filter(|&&disk| disk != 0) {
            *counts.entry(disk).or_insert(0) += 1;
        }

        let mut sequence: Vec<u32> = counts
            .iter()
            .flat_map(|(&label, &count)| std::iter::repeat(label).take(count))
            .collect();
        sequence.push(0);

        Self { sequence, counts }
    }

    pub fn sequence(&self) -> &[u32] {
        &self.sequence
    }

    /// Labels present in the instance, ascending, with their multiplicity.
    pub fn counts(&self) -> impl Iterator<Item = (u32, usize)> + '_ {
        self.counts.iter().map(|(&label, &count)| (label, count))
    }

    /// The label whose run follows `label`'s run in the goal, if any.
    pub fn next_label(&self, label: u32) -> Option<u32> {
        self.counts
            .range(label.saturating_add(1)..)
            .next()
            .map(|(&next, _)| next)
    }

    pub fn is_reached(&self, ring: &Ring) -> bool {
        ring.len() == self.sequence.len() && blank_last(ring).eq(self.sequence.iter().copied())
    }
}

/// The small ring read from just after the blank, so the blank comes last.
pub fn blank_last(ring: &Ring) -> impl Iterator<Item = u32> + '_ {
    let small = ring.small();
    let start = ring.blank() + 1;
    small[start..].iter().chain(&small[..start]).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(large: &[u32], small: &[u32]) -> Ring {
        Ring::new(large.to_vec(), small.to_vec()).unwrap()
    }

    #[test]
    fn pattern_groups_labels_in_order() {
        let goal = GoalPattern::from_ring(&ring(&[1; 7], &[3, 1, 0, 2, 1, 3, 2]));
        assert_eq!(goal.sequence(), &[1, 1, 2, 2, 3, 3, 0]);
        assert_eq!(goal.counts().collect::<Vec<_>>(), vec![(1, 2), (2, 2), (3, 2)]);
    }

    #[test]
    fn pattern_skips_absent_labels() {
        let goal = GoalPattern::from_ring(&ring(&[1; 5], &[4, 1, 4, 0, 2]));
        assert_eq!(goal.sequence(), &[1, 2, 4, 4, 0]);
        assert_eq!(goal.next_label(1), Some(2));
        assert_eq!(goal.next_label(2), Some(4));
        assert_eq!(goal.next_label(4), None);
    }

    #[test]
    fn blank_last_rotates_past_the_blank() {
        let r = ring(&[1; 5], &[2, 0, 1, 1, 2]);
        assert_eq!(blank_last(&r).collect::<Vec<_>>(), vec![1, 1, 2, 2, 0]);
    }

    #[test]
    fn goal_is_reached_up_to_rotation() {
        let start = ring(&[1, 2, 2, 1, 3], &[1, 2, 0, 1, 2]);
        let goal = GoalPattern::from_ring(&start);

        assert!(!goal.is_reached(&start));
        assert!(goal.is_reached(&ring(&[1, 2, 2, 1, 3], &[1, 1, 2, 2, 0])));
        assert!(goal.is_reached(&ring(&[1, 2, 2, 1, 3], &[2, 0, 1, 1, 2])));
        assert!(!goal.is_reached(&ring(&[1, 2, 2, 1, 3], &[2, 2, 1, 1, 0])));
    }
}
