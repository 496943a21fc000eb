use rand::{seq::SliceRandom, Rng};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::error::{PuzzleError, Result};

/// Rotational direction around the small-disk ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(&self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Side::Left => "left",
            Side::Right => "right",
        };
        write!(f, "{}", s)
    }
}

/// Swap the blank with the `k`-th disk on `side`.
///
/// `k` is either 1 (the neighbour) or the label of the large disk the blank
/// currently uncovers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub k: u32,
    pub side: Side,
}

impl Move {
    pub fn new(k: u32, side: Side) -> Self {
        Self { k, side }
    }

    /// Same distance, opposite direction.
    pub fn mirror(&self) -> Self {
        Self::new(self.k, self.side.opposite())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-from-{}", self.k, self.side)
    }
}

/// One configuration of the puzzle: the fixed ring of large (cover) disks
/// and the current ring of small disks, exactly one of which is the blank.
///
/// The large ring never changes during a run and is shared between every
/// state derived from the same start. Equality and hashing look at the
/// small ring only.
#[derive(Debug, Clone)]
pub struct Ring {
    large: Rc<[u32]>,
    small: Vec<u32>,
    blank: usize,
}

impl Ring {
    pub fn new(large: Vec<u32>, small: Vec<u32>) -> Result<Self> {
        if large.len() != small.len() {
            return Err(PuzzleError::LengthMismatch {
                large: large.len(),
                small: small.len(),
            });
        }
        if small.len() < 2 {
            return Err(PuzzleError::RingTooSmall(small.len()));
        }

        let mut blanks = small
            .iter()
            .enumerate()
            .filter(|&(_, &disk)| disk == 0)
            .map(|(i, _)| i);
        let blank = blanks.next().ok_or(PuzzleError::MissingBlank)?;
        let extra = blanks.count();
        if extra > 0 {
            return Err(PuzzleError::MultipleBlanks(extra + 1));
        }

        Ok(Self {
            large: large.into(),
            small,
            blank,
        })
    }

    pub fn large(&self) -> &[u32] {
        &self.large
    }

    pub fn small(&self) -> &[u32] {
        &self.small
    }

    pub fn len(&self) -> usize {
        self.small.len()
    }

    pub fn is_empty(&self) -> bool {
        self.small.is_empty()
    }

    pub fn blank(&self) -> usize {
        self.blank
    }

    /// Label of the large disk under the blank.
    pub fn uncovered(&self) -> u32 {
        self.large[self.blank]
    }

    /// Up to four moves: distance 1 and distance `K` in both directions.
    /// `K == 1` collapses onto the neighbour moves and `K == 0` offers none.
    pub fn legal_moves(&self) -> Vec<Move> {
        let uncovered = self.uncovered();
        let mut distances = vec![1];
        if uncovered > 1 {
            distances.push(uncovered);
        }

        distances
            .into_iter()
            .flat_map(|k| [Side::Left, Side::Right].map(|side| Move::new(k, side)))
            .collect()
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        mv.k == 1 || (mv.k > 1 && mv.k == self.uncovered())
    }

    /// Index of the `k`-th disk from the blank on `side`, never counting the
    /// blank itself when the walk wraps all the way around.
    fn source_index(&self, mv: Move) -> Option<usize> {
        if mv.k == 0 {
            return None;
        }
        let size = self.len();
        let offset = (mv.k as usize - 1) % (size - 1) + 1;

        Some(match mv.side {
            Side::Right => (self.blank + offset) % size,
            Side::Left => (self.blank + size - offset) % size,
        })
    }

    /// Swap the blank with the disk `mv` points at, without checking that
    /// `mv` is legal in this state.
    pub fn shifted(&self, mv: Move) -> Option<Self> {
        let source = self.source_index(mv)?;
        let mut small = self.small.clone();
        small.swap(self.blank, source);

        Some(Self {
            large: Rc::clone(&self.large),
            small,
            blank: source,
        })
    }

    pub fn apply_move(&self, mv: Move) -> Result<Self> {
        let illegal = || PuzzleError::IllegalMove {
            mv,
            uncovered: self.uncovered(),
        };
        if !self.is_legal(mv) {
            return Err(illegal());
        }
        self.shifted(mv).ok_or_else(illegal)
    }

    pub fn try_move(&self, mv: Move) -> Option<Self> {
        self.apply_move(mv).ok()
    }

    /// Random walk of `steps` legal moves; the result is always reachable
    /// from `self`.
    pub fn scramble<R: Rng + ?Sized>(&self, steps: usize, rng: &mut R) -> Self {
        let mut ring = self.clone();

        for _ in 0..steps {
            let moves = ring.legal_moves();
            match moves.choose(rng).and_then(|&mv| ring.try_move(mv)) {
                Some(next) => ring = next,
                None => break,
            }
        }

        ring
    }

    /// Both rings, for debugging.
    pub fn debug_view(&self) -> String {
        format!("Large: {:?}\nSmall: {:?}", self.large, self.small)
    }
}

impl PartialEq for Ring {
    fn eq(&self, other: &Self) -> bool {
        self.small == other.small
    }
}

impl Eq for Ring {}

impl Hash for Ring {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.small.hash(state);
    }
}

impl fmt::Display for Ring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, disk) in self.small.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", disk)?;
        }
        Ok(())
    }
}
