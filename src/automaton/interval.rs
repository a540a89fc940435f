//! Closed integer intervals over symbol ids.
//!
//! Set transitions label an edge with a union of closed intervals rather
//! than a single symbol: character ranges in the lexical automaton, token
//! ranges in the syntactic one.

use crate::automaton::SymbolId;
use smallvec::SmallVec;

/// A closed interval `lo..=hi` of symbol ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    /// Inclusive lower bound
    pub lo: SymbolId,
    /// Inclusive upper bound
    pub hi: SymbolId,
}

impl Interval {
    /// Create a closed interval. Bounds are validated when the automaton
    /// is finished, not here.
    pub fn new(lo: SymbolId, hi: SymbolId) -> Self {
        Self { lo, hi }
    }

    /// Number of symbols covered, zero for an inverted interval.
    pub fn len(&self) -> usize {
        if self.lo > self.hi {
            0
        } else {
            (self.hi - self.lo) as usize + 1
        }
    }

    /// Whether the interval covers no symbols.
    pub fn is_empty(&self) -> bool {
        self.lo > self.hi
    }

    /// Whether `symbol` falls inside the interval.
    pub fn contains(&self, symbol: SymbolId) -> bool {
        self.lo <= symbol && symbol <= self.hi
    }
}

/// A union of closed intervals, kept in insertion order.
///
/// Iteration order is the order intervals were added, so traversals that
/// expand a set member-by-member are deterministic for a fixed automaton.
///
/// # Examples
///
/// ```
/// use autosuggest::automaton::IntervalSet;
///
/// let mut set = IntervalSet::of('A' as u32, 'C' as u32);
/// set.add('X' as u32, 'X' as u32);
///
/// assert!(set.contains('B' as u32));
/// assert!(set.contains('X' as u32));
/// assert!(!set.contains('D' as u32));
/// assert_eq!(set.iter().count(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntervalSet {
    intervals: SmallVec<[Interval; 2]>,
}

impl IntervalSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set holding the single interval `lo..=hi`.
    pub fn of(lo: SymbolId, hi: SymbolId) -> Self {
        let mut set = Self::new();
        set.add(lo, hi);
        set
    }

    /// Append the interval `lo..=hi`.
    pub fn add(&mut self, lo: SymbolId, hi: SymbolId) {
        self.intervals.push(Interval::new(lo, hi));
    }

    /// The intervals in insertion order.
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Whether the set holds no intervals.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Whether any interval contains `symbol`.
    pub fn contains(&self, symbol: SymbolId) -> bool {
        self.intervals.iter().any(|i| i.contains(symbol))
    }

    /// Iterate every member symbol, interval by interval.
    pub fn iter(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.intervals.iter().flat_map(|i| i.lo..=i.hi)
    }

    /// Total number of member symbols.
    pub fn len(&self) -> usize {
        self.intervals.iter().map(Interval::len).sum()
    }
}
