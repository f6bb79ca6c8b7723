//! Per-pattern node visitation registry

use std::collections::HashSet;
use std::hash::Hash;

/// Outcome of recording one context's matches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Visit {
    /// Matched nodes that an earlier rule of the pattern already matched
    pub already_visited: usize,
    /// Matched nodes seen for the first time in the pattern
    pub newly_visited: usize,
}

impl Visit {
    pub fn matched_any(&self) -> bool {
        self.already_visited + self.newly_visited > 0
    }

    pub fn overlaps(&self) -> bool {
        self.already_visited > 0
    }
}

/// Tracks which exemplar nodes the rules of one pattern have matched.
///
/// A registry lives for exactly one pattern. Create a new one per pattern.
#[derive(Debug)]
pub struct CoverageRegistry<N> {
    visited: HashSet<N>,
}

impl<N: Eq + Hash> Default for CoverageRegistry<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Eq + Hash> CoverageRegistry<N> {
    pub fn new() -> Self {
        Self {
            visited: HashSet::new(),
        }
    }

    /// Marks every node visited and counts how many already were.
    pub fn record<I>(&mut self, nodes: I) -> Visit
    where
        I: IntoIterator<Item = N>,
    {
        let mut visit = Visit::default();
        for node in nodes {
            if self.visited.insert(node) {
                visit.newly_visited += 1;
            } else {
                visit.already_visited += 1;
            }
        }
        visit
    }

    pub fn is_visited(&self, node: &N) -> bool {
        self.visited.contains(node)
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}
