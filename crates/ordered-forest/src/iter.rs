//! Cursors and range iteration.
//!
//! A cursor is just a position; it reads the live tree on every step and is
//! invalidated by any structural change that touches its node.

use crate::types::Node;
use crate::util::{last, next, prev};

/// Position in a tree. `None` is the end sentinel in both directions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cursor {
    curr: Option<u32>,
}

impl Cursor {
    pub const fn new(curr: Option<u32>) -> Self {
        Self { curr }
    }

    pub const fn end() -> Self {
        Self { curr: None }
    }

    pub fn index(&self) -> Option<u32> {
        self.curr
    }

    pub fn is_end(&self) -> bool {
        self.curr.is_none()
    }

    /// Steps to the in-order successor; past the last node this is the end.
    pub fn move_next<N: Node>(&mut self, arena: &[N]) {
        if let Some(i) = self.curr {
            self.curr = next(arena, i);
        }
    }

    /// Steps to the in-order predecessor; before the first node this is the
    /// end. Stepping back from the end stays at the end.
    pub fn move_prev<N: Node>(&mut self, arena: &[N]) {
        if let Some(i) = self.curr {
            self.curr = prev(arena, i);
        }
    }
}

/// Double-ended iterator over the half-open range `[begin, end)`.
///
/// Yields `(index, &node)` pairs in key order, or in reverse through
/// [`DoubleEndedIterator`].
pub struct Iter<'a, N> {
    arena: &'a [N],
    front: Option<u32>,
    back: Option<u32>,
    done: bool,
}

impl<'a, N: Node> Iter<'a, N> {
    /// `root` is needed to locate the last node when `end` is the end
    /// sentinel.
    pub fn new(arena: &'a [N], root: Option<u32>, begin: Cursor, end: Cursor) -> Self {
        let back = match end.curr {
            Some(e) => prev(arena, e),
            None => last(arena, root),
        };
        Self {
            arena,
            front: begin.curr,
            back,
            done: begin == end || begin.curr.is_none() || back.is_none(),
        }
    }
}

impl<'a, N: Node> Iterator for Iter<'a, N> {
    type Item = (u32, &'a N);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let i = self.front?;
        if Some(i) == self.back {
            self.done = true;
        } else {
            self.front = next(self.arena, i);
        }
        Some((i, &self.arena[i as usize]))
    }
}

impl<N: Node> DoubleEndedIterator for Iter<'_, N> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let i = self.back?;
        if Some(i) == self.front {
            self.done = true;
        } else {
            self.back = prev(self.arena, i);
        }
        Some((i, &self.arena[i as usize]))
    }
}

impl<N: Node> std::iter::FusedIterator for Iter<'_, N> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Hook;

    // 1 is the root with children 0 and 2; in-order 0, 1, 2.
    fn three() -> Vec<Hook> {
        vec![
            Hook { p: Some(1), l: None, r: None, tag: 0 },
            Hook { p: None, l: Some(0), r: Some(2), tag: 0 },
            Hook { p: Some(1), l: None, r: None, tag: 0 },
        ]
    }

    #[test]
    fn cursor_walks_both_ways_and_stops_at_end() {
        let arena = three();
        let mut c = Cursor::new(Some(0));
        c.move_next(&arena);
        assert_eq!(c.index(), Some(1));
        c.move_next(&arena);
        c.move_next(&arena);
        assert!(c.is_end());
        c.move_prev(&arena);
        assert!(c.is_end());

        let mut c = Cursor::new(Some(0));
        c.move_prev(&arena);
        assert_eq!(c, Cursor::end());
    }

    #[test]
    fn iter_meets_in_the_middle() {
        let arena = three();
        let mut it = Iter::new(&arena, Some(1), Cursor::new(Some(0)), Cursor::end());
        assert_eq!(it.next().map(|(i, _)| i), Some(0));
        assert_eq!(it.next_back().map(|(i, _)| i), Some(2));
        assert_eq!(it.next().map(|(i, _)| i), Some(1));
        assert!(it.next().is_none());
        assert!(it.next_back().is_none());
    }

    #[test]
    fn empty_when_begin_equals_end() {
        let arena = three();
        let it = Iter::new(&arena, Some(1), Cursor::new(Some(2)), Cursor::new(Some(2)));
        assert_eq!(it.count(), 0);
        let it = Iter::new(&arena, Some(1), Cursor::new(Some(1)), Cursor::new(Some(2)));
        assert_eq!(it.map(|(i, _)| i).collect::<Vec<_>>(), vec![1]);
    }
}
