//! Segment tree over an arbitrary monoid.
//!
//! Stores a fixed-length sequence in the leaves of a complete binary tree
//! kept in a flat array, with every internal node holding the monoid
//! aggregate of its subtree.
//!
//! Supports:
//! - Point update: O(log n)
//! - Range aggregate query: O(log n)
//! - Whole-sequence aggregate: O(1)
//! - Monotonic-predicate boundary search from either side: O(log n)

use rangekit_error::{RangeError, Result};
use rangekit_monoid::Monoid;

/// A segment tree over the monoid `M`.
///
/// The backing array has length `2 * size` where `size` is the smallest
/// power of two at or above the logical length. Nodes are numbered from 1,
/// node `i` has children `2i` and `2i + 1`, and the leaves sit at
/// `[size, size + len)`. Padding leaves hold the identity and are never
/// observable through the public API.
pub struct SegTree<M: Monoid> {
    len: usize,
    size: usize,
    log: u32,
    data: Vec<M::Value>,
}

impl<M: Monoid> SegTree<M> {
    /// Creates a tree of `len` identity elements.
    pub fn new(len: usize) -> Result<Self> {
        let size = len
            .checked_next_power_of_two()
            .filter(|s| s.checked_mul(2).is_some())
            .ok_or(RangeError::InvalidSize { requested: len })?;
        Ok(Self {
            len,
            size,
            log: size.trailing_zeros(),
            data: vec![M::identity(); 2 * size],
        })
    }

    /// Creates a tree seeded from `values`.
    pub fn from_slice(values: &[M::Value]) -> Result<Self> {
        let mut tree = Self::new(values.len())?;
        tree.build(values)?;
        Ok(tree)
    }

    /// Reseeds all leaves from `values` and recomputes every internal node.
    ///
    /// `values` must contain exactly `len` elements.
    pub fn build(&mut self, values: &[M::Value]) -> Result<()> {
        if values.len() != self.len {
            return Err(RangeError::LengthMismatch {
                expected: self.len,
                actual: values.len(),
            });
        }
        for (i, value) in values.iter().enumerate() {
            self.data[self.size + i] = value.clone();
        }
        for i in (1..self.size).rev() {
            self.update(i);
        }
        Ok(())
    }

    /// Overwrites the element at `p` and recomputes its ancestors.
    pub fn set(&mut self, p: usize, value: M::Value) -> Result<()> {
        self.check_index(p)?;
        let p = p + self.size;
        self.data[p] = value;
        for i in 1..=self.log {
            self.update(p >> i);
        }
        Ok(())
    }

    /// Returns the element at `p`.
    pub fn get(&self, p: usize) -> Result<M::Value> {
        self.check_index(p)?;
        Ok(self.data[p + self.size].clone())
    }

    /// Returns `op(a[l], ..., a[r - 1])`, or the identity when `l == r`.
    ///
    /// Both boundaries walk upward simultaneously; left-side pieces are
    /// folded into `sml` and right-side pieces into `smr`, and the final
    /// answer is `op(sml, smr)`. The order is fixed because `op` need not
    /// be commutative.
    pub fn range_query(&self, l: usize, r: usize) -> Result<M::Value> {
        self.check_range(l, r)?;
        let mut sml = M::identity();
        let mut smr = M::identity();
        let mut l = l + self.size;
        let mut r = r + self.size;
        while l < r {
            if l & 1 == 1 {
                sml = M::op(sml, self.data[l].clone());
                l += 1;
            }
            if r & 1 == 1 {
                r -= 1;
                smr = M::op(self.data[r].clone(), smr);
            }
            l >>= 1;
            r >>= 1;
        }
        Ok(M::op(sml, smr))
    }

    /// Returns the aggregate of the whole sequence in O(1).
    pub fn query_all(&self) -> M::Value {
        self.data[1].clone()
    }

    /// Returns the largest `r` in `[l, len]` such that `pred` holds for the
    /// aggregate of `[l, r)`.
    ///
    /// `pred` must be monotone (once false it stays false as the window
    /// grows) and must accept the identity; both are trusted, not checked.
    pub fn max_right<P>(&self, l: usize, mut pred: P) -> Result<usize>
    where
        P: FnMut(M::Value) -> bool,
    {
        self.check_anchor(l)?;
        if l == self.len {
            return Ok(self.len);
        }
        let mut l = l + self.size;
        let mut sm = M::identity();
        loop {
            while l % 2 == 0 {
                l >>= 1;
            }
            if !pred(M::op(sm.clone(), self.data[l].clone())) {
                while l < self.size {
                    l <<= 1;
                    let candidate = M::op(sm.clone(), self.data[l].clone());
                    if pred(candidate.clone()) {
                        sm = candidate;
                        l += 1;
                    }
                }
                return Ok(l - self.size);
            }
            sm = M::op(sm, self.data[l].clone());
            l += 1;
            // stop once l is a power of two: the walk has left the tree
            if l & l.wrapping_neg() == l {
                break;
            }
        }
        Ok(self.len)
    }

    /// Returns the smallest `l` in `[0, r]` such that `pred` holds for the
    /// aggregate of `[l, r)`.
    ///
    /// Mirror of [`max_right`](Self::max_right); candidates are combined as
    /// `op(subtree, sm)` to keep the right-anchored order.
    pub fn min_left<P>(&self, r: usize, mut pred: P) -> Result<usize>
    where
        P: FnMut(M::Value) -> bool,
    {
        self.check_anchor(r)?;
        if r == 0 {
            return Ok(0);
        }
        let mut r = r + self.size;
        let mut sm = M::identity();
        loop {
            r -= 1;
            while r > 1 && r & 1 == 1 {
                r >>= 1;
            }
            if !pred(M::op(self.data[r].clone(), sm.clone())) {
                while r < self.size {
                    r = 2 * r + 1;
                    let candidate = M::op(self.data[r].clone(), sm.clone());
                    if pred(candidate.clone()) {
                        sm = candidate;
                        r -= 1;
                    }
                }
                return Ok(r + 1 - self.size);
            }
            sm = M::op(self.data[r].clone(), sm);
            if r & r.wrapping_neg() == r {
                break;
            }
        }
        Ok(0)
    }

    /// Returns the number of elements in the sequence.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn update(&mut self, i: usize) {
        self.data[i] = M::op(self.data[2 * i].clone(), self.data[2 * i + 1].clone());
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.len {
            Ok(())
        } else {
            Err(RangeError::IndexOutOfRange {
                index,
                len: self.len,
            })
        }
    }

    // boundary-search anchors may equal len
    fn check_anchor(&self, index: usize) -> Result<()> {
        if index <= self.len {
            Ok(())
        } else {
            Err(RangeError::IndexOutOfRange {
                index,
                len: self.len,
            })
        }
    }

    fn check_range(&self, l: usize, r: usize) -> Result<()> {
        if l <= r && r <= self.len {
            Ok(())
        } else {
            Err(RangeError::InvalidRange {
                left: l,
                right: r,
                len: self.len,
            })
        }
    }
}
