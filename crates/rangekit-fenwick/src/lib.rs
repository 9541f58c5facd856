//! Fenwick tree (Binary Indexed Tree) for prefix sum queries.
//!
//! A flat array where the slot with 1-based number `k` covers the
//! `lowest_set_bit(k)` elements ending at position `k - 1`. No explicit tree
//! is stored; updates and queries walk the array by repeatedly adding or
//! clearing the lowest set bit.
//!
//! Supports:
//! - Point increment: O(log n)
//! - Prefix/range sum query: O(log n)
//! - Smallest-index-reaching-threshold search: O(log n)

use rangekit_error::{RangeError, Result};

/// A Fenwick tree over `len` elements, all starting at `T::default()`.
#[derive(Debug, Clone)]
pub struct FenwickTree<T> {
    data: Vec<T>,
    len: usize,
}

impl<T: Copy + Default + std::ops::Add<Output = T>> FenwickTree<T> {
    /// Creates a tree of `len` zeroed elements.
    pub fn new(len: usize) -> Self {
        Self {
            data: vec![T::default(); len],
            len,
        }
    }

    /// Creates a tree seeded from `values` in O(n).
    pub fn from_slice(values: &[T]) -> Self {
        let len = values.len();
        let mut tree = Self::new(len);
        tree.data.copy_from_slice(values);
        for i in 1..=len {
            let j = i + (i & i.wrapping_neg());
            if j <= len {
                tree.data[j - 1] = tree.data[j - 1] + tree.data[i - 1];
            }
        }
        tree
    }

    /// Adds `delta` to the element at `p`.
    pub fn add(&mut self, p: usize, delta: T) -> Result<()> {
        if p >= self.len {
            return Err(RangeError::IndexOutOfRange {
                index: p,
                len: self.len,
            });
        }
        let mut k = p + 1;
        while k <= self.len {
            self.data[k - 1] = self.data[k - 1] + delta;
            k += k & k.wrapping_neg();
        }
        Ok(())
    }

    /// Returns the sum of the elements in `[0, r)`.
    pub fn prefix_sum(&self, r: usize) -> Result<T> {
        if r > self.len {
            return Err(RangeError::InvalidRange {
                left: 0,
                right: r,
                len: self.len,
            });
        }
        Ok(self.prefix(r))
    }

    fn prefix(&self, mut r: usize) -> T {
        let mut sum = T::default();
        while r > 0 {
            sum = sum + self.data[r - 1];
            r -= r & r.wrapping_neg();
        }
        sum
    }

    /// Returns the number of elements in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<T: Copy + Default + std::ops::Add<Output = T> + std::ops::Sub<Output = T>> FenwickTree<T> {
    /// Returns the sum of the elements in `[l, r)`.
    pub fn range_sum(&self, l: usize, r: usize) -> Result<T> {
        if l > r || r > self.len {
            return Err(RangeError::InvalidRange {
                left: l,
                right: r,
                len: self.len,
            });
        }
        Ok(self.prefix(r) - self.prefix(l))
    }
}

impl<T: Copy + Default + std::ops::Add<Output = T> + std::ops::Sub<Output = T> + PartialOrd>
    FenwickTree<T>
{
    /// Returns the smallest index `i` such that the inclusive prefix sum
    /// over `[0, i]` reaches `x`, or `None` when `x` is zero or negative.
    ///
    /// Requires every element to be non-negative; the power-of-two descent
    /// relies on prefix sums being non-decreasing. Returns `Some(len)` when
    /// even the total falls short of `x`.
    pub fn lower_bound(&self, mut x: T) -> Option<usize> {
        if x <= T::default() {
            return None;
        }
        let mut i = 0;
        let mut k = self.len.next_power_of_two();
        while k > 0 {
            if i + k <= self.len && self.data[i + k - 1] < x {
                x = x - self.data[i + k - 1];
                i += k;
            }
            k >>= 1;
        }
        Some(i)
    }
}
