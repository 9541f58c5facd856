//! Lazy segment tree: a segment tree that additionally supports applying an
//! action to every element of a range in O(log n).
//!
//! The action is drawn from a second monoid acting on the value monoid (see
//! [`rangekit_monoid::MonoidAction`]). Pending actions are stored as one tag
//! per internal node and pushed to the children only when a descent actually
//! visits that subtree.
//!
//! Invariant maintained throughout: a node's stored aggregate already
//! reflects its own pending tag; only the children's values lag behind.
//! Consequently every path that reads or writes below a node must push that
//! node's tag first, and every mutation below a node must recompute the
//! node afterwards. Because of this, read operations on the lazy tree take
//! `&mut self`.

use rangekit_error::{RangeError, Result};
use rangekit_monoid::{Monoid, MonoidAction};

type ValueOf<A> = <<A as MonoidAction>::M as Monoid>::Value;

/// A lazy segment tree over the monoid action `A`.
///
/// Layout matches the plain segment tree: `data` has length `2 * size` with
/// leaves at `[size, size + len)`; `lazy` holds one pending action per
/// internal node (indices `[1, size)`).
pub struct LazySegTree<A: MonoidAction> {
    len: usize,
    size: usize,
    log: u32,
    data: Vec<ValueOf<A>>,
    lazy: Vec<A::F>,
}

impl<A: MonoidAction> LazySegTree<A> {
    /// Creates a tree of `len` identity elements with all tags cleared.
    pub fn new(len: usize) -> Result<Self> {
        let size = len
            .checked_next_power_of_two()
            .filter(|s| s.checked_mul(2).is_some())
            .ok_or(RangeError::InvalidSize { requested: len })?;
        Ok(Self {
            len,
            size,
            log: size.trailing_zeros(),
            data: vec![A::identity(); 2 * size],
            lazy: vec![A::identity_map(); size],
        })
    }

    /// Creates a tree seeded from `values`.
    pub fn from_slice(values: &[ValueOf<A>]) -> Result<Self> {
        let mut tree = Self::new(values.len())?;
        tree.build(values)?;
        Ok(tree)
    }

    /// Reseeds all leaves from `values`, recomputes every internal node, and
    /// clears every pending tag.
    pub fn build(&mut self, values: &[ValueOf<A>]) -> Result<()> {
        if values.len() != self.len {
            return Err(RangeError::LengthMismatch {
                expected: self.len,
                actual: values.len(),
            });
        }
        for leaf in &mut self.data[self.size + self.len..] {
            *leaf = A::identity();
        }
        for (i, value) in values.iter().enumerate() {
            self.data[self.size + i] = value.clone();
        }
        for tag in &mut self.lazy {
            *tag = A::identity_map();
        }
        for i in (1..self.size).rev() {
            self.update(i);
        }
        Ok(())
    }

    /// Overwrites the element at `p`.
    ///
    /// Ancestors are pushed top-down before the write so no stale tag is
    /// dropped, then recomputed bottom-up.
    pub fn set(&mut self, p: usize, value: ValueOf<A>) -> Result<()> {
        self.check_index(p)?;
        let p = p + self.size;
        for i in (1..=self.log).rev() {
            self.push(p >> i);
        }
        self.data[p] = value;
        for i in 1..=self.log {
            self.update(p >> i);
        }
        Ok(())
    }

    /// Applies `f` to the single element at `p`.
    pub fn apply_point(&mut self, p: usize, f: A::F) -> Result<()> {
        self.check_index(p)?;
        let p = p + self.size;
        for i in (1..=self.log).rev() {
            self.push(p >> i);
        }
        self.data[p] = A::apply(f, self.data[p].clone());
        for i in 1..=self.log {
            self.update(p >> i);
        }
        Ok(())
    }

    /// Applies `f` to every element of `[l, r)`.
    ///
    /// Boundary ancestors are pushed top-down only where the boundary cuts
    /// through the node; maximal subtrees fully inside the range receive the
    /// action as a tag without being descended into.
    pub fn apply_range(&mut self, l: usize, r: usize, f: A::F) -> Result<()> {
        self.check_range(l, r)?;
        if l == r {
            return Ok(());
        }
        let l = l + self.size;
        let r = r + self.size;
        for i in (1..=self.log).rev() {
            if ((l >> i) << i) != l {
                self.push(l >> i);
            }
            if ((r >> i) << i) != r {
                self.push((r - 1) >> i);
            }
        }

        {
            let mut l = l;
            let mut r = r;
            while l < r {
                if l & 1 == 1 {
                    self.all_apply(l, f.clone());
                    l += 1;
                }
                if r & 1 == 1 {
                    r -= 1;
                    self.all_apply(r, f.clone());
                }
                l >>= 1;
                r >>= 1;
            }
        }

        for i in 1..=self.log {
            if ((l >> i) << i) != l {
                self.update(l >> i);
            }
            if ((r >> i) << i) != r {
                self.update((r - 1) >> i);
            }
        }
        Ok(())
    }

    /// Returns the element at `p`, materializing any deferred actions on the
    /// path first.
    pub fn get(&mut self, p: usize) -> Result<ValueOf<A>> {
        self.check_index(p)?;
        let p = p + self.size;
        for i in (1..=self.log).rev() {
            self.push(p >> i);
        }
        Ok(self.data[p].clone())
    }

    /// Returns `op(a[l], ..., a[r - 1])`, or the identity when `l == r`.
    pub fn range_query(&mut self, l: usize, r: usize) -> Result<ValueOf<A>> {
        self.check_range(l, r)?;
        if l == r {
            return Ok(A::identity());
        }
        let mut l = l + self.size;
        let mut r = r + self.size;
        for i in (1..=self.log).rev() {
            if ((l >> i) << i) != l {
                self.push(l >> i);
            }
            if ((r >> i) << i) != r {
                self.push(r >> i);
            }
        }

        let mut sml = A::identity();
        let mut smr = A::identity();
        while l < r {
            if l & 1 == 1 {
                sml = A::op(sml, self.data[l].clone());
                l += 1;
            }
            if r & 1 == 1 {
                r -= 1;
                smr = A::op(self.data[r].clone(), smr);
            }
            l >>= 1;
            r >>= 1;
        }
        Ok(A::op(sml, smr))
    }

    /// Returns the aggregate of the whole sequence in O(1).
    ///
    /// The root's value is authoritative for itself, so no push is needed.
    pub fn query_all(&self) -> ValueOf<A> {
        self.data[1].clone()
    }

    /// Returns the largest `r` in `[l, len]` such that `pred` holds for the
    /// aggregate of `[l, r)`.
    ///
    /// Same contract as the plain tree's search; every node is pushed before
    /// the walk descends into its children, because a node's stored
    /// aggregate vouches only for itself while tags are pending.
    pub fn max_right<P>(&mut self, l: usize, mut pred: P) -> Result<usize>
    where
        P: FnMut(ValueOf<A>) -> bool,
    {
        self.check_anchor(l)?;
        if l == self.len {
            return Ok(self.len);
        }
        let mut l = l + self.size;
        for i in (1..=self.log).rev() {
            self.push(l >> i);
        }
        let mut sm = A::identity();
        loop {
            while l % 2 == 0 {
                l >>= 1;
            }
            if !pred(A::op(sm.clone(), self.data[l].clone())) {
                while l < self.size {
                    self.push(l);
                    l <<= 1;
                    let candidate = A::op(sm.clone(), self.data[l].clone());
                    if pred(candidate.clone()) {
                        sm = candidate;
                        l += 1;
                    }
                }
                return Ok(l - self.size);
            }
            sm = A::op(sm, self.data[l].clone());
            l += 1;
            if l & l.wrapping_neg() == l {
                break;
            }
        }
        Ok(self.len)
    }

    /// Returns the smallest `l` in `[0, r]` such that `pred` holds for the
    /// aggregate of `[l, r)`.
    pub fn min_left<P>(&mut self, r: usize, mut pred: P) -> Result<usize>
    where
        P: FnMut(ValueOf<A>) -> bool,
    {
        self.check_anchor(r)?;
        if r == 0 {
            return Ok(0);
        }
        let mut r = r + self.size;
        for i in (1..=self.log).rev() {
            self.push((r - 1) >> i);
        }
        let mut sm = A::identity();
        loop {
            r -= 1;
            while r > 1 && r & 1 == 1 {
                r >>= 1;
            }
            if !pred(A::op(self.data[r].clone(), sm.clone())) {
                while r < self.size {
                    self.push(r);
                    r = 2 * r + 1;
                    let candidate = A::op(self.data[r].clone(), sm.clone());
                    if pred(candidate.clone()) {
                        sm = candidate;
                        r -= 1;
                    }
                }
                return Ok(r + 1 - self.size);
            }
            sm = A::op(self.data[r].clone(), sm);
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
        self.data[i] = A::op(self.data[2 * i].clone(), self.data[2 * i + 1].clone());
    }

    /// Applies `f` to node `i`'s aggregate eagerly; if `i` is internal, the
    /// children's lag is recorded by composing `f` outside the existing tag.
    fn all_apply(&mut self, i: usize, f: A::F) {
        self.data[i] = A::apply(f.clone(), self.data[i].clone());
        if i < self.size {
            self.lazy[i] = A::compose(f, self.lazy[i].clone());
        }
    }

    /// Pushes node `i`'s pending tag to both children and clears it.
    fn push(&mut self, i: usize) {
        let f = self.lazy[i].clone();
        self.all_apply(2 * i, f.clone());
        self.all_apply(2 * i + 1, f);
        self.lazy[i] = A::identity_map();
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
