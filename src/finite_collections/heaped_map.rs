use std::cmp::Ordering;
use std::marker::PhantomData;

use super::array::Array;
use super::size::Size;

/// Orders heap entries; `Ordering::Less` means the left entry is popped first.
pub trait Comparator<SizeT, ValueT> {
    fn compare(lhs: (SizeT, &ValueT), rhs: (SizeT, &ValueT)) -> Ordering;
}

/// Dense map `0..capacity -> ValueT` with a binary heap over a subset of its keys.
///
/// Every key owns a value whether or not it is currently in the heap, so a key can be
/// popped, have its value changed, and be reinserted later with the new priority.
/// `heap_array` holds keys in heap order and `position_array` maps a key back to its
/// slot (or `NULL_POSITION`), which gives O(1) membership and O(log n) updates.
#[derive(Clone, Debug)]
pub struct FiniteHeapedMap<SizeT, ValueT, ComparatorT>
where
    SizeT: Size,
    ComparatorT: Comparator<SizeT, ValueT>,
{
    values: Array<SizeT, ValueT>,
    heap_array: Array<SizeT, SizeT>,
    position_array: Array<SizeT, SizeT>,
    phantom: PhantomData<ComparatorT>,
}

impl<SizeT, ValueT, ComparatorT> Default for FiniteHeapedMap<SizeT, ValueT, ComparatorT>
where
    SizeT: Size,
    ComparatorT: Comparator<SizeT, ValueT>,
{
    fn default() -> Self {
        FiniteHeapedMap {
            values: Array::default(),
            heap_array: Array::default(),
            position_array: Array::default(),
            phantom: PhantomData,
        }
    }
}

#[inline(always)]
fn parent_of<SizeT: Size>(position: SizeT) -> SizeT {
    SizeT::from_usize((position.as_usize() - 1) / 2)
}

#[inline(always)]
fn left_of<SizeT: Size>(position: SizeT) -> SizeT {
    SizeT::from_usize(position.as_usize() * 2 + 1)
}

impl<SizeT, ValueT, ComparatorT> FiniteHeapedMap<SizeT, ValueT, ComparatorT>
where
    SizeT: Size,
    ComparatorT: Comparator<SizeT, ValueT>,
{
    const NULL_POSITION: SizeT = SizeT::MAX;

    #[inline(always)]
    pub fn capacity(&self) -> SizeT {
        self.values.len()
    }

    #[inline(always)]
    pub fn len(&self) -> SizeT {
        self.heap_array.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.heap_array.is_empty()
    }

    #[inline(always)]
    pub fn contains_key(&self, key: SizeT) -> bool {
        self.position_array[key] != Self::NULL_POSITION
    }

    #[inline(always)]
    pub fn value(&self, key: SizeT) -> &ValueT {
        &self.values[key]
    }

    /// Keys currently in the heap, in heap (not sorted) order.
    pub fn keys(&self) -> impl Iterator<Item = &SizeT> {
        self.heap_array.iter()
    }

    /// Adds a new key with `value`; the key is not inserted into the heap.
    pub fn push_key(&mut self, value: ValueT) -> SizeT {
        let key = self.values.len();
        self.values.push(value);
        self.position_array.push(Self::NULL_POSITION);
        key
    }

    /// Changes the value of `key`, restoring heap order if the key is a member.
    #[inline(never)]
    pub fn update<F>(&mut self, key: SizeT, f: F)
    where
        F: FnOnce(&mut ValueT),
    {
        f(&mut self.values[key]);
        let position = self.position_array[key];
        if position != Self::NULL_POSITION {
            self.restore(position);
        }
    }

    /// Applies `f` to every value. `f` must preserve the relative order of values.
    pub fn for_each_value_monotone<F>(&mut self, f: F)
    where
        F: FnMut(&mut ValueT),
    {
        self.values.iter_mut().for_each(f);
    }

    #[inline(never)]
    pub fn insert(&mut self, key: SizeT) {
        if self.contains_key(key) {
            return;
        }
        let position = self.heap_array.len();
        self.position_array[key] = position;
        self.heap_array.push(key);
        self.up_heap(position);
    }

    #[inline(never)]
    pub fn pop_first(&mut self) -> Option<SizeT> {
        if self.heap_array.is_empty() {
            return None;
        }
        let root = SizeT::zero();
        let first = self.heap_array.swap_remove(root);
        self.position_array[first] = Self::NULL_POSITION;
        if !self.heap_array.is_empty() {
            self.position_array[self.heap_array[root]] = root;
            self.down_heap(root);
        }
        Some(first)
    }

    pub fn clear(&mut self) {
        for key in self.heap_array.iter() {
            self.position_array[*key] = Self::NULL_POSITION;
        }
        self.heap_array.clear();
    }

    /// Replaces the heap contents with `keys` and heapifies bottom-up.
    #[inline(never)]
    pub fn rebuild<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = SizeT>,
    {
        self.clear();
        for key in keys {
            if self.position_array[key] == Self::NULL_POSITION {
                self.position_array[key] = self.heap_array.len();
                self.heap_array.push(key);
            }
        }
        let n = self.heap_array.len().as_usize();
        for position in (0..n / 2).rev() {
            self.down_heap(SizeT::from_usize(position));
        }
    }

    #[inline(always)]
    fn precedes(&self, lhs: SizeT, rhs: SizeT) -> bool {
        let l = self.heap_array[lhs];
        let r = self.heap_array[rhs];
        ComparatorT::compare((l, &self.values[l]), (r, &self.values[r])) == Ordering::Less
    }

    #[inline(always)]
    fn swap_slots(&mut self, a: SizeT, b: SizeT) {
        self.heap_array.swap(a, b);
        self.position_array[self.heap_array[a]] = a;
        self.position_array[self.heap_array[b]] = b;
    }

    fn restore(&mut self, position: SizeT) {
        if position != SizeT::zero() && self.precedes(position, parent_of(position)) {
            self.up_heap(position);
        } else {
            self.down_heap(position);
        }
    }

    fn up_heap(&mut self, mut position: SizeT) {
        while position != SizeT::zero() {
            let parent = parent_of(position);
            if !self.precedes(position, parent) {
                break;
            }
            self.swap_slots(position, parent);
            position = parent;
        }
    }

    fn down_heap(&mut self, mut position: SizeT) {
        let len = self.heap_array.len();
        loop {
            let left = left_of(position);
            if left >= len {
                break;
            }
            let right = left + SizeT::one();
            let child = if right < len && self.precedes(right, left) { right } else { left };
            if !self.precedes(child, position) {
                break;
            }
            self.swap_slots(position, child);
            position = child;
        }
    }
}
