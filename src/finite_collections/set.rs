use super::array::Array;
use super::size::Size;

/// Subset of `0..capacity` with O(1) membership and O(len) clear.
#[derive(Clone, Debug)]
pub struct Set<IndexT>
where
    IndexT: Size,
{
    members: Array<IndexT, IndexT>,
    positions: Array<IndexT, IndexT>,
}

impl<IndexT> Default for Set<IndexT>
where
    IndexT: Size,
{
    fn default() -> Self {
        Set { members: Array::default(), positions: Array::default() }
    }
}

impl<IndexT> Set<IndexT>
where
    IndexT: Size,
{
    const NULL_POSITION: IndexT = IndexT::MAX;

    pub fn capacity(&self) -> IndexT {
        self.positions.len()
    }

    pub fn len(&self) -> IndexT {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[inline(always)]
    pub fn contains_key(&self, index: IndexT) -> bool {
        self.positions[index] != Self::NULL_POSITION
    }

    pub fn iter(&self) -> impl Iterator<Item = &IndexT> {
        self.members.iter()
    }

    /// Grows the key space so that `0..capacity` is addressable.
    pub fn reserve_to(&mut self, capacity: IndexT) {
        if capacity > self.positions.len() {
            self.positions.resize(capacity, Self::NULL_POSITION);
        }
    }

    pub fn clear(&mut self) {
        for index in self.members.iter() {
            self.positions[*index] = Self::NULL_POSITION;
        }
        self.members.clear();
    }

    /// Returns `false` when `index` was already present.
    #[inline(always)]
    pub fn insert(&mut self, index: IndexT) -> bool {
        if self.contains_key(index) {
            return false;
        }
        self.positions[index] = self.members.len();
        self.members.push(index);
        true
    }

    pub fn remove(&mut self, index: IndexT) -> bool {
        let position = self.positions[index];
        if position == Self::NULL_POSITION {
            return false;
        }
        self.members.swap_remove(position);
        if position < self.members.len() {
            let moved = self.members[position];
            self.positions[moved] = position;
        }
        self.positions[index] = Self::NULL_POSITION;
        true
    }
}
