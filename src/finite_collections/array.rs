use std::marker::PhantomData;
use std::ops::{Index, IndexMut};
use std::slice::{Iter, IterMut};

use super::size::Size;

/// `Vec` addressed by a dedicated index type instead of `usize`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Array<SizeT, ValueT>
where
    SizeT: Size,
{
    vec: Vec<ValueT>,
    phantom: PhantomData<SizeT>,
}

impl<SizeT, ValueT> Default for Array<SizeT, ValueT>
where
    SizeT: Size,
{
    fn default() -> Self {
        Array { vec: Vec::default(), phantom: PhantomData }
    }
}

impl<SizeT, ValueT> Array<SizeT, ValueT>
where
    SizeT: Size,
{
    #[inline(always)]
    pub fn len(&self) -> SizeT {
        SizeT::from_usize(self.vec.len())
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }

    pub fn first(&self) -> Option<&ValueT> {
        self.vec.first()
    }

    pub fn last(&self) -> Option<&ValueT> {
        self.vec.last()
    }

    pub fn get(&self, index: SizeT) -> Option<&ValueT> {
        self.vec.get(index.as_usize())
    }

    pub fn iter(&self) -> Iter<'_, ValueT> {
        self.vec.iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, ValueT> {
        self.vec.iter_mut()
    }

    pub fn as_slice(&self) -> &[ValueT] {
        &self.vec
    }

    pub fn reserve(&mut self, additional: SizeT) {
        self.vec.reserve(additional.as_usize());
    }

    #[inline(always)]
    pub fn push(&mut self, value: ValueT) {
        self.vec.push(value);
    }

    #[inline(always)]
    pub fn pop(&mut self) -> Option<ValueT> {
        self.vec.pop()
    }

    pub fn clear(&mut self) {
        self.vec.clear();
    }

    pub fn truncate(&mut self, len: SizeT) {
        self.vec.truncate(len.as_usize());
    }

    pub fn shrink_to_fit(&mut self) {
        self.vec.shrink_to_fit();
    }

    #[inline(always)]
    pub fn swap(&mut self, a: SizeT, b: SizeT) {
        self.vec.swap(a.as_usize(), b.as_usize());
    }

    pub fn swap_remove(&mut self, index: SizeT) -> ValueT {
        self.vec.swap_remove(index.as_usize())
    }

    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&ValueT) -> bool,
    {
        self.vec.retain(f);
    }
}

impl<SizeT, ValueT> Array<SizeT, ValueT>
where
    SizeT: Size,
    ValueT: Clone,
{
    pub fn resize(&mut self, new_len: SizeT, value: ValueT) {
        self.vec.resize(new_len.as_usize(), value);
    }
}

impl<SizeT, ValueT> Array<SizeT, ValueT>
where
    SizeT: Size,
    ValueT: PartialEq,
{
    pub fn contains(&self, value: &ValueT) -> bool {
        self.vec.contains(value)
    }
}

impl<SizeT, ValueT> Index<SizeT> for Array<SizeT, ValueT>
where
    SizeT: Size,
{
    type Output = ValueT;

    #[inline(always)]
    fn index(&self, index: SizeT) -> &Self::Output {
        &self.vec[index.as_usize()]
    }
}

impl<SizeT, ValueT> IndexMut<SizeT> for Array<SizeT, ValueT>
where
    SizeT: Size,
{
    #[inline(always)]
    fn index_mut(&mut self, index: SizeT) -> &mut Self::Output {
        &mut self.vec[index.as_usize()]
    }
}

impl<SizeT, ValueT> From<Vec<ValueT>> for Array<SizeT, ValueT>
where
    SizeT: Size,
{
    fn from(vec: Vec<ValueT>) -> Self {
        Array { vec, phantom: PhantomData }
    }
}

impl<SizeT, ValueT> FromIterator<ValueT> for Array<SizeT, ValueT>
where
    SizeT: Size,
{
    fn from_iter<I: IntoIterator<Item = ValueT>>(iter: I) -> Self {
        Array { vec: Vec::from_iter(iter), phantom: PhantomData }
    }
}

impl<'a, SizeT, ValueT> IntoIterator for &'a Array<SizeT, ValueT>
where
    SizeT: Size,
{
    type Item = &'a ValueT;
    type IntoIter = Iter<'a, ValueT>;

    fn into_iter(self) -> Self::IntoIter {
        self.vec.iter()
    }
}

impl<SizeT, ValueT> Extend<ValueT> for Array<SizeT, ValueT>
where
    SizeT: Size,
{
    fn extend<I: IntoIterator<Item = ValueT>>(&mut self, iter: I) {
        self.vec.extend(iter);
    }
}
