use std::{
  iter::{Repeat, Take},
  marker::PhantomData,
  rc::Rc,
};

use crate::{observable::Observable, observer::Observer};

/// Creates an observable that produces values from an iterator.
///
/// Each drive iterates a fresh clone of `iter`, so the iterable must be
/// cheap to clone (ranges, slices iterators, collections).
///
/// # Examples
///
/// ```
/// use rxfold::prelude::*;
///
/// assert_eq!(from_iter(0..4).to_vec(), vec![0, 1, 2, 3]);
/// ```
pub fn from_iter<Iter>(iter: Iter) -> FromIter<Iter>
where
  Iter: IntoIterator + Clone,
{
  FromIter(iter)
}

#[derive(Clone)]
pub struct FromIter<Iter>(Iter);

impl<Iter> Observable for FromIter<Iter>
where
  Iter: IntoIterator + Clone,
{
  type Item = Iter::Item;

  fn drive<O>(&self, observer: O) -> O
  where
    O: Observer<Self::Item>,
  {
    self.0.clone().into_iter().fold(observer, Observer::next)
  }
}

/// Creates an observable replaying the items of a vector, in order.
///
/// The items live behind an `Rc`, so cloning the observable is cheap and
/// every drive emits clones of the stored items.
///
/// ```
/// use rxfold::prelude::*;
///
/// let source = from_vec(vec!['a', 'b']);
/// assert_eq!(source.to_vec(), vec!['a', 'b']);
/// assert_eq!(source.to_vec(), vec!['a', 'b']);
/// ```
pub fn from_vec<Item: Clone>(items: Vec<Item>) -> FromVec<Item> { FromVec(items.into()) }

pub struct FromVec<Item>(Rc<[Item]>);

impl<Item> Clone for FromVec<Item> {
  fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<Item> FromVec<Item> {
  pub fn len(&self) -> usize { self.0.len() }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl<Item: Clone> Observable for FromVec<Item> {
  type Item = Item;

  fn drive<O>(&self, observer: O) -> O
  where
    O: Observer<Self::Item>,
  {
    self.0.iter().cloned().fold(observer, Observer::next)
  }
}

/// Creates an observable producing same value repeated N times.
pub fn repeat<Item>(v: Item, n: usize) -> FromIter<Take<Repeat<Item>>>
where
  Item: Clone,
{
  from_iter(std::iter::repeat(v).take(n))
}

/// Creates an observable that produces no values.
pub fn empty<Item>() -> Empty<Item> { Empty(PhantomData) }

pub struct Empty<Item>(PhantomData<fn() -> Item>);

impl<Item> Clone for Empty<Item> {
  fn clone(&self) -> Self { *self }
}

impl<Item> Copy for Empty<Item> {}

impl<Item> Observable for Empty<Item> {
  type Item = Item;

  #[inline]
  fn drive<O>(&self, observer: O) -> O
  where
    O: Observer<Self::Item>,
  {
    observer
  }
}
