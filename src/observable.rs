//! Observable trait and source constructors
//!
//! An [`Observable`] drives an [`Observer`] with a finite sequence of items
//! and returns the observer's final state. Because `drive` borrows the
//! source, a built pipeline can be driven any number of times and every
//! drive starts from a fresh observer-side state.

use crate::{
  observer::{Fold, Observer, Recorder},
  ops::Transform,
};

mod create;
mod from_iter;
mod once;

pub use create::*;
pub use from_iter::*;
pub use once::*;

/// A representation of any finite set of values produced synchronously.
///
/// # Example
///
/// ```
/// use rxfold::prelude::*;
///
/// let doubled = from_vec(vec![1, 2, 3]).pipe(map(|v: i32| v * 2)).to_vec();
/// assert_eq!(doubled, vec![2, 4, 6]);
/// ```
pub trait Observable {
  type Item;

  /// Feed every item to `observer`, threading its state, and return the
  /// state reached after the last item.
  fn drive<O>(&self, observer: O) -> O
  where
    O: Observer<Self::Item>;

  /// Pull-model view of the source: fold `reducer` over the items.
  fn fold<Acc, R>(&self, reducer: R, seed: Acc) -> Acc
  where
    R: FnMut(Acc, Self::Item) -> Acc,
  {
    self.drive(Fold::new(reducer, seed)).into_acc()
  }

  /// Collect every item in emission order.
  fn to_vec(&self) -> Vec<Self::Item> { self.drive(Recorder::new()).into_vec() }

  /// Apply an operator (or operator chain) to this source.
  fn pipe<Op>(self, op: Op) -> Op::Output
  where
    Self: Sized,
    Op: Transform<Self>,
  {
    op.apply(self)
  }
}

impl<S: Observable + ?Sized> Observable for &S {
  type Item = S::Item;

  #[inline]
  fn drive<O>(&self, observer: O) -> O
  where
    O: Observer<Self::Item>,
  {
    (**self).drive(observer)
  }
}
