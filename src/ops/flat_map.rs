use std::rc::Rc;

use crate::{observable::Observable, observer::Observer, ops::Operator};

/// Maps each item to an inner observable and drives the current downstream
/// state through it to the end before the next outer item is consumed.
///
/// ```
/// use rxfold::prelude::*;
///
/// let out = from_vec(vec![1, 2, 3]).pipe(flat_map(|n: i32| from_vec(vec![n, n]))).to_vec();
/// assert_eq!(out, vec![1, 1, 2, 2, 3, 3]);
/// ```
pub fn flat_map<F>(f: F) -> FlatMap<F> { FlatMap(Rc::new(f)) }

/// Flattens a stream of observables, depth-first.
///
/// ```
/// use rxfold::prelude::*;
///
/// let nested = from_vec(vec![from_vec(vec![1, 2]), from_vec(vec![]), from_vec(vec![3])]);
/// assert_eq!(nested.pipe(flatten()).to_vec(), vec![1, 2, 3]);
/// ```
pub fn flatten<Inner>() -> FlatMap<fn(Inner) -> Inner>
where
  Inner: Observable,
{
  flat_map(std::convert::identity::<Inner> as fn(Inner) -> Inner)
}

pub struct FlatMap<F>(Rc<F>);

impl<F> Clone for FlatMap<F> {
  fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<In, Inner, F> Operator<In> for FlatMap<F>
where
  F: Fn(In) -> Inner,
  Inner: Observable,
{
  type Out = Inner::Item;
  type Adapter<O>
    = FlatMapObserver<O, F>
  where
    O: Observer<Self::Out>;

  #[inline]
  fn wrap<O>(&self, downstream: O) -> Self::Adapter<O>
  where
    O: Observer<Self::Out>,
  {
    FlatMapObserver { observer: downstream, func: self.0.clone() }
  }

  #[inline]
  fn into_downstream<O>(adapter: Self::Adapter<O>) -> O
  where
    O: Observer<Self::Out>,
  {
    adapter.observer
  }
}

transform_by_wrap!(FlatMap<F>);

pub struct FlatMapObserver<O, F> {
  observer: O,
  func: Rc<F>,
}

impl<In, Inner, O, F> Observer<In> for FlatMapObserver<O, F>
where
  F: Fn(In) -> Inner,
  Inner: Observable,
  O: Observer<Inner::Item>,
{
  fn next(self, value: In) -> Self {
    let inner = (self.func)(value);
    FlatMapObserver { observer: inner.drive(self.observer), func: self.func }
  }

  fn is_closed(&self) -> bool { self.observer.is_closed() }

  fn checkpoint(&self) -> Option<Self> {
    let observer = self.observer.checkpoint()?;
    Some(FlatMapObserver { observer, func: self.func.clone() })
  }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;

  #[test]
  fn inner_runs_depth_first() {
    let out = from_vec(vec![7, 8])
      .pipe(flat_map(|x: i32| from_vec(vec![x, x + 1, x * 2])))
      .to_vec();
    assert_eq!(out, vec![7, 8, 14, 8, 9, 16]);
  }

  #[test]
  fn empty_inner_keeps_state() {
    let out = from_iter(0..3).pipe(flat_map(|_: i32| empty::<u8>())).to_vec();
    assert!(out.is_empty());
  }

  #[test]
  fn nested_flat_map() {
    let out = from_vec(vec![1, 2])
      .pipe(flat_map(|a: i32| from_vec(vec![a, a]).pipe(flat_map(move |b: i32| once(a * 10 + b)))))
      .to_vec();
    assert_eq!(out, vec![11, 11, 22, 22]);
  }

  #[test]
  fn scan_state_flows_across_inner_runs() {
    let out = from_vec(vec![1, 2])
      .pipe(pipe!(flat_map(|n: i32| repeat(n, 2)), scan(|acc: i32, v: i32| acc + v, 0)))
      .to_vec();
    assert_eq!(out, vec![1, 2, 4, 6]);
  }
}
