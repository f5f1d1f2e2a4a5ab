use std::rc::Rc;

use crate::{observer::Observer, ops::Operator};

/// Creates an operator which calls a closure on each element and uses its
/// return as the value.
///
/// ```
/// use rxfold::prelude::*;
///
/// let out = from_iter(1..4).pipe(map(|v: i32| v * 100)).to_vec();
/// assert_eq!(out, vec![100, 200, 300]);
/// ```
pub fn map<F>(f: F) -> Map<F> { Map(Rc::new(f)) }

pub struct Map<F>(Rc<F>);

impl<F> Clone for Map<F> {
  fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<In, B, F> Operator<In> for Map<F>
where
  F: Fn(In) -> B,
{
  type Out = B;
  type Adapter<O>
    = MapObserver<O, F>
  where
    O: Observer<Self::Out>;

  #[inline]
  fn wrap<O>(&self, downstream: O) -> Self::Adapter<O>
  where
    O: Observer<Self::Out>,
  {
    MapObserver { observer: downstream, func: self.0.clone() }
  }

  #[inline]
  fn into_downstream<O>(adapter: Self::Adapter<O>) -> O
  where
    O: Observer<Self::Out>,
  {
    adapter.observer
  }
}

transform_by_wrap!(Map<F>);

pub struct MapObserver<O, F> {
  observer: O,
  func: Rc<F>,
}

impl<In, B, O, F> Observer<In> for MapObserver<O, F>
where
  O: Observer<B>,
  F: Fn(In) -> B,
{
  #[inline]
  fn next(self, value: In) -> Self {
    let observer = self.observer.next((self.func)(value));
    MapObserver { observer, func: self.func }
  }

  fn is_closed(&self) -> bool { self.observer.is_closed() }

  fn checkpoint(&self) -> Option<Self> {
    let observer = self.observer.checkpoint()?;
    Some(MapObserver { observer, func: self.func.clone() })
  }
}
