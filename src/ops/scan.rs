use std::rc::Rc;

use crate::{observer::Observer, ops::Operator};

/// The Scan operator applies a reducer to the first item and the seed and
/// emits the result as its own first emission. It then feeds that result
/// back into the reducer along with the second item, and so on: one
/// emission per input, each being the running accumulation.
///
/// The accumulator belongs to a single drive. Every time the operator wraps
/// a downstream observer it starts again from a clone of `seed`, so a built
/// pipeline can be driven many times without the runs seeing each other.
///
/// ```
/// use rxfold::prelude::*;
///
/// let totals = from_vec(vec![10, 20, 30]).pipe(scan(|acc: i32, v: i32| acc + v, 0));
/// assert_eq!(totals.to_vec(), vec![10, 30, 60]);
/// assert_eq!(totals.to_vec(), vec![10, 30, 60]);
/// ```
pub fn scan<R, Acc>(reducer: R, seed: Acc) -> Scan<R, Acc> {
  Scan { reducer: Rc::new(reducer), seed }
}

pub struct Scan<R, Acc> {
  reducer: Rc<R>,
  seed: Acc,
}

impl<R, Acc: Clone> Clone for Scan<R, Acc> {
  fn clone(&self) -> Self { Self { reducer: self.reducer.clone(), seed: self.seed.clone() } }
}

impl<In, R, Acc> Operator<In> for Scan<R, Acc>
where
  R: Fn(Acc, In) -> Acc,
  Acc: Clone,
{
  type Out = Acc;
  type Adapter<O>
    = ScanObserver<O, R, Acc>
  where
    O: Observer<Self::Out>;

  #[inline]
  fn wrap<O>(&self, downstream: O) -> Self::Adapter<O>
  where
    O: Observer<Self::Out>,
  {
    ScanObserver { observer: downstream, reducer: self.reducer.clone(), acc: self.seed.clone() }
  }

  #[inline]
  fn into_downstream<O>(adapter: Self::Adapter<O>) -> O
  where
    O: Observer<Self::Out>,
  {
    adapter.observer
  }
}

transform_by_wrap!(Scan<R, Acc>);

pub struct ScanObserver<O, R, Acc> {
  observer: O,
  reducer: Rc<R>,
  acc: Acc,
}

impl<In, O, R, Acc> Observer<In> for ScanObserver<O, R, Acc>
where
  O: Observer<Acc>,
  R: Fn(Acc, In) -> Acc,
  Acc: Clone,
{
  fn next(self, value: In) -> Self {
    // accumulating each item with the current value
    let acc = (self.reducer)(self.acc, value);
    let observer = self.observer.next(acc.clone());
    ScanObserver { observer, reducer: self.reducer, acc }
  }

  fn is_closed(&self) -> bool { self.observer.is_closed() }

  fn checkpoint(&self) -> Option<Self> {
    let observer = self.observer.checkpoint()?;
    Some(ScanObserver { observer, reducer: self.reducer.clone(), acc: self.acc.clone() })
  }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;

  #[test]
  fn running_total() {
    let out = from_vec(vec![10, 20, 30]).pipe(scan(|m: i32, x: i32| m + x, 0)).to_vec();
    assert_eq!(out, vec![10, 30, 60]);
  }

  #[test]
  fn scan_initial_on_empty_observable() {
    let out = empty::<i32>().pipe(scan(|acc: i32, v: i32| acc + v, 100)).to_vec();
    assert!(out.is_empty());
  }

  #[test]
  fn scan_mixed_types() {
    let out = from_vec(vec!['a', 'b', 'c']).pipe(scan(|acc: i32, _v: char| acc + 1, 100)).to_vec();
    assert_eq!(out, vec![101, 102, 103]);
  }

  #[test]
  fn reused_pipeline_does_not_share_accumulator() {
    let push = |mut acc: Vec<i32>, v: i32| {
      acc.push(v);
      acc
    };
    let op = scan(push, vec![]);
    let first = op.transduce(&from_vec(vec![1, 2]), |_, v| v, vec![]);
    let second = op.transduce(&from_vec(vec![3]), |_, v| v, vec![]);
    assert_eq!(first, vec![1, 2]);
    assert_eq!(second, vec![3]);
  }

  #[test]
  fn reused_observable_restarts_from_seed() {
    let totals = from_iter(1..4).pipe(scan(|acc: i32, v: i32| acc + v, -10));
    let first = totals.to_vec();
    let second = totals.to_vec();
    assert_eq!(first, vec![-9, -7, -4]);
    assert_eq!(first, second);
  }
}
