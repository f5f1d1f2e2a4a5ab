use tracing::trace;

use crate::{
  observable::{from_vec, FromVec, Observable},
  observer::Observer,
  ops::{Operator, Transform},
};

/// Drives the source once, immediately, and replays the recorded items to
/// every later drive.
///
/// The source must be finite. Inside a subject (observer level) there is
/// nothing to record ahead of time and `memoize` passes observers through
/// unchanged.
///
/// ```
/// use std::cell::Cell;
/// use rxfold::prelude::*;
///
/// let runs = Cell::new(0);
/// let source = create(|emitter: &mut dyn Emitter<char>| {
///   runs.set(runs.get() + 1);
///   emitter.next('a');
///   emitter.next('b');
/// });
/// let cached = source.pipe(memoize());
/// assert_eq!(cached.to_vec(), vec!['a', 'b']);
/// assert_eq!(cached.to_vec(), vec!['a', 'b']);
/// assert_eq!(runs.get(), 1);
/// ```
pub fn memoize() -> Memoize { Memoize }

#[derive(Clone, Copy, Debug, Default)]
pub struct Memoize;

impl<In> Operator<In> for Memoize {
  type Out = In;
  type Adapter<O>
    = O
  where
    O: Observer<Self::Out>;

  #[inline]
  fn wrap<O>(&self, downstream: O) -> O
  where
    O: Observer<Self::Out>,
  {
    downstream
  }

  #[inline]
  fn into_downstream<O>(adapter: O) -> O
  where
    O: Observer<Self::Out>,
  {
    adapter
  }
}

impl<Source> Transform<Source> for Memoize
where
  Source: Observable,
  Source::Item: Clone,
{
  type Output = FromVec<Source::Item>;

  fn apply(self, source: Source) -> Self::Output {
    let items = source.to_vec();
    trace!(items = items.len(), "memoized source");
    from_vec(items)
  }
}

#[cfg(test)]
mod test {
  use std::cell::RefCell;

  use crate::prelude::*;

  #[test]
  fn source_side_effects_run_once() {
    let log = RefCell::new(vec![]);
    let source = create(|emitter: &mut dyn Emitter<char>| {
      for c in ['a', 'b', 'c'] {
        log.borrow_mut().push(c);
        emitter.next(c);
      }
    });

    let memoized = source.pipe(memoize());
    assert_eq!(*log.borrow(), vec!['a', 'b', 'c']);

    let first = memoized.clone().pipe(map(|x: char| format!("{x} - memoized"))).to_vec();
    let second = memoized.to_vec();
    assert_eq!(first, vec!["a - memoized", "b - memoized", "c - memoized"]);
    assert_eq!(second, vec!['a', 'b', 'c']);
    assert_eq!(log.borrow().len(), 3);
  }

  #[test]
  fn memoize_after_operators() {
    let cached = from_iter(1..4).pipe(pipe!(map(|v: i32| v * 2), memoize()));
    assert_eq!(cached.to_vec(), vec![2, 4, 6]);
    assert_eq!(cached.len(), 3);
  }

  #[test]
  fn observer_level_memoize_is_identity() {
    let sum = memoize().transduce(&from_vec(vec![1, 2, 3]), |acc, v| acc + v, 0);
    assert_eq!(sum, 6);
  }
}
