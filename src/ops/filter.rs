use std::rc::Rc;

use crate::{observer::Observer, ops::Operator};

/// Emit only those items that pass a predicate test. Items that fail it
/// leave the downstream state untouched.
///
/// ```
/// use rxfold::prelude::*;
///
/// let evens = from_iter(0..10).pipe(filter(|v: &i32| v % 2 == 0)).to_vec();
/// assert_eq!(evens, vec![0, 2, 4, 6, 8]);
/// ```
pub fn filter<F>(predicate: F) -> Filter<F> { Filter(Rc::new(predicate)) }

pub struct Filter<F>(Rc<F>);

impl<F> Clone for Filter<F> {
  fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<In, F> Operator<In> for Filter<F>
where
  F: Fn(&In) -> bool,
{
  type Out = In;
  type Adapter<O>
    = FilterObserver<O, F>
  where
    O: Observer<Self::Out>;

  #[inline]
  fn wrap<O>(&self, downstream: O) -> Self::Adapter<O>
  where
    O: Observer<Self::Out>,
  {
    FilterObserver { observer: downstream, predicate: self.0.clone() }
  }

  #[inline]
  fn into_downstream<O>(adapter: Self::Adapter<O>) -> O
  where
    O: Observer<Self::Out>,
  {
    adapter.observer
  }
}

transform_by_wrap!(Filter<F>);

pub struct FilterObserver<O, F> {
  observer: O,
  predicate: Rc<F>,
}

impl<Item, O, F> Observer<Item> for FilterObserver<O, F>
where
  O: Observer<Item>,
  F: Fn(&Item) -> bool,
{
  #[inline]
  fn next(self, value: Item) -> Self {
    if (self.predicate)(&value) {
      FilterObserver { observer: self.observer.next(value), predicate: self.predicate }
    } else {
      self
    }
  }

  fn is_closed(&self) -> bool { self.observer.is_closed() }

  fn checkpoint(&self) -> Option<Self> {
    let observer = self.observer.checkpoint()?;
    Some(FilterObserver { observer, predicate: self.predicate.clone() })
  }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;

  #[test]
  fn rejects_everything() {
    let out = from_iter(0..10).pipe(filter(|_: &i32| false)).to_vec();
    assert!(out.is_empty());
  }

  #[test]
  fn state_passes_through_rejected_items() {
    let recorded = from_vec(vec!["keep", "drop", "keep"])
      .pipe(filter(|v: &&str| *v == "keep"))
      .drive(Recorder::new());
    assert_eq!(recorded.items(), &["keep", "keep"]);
  }

  #[test]
  fn filter_then_map() {
    let out = from_iter(1..5)
      .pipe(pipe!(filter(|v: &i32| v % 2 == 0), map(|v: i32| v * 2)))
      .to_vec();
    assert_eq!(out, vec![4, 8]);
  }
}
