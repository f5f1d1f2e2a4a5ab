use crate::{observable::Observable, observer::Observer};

/// Creates an observable producing a single value.
///
/// # Examples
///
/// ```
/// use rxfold::prelude::*;
///
/// assert_eq!(once(123).to_vec(), vec![123]);
/// ```
pub fn once<Item: Clone>(v: Item) -> Once<Item> { Once(v) }

#[derive(Clone)]
pub struct Once<Item>(Item);

impl<Item: Clone> Observable for Once<Item> {
  type Item = Item;

  #[inline]
  fn drive<O>(&self, observer: O) -> O
  where
    O: Observer<Self::Item>,
  {
    observer.next(self.0.clone())
  }
}
