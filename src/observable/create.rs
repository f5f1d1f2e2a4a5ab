use std::marker::PhantomData;

use crate::{
  observable::Observable,
  observer::{DynObserver, Observer},
};

/// A trait for emitting items into an observer from a closure.
///
/// [`create`] cannot hand its closure the concrete downstream observer type
/// (a closure cannot be generic over it), so the closure receives an
/// `&mut dyn Emitter` that threads the observer state behind the scenes.
pub trait Emitter<Item> {
  fn next(&mut self, value: Item);
}

/// Wrapper to implement Emitter for Option<O>
struct CreateEmitter<O>(Option<O>);

impl<O, Item> Emitter<Item> for CreateEmitter<O>
where
  O: Observer<Item>,
{
  #[inline]
  fn next(&mut self, value: Item) { self.0.box_next(value) }
}

/// Observable created from a function.
///
/// The function runs once per drive.
///
/// # Panics
///
/// A panic in a downstream transition unwinds out of `emitter.next`. If the
/// closure catches it and returns normally, the downstream state is gone
/// unless the observer keeps a [checkpoint](Observer::checkpoint); the
/// drive then panics with "observer state lost".
///
/// ```
/// use rxfold::prelude::*;
///
/// let from1to3 = create(|emitter: &mut dyn Emitter<i32>| {
///   emitter.next(1);
///   emitter.next(2);
///   emitter.next(3);
/// });
/// assert_eq!(from1to3.to_vec(), vec![1, 2, 3]);
/// ```
pub fn create<Item, F>(f: F) -> Create<F, Item>
where
  F: Fn(&mut dyn Emitter<Item>),
{
  Create { f, _marker: PhantomData }
}

pub struct Create<F, Item> {
  f: F,
  _marker: PhantomData<fn() -> Item>,
}

impl<F: Clone, Item> Clone for Create<F, Item> {
  fn clone(&self) -> Self { Self { f: self.f.clone(), _marker: PhantomData } }
}

impl<F, Item> Observable for Create<F, Item>
where
  F: Fn(&mut dyn Emitter<Item>),
{
  type Item = Item;

  fn drive<O>(&self, observer: O) -> O
  where
    O: Observer<Self::Item>,
  {
    let mut emitter = CreateEmitter(Some(observer));
    (self.f)(&mut emitter);
    match emitter.0 {
      Some(observer) => observer,
      // a downstream panic was caught inside the closure
      None => panic!("observer state lost: a transition panicked inside `create`"),
    }
  }
}
