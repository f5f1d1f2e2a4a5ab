//! Observer trait and implementations
//!
//! An observer is a state machine: consuming an item yields the observer's
//! next state. Sources thread that state through every item they emit and
//! hand the final state back to the caller.

// ============================================================================
// Observer Trait
// ============================================================================

/// Observer trait: the consumer of data in reactive programming.
///
/// `next` takes the observer by value and returns the state reached after
/// consuming `value`. Stateless observers simply return `self`; stateful ones
/// return a new value carrying the updated state.
pub trait Observer<Item>: Sized {
  /// Consume one item and return the next observer state.
  fn next(self, value: Item) -> Self;

  /// Checks if the observer can no longer accept items.
  ///
  /// Only type-erased observers whose state was lost mid-transition report
  /// `true`; subjects prune such observers.
  fn is_closed(&self) -> bool { false }

  /// A copy of the current state to fall back to if the next transition
  /// unwinds.
  ///
  /// Observers that are handles to shared state (a [`Subject`]) return one,
  /// and operator adapters pass the request through to their downstream.
  /// By default the state is consumed by the panicking transition and lost.
  ///
  /// [`Subject`]: crate::subject::Subject
  fn checkpoint(&self) -> Option<Self> { None }
}

// ============================================================================
// DynObserver Trait - Object-safe Observer
// ============================================================================

/// Helper trait to enable object-safe observers (`Box<dyn DynObserver>`).
///
/// [`Observer::next`] moves `self`, which a vtable cannot express for an
/// unsized receiver. `DynObserver` is implemented for `Option<O>`: the state
/// is taken out of the slot, advanced, and put back. When the transition
/// unwinds, the slot gets the observer's [checkpoint](Observer::checkpoint)
/// instead, or stays empty without one.
pub trait DynObserver<Item> {
  fn box_next(&mut self, value: Item);
  fn box_is_closed(&self) -> bool;
}

impl<O, Item> DynObserver<Item> for Option<O>
where
  O: Observer<Item>,
{
  #[inline]
  fn box_next(&mut self, value: Item) {
    let Some(observer) = self.take() else { return };
    let restore = RestoreOnUnwind { backup: observer.checkpoint(), slot: self };
    *restore.slot = Some(observer.next(value));
  }

  #[inline]
  fn box_is_closed(&self) -> bool { self.as_ref().is_none_or(Observer::is_closed) }
}

/// Refills an observer slot that a transition left empty.
struct RestoreOnUnwind<'s, O> {
  slot: &'s mut Option<O>,
  backup: Option<O>,
}

impl<O> Drop for RestoreOnUnwind<'_, O> {
  fn drop(&mut self) {
    if self.slot.is_none() {
      *self.slot = self.backup.take();
    }
  }
}

/// Boxed observer state (single-threaded, no Send bound).
pub type BoxedObserver<'a, Item> = Box<dyn DynObserver<Item> + 'a>;

impl<'a, Item> Observer<Item> for BoxedObserver<'a, Item> {
  #[inline]
  fn next(mut self, value: Item) -> Self {
    self.box_next(value);
    self
  }

  #[inline]
  fn is_closed(&self) -> bool { self.box_is_closed() }
}

/// Type-erase an observer state.
#[inline]
pub fn boxed<'a, Item, O>(observer: O) -> BoxedObserver<'a, Item>
where
  O: Observer<Item> + 'a,
{
  Box::new(Some(observer))
}

// ============================================================================
// FnMutObserver - Closure adapter
// ============================================================================

/// Closure adapter: every item is handed to the closure and the observer
/// state never changes.
///
/// ```
/// use rxfold::prelude::*;
///
/// let mut sum = 0;
/// from_vec(vec![1, 2, 3]).drive(FnMutObserver(|v: i32| sum += v));
/// assert_eq!(sum, 6);
/// ```
#[derive(Clone)]
pub struct FnMutObserver<F>(pub F);

impl<F, Item> Observer<Item> for FnMutObserver<F>
where
  F: FnMut(Item),
{
  #[inline]
  fn next(mut self, value: Item) -> Self {
    (self.0)(value);
    self
  }
}

// ============================================================================
// Recorder - collects every item
// ============================================================================

/// An observer whose state is the ordered list of items seen so far.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recorder<Item>(Vec<Item>);

impl<Item> Default for Recorder<Item> {
  fn default() -> Self { Self(Vec::new()) }
}

impl<Item> Recorder<Item> {
  pub fn new() -> Self { Self::default() }

  pub fn items(&self) -> &[Item] { &self.0 }

  pub fn into_vec(self) -> Vec<Item> { self.0 }
}

impl<Item> Observer<Item> for Recorder<Item> {
  #[inline]
  fn next(mut self, value: Item) -> Self {
    self.0.push(value);
    self
  }
}

// ============================================================================
// Fold - reducer as an observer
// ============================================================================

/// Lifts a reducer `(Acc, Item) -> Acc` into an observer whose state is the
/// accumulator. This is the bridge from the push model to the pull model.
pub struct Fold<Acc, R> {
  acc: Acc,
  reducer: R,
}

impl<Acc, R> Fold<Acc, R> {
  pub fn new(reducer: R, seed: Acc) -> Self { Self { acc: seed, reducer } }

  pub fn into_acc(self) -> Acc { self.acc }
}

impl<Acc, R, Item> Observer<Item> for Fold<Acc, R>
where
  R: FnMut(Acc, Item) -> Acc,
{
  #[inline]
  fn next(mut self, value: Item) -> Self {
    self.acc = (self.reducer)(self.acc, value);
    self
  }
}

// ============================================================================
// Tests
// ============================================================================
