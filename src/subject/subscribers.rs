use smallvec::SmallVec;

use crate::observer::{BoxedObserver, DynObserver};

/// Identifies one registration on a subject.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub(crate) usize);

impl SubscriptionId {
  pub fn index(&self) -> usize { self.0 }
}

/// Subscriber arena keyed by [`SubscriptionId`].
///
/// # Design
///
/// - **SmallVec Optimization**: Uses `SmallVec<[_; 2]>` to avoid heap
///   allocation for the common case of 0-2 subscribers.
/// - **Pre-allocated IDs**: ids are handed out by the subject before the
///   observer is stored, so a queued subscription already has its id.
/// - Insertion order is delivery order.
pub(crate) struct Subscribers<Ob> {
  items: SmallVec<[(SubscriptionId, Ob); 2]>,
}

impl<Ob> Default for Subscribers<Ob> {
  fn default() -> Self { Self { items: SmallVec::new() } }
}

impl<Ob> Subscribers<Ob> {
  /// Insert an observer with a pre-allocated ID.
  #[inline]
  pub(crate) fn insert(&mut self, id: SubscriptionId, observer: Ob) {
    self.items.push((id, observer));
  }

  #[inline]
  pub(crate) fn len(&self) -> usize { self.items.len() }
}

impl<'a, Item> Subscribers<BoxedObserver<'a, Item>> {
  /// Broadcast value to all observers with optimal cloning.
  ///
  /// The value is cloned for all observers except the last one, which
  /// receives the moved value.
  pub(crate) fn broadcast_value(&mut self, value: Item)
  where
    Item: Clone,
  {
    let mut iter = self.items.iter_mut().peekable();
    while let Some((_, observer)) = iter.next() {
      if iter.peek().is_some() {
        observer.box_next(value.clone());
      } else {
        observer.box_next(value);
        break;
      }
    }
  }

  /// Drop observers whose state was lost. Returns how many were removed.
  pub(crate) fn prune_closed(&mut self) -> usize {
    let before = self.items.len();
    self.items.retain(|(_, observer)| !observer.box_is_closed());
    before - self.items.len()
  }
}
