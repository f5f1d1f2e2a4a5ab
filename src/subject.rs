//! Hot and cold multicast subjects.
//!
//! A [`Subject`] keeps one observer state per subscription and advances all
//! of them on every [`publish`](Subject::publish). Every subscriber is first
//! decorated with the subject's operator, so a subject built with
//! `cold(map(f))` hands `f(item)` to its subscribers.
//!
//! - **hot**: subscribers only see items published after they subscribed.
//! - **cold**: every published item is kept and replayed, in publish order,
//!   to each new subscriber before it joins the live stream.
//!
//! A subject is itself an [`Observer`] of its input type, so subjects can
//! subscribe to each other and form dataflow graphs.
//!
//! # Reentrancy
//!
//! A `publish` or `subscribe` issued while the subject is already delivering
//! (from inside one of its observers) is queued by default and run, in
//! arrival order, by the outermost call before it returns. With
//! [`Reentrancy::Reject`] such calls fail with [`SubjectError::Reentrant`].
//!
//! # Panics in observers
//!
//! A panicking operator or observer unwinds out of the publish call that
//! triggered it; subscribers after it do not receive that item. The
//! panicking subscriber's state is lost and it is pruned on the next
//! publish. Every other subscriber, and the replay buffer, are kept.
//!
//! A subject registered on another subject (directly, behind an operator,
//! or as a fluent stage) is a handle and keeps its link when a panic below
//! it unwinds through the upstream delivery.

use std::{
  cell::{Cell, RefCell},
  collections::VecDeque,
  rc::Rc,
};

use tracing::{debug, trace, warn};

use crate::{
  error::{Operation, SubjectError},
  observer::{boxed, BoxedObserver, DynObserver, Observer},
  ops::{Identity, Operator},
};

mod config;
mod replay;
mod subscribers;

pub use config::{Reentrancy, Replay, SubjectConfig};
use replay::ReplayBuffer;
pub use subscribers::SubscriptionId;
use subscribers::Subscribers;

/// Creates a hot subject: subscribers receive items published after they
/// subscribe, decorated by `op`.
///
/// ```
/// use std::{cell::RefCell, rc::Rc};
/// use rxfold::prelude::*;
///
/// let subject = hot(map(|x: &'static str| [x, x]));
/// subject.publish("event1").unwrap();
///
/// let seen = Rc::new(RefCell::new(vec![]));
/// let sink = seen.clone();
/// subject.subscribe(FnMutObserver(move |v| sink.borrow_mut().push(v))).unwrap();
/// subject.publish("event2").unwrap();
///
/// assert_eq!(*seen.borrow(), vec![["event2", "event2"]]);
/// ```
pub fn hot<'a, Item, Op>(op: Op) -> Subject<'a, Item, Op>
where
  Item: Clone + 'a,
  Op: Operator<Item>,
{
  Subject::with_config(op, SubjectConfig::hot())
}

/// Creates a cold subject: every published item is recorded and replayed to
/// each new subscriber before it receives live items.
///
/// ```
/// use std::{cell::RefCell, rc::Rc};
/// use rxfold::prelude::*;
///
/// let subject = cold(flat_map(|x: char| from_vec(vec![x, x])));
/// subject.publish('a').unwrap();
///
/// let seen = Rc::new(RefCell::new(vec![]));
/// let sink = seen.clone();
/// subject.subscribe(FnMutObserver(move |v| sink.borrow_mut().push(v))).unwrap();
/// subject.publish('b').unwrap();
///
/// assert_eq!(*seen.borrow(), vec!['a', 'a', 'b', 'b']);
/// ```
pub fn cold<'a, Item, Op>(op: Op) -> Subject<'a, Item, Op>
where
  Item: Clone + 'a,
  Op: Operator<Item>,
{
  Subject::with_config(op, SubjectConfig::cold())
}

/// A multicast subject. Cloning yields another handle to the same subject.
pub struct Subject<'a, Item, Op = Identity> {
  inner: Rc<SubjectInner<'a, Item, Op>>,
}

struct SubjectInner<'a, Item, Op> {
  op: Op,
  config: SubjectConfig,
  next_id: Cell<usize>,
  state: RefCell<SubjectState<'a, Item>>,
  pending: RefCell<VecDeque<Request<'a, Item>>>,
}

struct SubjectState<'a, Item> {
  subscribers: Subscribers<BoxedObserver<'a, Item>>,
  replay: ReplayBuffer<Item>,
}

/// A publish or subscribe waiting for the subject to become idle.
enum Request<'a, Item> {
  Publish(Item),
  Subscribe(SubscriptionId, BoxedObserver<'a, Item>),
}

impl<'a, Item, Op> Clone for Subject<'a, Item, Op> {
  fn clone(&self) -> Self { Self { inner: self.inner.clone() } }
}

impl<'a, Item: Clone + 'a> Subject<'a, Item, Identity> {
  /// A hot subject without an operator.
  pub fn new() -> Self { hot(Identity) }
}

impl<'a, Item: Clone + 'a> Default for Subject<'a, Item, Identity> {
  fn default() -> Self { Self::new() }
}

impl<'a, Item, Op> Subject<'a, Item, Op>
where
  Item: Clone + 'a,
  Op: Operator<Item>,
{
  pub fn with_config(op: Op, config: SubjectConfig) -> Self {
    let state = SubjectState {
      subscribers: Subscribers::default(),
      replay: ReplayBuffer::new(config.replay),
    };
    Subject {
      inner: Rc::new(SubjectInner {
        op,
        config,
        next_id: Cell::new(0),
        state: RefCell::new(state),
        pending: RefCell::new(VecDeque::new()),
      }),
    }
  }

  pub fn config(&self) -> SubjectConfig { self.inner.config }

  /// The operator applied to every subscriber.
  pub fn operator(&self) -> &Op { &self.inner.op }

  /// Deliver `item` to every current subscriber, recording it first when the
  /// replay policy asks for it.
  pub fn publish(&self, item: Item) -> Result<(), SubjectError> {
    self.run(Request::Publish(item), Operation::Publish, self.inner.config.reentrancy)
  }

  /// Register `observer`, decorated with the subject's operator. Under a
  /// replay policy the recorded items are fed to it before it joins.
  pub fn subscribe<O>(&self, observer: O) -> Result<SubscriptionId, SubjectError>
  where
    O: Observer<Op::Out> + 'a,
    Op::Adapter<O>: 'a,
  {
    let decorated = self.inner.op.wrap(observer);
    self.register(boxed(decorated))
  }

  /// Register `observer` on the subject's raw input, bypassing the operator.
  /// Replay applies as for [`subscribe`](Subject::subscribe).
  pub fn forward_to<O>(&self, observer: O) -> Result<SubscriptionId, SubjectError>
  where
    O: Observer<Item> + 'a,
  {
    self.register(boxed(observer))
  }

  /// Number of registered subscribers.
  ///
  /// # Panics
  ///
  /// When called from inside a delivery of this same subject.
  pub fn subscriber_count(&self) -> usize { self.inner.state.borrow().subscribers.len() }

  /// Number of items currently held for replay.
  ///
  /// # Panics
  ///
  /// When called from inside a delivery of this same subject.
  pub fn replay_len(&self) -> usize { self.inner.state.borrow().replay.len() }

  /// Like [`forward_to`](Subject::forward_to), but always queues when the
  /// subject is busy. Used to wire subjects together.
  pub(crate) fn link<O>(&self, observer: O) -> SubscriptionId
  where
    O: Observer<Item> + 'a,
  {
    let id = self.reserve_id();
    // queueing never fails
    let request = Request::Subscribe(id, boxed(observer));
    let _ = self.run(request, Operation::Subscribe, Reentrancy::Queue);
    id
  }

  fn reserve_id(&self) -> SubscriptionId {
    let id = SubscriptionId(self.inner.next_id.get());
    self.inner.next_id.set(id.0 + 1);
    id
  }

  fn register(&self, observer: BoxedObserver<'a, Item>) -> Result<SubscriptionId, SubjectError> {
    let id = self.reserve_id();
    self.run(Request::Subscribe(id, observer), Operation::Subscribe, self.inner.config.reentrancy)?;
    Ok(id)
  }

  fn run(
    &self,
    request: Request<'a, Item>,
    operation: Operation,
    reentrancy: Reentrancy,
  ) -> Result<(), SubjectError> {
    let Ok(mut state) = self.inner.state.try_borrow_mut() else {
      return self.defer(request, operation, reentrancy);
    };
    let mut guard = DiscardOnUnwind { pending: &self.inner.pending, drained: false };
    state.apply(request);
    loop {
      let next = self.inner.pending.borrow_mut().pop_front();
      match next {
        Some(request) => state.apply(request),
        None => break,
      }
    }
    guard.drained = true;
    Ok(())
  }

  fn defer(
    &self,
    request: Request<'a, Item>,
    operation: Operation,
    reentrancy: Reentrancy,
  ) -> Result<(), SubjectError> {
    match reentrancy {
      Reentrancy::Queue => {
        debug!(%operation, "subject busy, request queued");
        self.inner.pending.borrow_mut().push_back(request);
        Ok(())
      }
      Reentrancy::Reject => {
        debug!(%operation, "subject busy, request rejected");
        Err(SubjectError::Reentrant(operation))
      }
    }
  }
}

impl<'a, Item: Clone> SubjectState<'a, Item> {
  fn apply(&mut self, request: Request<'a, Item>) {
    match request {
      Request::Publish(item) => self.publish(item),
      Request::Subscribe(id, observer) => self.subscribe(id, observer),
    }
  }

  fn publish(&mut self, item: Item) {
    let lost = self.subscribers.prune_closed();
    if lost > 0 {
      warn!(lost, "pruned subscribers whose state was lost to a panic");
    }
    self.replay.record(&item);
    trace!(subscribers = self.subscribers.len(), "publish");
    self.subscribers.broadcast_value(item);
  }

  fn subscribe(&mut self, id: SubscriptionId, mut observer: BoxedObserver<'a, Item>) {
    for item in self.replay.iter() {
      observer.box_next(item.clone());
    }
    trace!(id = id.index(), replayed = self.replay.len(), "subscribe");
    self.subscribers.insert(id, observer);
  }
}

/// Drops queued requests when a delivery unwinds before draining them, so
/// they are not run by a later, unrelated call.
struct DiscardOnUnwind<'r, T> {
  pending: &'r RefCell<VecDeque<T>>,
  drained: bool,
}

impl<T> Drop for DiscardOnUnwind<'_, T> {
  fn drop(&mut self) {
    if !self.drained {
      if let Ok(mut pending) = self.pending.try_borrow_mut() {
        pending.clear();
      }
    }
  }
}

/// Publishing into a subject by driving it as an observer. A rejected
/// publish is logged and the item dropped.
impl<'a, Item, Op> Observer<Item> for Subject<'a, Item, Op>
where
  Item: Clone + 'a,
  Op: Operator<Item>,
{
  fn next(self, value: Item) -> Self {
    if let Err(err) = self.publish(value) {
      warn!(%err, "item dropped");
    }
    self
  }

  fn checkpoint(&self) -> Option<Self> { Some(self.clone()) }
}

#[cfg(test)]
mod test {
  use std::{
    cell::RefCell,
    panic::{self, AssertUnwindSafe},
    rc::Rc,
  };

  use crate::prelude::*;

  fn sink<T: 'static>() -> (Rc<RefCell<Vec<T>>>, FnMutObserver<impl FnMut(T)>) {
    let seen = Rc::new(RefCell::new(vec![]));
    let writer = seen.clone();
    (seen, FnMutObserver(move |v| writer.borrow_mut().push(v)))
  }

  #[test]
  fn hot_misses_earlier_items() {
    let subject = hot(Identity);
    subject.publish("x").unwrap();
    let (seen, observer) = sink();
    subject.subscribe(observer).unwrap();
    subject.publish("y").unwrap();
    assert_eq!(*seen.borrow(), vec!["y"]);
    assert_eq!(subject.replay_len(), 0);
  }

  #[test]
  fn hot_map_decorates_subscribers() {
    let subject = hot(map(|x: &'static str| (x, x)));
    subject.publish("event1").unwrap();
    let (seen, observer) = sink();
    subject.subscribe(observer).unwrap();
    subject.publish("event2").unwrap();
    subject.publish("event3").unwrap();
    assert_eq!(*seen.borrow(), vec![("event2", "event2"), ("event3", "event3")]);
  }

  #[test]
  fn cold_replays_then_goes_live() {
    let subject = cold(Identity);
    subject.publish("x").unwrap();
    let (seen, observer) = sink();
    subject.subscribe(observer).unwrap();
    assert_eq!(*seen.borrow(), vec!["x"]);
    subject.publish("y").unwrap();
    assert_eq!(*seen.borrow(), vec!["x", "y"]);
  }

  #[test]
  fn cold_flat_map() {
    let subject = cold(flat_map(|x: &'static str| from_vec(vec![x, x])));
    subject.publish("event1").unwrap();
    let (seen, observer) = sink();
    subject.subscribe(observer).unwrap();
    subject.publish("event2").unwrap();
    assert_eq!(*seen.borrow(), vec!["event1", "event1", "event2", "event2"]);
  }

  #[test]
  fn each_subscriber_has_its_own_scan_state() {
    let subject = cold(scan(|acc: i32, v: i32| acc + v, 0));
    subject.publish(1).unwrap();
    let (early, observer) = sink();
    subject.subscribe(observer).unwrap();
    subject.publish(2).unwrap();
    let (late, observer) = sink();
    subject.subscribe(observer).unwrap();
    subject.publish(3).unwrap();

    assert_eq!(*early.borrow(), vec![1, 3, 6]);
    assert_eq!(*late.borrow(), vec![1, 3, 6]);
  }

  #[test]
  fn bounded_replay() {
    let subject = Subject::with_config(Identity, SubjectConfig::hot().with_replay(Replay::Last(2)));
    (1..=4).for_each(|v| subject.publish(v).unwrap());
    let (seen, observer) = sink();
    subject.subscribe(observer).unwrap();
    assert_eq!(*seen.borrow(), vec![3, 4]);
  }

  #[test]
  fn subscription_ids_are_distinct() {
    let subject = Subject::<i32>::new();
    let a = subject.subscribe(FnMutObserver(|_: i32| {})).unwrap();
    let b = subject.forward_to(FnMutObserver(|_: i32| {})).unwrap();
    assert_ne!(a, b);
    assert_eq!(subject.subscriber_count(), 2);
  }

  #[test]
  fn forward_to_bypasses_operator() {
    let subject = hot(map(|v: i32| v * 100));
    let (raw, observer) = sink();
    subject.forward_to(observer).unwrap();
    let (mapped, observer) = sink();
    subject.subscribe(observer).unwrap();
    subject.publish(1).unwrap();
    assert_eq!(*raw.borrow(), vec![1]);
    assert_eq!(*mapped.borrow(), vec![100]);
  }

  #[test]
  fn reentrant_publish_is_queued() {
    let subject = hot(Identity);
    let (seen, observer) = sink();
    subject.subscribe(observer).unwrap();
    let feedback = subject.clone();
    subject
      .subscribe(FnMutObserver(move |v: i32| {
        if v < 3 {
          feedback.publish(v + 1).unwrap();
        }
      }))
      .unwrap();

    subject.publish(1).unwrap();
    assert_eq!(*seen.borrow(), vec![1, 2, 3]);
  }

  #[test]
  fn reentrant_subscribe_is_queued() {
    let subject = cold(Identity);
    let (seen, observer) = sink();
    let slot = RefCell::new(Some(observer));
    let handle = subject.clone();
    subject
      .subscribe(FnMutObserver(move |_: i32| {
        if let Some(observer) = slot.borrow_mut().take() {
          handle.subscribe(observer).unwrap();
        }
      }))
      .unwrap();

    subject.publish(1).unwrap();
    subject.publish(2).unwrap();
    // the late subscriber ran after item 1 was recorded, so it replays it
    assert_eq!(*seen.borrow(), vec![1, 2]);
  }

  #[test]
  fn reentrant_publish_rejected() {
    let config = SubjectConfig::hot().with_reentrancy(Reentrancy::Reject);
    let subject = Subject::with_config(Identity, config);
    let errors = Rc::new(RefCell::new(vec![]));
    let feedback = subject.clone();
    let log = errors.clone();
    subject
      .subscribe(FnMutObserver(move |v: i32| {
        if let Err(err) = feedback.publish(v + 1) {
          log.borrow_mut().push(err);
        }
      }))
      .unwrap();

    subject.publish(1).unwrap();
    assert_eq!(*errors.borrow(), vec![SubjectError::Reentrant(Operation::Publish)]);
  }

  #[test]
  fn panicking_subscriber_is_pruned_others_survive() {
    let subject = cold(Identity);
    subject
      .subscribe(FnMutObserver(|v: i32| {
        if v == 2 {
          panic!("boom");
        }
      }))
      .unwrap();
    let (seen, observer) = sink();
    subject.subscribe(observer).unwrap();

    subject.publish(1).unwrap();
    let result = panic::catch_unwind(AssertUnwindSafe(|| subject.publish(2)));
    assert!(result.is_err());
    // the item was recorded, but delivery stopped at the panicking subscriber
    assert_eq!(*seen.borrow(), vec![1]);

    subject.publish(3).unwrap();
    assert_eq!(*seen.borrow(), vec![1, 3]);
    assert_eq!(subject.subscriber_count(), 1);
    assert_eq!(subject.replay_len(), 3);
  }

  #[test]
  fn panic_below_a_linked_subject_keeps_the_link() {
    let source = hot(map(|x: i32| x + 1));
    let relay = hot(Identity);
    source.subscribe(relay.clone()).unwrap();
    relay
      .subscribe(FnMutObserver(|v: i32| {
        if v == 3 {
          panic!("boom");
        }
      }))
      .unwrap();
    let (seen, observer) = sink();
    relay.subscribe(observer).unwrap();

    source.publish(1).unwrap();
    let result = panic::catch_unwind(AssertUnwindSafe(|| source.publish(2)));
    assert!(result.is_err());
    source.publish(3).unwrap();

    assert_eq!(*seen.borrow(), vec![2, 4]);
    assert_eq!(source.subscriber_count(), 1);
    assert_eq!(relay.subscriber_count(), 1);
  }

  #[test]
  fn publish_from_drop_while_unwinding() {
    struct OnDrop<F: FnMut()>(F);

    impl<F: FnMut()> Drop for OnDrop<F> {
      fn drop(&mut self) { (self.0)() }
    }

    let subject = hot(Identity);
    let feedback = subject.clone();
    subject
      .subscribe(FnMutObserver(move |v: i32| {
        if v == 1 {
          feedback.publish(2).unwrap();
        }
      }))
      .unwrap();
    let (seen, observer) = sink();
    subject.subscribe(observer).unwrap();

    let handle = subject.clone();
    let result = panic::catch_unwind(AssertUnwindSafe(move || {
      let _publish = OnDrop(move || handle.publish(1).unwrap());
      panic!("unrelated");
    }));

    assert!(result.is_err());
    assert_eq!(*seen.borrow(), vec![1, 2]);
    assert_eq!(subject.subscriber_count(), 2);
  }

  #[test]
  fn subject_as_observer() {
    let target = cold(Identity);
    let out = from_vec(vec![1, 2, 3]).drive(target.clone());
    out.publish(4).unwrap();
    let (seen, observer) = sink();
    target.subscribe(observer).unwrap();
    assert_eq!(*seen.borrow(), vec![1, 2, 3, 4]);
  }
}
